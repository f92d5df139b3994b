//! Combat system constants - the d20 roll bands in one place
//!
//! Each band is inclusive of its upper bound. A roll above
//! `VERY_STRONG_MAX` is a critical hit.

/// Faces on the attack die
pub const D20_SIDES: u8 = 20;

/// Highest roll that deals no damage
pub const MISS_MAX: u8 = 5;

/// Highest roll that deals half attack
pub const WEAK_MAX: u8 = 10;

/// Highest roll that deals full attack
pub const STRONG_MAX: u8 = 15;

/// Highest roll that deals one and a half times attack
pub const VERY_STRONG_MAX: u8 = 19;
