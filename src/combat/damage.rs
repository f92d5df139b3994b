//! Tiered d20 damage rule
//!
//! The roll picks a band, the band scales the attacker's attack power.
//! Defender stats never matter: there is no armor or mitigation.

use serde::Serialize;

use crate::combat::combatant::Fighter;
use crate::combat::constants::{MISS_MAX, STRONG_MAX, VERY_STRONG_MAX, WEAK_MAX};
use crate::combat::dice::Roll;
use crate::core::types::{Attack, Health, Side};

/// Band a roll falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HitTier {
    /// 1-5: no damage
    Miss,
    /// 6-10: half attack, rounded down
    Weak,
    /// 11-15: full attack
    Strong,
    /// 16-19: one and a half times attack, rounded down
    VeryStrong,
    /// 20: double attack
    Critical,
}

impl HitTier {
    pub fn from_roll(roll: Roll) -> Self {
        match roll.value() {
            v if v <= MISS_MAX => HitTier::Miss,
            v if v <= WEAK_MAX => HitTier::Weak,
            v if v <= STRONG_MAX => HitTier::Strong,
            v if v <= VERY_STRONG_MAX => HitTier::VeryStrong,
            _ => HitTier::Critical,
        }
    }

    /// Damage this band deals for a given attack power
    pub fn damage(self, attack: Attack) -> Health {
        match self {
            HitTier::Miss => 0,
            HitTier::Weak => attack / 2,
            HitTier::Strong => attack,
            HitTier::VeryStrong => attack.saturating_mul(3) / 2,
            HitTier::Critical => attack.saturating_mul(2),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HitTier::Miss => "no effect",
            HitTier::Weak => "weak hit",
            HitTier::Strong => "strong hit",
            HitTier::VeryStrong => "very strong hit",
            HitTier::Critical => "CRITICAL",
        }
    }
}

/// Pure damage rule: `(attack, roll) -> damage`
pub fn roll_damage(attack: Attack, roll: Roll) -> Health {
    HitTier::from_roll(roll).damage(attack)
}

/// What happened in one attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackReport {
    pub attacker: String,
    pub attacker_side: Side,
    pub defender: String,
    pub roll: Roll,
    pub tier: HitTier,
    pub damage: Health,
    pub defender_health: Health,
    pub defender_defeated: bool,
}

/// Roll-driven attack of `attacker` on `defender`
pub fn resolve_attack<A, D>(attacker: &A, defender: &mut D, roll: Roll) -> AttackReport
where
    A: Fighter + ?Sized,
    D: Fighter + ?Sized,
{
    let tier = HitTier::from_roll(roll);
    let damage = tier.damage(attacker.combatant().attack());
    defender.combatant_mut().apply_damage(damage);

    let target = defender.combatant();
    AttackReport {
        attacker: attacker.name().to_string(),
        attacker_side: attacker.side(),
        defender: target.name().to_string(),
        roll,
        tier,
        damage,
        defender_health: target.health(),
        defender_defeated: !target.is_alive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::combatant::{Adversary, Combatant, Player};
    use crate::skills::AbilityGraph;

    fn roll(v: u8) -> Roll {
        Roll::new(v).unwrap()
    }

    #[test]
    fn test_damage_table_attack_10() {
        assert_eq!(roll_damage(10, roll(1)), 0);
        assert_eq!(roll_damage(10, roll(8)), 5);
        assert_eq!(roll_damage(10, roll(12)), 10);
        assert_eq!(roll_damage(10, roll(17)), 15);
        assert_eq!(roll_damage(10, roll(20)), 20);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(HitTier::from_roll(roll(5)), HitTier::Miss);
        assert_eq!(HitTier::from_roll(roll(6)), HitTier::Weak);
        assert_eq!(HitTier::from_roll(roll(10)), HitTier::Weak);
        assert_eq!(HitTier::from_roll(roll(11)), HitTier::Strong);
        assert_eq!(HitTier::from_roll(roll(15)), HitTier::Strong);
        assert_eq!(HitTier::from_roll(roll(16)), HitTier::VeryStrong);
        assert_eq!(HitTier::from_roll(roll(19)), HitTier::VeryStrong);
        assert_eq!(HitTier::from_roll(roll(20)), HitTier::Critical);
    }

    #[test]
    fn test_odd_attack_rounds_down() {
        // 13 * 0.5 = 6.5, 13 * 1.5 = 19.5
        assert_eq!(roll_damage(13, roll(7)), 6);
        assert_eq!(roll_damage(13, roll(18)), 19);
    }

    #[test]
    fn test_resolve_attack_applies_damage() {
        let player = Player::new(Combatant::new("Herói", 1, 100, 10), AbilityGraph::standard());
        let mut goblin = Adversary::new("Goblin", 1);

        let report = resolve_attack(&player, &mut goblin, roll(20));
        assert_eq!(report.damage, 20);
        assert_eq!(report.defender_health, 10);
        assert_eq!(report.attacker_side, Side::Player);
        assert!(!report.defender_defeated);

        let report = resolve_attack(&player, &mut goblin, roll(12));
        assert_eq!(goblin.stats().health(), 0);
        assert!(report.defender_defeated);
    }
}
