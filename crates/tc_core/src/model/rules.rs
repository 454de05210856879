use serde::{Deserialize, Serialize};

/// Contest format parameters.
///
/// The defaults reproduce the standard format: 8 shooters, 5 racks of
/// 5 balls per turn, top 3 from the opening round advancing to the final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestRules {
    /// Roster size for the opening round.
    pub num_shooters: usize,

    /// Racks per turn record.
    pub racks_per_turn: usize,

    /// Balls per rack. The last ball of each rack is the moneyball.
    pub balls_per_rack: usize,

    /// Advancement schedule: `advancing[i]` shooters survive normal round
    /// tier `i`. The tier after the last entry is the final, contested for
    /// a single winner.
    pub advancing: Vec<usize>,
}

impl Default for ContestRules {
    fn default() -> Self {
        Self { num_shooters: 8, racks_per_turn: 5, balls_per_rack: 5, advancing: vec![3] }
    }
}

impl ContestRules {
    /// Point value of ball position `ball` within a rack.
    pub fn ball_value(&self, ball: usize) -> u32 {
        if ball + 1 == self.balls_per_rack {
            2
        } else {
            1
        }
    }

    /// Slots contested by normal round tier `tier` (0-based).
    pub fn slots_for_tier(&self, tier: usize) -> usize {
        self.advancing.get(tier).copied().unwrap_or(1)
    }

    /// Whether normal round tier `tier` is the final.
    pub fn is_final_tier(&self, tier: usize) -> bool {
        tier >= self.advancing.len()
    }

    /// Maximum score a single turn record can reach.
    pub fn max_turn_score(&self) -> u32 {
        (0..self.balls_per_rack).map(|b| self.ball_value(b)).sum::<u32>()
            * self.racks_per_turn as u32
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.num_shooters < 2 {
            return Err(format!("at least 2 shooters required, got {}", self.num_shooters));
        }
        if self.racks_per_turn == 0 || self.balls_per_rack == 0 {
            return Err("racks_per_turn and balls_per_rack must be positive".to_string());
        }
        let mut prev = self.num_shooters;
        for (tier, &count) in self.advancing.iter().enumerate() {
            if count == 0 || count >= prev {
                return Err(format!(
                    "advancing[{}] must shrink the field: {} -> {}",
                    tier, prev, count
                ));
            }
            prev = count;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_valid() {
        let rules = ContestRules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.slots_for_tier(0), 3);
        assert_eq!(rules.slots_for_tier(1), 1);
        assert!(!rules.is_final_tier(0));
        assert!(rules.is_final_tier(1));
    }

    #[test]
    fn test_moneyball_value() {
        let rules = ContestRules::default();
        assert_eq!(rules.ball_value(0), 1);
        assert_eq!(rules.ball_value(3), 1);
        assert_eq!(rules.ball_value(4), 2);
        // 4 regular balls + 1 moneyball = 6 per rack, 5 racks
        assert_eq!(rules.max_turn_score(), 30);
    }

    #[test]
    fn test_non_shrinking_schedule_rejected() {
        let rules = ContestRules { advancing: vec![8], ..ContestRules::default() };
        assert!(rules.validate().is_err());

        let rules = ContestRules { advancing: vec![3, 3], ..ContestRules::default() };
        assert!(rules.validate().is_err());
    }
}
