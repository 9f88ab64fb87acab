//! Victory configuration.
//!
//! The hosting session parses its game options into a `VictoryConfig` and
//! hands it to `VictoryEvaluator::new`, which validates it. Optional
//! conditions are enabled by giving them a parameter.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::victory::VictoryCondition;

/// Victory-condition options for a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VictoryConfig {
    /// Evaluate the optional conditions at all.
    /// When off, only a player-agreed concession ends the game.
    pub check_victory: bool,

    /// Normalized combined score a side needs for a decisive win.
    /// 1.0 means every enabled condition fully met.
    pub achievement_threshold: f64,

    /// Percentage of enemy battle value that must be destroyed.
    pub bv_destroyed_percent: Option<u32>,

    /// Required friendly:enemy battle value ratio, as a percentage.
    pub bv_ratio_percent: Option<u32>,

    /// Number of kills a side needs.
    pub kill_count: Option<u32>,

    /// Win by destroying every enemy commander.
    pub commander_killed: bool,
}

impl Default for VictoryConfig {
    fn default() -> Self {
        Self {
            check_victory: true,
            achievement_threshold: 1.0,
            bv_destroyed_percent: None,
            bv_ratio_percent: Some(300),
            kill_count: None,
            commander_killed: false,
        }
    }
}

impl VictoryConfig {
    /// Only player-agreed concessions end the game.
    pub fn concession_only() -> Self {
        Self {
            check_victory: false,
            bv_ratio_percent: None,
            ..Self::default()
        }
    }

    /// Set the achievement threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.achievement_threshold = threshold;
        self
    }

    /// Enable the battle-value-destroyed condition.
    pub fn with_bv_destroyed(mut self, percent: u32) -> Self {
        self.check_victory = true;
        self.bv_destroyed_percent = Some(percent);
        self
    }

    /// Enable the battle-value-ratio condition.
    pub fn with_bv_ratio(mut self, percent: u32) -> Self {
        self.check_victory = true;
        self.bv_ratio_percent = Some(percent);
        self
    }

    /// Disable the battle-value-ratio condition.
    pub fn without_bv_ratio(mut self) -> Self {
        self.bv_ratio_percent = None;
        self
    }

    /// Enable the kill-count condition.
    pub fn with_kill_count(mut self, kills: u32) -> Self {
        self.check_victory = true;
        self.kill_count = Some(kills);
        self
    }

    /// Enable the enemy-commander-destroyed condition.
    pub fn with_commander_killed(mut self) -> Self {
        self.check_victory = true;
        self.commander_killed = true;
        self
    }

    /// Check the configuration for values the evaluator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.achievement_threshold.is_finite() || self.achievement_threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(self.achievement_threshold));
        }
        if let Some(value) = self.bv_destroyed_percent {
            if value == 0 || value > 100 {
                return Err(ConfigError::InvalidPercent { condition: "bv_destroyed", value });
            }
        }
        if let Some(value) = self.bv_ratio_percent {
            if value == 0 {
                return Err(ConfigError::InvalidPercent { condition: "bv_ratio", value });
            }
        }
        if self.kill_count == Some(0) {
            return Err(ConfigError::ZeroKillTarget);
        }
        if self.check_victory && self.enabled_conditions().is_empty() {
            return Err(ConfigError::NoConditionsEnabled);
        }
        Ok(())
    }

    /// Optional conditions in evaluation order.
    ///
    /// Force victory and last man standing are always present and are not
    /// part of this list.
    pub fn enabled_conditions(&self) -> Vec<VictoryCondition> {
        let mut conditions = Vec::new();
        if let Some(percent) = self.bv_destroyed_percent {
            conditions.push(VictoryCondition::BvDestroyed { percent });
        }
        if let Some(percent) = self.bv_ratio_percent {
            conditions.push(VictoryCondition::BvRatio { percent });
        }
        if let Some(target) = self.kill_count {
            conditions.push(VictoryCondition::KillCount { target });
        }
        if self.commander_killed {
            conditions.push(VictoryCondition::EnemyCommanderDestroyed);
        }
        conditions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VictoryConfig::default();
        assert!(config.check_victory);
        assert_eq!(config.achievement_threshold, 1.0);
        assert_eq!(config.enabled_conditions(), vec![VictoryCondition::BvRatio { percent: 300 }]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_order() {
        let config = VictoryConfig::default()
            .with_commander_killed()
            .with_kill_count(5)
            .with_bv_destroyed(50);

        assert_eq!(
            config.enabled_conditions(),
            vec![
                VictoryCondition::BvDestroyed { percent: 50 },
                VictoryCondition::BvRatio { percent: 300 },
                VictoryCondition::KillCount { target: 5 },
                VictoryCondition::EnemyCommanderDestroyed,
            ]
        );
    }

    #[test]
    fn test_concession_only() {
        let config = VictoryConfig::concession_only();
        assert!(!config.check_victory);
        assert!(config.enabled_conditions().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let no_conditions = VictoryConfig::default().without_bv_ratio();
        assert_eq!(no_conditions.validate(), Err(ConfigError::NoConditionsEnabled));

        let threshold = VictoryConfig::default().with_threshold(0.0);
        assert_eq!(threshold.validate(), Err(ConfigError::InvalidThreshold(0.0)));

        let nan = VictoryConfig::default().with_threshold(f64::NAN);
        assert!(matches!(nan.validate(), Err(ConfigError::InvalidThreshold(_))));

        let percent = VictoryConfig::default().with_bv_destroyed(150);
        assert_eq!(
            percent.validate(),
            Err(ConfigError::InvalidPercent { condition: "bv_destroyed", value: 150 })
        );

        let ratio = VictoryConfig::default().with_bv_ratio(0);
        assert!(matches!(ratio.validate(), Err(ConfigError::InvalidPercent { .. })));

        let kills = VictoryConfig::default().with_kill_count(0);
        assert_eq!(kills.validate(), Err(ConfigError::ZeroKillTarget));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: VictoryConfig =
            serde_json::from_str(r#"{ "kill_count": 3, "commander_killed": true }"#).unwrap();

        assert!(config.check_victory);
        assert_eq!(config.kill_count, Some(3));
        assert_eq!(config.bv_ratio_percent, Some(300));
        assert!(config.commander_killed);
    }

    #[test]
    fn test_serialization() {
        let config = VictoryConfig::default().with_kill_count(4);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: VictoryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
