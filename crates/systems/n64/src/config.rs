//! Session tuning knobs.

use crate::SimError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pacing rate; each frame sleeps 1/fps
    pub fps: u32,
    /// The main loop stops after this many frames
    pub max_frames: u32,
    /// Gap between presses that resets the combo buffer
    pub combo_timeout_secs: f64,
    /// Chance of a button press on any given frame
    pub input_probability: f64,
    pub intro_line_delay_secs: f64,
    pub boot_line_delay_secs: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            max_frames: 600, // 10 seconds at 60 fps
            combo_timeout_secs: 1.0,
            input_probability: 0.1,
            intro_line_delay_secs: 1.0,
            boot_line_delay_secs: 0.1,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.fps == 0 {
            return Err(SimError::InvalidConfig("fps must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.input_probability) {
            return Err(SimError::InvalidConfig(format!(
                "input probability {} is outside 0..=1",
                self.input_probability
            )));
        }
        for (name, secs) in [
            ("combo timeout", self.combo_timeout_secs),
            ("intro line delay", self.intro_line_delay_secs),
            ("boot line delay", self.boot_line_delay_secs),
        ] {
            if let Err(e) = Duration::try_from_secs_f64(secs) {
                return Err(SimError::InvalidConfig(format!(
                    "{} of {} seconds is not usable: {}",
                    name, secs, e
                )));
            }
        }
        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    pub fn combo_timeout(&self) -> Duration {
        seconds(self.combo_timeout_secs)
    }

    pub fn intro_line_delay(&self) -> Duration {
        seconds(self.intro_line_delay_secs)
    }

    pub fn boot_line_delay(&self) -> Duration {
        seconds(self.boot_line_delay_secs)
    }
}

/// Out-of-range values only get here if `validate` was skipped
fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.fps, 60);
        assert_eq!(config.max_frames, 600);
        assert_eq!(config.combo_timeout(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"max_frames": 120}"#).unwrap();
        assert_eq!(config.max_frames, 120);
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn test_validate_rejects_nonsense() {
        let zero_fps = SessionConfig {
            fps: 0,
            ..SessionConfig::default()
        };
        assert!(zero_fps.validate().is_err());

        let bad_probability = SessionConfig {
            input_probability: 1.5,
            ..SessionConfig::default()
        };
        assert!(bad_probability.validate().is_err());

        let negative_delay = SessionConfig {
            boot_line_delay_secs: -0.1,
            ..SessionConfig::default()
        };
        assert!(negative_delay.validate().is_err());

        let nan_timeout = SessionConfig {
            combo_timeout_secs: f64::NAN,
            ..SessionConfig::default()
        };
        assert!(nan_timeout.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_seconds_too_large_for_duration() {
        let huge = SessionConfig {
            combo_timeout_secs: 1e30,
            ..SessionConfig::default()
        };
        assert!(matches!(huge.validate(), Err(SimError::InvalidConfig(_))));

        let huge_intro = SessionConfig {
            intro_line_delay_secs: f64::MAX,
            ..SessionConfig::default()
        };
        assert!(huge_intro.validate().is_err());
    }

    #[test]
    fn test_accessors_do_not_panic_on_unvalidated_values() {
        let huge = SessionConfig {
            combo_timeout_secs: 1e30,
            ..SessionConfig::default()
        };
        assert_eq!(huge.combo_timeout(), Duration::ZERO);
    }
}
