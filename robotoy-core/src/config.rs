use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub timing: TimingConfig,
    pub motion: MotionConfig,
    pub hit_boxes: HitBoxConfig,
    pub surface: SurfaceConfig,
}

/// Sequence timings in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub spin_tick_ms: u64,
    pub spin_duration_ms: u64,
    pub move_tick_ms: u64,
    pub fire_hold_ms: u64,
    pub charge_delay_ms: u64,
    pub settle_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            spin_tick_ms: 16,
            spin_duration_ms: 2000,
            move_tick_ms: 20,
            fire_hold_ms: 500,
            charge_delay_ms: 3000,
            settle_ms: 16,
        }
    }
}

impl TimingConfig {
    pub fn spin_tick(&self) -> Duration {
        Duration::from_millis(self.spin_tick_ms)
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    pub fn move_tick(&self) -> Duration {
        Duration::from_millis(self.move_tick_ms)
    }

    pub fn fire_hold(&self) -> Duration {
        Duration::from_millis(self.fire_hold_ms)
    }

    pub fn charge_delay(&self) -> Duration {
        Duration::from_millis(self.charge_delay_ms)
    }

    /// How long a finished sequence stays in the settling phase.
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub spin_step_radians: f32,
    pub move_steps: u32,
    pub leg_amplitude: f32,      // pixels
    pub arm_swing_amplitude: f32, // radians
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            spin_step_radians: 0.2,
            move_steps: 50,
            leg_amplitude: 10.0,
            arm_swing_amplitude: 0.2,
        }
    }
}

/// Hit-box geometry relative to the robot anchor, plus the movement strip split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitBoxConfig {
    pub arm_inner_dx: f32,
    pub arm_outer_dx: f32,
    pub arm_top_dy: f32,
    pub arm_bottom_dy: f32,
    pub movement_band_fraction: f32, // centred band excluded from the strips
}

impl Default for HitBoxConfig {
    fn default() -> Self {
        Self {
            arm_inner_dx: 40.0,
            arm_outer_dx: 60.0,
            arm_top_dy: -50.0,
            arm_bottom_dy: 40.0,
            movement_band_fraction: 0.4,
        }
    }
}

impl HitBoxConfig {
    /// Width fraction covered by each movement strip.
    pub fn strip_fraction(&self) -> f32 {
        (1.0 - self.movement_band_fraction) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub min_width: f32,
    pub max_width: f32,
    pub viewport_fill: f32,
    pub wide_aspect: f32,
    pub narrow_aspect: f32,
    pub anchor_bottom_margin: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            min_width: 600.0,
            max_width: 1000.0,
            viewport_fill: 0.9,
            wide_aspect: 16.0 / 9.0,
            narrow_aspect: 1.0,
            anchor_bottom_margin: 140.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorReason {
    ZeroTick,
    ZeroDuration,
    ZeroMoveSteps,
    MovementBand,
    WidthBounds,
    Aspect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Invalid(ConfigErrorReason),
}

impl ConfigError {
    pub fn message(&self) -> &'static str {
        match self {
            ConfigError::Parse(_) => "failed to parse robot config",
            ConfigError::Invalid(reason) => match reason {
                ConfigErrorReason::ZeroTick => "tick periods must be non-zero",
                ConfigErrorReason::ZeroDuration => "sequence durations must be non-zero",
                ConfigErrorReason::ZeroMoveSteps => "move steps must be non-zero",
                ConfigErrorReason::MovementBand => "movement band must be within (0, 1)",
                ConfigErrorReason::WidthBounds => "min width must not exceed max width",
                ConfigErrorReason::Aspect => "aspect ratios must be positive",
            },
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(detail) => write!(f, "{} ({})", self.message(), detail),
            ConfigError::Invalid(_) => f.write_str(self.message()),
        }
    }
}

impl Error for ConfigError {}

impl RobotConfig {
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: RobotConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        if timing.spin_tick_ms == 0 || timing.move_tick_ms == 0 {
            return Err(ConfigError::Invalid(ConfigErrorReason::ZeroTick));
        }
        let durations = [
            timing.spin_duration_ms,
            timing.fire_hold_ms,
            timing.charge_delay_ms,
            timing.settle_ms,
        ];
        if durations.contains(&0) {
            return Err(ConfigError::Invalid(ConfigErrorReason::ZeroDuration));
        }
        if self.motion.move_steps == 0 {
            return Err(ConfigError::Invalid(ConfigErrorReason::ZeroMoveSteps));
        }

        let band = self.hit_boxes.movement_band_fraction;
        if !(band > 0.0 && band < 1.0) {
            return Err(ConfigError::Invalid(ConfigErrorReason::MovementBand));
        }

        let surface = &self.surface;
        if surface.min_width > surface.max_width {
            return Err(ConfigError::Invalid(ConfigErrorReason::WidthBounds));
        }
        if surface.wide_aspect <= 0.0 || surface.narrow_aspect <= 0.0 {
            return Err(ConfigError::Invalid(ConfigErrorReason::Aspect));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = RobotConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RobotConfig::default());
        assert_eq!(config.timing.spin_duration(), Duration::from_millis(2000));
        assert_eq!(config.motion.move_steps, 50);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config =
            RobotConfig::from_json_str(r#"{ "timing": { "fire_hold_ms": 250 } }"#).unwrap();
        assert_eq!(config.timing.fire_hold_ms, 250);
        assert_eq!(config.timing.charge_delay_ms, 3000);
        assert_eq!(config.hit_boxes, HitBoxConfig::default());
    }

    #[test]
    fn rejects_zero_move_steps() {
        let err = RobotConfig::from_json_str(r#"{ "motion": { "move_steps": 0 } }"#).unwrap_err();
        assert_eq!(err, ConfigError::Invalid(ConfigErrorReason::ZeroMoveSteps));
        assert_eq!(err.to_string(), "move steps must be non-zero");
    }

    #[test]
    fn rejects_zero_fire_hold() {
        let err = RobotConfig::from_json_str(r#"{ "timing": { "fire_hold_ms": 0 } }"#).unwrap_err();
        assert_eq!(err, ConfigError::Invalid(ConfigErrorReason::ZeroDuration));
        assert_eq!(err.to_string(), "sequence durations must be non-zero");
    }

    #[test]
    fn rejects_zero_charge_delay() {
        let err =
            RobotConfig::from_json_str(r#"{ "timing": { "charge_delay_ms": 0 } }"#).unwrap_err();
        assert_eq!(err, ConfigError::Invalid(ConfigErrorReason::ZeroDuration));
    }

    #[test]
    fn rejects_zero_settle() {
        let mut config = RobotConfig::default();
        config.timing.settle_ms = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Invalid(ConfigErrorReason::ZeroDuration))
        );
    }

    #[test]
    fn rejects_band_outside_unit_interval() {
        let err =
            RobotConfig::from_json_str(r#"{ "hit_boxes": { "movement_band_fraction": 1.0 } }"#)
                .unwrap_err();
        assert_eq!(err, ConfigError::Invalid(ConfigErrorReason::MovementBand));
    }

    #[test]
    fn reports_parse_errors() {
        let err = RobotConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse robot config"));
    }

    #[test]
    fn strips_split_remaining_width() {
        let boxes = HitBoxConfig::default();
        assert!((boxes.strip_fraction() - 0.3).abs() < 1e-6);
    }
}
