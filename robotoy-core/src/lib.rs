pub mod action;
pub mod config;
pub mod controller;
pub mod coordinates;
pub mod events;
pub mod input;
pub mod robot;
pub mod scheduler;
pub mod surface;

pub use action::{Phase, TimerEvent};
pub use config::{
    ConfigError, ConfigErrorReason, HitBoxConfig, MotionConfig, RobotConfig, SurfaceConfig,
    TimingConfig,
};
pub use controller::RobotController;
pub use coordinates::{Point, Rect, SurfaceSize};
pub use events::{ActionKind, Arm, RobotEvent};
pub use input::{Zone, classify};
pub use robot::{BATTERY_CAPACITY, BatteryLevel, Pose, RobotState};
pub use scheduler::{CancelToken, Scheduler, TimerId};
pub use surface::{fit_surface, movement_strips, robot_anchor};
