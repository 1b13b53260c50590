use crate::coordinates::Point;

pub const BATTERY_CAPACITY: u8 = 3;

/// Transient animation pose; neutral whenever no action is running.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub leg_offset: f32,
    pub left_arm_angle: f32,  // radians
    pub right_arm_angle: f32, // radians
}

impl Pose {
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryLevel {
    Full,
    TwoThirds,
    OneThird,
    Empty,
}

impl BatteryLevel {
    pub fn from_actions(actions: u8) -> Self {
        match actions {
            3.. => BatteryLevel::Full,
            2 => BatteryLevel::TwoThirds,
            1 => BatteryLevel::OneThird,
            0 => BatteryLevel::Empty,
        }
    }

    /// Class list for an HTML battery indicator.
    pub fn css_class(&self) -> &'static str {
        match self {
            BatteryLevel::Full => "battery-level",
            BatteryLevel::TwoThirds => "battery-level two-thirds",
            BatteryLevel::OneThird => "battery-level one-third",
            BatteryLevel::Empty => "battery-level empty",
        }
    }

    /// Portion of the on-body gauge that is filled.
    pub fn fill_fraction(&self) -> f32 {
        match self {
            BatteryLevel::Full => 1.0,
            BatteryLevel::TwoThirds => 26.0 / 40.0,
            BatteryLevel::OneThird => 14.0 / 40.0,
            BatteryLevel::Empty => 0.0,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            BatteryLevel::Full => 3,
            BatteryLevel::TwoThirds => 2,
            BatteryLevel::OneThird => 1,
            BatteryLevel::Empty => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RobotState {
    pub position: Point,
    powered_on: bool,
    pub charging: bool,
    pub busy: bool,
    pub firing: bool,
    pub pose: Pose,
    actions_remaining: u8,
}

impl RobotState {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            powered_on: false,
            charging: false,
            busy: false,
            firing: false,
            pose: Pose::neutral(),
            actions_remaining: BATTERY_CAPACITY,
        }
    }

    pub fn powered_on(&self) -> bool {
        self.powered_on
    }

    pub fn actions_remaining(&self) -> u8 {
        self.actions_remaining
    }

    pub fn battery_level(&self) -> BatteryLevel {
        BatteryLevel::from_actions(self.actions_remaining)
    }

    /// Spend one battery unit. An empty battery switches the robot off.
    pub fn consume_action(&mut self) -> u8 {
        self.actions_remaining = self.actions_remaining.saturating_sub(1);
        if self.actions_remaining == 0 {
            self.powered_on = false;
        }
        self.actions_remaining
    }

    pub fn recharge(&mut self) {
        self.actions_remaining = BATTERY_CAPACITY;
    }

    /// Flip the power switch. Refused while the battery is empty.
    pub fn toggle_power(&mut self) -> bool {
        if self.actions_remaining == 0 {
            return false;
        }
        self.powered_on = !self.powered_on;
        true
    }

    pub fn accepts_input(&self) -> bool {
        self.powered_on && !self.busy && !self.charging && self.actions_remaining > 0
    }

    pub fn reset_pose(&mut self) {
        self.pose = Pose::neutral();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn powered_robot() -> RobotState {
        let mut robot = RobotState::new(Point::new(100.0, 100.0));
        robot.toggle_power();
        robot
    }

    #[test]
    fn starts_powered_off_with_full_battery() {
        let robot = RobotState::new(Point::default());
        assert!(!robot.powered_on());
        assert_eq!(robot.actions_remaining(), BATTERY_CAPACITY);
        assert!(robot.pose.is_neutral());
        assert!(!robot.accepts_input());
    }

    #[test]
    fn consuming_never_goes_below_zero() {
        let mut robot = powered_robot();
        for _ in 0..10 {
            robot.consume_action();
        }
        assert_eq!(robot.actions_remaining(), 0);
        assert!(!robot.powered_on());
    }

    #[test]
    fn empty_battery_forces_power_off_and_refuses_toggle() {
        let mut robot = powered_robot();
        robot.consume_action();
        robot.consume_action();
        assert!(robot.powered_on());
        assert_eq!(robot.consume_action(), 0);
        assert!(!robot.powered_on());
        assert!(!robot.toggle_power());
        assert!(!robot.powered_on());
    }

    #[test]
    fn recharge_restores_capacity_from_any_level() {
        for spent in 0..=BATTERY_CAPACITY {
            let mut robot = powered_robot();
            for _ in 0..spent {
                robot.consume_action();
            }
            robot.recharge();
            assert_eq!(robot.actions_remaining(), BATTERY_CAPACITY);
        }
    }

    #[test]
    fn input_gate_checks_every_flag() {
        let mut robot = powered_robot();
        assert!(robot.accepts_input());

        robot.busy = true;
        assert!(!robot.accepts_input());
        robot.busy = false;

        robot.charging = true;
        assert!(!robot.accepts_input());
        robot.charging = false;

        robot.toggle_power();
        assert!(!robot.accepts_input());
    }

    #[test]
    fn battery_levels_map_to_indicator_classes() {
        assert_eq!(BatteryLevel::from_actions(3).css_class(), "battery-level");
        assert_eq!(
            BatteryLevel::from_actions(2).css_class(),
            "battery-level two-thirds"
        );
        assert_eq!(
            BatteryLevel::from_actions(1).css_class(),
            "battery-level one-third"
        );
        assert_eq!(BatteryLevel::from_actions(0), BatteryLevel::Empty);
        assert_eq!(BatteryLevel::Empty.fill_fraction(), 0.0);
    }
}
