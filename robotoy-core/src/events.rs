#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arm {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SpinArm(Arm),
    Move,
    Fire,
    Charge,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::SpinArm(Arm::Left) => "spin left arm",
            ActionKind::SpinArm(Arm::Right) => "spin right arm",
            ActionKind::Move => "move",
            ActionKind::Fire => "fire lasers",
            ActionKind::Charge => "charge",
        }
    }

    /// Whether finishing this action costs a battery unit.
    pub fn consumes_battery(&self) -> bool {
        !matches!(self, ActionKind::Charge)
    }
}

/// Notable state changes, drained by the front end to log and to refresh the
/// battery indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RobotEvent {
    PowerChanged { powered_on: bool },
    ActionStarted(ActionKind),
    ActionCompleted { kind: ActionKind, remaining: u8 },
    ActionCancelled(ActionKind),
    ChargeStarted,
    ChargeCompleted { remaining: u8 },
    BatteryDepleted,
}

impl RobotEvent {
    pub fn changes_battery(&self) -> bool {
        matches!(
            self,
            RobotEvent::ActionCompleted { .. }
                | RobotEvent::ChargeCompleted { .. }
                | RobotEvent::BatteryDepleted
        )
    }
}
