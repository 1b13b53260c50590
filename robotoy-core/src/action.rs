use crate::config::{MotionConfig, TimingConfig};
use crate::coordinates::Point;
use crate::events::{ActionKind, Arm};
use crate::robot::RobotState;
use crate::scheduler::{CancelToken, Scheduler};
use std::f32::consts::TAU;

/// Payload carried by scheduler timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    ActionTick,
    ActionSettle,
    ActionIdle,
    ChargeDone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Settling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Settle,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovePlan {
    pub start_x: f32,
    pub target_x: f32,
    pub step: u32,
    pub steps: u32,
    pub swing: Arm,
}

impl MovePlan {
    pub fn new(start_x: f32, target_x: f32, steps: u32, swing: Arm) -> Self {
        Self {
            start_x,
            target_x,
            step: 0,
            steps: steps.max(1),
            swing,
        }
    }

    pub fn progress(&self) -> f32 {
        (self.step as f32 / self.steps as f32).min(1.0)
    }

    pub fn x_at_progress(&self, progress: f32) -> f32 {
        self.start_x + (self.target_x - self.start_x) * progress
    }

    pub fn finished(&self) -> bool {
        self.step >= self.steps
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Spin { arm: Arm, angle: f32 },
    Move(MovePlan),
    Fire { target: Point },
}

/// One in-flight spin, move or fire sequence. All of its timers share a
/// single cancel token.
#[derive(Debug)]
pub struct ActiveAction {
    kind: ActionKind,
    motion: Motion,
    phase: Phase,
    token: CancelToken,
}

impl ActiveAction {
    pub fn start_spin(
        arm: Arm,
        state: &mut RobotState,
        scheduler: &mut Scheduler<TimerEvent>,
        timing: &TimingConfig,
    ) -> Self {
        let action = Self::running(ActionKind::SpinArm(arm), Motion::Spin { arm, angle: 0.0 });
        state.busy = true;
        scheduler.set_interval(timing.spin_tick(), &action.token, TimerEvent::ActionTick);
        scheduler.set_timeout(timing.spin_duration(), &action.token, TimerEvent::ActionSettle);
        action
    }

    pub fn start_move(
        plan: MovePlan,
        state: &mut RobotState,
        scheduler: &mut Scheduler<TimerEvent>,
        timing: &TimingConfig,
    ) -> Self {
        let action = Self::running(ActionKind::Move, Motion::Move(plan));
        state.busy = true;
        scheduler.set_interval(timing.move_tick(), &action.token, TimerEvent::ActionTick);
        action
    }

    pub fn start_fire(
        target: Point,
        state: &mut RobotState,
        scheduler: &mut Scheduler<TimerEvent>,
        timing: &TimingConfig,
    ) -> Self {
        let action = Self::running(ActionKind::Fire, Motion::Fire { target });
        state.busy = true;
        state.firing = true;
        scheduler.set_timeout(timing.fire_hold(), &action.token, TimerEvent::ActionSettle);
        action
    }

    fn running(kind: ActionKind, motion: Motion) -> Self {
        Self {
            kind,
            motion,
            phase: Phase::Running,
            token: CancelToken::new(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The beam is drawn only while the fire sequence is still holding.
    pub fn beam_target(&self) -> Option<Point> {
        match (self.phase, self.motion) {
            (Phase::Running, Motion::Fire { target }) => Some(target),
            _ => None,
        }
    }

    pub fn on_timer(
        &mut self,
        event: TimerEvent,
        state: &mut RobotState,
        motion: &MotionConfig,
    ) -> StepOutcome {
        match (self.phase, event) {
            (Phase::Running, TimerEvent::ActionTick) => self.tick(state, motion),
            (Phase::Running, TimerEvent::ActionSettle) => StepOutcome::Settle,
            (Phase::Settling, TimerEvent::ActionIdle) => StepOutcome::Done,
            _ => StepOutcome::Continue,
        }
    }

    fn tick(&mut self, state: &mut RobotState, config: &MotionConfig) -> StepOutcome {
        match &mut self.motion {
            Motion::Spin { arm, angle } => {
                *angle += config.spin_step_radians;
                match arm {
                    Arm::Left => state.pose.left_arm_angle = *angle,
                    Arm::Right => state.pose.right_arm_angle = *angle,
                }
                StepOutcome::Continue
            }
            Motion::Move(plan) => {
                plan.step += 1;
                let progress = plan.progress();
                let wave = (progress * TAU).sin();
                state.pose.leg_offset = wave * config.leg_amplitude;
                let swing = wave * config.arm_swing_amplitude;
                match plan.swing {
                    Arm::Left => state.pose.left_arm_angle = swing,
                    Arm::Right => state.pose.right_arm_angle = swing,
                }
                state.position.x = plan.x_at_progress(progress);

                if plan.finished() {
                    StepOutcome::Settle
                } else {
                    StepOutcome::Continue
                }
            }
            Motion::Fire { .. } => StepOutcome::Continue,
        }
    }

    /// Retire the running timers, return the pose to neutral and pay for the
    /// sequence. The robot stays busy until the settle delay runs out and
    /// [`ActiveAction::finish`] is called. Returns the remaining count.
    pub fn settle(
        &mut self,
        state: &mut RobotState,
        scheduler: &mut Scheduler<TimerEvent>,
        timing: &TimingConfig,
    ) -> u8 {
        self.phase = Phase::Settling;
        self.token.cancel();
        if let Motion::Move(plan) = self.motion {
            state.position.x = plan.target_x;
        }
        state.reset_pose();
        state.firing = false;
        if self.kind.consumes_battery() {
            state.consume_action();
        }

        self.token = CancelToken::new();
        scheduler.set_timeout(timing.settle(), &self.token, TimerEvent::ActionIdle);
        state.actions_remaining()
    }

    pub fn finish(&mut self, state: &mut RobotState) {
        self.token.cancel();
        state.busy = false;
        self.phase = Phase::Idle;
    }

    /// Abort without spending battery. The robot stays wherever it got to.
    pub fn cancel(&mut self, state: &mut RobotState) {
        self.token.cancel();
        state.reset_pose();
        state.firing = false;
        state.busy = false;
        self.phase = Phase::Idle;
    }
}

/// The timed charge that restores the battery.
#[derive(Debug)]
pub struct ChargeSequence {
    token: CancelToken,
}

impl ChargeSequence {
    pub fn start(
        state: &mut RobotState,
        scheduler: &mut Scheduler<TimerEvent>,
        timing: &TimingConfig,
    ) -> Self {
        let token = CancelToken::new();
        state.charging = true;
        scheduler.set_timeout(timing.charge_delay(), &token, TimerEvent::ChargeDone);
        Self { token }
    }

    pub fn finish(self, state: &mut RobotState) -> u8 {
        self.token.cancel();
        state.recharge();
        state.charging = false;
        state.actions_remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn powered_state() -> RobotState {
        let mut state = RobotState::new(Point::new(500.0, 400.0));
        state.toggle_power();
        state
    }

    #[test]
    fn spin_tick_accumulates_on_chosen_arm() {
        let mut state = powered_state();
        let mut scheduler = Scheduler::new();
        let timing = TimingConfig::default();
        let motion = MotionConfig::default();
        let mut action = ActiveAction::start_spin(Arm::Right, &mut state, &mut scheduler, &timing);

        assert!(state.busy);
        assert_eq!(scheduler.pending(), 2);
        for _ in 0..3 {
            action.on_timer(TimerEvent::ActionTick, &mut state, &motion);
        }
        assert!((state.pose.right_arm_angle - 0.6).abs() < 1e-5);
        assert_eq!(state.pose.left_arm_angle, 0.0);
    }

    #[test]
    fn move_plan_interpolates_linearly() {
        let plan = MovePlan::new(100.0, 300.0, 50, Arm::Right);
        assert_eq!(plan.x_at_progress(0.0), 100.0);
        assert_eq!(plan.x_at_progress(0.5), 200.0);
        assert_eq!(plan.x_at_progress(1.0), 300.0);
    }

    #[test]
    fn move_settles_on_final_step() {
        let mut state = powered_state();
        let mut scheduler = Scheduler::new();
        let timing = TimingConfig::default();
        let motion = MotionConfig {
            move_steps: 4,
            ..MotionConfig::default()
        };
        let plan = MovePlan::new(500.0, 100.0, motion.move_steps, Arm::Right);
        let mut action = ActiveAction::start_move(plan, &mut state, &mut scheduler, &timing);

        let outcomes: Vec<_> = (0..4)
            .map(|_| action.on_timer(TimerEvent::ActionTick, &mut state, &motion))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                StepOutcome::Continue,
                StepOutcome::Continue,
                StepOutcome::Continue,
                StepOutcome::Settle
            ]
        );
        assert_eq!(action.settle(&mut state, &mut scheduler, &timing), 2);
        assert_eq!(state.position.x, 100.0);
        assert!(state.pose.is_neutral());
        assert!(state.busy);
        assert_eq!(action.phase(), Phase::Settling);
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(
            scheduler.pop_due(Duration::from_millis(timing.settle_ms)),
            Some(TimerEvent::ActionIdle)
        );
        assert_eq!(
            action.on_timer(TimerEvent::ActionIdle, &mut state, &motion),
            StepOutcome::Done
        );
        action.finish(&mut state);
        assert!(!state.busy);
        assert_eq!(action.phase(), Phase::Idle);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn settling_ignores_stale_ticks_and_hides_beam() {
        let mut state = powered_state();
        let mut scheduler = Scheduler::new();
        let timing = TimingConfig::default();
        let motion = MotionConfig::default();
        let mut action =
            ActiveAction::start_fire(Point::new(10.0, 10.0), &mut state, &mut scheduler, &timing);

        assert_eq!(
            action.on_timer(TimerEvent::ActionSettle, &mut state, &motion),
            StepOutcome::Settle
        );
        action.settle(&mut state, &mut scheduler, &timing);
        assert!(!state.firing);
        assert_eq!(action.beam_target(), None);
        assert_eq!(
            action.on_timer(TimerEvent::ActionTick, &mut state, &motion),
            StepOutcome::Continue
        );
        assert_eq!(
            action.on_timer(TimerEvent::ActionSettle, &mut state, &motion),
            StepOutcome::Continue
        );
        assert_eq!(action.phase(), Phase::Settling);
    }

    #[test]
    fn cancel_spends_no_battery() {
        let mut state = powered_state();
        let mut scheduler = Scheduler::new();
        let timing = TimingConfig::default();
        let mut action =
            ActiveAction::start_fire(Point::new(10.0, 10.0), &mut state, &mut scheduler, &timing);
        assert!(state.firing);
        assert_eq!(action.beam_target(), Some(Point::new(10.0, 10.0)));

        action.cancel(&mut state);
        assert!(!state.firing);
        assert!(!state.busy);
        assert_eq!(state.actions_remaining(), 3);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(action.phase(), Phase::Idle);
    }

    #[test]
    fn charge_restores_battery() {
        let mut state = powered_state();
        state.consume_action();
        state.consume_action();
        let mut scheduler = Scheduler::new();
        let charge = ChargeSequence::start(&mut state, &mut scheduler, &TimingConfig::default());
        assert!(state.charging);
        assert_eq!(scheduler.pop_due(Duration::from_millis(2999)), None);
        assert_eq!(
            scheduler.pop_due(Duration::from_millis(3000)),
            Some(TimerEvent::ChargeDone)
        );
        assert_eq!(charge.finish(&mut state), 3);
        assert!(!state.charging);
    }
}
