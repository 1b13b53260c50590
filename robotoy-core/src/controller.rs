use crate::action::{ActiveAction, ChargeSequence, MovePlan, Phase, StepOutcome, TimerEvent};
use crate::config::RobotConfig;
use crate::coordinates::{Point, SurfaceSize};
use crate::events::{ActionKind, Arm, RobotEvent};
use crate::input::{Zone, classify};
use crate::robot::RobotState;
use crate::scheduler::Scheduler;
use crate::surface::{fit_surface, robot_anchor};
use log::{debug, info};
use std::time::Duration;

/// Owns the robot and everything that mutates it. Front ends hold one of
/// these and call into it for every input and every frame.
#[derive(Debug)]
pub struct RobotController {
    config: RobotConfig,
    surface: SurfaceSize,
    state: RobotState,
    scheduler: Scheduler<TimerEvent>,
    action: Option<ActiveAction>,
    charge: Option<ChargeSequence>,
    events: Vec<RobotEvent>,
}

impl RobotController {
    pub fn new(config: RobotConfig, viewport: SurfaceSize) -> Self {
        let surface = fit_surface(viewport, &config.surface);
        let state = RobotState::new(robot_anchor(surface, &config.surface));
        Self {
            config,
            surface,
            state,
            scheduler: Scheduler::new(),
            action: None,
            charge: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    pub fn state(&self) -> &RobotState {
        &self.state
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn phase(&self) -> Phase {
        self.action
            .as_ref()
            .map(|action| action.phase())
            .unwrap_or_default()
    }

    pub fn active_action(&self) -> Option<ActionKind> {
        self.action.as_ref().map(|action| action.kind())
    }

    pub fn beam_target(&self) -> Option<Point> {
        self.action.as_ref().and_then(|action| action.beam_target())
    }

    pub fn take_events(&mut self) -> Vec<RobotEvent> {
        std::mem::take(&mut self.events)
    }

    /// Dispatch a pointer press in surface coordinates. Returns the action it
    /// started, or `None` when the robot is not accepting input.
    pub fn pointer(&mut self, point: Point) -> Option<ActionKind> {
        if !self.state.accepts_input() {
            debug!("pointer at ({:.0}, {:.0}) ignored", point.x, point.y);
            return None;
        }

        let zone = classify(
            point,
            self.state.position,
            self.surface,
            &self.config.hit_boxes,
        );
        let timing = &self.config.timing;
        let action = match zone {
            Zone::Arm(arm) => {
                ActiveAction::start_spin(arm, &mut self.state, &mut self.scheduler, timing)
            }
            Zone::Move { target_x } => {
                let plan = MovePlan::new(
                    self.state.position.x,
                    target_x,
                    self.config.motion.move_steps,
                    self.swing_arm_for(target_x),
                );
                ActiveAction::start_move(plan, &mut self.state, &mut self.scheduler, timing)
            }
            Zone::Fire { target } => {
                ActiveAction::start_fire(target, &mut self.state, &mut self.scheduler, timing)
            }
        };

        let kind = action.kind();
        info!("action started: {}", kind.label());
        self.action = Some(action);
        self.events.push(RobotEvent::ActionStarted(kind));
        Some(kind)
    }

    // Walking right swings the left arm and vice versa.
    fn swing_arm_for(&self, target_x: f32) -> Arm {
        let right_strip_start =
            self.surface.width * (1.0 - self.config.hit_boxes.strip_fraction());
        if target_x > right_strip_start {
            Arm::Left
        } else {
            Arm::Right
        }
    }

    /// Flip the power switch. Refused on an empty battery. Switching off
    /// mid-action cancels the action; a running charge carries on.
    pub fn toggle_power(&mut self) -> bool {
        if !self.state.toggle_power() {
            debug!("power toggle refused: battery empty");
            return false;
        }

        let powered_on = self.state.powered_on();
        info!("power {}", if powered_on { "on" } else { "off" });
        self.events.push(RobotEvent::PowerChanged { powered_on });
        if !powered_on {
            self.cancel_action();
        }
        true
    }

    /// Start charging. Ignored while already charging or mid-action.
    pub fn charge(&mut self) -> bool {
        if self.state.charging || self.state.busy {
            debug!("charge ignored");
            return false;
        }

        let charge = ChargeSequence::start(
            &mut self.state,
            &mut self.scheduler,
            &self.config.timing,
        );
        self.charge = Some(charge);
        info!("action started: {}", ActionKind::Charge.label());
        self.events.push(RobotEvent::ChargeStarted);
        true
    }

    /// Abort the in-flight action, if any, without spending battery. A
    /// sequence that is already settling has been paid for and simply ends.
    pub fn cancel_action(&mut self) -> Option<ActionKind> {
        let mut action = self.action.take()?;
        if action.phase() == Phase::Settling {
            action.finish(&mut self.state);
            return None;
        }
        action.cancel(&mut self.state);
        let kind = action.kind();
        info!("action cancelled: {}", kind.label());
        self.events.push(RobotEvent::ActionCancelled(kind));
        Some(kind)
    }

    /// Refit to a new viewport and re-anchor the robot. An in-flight action is
    /// cancelled since its geometry belongs to the old surface.
    pub fn resize(&mut self, viewport: SurfaceSize) {
        let surface = fit_surface(viewport, &self.config.surface);
        if surface == self.surface {
            return;
        }

        self.cancel_action();
        self.surface = surface;
        self.state.position = robot_anchor(surface, &self.config.surface);
        debug!("surface resized to {:.0}x{:.0}", surface.width, surface.height);
    }

    /// Run every timer due within the next `dt`.
    pub fn advance(&mut self, dt: Duration) {
        let deadline = self.scheduler.now() + dt;
        while let Some(event) = self.scheduler.pop_due(deadline) {
            self.on_timer(event);
        }
        self.scheduler.advance_to(deadline);
    }

    fn on_timer(&mut self, event: TimerEvent) {
        if event == TimerEvent::ChargeDone {
            if let Some(charge) = self.charge.take() {
                let remaining = charge.finish(&mut self.state);
                info!("charging complete: {} actions", remaining);
                self.events.push(RobotEvent::ChargeCompleted { remaining });
            }
            return;
        }

        let Some(action) = self.action.as_mut() else {
            return;
        };
        match action.on_timer(event, &mut self.state, &self.config.motion) {
            StepOutcome::Continue => {}
            StepOutcome::Settle => {
                let kind = action.kind();
                let remaining =
                    action.settle(&mut self.state, &mut self.scheduler, &self.config.timing);
                info!("action complete: {} ({} left)", kind.label(), remaining);
                self.events.push(RobotEvent::ActionCompleted { kind, remaining });
                if remaining == 0 {
                    info!("battery depleted, powering off");
                    self.events.push(RobotEvent::BatteryDepleted);
                }
            }
            StepOutcome::Done => {
                action.finish(&mut self.state);
                self.action = None;
            }
        }
    }
}
