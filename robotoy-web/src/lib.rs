#[cfg(target_arch = "wasm32")]
use macroquad::miniquad;
use log::{info, warn};
use macroquad::file::load_string;
use macroquad::input::simulate_mouse_with_touch;
use macroquad::prelude::*;
use robotoy_core::{BatteryLevel, Point, RobotConfig, RobotController, RobotEvent, SurfaceSize};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::time::Duration;

use crate::robot_draw::{RobotDrawConfig, Scene, draw_scene};

mod logging;
mod robot_draw;

const CONFIG_PATH: &str = "assets/robotoy.json";
const FIXED_STEP_SECONDS: f32 = 1.0 / 60.0;
const HUD_FONT_SIZE: f32 = 22.0;
const BACKGROUND: Color = Color::from_rgba(40, 44, 52, 255);

static PENDING_POWER_TOGGLE: AtomicBool = AtomicBool::new(false);
static PENDING_CHARGE: AtomicBool = AtomicBool::new(false);

static ACTIONS_LEFT: AtomicU32 = AtomicU32::new(0);
static BATTERY_LEVEL: AtomicI32 = AtomicI32::new(0);
static POWERED_ON: AtomicBool = AtomicBool::new(false);
static CHARGING: AtomicBool = AtomicBool::new(false);

#[unsafe(no_mangle)]
pub extern "C" fn robot_power_toggle() {
    info!("ui action: power");
    PENDING_POWER_TOGGLE.store(true, Ordering::SeqCst);
}

#[unsafe(no_mangle)]
pub extern "C" fn robot_charge() {
    info!("ui action: charge");
    PENDING_CHARGE.store(true, Ordering::SeqCst);
}

#[unsafe(no_mangle)]
pub extern "C" fn robot_actions_left() -> u32 {
    ACTIONS_LEFT.load(Ordering::SeqCst)
}

/// 3, 2, 1 or 0 for full, two-thirds, one-third and empty.
#[unsafe(no_mangle)]
pub extern "C" fn robot_battery_level() -> i32 {
    BATTERY_LEVEL.load(Ordering::SeqCst)
}

#[unsafe(no_mangle)]
pub extern "C" fn robot_battery_class_ptr() -> *const u8 {
    battery_level_from_code(robot_battery_level())
        .css_class()
        .as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn robot_battery_class_len() -> usize {
    battery_level_from_code(robot_battery_level())
        .css_class()
        .len()
}

#[unsafe(no_mangle)]
pub extern "C" fn robot_powered_on() -> i32 {
    if POWERED_ON.load(Ordering::SeqCst) { 1 } else { 0 }
}

#[unsafe(no_mangle)]
pub extern "C" fn robot_charging() -> i32 {
    if CHARGING.load(Ordering::SeqCst) { 1 } else { 0 }
}

fn battery_level_from_code(code: i32) -> BatteryLevel {
    BatteryLevel::from_actions(code.clamp(0, u8::MAX as i32) as u8)
}

fn take_pending_power_toggle() -> bool {
    PENDING_POWER_TOGGLE.swap(false, Ordering::SeqCst)
}

fn take_pending_charge() -> bool {
    PENDING_CHARGE.swap(false, Ordering::SeqCst)
}

/// Top-left corner of the drawing surface, centred in the window.
fn surface_origin(window: SurfaceSize, surface: SurfaceSize) -> Vec2 {
    vec2(
        ((window.width - surface.width) / 2.0).max(0.0),
        ((window.height - surface.height) / 2.0).max(0.0),
    )
}

/// Convert a window position to surface coordinates, or `None` outside the
/// surface's bounding box.
fn surface_point(screen: Vec2, origin: Vec2, surface: SurfaceSize) -> Option<Point> {
    let local = screen - origin;
    let inside = local.x >= 0.0
        && local.y >= 0.0
        && local.x <= surface.width
        && local.y <= surface.height;
    inside.then(|| Point::new(local.x, local.y))
}

fn window_size() -> SurfaceSize {
    SurfaceSize::new(screen_width(), screen_height())
}

pub struct App {
    controller: RobotController,
    draw: RobotDrawConfig,
    window: SurfaceSize,
}

impl App {
    pub fn new(config: RobotConfig) -> Self {
        let window = window_size();
        let app = Self {
            controller: RobotController::new(config, window),
            draw: RobotDrawConfig::default(),
            window,
        };
        app.publish_indicator();
        app
    }

    fn origin(&self) -> Vec2 {
        surface_origin(self.window, self.controller.surface())
    }

    fn fixed_update(&mut self) {
        self.controller.advance(Duration::from_secs_f32(FIXED_STEP_SECONDS));
    }

    fn sync_window(&mut self) {
        let window = window_size();
        if window != self.window {
            self.window = window;
            self.controller.resize(window);
        }
    }

    fn handle_keys(&mut self) {
        if is_key_pressed(KeyCode::P) {
            robot_power_toggle();
        }
        if is_key_pressed(KeyCode::C) {
            robot_charge();
        }
    }

    fn apply_pending_ui_actions(&mut self) {
        if take_pending_power_toggle() {
            self.controller.toggle_power();
        }
        if take_pending_charge() {
            self.controller.charge();
        }
    }

    /// Mouse presses and touch starts share one path into the controller.
    fn handle_pointer(&mut self) {
        let pressed = touches()
            .into_iter()
            .find(|touch| matches!(touch.phase, TouchPhase::Started))
            .map(|touch| touch.position)
            .or_else(|| {
                is_mouse_button_pressed(MouseButton::Left).then(|| {
                    let (x, y) = mouse_position();
                    vec2(x, y)
                })
            });

        let Some(screen) = pressed else {
            return;
        };
        if let Some(point) = surface_point(screen, self.origin(), self.controller.surface()) {
            self.controller.pointer(point);
        }
    }

    fn sync_indicator(&mut self) {
        let events = self.controller.take_events();
        if events.iter().any(RobotEvent::changes_battery) {
            let state = self.controller.state();
            info!(
                "battery: {} ({})",
                state.actions_remaining(),
                state.battery_level().css_class()
            );
        }
        if events.contains(&RobotEvent::BatteryDepleted) {
            warn!("battery empty, charge to continue");
        }
        self.publish_indicator();
    }

    fn publish_indicator(&self) {
        let state = self.controller.state();
        ACTIONS_LEFT.store(state.actions_remaining() as u32, Ordering::SeqCst);
        BATTERY_LEVEL.store(state.battery_level().code(), Ordering::SeqCst);
        POWERED_ON.store(state.powered_on(), Ordering::SeqCst);
        CHARGING.store(state.charging, Ordering::SeqCst);
    }

    fn render(&self) {
        clear_background(BACKGROUND);

        let scene = Scene {
            robot: self.controller.state(),
            surface: self.controller.surface(),
            hit_boxes: &self.controller.config().hit_boxes,
            beam_target: self.controller.beam_target(),
        };
        draw_scene(&scene, self.origin(), &self.draw);
        self.render_hud();
    }

    fn render_hud(&self) {
        let state = self.controller.state();
        let status = if state.charging {
            "charging"
        } else if state.powered_on() {
            "on"
        } else {
            "off"
        };
        draw_text(
            &format!(
                "actions left: {}   status: {}   [P] power  [C] charge",
                state.actions_remaining(),
                status
            ),
            12.0,
            HUD_FONT_SIZE,
            HUD_FONT_SIZE,
            WHITE,
        );
    }
}

async fn load_config() -> RobotConfig {
    let source = match load_string(CONFIG_PATH).await {
        Ok(source) => source,
        Err(err) => {
            info!("no config at {CONFIG_PATH} ({:?}), using defaults", err);
            return RobotConfig::default();
        }
    };

    RobotConfig::from_json_str(&source).unwrap_or_else(|err| {
        warn!("ignoring {CONFIG_PATH}: {err}");
        RobotConfig::default()
    })
}

pub async fn run() {
    install_panic_hook();
    logging::init();
    simulate_mouse_with_touch(false);

    let config = load_config().await;
    let mut app = App::new(config);
    let mut accumulator = 0.0_f32;

    loop {
        app.sync_window();

        // Consume real elapsed time in fixed-size simulation steps.
        accumulator += get_frame_time();
        while accumulator >= FIXED_STEP_SECONDS {
            app.fixed_update();
            accumulator -= FIXED_STEP_SECONDS;
        }

        app.handle_keys();
        app.apply_pending_ui_actions();
        app.handle_pointer();
        app.sync_indicator();

        app.render();

        next_frame().await;
    }
}

#[cfg(target_arch = "wasm32")]
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if let Some(location) = info.location() {
            miniquad::error!("panic at {}:{}: {}", location.file(), location.line(), msg);
        } else {
            miniquad::error!("panic: {}", msg);
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn install_panic_hook() {}
