use macroquad::prelude::*;
use robotoy_core::{BatteryLevel, HitBoxConfig, Point, RobotState, SurfaceSize, movement_strips};

// Part geometry in pixels, relative to the robot anchor (body centre).
const BODY: Rect = Rect::new(-40.0, -60.0, 80.0, 120.0);
const HEAD: Rect = Rect::new(-30.0, -100.0, 60.0, 40.0);
const GAUGE: Rect = Rect::new(-20.0, -40.0, 40.0, 20.0);
const EYE_DX: f32 = 16.0;
const EYE_DY: f32 = -84.0;
const EYE_RADIUS: f32 = 8.0;
const POWER_DY: f32 = -110.0;
const POWER_RADIUS: f32 = 6.0;
const SHOULDER_DX: f32 = 50.0;
const SHOULDER_DY: f32 = -40.0;
const ARM_SIZE: Vec2 = Vec2::new(20.0, 80.0);
const ARM_PIVOT: Vec2 = Vec2::new(10.0, 10.0); // shoulder point inside the arm rect
const HIP_DY: f32 = 60.0;
const LEG_SIZE: Vec2 = Vec2::new(20.0, 80.0);
const LEFT_LEG_DX: f32 = -30.0;
const RIGHT_LEG_DX: f32 = 10.0;
const CABLE: [Vec2; 4] = [
    Vec2::new(0.0, 60.0),
    Vec2::new(0.0, 100.0),
    Vec2::new(100.0, 100.0),
    Vec2::new(115.0, 150.0),
];

#[derive(Debug, Clone)]
pub struct RobotDrawConfig {
    pub surface_color: Color,
    pub zone_color: Color,
    pub body_color: Color,
    pub limb_color: Color,
    pub eye_idle_color: Color,
    pub eye_firing_color: Color,
    pub eye_off_color: Color,
    pub power_on_color: Color,
    pub power_off_color: Color,
    pub gauge_back_color: Color,
    pub gauge_full_color: Color,
    pub gauge_two_thirds_color: Color,
    pub gauge_one_third_color: Color,
    pub cable_color: Color,
    pub cable_thickness: f32,
    pub cable_segments: usize,
    pub laser_color: Color,
    pub laser_thickness: f32,
}

impl Default for RobotDrawConfig {
    fn default() -> Self {
        Self {
            surface_color: WHITE,
            zone_color: Color::from_rgba(224, 224, 224, 255),
            body_color: Color::from_rgba(102, 102, 102, 255),
            limb_color: Color::from_rgba(68, 68, 68, 255),
            eye_idle_color: Color::from_rgba(0, 255, 0, 255),
            eye_firing_color: Color::from_rgba(255, 0, 0, 255),
            eye_off_color: Color::from_rgba(68, 68, 68, 255),
            power_on_color: Color::from_rgba(0, 255, 0, 255),
            power_off_color: Color::from_rgba(255, 0, 0, 255),
            gauge_back_color: BLACK,
            gauge_full_color: Color::from_rgba(40, 167, 69, 255),
            gauge_two_thirds_color: Color::from_rgba(255, 193, 7, 255),
            gauge_one_third_color: Color::from_rgba(220, 53, 69, 255),
            cable_color: Color::from_rgba(255, 255, 0, 255),
            cable_thickness: 3.0,
            cable_segments: 24,
            laser_color: Color::from_rgba(255, 0, 0, 255),
            laser_thickness: 2.0,
        }
    }
}

impl RobotDrawConfig {
    pub fn eye_color(&self, robot: &RobotState) -> Color {
        if !robot.powered_on() {
            self.eye_off_color
        } else if robot.firing {
            self.eye_firing_color
        } else {
            self.eye_idle_color
        }
    }

    /// Gauge fill colour and width for a battery level. An empty battery has
    /// no visible fill.
    pub fn gauge_fill(&self, level: BatteryLevel) -> (Color, f32) {
        let color = match level {
            BatteryLevel::Full => self.gauge_full_color,
            BatteryLevel::TwoThirds => self.gauge_two_thirds_color,
            BatteryLevel::OneThird => self.gauge_one_third_color,
            BatteryLevel::Empty => self.gauge_back_color,
        };
        (color, GAUGE.w * level.fill_fraction())
    }
}

/// Everything the renderer needs for one frame.
pub struct Scene<'a> {
    pub robot: &'a RobotState,
    pub surface: SurfaceSize,
    pub hit_boxes: &'a HitBoxConfig,
    pub beam_target: Option<Point>,
}

pub fn anchor_screen(robot: &RobotState, origin: Vec2) -> Vec2 {
    origin + vec2(robot.position.x, robot.position.y)
}

pub fn eye_positions(anchor: Vec2) -> [Vec2; 2] {
    [
        anchor + vec2(-EYE_DX, EYE_DY),
        anchor + vec2(EYE_DX, EYE_DY),
    ]
}

pub fn cubic_bezier(points: &[Vec2; 4], t: f32) -> Vec2 {
    let u = 1.0 - t;
    points[0] * (u * u * u)
        + points[1] * (3.0 * u * u * t)
        + points[2] * (3.0 * u * t * t)
        + points[3] * (t * t * t)
}

/// Paint the whole scene. Each call starts from a clean surface, so it is safe
/// to call every frame.
pub fn draw_scene(scene: &Scene, origin: Vec2, config: &RobotDrawConfig) {
    draw_rectangle(
        origin.x,
        origin.y,
        scene.surface.width,
        scene.surface.height,
        config.surface_color,
    );
    draw_movement_zones(scene.surface, scene.hit_boxes, origin, config);

    let robot = scene.robot;
    let anchor = anchor_screen(robot, origin);
    draw_power_indicator(robot, anchor, config);
    draw_part(anchor, BODY, config.body_color);
    draw_battery(robot, anchor, config);
    draw_part(anchor, HEAD, config.body_color);
    draw_eyes(robot, anchor, config);
    draw_arms(robot, anchor, config);
    draw_legs(robot, anchor, config);

    if robot.charging {
        draw_charging_cable(anchor, config);
    }
    if let Some(target) = scene.beam_target {
        draw_lasers(anchor, origin + vec2(target.x, target.y), config);
    }
}

fn draw_part(anchor: Vec2, part: Rect, color: Color) {
    draw_rectangle(anchor.x + part.x, anchor.y + part.y, part.w, part.h, color);
}

fn draw_movement_zones(
    surface: SurfaceSize,
    hit_boxes: &HitBoxConfig,
    origin: Vec2,
    config: &RobotDrawConfig,
) {
    for strip in movement_strips(surface, hit_boxes) {
        draw_rectangle(
            origin.x + strip.x,
            origin.y + strip.y,
            strip.width,
            strip.height,
            config.zone_color,
        );
    }
}

fn draw_power_indicator(robot: &RobotState, anchor: Vec2, config: &RobotDrawConfig) {
    let color = if robot.powered_on() {
        config.power_on_color
    } else {
        config.power_off_color
    };
    draw_circle(anchor.x, anchor.y + POWER_DY, POWER_RADIUS, color);
}

fn draw_battery(robot: &RobotState, anchor: Vec2, config: &RobotDrawConfig) {
    draw_part(anchor, GAUGE, config.gauge_back_color);
    let (color, width) = config.gauge_fill(robot.battery_level());
    if width > 0.0 {
        draw_rectangle(anchor.x + GAUGE.x, anchor.y + GAUGE.y, width, GAUGE.h, color);
    }
}

fn draw_eyes(robot: &RobotState, anchor: Vec2, config: &RobotDrawConfig) {
    let color = config.eye_color(robot);
    for eye in eye_positions(anchor) {
        draw_circle(eye.x, eye.y, EYE_RADIUS, color);
    }
}

fn draw_arms(robot: &RobotState, anchor: Vec2, config: &RobotDrawConfig) {
    let shoulders = [
        (anchor + vec2(-SHOULDER_DX, SHOULDER_DY), robot.pose.left_arm_angle),
        (anchor + vec2(SHOULDER_DX, SHOULDER_DY), robot.pose.right_arm_angle),
    ];
    for (shoulder, angle) in shoulders {
        draw_rectangle_ex(
            shoulder.x,
            shoulder.y,
            ARM_SIZE.x,
            ARM_SIZE.y,
            DrawRectangleParams {
                offset: ARM_PIVOT / ARM_SIZE,
                rotation: angle,
                color: config.limb_color,
            },
        );
    }
}

fn draw_legs(robot: &RobotState, anchor: Vec2, config: &RobotDrawConfig) {
    let offset = robot.pose.leg_offset;
    draw_rectangle(
        anchor.x + LEFT_LEG_DX,
        anchor.y + HIP_DY + offset,
        LEG_SIZE.x,
        LEG_SIZE.y,
        config.limb_color,
    );
    draw_rectangle(
        anchor.x + RIGHT_LEG_DX,
        anchor.y + HIP_DY - offset,
        LEG_SIZE.x,
        LEG_SIZE.y,
        config.limb_color,
    );
}

fn draw_charging_cable(anchor: Vec2, config: &RobotDrawConfig) {
    let points = CABLE.map(|point| anchor + point);
    let segments = config.cable_segments.max(1);
    let mut previous = points[0];
    for index in 1..=segments {
        let next = cubic_bezier(&points, index as f32 / segments as f32);
        draw_line(
            previous.x,
            previous.y,
            next.x,
            next.y,
            config.cable_thickness,
            config.cable_color,
        );
        previous = next;
    }
}

fn draw_lasers(anchor: Vec2, target: Vec2, config: &RobotDrawConfig) {
    for eye in eye_positions(anchor) {
        draw_line(
            eye.x,
            eye.y,
            target.x,
            target.y,
            config.laser_thickness,
            config.laser_color,
        );
    }
}
