use crate::config::HitBoxConfig;
use crate::coordinates::{Point, Rect, SurfaceSize};
use crate::events::Arm;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Arm(Arm),
    Move { target_x: f32 },
    Fire { target: Point },
}

pub fn arm_hit_box(anchor: Point, arm: Arm, hit_boxes: &HitBoxConfig) -> Rect {
    let top = anchor.y + hit_boxes.arm_top_dy;
    let bottom = anchor.y + hit_boxes.arm_bottom_dy;
    match arm {
        Arm::Left => Rect::from_edges(
            anchor.x - hit_boxes.arm_outer_dx,
            top,
            anchor.x - hit_boxes.arm_inner_dx,
            bottom,
        ),
        Arm::Right => Rect::from_edges(
            anchor.x + hit_boxes.arm_inner_dx,
            top,
            anchor.x + hit_boxes.arm_outer_dx,
            bottom,
        ),
    }
}

/// True inside the bottom half, left or right of the centred exclusion band.
pub fn in_movement_strip(point: Point, surface: SurfaceSize, hit_boxes: &HitBoxConfig) -> bool {
    let strip = surface.width * hit_boxes.strip_fraction();
    point.y >= surface.half_height()
        && (point.x < strip || point.x > surface.width - strip)
}

/// Resolve a pointer position to exactly one zone. Arms win over the
/// movement strips, and anything unmatched fires.
pub fn classify(
    point: Point,
    anchor: Point,
    surface: SurfaceSize,
    hit_boxes: &HitBoxConfig,
) -> Zone {
    if arm_hit_box(anchor, Arm::Left, hit_boxes).contains(point) {
        Zone::Arm(Arm::Left)
    } else if arm_hit_box(anchor, Arm::Right, hit_boxes).contains(point) {
        Zone::Arm(Arm::Right)
    } else if in_movement_strip(point, surface, hit_boxes) {
        Zone::Move { target_x: point.x }
    } else {
        Zone::Fire { target: point }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: SurfaceSize = SurfaceSize::new(1000.0, 560.0);
    const ANCHOR: Point = Point::new(500.0, 420.0);

    fn zone_at(x: f32, y: f32) -> Zone {
        classify(Point::new(x, y), ANCHOR, SURFACE, &HitBoxConfig::default())
    }

    #[test]
    fn arm_boxes_match_shoulder_geometry() {
        assert_eq!(zone_at(450.0, 400.0), Zone::Arm(Arm::Left));
        assert_eq!(zone_at(440.0, 370.0), Zone::Arm(Arm::Left));
        assert_eq!(zone_at(460.0, 460.0), Zone::Arm(Arm::Left));
        assert_eq!(zone_at(550.0, 400.0), Zone::Arm(Arm::Right));
        assert_eq!(zone_at(560.0, 460.0), Zone::Arm(Arm::Right));
    }

    #[test]
    fn body_between_arms_fires() {
        assert_eq!(
            zone_at(500.0, 400.0),
            Zone::Fire {
                target: Point::new(500.0, 400.0)
            }
        );
    }

    #[test]
    fn bottom_strips_move() {
        assert_eq!(zone_at(100.0, 500.0), Zone::Move { target_x: 100.0 });
        assert_eq!(zone_at(900.0, 280.0), Zone::Move { target_x: 900.0 });
    }

    #[test]
    fn exclusion_band_and_top_half_fire() {
        assert!(matches!(zone_at(300.0, 500.0), Zone::Fire { .. }));
        assert!(matches!(zone_at(700.0, 500.0), Zone::Fire { .. }));
        assert!(matches!(zone_at(100.0, 279.0), Zone::Fire { .. }));
    }

    #[test]
    fn arm_box_wins_over_strip() {
        let surface = SurfaceSize::new(200.0, 300.0);
        let anchor = Point::new(100.0, 160.0);
        let hit_boxes = HitBoxConfig::default();
        // Inside the left arm box and inside the left movement strip.
        let point = Point::new(45.0, 170.0);
        assert!(in_movement_strip(point, surface, &hit_boxes));
        assert_eq!(
            classify(point, anchor, surface, &hit_boxes),
            Zone::Arm(Arm::Left)
        );
    }
}
