use crate::config::{HitBoxConfig, SurfaceConfig};
use crate::coordinates::{Point, Rect, SurfaceSize};

/// Fit the drawing surface inside the viewport, keeping the target aspect
/// ratio and the width bounds.
pub fn fit_surface(viewport: SurfaceSize, config: &SurfaceConfig) -> SurfaceSize {
    let aspect = if viewport.width <= config.min_width {
        config.narrow_aspect
    } else {
        config.wide_aspect
    };

    let mut width = viewport.width * config.viewport_fill;
    let mut height = viewport.height * config.viewport_fill;

    if width / height > aspect {
        width = height * aspect;
    } else {
        height = width / aspect;
    }

    if width > config.max_width {
        width = config.max_width;
        height = config.max_width / aspect;
    }

    SurfaceSize::new(width.max(0.0), height.max(0.0))
}

/// Where the robot's body centre sits: horizontally centred, a fixed margin
/// above the bottom edge.
pub fn robot_anchor(surface: SurfaceSize, config: &SurfaceConfig) -> Point {
    Point::new(
        surface.width / 2.0,
        surface.height - config.anchor_bottom_margin,
    )
}

/// The left and right movement strips covering the bottom half of the surface.
pub fn movement_strips(surface: SurfaceSize, hit_boxes: &HitBoxConfig) -> [Rect; 2] {
    let strip_width = surface.width * hit_boxes.strip_fraction();
    let top = surface.half_height();
    let height = surface.height - top;
    [
        Rect::new(0.0, top, strip_width, height),
        Rect::new(surface.width - strip_width, top, strip_width, height),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn wide_viewport_is_capped_at_max_width() {
        let size = fit_surface(SurfaceSize::new(1920.0, 1080.0), &SurfaceConfig::default());
        assert!(approx(size.width, 1000.0));
        assert!(approx(size.height, 562.5));
    }

    #[test]
    fn short_viewport_derives_width_from_height() {
        let size = fit_surface(SurfaceSize::new(800.0, 300.0), &SurfaceConfig::default());
        assert!(approx(size.height, 270.0));
        assert!(approx(size.width, 480.0));
    }

    #[test]
    fn narrow_viewport_goes_square() {
        let size = fit_surface(SurfaceSize::new(500.0, 800.0), &SurfaceConfig::default());
        assert!(approx(size.width, 450.0));
        assert!(approx(size.height, 450.0));
    }

    #[test]
    fn empty_viewport_stays_empty() {
        let size = fit_surface(SurfaceSize::new(0.0, 0.0), &SurfaceConfig::default());
        assert_eq!(size, SurfaceSize::new(0.0, 0.0));
    }

    #[test]
    fn anchor_sits_above_bottom_margin() {
        let anchor = robot_anchor(SurfaceSize::new(1000.0, 562.5), &SurfaceConfig::default());
        assert!(approx(anchor.x, 500.0));
        assert!(approx(anchor.y, 422.5));
    }

    #[test]
    fn strips_cover_outer_thirty_percent() {
        let [left, right] =
            movement_strips(SurfaceSize::new(1000.0, 500.0), &HitBoxConfig::default());
        assert!(approx(left.width, 300.0));
        assert!(approx(left.y, 250.0));
        assert!(approx(right.x, 700.0));
        assert!(approx(right.bottom(), 500.0));
    }
}
