//! Derived optical quantities: focal length conversions and fields of view.
//!
//! All conversions are pure functions of a [`Configuration`] (or of raw
//! pixel/focal values, for live-editing round trips in a UI).

use serde::Serialize;

use crate::config::{Axis, Configuration};
use crate::math::Real;

/// Half field of view in radians for a sensor extent of `pixels` at
/// `focal_px * zoom`.
pub fn half_fov_rad(pixels: u32, focal_px: Real, zoom: Real) -> Real {
    (Real::from(pixels) / 2.0).atan2(focal_px * zoom)
}

/// Full field of view in degrees.
pub fn fov_deg(pixels: u32, focal_px: Real, zoom: Real) -> Real {
    (2.0 * half_fov_rad(pixels, focal_px, zoom)).to_degrees()
}

/// Focal length in pixels that yields `fov_deg` over a sensor of `pixels`.
///
/// Inverse of [`fov_deg`] at unit zoom.
pub fn focal_from_fov_deg(pixels: u32, fov_deg: Real) -> Real {
    (Real::from(pixels) / 2.0) / (fov_deg / 2.0).to_radians().tan()
}

/// Focal length in mm along `axis` at base zoom.
pub fn focal_length_mm(cfg: &Configuration, axis: Axis) -> Real {
    cfg.focal_px(axis) * cfg.sensor_mm(axis) / Real::from(cfg.pixels(axis))
}

/// Field of view in degrees along `axis` at the given zoom.
pub fn field_of_view_deg(cfg: &Configuration, axis: Axis, zoom: Real) -> Real {
    fov_deg(cfg.pixels(axis), cfg.focal_px(axis), zoom)
}

/// Optics along one sensor axis at a specific zoom.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AxisOptics {
    /// Effective focal length in pixels (`base * zoom`).
    pub focal_px: Real,
    /// Effective focal length in mm.
    pub focal_mm: Real,
    /// Full field of view in degrees.
    pub fov_deg: Real,
}

/// Derived optics for both axes at a specific zoom, as displayed alongside
/// the computed coverage.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DerivedOptics {
    pub zoom: Real,
    pub x: AxisOptics,
    pub y: AxisOptics,
}

impl DerivedOptics {
    pub fn for_zoom(cfg: &Configuration, zoom: Real) -> Self {
        let axis = |a: Axis| AxisOptics {
            focal_px: cfg.focal_px(a) * zoom,
            focal_mm: focal_length_mm(cfg, a) * zoom,
            fov_deg: field_of_view_deg(cfg, a, zoom),
        };
        Self {
            zoom,
            x: axis(Axis::X),
            y: axis(Axis::Y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fov_and_focal_compose_to_identity() {
        for &(pixels, focal) in &[(2560u32, 1280.0), (1920, 960.0), (640, 2000.0)] {
            let fov = fov_deg(pixels, focal, 1.0);
            let back = focal_from_fov_deg(pixels, fov);
            assert_relative_eq!(back, focal, max_relative = 1e-12);
        }
    }

    #[test]
    fn focal_mm_scales_linearly_with_focal_px() {
        let mut cfg = Configuration::default();
        let base = focal_length_mm(&cfg, Axis::X);
        cfg.fx *= 3.0;
        let scaled = focal_length_mm(&cfg, Axis::X);
        assert_relative_eq!(scaled, 3.0 * base, max_relative = 1e-12);
    }

    #[test]
    fn zoom_narrows_the_field_of_view() {
        let cfg = Configuration::default();
        let wide = field_of_view_deg(&cfg, Axis::Y, 1.0);
        let tele = field_of_view_deg(&cfg, Axis::Y, 4.0);
        assert!(tele < wide);
    }

    #[test]
    fn derived_optics_match_free_functions() {
        let cfg = Configuration {
            max_zoom: 2.0,
            ..Configuration::default()
        };
        let optics = DerivedOptics::for_zoom(&cfg, 2.0);
        assert_relative_eq!(optics.x.focal_px, cfg.fx * 2.0);
        assert_relative_eq!(optics.y.fov_deg, field_of_view_deg(&cfg, Axis::Y, 2.0));
        assert_relative_eq!(
            optics.x.focal_mm,
            2.0 * focal_length_mm(&cfg, Axis::X),
            max_relative = 1e-12
        );
    }
}
