//! Ground-coverage computation for a pan/tilt camera over a planar surface.
//!
//! `compute_coverage` turns a [`Configuration`] into, per evaluated zoom:
//! the per-pixel ground footprint versus range, a top-down scatter of the
//! covered area, and the vertical visibility bands under roll uncertainty.
//! The computation is pure and synchronous; rays at or above the horizon
//! never intersect the ground and are skipped rather than reported as
//! errors.

use serde::Serialize;

use crate::config::Configuration;
use crate::math::{Pt2, Real};
use crate::optics::{half_fov_rad, DerivedOptics};

/// Number of across-track bearings sampled per footprint sample.
const ACROSS_TRACK_SAMPLES: u32 = 100;

/// Number of range samples in each visibility band.
const BAND_SAMPLES: usize = 1000;

/// Ground footprint of one pixel pair at one ray angle.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FootprintSample {
    /// Representative ground range (midpoint, pan-attenuated), meters.
    pub range: Real,
    /// Near ground intersection of the pixel pair, meters.
    pub near: Real,
    /// Far ground intersection of the pixel pair, meters.
    pub far: Real,
    /// Along-track footprint length (`far - near`), meters.
    pub footprint: Real,
    /// Whether the footprint meets the target resolution.
    pub within_resolution: bool,
}

/// One point of the top-down coverage scatter.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TopDownPoint {
    /// Across-track (x) / along-track (y) ground position, meters.
    pub point: Pt2,
    /// Classification inherited from the footprint sample.
    pub within_resolution: bool,
}

/// One range sample of a vertical visibility band.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct BandSample {
    /// Ground range, meters.
    pub range: Real,
    /// Lower edge of the visible strip, meters above the surface (>= 0).
    pub lower: Real,
    /// Upper edge of the visible strip, meters above the surface (>= 0).
    pub upper: Real,
}

/// Vertical visibility versus range.
#[derive(Clone, Debug, Serialize)]
pub struct VisibilityBands {
    /// Strip visible at every roll attitude within the roll range.
    pub always: Vec<BandSample>,
    /// Strip visible at some roll attitude; only present when
    /// `roll_range > 0`.
    pub sometimes: Option<Vec<BandSample>>,
}

/// Coverage series for one zoom factor.
#[derive(Clone, Debug, Serialize)]
pub struct ZoomCoverage {
    pub zoom: Real,
    pub optics: DerivedOptics,
    /// Pan-angle attenuation applied to along-track ranges.
    pub pan_factor: Real,
    pub footprint: Vec<FootprintSample>,
    pub top_down: Vec<TopDownPoint>,
    pub bands: VisibilityBands,
}

/// Full coverage report over all evaluated zooms.
#[derive(Clone, Debug, Serialize)]
pub struct CoverageReport {
    pub zooms: Vec<ZoomCoverage>,
    /// Largest footprint across all zooms, for plot axis scaling.
    pub max_footprint: Option<Real>,
}

/// Pan attenuation: `cos` of how far the camera bearing is from abeam,
/// less the horizontal half FOV. No penalty while the horizontal FOV still
/// straddles the perpendicular.
fn pan_factor(cfg: &Configuration, zoom: Real) -> Real {
    let hfov_x = half_fov_rad(cfg.ix, cfg.fx, zoom);
    let offset = (90.0 - cfg.pan_angle).abs().to_radians();
    if offset < hfov_x {
        1.0
    } else {
        (offset - hfov_x).cos()
    }
}

/// Per-pixel ray angles relative to the optical axis along the tilt axis,
/// one per pixel boundary, monotonically increasing.
fn sensor_angles_y(cfg: &Configuration, zoom: Real) -> Vec<Real> {
    let center = Real::from(cfg.iy) / 2.0;
    (0..=cfg.iy)
        .map(|i| (Real::from(i) - center).atan2(cfg.fy * zoom))
        .collect()
}

/// Across-track ray angles, sampled evenly over the horizontal pixel range.
fn sensor_angles_x(cfg: &Configuration, zoom: Real) -> Vec<Real> {
    let center = Real::from(cfg.ix) / 2.0;
    let step = Real::from(cfg.ix) / Real::from(ACROSS_TRACK_SAMPLES);
    (0..ACROSS_TRACK_SAMPLES)
        .map(|i| (Real::from(i) * step - center).atan2(cfg.fx * zoom))
        .collect()
}

/// Ordered ray angles sampling the union of the roll-swept vertical FOV.
///
/// The nominal per-pixel angles are extended below the near edge and beyond
/// the far edge by the roll half-angle, oversampling near the original
/// edges.
fn roll_swept_angles(sensor_angles: &[Real], start_angle: Real, roll_rad: Real) -> Vec<Real> {
    let first = sensor_angles[0];
    let last = sensor_angles[sensor_angles.len() - 1];
    let mut angles = Vec::with_capacity(sensor_angles.len() * 2);

    for &sa in sensor_angles {
        if sa - roll_rad < first {
            angles.push(start_angle - roll_rad + (sa - first));
        }
    }
    for &sa in sensor_angles {
        angles.push(start_angle + (sa - first));
    }
    for &sa in sensor_angles {
        if sa + roll_rad > last {
            angles.push(start_angle + roll_rad + (sa - first));
        }
    }
    angles
}

fn band(
    cfg: &Configuration,
    start_angle: Real,
    end_angle: Real,
    range_scale: Real,
) -> Vec<BandSample> {
    let lower_tan = start_angle.tan();
    let upper_tan = end_angle.tan();
    (0..BAND_SAMPLES)
        .map(|i| {
            let range = cfg.range * i as Real / BAND_SAMPLES as Real;
            BandSample {
                range,
                lower: Real::max(0.0, (range / range_scale) * lower_tan + cfg.height),
                upper: Real::max(0.0, (range / range_scale) * upper_tan + cfg.height),
            }
        })
        .collect()
}

fn coverage_at_zoom(cfg: &Configuration, zoom: Real) -> ZoomCoverage {
    let pan_factor = pan_factor(cfg, zoom);
    let pan_rad = cfg.pan_angle.to_radians();
    let roll_rad = cfg.roll_range.to_radians();

    let angles_y = sensor_angles_y(cfg, zoom);
    let angles_x = sensor_angles_x(cfg, zoom);

    // Tilt applies at the bottom edge of the sensor; the swept interval
    // spans the full vertical FOV from there.
    let start_angle = cfg.tilt_angle.to_radians() + angles_y[0];
    let end_angle = start_angle + (angles_y[angles_y.len() - 1] - angles_y[0]);

    let mut footprint = Vec::new();
    let mut top_down = Vec::new();

    let mut prev: Option<Real> = None;
    for angle in roll_swept_angles(&angles_y, start_angle, roll_rad) {
        // Only rays strictly below the horizon intersect the ground.
        if angle < 0.0 {
            if let Some(prev_angle) = prev {
                let near = -cfg.height / prev_angle.tan();
                let far = -cfg.height / angle.tan();
                let mid = near + (far - near) / 2.0;
                let length = far - near;
                let within_resolution = length <= cfg.resolution;
                footprint.push(FootprintSample {
                    range: mid * pan_factor,
                    near,
                    far,
                    footprint: length,
                    within_resolution,
                });
                for &xa in &angles_x {
                    let bearing = xa + pan_rad;
                    top_down.push(TopDownPoint {
                        point: Pt2::new(bearing.sin() * mid, bearing.cos() * mid),
                        within_resolution,
                    });
                }
            }
        }
        prev = Some(angle);
    }

    if footprint.is_empty() {
        log::debug!(
            "no ground intersection at zoom {zoom} (tilt {} deg, roll {} deg)",
            cfg.tilt_angle,
            cfg.roll_range
        );
    }

    let bands = VisibilityBands {
        always: band(cfg, start_angle + roll_rad, end_angle - roll_rad, 1.0),
        sometimes: (roll_rad > 0.0)
            .then(|| band(cfg, start_angle - roll_rad, end_angle + roll_rad, pan_factor)),
    };

    ZoomCoverage {
        zoom,
        optics: DerivedOptics::for_zoom(cfg, zoom),
        pan_factor,
        footprint,
        top_down,
        bands,
    }
}

/// Compute the full coverage report for every evaluated zoom.
pub fn compute_coverage(cfg: &Configuration) -> CoverageReport {
    let zooms: Vec<ZoomCoverage> = cfg
        .zoom_levels()
        .into_iter()
        .map(|z| coverage_at_zoom(cfg, z))
        .collect();

    let max_footprint = zooms
        .iter()
        .flat_map(|z| z.footprint.iter().map(|s| s.footprint))
        .fold(None, |acc: Option<Real>, f| {
            Some(acc.map_or(f, |m| m.max(f)))
        });

    CoverageReport {
        zooms,
        max_footprint,
    }
}
