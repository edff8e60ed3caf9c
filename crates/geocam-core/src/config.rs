//! Camera and mounting configuration.
//!
//! A [`Configuration`] is a plain value object: the coverage engine never
//! mutates one. Edits construct a new value (see [`crate::edit`]), and the
//! store reads/writes whole sets of labeled configurations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::Real;

/// Sensor axis selector.
///
/// `X` is across-track (pan direction), `Y` is along-track (tilt direction).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One named camera + mounting setup.
///
/// Angles are in degrees; `tilt_angle < 0` points below the horizon.
/// Focal lengths are in pixels at minimum zoom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Base focal length along X, in pixels.
    #[serde(default = "defaults::fx")]
    pub fx: Real,
    /// Base focal length along Y, in pixels.
    #[serde(default = "defaults::fy")]
    pub fy: Real,
    /// Sensor resolution along X, in pixels.
    #[serde(default = "defaults::ix")]
    pub ix: u32,
    /// Sensor resolution along Y, in pixels.
    #[serde(default = "defaults::iy")]
    pub iy: u32,
    /// Physical sensor width in mm.
    #[serde(default = "defaults::ixmm")]
    pub ixmm: Real,
    /// Physical sensor height in mm.
    #[serde(default = "defaults::iymm")]
    pub iymm: Real,
    /// Ratio of maximum to minimum focal length (>= 1).
    #[serde(default = "defaults::max_zoom")]
    pub max_zoom: Real,
    /// Maximum range of interest in meters.
    #[serde(default = "defaults::range")]
    pub range: Real,
    /// Camera height above the reference plane in meters.
    #[serde(default = "defaults::height")]
    pub height: Real,
    /// Bearing relative to the reference heading, degrees (90 = abeam).
    #[serde(default = "defaults::pan_angle")]
    pub pan_angle: Real,
    /// Tilt relative to horizontal, degrees (negative = down).
    #[serde(default = "defaults::tilt_angle")]
    pub tilt_angle: Real,
    /// Target maximum ground footprint of one pixel, meters.
    #[serde(default = "defaults::resolution")]
    pub resolution: Real,
    /// Half-angle of roll uncertainty around the nominal tilt, degrees.
    #[serde(default = "defaults::roll_range")]
    pub roll_range: Real,
    /// Free-text annotation; no effect on computation.
    #[serde(default)]
    pub description: String,
}

/// Documented default for each persisted field.
pub(crate) mod defaults {
    use crate::math::Real;

    pub fn fx() -> Real {
        1280.0
    }
    pub fn fy() -> Real {
        1280.0
    }
    pub fn ix() -> u32 {
        2560
    }
    pub fn iy() -> u32 {
        1920
    }
    pub fn ixmm() -> Real {
        5.76
    }
    pub fn iymm() -> Real {
        4.29
    }
    pub fn max_zoom() -> Real {
        1.0
    }
    pub fn range() -> Real {
        1000.0
    }
    pub fn height() -> Real {
        30.0
    }
    pub fn pan_angle() -> Real {
        90.0
    }
    pub fn tilt_angle() -> Real {
        -5.0
    }
    pub fn resolution() -> Real {
        1.0
    }
    pub fn roll_range() -> Real {
        1.5
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            fx: defaults::fx(),
            fy: defaults::fy(),
            ix: defaults::ix(),
            iy: defaults::iy(),
            ixmm: defaults::ixmm(),
            iymm: defaults::iymm(),
            max_zoom: defaults::max_zoom(),
            range: defaults::range(),
            height: defaults::height(),
            pan_angle: defaults::pan_angle(),
            tilt_angle: defaults::tilt_angle(),
            resolution: defaults::resolution(),
            roll_range: defaults::roll_range(),
            description: String::new(),
        }
    }
}

/// Constraint violations reported by [`Configuration::validate`].
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("focal length along {axis:?} must be positive, got {value}")]
    NonPositiveFocalLength { axis: Axis, value: Real },
    #[error("sensor must be at least 1 pixel along {axis:?}, got 0")]
    EmptySensor { axis: Axis },
    #[error("physical sensor size along {axis:?} must be positive, got {value}")]
    NonPositiveSensorSize { axis: Axis, value: Real },
    #[error("max zoom must be >= 1, got {0}")]
    MaxZoomBelowOne(Real),
    #[error("range must be positive, got {0}")]
    NonPositiveRange(Real),
    #[error("target resolution must be positive, got {0}")]
    NonPositiveResolution(Real),
    #[error("roll range must be non-negative, got {0}")]
    NegativeRollRange(Real),
}

impl Configuration {
    /// Base focal length along `axis`, in pixels.
    pub fn focal_px(&self, axis: Axis) -> Real {
        match axis {
            Axis::X => self.fx,
            Axis::Y => self.fy,
        }
    }

    /// Pixel count along `axis`.
    pub fn pixels(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.ix,
            Axis::Y => self.iy,
        }
    }

    /// Physical sensor extent along `axis`, in mm.
    pub fn sensor_mm(&self, axis: Axis) -> Real {
        match axis {
            Axis::X => self.ixmm,
            Axis::Y => self.iymm,
        }
    }

    /// Check the documented field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in [Axis::X, Axis::Y] {
            let f = self.focal_px(axis);
            if !(f > 0.0) {
                return Err(ConfigError::NonPositiveFocalLength { axis, value: f });
            }
            if self.pixels(axis) == 0 {
                return Err(ConfigError::EmptySensor { axis });
            }
            let mm = self.sensor_mm(axis);
            if !(mm > 0.0) {
                return Err(ConfigError::NonPositiveSensorSize { axis, value: mm });
            }
        }
        if !(self.max_zoom >= 1.0) {
            return Err(ConfigError::MaxZoomBelowOne(self.max_zoom));
        }
        if !(self.range > 0.0) {
            return Err(ConfigError::NonPositiveRange(self.range));
        }
        if !(self.resolution > 0.0) {
            return Err(ConfigError::NonPositiveResolution(self.resolution));
        }
        if !(self.roll_range >= 0.0) {
            return Err(ConfigError::NegativeRollRange(self.roll_range));
        }
        Ok(())
    }

    /// Zoom factors evaluated for this configuration: minimum zoom always,
    /// plus the maximum when it is an actual zoom lens.
    pub fn zoom_levels(&self) -> Vec<Real> {
        let mut zooms = vec![1.0];
        if self.max_zoom > 1.0 {
            zooms.push(self.max_zoom);
        }
        zooms
    }
}
