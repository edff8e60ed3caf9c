//! Edit reducer for live configuration editing.
//!
//! Each UI field maps to one [`Edit`] variant. [`apply_edit`] takes the
//! current [`Configuration`] plus the two editing modes and returns a new
//! value; it never mutates shared state, so one accepted edit drives exactly
//! one recomputation downstream.
//!
//! Mode semantics:
//! - `fixed_base_fov`: edits to the max-zoom focal length (px, mm or FOV)
//!   set `max_zoom` while the base focal length stays put. With the mode
//!   off, the same edits set the base focal length, scaled by the current
//!   `max_zoom`. Base FOV edits are rejected while the mode is on.
//! - `fixed_pixel_aspect`: editing one physical sensor dimension (or one
//!   axis focal length) scales the other axis to preserve the aspect ratio.

use crate::config::Configuration;
use crate::math::Real;
use crate::optics::focal_from_fov_deg;

/// The two mutually independent editing modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditModes {
    /// Treat max-focal/FOV edits as zoom edits, keeping the base FOV fixed.
    pub fixed_base_fov: bool,
    /// Preserve the physical mm-per-pixel aspect ratio across axis edits.
    pub fixed_pixel_aspect: bool,
}

/// A single accepted field edit.
///
/// Numeric edits carry an already-parsed value; text that fails to parse is
/// discarded before reaching the reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    ImagePixelsX(Real),
    ImagePixelsY(Real),
    SensorWidthMm(Real),
    SensorHeightMm(Real),
    BaseFocalX(Real),
    BaseFocalY(Real),
    BaseFocalXMm(Real),
    BaseFocalYMm(Real),
    BaseFovX(Real),
    BaseFovY(Real),
    MaxFocalX(Real),
    MaxFocalY(Real),
    MaxFocalXMm(Real),
    MaxFocalYMm(Real),
    MaxFovX(Real),
    MaxFovY(Real),
    MaxZoom(Real),
    Range(Real),
    Height(Real),
    PanAngle(Real),
    TiltAngle(Real),
    Resolution(Real),
    RollRange(Real),
    Description(String),
}

/// Set the base X focal length to `fx / scale`, preserving the focal-length
/// aspect ratio when requested.
fn set_focal_x(cfg: &mut Configuration, fx: Real, scale: Real, modes: EditModes) {
    let ratio = cfg.fx / cfg.fy;
    cfg.fx = fx / scale;
    if modes.fixed_pixel_aspect {
        cfg.fy = cfg.fx / ratio;
    }
}

fn set_focal_y(cfg: &mut Configuration, fy: Real, scale: Real, modes: EditModes) {
    let ratio = cfg.fy / cfg.fx;
    cfg.fy = fy / scale;
    if modes.fixed_pixel_aspect {
        cfg.fx = cfg.fy / ratio;
    }
}

fn set_fov_x(cfg: &mut Configuration, fov_deg: Real, scale: Real, modes: EditModes) {
    set_focal_x(cfg, focal_from_fov_deg(cfg.ix, fov_deg), scale, modes);
}

fn set_fov_y(cfg: &mut Configuration, fov_deg: Real, scale: Real, modes: EditModes) {
    set_focal_y(cfg, focal_from_fov_deg(cfg.iy, fov_deg), scale, modes);
}

/// Apply one edit, returning the resulting configuration.
///
/// Edits that are disabled in the current mode (base FOV while
/// `fixed_base_fov` is on) return the input unchanged.
pub fn apply_edit(current: &Configuration, edit: Edit, modes: EditModes) -> Configuration {
    let mut cfg = current.clone();
    match edit {
        Edit::ImagePixelsX(v) => cfg.ix = v as u32,
        Edit::ImagePixelsY(v) => cfg.iy = v as u32,

        Edit::SensorWidthMm(v) => {
            let old = cfg.ixmm;
            cfg.ixmm = v;
            if modes.fixed_pixel_aspect {
                cfg.iymm *= v / old;
            }
            if !modes.fixed_base_fov {
                // Rescale the focal length inversely so the FOV holds.
                let fx = cfg.fx * old / v;
                set_focal_x(&mut cfg, fx, 1.0, modes);
            }
        }
        Edit::SensorHeightMm(v) => {
            let old = cfg.iymm;
            cfg.iymm = v;
            if modes.fixed_pixel_aspect {
                cfg.ixmm *= v / old;
            }
            if !modes.fixed_base_fov {
                let fy = cfg.fy * old / v;
                set_focal_y(&mut cfg, fy, 1.0, modes);
            }
        }

        Edit::BaseFocalX(v) => set_focal_x(&mut cfg, v, 1.0, modes),
        Edit::BaseFocalY(v) => set_focal_y(&mut cfg, v, 1.0, modes),

        Edit::BaseFocalXMm(v) => {
            if modes.fixed_base_fov {
                // Focal length is pinned, so a mm edit re-derives the
                // physical sensor width instead.
                let ratio = cfg.ixmm / cfg.iymm;
                cfg.ixmm = v * Real::from(cfg.ix) / cfg.fx;
                if modes.fixed_pixel_aspect {
                    cfg.iymm = cfg.ixmm / ratio;
                }
            } else {
                let fx = v * Real::from(cfg.ix) / cfg.ixmm;
                set_focal_x(&mut cfg, fx, 1.0, modes);
            }
        }
        Edit::BaseFocalYMm(v) => {
            if modes.fixed_base_fov {
                let ratio = cfg.iymm / cfg.ixmm;
                cfg.iymm = v * Real::from(cfg.iy) / cfg.fy;
                if modes.fixed_pixel_aspect {
                    cfg.ixmm = cfg.iymm / ratio;
                }
            } else {
                let fy = v * Real::from(cfg.iy) / cfg.iymm;
                set_focal_y(&mut cfg, fy, 1.0, modes);
            }
        }

        Edit::BaseFovX(v) => {
            if !modes.fixed_base_fov {
                set_fov_x(&mut cfg, v, 1.0, modes);
            }
        }
        Edit::BaseFovY(v) => {
            if !modes.fixed_base_fov {
                set_fov_y(&mut cfg, v, 1.0, modes);
            }
        }

        Edit::MaxFocalX(v) => {
            if modes.fixed_base_fov {
                cfg.max_zoom = v / cfg.fx;
            } else {
                let scale = cfg.max_zoom;
                set_focal_x(&mut cfg, v, scale, modes);
            }
        }
        Edit::MaxFocalY(v) => {
            if modes.fixed_base_fov {
                cfg.max_zoom = v / cfg.fy;
            } else {
                let scale = cfg.max_zoom;
                set_focal_y(&mut cfg, v, scale, modes);
            }
        }
        Edit::MaxFocalXMm(v) => {
            if modes.fixed_base_fov {
                cfg.max_zoom = v / (cfg.ixmm * cfg.fx / Real::from(cfg.ix));
            } else {
                let fx = v * Real::from(cfg.ix) / cfg.ixmm;
                let scale = cfg.max_zoom;
                set_focal_x(&mut cfg, fx, scale, modes);
            }
        }
        Edit::MaxFocalYMm(v) => {
            if modes.fixed_base_fov {
                cfg.max_zoom = v / (cfg.iymm * cfg.fy / Real::from(cfg.iy));
            } else {
                let fy = v * Real::from(cfg.iy) / cfg.iymm;
                let scale = cfg.max_zoom;
                set_focal_y(&mut cfg, fy, scale, modes);
            }
        }
        Edit::MaxFovX(v) => {
            if modes.fixed_base_fov {
                cfg.max_zoom = focal_from_fov_deg(cfg.ix, v) / cfg.fx;
            } else {
                let scale = cfg.max_zoom;
                set_fov_x(&mut cfg, v, scale, modes);
            }
        }
        Edit::MaxFovY(v) => {
            if modes.fixed_base_fov {
                cfg.max_zoom = focal_from_fov_deg(cfg.iy, v) / cfg.fy;
            } else {
                let scale = cfg.max_zoom;
                set_fov_y(&mut cfg, v, scale, modes);
            }
        }

        Edit::MaxZoom(v) => cfg.max_zoom = v,
        Edit::Range(v) => cfg.range = v,
        Edit::Height(v) => cfg.height = v,
        Edit::PanAngle(v) => cfg.pan_angle = v,
        Edit::TiltAngle(v) => cfg.tilt_angle = v,
        Edit::Resolution(v) => cfg.resolution = v,
        Edit::RollRange(v) => cfg.roll_range = v,
        Edit::Description(text) => cfg.description = text,
    }
    cfg
}
