//! Persistence for labeled sets of camera configurations.
//!
//! A planner file is a JSON document with a single `configurations` array;
//! each record carries a `label`, every [`Configuration`] field by name, and
//! a free-text `description`. Loading is tolerant: a missing or malformed
//! field falls back to that field's documented default (logged, never an
//! error), so partial records round-trip into valid configurations. Saving
//! always emits every field in a fixed order, and `save` followed by `load`
//! reproduces every value exactly at f64 precision.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use geocam_core::{Configuration, Real};

/// Errors from reading or writing a planner file.
///
/// Field-level problems are never errors; only an unusable document or an
/// I/O failure surfaces here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed planner file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("planner file root must be a JSON object")]
    BadRoot,
}

/// One labeled configuration record.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledConfig {
    pub label: String,
    pub config: Configuration,
}

/// An ordered set of labeled configurations, as stored in one planner file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigSet {
    pub records: Vec<LabeledConfig>,
}

#[derive(Serialize)]
struct FileRepr<'a> {
    configurations: Vec<RecordRepr<'a>>,
}

#[derive(Serialize)]
struct RecordRepr<'a> {
    label: &'a str,
    #[serde(flatten)]
    config: &'a Configuration,
}

fn float_field(obj: &Map<String, Value>, key: &str, default: Real) -> Real {
    match obj.get(key) {
        None => default,
        Some(v) => v
            .as_f64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
            .unwrap_or_else(|| {
                warn!("field {key:?} is not a number ({v}), using default {default}");
                default
            }),
    }
}

fn int_field(obj: &Map<String, Value>, key: &str, default: u32) -> u32 {
    match obj.get(key) {
        None => default,
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
            .unwrap_or_else(|| {
                warn!("field {key:?} is not an integer ({v}), using default {default}");
                default
            }),
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Build a configuration from one record object, substituting the
/// documented default for any field that is absent or malformed.
fn config_from_record(obj: &Map<String, Value>) -> Configuration {
    let d = Configuration::default();
    Configuration {
        fx: float_field(obj, "fx", d.fx),
        fy: float_field(obj, "fy", d.fy),
        ix: int_field(obj, "ix", d.ix),
        iy: int_field(obj, "iy", d.iy),
        ixmm: float_field(obj, "ixmm", d.ixmm),
        iymm: float_field(obj, "iymm", d.iymm),
        max_zoom: float_field(obj, "max_zoom", d.max_zoom),
        range: float_field(obj, "range", d.range),
        height: float_field(obj, "height", d.height),
        pan_angle: float_field(obj, "pan_angle", d.pan_angle),
        tilt_angle: float_field(obj, "tilt_angle", d.tilt_angle),
        resolution: float_field(obj, "resolution", d.resolution),
        roll_range: float_field(obj, "roll_range", d.roll_range),
        description: string_field(obj, "description"),
    }
}

impl ConfigSet {
    /// Load a configuration set from a reader.
    pub fn load<R: Read>(reader: R) -> Result<Self, StoreError> {
        let root: Value = serde_json::from_reader(reader)?;
        let root = root.as_object().ok_or(StoreError::BadRoot)?;

        let mut records = Vec::new();
        match root.get("configurations") {
            None => warn!("planner file has no \"configurations\" array, loading empty set"),
            Some(Value::Array(entries)) => {
                for entry in entries {
                    let Some(obj) = entry.as_object() else {
                        warn!("skipping non-object configuration record");
                        continue;
                    };
                    let label = string_field(obj, "label");
                    if !obj.contains_key("label") {
                        warn!("configuration record has no label");
                    }
                    records.push(LabeledConfig {
                        label,
                        config: config_from_record(obj),
                    });
                }
            }
            Some(other) => {
                warn!("\"configurations\" is not an array ({other}), loading empty set");
            }
        }
        Ok(Self { records })
    }

    /// Load a configuration set from a file.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::load(BufReader::new(File::open(path)?))
    }

    /// Save the set, emitting every field of every record in canonical
    /// order.
    pub fn save<W: Write>(&self, mut writer: W) -> Result<(), StoreError> {
        let repr = FileRepr {
            configurations: self
                .records
                .iter()
                .map(|r| RecordRepr {
                    label: &r.label,
                    config: &r.config,
                })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut writer, &repr)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Save the set to a file.
    pub fn save_path<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.save(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Look up a configuration by label (first match wins).
    pub fn get(&self, label: &str) -> Option<&Configuration> {
        self.records
            .iter()
            .find(|r| r.label == label)
            .map(|r| &r.config)
    }

    /// Append a labeled configuration.
    pub fn push(&mut self, label: impl Into<String>, config: Configuration) {
        self.records.push(LabeledConfig {
            label: label.into(),
            config,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_loads_all_defaults() {
        let set = ConfigSet::load(
            r#"{"configurations": [{"label": "defaults"}]}"#.as_bytes(),
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.records[0].label, "defaults");
        assert_eq!(set.records[0].config, Configuration::default());
    }

    #[test]
    fn malformed_field_falls_back_to_default_only() {
        let set = ConfigSet::load(
            r#"{"configurations": [{"label": "a", "fx": "not a number", "height": 12.0}]}"#
                .as_bytes(),
        )
        .unwrap();
        let cfg = &set.records[0].config;
        assert_eq!(cfg.fx, Configuration::default().fx);
        assert_eq!(cfg.height, 12.0);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let set = ConfigSet::load(
            r#"{"configurations": [{"label": "a", "fx": "640.5", "ix": "1024"}]}"#.as_bytes(),
        )
        .unwrap();
        let cfg = &set.records[0].config;
        assert_eq!(cfg.fx, 640.5);
        assert_eq!(cfg.ix, 1024);
    }

    #[test]
    fn float_valued_int_field_is_rejected() {
        let set = ConfigSet::load(
            r#"{"configurations": [{"label": "a", "ix": 1024.5}]}"#.as_bytes(),
        )
        .unwrap();
        assert_eq!(set.records[0].config.ix, Configuration::default().ix);
    }

    #[test]
    fn missing_configurations_array_is_an_empty_set() {
        let set = ConfigSet::load(r#"{}"#.as_bytes()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn non_object_root_is_an_error() {
        assert!(matches!(
            ConfigSet::load(r#"[1, 2, 3]"#.as_bytes()),
            Err(StoreError::BadRoot)
        ));
    }

    #[test]
    fn lookup_by_label_finds_first_match() {
        let mut set = ConfigSet::default();
        set.push("near", Configuration::default());
        set.push(
            "far",
            Configuration {
                range: 5000.0,
                ..Configuration::default()
            },
        );
        assert_eq!(set.get("far").unwrap().range, 5000.0);
        assert!(set.get("missing").is_none());
    }
}
