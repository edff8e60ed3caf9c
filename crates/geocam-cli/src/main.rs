//! geocam CLI — compute camera coverage reports from planner files.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::warn;
use serde::Serialize;

use geocam_core::{
    compute_coverage, focal_from_fov_deg, fov_deg, Configuration, CoverageReport, DerivedOptics,
};
use geocam_store::ConfigSet;

type CliError = Box<dyn Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "geocam")]
#[command(about = "Coverage planner for pan/tilt cameras observing a planar surface")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a planner file containing one default configuration.
    New {
        /// Output planner file.
        #[arg(long)]
        out: PathBuf,
        /// Label for the new configuration.
        #[arg(long, default_value = "default")]
        label: String,
    },

    /// List the configurations in a planner file.
    List {
        /// Input planner file.
        #[arg(long)]
        input: PathBuf,
    },

    /// Compute coverage reports and emit them as JSON.
    Report(ReportArgs),

    /// Print derived optics (focal lengths, fields of view) per zoom.
    Optics {
        /// Input planner file.
        #[arg(long)]
        input: PathBuf,
        /// Configuration label.
        #[arg(long)]
        label: String,
    },

    /// Load a planner file tolerantly and save it back in canonical form.
    Normalize {
        /// Input planner file.
        #[arg(long)]
        input: PathBuf,
        /// Output planner file.
        #[arg(long)]
        out: PathBuf,
    },

    /// Convert a field of view in degrees to a focal length in pixels.
    FovToFocal {
        /// Sensor extent in pixels along the axis.
        #[arg(long)]
        pixels: u32,
        /// Full field of view in degrees.
        #[arg(long)]
        fov_deg: f64,
    },

    /// Convert a focal length in pixels to a field of view in degrees.
    FocalToFov {
        /// Sensor extent in pixels along the axis.
        #[arg(long)]
        pixels: u32,
        /// Base focal length in pixels.
        #[arg(long)]
        focal_px: f64,
        /// Zoom factor applied to the focal length.
        #[arg(long, default_value = "1.0")]
        zoom: f64,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// Input planner file (labeled configuration set).
    #[arg(long, conflicts_with = "config")]
    input: Option<PathBuf>,

    /// Single bare configuration as JSON (missing fields take defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report only this label (default: every configuration in the set).
    #[arg(long, requires = "input")]
    label: Option<String>,

    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Serialize)]
struct LabeledReport {
    label: String,
    configuration: Configuration,
    coverage: CoverageReport,
}

fn labeled_report(label: &str, config: &Configuration) -> LabeledReport {
    if let Err(e) = config.validate() {
        warn!("configuration {label:?} fails validation: {e}");
    }
    LabeledReport {
        label: label.to_string(),
        configuration: config.clone(),
        coverage: compute_coverage(config),
    }
}

fn cmd_report(args: &ReportArgs) -> CliResult<String> {
    let reports: Vec<LabeledReport> = if let Some(path) = &args.config {
        let config: Configuration = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        vec![labeled_report("", &config)]
    } else if let Some(path) = &args.input {
        let set = ConfigSet::load_path(path)?;
        match &args.label {
            Some(label) => {
                let config = set
                    .get(label)
                    .ok_or_else(|| format!("no configuration labeled {label:?} in {path:?}"))?;
                vec![labeled_report(label, config)]
            }
            None => set
                .records
                .iter()
                .map(|r| labeled_report(&r.label, &r.config))
                .collect(),
        }
    } else {
        return Err("either --input or --config is required".into());
    };

    Ok(serde_json::to_string_pretty(&reports)?)
}

fn cmd_list(input: &PathBuf) -> CliResult<String> {
    let set = ConfigSet::load_path(input)?;
    let mut out = String::new();
    for record in &set.records {
        out.push_str(&record.label);
        if !record.config.description.is_empty() {
            out.push_str(" - ");
            out.push_str(&record.config.description);
        }
        out.push('\n');
    }
    Ok(out)
}

fn cmd_optics(input: &PathBuf, label: &str) -> CliResult<String> {
    let set = ConfigSet::load_path(input)?;
    let config = set
        .get(label)
        .ok_or_else(|| format!("no configuration labeled {label:?} in {input:?}"))?;

    let mut out = String::new();
    for zoom in config.zoom_levels() {
        let optics = DerivedOptics::for_zoom(config, zoom);
        out.push_str(&format!("zoom {:.2}\n", optics.zoom));
        for (name, axis) in [("x", &optics.x), ("y", &optics.y)] {
            out.push_str(&format!(
                "  {name}: focal {:.2} px ({:.3} mm), fov {:.3} deg\n",
                axis.focal_px, axis.focal_mm, axis.fov_deg
            ));
        }
    }
    Ok(out)
}

fn cmd_normalize(input: &PathBuf, out: &PathBuf) -> CliResult<()> {
    let set = ConfigSet::load_path(input)?;
    set.save_path(out)?;
    Ok(())
}

fn cmd_new(out: &PathBuf, label: &str) -> CliResult<()> {
    let mut set = ConfigSet::default();
    set.push(label, Configuration::default());
    set.save_path(out)?;
    Ok(())
}

fn write_or_print(text: &str, out: Option<&PathBuf>) -> CliResult<()> {
    match out {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}

fn try_main() -> CliResult<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::New { out, label } => cmd_new(out, label),
        Commands::List { input } => {
            print!("{}", cmd_list(input)?);
            Ok(())
        }
        Commands::Report(args) => {
            let mut json = cmd_report(args)?;
            json.push('\n');
            write_or_print(&json, args.out.as_ref())
        }
        Commands::Optics { input, label } => {
            print!("{}", cmd_optics(input, label)?);
            Ok(())
        }
        Commands::Normalize { input, out } => cmd_normalize(input, out),
        Commands::FovToFocal { pixels, fov_deg } => {
            println!("{}", focal_from_fov_deg(*pixels, *fov_deg));
            Ok(())
        }
        Commands::FocalToFov {
            pixels,
            focal_px,
            zoom,
        } => {
            println!("{}", fov_deg(*pixels, *focal_px, *zoom));
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocam_core::{field_of_view_deg, Axis};

    fn planner_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("cameras.json");
        let mut set = ConfigSet::default();
        set.push(
            "bow",
            Configuration {
                tilt_angle: -8.0,
                max_zoom: 2.0,
                ..Configuration::default()
            },
        );
        set.push("stern", Configuration::default());
        set.save_path(&path).unwrap();
        path
    }

    #[test]
    fn report_covers_every_labeled_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = planner_file(&dir);
        let args = ReportArgs {
            input: Some(path),
            config: None,
            label: None,
            out: None,
        };
        let json = cmd_report(&args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let reports = value.as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["label"], "bow");
        // bow has max_zoom 2.0, so two zoom series.
        assert_eq!(reports[0]["coverage"]["zooms"].as_array().unwrap().len(), 2);
        assert_eq!(reports[1]["coverage"]["zooms"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn report_by_label_selects_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = planner_file(&dir);
        let args = ReportArgs {
            input: Some(path),
            config: None,
            label: Some("stern".to_string()),
            out: None,
        };
        let json = cmd_report(&args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["label"], "stern");
    }

    #[test]
    fn report_with_unknown_label_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = planner_file(&dir);
        let args = ReportArgs {
            input: Some(path),
            config: None,
            label: Some("keel".to_string()),
            out: None,
        };
        assert!(cmd_report(&args).is_err());
    }

    #[test]
    fn report_accepts_a_bare_partial_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.json");
        std::fs::write(&path, r#"{"tilt_angle": -15.0}"#).unwrap();
        let args = ReportArgs {
            input: None,
            config: Some(path),
            label: None,
            out: None,
        };
        let json = cmd_report(&args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["configuration"]["tilt_angle"], -15.0);
        // Missing fields were defaulted.
        assert_eq!(value[0]["configuration"]["ix"], 2560);
    }

    #[test]
    fn list_includes_labels_and_descriptions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cameras.json");
        let mut set = ConfigSet::default();
        set.push(
            "bridge",
            Configuration {
                description: "main lookout".to_string(),
                ..Configuration::default()
            },
        );
        set.save_path(&path).unwrap();

        let listing = cmd_list(&path).unwrap();
        assert!(listing.contains("bridge"));
        assert!(listing.contains("main lookout"));
    }

    #[test]
    fn normalize_round_trips_a_sparse_file() {
        let dir = tempfile::tempdir().unwrap();
        let sparse = dir.path().join("sparse.json");
        let canonical = dir.path().join("canonical.json");
        std::fs::write(
            &sparse,
            r#"{"configurations": [{"label": "partial", "height": 42.0}]}"#,
        )
        .unwrap();

        cmd_normalize(&sparse, &canonical).unwrap();
        let set = ConfigSet::load_path(&canonical).unwrap();
        assert_eq!(set.records[0].config.height, 42.0);
        assert_eq!(set.records[0].config.fx, Configuration::default().fx);
    }

    #[test]
    fn optics_output_lists_each_zoom() {
        let dir = tempfile::tempdir().unwrap();
        let path = planner_file(&dir);
        let text = cmd_optics(&path, "bow").unwrap();
        assert!(text.contains("zoom 1.00"));
        assert!(text.contains("zoom 2.00"));
    }

    #[test]
    fn conversion_helpers_agree_with_the_core() {
        let cfg = Configuration::default();
        let fov = field_of_view_deg(&cfg, Axis::X, 1.0);
        let focal = focal_from_fov_deg(cfg.ix, fov);
        assert!((focal - cfg.fx).abs() < 1e-9);
    }
}
