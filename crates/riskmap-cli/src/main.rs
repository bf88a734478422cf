//! riskmap CLI - build, lay out and inspect risk taxonomy treemaps.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::doc_markdown
)]

mod manifest;

use clap::{Parser, Subcommand};
use manifest::{CliError, Manifest};
use riskmap_core::Size;
use riskmap_taxonomy::{Catalog, HierarchyBuilder, NodePath, SelectionState};
use riskmap_treemap::{TreemapView, ViewEvent};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "riskmap")]
#[command(about = "Risk taxonomy treemap builder")]
#[command(version)]
struct Cli {
    /// Catalog YAML to use instead of the built-in vehicle incident taxonomy
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the weighted hierarchy as JSON
    Tree {
        /// Path to manifest file
        manifest: PathBuf,
    },

    /// Print the laid-out frame as JSON
    Layout {
        /// Path to manifest file
        manifest: PathBuf,

        /// Map width
        #[arg(long, default_value = "1200")]
        width: f64,

        /// Map height
        #[arg(long, default_value = "800")]
        height: f64,

        /// Zoom target, segments separated by '/' (e.g. "Surface/Passenger")
        #[arg(long)]
        zoom: Option<String>,
    },

    /// Print the catalog as YAML
    Catalog,

    /// Check a manifest against the catalog
    Check {
        /// Path to manifest file
        manifest: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Tree { manifest } => {
            let (manifest, selection) = load_manifest(&manifest, &catalog)?;
            let tree = HierarchyBuilder::new(&catalog).build_from(&manifest.title, &selection);
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        Commands::Layout {
            manifest,
            width,
            height,
            zoom,
        } => {
            let (manifest, selection) = load_manifest(&manifest, &catalog)?;
            let mut view = TreemapView::from_selection(
                manifest.config()?,
                &catalog,
                &selection,
                Size::new(width, height),
            );
            if let Some(zoom) = zoom {
                let path = parse_zoom(&zoom);
                if !view.handle(ViewEvent::NodeClicked(path)) {
                    return Err(CliError::BadZoom(zoom));
                }
            }
            println!("{}", serde_json::to_string_pretty(&view.frame())?);
        }
        Commands::Catalog => {
            print!("{}", catalog.to_yaml()?);
        }
        Commands::Check { manifest: path } => {
            println!("Checking manifest: {}", path.display());
            let (manifest, selection) = load_manifest(&path, &catalog)?;
            manifest.config()?;
            let tree = HierarchyBuilder::new(&catalog).build_from(&manifest.title, &selection);
            println!("Manifest valid!");
            println!("  Title: {}", manifest.title);
            println!("  Contexts: {}", selection.contexts().len());
            println!(
                "  Equipment pairs: {}",
                selection
                    .equipment()
                    .selected_pairs()
                    .iter()
                    .map(|(_, items)| items.len())
                    .sum::<usize>()
            );
            println!("  Scenarios: {}", selection.scenarios().len());
            if tree.value > 0.0 {
                println!("  Leaves: {}", tree.leaf_count());
            } else {
                println!("  Leaves: 0 (empty model)");
            }
        }
    }
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, CliError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading catalog");
            Ok(Catalog::from_yaml(&fs::read_to_string(path)?)?)
        }
        None => Ok(Catalog::vehicle_incident()),
    }
}

fn load_manifest(path: &Path, catalog: &Catalog) -> Result<(Manifest, SelectionState), CliError> {
    let manifest = Manifest::from_yaml(&fs::read_to_string(path)?)?;
    let selection = manifest.selection(catalog)?;
    debug!(
        contexts = selection.contexts().len(),
        scenarios = selection.scenarios().len(),
        "manifest loaded"
    );
    Ok((manifest, selection))
}

fn parse_zoom(zoom: &str) -> NodePath {
    NodePath::from_segments(
        zoom.split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zoom() {
        assert_eq!(
            parse_zoom("Surface / Passenger"),
            NodePath::from_segments(["Surface", "Passenger"])
        );
        assert!(parse_zoom("").is_root());
    }

    #[test]
    fn test_cli_parses_layout() {
        let cli = Cli::parse_from([
            "riskmap", "layout", "m.yaml", "--width", "640", "--zoom", "Surface",
        ]);
        match cli.command {
            Commands::Layout {
                width, zoom, height, ..
            } => {
                assert_eq!(width, 640.0);
                assert_eq!(height, 800.0);
                assert_eq!(zoom.as_deref(), Some("Surface"));
            }
            _ => panic!("expected layout"),
        }
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog, Catalog::vehicle_incident());
    }
}
