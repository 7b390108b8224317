//! h5utils CLI - project paths and HDF5 helpers.
//!
//! Usage:
//!   h5utils root                  # Resolved project root
//!   h5utils datadir <name>        # <root>/data/<name> (created)
//!   h5utils plotsdir <name>       # <root>/plots/<name> (created)
//!   h5utils inspect <file>        # Structure of an HDF5 file
//!   h5utils inspect <file> --json # Same, as JSON
//!   h5utils demo                  # Write and read back a test image

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use h5utils::container::{inspect_group, StructureReport, DEFAULT_INDENT};
use h5utils::{demo, Config, ProjectLayout};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "h5utils")]
#[command(about = "h5utils - labelled HDF5 datasets and project paths", long_about = None)]
struct Cli {
    /// Config file (default: ./h5utils.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log resolution steps and writes to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the project root and how it was found
    Root,

    /// Print (and create) the data directory for a name
    Datadir {
        name: String,

        /// Do not create the directory
        #[arg(long)]
        no_create: bool,
    },

    /// Print (and create) the plots directory for a name
    Plotsdir {
        name: String,

        /// Do not create the directory
        #[arg(long)]
        no_create: bool,
    },

    /// Show groups, datasets and attributes of an HDF5 file
    Inspect {
        file: PathBuf,

        /// Emit the tree as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Indentation of top-level entries
        #[arg(long, default_value_t = DEFAULT_INDENT)]
        indent: usize,
    },

    /// Write a test image to data/<name>/astronaut.h5 and read it back
    Demo {
        #[arg(long, default_value = "example_directory")]
        name: String,

        #[arg(long, default_value = "256")]
        height: usize,

        #[arg(long, default_value = "256")]
        width: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "h5utils=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Root => {
            let root = load_layout(cli.config.as_deref())?.root()?;
            println!("{}", root.path.display());
            eprintln!("(found via {})", root.source);
        }

        Commands::Datadir { name, no_create } => {
            let layout = load_layout(cli.config.as_deref())?;
            println!("{}", layout.data_dir(&name, !no_create)?.display());
        }

        Commands::Plotsdir { name, no_create } => {
            let layout = load_layout(cli.config.as_deref())?;
            println!("{}", layout.plots_dir(&name, !no_create)?.display());
        }

        Commands::Inspect { file, json, indent } => inspect_cli_mode(&file, json, indent)?,

        Commands::Demo { name, height, width } => {
            let layout = load_layout(cli.config.as_deref())?;
            demo_cli_mode(&layout, &name, height, width)?;
        }
    }

    Ok(())
}

fn load_layout(config_path: Option<&Path>) -> Result<ProjectLayout> {
    let cwd = std::env::current_dir()?;
    let config = Config::load_or_default(config_path, &cwd)?;
    Ok(ProjectLayout::new(config, cwd))
}

// CLI mode for inspect
fn inspect_cli_mode(path: &Path, json: bool, indent: usize) -> Result<()> {
    let file = hdf5::File::open(path)
        .with_context(|| format!("could not open {}", path.display()))?;
    let nodes = inspect_group(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
    } else {
        print!("{}", StructureReport::new(&nodes, indent));
    }
    Ok(())
}

// CLI mode for demo
fn demo_cli_mode(layout: &ProjectLayout, name: &str, height: usize, width: usize) -> Result<()> {
    let summary = demo::run(layout, name, height, width)?;

    print!("{}", summary.structure);
    println!();
    println!("File:    {}", summary.file.display());
    println!("Label:   {}", summary.label);
    println!("Shape:   {:?}", summary.shape);
    for (channel, mean) in ["R", "G", "B"].iter().zip(&summary.channel_means) {
        println!("Mean {}:  {:.4}", channel, mean);
    }
    Ok(())
}
