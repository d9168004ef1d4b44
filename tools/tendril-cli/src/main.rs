//! Tendril CLI - developer tool for the tentacle mesh toolkit
//!
//! # Commands
//!
//! - `tendril generate` - Build a body mesh (plus sucker cups) and write OBJ
//! - `tendril shape-keys` - Write one displaced OBJ per shape-key preset
//! - `tendril lod` - Print the LOD chain table for a spec
//! - `tendril animate` - Run a staggered choreography timeline and print it
//!
//! # Usage
//!
//! ```bash
//! # Generate the default tentacle into ./out
//! tendril generate
//!
//! # Generate from a JSON spec file, overriding its seed
//! tendril generate --spec hero.json --seed 7
//!
//! # Preview four tentacles emerging 0.35s apart
//! tendril animate --count 4 --stagger 0.35 --attack-at 3.0
//! ```
//!
//! # Spec file (JSON)
//!
//! ```json
//! {
//!   "tentacle": { "name": "hero", "length": 1.4, "taper": "organic" },
//!   "suckers": { "rows": 6, "columns": 8, "pattern": "alternating" }
//! }
//! ```

mod animate;
mod cups;
mod generate;
mod lod;
mod obj;
mod shape_keys;
mod spec_file;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Developer tool for the tentacle mesh toolkit
#[derive(Parser)]
#[command(name = "tendril")]
#[command(about = "Procedural tentacle mesh toolkit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a body mesh (plus sucker cups) and write OBJ files
    Generate(generate::GenerateArgs),

    /// Write one displaced OBJ per shape-key preset
    ShapeKeys(shape_keys::ShapeKeysArgs),

    /// Print the LOD chain table for a spec
    Lod(lod::LodArgs),

    /// Run a staggered choreography timeline and print it
    Animate(animate::AnimateArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate::run(args),
        Commands::ShapeKeys(args) => shape_keys::run(args),
        Commands::Lod(args) => lod::run(args),
        Commands::Animate(args) => animate::run(args),
    }
}
