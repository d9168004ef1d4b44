//! `tendril generate` - body mesh plus sucker cups to OBJ

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use tendril_core::{TentacleGenerator, place_suckers};

use crate::{cups, obj, spec_file};

#[derive(Args)]
pub struct GenerateArgs {
    /// JSON spec file; flags below override its fields
    #[arg(long)]
    pub spec: Option<PathBuf>,

    /// Override the instance name
    #[arg(long)]
    pub name: Option<String>,

    /// Override the random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output directory for OBJ files
    #[arg(long, default_value = "out")]
    pub output: PathBuf,

    /// Skip sucker cup generation even if the spec enables it
    #[arg(long)]
    pub no_suckers: bool,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let mut spec = spec_file::load(args.spec.as_deref())?;
    if let Some(name) = args.name {
        spec.tentacle.name = name;
    }
    if let Some(seed) = args.seed {
        spec.tentacle.seed = seed;
        spec.suckers.seed = seed;
    }

    let generator = TentacleGenerator::new(spec.tentacle.clone())?;
    let mesh = generator.generate();

    std::fs::create_dir_all(&args.output)?;
    let body_path = args.output.join(format!("{}.obj", spec.tentacle.name));
    obj::write_obj(&mesh, &body_path, &spec.tentacle.name)?;
    info!(
        path = %body_path.display(),
        vertices = mesh.vertex_count(),
        quads = mesh.quad_count(),
        "wrote body mesh"
    );
    println!(
        "{} -> {} vertices, {} quads",
        body_path.display(),
        mesh.vertex_count(),
        mesh.quad_count()
    );

    if spec.suckers.enabled && !args.no_suckers {
        let instances = place_suckers(&spec.suckers, spec.tentacle.length, |t| {
            generator.radius_at(t)
        })?;
        let cup_mesh = cups::realize_suckers(&instances, &spec.suckers);
        let cups_path = args
            .output
            .join(format!("{}_suckers.obj", spec.tentacle.name));
        obj::write_obj(&cup_mesh, &cups_path, "suckers")?;
        println!(
            "{} -> {} suckers, {} vertices",
            cups_path.display(),
            instances.len(),
            cup_mesh.vertex_count()
        );
    }

    Ok(())
}
