//! `tendril lod` - print the LOD chain table for a spec

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use tendril_core::{LodLevel, TentacleGenerator, generate_lods};

use crate::spec_file;

#[derive(Args)]
pub struct LodArgs {
    /// JSON spec file
    #[arg(long)]
    pub spec: Option<PathBuf>,

    /// Decimation ratios for levels past LOD0 (LOD0 is always 1.0)
    #[arg(long, value_delimiter = ',')]
    pub ratios: Option<Vec<f32>>,
}

pub fn run(args: LodArgs) -> Result<()> {
    let spec = spec_file::load(args.spec.as_deref())?;
    let mesh = TentacleGenerator::new(spec.tentacle)?.generate();

    let levels = match args.ratios {
        Some(ratios) => {
            let mut levels = vec![LodLevel {
                name: "LOD0".into(),
                ratio: 1.0,
                screen_size: 1.0,
            }];
            for (i, ratio) in ratios.into_iter().enumerate() {
                levels.push(LodLevel {
                    name: format!("LOD{}", i + 1),
                    ratio,
                    screen_size: ratio,
                });
            }
            levels
        }
        None => LodLevel::default_chain(),
    };

    println!("{:<6} {:>6} {:>10} {:>10}", "level", "ratio", "vertices", "triangles");
    for (level, result) in levels.iter().zip(generate_lods(&mesh, &levels)?) {
        println!(
            "{:<6} {:>6.2} {:>10} {:>10}",
            result.name, level.ratio, result.vertex_count, result.triangle_count
        );
    }
    Ok(())
}
