//! `tendril shape-keys` - one displaced OBJ per preset

use anyhow::Result;
use clap::Args;
use glam::Vec3;
use std::path::PathBuf;

use tendril_core::{MeshBuffer, TentacleAxis, TentacleGenerator, generate_shape_keys};

use crate::{obj, spec_file};

#[derive(Args)]
pub struct ShapeKeysArgs {
    /// JSON spec file
    #[arg(long)]
    pub spec: Option<PathBuf>,

    /// Output directory for OBJ files
    #[arg(long, default_value = "out/shape_keys")]
    pub output: PathBuf,
}

pub fn run(args: ShapeKeysArgs) -> Result<()> {
    let spec = spec_file::load(args.spec.as_deref())?;
    let generator = TentacleGenerator::new(spec.tentacle.clone())?;
    let mesh = generator.generate();
    let axis = TentacleAxis::estimate(&mesh);

    std::fs::create_dir_all(&args.output)?;
    for key in generate_shape_keys(&mesh, &axis) {
        let displaced = apply_offsets(&mesh, &key.offsets);
        let path = args.output.join(format!("{}.obj", key.name));
        obj::write_obj(&displaced, &path, &key.name)?;
        println!(
            "{:<14} max displacement {:.4}, volume {:+.1}%",
            key.name, key.stats.max_displacement, key.stats.volume_change_pct
        );
    }
    Ok(())
}

/// Bake a displacement field into a copy of the base mesh
fn apply_offsets(mesh: &MeshBuffer, offsets: &[[f32; 3]]) -> MeshBuffer {
    let mut displaced = mesh.clone();
    for (position, offset) in displaced.positions.iter_mut().zip(offsets) {
        let moved = Vec3::from(*position) + Vec3::from(*offset);
        *position = [moved.x, moved.y, moved.z];
    }
    displaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use tendril_core::TentacleSpec;

    #[test]
    fn test_apply_offsets_moves_vertices() {
        let mesh = TentacleGenerator::new(TentacleSpec::default())
            .unwrap()
            .generate();
        let offsets = vec![[0.0, 0.0, 0.1]; mesh.vertex_count()];
        let displaced = apply_offsets(&mesh, &offsets);
        assert_eq!(displaced.vertex_count(), mesh.vertex_count());
        assert!((displaced.positions[0][2] - mesh.positions[0][2] - 0.1).abs() < 1e-6);
    }
}
