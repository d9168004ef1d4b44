//! Procedural tentacle mesh toolkit
//!
//! Generates organic tapered tube meshes, places sucker decorations on them,
//! deforms them through a library of parametric shape keys, drives those
//! deformations with a timed animation state machine (including staggered
//! multi-instance choreography), and summarizes level-of-detail variants.
//!
//! Everything here is pure and synchronous: a generation call takes an
//! immutable spec and returns a freshly owned result. The only stateful
//! objects are the animation [`StateMachine`] and [`Choreographer`], which
//! must be updated serially per instance. Independent tentacle instances
//! share nothing and may be generated or animated in parallel.
//!
//! # Example
//! ```no_run
//! use tendril_core::prelude::*;
//!
//! // Generate a body mesh
//! let spec = TentacleSpec::default();
//! let generator = TentacleGenerator::new(spec)?;
//! let mesh = generator.generate();
//!
//! // Decorate it
//! let suckers = place_suckers(&SuckerSpec::default(), 1.0, |t| generator.radius_at(t))?;
//!
//! // Morph targets for the host
//! let axis = TentacleAxis::estimate(&mesh);
//! let shape_keys = generate_shape_keys(&mesh, &axis);
//!
//! // Animate a group of four
//! let mut choreo = Choreographer::new(4, 0.0, 0.35);
//! choreo.trigger_emergence();
//! let weight_maps = choreo.update(1.0 / 60.0);
//! # Ok::<(), tendril_core::ConfigError>(())
//! ```

pub mod animation;
pub mod body;
pub mod deform;
pub mod error;
pub mod lod;
pub mod mesh;
pub mod profile;
pub mod rig;
pub mod segments;
pub mod suckers;

pub use animation::{
    AnimationState, BlendCurve, Choreographer, IdleMotion, StateMachine, WeightMap,
};
pub use body::{TentacleGenerator, TentacleSpec};
pub use deform::{
    DeformationParams, ShapeKey, ShapeKeyPreset, ShapeKeyStats, TentacleAxis, compute_shape_key,
    generate_shape_keys,
};
pub use error::{ConfigError, DomainError};
pub use lod::{LodLevel, LodResult, generate_lods};
pub use mesh::MeshBuffer;
pub use profile::{TaperKind, TaperProfile};
pub use rig::{BoneChain, compute_bone_chain};
pub use segments::SegmentDistribution;
pub use suckers::{SuckerInstance, SuckerPattern, SuckerSpec, place_suckers};

/// Single-import convenience for downstream tools
pub mod prelude {
    pub use crate::animation::{AnimationState, Choreographer, StateMachine};
    pub use crate::body::{TentacleGenerator, TentacleSpec};
    pub use crate::deform::{
        DeformationParams, ShapeKey, ShapeKeyPreset, TentacleAxis, compute_shape_key,
        generate_shape_keys,
    };
    pub use crate::error::{ConfigError, DomainError};
    pub use crate::lod::{LodLevel, LodResult, generate_lods};
    pub use crate::mesh::MeshBuffer;
    pub use crate::profile::{TaperKind, TaperProfile};
    pub use crate::segments::SegmentDistribution;
    pub use crate::suckers::{SuckerInstance, SuckerPattern, SuckerSpec, place_suckers};
}
