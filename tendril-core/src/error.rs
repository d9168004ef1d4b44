//! Error types for spec validation and domain contracts

use thiserror::Error;

/// Invalid or inconsistent spec fields, reported before any generation work
///
/// Raised by component constructors (`TentacleGenerator::new`, sucker
/// placement, LOD generation) so a bad spec never produces a partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("length {0} outside 0.1..=3.0")]
    Length(f32),
    #[error("base radius {0} must be > 0")]
    BaseRadius(f32),
    #[error("tip radius {tip} must be > 0 and < base radius {base}")]
    RadiusOrder { base: f32, tip: f32 },
    #[error("segment count {0} outside 10..=50")]
    Segments(u32),
    #[error("circumferential resolution {0} outside 16..=128")]
    Resolution(u32),
    #[error("segment variation {0} outside 0.0..=0.2")]
    Variation(f32),
    #[error("subdivision level {0} outside 0..=2")]
    Subdivision(u32),
    #[error("spec would produce {0} vertices, exceeding the u16 index budget")]
    VertexBudget(usize),
    #[error("taper control points are empty")]
    EmptyControlPoints,
    #[error("taper control point ({position}, {factor}) outside position 0..=1, factor 0..=2")]
    ControlPoint { position: f32, factor: f32 },
    #[error("sucker rows {0} outside 2..=8")]
    SuckerRows(u32),
    #[error("sucker columns {0} outside 4..=12")]
    SuckerColumns(u32),
    #[error("sucker tip size {tip} must be > 0 and < base size {base}")]
    SuckerSizeOrder { base: f32, tip: f32 },
    #[error("sucker offsets [{start}, {end}] must satisfy 0 <= start < end <= 1")]
    SuckerOffsets { start: f32, end: f32 },
    #[error("LOD ratio {0} outside (0.0, 1.0]")]
    LodRatio(f32),
    #[error("LOD level list is empty")]
    EmptyLodChain,
}

/// A pure function was called with input outside its declared domain
///
/// This is a programming-contract violation rather than an expected runtime
/// condition: validated specs never produce it.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("value {value} outside domain [{min}, {max}]")]
pub struct DomainError {
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

impl DomainError {
    pub(crate) fn unit(value: f32) -> Self {
        Self {
            value,
            min: 0.0,
            max: 1.0,
        }
    }
}
