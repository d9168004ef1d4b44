//! Animation state machine and multi-instance choreography
//!
//! A fixed directed graph of named states drives timed cross-fades between
//! shape-key weight sets. The host applies the returned weight maps to its
//! morph-target sliders once per frame tick.

mod coordinator;
mod machine;
mod states;

pub use coordinator::Choreographer;
pub use machine::{StateMachine, WeightMap};
pub use states::{AnimationState, BlendCurve, IdleMotion, Transition, transition};
