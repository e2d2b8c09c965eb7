//! Prediction stages: model inference first, frequency fallback second.
//!
//! Each stage is a pure function from read-only state to a ranked word list;
//! the engine owns the degeneracy check that decides whether the model
//! stage's output is trusted.

pub mod fallback_stage;
pub mod model_stage;

pub use fallback_stage::FallbackStage;
pub use model_stage::ModelStage;
