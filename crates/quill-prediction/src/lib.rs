//! # quill-prediction
//!
//! The hybrid prediction engine: a model-inference stage over an n-gram
//! scoring backend, a frequency/bigram fallback stage over the bounded user
//! history, and the `LivePredictor` handle that owns the atomic engine
//! hot-swap and serializes observations.
//!
//! Prediction is synchronous, side-effect free, and never errors through to
//! the interactive path; observation and prediction are deliberately
//! decoupled.

pub mod engine;
pub mod history;
pub mod live;
pub mod ngram;
pub mod stages;
pub mod text;

pub use engine::PredictionEngine;
pub use history::{HistorySnapshot, UserHistoryStore};
pub use live::LivePredictor;
pub use ngram::NgramBackend;
