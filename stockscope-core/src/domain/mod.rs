//! Domain types shared across the engine.

pub mod bar;
pub mod metrics;
pub mod outcome;

pub use bar::Bar;
pub use metrics::{Metric, Metrics};
pub use outcome::{Assessment, ScoreComponent, ScoreOutcome, Shortfall, NEUTRAL_SCORE};
