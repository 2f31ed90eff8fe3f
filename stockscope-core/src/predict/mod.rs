//! Predictor — horizon forecasts, entry-point classification, and
//! target-price/stop-loss derivation.
//!
//! The forecasts depend only on the price series; the entry classifier and
//! target calculator also consume the combined overall score, so they run
//! after the combiner.

pub mod entry;
pub mod long_term;
pub mod short_term;
pub mod target;

pub use entry::{entry_point, EntryLabel, EntrySignal};
pub use long_term::{predict_long_term, LongTermPrediction, Outlook};
pub use short_term::{predict_medium_term, predict_short_term, Direction, Prediction};
pub use target::{target_price, TargetPrice, TargetPriceError};
