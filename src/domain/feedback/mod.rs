//! Feedback records over generated reports.

mod log;

pub use log::{FeedbackLog, Rating};
