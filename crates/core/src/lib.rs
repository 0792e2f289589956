#![forbid(unsafe_code)]

pub mod grading;
pub mod model;
pub mod time;

pub use grading::{ScoreBand, ScoreTone};
pub use time::Clock;
