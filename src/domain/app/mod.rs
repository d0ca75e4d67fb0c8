mod ticker;
mod tracker;

pub use ticker::Ticker;
pub use tracker::{Intent, Tracker};
