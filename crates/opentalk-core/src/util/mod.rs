pub mod round;
pub mod window;

pub use round::{round_to_upper_30, suggested_start};
pub use window::{TimeWindow, compute_window};
