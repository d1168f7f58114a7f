//! Location heat map: min-max normalized visit frequency mapped onto a
//! fixed color ramp.

pub mod palette;
pub mod report;

pub use palette::{VIRIDIS, color_for, rgb_for};
pub use report::{FrequencyRange, HeatMap, LocationHeat};
