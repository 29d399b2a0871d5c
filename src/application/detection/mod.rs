//! Cross-source opportunity detection.

mod detector;

pub use detector::{group_by_product, Detector, Thresholds};
