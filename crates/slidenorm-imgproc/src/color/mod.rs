mod lab;

pub use lab::{lab8_from_rgb8, lab_from_rgb, rgb8_from_lab8, rgb_from_lab};
