//! Color parsing, image decoding and font discovery.

pub mod color;
pub mod font;
pub mod image;
