//! Draw ops, the text/image op builders, and raster backends.

pub mod backend;
pub mod compositor;
pub mod cpu;
pub mod ops;
pub mod text;
