//! Event moment parsing and multi-timezone display strings.

pub mod format;
pub mod locale;
pub mod moment;
