//! Render state and the scene planner.

pub mod renderer;
pub mod state;
