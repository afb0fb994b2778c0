//! Game night card generator.
//!
//! Turns an event date/time, a color scheme, a backdrop photo and a template into one 1280×720
//! promotional image:
//!
//! - Build a [`RenderState`]
//! - Plan it with [`SceneRenderer`] into ordered draw ops
//! - Rasterize the plan with a [`RenderBackend`] and export a PNG
//!
//! [`RenderSession`] wraps the same pipeline in an event queue for hosts that load layers
//! asynchronously.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assets;
pub mod config;
mod foundation;
pub mod layout;
pub mod render;
pub mod scene;
pub mod session;
pub mod time;

pub use crate::assets::color::{ColorPair, HexColor};
pub use crate::assets::font::{FontFace, find_system_bold_sans, load_font_file};
pub use crate::assets::image::{Layer, PreparedImage, decode_image, load_image_file};
pub use crate::config::GameNightConfig;
pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
pub use crate::foundation::error::{GameNightError, GameNightResult};
pub use crate::layout::{CardId, CardLayout, CardRect};
pub use crate::render::backend::{
    BackendKind, FontSource, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};
pub use crate::render::ops::{Align, Baseline, DrawOp, ScenePlan};
pub use crate::scene::renderer::{Export, SceneRenderer, export_filename};
pub use crate::scene::state::RenderState;
pub use crate::session::{EventSender, InputEvent, RenderSession, SessionStats};
pub use crate::time::format::{PrimaryLines, Roster};
pub use crate::time::moment::EventMoment;
