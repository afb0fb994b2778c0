//! Event-queue driven re-rendering.
//!
//! Input changes and layer-load completions are sent as [`InputEvent`]s. [`RenderSession::pump`]
//! applies everything queued so far and renders the latest state at most once, so bursts of
//! events collapse into a single pass.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread::JoinHandle,
};

use crate::{
    assets::image::{Layer, PreparedImage, load_image_file},
    foundation::error::{GameNightError, GameNightResult},
    render::backend::RenderBackend,
    scene::{
        renderer::{Export, SceneRenderer},
        state::RenderState,
    },
};

/// A change to the render inputs.
#[derive(Clone, Debug)]
pub enum InputEvent {
    /// New `YYYY-MM-DD` value.
    Date(String),
    /// New `HH:MM` value.
    Time(String),
    /// New text fill color.
    FillColor(String),
    /// New text outline color.
    OutlineColor(String),
    /// New template name.
    Template(String),
    /// A layer finished loading.
    LayerLoaded {
        /// Which slot to fill.
        layer: Layer,
        /// Decoded pixels.
        image: Arc<PreparedImage>,
    },
    /// A layer load gave up; the slot keeps its previous content.
    LayerFailed {
        /// Which slot was being loaded.
        layer: Layer,
        /// Human-readable cause.
        reason: String,
    },
}

impl InputEvent {
    fn is_load_completion(&self) -> bool {
        matches!(self, Self::LayerLoaded { .. } | Self::LayerFailed { .. })
    }
}

/// Cloneable handle for feeding events into a session from any thread.
#[derive(Clone, Debug)]
pub struct EventSender(Sender<InputEvent>);

impl EventSender {
    /// Enqueue an event; returns `false` once the session is gone.
    pub fn send(&self, event: InputEvent) -> bool {
        self.0.send(event).is_ok()
    }
}

/// Counters for how much work the session did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Events applied to the state.
    pub events_applied: u64,
    /// Full renders performed.
    pub renders: u64,
    /// Layer loads that failed.
    pub failed_loads: u64,
}

/// Owns the render state, the backend, and the event queue.
pub struct RenderSession {
    state: RenderState,
    renderer: SceneRenderer,
    backend: Box<dyn RenderBackend>,
    tx: Sender<InputEvent>,
    rx: Receiver<InputEvent>,
    pending_loads: usize,
    last: Option<Export>,
    stats: SessionStats,
}

impl RenderSession {
    /// New session; nothing is rendered until the first pump.
    pub fn new(state: RenderState, backend: Box<dyn RenderBackend>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state,
            renderer: SceneRenderer::new(),
            backend,
            tx,
            rx,
            pending_loads: 0,
            last: None,
            stats: SessionStats::default(),
        }
    }

    /// Handle for producers.
    pub fn sender(&self) -> EventSender {
        EventSender(self.tx.clone())
    }

    /// Current inputs.
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Work counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Most recent export, if any render has happened.
    pub fn last_export(&self) -> Option<&Export> {
        self.last.as_ref()
    }

    /// Layer loads started via [`RenderSession::load_layer`] that have not reported back.
    pub fn pending_loads(&self) -> usize {
        self.pending_loads
    }

    /// Start decoding `path` on a worker thread; completion arrives as an event.
    pub fn load_layer(&mut self, layer: Layer, path: PathBuf) -> JoinHandle<()> {
        self.pending_loads += 1;
        spawn_layer_load(self.sender(), layer, path)
    }

    /// Run `loader` on a worker thread and feed its result into `layer`.
    ///
    /// A loader that panics reports as [`InputEvent::LayerFailed`].
    pub fn load_layer_with<F>(&mut self, layer: Layer, loader: F) -> JoinHandle<()>
    where
        F: FnOnce() -> GameNightResult<PreparedImage> + Send + 'static,
    {
        self.pending_loads += 1;
        spawn_loader(self.sender(), layer, loader)
    }

    /// Apply queued events without blocking, then render once if anything arrived.
    pub fn pump(&mut self) -> GameNightResult<Option<&Export>> {
        let mut applied = 0usize;
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
            applied += 1;
        }

        if applied == 0 {
            return Ok(None);
        }
        tracing::debug!(applied, "collapsed queued events into one render");
        self.render_now().map(Some)
    }

    /// Block until every started layer load has reported, then render once.
    pub fn pump_until_loaded(&mut self) -> GameNightResult<&Export> {
        while self.pending_loads > 0 {
            let event = self
                .rx
                .recv()
                .map_err(|_| GameNightError::render("event queue disconnected"))?;
            self.apply(event);
        }
        // Pick up anything else queued alongside the loads.
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
        }
        self.render_now()
    }

    /// Render the current state immediately.
    pub fn render_now(&mut self) -> GameNightResult<&Export> {
        let export = self.renderer.render(&self.state, self.backend.as_mut())?;
        self.stats.renders += 1;
        Ok(self.last.insert(export))
    }

    fn apply(&mut self, event: InputEvent) {
        if event.is_load_completion() {
            self.pending_loads = self.pending_loads.saturating_sub(1);
        }
        self.stats.events_applied += 1;

        match event {
            InputEvent::Date(v) => self.state.set_date(v),
            InputEvent::Time(v) => self.state.set_time(v),
            InputEvent::FillColor(v) => self.state.set_fill_color(v),
            InputEvent::OutlineColor(v) => self.state.set_outline_color(v),
            InputEvent::Template(v) => self.state.set_template(v),
            InputEvent::LayerLoaded { layer, image } => {
                tracing::debug!(?layer, width = image.width, height = image.height, "layer loaded");
                self.state.set_layer(layer, image);
            }
            InputEvent::LayerFailed { layer, reason } => {
                tracing::warn!(?layer, %reason, "layer failed to load; keeping previous content");
                self.stats.failed_loads += 1;
            }
        }
    }
}

/// Decode `path` on a new thread and report the result through `tx`.
pub fn spawn_layer_load(tx: EventSender, layer: Layer, path: PathBuf) -> JoinHandle<()> {
    spawn_loader(tx, layer, move || load_image_file(&path))
}

fn spawn_loader<F>(tx: EventSender, layer: Layer, loader: F) -> JoinHandle<()>
where
    F: FnOnce() -> GameNightResult<PreparedImage> + Send + 'static,
{
    std::thread::spawn(move || {
        let event = match panic::catch_unwind(AssertUnwindSafe(loader)) {
            Ok(Ok(image)) => InputEvent::LayerLoaded {
                layer,
                image: Arc::new(image),
            },
            Ok(Err(e)) => InputEvent::LayerFailed {
                layer,
                reason: e.to_string(),
            },
            Err(payload) => InputEvent::LayerFailed {
                layer,
                reason: panic_message(payload.as_ref()),
            },
        };
        if !tx.send(event) {
            tracing::debug!(?layer, "session closed before layer load finished");
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause");
    format!("layer loader panicked: {detail}")
}

#[cfg(test)]
#[path = "../tests/unit/session/session.rs"]
mod tests;
