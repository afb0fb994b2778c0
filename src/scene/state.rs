//! Inputs and loaded layers for one render.

use std::sync::Arc;

use crate::{
    assets::{
        color::{ColorPair, HexColor},
        image::{Layer, PreparedImage},
    },
    time::{format::Roster, moment::EventMoment},
};

/// Everything a render depends on.
///
/// Layer slots are `None` until their image finishes loading. Swapping a layer replaces one
/// `Arc`, so a pass that already holds the old image is unaffected.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    date: String,
    time: String,
    moment: EventMoment,
    colors: ColorPair,
    template: String,
    roster: Roster,
    backdrop: Option<Arc<PreparedImage>>,
    template_image: Option<Arc<PreparedImage>>,
    badge: Option<Arc<PreparedImage>>,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            moment: EventMoment::Invalid,
            colors: ColorPair::default(),
            template: String::new(),
            roster: Roster::default(),
            backdrop: None,
            template_image: None,
            badge: None,
        }
    }
}

impl RenderState {
    /// State with the given inputs and no layers loaded.
    pub fn new(
        template: impl Into<String>,
        colors: ColorPair,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        let mut state = Self {
            template: template.into(),
            colors,
            ..Self::default()
        };
        state.date = date.into();
        state.time = time.into();
        state.reparse_moment();
        state
    }

    /// Replace the roster.
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    /// Set the `YYYY-MM-DD` field.
    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
        self.reparse_moment();
    }

    /// Set the `HH:MM` field.
    pub fn set_time(&mut self, time: impl Into<String>) {
        self.time = time.into();
        self.reparse_moment();
    }

    /// Set the text fill color.
    pub fn set_fill_color(&mut self, color: impl Into<String>) {
        self.colors.fill = HexColor::new(color);
    }

    /// Set the text outline color.
    pub fn set_outline_color(&mut self, color: impl Into<String>) {
        self.colors.outline = HexColor::new(color);
    }

    /// Select a template by name.
    ///
    /// The previous template image stays in place until the new one arrives.
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    /// Install a freshly loaded layer.
    pub fn set_layer(&mut self, layer: Layer, image: Arc<PreparedImage>) {
        *self.slot_mut(layer) = Some(image);
    }

    /// Drop a layer back to "not loaded".
    pub fn clear_layer(&mut self, layer: Layer) {
        *self.slot_mut(layer) = None;
    }

    /// Raw date field.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Raw time field.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Parsed event moment.
    pub fn moment(&self) -> &EventMoment {
        &self.moment
    }

    /// Text colors.
    pub fn colors(&self) -> &ColorPair {
        &self.colors
    }

    /// Template name as entered.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Timezone roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// A layer, if loaded.
    pub fn layer(&self, layer: Layer) -> Option<&Arc<PreparedImage>> {
        match layer {
            Layer::Backdrop => self.backdrop.as_ref(),
            Layer::Template => self.template_image.as_ref(),
            Layer::Badge => self.badge.as_ref(),
        }
    }

    fn slot_mut(&mut self, layer: Layer) -> &mut Option<Arc<PreparedImage>> {
        match layer {
            Layer::Backdrop => &mut self.backdrop,
            Layer::Template => &mut self.template_image,
            Layer::Badge => &mut self.badge,
        }
    }

    fn reparse_moment(&mut self) {
        self.moment = EventMoment::parse(&self.date, &self.time);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;
