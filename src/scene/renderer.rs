//! Plans the three cards over the backdrop and template layers.

use crate::{
    assets::image::Layer,
    foundation::{core::Canvas, error::GameNightResult},
    layout::{
        self, CARD_PADDING, CardId, CardLayout, FULL_FRAME_WIDTH, centered_block_offset,
        roster_anchor,
    },
    render::{
        backend::{FrameRGBA, RenderBackend},
        compositor::draw_image,
        ops::{Align, Baseline, ScenePlan},
        text::TextRenderer,
    },
    scene::state::RenderState,
    time::format::{primary_lines, roster_lines},
};

/// Server card title.
pub const SERVER_TITLE: &str = "W3D Hub";
/// Server card subtitle.
pub const SERVER_SUBTITLE: &str = "Game Server";
/// Discord card second line.
pub const DISCORD_TITLE: &str = "Discord Server";
/// Invite link printed at the bottom of the Discord card.
pub const DISCORD_INVITE: &str = "https://discord.gg/jMmmRa2";

/// Rendered card ready to be saved.
#[derive(Clone, Debug)]
pub struct Export {
    /// Premultiplied frame as produced by the backend.
    pub frame: FrameRGBA,
    /// Lossless PNG encoding of `frame`.
    pub png: Vec<u8>,
    /// Suggested file name, `<template>_game_night.png`.
    pub filename: String,
}

/// Suggested export file name for a template.
pub fn export_filename(template: &str) -> String {
    format!("{}_game_night.png", template.to_lowercase())
}

/// Stateless planner turning a [`RenderState`] into ordered draw ops.
#[derive(Clone, Debug)]
pub struct SceneRenderer {
    layout: CardLayout,
    canvas: Canvas,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer {
    /// Renderer on the fixed card canvas.
    pub fn new() -> Self {
        Self {
            layout: CardLayout::default(),
            canvas: Canvas::CARD,
        }
    }

    /// Card geometry in use.
    pub fn layout(&self) -> &CardLayout {
        &self.layout
    }

    /// Build the full-frame plan.
    ///
    /// Order: backdrop, template, date card, server card, discord card. Unloaded layers and an
    /// invalid moment drop their draws; nothing else is affected.
    #[tracing::instrument(skip_all, fields(template = state.template()))]
    pub fn plan(&self, state: &RenderState) -> ScenePlan {
        let mut plan = ScenePlan::new(self.canvas);

        for layer in [Layer::Backdrop, Layer::Template] {
            plan.ops
                .extend(draw_image(layer, state.layer(layer), 0.0, 0.0, FULL_FRAME_WIDTH));
        }

        let text = TextRenderer::new(state.colors());
        self.plan_date_card(state, &text, &mut plan);
        self.plan_server_card(state, &text, &mut plan);
        self.plan_discord_card(state, &text, &mut plan);

        tracing::debug!(ops = plan.ops.len(), "scene planned");
        plan
    }

    /// Plan, rasterize and encode.
    pub fn render(
        &self,
        state: &RenderState,
        backend: &mut dyn RenderBackend,
    ) -> GameNightResult<Export> {
        let plan = self.plan(state);
        let frame = backend.render_plan(&plan)?;
        let png = frame.encode_png()?;
        let filename = export_filename(state.template());
        tracing::info!(%filename, bytes = png.len(), "card rendered");
        Ok(Export {
            frame,
            png,
            filename,
        })
    }

    fn plan_date_card(&self, state: &RenderState, text: &TextRenderer<'_>, plan: &mut ScenePlan) {
        use layout::date::{DATE_SIZE, TIME_BOTTOM_INSET, TIME_SIZE, ZONE_SIZE};

        let Some(lines) = primary_lines(state.moment()) else {
            tracing::debug!(
                date = state.date(),
                time = state.time(),
                "invalid event moment; date card suppressed"
            );
            return;
        };

        let card = self.layout.card(CardId::Date);
        let cx = card.center_x();
        let top = card.y + CARD_PADDING;

        plan.push(text.draw(lines.weekday, DATE_SIZE, cx, top));
        plan.push(text.draw(lines.month_day, DATE_SIZE, cx, top + f64::from(DATE_SIZE)));
        plan.push(text.draw_text(
            lines.time,
            TIME_SIZE,
            cx,
            card.bottom() - TIME_BOTTOM_INSET,
            Baseline::Bottom,
            Align::Center,
        ));

        for (i, line) in roster_lines(state.moment(), state.roster())
            .into_iter()
            .enumerate()
        {
            let at = roster_anchor(&card, i);
            plan.push(text.draw_text(line, ZONE_SIZE, at.x, at.y, Baseline::Bottom, Align::Right));
        }
    }

    fn plan_server_card(&self, state: &RenderState, text: &TextRenderer<'_>, plan: &mut ScenePlan) {
        use layout::server::{LINE_COUNT, TEXT_SIZE};

        let card = self.layout.card(CardId::Server);
        let cx = card.center_x();
        let top = card.y + CARD_PADDING + centered_block_offset(&card, TEXT_SIZE, LINE_COUNT);
        let step = f64::from(TEXT_SIZE);

        let lines = [
            SERVER_TITLE.to_uppercase(),
            state.template().to_uppercase(),
            SERVER_SUBTITLE.to_uppercase(),
        ];
        for (k, line) in lines.into_iter().enumerate() {
            plan.push(text.draw(line, TEXT_SIZE, cx, top + k as f64 * step));
        }
    }

    fn plan_discord_card(&self, state: &RenderState, text: &TextRenderer<'_>, plan: &mut ScenePlan) {
        use layout::discord::{BADGE_ORIGIN, BADGE_WIDTH, INVITE_SIZE, LINE_STEP, TEXT_SIZE};

        let card = self.layout.card(CardId::Discord);
        let cx = card.center_x();

        plan.ops.extend(draw_image(
            Layer::Badge,
            state.layer(Layer::Badge),
            BADGE_ORIGIN.x,
            BADGE_ORIGIN.y,
            BADGE_WIDTH,
        ));

        let top = card.y + CARD_PADDING;
        plan.push(text.draw(SERVER_TITLE.to_uppercase(), TEXT_SIZE, cx, top));
        plan.push(text.draw(DISCORD_TITLE.to_uppercase(), TEXT_SIZE, cx, top + LINE_STEP));
        plan.push(text.draw_text(
            DISCORD_INVITE,
            INVITE_SIZE,
            cx,
            card.bottom() - CARD_PADDING,
            Baseline::Bottom,
            Align::Center,
        ));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/renderer.rs"]
mod tests;
