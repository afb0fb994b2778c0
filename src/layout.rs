//! Fixed card regions on the 1280×720 canvas and the anchor constants inside them.

use crate::foundation::{
    core::{Point, Rect},
    error::{GameNightError, GameNightResult},
};

/// Axis-aligned card bounds in canvas units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (> 0).
    pub width: f64,
    /// Height (> 0).
    pub height: f64,
}

impl CardRect {
    /// Create validated bounds: every field finite and `>= 0`, extents `> 0`.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> GameNightResult<Self> {
        let fields = [x, y, width, height];
        if fields.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(GameNightError::validation(
                "card rect fields must be finite and >= 0",
            ));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(GameNightError::validation("card rect extents must be > 0"));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Convert to a `kurbo` rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

/// Names of the three cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardId {
    /// GMT date/time and the timezone roster.
    Date,
    /// Server name and template.
    Server,
    /// Discord badge and invite.
    Discord,
}

impl CardId {
    /// All cards in draw order.
    pub const ALL: [CardId; 3] = [CardId::Date, CardId::Server, CardId::Discord];
}

/// Fixed mapping from [`CardId`] to its bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardLayout {
    date: CardRect,
    server: CardRect,
    discord: CardRect,
}

impl Default for CardLayout {
    fn default() -> Self {
        const fn card(x: f64) -> CardRect {
            CardRect {
                x,
                y: CARD_TOP,
                width: CARD_WIDTH,
                height: CARD_HEIGHT,
            }
        }

        Self {
            date: card(224.0),
            server: card(504.0),
            discord: card(784.0),
        }
    }
}

impl CardLayout {
    /// Bounds of one card.
    pub fn card(&self, id: CardId) -> CardRect {
        match id {
            CardId::Date => self.date,
            CardId::Server => self.server,
            CardId::Discord => self.discord,
        }
    }
}

const CARD_TOP: f64 = 424.0 + 36.0;
const CARD_WIDTH: f64 = 272.0;
const CARD_HEIGHT: f64 = 216.0 - 36.0;

/// Inset from a card edge to its text.
pub const CARD_PADDING: f64 = 8.0;

/// Width every full-frame layer is scaled to.
pub const FULL_FRAME_WIDTH: f64 = 1280.0;

/// Date card sizes.
pub mod date {
    /// Weekday and month/day lines.
    pub const DATE_SIZE: f32 = 36.0;
    /// GMT time line.
    pub const TIME_SIZE: f32 = 32.0;
    /// Each roster line.
    pub const ZONE_SIZE: f32 = 17.5;
    /// Distance from the card bottom to the GMT time line's bottom edge.
    pub const TIME_BOTTOM_INSET: f64 = super::CARD_PADDING + TIME_SIZE as f64 + 16.0 + 6.0;
}

/// Server card sizes.
pub mod server {
    /// Size of all three lines.
    pub const TEXT_SIZE: f32 = 28.0;
    /// Number of stacked lines, used for vertical centering.
    pub const LINE_COUNT: usize = 3;
}

/// Discord card sizes and the absolute badge placement.
pub mod discord {
    use crate::foundation::core::Point;

    /// Title lines.
    pub const TEXT_SIZE: f32 = 28.0;
    /// Step between the two title lines.
    pub const LINE_STEP: f64 = 36.0;
    /// Invite URL line.
    pub const INVITE_SIZE: f32 = 17.5;
    /// Badge top-left, in canvas space (independent of the card rect).
    pub const BADGE_ORIGIN: Point = Point::new(884.5, 536.694);
    /// Badge draw width.
    pub const BADGE_WIDTH: f64 = 72.0;
}

/// Vertical offset that centers `lines` rows of `size` inside `card`.
pub fn centered_block_offset(card: &CardRect, size: f32, lines: usize) -> f64 {
    card.height / 2.0 - (f64::from(size) * lines as f64) / 2.0
}

/// Anchor for the `index`-th roster line, counted upward from the card bottom.
pub fn roster_anchor(card: &CardRect, index: usize) -> Point {
    Point::new(
        card.right() - CARD_PADDING,
        card.bottom() - (CARD_PADDING + index as f64 * f64::from(date::ZONE_SIZE)),
    )
}

#[cfg(test)]
#[path = "../tests/unit/layout/cards.rs"]
mod tests;
