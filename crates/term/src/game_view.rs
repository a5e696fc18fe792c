//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Card, CardKind, PairId, Phase};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Rows above the grid (HUD + blank line).
const HUD_ROWS: u16 = 2;
const GAP: u16 = 1;

/// Board state that is not part of the engine snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardState<'a> {
    /// Card under the keyboard cursor (index into `snap.cards`).
    pub cursor: usize,
    pub columns: usize,
    /// Pairs with a regeneration in flight.
    pub regenerating: &'a [PairId],
}

pub struct GameView {
    card_w: u16,
    card_h: u16,
    min_card_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            card_w: 16,
            card_h: 5,
            min_card_w: 7,
        }
    }
}

pub(crate) const BORDER: CellStyle = CellStyle::fg(Rgb::new(110, 110, 120));
pub(crate) const TEXT: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220));
pub(crate) const HIGHLIGHT: CellStyle = CellStyle::fg(Rgb::new(250, 210, 80)).bold();
pub(crate) const MATCHED: CellStyle = CellStyle::fg(Rgb::new(100, 210, 120));
pub(crate) const MUTED: CellStyle = CellStyle::fg(Rgb::new(150, 150, 160)).dim();

impl GameView {
    pub fn new(card_w: u16, card_h: u16) -> Self {
        Self {
            card_w,
            card_h: card_h.max(3),
            min_card_w: card_w.min(7),
        }
    }

    /// Width of one card for `columns` columns inside `width`.
    pub fn card_width(&self, columns: usize, width: u16) -> u16 {
        let columns = columns.max(1) as u16;
        let fit = width.saturating_sub(GAP * (columns - 1)) / columns;
        fit.clamp(self.min_card_w, self.card_w)
    }

    /// Top-left corner of card `index`.
    pub fn card_origin(&self, index: usize, state: &BoardState, viewport: Viewport) -> (u16, u16) {
        let columns = state.columns.max(1);
        let card_w = self.card_width(columns, viewport.width);
        let grid_w = columns as u16 * (card_w + GAP) - GAP;
        let start_x = viewport.width.saturating_sub(grid_w) / 2;
        let (row, col) = ((index / columns) as u16, (index % columns) as u16);
        (
            start_x + col * (card_w + GAP),
            HUD_ROWS + row * (self.card_h + GAP),
        )
    }

    /// Render the board into an existing framebuffer region (no clear).
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        state: &BoardState,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        self.draw_hud(fb, snap, viewport);

        let card_w = self.card_width(state.columns, viewport.width);
        for (i, card) in snap.cards.iter().enumerate() {
            let (x, y) = self.card_origin(i, state, viewport);
            let busy = state.regenerating.contains(&card.pair_id) && card.kind == CardKind::Image;
            self.draw_card(fb, card, x, y, card_w, i == state.cursor, busy);
        }

        if snap.completed {
            self.draw_completed(fb, snap, viewport);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, state: &BoardState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, state, viewport, &mut fb);
        fb
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let hud = format!(
            "Moves: {} | Matched Pairs: {}/{}",
            snap.moves, snap.matched_pairs, snap.total_pairs
        );
        fb.put_str_centered(0, 0, viewport.width, &hud, TEXT.bold());

        if snap.phase == Phase::Setup {
            fb.put_str_centered(
                0,
                1,
                viewport.width,
                "Memorize the cards. Enter: start  r: new image",
                HIGHLIGHT,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_card(
        &self,
        fb: &mut FrameBuffer,
        card: &Card,
        x: u16,
        y: u16,
        w: u16,
        selected: bool,
        busy: bool,
    ) {
        let h = self.card_h;
        let border = if selected {
            HIGHLIGHT
        } else if card.is_matched {
            MATCHED
        } else if card.is_flipped {
            TEXT
        } else {
            BORDER
        };
        fb.draw_box(x, y, w, h, border);

        let inner_w = w.saturating_sub(2);
        let mid = y + h / 2;

        if !card.is_flipped {
            let back = CellStyle::fg(Rgb::new(70, 90, 150)).dim();
            fb.fill_rect(x + 1, y + 1, inner_w, h - 2, '░', back);
            return;
        }

        let face = if card.is_matched { MATCHED } else { TEXT };
        match card.kind {
            CardKind::Word => {
                fb.put_str_centered(x + 1, mid, inner_w, &card.value, face.bold());
            }
            CardKind::Image => {
                let label = if busy { "fetching…" } else { image_label(&card.value) };
                fb.put_str_centered(x + 1, mid - 1, inner_w, "[image]", face);
                fb.put_str_centered(x + 1, mid, inner_w, label, MUTED);
            }
        }
        if card.is_matched && w > 3 {
            fb.put_char(x + w - 2, y + 1, '✓', MATCHED.bold());
        }
    }

    fn draw_completed(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let lines = [
            "Congratulations!".to_string(),
            format!(
                "All {} pairs matched in {} moves",
                snap.total_pairs, snap.moves
            ),
            "n: play again  Esc: back".to_string(),
        ];
        let w = lines
            .iter()
            .map(|l| l.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 4;
        let h = lines.len() as u16 + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;

        let panel = TEXT.on(Rgb::new(20, 40, 30));
        fb.fill_rect(x, y, w, h, ' ', panel);
        fb.draw_box(x, y, w, h, MATCHED.bold().on(Rgb::new(20, 40, 30)));
        for (i, line) in lines.iter().enumerate() {
            let style = if i == 0 { panel.bold() } else { panel };
            fb.put_str_centered(x + 1, y + 1 + i as u16, w - 2, line, style);
        }
    }
}

/// Short label for an image URL: its last path segment without the query.
pub fn image_label(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.trim_end_matches('/').rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_label() {
        assert_eq!(
            image_label("https://cdn.pixabay.com/photo/2017/cat-1.jpg?t=99"),
            "cat-1.jpg"
        );
        assert_eq!(image_label("https://x/a/b/"), "b");
        assert_eq!(image_label(""), "");
    }

    #[test]
    fn test_card_width_shrinks_to_fit() {
        let view = GameView::default();
        assert_eq!(view.card_width(4, 200), 16);
        // 4 columns in 40 columns: (40 - 3) / 4 = 9.
        assert_eq!(view.card_width(4, 40), 9);
        assert_eq!(view.card_width(5, 10), 7);
    }

    #[test]
    fn test_card_origin_centers_grid() {
        let view = GameView::default();
        let state = BoardState {
            cursor: 0,
            columns: 4,
            regenerating: &[],
        };
        // Grid width 4 * 17 - 1 = 67, centered in 80.
        assert_eq!(view.card_origin(0, &state, Viewport::new(80, 30)), (6, 2));
        assert_eq!(view.card_origin(5, &state, Viewport::new(80, 30)), (23, 8));
    }
}
