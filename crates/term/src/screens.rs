//! Per-stage screens and the shared chrome (title, notices, key help).

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{image_label, BoardState, GameView, Viewport, HIGHLIGHT, MUTED, TEXT};
use crate::types::{GameSize, PairId, WordImagePair, GAME_SIZES};

/// What to draw for the current stage.
#[derive(Debug, Clone, Copy)]
pub enum Screen<'a> {
    Home {
        selected: usize,
    },
    Input {
        size: GameSize,
        fields: &'a [String],
        focus: usize,
        /// `(done, total)` while images are being fetched.
        progress: Option<(usize, usize)>,
    },
    Review {
        pairs: &'a [WordImagePair],
        selected: usize,
        regenerating: &'a [PairId],
    },
    Play {
        snap: &'a GameSnapshot,
        board: BoardState<'a>,
    },
}

/// Notices and flags shown around every screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chrome<'a> {
    pub notices: &'a [String],
    pub history: bool,
}

const NOTICE: CellStyle = CellStyle::fg(Rgb::new(240, 170, 80));
const MAX_NOTICE_ROWS: usize = 3;

#[derive(Default)]
pub struct ScreenView {
    board: GameView,
}

impl ScreenView {
    pub fn new(board: GameView) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &GameView {
        &self.board
    }

    pub fn render_into(&self, screen: &Screen, chrome: &Chrome, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        match *screen {
            Screen::Home { selected } => self.draw_home(fb, selected, viewport),
            Screen::Input {
                size,
                fields,
                focus,
                progress,
            } => self.draw_input(fb, size, fields, focus, progress, viewport),
            Screen::Review {
                pairs,
                selected,
                regenerating,
            } => self.draw_review(fb, pairs, selected, regenerating, viewport),
            Screen::Play { snap, board } => self.board.render_into(snap, &board, viewport, fb),
        }

        self.draw_chrome(fb, screen, chrome, viewport);
    }

    pub fn render(&self, screen: &Screen, chrome: &Chrome, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, chrome, viewport, &mut fb);
        fb
    }

    fn draw_home(&self, fb: &mut FrameBuffer, selected: usize, viewport: Viewport) {
        let top = viewport.height / 3;
        fb.put_str_centered(0, top, viewport.width, "Memory Match", HIGHLIGHT);
        fb.put_str_centered(
            0,
            top + 1,
            viewport.width,
            "Match each word with its picture",
            MUTED,
        );
        fb.put_str_centered(0, top + 3, viewport.width, "How many pairs?", TEXT);

        let labels: Vec<String> = GAME_SIZES
            .iter()
            .enumerate()
            .map(|(i, size)| format!(" {}: {} ", i + 1, size.pairs()))
            .collect();
        let total: u16 = labels.iter().map(|l| l.chars().count() as u16 + 2).sum();
        let mut x = viewport.width.saturating_sub(total) / 2;
        for (i, label) in labels.iter().enumerate() {
            let style = if i == selected {
                HIGHLIGHT.on(Rgb::new(60, 60, 80))
            } else {
                TEXT
            };
            fb.put_char(x, top + 5, '[', MUTED);
            x = fb.put_str(x + 1, top + 5, label, style);
            fb.put_char(x, top + 5, ']', MUTED);
            x += 1;
        }
    }

    fn draw_input(
        &self,
        fb: &mut FrameBuffer,
        size: GameSize,
        fields: &[String],
        focus: usize,
        progress: Option<(usize, usize)>,
        viewport: Viewport,
    ) {
        let title = format!("Enter {} words", size.pairs());
        fb.put_str_centered(0, 1, viewport.width, &title, HIGHLIGHT);

        let filled = fields.iter().filter(|f| !f.trim().is_empty()).count();
        let count = format!("{}/{} words", filled, fields.len());
        fb.put_str_centered(0, 2, viewport.width, &count, MUTED);

        let field_w = 36u16.min(viewport.width.saturating_sub(8));
        let x = viewport.width.saturating_sub(field_w + 5) / 2;
        for (i, field) in fields.iter().enumerate() {
            let y = 4 + i as u16;
            let focused = i == focus && progress.is_none();
            let marker = if focused { '›' } else { ' ' };
            fb.put_char(x, y, marker, HIGHLIGHT);
            let number = format!("{:>2}.", i + 1);
            fb.put_str(x + 1, y, &number, MUTED);

            let style = if focused { TEXT.bold() } else { TEXT };
            let end = fb.put_str_max(x + 5, y, field, field_w, style);
            if focused {
                fb.put_char(end, y, '▏', HIGHLIGHT);
            }
        }

        let status_y = 5 + fields.len() as u16;
        if let Some((done, total)) = progress {
            let text = format!("Finding images... {}/{}", done, total);
            fb.put_str_centered(0, status_y, viewport.width, &text, HIGHLIGHT);
        } else if filled == fields.len() && !fields.is_empty() {
            fb.put_str_centered(0, status_y, viewport.width, "Press Enter to find images", MUTED);
        }
    }

    fn draw_review(
        &self,
        fb: &mut FrameBuffer,
        pairs: &[WordImagePair],
        selected: usize,
        regenerating: &[PairId],
        viewport: Viewport,
    ) {
        fb.put_str_centered(0, 1, viewport.width, "Review your pairs", HIGHLIGHT);

        let word_w: u16 = 16;
        let label_w = viewport.width.saturating_sub(word_w + 30).clamp(8, 40);
        let row_w = 4 + word_w + 2 + label_w + 20;
        let x = viewport.width.saturating_sub(row_w) / 2;

        for (i, pair) in pairs.iter().enumerate() {
            let y = 3 + i as u16;
            let row_style = if i == selected {
                TEXT.bold().on(Rgb::new(40, 40, 60))
            } else {
                TEXT
            };
            if i == selected {
                fb.fill_rect(x, y, row_w, 1, ' ', row_style);
            }
            fb.put_str(x, y, &format!("{:>2}. ", i + 1), row_style);
            fb.put_str_max(x + 4, y, &pair.word, word_w, row_style);

            let image_x = x + 4 + word_w + 2;
            if regenerating.contains(&pair.pair_id) {
                fb.put_str(image_x, y, "fetching new image…", NOTICE.on(row_style.bg));
                continue;
            }
            let end = fb.put_str_max(image_x, y, image_label(&pair.image_url), label_w, row_style);
            if let Some(credit) = &pair.image_credit {
                let by = format!("  by {}", credit.user);
                fb.put_str_max(end, y, &by, 18, MUTED.on(row_style.bg));
            }
        }
    }

    fn draw_chrome(&self, fb: &mut FrameBuffer, screen: &Screen, chrome: &Chrome, viewport: Viewport) {
        if viewport.height < 2 {
            return;
        }
        let help_y = viewport.height - 1;
        let mut help = help_text(screen).to_string();
        if chrome.history {
            help.push_str("  [/]: history");
        }
        fb.put_str_centered(0, help_y, viewport.width, &help, MUTED);

        let shown = chrome.notices.len().min(MAX_NOTICE_ROWS);
        let first = chrome.notices.len() - shown;
        for (row, notice) in chrome.notices[first..].iter().enumerate() {
            let y = help_y.saturating_sub((shown - row) as u16);
            fb.put_str_max(1, y, &format!("! {}", notice), viewport.width.saturating_sub(2), NOTICE);
        }
    }
}

fn help_text(screen: &Screen) -> &'static str {
    match screen {
        Screen::Home { .. } => "←/→ or 1-4: size  Enter: continue  q: quit",
        Screen::Input { .. } => "Tab/↑/↓: field  Enter: find images  Esc: back",
        Screen::Review { .. } => "↑/↓: select  r: new image  Enter: start  Esc: back  q: quit",
        Screen::Play { snap, .. } if snap.completed => "n: play again  Esc: back  q: quit",
        Screen::Play { .. } => "arrows: move  Space/Enter: flip  n: new game  Esc: back  q: quit",
    }
}
