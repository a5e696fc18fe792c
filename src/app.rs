//! Front-end state: the session plus the cursors and form the screens need.
//!
//! `App` turns [`Command`]s into session operations and image jobs, and worker
//! events back into session updates. It does no I/O, so the whole flow can be
//! driven from tests.

use crate::core::{GameSnapshot, Session, SessionConfig};
use crate::images::{ImageJob, WorkerEvent};
use crate::input::{Command, Direction, GridCursor, WordForm};
use crate::term::{BoardState, Chrome, FrameBuffer, Screen, ScreenView, Viewport};
use crate::types::{CardId, PairId, Phase, Stage, GAME_SIZES};

pub struct App {
    session: Session,
    size_cursor: usize,
    form: WordForm,
    review_cursor: usize,
    grid: GridCursor,
    // Per-frame buffers reused across renders.
    snapshot: GameSnapshot,
    regenerating: Vec<PairId>,
    notices: Vec<String>,
}

impl App {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            session: Session::new(config),
            size_cursor: 0,
            form: WordForm::new(0),
            review_cursor: 0,
            grid: GridCursor::default(),
            snapshot: GameSnapshot::default(),
            regenerating: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn stage(&self) -> Stage {
        self.session.stage()
    }

    pub fn form(&self) -> &WordForm {
        &self.form
    }

    pub fn size_cursor(&self) -> usize {
        self.size_cursor
    }

    pub fn review_cursor(&self) -> usize {
        self.review_cursor
    }

    pub fn grid(&self) -> &GridCursor {
        &self.grid
    }

    /// Apply one command. Returns work for the image worker, if any.
    pub fn handle(&mut self, cmd: Command) -> Option<ImageJob> {
        let before = self.stage();
        let job = match cmd {
            Command::Back => {
                self.session.back();
                None
            }
            Command::HistoryBack => {
                self.session.history_back();
                None
            }
            Command::HistoryForward => {
                self.session.history_forward();
                None
            }
            _ => match before {
                Stage::Home => self.handle_home(cmd),
                Stage::Input => self.handle_input(cmd),
                Stage::Review => self.handle_review(cmd),
                Stage::Play => self.handle_play(cmd),
            },
        };
        self.sync(before);
        job
    }

    /// Feed a worker event back into the session.
    pub fn apply_event(&mut self, event: WorkerEvent, now_ms: u64) {
        let before = self.stage();
        match event {
            WorkerEvent::Progress {
                ticket,
                done,
                total,
            } => self.session.acquisition_progress(ticket, done, total),
            WorkerEvent::Acquired { ticket, report } => {
                self.session.apply_acquisition(ticket, report);
            }
            WorkerEvent::Regenerated {
                ticket,
                pair_id,
                outcome,
            } => {
                self.session
                    .apply_regeneration(ticket, pair_id, outcome, now_ms);
            }
        }
        self.sync(before);
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.session.tick(elapsed_ms);
    }

    /// Draw the current stage into `fb`.
    pub fn render_into(&mut self, view: &ScreenView, viewport: Viewport, fb: &mut FrameBuffer) {
        self.session.game().snapshot_into(&mut self.snapshot);
        self.regenerating.clear();
        self.regenerating.extend(
            self.session
                .pairs()
                .iter()
                .map(|p| p.pair_id)
                .filter(|&id| self.session.is_regenerating(id)),
        );
        self.notices.clear();
        self.notices
            .extend(self.session.notices().iter().map(|n| n.message()));

        let screen = self.screen();
        let chrome = Chrome {
            notices: &self.notices,
            history: self.session.config().mirror_history,
        };
        view.render_into(&screen, &chrome, viewport, fb);
    }

    fn screen(&self) -> Screen<'_> {
        match self.stage() {
            Stage::Home => Screen::Home {
                selected: self.size_cursor,
            },
            Stage::Input => Screen::Input {
                size: self.session.game_size().unwrap_or(GAME_SIZES[0]),
                fields: self.form.fields(),
                focus: self.form.focus(),
                progress: self.session.acquisition().map(|p| (p.done, p.total)),
            },
            Stage::Review => Screen::Review {
                pairs: self.session.pairs(),
                selected: self.review_cursor,
                regenerating: &self.regenerating,
            },
            Stage::Play => Screen::Play {
                snap: &self.snapshot,
                board: BoardState {
                    cursor: self.grid.index(),
                    columns: self.grid.columns(),
                    regenerating: &self.regenerating,
                },
            },
        }
    }

    fn handle_home(&mut self, cmd: Command) -> Option<ImageJob> {
        match cmd {
            Command::Move(Direction::Left | Direction::Up) => {
                self.size_cursor = self.size_cursor.saturating_sub(1);
            }
            Command::Move(Direction::Right | Direction::Down) => {
                self.size_cursor = (self.size_cursor + 1).min(GAME_SIZES.len() - 1);
            }
            Command::ChooseSize(size) => {
                if let Some(i) = GAME_SIZES.iter().position(|&s| s == size) {
                    self.size_cursor = i;
                }
                self.session.select_size(size);
            }
            Command::Confirm => {
                self.session.select_size(GAME_SIZES[self.size_cursor]);
            }
            _ => {}
        }
        None
    }

    fn handle_input(&mut self, cmd: Command) -> Option<ImageJob> {
        if self.session.is_acquiring() {
            return None;
        }
        match cmd {
            Command::Type(ch) => self.form.insert(ch),
            Command::Erase => self.form.backspace(),
            Command::NextField => self.form.next_field(),
            Command::PrevField => self.form.prev_field(),
            Command::Confirm => {
                if !self.form.is_complete() {
                    self.form.focus_first_blank();
                    return None;
                }
                return self.session.submit_words(self.form.words()).map(ImageJob::from);
            }
            _ => {}
        }
        None
    }

    fn handle_review(&mut self, cmd: Command) -> Option<ImageJob> {
        let len = self.session.pairs().len();
        match cmd {
            Command::Move(Direction::Up | Direction::Left) => {
                self.review_cursor = self.review_cursor.saturating_sub(1);
            }
            Command::Move(Direction::Down | Direction::Right) => {
                self.review_cursor = (self.review_cursor + 1).min(len.saturating_sub(1));
            }
            Command::Regenerate => {
                let pair_id = self.session.pairs().get(self.review_cursor)?.pair_id;
                return self
                    .session
                    .request_regeneration(pair_id)
                    .map(ImageJob::from);
            }
            Command::Confirm => {
                self.session.confirm();
            }
            _ => {}
        }
        None
    }

    fn handle_play(&mut self, cmd: Command) -> Option<ImageJob> {
        match cmd {
            Command::Move(dir) => self.grid.step(dir),
            Command::Confirm if self.session.game().phase() == Phase::Setup => {
                self.session.begin_play();
            }
            Command::Confirm | Command::Flip => self.flip_at_cursor(),
            Command::Regenerate => {
                let card_id = self.card_at_cursor()?;
                return self
                    .session
                    .request_card_regeneration(card_id)
                    .map(ImageJob::from);
            }
            Command::PlayAgain => self.session.restart(),
            _ => {}
        }
        None
    }

    fn card_at_cursor(&self) -> Option<CardId> {
        self.session
            .game()
            .cards()
            .get(self.grid.index())
            .map(|c| c.id)
    }

    fn flip_at_cursor(&mut self) {
        if let Some(card_id) = self.card_at_cursor() {
            self.session.click(card_id);
        }
    }

    /// Reset per-screen state after a stage change.
    fn sync(&mut self, before: Stage) {
        let now = self.stage();
        if now == before {
            if now == Stage::Play {
                self.grid.set_len(self.session.game().cards().len());
            }
            return;
        }

        match now {
            Stage::Home => {
                if let Some(i) = self
                    .session
                    .game_size()
                    .and_then(|size| GAME_SIZES.iter().position(|&s| s == size))
                {
                    self.size_cursor = i;
                }
            }
            Stage::Input => {
                let count = self.session.game_size().map_or(0, |s| s.pairs());
                self.form = WordForm::with_words(count, self.session.words());
            }
            Stage::Review => {
                let len = self.session.pairs().len();
                self.review_cursor = self.review_cursor.min(len.saturating_sub(1));
            }
            Stage::Play => {
                let len = self.session.game().cards().len();
                if self.grid.len() != len {
                    self.grid = GridCursor::new(len);
                }
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
