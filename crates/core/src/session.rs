//! Session controller - stages, pairs and the game, owned in one place.
//!
//! The session never performs I/O. Operations that need the image service
//! hand back a request ([`AcquireRequest`], [`RegenerateRequest`]) tagged with a
//! [`RequestTicket`]; the caller runs it and feeds the answer back through
//! [`Session::apply_acquisition`] / [`Session::apply_regeneration`]. Answers
//! whose ticket is no longer current are dropped.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::config::SessionConfig;
use crate::game_state::MemoryGame;
use crate::navigation::Navigator;
use crate::pairs::{PairSet, PairSetVersion};
use crate::rng::DeckRng;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Most recent notices kept for display.
const MAX_NOTICES: usize = 8;

/// Warning surfaced to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A submitted word produced no pair.
    WordDropped { word: String, reason: String },
    /// Every submitted word came back without an image.
    NothingFound,
    /// A regeneration left the pair unchanged.
    RegenerationFailed { word: String, reason: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::WordDropped { word, reason } => format!("\"{}\" skipped: {}", word, reason),
            Notice::NothingFound => "No images found for any word".to_string(),
            Notice::RegenerationFailed { word, reason } => {
                format!("Could not refresh \"{}\": {}", word, reason)
            }
        }
    }
}

/// Resolve a batch of words into pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquireRequest {
    pub ticket: RequestTicket,
    pub words: Vec<String>,
}

/// Fetch a fresh image for one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerateRequest {
    pub ticket: RequestTicket,
    pub pair_id: PairId,
    pub word: String,
}

/// Batch acquisition in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionProgress {
    pub ticket: RequestTicket,
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRegeneration {
    ticket: RequestTicket,
    generation: u64,
    /// Requested from a face-up setup deal rather than the review screen.
    from_setup: bool,
}

pub struct Session {
    config: SessionConfig,
    nav: Navigator,
    game_size: Option<GameSize>,
    words: Vec<String>,
    pairs: PairSet,
    game: MemoryGame,
    /// Pair set version the current game was dealt from.
    dealt_from: Option<PairSetVersion>,
    next_ticket: u64,
    acquiring: Option<AcquisitionProgress>,
    regenerating: HashMap<PairId, PendingRegeneration>,
    notices: Vec<Notice>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => DeckRng::new(seed),
            None => DeckRng::from_entropy(),
        };

        Self {
            config,
            nav: Navigator::new(config.mirror_history),
            game_size: None,
            words: Vec::new(),
            pairs: PairSet::new(),
            game: MemoryGame::with_rng(config.engine, rng),
            dealt_from: None,
            next_ticket: 0,
            acquiring: None,
            regenerating: HashMap::new(),
            notices: Vec::new(),
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn stage(&self) -> Stage {
        self.nav.stage()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn game_size(&self) -> Option<GameSize> {
        self.game_size
    }

    /// Words of the last submission (used to prefill the input screen).
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn pairs(&self) -> &[WordImagePair] {
        self.pairs.pairs()
    }

    pub fn pair_set(&self) -> &PairSet {
        &self.pairs
    }

    pub fn game(&self) -> &MemoryGame {
        &self.game
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn dismiss_notices(&mut self) {
        self.notices.clear();
    }

    pub fn acquisition(&self) -> Option<AcquisitionProgress> {
        self.acquiring
    }

    pub fn is_acquiring(&self) -> bool {
        self.acquiring.is_some()
    }

    pub fn is_regenerating(&self, pair_id: PairId) -> bool {
        self.regenerating.contains_key(&pair_id)
    }

    // ---- home -------------------------------------------------------------

    /// Pick the number of pairs and move to word input.
    ///
    /// Choosing a different size than before discards words, pairs and game.
    pub fn select_size(&mut self, size: GameSize) -> bool {
        if self.stage() != Stage::Home {
            return false;
        }

        if self.game_size != Some(size) {
            self.words.clear();
            self.discard_pairs();
        }
        self.game_size = Some(size);
        self.notices.clear();
        self.enter(Stage::Input)
    }

    // ---- input ------------------------------------------------------------

    /// Submit the words for the chosen size.
    ///
    /// Returns the batch to resolve, or `None` when the words are incomplete
    /// or a batch is already in flight.
    pub fn submit_words(&mut self, words: Vec<String>) -> Option<AcquireRequest> {
        if self.stage() != Stage::Input || self.acquiring.is_some() {
            return None;
        }
        let size = self.game_size?;

        let words: Vec<String> = words.into_iter().map(|w| w.trim().to_string()).collect();
        if words.len() != size.pairs() || words.iter().any(|w| w.is_empty()) {
            return None;
        }

        let ticket = self.issue_ticket();
        self.words = words.clone();
        self.notices.clear();
        self.acquiring = Some(AcquisitionProgress {
            ticket,
            done: 0,
            total: words.len(),
        });
        info!("acquiring images for {} words ({:?})", words.len(), ticket);

        Some(AcquireRequest { ticket, words })
    }

    pub fn acquisition_progress(&mut self, ticket: RequestTicket, done: usize, total: usize) {
        if let Some(progress) = self.acquiring.as_mut() {
            if progress.ticket == ticket {
                progress.done = done;
                progress.total = total;
            }
        }
    }

    /// Take the result of a batch. Moves to review when any pair came back.
    pub fn apply_acquisition(&mut self, ticket: RequestTicket, report: AcquisitionReport) -> bool {
        match self.acquiring {
            Some(progress) if progress.ticket == ticket => {}
            _ => {
                debug!("discarding stale acquisition {:?}", ticket);
                return false;
            }
        }
        self.acquiring = None;

        for dropped in &report.dropped {
            let reason = dropped
                .outcome
                .failure_reason()
                .unwrap_or("no image")
                .to_string();
            warn!("word {:?} dropped: {}", dropped.word, reason);
            self.push_notice(Notice::WordDropped {
                word: dropped.word.clone(),
                reason,
            });
        }

        if report.pairs.is_empty() {
            self.push_notice(Notice::NothingFound);
            return true;
        }

        // Keep ids dense whatever the producer did.
        let pairs = report
            .pairs
            .into_iter()
            .enumerate()
            .map(|(i, pair)| WordImagePair {
                pair_id: i as PairId,
                ..pair
            })
            .collect();
        self.discard_pairs();
        self.pairs.replace_all(pairs);
        info!("acquired {} pairs", self.pairs.len());

        self.enter(Stage::Review)
    }

    // ---- review -----------------------------------------------------------

    /// Ask for a fresh image for `pair_id`.
    ///
    /// Allowed on the review screen and while cards are dealt face-up for
    /// setup. A newer request for the same pair supersedes an older one.
    pub fn request_regeneration(&mut self, pair_id: PairId) -> Option<RegenerateRequest> {
        let from_setup = match self.stage() {
            Stage::Review => false,
            Stage::Play if self.game.phase() == Phase::Setup => true,
            _ => return None,
        };

        let word = self.pairs.get(pair_id)?.word.clone();
        let ticket = self.issue_ticket();
        self.regenerating.insert(
            pair_id,
            PendingRegeneration {
                ticket,
                generation: self.pairs.generation(),
                from_setup,
            },
        );
        debug!("regenerating pair {} ({:?}) {:?}", pair_id, word, ticket);

        Some(RegenerateRequest {
            ticket,
            pair_id,
            word,
        })
    }

    /// Per-card regenerate affordance: resolves an image card to its pair.
    pub fn request_card_regeneration(&mut self, card_id: CardId) -> Option<RegenerateRequest> {
        let card = self.game.card(card_id)?;
        if card.kind != CardKind::Image {
            return None;
        }
        let pair_id = card.pair_id;
        self.request_regeneration(pair_id)
    }

    /// Take the answer to a regeneration. Returns true if the pair changed.
    pub fn apply_regeneration(
        &mut self,
        ticket: RequestTicket,
        pair_id: PairId,
        outcome: FetchOutcome,
        now_ms: u64,
    ) -> bool {
        let current = self.pairs.generation();
        let pending = match self.regenerating.get(&pair_id) {
            Some(&pending) if pending.ticket == ticket && pending.generation == current => {
                pending
            }
            _ => {
                debug!("discarding stale regeneration {:?} for pair {}", ticket, pair_id);
                return false;
            }
        };
        self.regenerating.remove(&pair_id);

        // A game already being played must not go stale under the player.
        let in_setup = self.game.phase() == Phase::Setup;
        let live_game = self.stage() == Stage::Play && !in_setup;
        if live_game || (pending.from_setup && !in_setup) {
            debug!("regeneration {:?} for pair {} arrived after play began", ticket, pair_id);
            return false;
        }

        let candidate = match outcome {
            FetchOutcome::Found(candidate) => candidate,
            failed => {
                let word = self
                    .pairs
                    .get(pair_id)
                    .map(|p| p.word.clone())
                    .unwrap_or_default();
                let reason = failed.failure_reason().unwrap_or("no image").to_string();
                warn!("regeneration of {:?} failed: {}", word, reason);
                self.push_notice(Notice::RegenerationFailed { word, reason });
                return false;
            }
        };

        let before = self.pairs.version();
        let Some(url) = self.pairs.replace_image(pair_id, &candidate, now_ms) else {
            return false;
        };

        // Cards dealt face-up for setup pick up the new image in place.
        if self.dealt_from == Some(before)
            && self.game.phase() == Phase::Setup
            && self.game.refresh_pair_image(pair_id, &url)
        {
            self.dealt_from = Some(self.pairs.version());
        }
        true
    }

    /// Start playing with the reviewed pairs.
    ///
    /// The game is dealt again only if the pairs changed since it was dealt.
    pub fn confirm(&mut self) -> bool {
        if self.stage() != Stage::Review || self.pairs.is_empty() {
            return false;
        }
        self.ensure_dealt();
        self.enter(Stage::Play)
    }

    // ---- play -------------------------------------------------------------

    /// Leave the setup phase and start matching.
    ///
    /// Image refreshes still in flight for the face-up deal are abandoned.
    pub fn begin_play(&mut self) -> bool {
        if self.stage() != Stage::Play || !self.game.begin_play() {
            return false;
        }
        self.regenerating.retain(|_, pending| !pending.from_setup);
        true
    }

    /// Forward a click to the engine. `None` outside the play screen.
    pub fn click(&mut self, card_id: CardId) -> Option<ClickOutcome> {
        if self.stage() != Stage::Play {
            return None;
        }
        let outcome = self.game.handle_click(card_id);
        if let ClickOutcome::Matched {
            completed: true, ..
        } = outcome
        {
            info!("game completed in {} moves", self.game.moves());
        }
        Some(outcome)
    }

    /// Advance engine timers.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.game.tick(elapsed_ms)
    }

    // ---- navigation -------------------------------------------------------

    /// Go back one screen. Leaving input cancels a batch in flight.
    pub fn back(&mut self) -> Option<Stage> {
        let from = self.stage();
        let to = self.nav.back()?;
        if from == Stage::Input {
            if let Some(progress) = self.acquiring.take() {
                debug!("cancelled acquisition {:?}", progress.ticket);
            }
        }
        debug!("stage {} -> {} (back)", from.as_str(), to.as_str());
        Some(to)
    }

    /// Abandon everything and return home.
    pub fn restart(&mut self) {
        self.game_size = None;
        self.words.clear();
        self.discard_pairs();
        self.acquiring = None;
        self.notices.clear();
        self.nav.reset();
        debug!("session restarted");
    }

    /// History back gesture. Same transition as [`Session::back`].
    pub fn history_back(&mut self) -> Option<Stage> {
        self.nav.history()?;
        self.back()
    }

    /// History forward gesture: re-enter the next recorded stage when its
    /// preconditions still hold.
    pub fn history_forward(&mut self) -> Option<Stage> {
        let next = self.nav.peek_forward()?;
        let allowed = match next {
            Stage::Home => false,
            Stage::Input => self.game_size.is_some(),
            Stage::Review => !self.pairs.is_empty() && self.acquiring.is_none(),
            Stage::Play => !self.pairs.is_empty(),
        };
        if !allowed {
            return None;
        }

        if next == Stage::Play {
            self.ensure_dealt();
        }
        let to = self.nav.replay_forward()?;
        debug!("stage -> {} (history)", to.as_str());
        Some(to)
    }

    // ---- internals --------------------------------------------------------

    fn enter(&mut self, to: Stage) -> bool {
        let from = self.stage();
        if !self.nav.advance(to) {
            return false;
        }
        debug!("stage {} -> {}", from.as_str(), to.as_str());
        true
    }

    fn ensure_dealt(&mut self) {
        let version = self.pairs.version();
        if self.dealt_from != Some(version) {
            self.game.initialize(self.pairs.pairs());
            self.dealt_from = Some(version);
            debug!("dealt {} cards", self.game.cards().len());
        }
    }

    fn discard_pairs(&mut self) {
        self.pairs.clear();
        self.game.reset();
        self.dealt_from = None;
        self.regenerating.clear();
    }

    fn issue_ticket(&mut self) -> RequestTicket {
        self.next_ticket += 1;
        RequestTicket(self.next_ticket)
    }

    fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() == MAX_NOTICES {
            self.notices.remove(0);
        }
        self.notices.push(notice);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
