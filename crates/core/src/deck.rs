//! Deck module - the cards on the table
//!
//! Builds two cards per pair, shuffles them into presentation order and keeps
//! an explicit pair → cards mapping so nothing outside this module has to
//! know how card ids are allocated.

use std::collections::HashMap;

use crate::rng::DeckRng;
use crate::types::{Card, CardId, CardKind, PairId, WordImagePair};

/// Card ids allocated to a pair: `(word, image)`.
///
/// The only place where ids are derived from a pair id.
fn card_ids_for(pair_id: PairId) -> (CardId, CardId) {
    (pair_id * 2, pair_id * 2 + 1)
}

/// The two cards of one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairCards {
    pub word: CardId,
    pub image: CardId,
}

/// Shuffled cards plus lookup tables.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<Card>,
    /// Card id -> position in `cards`.
    index: HashMap<CardId, usize>,
    pairs: HashMap<PairId, PairCards>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal two cards per pair and shuffle them.
    pub fn deal(pairs: &[WordImagePair], face_up: bool, rng: &mut DeckRng) -> Self {
        let mut cards = Vec::with_capacity(pairs.len() * 2);
        let mut pair_cards = HashMap::with_capacity(pairs.len());

        for pair in pairs {
            let (word_id, image_id) = card_ids_for(pair.pair_id);
            cards.push(Card {
                id: word_id,
                kind: CardKind::Word,
                value: pair.word.clone(),
                is_flipped: face_up,
                is_matched: false,
                pair_id: pair.pair_id,
            });
            cards.push(Card {
                id: image_id,
                kind: CardKind::Image,
                value: pair.image_url.clone(),
                is_flipped: face_up,
                is_matched: false,
                pair_id: pair.pair_id,
            });
            pair_cards.insert(
                pair.pair_id,
                PairCards {
                    word: word_id,
                    image: image_id,
                },
            );
        }

        rng.shuffle(&mut cards);

        let index = cards
            .iter()
            .enumerate()
            .map(|(pos, card)| (card.id, pos))
            .collect();

        Self {
            cards,
            index,
            pairs: pair_cards,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.index.get(&id).map(|&pos| &self.cards[pos])
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        let pos = *self.index.get(&id)?;
        self.cards.get_mut(pos)
    }

    pub fn cards_of_pair(&self, pair_id: PairId) -> Option<PairCards> {
        self.pairs.get(&pair_id).copied()
    }

    /// Turn every unmatched card face-up or face-down.
    pub fn set_all_flipped(&mut self, flipped: bool) {
        for card in self.cards.iter_mut().filter(|c| !c.is_matched) {
            card.is_flipped = flipped;
        }
    }
}
