//! Memory pairs session.
//!
//! Each pair contributes two cards to a deck of `2n`, laid out by a seeded
//! shuffle. Flipping two cards of the same pair keeps them face up. A
//! mismatched pair stays visible until the next flip turns it back over.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use super::{Interaction, Score};
use crate::activity::content::{CardFace, ItemId, MemoryPairsContent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipResult {
    /// First card of a move is now face up.
    FaceUp,
    /// Second card completed a pair.
    Matched,
    /// Second card did not match; both turn back on the next flip.
    Mismatched,
    /// Out of range, already face up, or already matched.
    Ignored,
}

/// One card of the deck.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryCard {
    pub pair_id: ItemId,
    pub face: CardFace,
}

#[derive(Debug, Clone)]
pub struct MemoryPairsSession {
    content: MemoryPairsContent,
    seed: u64,
    cards: Vec<MemoryCard>,
    face_up: Vec<usize>,
    matched: HashSet<ItemId>,
    moves: usize,
}

impl MemoryPairsSession {
    pub fn new(content: MemoryPairsContent) -> Self {
        Self::with_seed(content, rand::random())
    }

    pub fn with_seed(content: MemoryPairsContent, seed: u64) -> Self {
        let cards = deal(&content, seed);
        Self {
            content,
            seed,
            cards,
            face_up: Vec::new(),
            matched: HashSet::new(),
            moves: 0,
        }
    }

    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    pub fn is_face_up(&self, index: usize) -> bool {
        self.face_up.contains(&index)
            || self
                .cards
                .get(index)
                .is_some_and(|card| self.matched.contains(&card.pair_id))
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched.len()
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn flip(&mut self, index: usize) -> FlipResult {
        let Some(card) = self.cards.get(index) else {
            return FlipResult::Ignored;
        };
        if self.matched.contains(&card.pair_id) || self.face_up.contains(&index) {
            return FlipResult::Ignored;
        }
        // A mismatched pair from the previous move turns back over.
        if self.face_up.len() == 2 {
            self.face_up.clear();
        }
        self.face_up.push(index);
        if self.face_up.len() < 2 {
            return FlipResult::FaceUp;
        }

        self.moves += 1;
        let (first, second) = (self.face_up[0], self.face_up[1]);
        if self.cards[first].pair_id == self.cards[second].pair_id {
            self.matched.insert(self.cards[first].pair_id.clone());
            self.face_up.clear();
            FlipResult::Matched
        } else {
            FlipResult::Mismatched
        }
    }
}

fn deal(content: &MemoryPairsContent, seed: u64) -> Vec<MemoryCard> {
    let mut cards: Vec<MemoryCard> = content
        .pairs
        .iter()
        .flat_map(|pair| {
            [&pair.first, &pair.second].map(|face| MemoryCard {
                pair_id: pair.id.clone(),
                face: face.clone(),
            })
        })
        .collect();
    cards.shuffle(&mut StdRng::seed_from_u64(seed));
    cards
}

impl Interaction for MemoryPairsSession {
    type Content = MemoryPairsContent;

    fn load(&mut self, content: MemoryPairsContent) {
        *self = Self::with_seed(content, self.seed);
    }

    fn reset(&mut self) {
        self.cards = deal(&self.content, self.seed);
        self.face_up.clear();
        self.matched.clear();
        self.moves = 0;
    }

    fn is_complete(&self) -> bool {
        !self.content.pairs.is_empty() && self.matched.len() == self.content.pairs.len()
    }

    fn score(&self) -> Score {
        Score {
            correct: self.matched.len(),
            attempted: self.moves,
            total: self.content.pairs.len(),
        }
    }
}
