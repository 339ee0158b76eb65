use bevy::math::Vec2;
use std::cmp::Reverse;
use std::fmt;

use crate::content::FilmContent;

/// Card identity: the card's index in the film list it was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

impl CardId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "film-{}", self.0)
    }
}

/// One draggable card. Size is not stored here: it comes from whatever
/// renders the card.
#[derive(Debug, Clone)]
pub struct Card {
    id: CardId,
    /// Top-left corner, screen space
    position: Vec2,
    acceleration: Vec2,
    /// Stacking rank, higher draws on top
    z_order: u32,
    is_dragging: bool,
    content: FilmContent,
}

impl Card {
    pub(super) fn new(id: CardId, position: Vec2, z_order: u32, content: FilmContent) -> Self {
        Card {
            id,
            position,
            acceleration: Vec2::ZERO,
            z_order,
            is_dragging: false,
            content,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn z_order(&self) -> u32 {
        self.z_order
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn content(&self) -> &FilmContent {
        &self.content
    }
}

/// Fixed, ordered set of cards. Built once, never grows or shrinks.
#[derive(Debug, Clone)]
pub struct CardRegistry {
    cards: Vec<Card>,
}

impl CardRegistry {
    /// Cards must be given in id order (`cards[i].id == CardId(i)`)
    pub(super) fn new(cards: Vec<Card>) -> Self {
        debug_assert!(cards.iter().enumerate().all(|(i, c)| c.id == CardId(i)));
        CardRegistry { cards }
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|c| c.id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card ids from the top of the stack down
    pub fn ids_top_down(&self) -> Vec<CardId> {
        let mut ids: Vec<_> = self.ids().collect();
        ids.sort_unstable_by_key(|id| Reverse(self.cards[id.index()].z_order));
        ids
    }

    // === Mutation (unknown ids are ignored, returns whether anything changed) ===

    pub fn set_position(&mut self, id: CardId, position: Vec2) -> bool {
        self.with_card(id, |card| card.position = position)
    }

    pub fn set_acceleration(&mut self, id: CardId, acceleration: Vec2) -> bool {
        self.with_card(id, |card| card.acceleration = acceleration)
    }

    pub fn set_z_order(&mut self, id: CardId, z_order: u32) -> bool {
        self.with_card(id, |card| card.z_order = z_order)
    }

    pub fn set_dragging(&mut self, id: CardId, is_dragging: bool) -> bool {
        self.with_card(id, |card| card.is_dragging = is_dragging)
    }

    fn with_card(&mut self, id: CardId, f: impl FnOnce(&mut Card)) -> bool {
        match self.cards.get_mut(id.index()) {
            Some(card) => {
                f(card);
                true
            }
            None => false,
        }
    }
}
