// simulation/simulator.rs

use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::Rng;

use super::{
    TUNING,
    geometry::{CardRect, GeometrySource, Viewport},
    registry::{Card, CardId, CardRegistry},
};
use crate::content::FilmContent;

/// Owns every card plus the two pieces of shared state the cards need:
/// the z-order counter and the focused card.
///
/// All mutation goes through methods here; the integrator lives in
/// `integrator.rs` and the pointer handlers in `interaction.rs`.
#[derive(Debug, Clone, Resource)]
pub struct RepulsionSimulator {
    pub(super) registry: CardRegistry,
    /// Last z-order handed out
    z_counter: u32,
    focused: Option<CardId>,
}

impl RepulsionSimulator {
    /// Build one card per film, scattered up and to the left of the
    /// viewport center, stacked in list order.
    pub fn from_contents<R: Rng>(
        contents: &[FilmContent],
        viewport: Viewport,
        rng: &mut R,
    ) -> Self {
        let center = viewport.center();
        let spread = TUNING.spawn_spread;

        let mut z_counter = 0;
        let cards = contents
            .iter()
            .enumerate()
            .map(|(i, content)| {
                let position = Vec2::new(
                    center.x - rng.random::<f32>() * spread.x,
                    center.y - rng.random::<f32>() * spread.y,
                );
                z_counter += 1;
                Card::new(CardId(i), position, z_counter, content.clone())
            })
            .collect();

        RepulsionSimulator {
            registry: CardRegistry::new(cards),
            z_counter,
            focused: None,
        }
    }

    // === Query Methods ===

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.registry.get(id)
    }

    pub fn focused_id(&self) -> Option<CardId> {
        self.focused
    }

    /// Content for the detail panel
    pub fn focused_content(&self) -> Option<&FilmContent> {
        self.focused
            .and_then(|id| self.registry.get(id))
            .map(Card::content)
    }

    pub fn is_focused(&self, id: CardId) -> bool {
        self.focused == Some(id)
    }

    /// Where the card is currently drawn, or `None` if it is not rendered
    /// yet. Usually its resting rectangle; the zoomed focused card reports
    /// its on-screen rectangle instead.
    pub fn rect_of(&self, id: CardId, layout: &impl GeometrySource) -> Option<CardRect> {
        let card = self.registry.get(id)?;
        layout.rendered_rect(id, card.position())
    }

    // === Mutation Methods ===

    /// Hand out the next stacking rank. Always above every rank handed out
    /// so far.
    pub fn next_z_order(&mut self) -> u32 {
        self.z_counter += 1;
        self.z_counter
    }

    /// Focus a card (unknown ids are ignored) or clear focus with `None`
    pub fn set_focused(&mut self, id: Option<CardId>) {
        match id {
            Some(id) if self.registry.get(id).is_none() => {
                log::debug!("Ignoring focus on unknown card {}", id);
            }
            _ => self.focused = id,
        }
    }

    /// Focus `id`, or clear focus if it is already the focused card
    pub fn toggle_focus(&mut self, id: CardId) {
        if self.focused == Some(id) {
            self.focused = None;
        } else {
            self.set_focused(Some(id));
        }
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    pub fn set_position(&mut self, id: CardId, position: Vec2) -> bool {
        self.registry.set_position(id, position)
    }

    /// Move a card to the top of the stack
    pub fn bring_to_front(&mut self, id: CardId) -> Option<u32> {
        self.registry.get(id)?;
        let z_order = self.next_z_order();
        self.registry.set_z_order(id, z_order);
        Some(z_order)
    }
}
