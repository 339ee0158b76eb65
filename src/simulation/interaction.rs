use bevy::math::Vec2;

use super::{
    TUNING,
    force::accumulate_accel,
    geometry::GeometrySource,
    overlap::has_rect_conflict,
    registry::CardId,
    simulator::RepulsionSimulator,
};

impl RepulsionSimulator {
    /// Pick a card up.
    ///
    /// Cards at or above it that overlap where it is drawn are shoved out
    /// of the way right away, then it becomes the topmost card.
    pub fn drag_start(&mut self, id: CardId, layout: &impl GeometrySource) -> bool {
        let Some(card) = self.registry.get(id) else {
            log::debug!("drag_start on unknown card {}", id);
            return false;
        };
        let dragged_z = card.z_order();

        if let Some(dragged_rect) = self.rect_of(id, layout) {
            for other in (0..self.registry.len()).map(CardId) {
                if other == id {
                    continue;
                }
                let Some(other_card) = self.registry.get(other) else {
                    continue;
                };
                if other_card.z_order() < dragged_z {
                    continue;
                }
                let Some(other_rect) = self.rect_of(other, layout) else {
                    continue;
                };
                if !has_rect_conflict(&dragged_rect, &other_rect) {
                    continue;
                }

                let mut impulse = Vec2::ZERO;
                accumulate_accel(&mut impulse, &other_rect, &dragged_rect, 0.0);
                self.registry
                    .set_acceleration(other, impulse * TUNING.drag_impulse_scale);

                log::trace!("{} shoves {} by {:?}", id, other, impulse);
            }
        }

        self.bring_to_front(id);
        self.registry.set_dragging(id, true);
        self.registry.set_acceleration(id, Vec2::ZERO);
        true
    }

    /// Follow the pointer. Only a dragged, unfocused card moves.
    pub fn drag_move(&mut self, id: CardId, delta: Vec2) -> bool {
        if self.is_focused(id) {
            return false;
        }
        let Some(card) = self.registry.get(id) else {
            return false;
        };
        if !card.is_dragging() {
            return false;
        }

        let position = card.position() + delta;
        self.registry.set_position(id, position)
    }

    pub fn drag_stop(&mut self, id: CardId) -> bool {
        self.registry.set_dragging(id, false)
    }

    /// Stop the card, raise it and toggle focus on it
    pub fn click(&mut self, id: CardId) -> bool {
        if !self.registry.set_acceleration(id, Vec2::ZERO) {
            log::debug!("click on unknown card {}", id);
            return false;
        }
        self.bring_to_front(id);
        self.toggle_focus(id);
        true
    }

    /// Click on the backdrop behind a focused card
    pub fn dim_click(&mut self) {
        self.clear_focus();
    }
}
