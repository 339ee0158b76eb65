use super::{
    TUNING,
    force::accumulate_accel,
    geometry::{Boundary, GeometrySource, Viewport},
    overlap::has_rect_conflict,
    registry::CardId,
    simulator::RepulsionSimulator,
    tick_loop::TickTask,
};

/// What one frame did, for trace logging
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Cards whose position was advanced and clamped
    pub integrated: usize,
    /// Focused or unrendered cards
    pub skipped: usize,
    /// Pairs that pushed this frame
    pub conflicts: usize,
}

impl RepulsionSimulator {
    /// Advance every free card by one frame.
    ///
    /// Cards are visited in registry order. A card is only pushed by cards
    /// stacked below it, and it sees positions already updated earlier in
    /// the same frame. Damping is applied once per rendered partner, not
    /// once per frame. Dragged cards keep their position; the focused card
    /// (as captured by `task`) is left alone entirely.
    pub fn tick(
        &mut self,
        task: &TickTask,
        layout: &impl GeometrySource,
        viewport: Viewport,
    ) -> TickReport {
        let mut report = TickReport::default();

        for index in 0..self.registry.len() {
            let id = CardId(index);
            if task.focused() == Some(id) {
                report.skipped += 1;
                continue;
            }

            let Some(rect) = self.rect_of(id, layout) else {
                report.skipped += 1;
                continue;
            };
            let Some(card) = self.registry.get(id) else {
                continue;
            };
            if card.is_dragging() {
                continue;
            }

            let z_order = card.z_order();
            let mut accel = card.acceleration();

            for other in self.registry.iter() {
                if other.id() == id {
                    continue;
                }
                let Some(other_rect) = self.rect_of(other.id(), layout) else {
                    continue;
                };

                if other.z_order() < z_order && has_rect_conflict(&rect, &other_rect) {
                    accumulate_accel(&mut accel, &rect, &other_rect, TUNING.throttle);
                    report.conflicts += 1;
                }

                accel *= TUNING.damping;
            }

            let boundary = Boundary::new(rect.size(), viewport);
            let position = boundary.clamp(rect.top_left() + accel);

            self.registry.set_acceleration(id, accel);
            self.registry.set_position(id, position);
            report.integrated += 1;
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{
        CardRect, RenderedLayout, TickLoop,
        test_support::{VIEWPORT, films, simulator_with},
    };
    use bevy::math::Vec2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const BIG: Vec2 = Vec2::new(400.0, 400.0);

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn test_only_lower_cards_push() {
        // Card 0 (z=1) below card 1 (z=2), heavy overlap
        let (mut sim, sizes) = simulator_with(&[
            (Vec2::new(0.0, 0.0), BIG),
            (Vec2::new(100.0, 50.0), BIG),
        ]);
        let task = TickLoop::default().task().clone();

        let report = sim.tick(&task, &sizes, VIEWPORT);

        assert_eq!(report.integrated, 2);
        assert_eq!(report.conflicts, 1);

        // Bottom card is not pushed by the card above it
        assert_eq!(sim.card(CardId(0)).unwrap().position(), Vec2::ZERO);

        // Top card gets (0.21, 0.0525), damped once
        let expected = Vec2::new(100.0, 50.0) + Vec2::new(0.21, 0.0525) * 0.98;
        assert!(approx(sim.card(CardId(1)).unwrap().position(), expected));
    }

    #[test]
    fn test_damping_compounds_per_partner() {
        // Two separate cards far away from card 0: no pushes, but card 0's
        // existing acceleration is damped once per partner.
        let (mut sim, sizes) = simulator_with(&[
            (Vec2::new(500.0, 500.0), Vec2::new(10.0, 10.0)),
            (Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)),
            (Vec2::new(1000.0, 1000.0), Vec2::new(10.0, 10.0)),
        ]);
        sim.registry.set_acceleration(CardId(0), Vec2::new(10.0, 0.0));
        let task = TickLoop::default().task().clone();

        sim.tick(&task, &sizes, VIEWPORT);

        let card = sim.card(CardId(0)).unwrap();
        assert!(approx(card.acceleration(), Vec2::new(10.0 * 0.98 * 0.98, 0.0)));
        assert!(approx(card.position(), Vec2::new(500.0 + 10.0 * 0.98 * 0.98, 500.0)));
    }

    #[test]
    fn test_unrendered_partner_does_not_damp() {
        let (mut sim, mut sizes) = simulator_with(&[
            (Vec2::new(500.0, 500.0), Vec2::new(10.0, 10.0)),
            (Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)),
        ]);
        sizes.remove(CardId(1));
        sim.registry.set_acceleration(CardId(0), Vec2::new(10.0, 0.0));
        let task = TickLoop::default().task().clone();

        let report = sim.tick(&task, &sizes, VIEWPORT);

        assert_eq!(report.skipped, 1);
        assert_eq!(sim.card(CardId(0)).unwrap().acceleration(), Vec2::new(10.0, 0.0));
        assert_eq!(sim.card(CardId(1)).unwrap().position(), Vec2::ZERO);
    }

    #[test]
    fn test_focused_card_is_frozen() {
        let (mut sim, sizes) = simulator_with(&[
            (Vec2::new(0.0, 0.0), BIG),
            (Vec2::new(100.0, 50.0), BIG),
        ]);
        sim.registry.set_acceleration(CardId(1), Vec2::new(5.0, 5.0));
        let mut tick_loop = TickLoop::default();
        let task = tick_loop.restart(Some(CardId(1))).clone();

        let report = sim.tick(&task, &sizes, VIEWPORT);

        assert_eq!(report.skipped, 1);
        let card = sim.card(CardId(1)).unwrap();
        assert_eq!(card.position(), Vec2::new(100.0, 50.0));
        assert_eq!(card.acceleration(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_others_collide_with_drawn_focused_card() {
        // Card 0 rests far away but is drawn over card 1
        let (mut sim, mut sizes) = simulator_with(&[
            (Vec2::new(1500.0, 1500.0), BIG),
            (Vec2::new(100.0, 50.0), BIG),
        ]);
        let mut tick_loop = TickLoop::default();
        let task = tick_loop.restart(Some(CardId(0))).clone();

        sim.tick(&task, &sizes, VIEWPORT);
        assert_eq!(sim.card(CardId(1)).unwrap().position(), Vec2::new(100.0, 50.0));

        sizes.set_displaced(CardId(0), CardRect::new(0.0, 0.0, 400.0, 400.0));
        sim.tick(&task, &sizes, VIEWPORT);

        let expected = Vec2::new(100.0, 50.0) + Vec2::new(0.21, 0.0525) * 0.98;
        assert!(approx(sim.card(CardId(1)).unwrap().position(), expected));
        assert_eq!(sim.card(CardId(0)).unwrap().position(), Vec2::new(1500.0, 1500.0));
    }

    #[test]
    fn test_dragging_card_ignores_physics() {
        let (mut sim, sizes) = simulator_with(&[
            (Vec2::new(0.0, 0.0), BIG),
            (Vec2::new(100.0, 50.0), BIG),
        ]);
        sim.registry.set_dragging(CardId(1), true);
        sim.registry.set_acceleration(CardId(1), Vec2::new(5.0, 5.0));
        let task = TickLoop::default().task().clone();

        sim.tick(&task, &sizes, VIEWPORT);
        assert_eq!(sim.card(CardId(1)).unwrap().position(), Vec2::new(100.0, 50.0));

        // Only the drag delta moves it
        sim.drag_move(CardId(1), Vec2::new(7.0, -3.0));
        sim.tick(&task, &sizes, VIEWPORT);
        assert_eq!(sim.card(CardId(1)).unwrap().position(), Vec2::new(107.0, 47.0));
    }

    #[test]
    fn test_dragging_card_may_leave_bounds() {
        let (mut sim, sizes) = simulator_with(&[(Vec2::new(0.0, 0.0), BIG)]);
        sim.registry.set_dragging(CardId(0), true);
        sim.drag_move(CardId(0), Vec2::new(-5000.0, 0.0));
        let task = TickLoop::default().task().clone();

        sim.tick(&task, &sizes, VIEWPORT);
        assert_eq!(sim.card(CardId(0)).unwrap().position().x, -5000.0);

        // Released: next frame pulls it back inside
        sim.drag_stop(CardId(0));
        sim.tick(&task, &sizes, VIEWPORT);
        assert_eq!(sim.card(CardId(0)).unwrap().position().x, -80.0);
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(99);
        let task = TickLoop::default().task().clone();

        for _ in 0..50 {
            let viewport = Viewport::new(rng.random_range(300.0..2500.0), rng.random_range(300.0..2500.0));
            let count = rng.random_range(1..8);
            let mut sim = RepulsionSimulator::from_contents(&films(count), viewport, &mut rng);
            let mut sizes = RenderedLayout::default();

            for i in 0..count {
                let id = CardId(i);
                let size = Vec2::new(rng.random_range(0.0..300.0), rng.random_range(0.0..300.0));
                sizes.insert(id, size);
                sim.set_position(
                    id,
                    Vec2::new(rng.random_range(-4000.0..4000.0), rng.random_range(-4000.0..4000.0)),
                );
                sim.registry.set_acceleration(
                    id,
                    Vec2::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)),
                );
            }

            for _ in 0..3 {
                sim.tick(&task, &sizes, viewport);
                for card in sim.registry().iter() {
                    let size = sizes.size(card.id()).unwrap();
                    let boundary = Boundary::new(size, viewport);
                    assert!(boundary.contains(card.position()));
                }
            }
        }
    }

    #[test]
    fn test_pile_spreads_over_time() {
        // Three big cards stacked almost on top of each other
        let (mut sim, sizes) = simulator_with(&[
            (Vec2::new(800.0, 800.0), BIG),
            (Vec2::new(850.0, 830.0), BIG),
            (Vec2::new(780.0, 870.0), BIG),
        ]);
        let task = TickLoop::default().task().clone();

        let before = sim.card(CardId(2)).unwrap().position();
        for _ in 0..120 {
            sim.tick(&task, &sizes, VIEWPORT);
        }
        let after = sim.card(CardId(2)).unwrap().position();

        assert!(after.distance(before) > 1.0);
        assert!(sim.registry().iter().all(|c| c.position().is_finite()));
    }
}
