use bevy::prelude::*;

use crate::{
    input::{PointerEvent, PointerEventType, PointerSource},
    simulation::{CardId, GeometrySource, RenderedLayout, RepulsionSimulator, Viewport},
    visual::overlay::SIDEBAR_FRACTION,
};

/// A press that travels less than this (logical px) is a click
pub const CLICK_SLOP: f32 = 4.0;

#[derive(Debug, Clone, Copy)]
struct Press {
    source: PointerSource,
    /// Card picked up, `None` when pressing the backdrop
    card: Option<CardId>,
    last: Vec2,
    travelled: f32,
}

/// The press currently in progress, if any
#[derive(Resource, Default, Debug)]
pub struct PressState {
    active: Option<Press>,
}

/// Which card a press at `point` lands on.
///
/// While a card is focused everything else is behind the backdrop, so only
/// the focused card (where it is drawn, not where it rests) can be hit.
pub fn card_under_pointer(
    simulator: &RepulsionSimulator,
    layout: &impl GeometrySource,
    point: Vec2,
) -> Option<CardId> {
    if let Some(focused) = simulator.focused_id() {
        return simulator
            .rect_of(focused, layout)?
            .contains_point(point)
            .then_some(focused);
    }

    simulator
        .registry()
        .ids_top_down()
        .into_iter()
        .find(|&id| {
            simulator
                .rect_of(id, layout)
                .is_some_and(|rect| rect.contains_point(point))
        })
}

fn in_sidebar(point: Vec2, viewport: &Viewport) -> bool {
    point.x >= viewport.width * (1.0 - SIDEBAR_FRACTION)
}

/// System: turn pointer presses into drags, clicks and backdrop clicks
pub fn handle_pointer_input(
    mut pointer_events: MessageReader<PointerEvent>,
    mut simulator: ResMut<RepulsionSimulator>,
    layout: Res<RenderedLayout>,
    viewport: Res<Viewport>,
    mut press_state: ResMut<PressState>,
) {
    for event in pointer_events.read() {
        match event.event_type {
            PointerEventType::Down => {
                if press_state.active.is_some() {
                    continue;
                }
                // The detail panel swallows presses while it is open
                if simulator.focused_id().is_some() && in_sidebar(event.position, &viewport) {
                    continue;
                }

                let card = card_under_pointer(&simulator, &*layout, event.position);
                if let Some(id) = card {
                    simulator.drag_start(id, &*layout);
                    debug!("Picked up {}", id);
                }

                press_state.active = Some(Press {
                    source: event.source,
                    card,
                    last: event.position,
                    travelled: 0.0,
                });
            }

            PointerEventType::Move => {
                let Some(press) = press_state.active.as_mut() else {
                    continue;
                };
                if press.source != event.source {
                    continue;
                }

                let delta = event.position - press.last;
                press.last = event.position;
                press.travelled += delta.length();

                if let Some(id) = press.card {
                    simulator.drag_move(id, delta);
                }
            }

            PointerEventType::Up => {
                let Some(mut press) = press_state.active.take_if(|p| p.source == event.source)
                else {
                    continue;
                };

                let delta = event.position - press.last;
                press.travelled += delta.length();
                let is_click = press.travelled < CLICK_SLOP;

                match press.card {
                    Some(id) => {
                        simulator.drag_move(id, delta);
                        simulator.drag_stop(id);

                        if is_click {
                            simulator.click(id);
                            match simulator.focused_content() {
                                Some(content) => info!("Focused {} \"{}\"", id, content.title),
                                None => info!("Unfocused {}", id),
                            }
                        } else {
                            debug!("Dropped {} after {:.0}px", id, press.travelled);
                        }
                    }
                    None => {
                        if is_click && simulator.focused_id().is_some() {
                            simulator.dim_click();
                            info!("Backdrop clicked - focus cleared");
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::test_support::simulator_with;
    use crate::visual::cards::focused_display_rect;

    const SIZE: Vec2 = Vec2::new(100.0, 100.0);

    #[test]
    fn test_topmost_card_is_hit() {
        // Card 1 is above card 0 where they overlap
        let (simulator, sizes) = simulator_with(&[
            (Vec2::new(0.0, 0.0), SIZE),
            (Vec2::new(50.0, 50.0), SIZE),
        ]);
        let hit = |p: Vec2| card_under_pointer(&simulator, &sizes, p);
        assert_eq!(hit(Vec2::new(75.0, 75.0)), Some(CardId(1)));
        assert_eq!(hit(Vec2::new(10.0, 10.0)), Some(CardId(0)));
        assert_eq!(hit(Vec2::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_raised_card_wins() {
        let (mut simulator, sizes) = simulator_with(&[
            (Vec2::new(0.0, 0.0), SIZE),
            (Vec2::new(50.0, 50.0), SIZE),
        ]);
        simulator.bring_to_front(CardId(0));

        assert_eq!(
            card_under_pointer(&simulator, &sizes, Vec2::new(75.0, 75.0)),
            Some(CardId(0))
        );
    }

    #[test]
    fn test_only_focused_card_is_hit_while_focused() {
        let (mut simulator, mut layout) = simulator_with(&[
            (Vec2::new(0.0, 0.0), SIZE),
            (Vec2::new(600.0, 600.0), SIZE),
        ]);
        let viewport = Viewport::new(1000.0, 1000.0);
        simulator.set_focused(Some(CardId(1)));
        let drawn = focused_display_rect(SIZE, &viewport);
        layout.set_displaced(CardId(1), drawn);

        // Card 0's resting spot is behind the backdrop
        assert_eq!(
            card_under_pointer(&simulator, &layout, Vec2::new(10.0, 10.0)),
            None
        );

        // Card 1's own resting spot is empty too
        assert_eq!(
            card_under_pointer(&simulator, &layout, Vec2::new(650.0, 650.0)),
            None
        );

        // Card 1 is drawn centered left of the sidebar
        assert_eq!(
            card_under_pointer(&simulator, &layout, drawn.center()),
            Some(CardId(1))
        );
    }

    #[test]
    fn test_sidebar_region() {
        let viewport = Viewport::new(1000.0, 600.0);
        assert!(in_sidebar(Vec2::new(950.0, 10.0), &viewport));
        assert!(!in_sidebar(Vec2::new(100.0, 10.0), &viewport));
    }
}
