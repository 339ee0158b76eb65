use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::CursorMoved;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPos>()
            .init_resource::<ActiveTouch>()
            .add_message::<PointerEvent>()
            .add_systems(Update, (track_cursor_pos, collect_pointer_events).chain());
    }
}

#[derive(Message, Debug, Clone)]
pub struct PointerEvent {
    /// Window (logical) coordinates: pixels from top-left, y down.
    /// Same space the cards live in.
    pub position: Vec2,
    pub event_type: PointerEventType,
    pub source: PointerSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch(u64),
}

#[derive(Resource, Default, Debug, Clone, Copy)]
struct CursorPos {
    current: Option<Vec2>,
    /// Position last reported in a Move, so a still mouse sends nothing
    last_sent: Option<Vec2>,
}

/// Only one finger drags at a time; the first one down wins
#[derive(Resource, Default, Debug, Clone, Copy)]
struct ActiveTouch(Option<u64>);

fn track_cursor_pos(mut ev_cursor: MessageReader<CursorMoved>, mut pos: ResMut<CursorPos>) {
    for e in ev_cursor.read() {
        // last event wins
        pos.current = Some(e.position);
    }
}

fn collect_pointer_events(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor: ResMut<CursorPos>,
    mut active_touch: ResMut<ActiveTouch>,
    mut touch_events: MessageReader<TouchInput>,
    mut out: MessageWriter<PointerEvent>,
) {
    if let Some(p) = cursor.current {
        if mouse_buttons.just_pressed(MouseButton::Left) {
            cursor.last_sent = Some(p);
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Down,
                source: PointerSource::Mouse,
            });
        } else if mouse_buttons.pressed(MouseButton::Left) && cursor.last_sent != Some(p) {
            cursor.last_sent = Some(p);
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Move,
                source: PointerSource::Mouse,
            });
        }
        if mouse_buttons.just_released(MouseButton::Left) {
            cursor.last_sent = None;
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Up,
                source: PointerSource::Mouse,
            });
        }
    }

    for ev in touch_events.read() {
        let event_type = match ev.phase {
            TouchPhase::Started => {
                if active_touch.0.is_some() {
                    continue;
                }
                active_touch.0 = Some(ev.id);
                PointerEventType::Down
            }
            TouchPhase::Moved => PointerEventType::Move,
            TouchPhase::Ended | TouchPhase::Canceled => PointerEventType::Up,
        };
        if active_touch.0 != Some(ev.id) {
            continue;
        }
        if event_type == PointerEventType::Up {
            active_touch.0 = None;
        }
        out.write(PointerEvent {
            position: ev.position,
            event_type,
            source: PointerSource::Touch(ev.id),
        });
    }
}
