use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::simulation::Viewport;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, sync_viewport);
    }
}

/// 2D camera centered on the window. One world unit is one logical pixel,
/// so converting from board space is a flip and a shift:
/// ```text
///   board (0,0) ─────→ x          world   ↑ y
///     │                                   │
///     ↓ y                           ──────┼──────→ x
///                                         │
/// ```
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Board point (top-left origin, y down) to world point (center origin, y up)
pub fn board_to_world(point: Vec2, viewport: &Viewport) -> Vec2 {
    Vec2::new(
        point.x - viewport.width * 0.5,
        viewport.height * 0.5 - point.y,
    )
}

/// Keep the viewport resource in step with the primary window
pub fn sync_viewport(
    mut viewport: ResMut<Viewport>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let width = window.width();
    let height = window.height();

    // Only update if the size actually changed
    if (width - viewport.width).abs() > 0.5 || (height - viewport.height).abs() > 0.5 {
        *viewport = Viewport::new(width, height);
        debug!("Viewport updated: {}x{}", width, height);
    }
}
