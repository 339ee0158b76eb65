use crate::camera::sync_viewport;
use crate::content::{ContentLibrary, setup_content_library};
use crate::simulation::{RenderedLayout, RepulsionSimulator, TickLoop, Viewport};
use crate::visual::cards::{
    spawn_cards, sync_card_transforms, sync_focus_geometry, sync_rendered_sizes,
};
use crate::visual::interactions::{PressState, handle_pointer_input};
use crate::visual::overlay::{open_demo_link, spawn_overlay, update_overlay};
use crate::visual::physics::{
    restart_tick_on_focus_change, run_physics_tick, stop_tick_loop_on_exit,
};
use bevy::prelude::*;

pub struct FilmBoardPlugin;

impl Plugin for FilmBoardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderedLayout>()
            .init_resource::<PressState>()
            .init_resource::<TickLoop>()
            // Load films first, read the real window size, then lay out the pile
            .add_systems(
                Startup,
                (
                    setup_content_library,
                    sync_viewport,
                    setup_board,
                    spawn_cards,
                    spawn_overlay,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    // Geometry in
                    sync_rendered_sizes,
                    // Pointer -> drag / click / focus
                    handle_pointer_input,
                    open_demo_link,
                    sync_focus_geometry,
                    // Physics
                    restart_tick_on_focus_change,
                    run_physics_tick,
                    // Visual updates
                    sync_card_transforms,
                    update_overlay,
                )
                    .chain(),
            )
            .add_systems(Last, stop_tick_loop_on_exit);
    }
}

/// System: build the card pile from the film list
fn setup_board(mut commands: Commands, library: Res<ContentLibrary>, viewport: Res<Viewport>) {
    let simulator = RepulsionSimulator::from_contents(library.films(), *viewport, &mut rand::rng());

    info!(
        "Board ready: {} cards in a {}x{} viewport",
        simulator.registry().len(),
        viewport.width,
        viewport.height
    );

    commands.insert_resource(TickLoop::start(simulator.focused_id()));
    commands.insert_resource(simulator);
}
