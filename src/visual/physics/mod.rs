use bevy::app::AppExit;
use bevy::prelude::*;

use crate::simulation::{RenderedLayout, RepulsionSimulator, TickLoop, Viewport};

/// System: replace the frame task whenever focus moves to another card
pub fn restart_tick_on_focus_change(
    simulator: Res<RepulsionSimulator>,
    mut tick_loop: ResMut<TickLoop>,
) {
    // Torn down: stay stopped
    if tick_loop.task().is_stopped() {
        return;
    }

    let focused = simulator.focused_id();
    if !tick_loop.needs_restart(focused) {
        return;
    }

    let task = tick_loop.restart(focused);
    debug!(
        "Tick loop restarted (generation {}), skipping {:?}",
        task.generation(),
        focused
    );
}

/// Core physics system: one repulsion step per frame
pub fn run_physics_tick(
    mut simulator: ResMut<RepulsionSimulator>,
    tick_loop: Res<TickLoop>,
    sizes: Res<RenderedLayout>,
    viewport: Res<Viewport>,
) {
    let task = tick_loop.task();
    if task.is_stopped() {
        return;
    }

    let report = simulator.tick(task, &*sizes, *viewport);
    if report.conflicts > 0 {
        trace!(
            "Tick: {} integrated, {} skipped, {} pushing pairs",
            report.integrated, report.skipped, report.conflicts
        );
    }
}

/// System: stop the frame loop once the app is shutting down
pub fn stop_tick_loop_on_exit(mut exits: MessageReader<AppExit>, mut tick_loop: ResMut<TickLoop>) {
    if exits.read().next().is_none() {
        return;
    }

    tick_loop.stop();
    info!("Tick loop stopped");
}
