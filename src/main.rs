use bevy::prelude::*;

mod camera;
mod content;
mod input;
mod simulation;
mod visual;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use input::InputPlugin;

use crate::visual::plugin::FilmBoardPlugin;

fn main() {
    let mut app = App::new();

    app.insert_resource(ClearColor(Color::srgb(0.93, 0.92, 0.89)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Film Physics".into(),
                resolution: WindowResolution::new(1280, 800),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CameraPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(FilmBoardPlugin);

    app.run();
}
