use bevy::{
    log::{Level, LogPlugin},
    prelude::*,
    window::WindowResolution,
};

use snake_arcade::SnakeGamePlugin;
use snake_arcade::game::{ARENA_HEIGHT, ARENA_WIDTH, CELL_SIZE};

fn main() -> AppExit {
    App::new()
        .add_plugins((
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        resolution: WindowResolution::new(
                            (ARENA_WIDTH as f32 * CELL_SIZE) as u32,
                            (ARENA_HEIGHT as f32 * CELL_SIZE) as u32,
                        ),
                        title: "Snake".to_string(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: Level::INFO,
                    filter: "wgpu=error,naga=warn".to_string(),
                    ..default()
                }),
            SnakeGamePlugin,
        ))
        .run()
}
