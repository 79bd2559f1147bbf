//! Classic grid Snake on Bevy.
//!
//! [`game::GameState`] holds the rules; the plugins steer it from the
//! keyboard, tick it on a fixed timer, and draw it.

pub mod apple;
pub mod game;
pub mod rendering;
pub mod snake;
pub mod ui;

use bevy::prelude::*;
use bevy_vector_shapes::Shape2dPlugin;

use apple::ApplePlugin;
use game::{
    AppleEaten, BACKGROUND_COLOR, CameraShake, GameOver, GameRestarted, GameState, InputBuffer,
    MoveTimer, SnakeMoved,
};
use rendering::RenderingPlugin;
use snake::SnakePlugin;
use ui::UiPlugin;

/// Everything the game needs on top of Bevy's default plugins.
pub struct SnakeGamePlugin;

impl Plugin for SnakeGamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            Shape2dPlugin::default(),
            SnakePlugin,
            ApplePlugin,
            RenderingPlugin,
            UiPlugin,
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .init_resource::<GameState>()
        .init_resource::<InputBuffer>()
        .init_resource::<MoveTimer>()
        .init_resource::<CameraShake>()
        .add_message::<SnakeMoved>()
        .add_message::<AppleEaten>()
        .add_message::<GameOver>()
        .add_message::<GameRestarted>();
    }
}
