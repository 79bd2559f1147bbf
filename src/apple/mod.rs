//! Apple plugin - draws the apple where the rules engine placed it, with its
//! pulse and the flash left behind when it is eaten.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{
    APPLE_COLOR, APPLE_FLASH_COLOR, Apple, AppleEaten, ApplePulse, CELL_SIZE, GameState, Position,
    PulseEffect, Z_APPLE,
};

/// Plugin for apple-related systems.
pub struct ApplePlugin;

impl Plugin for ApplePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_apple).add_systems(
            Update,
            (
                follow_apple_position,
                apple_pulse_animation,
                spawn_apple_eaten_flash,
                pulse_effect_system,
            )
                .chain(),
        );
    }
}

/// Spawns the single apple entity at the current apple cell.
fn spawn_apple(mut commands: Commands, game_state: Res<GameState>) {
    let position = game_state.apple();
    let world = position.to_world();

    commands.spawn((
        ShapeBundle::circle(
            &ShapeConfig {
                color: APPLE_COLOR,
                transform: Transform::from_xyz(world.x, world.y, Z_APPLE),
                ..ShapeConfig::default_2d()
            },
            CELL_SIZE / 2.0,
        ),
        Apple,
        position,
        ApplePulse {
            timer: Timer::from_seconds(0.8, TimerMode::Repeating),
        },
    ));
}

/// System to move the apple entity when the apple is relocated.
fn follow_apple_position(
    game_state: Res<GameState>,
    mut apples: Query<(&mut Position, &mut Transform), With<Apple>>,
) {
    if !game_state.is_changed() {
        return;
    }

    for (mut position, mut transform) in apples.iter_mut() {
        if *position != game_state.apple() {
            *position = game_state.apple();
            let world = position.to_world();
            transform.translation = world.extend(Z_APPLE);
        }
    }
}

/// System to animate the apple with a pulsing effect.
fn apple_pulse_animation(
    time: Res<Time>,
    mut apples: Query<(&mut Transform, &mut ApplePulse), With<Apple>>,
) {
    for (mut transform, mut pulse) in apples.iter_mut() {
        pulse.timer.tick(time.delta());

        let progress = pulse.timer.fraction();
        let scale = 1.0 + (progress * std::f32::consts::TAU).sin() * 0.15;

        transform.scale = Vec3::splat(scale);
    }
}

/// System to spawn a flash where an apple was eaten.
fn spawn_apple_eaten_flash(
    mut commands: Commands,
    mut apple_eaten_reader: MessageReader<AppleEaten>,
) {
    for event in apple_eaten_reader.read() {
        let world = event.position.to_world();

        commands.spawn((
            ShapeBundle::circle(
                &ShapeConfig {
                    color: APPLE_FLASH_COLOR,
                    alpha_mode: ShapeAlphaMode::Add,
                    transform: Transform::from_xyz(world.x, world.y, Z_APPLE + 0.5),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE / 2.0,
            ),
            PulseEffect {
                timer: Timer::from_seconds(0.3, TimerMode::Once),
                start_scale: 1.0,
                end_scale: 2.5,
            },
        ));
    }
}

/// System to grow and then remove one-shot flashes.
fn pulse_effect_system(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut Transform, &mut PulseEffect)>,
) {
    for (entity, mut transform, mut effect) in effects.iter_mut() {
        effect.timer.tick(time.delta());

        if effect.timer.is_finished() {
            commands.entity(entity).despawn();
        } else {
            let progress = effect.timer.fraction();
            let scale = effect.start_scale + (effect.end_scale - effect.start_scale) * progress;
            transform.scale = Vec3::splat(scale);
        }
    }
}
