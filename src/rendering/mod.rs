//! Rendering plugin - mirrors the snake body as segment entities, interpolates
//! them between ticks, and runs the camera effects.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use rand::prelude::*;

use crate::game::{
    CELL_SIZE, CORNER_RADIUS, CameraShake, GameOver, GameRestarted, GameState, MoveTimer,
    Position, PreviousPosition, SNAKE_EYE_COLOR, SNAKE_HEAD_COLOR, SNAKE_HEAD_GLOW_COLOR,
    SNAKE_SEGMENT_COLOR, SnakeEye, SnakeHead, SnakeMoved, SnakeSegment, TICK_INTERVAL,
    Z_SNAKE_HEAD, Z_SNAKE_SEGMENT,
};
use crate::snake::snake_tick;
use crate::ui::restart_game;

/// Plugin for rendering and visual effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                update_move_timer,
                sync_snake_segments,
                track_segment_positions,
                position_translation,
                update_head_rotation,
                trigger_camera_shake_on_game_over,
                camera_shake_system,
            )
                .chain()
                .after(snake_tick)
                .after(restart_game),
        );
    }
}

// Type alias for transform interpolation query
type TransformInterpolationQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Position,
        &'static PreviousPosition,
        &'static mut Transform,
        Has<SnakeHead>,
    ),
    With<SnakeSegment>,
>;

/// Spawns the head segment with its eyes.
fn spawn_snake_head(commands: &mut Commands, position: Position) -> Entity {
    let size = CELL_SIZE * 0.9;
    // Normalize corner radius relative to the shape size (0.0 to 1.0 range)
    let corner_radius_normalized = CORNER_RADIUS / (size / 2.0);
    let world = position.to_world();

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: SNAKE_HEAD_COLOR,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    transform: Transform::from_xyz(world.x, world.y, Z_SNAKE_HEAD),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(size),
            ),
            SnakeHead,
            SnakeSegment { index: 0 },
            position,
            PreviousPosition { pos: position },
        ))
        .with_children(|parent| {
            parent.spawn(ShapeBundle::circle(
                &ShapeConfig {
                    color: SNAKE_HEAD_GLOW_COLOR,
                    alpha_mode: ShapeAlphaMode::Add,
                    transform: Transform::from_xyz(0.0, 0.0, -0.1),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE * 0.8,
            ));

            // Eyes sit on the leading edge of a right-facing head; the head
            // rotation turns them with it.
            let eye_radius = CELL_SIZE * 0.08;
            for side in [1.0, -1.0] {
                parent.spawn((
                    ShapeBundle::circle(
                        &ShapeConfig {
                            color: SNAKE_EYE_COLOR,
                            transform: Transform::from_xyz(
                                CELL_SIZE * 0.15,
                                side * CELL_SIZE * 0.15,
                                0.1,
                            ),
                            ..ShapeConfig::default_2d()
                        },
                        eye_radius,
                    ),
                    SnakeEye,
                ));
            }
        })
        .id()
}

/// Spawns a body segment entity for `index` at the given position.
fn spawn_snake_segment(commands: &mut Commands, index: usize, position: Position) -> Entity {
    let corner_radius_normalized = CORNER_RADIUS / (CELL_SIZE / 2.0);
    let world = position.to_world();

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: SNAKE_SEGMENT_COLOR,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    transform: Transform::from_xyz(world.x, world.y, Z_SNAKE_SEGMENT),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(CELL_SIZE),
            ),
            SnakeSegment { index },
            position,
            PreviousPosition { pos: position },
        ))
        .id()
}

/// System to track elapsed time for interpolation.
fn update_move_timer(mut move_timer: ResMut<MoveTimer>, time: Res<Time>) {
    move_timer.elapsed += time.delta();
}

/// System to keep one segment entity per body cell: new tail segments appear
/// on growth and surplus ones go away on restart.
fn sync_snake_segments(
    mut commands: Commands,
    game_state: Res<GameState>,
    segments: Query<(Entity, &SnakeSegment)>,
) {
    if !game_state.is_changed() {
        return;
    }

    let body = game_state.body();
    let mut existing = 0;
    for (entity, segment) in segments.iter() {
        if segment.index < body.len() {
            existing += 1;
        } else {
            commands.entity(entity).despawn();
        }
    }

    for (index, &position) in body.iter().enumerate().skip(existing) {
        if index == 0 {
            spawn_snake_head(&mut commands, position);
        } else {
            spawn_snake_segment(&mut commands, index, position);
        }
    }
}

/// System to move segment entities to their new cells after a tick.
fn track_segment_positions(
    game_state: Res<GameState>,
    mut moved_reader: MessageReader<SnakeMoved>,
    mut restarted_reader: MessageReader<GameRestarted>,
    mut segments: Query<(&SnakeSegment, &mut Position, &mut PreviousPosition)>,
) {
    let moved = moved_reader.read().count() > 0;
    let restarted = restarted_reader.read().count() > 0;
    if !moved && !restarted {
        return;
    }

    let body = game_state.body();
    for (segment, mut position, mut prev_pos) in segments.iter_mut() {
        let Some(&cell) = body.get(segment.index) else {
            continue;
        };
        // A restart teleports the snake; don't slide it across the arena.
        prev_pos.pos = if restarted { cell } else { *position };
        *position = cell;
    }
}

/// System to interpolate segment positions for smooth movement.
fn position_translation(mut transforms: TransformInterpolationQuery, move_timer: Res<MoveTimer>) {
    // Calculate interpolation progress (0.0 to 1.0)
    let progress = (move_timer.elapsed.as_secs_f32() / TICK_INTERVAL.as_secs_f32()).min(1.0);

    for (pos, prev_pos, mut transform, is_head) in transforms.iter_mut() {
        let z = if is_head { Z_SNAKE_HEAD } else { Z_SNAKE_SEGMENT };
        let from = prev_pos.pos.to_world();
        let to = pos.to_world();
        transform.translation = from.lerp(to, progress).extend(z);
    }
}

/// System to turn the head towards the current direction.
fn update_head_rotation(
    game_state: Res<GameState>,
    mut heads: Query<&mut Transform, With<SnakeHead>>,
) {
    for mut transform in heads.iter_mut() {
        transform.rotation = Quat::from_rotation_z(game_state.direction().angle());
    }
}

/// System to trigger camera shake on game over.
fn trigger_camera_shake_on_game_over(
    mut game_over_reader: MessageReader<GameOver>,
    mut camera_shake: ResMut<CameraShake>,
) {
    if game_over_reader.read().count() > 0 {
        camera_shake.timer = Timer::from_seconds(0.5, TimerMode::Once);
        camera_shake.intensity = 8.0;
    }
}

/// System to apply camera shake effect.
fn camera_shake_system(
    time: Res<Time>,
    mut camera_shake: ResMut<CameraShake>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    if camera_shake.timer.is_finished() {
        return;
    }
    camera_shake.timer.tick(time.delta());

    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    if camera_shake.timer.is_finished() {
        camera_transform.translation.x = 0.0;
        camera_transform.translation.y = 0.0;
    } else {
        let decay = 1.0 - camera_shake.timer.fraction();

        let mut rng = rand::rng();
        let shake_x = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;
        let shake_y = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;

        camera_transform.translation.x = shake_x;
        camera_transform.translation.y = shake_y;
    }
}
