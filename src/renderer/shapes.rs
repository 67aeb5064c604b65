//! Shape generation for 2D primitives
//!
//! Turns a snapshot into an ordered list of draw commands. Backends just
//! replay the list, so everything about layout is testable here.

use glam::Vec2;

use crate::consts::{ENEMY_RADIUS, PROJECTILE_RADIUS};
use crate::sim::Snapshot;

pub const PLAYER_COLOR: &str = "#4A90E2";
pub const ENEMY_COLOR: &str = "#E74C3C";
pub const PROJECTILE_COLOR: &str = "#F1C40F";
pub const BAR_BACK_COLOR: &str = "#FF0000";
pub const BAR_FILL_COLOR: &str = "#00FF00";

/// Health bar dimensions and offset above the body centre
#[derive(Debug, Clone, Copy)]
pub struct BarStyle {
    pub width: f32,
    pub height: f32,
    pub lift: f32,
}

pub const PLAYER_BAR: BarStyle = BarStyle {
    width: 40.0,
    height: 5.0,
    lift: 30.0,
};

pub const ENEMY_BAR: BarStyle = BarStyle {
    width: 30.0,
    height: 4.0,
    lift: 25.0,
};

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: &'static str,
    },
    Rect {
        origin: Vec2,
        size: Vec2,
        color: &'static str,
    },
}

/// Background and fill rectangles for a health bar over `center`
pub fn health_bar(center: Vec2, fraction: f32, style: BarStyle) -> [DrawCommand; 2] {
    let origin = Vec2::new(center.x - style.width / 2.0, center.y - style.lift);
    [
        DrawCommand::Rect {
            origin,
            size: Vec2::new(style.width, style.height),
            color: BAR_BACK_COLOR,
        },
        DrawCommand::Rect {
            origin,
            size: Vec2::new(style.width * fraction.clamp(0.0, 1.0), style.height),
            color: BAR_FILL_COLOR,
        },
    ]
}

/// Full frame: clear, projectiles, enemies (with bars), then the player on top
pub fn frame_commands(snapshot: &Snapshot) -> Vec<DrawCommand> {
    let mut commands =
        Vec::with_capacity(1 + snapshot.projectiles.len() + snapshot.enemies.len() * 3 + 3);

    commands.push(DrawCommand::Clear {
        width: snapshot.field_width,
        height: snapshot.field_height,
    });

    for projectile in &snapshot.projectiles {
        commands.push(DrawCommand::Circle {
            center: projectile.pos,
            radius: PROJECTILE_RADIUS,
            color: PROJECTILE_COLOR,
        });
    }

    for enemy in &snapshot.enemies {
        commands.push(DrawCommand::Circle {
            center: enemy.pos,
            radius: ENEMY_RADIUS,
            color: ENEMY_COLOR,
        });
        commands.extend(health_bar(enemy.pos, enemy.health_fraction(), ENEMY_BAR));
    }

    let player = &snapshot.player;
    commands.push(DrawCommand::Circle {
        center: player.pos,
        radius: player.radius,
        color: PLAYER_COLOR,
    });
    commands.extend(health_bar(player.pos, player.health_fraction(), PLAYER_BAR));

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{IntentSet, SimulationState, TickInput, build_snapshot, fire, tick};

    #[test]
    fn test_health_bar_geometry() {
        let [back, fill] = health_bar(Vec2::new(400.0, 300.0), 0.5, PLAYER_BAR);
        assert_eq!(
            back,
            DrawCommand::Rect {
                origin: Vec2::new(380.0, 270.0),
                size: Vec2::new(40.0, 5.0),
                color: BAR_BACK_COLOR,
            }
        );
        assert_eq!(
            fill,
            DrawCommand::Rect {
                origin: Vec2::new(380.0, 270.0),
                size: Vec2::new(20.0, 5.0),
                color: BAR_FILL_COLOR,
            }
        );
    }

    #[test]
    fn test_draw_order() {
        let mut state = SimulationState::default();
        state.spawn_enemy_at(Vec2::new(100.0, 100.0));
        fire(&mut state, Some(Vec2::new(0.0, 0.0)));
        let commands = frame_commands(&build_snapshot(&state));

        // clear, 1 projectile, enemy + 2 bars, player + 2 bars
        assert_eq!(commands.len(), 8);
        assert!(matches!(commands[0], DrawCommand::Clear { width, height } if width == 800.0 && height == 600.0));
        assert!(matches!(commands[1], DrawCommand::Circle { color: PROJECTILE_COLOR, .. }));
        assert!(matches!(commands[2], DrawCommand::Circle { color: ENEMY_COLOR, .. }));
        assert!(matches!(commands[5], DrawCommand::Circle { color: PLAYER_COLOR, radius, .. } if radius == 20.0));
    }

    #[test]
    fn test_player_drawn_at_configured_radius() {
        let config = GameConfig {
            player_radius: 35.0,
            ..Default::default()
        };
        let mut state = SimulationState::new(config);
        let mut intent = IntentSet::default();
        intent.left = true;
        let input = TickInput {
            intent,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input, 16.0);
        }

        let commands = frame_commands(&build_snapshot(&state));
        let drawn = commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Circle { center, radius, color: PLAYER_COLOR } => Some((*center, *radius)),
                _ => None,
            })
            .unwrap();
        // Clamped against the wall by exactly the radius it is drawn with
        assert_eq!(drawn, (Vec2::new(35.0, 300.0), 35.0));
    }

    #[test]
    fn test_empty_bar_at_zero_health() {
        let mut state = SimulationState::default();
        state.player.take_damage(500.0);
        let commands = frame_commands(&build_snapshot(&state));
        let fill = commands.last().unwrap();
        assert!(matches!(fill, DrawCommand::Rect { size, .. } if size.x == 0.0));
    }
}
