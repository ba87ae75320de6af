//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Step order
//! matters: platforms move before anything rides them, and every actor has
//! moved before collisions are resolved.

use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::player::Direction;
use super::state::{GameState, SessionPhase};

/// Held input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump button held (press edges are detected by the player)
    pub jump: bool,
}

impl TickInput {
    /// Opposing or absent directions resolve to no intent
    pub fn direction(&self) -> Option<Direction> {
        match (self.left, self.right) {
            (true, false) => Some(Direction::Left),
            (false, true) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Terminal screens keep rendering but nothing moves
    if state.phase().is_terminal() {
        return;
    }

    state.frame += 1;

    state.platforms.update();

    state.player.update(
        input.direction(),
        input.jump,
        &state.platforms,
        state.level_width,
        &mut state.events,
    );

    for enemy in &mut state.enemies {
        enemy.update(&state.platforms);
    }
    if let Some(boss) = state.boss.as_mut() {
        boss.update(&state.platforms, &mut state.events);
    }

    resolve_collisions(state);

    state.update_camera();
    state.update_particles();

    if state.player.lives == 0 && state.phase() == SessionPhase::Playing {
        state.transition(SessionPhase::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::consts::*;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use crate::sim::level::LevelConfig;
    use crate::sim::state::GameEvent;
    use glam::Vec2;

    fn run(state: &mut GameState, input: TickInput, frames: u32) {
        for _ in 0..frames {
            tick(state, &input);
        }
    }

    #[test]
    fn test_direction_resolution() {
        let both = TickInput {
            left: true,
            right: true,
            jump: false,
        };
        assert_eq!(both.direction(), None);
        assert_eq!(TickInput::default().direction(), None);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        assert_eq!(left.direction(), Some(Direction::Left));
    }

    #[test]
    fn test_player_runs_and_camera_follows() {
        let mut state = GameState::new(&LevelConfig::empty(), 1, &Settings::default());
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        run(&mut state, right, 240);
        assert!(state.player.grounded);
        assert!(state.player.body.pos.x > 500.0);
        assert_eq!(state.camera_x, state.player.body.pos.x - state.camera_lead);
        assert_eq!(state.frame, 240);
    }

    #[test]
    fn test_running_out_of_lives_ends_game() {
        let mut state = GameState::new(&LevelConfig::empty(), 1, &Settings::default());
        state.player.lives = 1;
        state.player.body.pos.y = FALL_DEATH_Y + 50.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase(), SessionPhase::GameOver);
        assert!(state.events.contains(&GameEvent::LivesExhausted));
        assert!(state.events.contains(&GameEvent::PhaseChanged {
            phase: SessionPhase::GameOver
        }));

        // Frozen from here on
        let frame = state.frame;
        let pos = state.player.body.pos;
        run(&mut state, TickInput::default(), 10);
        assert_eq!(state.frame, frame);
        assert_eq!(state.player.body.pos, pos);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_enemy_walks_into_player() {
        let mut state = GameState::new(&LevelConfig::empty(), 1, &Settings::default());
        let floor = 560.0;
        let px = state.player.body.pos.x;
        let id = state.next_entity_id();
        let mut enemy = Enemy::new(id, EnemyKind::Patrol, px + 60.0, floor - ENEMY_HEIGHT);
        enemy.direction = -1.0;
        state.enemies.push(enemy);

        run(&mut state, TickInput::default(), 60);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH - 1);
        assert!(state.player.is_invulnerable());
    }

    #[test]
    fn test_falling_onto_enemy_defeats_it() {
        let mut state = GameState::new(&LevelConfig::empty(), 3, &Settings::default());
        let floor = 560.0;
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, EnemyKind::Basic, 400.0, floor - ENEMY_HEIGHT));
        state.player.body.pos = Vec2::new(400.0, 400.0);

        let mut stomped = false;
        for _ in 0..40 {
            tick(&mut state, &TickInput::default());
            stomped |= state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::EnemyDefeated { .. }));
        }
        assert!(stomped);
        assert!(state.enemies[0].defeated);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert!(state.score >= ENEMY_SCORE_BASIC);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let level = LevelConfig::default();
        let settings = Settings::default();
        let mut a = GameState::new(&level, 99999, &settings);
        let mut b = GameState::new(&level, 99999, &settings);

        for frame in 0..600u32 {
            let input = TickInput {
                right: frame % 200 < 150,
                left: frame % 200 >= 180,
                jump: frame % 45 < 12,
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.frame, b.frame);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.body.pos, b.player.body.pos);
        assert_eq!(a.particles.len(), b.particles.len());
        assert_eq!(a.hud(), b.hud());
    }

    #[test]
    fn test_victory_freezes_world() {
        let mut level = LevelConfig::empty();
        level.boss = Some(crate::sim::level::BossSpawn {
            x: 400.0,
            y: 560.0 - BOSS_HEIGHT,
        });
        let mut state = GameState::new(&level, 5, &Settings::default());
        if let Some(boss) = state.boss.as_mut() {
            boss.health = 1;
        }
        state.player.body.pos = Vec2::new(420.0, 560.0 - BOSS_HEIGHT - PLAYER_HEIGHT - 2.0);
        state.player.body.vel = Vec2::new(0.0, 3.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase(), SessionPhase::Victory);

        let frame = state.frame;
        run(&mut state, TickInput::default(), 30);
        assert_eq!(state.frame, frame);
        assert_eq!(state.hud().phase, SessionPhase::Victory);
    }
}
