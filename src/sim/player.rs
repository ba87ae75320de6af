//! Player controller
//!
//! Turns held input intents into acceleration-based running, a
//! variable-height jump and one-way platform landing, and owns the
//! damage / death / respawn lifecycle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::platform::PlatformSet;
use super::state::{EventSink, GameEvent};
use crate::consts::*;

/// Resolved horizontal input intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Which way the sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl From<Direction> for Facing {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Left => Facing::Left,
            Direction::Right => Facing::Right,
        }
    }
}

/// The player-controlled actor
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// 0..=PLAYER_MAX_HEALTH
    pub health: u8,
    pub lives: u8,
    /// Frames of damage immunity remaining (0 = vulnerable)
    pub invulnerable: u32,
    pub facing: Facing,
    pub grounded: bool,
    /// Grounded when the current step began
    pub was_grounded: bool,
    /// Index of the platform currently supporting the player
    pub support: Option<usize>,
    /// Jump state last step, for press edge detection
    jump_was_held: bool,
    /// Respawn location (top-left)
    pub spawn: Vec2,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn.x, spawn.y, PLAYER_WIDTH, PLAYER_HEIGHT),
            health: PLAYER_MAX_HEALTH,
            lives: PLAYER_START_LIVES,
            invulnerable: 0,
            facing: Facing::Right,
            grounded: false,
            was_grounded: false,
            support: None,
            jump_was_held: false,
            spawn,
        }
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }

    /// Renderer hint: blink while invulnerable
    pub fn is_flashing(&self) -> bool {
        self.invulnerable > 0 && (self.invulnerable / 4) % 2 == 1
    }

    /// Advance the player by one step
    pub fn update(
        &mut self,
        direction: Option<Direction>,
        jump_held: bool,
        platforms: &PlatformSet,
        level_width: f32,
        events: &mut impl EventSink,
    ) {
        self.was_grounded = self.grounded;
        if self.invulnerable > 0 {
            self.invulnerable -= 1;
        }

        self.run(direction);

        // Jump on press edge only
        let jump_pressed = jump_held && !self.jump_was_held;
        self.jump_was_held = jump_held;
        if jump_pressed && self.grounded {
            self.body.vel.y = JUMP_VELOCITY;
            self.grounded = false;
            self.support = None;
        } else if jump_held && self.body.vel.y < 0.0 {
            self.body.vel.y -= JUMP_HOLD_BOOST;
        }
        self.body.fall(GRAVITY, MAX_FALL_SPEED);

        // Integrate
        let prev_bottom = self.body.bottom();
        self.body.pos += self.body.vel;
        self.grounded = false;
        self.support = None;

        let landing = platforms
            .landing_surface(prev_bottom, &self.body.rect(), self.body.vel.y)
            .and_then(|index| platforms.get(index).map(|p| (index, p)));
        if let Some((index, platform)) = landing {
            self.body.rest_on(platform.top());
            self.body.vel.y = 0.0;
            self.grounded = true;
            self.support = Some(index);
            if platform.is_oscillating() {
                self.body.pos.x += platform.delta_x;
            }
        }

        let max_x = (level_width - self.body.size.x).max(0.0);
        if self.body.pos.x < 0.0 || self.body.pos.x > max_x {
            self.body.pos.x = self.body.pos.x.clamp(0.0, max_x);
            self.body.vel.x = 0.0;
        }

        if self.body.pos.y > FALL_DEATH_Y {
            log::debug!("Player fell out of the world at y={}", self.body.pos.y);
            self.die(events);
        }
    }

    fn run(&mut self, direction: Option<Direction>) {
        let vel = &mut self.body.vel;
        match direction {
            Some(dir) => {
                let sign = dir.sign();
                // Reversing: brake twice as hard until velocity crosses zero
                let accel = if vel.x * sign < 0.0 {
                    RUN_ACCEL * 2.0
                } else {
                    RUN_ACCEL
                };
                vel.x = (vel.x + sign * accel).clamp(-MAX_RUN_SPEED, MAX_RUN_SPEED);
                self.facing = dir.into();
            }
            None => {
                vel.x *= if self.grounded {
                    GROUND_FRICTION
                } else {
                    AIR_FRICTION
                };
                if vel.x.abs() < VELOCITY_EPSILON {
                    vel.x = 0.0;
                }
            }
        }
    }

    /// Apply one point of damage. Returns whether it landed.
    pub fn take_damage(&mut self, events: &mut impl EventSink) -> bool {
        if self.is_invulnerable() || self.lives == 0 {
            return false;
        }
        self.health = self.health.saturating_sub(1);
        self.invulnerable = INVULNERABLE_FRAMES;
        events.emit(GameEvent::PlayerDamaged {
            health: self.health,
        });
        if self.health == 0 {
            self.die(events);
        }
        true
    }

    /// Lose a life; respawn if any remain
    pub fn die(&mut self, events: &mut impl EventSink) {
        if self.lives == 0 {
            return;
        }
        self.lives -= 1;
        events.emit(GameEvent::PlayerDied {
            lives_left: self.lives,
        });
        if self.lives > 0 {
            self.respawn();
            events.emit(GameEvent::PlayerRespawned);
        } else {
            self.health = 0;
            self.body.vel = Vec2::ZERO;
            events.emit(GameEvent::LivesExhausted);
        }
    }

    fn respawn(&mut self) {
        self.body.pos = self.spawn;
        self.body.vel = Vec2::ZERO;
        self.health = PLAYER_MAX_HEALTH;
        self.invulnerable = RESPAWN_GRACE_FRAMES;
        self.grounded = false;
        self.was_grounded = false;
        self.support = None;
        self.facing = Facing::Right;
    }
}
