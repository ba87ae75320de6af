//! Patrolling enemies
//!
//! Enemies walk back and forth around their spawn anchor, turn around
//! before walking off the platform they stand on, and fall under gravity
//! when nothing supports them.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::platform::PlatformSet;
use crate::consts::*;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Slow, short patrol
    #[default]
    Basic,
    /// Fast, long patrol, always drops fruit
    Patrol,
}

impl EnemyKind {
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Basic => BASIC_SPEED,
            EnemyKind::Patrol => PATROL_SPEED,
        }
    }

    /// Maximum distance from the spawn anchor
    pub fn range(self) -> f32 {
        match self {
            EnemyKind::Basic => BASIC_RANGE,
            EnemyKind::Patrol => PATROL_RANGE,
        }
    }

    pub fn score(self) -> u64 {
        match self {
            EnemyKind::Basic => ENEMY_SCORE_BASIC,
            EnemyKind::Patrol => ENEMY_SCORE_PATROL,
        }
    }

    /// Probability of a bonus fruit on defeat
    pub fn drop_chance(self) -> f64 {
        match self {
            EnemyKind::Basic => BASIC_DROP_CHANCE,
            EnemyKind::Patrol => PATROL_DROP_CHANCE,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    pub kind: EnemyKind,
    /// Spawn X the patrol is centered on
    pub anchor_x: f32,
    /// -1.0 (left) or 1.0 (right)
    pub direction: f32,
    /// One-way: defeated enemies are skipped by AI, collision and drawing
    pub defeated: bool,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, x: f32, y: f32) -> Self {
        Self {
            id,
            body: Body::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
            kind,
            anchor_x: x,
            direction: 1.0,
            defeated: false,
        }
    }

    /// Mark defeated. Returns false if it already was.
    pub fn defeat(&mut self) -> bool {
        if self.defeated {
            return false;
        }
        self.defeated = true;
        self.body.vel = glam::Vec2::ZERO;
        true
    }

    pub fn update(&mut self, platforms: &PlatformSet) {
        if self.defeated {
            return;
        }

        let speed = self.kind.speed();
        let range = self.kind.range();

        let offset = self.body.pos.x - self.anchor_x;
        if offset > range {
            self.direction = -1.0;
        } else if offset < -range {
            self.direction = 1.0;
        }

        // Ledge lookahead on whatever we're standing on
        let support = platforms
            .support_under(self.body.center_x(), self.body.bottom())
            .and_then(|i| platforms.get(i));
        if let Some(platform) = support {
            let next_x = self.body.pos.x + self.direction * speed;
            let overhangs = if self.direction > 0.0 {
                next_x + self.body.size.x > platform.rect.right()
            } else {
                next_x < platform.rect.left()
            };
            if overhangs {
                self.direction = -self.direction;
            }
        }

        self.body.vel.x = self.direction * speed;
        self.body.pos.x += self.body.vel.x;

        self.body.fall(GRAVITY, MAX_FALL_SPEED);
        self.body.pos.y += self.body.vel.y;
        let rest = platforms
            .rest_surface(&self.body.rect(), self.body.vel.y)
            .and_then(|i| platforms.get(i));
        if let Some(platform) = rest {
            self.body.rest_on(platform.top());
            self.body.vel.y = 0.0;
        }
    }
}
