//! Two-phase boss
//!
//! Phase one throws nets on a timer (a telegraph event for the renderer).
//! At half health the boss enters phase two for good: the attack timer
//! shortens and each attack becomes a charge out to one side of its home
//! position and back.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::platform::PlatformSet;
use super::state::{EventSink, GameEvent};
use crate::consts::*;

/// Boss behavior mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossPhase {
    /// Ranged net throws
    One,
    /// Charges
    Two,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub body: Body,
    pub health: i32,
    pub phase: BossPhase,
    /// Frames since the last attack
    pub attack_timer: u32,
    /// Frames between attacks (shrinks in phase two)
    pub attack_cooldown: u32,
    pub charging: bool,
    /// -1.0 or 1.0
    pub charge_direction: f32,
    /// Set once the current charge has turned around
    charge_returning: bool,
    /// Charge pivot X (immutable)
    pub home_x: f32,
    pub defeated: bool,
}

impl Boss {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, BOSS_WIDTH, BOSS_HEIGHT),
            health: BOSS_MAX_HEALTH,
            phase: BossPhase::One,
            attack_timer: 0,
            attack_cooldown: BOSS_COOLDOWN_PHASE_ONE,
            charging: false,
            charge_direction: -1.0,
            charge_returning: false,
            home_x: x,
            defeated: false,
        }
    }

    pub fn update(&mut self, platforms: &PlatformSet, events: &mut impl EventSink) {
        if self.defeated {
            return;
        }

        self.attack_timer += 1;
        if self.charging {
            self.advance_charge();
        } else if self.attack_timer >= self.attack_cooldown {
            self.attack_timer = 0;
            self.attack(events);
        }

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

    fn attack(&mut self, events: &mut impl EventSink) {
        match self.phase {
            BossPhase::One => {
                events.emit(GameEvent::BossRangedAttack {
                    origin: self.body.center(),
                });
            }
            BossPhase::Two => {
                self.charging = true;
                self.charge_returning = false;
                // Head for the far side of home
                self.charge_direction = if self.body.pos.x >= self.home_x {
                    -1.0
                } else {
                    1.0
                };
                events.emit(GameEvent::BossChargeStarted {
                    direction: self.charge_direction,
                });
            }
        }
    }

    fn advance_charge(&mut self) {
        self.body.vel.x = self.charge_direction * BOSS_CHARGE_SPEED;
        self.body.pos.x += self.body.vel.x;
        let offset = self.body.pos.x - self.home_x;

        if !self.charge_returning {
            if offset.abs() >= BOSS_CHARGE_REACH {
                self.body.pos.x = self.home_x + BOSS_CHARGE_REACH.copysign(offset);
                self.charge_direction = -self.charge_direction;
                self.charge_returning = true;
            }
        } else if offset.abs() < BOSS_CHARGE_SETTLE
            || offset.signum() == self.charge_direction.signum()
        {
            self.body.pos.x = self.home_x;
            self.body.vel.x = 0.0;
            self.charging = false;
        }
    }

    /// One successful stomp. Returns false if the boss was already down.
    pub fn take_hit(&mut self, events: &mut impl EventSink) -> bool {
        if self.defeated {
            return false;
        }
        self.health -= 1;
        events.emit(GameEvent::BossHit {
            health: self.health.max(0),
        });

        if self.phase == BossPhase::One && self.health <= BOSS_MAX_HEALTH / 2 {
            self.phase = BossPhase::Two;
            self.attack_cooldown = BOSS_COOLDOWN_PHASE_TWO;
            self.attack_timer = 0;
            log::info!("Boss enters phase two at health {}", self.health);
            events.emit(GameEvent::BossPhaseChanged { phase: self.phase });
        }

        if self.health <= 0 {
            self.defeated = true;
            self.charging = false;
            self.body.vel = glam::Vec2::ZERO;
            events.emit(GameEvent::BossDefeated);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Rect;
    use crate::sim::platform::{Platform, PlatformKind};

    const FLOOR_Y: f32 = 500.0;

    fn arena() -> PlatformSet {
        PlatformSet::new(vec![Platform::new(
            Rect::new(0.0, FLOOR_Y, 2000.0, 60.0),
            PlatformKind::ArenaFloor,
        )])
    }

    fn boss() -> Boss {
        Boss::new(1000.0, FLOOR_Y - BOSS_HEIGHT)
    }

    #[test]
    fn test_phase_one_throws_on_cooldown() {
        let set = arena();
        let mut b = boss();
        let mut events = Vec::new();
        for _ in 0..BOSS_COOLDOWN_PHASE_ONE * 3 {
            b.update(&set, &mut events);
        }
        let throws = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BossRangedAttack { .. }))
            .count();
        assert_eq!(throws, 3);
        assert!(!b.charging);
        assert_eq!(b.body.bottom(), FLOOR_Y);
    }

    #[test]
    fn test_half_health_enters_phase_two() {
        let set = arena();
        let mut b = boss();
        b.health = 4;
        b.attack_timer = 100;
        let mut events = Vec::new();
        assert!(b.take_hit(&mut events));
        assert_eq!(b.health, 3);
        assert_eq!(b.phase, BossPhase::Two);
        assert_eq!(b.attack_cooldown, BOSS_COOLDOWN_PHASE_TWO);
        assert!(BOSS_COOLDOWN_PHASE_TWO < BOSS_COOLDOWN_PHASE_ONE);
        assert_eq!(b.attack_timer, 0);

        events.clear();
        for _ in 0..1000 {
            b.update(&set, &mut events);
        }
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::BossRangedAttack { .. }))
        );
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::BossChargeStarted { .. }))
        );
    }

    #[test]
    fn test_phase_never_reverts() {
        let mut b = boss();
        let mut events = Vec::new();
        b.take_hit(&mut events);
        b.take_hit(&mut events);
        b.take_hit(&mut events);
        assert_eq!(b.phase, BossPhase::Two);
        // Even if something restored health, phase stays
        b.health = BOSS_MAX_HEALTH;
        b.take_hit(&mut events);
        assert_eq!(b.phase, BossPhase::Two);
        let changes = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BossPhaseChanged { .. }))
            .count();
        assert_eq!(changes, 1);
    }

    #[test]
    fn test_charge_goes_out_and_returns_home() {
        let set = arena();
        let mut b = boss();
        b.phase = BossPhase::Two;
        b.attack_cooldown = BOSS_COOLDOWN_PHASE_TWO;
        b.attack_timer = BOSS_COOLDOWN_PHASE_TWO - 1;
        let mut events = Vec::new();
        b.update(&set, &mut events);
        assert!(b.charging);
        assert_eq!(b.charge_direction, -1.0);

        let mut furthest = 0.0f32;
        let mut frames = 0;
        while b.charging && frames < 200 {
            b.update(&set, &mut events);
            furthest = furthest.max((b.body.pos.x - b.home_x).abs());
            frames += 1;
        }
        assert!(!b.charging);
        assert_eq!(furthest, BOSS_CHARGE_REACH);
        assert_eq!(b.body.pos.x, b.home_x);
    }

    #[test]
    fn test_attack_timer_runs_during_charge() {
        let set = arena();
        let mut b = boss();
        b.phase = BossPhase::Two;
        b.attack_cooldown = BOSS_COOLDOWN_PHASE_TWO;
        b.attack_timer = BOSS_COOLDOWN_PHASE_TWO - 1;
        let mut events = Vec::new();
        b.update(&set, &mut events);
        assert!(b.charging);
        assert_eq!(b.attack_timer, 0);

        let mut frames = 0;
        while b.charging {
            b.update(&set, &mut events);
            frames += 1;
        }
        assert_eq!(b.attack_timer, frames);

        // Charges start one cooldown apart
        events.clear();
        let mut starts = Vec::new();
        for frame in 1..=BOSS_COOLDOWN_PHASE_TWO * 3 {
            b.update(&set, &mut events);
            if events
                .drain(..)
                .any(|e| matches!(e, GameEvent::BossChargeStarted { .. }))
            {
                starts.push(frame + frames);
            }
        }
        assert_eq!(
            starts,
            vec![
                BOSS_COOLDOWN_PHASE_TWO,
                BOSS_COOLDOWN_PHASE_TWO * 2,
                BOSS_COOLDOWN_PHASE_TWO * 3
            ]
        );
    }

    #[test]
    fn test_defeat_is_terminal() {
        let set = arena();
        let mut b = boss();
        let mut events = Vec::new();
        for _ in 0..BOSS_MAX_HEALTH {
            assert!(b.take_hit(&mut events));
        }
        assert!(b.defeated);
        assert!(events.contains(&GameEvent::BossDefeated));
        assert!(!b.take_hit(&mut events));
        assert_eq!(b.health, 0);

        let before = b.body.pos;
        events.clear();
        for _ in 0..500 {
            b.update(&set, &mut events);
        }
        assert_eq!(b.body.pos, before);
        assert!(events.is_empty());
    }
}
