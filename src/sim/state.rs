//! Game state and core simulation types
//!
//! `GameState` owns every actor and collection for the whole session. The
//! renderer and HUD only ever read from it between ticks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Rect;
use super::boss::Boss;
use super::enemy::Enemy;
use super::level::LevelConfig;
use super::platform::PlatformSet;
use super::player::Player;
use crate::Settings;
use crate::consts::*;

/// Session phase. `Victory` and `GameOver` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Playing,
    /// Boss defeated
    Victory,
    /// Out of lives
    GameOver,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionPhase::Playing)
    }

    /// Only `Playing` may move, and only to a terminal phase
    pub fn can_transition_to(self, next: SessionPhase) -> bool {
        matches!(
            (self, next),
            (SessionPhase::Playing, SessionPhase::Victory)
                | (SessionPhase::Playing, SessionPhase::GameOver)
        )
    }
}

/// Something that happened during a tick, for audio/effects/HUD collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    FruitCollected { tier: FruitTier, pos: Vec2 },
    BonusFruitDropped { tier: FruitTier, pos: Vec2 },
    EnemyDefeated { id: u32, pos: Vec2 },
    PlayerDamaged { health: u8 },
    PlayerDied { lives_left: u8 },
    PlayerRespawned,
    LivesExhausted,
    /// Phase one telegraph; purely visual
    BossRangedAttack { origin: Vec2 },
    BossChargeStarted { direction: f32 },
    BossPhaseChanged { phase: super::boss::BossPhase },
    BossHit { health: i32 },
    BossDefeated,
    PhaseChanged { phase: SessionPhase },
}

/// Receiver for session-level events raised by actors
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        log::debug!("event: {:?}", event);
        self.push(event);
    }
}

/// Fruit rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FruitTier {
    #[default]
    Common,
    Rare,
}

impl FruitTier {
    pub fn score(self) -> u64 {
        match self {
            FruitTier::Common => FRUIT_SCORE_COMMON,
            FruitTier::Rare => FRUIT_SCORE_RARE,
        }
    }
}

/// A collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fruit {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub tier: FruitTier,
}

impl Fruit {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Particle look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Pickup,
    Defeat,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames remaining; pruned at 0
    pub life: u32,
    pub kind: ParticleKind,
}

/// Read-only HUD view, polled once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u8,
    pub health: u8,
    pub collected: u32,
    pub total: u32,
    pub phase: SessionPhase,
    pub boss_health: Option<i32>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Shared RNG for drops and particle spray
    pub rng: Pcg32,
    /// Simulation tick counter
    pub frame: u64,
    phase: SessionPhase,
    pub score: u64,
    /// Fruit picked up so far
    pub collected: u32,
    /// Fruit that exists in the level, including bonus drops
    pub total_fruit: u32,
    pub level_width: f32,
    pub platforms: PlatformSet,
    pub player: Player,
    /// Defeated enemies stay for stable indexing
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    /// Uncollected fruit
    pub fruits: Vec<Fruit>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub camera_x: f32,
    pub camera_lead: f32,
    pub max_particles: usize,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build a fresh session from a level description
    pub fn new(level: &LevelConfig, seed: u64, settings: &Settings) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            phase: SessionPhase::Playing,
            score: 0,
            collected: 0,
            total_fruit: 0,
            level_width: level.width,
            platforms: level.platform_set(),
            player: Player::new(level.spawn),
            enemies: Vec::new(),
            boss: level.boss.map(|b| Boss::new(b.x, b.y)),
            fruits: Vec::new(),
            particles: Vec::new(),
            camera_x: 0.0,
            camera_lead: settings.camera_lead,
            max_particles: settings.max_particles(),
            events: Vec::new(),
            next_id: 1,
        };

        for spawn in &level.enemies {
            let id = state.next_entity_id();
            state.enemies.push(Enemy::new(id, spawn.kind, spawn.x, spawn.y));
        }
        for spawn in &level.fruits {
            state.add_fruit(Vec2::new(spawn.x, spawn.y), spawn.tier);
        }
        state.update_camera();

        log::info!(
            "Level ready: width={}, platforms={}, enemies={}, fruit={}, boss={}",
            state.level_width,
            state.platforms.len(),
            state.enemies.len(),
            state.total_fruit,
            state.boss.is_some()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Move to `next` if allowed. Returns whether the phase changed.
    pub fn transition(&mut self, next: SessionPhase) -> bool {
        if !self.phase.can_transition_to(next) {
            log::warn!("Refusing phase change {:?} -> {:?}", self.phase, next);
            return false;
        }
        log::info!("Session {:?} -> {:?} (score {})", self.phase, next, self.score);
        self.phase = next;
        self.events.emit(GameEvent::PhaseChanged { phase: next });
        true
    }

    /// Add a fruit to the active set and count it toward the total
    pub fn add_fruit(&mut self, pos: Vec2, tier: FruitTier) {
        let id = self.next_entity_id();
        self.fruits.push(Fruit {
            id,
            pos,
            size: Vec2::splat(FRUIT_SIZE),
            tier,
        });
        self.total_fruit += 1;
    }

    /// Spray `count` particles out of `at`, up to the particle budget
    pub fn spawn_particles(&mut self, kind: ParticleKind, at: Vec2, count: usize) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(1.0..4.0);
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: PARTICLE_LIFE,
                kind,
            });
        }
    }

    /// Move particles and drop expired ones
    pub fn update_particles(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel.y += PARTICLE_GRAVITY;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    /// Follow the player with a fixed lead, clamped to the level
    pub fn update_camera(&mut self) {
        let max_x = (self.level_width - VIEWPORT_WIDTH).max(0.0);
        self.camera_x = (self.player.body.pos.x - self.camera_lead).clamp(0.0, max_x);
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            lives: self.player.lives,
            health: self.player.health,
            collected: self.collected,
            total: self.total_fruit,
            phase: self.phase,
            boss_health: self.boss.as_ref().map(|b| b.health.max(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::LevelConfig;

    fn empty_state() -> GameState {
        GameState::new(&LevelConfig::empty(), 7, &Settings::default())
    }

    #[test]
    fn test_phase_transitions_are_one_way() {
        assert!(SessionPhase::Playing.can_transition_to(SessionPhase::Victory));
        assert!(SessionPhase::Playing.can_transition_to(SessionPhase::GameOver));
        assert!(!SessionPhase::Victory.can_transition_to(SessionPhase::Playing));
        assert!(!SessionPhase::GameOver.can_transition_to(SessionPhase::Victory));
        assert!(!SessionPhase::Playing.can_transition_to(SessionPhase::Playing));

        let mut state = empty_state();
        assert!(state.transition(SessionPhase::GameOver));
        assert!(!state.transition(SessionPhase::Victory));
        assert!(!state.transition(SessionPhase::Playing));
        assert_eq!(state.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn test_level_setup_counts_fruit() {
        let state = GameState::new(&LevelConfig::default(), 1, &Settings::default());
        assert_eq!(state.total_fruit as usize, state.fruits.len());
        assert!(state.total_fruit > 0);
        assert!(!state.enemies.is_empty());
        assert!(state.boss.is_some());
        assert_eq!(state.collected, 0);
        assert_eq!(state.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = empty_state();
        state.spawn_particles(ParticleKind::Pickup, Vec2::new(10.0, 10.0), PICKUP_PARTICLES);
        assert_eq!(state.particles.len(), PICKUP_PARTICLES);
        for _ in 0..PARTICLE_LIFE - 1 {
            state.update_particles();
        }
        assert_eq!(state.particles.len(), PICKUP_PARTICLES);
        state.update_particles();
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particle_budget() {
        let mut settings = Settings::default();
        settings.particles = false;
        let mut state = GameState::new(&LevelConfig::empty(), 7, &settings);
        state.spawn_particles(ParticleKind::Defeat, Vec2::ZERO, 50);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_camera_clamps() {
        let mut state = empty_state();
        state.player.body.pos.x = 0.0;
        state.update_camera();
        assert_eq!(state.camera_x, 0.0);

        state.player.body.pos.x = 1000.0;
        state.update_camera();
        assert_eq!(state.camera_x, 1000.0 - state.camera_lead);

        state.player.body.pos.x = state.level_width;
        state.update_camera();
        assert_eq!(state.camera_x, state.level_width - VIEWPORT_WIDTH);
    }

    #[test]
    fn test_hud_snapshot() {
        let state = empty_state();
        let hud = state.hud();
        assert_eq!(hud.lives, PLAYER_START_LIVES);
        assert_eq!(hud.health, PLAYER_MAX_HEALTH);
        assert_eq!(hud.phase, SessionPhase::Playing);
        assert_eq!(hud.boss_health, None);
        let json = serde_json::to_string(&hud).unwrap();
        assert!(json.contains("\"phase\":\"playing\""));
    }
}
