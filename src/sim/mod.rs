//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (`consts::SIM_HZ`)
//! - Seeded RNG only
//! - Fixed update order within a tick
//! - No rendering or platform dependencies

pub mod body;
pub mod boss;
pub mod clock;
pub mod collision;
pub mod enemy;
pub mod level;
pub mod platform;
pub mod player;
pub mod state;
pub mod tick;

pub use body::{Body, Rect};
pub use boss::{Boss, BossPhase};
pub use clock::FixedStepClock;
pub use collision::{Contact, aabb_overlap, classify_contact, overlap_extent, resolve_collisions};
pub use enemy::{Enemy, EnemyKind};
pub use level::{BossSpawn, EnemySpawn, FruitSpawn, LevelConfig, PlatformDesc};
pub use platform::{Oscillation, Platform, PlatformKind, PlatformSet};
pub use player::{Direction, Facing, Player};
pub use state::{
    EventSink, Fruit, FruitTier, GameEvent, GameState, HudSnapshot, Particle, ParticleKind,
    SessionPhase,
};
pub use tick::{TickInput, tick};
