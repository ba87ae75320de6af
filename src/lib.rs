//! Grove Dash - a 2D side-scrolling platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, AI, collisions, session state)
//! - `settings`: Player-facing preferences (particle budget, camera)

pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// Every timer and velocity below is expressed per simulation step at
/// `SIM_HZ`. A variable-timestep host must scale them by elapsed time.
pub mod consts {
    /// Simulation rate (steps per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// World / camera
    pub const DEFAULT_LEVEL_WIDTH: f32 = 3200.0;
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    /// Camera keeps the player this far from the left edge of the view
    pub const CAMERA_LEAD: f32 = 260.0;
    /// Falling below this Y is fatal
    pub const FALL_DEATH_Y: f32 = 700.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 36.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_MAX_HEALTH: u8 = 3;
    pub const PLAYER_START_LIVES: u8 = 3;

    /// Player horizontal motion (px/step, px/step²)
    pub const RUN_ACCEL: f32 = 0.5;
    pub const MAX_RUN_SPEED: f32 = 5.0;
    pub const GROUND_FRICTION: f32 = 0.75;
    pub const AIR_FRICTION: f32 = 0.95;
    /// Below this |vx| the player snaps to rest
    pub const VELOCITY_EPSILON: f32 = 0.1;

    /// Vertical motion (+y is down)
    pub const GRAVITY: f32 = 0.5;
    /// Kept under STOMP_ZONE_FRACTION * ENEMY_HEIGHT so one step of falling
    /// cannot skip past an enemy's head zone
    pub const MAX_FALL_SPEED: f32 = 9.0;
    pub const JUMP_VELOCITY: f32 = -10.0;
    /// Extra lift per step while jump is held and still rising
    pub const JUMP_HOLD_BOOST: f32 = 0.2;
    /// How far below a platform top the bottom edge may start and still land
    pub const LANDING_TOLERANCE: f32 = 8.0;
    /// Vertical slack for "standing on" queries
    pub const SUPPORT_TOLERANCE: f32 = 4.0;

    /// Invulnerability windows (frames)
    pub const INVULNERABLE_FRAMES: u32 = 2 * SIM_HZ;
    pub const RESPAWN_GRACE_FRAMES: u32 = 3 * SIM_HZ;

    /// Stomp classification: player bottom must be above this fraction of
    /// the target's height, measured from its top
    pub const STOMP_ZONE_FRACTION: f32 = 0.3;
    pub const STOMP_BOUNCE_VELOCITY: f32 = -8.0;
    /// Minimum overlap on both axes before side contact hurts
    pub const ENEMY_DAMAGE_OVERLAP: f32 = 10.0;
    pub const BOSS_DAMAGE_OVERLAP: f32 = 15.0;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 36.0;
    pub const ENEMY_HEIGHT: f32 = 32.0;
    pub const BASIC_SPEED: f32 = 1.0;
    pub const BASIC_RANGE: f32 = 80.0;
    pub const PATROL_SPEED: f32 = 2.0;
    pub const PATROL_RANGE: f32 = 160.0;
    pub const BASIC_DROP_CHANCE: f64 = 0.5;
    pub const PATROL_DROP_CHANCE: f64 = 1.0;

    /// Boss
    pub const BOSS_WIDTH: f32 = 96.0;
    pub const BOSS_HEIGHT: f32 = 112.0;
    pub const BOSS_MAX_HEALTH: i32 = 6;
    pub const BOSS_COOLDOWN_PHASE_ONE: u32 = 150;
    pub const BOSS_COOLDOWN_PHASE_TWO: u32 = 90;
    pub const BOSS_CHARGE_SPEED: f32 = 6.0;
    /// Charge turns around at this distance from home
    pub const BOSS_CHARGE_REACH: f32 = 100.0;
    /// Charge ends once back within this distance of home
    pub const BOSS_CHARGE_SETTLE: f32 = 4.0;

    /// Collectibles
    pub const FRUIT_SIZE: f32 = 24.0;

    /// Scoring
    pub const FRUIT_SCORE_COMMON: u64 = 10;
    pub const FRUIT_SCORE_RARE: u64 = 50;
    pub const ENEMY_SCORE_BASIC: u64 = 100;
    pub const ENEMY_SCORE_PATROL: u64 = 200;
    pub const BOSS_HIT_SCORE: u64 = 500;
    pub const BOSS_DEFEAT_BONUS: u64 = 5000;

    /// Particles
    pub const PICKUP_PARTICLES: usize = 8;
    pub const DEFEAT_PARTICLES: usize = 12;
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_GRAVITY: f32 = 0.15;
}
