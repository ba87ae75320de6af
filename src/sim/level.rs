//! Static level descriptions
//!
//! A level is consumed once by `GameState::new` and never reloaded. Levels
//! can come from JSON or from the built-in forest layout.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Rect;
use super::enemy::EnemyKind;
use super::platform::{Oscillation, Platform, PlatformKind, PlatformSet};
use super::state::FruitTier;
use crate::consts::*;

/// One platform: rectangle plus surface type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDesc {
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub kind: PlatformKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    #[serde(default)]
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FruitSpawn {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub tier: FruitTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossSpawn {
    pub x: f32,
    pub y: f32,
}

/// Everything needed to set up a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    /// Player spawn (top-left)
    pub spawn: Vec2,
    pub platforms: Vec<PlatformDesc>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub fruits: Vec<FruitSpawn>,
    #[serde(default)]
    pub boss: Option<BossSpawn>,
}

fn default_width() -> f32 {
    DEFAULT_LEVEL_WIDTH
}

const GROUND_Y: f32 = 560.0;
const GROUND_H: f32 = 40.0;

fn platform(x: f32, y: f32, width: f32, height: f32, kind: PlatformKind) -> PlatformDesc {
    PlatformDesc {
        rect: Rect::new(x, y, width, height),
        kind,
    }
}

fn fruit(x: f32, y: f32) -> FruitSpawn {
    FruitSpawn {
        x,
        y,
        tier: FruitTier::Common,
    }
}

impl Default for LevelConfig {
    /// The forest level: broken ground, ledges, a log bridge, one moving
    /// platform and the boss arena at the far end
    fn default() -> Self {
        let mover_x = 1480.0;
        Self {
            width: DEFAULT_LEVEL_WIDTH,
            spawn: Vec2::new(80.0, GROUND_Y - PLAYER_HEIGHT),
            platforms: vec![
                platform(0.0, GROUND_Y, 900.0, GROUND_H, PlatformKind::Soft),
                platform(1000.0, GROUND_Y, 420.0, GROUND_H, PlatformKind::Soft),
                platform(1760.0, GROUND_Y, 700.0, GROUND_H, PlatformKind::Soft),
                platform(300.0, 440.0, 160.0, 24.0, PlatformKind::Rigid),
                platform(560.0, 360.0, 140.0, 24.0, PlatformKind::Rigid),
                platform(880.0, 470.0, 160.0, 20.0, PlatformKind::Log),
                platform(1180.0, 420.0, 180.0, 24.0, PlatformKind::Soft),
                platform(
                    mover_x,
                    480.0,
                    120.0,
                    20.0,
                    PlatformKind::Oscillating(Oscillation {
                        home_x: mover_x,
                        range: 100.0,
                        speed: 2.0,
                    }),
                ),
                platform(1900.0, 430.0, 200.0, 24.0, PlatformKind::Rigid),
                platform(2200.0, 340.0, 160.0, 24.0, PlatformKind::Soft),
                platform(2560.0, GROUND_Y, 640.0, GROUND_H, PlatformKind::ArenaFloor),
            ],
            enemies: vec![
                EnemySpawn {
                    kind: EnemyKind::Basic,
                    x: 600.0,
                    y: GROUND_Y - ENEMY_HEIGHT,
                },
                EnemySpawn {
                    kind: EnemyKind::Basic,
                    x: 340.0,
                    y: 440.0 - ENEMY_HEIGHT,
                },
                EnemySpawn {
                    kind: EnemyKind::Patrol,
                    x: 1200.0,
                    y: GROUND_Y - ENEMY_HEIGHT,
                },
                EnemySpawn {
                    kind: EnemyKind::Basic,
                    x: 1960.0,
                    y: 430.0 - ENEMY_HEIGHT,
                },
                EnemySpawn {
                    kind: EnemyKind::Patrol,
                    x: 2100.0,
                    y: GROUND_Y - ENEMY_HEIGHT,
                },
            ],
            fruits: vec![
                fruit(200.0, 500.0),
                fruit(360.0, 380.0),
                fruit(610.0, 300.0),
                FruitSpawn {
                    x: 930.0,
                    y: 400.0,
                    tier: FruitTier::Rare,
                },
                fruit(1250.0, 360.0),
                fruit(1530.0, 420.0),
                fruit(1990.0, 370.0),
                FruitSpawn {
                    x: 2270.0,
                    y: 280.0,
                    tier: FruitTier::Rare,
                },
                fruit(2400.0, 500.0),
            ],
            boss: Some(BossSpawn {
                x: 2900.0,
                y: GROUND_Y - BOSS_HEIGHT,
            }),
        }
    }
}

impl LevelConfig {
    /// A flat floor spanning the default width, nothing else
    pub fn empty() -> Self {
        Self {
            width: DEFAULT_LEVEL_WIDTH,
            spawn: Vec2::new(80.0, GROUND_Y - PLAYER_HEIGHT),
            platforms: vec![platform(
                0.0,
                GROUND_Y,
                DEFAULT_LEVEL_WIDTH,
                GROUND_H,
                PlatformKind::Soft,
            )],
            enemies: Vec::new(),
            fruits: Vec::new(),
            boss: None,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn platform_set(&self) -> PlatformSet {
        PlatformSet::new(
            self.platforms
                .iter()
                .map(|desc| Platform::new(desc.rect, desc.kind))
                .collect(),
        )
    }
}
