//! Platforms: the only surfaces bodies can stand on
//!
//! Platforms are one-way: bodies land on them from above and pass through
//! from below or the sides. Only `Oscillating` platforms move, and only in X.

use serde::{Deserialize, Serialize};

use super::body::Rect;
use super::collision::aabb_overlap;
use crate::consts::*;

/// Horizontal back-and-forth motion around a fixed home position.
///
/// The cycle is exact only when `range` is a whole multiple of `speed`;
/// otherwise the clamp at each end shifts the phase a little every lap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// Center of travel (immutable)
    pub home_x: f32,
    /// Maximum displacement from home in either direction
    pub range: f32,
    /// Signed pixels per step; flips at the range boundary
    pub speed: f32,
}

/// Platform surface types
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlatformKind {
    /// Grass and dirt ledges
    #[default]
    Soft,
    /// Stone ledges
    Rigid,
    /// Fallen log bridge
    Log,
    /// Moving platform
    Oscillating(Oscillation),
    /// Boss arena ground
    ArenaFloor,
}

/// A single platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
    /// X displacement applied during the most recent update
    #[serde(skip)]
    pub delta_x: f32,
}

impl Platform {
    pub fn new(rect: Rect, kind: PlatformKind) -> Self {
        Self {
            rect,
            kind,
            delta_x: 0.0,
        }
    }

    pub fn is_oscillating(&self) -> bool {
        matches!(self.kind, PlatformKind::Oscillating(_))
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.top()
    }

    /// Advance oscillation by one step, recording the displacement
    pub fn update(&mut self) {
        self.delta_x = 0.0;
        if let PlatformKind::Oscillating(ref mut osc) = self.kind {
            let before = self.rect.x;
            let mut x = before + osc.speed;
            let offset = x - osc.home_x;
            if offset.abs() >= osc.range {
                x = osc.home_x + osc.range.copysign(offset);
                osc.speed = -osc.speed;
            }
            self.rect.x = x;
            self.delta_x = x - before;
        }
    }
}

/// All platforms of a level, with the spatial queries actors need
#[derive(Debug, Clone, Default)]
pub struct PlatformSet {
    platforms: Vec<Platform>,
}

impl PlatformSet {
    pub fn new(platforms: Vec<Platform>) -> Self {
        Self { platforms }
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Platform> {
        self.platforms.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    /// Move every oscillating platform. Must run before any actor update
    /// that reads `delta_x` this step.
    pub fn update(&mut self) {
        for platform in &mut self.platforms {
            platform.update();
        }
    }

    /// One-way landing test for a body that just moved vertically.
    ///
    /// `prev_bottom` is the body's bottom edge before this step's vertical
    /// move, `rect` its footprint after. Returns the highest platform whose
    /// top the bottom edge crossed this step.
    pub fn landing_surface(&self, prev_bottom: f32, rect: &Rect, vy: f32) -> Option<usize> {
        if vy <= 0.0 {
            return None;
        }
        self.highest(|p| {
            let top = p.top();
            rect.overlaps_x(&p.rect)
                && prev_bottom <= top + LANDING_TOLERANCE
                && rect.bottom() >= top
        })
    }

    /// The platform directly beneath a point, if its top is within
    /// `SUPPORT_TOLERANCE` of `bottom`
    pub fn support_under(&self, center_x: f32, bottom: f32) -> Option<usize> {
        self.platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                center_x >= p.rect.left()
                    && center_x <= p.rect.right()
                    && (bottom - p.top()).abs() <= SUPPORT_TOLERANCE
            })
            .min_by(|(_, a), (_, b)| {
                (bottom - a.top())
                    .abs()
                    .total_cmp(&(bottom - b.top()).abs())
            })
            .map(|(i, _)| i)
    }

    /// Plain AABB rest-on-top test: any overlapped platform whose top lies
    /// below the body's vertical center, while the body is not rising
    pub fn rest_surface(&self, rect: &Rect, vy: f32) -> Option<usize> {
        if vy < 0.0 {
            return None;
        }
        let center_y = rect.y + rect.height / 2.0;
        self.highest(|p| aabb_overlap(rect, &p.rect) && center_y < p.top())
    }

    fn highest(&self, pred: impl Fn(&Platform) -> bool) -> Option<usize> {
        self.platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| pred(p))
            .min_by(|(_, a), (_, b)| a.top().total_cmp(&b.top()))
            .map(|(i, _)| i)
    }
}
