//! Collision detection and interaction arbitration
//!
//! All tests are axis-aligned boxes. The interesting part is deciding what a
//! player/enemy overlap *means*: a stomp (the player wins), damage (the
//! enemy wins) or nothing (a graze too thin to count).

use glam::Vec2;
use rand::Rng;

use super::body::{Body, Rect};
use super::enemy::EnemyKind;
use super::player::Player;
use super::state::{EventSink, FruitTier, GameEvent, GameState, ParticleKind, SessionPhase};
use crate::consts::*;

/// Strict AABB intersection: touching edges do not collide
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// Overlap depth on each axis (zero when apart)
pub fn overlap_extent(a: &Rect, b: &Rect) -> Vec2 {
    let x = a.right().min(b.right()) - a.left().max(b.left());
    let y = a.bottom().min(b.bottom()) - a.top().max(b.top());
    Vec2::new(x.max(0.0), y.max(0.0))
}

/// How a player/opponent overlap resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Player landed on the head zone
    Stomp,
    /// Deep enough side/bottom contact to hurt the player
    Hurt,
}

/// Classify an overlap between the player and an opponent box.
///
/// A stomp needs the player falling with its feet above the top
/// `STOMP_ZONE_FRACTION` of the target. Anything else hurts only if the
/// overlap beats `damage_overlap` on both axes. Invulnerability is not
/// considered here.
pub fn classify_contact(player: &Body, target: &Rect, damage_overlap: f32) -> Option<Contact> {
    let rect = player.rect();
    if !aabb_overlap(&rect, target) {
        return None;
    }
    if player.vel.y > 0.0 && rect.bottom() < target.top() + target.height * STOMP_ZONE_FRACTION {
        return Some(Contact::Stomp);
    }
    let depth = overlap_extent(&rect, target);
    if depth.x > damage_overlap && depth.y > damage_overlap {
        Some(Contact::Hurt)
    } else {
        None
    }
}

/// Bounce the player off a stomped target
pub fn stomp_bounce(player: &mut Player, target_top: f32) {
    // Stepped off a ledge straight onto a head this step
    if player.was_grounded {
        player.body.rest_on(target_top);
    }
    player.body.vel.y = STOMP_BOUNCE_VELOCITY;
    player.grounded = false;
    player.support = None;
}

/// Whether a defeated enemy drops a bonus fruit
pub fn rolls_bonus_drop(kind: EnemyKind, rng: &mut impl Rng) -> bool {
    rng.random_bool(kind.drop_chance())
}

/// Resolve every player interaction for this step. Runs after all actors
/// have moved.
pub fn resolve_collisions(state: &mut GameState) {
    if state.player.lives == 0 {
        return;
    }
    resolve_fruit(state);
    resolve_enemies(state);
    resolve_boss(state);
}

fn resolve_fruit(state: &mut GameState) {
    let player_rect = state.player.body.rect();
    let mut taken: Vec<(FruitTier, Vec2)> = Vec::new();
    state.fruits.retain(|fruit| {
        if aabb_overlap(&player_rect, &fruit.rect()) {
            taken.push((fruit.tier, fruit.center()));
            false
        } else {
            true
        }
    });

    for (tier, pos) in taken {
        state.score += tier.score();
        state.collected += 1;
        state.events.emit(GameEvent::FruitCollected { tier, pos });
        state.spawn_particles(ParticleKind::Pickup, pos, PICKUP_PARTICLES);
    }
}

fn resolve_enemies(state: &mut GameState) {
    // (id, kind, top-left, center) of enemies stomped this step
    let mut defeated: Vec<(u32, EnemyKind, Vec2, Vec2)> = Vec::new();

    for enemy in state.enemies.iter_mut().filter(|e| !e.defeated) {
        let target = enemy.body.rect();
        match classify_contact(&state.player.body, &target, ENEMY_DAMAGE_OVERLAP) {
            Some(Contact::Stomp) => {
                enemy.defeat();
                stomp_bounce(&mut state.player, target.top());
                defeated.push((enemy.id, enemy.kind, enemy.body.pos, enemy.body.center()));
            }
            Some(Contact::Hurt) => {
                state.player.take_damage(&mut state.events);
            }
            None => {}
        }
        if state.player.lives == 0 {
            break;
        }
    }

    for (id, kind, pos, center) in defeated {
        state.score += kind.score();
        state.events.emit(GameEvent::EnemyDefeated { id, pos: center });
        state.spawn_particles(ParticleKind::Defeat, center, DEFEAT_PARTICLES);

        if rolls_bonus_drop(kind, &mut state.rng) {
            let tier = match kind {
                EnemyKind::Basic => FruitTier::Common,
                EnemyKind::Patrol => FruitTier::Rare,
            };
            state.add_fruit(pos, tier);
            state.events.emit(GameEvent::BonusFruitDropped { tier, pos });
        }
    }
}

fn resolve_boss(state: &mut GameState) {
    if state.player.lives == 0 {
        return;
    }
    let Some(boss) = state.boss.as_mut().filter(|b| !b.defeated) else {
        return;
    };
    let target = boss.body.rect();
    match classify_contact(&state.player.body, &target, BOSS_DAMAGE_OVERLAP) {
        Some(Contact::Stomp) => {
            boss.take_hit(&mut state.events);
            let boss_down = boss.defeated;
            let center = boss.body.center();
            stomp_bounce(&mut state.player, target.top());
            state.score += BOSS_HIT_SCORE;
            state.spawn_particles(ParticleKind::Defeat, center, DEFEAT_PARTICLES);
            if boss_down {
                state.score += BOSS_DEFEAT_BONUS;
                state.transition(SessionPhase::Victory);
            }
        }
        Some(Contact::Hurt) => {
            state.player.take_damage(&mut state.events);
        }
        None => {}
    }
}
