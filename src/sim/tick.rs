//! Variable timestep simulation tick
//!
//! One call advances the session by one frame delta (milliseconds). Stages run
//! in a fixed order because later ones read what earlier ones wrote:
//! movement, sentry rotation, sentry damage, interactions, then system decay
//! and the terminal check.

use glam::Vec2;

use super::economy::{self, Inventory};
use super::state::{GameEvent, GamePhase, GameState, LossCause, Player};
use super::world::World;
use crate::tuning::{ConversionTrigger, Tuning};

/// Input sampled for a single tick
///
/// Each axis is -1, 0 or 1, as produced by the held-key snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_x: i8,
    pub move_y: i8,
}

impl TickInput {
    pub fn new(move_x: i8, move_y: i8) -> Self {
        Self {
            move_x: move_x.signum(),
            move_y: move_y.signum(),
        }
    }

    /// Unit-length movement direction, or zero when idle
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.move_x as f32, self.move_y as f32).normalize_or_zero()
    }
}

/// Advance the game state by `dt` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, tuning: &Tuning) {
    state.events.clear();

    // Frozen once won or lost; only a reset brings the session back
    if state.phase.is_terminal() {
        return;
    }

    state.tick_count += 1;
    state.elapsed_ms += dt as f64;

    move_player(&mut state.player, input, dt, &state.world, tuning);

    for sentry in &mut state.sentries {
        sentry.rotate(dt);
    }

    apply_sentry_damage(state, dt, tuning);

    let reached_full = resolve_interactions(state, tuning);

    update_system(state, dt, tuning, reached_full);
}

/// Move the player with axis-separated collision
///
/// X is resolved first against the old Y, then Y against the (possibly
/// updated) X, so pushing diagonally into a wall slides along it.
pub fn move_player(player: &mut Player, input: &TickInput, dt: f32, world: &World, tuning: &Tuning) {
    let dir = input.direction();
    if dir == Vec2::ZERO {
        return;
    }

    let step = dir * tuning.player_speed * dt;

    let next_x = Vec2::new(player.pos.x + step.x, player.pos.y);
    if !world.is_blocked(next_x, player.radius) {
        player.pos.x = next_x.x;
    }

    let next_y = Vec2::new(player.pos.x, player.pos.y + step.y);
    if !world.is_blocked(next_y, player.radius) {
        player.pos.y = next_y.y;
    }
}

/// Continuous damage from every sentry that currently sees the player
fn apply_sentry_damage(state: &mut GameState, dt: f32, tuning: &Tuning) {
    let player_pos = state.player.pos;
    for (index, sentry) in state.sentries.iter().enumerate() {
        if sentry.sees(player_pos, tuning) {
            state.player.health -= tuning.sentry_damage_rate * dt;
            state.events.push(GameEvent::PlayerSpotted { sentry: index });
        }
    }
}

/// Key pickup, Hub decryption and Station delivery
///
/// Returns true if a delivery lifted system health to its maximum.
fn resolve_interactions(state: &mut GameState, tuning: &Tuning) -> bool {
    let pos = state.player.pos;
    let reach = state.world.landmark_reach();

    let collected = economy::collect_keys(pos, state.player.radius, &mut state.keys);
    if collected > 0 {
        state.player.inventory.keys += collected;
        state.events.push(GameEvent::KeysCollected {
            count: collected,
            remaining: state.keys.len(),
        });
    }

    let at_hub = economy::within_reach(pos, state.world.hub().center, reach);
    let before = state.player.inventory;
    let after = match tuning.conversion {
        ConversionTrigger::Level => economy::decrypt(before, at_hub, tuning.shard_cost),
        ConversionTrigger::Edge => {
            if !at_hub {
                state.hub_latched = false;
                before
            } else if state.hub_latched {
                before
            } else {
                let after = economy::decrypt(before, at_hub, tuning.shard_cost);
                state.hub_latched = after != before;
                after
            }
        }
    };
    if after.shards > before.shards {
        state.events.push(GameEvent::ShardDecrypted {
            shards_held: after.shards,
        });
    }
    state.player.inventory = after;

    let at_station = economy::within_reach(pos, state.world.station().center, reach);
    let (inventory, delivered): (Inventory, u32) =
        economy::deliver(state.player.inventory, at_station);
    state.player.inventory = inventory;
    if delivered == 0 {
        return false;
    }

    state.shards_delivered += delivered as u64;
    state.system_health = economy::reward_system_health(
        state.system_health,
        delivered,
        tuning.shard_health_reward,
        tuning.system_max_health,
    );
    state.events.push(GameEvent::ShardsDelivered {
        count: delivered,
        system_health: state.system_health,
    });
    state.system_health >= tuning.system_max_health
}

/// System decay and the win/loss check (loss takes priority)
fn update_system(state: &mut GameState, dt: f32, tuning: &Tuning, reached_full: bool) {
    state.system_health -= tuning.system_health_decay * dt;

    let loss = if state.player.health <= 0.0 {
        Some(LossCause::PlayerDown)
    } else if state.system_health <= 0.0 {
        Some(LossCause::SystemFailure)
    } else {
        None
    };

    if let Some(cause) = loss {
        state.phase = GamePhase::Lost(cause);
        state.events.push(GameEvent::Lost {
            cause,
            shards_delivered: state.shards_delivered,
        });
    } else if reached_full || state.system_health >= tuning.system_max_health {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won {
            shards_delivered: state.shards_delivered,
        });
    }
}
