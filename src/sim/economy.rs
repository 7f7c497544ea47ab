//! Key → shard → system health economy
//!
//! Each stage is a guarded transition. When the guard is false the input
//! comes back unchanged; nothing here can drive a counter negative.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::KeyPickup;

/// Resources the player is carrying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub keys: u32,
    pub shards: u32,
}

/// Remove every key the player overlaps, returning how many were taken
///
/// The whole active set is scanned once, so several keys can be collected
/// in the same tick.
pub fn collect_keys(player_pos: Vec2, player_radius: f32, keys: &mut Vec<KeyPickup>) -> u32 {
    let before = keys.len();
    keys.retain(|key| player_pos.distance(key.pos) >= player_radius + key.radius);
    (before - keys.len()) as u32
}

/// Hub conversion: spend `cost` keys for one shard
pub fn decrypt(inventory: Inventory, at_hub: bool, cost: u32) -> Inventory {
    if !at_hub || inventory.keys < cost {
        return inventory;
    }
    Inventory {
        keys: inventory.keys - cost,
        shards: inventory.shards + 1,
    }
}

/// Station delivery: hand over every shard at once
///
/// Returns the emptied inventory and the number of shards delivered.
pub fn deliver(inventory: Inventory, at_station: bool) -> (Inventory, u32) {
    if !at_station || inventory.shards == 0 {
        return (inventory, 0);
    }
    (
        Inventory {
            shards: 0,
            ..inventory
        },
        inventory.shards,
    )
}

/// System health after a delivery, clamped to `max`
pub fn reward_system_health(system_health: f32, delivered: u32, reward: f32, max: f32) -> f32 {
    (system_health + delivered as f32 * reward).min(max)
}

/// Whether `pos` is close enough to a landmark center to interact
#[inline]
pub fn within_reach(pos: Vec2, center: Vec2, reach: f32) -> bool {
    pos.distance(center) < reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key_at(x: f32, y: f32) -> KeyPickup {
        KeyPickup {
            pos: Vec2::new(x, y),
            radius: 5.0,
        }
    }

    #[test]
    fn test_collect_keys_takes_all_overlapping() {
        let mut keys = vec![key_at(100.0, 100.0), key_at(105.0, 100.0), key_at(200.0, 100.0)];
        let taken = collect_keys(Vec2::new(102.0, 100.0), 8.0, &mut keys);
        assert_eq!(taken, 2);
        assert_eq!(keys, vec![key_at(200.0, 100.0)]);
    }

    #[test]
    fn test_collect_keys_boundary_is_exclusive() {
        let mut keys = vec![key_at(113.0, 100.0)];
        assert_eq!(collect_keys(Vec2::new(100.0, 100.0), 8.0, &mut keys), 0);
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_decrypt_three_keys_makes_one_shard() {
        let inv = Inventory { keys: 3, shards: 0 };
        assert_eq!(decrypt(inv, true, 3), Inventory { keys: 0, shards: 1 });
    }

    #[test]
    fn test_decrypt_guards() {
        let inv = Inventory { keys: 2, shards: 1 };
        assert_eq!(decrypt(inv, true, 3), inv);
        let inv = Inventory { keys: 5, shards: 0 };
        assert_eq!(decrypt(inv, false, 3), inv);
    }

    #[test]
    fn test_deliver_transfers_all_shards() {
        let inv = Inventory { keys: 1, shards: 2 };
        let (after, delivered) = deliver(inv, true);
        assert_eq!(delivered, 2);
        assert_eq!(after, Inventory { keys: 1, shards: 0 });

        // Nothing left to hand over
        let (again, delivered) = deliver(after, true);
        assert_eq!(delivered, 0);
        assert_eq!(again, after);
    }

    #[test]
    fn test_reward_is_clamped() {
        assert_eq!(reward_system_health(40.0, 2, 25.0, 100.0), 90.0);
        assert_eq!(reward_system_health(60.0, 2, 25.0, 100.0), 100.0);
    }

    proptest! {
        #[test]
        fn decrypt_never_underflows(keys in 0u32..20, shards in 0u32..20, cost in 1u32..6, at_hub: bool) {
            let before = Inventory { keys, shards };
            let after = decrypt(before, at_hub, cost);
            // keys + cost * shards is conserved
            prop_assert_eq!(after.keys + cost * after.shards, before.keys + cost * before.shards);
            prop_assert!(after.shards >= before.shards);
        }
    }
}
