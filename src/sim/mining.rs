//! Mining and placing
//!
//! Every request resolves to a `MutationResult`; rejected requests leave
//! both the world and the inventory untouched.

use std::collections::BTreeMap;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use super::generator::ChunkGenerator;
use super::physics::PlayerState;
use super::store::ChunkStore;
use crate::chebyshev;
use crate::consts::*;

/// Block counts carried by the player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    counts: BTreeMap<BlockKind, u32>,
}

impl Inventory {
    pub fn with(kind: BlockKind, count: u32) -> Self {
        let mut inventory = Self::default();
        if count > 0 {
            inventory.counts.insert(kind, count);
        }
        inventory
    }

    pub fn count(&self, kind: BlockKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn add(&mut self, kind: BlockKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Remove one; false (and no change) if there is none
    pub fn take(&mut self, kind: BlockKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Non-zero counts in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (BlockKind, u32)> + '_ {
        self.counts.iter().filter(|(_, n)| **n > 0).map(|(k, n)| (*k, *n))
    }
}

/// Outcome of a mine/place request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationResult {
    /// Block removed; `credited` if it went into the inventory
    Mined {
        tile: IVec2,
        kind: BlockKind,
        credited: bool,
    },
    Placed { tile: IVec2, kind: BlockKind },
    /// Target was already empty
    NothingToMine,
    /// Target beyond the interaction radius; the world was not touched
    OutOfReach,
    /// Placement target holds a block
    Occupied(BlockKind),
    /// No inventory of the kind being placed
    OutOfStock,
    /// The kind cannot be placed
    NotPlaceable,
    /// Write landed in a chunk that was never generated
    Ungenerated,
}

impl MutationResult {
    /// The world changed
    pub fn is_success(&self) -> bool {
        matches!(self, MutationResult::Mined { .. } | MutationResult::Placed { .. })
    }
}

/// Validates and applies mining/placing requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiningController {
    /// Max Chebyshev distance from the player's tile for pointer requests
    pub interaction_radius: i32,
}

impl Default for MiningController {
    fn default() -> Self {
        Self {
            interaction_radius: INTERACTION_RADIUS,
        }
    }
}

impl MiningController {
    pub fn new(interaction_radius: i32) -> Self {
        Self {
            interaction_radius: interaction_radius.max(0),
        }
    }

    pub fn in_reach(&self, player: &PlayerState, tile: IVec2) -> bool {
        chebyshev(tile, player.tile()) <= self.interaction_radius.max(0).unsigned_abs()
    }

    /// Mine the tile next to the player in its look direction
    pub fn mine_directional<G: ChunkGenerator>(
        &self,
        world: &mut ChunkStore<G>,
        player: &mut PlayerState,
    ) -> MutationResult {
        let target = player.tile().saturating_add(player.look.offset());
        mine_tile(world, player, target)
    }

    /// Mine a pointer-selected tile
    pub fn mine_at<G: ChunkGenerator>(
        &self,
        world: &mut ChunkStore<G>,
        player: &mut PlayerState,
        target: IVec2,
    ) -> MutationResult {
        if !self.in_reach(player, target) {
            log::debug!("Mine at {:?} out of reach of {:?}", target, player.tile());
            return MutationResult::OutOfReach;
        }
        mine_tile(world, player, target)
    }

    /// Place one block of `kind` from the inventory onto an empty tile
    pub fn place_at<G: ChunkGenerator>(
        &self,
        world: &mut ChunkStore<G>,
        player: &mut PlayerState,
        target: IVec2,
        kind: BlockKind,
    ) -> MutationResult {
        if !self.in_reach(player, target) {
            log::debug!("Place at {:?} out of reach of {:?}", target, player.tile());
            return MutationResult::OutOfReach;
        }
        if !kind.is_placeable() {
            return MutationResult::NotPlaceable;
        }
        if player.inventory.count(kind) == 0 {
            return MutationResult::OutOfStock;
        }
        let current = world.get_block(target.x, target.y);
        if current != BlockKind::Empty {
            return MutationResult::Occupied(current);
        }
        if !world.set_block(target.x, target.y, kind) {
            return MutationResult::Ungenerated;
        }
        player.inventory.take(kind);
        log::debug!("Placed {} at {:?}", kind.name(), target);
        MutationResult::Placed { tile: target, kind }
    }
}

fn mine_tile<G: ChunkGenerator>(
    world: &mut ChunkStore<G>,
    player: &mut PlayerState,
    target: IVec2,
) -> MutationResult {
    let kind = world.get_block(target.x, target.y);
    if kind == BlockKind::Empty {
        return MutationResult::NothingToMine;
    }
    if !world.set_block(target.x, target.y, BlockKind::Empty) {
        return MutationResult::Ungenerated;
    }
    let credited = kind.is_resource();
    if credited {
        player.inventory.add(kind);
    }
    log::debug!("Mined {} at {:?}", kind.name(), target);
    MutationResult::Mined {
        tile: target,
        kind,
        credited,
    }
}

/// World tile under a pointer, given the camera's pixel offset
pub fn pointer_to_tile(pointer_px: Vec2, camera_px: Vec2, tile_px: f32) -> IVec2 {
    ((pointer_px + camera_px) / tile_px).floor().as_ivec2()
}

/// Camera pixel offset that centers the player on a `screen_px` viewport
pub fn camera_for(player_pos: Vec2, screen_px: Vec2, tile_px: f32) -> Vec2 {
    player_pos * tile_px - screen_px / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::chunk::{Chunk, ChunkCoord};
    use crate::sim::physics::Direction;
    use proptest::prelude::*;

    /// Every cell is `kind`
    struct Uniform(BlockKind);

    impl ChunkGenerator for Uniform {
        fn generate(&self, _coord: ChunkCoord, chunk_size: i32) -> Chunk {
            Chunk::filled(chunk_size, self.0)
        }
    }

    fn world_of(kind: BlockKind) -> ChunkStore<Uniform> {
        ChunkStore::new(Uniform(kind), 8)
    }

    fn player_at(x: f32, y: f32) -> PlayerState {
        PlayerState::new(Vec2::new(x, y))
    }

    #[test]
    fn test_mine_at_credits_resource_once() {
        let mut world = world_of(BlockKind::Coal);
        let mut player = player_at(0.5, 0.5);
        let controller = MiningController::default();
        let target = IVec2::new(1, 0);

        let result = controller.mine_at(&mut world, &mut player, target);
        assert_eq!(
            result,
            MutationResult::Mined {
                tile: target,
                kind: BlockKind::Coal,
                credited: true
            }
        );
        assert_eq!(world.get_block(1, 0), BlockKind::Empty);
        assert_eq!(player.inventory.count(BlockKind::Coal), 1);

        let again = controller.mine_at(&mut world, &mut player, target);
        assert_eq!(again, MutationResult::NothingToMine);
        assert_eq!(player.inventory.count(BlockKind::Coal), 1);
    }

    #[test]
    fn test_mining_stone_is_not_credited() {
        let mut world = world_of(BlockKind::Stone);
        let mut player = player_at(0.0, 0.0);
        let result = MiningController::default().mine_at(&mut world, &mut player, IVec2::new(0, 1));
        assert!(matches!(result, MutationResult::Mined { credited: false, .. }));
        assert_eq!(player.inventory, Inventory::default());
    }

    #[test]
    fn test_out_of_reach_touches_nothing() {
        let mut world = world_of(BlockKind::Gold);
        let mut player = player_at(0.0, 0.0);
        let controller = MiningController::default();
        let result = controller.mine_at(&mut world, &mut player, IVec2::new(20, 20));
        assert_eq!(result, MutationResult::OutOfReach);
        // The target chunk was not even generated
        assert!(!world.is_generated(ChunkCoord::new(2, 2)));
        assert_eq!(player.inventory.count(BlockKind::Gold), 0);
    }

    #[test]
    fn test_far_targets_are_out_of_reach() {
        let mut world = world_of(BlockKind::Dirt);
        let mut player = player_at(5.0, 0.0);
        player.inventory = Inventory::with(BlockKind::Dirt, 1);
        let controller = MiningController::default();

        for target in [IVec2::new(i32::MIN, 0), IVec2::new(i32::MAX, i32::MIN)] {
            assert_eq!(
                controller.mine_at(&mut world, &mut player, target),
                MutationResult::OutOfReach
            );
            assert_eq!(
                controller.place_at(&mut world, &mut player, target, BlockKind::Dirt),
                MutationResult::OutOfReach
            );
        }
        assert_eq!(world.chunk_count(), 0);
        assert_eq!(player.inventory.count(BlockKind::Dirt), 1);
    }

    #[test]
    fn test_reach_is_chebyshev() {
        let controller = MiningController::new(2);
        let player = player_at(5.5, 5.5);
        assert!(controller.in_reach(&player, IVec2::new(7, 7)));
        assert!(controller.in_reach(&player, IVec2::new(3, 7)));
        assert!(!controller.in_reach(&player, IVec2::new(8, 5)));
    }

    #[test]
    fn test_place_consumes_inventory() {
        let mut world = world_of(BlockKind::Empty);
        let mut player = player_at(0.0, 0.0);
        player.inventory = Inventory::with(BlockKind::Dirt, 1);
        let controller = MiningController::default();
        let target = IVec2::new(1, 1);

        let result = controller.place_at(&mut world, &mut player, target, BlockKind::Dirt);
        assert_eq!(
            result,
            MutationResult::Placed {
                tile: target,
                kind: BlockKind::Dirt
            }
        );
        assert_eq!(world.get_block(1, 1), BlockKind::Dirt);
        assert_eq!(player.inventory.count(BlockKind::Dirt), 0);

        let again = controller.place_at(&mut world, &mut player, target, BlockKind::Dirt);
        assert_eq!(again, MutationResult::OutOfStock);
        assert_eq!(world.get_block(1, 1), BlockKind::Dirt);
    }

    #[test]
    fn test_place_onto_solid_is_rejected() {
        let mut world = world_of(BlockKind::Stone);
        let mut player = player_at(0.0, 0.0);
        player.inventory = Inventory::with(BlockKind::Dirt, 3);
        let result =
            MiningController::default().place_at(&mut world, &mut player, IVec2::new(1, 0), BlockKind::Dirt);
        assert_eq!(result, MutationResult::Occupied(BlockKind::Stone));
        assert_eq!(player.inventory.count(BlockKind::Dirt), 3);
    }

    #[test]
    fn test_only_dirt_can_be_placed() {
        let mut world = world_of(BlockKind::Empty);
        let mut player = player_at(0.0, 0.0);
        player.inventory = Inventory::with(BlockKind::Gold, 2);
        let result =
            MiningController::default().place_at(&mut world, &mut player, IVec2::new(0, 1), BlockKind::Gold);
        assert_eq!(result, MutationResult::NotPlaceable);
        assert_eq!(world.get_block(0, 1), BlockKind::Empty);
        assert_eq!(player.inventory.count(BlockKind::Gold), 2);
    }

    #[test]
    fn test_mine_directional_uses_look() {
        let mut world = world_of(BlockKind::Iron);
        let mut player = player_at(-0.5, 3.2);
        player.look = Direction::Up;
        let result = MiningController::default().mine_directional(&mut world, &mut player);
        // Player tile is (-1, 3); up is (-1, 2)
        assert!(matches!(result, MutationResult::Mined { tile, .. } if tile == IVec2::new(-1, 2)));
        assert_eq!(world.get_block(-1, 2), BlockKind::Empty);
        assert_eq!(world.get_block(-1, 4), BlockKind::Iron);
        assert_eq!(player.inventory.count(BlockKind::Iron), 1);
    }

    #[test]
    fn test_mine_directional_at_world_edge() {
        let mut world = world_of(BlockKind::Coal);
        let controller = MiningController::default();

        // Tile (i32::MAX, 0); looking further right stays on the edge
        let mut player = player_at(f32::MAX, 0.0);
        player.look = Direction::Right;
        let result = controller.mine_directional(&mut world, &mut player);
        assert!(matches!(result, MutationResult::Mined { tile, .. } if tile == IVec2::new(i32::MAX, 0)));

        let mut player = player_at(f32::MIN, 0.0);
        player.look = Direction::Left;
        let result = controller.mine_directional(&mut world, &mut player);
        assert!(matches!(result, MutationResult::Mined { tile, .. } if tile == IVec2::new(i32::MIN, 0)));
    }

    #[test]
    fn test_pointer_to_tile() {
        let camera = camera_for(Vec2::new(10.0, 0.0), Vec2::new(800.0, 600.0), 40.0);
        assert_eq!(camera, Vec2::new(0.0, -300.0));
        // Screen center is the player's tile
        assert_eq!(pointer_to_tile(Vec2::new(400.0, 300.0), camera, 40.0), IVec2::new(10, 0));
        // Above the player, negative world row
        assert_eq!(pointer_to_tile(Vec2::new(0.0, 250.0), camera, 40.0), IVec2::new(0, -2));
    }

    #[test]
    fn test_inventory_take() {
        let mut inventory = Inventory::default();
        assert!(!inventory.take(BlockKind::Dirt));
        inventory.add(BlockKind::Dirt);
        assert!(inventory.take(BlockKind::Dirt));
        assert!(!inventory.take(BlockKind::Dirt));
        assert_eq!(inventory.iter().count(), 0);
    }

    proptest! {
        #[test]
        fn prop_inventory_never_underflows(ops in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut inventory = Inventory::default();
            let mut expected: u32 = 0;
            for add in ops {
                if add {
                    inventory.add(BlockKind::Dirt);
                    expected += 1;
                } else {
                    prop_assert_eq!(inventory.take(BlockKind::Dirt), expected > 0);
                    expected = expected.saturating_sub(1);
                }
            }
            prop_assert_eq!(inventory.count(BlockKind::Dirt), expected);
        }
    }
}
