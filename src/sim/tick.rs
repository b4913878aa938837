//! Per-frame simulation tick
//!
//! One tick: physics step, directional mining, pointer action. The renderer
//! only ever sees a `FrameSnapshot` copied out after the tick.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use super::generator::{ChunkGenerator, TerrainGenerator};
use super::mining::{Inventory, MiningController, MutationResult};
use super::physics::{Direction, Movement, PhysicsBody, PlayerState};
use super::store::{ChunkStore, TileRect, WorldSnapshot};
use crate::settings::Settings;

/// What the pointer button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerAction {
    Mine(IVec2),
    Place(IVec2, BlockKind),
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub movement: Movement,
    pub jump: bool,
    /// Directional mining (arrow key); also turns the look direction
    pub mine: Option<Direction>,
    /// Pointer request, already transformed into a world tile
    pub pointer: Option<PointerAction>,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Landed,
    Mined { tile: IVec2, kind: BlockKind },
    Placed { tile: IVec2, kind: BlockKind },
    /// A request that changed nothing
    Rejected(MutationResult),
}

impl GameEvent {
    fn from_mutation(result: MutationResult) -> Self {
        match result {
            MutationResult::Mined { tile, kind, .. } => GameEvent::Mined { tile, kind },
            MutationResult::Placed { tile, kind } => GameEvent::Placed { tile, kind },
            other => GameEvent::Rejected(other),
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub player: PlayerState,
    pub world: WorldSnapshot,
    pub time_ticks: u64,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState<G = TerrainGenerator> {
    pub world: ChunkStore<G>,
    pub player: PlayerState,
    pub body: PhysicsBody,
    pub controller: MiningController,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState<TerrainGenerator> {
    pub fn from_settings(settings: &Settings) -> Self {
        let world = ChunkStore::from_settings(&settings.world);
        let mut state = Self::with_world(world, settings.player.spawn);
        state.controller = MiningController::new(settings.player.interaction_radius);
        state.player.inventory = Inventory::with(BlockKind::Dirt, settings.player.starting_dirt);
        state
    }
}

impl<G: ChunkGenerator> GameState<G> {
    pub fn with_world(world: ChunkStore<G>, spawn: Vec2) -> Self {
        Self {
            world,
            player: PlayerState::new(spawn),
            body: PhysicsBody::default(),
            controller: MiningController::default(),
            time_ticks: 0,
        }
    }

    /// Copy the visible window out for rendering
    pub fn snapshot(&mut self, rect: TileRect) -> FrameSnapshot {
        FrameSnapshot {
            player: self.player.clone(),
            world: self.world.snapshot(rect),
            time_ticks: self.time_ticks,
        }
    }
}

/// Advance the game state by one tick
pub fn tick<G: ChunkGenerator>(state: &mut GameState<G>, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    let report = state
        .body
        .step(&mut state.player, &mut state.world, input.movement, input.jump);
    if report.landed {
        events.push(GameEvent::Landed);
    }

    if let Some(direction) = input.mine {
        state.player.look = direction;
        let result = state
            .controller
            .mine_directional(&mut state.world, &mut state.player);
        events.push(GameEvent::from_mutation(result));
    }

    if let Some(action) = input.pointer {
        let result = match action {
            PointerAction::Mine(tile) => {
                state
                    .controller
                    .mine_at(&mut state.world, &mut state.player, tile)
            }
            PointerAction::Place(tile, kind) => {
                state
                    .controller
                    .place_at(&mut state.world, &mut state.player, tile, kind)
            }
        };
        events.push(GameEvent::from_mutation(result));
    }

    events
}
