//! Simulation module
//!
//! All gameplay logic lives here:
//! - Single-threaded, one tick per frame
//! - Seeded RNG only (per-chunk PCG streams)
//! - No rendering or platform dependencies; the renderer gets snapshots

pub mod block;
pub mod chunk;
pub mod generator;
pub mod mining;
pub mod physics;
pub mod store;
pub mod tick;

pub use block::BlockKind;
pub use chunk::{Chunk, ChunkCoord};
pub use generator::{Cave, ChunkGenerator, TerrainGenerator, chunk_seed, roll_ore};
pub use mining::{Inventory, MiningController, MutationResult, camera_for, pointer_to_tile};
pub use physics::{Direction, Movement, PhysicsBody, PlayerState, StepReport};
pub use store::{ChunkStore, TileRect, WorldSnapshot};
pub use tick::{FrameSnapshot, GameEvent, GameState, PointerAction, TickInput, tick};
