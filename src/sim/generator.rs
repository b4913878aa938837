//! Procedural chunk generation
//!
//! Each chunk draws from its own PCG streams seeded by a hash of the chunk
//! coordinate and the world seed, so generation order never changes the
//! result and a chunk can be regenerated bit-for-bit in tests.

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use super::chunk::{Chunk, ChunkCoord};
use crate::consts::*;
use crate::settings::WorldSettings;

/// PCG stream ids; caves never consume ore rolls and vice versa
const ORE_STREAM: u64 = 0x0BE5;
const CAVE_STREAM: u64 = 0xCA7E;

/// Produces the initial contents of a chunk
pub trait ChunkGenerator {
    fn generate(&self, coord: ChunkCoord, chunk_size: i32) -> Chunk;
}

/// A circular cave in chunk-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cave {
    pub center: IVec2,
    pub radius: i32,
}

impl Cave {
    /// Euclidean distance from the center strictly below the radius
    #[inline]
    pub fn contains(&self, local: IVec2) -> bool {
        (local - self.center).length_squared() < self.radius * self.radius
    }

    /// Empty every covered cell, whatever it held
    pub fn carve(&self, chunk: &mut Chunk) {
        let size = chunk.size();
        for y in 0..size {
            for x in 0..size {
                let local = IVec2::new(x, y);
                if self.contains(local) {
                    chunk.set(local, BlockKind::Empty);
                }
            }
        }
    }
}

/// Classify one underground cell from a uniform roll in `[0, 1)`
pub fn roll_ore(roll: f64) -> BlockKind {
    if roll < COAL_THRESHOLD {
        BlockKind::Coal
    } else if roll < IRON_THRESHOLD {
        BlockKind::Iron
    } else if roll < GOLD_THRESHOLD {
        BlockKind::Gold
    } else if roll < DIAMOND_THRESHOLD {
        BlockKind::Diamond
    } else {
        BlockKind::Stone
    }
}

/// Mix a chunk coordinate into the world seed
pub fn chunk_seed(coord: ChunkCoord, world_seed: u64) -> u64 {
    let mut h = world_seed
        ^ (coord.x as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (coord.y as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    // splitmix64 finalizer
    h ^= h >> 30;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= h >> 27;
    h = h.wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 31)
}

/// Sky, a dirt crust, then stone speckled with ore and the odd cave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainGenerator {
    pub seed: u64,
    pub surface_level: i32,
    pub cave_chance: f64,
    pub cave_min_radius: i32,
    pub cave_max_radius: i32,
}

impl TerrainGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            surface_level: SURFACE_LEVEL,
            cave_chance: CAVE_CHANCE,
            cave_min_radius: CAVE_MIN_RADIUS,
            cave_max_radius: CAVE_MAX_RADIUS,
        }
    }

    pub fn from_settings(settings: &WorldSettings) -> Self {
        let settings = settings.clone().sanitized();
        Self {
            seed: settings.resolve_seed(),
            surface_level: settings.surface_level,
            cave_chance: settings.cave_chance,
            cave_min_radius: settings.cave_min_radius,
            cave_max_radius: settings.cave_max_radius,
        }
    }

    /// The cave this chunk gets, if any. Radius is capped at the chunk size.
    pub fn cave_for(&self, coord: ChunkCoord, chunk_size: i32) -> Option<Cave> {
        let mut rng = Pcg32::new(chunk_seed(coord, self.seed), CAVE_STREAM);
        if chunk_size < 1 || !rng.random_bool(self.cave_chance.clamp(0.0, 1.0)) {
            return None;
        }
        let center = IVec2::new(
            rng.random_range(0..chunk_size),
            rng.random_range(0..chunk_size),
        );
        let max_radius = self.cave_max_radius.min(chunk_size).max(1);
        let min_radius = self.cave_min_radius.clamp(1, max_radius);
        let radius = rng.random_range(min_radius..=max_radius);
        Some(Cave { center, radius })
    }
}

impl ChunkGenerator for TerrainGenerator {
    fn generate(&self, coord: ChunkCoord, chunk_size: i32) -> Chunk {
        let mut chunk = Chunk::filled(chunk_size, BlockKind::Empty);
        let origin = coord.origin(chunk_size);
        let mut rng = Pcg32::new(chunk_seed(coord, self.seed), ORE_STREAM);

        for local_y in 0..chunk_size {
            let world_y = origin.y + local_y;
            if world_y < self.surface_level {
                continue;
            }
            for local_x in 0..chunk_size {
                let kind = if world_y == self.surface_level {
                    BlockKind::Dirt
                } else {
                    roll_ore(rng.random::<f64>())
                };
                chunk.set(IVec2::new(local_x, local_y), kind);
            }
        }

        if let Some(cave) = self.cave_for(coord, chunk_size) {
            log::debug!(
                "Carving cave in chunk ({}, {}) at {:?} r={}",
                coord.x,
                coord.y,
                cave.center,
                cave.radius
            );
            cave.carve(&mut chunk);
        }

        chunk
    }
}
