//! Sparse chunk store over an unbounded tile grid
//!
//! Reads generate missing chunks; writes never do. A write into a chunk
//! nobody has looked at yet is dropped and reported as a failure, which
//! keeps mining at the edge of the explored world from conjuring terrain.

use std::collections::HashMap;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use super::chunk::{Chunk, ChunkCoord};
use super::generator::{ChunkGenerator, TerrainGenerator};
use crate::settings::WorldSettings;

/// Lazily populated chunk map
#[derive(Debug, Clone)]
pub struct ChunkStore<G = TerrainGenerator> {
    generator: G,
    chunk_size: i32,
    chunks: HashMap<ChunkCoord, Chunk>,
    generated: usize,
}

impl ChunkStore<TerrainGenerator> {
    pub fn from_settings(settings: &WorldSettings) -> Self {
        let settings = settings.clone().sanitized();
        let generator = TerrainGenerator::from_settings(&settings);
        log::info!(
            "World seed {}, chunk size {}, surface at row {}",
            generator.seed,
            settings.chunk_size,
            generator.surface_level
        );
        Self::new(generator, settings.chunk_size)
    }
}

impl<G: ChunkGenerator> ChunkStore<G> {
    pub fn new(generator: G, chunk_size: i32) -> Self {
        Self {
            generator,
            chunk_size: chunk_size.max(1),
            chunks: HashMap::new(),
            generated: 0,
        }
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Number of generated chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of generator calls made so far
    pub fn generated_count(&self) -> usize {
        self.generated
    }

    pub fn is_generated(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Get a chunk, generating it on first access. Existing chunks are never replaced.
    pub fn ensure_chunk(&mut self, coord: ChunkCoord) -> &mut Chunk {
        let generator = &self.generator;
        let chunk_size = self.chunk_size;
        let generated = &mut self.generated;
        self.chunks.entry(coord).or_insert_with(|| {
            log::debug!("Generating chunk ({}, {})", coord.x, coord.y);
            *generated += 1;
            generator.generate(coord, chunk_size)
        })
    }

    /// Block at a world tile, generating its chunk if needed
    pub fn get_block(&mut self, x: i32, y: i32) -> BlockKind {
        let (coord, local) = ChunkCoord::split_world(IVec2::new(x, y), self.chunk_size);
        // local is always in range, so the fallback is unreachable
        self.ensure_chunk(coord).get(local).unwrap_or_default()
    }

    /// Block at a world tile without generating; `None` if the chunk is absent
    pub fn peek_block(&self, x: i32, y: i32) -> Option<BlockKind> {
        let (coord, local) = ChunkCoord::split_world(IVec2::new(x, y), self.chunk_size);
        self.chunks.get(&coord).and_then(|chunk| chunk.get(local))
    }

    /// Overwrite a world tile. Fails without side effects if the chunk was never generated.
    pub fn set_block(&mut self, x: i32, y: i32, kind: BlockKind) -> bool {
        let (coord, local) = ChunkCoord::split_world(IVec2::new(x, y), self.chunk_size);
        match self.chunks.get_mut(&coord) {
            Some(chunk) => chunk.set(local, kind),
            None => {
                log::debug!("Dropped write at ({}, {}): chunk not generated", x, y);
                false
            }
        }
    }

    /// Generate everything under `rect` and copy it out for the renderer
    pub fn snapshot(&mut self, rect: TileRect) -> WorldSnapshot {
        let tiles = rect.tiles().map(|t| self.get_block(t.x, t.y)).collect();
        WorldSnapshot { rect, tiles }
    }
}

/// Axis-aligned rectangle of world tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRect {
    /// Top-left tile
    pub min: IVec2,
    pub width: i32,
    pub height: i32,
}

impl TileRect {
    pub fn new(min: IVec2, width: i32, height: i32) -> Self {
        Self {
            min,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// A `width × height` window whose center tile contains `center`
    pub fn centered_on(center: Vec2, width: i32, height: i32) -> Self {
        let center = crate::tile_at(center);
        Self::new(center - IVec2::new(width / 2, height / 2), width, height)
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        let rel = tile - self.min;
        rel.x >= 0 && rel.y >= 0 && rel.x < self.width && rel.y < self.height
    }

    /// Tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = IVec2> + use<> {
        let Self { min, width, height } = *self;
        (0..height).flat_map(move |y| (0..width).map(move |x| min + IVec2::new(x, y)))
    }
}

/// Immutable copy of a window of the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub rect: TileRect,
    tiles: Vec<BlockKind>,
}

impl WorldSnapshot {
    /// Block at a world tile; `None` outside the window
    pub fn get(&self, tile: IVec2) -> Option<BlockKind> {
        if !self.rect.contains(tile) {
            return None;
        }
        let rel = tile - self.rect.min;
        self.tiles.get((rel.y * self.rect.width + rel.x) as usize).copied()
    }

    /// `(tile, block)` for every non-empty cell
    pub fn solid_tiles(&self) -> impl Iterator<Item = (IVec2, BlockKind)> + '_ {
        self.rect
            .tiles()
            .zip(self.tiles.iter().copied())
            .filter(|(_, kind)| kind.is_solid())
    }
}
