//! Chunk coordinates and chunk storage
//!
//! World tiles are addressed by `IVec2` (x grows right, y grows down). A
//! chunk covers a `size × size` square of tiles starting at
//! `coord * size`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use crate::{floor_div, floor_mod};

/// Chunk position in chunk-grid space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Split a world tile into its chunk and the local offset inside it.
    ///
    /// Uses floor division, so `(-1, -1)` with size 8 lands in chunk
    /// `(-1, -1)` at local `(7, 7)`.
    pub fn split_world(tile: IVec2, chunk_size: i32) -> (Self, IVec2) {
        let coord = Self::new(floor_div(tile.x, chunk_size), floor_div(tile.y, chunk_size));
        let local = IVec2::new(floor_mod(tile.x, chunk_size), floor_mod(tile.y, chunk_size));
        (coord, local)
    }

    /// Chunk containing a world tile
    pub fn containing(tile: IVec2, chunk_size: i32) -> Self {
        Self::split_world(tile, chunk_size).0
    }

    /// World tile of the chunk's top-left cell
    pub fn origin(self, chunk_size: i32) -> IVec2 {
        IVec2::new(self.x * chunk_size, self.y * chunk_size)
    }
}

/// A square grid of blocks, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    size: i32,
    blocks: Vec<BlockKind>,
}

impl Chunk {
    /// A chunk with every cell set to `kind`
    pub fn filled(size: i32, kind: BlockKind) -> Self {
        let side = size.max(0) as usize;
        Self {
            size,
            blocks: vec![kind; side * side],
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    fn index(&self, local: IVec2) -> Option<usize> {
        let in_range = |v: i32| (0..self.size).contains(&v);
        if in_range(local.x) && in_range(local.y) {
            Some((local.y * self.size + local.x) as usize)
        } else {
            None
        }
    }

    /// Block at a local offset; `None` outside `[0, size)`
    pub fn get(&self, local: IVec2) -> Option<BlockKind> {
        self.index(local).map(|i| self.blocks[i])
    }

    /// Overwrite a local cell. Returns false outside `[0, size)`.
    pub fn set(&mut self, local: IVec2, kind: BlockKind) -> bool {
        match self.index(local) {
            Some(i) => {
                self.blocks[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Iterate `(local offset, block)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, BlockKind)> + '_ {
        let size = self.size;
        self.blocks
            .iter()
            .enumerate()
            .map(move |(i, &kind)| (IVec2::new(i as i32 % size, i as i32 / size), kind))
    }

    /// Number of cells holding `kind`
    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|&&b| b == kind).count()
    }
}
