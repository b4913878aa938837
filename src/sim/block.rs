//! Block catalog
//!
//! The catalog is closed: every `BlockKind` has a fixed classification, so
//! lookups are plain `match`es with no fallback case.

use serde::{Deserialize, Serialize};

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum BlockKind {
    /// Sky or cave air
    #[default]
    Empty,
    Dirt,
    Stone,
    Coal,
    Iron,
    Gold,
    Diamond,
}

impl BlockKind {
    pub const ALL: [BlockKind; 7] = [
        BlockKind::Empty,
        BlockKind::Dirt,
        BlockKind::Stone,
        BlockKind::Coal,
        BlockKind::Iron,
        BlockKind::Gold,
        BlockKind::Diamond,
    ];

    /// Trackable resources, in increasing rarity
    pub const RESOURCES: [BlockKind; 4] = [
        BlockKind::Coal,
        BlockKind::Iron,
        BlockKind::Gold,
        BlockKind::Diamond,
    ];

    /// Blocks the player body
    #[inline]
    pub fn is_solid(self) -> bool {
        self != BlockKind::Empty
    }

    /// Mining this kind credits the inventory
    #[inline]
    pub fn is_resource(self) -> bool {
        matches!(
            self,
            BlockKind::Coal | BlockKind::Iron | BlockKind::Gold | BlockKind::Diamond
        )
    }

    /// Can be placed from the inventory
    #[inline]
    pub fn is_placeable(self) -> bool {
        self == BlockKind::Dirt
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Empty => "Empty",
            BlockKind::Dirt => "Dirt",
            BlockKind::Stone => "Stone",
            BlockKind::Coal => "Coal",
            BlockKind::Iron => "Iron",
            BlockKind::Gold => "Gold",
            BlockKind::Diamond => "Diamond",
        }
    }

    /// Fill color (RGB) for the renderer
    pub fn color(self) -> [u8; 3] {
        match self {
            BlockKind::Empty => [0, 0, 0],
            BlockKind::Dirt => [139, 69, 19],
            BlockKind::Stone => [150, 150, 150],
            BlockKind::Coal => [50, 50, 50],
            BlockKind::Iron => [200, 200, 200],
            BlockKind::Gold => [255, 255, 0],
            BlockKind::Diamond => [0, 0, 139],
        }
    }
}
