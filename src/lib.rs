//! Pixel Miner - a tile-based mining sandbox
//!
//! Core modules:
//! - `sim`: Simulation (chunked world, terrain generation, player physics, mining)
//! - `settings`: Data-driven world and player configuration

pub mod settings;
pub mod sim;

pub use settings::{PlayerSettings, Settings, WorldSettings};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;

    /// Tile edge in screen pixels, used by the pointer transform
    pub const TILE_SIZE: f32 = 40.0;
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// World defaults
    pub const CHUNK_SIZE: i32 = 16;
    /// World row holding the dirt crust; rows above it are sky (y grows downward)
    pub const SURFACE_LEVEL: i32 = 2;

    /// Ore roll thresholds, checked in this order, first match wins
    pub const COAL_THRESHOLD: f64 = 0.02;
    pub const IRON_THRESHOLD: f64 = 0.035;
    pub const GOLD_THRESHOLD: f64 = 0.042;
    pub const DIAMOND_THRESHOLD: f64 = 0.045;

    /// Chance that a chunk gets one circular cave
    pub const CAVE_CHANCE: f64 = 0.2;
    pub const CAVE_MIN_RADIUS: i32 = 2;
    pub const CAVE_MAX_RADIUS: i32 = 5;

    /// Player kinematics, in tiles per tick
    pub const MOVE_SPEED: f32 = 0.1;
    pub const JUMP_IMPULSE: f32 = -0.3;
    pub const GRAVITY: f32 = 0.01;
    pub const MAX_FALL_SPEED: f32 = 0.3;

    /// Player bounding box (tiles). Half a tile wide, one tile tall.
    pub const BODY_WIDTH: f32 = 0.5;
    pub const BODY_HEIGHT: f32 = 1.0;
    /// Corner samples are pulled in by this much so a body flush against a
    /// tile edge does not register the neighbouring tile.
    pub const COLLISION_INSET: f32 = 0.1;

    /// Max Chebyshev distance (tiles) for pointer mining/placing
    pub const INTERACTION_RADIUS: i32 = 1;
}

/// Floor division: rounds toward negative infinity for a positive divisor
#[inline]
pub fn floor_div(value: i32, divisor: i32) -> i32 {
    value.div_euclid(divisor)
}

/// Floor modulo: always in `[0, divisor)` for a positive divisor
#[inline]
pub fn floor_mod(value: i32, divisor: i32) -> i32 {
    value.rem_euclid(divisor)
}

/// Tile containing a continuous position
#[inline]
pub fn tile_at(pos: Vec2) -> IVec2 {
    pos.floor().as_ivec2()
}

/// Chebyshev (chessboard) distance between two tiles. Unsigned so any pair
/// of tiles has a distance.
#[inline]
pub fn chebyshev(a: IVec2, b: IVec2) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_div_negative() {
        assert_eq!(floor_div(-1, 8), -1);
        assert_eq!(floor_mod(-1, 8), 7);
        assert_eq!(floor_div(-8, 8), -1);
        assert_eq!(floor_mod(-8, 8), 0);
        assert_eq!(floor_div(-9, 8), -2);
        assert_eq!(floor_mod(-9, 8), 7);
        assert_eq!(floor_div(15, 16), 0);
        assert_eq!(floor_div(16, 16), 1);
    }

    #[test]
    fn test_tile_at_floors() {
        assert_eq!(tile_at(Vec2::new(-0.5, 2.9)), IVec2::new(-1, 2));
        assert_eq!(tile_at(Vec2::new(3.0, -0.0)), IVec2::new(3, 0));
    }

    #[test]
    fn test_chebyshev() {
        assert_eq!(chebyshev(IVec2::new(0, 0), IVec2::new(1, 1)), 1);
        assert_eq!(chebyshev(IVec2::new(0, 0), IVec2::new(-2, 1)), 2);
        assert_eq!(chebyshev(IVec2::new(5, 5), IVec2::new(5, 5)), 0);
        assert_eq!(chebyshev(IVec2::new(i32::MIN, 0), IVec2::new(i32::MAX, 0)), u32::MAX);
        assert_eq!(chebyshev(IVec2::new(5, 0), IVec2::new(i32::MIN, 0)), 2_147_483_653);
    }
}
