//! Player kinematics against the tile grid
//!
//! Per step: intent → velocity, gravity, then move x and y separately,
//! undoing each axis if the body's corners end up inside a solid tile.
//! This is not swept collision; per-tick speeds are small enough that
//! tunnelling through a whole tile cannot happen.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::generator::ChunkGenerator;
use super::mining::Inventory;
use super::store::ChunkStore;
use crate::consts::*;
use crate::tile_at;

/// Cardinal direction (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Unit tile offset
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Horizontal movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Movement {
    #[default]
    None,
    Left,
    Right,
}

impl Movement {
    fn sign(self) -> f32 {
        match self {
            Movement::None => 0.0,
            Movement::Left => -1.0,
            Movement::Right => 1.0,
        }
    }
}

/// The player: position is the top-left corner of the body, in tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    /// Last horizontal movement direction
    pub facing: Direction,
    /// Target direction for directional mining
    pub look: Direction,
    pub inventory: Inventory,
}

impl PlayerState {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            on_ground: false,
            facing: Direction::Right,
            look: Direction::Right,
            inventory: Inventory::default(),
        }
    }

    /// Tile containing the body's top-left corner
    pub fn tile(&self) -> IVec2 {
        tile_at(self.pos)
    }
}

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub blocked_x: bool,
    pub blocked_y: bool,
    /// Went from airborne to grounded this step
    pub landed: bool,
}

/// Kinematic parameters, in tiles per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub move_speed: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub size: Vec2,
    pub inset: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            jump_impulse: JUMP_IMPULSE,
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            size: Vec2::new(BODY_WIDTH, BODY_HEIGHT),
            inset: COLLISION_INSET,
        }
    }
}

impl PhysicsBody {
    /// Corner offsets sampled for collision, relative to the body's top-left
    fn corners(&self) -> [Vec2; 4] {
        let far = (self.size - Vec2::splat(self.inset)).max(Vec2::ZERO);
        [
            Vec2::ZERO,
            Vec2::new(far.x, 0.0),
            Vec2::new(0.0, far.y),
            far,
        ]
    }

    /// True if any sampled corner of a body at `pos` is inside a solid tile
    pub fn collides<G: ChunkGenerator>(&self, world: &mut ChunkStore<G>, pos: Vec2) -> bool {
        self.corners().into_iter().any(|corner| {
            let tile = tile_at(pos + corner);
            world.get_block(tile.x, tile.y).is_solid()
        })
    }

    /// Advance the player by one tick
    pub fn step<G: ChunkGenerator>(
        &self,
        player: &mut PlayerState,
        world: &mut ChunkStore<G>,
        movement: Movement,
        jump: bool,
    ) -> StepReport {
        let mut report = StepReport::default();
        let was_grounded = player.on_ground;

        player.vel.x = movement.sign() * self.move_speed;
        match movement {
            Movement::Left => player.facing = Direction::Left,
            Movement::Right => player.facing = Direction::Right,
            Movement::None => {}
        }

        if jump && player.on_ground {
            player.vel.y = self.jump_impulse;
            player.on_ground = false;
        }

        player.vel.y = (player.vel.y + self.gravity).min(self.max_fall_speed);

        // Horizontal: undo the move, keep the velocity
        if player.vel.x != 0.0 {
            let moved = player.pos + Vec2::new(player.vel.x, 0.0);
            if self.collides(world, moved) {
                report.blocked_x = true;
            } else {
                player.pos = moved;
            }
        }

        // Vertical: undo the move and stop
        let moved = player.pos + Vec2::new(0.0, player.vel.y);
        if self.collides(world, moved) {
            report.blocked_y = true;
            // Only a blocked downward move grounds the body; bumping a ceiling does not
            player.on_ground = player.vel.y >= 0.0;
            player.vel.y = 0.0;
        } else {
            player.pos = moved;
            // Any free vertical move leaves the ground, so walking off a ledge
            // rules out a mid-air jump
            player.on_ground = false;
        }

        report.landed = player.on_ground && !was_grounded;
        report
    }
}
