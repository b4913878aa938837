//! Pixel Miner entry point
//!
//! Headless driver: runs a scripted session against the simulation and logs
//! what happened. A windowed front end drives the same `tick`/`snapshot`
//! pair with real input.

use glam::Vec2;

use pixel_miner::Settings;
use pixel_miner::consts::*;
use pixel_miner::sim::{
    BlockKind, Direction, GameEvent, GameState, Movement, PointerAction, TickInput, TileRect,
    camera_for, pointer_to_tile, tick,
};

const DEFAULT_SETTINGS_PATH: &str = "pixel_miner.json";

/// Scripted input for tick `t`: walk, dig, jump, click next to the player
fn scripted_input(t: u64, state: &GameState) -> TickInput {
    let second = t / TICK_RATE as u64;
    let mut input = TickInput {
        movement: match second % 4 {
            0 => Movement::Right,
            2 => Movement::Left,
            _ => Movement::None,
        },
        jump: t % 90 == 0,
        ..Default::default()
    };

    if t % 30 == 15 {
        input.mine = Some(if second % 2 == 0 {
            Direction::Down
        } else {
            Direction::Right
        });
    }

    // Click one tile left of the player, as a mouse would
    if t % 45 == 0 {
        let screen = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let camera = camera_for(state.player.pos, screen, TILE_SIZE);
        let pointer = screen / 2.0 - Vec2::new(TILE_SIZE, 0.0);
        let tile = pointer_to_tile(pointer, camera, TILE_SIZE);
        input.pointer = Some(if state.player.inventory.count(BlockKind::Dirt) > 0 {
            PointerAction::Place(tile, BlockKind::Dirt)
        } else {
            PointerAction::Mine(tile)
        });
    }

    input
}

fn main() {
    env_logger::init();
    log::info!("Pixel Miner (headless) starting...");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load(&path);
    let mut state = GameState::from_settings(&settings);

    let view_w = (SCREEN_WIDTH / TILE_SIZE).ceil() as i32 + 1;
    let view_h = (SCREEN_HEIGHT / TILE_SIZE).ceil() as i32 + 1;
    let total_ticks = 20 * TICK_RATE as u64;
    let mut mined = 0u32;
    let mut placed = 0u32;

    for t in 0..total_ticks {
        let input = scripted_input(t, &state);
        for event in tick(&mut state, &input) {
            match event {
                GameEvent::Mined { .. } => mined += 1,
                GameEvent::Placed { .. } => placed += 1,
                GameEvent::Landed => log::debug!("Landed at {:?}", state.player.pos),
                GameEvent::Rejected(result) => log::debug!("Rejected: {:?}", result),
            }
        }

        let frame = state.snapshot(TileRect::centered_on(state.player.pos, view_w, view_h));
        if t % TICK_RATE as u64 == 0 {
            log::info!(
                "t={}s pos=({:.2}, {:.2}) on_ground={} visible solid tiles={}",
                t / TICK_RATE as u64,
                frame.player.pos.x,
                frame.player.pos.y,
                frame.player.on_ground,
                frame.world.solid_tiles().count()
            );
        }
    }

    log::info!(
        "Done: {} blocks mined, {} placed, {} chunks generated",
        mined,
        placed,
        state.world.chunk_count()
    );
    for (kind, count) in state.player.inventory.iter() {
        println!("{}: {}", kind.name(), count);
    }
}
