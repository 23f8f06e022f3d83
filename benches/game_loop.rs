use criterion::{criterion_group, criterion_main, Criterion};
use petrobots::game::consts::{LEVEL_MAP_OFFSET, LEVEL_SIZE, TILESET_SIZE, TILE_FLOOR, UNIT_SLOTS};
use petrobots::game::world::TileAttr;
use petrobots::game::{self, Game};
use petrobots::platform::headless::HeadlessPlatform;
use petrobots::ui::render;

/// Floor everywhere, the player in the middle and a few patrolling hoverbots around it.
fn bench_platform() -> HeadlessPlatform {
    let mut tileset = vec![0; TILESET_SIZE];
    tileset[2 + usize::from(TILE_FLOOR)] = TILE_FLOOR;
    tileset[258 + usize::from(TILE_FLOOR)] =
        (TileAttr::WALKABLE | TileAttr::HOVERABLE | TileAttr::SEE_THROUGH).bits();

    let mut level = vec![0; LEVEL_SIZE];
    let mut place = |slot: usize, kind: u8, x: u8, y: u8| {
        level[slot] = kind;
        level[UNIT_SLOTS + slot] = x;
        level[2 * UNIT_SLOTS + slot] = y;
        level[7 * UNIT_SLOTS + slot] = 10;
    };
    place(0, 1, 64, 32);
    for slot in 1..12 {
        let kind = if slot % 2 == 0 { 2 } else { 3 };
        place(slot, kind, 55 + slot as u8, 26 + (slot % 4) as u8);
    }
    level[LEVEL_MAP_OFFSET..].fill(TILE_FLOOR);

    let mut platform = HeadlessPlatform::new(false);
    platform.insert_asset("tileset", tileset);
    platform.insert_asset("level-a", level);
    platform
}

pub fn game_loop_benchmark(c: &mut Criterion) {
    // init logger
    pretty_env_logger::init();

    // setup game rules
    game::env().set_seed(0);

    c.bench_function("game loop 600 frames", |b| {
        b.iter(|| {
            let mut platform = bench_platform();
            platform.set_frame_limit(600);
            let mut game = match Game::new(&mut platform) {
                Ok(it) => it,
                Err(err) => panic!("{}", err),
            };
            game.skip_intro();
            game.run(&mut platform);
        })
    });

    c.bench_function("full map window redraw", |b| {
        let mut platform = bench_platform();
        let mut game = match Game::new(&mut platform) {
            Ok(it) => it,
            Err(err) => panic!("{}", err),
        };
        game.skip_intro();
        game.step(&mut platform);
        b.iter(|| {
            let state = game.state_mut();
            state.view.invalidate();
            render::draw_map_window(state, &mut platform);
        })
    });
}

criterion_group!(benches, game_loop_benchmark);
criterion_main!(benches);
