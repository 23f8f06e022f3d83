use crate::entity::movement::Direction;
use crate::game::consts::TILE_WATER;
use crate::game::world::Unit;
use crate::platform::Platform;
use crate::test::create_minimal_world;
use crate::ui::render::{self, MapView};

#[test]
fn test_second_pass_without_changes_draws_nothing() {
    let (mut state, mut platform) = create_minimal_world(30, 30);
    render::draw_map_window(&mut state, &mut platform);
    let (width, height) = platform.map_window_size();
    assert_eq!(platform.draw_calls, usize::from(width) * usize::from(height));

    platform.reset_counters();
    render::draw_map_window(&mut state, &mut platform);
    assert_eq!(platform.draw_calls, 0);
    assert!(!state.view.redraw);
}

#[test]
fn test_invalidate_repaints_every_cell() {
    let (mut state, mut platform) = create_minimal_world(30, 30);
    render::draw_map_window(&mut state, &mut platform);
    platform.reset_counters();
    state.view.invalidate();
    render::draw_map_window(&mut state, &mut platform);
    assert_eq!(platform.draw_calls, 17 * 10);
}

#[test]
fn test_only_changed_cells_are_redrawn() {
    let (mut state, mut platform) = create_minimal_world(30, 30);
    state.world.units[1] = Unit::new(2, 31, 31).with_tile(98);
    render::draw_map_window(&mut state, &mut platform);
    platform.reset_counters();

    // the robot moves one tile, its old and new cell change
    state.world.units[1].x = 32;
    render::draw_map_window(&mut state, &mut platform);
    assert_eq!(platform.draw_calls, 2);

    // turning the player changes its facing variant
    platform.reset_counters();
    state.world.units[0].direction = Direction::Left;
    render::draw_map_window(&mut state, &mut platform);
    assert_eq!(platform.draw_calls, 1);
}

#[test]
fn test_animated_background_follows_animation_state() {
    let (mut state, mut platform) = create_minimal_world(30, 30);
    state.world.set_tile(28, 28, TILE_WATER);
    render::draw_map_window(&mut state, &mut platform);
    platform.reset_counters();
    state.view.anim_state = state.view.anim_state.wrapping_add(1);
    render::draw_map_window(&mut state, &mut platform);
    assert_eq!(platform.draw_calls, 1);
}

#[test]
fn test_window_clamps_to_map() {
    let mut view = MapView::new(17, 10);
    view.center_on(2, 2);
    assert_eq!((view.x, view.y), (0, 0));
    view.center_on(127, 63);
    assert_eq!((view.x, view.y), (128 - 17, 64 - 10));
    view.center_on(40, 30);
    assert_eq!((view.x, view.y), (32, 25));
    assert!(view.contains(40, 30));
    assert!(!view.contains(49, 30));
}

#[test]
fn test_classic_window_follows_player() {
    let mut view = MapView::new(11, 7);
    assert!(view.is_classic());
    view.center_on(40, 30);
    assert_eq!((view.x, view.y), (35, 27));
    view.center_on(2, 1);
    assert_eq!((view.x, view.y), (2u8.wrapping_sub(5), 1u8.wrapping_sub(3)));
}

#[test]
fn test_live_map_toggle() {
    let (mut state, mut platform) = create_minimal_world(30, 30);
    render::toggle_live_map(&mut state, &mut platform);
    assert!(state.view.live_map);
    assert_eq!(platform.live_map_draws, 1);

    // tiles plotted while the live map is shown are forwarded to it
    state.plot_tile(&mut platform, 40, 40, 1);
    assert_eq!(platform.live_map_draws, 2);

    render::draw_live_map(&mut state, &mut platform);
    assert_eq!(platform.live_map_draws, 3);

    render::toggle_live_map(&mut state, &mut platform);
    assert!(!state.view.live_map);
    platform.reset_counters();
    render::draw_map_window(&mut state, &mut platform);
    assert_eq!(platform.draw_calls, 17 * 10);
}
