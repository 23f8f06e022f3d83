//! Everything the player can do: walk, shoot, cycle and use items, search and push objects.

use crate::entity::ai::UnitKind;
use crate::entity::movement::{request_walk, Direction};
use crate::game::consts::{
    ENEMY_SLOTS, FLASH_EMP, ITEM_BOMB, ITEM_EMP, ITEM_KEY, ITEM_MAGNET, ITEM_MEDKIT,
    ITEM_PISTOL, ITEM_PLASMA, KEY_HEART, KEY_SPADE, KEY_STAR, PLAYER, PLAYER_MAX_HEALTH,
    RANGE_HORIZONTAL, RANGE_VERTICAL, SEARCH_PERIODS, SEARCH_PERIOD_TICKS, SELECT_TIMEOUT,
    TILE_BIG_CRATE, TILE_BOMB, TILE_COMPACTOR, TILE_FIRE_HORIZONTAL, TILE_FIRE_VERTICAL,
    TILE_FLOOR, TILE_MAGNET, TILE_PI_CRATE, TILE_PLASMA_HORIZONTAL, TILE_PLASMA_VERTICAL,
    TILE_PLAYER, TILE_SMALL_CRATE, TILE_SPARKS_FIRST, TILE_WATER, WEAPON_SLOTS,
};
use crate::game::msg;
use crate::game::state::{Item, Weapon};
use crate::game::world::{TileAttr, Unit};
use crate::game::State;
use crate::platform::{CursorShape, Module, Platform, Sound};
use crate::ui::hud;
use crate::ui::input::{After, Command, InGameAction};
use crate::ui::modal;
use crate::ui::render;

/// Glyph of the progress dots printed while searching.
const PERIOD: u8 = 46;

pub fn animate_player(state: &mut State) {
    state.world.player_mut().tile = TILE_PLAYER;
    state.walk_frame = (state.walk_frame + 1) & 3;
}

/// Walk one tile and arm the key timer. The first repeat waits `first_repeat` ticks, later ones
/// six.
fn walk(state: &mut State, direction: Direction, first_repeat: u8) {
    if request_walk(&mut state.world, &state.tileset, PLAYER, direction, TileAttr::WALKABLE) {
        animate_player(state);
    }
    state.recenter_window();
    if state.key_fast {
        state.timers.key = 6;
    } else {
        state.timers.key = first_repeat;
        state.key_fast = true;
    }
}

/// Re-arm a held key once the key timer ran out, reset the repeat rate once nothing is held.
pub fn key_repeat(state: &mut State, platform: &mut dyn Platform, held: bool) {
    if state.timers.key != 0 {
        return;
    }
    if held {
        platform.key_repeat();
    } else {
        state.key_fast = false;
    }
    state.timers.key = 6;
}

pub fn clear_key_buffer(state: &mut State, platform: &mut dyn Platform) {
    platform.clear_key_buffer();
    state.timers.key = 20;
}

/// Run one in-game command. Returns `true` if the player chose to leave the game.
pub fn perform(state: &mut State, platform: &mut dyn Platform, command: Command) -> bool {
    use InGameAction::*;
    let mut leave = false;
    match command.action {
        Walk(direction) => walk(state, direction, 13),
        PadWalk(direction) => walk(state, direction, 15),
        Fire(direction) => fire(state, platform, direction),
        CycleWeapon => cycle_weapon(state, platform),
        CycleItem => cycle_item(state, platform),
        UseItem => use_item(state, platform),
        Search => search_object(state, platform),
        MoveObject => move_object(state, platform),
        ToggleLiveMap => render::toggle_live_map(state, platform),
        ToggleLiveMapRobots => render::toggle_live_map_robots(state),
        Pause => leave = modal::pause_game(state, platform),
        ToggleMusic => toggle_music(state, platform),
        Cheat => cheat(state, platform),
    }
    match command.after {
        After::Nothing => {}
        After::KeyTimer(ticks) => state.timers.key = ticks,
        After::ClearBuffer => clear_key_buffer(state, platform),
    }
    leave
}

/// Shoot the selected weapon. Plasma bolts are limited to one at a time and wait for a running
/// big explosion to end.
pub fn fire(state: &mut State, platform: &mut dyn Platform, direction: Direction) {
    if state.inventory.weapon == Weapon::None {
        return;
    }
    state.world.player_mut().direction = direction;
    let vertical = direction.is_vertical();
    let (tile, plasma) = match state.inventory.weapon {
        Weapon::None => return,
        Weapon::Pistol => {
            if state.inventory.pistol_ammo == 0 {
                return;
            }
            let tile = if vertical { TILE_FIRE_VERTICAL } else { TILE_FIRE_HORIZONTAL };
            (tile, false)
        }
        Weapon::Plasma => {
            if state.big_explosion_active || state.plasma_active || state.inventory.plasma_ammo == 0 {
                return;
            }
            let tile = if vertical { TILE_PLASMA_VERTICAL } else { TILE_PLASMA_HORIZONTAL };
            (tile, true)
        }
    };
    let kind = match direction {
        Direction::Up => UnitKind::FireUp,
        Direction::Down => UnitKind::FireDown,
        Direction::Left => UnitKind::FireLeft,
        Direction::Right => UnitKind::FireRight,
    };
    let range = if vertical { RANGE_VERTICAL } else { RANGE_HORIZONTAL };
    let player = *state.world.player();
    let shot = Unit::new(kind.id(), player.x, player.y)
        .with_tile(tile)
        .with_params(range, u8::from(plasma), 0, 0);
    if state.world.spawn(WEAPON_SLOTS, shot).is_some() {
        if plasma {
            state.plasma_active = true;
            platform.play_sample(Sound::Plasma);
            state.inventory.plasma_ammo -= 1;
        } else {
            platform.play_sample(Sound::Pistol);
            state.inventory.pistol_ammo -= 1;
        }
        hud::display_weapon(state, platform);
    }
}

pub fn cycle_weapon(state: &mut State, platform: &mut dyn Platform) {
    platform.play_sample(Sound::CycleWeapon);
    if state.timers.select_timeout != 0 {
        return;
    }
    state.timers.select_timeout = SELECT_TIMEOUT;
    state.timers.key = 20;
    // only the step from pistol to plasma survives, anything else starts over
    state.inventory.weapon = if state.inventory.weapon == Weapon::Pistol {
        Weapon::Plasma
    } else {
        Weapon::None
    };
    state.view.redraw = true;
    hud::display_weapon(state, platform);
}

pub fn cycle_item(state: &mut State, platform: &mut dyn Platform) {
    platform.play_sample(Sound::CycleItem);
    if state.timers.select_timeout != 0 {
        return;
    }
    state.timers.select_timeout = SELECT_TIMEOUT;
    state.timers.key = 20;
    state.inventory.item = state.inventory.item.next();
    hud::display_item(state, platform);
}

pub fn use_item(state: &mut State, platform: &mut dyn Platform) {
    if state.timers.select_timeout != 0 {
        return;
    }
    match state.inventory.item {
        Item::None => {}
        Item::Bomb => use_bomb(state, platform),
        Item::Emp => use_emp(state, platform),
        Item::Medkit => use_medkit(state, platform),
        Item::Magnet => use_magnet(state, platform),
    }
}

/// Let the player pick a tile next to it for an item and check that it can take the item.
fn select_drop_target(state: &mut State, platform: &mut dyn Platform) -> Option<(u8, u8)> {
    platform.set_cursor_shape(CursorShape::Use);
    let target = modal::user_select_object(state, platform);
    platform.hide_cursor();
    let (x, y) = target?;
    if state.tileset.attrib(state.world.tile_at(x, y)).contains(TileAttr::WALKABLE) {
        Some((x, y))
    } else {
        state.print_alert(platform, msg::BLOCKED, Sound::Error);
        None
    }
}

fn use_bomb(state: &mut State, platform: &mut dyn Platform) {
    if state.inventory.bombs == 0 {
        return;
    }
    let Some((x, y)) = select_drop_target(state, platform) else {
        return;
    };
    if state.world.unit_at(x, y).is_some() {
        state.print_alert(platform, msg::BLOCKED, Sound::Error);
        return;
    }
    let bomb = Unit::new(UnitKind::TimeBomb.id(), x, y)
        .with_tile(TILE_BOMB)
        .with_timers(100, 0);
    if state.world.spawn(WEAPON_SLOTS, bomb).is_none() {
        return;
    }
    state.inventory.bombs -= 1;
    hud::display_item(state, platform);
    state.view.redraw = true;
    state.timers.select_timeout = SELECT_TIMEOUT;
    platform.play_sample(Sound::Move);
}

fn use_magnet(state: &mut State, platform: &mut dyn Platform) {
    if state.magnet_active || state.inventory.magnets == 0 {
        return;
    }
    let Some((x, y)) = select_drop_target(state, platform) else {
        return;
    };
    let magnet = Unit::new(UnitKind::Magnet.id(), x, y)
        .with_tile(TILE_MAGNET)
        .with_params(3, 0, 0, 0)
        .with_timers(1, 255);
    if state.world.spawn(WEAPON_SLOTS, magnet).is_none() {
        return;
    }
    state.magnet_active = true;
    state.inventory.magnets -= 1;
    hud::display_item(state, platform);
    state.view.redraw = true;
    platform.play_sample(Sound::Move);
}

/// Knock out every robot in view for a while. Robots hovering over water are electrocuted.
pub fn use_emp(state: &mut State, platform: &mut dyn Platform) {
    if state.inventory.emps == 0 {
        return;
    }
    state.flash_border(FLASH_EMP);
    platform.play_sample(Sound::Emp);
    state.inventory.emps -= 1;
    hud::display_item(state, platform);
    for slot in ENEMY_SLOTS {
        let unit = state.world.units[slot];
        if !unit.is_alive() || !state.view.contains(unit.x, unit.y) {
            continue;
        }
        let on_water = state.world.tile_at(unit.x, unit.y) == TILE_WATER;
        let unit = &mut state.world.units[slot];
        unit.timer_a = 255;
        if on_water {
            unit.kind = UnitKind::WaterDroid.id();
            unit.timer_a = 5;
            unit.timer_b = 3;
            unit.a = 60;
            unit.tile = TILE_SPARKS_FIRST;
        }
    }
    state.print_info(platform, msg::EMP_USED);
    state.timers.select_timeout = SELECT_TIMEOUT;
}

/// Heal up to full health with as many medkits as needed and available.
pub fn use_medkit(state: &mut State, platform: &mut dyn Platform) {
    let health = state.world.player().health;
    if health == PLAYER_MAX_HEALTH {
        return;
    }
    let needed = PLAYER_MAX_HEALTH.saturating_sub(health).max(0) as u8;
    let used = needed.min(state.inventory.medkits);
    state.world.player_mut().health = health + used as i8;
    state.inventory.medkits -= used;
    hud::display_player_health(state, platform);
    hud::display_item(state, platform);
    platform.play_sample(Sound::Medkit);
    state.print_info(platform, msg::MUCH_BETTER);
}

/// Search a crate, plant or similar object next to the player for hidden items.
pub fn search_object(state: &mut State, platform: &mut dyn Platform) {
    platform.set_cursor_shape(CursorShape::Search);
    let target = modal::user_select_object(state, platform);
    state.view.redraw = true;
    let Some((x, y)) = target else {
        platform.hide_cursor();
        return;
    };
    let tile = state.world.tile_at(x, y);
    if !state.tileset.attrib(tile).contains(TileAttr::SEARCHABLE) {
        platform.hide_cursor();
        return;
    }
    if [TILE_BIG_CRATE, TILE_SMALL_CRATE, TILE_PI_CRATE].contains(&tile) {
        let opened = state.tileset.destruct_path(tile);
        state.plot_tile(platform, x, y, opened);
    }

    state.print_info(platform, msg::SEARCHING);
    let bottom = state.text.address(0, state.text.height() - 1);
    let first_dot = bottom + msg::SEARCHING.len() as u16;
    for period in 0..SEARCH_PERIODS {
        state.timers.countdown = SEARCH_PERIOD_TICKS;
        while state.timers.countdown != 0 && !platform.is_quit() {
            state.idle_frame(platform);
        }
        state.text.write(platform, first_dot + period as u16, PERIOD);
    }
    platform.hide_cursor();

    let Some(found) = state.world.hidden_unit_at(x, y) else {
        state.print_info(platform, msg::NOT_FOUND);
        return;
    };
    let item = state.world.units[found];
    state.world.units[found].kind = UnitKind::Empty.id();
    platform.play_sample(Sound::ItemFound);
    info!("found hidden item {} ({}) at ({}, {})", item.kind, item.a, x, y);
    let inventory = &mut state.inventory;
    match item.kind {
        ITEM_KEY => {
            inventory.keys |= match item.a {
                0 => KEY_SPADE,
                1 => KEY_HEART,
                _ => KEY_STAR,
            };
            state.print_info(platform, msg::FOUND_KEY);
            hud::display_keys(state, platform);
        }
        ITEM_BOMB => {
            inventory.bombs = inventory.bombs.wrapping_add(item.a);
            state.print_info(platform, msg::FOUND_BOMB);
            hud::display_item(state, platform);
        }
        ITEM_EMP => {
            inventory.emps = inventory.emps.wrapping_add(item.a);
            state.print_info(platform, msg::FOUND_EMP);
            hud::display_item(state, platform);
        }
        ITEM_PISTOL => {
            inventory.pistol_ammo = inventory.pistol_ammo.saturating_add(item.a);
            state.print_info(platform, msg::FOUND_PISTOL);
            hud::display_weapon(state, platform);
        }
        ITEM_PLASMA => {
            inventory.plasma_ammo = inventory.plasma_ammo.wrapping_add(item.a);
            state.print_info(platform, msg::FOUND_PLASMA);
            hud::display_weapon(state, platform);
        }
        ITEM_MEDKIT => {
            inventory.medkits = inventory.medkits.wrapping_add(item.a);
            state.print_info(platform, msg::FOUND_MEDKIT);
            hud::display_item(state, platform);
        }
        ITEM_MAGNET => {
            inventory.magnets = inventory.magnets.wrapping_add(item.a);
            state.print_info(platform, msg::FOUND_MAGNET);
            hud::display_item(state, platform);
        }
        _ => {}
    }
}

/// Push a movable object onto a free neighbouring tile. A hidden item inside the object moves
/// with it.
pub fn move_object(state: &mut State, platform: &mut dyn Platform) {
    platform.set_cursor_shape(CursorShape::Move);
    let target = modal::user_select_object(state, platform);
    platform.hide_cursor();
    let Some((origin_x, origin_y)) = target else {
        return;
    };
    let hidden = state.world.hidden_unit_at(origin_x, origin_y);
    let object = state.world.tile_at(origin_x, origin_y);
    if !state.tileset.attrib(object).contains(TileAttr::MOVABLE) {
        state.print_alert(platform, msg::CANT_MOVE, Sound::Error);
        return;
    }

    let view = &state.view;
    let cursor = (origin_x.wrapping_sub(view.x), origin_y.wrapping_sub(view.y));
    if !state.view.live_map {
        platform.show_cursor(cursor.0, cursor.1);
    }
    let direction = modal::select_direction(state, platform);
    platform.hide_cursor();
    let Some(direction) = direction else {
        return;
    };

    let (dest_x, dest_y) = direction.step(origin_x, origin_y);
    let destination = state.world.tile_at(dest_x, dest_y);
    if !state.tileset.attrib(destination).contains(TileAttr::MOVE_ONTO)
        || state.world.unit_at(dest_x, dest_y).is_some()
    {
        state.print_alert(platform, msg::BLOCKED, Sound::Error);
        return;
    }
    platform.play_sample(Sound::Move);
    state.world.set_tile(dest_x, dest_y, object);
    let left_behind = if destination == TILE_COMPACTOR {
        TILE_FLOOR
    } else {
        destination
    };
    state.world.set_tile(origin_x, origin_y, left_behind);
    state.view.redraw = true;
    match hidden {
        Some(slot) => {
            let unit = &mut state.world.units[slot];
            unit.x = dest_x;
            unit.y = dest_y;
        }
        None => {
            state.update_live_map_tile(platform, origin_x, origin_y);
            state.update_live_map_tile(platform, dest_x, dest_y);
        }
    }
}

/// Give the player every key and a hundred of everything.
pub fn cheat(state: &mut State, platform: &mut dyn Platform) {
    platform.play_sample(Sound::CycleWeapon);
    warn!("cheat activated");
    let inventory = &mut state.inventory;
    inventory.keys = KEY_SPADE | KEY_HEART | KEY_STAR;
    inventory.pistol_ammo = 100;
    inventory.plasma_ammo = 100;
    inventory.bombs = 100;
    inventory.emps = 100;
    inventory.medkits = 100;
    inventory.magnets = 100;
    inventory.weapon = Weapon::Pistol;
    inventory.item = Item::Bomb;
    state.view.redraw = true;
    hud::display_keys(state, platform);
    hud::display_weapon(state, platform);
    hud::display_item(state, platform);
}

pub fn start_in_game_music(state: &State, platform: &mut dyn Platform) {
    let module = if state.music_on {
        Module::for_map(state.map_index)
    } else {
        Module::SoundFx
    };
    platform.play_module(module);
}

pub fn toggle_music(state: &mut State, platform: &mut dyn Platform) {
    if state.music_on {
        state.print_info(platform, msg::MUSIC_OFF);
        state.music_on = false;
        platform.play_module(Module::SoundFx);
    } else {
        state.print_info(platform, msg::MUSIC_ON);
        state.music_on = true;
        start_in_game_music(state, platform);
    }
}
