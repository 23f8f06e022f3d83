//! Map window renderer.
//!
//! Every redraw first collects the sprites of all visible units into a per cell foreground
//! buffer, then walks the window and only draws cells whose background tile, foreground tile or
//! one of their variants differ from the previous redraw.

use crate::game::consts::{
    MAP_HEIGHT, MAP_WIDTH, SPRITE_SLOTS, TILE_BOMB, TILE_DEAD_ROBOT, TILE_DEMATERIALIZE,
    TILE_EVILBOT_FIRST, TILE_EVILBOT_LAST, TILE_MAGNET, TILE_PLAYER,
};
use crate::game::msg::{petscii, CINEMA};
use crate::game::State;
use crate::entity::movement::Direction;
use crate::platform::Platform;

pub const TILE_SIZE: u16 = 24;
const INVALID: u8 = 255;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Sprite {
    tile: u8,
    direction: Direction,
    /// the unit's `a` field, dead robots remember their former type there
    kind: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    bg: u8,
    bg_variant: u8,
    fg: u8,
    fg_variant: u8,
}

impl Cell {
    const INVALID: Cell = Cell {
        bg: INVALID,
        bg_variant: 0,
        fg: 0,
        fg_variant: 0,
    };
}

pub struct MapView {
    pub x: u8,
    pub y: u8,
    width: u8,
    height: u8,
    /// the 11x7 window follows the player without clamping to the map edges
    classic: bool,
    pub redraw: bool,
    pub live_map: bool,
    pub live_map_robots: bool,
    blink: u8,
    pub anim_state: u8,
    pub cinema_state: u8,
    precalc: Vec<Sprite>,
    previous: Vec<Cell>,
}

impl MapView {
    pub fn new(width: u8, height: u8) -> Self {
        let cells = usize::from(width) * usize::from(height);
        MapView {
            x: 0,
            y: 0,
            width,
            height,
            classic: width == 11 && height == 7,
            redraw: true,
            live_map: false,
            live_map_robots: false,
            blink: 0,
            anim_state: 0,
            cinema_state: 0,
            precalc: vec![Sprite::default(); cells],
            previous: vec![Cell::INVALID; cells],
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn is_classic(&self) -> bool {
        self.classic
    }

    /// Whether the map position lies inside the window.
    pub fn contains(&self, x: u8, y: u8) -> bool {
        x >= self.x
            && u16::from(x) < u16::from(self.x) + u16::from(self.width)
            && y >= self.y
            && u16::from(y) < u16::from(self.y) + u16::from(self.height)
    }

    /// Place the window around `(x, y)` and request a redraw.
    pub fn center_on(&mut self, x: u8, y: u8) {
        let half_w = self.width / 2;
        let half_h = self.height / 2;
        if self.classic {
            self.x = x.wrapping_sub(half_w);
            self.y = y.wrapping_sub(half_h);
        } else {
            let max_x = (MAP_WIDTH - usize::from(self.width)) as u8;
            let max_y = (MAP_HEIGHT - usize::from(self.height)) as u8;
            self.x = x.saturating_sub(half_w).min(max_x);
            self.y = y.saturating_sub(half_h).min(max_y);
        }
        self.redraw = true;
    }

    /// Forget what was drawn so the next redraw repaints every cell.
    pub fn invalidate(&mut self) {
        for cell in &mut self.previous {
            cell.bg = INVALID;
        }
    }

    fn cell_index(&self, x: u8, y: u8) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        let column = usize::from(x - self.x);
        let row = usize::from(y - self.y);
        Some(row * usize::from(self.width) + column)
    }
}

fn background_variant(tile: u8, anim_state: u8) -> u8 {
    match tile {
        // water, flag, trash compactor, server
        204 | 66 | 148 | 143 => anim_state & 3,
        // hvac
        196 | 197 | 200 | 201 => anim_state & 1,
        // cinema
        20..=22 => anim_state,
        _ => 0,
    }
}

fn facing_variant(direction: Direction) -> u8 {
    match direction {
        Direction::Up => 8,
        Direction::Left => 12,
        Direction::Right => 4,
        Direction::Down => 0,
    }
}

/// Collect the sprites of the player and all visible robots and weapon fire. Bombs and magnets
/// stay underneath whatever already occupies their cell.
fn precalculate(state: &mut State) {
    let State { view, world, .. } = state;
    view.precalc.fill(Sprite::default());
    for slot in SPRITE_SLOTS {
        let unit = &world.units[slot];
        if slot != 0 && !unit.is_alive() {
            continue;
        }
        let Some(index) = view.cell_index(unit.x, unit.y) else {
            continue;
        };
        if (unit.tile == TILE_BOMB || unit.tile == TILE_MAGNET) && view.precalc[index].tile != 0 {
            continue;
        }
        view.precalc[index] = Sprite {
            tile: unit.tile,
            direction: unit.direction,
            kind: unit.a,
        };
    }
}

/// Redraw every changed cell of the map window.
pub fn draw_map_window(state: &mut State, platform: &mut dyn Platform) {
    precalculate(state);
    let weapon = state.inventory.weapon as u8;
    let walk_frame = state.walk_frame;
    let dematerialize_frame = state.dematerialize_frame;
    let State {
        view, world, text, ..
    } = state;
    view.redraw = false;

    let text_width = text.width();
    let mut drawn = 0;
    for row in 0..view.height {
        for column in 0..view.width {
            let index = usize::from(row) * usize::from(view.width) + usize::from(column);
            let bg = world.tile_at(view.x.wrapping_add(column), view.y.wrapping_add(row));
            let bg_variant = background_variant(bg, view.anim_state);
            let sprite = view.precalc[index];
            let mut fg = sprite.tile;
            let mut fg_variant = 0;
            if fg == TILE_PLAYER || (TILE_EVILBOT_FIRST..=TILE_EVILBOT_LAST).contains(&fg) {
                fg_variant = facing_variant(sprite.direction);
                if fg == TILE_PLAYER {
                    fg_variant += walk_frame + (weapon << 4);
                }
            } else if fg == TILE_DEMATERIALIZE {
                if dematerialize_frame < 7 {
                    fg_variant = dematerialize_frame;
                } else {
                    fg = 0;
                }
            } else if fg == TILE_DEAD_ROBOT {
                fg_variant = match sprite.kind {
                    17 | 18 => 1,
                    9 => 2,
                    _ => 0,
                };
            }

            let cell = Cell {
                bg,
                bg_variant,
                fg,
                fg_variant,
            };
            if view.previous[index] == cell {
                continue;
            }
            view.previous[index] = cell;
            drawn += 1;
            let px = u16::from(column) * TILE_SIZE;
            let py = u16::from(row) * TILE_SIZE;
            if fg != 0 {
                platform.render_tiles(bg, fg, px, py, bg_variant, fg_variant);
                continue;
            }
            platform.render_tile(bg, px, py, bg_variant, false);

            // the cinema screen spans three tiles, each shows a slice of the marquee
            let (first_column, offsets): (u16, &[usize]) = match bg {
                20 => (1, &[0, 1]),
                21 => (0, &[2, 3, 4]),
                22 => (0, &[5]),
                _ => continue,
            };
            let base = u16::from(row) * 3 * text_width + u16::from(column) * 3 + text_width;
            for (i, offset) in offsets.iter().enumerate() {
                let glyph = CINEMA
                    .as_bytes()
                    .get(usize::from(view.cinema_state) + offset)
                    .map_or(32, |&c| petscii(char::from(c)));
                text.write_colored(platform, base + first_column + i as u16, glyph, 1, 0);
            }
        }
    }
    trace!("map window redrawn, {} cells changed", drawn);
}

/// Plot the unit dots over the live map and advance the player blink.
pub fn draw_live_map(state: &mut State, platform: &mut dyn Platform) {
    let blink = state.view.blink < 128;
    platform.render_live_map_units(
        state.world.map(),
        &state.world.units,
        blink,
        state.view.live_map_robots,
    );
    state.view.blink = state.view.blink.wrapping_add(10);
}

pub fn toggle_live_map(state: &mut State, platform: &mut dyn Platform) {
    if state.view.live_map {
        state.view.live_map = false;
        state.view.invalidate();
    } else {
        state.view.live_map = true;
        platform.render_live_map(state.world.map());
    }
    state.view.redraw = true;
}

pub fn toggle_live_map_robots(state: &mut State) {
    state.view.live_map_robots = !state.view.live_map_robots;
}
