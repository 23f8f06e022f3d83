//! The character layer: a mirror of every glyph written to the screen plus the scrolling info panel
//! at the bottom left.

use crate::game::msg::petscii;
use crate::platform::Platform;

pub const DEFAULT_COLOR: u8 = 10;

pub struct TextLayer {
    cells: Vec<u8>,
    width: u16,
    height: u16,
}

impl TextLayer {
    pub fn new(width: u16, height: u16) -> Self {
        TextLayer {
            cells: vec![32; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn address(&self, column: u16, row: u16) -> u16 {
        row * self.width + column
    }

    pub fn glyph_at(&self, address: u16) -> u8 {
        self.cells.get(usize::from(address)).copied().unwrap_or(32)
    }

    pub fn write(&mut self, platform: &mut dyn Platform, address: u16, glyph: u8) {
        self.write_colored(platform, address, glyph, DEFAULT_COLOR, 0);
    }

    pub fn write_colored(
        &mut self,
        platform: &mut dyn Platform,
        address: u16,
        glyph: u8,
        color: u8,
        row_offset: u8,
    ) {
        if let Some(cell) = self.cells.get_mut(usize::from(address)) {
            *cell = glyph;
            platform.write_glyph(address, glyph, color, row_offset);
        }
    }

    pub fn write_str(&mut self, platform: &mut dyn Platform, address: u16, text: &str, color: u8) {
        for (i, c) in text.chars().enumerate() {
            self.write_colored(platform, address + i as u16, petscii(c), color, 0);
        }
    }

    /// Three digit decimal number.
    pub fn write_decimal(&mut self, platform: &mut dyn Platform, address: u16, value: u8, color: u8) {
        for (i, digit) in crate::util::decimal_digits(value).iter().enumerate() {
            self.write_colored(platform, address + i as u16, *digit, color, 0);
        }
    }

    /// Scroll the info panel up by one line and clear the bottom line.
    pub fn scroll_info(&mut self, platform: &mut dyn Platform) {
        let (screen_w, screen_h) = platform.screen_size();
        platform.copy_rect(0, screen_h - 16, 0, screen_h - 24, screen_w - 56, 16);
        platform.clear_rect(0, screen_h - 8, screen_w - 56, 8);
        platform.present_frame(true);

        let width = usize::from(self.width);
        let panel = usize::from(self.width.saturating_sub(7));
        let bottom = usize::from(self.height - 1) * width;
        for row in [bottom - 2 * width, bottom - width] {
            let (upper, lower) = self.cells.split_at_mut(row + width);
            upper[row..row + panel].copy_from_slice(&lower[..panel]);
        }
        self.cells[bottom..bottom + panel].fill(32);
    }

    /// Print `text` on a fresh info line, every `'\n'` scrolls again.
    pub fn print_info(&mut self, platform: &mut dyn Platform, text: &str) {
        self.scroll_info(platform);
        let bottom = self.address(0, self.height - 1);
        let mut column = 0;
        for c in text.chars() {
            if c == '\n' {
                column = 0;
                self.scroll_info(platform);
            } else {
                self.write(platform, bottom + column, petscii(c));
                column += 1;
            }
        }
    }

    /// Text of a screen row, used by tests and debug dumps.
    pub fn row_text(&self, row: u16) -> String {
        let start = usize::from(self.address(0, row));
        self.cells[start..start + usize::from(self.width)]
            .iter()
            .map(|&glyph| match glyph {
                1..=26 => char::from(glyph + 96),
                32..=95 => char::from(glyph),
                _ => ' ',
            })
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    pub fn clear(&mut self) {
        self.cells.fill(32);
    }
}
