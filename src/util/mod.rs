//! Utilities that are unrelated to any of the main game modules.

pub mod rng;
pub mod timer;

pub use timer::Timer;

/// Write the three decimal digits of `value` as screen codes, most significant first.
pub fn decimal_digits(value: u8) -> [u8; 3] {
    [
        0x30 + value / 100,
        0x30 + value / 10 % 10,
        0x30 + value % 10,
    ]
}
