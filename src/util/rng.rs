//! Seedable randomness. The only consumer inside the simulation is the 8 bit feedback shift
//! register that drives haywire robots, which is seeded once per game from [`GameRng`].

use crate::game;

use rand::{Rng, RngCore, SeedableRng};
use rand_core::{impls, Error};
use rand_isaac::isaac64::Isaac64Rng;

// Type of RNG to be used in-game.
pub type GameRng = SeededRng<Isaac64Rng>;

#[derive(Clone, Debug)]
pub struct SeededRng<T> {
    inner: T,
}

impl<T: SeedableRng + 'static> SeededRng<T> {
    pub fn new_from_u64_seed(seed: u64) -> SeededRng<T> {
        SeededRng {
            inner: SeedableRng::seed_from_u64(seed),
        }
    }

    /// Seed from the configured seed or, if there is none, from the thread rng.
    pub fn from_env() -> SeededRng<T> {
        let seed = game::env()
            .seed
            .unwrap_or_else(|| rand::thread_rng().next_u64());
        info!("using rng seed: {}", seed);
        SeededRng::new_from_u64_seed(seed)
    }
}

impl<T: Rng> RngCore for SeededRng<T> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest);
    }

    #[allow(clippy::unit_arg)]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        Ok(self.fill_bytes(dest))
    }
}

/// Galois style shift register with tap mask 0x1d. Zero is not a valid state and is replaced by
/// the tap mask on the next step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lfsr(u8);

impl Lfsr {
    pub const fn new(seed: u8) -> Self {
        Lfsr(seed)
    }

    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        Lfsr(rng.gen())
    }

    pub fn next(&mut self) -> u8 {
        self.0 = match self.0 {
            0 => 0x1d,
            state if state & 0x80 != 0 => (state << 1) ^ 0x1d,
            state => state << 1,
        };
        self.0
    }
}
