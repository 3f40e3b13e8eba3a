use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of every random draw the roster generator makes.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn roll(&mut self) -> f64;

    /// Uniform integer in `[min, max]`.
    fn int_in(&mut self, min: u32, max: u32) -> u32;

    /// Uniform index in `[0, len)`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;

    fn bytes(&mut self) -> [u8; 16];
}

pub fn pick<'a, T, R>(rng: &mut R, items: &'a [T]) -> &'a T
where
    R: RandomSource + ?Sized,
{
    &items[rng.index(items.len())]
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn roll(&mut self) -> f64 {
        self.0.random::<f64>()
    }

    fn int_in(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }

    fn index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }

    fn bytes(&mut self) -> [u8; 16] {
        self.0.random()
    }
}
