/// Injected source of uniform randomness in `[0, 1)`.
///
/// Every random decision the wobbler and the animator make goes through this trait, so tests can
/// swap in [`FixedSequence`] or a seeded [`Rng64`] and get reproducible output.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Small seeded generator (SplitMix64). Deterministic across platforms.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Next sample in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

impl RandomSource for Rng64 {
    fn next_unit(&mut self) -> f64 {
        self.next_f64_01()
    }
}

/// Adapter for any `rand` generator.
#[derive(Clone, Debug)]
pub struct RandSource<R>(pub R);

impl<R: rand::RngCore> RandomSource for RandSource<R> {
    fn next_unit(&mut self) -> f64 {
        rand::Rng::gen_range(&mut self.0, 0.0..1.0)
    }
}

/// Ambient, non-reproducible randomness from the thread-local `rand` generator.
pub type ThreadRandom = RandSource<rand::rngs::ThreadRng>;

impl ThreadRandom {
    /// Use the thread-local generator.
    pub fn new() -> Self {
        RandSource(rand::thread_rng())
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
///
/// An empty list yields `0.5`, the value that maps to a zero offset.
#[derive(Clone, Debug, Default)]
pub struct FixedSequence {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedSequence {
    /// Replay `values` in order.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Always return `v`.
    pub fn constant(v: f64) -> Self {
        Self::new(vec![v])
    }

    /// Number of samples handed out so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for FixedSequence {
    fn next_unit(&mut self) -> f64 {
        let v = if self.values.is_empty() {
            0.5
        } else {
            self.values[self.cursor % self.values.len()]
        };
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
