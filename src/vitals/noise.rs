// Noise source abstraction for the signal model
// Production draws come from an entropy-seeded PRNG; tests inject fixed sequences

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// A stream of independent standard-normal samples
pub trait NoiseSource {
    /// Draw the next N(0, 1) sample
    fn sample(&mut self) -> f64;
}

/// Gaussian noise backed by an owned PRNG
pub struct GaussianNoise {
    rng: StdRng,
}

impl GaussianNoise {
    /// Entropy-seeded source for production runs
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministically seeded source for reproducible simulations
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GaussianNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for GaussianNoise {
    fn sample(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// Replays a fixed sequence of draws, then falls back to zero
pub struct FixedNoise {
    samples: Vec<f64>,
    cursor: usize,
}

impl FixedNoise {
    /// Source that replays `samples` in order
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// All-zero source: the signal model becomes fully deterministic
    pub fn silent() -> Self {
        Self::from_samples(Vec::new())
    }
}

impl NoiseSource for FixedNoise {
    fn sample(&mut self) -> f64 {
        let value = self.samples.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_noise_replays_then_zeros() {
        let mut noise = FixedNoise::from_samples(vec![1.5, -0.5]);
        assert_eq!(noise.sample(), 1.5);
        assert_eq!(noise.sample(), -0.5);
        assert_eq!(noise.sample(), 0.0);
        assert_eq!(noise.sample(), 0.0);
    }

    #[test]
    fn test_silent_noise_is_all_zero() {
        let mut noise = FixedNoise::silent();
        for _ in 0..10 {
            assert_eq!(noise.sample(), 0.0);
        }
    }

    #[test]
    fn test_seeded_gaussian_is_reproducible() {
        let mut a = GaussianNoise::seeded(7);
        let mut b = GaussianNoise::seeded(7);

        for _ in 0..16 {
            assert_eq!(a.sample(), b.sample());
        }
    }

    #[test]
    fn test_gaussian_samples_are_roughly_centered() {
        let mut noise = GaussianNoise::seeded(42);
        let n = 10_000;
        let mean = (0..n).map(|_| noise.sample()).sum::<f64>() / n as f64;

        assert!(mean.abs() < 0.1, "sample mean {} too far from 0", mean);
    }
}
