// pursuit_sim/src/simulation/core/prng.rs

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use pursuit_core::types::Vec3;

/// A newtype wrapper around `ChaCha8Rng`.
/// This is the central, deterministic pseudo-random number generator for a scenario run.
pub struct SimulationRng(pub ChaCha8Rng);

impl SimulationRng {
    /// Seeded runs are reproducible; without a seed the OS supplies entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(ChaCha8Rng::seed_from_u64(seed)),
            None => Self(ChaCha8Rng::from_entropy()),
        }
    }

    /// Adds independent Gaussian noise to each component.
    pub fn perturb(&mut self, p: &Vec3, noise: &Normal<f64>) -> Vec3 {
        p.map(|c| c + noise.sample(&mut self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_noise() {
        let noise = Normal::new(0.0, 1.0).unwrap();
        let mut a = SimulationRng::new(Some(5));
        let mut b = SimulationRng::new(Some(5));
        let p = Vec3::new(1.0, 2.0, 3.0);
        for _ in 0..10 {
            assert_eq!(a.perturb(&p, &noise), b.perturb(&p, &noise));
        }
    }

    #[test]
    fn zero_stddev_is_noise_free() {
        let noise = Normal::new(0.0, 0.0).unwrap();
        let mut rng = SimulationRng::new(None);
        let p = Vec3::new(-4.0, 0.5, 9.0);
        assert_eq!(rng.perturb(&p, &noise), p);
    }
}
