//! Uniform random draws and Bernoulli trial primitives.
//!
//! Every stochastic decision in the crate goes through a [`RandomTrial`],
//! which wraps a uniform(0,1) source and owns its generator outright. There
//! is no global random state: parallel workers each construct their own
//! independently seeded trial via [`RandomTrial::seeded`], so draw order
//! within a stream depends only on that worker's call sequence. Sharing one
//! trial across concurrently updated people would make draw order, and
//! therefore simulation outcome, non-reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::hashing::hash_str;

/// A uniform(0,1) draw source with Bernoulli trial helpers.
///
/// Each method call advances the underlying stream by exactly one draw.
/// Callers that rely on draw-order reproducibility must invoke these in a
/// fixed, documented order (see [`Person::update`](crate::people::Person::update)).
pub struct RandomTrial<R = StdRng> {
    rng: R,
}

impl RandomTrial<StdRng> {
    /// Creates an independently seeded named stream. Streams with the same
    /// `base_seed` and `stream_name` are identical; distinct names yield
    /// distinct streams, so each parallel execution unit gets its own by
    /// naming it.
    pub fn seeded(base_seed: u64, stream_name: &str) -> Self {
        let seed_offset = hash_str(stream_name);
        Self {
            rng: StdRng::seed_from_u64(base_seed.wrapping_add(seed_offset)),
        }
    }
}

impl<R: Rng> RandomTrial<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Makes one draw on the uniform generator, a value in [0, 1).
    pub fn draw(&mut self) -> f64 {
        self.rng.random()
    }

    /// Performs a Bernoulli trial with the given probability.
    pub fn bernoulli(&mut self, probability: f64) -> bool {
        self.draw() < probability
    }

    /// Performs a Bernoulli trial with the product of the given
    /// probabilities, fusing two independent trials into a single draw.
    pub fn bernoulli_product(&mut self, probability_a: f64, probability_b: f64) -> bool {
        self.draw() < probability_a * probability_b
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use rand::RngCore;

    /// A generator that replays a scripted sequence of uniform values,
    /// cycling when exhausted. rand's standard f64 sampler takes the top 53
    /// bits of `next_u64`, so each scripted value is stored pre-shifted.
    pub(crate) struct SequenceRng {
        values: Vec<u64>,
        next: usize,
    }

    impl SequenceRng {
        pub(crate) fn new(uniforms: &[f64]) -> Self {
            let values = uniforms
                .iter()
                .map(|u| {
                    assert!((0.0..1.0).contains(u));
                    ((u * (1u64 << 53) as f64) as u64) << 11
                })
                .collect();
            Self { values, next: 0 }
        }
    }

    impl RngCore for SequenceRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            value
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::testing::SequenceRng;
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn draws_are_uniform_unit_interval() {
        let mut trial = RandomTrial::seeded(42, "test");
        for _ in 0..1000 {
            let u = trial.draw();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn same_seed_and_name_reproduces_stream() {
        let mut a = RandomTrial::seeded(42, "presence");
        let mut b = RandomTrial::seeded(42, "presence");
        for _ in 0..100 {
            assert_eq!(a.draw().to_bits(), b.draw().to_bits());
        }
    }

    #[test]
    fn distinct_names_give_distinct_streams() {
        let mut a = RandomTrial::seeded(42, "presence");
        let mut b = RandomTrial::seeded(42, "transmission");
        assert_ne!(a.draw().to_bits(), b.draw().to_bits());
    }

    #[test]
    fn distinct_seeds_give_distinct_streams() {
        let mut a = RandomTrial::seeded(42, "presence");
        let mut b = RandomTrial::seeded(88, "presence");
        assert_ne!(a.draw().to_bits(), b.draw().to_bits());
    }

    #[test]
    fn scripted_sequence_replays_exactly() {
        let mut trial = RandomTrial::new(SequenceRng::new(&[0.0, 0.25, 0.5]));
        assert_approx_eq!(trial.draw(), 0.0);
        assert_approx_eq!(trial.draw(), 0.25);
        assert_approx_eq!(trial.draw(), 0.5);
        // Cycles back to the start.
        assert_approx_eq!(trial.draw(), 0.0);
    }

    #[test]
    fn bernoulli_compares_draw_against_probability() {
        let mut trial = RandomTrial::new(SequenceRng::new(&[0.3]));
        assert!(trial.bernoulli(0.5));
        assert!(!trial.bernoulli(0.2));
        assert!(!trial.bernoulli(0.0));
        assert!(trial.bernoulli(1.0));
    }

    #[test]
    fn bernoulli_product_fuses_probabilities_in_one_draw() {
        // 0.6 * 0.5 = 0.3: a draw of 0.25 succeeds, 0.35 fails.
        let mut trial = RandomTrial::new(SequenceRng::new(&[0.25, 0.35]));
        assert!(trial.bernoulli_product(0.6, 0.5));
        assert!(!trial.bernoulli_product(0.6, 0.5));
    }

    #[test]
    fn each_call_advances_stream_by_one_draw() {
        let mut a = RandomTrial::seeded(7, "advance");
        let mut b = RandomTrial::seeded(7, "advance");
        let _ = a.bernoulli(0.5);
        let first = b.draw();
        // After one draw each, both streams are at the same position.
        assert_eq!(a.draw().to_bits(), b.draw().to_bits());
        let _ = first;
    }
}
