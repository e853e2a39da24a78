use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Capability to produce uniform draws in `[0, 1)`.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Pseudo-random source owned by a single simulation run.
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl UniformSource for SeededSource {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, wrapping around when exhausted.
/// An empty list always yields 0.
#[derive(Clone, Debug)]
pub struct ReplaySource {
    values: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ReplaySource {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_source_is_deterministic() {
        let mut a = SeededSource::new(42);
        let mut b = SeededSource::new(42);
        let draws_a: Vec<f64> = (0..8).map(|_| a.next_uniform()).collect();
        let draws_b: Vec<f64> = (0..8).map(|_| b.next_uniform()).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|value| (0.0..1.0).contains(value)));
    }

    #[test]
    fn replay_source_wraps_around() {
        let mut source = ReplaySource::new(vec![0.1, 0.2]);
        let draws: Vec<f64> = (0..5).map(|_| source.next_uniform()).collect();
        assert_eq!(draws, vec![0.1, 0.2, 0.1, 0.2, 0.1]);
        assert_eq!(source.draws(), 5);
    }

    #[test]
    fn empty_replay_source_yields_zero() {
        let mut source = ReplaySource::new(Vec::new());
        assert_eq!(source.next_uniform(), 0.0);
    }

    #[test]
    fn mutable_reference_is_a_source() {
        fn draw(mut source: impl UniformSource) -> f64 {
            source.next_uniform()
        }
        let mut source = ReplaySource::new(vec![0.7, 0.3]);
        assert_eq!(draw(&mut source), 0.7);
        assert_eq!(draw(&mut source), 0.3);
    }
}
