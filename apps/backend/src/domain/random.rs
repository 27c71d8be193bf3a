//! Injectable random source for slot assignment and nomination.
//!
//! Production sessions draw from [`SeededRng`], which wraps ChaCha8 and can be
//! pinned to a seed for reproducible games. Tests script exact draws with
//! [`ScriptedRng`].

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform index source.
pub trait TurnRng: Send {
    /// Draw uniformly from `0..bound`. `bound` is never zero.
    fn index_below(&mut self, bound: usize) -> usize;
}

/// ChaCha8-backed source; OS entropy unless a seed is given.
pub struct SeededRng {
    rng: ChaCha8Rng,
}

impl SeededRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            ChaCha8Rng::seed_from_u64(s)
        } else {
            ChaCha8Rng::from_os_rng()
        };
        Self { rng }
    }
}

impl TurnRng for SeededRng {
    fn index_below(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Replays a fixed sequence of draws, each reduced modulo the requested
/// bound. Once the script is exhausted it falls back to a ChaCha8 stream
/// seeded with 0, so rejection sampling can never spin forever.
pub struct ScriptedRng {
    draws: VecDeque<usize>,
    fallback: SeededRng,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: SeededRng::new(Some(0)),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl TurnRng for ScriptedRng {
    fn index_below(&mut self, bound: usize) -> usize {
        match self.draws.pop_front() {
            Some(draw) => draw % bound,
            None => self.fallback.index_below(bound),
        }
    }
}
