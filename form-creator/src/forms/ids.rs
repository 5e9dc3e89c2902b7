//! Element id generation
//!
//! Ids only need to be unique within one rendered form. The default
//! generator draws a random number from 1000-9999, which makes collisions
//! unlikely but possible.

use rand::Rng;

/// Source of the numeric component in element ids
pub trait IdGenerator {
    /// Next id component
    fn next_id(&mut self) -> String;
}

/// Random ids in the range 1000-9999
#[derive(Debug, Default)]
pub struct RandomIds {
    rng: rand::rngs::ThreadRng,
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        self.rng.gen_range(1000..=9999_u32).to_string()
    }
}

/// Deterministic counter, useful for snapshot-style tests
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    /// Start counting at `start`
    #[must_use]
    pub const fn starting_at(start: u32) -> Self {
        Self { next: start }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1000)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id.to_string()
    }
}
