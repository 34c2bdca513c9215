//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through SubsystemRng instances derived
//! from the single master seed stored on the SimConfig.
//!
//! Pursuit and flight each get their own stream, seeded from
//! (master_seed XOR slot_index * golden ratio). This means:
//!   - Zombie tie-breaks never shift the human stream, or vice versa.
//!   - Each stream is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Uniform choice among tied move candidates.
///
/// The movement planner only asks for a pick when two or more
/// candidates tie, so a stationary entity never consumes randomness.
pub trait TieBreaker {
    /// Return an index in [0, n). `n` is always >= 2.
    fn pick(&mut self, n: usize) -> usize;
}

/// A named, deterministic RNG stream.
pub struct SubsystemRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SubsystemRng {
    /// Create a stream from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::Rng;
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }
}

impl TieBreaker for SubsystemRng {
    fn pick(&mut self, n: usize) -> usize {
        self.next_u64_below(n as u64) as usize
    }
}

/// Hands out the per-slot streams for a single run.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_slot(&self, slot: RngSlot) -> SubsystemRng {
        SubsystemRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable slot assignments.
/// NEVER reorder or remove entries. Only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngSlot {
    Pursuit = 0,
    Flight  = 1,
}

impl RngSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pursuit => "pursuit",
            Self::Flight  => "flight",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = RngBank::new(12345).for_slot(RngSlot::Pursuit);
        let mut b = RngBank::new(12345).for_slot(RngSlot::Pursuit);

        let draws_a: Vec<u64> = (0..16).map(|_| a.next_u64()).collect();
        let draws_b: Vec<u64> = (0..16).map(|_| b.next_u64()).collect();
        assert_eq!(draws_a, draws_b, "Same seed should produce the same stream");
    }

    #[test]
    fn slots_are_independent_streams() {
        let bank = RngBank::new(12345);
        let mut pursuit = bank.for_slot(RngSlot::Pursuit);
        let mut flight = bank.for_slot(RngSlot::Flight);

        let draws_p: Vec<u64> = (0..8).map(|_| pursuit.next_u64()).collect();
        let draws_f: Vec<u64> = (0..8).map(|_| flight.next_u64()).collect();
        assert_ne!(draws_p, draws_f);
        assert_eq!(pursuit.name, "pursuit");
        assert_eq!(flight.name, "flight");
    }

    #[test]
    fn pick_stays_in_range() {
        let mut rng = RngBank::new(7).for_slot(RngSlot::Flight);
        for n in 2..10 {
            for _ in 0..100 {
                assert!(rng.pick(n) < n);
            }
        }
    }
}
