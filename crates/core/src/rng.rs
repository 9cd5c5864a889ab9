//! Piece randomness - seeded uniform draws behind an injectable interface
//!
//! The session pulls its next piece kind through [`PieceSource`] so tests
//! and external drivers can substitute a deterministic sequence. The
//! default source draws each kind independently and uniformly from the
//! catalog, seeded for reproducibility.

use blockfall_types::PieceKind;

/// Source of the next piece kind to spawn
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Uniform per-draw piece source (each draw independent, no bag)
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        let index = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[index]
    }
}

/// Fixed, cycling piece sequence for deterministic scenarios
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl ScriptedSource {
    /// Create a source cycling through the given kinds forever.
    /// An empty script falls back to the I piece.
    pub fn new(kinds: Vec<PieceKind>) -> Self {
        Self { kinds, next: 0 }
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        match self.kinds.get(self.next) {
            Some(&kind) => {
                self.next = (self.next + 1) % self.kinds.len();
                kind
            }
            None => PieceKind::I,
        }
    }
}
