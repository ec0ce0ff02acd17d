//! RNG module - deterministic piece sequences
//!
//! Feeds the decision session with reproducible input. Two orders are offered:
//!
//! - **Uniform**: every piece drawn independently from the seven kinds
//! - **7-bag**: each bag holds one of each kind, shuffled, drawn until empty
//!
//! Both are driven by a simple LCG so the same seed always yields the same stream.

use crate::types::PieceKind;

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
        // High bits of an LCG are far less correlated than the low ones.
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// How a [`PieceStream`] picks the next kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamOrder {
    #[default]
    Uniform,
    SevenBag,
}

/// Endless deterministic piece generator
#[derive(Debug, Clone)]
pub struct PieceStream {
    order: StreamOrder,
    rng: SimpleRng,
    /// Current bag of pieces (7-bag order only)
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
}

impl PieceStream {
    pub fn new(seed: u32, order: StreamOrder) -> Self {
        Self {
            order,
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            // Forces a shuffle on the first draw.
            bag_index: PieceKind::ALL.len(),
        }
    }

    pub fn uniform(seed: u32) -> Self {
        Self::new(seed, StreamOrder::Uniform)
    }

    pub fn seven_bag(seed: u32) -> Self {
        Self::new(seed, StreamOrder::SevenBag)
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceKind {
        match self.order {
            StreamOrder::Uniform => {
                PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            StreamOrder::SevenBag => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let piece = self.bag[self.bag_index];
                self.bag_index += 1;
                piece
            }
        }
    }
}

impl Iterator for PieceStream {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}
