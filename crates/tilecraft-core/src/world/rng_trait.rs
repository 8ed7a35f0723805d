//! RNG trait abstraction for structure placement
//!
//! Structure placement only needs a handful of draws. Placement code takes
//! `&mut impl WorldRng`, the generator hands it a seeded `Xoshiro256StarStar`
//! per chunk.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Random number generator trait for world generation
pub trait WorldRng {
    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Uniform integer in `min..=max`
    fn gen_range_inclusive(&mut self, min: i32, max: i32) -> i32;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }

    /// Fair coin flip
    fn coin_flip(&mut self) -> bool {
        self.check_probability(0.5)
    }
}

impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        rand::Rng::gen_range(self, min..=max)
    }
}

/// Seeded RNG for one chunk, derived from the world seed and chunk index
///
/// The mix is a SplitMix64 finalizer so neighbouring chunk indices get
/// uncorrelated streams.
pub fn chunk_rng(world_seed: u64, chunk_index: i32) -> Xoshiro256StarStar {
    let mut z = world_seed ^ (chunk_index as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    Xoshiro256StarStar::seed_from_u64(z)
}
