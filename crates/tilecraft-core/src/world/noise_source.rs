//! Fractal height noise

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use super::worldgen_config::NoiseParams;

/// Deterministic 1D height function built from multi-octave Perlin noise
///
/// The sample coordinate is used as-is (frequency 1.0); callers apply their
/// own scaling. Output is remapped from the noise range `[-1, 1]` to `[0, 1]`.
pub struct NoiseSource {
    noise: FastNoiseLite,
}

impl NoiseSource {
    pub fn new(seed: u64, params: &NoiseParams) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(1.0));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(params.octaves as i32));
        noise.set_fractal_lacunarity(Some(params.lacunarity));
        noise.set_fractal_gain(Some(params.persistence));
        Self { noise }
    }

    /// Normalized height in `[0, 1]` at noise coordinate `nx`
    pub fn height_at(&self, nx: f32) -> f32 {
        let raw = self.noise.get_noise_2d(nx, 0.0);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
