//! Multi-octave value noise.
//!
//! Each octave draws a `width` x `height` lattice of uniform values from one
//! shared linear-congruential stream, samples it with bilinear interpolation
//! and toroidal wraparound, and the octaves are summed with geometric
//! amplitude falloff. The result is normalized by the total amplitude, so
//! every value lies in `[0, 1)`.
//!
//! The field is a pure function of its inputs: the same dimensions,
//! parameters, and seed always produce the same values.

use burrow_common::ConfigError;
use serde::{Deserialize, Serialize};

/// LCG multiplier.
const LCG_MUL: u64 = 9301;
/// LCG increment.
const LCG_INC: u64 = 49297;
/// LCG modulus; outputs are `state / LCG_MOD`.
const LCG_MOD: u64 = 233_280;

/// Largest accepted octave count. Each octave holds a full lattice, and
/// the frequency doubles per octave under the default lacunarity.
pub const MAX_OCTAVES: u32 = 32;

/// Shape parameters shared by all noise layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Lattice cells per tile divisor (larger = smoother)
    pub scale: f64,
    /// Number of octaves summed
    pub octaves: u32,
    /// Amplitude multiplier per octave
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            scale: 50.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl NoiseParams {
    /// Checks that the parameters describe a bounded field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if self.octaves == 0 {
            return Err(ConfigError::NoOctaves);
        }
        if self.octaves > MAX_OCTAVES {
            return Err(ConfigError::TooManyOctaves {
                octaves: self.octaves,
                max: MAX_OCTAVES,
            });
        }
        if !(self.persistence.is_finite() && self.persistence > 0.0) {
            return Err(ConfigError::InvalidPersistence(self.persistence));
        }
        if !(self.lacunarity.is_finite() && self.lacunarity > 0.0) {
            return Err(ConfigError::InvalidLacunarity(self.lacunarity));
        }
        Ok(())
    }

    /// Same parameters with the scale divided by `divisor`.
    #[must_use]
    pub fn with_scale_divided(mut self, divisor: f64) -> Self {
        self.scale /= divisor;
        self
    }
}

/// Seeded linear-congruential generator driving the noise lattices.
///
/// `state = (state * 9301 + 49297) mod 233280`, output `state / 233280`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcgRandom {
    state: u64,
}

impl LcgRandom {
    /// Creates a generator from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Reducing first gives the same stream and keeps the product in range
        Self {
            state: seed % LCG_MOD,
        }
    }

    /// Advances the stream and returns a value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MUL + LCG_INC) % LCG_MOD;
        self.state as f64 / LCG_MOD as f64
    }
}

/// A precomputed 2D scalar field, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseField {
    width: u32,
    height: u32,
    values: Vec<f64>,
}

impl NoiseField {
    /// Computes the full field eagerly.
    pub fn generate(
        width: u32,
        height: u32,
        params: &NoiseParams,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::NonPositiveDimension {
                name: "noise width",
                value: 0,
            });
        }
        if height == 0 {
            return Err(ConfigError::NonPositiveDimension {
                name: "noise height",
                value: 0,
            });
        }
        params.validate()?;

        let (w, h) = (width as usize, height as usize);

        // Octave lattices come from one stream, drawn in order
        let mut rng = LcgRandom::new(seed);
        let lattices: Vec<Vec<f64>> = (0..params.octaves)
            .map(|_| (0..w * h).map(|_| rng.next_f64()).collect())
            .collect();

        let mut values = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let mut amplitude = 1.0;
                let mut frequency = 1.0;
                let mut total = 0.0;
                let mut max_value = 0.0;

                for lattice in &lattices {
                    let sx = (x as f64 / params.scale) * frequency;
                    let sy = (y as f64 / params.scale) * frequency;
                    total += sample_bilinear(lattice, w, h, sx, sy) * amplitude;
                    max_value += amplitude;
                    amplitude *= params.persistence;
                    frequency *= params.lacunarity;
                }

                values.push(total / max_value);
            }
        }

        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Value at `(x, y)`, or `None` outside the field.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// All values, row-major.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Arithmetic mean of the field.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

/// Bilinear sample of a toroidal lattice at a non-negative position.
fn sample_bilinear(lattice: &[f64], w: usize, h: usize, x: f64, y: f64) -> f64 {
    let (fx, fy) = (x.floor(), y.floor());
    let x0 = fx as usize % w;
    let y0 = fy as usize % h;
    let x1 = (x0 + 1) % w;
    let y1 = (y0 + 1) % h;

    let tx = x - fx;
    let ty = y - fy;

    let top = lerp(lattice[y0 * w + x0], lattice[y0 * w + x1], tx);
    let bottom = lerp(lattice[y1 * w + x0], lattice[y1 * w + x1], tx);
    lerp(top, bottom, ty)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
