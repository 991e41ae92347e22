//! Coherent noise and easing helpers used by the height functions.

use noise::{NoiseFn, Perlin};

/// Seed of the shared Perlin field. Noise is a fixed function of
/// coordinates; per-run variety comes from the randomized sampling scale.
const FIELD_SEED: u32 = 0;

/// Unit-range 2D Perlin noise.
///
/// Sampling is pure and `Sync`, so rows can be evaluated in parallel.
#[derive(Clone)]
pub struct CoherentNoise {
    perlin: Perlin,
}

impl CoherentNoise {
    pub fn new() -> Self {
        Self {
            perlin: Perlin::new(FIELD_SEED),
        }
    }

    /// Noise at `(x, y)`, remapped from [-1, 1] to [0, 1].
    pub fn sample(&self, x: f64, y: f64) -> f32 {
        let v = self.perlin.get([x, y]);
        ((v + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }

    /// Noise at grid cell `(x, y)` sampled with a uniform `scale`.
    pub fn sample_scaled(&self, x: usize, y: usize, scale: f32) -> f32 {
        self.sample(x as f64 * scale as f64, y as f64 * scale as f64)
    }
}

impl Default for CoherentNoise {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear interpolation with `t` clamped to [0, 1].
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    from + (to - from) * t
}

/// Cubic ease from `from` to `to`, flat at both ends. `t` is clamped.
pub fn smoothstep(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let t = -2.0 * t * t * t + 3.0 * t * t;
    to * t + from * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_unit_range_and_stable() {
        let noise = CoherentNoise::new();
        let again = CoherentNoise::new();
        for i in 0..200 {
            let x = i as f64 * 0.37;
            let y = i as f64 * 0.11;
            let v = noise.sample(x, y);
            assert!((0.0..=1.0).contains(&v), "noise {} outside [0,1]", v);
            assert_eq!(v.to_bits(), again.sample(x, y).to_bits());
        }
    }

    #[test]
    fn test_noise_is_coherent() {
        let noise = CoherentNoise::new();
        let a = noise.sample(10.3, 4.2);
        let b = noise.sample(10.301, 4.2);
        assert!((a - b).abs() < 0.01, "neighbouring samples {} and {} differ too much", a, b);
    }

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(1.0, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(1.0, 0.0, 1.0), 0.0);
        assert!((smoothstep(0.2, 0.9, 0.5) - 0.55).abs() < 1e-6);
        assert_eq!(smoothstep(0.2, 0.9, -3.0), 0.2);
    }

    #[test]
    fn test_lerp_clamps() {
        assert_eq!(lerp(0.1, 0.6, 2.0), 0.6);
        assert!((lerp(0.1, 0.6, 0.5) - 0.35).abs() < 1e-6);
    }
}
