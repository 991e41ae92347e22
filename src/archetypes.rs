//! Terrain archetype catalog.
//!
//! Five fixed height-function variants. Each archetype carries static river
//! metadata and evaluates heights as a pure function of the cell, the grid
//! size and its per-run [`ArchetypeParams`]. The per-run parameters are the
//! only part that touches the random source, and they are drawn once per run
//! before any cell is evaluated.

use serde::{Deserialize, Serialize};

use crate::coherent::{lerp, smoothstep, CoherentNoise};
use crate::error::{Result, TerrainError};
use crate::random::RandomSource;
use crate::river::Point;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Amplitude of the base coherent noise layer shared by most archetypes
const BASE_NOISE_AMPLITUDE: f32 = 0.1;

/// Coastline sits at this fraction of map depth (rows grow southwards)
const COAST_THRESHOLD: f32 = 0.8;

// Seaside: gentle plateau drop behind a softly jittered coast
const SEASIDE_COAST_FREQ: f64 = 0.03;
const SEASIDE_COAST_AMPLITUDE: f32 = 0.1;
const SEASIDE_COAST_OFFSET: f32 = 0.05;
const SEASIDE_STEP: f32 = 0.1;

// SeasideCliff: tall step behind a high-frequency fractal coast
const CLIFF_COAST_FREQ: f64 = 0.7;
const CLIFF_COAST_AMPLITUDE: f32 = 0.15;
const CLIFF_COAST_OFFSET: f32 = 0.07;
const CLIFF_STEP: f32 = 0.5;

// Cauldron: radial bowl, radii as fractions of the reference radius
const CAULDRON_REFERENCE_RADIUS: f32 = 0.65;
const CAULDRON_FLOOR_RADIUS: f32 = 0.5;
const CAULDRON_RIM_RADIUS: f32 = 0.7;
const CAULDRON_FLOOR: f32 = 0.1;
const CAULDRON_RAMP_TOP: f32 = 0.6;
const CAULDRON_RIM: f32 = 0.8;

// Valley: flat floor around the horizontal centre line, S-curve walls
const VALLEY_FLOOR_HALF_WIDTH: f32 = 0.5;
const VALLEY_CURVE_START: f32 = 0.4;
const VALLEY_CURVE_SPAN: f32 = 0.6;
const VALLEY_FLOOR: f32 = 0.2;
const VALLEY_RIDGE: f32 = 0.9;

// =============================================================================
// PER-RUN PARAMETERS
// =============================================================================

/// Parameters derived once per generation run from the random source.
///
/// `slope_noise_scale` is only read by [`Archetype::Valley`]; every other
/// archetype samples its noise at `noise_scale` everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchetypeParams {
    pub noise_scale: f32,
    pub slope_noise_scale: f32,
}

impl ArchetypeParams {
    /// Same noise scale for every region of the map.
    pub fn uniform(noise_scale: f32) -> Self {
        Self {
            noise_scale,
            slope_noise_scale: noise_scale,
        }
    }

    /// Separate scales for the valley floor and its walls.
    pub fn valley(flat_noise_scale: f32, slope_noise_scale: f32) -> Self {
        Self {
            noise_scale: flat_noise_scale,
            slope_noise_scale,
        }
    }
}

// =============================================================================
// ARCHETYPES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Plains,
    Seaside,
    SeasideCliff,
    Cauldron,
    Valley,
}

/// Catalog order; indices into this list are the public archetype indices.
pub const CATALOG: [Archetype; 5] = [
    Archetype::Plains,
    Archetype::Seaside,
    Archetype::SeasideCliff,
    Archetype::Cauldron,
    Archetype::Valley,
];

pub fn archetype_count() -> usize {
    CATALOG.len()
}

/// Catalog lookup. Callers that must always produce terrain should go
/// through [`clamp_index`] first.
pub fn archetype(index: usize) -> Result<Archetype> {
    CATALOG.get(index).copied().ok_or(TerrainError::ArchetypeOutOfRange {
        index,
        count: CATALOG.len(),
    })
}

/// Clamp any signed index into `[0, count - 1]`.
pub fn clamp_index(index: i64) -> usize {
    index.clamp(0, CATALOG.len() as i64 - 1) as usize
}

/// Case-insensitive lookup by display name.
pub fn find_by_name(name: &str) -> Option<Archetype> {
    CATALOG
        .iter()
        .copied()
        .find(|a| a.name().eq_ignore_ascii_case(name))
}

impl Archetype {
    pub fn all() -> &'static [Self] {
        &CATALOG
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Plains => 0,
            Self::Seaside => 1,
            Self::SeasideCliff => 2,
            Self::Cauldron => 3,
            Self::Valley => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Plains => "Plains",
            Self::Seaside => "Seaside",
            Self::SeasideCliff => "SeasideCliff",
            Self::Cauldron => "Cauldron",
            Self::Valley => "Valley",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Plains => "Low rolling noise with a north-south river",
            Self::Seaside => "Plateau dropping to the sea along a soft coast",
            Self::SeasideCliff => "Tall cliffs behind a ragged fractal coast",
            Self::Cauldron => "Flat basin ringed by a raised rim",
            Self::Valley => "Flat valley floor between S-curved walls, east-west river",
        }
    }

    /// Probability in [0, 1] that a run carves a river.
    pub fn river_chance(&self) -> f32 {
        match self {
            Self::Plains => 1.0,
            Self::Seaside => 0.5,
            Self::SeasideCliff | Self::Cauldron => 0.0,
            Self::Valley => 1.0,
        }
    }

    /// River source in normalized [0, 1]² map coordinates.
    pub fn river_start(&self) -> Point {
        match self {
            Self::Valley => Point::new(0.0, 0.5),
            _ => Point::new(0.5, 0.0),
        }
    }

    /// River mouth in normalized [0, 1]² map coordinates.
    pub fn river_end(&self) -> Point {
        match self {
            Self::Valley => Point::new(1.0, 0.5),
            _ => Point::new(0.5, 1.0),
        }
    }

    /// Draw this archetype's per-run parameters.
    ///
    /// Valley draws twice (floor, then walls); the rest draw once.
    pub fn derive_params(&self, rng: &mut RandomSource) -> ArchetypeParams {
        match self {
            Self::Plains => ArchetypeParams::uniform(0.005 + rng.rounded_draw(0.005)),
            Self::Seaside | Self::SeasideCliff => {
                ArchetypeParams::uniform(0.01 + rng.rounded_draw(0.01))
            }
            Self::Cauldron => ArchetypeParams::uniform(0.05 + rng.rounded_draw(0.05)),
            Self::Valley => {
                let flat = 0.01 + rng.rounded_draw(0.01);
                let slope = 0.25 + rng.rounded_draw(0.1);
                ArchetypeParams::valley(flat, slope)
            }
        }
    }

    /// Raw height at cell `(x, y)` of a `size x size` map.
    ///
    /// May be slightly negative for noisy archetypes; the heightmap
    /// generator clamps at zero.
    pub fn height(
        &self,
        x: usize,
        y: usize,
        size: usize,
        params: &ArchetypeParams,
        noise: &CoherentNoise,
    ) -> f32 {
        let size_f = size as f32;
        match self {
            Self::Plains => noise.sample_scaled(x, y, params.noise_scale) * BASE_NOISE_AMPLITUDE,

            Self::Seaside => {
                let base = noise.sample_scaled(x, y, params.noise_scale) * BASE_NOISE_AMPLITUDE;
                let coast = noise.sample(x as f64 * SEASIDE_COAST_FREQ, y as f64 * SEASIDE_COAST_FREQ)
                    * SEASIDE_COAST_AMPLITUDE
                    - SEASIDE_COAST_OFFSET;
                let effective_y = y as f32 + coast * size_f;
                let land = if effective_y < size_f * COAST_THRESHOLD { SEASIDE_STEP } else { 0.0 };
                base + land
            }

            Self::SeasideCliff => {
                let base = noise.sample_scaled(x, y, params.noise_scale) * BASE_NOISE_AMPLITUDE;
                let coast = noise.sample(x as f64 * CLIFF_COAST_FREQ, y as f64 * CLIFF_COAST_FREQ)
                    * CLIFF_COAST_AMPLITUDE
                    - CLIFF_COAST_OFFSET;
                let effective_y = (y as f32 + coast * size_f).clamp(0.0, size_f);
                let land = if effective_y < size_f * COAST_THRESHOLD { CLIFF_STEP } else { 0.0 };
                base + land
            }

            Self::Cauldron => {
                let dx = x as f32 - size_f / 2.0;
                let dy = y as f32 - size_f / 2.0;
                let t = (dx * dx + dy * dy).sqrt() / (size_f * CAULDRON_REFERENCE_RADIUS);
                let base = if t < CAULDRON_FLOOR_RADIUS {
                    CAULDRON_FLOOR
                } else if t < CAULDRON_RIM_RADIUS {
                    let ramp = (t - CAULDRON_FLOOR_RADIUS) / (CAULDRON_RIM_RADIUS - CAULDRON_FLOOR_RADIUS);
                    lerp(CAULDRON_FLOOR, CAULDRON_RAMP_TOP, ramp)
                } else {
                    CAULDRON_RIM
                };
                // Zero-centred so the floor wobbles around 0.1
                let wobble = (noise.sample_scaled(x, y, params.noise_scale) - 0.5) * BASE_NOISE_AMPLITUDE;
                base + wobble
            }

            Self::Valley => {
                let half = size_f / 2.0;
                let normalized = (y as f32 - half).abs() / half;
                let (elevation, scale) = if normalized <= VALLEY_FLOOR_HALF_WIDTH {
                    (VALLEY_FLOOR, params.noise_scale)
                } else {
                    let t = (normalized - VALLEY_CURVE_START) / VALLEY_CURVE_SPAN;
                    (smoothstep(VALLEY_FLOOR, VALLEY_RIDGE, t), params.slope_noise_scale)
                };
                elevation + noise.sample_scaled(x, y, scale) * BASE_NOISE_AMPLITUDE
            }
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_lookup() {
        assert_eq!(archetype_count(), 5);
        for (i, a) in CATALOG.iter().enumerate() {
            assert_eq!(a.index(), i);
            assert_eq!(archetype(i).unwrap(), *a);
        }
        assert!(matches!(
            archetype(5),
            Err(TerrainError::ArchetypeOutOfRange { index: 5, count: 5 })
        ));
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-3), 0);
        assert_eq!(clamp_index(2), 2);
        assert_eq!(clamp_index(99), 4);
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        assert_eq!(find_by_name("seasidecliff"), Some(Archetype::SeasideCliff));
        assert_eq!(find_by_name("VALLEY"), Some(Archetype::Valley));
        assert_eq!(find_by_name("mesa"), None);
    }

    #[test]
    fn test_river_metadata() {
        assert_eq!(Archetype::Plains.river_chance(), 1.0);
        assert_eq!(Archetype::Seaside.river_chance(), 0.5);
        assert_eq!(Archetype::Cauldron.river_chance(), 0.0);
        assert_eq!(Archetype::Valley.river_start(), Point::new(0.0, 0.5));
        assert_eq!(Archetype::Valley.river_end(), Point::new(1.0, 0.5));
        assert_eq!(Archetype::Plains.river_end(), Point::new(0.5, 1.0));
    }

    #[test]
    fn test_derive_params_draw_counts() {
        // Valley consumes two draws, everything else one
        for &a in Archetype::all() {
            let mut rng = RandomSource::new(9);
            a.derive_params(&mut rng);
            let after = rng.next_unit();

            let mut reference = RandomSource::new(9);
            let expected_draws = if a == Archetype::Valley { 2 } else { 1 };
            for _ in 0..expected_draws {
                reference.next_unit();
            }
            assert_eq!(after.to_bits(), reference.next_unit().to_bits(), "{} draw count", a);
        }
    }

    #[test]
    fn test_derive_params_ranges() {
        let mut rng = RandomSource::new(1234);
        for _ in 0..50 {
            let p = Archetype::Plains.derive_params(&mut rng);
            assert!(p.noise_scale >= 0.005 && p.noise_scale <= 0.0101);
            let v = Archetype::Valley.derive_params(&mut rng);
            assert!(v.noise_scale >= 0.01 && v.noise_scale <= 0.0201);
            assert!(v.slope_noise_scale >= 0.25 && v.slope_noise_scale <= 0.3501);
        }
    }

    #[test]
    fn test_valley_centre_ignores_slope_scale() {
        let noise = CoherentNoise::new();
        let size = 64;
        let a = ArchetypeParams::valley(0.015, 0.26);
        let b = ArchetypeParams::valley(0.015, 0.34);
        for x in 0..size {
            let ha = Archetype::Valley.height(x, size / 2, size, &a, &noise);
            let hb = Archetype::Valley.height(x, size / 2, size, &b, &noise);
            assert_eq!(ha.to_bits(), hb.to_bits());
            assert!(ha >= 0.2 && ha <= 0.3 + 1e-6, "valley floor height {} at x={}", ha, x);
        }
    }

    #[test]
    fn test_valley_walls_rise() {
        let noise = CoherentNoise::new();
        let params = ArchetypeParams::valley(0.015, 0.3);
        let size = 64;
        let floor = Archetype::Valley.height(10, size / 2, size, &params, &noise);
        let wall = Archetype::Valley.height(10, 0, size, &params, &noise);
        assert!(wall > floor + 0.4, "wall {} should tower over floor {}", wall, floor);
    }

    #[test]
    fn test_cauldron_profile() {
        let noise = CoherentNoise::new();
        let params = ArchetypeParams::uniform(0.07);
        let size = 128;
        let centre = Archetype::Cauldron.height(size / 2, size / 2, size, &params, &noise);
        let corner = Archetype::Cauldron.height(0, 0, size, &params, &noise);
        assert!((centre - 0.1).abs() <= 0.05 + 1e-6, "centre {}", centre);
        assert!((corner - 0.8).abs() <= 0.05 + 1e-6, "corner {}", corner);
    }

    #[test]
    fn test_seaside_drops_near_south_edge() {
        let noise = CoherentNoise::new();
        let params = ArchetypeParams::uniform(0.015);
        let size = 100;
        for x in 0..size {
            let north = Archetype::Seaside.height(x, 0, size, &params, &noise);
            let south = Archetype::Seaside.height(x, size - 1, size, &params, &noise);
            assert!(north >= 0.1, "north {} should sit on the plateau", north);
            assert!(south <= 0.1, "south {} should be at sea level", south);
        }
    }

    #[test]
    fn test_cliff_step_is_tall() {
        let noise = CoherentNoise::new();
        let params = ArchetypeParams::uniform(0.015);
        let size = 100;
        let north = Archetype::SeasideCliff.height(5, 0, size, &params, &noise);
        assert!(north >= 0.5, "cliff top {} should include the 0.5 step", north);
    }
}
