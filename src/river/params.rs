//! River geometry parameters

use serde::{Deserialize, Serialize};

/// How overlapping cuts from neighbouring path points combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarveMode {
    /// Every path point subtracts from the already-lowered height.
    /// Slow or winding stretches dig deeper.
    #[default]
    Cumulative,
    /// Each cell is lowered once, by the deepest cut any point made there.
    MaxDepth,
}

impl CarveMode {
    pub fn all() -> &'static [Self] {
        &[Self::Cumulative, Self::MaxDepth]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Cumulative => "Overlapping cuts compound",
            Self::MaxDepth => "Deepest single cut per cell",
        }
    }
}

impl std::fmt::Display for CarveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cumulative => write!(f, "cumulative"),
            Self::MaxDepth => write!(f, "max-depth"),
        }
    }
}

impl std::str::FromStr for CarveMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cumulative" => Ok(Self::Cumulative),
            "max-depth" | "max_depth" | "maxdepth" => Ok(Self::MaxDepth),
            other => Err(format!("unknown carve mode '{}' (expected cumulative or max-depth)", other)),
        }
    }
}

/// Geometry of the carved river, in grid cells and world height units
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverParams {
    /// Channel width in cells; cuts reach `width / 2` from each path point
    pub width: f32,
    /// Depth at the channel centre, in world units
    pub depth: f32,
    /// Number of half sine periods of sideways jitter over the whole path
    pub curve_frequency: f32,
    /// Sampling scale of the bank roughness noise
    pub bank_noise_scale: f32,
    /// Extra depth from bank noise, in world units
    pub bank_noise_amplitude: f32,
    pub carve_mode: CarveMode,
}

impl Default for RiverParams {
    fn default() -> Self {
        Self {
            width: 10.0,
            depth: 5.0,
            curve_frequency: 0.01,
            bank_noise_scale: 0.05,
            bank_noise_amplitude: 3.0,
            carve_mode: CarveMode::Cumulative,
        }
    }
}
