//! Error types for terrain generation and queries.

/// Errors surfaced by the terrain pipeline and its query boundary.
///
/// Configuration problems (bad archetype index, zero grid size, odd kernel
/// sizes) never show up here: the orchestrator clamps them instead.
#[derive(Debug)]
pub enum TerrainError {
    /// Catalog lookup with an index past the last archetype
    ArchetypeOutOfRange { index: usize, count: usize },
    /// Height query outside `[0, size)` on either axis
    OutOfBounds { x: i64, z: i64, size: usize },
    /// Height query before any terrain was generated
    NotGenerated,
    /// Grid of `size x size` cells cannot be allocated
    GridTooLarge { size: usize },
    /// Configuration file could not be read or parsed
    Config(String),
    /// IO error while writing a preview
    Io(std::io::Error),
    /// Image encoding failed
    Image(String),
}

impl std::fmt::Display for TerrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainError::ArchetypeOutOfRange { index, count } => {
                write!(f, "Archetype index {} out of range (catalog has {})", index, count)
            }
            TerrainError::OutOfBounds { x, z, size } => {
                write!(f, "Coordinates ({}, {}) out of bounds for {}x{} grid", x, z, size, size)
            }
            TerrainError::NotGenerated => write!(f, "No terrain has been generated yet"),
            TerrainError::GridTooLarge { size } => {
                write!(f, "Cannot allocate {}x{} height grid", size, size)
            }
            TerrainError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TerrainError::Io(e) => write!(f, "IO error: {}", e),
            TerrainError::Image(msg) => write!(f, "Failed to save image: {}", msg),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TerrainError {
    fn from(e: std::io::Error) -> Self {
        TerrainError::Io(e)
    }
}

impl From<image::ImageError> for TerrainError {
    fn from(e: image::ImageError) -> Self {
        TerrainError::Image(e.to_string())
    }
}

impl From<serde_json::Error> for TerrainError {
    fn from(e: serde_json::Error) -> Self {
        TerrainError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TerrainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_coordinates() {
        let err = TerrainError::OutOfBounds { x: -1, z: 0, size: 8 };
        let msg = err.to_string();
        assert!(msg.contains("(-1, 0)"), "unexpected message: {}", msg);
        assert!(msg.contains("8x8"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_io_error_is_source() {
        use std::error::Error;
        let err: TerrainError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(err.source().is_some());
    }
}
