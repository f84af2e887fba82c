//! UDIM tile planning.
//!
//! UDIM numbering: tile 1001 covers UV `[0,1)x[0,1)`, tile ids increase by
//! one per column and by ten per row, so `id = 1001 + col + 10 * row`.

use serde::{Deserialize, Serialize};

use bakeplan_spec::{ConfigError, UdimMode, UdimSettings, UDIM_BASE};

/// Highest tile id auto-detection will report (a 10x10 grid).
pub const UDIM_DETECT_MAX: u32 = 1100;

/// One UDIM tile and the UV sub-range it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UdimTile {
    pub id: u32,
}

impl UdimTile {
    /// Creates a tile from its id. Callers must pass ids >= 1001.
    pub const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Grid row (0-based, increasing with V).
    pub const fn row(&self) -> u32 {
        (self.id - UDIM_BASE) / 10
    }

    /// Grid column (0-based, increasing with U).
    pub const fn col(&self) -> u32 {
        (self.id - UDIM_BASE) % 10
    }

    /// UV sub-range `[u0, u1) x [v0, v1)` in UDIM units, before per-tile
    /// normalization to `[0, 1)`.
    pub fn uv_bounds(&self) -> (f64, f64, f64, f64) {
        let u0 = self.col() as f64;
        let v0 = self.row() as f64;
        (u0, u0 + 1.0, v0, v0 + 1.0)
    }
}

impl std::fmt::Display for UdimTile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Detects the tile set occupied by the given UV samples: sorted ascending,
/// deduplicated, limited to the standard 10x10 detection window. Samples with
/// negative coordinates fall outside UDIM space and are ignored.
pub fn detect_tiles(uv_samples: &[[f32; 2]]) -> Vec<UdimTile> {
    let mut tiles: Vec<UdimTile> = uv_samples
        .iter()
        .filter(|uv| uv[0] >= 0.0 && uv[1] >= 0.0)
        .map(|uv| UDIM_BASE + uv[0].floor() as u32 + 10 * uv[1].floor() as u32)
        .filter(|id| (UDIM_BASE..=UDIM_DETECT_MAX).contains(id))
        .map(UdimTile::new)
        .collect();
    tiles.sort();
    tiles.dedup();
    tiles
}

/// Expands an explicit inclusive range into its tile list.
pub fn tiles_from_range(start: u32, end: u32) -> Result<Vec<UdimTile>, ConfigError> {
    if start > end || start < UDIM_BASE {
        return Err(ConfigError::InvalidUdimRange { start, end });
    }
    Ok((start..=end).map(UdimTile::new).collect())
}

/// Outcome of tile planning for one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePlan {
    pub tiles: Vec<UdimTile>,
    /// True when auto-detection found nothing and the plan fell back to 1001.
    pub fallback: bool,
}

/// Plans the tile set for one object under the given settings.
///
/// Auto-detection with no occupied tiles degrades to the single default tile
/// rather than dropping the object; the planner records a warning.
pub fn plan_tiles(settings: &UdimSettings, uv_samples: &[[f32; 2]]) -> Result<TilePlan, ConfigError> {
    debug_assert!(settings.enabled);
    match settings.mode {
        UdimMode::AutoDetect => {
            let tiles = detect_tiles(uv_samples);
            if tiles.is_empty() {
                Ok(TilePlan {
                    tiles: vec![UdimTile::new(UDIM_BASE)],
                    fallback: true,
                })
            } else {
                Ok(TilePlan {
                    tiles,
                    fallback: false,
                })
            }
        }
        UdimMode::Range => Ok(TilePlan {
            tiles: tiles_from_range(settings.range_start, settings.range_end)?,
            fallback: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tile_numbering() {
        let tile = UdimTile::new(1001);
        assert_eq!((tile.row(), tile.col()), (0, 0));

        // 1012 = 1001 + col 1 + 10 * row 1
        let tile = UdimTile::new(1012);
        assert_eq!((tile.row(), tile.col()), (1, 1));
        assert_eq!(tile.uv_bounds(), (1.0, 2.0, 1.0, 2.0));

        let tile = UdimTile::new(1021);
        assert_eq!((tile.row(), tile.col()), (2, 0));
    }

    #[test]
    fn test_detect_sorted_dedup() {
        let samples = [
            [1.5f32, 0.2],
            [0.3, 0.7],
            [1.6, 0.1],
            [0.2, 1.4],
            [-0.5, 0.5],
        ];
        let tiles = detect_tiles(&samples);
        assert_eq!(
            tiles,
            vec![UdimTile::new(1001), UdimTile::new(1002), UdimTile::new(1011)]
        );
    }

    #[test]
    fn test_detect_window_clamp() {
        // V = 10 would be tile 1101, outside the detection window.
        let tiles = detect_tiles(&[[0.5f32, 10.5]]);
        assert!(tiles.is_empty());
    }

    #[test]
    fn test_range_expansion() {
        let tiles = tiles_from_range(1001, 1004).unwrap();
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0], UdimTile::new(1001));
        assert_eq!(tiles[3], UdimTile::new(1004));
        assert_eq!((tiles[0].row(), tiles[0].col()), (0, 0));
    }

    #[test]
    fn test_range_validation() {
        assert!(tiles_from_range(1004, 1001).is_err());
        assert!(tiles_from_range(1000, 1004).is_err());
    }

    #[test]
    fn test_auto_detect_fallback() {
        let settings = UdimSettings {
            enabled: true,
            mode: UdimMode::AutoDetect,
            ..Default::default()
        };
        let plan = plan_tiles(&settings, &[]).unwrap();
        assert!(plan.fallback);
        assert_eq!(plan.tiles, vec![UdimTile::new(1001)]);
    }
}
