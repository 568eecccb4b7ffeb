//! Per-sheet slicing configuration

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// How a sheet is cut into frames, tagged by `mode` in JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SheetConfig {
    /// Single packed row, segmented by column gaps into clip `idle`
    AutoscanRow {
        #[serde(default)]
        expected: usize,
        #[serde(default)]
        crop_bottom_px: u32,
    },
    /// Equal cells, one clip per row
    Grid {
        #[serde(default = "default_cols")]
        cols: u32,
        #[serde(default = "default_rows")]
        rows: u32,
    },
    /// Unrecognized mode; loaded as a 4x1 grid
    #[serde(other)]
    Unknown,
}

fn default_cols() -> u32 {
    4
}

fn default_rows() -> u32 {
    1
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig::AutoscanRow {
            expected: 4,
            crop_bottom_px: 64,
        }
    }
}

impl SheetConfig {
    pub fn validate(&self) -> Result<(), AssetError> {
        match *self {
            SheetConfig::Grid { cols, rows } if cols == 0 || rows == 0 => Err(
                AssetError::InvalidConfig(format!("grid needs at least 1x1 cells, got {}x{}", cols, rows)),
            ),
            _ => Ok(()),
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            SheetConfig::AutoscanRow { .. } => "autoscan_row",
            SheetConfig::Grid { .. } => "grid",
            SheetConfig::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_autoscan() {
        let cfg: SheetConfig =
            serde_json::from_str(r#"{"mode": "autoscan_row", "expected": 4, "crop_bottom_px": 64}"#)
                .unwrap();
        assert_eq!(
            cfg,
            SheetConfig::AutoscanRow {
                expected: 4,
                crop_bottom_px: 64
            }
        );

        let cfg: SheetConfig = serde_json::from_str(r#"{"mode": "autoscan_row"}"#).unwrap();
        assert_eq!(
            cfg,
            SheetConfig::AutoscanRow {
                expected: 0,
                crop_bottom_px: 0
            }
        );
    }

    #[test]
    fn test_parse_grid_defaults() {
        let cfg: SheetConfig = serde_json::from_str(r#"{"mode": "grid", "rows": 3}"#).unwrap();
        assert_eq!(cfg, SheetConfig::Grid { cols: 4, rows: 3 });
    }

    #[test]
    fn test_unknown_mode() {
        let cfg: SheetConfig = serde_json::from_str(r#"{"mode": "spiral"}"#).unwrap();
        assert_eq!(cfg, SheetConfig::Unknown);
        assert_eq!(cfg.mode_name(), "unknown");
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        assert!(SheetConfig::Grid { cols: 0, rows: 1 }.validate().is_err());
        assert!(SheetConfig::Grid { cols: 2, rows: 2 }.validate().is_ok());
        assert!(SheetConfig::default().validate().is_ok());
    }

    #[test]
    fn test_round_trip_tag() {
        let json = serde_json::to_string(&SheetConfig::Grid { cols: 2, rows: 1 }).unwrap();
        assert!(json.contains(r#""mode":"grid""#));
    }
}
