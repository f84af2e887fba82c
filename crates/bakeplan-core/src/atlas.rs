//! Multi-material atlas packing.
//!
//! Materials are laid out row-major on a rows x cols grid of the unit UV
//! square. Each island is shrunk by the padding fraction and centered in its
//! cell, so padded bounding boxes never touch.

use serde::{Deserialize, Serialize};

use bakeplan_spec::{AtlasLayoutMode, AtlasSettings, LayoutError};

use crate::host::MaterialSlot;

/// Placement of one material island inside the atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasPlacement {
    /// Material name this cell belongs to.
    pub material: String,
    /// Island origin in UV space.
    pub uv_offset: (f64, f64),
    /// Island extent in UV space.
    pub uv_scale: (f64, f64),
}

/// Complete atlas layout for one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasLayout {
    pub placements: Vec<AtlasPlacement>,
    pub rows: u32,
    pub cols: u32,
    pub padding: f64,
}

/// Instruction for the host: scale and offset a material's UV island into its
/// atlas cell before baking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvRemap {
    /// Material whose geometry the remap applies to.
    pub material: String,
    /// UV set the remap applies to.
    pub uv_set: String,
    pub scale: (f64, f64),
    pub offset: (f64, f64),
}

/// Picks the near-square auto grid for `count` materials: the smallest grid
/// with `cols >= rows` that fits every island.
pub fn auto_grid(count: usize) -> (u32, u32) {
    if count <= 1 {
        return (1, 1);
    }
    let cols = (count as f64).sqrt().ceil() as u32;
    let rows = (count as u32).div_ceil(cols);
    (rows, cols)
}

/// Computes the atlas layout for the given slots.
///
/// Returns the layout plus one [`UvRemap`] per material when `update_uv` is
/// set; with `update_uv` off, the caller asserts the existing UV map already
/// fits the target cells and no remap instructions are produced.
pub fn pack(
    slots: &[MaterialSlot],
    settings: &AtlasSettings,
) -> Result<(AtlasLayout, Vec<UvRemap>), LayoutError> {
    let count = slots.len();
    let (rows, cols) = match settings.layout_mode {
        AtlasLayoutMode::Auto => auto_grid(count),
        AtlasLayoutMode::Manual => {
            if (settings.rows as usize) * (settings.cols as usize) < count {
                return Err(LayoutError::GridTooSmall {
                    rows: settings.rows,
                    cols: settings.cols,
                    count,
                });
            }
            (settings.rows, settings.cols)
        }
    };

    let padding = settings.padding;
    if !(0.0..0.5).contains(&padding) {
        return Err(LayoutError::InvalidPadding { padding });
    }
    let limit = 0.5 / rows.max(cols) as f64;
    if padding >= limit {
        return Err(LayoutError::PaddingExceedsCell { padding, limit });
    }

    let cell_w = 1.0 / cols as f64;
    let cell_h = 1.0 / rows as f64;
    let scale = (cell_w - padding, cell_h - padding);

    let mut placements = Vec::with_capacity(count);
    let mut remaps = Vec::new();
    for (i, slot) in slots.iter().enumerate() {
        let col = (i as u32 % cols) as f64;
        let row = (i as u32 / cols) as f64;
        let offset = (col * cell_w + padding / 2.0, row * cell_h + padding / 2.0);
        placements.push(AtlasPlacement {
            material: slot.material.clone(),
            uv_offset: offset,
            uv_scale: scale,
        });
        if settings.update_uv {
            remaps.push(UvRemap {
                material: slot.material.clone(),
                uv_set: slot.uv_set.clone(),
                scale,
                offset,
            });
        }
    }

    Ok((
        AtlasLayout {
            placements,
            rows,
            cols,
            padding,
        },
        remaps,
    ))
}
