//! Output path construction.
//!
//! A target's relative path is the folder-organization prefix (object,
//! material, resolution, in that outer-to-inner order) plus a filename built
//! from the naming-mode template. The planner joins the result onto the
//! configured output directory and owns duplicate detection.

use std::path::PathBuf;

use bakeplan_spec::{ChannelKind, NamingMode, NamingScheme, Resolution};

use crate::udim::UdimTile;

/// Replaces every character outside `[A-Za-z0-9_.-]` with `_`, falling back
/// to `fallback` when nothing printable survives.
pub fn sanitize_name(name: &str, fallback: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.chars().all(|c| c == '_' || c == '.') {
        fallback.to_string()
    } else {
        cleaned
    }
}

/// Builds the filename for one target, tile segment included only when a
/// UDIM tile is present.
pub fn target_filename(
    material: &str,
    channel: ChannelKind,
    tile: Option<UdimTile>,
    mode: NamingMode,
) -> String {
    let material = sanitize_name(material, "Material");
    let channel = channel.file_suffix();
    match (mode, tile) {
        (NamingMode::Standard, Some(tile)) => format!("{}.{}.{}.png", material, tile.id, channel),
        (NamingMode::Mari, Some(tile)) => format!("{}_{}_{}.png", material, tile.id, channel),
        (NamingMode::Mudbox, Some(tile)) => format!("{}.{}.{}.png", material, channel, tile.id),
        (NamingMode::Standard | NamingMode::Mudbox, None) => {
            format!("{}.{}.png", material, channel)
        }
        (NamingMode::Mari, None) => format!("{}_{}.png", material, channel),
    }
}

/// Builds the relative output path for one target.
pub fn target_path(
    object: &str,
    material: &str,
    channel: ChannelKind,
    resolution: Resolution,
    tile: Option<UdimTile>,
    scheme: &NamingScheme,
) -> PathBuf {
    let mut path = PathBuf::new();
    if scheme.by_object {
        path.push(sanitize_name(object, "Object"));
    }
    if scheme.by_material {
        path.push(sanitize_name(material, "Material"));
    }
    if scheme.by_resolution {
        path.push(resolution.label());
    }
    path.push(target_filename(material, channel, tile, scheme.mode));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tile(id: u32) -> Option<UdimTile> {
        Some(UdimTile::new(id))
    }

    #[test]
    fn test_standard_template() {
        assert_eq!(
            target_filename("Wood", ChannelKind::BaseColor, tile(1001), NamingMode::Standard),
            "Wood.1001.basecolor.png"
        );
    }

    #[test]
    fn test_mari_template() {
        assert_eq!(
            target_filename("Wood", ChannelKind::BaseColor, tile(1001), NamingMode::Mari),
            "Wood_1001_basecolor.png"
        );
    }

    #[test]
    fn test_mudbox_template() {
        assert_eq!(
            target_filename("Wood", ChannelKind::BaseColor, tile(1001), NamingMode::Mudbox),
            "Wood.basecolor.1001.png"
        );
    }

    #[test]
    fn test_tile_segment_omitted_without_udim() {
        assert_eq!(
            target_filename("Wood", ChannelKind::Roughness, None, NamingMode::Standard),
            "Wood.roughness.png"
        );
        assert_eq!(
            target_filename("Wood", ChannelKind::Roughness, None, NamingMode::Mari),
            "Wood_roughness.png"
        );
        assert_eq!(
            target_filename("Wood", ChannelKind::Roughness, None, NamingMode::Mudbox),
            "Wood.roughness.png"
        );
    }

    #[test]
    fn test_sanitization() {
        assert_eq!(sanitize_name("Wood/Oak Dark", "Material"), "Wood_Oak_Dark");
        assert_eq!(sanitize_name("材质", "Material"), "Material");
        assert_eq!(sanitize_name("", "Object"), "Object");
        assert_eq!(sanitize_name("mat.v2-final", "Material"), "mat.v2-final");
    }

    #[test]
    fn test_folder_organization_order() {
        let scheme = NamingScheme {
            mode: NamingMode::Standard,
            by_object: true,
            by_material: true,
            by_resolution: true,
        };
        let path = target_path(
            "Chair",
            "Wood",
            ChannelKind::Normal,
            Resolution::square(2048),
            None,
            &scheme,
        );
        assert_eq!(path, PathBuf::from("Chair/Wood/2048x2048/Wood.normal.png"));
    }

    #[test]
    fn test_folder_flags_subset() {
        let scheme = NamingScheme {
            mode: NamingMode::Mari,
            by_object: false,
            by_material: false,
            by_resolution: true,
        };
        let path = target_path(
            "Chair",
            "Wood",
            ChannelKind::BaseColor,
            Resolution::new(1920, 1080),
            tile(1012),
            &scheme,
        );
        assert_eq!(path, PathBuf::from("1920x1080/Wood_1012_basecolor.png"));
    }
}
