//! Bake job planning.
//!
//! One planning run expands the configuration and scene snapshot into the
//! ordered target list: object, then material group, then channel (registry
//! order), then resolution (area order), then UDIM tile (ascending). The
//! expansion is pure and deterministic; identical inputs produce identical
//! plans.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use bakeplan_spec::{
    BakeConfig, ChannelKind, PlanError, PlanWarning, Resolution, ShadowMode,
};

use crate::atlas::{self, AtlasLayout, UvRemap};
use crate::host::{MaterialSlot, ObjectSnapshot, SceneSnapshot};
use crate::naming;
use crate::routing::{self, RouteDecision, RoutingInstruction};
use crate::udim::{self, UdimTile};

/// Lighting contribution recorded on a target.
///
/// Lighting-capable channels are still baked when lighting is excluded; only
/// the contribution is turned off. Shadow mode is inert while lighting is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingMode {
    Off,
    NoShadows,
    WithShadows,
}

/// One fully resolved unit of work: exactly one output image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BakeTarget {
    /// Object being baked.
    pub object: String,
    /// Participating material slots; more than one only for atlas targets.
    pub materials: Vec<MaterialSlot>,
    /// Name substituted into the filename template: the material name, or
    /// `{object}_Atlas` for merged targets.
    pub material_label: String,
    pub channel: ChannelKind,
    pub resolution: Resolution,
    /// UDIM tile, absent when UDIM is disabled.
    pub tile: Option<UdimTile>,
    /// Resolved color space for the output image.
    pub color_space: String,
    /// Final output path, unique within the plan.
    pub output_path: PathBuf,
    /// Rewiring instructions, one per participating material.
    pub routing: Vec<RoutingInstruction>,
    pub lighting: LightingMode,
    /// Bake margin in pixels, passed through to the engine.
    pub margin: u32,
}

/// Atlas layout computed for one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectAtlas {
    pub object: String,
    pub layout: AtlasLayout,
}

/// Result of one planning run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BakePlan {
    /// Fully resolved targets in execution order.
    pub targets: Vec<BakeTarget>,
    /// Non-fatal diagnostics gathered during expansion.
    pub warnings: Vec<PlanWarning>,
    /// UV-remap instructions for the host (atlas with `update_uv`).
    pub uv_remaps: Vec<UvRemap>,
    /// Atlas layouts per object, for hosts that want to visualize them.
    pub atlases: Vec<ObjectAtlas>,
}

impl BakePlan {
    /// Number of planned targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True when nothing survived expansion.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// One naming/routing group: a single material slot, or all of an object's
/// slots merged into an atlas.
struct TargetGroup {
    label: String,
    slots: Vec<MaterialSlot>,
}

fn per_slot_groups(object: &ObjectSnapshot) -> Vec<TargetGroup> {
    object
        .slots
        .iter()
        .map(|slot| TargetGroup {
            label: slot.material.clone(),
            slots: vec![slot.clone()],
        })
        .collect()
}

/// Expands the configuration into the ordered, conflict-free target list.
///
/// Fatal errors ([`PlanError`]) mean the whole plan is unsound and zero
/// targets are returned; per-combination problems become warnings on the
/// plan instead.
pub fn plan(config: &BakeConfig, scene: &SceneSnapshot) -> Result<BakePlan, PlanError> {
    config.validate()?;
    let resolutions = config.resolutions.resolve()?;

    let mut plan = BakePlan::default();
    let mut seen_paths: BTreeSet<PathBuf> = BTreeSet::new();
    let mut any_slots = false;

    for object in &scene.objects {
        if object.slots.is_empty() {
            continue;
        }
        any_slots = true;

        let tiles: Vec<Option<UdimTile>> = if config.udim.enabled {
            let tile_plan = udim::plan_tiles(&config.udim, &object.uv_samples)?;
            if tile_plan.fallback {
                plan.warnings.push(PlanWarning::NoUdimTilesDetected {
                    object: object.name.clone(),
                });
            }
            tile_plan.tiles.into_iter().map(Some).collect()
        } else {
            vec![None]
        };

        let groups: Vec<TargetGroup> = if config.atlas.enabled {
            if object.slots.len() < 2 {
                plan.warnings.push(PlanWarning::AtlasFallback {
                    object: object.name.clone(),
                    slots: object.slots.len(),
                });
                per_slot_groups(object)
            } else {
                let (layout, remaps) = atlas::pack(&object.slots, &config.atlas)?;
                plan.atlases.push(ObjectAtlas {
                    object: object.name.clone(),
                    layout,
                });
                plan.uv_remaps.extend(remaps);
                vec![TargetGroup {
                    label: format!("{}_Atlas", object.name),
                    slots: object.slots.clone(),
                }]
            }
        } else {
            per_slot_groups(object)
        };

        for group in &groups {
            // BTreeSet iteration gives registry order.
            for &channel in &config.channels {
                let mut instructions = Vec::with_capacity(group.slots.len());
                for slot in &group.slots {
                    match routing::route(slot, channel, config.strategy) {
                        RouteDecision::Route(instruction) => instructions.push(instruction),
                        RouteDecision::Skip(reason) => plan.warnings.push(routing::skip_warning(
                            &object.name,
                            slot,
                            channel,
                            reason,
                        )),
                    }
                }
                if instructions.is_empty() {
                    continue;
                }

                let color_space = config.color_space.resolve(channel)?;
                let lighting = if channel.requires_lighting() && config.include_lighting {
                    match config.shadow_mode {
                        ShadowMode::WithShadows => LightingMode::WithShadows,
                        ShadowMode::NoShadows => LightingMode::NoShadows,
                    }
                } else {
                    LightingMode::Off
                };

                for &resolution in &resolutions {
                    for &tile in &tiles {
                        let relative = naming::target_path(
                            &object.name,
                            &group.label,
                            channel,
                            resolution,
                            tile,
                            &config.naming,
                        );
                        let output_path = config.output_dir.join(relative);
                        if !seen_paths.insert(output_path.clone()) {
                            return Err(PlanError::DuplicateOutput { path: output_path });
                        }
                        plan.targets.push(BakeTarget {
                            object: object.name.clone(),
                            materials: group.slots.clone(),
                            material_label: group.label.clone(),
                            channel,
                            resolution,
                            tile,
                            color_space: color_space.clone(),
                            output_path,
                            routing: instructions.clone(),
                            lighting,
                            margin: config.margin,
                        });
                    }
                }
            }
        }
    }

    if !any_slots {
        return Err(PlanError::EmptyScene);
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{GraphHandle, ShaderClass};
    use bakeplan_spec::{
        ColorSpacePolicy, CustomSlot, MixedShaderStrategy, NamingScheme, ResolutionSet,
        UdimMode, UdimSettings,
    };
    use pretty_assertions::assert_eq;

    fn slot(material: &str, graph: u64, class: ShaderClass) -> MaterialSlot {
        MaterialSlot {
            material: material.to_string(),
            graph: GraphHandle(graph),
            uv_set: "UVMap".to_string(),
            class,
        }
    }

    fn scene() -> SceneSnapshot {
        SceneSnapshot {
            objects: vec![
                ObjectSnapshot {
                    name: "Chair".to_string(),
                    slots: vec![
                        slot("Wood", 1, ShaderClass::PrincipledOnly),
                        slot("Velvet", 2, ShaderClass::Mixed),
                    ],
                    uv_samples: vec![],
                },
                ObjectSnapshot {
                    name: "Lamp".to_string(),
                    slots: vec![slot("Brass", 3, ShaderClass::PrincipledOnly)],
                    uv_samples: vec![],
                },
            ],
        }
    }

    fn config() -> BakeConfig {
        BakeConfig::default()
    }

    #[test]
    fn test_expansion_order_is_object_material_channel() {
        let plan = plan(&config(), &scene()).unwrap();
        // 3 slots x 4 default channels x 1 resolution.
        assert_eq!(plan.len(), 12);

        let labels: Vec<&str> = plan
            .targets
            .iter()
            .map(|t| t.material_label.as_str())
            .collect();
        let mut expected = Vec::new();
        for label in ["Wood", "Velvet", "Brass"] {
            expected.extend(std::iter::repeat(label).take(4));
        }
        assert_eq!(labels, expected);

        // Channels in registry order within each group.
        let channels: Vec<ChannelKind> = plan.targets[..4].iter().map(|t| t.channel).collect();
        assert_eq!(
            channels,
            vec![
                ChannelKind::BaseColor,
                ChannelKind::Roughness,
                ChannelKind::Metallic,
                ChannelKind::Normal,
            ]
        );
    }

    #[test]
    fn test_planning_is_deterministic() {
        let config = config();
        let scene = scene();
        let first = plan(&config, &scene).unwrap();
        let second = plan(&config, &scene).unwrap();
        assert_eq!(first, second);

        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolution_expansion_order() {
        let mut config = config();
        config.resolutions = ResolutionSet {
            res_512: true,
            res_2048: true,
            ..Default::default()
        };
        let plan = plan(&config, &scene()).unwrap();
        assert_eq!(plan.len(), 24);
        assert_eq!(plan.targets[0].resolution, Resolution::square(512));
        assert_eq!(plan.targets[1].resolution, Resolution::square(2048));
    }

    #[test]
    fn test_duplicate_output_aborts() {
        let mut config = config();
        config.resolutions = ResolutionSet {
            res_512: true,
            res_2048: true,
            ..Default::default()
        };
        // Without the per-resolution folder the two resolutions collide.
        config.naming = NamingScheme {
            by_resolution: false,
            ..Default::default()
        };
        let err = plan(&config, &scene()).unwrap_err();
        assert!(matches!(err, PlanError::DuplicateOutput { .. }));
    }

    #[test]
    fn test_paths_are_under_output_dir() {
        let plan = plan(&config(), &scene()).unwrap();
        let first = &plan.targets[0];
        assert_eq!(
            first.output_path,
            PathBuf::from("textures/Chair/Wood/2048x2048/Wood.basecolor.png")
        );
    }

    #[test]
    fn test_lighting_mode_recorded_not_skipped() {
        let mut config = config();
        config.include_lighting = false;
        let without = plan(&config, &scene()).unwrap();
        let basecolor: Vec<&BakeTarget> = without
            .targets
            .iter()
            .filter(|t| t.channel == ChannelKind::BaseColor)
            .collect();
        // Still baked, lighting off.
        assert_eq!(basecolor.len(), 3);
        assert!(basecolor.iter().all(|t| t.lighting == LightingMode::Off));

        config.include_lighting = true;
        let with = plan(&config, &scene()).unwrap();
        for target in &with.targets {
            if target.channel.requires_lighting() {
                assert_eq!(target.lighting, LightingMode::WithShadows);
            } else {
                assert_eq!(target.lighting, LightingMode::Off);
            }
        }
    }

    #[test]
    fn test_custom_only_strategy_skips_principled_materials() {
        let mut config = config();
        config.strategy = MixedShaderStrategy::CustomOnly;
        let plan = plan(&config, &scene()).unwrap();

        // Wood and Brass are PrincipledOnly: no targets, one warning per
        // (material, channel) pair.
        assert!(plan
            .targets
            .iter()
            .all(|t| t.material_label == "Velvet"));
        let skips = plan
            .warnings
            .iter()
            .filter(|w| matches!(w, PlanWarning::SkippedTarget { .. }))
            .count();
        assert_eq!(skips, 8);
    }

    #[test]
    fn test_udim_range_expands_tiles() {
        let mut config = config();
        config.udim = UdimSettings {
            enabled: true,
            mode: UdimMode::Range,
            range_start: 1001,
            range_end: 1003,
        };
        let plan = plan(&config, &scene()).unwrap();
        assert_eq!(plan.len(), 36);
        let tiles: Vec<u32> = plan.targets[..3]
            .iter()
            .map(|t| t.tile.unwrap().id)
            .collect();
        assert_eq!(tiles, vec![1001, 1002, 1003]);
        assert!(plan.targets[0]
            .output_path
            .to_string_lossy()
            .ends_with("Wood.1001.basecolor.png"));
    }

    #[test]
    fn test_udim_auto_detect_fallback_warns() {
        let mut config = config();
        config.udim = UdimSettings {
            enabled: true,
            mode: UdimMode::AutoDetect,
            ..Default::default()
        };
        let plan = plan(&config, &scene()).unwrap();
        let fallbacks = plan
            .warnings
            .iter()
            .filter(|w| matches!(w, PlanWarning::NoUdimTilesDetected { .. }))
            .count();
        assert_eq!(fallbacks, 2);
        assert!(plan.targets.iter().all(|t| t.tile == Some(UdimTile::new(1001))));
    }

    #[test]
    fn test_atlas_merges_object_slots() {
        let mut config = config();
        config.atlas.enabled = true;
        let plan = plan(&config, &scene()).unwrap();

        // Chair's two slots merge; Lamp falls back to its single slot.
        let chair: Vec<&BakeTarget> = plan
            .targets
            .iter()
            .filter(|t| t.object == "Chair")
            .collect();
        assert_eq!(chair.len(), 4);
        assert!(chair.iter().all(|t| t.material_label == "Chair_Atlas"));
        assert!(chair.iter().all(|t| t.materials.len() == 2));
        assert!(chair.iter().all(|t| t.routing.len() == 2));

        assert_eq!(plan.atlases.len(), 1);
        assert_eq!(plan.uv_remaps.len(), 2);
        let fallbacks = plan
            .warnings
            .iter()
            .filter(|w| matches!(w, PlanWarning::AtlasFallback { .. }))
            .count();
        assert_eq!(fallbacks, 1);
    }

    #[test]
    fn test_empty_scene_rejected() {
        let err = plan(&config(), &SceneSnapshot::default()).unwrap_err();
        assert!(matches!(err, PlanError::EmptyScene));
    }

    #[test]
    fn test_manual_color_space_applies_everywhere() {
        let mut config = config();
        config.color_space = ColorSpacePolicy::manual("Raw");
        let plan = plan(&config, &scene()).unwrap();
        assert!(plan.targets.iter().all(|t| t.color_space == "Raw"));
    }

    #[test]
    fn test_invalid_custom_resolution_fails_before_targets() {
        let mut config = config();
        config.resolutions.custom[0] = CustomSlot {
            enabled: true,
            width: 0,
            height: 1024,
        };
        assert!(matches!(
            plan(&config, &scene()),
            Err(PlanError::Config(_))
        ));
    }
}
