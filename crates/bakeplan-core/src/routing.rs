//! Shader routing decisions.
//!
//! For each (material, channel) pair the planner decides which part of the
//! shader graph the render engine must sample, under the configured
//! mixed-shader strategy. Combinations with no valid route are skipped with a
//! warning instead of failing the batch.

use serde::Serialize;

use bakeplan_spec::{ChannelKind, MixedShaderStrategy, PlanWarning};

use crate::host::MaterialSlot;

/// Which point of the graph the engine samples for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SocketRef {
    /// The material-output surface socket, whatever feeds it.
    Surface,
    /// A named input of the Principled sub-network.
    PrincipledInput(&'static str),
    /// The custom sub-network's designated output socket.
    CustomOutput,
}

/// Opaque rewiring instruction handed to the render engine.
///
/// The engine applies it before sampling and the executor guarantees the
/// original wiring is restored after the attempt, success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoutingInstruction {
    /// Material graph to rewire.
    pub graph: crate::host::GraphHandle,
    /// Socket to sample.
    pub socket: SocketRef,
    /// Strategy tag, so the engine can pick its rewiring recipe.
    pub strategy: MixedShaderStrategy,
}

/// Outcome of routing one (material, channel) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    /// Bake it, sampling the given socket.
    Route(RoutingInstruction),
    /// No valid route under the strategy; carries the reason for the warning.
    Skip(String),
}

/// Decides the route for one material slot and channel.
pub fn route(
    slot: &MaterialSlot,
    channel: ChannelKind,
    strategy: MixedShaderStrategy,
) -> RouteDecision {
    let instruction = |socket| {
        RouteDecision::Route(RoutingInstruction {
            graph: slot.graph,
            socket,
            strategy,
        })
    };

    // The custom-shader channel needs a custom network to sample, whatever
    // the strategy says.
    if channel == ChannelKind::CustomShader && !slot.class.has_custom() {
        return RouteDecision::Skip(format!(
            "channel '{}' needs a custom shader network but material is classified {:?}",
            channel, slot.class
        ));
    }

    match strategy {
        MixedShaderStrategy::FullSurface => instruction(SocketRef::Surface),
        MixedShaderStrategy::PrincipledOnly => {
            if !slot.class.has_principled() {
                return RouteDecision::Skip(format!(
                    "strategy '{}' has no principled network to sample in a {:?} material",
                    strategy.as_str(),
                    slot.class
                ));
            }
            match channel.principled_input() {
                Some(input) => instruction(SocketRef::PrincipledInput(input)),
                // Geometry bakes (displacement, AO) and the custom-shader
                // channel do not go through a Principled input.
                None if channel == ChannelKind::CustomShader => instruction(SocketRef::CustomOutput),
                None => instruction(SocketRef::Surface),
            }
        }
        MixedShaderStrategy::CustomOnly => {
            if !slot.class.has_custom() {
                return RouteDecision::Skip(format!(
                    "strategy '{}' has no custom network to sample in a {:?} material",
                    strategy.as_str(),
                    slot.class
                ));
            }
            match channel.principled_input() {
                // Geometry bakes sample the surface regardless of strategy.
                None if channel != ChannelKind::CustomShader => instruction(SocketRef::Surface),
                _ => instruction(SocketRef::CustomOutput),
            }
        }
    }
}

/// Wraps a skip reason into the planner's warning type.
pub fn skip_warning(
    object: &str,
    slot: &MaterialSlot,
    channel: ChannelKind,
    reason: String,
) -> PlanWarning {
    PlanWarning::SkippedTarget {
        object: object.to_string(),
        material: slot.material.clone(),
        channel,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{GraphHandle, ShaderClass};

    fn slot(class: ShaderClass) -> MaterialSlot {
        MaterialSlot {
            material: "Mat".to_string(),
            graph: GraphHandle(3),
            uv_set: "UVMap".to_string(),
            class,
        }
    }

    #[test]
    fn test_full_surface_routes_everything() {
        for class in [
            ShaderClass::PrincipledOnly,
            ShaderClass::CustomOnly,
            ShaderClass::Mixed,
        ] {
            let decision = route(
                &slot(class),
                ChannelKind::BaseColor,
                MixedShaderStrategy::FullSurface,
            );
            assert!(matches!(
                decision,
                RouteDecision::Route(RoutingInstruction {
                    socket: SocketRef::Surface,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_principled_only_skips_custom_materials() {
        let decision = route(
            &slot(ShaderClass::CustomOnly),
            ChannelKind::BaseColor,
            MixedShaderStrategy::PrincipledOnly,
        );
        assert!(matches!(decision, RouteDecision::Skip(_)));
    }

    #[test]
    fn test_principled_only_targets_input_socket() {
        let decision = route(
            &slot(ShaderClass::Mixed),
            ChannelKind::BaseColor,
            MixedShaderStrategy::PrincipledOnly,
        );
        match decision {
            RouteDecision::Route(instr) => {
                assert_eq!(instr.socket, SocketRef::PrincipledInput("Base Color"));
                assert_eq!(instr.graph, GraphHandle(3));
            }
            other => panic!("expected route, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_only_skips_principled_materials() {
        let decision = route(
            &slot(ShaderClass::PrincipledOnly),
            ChannelKind::BaseColor,
            MixedShaderStrategy::CustomOnly,
        );
        assert!(matches!(decision, RouteDecision::Skip(_)));
    }

    #[test]
    fn test_custom_only_targets_custom_output() {
        let decision = route(
            &slot(ShaderClass::Mixed),
            ChannelKind::Roughness,
            MixedShaderStrategy::CustomOnly,
        );
        assert!(matches!(
            decision,
            RouteDecision::Route(RoutingInstruction {
                socket: SocketRef::CustomOutput,
                ..
            })
        ));
    }

    #[test]
    fn test_geometry_bakes_always_sample_surface() {
        for strategy in [
            MixedShaderStrategy::PrincipledOnly,
            MixedShaderStrategy::CustomOnly,
        ] {
            let class = match strategy {
                MixedShaderStrategy::PrincipledOnly => ShaderClass::Mixed,
                _ => ShaderClass::CustomOnly,
            };
            let decision = route(&slot(class), ChannelKind::AmbientOcclusion, strategy);
            assert!(matches!(
                decision,
                RouteDecision::Route(RoutingInstruction {
                    socket: SocketRef::Surface,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_custom_shader_channel_needs_custom_network() {
        let decision = route(
            &slot(ShaderClass::PrincipledOnly),
            ChannelKind::CustomShader,
            MixedShaderStrategy::FullSurface,
        );
        assert!(matches!(decision, RouteDecision::Skip(_)));

        let decision = route(
            &slot(ShaderClass::Mixed),
            ChannelKind::CustomShader,
            MixedShaderStrategy::PrincipledOnly,
        );
        assert!(matches!(
            decision,
            RouteDecision::Route(RoutingInstruction {
                socket: SocketRef::CustomOutput,
                ..
            })
        ));
    }
}
