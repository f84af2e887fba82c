//! Snapshot types supplied by the host application.
//!
//! The host's live material graph is mutable shared state with cyclic socket
//! references; the planner never touches it. It works from this immutable
//! snapshot instead: selected objects, their material slots, each material's
//! shader classification, and sampled UV coordinates for UDIM detection. The
//! graph itself stays behind [`GraphHandle`].

use serde::{Deserialize, Serialize};

/// Opaque reference into the host's material-graph storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphHandle(pub u64);

impl std::fmt::Display for GraphHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "graph#{}", self.0)
    }
}

/// Host-reported classification of what feeds a material's surface output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderClass {
    /// Only a Principled BSDF reaches the surface socket.
    PrincipledOnly,
    /// Only custom shader nodes reach the surface socket.
    CustomOnly,
    /// Both contribute (mix/add shader networks).
    Mixed,
}

impl ShaderClass {
    /// True if the material contains a Principled sub-network to sample.
    pub fn has_principled(&self) -> bool {
        matches!(self, ShaderClass::PrincipledOnly | ShaderClass::Mixed)
    }

    /// True if the material contains a custom sub-network to sample.
    pub fn has_custom(&self) -> bool {
        matches!(self, ShaderClass::CustomOnly | ShaderClass::Mixed)
    }
}

/// One material on one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSlot {
    /// Material name, used for output naming.
    pub material: String,
    /// Handle into the host's node-graph storage.
    pub graph: GraphHandle,
    /// Name of the UV set this material samples.
    pub uv_set: String,
    /// Shader classification for routing.
    pub class: ShaderClass,
}

/// One selected object with its material slots and UV data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    /// Object name, used for output naming and grouping.
    pub name: String,
    /// Usable material slots, in slot order.
    pub slots: Vec<MaterialSlot>,
    /// Sampled UV coordinates, used for UDIM auto-detection.
    #[serde(default)]
    pub uv_samples: Vec<[f32; 2]>,
}

/// The host's current selection, captured once per planning run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub objects: Vec<ObjectSnapshot>,
}

impl SceneSnapshot {
    /// Parses a snapshot from a JSON string (host export).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total usable material slots across all objects.
    pub fn slot_count(&self) -> usize {
        self.objects.iter().map(|o| o.slots.len()).sum()
    }
}
