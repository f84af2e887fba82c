//! bakeplan planning engine
//!
//! This crate turns a declarative bake configuration plus a host scene
//! snapshot into a fully expanded, conflict-free, deterministically ordered
//! list of bake targets, and drives an external render engine over that list
//! one target at a time.
//!
//! Planning is pure, synchronous computation: the combinatorial expansion
//! (objects x materials x channels x resolutions x UDIM tiles), atlas UV
//! layout, per-channel color-space resolution, output naming with duplicate
//! detection, and shader-routing decisions all happen before the first
//! target is submitted. Execution is strictly sequential against the single
//! shared render engine, with per-target failure collection and guaranteed
//! routing restoration.
//!
//! # Example
//!
//! ```
//! use bakeplan_core::host::{GraphHandle, MaterialSlot, ObjectSnapshot, SceneSnapshot, ShaderClass};
//! use bakeplan_core::planner;
//! use bakeplan_spec::BakeConfig;
//!
//! let scene = SceneSnapshot {
//!     objects: vec![ObjectSnapshot {
//!         name: "Chair".to_string(),
//!         slots: vec![MaterialSlot {
//!             material: "Wood".to_string(),
//!             graph: GraphHandle(1),
//!             uv_set: "UVMap".to_string(),
//!             class: ShaderClass::PrincipledOnly,
//!         }],
//!         uv_samples: vec![],
//!     }],
//! };
//!
//! let plan = planner::plan(&BakeConfig::default(), &scene).unwrap();
//! assert_eq!(plan.targets.len(), 4); // basecolor, roughness, metallic, normal
//! ```
//!
//! # Modules
//!
//! - [`host`]: immutable snapshot types supplied by the host application
//! - [`naming`]: output path construction and sanitization
//! - [`atlas`]: multi-material UV atlas packing
//! - [`udim`]: UDIM tile detection and range expansion
//! - [`routing`]: per-(material, channel) shader routing decisions
//! - [`planner`]: the top-level bake job planner
//! - [`executor`]: sequential execution against the render engine

pub mod atlas;
pub mod executor;
pub mod host;
pub mod naming;
pub mod planner;
pub mod routing;
pub mod udim;

// Re-export main types for convenience
pub use atlas::{AtlasLayout, AtlasPlacement, UvRemap};
pub use executor::{
    execute_plan, BakeRunReport, CancelToken, RenderEngine, RenderError, RoutingGuard,
    TargetFailure,
};
pub use host::{GraphHandle, MaterialSlot, ObjectSnapshot, SceneSnapshot, ShaderClass};
pub use planner::{plan, BakePlan, BakeTarget, LightingMode, ObjectAtlas};
pub use routing::{route, RouteDecision, RoutingInstruction, SocketRef};
pub use udim::{detect_tiles, tiles_from_range, TilePlan, UdimTile};
