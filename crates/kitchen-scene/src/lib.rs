//! # Kitchen Scene
//!
//! The boundary between the layout engine and the renderer: panel, hover
//! and annotation records, the scene arena those records live in for one
//! rebuild pass, texture bindings, hover-region picking and camera framing.
//!
//! Static backdrop geometry and dynamic layout output are held in separate
//! containers, so clearing a scene never depends on child order.

pub mod records;
pub mod scene;
pub mod textures;
pub mod picking;
pub mod camera;

pub use records::{Annotation, Face, HoverRegion, HoverTag, Panel, PanelKind};
pub use scene::{Scene, SceneArena, SceneDiff};
pub use textures::{TextureHandle, TextureRegistry};
pub use picking::HoverIndex;
pub use camera::CameraFrame;
