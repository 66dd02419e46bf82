//! # Kitchen Core
//!
//! Data model of the kitchen planner: parametric furniture module
//! descriptors, the ordered module store with its global settings,
//! the board material catalog, and undo/redo via command-pattern journal.

pub mod geometry;
pub mod module;
pub mod store;
pub mod material;
pub mod commands;

pub use store::{LoadError, ModuleStore, StoreError};
pub use module::{Facade, ModuleDescriptor, ModuleKind};
pub use material::{Material, MaterialCatalog, MaterialId};
pub use geometry::{Aabb, Rotation, Vec3};
