//! # Kitchen Layout
//!
//! The layout engine. A rebuild pass turns the ordered module list of a
//! [`kitchen_core::ModuleStore`] into world-space panels, hover regions and
//! dimension annotations, and sums board areas for pricing.
//!
//! Per module the pass runs the panel compiler in the module's local frame,
//! places the output with [`placement::Placement`] and adds the measurement
//! brackets from [`annotate`].

pub mod config;
pub mod compiler;
pub mod placement;
pub mod annotate;
pub mod totals;
pub mod pricing;
pub mod assembler;

pub use config::{ConfigError, LayoutConfig};
pub use compiler::{compile_module, CompileContext, CompiledModule, CompilerStrategy};
pub use placement::Placement;
pub use totals::{AssemblyExtents, LayoutTotals};
pub use pricing::Quote;
pub use assembler::{AssemblerState, RebuildReport, SceneAssembler};
