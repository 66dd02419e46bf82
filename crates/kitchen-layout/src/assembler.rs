//! Full rebuild pass: module list in, scene content and totals out.

use serde::{Deserialize, Serialize};

use kitchen_core::ModuleStore;
use kitchen_scene::{Scene, SceneArena, SceneDiff};

use crate::annotate::{annotate_assembly, annotate_module};
use crate::compiler::{compile_module, CompileContext};
use crate::config::LayoutConfig;
use crate::placement::Placement;
use crate::totals::{AssemblyExtents, LayoutTotals};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssemblerState {
    #[default]
    Idle,
    Rebuilding,
}

/// Outcome of one rebuild pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildReport {
    pub totals: LayoutTotals,
    pub extents: AssemblyExtents,
    pub modules_built: usize,
    /// Records added, removed or changed relative to the previous content.
    pub diff: SceneDiff,
}

/// Drives the compiler, placement and annotator over the whole module list.
///
/// A rebuild borrows the assembler mutably, so passes cannot overlap.
#[derive(Debug, Clone, Default)]
pub struct SceneAssembler {
    pub config: LayoutConfig,
    state: AssemblerState,
}

impl SceneAssembler {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            state: AssemblerState::Idle,
        }
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    /// Rebuild every generated record of `scene` from `store`.
    ///
    /// Totals start from zero on every call. Without a scene nothing is
    /// compiled and the report is empty.
    pub fn rebuild(&mut self, store: &ModuleStore, scene: Option<&mut Scene>) -> RebuildReport {
        let extents = AssemblyExtents::from_modules(store.modules());
        let Some(scene) = scene else {
            log::warn!("Rebuild requested with no scene attached");
            return RebuildReport {
                extents,
                ..RebuildReport::default()
            };
        };

        self.state = AssemblerState::Rebuilding;
        log::info!("Rebuilding scene for {} modules", store.module_count());

        let ctx = CompileContext {
            config: &self.config,
            panel_thickness: store.list_thickness(),
            rear_wall_material: store.selected_rear_wall_material,
            selected_module: store.selected_module(),
            scene_attached: true,
        };
        let offset = extents.centering_offset();
        let mut totals = LayoutTotals::default();
        let mut arena = SceneArena::new();
        let mut modules_built = 0;

        for (index, module) in store.modules().iter().enumerate() {
            let Some(compiled) = compile_module(module, index, &ctx, &mut totals) else {
                continue;
            };
            let placement = Placement::for_module(module, offset);
            for panel in &compiled.panels {
                arena.insert_panel(placement.apply_panel(panel));
            }
            for region in &compiled.hover_regions {
                arena.insert_hover_region(placement.apply_hover(region));
            }
            for annotation in annotate_module(module, index, &self.config) {
                arena.insert_annotation(placement.apply_annotation(&annotation));
            }
            modules_built += 1;
        }

        if self.config.assembly_dimensions {
            for annotation in annotate_assembly(&extents, &self.config) {
                arena.insert_annotation(annotation);
            }
        }

        let diff = arena.diff(scene.content());
        scene.replace_content(arena);
        self.state = AssemblerState::Idle;

        log::info!(
            "Rebuilt {} modules: {} panels, {:.0} mm² board, {:.0} mm² rear wall ({} added, {} removed, {} changed)",
            modules_built,
            totals.panel_count,
            totals.panel_area,
            totals.rear_wall_area,
            diff.added.len(),
            diff.removed.len(),
            diff.changed.len()
        );

        RebuildReport {
            totals,
            extents,
            modules_built,
            diff,
        }
    }
}
