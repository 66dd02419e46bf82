//! Expands one module descriptor into panels and hover regions.
//!
//! Everything here is in the module's own unrotated frame with the module
//! anchor at the origin: x runs along the width, y up, z from the wall
//! (z = 0) towards the front (z = depth).

use kitchen_core::geometry::{Rotation, Vec3};
use kitchen_core::{MaterialId, ModuleDescriptor, ModuleKind};
use kitchen_scene::records::{Face, HoverRegion, Panel, PanelKind};

use crate::config::LayoutConfig;
use crate::totals::LayoutTotals;

const X_AXIS: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const Z_AXIS: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Inputs shared by every module of one rebuild pass.
#[derive(Debug, Clone, Copy)]
pub struct CompileContext<'a> {
    pub config: &'a LayoutConfig,
    /// Carcass board thickness.
    pub panel_thickness: f64,
    pub rear_wall_material: MaterialId,
    pub selected_module: Option<usize>,
    /// Without a target scene every compile is a no-op.
    pub scene_attached: bool,
}

/// Module-local output of one compile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledModule {
    pub panels: Vec<Panel>,
    pub hover_regions: Vec<HoverRegion>,
}

/// How a module kind is turned into panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerStrategy {
    BasicCarcass,
    TableTop,
}

impl CompilerStrategy {
    pub fn for_kind(kind: ModuleKind) -> Self {
        match kind {
            ModuleKind::BasicCarcass => CompilerStrategy::BasicCarcass,
            ModuleKind::TableTop => CompilerStrategy::TableTop,
        }
    }

    pub fn compile(
        &self,
        module: &ModuleDescriptor,
        index: usize,
        ctx: &CompileContext<'_>,
        totals: &mut LayoutTotals,
    ) -> CompiledModule {
        let mut builder = ModuleBuilder {
            module,
            index,
            ctx,
            totals,
            out: CompiledModule::default(),
        };
        match self {
            CompilerStrategy::BasicCarcass => builder.basic_carcass(),
            CompilerStrategy::TableTop => builder.table_top(),
        }
        builder.out
    }
}

/// Compile one module with the strategy its kind selects, adding its
/// panels to `totals`. Returns `None`, and records nothing, when no scene
/// is attached.
pub fn compile_module(
    module: &ModuleDescriptor,
    index: usize,
    ctx: &CompileContext<'_>,
    totals: &mut LayoutTotals,
) -> Option<CompiledModule> {
    if !ctx.scene_attached {
        log::debug!("No scene attached, skipping module #{}", index);
        return None;
    }
    Some(CompilerStrategy::for_kind(module.kind).compile(module, index, ctx, totals))
}

struct ModuleBuilder<'m, 'c, 't> {
    module: &'m ModuleDescriptor,
    index: usize,
    ctx: &'c CompileContext<'c>,
    totals: &'t mut LayoutTotals,
    out: CompiledModule,
}

impl ModuleBuilder<'_, '_, '_> {
    fn basic_carcass(&mut self) {
        let m = self.module;
        let cfg = self.ctx.config;
        let t = self.ctx.panel_thickness;
        let (w, h, d) = (m.width, m.height, m.depth);
        let side_height = h - 2.0 * t;

        // Bottom and top run the full width; the sides sit between them.
        self.panel(
            PanelKind::Bottom,
            Vec3::new(w / 2.0, t / 2.0, d / 2.0),
            Vec3::new(w, t, d),
            m.material_id,
            w * d,
        );
        self.panel(
            PanelKind::Top,
            Vec3::new(w / 2.0, h - t / 2.0, d / 2.0),
            Vec3::new(w, t, d),
            m.material_id,
            w * d,
        );
        self.panel(
            PanelKind::LeftSide,
            Vec3::new(t / 2.0, h / 2.0, d / 2.0),
            Vec3::new(t, side_height, d),
            m.material_id,
            side_height * d,
        );
        self.panel(
            PanelKind::RightSide,
            Vec3::new(w - t / 2.0, h / 2.0, d / 2.0),
            Vec3::new(t, side_height, d),
            m.material_id,
            side_height * d,
        );

        if m.has_rear_wall {
            let rear_w = w - 2.0 * cfg.rear_wall_inset;
            let rear_h = h - 2.0 * cfg.rear_wall_inset;
            let rt = cfg.rear_wall_thickness;
            self.out.panels.push(Panel {
                module_index: self.index,
                kind: PanelKind::RearWall,
                center: Vec3::new(w / 2.0, h / 2.0, cfg.rear_wall_setback + rt / 2.0),
                size: Vec3::new(rear_w, rear_h, rt),
                rotation: Rotation::Front,
                material_id: self.ctx.rear_wall_material,
                highlighted: self.highlighted(),
            });
            self.totals.record_rear_wall(rear_w * rear_h);
        }

        let facade_thickness = match m.enabled_facade() {
            Some(facade) => {
                let face_w = w - 2.0 * cfg.facade_inset;
                let face_h = h - 2.0 * cfg.facade_inset;
                self.panel(
                    PanelKind::Facade,
                    Vec3::new(w / 2.0, h / 2.0, d + facade.thickness / 2.0),
                    Vec3::new(face_w, face_h, facade.thickness),
                    facade.material_id,
                    face_w * face_h,
                );
                facade.thickness
            }
            None => 0.0,
        };

        let lift = cfg.hover_lift;
        self.horizontal_hover(Face::Bottom, 0.0, d, false);
        self.horizontal_hover(Face::Top, h + lift, d, false);
        self.side_hover(Face::Left, -lift);
        self.side_hover(Face::Right, w + lift);
        // Pushed past the facade so neighbouring open doors can still be hit.
        self.front_hover(d + lift + facade_thickness);
    }

    fn table_top(&mut self) {
        let m = self.module;
        let cfg = self.ctx.config;
        let slab_depth = m.depth + cfg.table_top_overhang;

        self.panel(
            PanelKind::TableTop,
            Vec3::new(m.width / 2.0, m.height / 2.0, slab_depth / 2.0),
            Vec3::new(m.width, m.height, slab_depth),
            m.material_id,
            m.width * slab_depth,
        );
        self.horizontal_hover(Face::Top, m.height + cfg.hover_lift, slab_depth, true);
    }

    fn highlighted(&self) -> bool {
        self.ctx.selected_module == Some(self.index)
    }

    fn panel(&mut self, kind: PanelKind, center: Vec3, size: Vec3, material_id: MaterialId, area: f64) {
        self.out.panels.push(Panel {
            module_index: self.index,
            kind,
            center,
            size,
            rotation: Rotation::Front,
            material_id,
            highlighted: self.highlighted(),
        });
        self.totals.record_panel(area);
    }

    fn hover(&mut self, face: Face, center: Vec3, extents: (f64, f64), axes: (Vec3, Vec3), normal: Vec3, click_to_open: bool) {
        let inset = self.ctx.config.hover_inset;
        self.out.hover_regions.push(HoverRegion {
            module_index: self.index,
            face,
            center,
            width: (extents.0 - inset).max(0.0),
            height: (extents.1 - inset).max(0.0),
            u_axis: axes.0,
            v_axis: axes.1,
            normal,
            rotation: Rotation::Front,
            click_to_open,
        });
    }

    fn horizontal_hover(&mut self, face: Face, y: f64, depth: f64, click_to_open: bool) {
        let w = self.module.width;
        let normal = if face == Face::Bottom {
            Vec3::new(0.0, -1.0, 0.0)
        } else {
            Vec3::UP
        };
        self.hover(
            face,
            Vec3::new(w / 2.0, y, depth / 2.0),
            (w, depth),
            (X_AXIS, Z_AXIS),
            normal,
            click_to_open,
        );
    }

    fn side_hover(&mut self, face: Face, x: f64) {
        let (h, d) = (self.module.height, self.module.depth);
        let normal = if face == Face::Left {
            Vec3::new(-1.0, 0.0, 0.0)
        } else {
            X_AXIS
        };
        self.hover(
            face,
            Vec3::new(x, h / 2.0, d / 2.0),
            (d, h),
            (Z_AXIS, Vec3::UP),
            normal,
            false,
        );
    }

    fn front_hover(&mut self, z: f64) {
        let (w, h) = (self.module.width, self.module.height);
        self.hover(
            Face::Front,
            Vec3::new(w / 2.0, h / 2.0, z),
            (w, h),
            (X_AXIS, Vec3::UP),
            Z_AXIS,
            true,
        );
    }
}
