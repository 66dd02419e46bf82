//! `kitchen-plan [modules.json] [layout.json]`
//!
//! Runs one rebuild pass over a module list and prints the resulting scene,
//! totals and price as JSON. Without arguments the starter kitchen is used.

use std::error::Error;
use std::fs;

use serde::Serialize;

use kitchen_core::{MaterialId, ModuleDescriptor, ModuleStore};
use kitchen_layout::{AssemblyExtents, LayoutConfig, LayoutTotals, Quote, SceneAssembler};
use kitchen_scene::picking::DEFAULT_PICK_TOLERANCE;
use kitchen_scene::records::{Annotation, HoverRegion, Panel};
use kitchen_scene::{CameraFrame, HoverIndex, Scene, TextureRegistry};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    project: String,
    totals: LayoutTotals,
    extents: AssemblyExtents,
    price: Quote,
    camera: CameraFrame,
    pending_textures: Vec<MaterialId>,
    pickable_regions: usize,
    panels: Vec<Panel>,
    hover_regions: Vec<HoverRegion>,
    annotations: Vec<Annotation>,
}

fn load_store(path: Option<&str>) -> Result<ModuleStore, Box<dyn Error>> {
    let Some(path) = path else {
        log::info!("No module list given, using the starter kitchen");
        return Ok(ModuleStore::with_default_modules("Starter kitchen"));
    };
    let modules: Vec<ModuleDescriptor> = serde_json::from_str(&fs::read_to_string(path)?)?;
    let mut store = ModuleStore::new(path);
    for module in modules {
        store.add_module(module)?;
    }
    log::info!("Loaded {} modules from {}", store.module_count(), path);
    Ok(store)
}

fn load_config(path: Option<&str>) -> Result<LayoutConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(LayoutConfig::from_json(&fs::read_to_string(path)?)?),
        None => Ok(LayoutConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let store = load_store(args.first().map(String::as_str))?;
    let config = load_config(args.get(1).map(String::as_str))?;

    let mut scene = Scene::with_backdrop();
    let mut assembler = SceneAssembler::new(config);
    let report = assembler.rebuild(&store, Some(&mut scene));
    let price = Quote::compute(&report.totals, &store)?;

    let mut camera = CameraFrame::default();
    camera.fit(report.extents.width, report.extents.height);

    let mut textures = TextureRegistry::new();
    for id in store.used_materials() {
        if let Some(material) = store.materials.get(id) {
            textures.request(material);
        }
    }

    let picking = HoverIndex::build(scene.content(), DEFAULT_PICK_TOLERANCE);
    let content = scene.content();
    let summary = Summary {
        project: store.name.clone(),
        totals: report.totals,
        extents: report.extents,
        price,
        camera,
        pending_textures: textures.pending(),
        pickable_regions: picking.len(),
        panels: content.panels().cloned().collect(),
        hover_regions: content.hover_regions().cloned().collect(),
        annotations: content.annotations().cloned().collect(),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
