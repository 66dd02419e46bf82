use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::commands::{Command, CommandHistory};
use crate::geometry::Rotation;
use crate::material::{MaterialCatalog, MaterialId};
use crate::module::ModuleDescriptor;

/// Default carcass board thickness in mm.
pub const DEFAULT_LIST_THICKNESS: f64 = 16.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Module index {index} out of range (have {len} modules)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Module {name} must be a positive length, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("Panel thickness {thickness} exceeds half the module {name} ({value})")]
    PanelTooThick {
        thickness: f64,
        name: &'static str,
        value: f64,
    },

    #[error("Material {0} is not in the catalog")]
    UnknownMaterial(MaterialId),

    #[error("Module #{index} is invalid: {source}")]
    InvalidModule {
        index: usize,
        #[source]
        source: Box<StoreError>,
    },

    #[error("Module #{index} no longer matches the recorded edit")]
    StaleHistory { index: usize },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid module store JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] StoreError),
}

/// The ordered list of modules plus the global settings a rebuild reads.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModuleStore {
    /// Project identifier.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    modules: Vec<ModuleDescriptor>,
    /// Carcass board thickness used by the panel compiler.
    list_thickness: f64,
    /// Thickness of the board family the price list is quoted for.
    pub base_list_thickness: f64,
    /// Board the carcass area is priced with.
    pub selected_list_material: MaterialId,
    /// Board the rear-wall area is priced with.
    pub selected_rear_wall_material: MaterialId,
    /// Whether rear walls are included in the quote.
    pub has_rear_wall: bool,
    selected_module: Option<usize>,
    /// Indices reported as overlapping by the collision checker.
    colliding_modules: Vec<usize>,
    pub materials: MaterialCatalog,
    #[serde(skip)]
    command_history: CommandHistory,
}

impl ModuleStore {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            modules: Vec::new(),
            list_thickness: DEFAULT_LIST_THICKNESS,
            base_list_thickness: DEFAULT_LIST_THICKNESS,
            selected_list_material: 1,
            selected_rear_wall_material: 2,
            has_rear_wall: true,
            selected_module: None,
            colliding_modules: Vec::new(),
            materials: MaterialCatalog::standard(),
            command_history: CommandHistory::new(),
        }
    }

    /// Two base cabinets side by side with a wall cabinet above the second.
    pub fn with_default_modules(name: &str) -> Self {
        let mut store = Self::new(name);
        store.modules = vec![
            ModuleDescriptor::new(600.0, 800.0, 670.0).with_rear_wall(true),
            ModuleDescriptor::new(600.0, 800.0, 670.0)
                .at(600.0, 0.0, 0.0)
                .with_rear_wall(true),
            ModuleDescriptor::new(600.0, 400.0, 670.0)
                .at(600.0, 800.0, 0.0)
                .with_rear_wall(true),
        ];
        store
    }

    // ── Module list ──────────────────────────────────────────────────

    /// Validate and append a module, returning its index.
    pub fn add_module(&mut self, module: ModuleDescriptor) -> Result<usize, StoreError> {
        self.check(&module)?;
        self.modules.push(module);
        log::debug!("Added module #{}", self.modules.len() - 1);
        Ok(self.modules.len() - 1)
    }

    /// Validate and insert a module at `index`, shifting later modules right.
    pub fn insert_module(&mut self, index: usize, module: ModuleDescriptor) -> Result<(), StoreError> {
        if index > self.modules.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.modules.len(),
            });
        }
        self.check(&module)?;
        self.modules.insert(index, module);
        if let Some(selected) = self.selected_module {
            if selected >= index {
                self.selected_module = Some(selected + 1);
            }
        }
        Ok(())
    }

    pub fn remove_module(&mut self, index: usize) -> Result<ModuleDescriptor, StoreError> {
        if index >= self.modules.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.modules.len(),
            });
        }
        let removed = self.modules.remove(index);
        self.selected_module = match self.selected_module {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        log::debug!("Removed module #{}", index);
        Ok(removed)
    }

    /// Set a module's rotation, returning the previous one.
    pub fn set_rotation(&mut self, index: usize, rotation: Rotation) -> Result<Rotation, StoreError> {
        let len = self.modules.len();
        let module = self
            .modules
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(&mut module.rotation, rotation))
    }

    pub fn list_thickness(&self) -> f64 {
        self.list_thickness
    }

    /// Change the carcass board thickness. Rejected, leaving the store
    /// unchanged, if any module would end up with a panel thicker than half
    /// the dimension it is cut from.
    pub fn set_list_thickness(&mut self, thickness: f64) -> Result<(), StoreError> {
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(StoreError::InvalidDimension {
                name: "list thickness",
                value: thickness,
            });
        }
        for (index, module) in self.modules.iter().enumerate() {
            module
                .validate(thickness)
                .map_err(|e| StoreError::InvalidModule {
                    index,
                    source: Box::new(e),
                })?;
        }
        log::debug!("List thickness {} -> {}", self.list_thickness, thickness);
        self.list_thickness = thickness;
        Ok(())
    }

    pub fn module(&self, index: usize) -> Option<&ModuleDescriptor> {
        self.modules.get(index)
    }

    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    fn check(&self, module: &ModuleDescriptor) -> Result<(), StoreError> {
        module.validate(self.list_thickness)?;
        for id in std::iter::once(module.material_id)
            .chain(module.enabled_facade().map(|f| f.material_id))
        {
            if !self.materials.contains(id) {
                return Err(StoreError::UnknownMaterial(id));
            }
        }
        Ok(())
    }

    // ── Selection & collisions ───────────────────────────────────────

    pub fn select_module(&mut self, index: Option<usize>) {
        self.selected_module = index.filter(|&i| i < self.modules.len());
    }

    pub fn selected_module(&self) -> Option<usize> {
        self.selected_module
    }

    pub fn set_colliding_modules(&mut self, indices: Vec<usize>) {
        self.colliding_modules = indices;
    }

    pub fn colliding_modules(&self) -> &[usize] {
        &self.colliding_modules
    }

    /// An order can only be placed for a collision-free layout.
    pub fn is_order_enabled(&self) -> bool {
        self.colliding_modules.is_empty()
    }

    /// Carcass and facade materials in first-use order, without duplicates.
    pub fn used_materials(&self) -> Vec<MaterialId> {
        let mut used = Vec::new();
        for module in &self.modules {
            let facade = module.facade.as_ref().map(|f| f.material_id);
            for id in std::iter::once(module.material_id).chain(facade) {
                if !used.contains(&id) {
                    used.push(id);
                }
            }
        }
        used
    }

    // ── Undo / Redo ──────────────────────────────────────────────────

    pub fn execute_command(&mut self, command: Box<dyn Command>) -> Result<(), StoreError> {
        let mut history = std::mem::take(&mut self.command_history);
        let result = history.execute(command, self);
        self.command_history = history;
        result
    }

    pub fn undo(&mut self) -> bool {
        let mut history = std::mem::take(&mut self.command_history);
        let undone = history.undo(self);
        self.command_history = history;
        undone
    }

    pub fn redo(&mut self) -> bool {
        let mut history = std::mem::take(&mut self.command_history);
        let redone = history.redo(self);
        self.command_history = history;
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.command_history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.command_history.can_redo()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.command_history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.command_history.redo_description()
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a store, re-checking every module against its thickness and catalog.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let mut store: Self = serde_json::from_str(json)?;
        if !(store.list_thickness.is_finite() && store.list_thickness > 0.0) {
            return Err(StoreError::InvalidDimension {
                name: "list thickness",
                value: store.list_thickness,
            }
            .into());
        }
        for (index, module) in store.modules.iter().enumerate() {
            store.check(module).map_err(|e| StoreError::InvalidModule {
                index,
                source: Box::new(e),
            })?;
        }
        store.selected_module = store.selected_module.filter(|&i| i < store.modules.len());
        Ok(store)
    }
}

impl Default for ModuleStore {
    fn default() -> Self {
        Self::new("Untitled kitchen")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Facade;

    #[test]
    fn test_default_modules() {
        let store = ModuleStore::with_default_modules("test");
        assert_eq!(store.module_count(), 3);
        assert!((store.module(2).unwrap().y - 800.0).abs() < 1e-9);
        assert!(store.selected_module().is_none());
    }

    #[test]
    fn test_remove_out_of_range_leaves_list() {
        let mut store = ModuleStore::with_default_modules("test");
        let err = store.remove_module(5).unwrap_err();
        assert_eq!(err, StoreError::IndexOutOfRange { index: 5, len: 3 });
        assert_eq!(store.module_count(), 3);
    }

    #[test]
    fn test_remove_adjusts_selection() {
        let mut store = ModuleStore::with_default_modules("test");
        store.select_module(Some(2));
        store.remove_module(0).unwrap();
        assert_eq!(store.selected_module(), Some(1));
        store.remove_module(1).unwrap();
        assert_eq!(store.selected_module(), None);
    }

    #[test]
    fn test_add_rejects_unknown_material() {
        let mut store = ModuleStore::new("test");
        let module = ModuleDescriptor::new(600.0, 800.0, 670.0).with_material(99);
        assert_eq!(store.add_module(module), Err(StoreError::UnknownMaterial(99)));
        assert_eq!(store.module_count(), 0);
    }

    #[test]
    fn test_used_materials_deduplicates() {
        let mut store = ModuleStore::new("test");
        store
            .add_module(ModuleDescriptor::new(600.0, 800.0, 670.0).with_facade(Facade::new(3, 18.0)))
            .unwrap();
        store
            .add_module(ModuleDescriptor::new(600.0, 800.0, 670.0).with_material(3))
            .unwrap();
        assert_eq!(store.used_materials(), vec![1, 3]);
    }

    #[test]
    fn test_order_blocked_by_collisions() {
        let mut store = ModuleStore::with_default_modules("test");
        assert!(store.is_order_enabled());
        store.set_colliding_modules(vec![1, 2]);
        assert!(!store.is_order_enabled());
    }

    #[test]
    fn test_list_thickness_revalidates_modules() {
        let mut store = ModuleStore::with_default_modules("test");
        let err = store.set_list_thickness(450.0).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidModule { index: 0, ref source }
                if matches!(**source, StoreError::PanelTooThick { name: "width", .. })
        ));
        assert!((store.list_thickness() - DEFAULT_LIST_THICKNESS).abs() < 1e-9);
        assert!(store.set_list_thickness(0.0).is_err());
        store.set_list_thickness(18.0).unwrap();
        assert!((store.list_thickness() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_json_rejects_thin_module() {
        let store = ModuleStore::with_default_modules("edited");
        let mut value: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
        value["modules"][1]["height"] = serde_json::json!(10.0);
        let err = ModuleStore::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(StoreError::InvalidModule { index: 1, .. })
        ));
        assert!(matches!(ModuleStore::from_json("{"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_json_keeps_modules() {
        let store = ModuleStore::with_default_modules("roundtrip");
        let restored = ModuleStore::from_json(&store.to_json().unwrap()).unwrap();
        assert_eq!(restored.modules(), store.modules());
        assert_eq!(restored.id, store.id);
    }
}
