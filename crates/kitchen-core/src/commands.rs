use crate::geometry::Rotation;
use crate::module::ModuleDescriptor;
use crate::store::{ModuleStore, StoreError};

/// A reversible edit of the module list.
pub trait Command: std::fmt::Debug + Send {
    /// Apply the edit. A failed edit leaves the store untouched.
    fn execute(&mut self, store: &mut ModuleStore) -> Result<(), StoreError>;
    /// Reverse a previously successful edit. Fails, leaving the store
    /// untouched, when the store no longer holds what the edit produced.
    fn undo(&mut self, store: &mut ModuleStore) -> Result<(), StoreError>;
    /// Human-readable description for the undo/redo history.
    fn description(&self) -> &str;
}

// ══════════════════════════════════════════════════════════════════════
// Concrete Commands
// ══════════════════════════════════════════════════════════════════════

/// Append a module to the end of the list.
#[derive(Debug)]
pub struct AddModuleCommand {
    pub module: ModuleDescriptor,
    /// Index the module landed at (set on execute).
    inserted_index: Option<usize>,
}

impl AddModuleCommand {
    pub fn new(module: ModuleDescriptor) -> Self {
        Self {
            module,
            inserted_index: None,
        }
    }
}

impl Command for AddModuleCommand {
    fn execute(&mut self, store: &mut ModuleStore) -> Result<(), StoreError> {
        self.inserted_index = Some(store.add_module(self.module.clone())?);
        Ok(())
    }

    fn undo(&mut self, store: &mut ModuleStore) -> Result<(), StoreError> {
        let Some(index) = self.inserted_index else {
            return Ok(());
        };
        remove_if_unchanged(store, index, &self.module)?;
        self.inserted_index = None;
        Ok(())
    }

    fn description(&self) -> &str {
        "Add module"
    }
}

/// Remove a module by index.
#[derive(Debug)]
pub struct RemoveModuleCommand {
    pub index: usize,
    /// The removed module (saved for undo).
    removed: Option<ModuleDescriptor>,
    /// Selection before the removal, restored on undo.
    selected_before: Option<usize>,
}

impl RemoveModuleCommand {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            removed: None,
            selected_before: None,
        }
    }
}

impl Command for RemoveModuleCommand {
    fn execute(&mut self, store: &mut ModuleStore) -> Result<(), StoreError> {
        let selected = store.selected_module();
        self.removed = Some(store.remove_module(self.index)?);
        self.selected_before = selected;
        Ok(())
    }

    fn undo(&mut self, store: &mut ModuleStore) -> Result<(), StoreError> {
        let Some(module) = self.removed.take() else {
            return Ok(());
        };
        // Re-insert at the original index
        if let Err(e) = store.insert_module(self.index, module.clone()) {
            self.removed = Some(module);
            return Err(e);
        }
        store.select_module(self.selected_before);
        Ok(())
    }

    fn description(&self) -> &str {
        "Remove module"
    }
}

/// Turn a module to face the next wall.
#[derive(Debug)]
pub struct RotateModuleCommand {
    pub index: usize,
    pub clockwise: bool,
    /// Rotation before and after the turn.
    applied: Option<(Rotation, Rotation)>,
}

impl RotateModuleCommand {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            clockwise: true,
            applied: None,
        }
    }

    pub fn counter_clockwise(index: usize) -> Self {
        Self {
            clockwise: false,
            ..Self::new(index)
        }
    }
}

impl Command for RotateModuleCommand {
    fn execute(&mut self, store: &mut ModuleStore) -> Result<(), StoreError> {
        let len = store.module_count();
        let current = store
            .module(self.index)
            .map(|m| m.rotation)
            .ok_or(StoreError::IndexOutOfRange { index: self.index, len })?;
        let next = if self.clockwise {
            current.turned_clockwise()
        } else {
            current.turned_counter_clockwise()
        };
        let previous = store.set_rotation(self.index, next)?;
        self.applied = Some((previous, next));
        Ok(())
    }

    fn undo(&mut self, store: &mut ModuleStore) -> Result<(), StoreError> {
        let Some((previous, next)) = self.applied else {
            return Ok(());
        };
        if store.module(self.index).map(|m| m.rotation) != Some(next) {
            return Err(StoreError::StaleHistory { index: self.index });
        }
        store.set_rotation(self.index, previous)?;
        self.applied = None;
        Ok(())
    }

    fn description(&self) -> &str {
        "Rotate module"
    }
}

/// Duplicate a module and place the copy directly to its right.
#[derive(Debug)]
pub struct CopyModuleCommand {
    pub source: usize,
    /// Index and contents of the placed copy.
    inserted: Option<(usize, ModuleDescriptor)>,
}

impl CopyModuleCommand {
    pub fn new(source: usize) -> Self {
        Self {
            source,
            inserted: None,
        }
    }
}

impl Command for CopyModuleCommand {
    fn execute(&mut self, store: &mut ModuleStore) -> Result<(), StoreError> {
        let len = store.module_count();
        let original = store
            .module(self.source)
            .ok_or(StoreError::IndexOutOfRange { index: self.source, len })?;
        let mut copy = original.clone();
        copy.x += original.footprint_x();
        let index = store.add_module(copy.clone())?;
        self.inserted = Some((index, copy));
        Ok(())
    }

    fn undo(&mut self, store: &mut ModuleStore) -> Result<(), StoreError> {
        let Some((index, copy)) = &self.inserted else {
            return Ok(());
        };
        remove_if_unchanged(store, *index, copy)?;
        self.inserted = None;
        Ok(())
    }

    fn description(&self) -> &str {
        "Copy module"
    }
}

/// Remove the module at `index` only if it is still `expected`.
fn remove_if_unchanged(store: &mut ModuleStore, index: usize, expected: &ModuleDescriptor) -> Result<(), StoreError> {
    if store.module(index) != Some(expected) {
        return Err(StoreError::StaleHistory { index });
    }
    store.remove_module(index).map(|_| ())
}

/// Manages the undo/redo history stack.
#[derive(Debug, Default)]
pub struct CommandHistory {
    undo_stack: Vec<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn execute(&mut self, mut command: Box<dyn Command>, store: &mut ModuleStore) -> Result<(), StoreError> {
        command.execute(store)?;
        log::debug!("{}", command.description());
        self.undo_stack.push(command);
        // Executing a new command clears the redo stack.
        self.redo_stack.clear();
        Ok(())
    }

    /// Undo the latest command. A command whose undo fails stays on the
    /// undo stack and `false` is returned.
    pub fn undo(&mut self, store: &mut ModuleStore) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };
        if let Err(e) = command.undo(store) {
            log::warn!("Undo of '{}' failed: {}", command.description(), e);
            self.undo_stack.push(command);
            return false;
        }
        log::debug!("Undo: {}", command.description());
        self.redo_stack.push(command);
        true
    }

    pub fn redo(&mut self, store: &mut ModuleStore) -> bool {
        if let Some(mut command) = self.redo_stack.pop() {
            if let Err(e) = command.execute(store) {
                log::warn!("Redo of '{}' failed: {}", command.description(), e);
                self.redo_stack.push(command);
                return false;
            }
            self.undo_stack.push(command);
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_undo_redo() {
        let mut store = ModuleStore::new("test");
        let module = ModuleDescriptor::new(600.0, 800.0, 670.0);
        store
            .execute_command(Box::new(AddModuleCommand::new(module)))
            .unwrap();
        assert_eq!(store.module_count(), 1);
        assert!(store.undo());
        assert_eq!(store.module_count(), 0);
        assert!(store.redo());
        assert_eq!(store.module_count(), 1);
        assert!(!store.can_redo());
    }

    #[test]
    fn test_failed_command_not_recorded() {
        let mut store = ModuleStore::new("test");
        let result = store.execute_command(Box::new(RemoveModuleCommand::new(0)));
        assert!(result.is_err());
        assert!(!store.can_undo());
    }

    #[test]
    fn test_remove_undo_restores_position() {
        let mut store = ModuleStore::with_default_modules("test");
        let middle = store.module(1).cloned().unwrap();
        store
            .execute_command(Box::new(RemoveModuleCommand::new(1)))
            .unwrap();
        assert_eq!(store.module_count(), 2);
        store.undo();
        assert_eq!(store.module(1), Some(&middle));
    }

    #[test]
    fn test_undo_refuses_moved_module() {
        let mut store = ModuleStore::with_default_modules("test");
        store
            .execute_command(Box::new(AddModuleCommand::new(ModuleDescriptor::new(300.0, 800.0, 670.0))))
            .unwrap();
        store.remove_module(0).unwrap();

        assert!(!store.undo());
        let widths: Vec<f64> = store.modules().iter().map(|m| m.width).collect();
        assert_eq!(widths, vec![600.0, 600.0, 300.0]);
        assert!(store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_undo_rotate_after_outside_change() {
        let mut store = ModuleStore::with_default_modules("test");
        store
            .execute_command(Box::new(RotateModuleCommand::new(0)))
            .unwrap();
        store.set_rotation(0, Rotation::Back).unwrap();
        assert!(!store.undo());
        assert_eq!(store.module(0).unwrap().rotation, Rotation::Back);
    }

    #[test]
    fn test_failed_redo_stays_available() {
        let mut store = ModuleStore::with_default_modules("test");
        store
            .execute_command(Box::new(AddModuleCommand::new(ModuleDescriptor::new(300.0, 800.0, 670.0))))
            .unwrap();
        assert!(store.undo());
        // Too thick for the 300 mm module, still fine for the starter modules.
        store.set_list_thickness(200.0).unwrap();

        assert!(!store.redo());
        assert!(store.can_redo());
        assert_eq!(store.redo_description(), Some("Add module"));

        store.set_list_thickness(16.0).unwrap();
        assert!(store.redo());
        assert_eq!(store.module_count(), 4);
        assert_eq!(store.redo_description(), None);
    }

    #[test]
    fn test_remove_undo_restores_selection() {
        let mut store = ModuleStore::with_default_modules("test");
        store.select_module(Some(1));
        store
            .execute_command(Box::new(RemoveModuleCommand::new(1)))
            .unwrap();
        assert_eq!(store.selected_module(), None);
        assert!(store.undo());
        assert_eq!(store.selected_module(), Some(1));
    }

    #[test]
    fn test_rotate_cycles_walls() {
        let mut store = ModuleStore::with_default_modules("test");
        let expected = [Rotation::Right, Rotation::Back, Rotation::Left, Rotation::Front];
        for rotation in expected {
            store
                .execute_command(Box::new(RotateModuleCommand::new(0)))
                .unwrap();
            assert_eq!(store.module(0).unwrap().rotation, rotation);
        }
        store.undo();
        assert_eq!(store.module(0).unwrap().rotation, Rotation::Left);
        assert_eq!(store.undo_description(), Some("Rotate module"));
    }

    #[test]
    fn test_copy_places_to_the_right() {
        let mut store = ModuleStore::new("test");
        store
            .add_module(ModuleDescriptor::new(600.0, 800.0, 670.0).rotated(Rotation::Left))
            .unwrap();
        store
            .execute_command(Box::new(CopyModuleCommand::new(0)))
            .unwrap();
        let copy = store.module(1).unwrap();
        assert!((copy.x - 670.0).abs() < 1e-9);
        assert_eq!(copy.rotation, Rotation::Left);
        store.undo();
        assert_eq!(store.module_count(), 1);
    }
}
