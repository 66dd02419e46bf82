use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use kitchen_core::material::{Material, MaterialId};

/// Renderer-side handle of a loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u64);

/// The texture a material currently renders with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureBinding {
    pub url: String,
    /// `None` until the loader finishes; panels render untextured meanwhile.
    pub handle: Option<TextureHandle>,
}

/// Maps material ids to whatever texture is bound to them right now.
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    bindings: HashMap<MaterialId, TextureBinding>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material's texture for loading. Returns `false` if it was
    /// already known.
    pub fn request(&mut self, material: &Material) -> bool {
        if self.bindings.contains_key(&material.id) {
            return false;
        }
        log::debug!("Requesting texture {} for material {}", material.texture_url, material.id);
        self.bindings.insert(
            material.id,
            TextureBinding {
                url: material.texture_url.clone(),
                handle: None,
            },
        );
        true
    }

    /// Bind a loaded texture. Returns `false` for materials never requested.
    pub fn bind(&mut self, material_id: MaterialId, handle: TextureHandle) -> bool {
        match self.bindings.get_mut(&material_id) {
            Some(binding) => {
                binding.handle = Some(handle);
                true
            }
            None => {
                log::warn!("Texture loaded for unknown material {}", material_id);
                false
            }
        }
    }

    pub fn resolve(&self, material_id: MaterialId) -> Option<TextureHandle> {
        self.bindings.get(&material_id).and_then(|b| b.handle)
    }

    pub fn binding(&self, material_id: MaterialId) -> Option<&TextureBinding> {
        self.bindings.get(&material_id)
    }

    /// Requested materials still waiting for their texture, ascending.
    pub fn pending(&self) -> Vec<MaterialId> {
        let mut ids: Vec<_> = self
            .bindings
            .iter()
            .filter(|(_, b)| b.handle.is_none())
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_core::MaterialCatalog;

    #[test]
    fn test_resolve_after_bind() {
        let catalog = MaterialCatalog::standard();
        let mut registry = TextureRegistry::new();
        for material in catalog.all() {
            registry.request(material);
        }
        assert_eq!(registry.resolve(1), None);
        assert_eq!(registry.pending(), vec![1, 2, 3, 6]);

        assert!(registry.bind(1, TextureHandle(42)));
        assert_eq!(registry.resolve(1), Some(TextureHandle(42)));
        assert_eq!(registry.pending(), vec![2, 3, 6]);
    }

    #[test]
    fn test_bind_unknown_material() {
        let mut registry = TextureRegistry::new();
        assert!(!registry.bind(9, TextureHandle(1)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_request_is_idempotent() {
        let catalog = MaterialCatalog::standard();
        let mut registry = TextureRegistry::new();
        let material = catalog.get(3).unwrap();
        assert!(registry.request(material));
        assert!(!registry.request(material));
        assert_eq!(registry.len(), 1);
    }
}
