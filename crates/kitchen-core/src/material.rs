use serde::{Deserialize, Serialize};

/// Opaque material identifier, resolved to a texture by the renderer.
pub type MaterialId = u32;

/// Area of one standard 2800 x 2070 mm board sheet, in mm².
pub const STANDARD_SHEET_AREA: f64 = 2800.0 * 2070.0;

/// Board family of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardKind {
    /// Laminated chipboard used for carcasses and facades.
    Ldsp,
    /// Thin hardboard used for rear walls.
    Hdf,
}

/// A purchasable board material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: MaterialId,
    pub title: String,
    /// Price of one sheet.
    pub price: f64,
    /// Sheet area in mm².
    pub sheet_area: f64,
    pub texture_url: String,
    pub thickness: f64,
    pub manufacturer: String,
    pub manufacturer_code: String,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: BoardKind,
    pub is_available: bool,
    #[serde(default)]
    pub slug: String,
}

impl Material {
    pub fn new(id: MaterialId, title: &str, kind: BoardKind, thickness: f64, price: f64) -> Self {
        Self {
            id,
            title: title.to_string(),
            price,
            sheet_area: STANDARD_SHEET_AREA,
            texture_url: String::new(),
            thickness,
            manufacturer: String::new(),
            manufacturer_code: String::new(),
            color: String::from("white"),
            kind,
            is_available: true,
            slug: String::new(),
        }
    }

    pub fn with_texture(mut self, url: &str) -> Self {
        self.texture_url = url.to_string();
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: &str, code: &str) -> Self {
        self.manufacturer = manufacturer.to_string();
        self.manufacturer_code = code.to_string();
        self
    }

    /// Cost of `area` mm² of this board, pro rata per sheet.
    pub fn cost_of_area(&self, area: f64) -> f64 {
        if self.sheet_area <= 0.0 {
            return 0.0;
        }
        area / self.sheet_area * self.price
    }
}

/// The ordered set of materials the planner offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCatalog {
    materials: Vec<Material>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
        }
    }

    /// Default carcass board (id 1), rear-wall board (id 2) and the
    /// selectable decor boards.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.add(
            Material::new(1, "White standard", BoardKind::Ldsp, 16.0, 2848.0)
                .with_texture("/textures/ldsp_white.jpg")
                .with_manufacturer("Hardware", "H111"),
        );
        catalog.add(
            Material::new(2, "Anthracite", BoardKind::Hdf, 3.0, 1053.0)
                .with_texture("/textures/ldsp_bardolino.avif")
                .with_manufacturer("Hardware", "H111"),
        );
        catalog.add(
            Material::new(3, "Bardolino oak", BoardKind::Ldsp, 16.0, 3907.0)
                .with_texture("/textures/ldsp_bardolino.avif")
                .with_manufacturer("Egger", "u234"),
        );
        catalog.add(
            Material::new(6, "Graphite grey", BoardKind::Ldsp, 16.0, 3395.0)
                .with_texture("/textures/ldsp_grey_graphite.avif")
                .with_manufacturer("Egger", "h111"),
        );
        catalog
    }

    /// Insert a material, replacing any existing one with the same id.
    pub fn add(&mut self, material: Material) {
        match self.materials.iter_mut().find(|m| m.id == material.id) {
            Some(existing) => *existing = material,
            None => self.materials.push(material),
        }
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: MaterialId) -> bool {
        self.get(id).is_some()
    }

    pub fn available(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter().filter(|m| m.is_available)
    }

    pub fn all(&self) -> &[Material] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_lookup() {
        let catalog = MaterialCatalog::standard();
        assert_eq!(catalog.get(2).map(|m| m.kind), Some(BoardKind::Hdf));
        assert!(catalog.get(4).is_none());
        assert_eq!(catalog.available().count(), catalog.len());
    }

    #[test]
    fn test_add_replaces_same_id() {
        let mut catalog = MaterialCatalog::new();
        catalog.add(Material::new(7, "a", BoardKind::Ldsp, 16.0, 1.0));
        catalog.add(Material::new(7, "b", BoardKind::Ldsp, 18.0, 2.0));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(7).unwrap().title, "b");
    }

    #[test]
    fn test_cost_of_area() {
        let m = Material::new(1, "w", BoardKind::Ldsp, 16.0, 2848.0);
        assert!((m.cost_of_area(STANDARD_SHEET_AREA / 2.0) - 1424.0).abs() < 1e-9);
    }
}
