use serde::{Deserialize, Serialize};

use kitchen_core::{ModuleStore, StoreError};

use crate::totals::LayoutTotals;

/// Flat hardware and edging charge per physical panel.
pub const HARDWARE_COST_PER_PANEL: f64 = 100.0;
/// Cutting and assembly doubles the material cost.
pub const LABOUR_MULTIPLIER: f64 = 2.0;

/// Price breakdown of one rebuild pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub panels_cost: f64,
    pub rear_wall_cost: f64,
    pub hardware_cost: f64,
    pub total: f64,
}

impl Quote {
    /// Prices `totals` with the store's selected carcass and rear-wall boards.
    pub fn compute(totals: &LayoutTotals, store: &ModuleStore) -> Result<Self, StoreError> {
        let board = store
            .materials
            .get(store.selected_list_material)
            .ok_or(StoreError::UnknownMaterial(store.selected_list_material))?;
        let panels_cost = board.cost_of_area(totals.panel_area);

        let rear_wall_cost = if store.has_rear_wall {
            let rear = store
                .materials
                .get(store.selected_rear_wall_material)
                .ok_or(StoreError::UnknownMaterial(store.selected_rear_wall_material))?;
            rear.cost_of_area(totals.rear_wall_area)
        } else {
            0.0
        };

        let hardware_cost = totals.panel_count as f64 * HARDWARE_COST_PER_PANEL;
        let total = (panels_cost + rear_wall_cost + hardware_cost) * LABOUR_MULTIPLIER;
        log::debug!(
            "Quote: panels {:.2}, rear walls {:.2}, hardware {:.2}, total {:.2}",
            panels_cost,
            rear_wall_cost,
            hardware_cost,
            total
        );

        Ok(Self {
            panels_cost,
            rear_wall_cost,
            hardware_cost,
            total,
        })
    }
}
