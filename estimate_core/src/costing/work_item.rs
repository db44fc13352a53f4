//! # Work Item Resolution and Costing
//!
//! Two small pure functions sit at the bottom of the costing stack:
//!
//! - [`resolve_quantity`] - fold a work item's surfaces into one scalar
//!   quantity in the item's native unit
//! - [`cost_work_item`] - multiply that quantity by the item's per-unit
//!   material and labor rates
//!
//! Neither ever errors. Malformed input degrades toward zero (the estimate
//! undercounts rather than aborts) and the degradation is reported through
//! [`EstimateWarning`] values so the caller can flag the data problem.

use serde::{Deserialize, Serialize};

use crate::classify::infer_kind_from_name;
use crate::project::WorkItem;
use crate::units::UnitKind;

// ============================================================================
// Warnings
// ============================================================================

/// Non-fatal data problem found while resolving an estimate.
///
/// The engine never aborts over these; it clamps, keeps going, and hands
/// the warning to the caller to log or display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EstimateWarning {
    /// A room surface's door/window/closet exclusions claimed more area
    /// than the room has; its quantity was clamped to zero.
    ExclusionsExceedRoomArea {
        /// Work item name
        item: String,
        /// Surface label
        surface: String,
        /// Square footage the exclusions overshot the gross area by
        excess_sqft: f64,
    },

    /// A work item carried no kind and its name matched no keyword rule;
    /// its quantity resolved to zero.
    UnclassifiedItem {
        /// Work item name
        item: String,
    },
}

// ============================================================================
// Unit Resolver
// ============================================================================

/// A work item's resolved quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedQuantity {
    /// Total quantity across surfaces, always >= 0
    pub quantity: f64,

    /// The item's native unit; `None` when the item was unclassifiable
    pub unit: Option<UnitKind>,

    /// Data problems encountered while resolving
    pub warnings: Vec<EstimateWarning>,
}

/// Resolve a work item's measurement records into one scalar quantity.
///
/// The item's kind (explicit, or inferred from its name for legacy
/// documents) gates resolution: an unclassifiable item resolves to zero
/// with a warning rather than guessing. Classified items sum their
/// surfaces' resolved quantities; each surface resolves by its own
/// measurement variant and contributes zero when its dimensions are
/// missing or negative. Never panics, never returns NaN.
pub fn resolve_quantity(item: &WorkItem) -> ResolvedQuantity {
    let kind = item.kind.or_else(|| infer_kind_from_name(&item.name));
    let Some(kind) = kind else {
        return ResolvedQuantity {
            quantity: 0.0,
            unit: None,
            warnings: vec![EstimateWarning::UnclassifiedItem { item: item.name.clone() }],
        };
    };

    let mut quantity = 0.0;
    let mut warnings = Vec::new();
    for surface in &item.surfaces {
        let resolved = surface.measurement.resolve();
        quantity += resolved.quantity;
        if let Some(excess_sqft) = resolved.excess_exclusion_sqft {
            warnings.push(EstimateWarning::ExclusionsExceedRoomArea {
                item: item.name.clone(),
                surface: surface.label.clone(),
                excess_sqft,
            });
        }
    }

    ResolvedQuantity {
        quantity,
        unit: Some(kind.unit()),
        warnings,
    }
}

// ============================================================================
// Work Item Costing
// ============================================================================

/// Material and labor cost for one work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCost {
    /// Resolved quantity the rates were applied to
    pub quantity: f64,

    /// The item's native unit; `None` when the item was unclassifiable
    pub unit: Option<UnitKind>,

    /// Material rate x quantity
    pub material: f64,

    /// Labor rate x quantity (undiscounted; the labor discount is a
    /// project-level adjustment)
    pub labor: f64,

    /// Data problems encountered while resolving
    pub warnings: Vec<EstimateWarning>,
}

/// Cost a work item: per-unit rates times resolved quantity.
///
/// Rates default to zero when absent and negatives are floored at zero.
pub fn cost_work_item(item: &WorkItem) -> ItemCost {
    let resolved = resolve_quantity(item);
    ItemCost {
        material: item.effective_material_rate() * resolved.quantity,
        labor: item.effective_labor_rate() * resolved.quantity,
        quantity: resolved.quantity,
        unit: resolved.unit,
        warnings: resolved.warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::WorkItemKind;
    use crate::measure::{CeilingHeight, Measurement, Opening, RoomGeometry, RoomPlan};

    #[test]
    fn test_multi_surface_sum() {
        let item = WorkItem::new("Bedroom floors", Some(WorkItemKind::GeneralFlooring))
            .with_surface("Bedroom 1", Measurement::SingleSurface {
                width_ft: 12.0,
                height_ft: 10.0,
                manual_sqft: None,
            })
            .with_surface("Bedroom 2", Measurement::SingleSurface {
                width_ft: 11.0,
                height_ft: 10.0,
                manual_sqft: None,
            });
        let resolved = resolve_quantity(&item);
        assert_eq!(resolved.quantity, 230.0);
        assert_eq!(resolved.unit, Some(UnitKind::SquareFeet));
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_linear_item() {
        let item = WorkItem::new("Baseboard", Some(WorkItemKind::Baseboard))
            .with_surface("Hallway", Measurement::LinearFoot { linear_ft: 42.0 });
        let resolved = resolve_quantity(&item);
        assert_eq!(resolved.quantity, 42.0);
        assert_eq!(resolved.unit, Some(UnitKind::LinearFeet));
    }

    #[test]
    fn test_kind_inferred_from_name() {
        // Legacy document: no kind, but the name says painting
        let item = WorkItem::new("Paint master bedroom", None).with_surface(
            "Master",
            Measurement::RoomSurface(RoomGeometry {
                plan: RoomPlan::Rectangular { length_ft: 12.0, width_ft: 10.0 },
                ceiling: CeilingHeight::Standard8,
                ..Default::default()
            }),
        );
        let resolved = resolve_quantity(&item);
        assert_eq!(resolved.quantity, 472.0);
        assert_eq!(resolved.unit, Some(UnitKind::SquareFeet));
    }

    #[test]
    fn test_unclassifiable_item_resolves_to_zero_with_warning() {
        let item = WorkItem::new("Haul away debris", None)
            .with_surface("", Measurement::ByUnit { units: 3.0 });
        let resolved = resolve_quantity(&item);
        assert_eq!(resolved.quantity, 0.0);
        assert_eq!(resolved.unit, None);
        assert_eq!(
            resolved.warnings,
            vec![EstimateWarning::UnclassifiedItem { item: "Haul away debris".to_string() }]
        );
    }

    #[test]
    fn test_exclusion_clamp_produces_warning() {
        let item = WorkItem::new("Paint closet", Some(WorkItemKind::GeneralPainting)).with_surface(
            "Closet",
            Measurement::RoomSurface(RoomGeometry {
                plan: RoomPlan::Square { length_ft: 1.0 },
                ceiling: CeilingHeight::Custom { height_ft: 1.0 },
                doors: vec![Opening { width_ft: 10.0, height_ft: 10.0 }],
                ..Default::default()
            }),
        );
        let resolved = resolve_quantity(&item);
        assert_eq!(resolved.quantity, 0.0);
        assert!(matches!(
            resolved.warnings.as_slice(),
            [EstimateWarning::ExclusionsExceedRoomArea { excess_sqft, .. }] if *excess_sqft == 95.0
        ));
    }

    #[test]
    fn test_cost_work_item() {
        let item = WorkItem::new("Wall", Some(WorkItemKind::Drywall))
            .with_surface("North", Measurement::SingleSurface {
                width_ft: 10.0,
                height_ft: 10.0,
                manual_sqft: None,
            })
            .with_rates(2.0, 1.0);
        let cost = cost_work_item(&item);
        assert_eq!(cost.quantity, 100.0);
        assert_eq!(cost.material, 200.0);
        assert_eq!(cost.labor, 100.0);
    }

    #[test]
    fn test_negative_rates_cost_nothing() {
        let item = WorkItem::new("Wall", Some(WorkItemKind::Drywall))
            .with_surface("North", Measurement::SingleSurface {
                width_ft: 10.0,
                height_ft: 10.0,
                manual_sqft: None,
            })
            .with_rates(-2.0, 1.0);
        let cost = cost_work_item(&item);
        assert_eq!(cost.material, 0.0);
        assert_eq!(cost.labor, 100.0);
    }

    #[test]
    fn test_item_with_no_surfaces() {
        let item = WorkItem::new("Tile shower", Some(WorkItemKind::TileWork)).with_rates(8.0, 6.0);
        let cost = cost_work_item(&item);
        assert_eq!(cost.quantity, 0.0);
        assert_eq!(cost.material, 0.0);
        assert_eq!(cost.labor, 0.0);
        assert!(cost.warnings.is_empty());
    }
}
