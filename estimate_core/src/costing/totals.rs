//! # Project Aggregation
//!
//! Sums work-item costs across all categories and applies the ordered
//! adjustment pipeline to produce the grand total. The order is load-bearing:
//! the labor discount reduces labor *before* it enters the base subtotal, so
//! waste, tax, and markup all scale the post-discount base, and markup does
//! not compound over waste or tax.
//!
//! This module is the only place the pipeline exists. Every consumer
//! (report, category breakdown, any future view) calls into it so the
//! business rules cannot fork across call sites.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::costing::aggregate;
//! use estimate_core::project::{Category, Settings, WorkItem};
//! use estimate_core::classify::WorkItemKind;
//! use estimate_core::measure::Measurement;
//!
//! let mut cat = Category::new("Interior");
//! cat.add_item(
//!     WorkItem::new("Wall", Some(WorkItemKind::Drywall))
//!         .with_surface("North", Measurement::SingleSurface {
//!             width_ft: 10.0,
//!             height_ft: 10.0,
//!             manual_sqft: None,
//!         })
//!         .with_rates(2.0, 1.0),
//! );
//! let settings = Settings { labor_discount: 0.1, ..Default::default() };
//!
//! let totals = aggregate(&[cat], &settings);
//! assert_eq!(totals.material_cost, 200.0);
//! assert_eq!(totals.labor_cost, 90.0); // 100 raw - 10 discount
//! assert_eq!(totals.base_subtotal, 290.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::project::{Category, Settings};

use super::work_item::cost_work_item;

/// Every intermediate value of the adjustment pipeline, exposed for
/// transparency. All amounts are unrounded; two-decimal rounding belongs
/// to presentation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectTotals {
    /// Sum of material cost over all items
    pub material_cost: f64,

    /// Sum of labor cost over all items, before the discount
    pub labor_cost_raw: f64,

    /// Labor discount taken off the raw labor cost
    pub labor_discount_amount: f64,

    /// Labor cost after the discount
    pub labor_cost: f64,

    /// Material plus discounted labor; the base every percentage scales
    pub base_subtotal: f64,

    /// Waste factor applied to the base subtotal
    pub waste_cost: f64,

    /// Tax applied to the base subtotal
    pub tax: f64,

    /// Markup applied to the base subtotal (not compounded over waste/tax)
    pub markup_cost: f64,

    /// Sum of flat misc fees
    pub misc_total: f64,

    /// Flat transportation fee
    pub transportation_fee: f64,

    /// The whole estimate
    pub grand_total: f64,
}

/// Run the adjustment pipeline over already-summed material/labor costs.
///
/// This is the single canonical ordering (spec steps 3-10); `aggregate`
/// and the per-category breakdown both bottom out here.
pub(crate) fn finish_totals(material_cost: f64, labor_cost_raw: f64, settings: &Settings) -> ProjectTotals {
    let labor_discount_amount = labor_cost_raw * settings.effective_labor_discount();
    let labor_cost = labor_cost_raw - labor_discount_amount;
    let base_subtotal = material_cost + labor_cost;

    let waste_cost = base_subtotal * settings.effective_waste_factor();
    let tax = base_subtotal * settings.effective_tax_rate();
    let markup_cost = base_subtotal * settings.effective_markup();
    let misc_total = settings.misc_total();
    let transportation_fee = settings.effective_transportation_fee();

    ProjectTotals {
        material_cost,
        labor_cost_raw,
        labor_discount_amount,
        labor_cost,
        base_subtotal,
        waste_cost,
        tax,
        markup_cost,
        misc_total,
        transportation_fee,
        grand_total: base_subtotal + waste_cost + tax + markup_cost + misc_total + transportation_fee,
    }
}

/// Sum material and labor over a slice of categories, without adjustments.
pub(crate) fn sum_costs(categories: &[Category]) -> (f64, f64) {
    let mut material = 0.0;
    let mut labor = 0.0;
    for item in categories.iter().flat_map(|c| c.items.iter()) {
        let cost = cost_work_item(item);
        material += cost.material;
        labor += cost.labor;
    }
    (material, labor)
}

/// Aggregate all categories under the project settings.
///
/// Pure and stateless; recomputed from scratch on every call.
pub fn aggregate(categories: &[Category], settings: &Settings) -> ProjectTotals {
    let (material_cost, labor_cost_raw) = sum_costs(categories);
    finish_totals(material_cost, labor_cost_raw, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::WorkItemKind;
    use crate::measure::Measurement;
    use crate::project::{MiscFee, WorkItem};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn single_wall_item(material_rate: f64, labor_rate: f64) -> Category {
        let mut cat = Category::new("Interior");
        cat.add_item(
            WorkItem::new("Wall", Some(WorkItemKind::Drywall))
                .with_surface("North", Measurement::SingleSurface {
                    width_ft: 10.0,
                    height_ft: 10.0,
                    manual_sqft: None,
                })
                .with_rates(material_rate, labor_rate),
        );
        cat
    }

    #[test]
    fn test_empty_project_totals() {
        let settings = Settings {
            transportation_fee: 150.0,
            misc_fees: vec![MiscFee::new("Permit", 250.0)],
            tax_rate: 0.08,
            waste_factor: 0.05,
            markup: 0.1,
            ..Default::default()
        };
        let totals = aggregate(&[], &settings);
        assert_eq!(totals.material_cost, 0.0);
        assert_eq!(totals.labor_cost, 0.0);
        assert_eq!(totals.waste_cost, 0.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.markup_cost, 0.0);
        assert_eq!(totals.grand_total, 400.0); // transportation + misc only
    }

    #[test]
    fn test_full_pipeline_worked_example() {
        // 100 sqft at material 2 / labor 1; 10% labor discount, 5% waste,
        // 8% tax, 10% markup
        let categories = vec![single_wall_item(2.0, 1.0)];
        let settings = Settings {
            labor_discount: 0.1,
            waste_factor: 0.05,
            tax_rate: 0.08,
            markup: 0.1,
            ..Default::default()
        };

        let totals = aggregate(&categories, &settings);
        assert!(approx(totals.material_cost, 200.0));
        assert!(approx(totals.labor_cost_raw, 100.0));
        assert!(approx(totals.labor_discount_amount, 10.0));
        assert!(approx(totals.labor_cost, 90.0));
        assert!(approx(totals.base_subtotal, 290.0));
        assert!(approx(totals.waste_cost, 14.5));
        assert!(approx(totals.tax, 23.2));
        assert!(approx(totals.markup_cost, 29.0));
        assert!(approx(totals.grand_total, 356.7));
    }

    #[test]
    fn test_percentages_scale_post_discount_base() {
        // With a 100% labor discount the base is material only, and every
        // percentage scales that.
        let categories = vec![single_wall_item(2.0, 1.0)];
        let settings = Settings {
            labor_discount: 1.0,
            waste_factor: 0.5,
            ..Default::default()
        };
        let totals = aggregate(&categories, &settings);
        assert!(approx(totals.labor_cost, 0.0));
        assert!(approx(totals.base_subtotal, 200.0));
        assert!(approx(totals.waste_cost, 100.0));
    }

    #[test]
    fn test_markup_does_not_compound_over_waste_and_tax() {
        let categories = vec![single_wall_item(1.0, 0.0)];
        let settings = Settings {
            waste_factor: 0.5,
            tax_rate: 0.5,
            markup: 0.1,
            ..Default::default()
        };
        let totals = aggregate(&categories, &settings);
        // Markup is 10% of the 100 base, not of the 200 post-waste/tax sum
        assert!(approx(totals.markup_cost, 10.0));
    }

    #[test]
    fn test_negative_adjustments_clamp_to_zero() {
        let categories = vec![single_wall_item(2.0, 1.0)];
        let settings = Settings {
            labor_discount: -0.5,
            waste_factor: -0.1,
            tax_rate: -0.08,
            markup: -1.0,
            transportation_fee: -200.0,
            misc_fees: vec![MiscFee::new("Bad", -50.0)],
            ..Default::default()
        };
        let totals = aggregate(&categories, &settings);
        assert!(approx(totals.labor_cost, 100.0));
        assert!(approx(totals.grand_total, 300.0));
    }

    #[test]
    fn test_oversized_markup_caps_at_full_base() {
        let categories = vec![single_wall_item(1.0, 0.0)];
        let settings = Settings { markup: 2.5, ..Default::default() };
        let totals = aggregate(&categories, &settings);
        assert!(approx(totals.markup_cost, 100.0)); // capped at 100%
    }
}
