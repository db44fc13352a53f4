//! # Reconciliation Report
//!
//! The report is the engine's whole output surface: project totals, the
//! payment-ledger reconciliation, a per-category breakdown, and any data
//! warnings collected along the way, in one serializable record.
//!
//! It is a pure function of `(categories, settings)` - no cached or
//! incremental state, recomputed on every read, so calling it twice on
//! identical input yields identical output.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::costing::build_report_as_of;
//! use estimate_core::project::Settings;
//! use chrono::NaiveDate;
//!
//! let settings = Settings { transportation_fee: 150.0, ..Default::default() };
//! let as_of = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
//!
//! let report = build_report_as_of(&[], &settings, as_of);
//! assert_eq!(report.totals.grand_total, 150.0);
//! assert_eq!(report.ledger.amount_remaining, 150.0);
//! assert!(report.category_breakdown.is_empty());
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{reconcile_payments_as_of, LedgerTotals};
use crate::project::{Category, Settings};

use super::totals::{finish_totals, ProjectTotals};
use super::work_item::{cost_work_item, EstimateWarning};

/// Round a currency amount to two decimals.
///
/// Presentation-only: the engine never rounds internally, so intermediate
/// sums stay exact.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Informational per-category cost summary.
///
/// Covers material, discounted labor, and their sum only; waste, tax,
/// markup, misc fees, and transportation are project-level and are not
/// allocated to categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Category id
    pub id: Uuid,

    /// Category name
    pub name: String,

    /// Material cost of the category's items
    pub material_cost: f64,

    /// Labor cost of the category's items, after the labor discount
    pub labor_cost: f64,

    /// Material plus discounted labor
    pub subtotal: f64,
}

/// The full presentable estimate: totals, ledger, breakdown, warnings.
///
/// `totals` and `ledger` flatten into the top level on serialization, so
/// the JSON shape is one flat record plus the breakdown and warning lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Project totals (adjustment pipeline output)
    #[serde(flatten)]
    pub totals: ProjectTotals,

    /// Payment reconciliation against the grand total
    #[serde(flatten)]
    pub ledger: LedgerTotals,

    /// Per-category informational breakdown
    pub category_breakdown: Vec<CategoryBreakdown>,

    /// Data problems encountered while resolving quantities
    pub warnings: Vec<EstimateWarning>,
}

impl Report {
    /// Copy of this report with every currency field rounded to two
    /// decimals, for presentation and export.
    pub fn rounded(&self) -> Report {
        Report {
            totals: ProjectTotals {
                material_cost: round2(self.totals.material_cost),
                labor_cost_raw: round2(self.totals.labor_cost_raw),
                labor_discount_amount: round2(self.totals.labor_discount_amount),
                labor_cost: round2(self.totals.labor_cost),
                base_subtotal: round2(self.totals.base_subtotal),
                waste_cost: round2(self.totals.waste_cost),
                tax: round2(self.totals.tax),
                markup_cost: round2(self.totals.markup_cost),
                misc_total: round2(self.totals.misc_total),
                transportation_fee: round2(self.totals.transportation_fee),
                grand_total: round2(self.totals.grand_total),
            },
            ledger: LedgerTotals {
                total_collected: round2(self.ledger.total_collected),
                amount_remaining: round2(self.ledger.amount_remaining),
                amount_scheduled_unpaid: round2(self.ledger.amount_scheduled_unpaid),
                overdue_amount: round2(self.ledger.overdue_amount),
                overpayment: round2(self.ledger.overpayment),
            },
            category_breakdown: self
                .category_breakdown
                .iter()
                .map(|c| CategoryBreakdown {
                    id: c.id,
                    name: c.name.clone(),
                    material_cost: round2(c.material_cost),
                    labor_cost: round2(c.labor_cost),
                    subtotal: round2(c.subtotal),
                })
                .collect(),
            warnings: self.warnings.clone(),
        }
    }
}

/// Build the full report with "today" supplied.
///
/// One pass over the items feeds both the per-category breakdown and the
/// project totals; both run the same canonical adjustment pipeline.
pub fn build_report_as_of(categories: &[Category], settings: &Settings, as_of: NaiveDate) -> Report {
    let mut material_cost = 0.0;
    let mut labor_cost_raw = 0.0;
    let mut warnings = Vec::new();
    let mut category_breakdown = Vec::with_capacity(categories.len());

    for category in categories {
        let mut cat_material = 0.0;
        let mut cat_labor_raw = 0.0;
        for item in &category.items {
            let mut cost = cost_work_item(item);
            cat_material += cost.material;
            cat_labor_raw += cost.labor;
            warnings.append(&mut cost.warnings);
        }

        let cat_totals = finish_totals(cat_material, cat_labor_raw, settings);
        category_breakdown.push(CategoryBreakdown {
            id: category.id,
            name: category.name.clone(),
            material_cost: cat_totals.material_cost,
            labor_cost: cat_totals.labor_cost,
            subtotal: cat_totals.base_subtotal,
        });

        material_cost += cat_material;
        labor_cost_raw += cat_labor_raw;
    }

    let totals = finish_totals(material_cost, labor_cost_raw, settings);
    let ledger = reconcile_payments_as_of(totals.grand_total, settings, as_of);

    Report {
        totals,
        ledger,
        category_breakdown,
        warnings,
    }
}

/// Build the full report using the local calendar date as "today".
pub fn build_report(categories: &[Category], settings: &Settings) -> Report {
    build_report_as_of(categories, settings, Local::now().date_naive())
}
