//! # Costing Pipeline
//!
//! The costing stack, bottom to top:
//!
//! - [`resolve_quantity`] / [`cost_work_item`] - one work item's quantity
//!   and material/labor cost
//! - [`aggregate`] - project totals through the ordered adjustment pipeline
//!   (labor discount, then waste/tax/markup on the post-discount base, then
//!   flat fees)
//! - [`build_report`] - totals merged with the payment-ledger
//!   reconciliation and the per-category breakdown
//!
//! Everything here is pure: plain data in, plain data out, no interior
//! state. Malformed numeric input degrades to zero with an
//! [`EstimateWarning`] rather than an error, so a half-edited project
//! still renders a usable estimate.

pub mod report;
pub mod totals;
pub mod work_item;

pub use report::{build_report, build_report_as_of, round2, CategoryBreakdown, Report};
pub use totals::{aggregate, ProjectTotals};
pub use work_item::{cost_work_item, resolve_quantity, EstimateWarning, ItemCost, ResolvedQuantity};
