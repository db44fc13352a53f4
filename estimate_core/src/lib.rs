//! # estimate_core - Remodeling Estimate Calculation Engine
//!
//! `estimate_core` is the computational heart of the estimator: it turns a
//! project's work items (measured in square feet, linear feet, or counts)
//! into a priced estimate, applies the ordered adjustment pipeline (labor
//! discount, waste, tax, markup, flat fees), and reconciles the total
//! against the deposit and payment ledger.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Never aborts**: Malformed numeric input coerces to zero and is
//!   reported through structured warnings; the engine always produces an
//!   estimate, erring toward undercounting
//! - **One pipeline**: The adjustment ordering exists in exactly one place
//!   and every view computes through it
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::classify::WorkItemKind;
//! use estimate_core::costing::build_report;
//! use estimate_core::measure::Measurement;
//! use estimate_core::project::{Category, Settings, WorkItem};
//!
//! let mut kitchen = Category::new("Kitchen");
//! kitchen.add_item(
//!     WorkItem::new("Kitchen Floor", Some(WorkItemKind::KitchenFlooring))
//!         .with_surface("Main", Measurement::SingleSurface {
//!             width_ft: 12.0,
//!             height_ft: 10.0,
//!             manual_sqft: None,
//!         })
//!         .with_rates(4.0, 2.0),
//! );
//!
//! let settings = Settings { tax_rate: 0.08, ..Default::default() };
//! let report = build_report(&[kitchen], &settings);
//!
//! assert_eq!(report.totals.material_cost, 480.0);
//! println!("Grand total: ${:.2}", report.totals.grand_total);
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Project container, categories, work items, settings
//! - [`measure`] - Measurement strategies and room-geometry math
//! - [`classify`] - Work item kinds and the name-inference fallback
//! - [`costing`] - Quantity resolution, the adjustment pipeline, reports
//! - [`ledger`] - Payment records, validated mutations, reconciliation
//! - [`units`] - Unit kinds and form-input numeric coercion
//! - [`errors`] - Structured error types

pub mod classify;
pub mod costing;
pub mod errors;
pub mod ledger;
pub mod measure;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use classify::{infer_kind_from_name, MeasurementBasis, WorkItemKind};
pub use costing::{
    aggregate, build_report, build_report_as_of, cost_work_item, resolve_quantity,
    CategoryBreakdown, EstimateWarning, ItemCost, ProjectTotals, Report, ResolvedQuantity,
};
pub use errors::{EstimateError, EstimateResult};
pub use ledger::{
    reconcile_payments, reconcile_payments_as_of, LedgerTotals, Payment, PaymentDraft,
    PaymentMethod,
};
pub use measure::{CeilingHeight, Measurement, Opening, RoomGeometry, RoomPlan, Surface};
pub use project::{Category, CustomerInfo, MiscFee, Project, Settings, WorkItem};
pub use units::UnitKind;
