//! # Project Data Structures
//!
//! The `Project` struct is the root container for one estimate: customer
//! info, the category/work-item tree, and the project settings. Projects
//! serialize to human-readable JSON; persistence itself (where the JSON
//! lives, who may write it) belongs to the surrounding application, not to
//! this crate.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (schema version, timestamps)
//! ├── customer: CustomerInfo
//! ├── categories: Vec<Category>      (ordered; each owns ordered WorkItems)
//! └── settings: Settings             (adjustments, fees, deposit, payments)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::project::{Project, Category, CustomerInfo, WorkItem};
//! use estimate_core::classify::WorkItemKind;
//!
//! let mut project = Project::new(CustomerInfo::named("Dana Homeowner"));
//! let mut interior = Category::new("Interior");
//! interior.add_item(WorkItem::new("Paint living room", Some(WorkItemKind::GeneralPainting)));
//! project.add_category(interior);
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Dana Homeowner"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::WorkItemKind;
use crate::ledger::Payment;
use crate::measure::{Measurement, Surface};
use crate::units::{capped_fraction, de_flexible_f64, fraction, non_negative};

/// Current schema version for estimate documents
pub const SCHEMA_VERSION: &str = "0.1.0";

// ============================================================================
// Project Container
// ============================================================================

/// Root estimate container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Document metadata (schema version, timestamps)
    #[serde(default)]
    pub meta: ProjectMetadata,

    /// Customer this estimate is for
    #[serde(default)]
    pub customer: CustomerInfo,

    /// Ordered work categories
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Project-wide adjustments, fees, and the payment ledger
    #[serde(default)]
    pub settings: Settings,
}

impl Project {
    /// Create a new empty project for a customer.
    pub fn new(customer: CustomerInfo) -> Self {
        Project {
            meta: ProjectMetadata::new(),
            customer,
            categories: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// Append a category, returning its id.
    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    /// Remove a category by id, returning it if it existed.
    pub fn remove_category(&mut self, id: &Uuid) -> Option<Category> {
        let pos = self.categories.iter().position(|c| c.id == *id)?;
        self.touch();
        Some(self.categories.remove(pos))
    }

    /// Find a work item anywhere in the project by id.
    pub fn find_item(&self, id: &Uuid) -> Option<&WorkItem> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|item| item.id == *id)
    }

    /// Total number of work items across all categories.
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new(CustomerInfo::default())
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

impl ProjectMetadata {
    fn new() -> Self {
        let now = Utc::now();
        ProjectMetadata {
            version: SCHEMA_VERSION.to_string(),
            created: now,
            modified: now,
        }
    }
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        ProjectMetadata::new()
    }
}

/// Customer contact information.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl CustomerInfo {
    /// Customer with just a name; remaining contact fields start blank.
    pub fn named(name: impl Into<String>) -> Self {
        CustomerInfo { name: name.into(), ..Default::default() }
    }
}

// ============================================================================
// Categories and Work Items
// ============================================================================

/// A named grouping of work items.
///
/// Categories have no cost semantics of their own beyond summing their
/// items; they exist so estimates read in the order the work happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Stable id so editors can hold a reference across reorders
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Category name (e.g. "Kitchen", "Exterior")
    #[serde(default)]
    pub name: String,

    /// Ordered work items
    #[serde(default)]
    pub items: Vec<WorkItem>,
}

impl Category {
    /// Create an empty category.
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: Uuid::new_v4(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Append a work item, returning its id.
    pub fn add_item(&mut self, item: WorkItem) -> Uuid {
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Remove a work item by id, returning it if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<WorkItem> {
        let pos = self.items.iter().position(|i| i.id == *id)?;
        Some(self.items.remove(pos))
    }
}

/// A priced line item with a measurement strategy and per-unit rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Stable id
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Item name (e.g. "Kitchen Floor")
    #[serde(default)]
    pub name: String,

    /// Categorical type; when absent (or unrecognized in a legacy document)
    /// the kind is inferred from `name` as a fallback
    #[serde(default, alias = "type", deserialize_with = "crate::classify::de_opt_kind")]
    pub kind: Option<WorkItemKind>,

    /// Free-text refinement of the kind (e.g. "LVP", "semi-gloss")
    #[serde(default)]
    pub subtype: String,

    /// Ordered measurement records; total quantity is their sum
    #[serde(default)]
    pub surfaces: Vec<Surface>,

    /// Material cost per unit (currency)
    #[serde(default, deserialize_with = "de_flexible_f64", alias = "materialCost")]
    pub material_rate: f64,

    /// Labor cost per unit (currency)
    #[serde(default, deserialize_with = "de_flexible_f64", alias = "laborCost")]
    pub labor_rate: f64,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

impl WorkItem {
    /// Create a work item with no surfaces or rates yet.
    pub fn new(name: impl Into<String>, kind: Option<WorkItemKind>) -> Self {
        WorkItem {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            subtype: String::new(),
            surfaces: Vec::new(),
            material_rate: 0.0,
            labor_rate: 0.0,
            notes: String::new(),
        }
    }

    /// Add a measurement record (builder pattern).
    pub fn with_surface(mut self, label: impl Into<String>, measurement: Measurement) -> Self {
        self.surfaces.push(Surface::new(label, measurement));
        self
    }

    /// Set per-unit rates (builder pattern).
    pub fn with_rates(mut self, material_rate: f64, labor_rate: f64) -> Self {
        self.material_rate = material_rate;
        self.labor_rate = labor_rate;
        self
    }

    /// Material rate floored at zero.
    pub fn effective_material_rate(&self) -> f64 {
        non_negative(self.material_rate)
    }

    /// Labor rate floored at zero.
    pub fn effective_labor_rate(&self) -> f64 {
        non_negative(self.labor_rate)
    }
}

// ============================================================================
// Settings
// ============================================================================

/// A named flat fee added to the grand total.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MiscFee {
    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub amount: f64,
}

impl MiscFee {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        MiscFee { name: name.into(), amount }
    }
}

/// Per-project adjustment settings and the payment ledger.
///
/// The fractional fields are stored as fractions (7% tax is `0.07`); any
/// x100 presentation conversion belongs to the UI. Raw stored values are
/// preserved as entered; the `effective_*` accessors apply the clamping the
/// calculation pipeline actually uses (negatives floor at 0; markup and
/// labor discount additionally cap at 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Sales tax rate as a fraction
    #[serde(default, deserialize_with = "de_flexible_f64", alias = "taxRate")]
    pub tax_rate: f64,

    /// Material waste factor as a fraction
    #[serde(default, deserialize_with = "de_flexible_f64", alias = "wasteFactor")]
    pub waste_factor: f64,

    /// Profit markup as a fraction, capped at 1.0
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub markup: f64,

    /// Labor discount as a fraction, capped at 1.0
    #[serde(default, deserialize_with = "de_flexible_f64", alias = "laborDiscount")]
    pub labor_discount: f64,

    /// Flat transportation fee (currency, not scaled)
    #[serde(default, deserialize_with = "de_flexible_f64", alias = "transportationFee")]
    pub transportation_fee: f64,

    /// Additional flat fees
    #[serde(default, alias = "miscFees")]
    pub misc_fees: Vec<MiscFee>,

    /// Upfront deposit, always treated as paid
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub deposit: f64,

    /// Scheduled and received payments
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tax_rate: 0.0,
            waste_factor: 0.0,
            markup: 0.0,
            labor_discount: 0.0,
            transportation_fee: 0.0,
            misc_fees: Vec::new(),
            deposit: 0.0,
            payments: Vec::new(),
        }
    }
}

impl Settings {
    /// Tax rate with negatives floored at zero.
    pub fn effective_tax_rate(&self) -> f64 {
        fraction(self.tax_rate)
    }

    /// Waste factor with negatives floored at zero.
    pub fn effective_waste_factor(&self) -> f64 {
        fraction(self.waste_factor)
    }

    /// Markup clamped to `[0, 1]`.
    pub fn effective_markup(&self) -> f64 {
        capped_fraction(self.markup)
    }

    /// Labor discount clamped to `[0, 1]`.
    pub fn effective_labor_discount(&self) -> f64 {
        capped_fraction(self.labor_discount)
    }

    /// Transportation fee floored at zero.
    pub fn effective_transportation_fee(&self) -> f64 {
        non_negative(self.transportation_fee)
    }

    /// Deposit floored at zero.
    pub fn effective_deposit(&self) -> f64 {
        non_negative(self.deposit)
    }

    /// Sum of misc fees, each floored at zero.
    pub fn misc_total(&self) -> f64 {
        self.misc_fees.iter().map(|fee| non_negative(fee.amount)).sum()
    }
}
