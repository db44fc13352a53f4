//! # Payment Ledger
//!
//! Payments are scheduled and received against the estimate's grand total.
//! The deposit is an always-paid upfront amount distinct from the itemized
//! ledger; everything else is a [`Payment`] record toggled between scheduled
//! (`is_paid == false`) and received (`is_paid == true`).
//!
//! Ledger mutations go through [`PaymentDraft`], which validates the whole
//! record (parseable date, positive amount) before any state changes - a
//! rejected draft leaves the ledger exactly as it was.
//!
//! Reconciliation itself is a pure fold over the records; the dated
//! `_as_of` form exists so "today" is injectable and tests stay
//! deterministic.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::ledger::{reconcile_payments_as_of, PaymentDraft, PaymentMethod};
//! use estimate_core::project::Settings;
//! use chrono::NaiveDate;
//!
//! let mut settings = Settings { deposit: 200.0, ..Default::default() };
//!
//! let mut draft = PaymentDraft::new("2026-03-01", 300.0, PaymentMethod::Check);
//! draft.is_paid = true;
//! settings.add_payment(draft).unwrap();
//! settings.add_payment(PaymentDraft::new("2026-04-01", 600.0, PaymentMethod::Zelle)).unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
//! let ledger = reconcile_payments_as_of(1000.0, &settings, today);
//! assert_eq!(ledger.total_collected, 500.0);
//! assert_eq!(ledger.amount_remaining, 500.0);
//! assert_eq!(ledger.overdue_amount, 600.0); // the unpaid 600 came due April 1
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::project::Settings;
use crate::units::{de_flexible_f64, non_negative};

/// Date formats accepted from form input, tried in order.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

// ============================================================================
// Payment Records
// ============================================================================

/// How a payment was (or will be) made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Credit,
    Debit,
    Check,
    Zelle,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Credit,
        PaymentMethod::Debit,
        PaymentMethod::Check,
        PaymentMethod::Zelle,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Credit => "Credit",
            PaymentMethod::Debit => "Debit",
            PaymentMethod::Check => "Check",
            PaymentMethod::Zelle => "Zelle",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One scheduled or received payment.
///
/// Records are edited in place and removed by index; no audit trail is
/// kept. Construction goes through [`PaymentDraft::validate`] so a stored
/// record always has a real date and a positive amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment date (date-only; time of day never matters)
    pub date: NaiveDate,

    /// Amount, always > 0
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub amount: f64,

    /// Payment method
    #[serde(default)]
    pub method: PaymentMethod,

    /// Free-form note
    #[serde(default)]
    pub note: String,

    /// Whether the payment has actually been received
    #[serde(default, alias = "isPaid")]
    pub is_paid: bool,
}

impl Payment {
    /// True if this payment is unpaid and its date has passed.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        !self.is_paid && self.date < as_of
    }
}

// ============================================================================
// Drafts and Validated Mutation
// ============================================================================

/// Unvalidated payment form input.
///
/// The date arrives as text and the amount may have been typed; `validate`
/// turns a draft into a [`Payment`] or rejects it with a field-scoped error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDraft {
    /// Date text, accepted as `YYYY-MM-DD` or `MM/DD/YYYY`
    #[serde(default)]
    pub date: String,

    /// Amount; must be strictly positive to validate
    #[serde(default, deserialize_with = "de_flexible_f64")]
    pub amount: f64,

    #[serde(default)]
    pub method: PaymentMethod,

    #[serde(default)]
    pub note: String,

    #[serde(default, alias = "isPaid")]
    pub is_paid: bool,
}

impl PaymentDraft {
    /// A scheduled (unpaid) payment draft.
    pub fn new(date: impl Into<String>, amount: f64, method: PaymentMethod) -> Self {
        PaymentDraft {
            date: date.into(),
            amount,
            method,
            note: String::new(),
            is_paid: false,
        }
    }

    /// Validate the draft into a payment record.
    ///
    /// Both checks run against the draft alone; nothing is written anywhere
    /// until the caller stores the returned record.
    pub fn validate(&self) -> EstimateResult<Payment> {
        let date = parse_payment_date(&self.date)?;
        if !(self.amount > 0.0) {
            return Err(EstimateError::invalid_input(
                "amount",
                self.amount.to_string(),
                "Payment amount must be greater than zero",
            ));
        }
        Ok(Payment {
            date,
            amount: self.amount,
            method: self.method,
            note: self.note.clone(),
            is_paid: self.is_paid,
        })
    }
}

/// Parse a payment date from form text.
pub fn parse_payment_date(raw: &str) -> EstimateResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EstimateError::missing_field("date"));
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| {
            EstimateError::invalid_input(
                "date",
                trimmed,
                "Expected a calendar date (YYYY-MM-DD or MM/DD/YYYY)",
            )
        })
}

impl Settings {
    /// Validate and append a payment, returning its index.
    pub fn add_payment(&mut self, draft: PaymentDraft) -> EstimateResult<usize> {
        let payment = draft.validate()?;
        self.payments.push(payment);
        Ok(self.payments.len() - 1)
    }

    /// Validate a draft and overwrite the payment at `index`.
    pub fn update_payment(&mut self, index: usize, draft: PaymentDraft) -> EstimateResult<()> {
        let payment = draft.validate()?;
        let len = self.payments.len();
        let slot = self
            .payments
            .get_mut(index)
            .ok_or_else(|| EstimateError::index_out_of_range("payments", index, len))?;
        *slot = payment;
        Ok(())
    }

    /// Remove and return the payment at `index`.
    pub fn remove_payment(&mut self, index: usize) -> EstimateResult<Payment> {
        if index >= self.payments.len() {
            return Err(EstimateError::index_out_of_range(
                "payments",
                index,
                self.payments.len(),
            ));
        }
        Ok(self.payments.remove(index))
    }

    /// Toggle whether the payment at `index` has been received.
    pub fn set_payment_paid(&mut self, index: usize, is_paid: bool) -> EstimateResult<()> {
        let len = self.payments.len();
        let payment = self
            .payments
            .get_mut(index)
            .ok_or_else(|| EstimateError::index_out_of_range("payments", index, len))?;
        payment.is_paid = is_paid;
        Ok(())
    }
}

// ============================================================================
// Reconciliation
// ============================================================================

/// Ledger reconciliation against the grand total.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Deposit plus all received payments
    pub total_collected: f64,

    /// Grand total minus collected, floored at zero
    pub amount_remaining: f64,

    /// Sum of scheduled (unpaid) payments; informational, independent of
    /// whether it matches `amount_remaining`
    pub amount_scheduled_unpaid: f64,

    /// Scheduled payments whose date has passed
    pub overdue_amount: f64,

    /// Collected amount in excess of the grand total, floored at zero
    pub overpayment: f64,
}

/// Reconcile the ledger against a grand total, with "today" supplied.
///
/// Pure: same inputs, same output. Overdue comparison is date-only.
pub fn reconcile_payments_as_of(grand_total: f64, settings: &Settings, as_of: NaiveDate) -> LedgerTotals {
    let collected_payments: f64 = settings
        .payments
        .iter()
        .filter(|p| p.is_paid)
        .map(|p| non_negative(p.amount))
        .sum();
    let total_collected = settings.effective_deposit() + collected_payments;

    let amount_scheduled_unpaid: f64 = settings
        .payments
        .iter()
        .filter(|p| !p.is_paid)
        .map(|p| non_negative(p.amount))
        .sum();

    let overdue_amount: f64 = settings
        .payments
        .iter()
        .filter(|p| p.is_overdue(as_of))
        .map(|p| non_negative(p.amount))
        .sum();

    LedgerTotals {
        total_collected,
        amount_remaining: (grand_total - total_collected).max(0.0),
        amount_scheduled_unpaid,
        overdue_amount,
        overpayment: (total_collected - grand_total).max(0.0),
    }
}

/// Reconcile the ledger using the local calendar date as "today".
pub fn reconcile_payments(grand_total: f64, settings: &Settings) -> LedgerTotals {
    reconcile_payments_as_of(grand_total, settings, Local::now().date_naive())
}
