//! # Units and Numeric Input Handling
//!
//! Every work item resolves to a scalar quantity in one of three native
//! units: square feet (area work), linear feet (runs of trim), or a plain
//! count (installed fixtures). [`UnitKind`] names those units for display.
//!
//! The second half of this module is the numeric coercion layer. Estimate
//! documents come from form inputs, so any numeric field may arrive as a
//! JSON number, a numeric string, a blank string, or null. The flexible
//! deserializers here fold all of those into plain `f64` fields so the rest
//! of the engine never sees raw strings and never produces NaN.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{parse_number, UnitKind};
//!
//! assert_eq!(parse_number("12.5"), 12.5);
//! assert_eq!(parse_number(" 40 "), 40.0);
//! assert_eq!(parse_number("tbd"), 0.0);
//!
//! assert_eq!(UnitKind::SquareFeet.code(), "sqft");
//! ```

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

// ============================================================================
// Unit Kinds
// ============================================================================

/// The native unit a work item's quantity is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Square feet - area-based work (flooring, painting, drywall)
    SquareFeet,
    /// Linear feet - run-based work (baseboard, crown molding)
    LinearFeet,
    /// Count - per-piece work (doors, windows, fixtures)
    Count,
}

impl UnitKind {
    /// All unit kinds in standard order
    pub const ALL: [UnitKind; 3] = [
        UnitKind::SquareFeet,
        UnitKind::LinearFeet,
        UnitKind::Count,
    ];

    /// Short code used next to quantities (e.g., "128 sqft")
    pub fn code(&self) -> &'static str {
        match self {
            UnitKind::SquareFeet => "sqft",
            UnitKind::LinearFeet => "ln ft",
            UnitKind::Count => "ea",
        }
    }

    /// Human-readable unit name
    pub fn display_name(&self) -> &'static str {
        match self {
            UnitKind::SquareFeet => "square feet",
            UnitKind::LinearFeet => "linear feet",
            UnitKind::Count => "each",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Numeric Coercion
// ============================================================================

/// Parse a form-input string into a number, coercing failures to 0.
///
/// Accepts leading/trailing whitespace. Anything that does not parse as a
/// float (blank strings included) yields 0.0 - the engine degrades toward
/// undercounting rather than erroring on one bad field.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Parse a form-input string into a number, or `None` when blank/unparsable.
///
/// Used for optional overrides (e.g. a manually entered square footage)
/// where a blank field means "not set", not "zero".
pub fn parse_optional_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Floor a value at zero, mapping NaN/infinite values to zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Clamp a fractional rate (e.g. tax, waste) to be non-negative.
///
/// Rates above 1.0 are left alone: a 120% waste factor is unusual but legal.
pub fn fraction(value: f64) -> f64 {
    non_negative(value)
}

/// Clamp a percentage-like fraction (markup, labor discount) to `[0, 1]`.
pub fn capped_fraction(value: f64) -> f64 {
    non_negative(value).min(1.0)
}

// ============================================================================
// Flexible serde Deserializers
// ============================================================================

struct FlexVisitor;

impl<'de> Visitor<'de> for FlexVisitor {
    type Value = Option<f64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, numeric string, or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.is_finite().then_some(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(parse_optional_number(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(FlexVisitor)
    }
}

/// Deserialize a required numeric field that may arrive as a string.
///
/// Blank, null, or unparsable input coerces to 0.0. Pair with
/// `#[serde(default)]` so absent fields also read as 0.0.
pub fn de_flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer.deserialize_any(FlexVisitor)?.unwrap_or(0.0))
}

/// Deserialize an optional numeric field that may arrive as a string.
///
/// Blank, null, or unparsable input reads as `None` (the override is unset).
pub fn de_flexible_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FlexVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "de_flexible_f64")]
        value: f64,
        #[serde(default, deserialize_with = "de_flexible_opt_f64")]
        manual: Option<f64>,
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12.5"), 12.5);
        assert_eq!(parse_number("  7 "), 7.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("-3"), -3.0);
    }

    #[test]
    fn test_parse_optional_number() {
        assert_eq!(parse_optional_number("12"), Some(12.0));
        assert_eq!(parse_optional_number("   "), None);
        assert_eq!(parse_optional_number("n/a"), None);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(non_negative(-4.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(2.5), 2.5);
        assert_eq!(fraction(1.2), 1.2);
        assert_eq!(capped_fraction(1.2), 1.0);
        assert_eq!(capped_fraction(-0.1), 0.0);
        assert_eq!(capped_fraction(0.35), 0.35);
    }

    #[test]
    fn test_flexible_deserialization() {
        let p: Probe = serde_json::from_str(r#"{"value": 4.5, "manual": "120"}"#).unwrap();
        assert_eq!(p.value, 4.5);
        assert_eq!(p.manual, Some(120.0));

        let p: Probe = serde_json::from_str(r#"{"value": "10", "manual": ""}"#).unwrap();
        assert_eq!(p.value, 10.0);
        assert_eq!(p.manual, None);

        let p: Probe = serde_json::from_str(r#"{"value": "", "manual": null}"#).unwrap();
        assert_eq!(p.value, 0.0);
        assert_eq!(p.manual, None);

        let p: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.value, 0.0);
        assert_eq!(p.manual, None);
    }

    #[test]
    fn test_unit_kind_codes() {
        assert_eq!(UnitKind::SquareFeet.code(), "sqft");
        assert_eq!(UnitKind::LinearFeet.code(), "ln ft");
        assert_eq!(UnitKind::Count.code(), "ea");
        assert_eq!(UnitKind::ALL.len(), 3);
    }

    #[test]
    fn test_unit_kind_display() {
        assert_eq!(format!("{}", UnitKind::Count), "ea");
        assert_eq!(UnitKind::LinearFeet.display_name(), "linear feet");
    }
}
