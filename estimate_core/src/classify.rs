//! # Work Item Classification
//!
//! [`WorkItemKind`] is the categorical type of a work item; it determines
//! which measurement strategy the item's surfaces use and which unit its
//! quantity is reported in.
//!
//! ## Name Inference (compatibility shim)
//!
//! Early estimate documents carried no explicit item type; the type was
//! guessed from the item's free-text name. [`infer_kind_from_name`] keeps
//! that heuristic alive as one explicit, independently-tested function so
//! legacy documents still resolve. It is a best-effort fallback, not the
//! primary path - current documents always carry an explicit kind.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::classify::{infer_kind_from_name, WorkItemKind};
//!
//! assert_eq!(infer_kind_from_name("Kitchen Floor"), Some(WorkItemKind::KitchenFlooring));
//! assert_eq!(infer_kind_from_name("Paint bedroom walls"), Some(WorkItemKind::GeneralPainting));
//! assert_eq!(infer_kind_from_name("Mystery line item"), None);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::UnitKind;

// ============================================================================
// Measurement Basis
// ============================================================================

/// Which measurement strategy a kind of work is taken off with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementBasis {
    /// Room geometry: walls + ceiling minus openings
    RoomSurface,
    /// Flat width x height areas
    SingleSurface,
    /// Runs measured in linear feet
    LinearFoot,
    /// Piece counts
    ByUnit,
}

impl MeasurementBasis {
    /// The unit quantities on this basis resolve in
    pub fn unit(&self) -> UnitKind {
        match self {
            MeasurementBasis::RoomSurface | MeasurementBasis::SingleSurface => UnitKind::SquareFeet,
            MeasurementBasis::LinearFoot => UnitKind::LinearFeet,
            MeasurementBasis::ByUnit => UnitKind::Count,
        }
    }
}

// ============================================================================
// Work Item Kinds
// ============================================================================

/// Categorical work item type.
///
/// Determines the measurement basis and display unit. The set mirrors the
/// trades a residential remodel actually prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkItemKind {
    /// Interior painting taken off by room geometry
    GeneralPainting,
    /// Flooring measured as flat area
    GeneralFlooring,
    /// Kitchen flooring (priced separately from general flooring)
    KitchenFlooring,
    /// Bathroom flooring
    BathroomFlooring,
    /// Tile work (walls or floors), flat area
    TileWork,
    /// Drywall hanging/finishing, flat area
    Drywall,
    /// Baseboard runs
    Baseboard,
    /// Crown molding runs
    CrownMolding,
    /// Misc trim carpentry runs
    TrimCarpentry,
    /// Door installation, per door
    DoorInstall,
    /// Window installation, per window
    WindowInstall,
    /// Fixtures (lights, faucets, hardware), per piece
    FixtureInstall,
}

impl WorkItemKind {
    /// All kinds in display order
    pub const ALL: [WorkItemKind; 12] = [
        WorkItemKind::GeneralPainting,
        WorkItemKind::GeneralFlooring,
        WorkItemKind::KitchenFlooring,
        WorkItemKind::BathroomFlooring,
        WorkItemKind::TileWork,
        WorkItemKind::Drywall,
        WorkItemKind::Baseboard,
        WorkItemKind::CrownMolding,
        WorkItemKind::TrimCarpentry,
        WorkItemKind::DoorInstall,
        WorkItemKind::WindowInstall,
        WorkItemKind::FixtureInstall,
    ];

    /// The measurement strategy this kind's surfaces use
    pub fn basis(&self) -> MeasurementBasis {
        match self {
            WorkItemKind::GeneralPainting => MeasurementBasis::RoomSurface,
            WorkItemKind::GeneralFlooring
            | WorkItemKind::KitchenFlooring
            | WorkItemKind::BathroomFlooring
            | WorkItemKind::TileWork
            | WorkItemKind::Drywall => MeasurementBasis::SingleSurface,
            WorkItemKind::Baseboard
            | WorkItemKind::CrownMolding
            | WorkItemKind::TrimCarpentry => MeasurementBasis::LinearFoot,
            WorkItemKind::DoorInstall
            | WorkItemKind::WindowInstall
            | WorkItemKind::FixtureInstall => MeasurementBasis::ByUnit,
        }
    }

    /// The unit this kind's quantity is reported in
    pub fn unit(&self) -> UnitKind {
        self.basis().unit()
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkItemKind::GeneralPainting => "General painting",
            WorkItemKind::GeneralFlooring => "General flooring",
            WorkItemKind::KitchenFlooring => "Kitchen flooring",
            WorkItemKind::BathroomFlooring => "Bathroom flooring",
            WorkItemKind::TileWork => "Tile work",
            WorkItemKind::Drywall => "Drywall",
            WorkItemKind::Baseboard => "Baseboard",
            WorkItemKind::CrownMolding => "Crown molding",
            WorkItemKind::TrimCarpentry => "Trim carpentry",
            WorkItemKind::DoorInstall => "Door installation",
            WorkItemKind::WindowInstall => "Window installation",
            WorkItemKind::FixtureInstall => "Fixture installation",
        }
    }
}

impl std::fmt::Display for WorkItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl WorkItemKind {
    /// Parse a kind from its canonical variant name or the kebab-case name
    /// legacy documents used. Unknown names yield `None` so a bad type
    /// string degrades to the name-inference fallback instead of failing
    /// the whole document.
    pub fn parse(raw: &str) -> Option<WorkItemKind> {
        match raw {
            "GeneralPainting" | "general-painting" => Some(WorkItemKind::GeneralPainting),
            "GeneralFlooring" | "general-flooring" => Some(WorkItemKind::GeneralFlooring),
            "KitchenFlooring" | "kitchen-flooring" => Some(WorkItemKind::KitchenFlooring),
            "BathroomFlooring" | "bathroom-flooring" => Some(WorkItemKind::BathroomFlooring),
            "TileWork" | "tile-work" => Some(WorkItemKind::TileWork),
            "Drywall" | "drywall" => Some(WorkItemKind::Drywall),
            "Baseboard" | "baseboard" => Some(WorkItemKind::Baseboard),
            "CrownMolding" | "crown-molding" => Some(WorkItemKind::CrownMolding),
            "TrimCarpentry" | "trim-carpentry" => Some(WorkItemKind::TrimCarpentry),
            "DoorInstall" | "door-install" => Some(WorkItemKind::DoorInstall),
            "WindowInstall" | "window-install" => Some(WorkItemKind::WindowInstall),
            "FixtureInstall" | "fixture-install" => Some(WorkItemKind::FixtureInstall),
            _ => None,
        }
    }
}

/// Deserialize an optional work item kind leniently: accepts canonical and
/// legacy kebab-case names; unknown names read as `None`.
pub fn de_opt_kind<'de, D>(deserializer: D) -> Result<Option<WorkItemKind>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(WorkItemKind::parse))
}

// ============================================================================
// Name Inference
// ============================================================================

/// Ordered keyword rules; the first keyword contained in the lowercased
/// name wins. Room-specific keywords come before generic ones so
/// "Kitchen Floor" reads as kitchen flooring, not general flooring.
const NAME_RULES: &[(&str, WorkItemKind)] = &[
    ("kitchen", WorkItemKind::KitchenFlooring),
    ("bath", WorkItemKind::BathroomFlooring),
    ("paint", WorkItemKind::GeneralPainting),
    ("tile", WorkItemKind::TileWork),
    ("drywall", WorkItemKind::Drywall),
    ("sheetrock", WorkItemKind::Drywall),
    ("baseboard", WorkItemKind::Baseboard),
    ("crown", WorkItemKind::CrownMolding),
    ("trim", WorkItemKind::TrimCarpentry),
    ("door", WorkItemKind::DoorInstall),
    ("window", WorkItemKind::WindowInstall),
    ("fixture", WorkItemKind::FixtureInstall),
    ("light", WorkItemKind::FixtureInstall),
    ("faucet", WorkItemKind::FixtureInstall),
    ("floor", WorkItemKind::GeneralFlooring),
];

/// Guess a work item kind from its free-text name.
///
/// Case-insensitive substring match against the ordered keyword table,
/// first match wins. Returns `None` when nothing matches - the caller
/// treats such an item as unclassifiable (quantity zero) and flags it.
pub fn infer_kind_from_name(name: &str) -> Option<WorkItemKind> {
    let lowered = name.to_lowercase();
    NAME_RULES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, kind)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_specific_keywords_outrank_generic() {
        assert_eq!(infer_kind_from_name("Kitchen Floor"), Some(WorkItemKind::KitchenFlooring));
        assert_eq!(infer_kind_from_name("Guest bath floor"), Some(WorkItemKind::BathroomFlooring));
        assert_eq!(infer_kind_from_name("Hallway floor"), Some(WorkItemKind::GeneralFlooring));
    }

    #[test]
    fn test_common_trades() {
        assert_eq!(infer_kind_from_name("Paint living room"), Some(WorkItemKind::GeneralPainting));
        assert_eq!(infer_kind_from_name("Hang drywall"), Some(WorkItemKind::Drywall));
        assert_eq!(infer_kind_from_name("SHEETROCK repair"), Some(WorkItemKind::Drywall));
        assert_eq!(infer_kind_from_name("Install baseboards"), Some(WorkItemKind::Baseboard));
        assert_eq!(infer_kind_from_name("Crown molding"), Some(WorkItemKind::CrownMolding));
        assert_eq!(infer_kind_from_name("Replace front door"), Some(WorkItemKind::DoorInstall));
        assert_eq!(infer_kind_from_name("New light fixtures"), Some(WorkItemKind::FixtureInstall));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(infer_kind_from_name("Haul away debris"), None);
        assert_eq!(infer_kind_from_name(""), None);
    }

    #[test]
    fn test_basis_and_units() {
        use crate::units::UnitKind;

        assert_eq!(WorkItemKind::GeneralPainting.basis(), MeasurementBasis::RoomSurface);
        assert_eq!(WorkItemKind::KitchenFlooring.basis(), MeasurementBasis::SingleSurface);
        assert_eq!(WorkItemKind::Baseboard.basis(), MeasurementBasis::LinearFoot);
        assert_eq!(WorkItemKind::WindowInstall.basis(), MeasurementBasis::ByUnit);

        assert_eq!(WorkItemKind::GeneralPainting.unit(), UnitKind::SquareFeet);
        assert_eq!(WorkItemKind::CrownMolding.unit(), UnitKind::LinearFeet);
        assert_eq!(WorkItemKind::DoorInstall.unit(), UnitKind::Count);
    }

    #[test]
    fn test_all_kinds_have_display_names() {
        for kind in WorkItemKind::ALL {
            assert!(!kind.display_name().is_empty());
        }
        assert_eq!(format!("{}", WorkItemKind::TileWork), "Tile work");
    }

    #[test]
    fn test_parse_accepts_legacy_names() {
        assert_eq!(WorkItemKind::parse("kitchen-flooring"), Some(WorkItemKind::KitchenFlooring));
        assert_eq!(WorkItemKind::parse("GeneralPainting"), Some(WorkItemKind::GeneralPainting));
        assert_eq!(WorkItemKind::parse("demolition"), None);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&WorkItemKind::KitchenFlooring).unwrap();
        assert_eq!(json, "\"KitchenFlooring\"");
        let roundtrip: WorkItemKind = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, WorkItemKind::KitchenFlooring);
    }
}
