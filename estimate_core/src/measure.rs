//! # Measurement Records
//!
//! A [`Surface`] is one measured record attached to a work item: an area, a
//! run of linear feet, or a piece count. Each surface carries exactly one
//! [`Measurement`] variant, so "which fields are meaningful right now" is
//! answered by the type system rather than by a strategy string.
//!
//! ## Room Geometry
//!
//! The room-surface variant computes paintable area from plan dimensions:
//! wall area (perimeter x ceiling height) plus ceiling area, minus the area
//! of openings (doors, windows, closets) that are not painted. If the
//! openings claim more area than the room has, the quantity clamps to zero
//! and the excess is reported back so the caller can flag the bad data.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::measure::{Measurement, RoomGeometry, RoomPlan, CeilingHeight, Opening};
//!
//! // 12x10 room with 8 ft ceilings and one standard door
//! let room = RoomGeometry {
//!     plan: RoomPlan::Rectangular { length_ft: 12.0, width_ft: 10.0 },
//!     ceiling: CeilingHeight::Standard8,
//!     doors: vec![Opening { width_ft: 3.0, height_ft: 7.0 }],
//!     windows: vec![],
//!     closets: vec![],
//! };
//!
//! let resolved = Measurement::RoomSurface(room).resolve();
//! assert_eq!(resolved.quantity, 451.0); // 352 wall + 120 ceiling - 21 door
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{de_flexible_f64, de_flexible_opt_f64, non_negative, UnitKind};

// ============================================================================
// Openings (exclusions)
// ============================================================================

/// A rectangular opening excluded from a room's paintable area.
///
/// Doors, windows, and closet openings all use this shape; which list an
/// opening lives in is presentational only - they subtract identically.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Opening {
    /// Opening width (ft)
    #[serde(default, deserialize_with = "de_flexible_f64", alias = "width")]
    pub width_ft: f64,

    /// Opening height (ft)
    #[serde(default, deserialize_with = "de_flexible_f64", alias = "height")]
    pub height_ft: f64,
}

impl Opening {
    /// Standard interior door, 3 ft x 7 ft
    pub fn standard_door() -> Self {
        Opening { width_ft: 3.0, height_ft: 7.0 }
    }

    /// Opening area (sqft); negative dimensions contribute nothing
    pub fn area_sqft(&self) -> f64 {
        non_negative(self.width_ft) * non_negative(self.height_ft)
    }
}

// ============================================================================
// Room Geometry
// ============================================================================

/// Room footprint: square rooms need only one side length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum RoomPlan {
    /// Square room, all sides `length_ft`
    #[serde(alias = "square")]
    Square {
        #[serde(default, deserialize_with = "de_flexible_f64", alias = "length")]
        length_ft: f64,
    },
    /// Rectangular room
    #[serde(alias = "rectangular")]
    Rectangular {
        #[serde(default, deserialize_with = "de_flexible_f64", alias = "length")]
        length_ft: f64,
        #[serde(default, deserialize_with = "de_flexible_f64", alias = "width")]
        width_ft: f64,
    },
}

impl RoomPlan {
    /// Wall perimeter (ft): `4L` for square, `2(L+W)` for rectangular
    pub fn perimeter_ft(&self) -> f64 {
        match self {
            RoomPlan::Square { length_ft } => 4.0 * non_negative(*length_ft),
            RoomPlan::Rectangular { length_ft, width_ft } => {
                2.0 * (non_negative(*length_ft) + non_negative(*width_ft))
            }
        }
    }

    /// Ceiling area (sqft): `L*L` for square, `L*W` for rectangular
    pub fn ceiling_area_sqft(&self) -> f64 {
        match self {
            RoomPlan::Square { length_ft } => non_negative(*length_ft).powi(2),
            RoomPlan::Rectangular { length_ft, width_ft } => {
                non_negative(*length_ft) * non_negative(*width_ft)
            }
        }
    }
}

impl Default for RoomPlan {
    fn default() -> Self {
        RoomPlan::Rectangular { length_ft: 0.0, width_ft: 0.0 }
    }
}

/// Ceiling height: the two stock heights or a custom value in feet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CeilingHeight {
    /// 8 ft ceilings (the common default)
    #[default]
    Standard8,
    /// 10 ft ceilings
    Standard10,
    /// Custom height in feet
    Custom {
        #[serde(default, deserialize_with = "de_flexible_f64", alias = "customHeight")]
        height_ft: f64,
    },
}

impl CeilingHeight {
    /// Height in feet
    pub fn feet(&self) -> f64 {
        match self {
            CeilingHeight::Standard8 => 8.0,
            CeilingHeight::Standard10 => 10.0,
            CeilingHeight::Custom { height_ft } => non_negative(*height_ft),
        }
    }
}

/// Full room measurement: plan, ceiling height, and excluded openings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoomGeometry {
    /// Room footprint
    #[serde(default)]
    pub plan: RoomPlan,

    /// Ceiling height
    #[serde(default, alias = "roomHeight")]
    pub ceiling: CeilingHeight,

    /// Door openings (not painted)
    #[serde(default)]
    pub doors: Vec<Opening>,

    /// Window openings (not painted)
    #[serde(default)]
    pub windows: Vec<Opening>,

    /// Closet openings (painted separately, if at all)
    #[serde(default)]
    pub closets: Vec<Opening>,
}

impl RoomGeometry {
    /// Wall area (sqft): perimeter x ceiling height
    pub fn wall_area_sqft(&self) -> f64 {
        self.plan.perimeter_ft() * self.ceiling.feet()
    }

    /// Gross area (sqft): walls plus ceiling, before exclusions
    pub fn gross_area_sqft(&self) -> f64 {
        self.wall_area_sqft() + self.plan.ceiling_area_sqft()
    }

    /// Total excluded area (sqft) across doors, windows, and closets
    pub fn exclusion_area_sqft(&self) -> f64 {
        self.doors
            .iter()
            .chain(self.windows.iter())
            .chain(self.closets.iter())
            .map(Opening::area_sqft)
            .sum()
    }

    /// True if the openings claim more area than the room has
    pub fn exclusions_exceed_area(&self) -> bool {
        self.exclusion_area_sqft() > self.gross_area_sqft()
    }
}

// ============================================================================
// Measurement (tagged union over strategies)
// ============================================================================

/// One measured quantity, tagged by measurement strategy.
///
/// Exactly one strategy is active per surface; each variant carries only the
/// fields that strategy reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Measurement {
    /// A flat measured area: width x height, or a manual square footage
    /// override when the area was measured directly.
    #[serde(alias = "single-surface")]
    SingleSurface {
        #[serde(default, deserialize_with = "de_flexible_f64", alias = "width")]
        width_ft: f64,
        #[serde(default, deserialize_with = "de_flexible_f64", alias = "height")]
        height_ft: f64,
        /// Overrides the computed area when set
        #[serde(default, deserialize_with = "de_flexible_opt_f64", alias = "manualSqft")]
        manual_sqft: Option<f64>,
    },

    /// Walls + ceiling of a room, minus door/window/closet openings
    #[serde(alias = "room-surface")]
    RoomSurface(RoomGeometry),

    /// A run measured in linear feet
    #[serde(alias = "linear-foot")]
    LinearFoot {
        #[serde(default, deserialize_with = "de_flexible_f64", alias = "linearFt")]
        linear_ft: f64,
    },

    /// A plain piece count
    #[serde(alias = "by-unit")]
    ByUnit {
        #[serde(default, deserialize_with = "de_flexible_f64")]
        units: f64,
    },
}

/// Outcome of resolving a single measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceQuantity {
    /// Resolved quantity in the measurement's native unit, always >= 0
    pub quantity: f64,

    /// Square footage the exclusions overshot the room by, when the
    /// room-surface quantity clamped to zero. `None` for clean resolutions.
    pub excess_exclusion_sqft: Option<f64>,
}

impl Measurement {
    /// The native unit this measurement resolves in.
    pub fn unit(&self) -> UnitKind {
        match self {
            Measurement::SingleSurface { .. } | Measurement::RoomSurface(_) => UnitKind::SquareFeet,
            Measurement::LinearFoot { .. } => UnitKind::LinearFeet,
            Measurement::ByUnit { .. } => UnitKind::Count,
        }
    }

    /// Resolve this measurement to a non-negative scalar quantity.
    ///
    /// Never panics and never returns NaN; missing or negative dimensions
    /// contribute zero. Room surfaces whose exclusions exceed the gross area
    /// clamp to zero and report the excess.
    pub fn resolve(&self) -> SurfaceQuantity {
        match self {
            Measurement::SingleSurface { width_ft, height_ft, manual_sqft } => {
                let quantity = match manual_sqft {
                    Some(sqft) => non_negative(*sqft),
                    None => non_negative(*width_ft) * non_negative(*height_ft),
                };
                SurfaceQuantity { quantity, excess_exclusion_sqft: None }
            }
            Measurement::RoomSurface(room) => {
                let gross = room.gross_area_sqft();
                let excluded = room.exclusion_area_sqft();
                if excluded > gross {
                    SurfaceQuantity {
                        quantity: 0.0,
                        excess_exclusion_sqft: Some(excluded - gross),
                    }
                } else {
                    SurfaceQuantity {
                        quantity: gross - excluded,
                        excess_exclusion_sqft: None,
                    }
                }
            }
            Measurement::LinearFoot { linear_ft } => SurfaceQuantity {
                quantity: non_negative(*linear_ft),
                excess_exclusion_sqft: None,
            },
            Measurement::ByUnit { units } => SurfaceQuantity {
                quantity: non_negative(*units),
                excess_exclusion_sqft: None,
            },
        }
    }
}

// ============================================================================
// Surface
// ============================================================================

/// One measurement record attached to a work item.
///
/// A work item may carry several surfaces (e.g. two rooms of flooring);
/// its total quantity is the sum of the resolved surface quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// User label (e.g. "Master Bedroom", "North Wall")
    #[serde(default)]
    pub label: String,

    /// The measurement itself
    pub measurement: Measurement,
}

impl Surface {
    /// Create a labeled surface.
    pub fn new(label: impl Into<String>, measurement: Measurement) -> Self {
        Surface { label: label.into(), measurement }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_surface_area() {
        let m = Measurement::SingleSurface { width_ft: 10.0, height_ft: 10.0, manual_sqft: None };
        assert_eq!(m.resolve().quantity, 100.0);
    }

    #[test]
    fn test_single_surface_manual_override() {
        let m = Measurement::SingleSurface { width_ft: 10.0, height_ft: 10.0, manual_sqft: Some(85.0) };
        assert_eq!(m.resolve().quantity, 85.0);
    }

    #[test]
    fn test_single_surface_negative_dimensions_contribute_zero() {
        let m = Measurement::SingleSurface { width_ft: -4.0, height_ft: 10.0, manual_sqft: None };
        assert_eq!(m.resolve().quantity, 0.0);
    }

    #[test]
    fn test_rectangular_room_no_exclusions() {
        // 12x10 room, 8 ft ceilings: walls 2*(12+10)*8 = 352, ceiling 120
        let room = RoomGeometry {
            plan: RoomPlan::Rectangular { length_ft: 12.0, width_ft: 10.0 },
            ceiling: CeilingHeight::Standard8,
            ..Default::default()
        };
        assert_eq!(room.wall_area_sqft(), 352.0);
        assert_eq!(room.plan.ceiling_area_sqft(), 120.0);
        assert_eq!(Measurement::RoomSurface(room).resolve().quantity, 472.0);
    }

    #[test]
    fn test_room_with_standard_door() {
        let room = RoomGeometry {
            plan: RoomPlan::Rectangular { length_ft: 12.0, width_ft: 10.0 },
            ceiling: CeilingHeight::Standard8,
            doors: vec![Opening::standard_door()],
            ..Default::default()
        };
        assert_eq!(Measurement::RoomSurface(room).resolve().quantity, 451.0);
    }

    #[test]
    fn test_square_room() {
        // 10 ft square, 10 ft ceilings: walls 4*10*10 = 400, ceiling 100
        let room = RoomGeometry {
            plan: RoomPlan::Square { length_ft: 10.0 },
            ceiling: CeilingHeight::Standard10,
            ..Default::default()
        };
        assert_eq!(Measurement::RoomSurface(room).resolve().quantity, 500.0);
    }

    #[test]
    fn test_custom_ceiling_height() {
        assert_eq!(CeilingHeight::Custom { height_ft: 9.0 }.feet(), 9.0);
        assert_eq!(CeilingHeight::Custom { height_ft: -2.0 }.feet(), 0.0);
    }

    #[test]
    fn test_exclusions_exceeding_area_clamp_to_zero() {
        let room = RoomGeometry {
            plan: RoomPlan::Square { length_ft: 1.0 },
            ceiling: CeilingHeight::Custom { height_ft: 1.0 },
            doors: vec![Opening { width_ft: 10.0, height_ft: 10.0 }],
            ..Default::default()
        };
        // Gross = 4*1*1 + 1 = 5 sqft; exclusions = 100 sqft
        assert!(room.exclusions_exceed_area());
        let resolved = Measurement::RoomSurface(room).resolve();
        assert_eq!(resolved.quantity, 0.0);
        assert_eq!(resolved.excess_exclusion_sqft, Some(95.0));
    }

    #[test]
    fn test_linear_and_by_unit() {
        assert_eq!(Measurement::LinearFoot { linear_ft: 42.5 }.resolve().quantity, 42.5);
        assert_eq!(Measurement::LinearFoot { linear_ft: -3.0 }.resolve().quantity, 0.0);
        assert_eq!(Measurement::ByUnit { units: 6.0 }.resolve().quantity, 6.0);
    }

    #[test]
    fn test_units() {
        assert_eq!(
            Measurement::SingleSurface { width_ft: 0.0, height_ft: 0.0, manual_sqft: None }.unit(),
            UnitKind::SquareFeet
        );
        assert_eq!(Measurement::LinearFoot { linear_ft: 0.0 }.unit(), UnitKind::LinearFeet);
        assert_eq!(Measurement::ByUnit { units: 0.0 }.unit(), UnitKind::Count);
    }

    #[test]
    fn test_serde_roundtrip() {
        let surface = Surface::new(
            "Living Room",
            Measurement::RoomSurface(RoomGeometry {
                plan: RoomPlan::Rectangular { length_ft: 15.0, width_ft: 12.0 },
                ceiling: CeilingHeight::Standard10,
                doors: vec![Opening::standard_door()],
                windows: vec![Opening { width_ft: 4.0, height_ft: 3.0 }],
                closets: vec![],
            }),
        );
        let json = serde_json::to_string(&surface).unwrap();
        let roundtrip: Surface = serde_json::from_str(&json).unwrap();
        assert_eq!(surface, roundtrip);
    }

    #[test]
    fn test_legacy_field_names() {
        // Form-era documents: kebab-case strategy tags, camelCase fields,
        // numbers carried as strings.
        let json = r#"{
            "label": "Hallway",
            "measurement": {
                "type": "single-surface",
                "width": "8",
                "height": "10",
                "manualSqft": ""
            }
        }"#;
        let surface: Surface = serde_json::from_str(json).unwrap();
        assert_eq!(surface.measurement.resolve().quantity, 80.0);

        let json = r#"{"type": "linear-foot", "linearFt": "24"}"#;
        let m: Measurement = serde_json::from_str(json).unwrap();
        assert_eq!(m.resolve().quantity, 24.0);
    }
}
