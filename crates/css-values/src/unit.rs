use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Units carried by unit-bearing values, as defined in CSS Values and Units
/// Module Level 4 (reduced to the set the engine resolves).
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Unit {
    // Absolute length units
    #[default]
    Px,
    Cm,
    Mm,
    Q,
    In,
    Pc,
    Pt,

    // Relative length units based on font
    Em,
    Rem,
    Ex,
    Ch,

    // Relative length units based on viewport
    Vw,
    Vh,
    Vmin,
    Vmax,

    /// Percentage of a reference value established by the host property.
    #[strum(serialize = "%")]
    Percent,

    // Angle units
    Deg,
    Rad,
    Grad,
    Turn,

    // Time units
    S,
    Ms,
}

impl Unit {
    /// Whether this unit denotes a length.
    pub fn is_length(self) -> bool {
        matches!(
            self,
            Unit::Px
                | Unit::Cm
                | Unit::Mm
                | Unit::Q
                | Unit::In
                | Unit::Pc
                | Unit::Pt
                | Unit::Em
                | Unit::Rem
                | Unit::Ex
                | Unit::Ch
                | Unit::Vw
                | Unit::Vh
                | Unit::Vmin
                | Unit::Vmax
        )
    }

    /// Whether this unit denotes a percentage.
    pub fn is_percentage(self) -> bool {
        self == Unit::Percent
    }

    /// Whether this unit denotes an angle.
    pub fn is_angle(self) -> bool {
        matches!(self, Unit::Deg | Unit::Rad | Unit::Grad | Unit::Turn)
    }

    /// Whether this unit denotes a duration.
    pub fn is_time(self) -> bool {
        matches!(self, Unit::S | Unit::Ms)
    }
}
