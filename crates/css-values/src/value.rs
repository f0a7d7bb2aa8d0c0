use serde::{Deserialize, Serialize};

use crate::{Color, KeywordId, Unit};

/// A numeric value paired with its unit, e.g. `100px` or `50%`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitValue {
    pub value: f64,
    pub unit: Unit,
}

impl UnitValue {
    pub fn new(value: f64, unit: Unit) -> Self {
        UnitValue { value, unit }
    }
}

impl std::fmt::Display for UnitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// A parsed CSS property value.
///
/// Every declaration slot holds one of these variants; `Invalid` marks a
/// slot that has not been set (or a value that failed to parse). Owned
/// strings make `Clone` a deep copy.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// The explicit `none` value.
    None,

    /// Unset, or the result of a failed parse.
    #[default]
    Invalid,

    /// Raw text that was stored without being parsed.
    Unparsed(String),

    /// An ordered sequence of component values.
    Array(Vec<Value>),

    /// A unitless number.
    Numeric(f64),

    /// An integer.
    Integer(i32),

    /// A string value.
    String(String),

    /// A registered keyword, by id.
    Keyword(KeywordId),

    /// An sRGB color with alpha.
    Color(Color),

    /// An image reference by URL.
    Image(String),

    /// A number carrying a unit (length, percentage, angle, time).
    Unit(UnitValue),
}

impl Value {
    /// Whether this slot carries a usable value.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Value::Invalid)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// The unit value, if this is a unit-bearing variant.
    pub fn as_unit(&self) -> Option<UnitValue> {
        match self {
            Value::Unit(unit_value) => Some(*unit_value),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(color) => Some(*color),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<KeywordId> {
        match self {
            Value::Keyword(id) => Some(*id),
            _ => None,
        }
    }
}
