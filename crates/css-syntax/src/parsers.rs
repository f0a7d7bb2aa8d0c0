//! Parsers for the built-in `<type>` references.
//!
//! Each parser consumes one whitespace-delimited component and returns
//! `None` when the component does not match. Hosts register these (or their
//! own functions of the same shape) under type names via the registry.

use std::str::FromStr;

use css_values::{Color, Unit, UnitValue, Value};

/// Split a component like `100px` into its numeric value and unit text.
fn split_dimension(component: &str) -> Option<(f64, &str)> {
    let unit_start = component
        .char_indices()
        .find(|(_, c)| c.is_ascii_alphabetic() || *c == '%')
        .map(|(i, _)| i)
        .unwrap_or(component.len());

    let value: f64 = component[..unit_start].parse().ok()?;
    Some((value, &component[unit_start..]))
}

fn parse_dimension(component: &str, accepts: impl Fn(Unit) -> bool) -> Option<Value> {
    let (value, unit_text) = split_dimension(component)?;

    // Unitless zero is a valid length.
    if unit_text.is_empty() {
        return if value == 0.0 {
            Some(Value::Unit(UnitValue::new(0.0, Unit::Px)))
        } else {
            None
        };
    }

    let unit = Unit::from_str(unit_text).ok()?;
    if !accepts(unit) {
        return None;
    }

    Some(Value::Unit(UnitValue::new(value, unit)))
}

/// `<length>`: a number with a length unit, or unitless zero.
pub fn parse_length(component: &str) -> Option<Value> {
    parse_dimension(component, Unit::is_length)
}

/// `<percentage>`: a number followed by `%`.
pub fn parse_percentage(component: &str) -> Option<Value> {
    let (value, unit_text) = split_dimension(component)?;
    if unit_text != "%" {
        return None;
    }
    Some(Value::Unit(UnitValue::new(value, Unit::Percent)))
}

/// `<angle>`: a number with an angle unit.
pub fn parse_angle(component: &str) -> Option<Value> {
    parse_dimension(component, Unit::is_angle)
}

/// `<time>`: a number with a time unit.
pub fn parse_time(component: &str) -> Option<Value> {
    parse_dimension(component, Unit::is_time)
}

/// `<number>`: a unitless number.
pub fn parse_number(component: &str) -> Option<Value> {
    component.parse::<f64>().ok().map(Value::Numeric)
}

/// `<integer>`: a whole number.
pub fn parse_integer(component: &str) -> Option<Value> {
    component.parse::<i32>().ok().map(Value::Integer)
}

/// `<color>`: hex, functional or named color notation.
pub fn parse_color(component: &str) -> Option<Value> {
    Color::parse(component).map(Value::Color)
}

/// `<string>`: the component with surrounding quotes stripped, if any.
pub fn parse_string(component: &str) -> Option<Value> {
    Some(Value::String(strip_quotes(component).to_string()))
}

/// `<url>` / `<image>`: a `url(...)` reference.
pub fn parse_url(component: &str) -> Option<Value> {
    let inner = component.strip_prefix("url(")?.strip_suffix(')')?;
    Some(Value::Image(strip_quotes(inner).to_string()))
}

fn strip_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length() {
        assert_eq!(
            parse_length("100px"),
            Some(Value::Unit(UnitValue::new(100.0, Unit::Px)))
        );
        assert_eq!(
            parse_length("-1.5em"),
            Some(Value::Unit(UnitValue::new(-1.5, Unit::Em)))
        );
        assert_eq!(
            parse_length("0"),
            Some(Value::Unit(UnitValue::new(0.0, Unit::Px)))
        );
        assert_eq!(parse_length("50%"), None);
        assert_eq!(parse_length("10"), None);
        assert_eq!(parse_length("px"), None);
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(
            parse_percentage("50%"),
            Some(Value::Unit(UnitValue::new(50.0, Unit::Percent)))
        );
        assert_eq!(parse_percentage("50px"), None);
        assert_eq!(parse_percentage("50"), None);
    }

    #[test]
    fn test_parse_number_and_integer() {
        assert_eq!(parse_number("1.25"), Some(Value::Numeric(1.25)));
        assert_eq!(parse_integer("42"), Some(Value::Integer(42)));
        assert_eq!(parse_integer("1.5"), None);
    }

    #[test]
    fn test_parse_url() {
        assert_eq!(
            parse_url("url(img/bg.png)"),
            Some(Value::Image("img/bg.png".to_string()))
        );
        assert_eq!(
            parse_url("url(\"a b.png\")"),
            Some(Value::Image("a b.png".to_string()))
        );
        assert_eq!(parse_url("img/bg.png"), None);
    }

    #[test]
    fn test_parse_string_strips_quotes() {
        assert_eq!(
            parse_string("\"serif\""),
            Some(Value::String("serif".to_string()))
        );
        assert_eq!(parse_string("serif"), Some(Value::String("serif".to_string())));
    }

    #[test]
    fn test_parse_angle_and_time() {
        assert_eq!(
            parse_angle("90deg"),
            Some(Value::Unit(UnitValue::new(90.0, Unit::Deg)))
        );
        assert_eq!(parse_angle("90px"), None);
        assert_eq!(
            parse_time("200ms"),
            Some(Value::Unit(UnitValue::new(200.0, Unit::Ms)))
        );
    }
}
