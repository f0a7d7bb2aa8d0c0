use crate::engine::StyleEngine;
use crate::errors::StyleError;

/// Keywords the built-in property syntaxes refer to.
const KEYWORDS: &[&str] = &[
    "auto",
    "none",
    "normal",
    "inherit",
    "initial",
    "block",
    "inline",
    "inline-block",
    "flex",
    "static",
    "relative",
    "absolute",
    "fixed",
    "visible",
    "hidden",
    "solid",
    "dashed",
    "dotted",
    "bold",
    "italic",
    "left",
    "center",
    "right",
    "top",
    "bottom",
    "row",
    "column",
    "nowrap",
    "wrap",
    "flex-start",
    "flex-end",
    "space-between",
    "space-around",
    "stretch",
    "baseline",
    "content-box",
    "border-box",
];

/// Definition trees shared by several properties, referenced by bare name.
const ALIASES: &[(&str, &str)] = &[
    ("length-percentage", "<length> | <percentage>"),
    ("sizing-value", "auto | <length> | <percentage>"),
    ("border-style-value", "none | solid | dashed | dotted"),
];

/// The built-in property table: name, value-definition syntax, initial.
const PROPERTIES: &[(&str, &str, &str)] = &[
    ("width", "sizing-value", "auto"),
    ("height", "sizing-value", "auto"),
    ("min-width", "none | length-percentage", "none"),
    ("min-height", "none | length-percentage", "none"),
    ("max-width", "none | length-percentage", "none"),
    ("max-height", "none | length-percentage", "none"),
    ("margin-top", "auto | length-percentage", "0"),
    ("margin-right", "auto | length-percentage", "0"),
    ("margin-bottom", "auto | length-percentage", "0"),
    ("margin-left", "auto | length-percentage", "0"),
    ("padding-top", "length-percentage", "0"),
    ("padding-right", "length-percentage", "0"),
    ("padding-bottom", "length-percentage", "0"),
    ("padding-left", "length-percentage", "0"),
    ("border-top-width", "<length>", "0"),
    ("border-right-width", "<length>", "0"),
    ("border-bottom-width", "<length>", "0"),
    ("border-left-width", "<length>", "0"),
    ("border-top-style", "border-style-value", "none"),
    ("border-right-style", "border-style-value", "none"),
    ("border-bottom-style", "border-style-value", "none"),
    ("border-left-style", "border-style-value", "none"),
    ("border-top-color", "<color>", "#000000"),
    ("border-right-color", "<color>", "#000000"),
    ("border-bottom-color", "<color>", "#000000"),
    ("border-left-color", "<color>", "#000000"),
    ("display", "none | block | inline | inline-block | flex", "block"),
    ("position", "static | relative | absolute | fixed", "static"),
    ("visibility", "visible | hidden", "visible"),
    ("box-sizing", "content-box | border-box", "content-box"),
    ("top", "auto | length-percentage", "auto"),
    ("right", "auto | length-percentage", "auto"),
    ("bottom", "auto | length-percentage", "auto"),
    ("left", "auto | length-percentage", "auto"),
    ("z-index", "auto | <integer>", "auto"),
    ("color", "<color>", "#000000"),
    ("background-color", "<color>", "transparent"),
    ("background-image", "none | <image>", "none"),
    ("opacity", "<number>", "1"),
    ("font-size", "length-percentage", "14px"),
    ("font-weight", "normal | bold | <integer>", "normal"),
    ("font-style", "normal | italic", "normal"),
    ("font-family", "<string>", "\"sans-serif\""),
    ("line-height", "normal | <number> | length-percentage", "normal"),
    ("text-align", "left | center | right", "left"),
    ("flex-direction", "row | column", "row"),
    ("flex-wrap", "nowrap | wrap", "nowrap"),
    ("flex-grow", "<number>", "0"),
    ("flex-shrink", "<number>", "1"),
    ("flex-basis", "auto | length-percentage", "auto"),
    (
        "justify-content",
        "flex-start | center | flex-end | space-between | space-around",
        "flex-start",
    ),
    (
        "align-items",
        "flex-start | center | flex-end | stretch | baseline",
        "stretch",
    ),
    ("pointer-events", "auto | none", "auto"),
];

/// Install the built-in keywords, aliases and properties.
///
/// Property keys are assigned in table order, so the table must only be
/// installed into a fresh engine.
pub(crate) fn install(engine: &mut StyleEngine) -> Result<(), StyleError> {
    for name in KEYWORDS {
        engine.register_keyword_auto(name);
    }

    for (alias, definition) in ALIASES {
        engine.register_value_type_alias(alias, definition)?;
    }

    for (name, syntax, initial) in PROPERTIES {
        engine.register_property(name, syntax, initial)?;
    }

    Ok(())
}
