//! CSS Values Module
//!
//! This crate defines the value model shared by the style engine: the
//! `Value` sum type carried by style declarations, unit-bearing numeric
//! values, the color model, and the keyword registry that maps canonical
//! keyword names (`auto`, `none`, `flex-start`, ...) to stable integer ids.

/// The color model and its textual forms.
mod color;

/// The keyword registry.
mod keywords;

/// CSS units and unit classification.
mod unit;

/// The `Value` sum type.
mod value;

pub use color::Color;
pub use keywords::{KeywordError, KeywordId, KeywordRegistry};
pub use unit::Unit;
pub use value::{UnitValue, Value};
