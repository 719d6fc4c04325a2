// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Parameter System (C6, spec §4.6).
//!
//! A `ParameterBag` maps parameter name → typed [`ParamValue`]. Parameter
//! *schema* per action kind lives in `action_registry.rs`; this module only
//! defines the value representation and the schema-validated get/set
//! primitives every action uses in its constructor.

use crate::action::Action;
use std::collections::HashMap;
use std::fmt;

/// One condition in a `ValueConditionList` parameter (spec §4.4 step 5,
/// §4.8 `ConditionalAction`): `(min, max, action, description?)`.
#[derive(Debug, Clone)]
pub struct ValueCondition {
    pub min: i64,
    pub max: i64,
    pub action: Box<Action>,
    pub description: Option<String>,
}

/// The closed set of parameter value types (spec §4.6).
#[derive(Debug, Clone)]
pub enum ParamValue {
    Integer(i64),
    Enum(String),
    Boolean(bool),
    String(String),
    ByteArray(Vec<u8>),
    SubAction(Box<Action>),
    SubActionList(Vec<Action>),
    ValueConditionList(Vec<ValueCondition>),
}

impl ParamValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&str> {
        match self {
            ParamValue::Enum(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ParamValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[u8]> {
        match self {
            ParamValue::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_sub_action(&self) -> Option<&Action> {
        match self {
            ParamValue::SubAction(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_sub_action_list(&self) -> Option<&[Action]> {
        match self {
            ParamValue::SubActionList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_value_condition_list(&self) -> Option<&[ValueCondition]> {
        match self {
            ParamValue::ValueConditionList(v) => Some(v),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Integer(_) => "Integer",
            ParamValue::Enum(_) => "Enum",
            ParamValue::Boolean(_) => "Boolean",
            ParamValue::String(_) => "String",
            ParamValue::ByteArray(_) => "ByteArray",
            ParamValue::SubAction(_) => "SubAction",
            ParamValue::SubActionList(_) => "SubActionList",
            ParamValue::ValueConditionList(_) => "ValueConditionList",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(v) => write!(f, "{v}"),
            ParamValue::Enum(v) => write!(f, "{v}"),
            ParamValue::Boolean(v) => write!(f, "{v}"),
            ParamValue::String(v) => write!(f, "{v}"),
            ParamValue::ByteArray(v) => write!(f, "{v:02X?}"),
            ParamValue::SubAction(_) => write!(f, "<sub-action>"),
            ParamValue::SubActionList(v) => write!(f, "<{} sub-actions>", v.len()),
            ParamValue::ValueConditionList(v) => write!(f, "<{} conditions>", v.len()),
        }
    }
}

/// Named, typed bag of parameters for a single action instance.
///
/// Every access is schema-validated against the declared [`ParamKind`] for
/// the action's registered kind (see `action_registry.rs`); this type
/// itself stores whatever validated values the loader or a builder handed
/// it, and gives convenient typed accessors.
#[derive(Debug, Clone, Default)]
pub struct ParameterBag {
    values: HashMap<String, ParamValue>,
}

impl ParameterBag {
    pub fn new() -> Self {
        ParameterBag {
            values: HashMap::new(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn get_integer(&self, name: &str, default: i64) -> i64 {
        self.get(name).and_then(ParamValue::as_integer).unwrap_or(default)
    }

    pub fn get_boolean(&self, name: &str, default: bool) -> bool {
        self.get(name).and_then(ParamValue::as_boolean).unwrap_or(default)
    }

    pub fn get_string<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).and_then(ParamValue::as_string).unwrap_or(default)
    }

    pub fn get_enum<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).and_then(ParamValue::as_enum).unwrap_or(default)
    }

    pub fn get_byte_array(&self, name: &str) -> &[u8] {
        self.get(name).and_then(ParamValue::as_byte_array).unwrap_or(&[])
    }

    pub fn get_sub_action(&self, name: &str) -> Option<&Action> {
        self.get(name).and_then(ParamValue::as_sub_action)
    }

    pub fn get_sub_action_list(&self, name: &str) -> &[Action] {
        self.get(name).and_then(ParamValue::as_sub_action_list).unwrap_or(&[])
    }

    pub fn get_value_condition_list(&self, name: &str) -> &[ValueCondition] {
        self.get(name)
            .and_then(ParamValue::as_value_condition_list)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.values.iter()
    }
}

/// The kind tag for a declared parameter, used by the loader to type-check
/// incoming JSON against a kind's schema (spec §4.4 step 3, §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Integer,
    Enum,
    Boolean,
    String,
    ByteArray,
    SubAction,
    SubActionList,
    ValueConditionList,
}

/// One entry in an action kind's parameter schema.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    /// For `Enum` params: the set of legal string alternatives.
    pub enum_alternatives: &'static [&'static str],
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        ParamSpec {
            name,
            kind,
            required: true,
            enum_alternatives: &[],
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        ParamSpec {
            name,
            kind,
            required: false,
            enum_alternatives: &[],
        }
    }

    pub const fn enum_of(name: &'static str, alternatives: &'static [&'static str], required: bool) -> Self {
        ParamSpec {
            name,
            kind: ParamKind::Enum,
            required,
            enum_alternatives: alternatives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bag_defaults_when_absent() {
        let bag = ParameterBag::new();
        assert_eq!(bag.get_integer("Value", 7), 7);
        assert!(!bag.get_boolean("Flag", false));
        assert_eq!(bag.get_string("Name", "fallback"), "fallback");
    }

    #[test]
    fn bag_returns_set_values() {
        let mut bag = ParameterBag::new();
        bag.set("Value", ParamValue::Integer(42));
        assert_eq!(bag.get_integer("Value", 0), 42);
        assert_eq!(bag.get("Value").unwrap().type_name(), "Integer");
    }
}
