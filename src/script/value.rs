//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Tix.
//! The Tix project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Script Values
//!
//! Owned view of the object graph a script engine hands back after running an
//! index script. Engines convert their native values into `TiCScriptValue` so
//! that validation never has to know which engine produced them.
//!
//! Records fed to compiled map functions use the same representation, and a
//! `serde_json::Value` converts losslessly into it (JSON has no `undefined`
//! and no functions, so the conversion never produces those variants).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::engine::TiCScriptFunction;

/// Shared handle to a compiled script function.
pub type TiCScriptFunctionRef = Arc<dyn TiCScriptFunction>;

/// Property bag of a script object.
pub type TiCScriptObject = BTreeMap<String, TiCScriptValue>;

#[derive(Clone)]
pub enum TiCScriptValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<TiCScriptValue>),
    Object(TiCScriptObject),
    Function(TiCScriptFunctionRef),
}

impl TiCScriptValue {
    #[allow(non_snake_case)]
    pub fn TiFIsUndefined(&self) -> bool {
        matches!(self, TiCScriptValue::Undefined)
    }

    #[allow(non_snake_case)]
    pub fn TiFIsNull(&self) -> bool {
        matches!(self, TiCScriptValue::Null)
    }

    #[allow(non_snake_case)]
    pub fn TiFIsObject(&self) -> bool {
        matches!(self, TiCScriptValue::Object(_))
    }

    #[allow(non_snake_case)]
    pub fn TiFIsArray(&self) -> bool {
        matches!(self, TiCScriptValue::Array(_))
    }

    #[allow(non_snake_case)]
    pub fn TiFIsString(&self) -> bool {
        matches!(self, TiCScriptValue::String(_))
    }

    /// Returns the named property, or `None` when the value has no such
    /// property (including every non-object value).
    #[allow(non_snake_case)]
    pub fn TiFGetProperty(&self, name: &str) -> Option<&TiCScriptValue> {
        match self {
            TiCScriptValue::Object(map) => map.get(name),
            _ => None,
        }
    }

    #[allow(non_snake_case)]
    pub fn TiFHasProperty(&self, name: &str) -> bool {
        self.TiFGetProperty(name).is_some()
    }

    #[allow(non_snake_case)]
    pub fn TiFAsString(&self) -> Option<&str> {
        match self {
            TiCScriptValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[allow(non_snake_case)]
    pub fn TiFAsArray(&self) -> Option<&[TiCScriptValue]> {
        match self {
            TiCScriptValue::Array(items) => Some(items),
            _ => None,
        }
    }

    #[allow(non_snake_case)]
    pub fn TiFAsCallable(&self) -> Option<&TiCScriptFunctionRef> {
        match self {
            TiCScriptValue::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Short type name used in diagnostics.
    #[allow(non_snake_case)]
    pub fn TiFTypeName(&self) -> &'static str {
        match self {
            TiCScriptValue::Undefined => "undefined",
            TiCScriptValue::Null => "null",
            TiCScriptValue::Bool(_) => "boolean",
            TiCScriptValue::Number(_) => "number",
            TiCScriptValue::String(_) => "string",
            TiCScriptValue::Array(_) => "array",
            TiCScriptValue::Object(_) => "object",
            TiCScriptValue::Function(_) => "function",
        }
    }

    /// Builds an object value from `(name, value)` pairs.
    #[allow(non_snake_case)]
    pub fn TiFObject<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, TiCScriptValue)>,
        K: Into<String>,
    {
        TiCScriptValue::Object(
            properties
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }
}

impl fmt::Debug for TiCScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiCScriptValue::Undefined => write!(f, "undefined"),
            TiCScriptValue::Null => write!(f, "null"),
            TiCScriptValue::Bool(b) => write!(f, "{b}"),
            TiCScriptValue::Number(n) => write!(f, "{n}"),
            TiCScriptValue::String(s) => write!(f, "{s:?}"),
            TiCScriptValue::Array(items) => f.debug_list().entries(items).finish(),
            TiCScriptValue::Object(map) => f.debug_map().entries(map).finish(),
            TiCScriptValue::Function(function) => write!(f, "[function {}]", function.name()),
        }
    }
}

/// Functions compare by identity, everything else structurally.
impl PartialEq for TiCScriptValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TiCScriptValue::Undefined, TiCScriptValue::Undefined) => true,
            (TiCScriptValue::Null, TiCScriptValue::Null) => true,
            (TiCScriptValue::Bool(a), TiCScriptValue::Bool(b)) => a == b,
            (TiCScriptValue::Number(a), TiCScriptValue::Number(b)) => a == b,
            (TiCScriptValue::String(a), TiCScriptValue::String(b)) => a == b,
            (TiCScriptValue::Array(a), TiCScriptValue::Array(b)) => a == b,
            (TiCScriptValue::Object(a), TiCScriptValue::Object(b)) => a == b,
            (TiCScriptValue::Function(a), TiCScriptValue::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Value> for TiCScriptValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => TiCScriptValue::Null,
            Value::Bool(b) => TiCScriptValue::Bool(b),
            Value::Number(n) => TiCScriptValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => TiCScriptValue::String(s),
            Value::Array(items) => {
                TiCScriptValue::Array(items.into_iter().map(TiCScriptValue::from).collect())
            }
            Value::Object(map) => TiCScriptValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, TiCScriptValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for TiCScriptValue {
    fn from(s: &str) -> Self {
        TiCScriptValue::String(s.to_string())
    }
}

impl From<String> for TiCScriptValue {
    fn from(s: String) -> Self {
        TiCScriptValue::String(s)
    }
}

impl From<TiCScriptFunctionRef> for TiCScriptValue {
    fn from(function: TiCScriptFunctionRef) -> Self {
        TiCScriptValue::Function(function)
    }
}
