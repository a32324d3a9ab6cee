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

//! # Map Declaration Adapter
//!
//! Index scripts declare maps with a variable-arity call:
//!
//! ```text
//! map('Companies', 'HeartRate', function (ts) { ... })   // collection, sub-key, function
//! map('Companies', function (ts) { ... })                // every series of a collection
//! map(function (ts) { ... })                             // every series of every collection
//! ```
//!
//! The adapter resolves the form from the argument count alone and fills the
//! omitted slots with the configured sentinels. Calls with more than three
//! arguments use the three-slot form and keep the rest as extra arguments.
//! Slots are never reordered: a value of the wrong type stays in its slot and
//! validation reports that slot.
//!
//! Entries record whether the sub-key was filled in by the adapter. A sub-key
//! written by the script that equals the sentinel is rejected, so wildcard
//! maps and explicit maps never share a bucket.
//!
//! Engines forward raw `map(...)` arguments to a [`TiCDefinitionsBuilder`],
//! which stores one definitions entry per call. Entries are validated and
//! turned into a [`TiCCanonicalMapCall`] by [`TiCCanonicalMapCall::TiFFromEntry`].

use crate::config::TiCCompilerConfig;
use crate::errors::{Result, TiError};
use crate::script::{TiCScriptFunctionRef, TiCScriptValue};

pub const MAPS_PROPERTY: &str = "maps";
pub const COLLECTION_PROPERTY: &str = "collection";
pub const NAME_PROPERTY: &str = "name";
pub const METHOD_PROPERTY: &str = "method";
pub const MORE_ARGS_PROPERTY: &str = "moreArgs";
/// Set on entries whose sub-key is the sentinel filled in by the adapter.
pub const NAME_DEFAULTED_PROPERTY: &str = "nameDefaulted";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TiCDeclarationArity {
    /// `map(function)`
    Function,
    /// `map(collection, function)`
    CollectionFunction,
    /// `map(collection, subKey, function)`
    CollectionSubKeyFunction,
}

impl TiCDeclarationArity {
    /// Number of positional slots the form consumes.
    #[allow(non_snake_case)]
    pub fn TiFSlots(&self) -> usize {
        match self {
            TiCDeclarationArity::Function => 1,
            TiCDeclarationArity::CollectionFunction => 2,
            TiCDeclarationArity::CollectionSubKeyFunction => 3,
        }
    }
}

/// One map declaration in canonical (collection, sub-key, function) form.
#[derive(Clone, Debug)]
pub struct TiCCanonicalMapCall {
    pub collection: String,
    pub sub_key: String,
    pub function: TiCScriptFunctionRef,
    pub extra_arguments: Vec<TiCScriptValue>,
    /// Whether `sub_key` is the sentinel supplied for a 1- or 2-argument call.
    pub sub_key_defaulted: bool,
}

impl TiCCanonicalMapCall {
    /// Validates one element of the definitions `maps` array.
    ///
    /// Checks run in a fixed order (object, collection, sub-key, function) so
    /// the first violated contract is the one reported. A `moreArgs` property
    /// that is not an array is ignored. A sub-key equal to `reserved_sub_key`
    /// is only accepted when the adapter filled it in.
    #[allow(non_snake_case)]
    pub fn TiFFromEntry(
        index: &str,
        position: usize,
        entry: &TiCScriptValue,
        reserved_sub_key: &str,
    ) -> Result<Self> {
        if entry.TiFIsNull() || entry.TiFIsUndefined() || !entry.TiFIsObject() {
            return Err(TiError::malformed(
                index,
                position,
                format!("is not a valid object (got {})", entry.TiFTypeName()),
            ));
        }

        let collection = match entry.TiFGetProperty(COLLECTION_PROPERTY) {
            None => {
                return Err(TiError::invalid_collection(
                    index,
                    position,
                    "is missing a collection name",
                ))
            }
            Some(value) => value.TiFAsString().ok_or_else(|| {
                TiError::invalid_collection(index, position, "collection name isn't a string")
            })?,
        };

        let sub_key = match entry.TiFGetProperty(NAME_PROPERTY) {
            None => {
                return Err(TiError::invalid_sub_key(
                    index,
                    position,
                    format!("is missing its {} property", NAME_PROPERTY),
                ))
            }
            Some(value) => value.TiFAsString().ok_or_else(|| {
                TiError::invalid_sub_key(index, position, "TimeSeries name isn't a string")
            })?,
        };

        let sub_key_defaulted = matches!(
            entry.TiFGetProperty(NAME_DEFAULTED_PROPERTY),
            Some(TiCScriptValue::Bool(true))
        );
        if sub_key == reserved_sub_key && !sub_key_defaulted {
            return Err(TiError::invalid_sub_key(
                index,
                position,
                format!("TimeSeries name '{}' is reserved", sub_key),
            ));
        }

        let function = match entry.TiFGetProperty(METHOD_PROPERTY) {
            None => {
                return Err(TiError::invalid_function(
                    index,
                    position,
                    format!("is missing its {} property", METHOD_PROPERTY),
                ))
            }
            Some(value) => value.TiFAsCallable().ok_or_else(|| {
                TiError::invalid_function(
                    index,
                    position,
                    format!(
                        "{} property isn't a function (got {})",
                        METHOD_PROPERTY,
                        value.TiFTypeName()
                    ),
                )
            })?,
        };

        let extra_arguments = entry
            .TiFGetProperty(MORE_ARGS_PROPERTY)
            .and_then(|v| v.TiFAsArray())
            .map(|items| items.to_vec())
            .unwrap_or_default();

        Ok(Self {
            collection: collection.to_string(),
            sub_key: sub_key.to_string(),
            function: function.clone(),
            extra_arguments,
            sub_key_defaulted,
        })
    }

    /// Definitions entry equivalent to this call.
    #[allow(non_snake_case)]
    pub fn TiFToEntry(&self) -> TiCScriptValue {
        TiCScriptValue::TiFObject([
            (COLLECTION_PROPERTY, TiCScriptValue::from(self.collection.as_str())),
            (NAME_PROPERTY, TiCScriptValue::from(self.sub_key.as_str())),
            (METHOD_PROPERTY, TiCScriptValue::Function(self.function.clone())),
            (MORE_ARGS_PROPERTY, TiCScriptValue::Array(self.extra_arguments.clone())),
            (NAME_DEFAULTED_PROPERTY, TiCScriptValue::Bool(self.sub_key_defaulted)),
        ])
    }
}

#[derive(Clone, Debug)]
pub struct TiCMapDeclarationAdapter {
    index_name: String,
    config: TiCCompilerConfig,
}

impl TiCMapDeclarationAdapter {
    #[allow(non_snake_case)]
    pub fn TiFNew(index_name: &str, config: TiCCompilerConfig) -> Self {
        Self {
            index_name: index_name.to_string(),
            config,
        }
    }

    #[allow(non_snake_case)]
    pub fn TiFIndexName(&self) -> &str {
        &self.index_name
    }

    /// Resolves the declaration form from the number of arguments of one
    /// `map(...)` call. Returns `None` for an empty call.
    #[allow(non_snake_case)]
    pub fn TiFResolveArity(argument_count: usize) -> Option<TiCDeclarationArity> {
        match argument_count {
            0 => None,
            1 => Some(TiCDeclarationArity::Function),
            2 => Some(TiCDeclarationArity::CollectionFunction),
            _ => Some(TiCDeclarationArity::CollectionSubKeyFunction),
        }
    }

    /// Turns the raw arguments of one `map(...)` call into a definitions
    /// entry. Argument values are stored as given, slot by slot; an empty call
    /// becomes `null`, which validation reports as a malformed declaration.
    #[allow(non_snake_case)]
    pub fn TiFToEntry(&self, mut arguments: Vec<TiCScriptValue>) -> TiCScriptValue {
        let Some(arity) = Self::TiFResolveArity(arguments.len()) else {
            return TiCScriptValue::Null;
        };

        let extra_arguments = arguments.split_off(arity.TiFSlots());
        let mut slots = arguments.into_iter();
        let mut next = || slots.next().unwrap_or(TiCScriptValue::Undefined);

        let (collection, sub_key, function, sub_key_defaulted) = match arity {
            TiCDeclarationArity::Function => (
                TiCScriptValue::from(self.config.all_collections.as_str()),
                TiCScriptValue::from(self.config.all_sub_keys.as_str()),
                next(),
                true,
            ),
            TiCDeclarationArity::CollectionFunction => {
                let collection = next();
                (
                    collection,
                    TiCScriptValue::from(self.config.all_sub_keys.as_str()),
                    next(),
                    true,
                )
            }
            TiCDeclarationArity::CollectionSubKeyFunction => {
                let collection = next();
                let sub_key = next();
                (collection, sub_key, next(), false)
            }
        };

        TiCScriptValue::TiFObject([
            (COLLECTION_PROPERTY, collection),
            (NAME_PROPERTY, sub_key),
            (METHOD_PROPERTY, function),
            (MORE_ARGS_PROPERTY, TiCScriptValue::Array(extra_arguments)),
            (NAME_DEFAULTED_PROPERTY, TiCScriptValue::Bool(sub_key_defaulted)),
        ])
    }

    /// Normalizes the arguments of the `position`-th `map(...)` call.
    #[allow(non_snake_case)]
    pub fn TiFNormalize(
        &self,
        position: usize,
        arguments: Vec<TiCScriptValue>,
    ) -> Result<TiCCanonicalMapCall> {
        let entry = self.TiFToEntry(arguments);
        TiCCanonicalMapCall::TiFFromEntry(
            &self.index_name,
            position,
            &entry,
            &self.config.all_sub_keys,
        )
    }

    /// Strips the configured namespace prefix (ASCII case-insensitive) from a
    /// map source. Sources without the prefix are returned unchanged.
    #[allow(non_snake_case)]
    pub fn TiFStripPrefix(&self, source: &str) -> String {
        TiFStripMapPrefix(&self.config.map_prefix, source).to_string()
    }
}

/// Strips `prefix` from the start of `source`, ignoring ASCII case.
#[allow(non_snake_case)]
pub fn TiFStripMapPrefix<'a>(prefix: &str, source: &'a str) -> &'a str {
    match source.get(..prefix.len()) {
        Some(head) if !prefix.is_empty() && head.eq_ignore_ascii_case(prefix) => {
            &source[prefix.len()..]
        }
        _ => source,
    }
}

/// Collects the `map(...)` calls of one script run into the global
/// definitions object.
#[derive(Debug)]
pub struct TiCDefinitionsBuilder {
    adapter: TiCMapDeclarationAdapter,
    maps: Vec<TiCScriptValue>,
}

impl TiCDefinitionsBuilder {
    #[allow(non_snake_case)]
    pub fn TiFNew(adapter: TiCMapDeclarationAdapter) -> Self {
        Self {
            adapter,
            maps: Vec::new(),
        }
    }

    /// Records one `map(...)` call. Never fails; shape problems surface when
    /// the registry validates the finished definitions.
    #[allow(non_snake_case)]
    pub fn TiFDeclare(&mut self, arguments: Vec<TiCScriptValue>) {
        let entry = self.adapter.TiFToEntry(arguments);
        self.maps.push(entry);
    }

    #[allow(non_snake_case)]
    pub fn TiFMapCount(&self) -> usize {
        self.maps.len()
    }

    /// The global definitions object: `{ maps: [...] }`.
    #[allow(non_snake_case)]
    pub fn TiFFinish(self) -> TiCScriptValue {
        TiCScriptValue::TiFObject([(MAPS_PROPERTY, TiCScriptValue::Array(self.maps))])
    }
}
