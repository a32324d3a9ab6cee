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

//! # Map Registry
//!
//! Validates the global definitions object produced by an index script and
//! groups the compiled map operations by collection and sub-key.
//!
//! ## Build
//!
//! For every element of `definitions.maps`, in order:
//!
//! 1. validate the element into a canonical call (object, collection,
//!    sub-key, function);
//! 2. build a [`TiCMapOperation`] from the call and its source text;
//! 3. attach the static analysis results;
//! 4. append it to its (collection, sub-key) bucket;
//! 5. record the collections it references.
//!
//! The first failure aborts the build and nothing is returned. A registry
//! that was built is never modified afterwards.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::TiCDependencyTracker;
use crate::config::TiCCompilerConfig;
use crate::errors::{Result, TiError};
use crate::map::declaration::{TiCCanonicalMapCall, MAPS_PROPERTY};
use crate::map::operation::TiCMapOperation;
use crate::script::{TiCReferenceAnalyzer, TiCScriptValue};

/// collection -> sub-key -> operations in declaration order.
pub type TiCCollectionFunctionTable = HashMap<String, HashMap<String, Vec<Arc<TiCMapOperation>>>>;

#[derive(Clone, Debug)]
pub struct TiCMapRegistry {
    index_name: String,
    collection_functions: TiCCollectionFunctionTable,
    dependencies: TiCDependencyTracker,
    map_count: usize,
}

impl TiCMapRegistry {
    /// Operations registered for exactly (`collection`, `sub_key`), in
    /// declaration order. Empty when nothing was registered.
    #[allow(non_snake_case)]
    pub fn TiFLookup(&self, collection: &str, sub_key: &str) -> &[Arc<TiCMapOperation>] {
        self.collection_functions
            .get(collection)
            .and_then(|sub_keys| sub_keys.get(sub_key))
            .map(|operations| operations.as_slice())
            .unwrap_or(&[])
    }

    #[allow(non_snake_case)]
    pub fn TiFGetReferencedCollections(&self, collection: &str) -> HashSet<String> {
        self.dependencies.TiFReferencedCollections(collection)
    }

    #[allow(non_snake_case)]
    pub fn TiFCollectionUsesCompareExchange(&self, collection: &str) -> bool {
        self.dependencies.TiFUsesCompareExchange(collection)
    }

    #[allow(non_snake_case)]
    pub fn TiFIndexName(&self) -> &str {
        &self.index_name
    }

    /// Number of compiled map operations across all buckets.
    #[allow(non_snake_case)]
    pub fn TiFMapCount(&self) -> usize {
        self.map_count
    }

    /// Collections with at least one map, sorted by name.
    #[allow(non_snake_case)]
    pub fn TiFCollections(&self) -> Vec<String> {
        let mut collections: Vec<String> = self.collection_functions.keys().cloned().collect();
        collections.sort();
        collections
    }

    /// Sub-keys registered under `collection`, sorted by name.
    #[allow(non_snake_case)]
    pub fn TiFSubKeys(&self, collection: &str) -> Vec<String> {
        let mut sub_keys: Vec<String> = self
            .collection_functions
            .get(collection)
            .map(|sub_keys| sub_keys.keys().cloned().collect())
            .unwrap_or_default();
        sub_keys.sort();
        sub_keys
    }

    #[allow(non_snake_case)]
    pub fn TiFTable(&self) -> &TiCCollectionFunctionTable {
        &self.collection_functions
    }

    #[allow(non_snake_case)]
    pub fn TiFDependencies(&self) -> &TiCDependencyTracker {
        &self.dependencies
    }
}

#[derive(Debug)]
pub struct TiCMapRegistryBuilder {
    index_name: String,
    config: TiCCompilerConfig,
    sources: Vec<String>,
}

impl TiCMapRegistryBuilder {
    #[allow(non_snake_case)]
    pub fn TiFNew(index_name: &str) -> Self {
        Self {
            index_name: index_name.to_string(),
            config: TiCCompilerConfig::default(),
            sources: Vec::new(),
        }
    }

    #[allow(non_snake_case)]
    pub fn TiFWithConfig(mut self, config: TiCCompilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Map source texts, one per declaration, already prefix-stripped.
    #[allow(non_snake_case)]
    pub fn TiFWithSources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    #[allow(non_snake_case)]
    pub fn TiFBuild(
        &self,
        definitions: &TiCScriptValue,
        analyzer: &dyn TiCReferenceAnalyzer,
    ) -> Result<TiCMapRegistry> {
        self.config.TiFValidate()?;

        let index = self.index_name.as_str();
        let maps = match definitions.TiFGetProperty(MAPS_PROPERTY) {
            Some(TiCScriptValue::Array(maps)) if !maps.is_empty() => maps,
            _ => {
                return Err(TiError::NoMapFunctionsDeclared {
                    index: index.to_string(),
                })
            }
        };

        log::info!("compiling {} map function(s) for index '{}'", maps.len(), index);

        let mut collection_functions = TiCCollectionFunctionTable::new();
        let mut dependencies = TiCDependencyTracker::TiFNew();

        for (position, entry) in maps.iter().enumerate() {
            let call = TiCCanonicalMapCall::TiFFromEntry(
                index,
                position,
                entry,
                &self.config.all_sub_keys,
            )?;
            let source = self.source_for(position)?;

            let metadata = analyzer.analyze_referenced_collections(&call.function);
            let operation = TiCMapOperation::TiFNew(index, source, call.function)
                .TiFWithExtraArguments(call.extra_arguments)
                .TiFAnalyze(self.config.field_projection_hints);

            if let Some(field) = operation.TiFFieldHint() {
                log::debug!(
                    "index '{}': map function #{} projects field '{}'",
                    index,
                    position,
                    field
                );
            }
            if !metadata.referenced_collections.is_empty() || metadata.uses_compare_exchange {
                log::debug!(
                    "index '{}': map function #{} on '{}' references {:?} (compare-exchange: {})",
                    index,
                    position,
                    call.collection,
                    metadata.referenced_collections,
                    metadata.uses_compare_exchange
                );
            }

            collection_functions
                .entry(call.collection.clone())
                .or_default()
                .entry(call.sub_key)
                .or_default()
                .push(Arc::new(operation));

            dependencies.TiFRecord(&call.collection, &metadata);
        }

        log::info!(
            "index '{}' compiled: {} map function(s) over {} collection(s)",
            index,
            maps.len(),
            collection_functions.len()
        );

        Ok(TiCMapRegistry {
            index_name: self.index_name.clone(),
            collection_functions,
            dependencies,
            map_count: maps.len(),
        })
    }

    fn source_for(&self, position: usize) -> Result<&str> {
        match self.sources.get(position) {
            Some(source) => Ok(source),
            None if self.config.require_source_per_map => Err(TiError::malformed(
                &self.index_name,
                position,
                format!(
                    "has no matching map source ({} source(s) declared)",
                    self.sources.len()
                ),
            )),
            None => {
                log::warn!(
                    "index '{}': map function #{} has no matching map source",
                    self.index_name,
                    position
                );
                Ok("")
            }
        }
    }
}
