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

//! # Dependency Tracker
//!
//! Accumulates, per source collection, the collections its map functions
//! read, and the collections whose maps consult compare-exchange values.
//! Referenced collections are attributed to the map's *own* collection: a
//! change in any of them must trigger reindexing of that collection's
//! entries. Both sets only grow while a registry is being built.

use std::collections::{HashMap, HashSet};

use crate::script::TiCMapMetadata;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TiCDependencyTracker {
    referenced_collections: HashMap<String, HashSet<String>>,
    compare_exchange: HashSet<String>,
}

impl TiCDependencyTracker {
    #[allow(non_snake_case)]
    pub fn TiFNew() -> Self {
        Self::default()
    }

    /// Unions one map's analysis result into its collection's entry. The
    /// entry is created even when the map references nothing.
    #[allow(non_snake_case)]
    pub fn TiFRecord(&mut self, collection: &str, metadata: &TiCMapMetadata) {
        self.referenced_collections
            .entry(collection.to_string())
            .or_default()
            .extend(metadata.referenced_collections.iter().cloned());

        if metadata.uses_compare_exchange {
            self.compare_exchange.insert(collection.to_string());
        }
    }

    /// Collections referenced by the maps of `collection`; empty when the
    /// collection has no maps.
    #[allow(non_snake_case)]
    pub fn TiFReferencedCollections(&self, collection: &str) -> HashSet<String> {
        self.referenced_collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    #[allow(non_snake_case)]
    pub fn TiFUsesCompareExchange(&self, collection: &str) -> bool {
        self.compare_exchange.contains(collection)
    }

    /// Owning collections whose maps read `changed`, sorted by name.
    #[allow(non_snake_case)]
    pub fn TiFCollectionsAffectedBy(&self, changed: &str) -> Vec<String> {
        let mut affected: Vec<String> = self
            .referenced_collections
            .iter()
            .filter(|(_, referenced)| referenced.contains(changed))
            .map(|(owner, _)| owner.clone())
            .collect();
        affected.sort();
        affected
    }

    #[allow(non_snake_case)]
    pub fn TiFCollectionsWithCompareExchange(&self) -> Vec<String> {
        let mut collections: Vec<String> = self.compare_exchange.iter().cloned().collect();
        collections.sort();
        collections
    }

    #[allow(non_snake_case)]
    pub fn TiFReferencedMap(&self) -> &HashMap<String, HashSet<String>> {
        &self.referenced_collections
    }
}
