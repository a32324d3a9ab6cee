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

//! # Map Index
//!
//! Owns the compiled registry of one index and republishes it whenever the
//! index definition changes.
//!
//! ## Publication
//!
//! A rebuild runs on the calling thread while holding the engine lock, so at
//! most one build is in flight per index. The new registry becomes visible
//! only after the build finished successfully, with a single atomic swap.
//! A failed build leaves the previously published registry in place, so the
//! index keeps serving its last-good maps.
//!
//! Readers load the current registry without locking and keep using the
//! snapshot they loaded even if a rebuild publishes a newer one meanwhile.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};

use crate::config::TiCCompilerConfig;
use crate::errors::{Result, TiError};
use crate::map::declaration::{TiFStripMapPrefix, TiCDefinitionsBuilder, TiCMapDeclarationAdapter};
use crate::map::{TiCMapOperation, TiCMapRegistry, TiCMapRegistryBuilder};
use crate::script::{TiCReferenceAnalyzer, TiCScriptEngine};

/// Stored definition of a time-series map index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiCIndexDefinition {
    pub name: String,
    /// Map sources in declaration order, as authored.
    pub maps: Vec<String>,
    /// Helper scripts loaded before the maps, keyed by name.
    #[serde(default)]
    pub additional_sources: BTreeMap<String, String>,
}

impl TiCIndexDefinition {
    #[allow(non_snake_case)]
    pub fn TiFNew(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[allow(non_snake_case)]
    pub fn TiFAddMap(mut self, source: &str) -> Self {
        self.maps.push(source.to_string());
        self
    }

    #[allow(non_snake_case)]
    pub fn TiFAddSource(mut self, name: &str, source: &str) -> Self {
        self.additional_sources
            .insert(name.to_string(), source.to_string());
        self
    }

    /// Map sources with the namespace prefix stripped.
    #[allow(non_snake_case)]
    pub fn TiFMapSources(&self, config: &TiCCompilerConfig) -> Vec<String> {
        self.maps
            .iter()
            .map(|source| TiFStripMapPrefix(&config.map_prefix, source).to_string())
            .collect()
    }

    /// Full script text: additional sources first, then the stripped maps.
    #[allow(non_snake_case)]
    pub fn TiFScript(&self, config: &TiCCompilerConfig) -> String {
        self.additional_sources
            .values()
            .cloned()
            .chain(self.TiFMapSources(config))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Runs the index script and builds a registry from its definitions.
#[allow(non_snake_case)]
pub fn TiFCompileIndex(
    engine: &mut dyn TiCScriptEngine,
    analyzer: &dyn TiCReferenceAnalyzer,
    config: &TiCCompilerConfig,
    definition: &TiCIndexDefinition,
) -> Result<TiCMapRegistry> {
    config.TiFValidate()?;

    let adapter = TiCMapDeclarationAdapter::TiFNew(&definition.name, config.clone());
    let script = definition.TiFScript(config);

    let definitions = engine
        .execute_script(&script, TiCDefinitionsBuilder::TiFNew(adapter))
        .map_err(|err| TiError::ScriptCompilation {
            index: definition.name.clone(),
            message: err.to_string(),
        })?;

    TiCMapRegistryBuilder::TiFNew(&definition.name)
        .TiFWithConfig(config.clone())
        .TiFWithSources(definition.TiFMapSources(config))
        .TiFBuild(&definitions, analyzer)
}

pub struct TiCMapIndex {
    config: TiCCompilerConfig,
    engine: Mutex<Box<dyn TiCScriptEngine>>,
    analyzer: Arc<dyn TiCReferenceAnalyzer>,
    current: ArcSwapOption<TiCMapRegistry>,
}

impl TiCMapIndex {
    #[allow(non_snake_case)]
    pub fn TiFNew(
        engine: Box<dyn TiCScriptEngine>,
        analyzer: Arc<dyn TiCReferenceAnalyzer>,
    ) -> Self {
        Self {
            config: TiCCompilerConfig::default(),
            engine: Mutex::new(engine),
            analyzer,
            current: ArcSwapOption::empty(),
        }
    }

    #[allow(non_snake_case)]
    pub fn TiFWithConfig(mut self, config: TiCCompilerConfig) -> Self {
        self.config = config;
        self
    }

    #[allow(non_snake_case)]
    pub fn TiFConfig(&self) -> &TiCCompilerConfig {
        &self.config
    }

    /// Compiles `definition` and, on success, publishes the result as the
    /// current registry. On failure the current registry is left untouched.
    #[allow(non_snake_case)]
    pub fn TiFRebuild(&self, definition: &TiCIndexDefinition) -> Result<Arc<TiCMapRegistry>> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| TiError::internal("script engine lock poisoned"))?;

        match TiFCompileIndex(&mut **engine, self.analyzer.as_ref(), &self.config, definition) {
            Ok(registry) => {
                let registry = Arc::new(registry);
                self.current.store(Some(registry.clone()));
                Ok(registry)
            }
            Err(err) => {
                if self.current.load().is_some() {
                    log::warn!(
                        "index '{}' rebuild failed, keeping previous maps: {}",
                        definition.name,
                        err
                    );
                }
                Err(err)
            }
        }
    }

    /// The currently published registry, if any build succeeded yet.
    #[allow(non_snake_case)]
    pub fn TiFCurrent(&self) -> Option<Arc<TiCMapRegistry>> {
        self.current.load_full()
    }

    #[allow(non_snake_case)]
    pub fn TiFLookup(&self, collection: &str, sub_key: &str) -> Vec<Arc<TiCMapOperation>> {
        self.TiFCurrent()
            .map(|registry| registry.TiFLookup(collection, sub_key).to_vec())
            .unwrap_or_default()
    }

    #[allow(non_snake_case)]
    pub fn TiFGetReferencedCollections(&self, collection: &str) -> HashSet<String> {
        self.TiFCurrent()
            .map(|registry| registry.TiFGetReferencedCollections(collection))
            .unwrap_or_default()
    }

    #[allow(non_snake_case)]
    pub fn TiFCollectionUsesCompareExchange(&self, collection: &str) -> bool {
        self.TiFCurrent()
            .map(|registry| registry.TiFCollectionUsesCompareExchange(collection))
            .unwrap_or(false)
    }
}
