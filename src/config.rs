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

//! # Compiler Configuration
//!
//! Settings shared by the declaration adapter, the registry build, and the
//! index owner. Documents may be supplied as JSON or YAML; missing keys fall
//! back to the defaults.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TiError};

/// Prefix carried by map sources written against the time-series namespace.
pub const DEFAULT_MAP_PREFIX: &str = "timeSeries.";

/// Collection sentinel meaning "every document in every collection".
pub const ALL_DOCUMENTS_COLLECTION: &str = "@all_docs";

/// Sub-key sentinel meaning "every time series of the collection".
pub const ALL_SUB_KEYS: &str = "@all_timeseries";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiCCompilerConfig {
    /// Namespace prefix stripped (case-insensitively) from map sources.
    pub map_prefix: String,
    /// Collection used by single-argument declarations.
    pub all_collections: String,
    /// Sub-key used by one- and two-argument declarations.
    pub all_sub_keys: String,
    /// Whether compiled operations get a field-projection hint.
    pub field_projection_hints: bool,
    /// Whether every map entry must have a matching source text.
    pub require_source_per_map: bool,
}

impl Default for TiCCompilerConfig {
    fn default() -> Self {
        Self {
            map_prefix: DEFAULT_MAP_PREFIX.to_string(),
            all_collections: ALL_DOCUMENTS_COLLECTION.to_string(),
            all_sub_keys: ALL_SUB_KEYS.to_string(),
            field_projection_hints: true,
            require_source_per_map: true,
        }
    }
}

impl TiCCompilerConfig {
    #[allow(non_snake_case)]
    pub fn TiFNew() -> Self {
        Self::default()
    }

    #[allow(non_snake_case)]
    pub fn TiFMapPrefix(mut self, prefix: &str) -> Self {
        self.map_prefix = prefix.to_string();
        self
    }

    #[allow(non_snake_case)]
    pub fn TiFAllCollections(mut self, sentinel: &str) -> Self {
        self.all_collections = sentinel.to_string();
        self
    }

    #[allow(non_snake_case)]
    pub fn TiFAllSubKeys(mut self, sentinel: &str) -> Self {
        self.all_sub_keys = sentinel.to_string();
        self
    }

    #[allow(non_snake_case)]
    pub fn TiFFieldProjectionHints(mut self, enabled: bool) -> Self {
        self.field_projection_hints = enabled;
        self
    }

    #[allow(non_snake_case)]
    pub fn TiFRequireSourcePerMap(mut self, required: bool) -> Self {
        self.require_source_per_map = required;
        self
    }

    /// Both sentinels must be non-empty.
    #[allow(non_snake_case)]
    pub fn TiFValidate(&self) -> Result<()> {
        if self.all_collections.is_empty() {
            return Err(TiError::validation("all_collections sentinel must not be empty"));
        }
        if self.all_sub_keys.is_empty() {
            return Err(TiError::validation("all_sub_keys sentinel must not be empty"));
        }
        Ok(())
    }

    #[allow(non_snake_case)]
    pub fn TiFFromJson(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.TiFValidate()?;
        Ok(config)
    }

    #[allow(non_snake_case)]
    pub fn TiFFromYaml(source: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.TiFValidate()?;
        Ok(config)
    }
}
