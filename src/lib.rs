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

//! # Tix Core Library
//!
//! Tix compiles script-based time-series map indexes of a document database
//! into a validated, read-only registry of executable map operations, grouped
//! by source collection and by time-series name (the sub-key).
//!
//! ## Module Overview
//!
//! - **script**: contracts for the embedded script engine, its values, and
//!   the function declaration syntax it exposes
//! - **map**: declaration normalization, map operations, and the registry
//! - **analysis**: field-projection hints and collection dependency tracking
//! - **index**: index definitions and atomic registry publication
//! - **config**: compiler settings
//! - **errors**: the build error taxonomy
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tix::{TiCIndexDefinition, TiCMapIndex, TiCNoReferences};
//!
//! let index = TiCMapIndex::TiFNew(engine, Arc::new(TiCNoReferences));
//! let definition = TiCIndexDefinition::TiFNew("HeartRates")
//!     .TiFAddMap("timeSeries.map('Users', 'HeartRate', function (ts) { return ts.Entries; })");
//!
//! index.TiFRebuild(&definition)?;
//! for operation in index.TiFLookup("Users", "HeartRate") {
//!     operation.TiFExecute(record.clone())?;
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, TiError>`. A build either succeeds in
//! full or fails with a single error naming the offending declaration.

#![allow(non_snake_case)]

pub mod analysis;
pub mod config;
pub mod errors;
pub mod index;
pub mod map;
pub mod script;

pub use errors::{Result, TiError};
pub use config::TiCCompilerConfig;
pub use script::{
    TiCFunctionAst, TiCMapMetadata, TiCNoReferences, TiCReferenceAnalyzer, TiCScriptEngine,
    TiCScriptError, TiCScriptFunction, TiCScriptFunctionRef, TiCScriptValue,
};
pub use map::{
    TiCCanonicalMapCall, TiCDefinitionsBuilder, TiCMapDeclarationAdapter, TiCMapOperation,
    TiCMapRegistry, TiCMapRegistryBuilder,
};
pub use analysis::{TiCDependencyTracker, TiCFieldProjectionAnalyzer, TiCMapShape};
pub use index::{TiFCompileIndex, TiCIndexDefinition, TiCMapIndex};
