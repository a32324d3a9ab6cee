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

//! # Script Engine Contracts
//!
//! Tix never parses or runs script text itself. An embedding database plugs
//! in an engine through the traits below:
//!
//! - [`TiCScriptEngine`] runs a whole index script once and returns the
//!   global definitions object.
//! - [`TiCScriptFunction`] is a compiled, callable function. Besides being
//!   invocable it exposes its declaration syntax, which static analysis reads.
//! - [`TiCReferenceAnalyzer`] reports which other collections a map function
//!   reads and whether it consults compare-exchange values.

use std::collections::HashSet;

use thiserror::Error;

use super::ast::TiCFunctionAst;
use super::value::{TiCScriptFunctionRef, TiCScriptValue};
use crate::map::declaration::TiCDefinitionsBuilder;

/// Failure reported by a script engine or by a script function invocation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TiCScriptError {
    pub message: String,
}

impl TiCScriptError {
    #[allow(non_snake_case)]
    pub fn TiFNew(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A compiled script function.
///
/// Implementations must be shareable across threads, but the engine behind a
/// function is not required to tolerate concurrent invocation. Callers that
/// execute map operations from several workers either confine one compiled
/// registry to one worker or compile one registry per worker.
pub trait TiCScriptFunction: std::fmt::Debug + Send + Sync {
    /// Name used in diagnostics. Anonymous functions return an empty string.
    fn name(&self) -> &str {
        ""
    }

    /// Invokes the function with positional arguments.
    fn call(&self, arguments: &[TiCScriptValue]) -> Result<TiCScriptValue, TiCScriptError>;

    /// Parameter list and body of the function's declaration, when the
    /// function was compiled from script source. Host-provided functions
    /// return `None`.
    fn declaration(&self) -> Option<&TiCFunctionAst>;
}

/// An embedded script engine able to run an index script.
pub trait TiCScriptEngine: Send {
    /// Runs `script` once.
    ///
    /// The engine exposes a global `map(...)` function to the script and
    /// forwards the positional arguments of every call to
    /// [`TiCDefinitionsBuilder::TiFDeclare`]. The returned value is the global
    /// definitions object after the script finished, normally obtained from
    /// [`TiCDefinitionsBuilder::TiFFinish`]; engines that let scripts touch
    /// the definitions object directly return its final state instead.
    fn execute_script(
        &mut self,
        script: &str,
        definitions: TiCDefinitionsBuilder,
    ) -> Result<TiCScriptValue, TiCScriptError>;
}

/// Collections a single map function reads besides its own source records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TiCMapMetadata {
    pub referenced_collections: HashSet<String>,
    pub uses_compare_exchange: bool,
}

impl TiCMapMetadata {
    #[allow(non_snake_case)]
    pub fn TiFNew() -> Self {
        Self::default()
    }

    #[allow(non_snake_case)]
    pub fn TiFReferencing<I, S>(collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            referenced_collections: collections.into_iter().map(Into::into).collect(),
            uses_compare_exchange: false,
        }
    }

    #[allow(non_snake_case)]
    pub fn TiFWithCompareExchange(mut self, uses: bool) -> Self {
        self.uses_compare_exchange = uses;
        self
    }
}

/// Static analysis of the collections a map function references
/// (`load(id, 'Collection')`, compare-exchange reads, ...).
pub trait TiCReferenceAnalyzer: Send + Sync {
    fn analyze_referenced_collections(&self, function: &TiCScriptFunctionRef) -> TiCMapMetadata;
}

/// Analyzer for engines with no reference analysis: every map is treated as
/// self-contained.
#[derive(Clone, Copy, Debug, Default)]
pub struct TiCNoReferences;

impl TiCReferenceAnalyzer for TiCNoReferences {
    fn analyze_referenced_collections(&self, _function: &TiCScriptFunctionRef) -> TiCMapMetadata {
        TiCMapMetadata::default()
    }
}
