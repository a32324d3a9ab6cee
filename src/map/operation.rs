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

//! # Map Operation
//!
//! The compiled, analyzed unit of work handed to the indexing pipeline. An
//! operation is assembled once while a registry is built and never changes
//! afterwards; editing an index script produces new operations in a new
//! registry.
//!
//! Every invocation passes the source record first, followed by the extra
//! arguments captured from the declaration.

use crate::analysis::{TiCFieldProjectionAnalyzer, TiCMapShape};
use crate::errors::{Result, TiError};
use crate::script::{TiCScriptFunctionRef, TiCScriptValue};

#[derive(Clone, Debug)]
pub struct TiCMapOperation {
    index_name: String,
    source: String,
    function: TiCScriptFunctionRef,
    extra_arguments: Vec<TiCScriptValue>,
    field_hint: Option<String>,
    shape: TiCMapShape,
}

impl TiCMapOperation {
    #[allow(non_snake_case)]
    pub fn TiFNew(index_name: &str, source: &str, function: TiCScriptFunctionRef) -> Self {
        Self {
            index_name: index_name.to_string(),
            source: source.to_string(),
            function,
            extra_arguments: Vec::new(),
            field_hint: None,
            shape: TiCMapShape::TiFUnknown(),
        }
    }

    #[allow(non_snake_case)]
    pub fn TiFWithExtraArguments(mut self, extra_arguments: Vec<TiCScriptValue>) -> Self {
        self.extra_arguments = extra_arguments;
        self
    }

    /// Runs static analysis over the function's declaration and attaches the
    /// results. Functions without an inspectable declaration keep no hint and
    /// an unknown shape.
    #[allow(non_snake_case)]
    pub fn TiFAnalyze(mut self, field_projection_hints: bool) -> Self {
        match self.function.declaration() {
            Some(declaration) => {
                self.field_hint = if field_projection_hints {
                    TiCFieldProjectionAnalyzer::TiFFieldHint(declaration)
                } else {
                    None
                };
                self.shape = TiCFieldProjectionAnalyzer::TiFShape(declaration);
            }
            None => {
                self.field_hint = None;
                self.shape = TiCMapShape::TiFUnknown();
            }
        }
        self
    }

    #[allow(non_snake_case)]
    pub fn TiFIndexName(&self) -> &str {
        &self.index_name
    }

    /// Declaration source text, after namespace prefix stripping.
    #[allow(non_snake_case)]
    pub fn TiFSource(&self) -> &str {
        &self.source
    }

    #[allow(non_snake_case)]
    pub fn TiFFunction(&self) -> &TiCScriptFunctionRef {
        &self.function
    }

    #[allow(non_snake_case)]
    pub fn TiFExtraArguments(&self) -> &[TiCScriptValue] {
        &self.extra_arguments
    }

    #[allow(non_snake_case)]
    pub fn TiFFieldHint(&self) -> Option<&str> {
        self.field_hint.as_deref()
    }

    #[allow(non_snake_case)]
    pub fn TiFShape(&self) -> &TiCMapShape {
        &self.shape
    }

    /// Invokes the map function with `record` followed by the extra arguments.
    #[allow(non_snake_case)]
    pub fn TiFExecute(&self, record: TiCScriptValue) -> Result<TiCScriptValue> {
        let mut arguments = Vec::with_capacity(1 + self.extra_arguments.len());
        arguments.push(record);
        arguments.extend(self.extra_arguments.iter().cloned());

        self.function
            .call(&arguments)
            .map_err(|err| TiError::Execution {
                index: self.index_name.clone(),
                message: err.to_string(),
            })
    }

    /// Fast path for hinted operations: reads the hinted field straight from
    /// an object record (undefined when absent). Returns `None` when the
    /// caller has to invoke the function instead.
    #[allow(non_snake_case)]
    pub fn TiFProject(&self, record: &TiCScriptValue) -> Option<TiCScriptValue> {
        let field = self.field_hint.as_deref()?;
        if !record.TiFIsObject() {
            return None;
        }
        Some(
            record
                .TiFGetProperty(field)
                .cloned()
                .unwrap_or(TiCScriptValue::Undefined),
        )
    }
}
