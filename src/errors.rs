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

//! # Tix Error Module
//!
//! This module defines the error types used throughout Tix for consistent
//! reporting of index compilation failures.
//!
//! ## Error Categories
//!
//! Build errors are raised synchronously while a registry is compiled and
//! abort the whole build:
//!
//! - **NoMapFunctionsDeclared**: the script produced no usable `maps` array
//! - **MalformedDeclaration**: a `maps` element is not a usable object
//! - **MissingOrInvalidCollection / SubKey / Function**: a required property
//!   of a declaration is absent or of the wrong shape
//! - **ScriptCompilation**: the script engine failed to execute the script
//!
//! Every declaration-level error names the index and the zero-based position
//! of the offending declaration so an index author can find it.
//!
//! Runtime and ambient errors:
//!
//! - **Execution**: a compiled map callable failed against a record
//! - **Validation / Serde / Internal**: configuration and unexpected failures

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Tix.
pub type Result<T> = std::result::Result<T, TiError>;

/// Canonical error enumeration for Tix.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum TiError {
    /// The `maps` array is absent, not an array, or empty.
    #[error("index '{index}' doesn't contain any map functions or 'globalDefinition.maps' was modified in the script")]
    NoMapFunctionsDeclared { index: String },

    /// A `maps` element is null, undefined, or not an object.
    #[error("index '{index}': map function #{position} {message}")]
    MalformedDeclaration {
        index: String,
        position: usize,
        message: String,
    },

    /// The `collection` property is absent or not a string.
    #[error("index '{index}': map function #{position} {message}")]
    MissingOrInvalidCollection {
        index: String,
        position: usize,
        message: String,
    },

    /// The sub-key (`name`) property is absent or not a string.
    #[error("index '{index}': map function #{position} {message}")]
    MissingOrInvalidSubKey {
        index: String,
        position: usize,
        message: String,
    },

    /// The `method` property is absent or not callable.
    #[error("index '{index}': map function #{position} {message}")]
    MissingOrInvalidFunction {
        index: String,
        position: usize,
        message: String,
    },

    /// The script engine could not execute the index script.
    #[error("index '{index}': script failed to execute: {message}")]
    ScriptCompilation { index: String, message: String },

    /// A compiled map function failed while being invoked.
    #[error("index '{index}': map function failed: {message}")]
    Execution { index: String, message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for TiError {
    fn from(err: serde_json::Error) -> Self {
        TiError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for TiError {
    fn from(err: serde_yaml::Error) -> Self {
        TiError::Serde(err.to_string())
    }
}

impl TiError {
    /// Helper to construct malformed declaration errors.
    pub fn malformed(index: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        TiError::MalformedDeclaration {
            index: index.into(),
            position,
            message: message.into(),
        }
    }

    pub fn invalid_collection(
        index: impl Into<String>,
        position: usize,
        message: impl Into<String>,
    ) -> Self {
        TiError::MissingOrInvalidCollection {
            index: index.into(),
            position,
            message: message.into(),
        }
    }

    pub fn invalid_sub_key(
        index: impl Into<String>,
        position: usize,
        message: impl Into<String>,
    ) -> Self {
        TiError::MissingOrInvalidSubKey {
            index: index.into(),
            position,
            message: message.into(),
        }
    }

    pub fn invalid_function(
        index: impl Into<String>,
        position: usize,
        message: impl Into<String>,
    ) -> Self {
        TiError::MissingOrInvalidFunction {
            index: index.into(),
            position,
            message: message.into(),
        }
    }

    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        TiError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        TiError::Internal(message.into())
    }

    /// Position of the offending declaration, when the error names one.
    #[allow(non_snake_case)]
    pub fn TiFPosition(&self) -> Option<usize> {
        match self {
            TiError::MalformedDeclaration { position, .. }
            | TiError::MissingOrInvalidCollection { position, .. }
            | TiError::MissingOrInvalidSubKey { position, .. }
            | TiError::MissingOrInvalidFunction { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Whether this error belongs to the registry build taxonomy.
    #[allow(non_snake_case)]
    pub fn TiFIsBuildError(&self) -> bool {
        matches!(
            self,
            TiError::NoMapFunctionsDeclared { .. }
                | TiError::MalformedDeclaration { .. }
                | TiError::MissingOrInvalidCollection { .. }
                | TiError::MissingOrInvalidSubKey { .. }
                | TiError::MissingOrInvalidFunction { .. }
                | TiError::ScriptCompilation { .. }
        )
    }
}
