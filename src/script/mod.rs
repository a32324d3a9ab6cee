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

//! # Script Module
//!
//! The boundary between Tix and the embedded script engine.
//!
//! - **Value** ([value.rs](value/index.html)): the engine's object graph
//! - **AST** ([ast.rs](ast/index.html)): function declarations exposed for analysis
//! - **Engine** ([engine.rs](engine/index.html)): engine, function, and
//!   reference-analysis contracts

pub mod ast;
pub mod engine;
pub mod value;

pub use ast::{
    TiCExpression, TiCFunctionAst, TiCFunctionBody, TiCMemberProperty, TiCPattern, TiCProperty,
    TiCPropertyKey, TiCStatement,
};
pub use engine::{
    TiCMapMetadata, TiCNoReferences, TiCReferenceAnalyzer, TiCScriptEngine, TiCScriptError,
    TiCScriptFunction,
};
pub use value::{TiCScriptFunctionRef, TiCScriptObject, TiCScriptValue};
