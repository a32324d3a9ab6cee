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

//! # Map Module
//!
//! From `map(...)` calls to a grouped registry of executable map operations.
//!
//! - **Declaration** ([declaration.rs](declaration/index.html)): arity
//!   normalization, definitions entries, namespace prefix stripping
//! - **Operation** ([operation.rs](operation/index.html)): the compiled unit
//!   of work
//! - **Registry** ([registry.rs](registry/index.html)): validation and
//!   collection/sub-key grouping

pub mod declaration;
pub mod operation;
pub mod registry;

pub use declaration::{
    TiCCanonicalMapCall, TiCDeclarationArity, TiCDefinitionsBuilder, TiCMapDeclarationAdapter,
};
pub use operation::TiCMapOperation;
pub use registry::{TiCCollectionFunctionTable, TiCMapRegistry, TiCMapRegistryBuilder};
