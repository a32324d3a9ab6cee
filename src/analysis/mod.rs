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

//! # Analysis Module
//!
//! Compile-time analysis attached to map operations while a registry is built.
//!
//! - **Projection** ([projection.rs](projection/index.html)): single-field
//!   projection hints and return shapes, read from function syntax
//! - **Dependency** ([dependency.rs](dependency/index.html)): referenced
//!   collections and compare-exchange usage per source collection

pub mod dependency;
pub mod projection;

pub use dependency::TiCDependencyTracker;
pub use projection::{TiCFieldProjectionAnalyzer, TiCMapShape};
