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

//! # Tix Analysis Tests - Dependency
//!
//! This module contains tests for dependency tracking across a compiled
//! index: referenced collections per source collection, compare-exchange
//! usage, and the inverse lookup used for invalidation.
//!
//! ## Test Categories
//!
//! - **Union Tests**: Verify references are unioned per owning collection
//! - **Compare-Exchange Tests**: Verify the compare-exchange collection set
//! - **Inverse Tests**: Verify which owners a changed collection affects
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test dependency
//! ```

#![allow(non_snake_case)]

#[path = "../support/mod.rs"]
mod support;

use std::collections::HashSet;

use support::{opaque, text, TiCTAnalyzer, TiCTEngine};
use tix::{TiCCompilerConfig, TiCIndexDefinition, TiCMapMetadata, TiFCompileIndex};

const ORDERS_BY_PRODUCT: &str = "map('Orders', 'Totals', byProduct)";
const ORDERS_BY_CUSTOMER: &str = "map('Orders', 'Totals', byCustomer)";
const CARTS: &str = "map('Carts', byProduct)";
const PRICES: &str = "map('Prices', 'Ticks', cmpxchg)";

fn engine() -> TiCTEngine {
    TiCTEngine::default()
        .with(ORDERS_BY_PRODUCT, vec![text("Orders"), text("Totals"), opaque("byProduct")])
        .with(ORDERS_BY_CUSTOMER, vec![text("Orders"), text("Totals"), opaque("byCustomer")])
        .with(CARTS, vec![text("Carts"), opaque("byProduct")])
        .with(PRICES, vec![text("Prices"), text("Ticks"), opaque("cmpxchg")])
}

fn analyzer() -> TiCTAnalyzer {
    TiCTAnalyzer::default()
        .with("byProduct", TiCMapMetadata::TiFReferencing(["Products"]))
        .with("byCustomer", TiCMapMetadata::TiFReferencing(["Customers", "Products"]))
        .with("cmpxchg", TiCMapMetadata::TiFNew().TiFWithCompareExchange(true))
}

fn definition() -> TiCIndexDefinition {
    TiCIndexDefinition::TiFNew("Sales")
        .TiFAddMap(&format!("timeSeries.{ORDERS_BY_PRODUCT}"))
        .TiFAddMap(&format!("timeSeries.{ORDERS_BY_CUSTOMER}"))
        .TiFAddMap(&format!("timeSeries.{CARTS}"))
        .TiFAddMap(&format!("timeSeries.{PRICES}"))
}

fn set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Tests that referenced collections are unioned over all maps of a collection.
#[test]
fn TiFTReferencesAreUnionedPerCollection() {
    let registry = TiFCompileIndex(
        &mut engine(),
        &analyzer(),
        &TiCCompilerConfig::default(),
        &definition(),
    )
    .unwrap();

    assert_eq!(
        registry.TiFGetReferencedCollections("Orders"),
        set(&["Products", "Customers"])
    );
    assert_eq!(registry.TiFGetReferencedCollections("Carts"), set(&["Products"]));
    assert!(registry.TiFGetReferencedCollections("Prices").is_empty());
    assert!(registry.TiFGetReferencedCollections("Products").is_empty());
}

/// Tests that compare-exchange usage is tracked per owning collection.
#[test]
fn TiFTCompareExchangeIsTrackedPerCollection() {
    let registry = TiFCompileIndex(
        &mut engine(),
        &analyzer(),
        &TiCCompilerConfig::default(),
        &definition(),
    )
    .unwrap();

    assert!(registry.TiFCollectionUsesCompareExchange("Prices"));
    assert!(!registry.TiFCollectionUsesCompareExchange("Orders"));
    assert_eq!(
        registry.TiFDependencies().TiFCollectionsWithCompareExchange(),
        vec!["Prices".to_string()]
    );
}

/// Tests that a changed collection maps back to its affected owners.
#[test]
fn TiFTChangedCollectionMapsToAffectedOwners() {
    let registry = TiFCompileIndex(
        &mut engine(),
        &analyzer(),
        &TiCCompilerConfig::default(),
        &definition(),
    )
    .unwrap();
    let dependencies = registry.TiFDependencies();

    assert_eq!(
        dependencies.TiFCollectionsAffectedBy("Products"),
        vec!["Carts".to_string(), "Orders".to_string()]
    );
    assert_eq!(
        dependencies.TiFCollectionsAffectedBy("Customers"),
        vec!["Orders".to_string()]
    );
    assert!(dependencies.TiFCollectionsAffectedBy("Orders").is_empty());
}

/// Tests that every collection with a map has a dependency entry.
#[test]
fn TiFTEveryMappedCollectionHasAnEntry() {
    let registry = TiFCompileIndex(
        &mut engine(),
        &analyzer(),
        &TiCCompilerConfig::default(),
        &definition(),
    )
    .unwrap();

    let mut owners: Vec<&String> = registry.TiFDependencies().TiFReferencedMap().keys().collect();
    owners.sort();
    assert_eq!(owners, vec!["Carts", "Orders", "Prices"]);
}
