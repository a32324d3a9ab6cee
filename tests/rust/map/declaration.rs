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

//! # Tix Map Tests - Declaration
//!
//! This module contains tests for the map declaration adapter, which turns
//! the 1-, 2- and 3-argument `map(...)` forms into one canonical call.
//!
//! ## Test Categories
//!
//! - **Arity Tests**: Verify slot filling by argument count and sentinel defaults
//! - **Slot Validation Tests**: Verify wrong-typed slots report their own error kind
//! - **Prefix Tests**: Verify namespace prefix stripping
//! - **Property Tests**: Verify extra arguments survive normalization in order
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test declaration
//! ```

#![allow(non_snake_case)]

#[path = "../support/mod.rs"]
mod support;

use proptest::prelude::*;

use support::{opaque, projection, text};
use tix::config::{ALL_DOCUMENTS_COLLECTION, ALL_SUB_KEYS};
use tix::map::declaration::{MAPS_PROPERTY, MORE_ARGS_PROPERTY};
use tix::{TiCCompilerConfig, TiCDefinitionsBuilder, TiCMapDeclarationAdapter, TiCScriptValue, TiError};

fn adapter() -> TiCMapDeclarationAdapter {
    TiCMapDeclarationAdapter::TiFNew("HeartRates", TiCCompilerConfig::default())
}

/// Tests that a 3-argument declaration passes through unchanged.
#[test]
fn TiFTThreeArgumentsPassThrough() {
    let call = adapter()
        .TiFNormalize(0, vec![text("Users"), text("HeartRate"), projection("f", "Value")])
        .unwrap();

    assert_eq!(call.collection, "Users");
    assert_eq!(call.sub_key, "HeartRate");
    assert_eq!(call.function.name(), "f");
    assert!(call.extra_arguments.is_empty());
    assert!(!call.sub_key_defaulted);
}

/// Tests that a 2-argument declaration defaults the sub-key.
#[test]
fn TiFTTwoArgumentsDefaultSubKey() {
    let call = adapter()
        .TiFNormalize(0, vec![text("Users"), projection("f", "Value")])
        .unwrap();

    assert_eq!(call.collection, "Users");
    assert_eq!(call.sub_key, ALL_SUB_KEYS);
    assert!(call.sub_key_defaulted);
}

/// Tests that a 1-argument declaration defaults both collection and sub-key.
#[test]
fn TiFTOneArgumentDefaultsBothSlots() {
    let call = adapter().TiFNormalize(0, vec![projection("f", "Value")]).unwrap();

    assert_eq!(call.collection, ALL_DOCUMENTS_COLLECTION);
    assert_eq!(call.sub_key, ALL_SUB_KEYS);
}

/// Tests that configured sentinels replace the defaults.
#[test]
fn TiFTConfiguredSentinelsAreUsed() {
    let config = TiCCompilerConfig::TiFNew()
        .TiFAllCollections("*")
        .TiFAllSubKeys("All");
    let adapter = TiCMapDeclarationAdapter::TiFNew("idx", config);

    let call = adapter.TiFNormalize(0, vec![opaque("f")]).unwrap();
    assert_eq!(call.collection, "*");
    assert_eq!(call.sub_key, "All");
}

/// Tests that an empty call is a malformed declaration at its position.
#[test]
fn TiFTNoArgumentsIsMalformed() {
    let err = adapter().TiFNormalize(2, Vec::new()).unwrap_err();
    assert!(matches!(err, TiError::MalformedDeclaration { position: 2, .. }));
}

/// Tests that more than three arguments keep the three-slot form.
///
/// Verifies that a fourth argument cannot move the function into another slot.
#[test]
fn TiFTExtraArgumentsKeepThreeSlotForm() {
    let err = adapter()
        .TiFNormalize(0, vec![text("a"), text("b"), text("c"), opaque("f")])
        .unwrap_err();
    assert!(matches!(err, TiError::MissingOrInvalidFunction { .. }));

    let call = adapter()
        .TiFNormalize(0, vec![text("Users"), text("HeartRate"), opaque("f"), text("extra")])
        .unwrap();
    assert_eq!(call.sub_key, "HeartRate");
    assert_eq!(call.extra_arguments, vec![text("extra")]);
}

/// Tests that a non-callable third argument reports the function slot.
#[test]
fn TiFTThreeArgumentsWithoutFunctionReportsFunction() {
    let err = adapter()
        .TiFNormalize(1, vec![text("Users"), text("HeartRate"), text("not a function")])
        .unwrap_err();
    assert!(matches!(err, TiError::MissingOrInvalidFunction { position: 1, .. }));
}

/// Tests that a function in the sub-key slot is reported as a bad sub-key.
///
/// Verifies that `map('Users', f, 'HeartRate')` is not silently reordered.
#[test]
fn TiFTSwappedSubKeyAndFunctionReportsSubKey() {
    let err = adapter()
        .TiFNormalize(0, vec![text("Users"), opaque("f"), text("HeartRate")])
        .unwrap_err();
    assert!(matches!(err, TiError::MissingOrInvalidSubKey { position: 0, .. }));
}

/// Tests that a function in the collection slot is reported as a bad collection.
///
/// Verifies that `map(f, 'Users')` is not read as a 1-argument form.
#[test]
fn TiFTFunctionFirstOfTwoReportsCollection() {
    let err = adapter()
        .TiFNormalize(0, vec![opaque("f"), text("Users")])
        .unwrap_err();
    assert!(matches!(err, TiError::MissingOrInvalidCollection { position: 0, .. }));
}

/// Tests that a non-string collection reports the collection slot.
#[test]
fn TiFTNonStringCollectionReportsCollection() {
    let err = adapter()
        .TiFNormalize(0, vec![TiCScriptValue::Number(42.0), opaque("f")])
        .unwrap_err();
    assert!(matches!(err, TiError::MissingOrInvalidCollection { .. }));
}

/// Tests that a non-string sub-key reports the sub-key slot.
#[test]
fn TiFTNonStringSubKeyReportsSubKey() {
    let err = adapter()
        .TiFNormalize(0, vec![text("Users"), TiCScriptValue::Null, opaque("f")])
        .unwrap_err();
    assert!(matches!(err, TiError::MissingOrInvalidSubKey { .. }));
}

/// Tests that an explicit sub-key equal to the sentinel is rejected.
///
/// Verifies that only the adapter may place a map in the wildcard bucket.
#[test]
fn TiFTExplicitSentinelSubKeyIsReserved() {
    let err = adapter()
        .TiFNormalize(0, vec![text("Users"), text(ALL_SUB_KEYS), opaque("explicit")])
        .unwrap_err();
    assert!(matches!(err, TiError::MissingOrInvalidSubKey { position: 0, .. }));
    assert!(err.to_string().contains("reserved"));

    let wildcard = adapter()
        .TiFNormalize(1, vec![text("Users"), opaque("wildcard")])
        .unwrap();
    assert_eq!(wildcard.sub_key, ALL_SUB_KEYS);
}

/// Tests that the adapter strips the configured prefix case-insensitively.
#[test]
fn TiFTAdapterStripsConfiguredPrefix() {
    let adapter = adapter();
    assert_eq!(
        adapter.TiFStripPrefix("TimeSeries.map('Users', f)"),
        "map('Users', f)"
    );
    assert_eq!(adapter.TiFStripPrefix("map('Users', f)"), "map('Users', f)");
}

/// Tests that the definitions builder records one entry per call.
///
/// Verifies that empty calls still occupy their position as a `null` entry.
#[test]
fn TiFTDefinitionsBuilderCollectsEveryCall() {
    let mut builder = TiCDefinitionsBuilder::TiFNew(adapter());
    builder.TiFDeclare(vec![text("Users"), text("HeartRate"), opaque("f"), text("extra")]);
    builder.TiFDeclare(Vec::new());
    assert_eq!(builder.TiFMapCount(), 2);

    let definitions = builder.TiFFinish();
    let maps = definitions
        .TiFGetProperty(MAPS_PROPERTY)
        .and_then(|v| v.TiFAsArray())
        .unwrap();

    assert_eq!(
        maps[0].TiFGetProperty(MORE_ARGS_PROPERTY),
        Some(&TiCScriptValue::Array(vec![text("extra")]))
    );
    assert!(maps[1].TiFIsNull());
}

fn arb_extra() -> impl Strategy<Value = TiCScriptValue> {
    prop_oneof![
        "[a-zA-Z0-9]{0,8}".prop_map(TiCScriptValue::String),
        (-1000i32..1000).prop_map(|n| TiCScriptValue::Number(n as f64)),
        any::<bool>().prop_map(TiCScriptValue::Bool),
    ]
}

proptest! {
    /// Tests that arguments after the third are preserved in order.
    #[test]
    fn TiFTExtraArgumentsArePreservedInOrder(
        extras in prop::collection::vec(arb_extra(), 0..6),
    ) {
        let mut arguments = vec![text("Users"), text("HeartRate"), opaque("f")];
        arguments.extend(extras.iter().cloned());

        let call = adapter().TiFNormalize(0, arguments).unwrap();

        prop_assert_eq!(&call.extra_arguments, &extras);
        prop_assert_eq!(call.function.name(), "f");
        prop_assert_eq!(call.collection.as_str(), "Users");
        prop_assert_eq!(call.sub_key.as_str(), "HeartRate");
    }

    /// Tests that short forms default exactly the omitted slots.
    #[test]
    fn TiFTShortFormsDefaultOmittedSlots(
        arity in 1usize..=2,
        collection in "[A-Z][a-z]{0,8}",
    ) {
        let arguments = match arity {
            1 => vec![opaque("f")],
            _ => vec![text(&collection), opaque("f")],
        };

        let call = adapter().TiFNormalize(0, arguments).unwrap();

        let expected_collection = if arity == 1 { ALL_DOCUMENTS_COLLECTION } else { collection.as_str() };
        prop_assert_eq!(call.collection.as_str(), expected_collection);
        prop_assert_eq!(call.sub_key.as_str(), ALL_SUB_KEYS);
        prop_assert!(call.extra_arguments.is_empty());
    }
}
