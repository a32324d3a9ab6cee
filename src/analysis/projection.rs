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

//! # Static Field-Projection Analyzer
//!
//! Syntax-only inspection of compiled map functions. Two results are derived:
//!
//! - a **field hint** when the function is exactly `p => p.Field` (or the
//!   block form `function (p) { return p.Field; }`), which lets the indexing
//!   pipeline read the field directly instead of invoking the script;
//! - a **return shape**: the property names of object-literal returns and
//!   whether any return is dynamic or boosted.
//!
//! Both are best-effort hints. Absence of a hint is never an error.

use serde::{Deserialize, Serialize};

use crate::script::{
    TiCExpression, TiCFunctionAst, TiCFunctionBody, TiCMemberProperty, TiCPattern, TiCProperty,
    TiCPropertyKey, TiCStatement,
};

/// Property name that marks a return as producing dynamic fields.
pub const DYNAMIC_FIELD_PROPERTY: &str = "_";

/// Name of the boost helper available to map scripts.
pub const BOOST_FUNCTION: &str = "boost";

/// What a map function's return statements produce.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiCMapShape {
    /// Statically known output field names, in first-seen order.
    pub fields: Vec<String>,
    pub has_dynamic_returns: bool,
    pub has_boosted_fields: bool,
}

impl TiCMapShape {
    /// Shape of a function whose body cannot be inspected.
    #[allow(non_snake_case)]
    pub fn TiFUnknown() -> Self {
        Self {
            fields: Vec::new(),
            has_dynamic_returns: true,
            has_boosted_fields: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TiCFieldProjectionAnalyzer;

impl TiCFieldProjectionAnalyzer {
    /// Returns `Field` iff the function has exactly one plain parameter `p`
    /// and its body is exactly `return p.Field`.
    #[allow(non_snake_case)]
    pub fn TiFFieldHint(function: &TiCFunctionAst) -> Option<String> {
        let [TiCPattern::Identifier(param)] = function.params.as_slice() else {
            return None;
        };

        let returned = match &function.body {
            TiCFunctionBody::Expression(expression) => expression,
            TiCFunctionBody::Block(statements) => match statements.as_slice() {
                [TiCStatement::Return(Some(expression))] => expression,
                _ => return None,
            },
        };

        let TiCExpression::Member {
            object,
            property: TiCMemberProperty::Name(field),
        } = returned
        else {
            return None;
        };

        match object.as_ref() {
            TiCExpression::Identifier(reference) if reference == param => Some(field.clone()),
            _ => None,
        }
    }

    /// Walks every return statement of the function (nested functions are
    /// not entered) and summarizes what they produce.
    #[allow(non_snake_case)]
    pub fn TiFShape(function: &TiCFunctionAst) -> TiCMapShape {
        let mut returns: Vec<Option<&TiCExpression>> = Vec::new();
        match &function.body {
            TiCFunctionBody::Expression(expression) => returns.push(Some(expression)),
            TiCFunctionBody::Block(statements) => collect_returns(statements, &mut returns),
        }

        let mut shape = TiCMapShape::default();
        for returned in returns {
            let Some(TiCExpression::Object(properties)) = returned else {
                shape.has_dynamic_returns = true;
                continue;
            };

            for property in properties {
                match property {
                    TiCProperty::Init {
                        key: TiCPropertyKey::Name(name),
                        value,
                    } => {
                        if name == DYNAMIC_FIELD_PROPERTY {
                            shape.has_dynamic_returns = true;
                        }
                        if !shape.fields.contains(name) {
                            shape.fields.push(name.clone());
                        }
                        if is_boost(value) {
                            shape.has_boosted_fields = true;
                        }
                    }
                    TiCProperty::Init {
                        key: TiCPropertyKey::Computed(_),
                        ..
                    }
                    | TiCProperty::Spread(_) => shape.has_dynamic_returns = true,
                }
            }
        }

        shape
    }
}

fn collect_returns<'a>(statements: &'a [TiCStatement], out: &mut Vec<Option<&'a TiCExpression>>) {
    for statement in statements {
        match statement {
            TiCStatement::Return(argument) => out.push(argument.as_ref()),
            TiCStatement::If {
                consequent,
                alternate,
                ..
            } => {
                collect_returns(consequent, out);
                collect_returns(alternate, out);
            }
            TiCStatement::Block(inner) | TiCStatement::Loop(inner) => collect_returns(inner, out),
            TiCStatement::Expression(_) | TiCStatement::Declaration { .. } | TiCStatement::Other => {}
        }
    }
}

fn is_boost(value: &TiCExpression) -> bool {
    matches!(
        value,
        TiCExpression::Call { callee, .. }
            if matches!(callee.as_ref(), TiCExpression::Identifier(name) if name == BOOST_FUNCTION)
    )
}
