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

//! # Function Declaration AST
//!
//! The syntax a script engine exposes for a compiled function: its parameter
//! list and its body. Only the constructs static analysis inspects are
//! modelled; everything else collapses into an `Other` variant, which every
//! analysis treats conservatively.
//!
//! An arrow function with an expression body (`x => x.Value`) is represented
//! with [`TiCFunctionBody::Expression`] and is equivalent to a block holding a
//! single `return` of that expression.

#[derive(Clone, Debug, PartialEq)]
pub struct TiCFunctionAst {
    pub params: Vec<TiCPattern>,
    pub body: TiCFunctionBody,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TiCPattern {
    /// A plain named parameter.
    Identifier(String),
    /// `{ a, b }` or `[a, b]` destructuring.
    Destructured,
    /// Rest, default-valued, or any other parameter form.
    Other,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TiCFunctionBody {
    Block(Vec<TiCStatement>),
    Expression(TiCExpression),
}

#[derive(Clone, Debug, PartialEq)]
pub enum TiCStatement {
    Return(Option<TiCExpression>),
    Expression(TiCExpression),
    Declaration {
        name: String,
        init: Option<TiCExpression>,
    },
    If {
        test: TiCExpression,
        consequent: Vec<TiCStatement>,
        alternate: Vec<TiCStatement>,
    },
    Block(Vec<TiCStatement>),
    Loop(Vec<TiCStatement>),
    Other,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TiCExpression {
    Identifier(String),
    /// Literal source text, e.g. `1`, `'abc'`, `null`.
    Literal(String),
    Member {
        object: Box<TiCExpression>,
        property: TiCMemberProperty,
    },
    Call {
        callee: Box<TiCExpression>,
        arguments: Vec<TiCExpression>,
    },
    Object(Vec<TiCProperty>),
    Binary {
        operator: String,
        left: Box<TiCExpression>,
        right: Box<TiCExpression>,
    },
    Function(Box<TiCFunctionAst>),
    Other,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TiCMemberProperty {
    /// `object.name`
    Name(String),
    /// `object[expr]`
    Computed(Box<TiCExpression>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum TiCProperty {
    Init {
        key: TiCPropertyKey,
        value: TiCExpression,
    },
    Spread(TiCExpression),
}

#[derive(Clone, Debug, PartialEq)]
pub enum TiCPropertyKey {
    /// Identifier or string-literal key.
    Name(String),
    Computed(Box<TiCExpression>),
}

impl TiCFunctionAst {
    /// `(p0, p1, ..) => expression`
    #[allow(non_snake_case)]
    pub fn TiFArrow(params: &[&str], body: TiCExpression) -> Self {
        Self {
            params: params
                .iter()
                .map(|p| TiCPattern::Identifier(p.to_string()))
                .collect(),
            body: TiCFunctionBody::Expression(body),
        }
    }

    /// `function (p0, p1, ..) { statements }`
    #[allow(non_snake_case)]
    pub fn TiFBlock(params: &[&str], statements: Vec<TiCStatement>) -> Self {
        Self {
            params: params
                .iter()
                .map(|p| TiCPattern::Identifier(p.to_string()))
                .collect(),
            body: TiCFunctionBody::Block(statements),
        }
    }
}

impl TiCExpression {
    #[allow(non_snake_case)]
    pub fn TiFIdent(name: &str) -> Self {
        TiCExpression::Identifier(name.to_string())
    }

    /// `object.property`
    #[allow(non_snake_case)]
    pub fn TiFMember(object: TiCExpression, property: &str) -> Self {
        TiCExpression::Member {
            object: Box::new(object),
            property: TiCMemberProperty::Name(property.to_string()),
        }
    }

    /// `callee(arguments..)`
    #[allow(non_snake_case)]
    pub fn TiFCall(callee: TiCExpression, arguments: Vec<TiCExpression>) -> Self {
        TiCExpression::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// `{ key: value, .. }` with plain keys.
    #[allow(non_snake_case)]
    pub fn TiFObject(properties: Vec<(&str, TiCExpression)>) -> Self {
        TiCExpression::Object(
            properties
                .into_iter()
                .map(|(key, value)| TiCProperty::Init {
                    key: TiCPropertyKey::Name(key.to_string()),
                    value,
                })
                .collect(),
        )
    }
}
