// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Write;

use async_graphql_parser::types::{
    Field, FragmentDefinition, Selection, SelectionSet, TypeCondition,
};
use async_graphql_parser::{Pos, Positioned};
use async_graphql_value::Name;
use serde::{Deserialize, Serialize};

use crate::field::LOCALIZED_SUFFIX;

pub fn default_positioned<T>(value: T) -> Positioned<T> {
    Positioned::new(value, Pos::default())
}

pub fn default_positioned_name(value: &str) -> Positioned<Name> {
    default_positioned(Name::new(value))
}

/// One selected field in a form fragment.
///
/// A localized field (the stored name keeps its `_intl` suffix) selects the
/// `{ locale value }` sub-object instead of a bare scalar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    Scalar(String),
    Localized(String),
}

impl FieldSelection {
    /// Classifies a field name by the localized-suffix convention.
    pub fn for_field(name: &str) -> Self {
        if name.ends_with(LOCALIZED_SUFFIX) {
            Self::Localized(name.to_owned())
        } else {
            Self::Scalar(name.to_owned())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(name) | Self::Localized(name) => name,
        }
    }

    fn write_source(&self, out: &mut String) {
        match self {
            Self::Scalar(name) => {
                let _ = writeln!(out, "  {name}");
            }
            Self::Localized(name) => {
                let _ = writeln!(out, "  {name} {{\n    locale\n    value\n  }}");
            }
        }
    }

    fn field(&self) -> Positioned<Selection> {
        let subfields = match self {
            Self::Scalar(_) => vec![],
            Self::Localized(_) => vec![scalar_field("locale"), scalar_field("value")],
        };

        default_positioned(Selection::Field(default_positioned(Field {
            alias: None,
            name: default_positioned_name(self.name()),
            arguments: vec![],
            directives: vec![],
            selection_set: default_positioned(SelectionSet { items: subfields }),
        })))
    }
}

fn scalar_field(name: &str) -> Positioned<Selection> {
    default_positioned(Selection::Field(default_positioned(Field {
        alias: None,
        name: default_positioned_name(name),
        arguments: vec![],
        directives: vec![],
        selection_set: default_positioned(SelectionSet::default()),
    })))
}

/// A structured form fragment: derivation output before any text encoding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FormFragment {
    pub name: String,
    /// The type the fragment applies to (`on <type_condition>`).
    pub type_condition: String,
    pub selections: Vec<FieldSelection>,
}

impl FormFragment {
    /// GraphQL text form of the fragment.
    pub fn source(&self) -> String {
        let mut out = format!("fragment {} on {} {{\n", self.name, self.type_condition);
        for selection in &self.selections {
            selection.write_source(&mut out);
        }
        out.push('}');
        out
    }

    /// Structured GraphQL form, for consumers that want documents rather than
    /// text. The fragment name is carried separately (`self.name`), matching
    /// the parser's representation.
    pub fn fragment_definition(&self) -> FragmentDefinition {
        FragmentDefinition {
            type_condition: default_positioned(TypeCondition {
                on: default_positioned_name(&self.type_condition),
            }),
            directives: vec![],
            selection_set: default_positioned(SelectionSet {
                items: self
                    .selections
                    .iter()
                    .map(FieldSelection::field)
                    .collect(),
            }),
        }
    }
}
