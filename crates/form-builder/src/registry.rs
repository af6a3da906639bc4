// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Write;

use async_graphql_parser::parse_query;
use async_graphql_parser::types::{FragmentDefinition, Selection, SelectionSet};
use indexmap::IndexMap;
use tracing::warn;

use crate::error::FormBuildingError;

/// A fragment known by name, usable as a synthesis override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredFragment {
    pub name: String,
    /// The type the fragment applies to.
    pub type_condition: String,
    /// Canonical text form, re-rendered from the parsed definition.
    pub source: String,
}

/// Named fragments available as overrides, keyed by fragment name.
///
/// An owned value handed to the synthesizer; there is no process-wide table.
#[derive(Debug, Clone, Default)]
pub struct FragmentRegistry {
    fragments: IndexMap<String, RegisteredFragment>,
}

impl FragmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `source` and registers every fragment definition in it,
    /// returning the registered names. Re-registering a name overwrites the
    /// earlier definition.
    pub fn register(&mut self, source: &str) -> Result<Vec<String>, FormBuildingError> {
        let document = parse_query(source)?;
        if document.fragments.is_empty() {
            return Err(FormBuildingError::MissingFragmentDefinition);
        }

        let mut names = Vec::with_capacity(document.fragments.len());
        for (name, fragment) in document.fragments {
            let name = name.to_string();
            if self.fragments.contains_key(&name) {
                warn!(fragment = %name, "Re-registering fragment; earlier definition replaced");
            }
            let registered = RegisteredFragment {
                name: name.clone(),
                type_condition: fragment.node.type_condition.node.on.node.to_string(),
                source: render_fragment(&name, &fragment.node),
            };
            self.fragments.insert(name.clone(), registered);
            names.push(name);
        }
        Ok(names)
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredFragment> {
        self.fragments.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fragments.keys().map(String::as_str)
    }
}

/// Renders a parsed fragment back to canonical text (two-space indent,
/// directives dropped).
pub(crate) fn render_fragment(name: &str, fragment: &FragmentDefinition) -> String {
    let mut out = format!(
        "fragment {name} on {} {{\n",
        fragment.type_condition.node.on.node
    );
    render_selection_set(&fragment.selection_set.node, 1, &mut out);
    out.push('}');
    out
}

fn render_selection_set(selection_set: &SelectionSet, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for selection in &selection_set.items {
        match &selection.node {
            Selection::Field(field) => {
                let field = &field.node;
                out.push_str(&indent);
                if let Some(alias) = &field.alias {
                    let _ = write!(out, "{}: ", alias.node);
                }
                out.push_str(field.name.node.as_str());
                if !field.arguments.is_empty() {
                    out.push('(');
                    for (index, (name, value)) in field.arguments.iter().enumerate() {
                        if index > 0 {
                            out.push_str(", ");
                        }
                        let _ = write!(out, "{}: {}", name.node, value.node);
                    }
                    out.push(')');
                }
                if field.selection_set.node.items.is_empty() {
                    out.push('\n');
                } else {
                    out.push_str(" {\n");
                    render_selection_set(&field.selection_set.node, depth + 1, out);
                    let _ = writeln!(out, "{indent}}}");
                }
            }
            Selection::FragmentSpread(spread) => {
                let _ = writeln!(out, "{indent}...{}", spread.node.fragment_name.node);
            }
            Selection::InlineFragment(inline) => {
                out.push_str(&indent);
                match &inline.node.type_condition {
                    Some(condition) => {
                        let _ = write!(out, "... on {}", condition.node.on.node);
                    }
                    None => out.push_str("..."),
                }
                out.push_str(" {\n");
                render_selection_set(&inline.node.selection_set.node, depth + 1, out);
                let _ = writeln!(out, "{indent}}}");
            }
        }
    }
}
