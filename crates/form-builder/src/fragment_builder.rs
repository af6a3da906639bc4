// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexSet;

use form_model::document::FormMode;
use form_model::field::ID_FIELD;
use form_model::selection::{FieldSelection, FormFragment};

use crate::naming::ToFormFragmentNames;

/// Which side of the form a fragment serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentRole {
    Query,
    Mutation,
}

impl FragmentRole {
    pub fn suffix(&self) -> &'static str {
        match self {
            FragmentRole::Query => "Query",
            FragmentRole::Mutation => "Mutation",
        }
    }
}

/// Assembles a structured fragment from a derived field list.
///
/// The identifier field always comes first, each field appears exactly once,
/// and localized names expand to their sub-selection.
pub fn build_form_fragment(
    type_name: &str,
    mode: FormMode,
    role: FragmentRole,
    field_names: &[String],
) -> FormFragment {
    let mut fields: IndexSet<&str> = IndexSet::with_capacity(field_names.len() + 1);
    fields.insert(ID_FIELD);
    fields.extend(field_names.iter().map(String::as_str));

    let name = match role {
        FragmentRole::Query => type_name.query_fragment_name(mode),
        FragmentRole::Mutation => type_name.mutation_fragment_name(mode),
    };

    FormFragment {
        name,
        type_condition: type_name.to_owned(),
        selections: fields.into_iter().map(FieldSelection::for_field).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_first_and_deduplicated() {
        let fields = vec![
            "title".to_string(),
            "_id".to_string(),
            "title".to_string(),
            "draft".to_string(),
        ];
        let fragment =
            build_form_fragment("Post", FormMode::New, FragmentRole::Query, &fields);

        assert_eq!("PostNewFormFragmentQuery", fragment.name);
        assert_eq!("Post", fragment.type_condition);
        let names: Vec<_> = fragment
            .selections
            .iter()
            .map(FieldSelection::name)
            .collect();
        assert_eq!(vec!["_id", "title", "draft"], names);
    }

    #[test]
    fn identifier_present_even_for_empty_field_list() {
        let fragment =
            build_form_fragment("Comment", FormMode::Edit, FragmentRole::Mutation, &[]);

        assert_eq!("CommentEditFormFragmentMutation", fragment.name);
        assert_eq!(1, fragment.selections.len());
        assert_eq!("_id", fragment.selections[0].name());
    }

    #[test]
    fn localized_fields_expand() {
        let fields = vec!["title_intl".to_string()];
        let fragment =
            build_form_fragment("Post", FormMode::New, FragmentRole::Query, &fields);

        assert_eq!(
            FieldSelection::Localized("title_intl".to_string()),
            fragment.selections[1]
        );
    }
}
