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
use form_model::field::localized_variant;
use form_model::schema::CollectionSchema;

/// The two derived field lists, before fragment assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedFieldSets {
    /// Fields to load to populate the form.
    pub query_fields: Vec<String>,
    /// Fields to ask back from the create/update mutation.
    pub mutation_fields: Vec<String>,
}

/// Derives the query and mutation field sets from a schema.
///
/// A new form queries the creatable fields and asks the mutation for
/// everything creatable or readable (the server may derive viewable fields
/// the client never submits). An edit form queries the updatable fields and
/// asks the mutation for everything creatable or updatable.
///
/// A non-empty `fields` allow-list (expanded with localized variants) narrows
/// both sets; it never adds fields. `add_fields` entries are appended to both
/// sets unconditionally.
pub fn derive_field_sets(
    schema: &CollectionSchema,
    mode: FormMode,
    fields: Option<&[String]>,
    add_fields: &[String],
) -> DerivedFieldSets {
    let readable = schema.readable_fields();
    let creatable = schema.creatable_fields();
    let updatable = schema.updatable_fields();

    let mut query_fields = match mode {
        FormMode::New => creatable.clone(),
        FormMode::Edit => updatable.clone(),
    };
    let mut mutation_fields: Vec<String> = match mode {
        FormMode::New => unique(creatable.into_iter().chain(readable)),
        FormMode::Edit => unique(creatable.into_iter().chain(updatable)),
    };

    if let Some(fields) = fields {
        let allowed: IndexSet<String> = fields
            .iter()
            .cloned()
            .chain(fields.iter().map(|field| localized_variant(field)))
            .collect();
        query_fields.retain(|field| allowed.contains(field));
        mutation_fields.retain(|field| allowed.contains(field));
    }

    query_fields.extend(add_fields.iter().cloned());
    mutation_fields.extend(add_fields.iter().cloned());

    DerivedFieldSets {
        query_fields,
        mutation_fields,
    }
}

/// De-duplicates preserving first occurrence.
fn unique(fields: impl Iterator<Item = String>) -> Vec<String> {
    fields.collect::<IndexSet<_>>().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_model::field::FieldAccess;

    fn post_schema() -> CollectionSchema {
        CollectionSchema::new()
            .with_field("_id", FieldAccess::read_only())
            .with_field("title", FieldAccess::read_write())
            .with_field(
                "draft",
                FieldAccess {
                    readable: false,
                    creatable: true,
                    updatable: true,
                },
            )
            .with_field("authorId", FieldAccess::read_only())
    }

    #[test]
    fn new_form_sets() {
        let sets = derive_field_sets(&post_schema(), FormMode::New, None, &[]);

        // query side: creatable fields only, no readable-only fields
        assert_eq!(vec!["title", "draft"], sets.query_fields);
        // mutation side: creatable then readable, first occurrence wins
        assert_eq!(
            vec!["title", "draft", "_id", "authorId"],
            sets.mutation_fields
        );
    }

    #[test]
    fn edit_form_sets() {
        let sets = derive_field_sets(&post_schema(), FormMode::Edit, None, &[]);

        assert_eq!(vec!["title", "draft"], sets.query_fields);
        assert_eq!(vec!["title", "draft"], sets.mutation_fields);
    }

    #[test]
    fn allow_list_narrows_but_never_expands() {
        let fields = vec!["title".to_string(), "authorId".to_string()];
        let sets = derive_field_sets(&post_schema(), FormMode::Edit, Some(&fields), &[]);

        // draft is updatable but excluded; authorId is allowed but not updatable
        assert_eq!(vec!["title"], sets.query_fields);
        assert_eq!(vec!["title"], sets.mutation_fields);
    }

    #[test]
    fn allow_list_admits_localized_variants() {
        let schema = CollectionSchema::new()
            .with_field("title", FieldAccess::read_write())
            .with_localized_field("title", FieldAccess::read_write());

        let fields = vec!["title".to_string()];
        let sets = derive_field_sets(&schema, FormMode::New, Some(&fields), &[]);

        assert_eq!(vec!["title", "title_intl"], sets.query_fields);
    }

    #[test]
    fn add_fields_bypass_the_allow_list() {
        let fields = vec!["title".to_string()];
        let add_fields = vec!["wordCount".to_string()];
        let sets = derive_field_sets(&post_schema(), FormMode::New, Some(&fields), &add_fields);

        // wordCount is absent from the schema entirely, yet appears in both sets
        assert_eq!(vec!["title", "wordCount"], sets.query_fields);
        assert_eq!(vec!["title", "wordCount"], sets.mutation_fields);
    }

    #[test]
    fn empty_schema_yields_empty_sets() {
        let sets = derive_field_sets(&CollectionSchema::new(), FormMode::New, None, &[]);
        assert!(sets.query_fields.is_empty());
        assert!(sets.mutation_fields.is_empty());
    }
}
