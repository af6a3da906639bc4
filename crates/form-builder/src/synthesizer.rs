// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_graphql_parser::parse_query;
use tracing::{debug, instrument, warn};

use form_model::collection::SchemaProvider;
use form_model::document::{FormFragments, FormMode, FragmentDocument};
use form_model::schema::CollectionSchema;

use crate::error::FormBuildingError;
use crate::field_sets::derive_field_sets;
use crate::fragment_builder::{build_form_fragment, FragmentRole};
use crate::registry::{render_fragment, FragmentRegistry};
use crate::request::{FormRequest, FragmentKey};

/// Derives the query and mutation fragments a form needs.
///
/// The derivation is pure, so results are memoized on the full derivation
/// input and shared across form instances; a request with a changed input
/// lands on a different key and derives fresh documents.
pub struct FragmentSynthesizer {
    schemas: Arc<dyn SchemaProvider + Send + Sync>,
    fragments: FragmentRegistry,
    cache: RwLock<HashMap<FragmentKey, Arc<FormFragments>>>,
}

impl FragmentSynthesizer {
    pub fn new(
        schemas: Arc<dyn SchemaProvider + Send + Sync>,
        fragments: FragmentRegistry,
    ) -> Self {
        Self {
            schemas,
            fragments,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn fragments(&self) -> &FragmentRegistry {
        &self.fragments
    }

    /// Computes the fragment pair for a form request.
    ///
    /// A request carrying its own schema bypasses the cache (the schema is not
    /// part of the key, and caching on the rest of the tuple would alias
    /// distinct schemas).
    #[instrument(
        name = "FragmentSynthesizer::synthesize",
        skip(self, request),
        fields(type_name = %request.type_name)
    )]
    pub fn synthesize(
        &self,
        request: &FormRequest,
    ) -> Result<Arc<FormFragments>, FormBuildingError> {
        let form_mode = request.form_mode();

        if let Some(schema) = &request.schema {
            return Ok(Arc::new(self.compute(schema, form_mode, request)?));
        }

        let key = request.fragment_key();
        {
            let cache = self.cache.read().unwrap();
            if let Some(fragments) = cache.get(&key) {
                debug!(type_name = %request.type_name, form_mode = %form_mode, "Fragment cache hit");
                return Ok(fragments.clone());
            }
        }

        let schema = self
            .schemas
            .schema(&request.type_name)
            .ok_or_else(|| FormBuildingError::UnknownType(request.type_name.clone()))?;
        let fragments = Arc::new(self.compute(schema, form_mode, request)?);

        self.cache.write().unwrap().insert(key, fragments.clone());
        Ok(fragments)
    }

    fn compute(
        &self,
        schema: &CollectionSchema,
        form_mode: FormMode,
        request: &FormRequest,
    ) -> Result<FormFragments, FormBuildingError> {
        let sets = derive_field_sets(
            schema,
            form_mode,
            request.explicit_fields(),
            &request.add_fields,
        );

        let query = self.resolve_side(
            FragmentRole::Query,
            &request.type_name,
            form_mode,
            &sets.query_fields,
            request.query_fragment.as_deref(),
            request.query_fragment_name.as_deref(),
        )?;
        let mutation = self.resolve_side(
            FragmentRole::Mutation,
            &request.type_name,
            form_mode,
            &sets.mutation_fields,
            request.mutation_fragment.as_deref(),
            request.mutation_fragment_name.as_deref(),
        )?;

        Ok(FormFragments {
            form_mode,
            query,
            mutation,
        })
    }

    /// One side of the pair: the generated fragment, unless overridden by a
    /// literal source or a registered name. The named reference wins when both
    /// are supplied.
    fn resolve_side(
        &self,
        role: FragmentRole,
        type_name: &str,
        form_mode: FormMode,
        field_names: &[String],
        literal: Option<&str>,
        named: Option<&str>,
    ) -> Result<FragmentDocument, FormBuildingError> {
        match (named, literal) {
            (Some(name), literal) => {
                if literal.is_some() {
                    warn!(
                        fragment = %name,
                        side = role.suffix(),
                        "Both a literal fragment and a fragment name supplied; using the named fragment"
                    );
                }
                let registered = self
                    .fragments
                    .get(name)
                    .ok_or_else(|| FormBuildingError::UnknownFragment(name.to_owned()))?;
                Ok(FragmentDocument {
                    name: registered.name.clone(),
                    source: registered.source.clone(),
                })
            }
            (None, Some(source)) => {
                let document = parse_query(source)?;
                match document.fragments.len() {
                    0 => Err(FormBuildingError::MissingFragmentDefinition),
                    1 => {
                        // sole entry; emptiness checked above
                        let (name, fragment) = document.fragments.into_iter().next().unwrap();
                        let name = name.to_string();
                        Ok(FragmentDocument {
                            source: render_fragment(&name, &fragment.node),
                            name,
                        })
                    }
                    n => Err(FormBuildingError::AmbiguousFragmentSource(n)),
                }
            }
            (None, None) => {
                let fragment = build_form_fragment(type_name, form_mode, role, field_names);
                Ok(FragmentDocument {
                    source: fragment.source(),
                    name: fragment.name,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    use form_model::collection::{Collection, CollectionStore};
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

    fn synthesizer() -> FragmentSynthesizer {
        let mut store = CollectionStore::new();
        store.add(Collection::new("Post", post_schema()));
        FragmentSynthesizer::new(Arc::new(store), FragmentRegistry::new())
    }

    fn with_registered(source: &str) -> FragmentSynthesizer {
        let mut store = CollectionStore::new();
        store.add(Collection::new("Post", post_schema()));
        let mut registry = FragmentRegistry::new();
        registry.register(source).unwrap();
        FragmentSynthesizer::new(Arc::new(store), registry)
    }

    #[test]
    fn new_form_documents() {
        let fragments = synthesizer()
            .synthesize(&FormRequest::new("Post"))
            .unwrap();

        assert_eq!(FormMode::New, fragments.form_mode);
        assert_eq!("PostNewFormFragmentQuery", fragments.query.name);
        assert_eq!(
            "fragment PostNewFormFragmentQuery on Post {\n  _id\n  title\n  draft\n}",
            fragments.query.source
        );
        assert_eq!(
            "fragment PostNewFormFragmentMutation on Post {\n  _id\n  title\n  draft\n  authorId\n}",
            fragments.mutation.source
        );
    }

    #[test]
    fn edit_form_with_allow_list() {
        let request = FormRequest::new("Post")
            .with_document_id("abc123")
            .with_fields(vec!["title".to_string()]);
        let fragments = synthesizer().synthesize(&request).unwrap();

        assert_eq!(FormMode::Edit, fragments.form_mode);
        // draft is updatable but narrowed away
        assert_eq!(
            "fragment PostEditFormFragmentQuery on Post {\n  _id\n  title\n}",
            fragments.query.source
        );
        assert_eq!(
            "fragment PostEditFormFragmentMutation on Post {\n  _id\n  title\n}",
            fragments.mutation.source
        );
    }

    #[test]
    fn unknown_type_fails_fast() {
        assert!(matches!(
            synthesizer().synthesize(&FormRequest::new("Wiki")),
            Err(FormBuildingError::UnknownType(name)) if name == "Wiki"
        ));
    }

    #[test]
    fn identical_requests_share_one_result() {
        let synthesizer = synthesizer();
        let a = synthesizer.synthesize(&FormRequest::new("Post")).unwrap();
        let b = synthesizer.synthesize(&FormRequest::new("Post")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let edit = synthesizer
            .synthesize(&FormRequest::new("Post").with_document_id("abc123"))
            .unwrap();
        assert!(!Arc::ptr_eq(&a, &edit));
    }

    #[test]
    fn explicit_schema_bypasses_provider_and_cache() {
        let synthesizer = synthesizer();
        let schema = CollectionSchema::new().with_field("name", FieldAccess::read_write());

        // the type is unknown to the provider, yet synthesis succeeds
        let request = FormRequest::new("Tag").with_schema(schema);
        let a = synthesizer.synthesize(&request).unwrap();
        let b = synthesizer.synthesize(&request).unwrap();

        assert_eq!(
            "fragment TagNewFormFragmentQuery on Tag {\n  _id\n  name\n}",
            a.query.source
        );
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn named_override_wins_regardless_of_schema() {
        let synthesizer =
            with_registered("fragment PostMutationOverride on Post { _id title slug }");
        let mut request = FormRequest::new("Post");
        request.mutation_fragment_name = Some("PostMutationOverride".to_string());

        let fragments = synthesizer.synthesize(&request).unwrap();
        assert_eq!("PostMutationOverride", fragments.mutation.name);
        assert_eq!(
            "fragment PostMutationOverride on Post {\n  _id\n  title\n  slug\n}",
            fragments.mutation.source
        );
        // the query side is untouched
        assert_eq!("PostNewFormFragmentQuery", fragments.query.name);
    }

    #[test]
    fn unknown_named_override_is_rejected() {
        let mut request = FormRequest::new("Post");
        request.query_fragment_name = Some("Nope".to_string());

        assert!(matches!(
            synthesizer().synthesize(&request),
            Err(FormBuildingError::UnknownFragment(name)) if name == "Nope"
        ));
    }

    #[test]
    fn literal_override_replaces_one_side() {
        let mut request = FormRequest::new("Post");
        request.query_fragment =
            Some("fragment MyPostQuery on Post { _id title }".to_string());

        let fragments = synthesizer().synthesize(&request).unwrap();
        assert_eq!("MyPostQuery", fragments.query.name);
        assert_eq!(
            "fragment MyPostQuery on Post {\n  _id\n  title\n}",
            fragments.query.source
        );
        assert_eq!("PostNewFormFragmentMutation", fragments.mutation.name);
    }

    #[test]
    fn literal_override_must_hold_exactly_one_fragment() {
        let mut request = FormRequest::new("Post");
        request.query_fragment = Some("query { posts { _id } }".to_string());
        assert!(matches!(
            synthesizer().synthesize(&request),
            Err(FormBuildingError::MissingFragmentDefinition)
        ));

        let mut request = FormRequest::new("Post");
        request.query_fragment = Some(
            "fragment A on Post { _id } fragment B on Post { _id }".to_string(),
        );
        assert!(matches!(
            synthesizer().synthesize(&request),
            Err(FormBuildingError::AmbiguousFragmentSource(2))
        ));
    }

    #[test]
    fn named_override_beats_literal_on_conflict() {
        let synthesizer = with_registered("fragment Registered on Post { _id }");
        let mut request = FormRequest::new("Post");
        request.query_fragment = Some("fragment Literal on Post { _id title }".to_string());
        request.query_fragment_name = Some("Registered".to_string());

        let fragments = synthesizer.synthesize(&request).unwrap();
        assert_eq!("Registered", fragments.query.name);
    }

    #[test]
    fn localized_fields_render_as_sub_selections() {
        let mut store = CollectionStore::new();
        store.add(Collection::new(
            "Post",
            CollectionSchema::new()
                .with_field("title", FieldAccess::read_write())
                .with_localized_field("title", FieldAccess::read_write()),
        ));
        let synthesizer = FragmentSynthesizer::new(Arc::new(store), FragmentRegistry::new());

        let fragments = synthesizer.synthesize(&FormRequest::new("Post")).unwrap();
        let expected = r#"fragment PostNewFormFragmentQuery on Post {
  _id
  title
  title_intl {
    locale
    value
  }
}"#;
        assert_eq!(expected, fragments.query.source);
    }

    #[test]
    fn add_fields_appear_without_schema_backing() {
        let request =
            FormRequest::new("Post").with_add_fields(vec!["wordCount".to_string()]);
        let fragments = synthesizer().synthesize(&request).unwrap();

        assert!(fragments.query.source.contains("wordCount"));
        assert!(fragments.mutation.source.contains("wordCount"));
    }
}
