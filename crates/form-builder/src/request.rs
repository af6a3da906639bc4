// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use form_model::document::FormMode;
use form_model::schema::CollectionSchema;

/// Everything a form instance supplies to drive fragment synthesis.
///
/// Created once per form instantiation and not mutated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FormRequest {
    pub type_name: String,

    /// Presence of either makes this an edit form.
    pub document_id: Option<String>,
    pub slug: Option<String>,

    /// Explicit allow-list: the derived field sets are narrowed to these
    /// fields (plus their localized variants). An empty list means no
    /// narrowing, same as absent.
    pub fields: Option<Vec<String>>,

    /// Caller-trusted extra fields appended to both sides, bypassing the
    /// allow-list (e.g. computed fields the UI needs).
    pub add_fields: Vec<String>,

    /// Explicit schema, taking precedence over the provider. Requests carrying
    /// one bypass the synthesis cache.
    pub schema: Option<CollectionSchema>,

    /// Literal fragment text overriding the generated query side.
    pub query_fragment: Option<String>,
    /// Registered fragment name overriding the generated query side.
    /// Takes precedence over `query_fragment`.
    pub query_fragment_name: Option<String>,
    pub mutation_fragment: Option<String>,
    pub mutation_fragment_name: Option<String>,
}

impl FormRequest {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_add_fields(mut self, add_fields: Vec<String>) -> Self {
        self.add_fields = add_fields;
        self
    }

    pub fn with_schema(mut self, schema: CollectionSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn form_mode(&self) -> FormMode {
        if self.document_id.is_some() || self.slug.is_some() {
            FormMode::Edit
        } else {
            FormMode::New
        }
    }

    /// The allow-list, with an empty list normalized to "no narrowing".
    pub fn explicit_fields(&self) -> Option<&[String]> {
        match &self.fields {
            Some(fields) if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }

    /// The selector an edit form's renderer fetches the document with.
    pub fn selector(&self) -> DocumentSelector {
        DocumentSelector {
            document_id: self.document_id.clone(),
            slug: self.slug.clone(),
        }
    }

    pub(crate) fn fragment_key(&self) -> FragmentKey {
        FragmentKey {
            type_name: self.type_name.clone(),
            form_mode: self.form_mode(),
            fields: self.explicit_fields().map(<[String]>::to_vec),
            add_fields: self.add_fields.clone(),
            query_fragment: self.query_fragment.clone(),
            query_fragment_name: self.query_fragment_name.clone(),
            mutation_fragment: self.mutation_fragment.clone(),
            mutation_fragment_name: self.mutation_fragment_name.clone(),
        }
    }
}

/// How an edit form locates its document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DocumentSelector {
    pub document_id: Option<String>,
    pub slug: Option<String>,
}

/// The full derivation input, used as the memoization key. Requests with an
/// explicit schema never get this far (the schema is not part of the key).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct FragmentKey {
    type_name: String,
    form_mode: FormMode,
    fields: Option<Vec<String>>,
    add_fields: Vec<String>,
    query_fragment: Option<String>,
    query_fragment_name: Option<String>,
    mutation_fragment: Option<String>,
    mutation_fragment_name: Option<String>,
}
