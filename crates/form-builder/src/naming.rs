// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use heck::ToLowerCamelCase;

use form_model::collection::ToPlural;
use form_model::document::FormMode;

fn to_query(name: &str) -> String {
    name.to_lower_camel_case()
}

fn to_create(name: &str) -> String {
    format!("create{name}")
}

fn to_update(name: &str) -> String {
    format!("update{name}")
}

fn to_delete(name: &str) -> String {
    format!("delete{name}")
}

/// A type that can generate form fragment and query names.
///
/// The fragment names are a caller-facing contract and must match exactly:
/// `{typeName}{"New"|"Edit"}FormFragment{"Query"|"Mutation"}`.
pub trait ToFormFragmentNames {
    /// Shared name prefix (e.g. `PostNew`)
    fn form_fragment_prefix(&self, mode: FormMode) -> String;
    /// Query-side fragment name (e.g. `PostNewFormFragmentQuery`)
    fn query_fragment_name(&self, mode: FormMode) -> String;
    /// Mutation-side fragment name (e.g. `PostNewFormFragmentMutation`)
    fn mutation_fragment_name(&self, mode: FormMode) -> String;
    /// Name of the query that loads the form's document (e.g. `PostEditFormQuery`)
    fn form_query_name(&self, mode: FormMode) -> String;
}

impl<T: ToPlural + ?Sized> ToFormFragmentNames for T {
    fn form_fragment_prefix(&self, mode: FormMode) -> String {
        format!("{}{}", self.self_name(), mode.title())
    }

    fn query_fragment_name(&self, mode: FormMode) -> String {
        format!("{}FormFragmentQuery", self.form_fragment_prefix(mode))
    }

    fn mutation_fragment_name(&self, mode: FormMode) -> String {
        format!("{}FormFragmentMutation", self.form_fragment_prefix(mode))
    }

    fn form_query_name(&self, mode: FormMode) -> String {
        format!("{}FormQuery", self.form_fragment_prefix(mode))
    }
}

/// A type that can generate the CRUD operation names the rendering
/// collaborator wires against.
pub trait ToFormOperationNames {
    /// Single document query name (e.g. `post`)
    fn single_query(&self) -> String;
    /// Collection query name (e.g. `posts`)
    fn collection_query(&self) -> String;
    /// Create mutation name (e.g. `createPost`)
    fn create_mutation(&self) -> String;
    /// Update mutation name (e.g. `updatePost`)
    fn update_mutation(&self) -> String;
    /// Delete mutation name (e.g. `deletePost`)
    fn delete_mutation(&self) -> String;
}

impl<T: ToPlural + ?Sized> ToFormOperationNames for T {
    fn single_query(&self) -> String {
        to_query(&self.self_name())
    }

    fn collection_query(&self) -> String {
        to_query(&self.to_plural())
    }

    fn create_mutation(&self) -> String {
        to_create(&self.self_name())
    }

    fn update_mutation(&self) -> String {
        to_update(&self.self_name())
    }

    fn delete_mutation(&self) -> String {
        to_delete(&self.self_name())
    }
}
