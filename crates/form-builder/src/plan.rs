// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use form_model::collection::ToPlural;
use form_model::document::{FormFragments, FormMode};

use crate::error::FormBuildingError;
use crate::naming::{ToFormFragmentNames, ToFormOperationNames};
use crate::request::{DocumentSelector, FormRequest};
use crate::synthesizer::FragmentSynthesizer;

/// The CRUD operation names the rendering collaborator wires against.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CrudOperationNames {
    pub single_query: String,
    pub collection_query: String,
    pub create: String,
    pub update: String,
    pub delete: String,
}

impl CrudOperationNames {
    pub fn for_type<T: ToPlural + ?Sized>(named: &T) -> Self {
        Self {
            single_query: named.single_query(),
            collection_query: named.collection_query(),
            create: named.create_mutation(),
            update: named.update_mutation(),
            delete: named.delete_mutation(),
        }
    }
}

/// Everything the renderer needs to load and save a form's document: the
/// fragment pair, the form query name, the fetch selector, and the operation
/// names. Names and documents only; issuing the operations is the renderer's
/// concern.
#[derive(Debug, Clone)]
pub struct FormPlan {
    pub form_mode: FormMode,
    pub fragments: Arc<FormFragments>,
    /// Name of the query an edit form loads its document with
    /// (e.g. `PostEditFormQuery`).
    pub query_name: String,
    pub selector: DocumentSelector,
    pub operations: CrudOperationNames,
}

impl FragmentSynthesizer {
    pub fn plan(&self, request: &FormRequest) -> Result<FormPlan, FormBuildingError> {
        let fragments = self.synthesize(request)?;
        let form_mode = fragments.form_mode;
        let type_name = request.type_name.as_str();

        Ok(FormPlan {
            form_mode,
            fragments,
            query_name: type_name.form_query_name(form_mode),
            selector: request.selector(),
            operations: CrudOperationNames::for_type(type_name),
        })
    }
}
