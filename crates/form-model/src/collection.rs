// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::CollectionSchema;

/// A type with both singular and plural versions of itself.
pub trait ToPlural {
    fn self_name(&self) -> String;
    fn to_plural(&self) -> String;
}

impl ToPlural for str {
    fn self_name(&self) -> String {
        self.to_owned()
    }

    fn to_plural(&self) -> String {
        let plural_name = pluralizer::pluralize(self, 2, false);
        if plural_name == self {
            // Force pluralization if the pluralizer returns the same string
            format!("{self}s")
        } else {
            plural_name
        }
    }
}

/// A named collection of documents sharing one schema.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Collection {
    /// Plural name (e.g. `Posts`); derived from the type name unless overridden.
    pub collection_name: String,
    /// Singular GraphQL type name (e.g. `Post`).
    pub type_name: String,
    pub schema: CollectionSchema,
}

impl Collection {
    pub fn new(type_name: impl Into<String>, schema: CollectionSchema) -> Self {
        let type_name = type_name.into();
        Self {
            collection_name: type_name.to_plural(),
            type_name,
            schema,
        }
    }

    /// Overrides the derived collection name (e.g. `Person`/`People`).
    pub fn with_collection_name(mut self, collection_name: impl Into<String>) -> Self {
        self.collection_name = collection_name.into();
        self
    }
}

impl ToPlural for Collection {
    fn self_name(&self) -> String {
        self.type_name.clone()
    }

    fn to_plural(&self) -> String {
        self.collection_name.clone()
    }
}

/// Supplies the field schema for a type name.
///
/// The provider is authoritative; schema contents are not validated beyond
/// presence.
pub trait SchemaProvider {
    fn schema(&self, type_name: &str) -> Option<&CollectionSchema>;
}

/// Collections keyed by type name, in registration order.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CollectionStore {
    collections: IndexMap<String, Collection>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, collection: Collection) {
        self.collections
            .insert(collection.type_name.clone(), collection);
    }

    pub fn get(&self, type_name: &str) -> Option<&Collection> {
        self.collections.get(type_name)
    }

    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.values()
    }
}

impl SchemaProvider for CollectionStore {
    fn schema(&self, type_name: &str) -> Option<&CollectionSchema> {
        self.get(type_name).map(|collection| &collection.schema)
    }
}
