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

use crate::field::{localized_variant, FieldAccess, FieldEntry, ID_FIELD};

/// Fields every collection carries regardless of its own schema.
const UNIVERSAL_FIELDS: [&str; 3] = [ID_FIELD, "schemaVersion", "createdAt"];

/// The field table of one collection: field name to visibility entry.
///
/// Field order is insertion order and flows unchanged into derived documents.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSchema {
    fields: IndexMap<String, FieldEntry>,
}

impl CollectionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn add_field(&mut self, name: impl Into<String>, entry: FieldEntry) {
        self.fields.insert(name.into(), entry);
    }

    pub fn with_field(mut self, name: impl Into<String>, access: FieldAccess) -> Self {
        self.add_field(name, FieldEntry::new(access));
        self
    }

    /// Registers the localized companion (`{name}_intl`) for a field.
    pub fn add_localized_field(&mut self, name: &str, access: FieldAccess) {
        self.fields
            .insert(localized_variant(name), FieldEntry::localized(access));
    }

    pub fn with_localized_field(mut self, name: &str, access: FieldAccess) -> Self {
        self.add_localized_field(name, access);
        self
    }

    /// Prepends the universal fields (`_id`, `schemaVersion`, `createdAt`) as
    /// read-only entries. A field the schema already defines keeps its own entry
    /// but moves to the universal position.
    pub fn with_universal_fields(self) -> Self {
        let mut fields: IndexMap<String, FieldEntry> = UNIVERSAL_FIELDS
            .iter()
            .map(|name| (name.to_string(), FieldEntry::new(FieldAccess::read_only())))
            .collect();

        for (name, entry) in self.fields {
            fields.insert(name, entry);
        }

        Self { fields }
    }

    fn fields_where(&self, predicate: impl Fn(&FieldAccess) -> bool) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(_, entry)| predicate(&entry.access))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Field names readable in any response, in schema order.
    pub fn readable_fields(&self) -> Vec<String> {
        self.fields_where(|access| access.readable)
    }

    /// Field names settable on creation, in schema order.
    pub fn creatable_fields(&self) -> Vec<String> {
        self.fields_where(|access| access.creatable)
    }

    /// Field names settable on update, in schema order.
    pub fn updatable_fields(&self) -> Vec<String> {
        self.fields_where(|access| access.updatable)
    }
}
