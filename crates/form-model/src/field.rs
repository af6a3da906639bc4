// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// The identifier field. Selected in every generated document, whether or not
/// the schema or the caller mentions it.
pub const ID_FIELD: &str = "_id";

/// Suffix marking a localized companion field (`title` -> `title_intl`).
pub const LOCALIZED_SUFFIX: &str = "_intl";

/// The localized companion name for a field (`title` -> `title_intl`).
pub fn localized_variant(field_name: &str) -> String {
    format!("{field_name}{LOCALIZED_SUFFIX}")
}

/// Visibility specification for a schema field.
///
/// Controls whether the field may be set on creation, returned in any
/// response, or set on update.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldAccess {
    pub readable: bool,
    pub creatable: bool,
    pub updatable: bool,
}

impl FieldAccess {
    /// Returned in responses, never accepted as input (e.g. `createdAt`).
    pub fn read_only() -> Self {
        Self {
            readable: true,
            creatable: false,
            updatable: false,
        }
    }

    /// Accepted on creation only (e.g. a one-time token).
    pub fn create_only() -> Self {
        Self {
            readable: false,
            creatable: true,
            updatable: false,
        }
    }

    /// Readable, creatable, and updatable.
    pub fn read_write() -> Self {
        Self {
            readable: true,
            creatable: true,
            updatable: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// A single field in a collection schema.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEntry {
    pub access: FieldAccess,
    /// Localized fields select a `{ locale value }` sub-object, never a bare scalar.
    pub localized: bool,
}

impl FieldEntry {
    pub fn new(access: FieldAccess) -> Self {
        Self {
            access,
            localized: false,
        }
    }

    pub fn localized(access: FieldAccess) -> Self {
        Self {
            access,
            localized: true,
        }
    }
}
