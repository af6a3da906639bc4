// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Whether a form creates a new document or edits an existing one.
///
/// Determined by the presence of a document identifier or lookup slug in the
/// form request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormMode {
    New,
    Edit,
}

impl FormMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMode::New => "new",
            FormMode::Edit => "edit",
        }
    }

    /// Capitalized form used in synthesized names (`PostNewFormFragment`).
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::New => "New",
            FormMode::Edit => "Edit",
        }
    }
}

impl Display for FormMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fragment as handed to the rendering collaborator: a well-known name plus
/// opaque query-language text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FragmentDocument {
    pub name: String,
    pub source: String,
}

/// The synthesis result: what to load to populate the form, and what to ask
/// back after create/update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FormFragments {
    pub form_mode: FormMode,
    pub query: FragmentDocument,
    pub mutation: FragmentDocument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!("new", FormMode::New.as_str());
        assert_eq!("Edit", FormMode::Edit.title());
        assert_eq!("edit", FormMode::Edit.to_string());
    }
}
