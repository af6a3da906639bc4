// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormBuildingError {
    /// No schema is registered for the requested type. A misconfiguration,
    /// surfaced immediately to the caller.
    #[error("No collection schema found for type '{0}'")]
    UnknownType(String),

    /// A named fragment override refers to a name absent from the registry.
    #[error("No registered fragment named '{0}'")]
    UnknownFragment(String),

    #[error("Could not parse fragment source: {0}")]
    FragmentParsing(#[from] async_graphql_parser::Error),

    /// Parsed fine, but contains no fragment definition to use.
    #[error("Fragment source contains no fragment definition")]
    MissingFragmentDefinition,

    /// A fragment override must name exactly one document; the parser keeps
    /// fragment definitions in a map, so "first definition" has no stable
    /// meaning.
    #[error("Fragment source supplies {0} fragment definitions where exactly one is expected")]
    AmbiguousFragmentSource(usize),
}
