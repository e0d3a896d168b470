// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use thiserror::Error;

use crate::{
    placement::PlacementError,
    session::{Precondition, SessionId},
    store::StoreError,
};

/// Coarse classification of an [`EngineError`], for callers that map failures onto a
/// transport's status codes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    NotFound,
    PreconditionFailed,
    ValidationFailed,
    Conflict,
    Store,
}

/// Error returned by every [`Engine`][crate::engine::Engine] operation. A failed
/// operation has not been committed, except for a placement batch rejected under
/// [`BatchPolicy::KeepValid`][crate::engine::BatchPolicy::KeepValid].
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum EngineError {
    /// No session exists with the given id.
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    /// The session's state forbids the operation.
    #[error(transparent)]
    Precondition(#[from] Precondition),

    /// One or more placements of a batch were rejected, in request order.
    #[error("{} placement(s) rejected", .0.len())]
    Validation(Vec<PlacementError>),

    /// Another writer saved the session first.
    #[error("session {0} was modified concurrently")]
    Conflict(SessionId),

    /// The session store failed.
    #[error(transparent)]
    Store(StoreError),
}

impl EngineError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::SessionNotFound(_) => ErrorKind::NotFound,
            EngineError::Precondition(_) => ErrorKind::PreconditionFailed,
            EngineError::Validation(_) => ErrorKind::ValidationFailed,
            EngineError::Conflict(_) => ErrorKind::Conflict,
            EngineError::Store(_) => ErrorKind::Store,
        }
    }

    /// Get the rejected placements, if this is a validation failure.
    pub fn placement_errors(&self) -> &[PlacementError] {
        match self {
            EngineError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { id, .. } => EngineError::Conflict(id),
            err => EngineError::Store(err),
        }
    }
}
