//! Wire types for the blog REST API.

use serde::{Deserialize, Serialize};

/// A blog post as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Backend-assigned identifier, immutable once set.
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Server-assigned creation timestamp, carried verbatim and never
    /// interpreted client-side.
    pub date: String,
    /// Username of the owning session at creation time, immutable.
    pub created_by: String,
}

/// The client-writable fields of a post. Everything else is server-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Success body of `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
