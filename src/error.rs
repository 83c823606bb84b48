//! Client error taxonomy shared by the login flow and the posts client.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors surfaced by blogboard client operations.
///
/// Raw backend response bodies are never stored here; callers that need
/// them for diagnosis get them from debug-level logs instead.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required input field was empty; the request never left the client.
    #[error("required field `{field}` is empty")]
    Validation { field: &'static str },

    /// The login endpoint rejected the supplied credentials.
    #[error("authentication failed")]
    Authentication,

    /// The server refused a mutation on a post this session does not own.
    #[error("not allowed to modify this post")]
    Authorization,

    /// The requested post does not exist server-side.
    #[error("post not found")]
    NotFound,

    /// The request failed before a usable response arrived.
    #[error("request failed: {0}")]
    Transport(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// Stable machine-readable code for each failure class.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "E_VALIDATION",
            Self::Authentication => "E_AUTHENTICATION",
            Self::Authorization => "E_AUTHORIZATION",
            Self::NotFound => "E_NOT_FOUND",
            Self::Transport(_) => "E_TRANSPORT",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// Short display-safe message suitable for end users.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Please fill in all required fields.",
            Self::Authentication => "Login failed. Check your username and password.",
            Self::Authorization => "You can only change posts you created.",
            Self::NotFound => "That post does not exist.",
            Self::Transport(_) => "Could not reach the server. Try again later.",
            Self::HttpClientBuild(_) => "The client could not be started.",
        }
    }
}
