// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Maximum number of characters of a provider error body kept in logs.
const MAX_LOGGED_BODY: usize = 800;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("No staged changes found")]
    #[diagnostic(
        code(gitmsg::git::no_staged),
        help("Stage files with: git add <files> (or pass --unstaged)")
    )]
    NoStagedChanges,

    #[error("Not a git repository")]
    #[diagnostic(
        code(gitmsg::git::not_repo),
        help("Run this command inside a git repository")
    )]
    NotAGitRepo,

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Configuration error: {0}")]
    #[diagnostic(code(gitmsg::config::error), help("Fix settings and try again"))]
    Config(String),

    #[error("Request rejected (HTTP {status})")]
    #[diagnostic(
        code(gitmsg::http::auth),
        help("Unauthorized. Check your API key and its permissions")
    )]
    AuthRejected { status: u16 },

    #[error("Endpoint not found (HTTP 404)")]
    #[diagnostic(
        code(gitmsg::http::not_found),
        help("Check base_url (it should usually include `/v1`) and confirm the server exposes `/chat/completions`")
    )]
    EndpointNotFound,

    #[error("Rate limited (HTTP 429)")]
    #[diagnostic(
        code(gitmsg::http::rate_limited),
        help("Try again later or reduce request frequency")
    )]
    RateLimited,

    #[error("Server error (HTTP {status})")]
    #[diagnostic(
        code(gitmsg::http::server),
        help("Retry later or check the provider's status page")
    )]
    ServerError { status: u16 },

    #[error("Request failed (HTTP {status})")]
    #[diagnostic(code(gitmsg::http::other), help("Check your endpoint configuration"))]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    #[diagnostic(
        code(gitmsg::transport::error),
        help("Check network connectivity and the configured base_url")
    )]
    Transport(String),

    #[error("The model returned no content")]
    #[diagnostic(code(gitmsg::provider::empty), help("Retry the request"))]
    EmptyResponse,

    #[error("Git error: {0}")]
    #[diagnostic(code(gitmsg::git::error))]
    Git(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(gitmsg::keyring::error),
        help("Check your system keychain configuration")
    )]
    Keyring(String),
}

impl Error {
    /// Classify an HTTP failure status into the matching variant.
    /// The body is truncated before it is stored so error chains stay log-safe.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Error::AuthRejected { status },
            404 => Error::EndpointNotFound,
            429 => Error::RateLimited,
            500..=599 => Error::ServerError { status },
            _ => Error::Http {
                status,
                message: truncate_body(body),
            },
        }
    }

    /// Whether a user-chosen retry makes sense for this failure.
    /// Configuration problems route to settings instead.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::AuthRejected { .. }
                | Error::EndpointNotFound
                | Error::RateLimited
                | Error::ServerError { .. }
                | Error::Http { .. }
                | Error::Transport(_)
                | Error::EmptyResponse
        )
    }
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

/// Scheme + host only; never the full URL, which may carry paths or userinfo.
pub fn redacted_host(base_url: &str) -> String {
    match url::Url::parse(base_url) {
        Ok(u) => match u.host_str() {
            Some(host) => format!("{}://{}", u.scheme(), host),
            None => u.scheme().to_string(),
        },
        Err(_) => "<invalid-url>".to_string(),
    }
}

/// Cap an error body for logging.
pub fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_LOGGED_BODY {
        return body.to_string();
    }
    let cut: String = body.chars().take(MAX_LOGGED_BODY).collect();
    format!("{cut}…")
}

pub type Result<T> = std::result::Result<T, Error>;
