//! Errors surfaced at construction time
//!
//! Everything after construction degrades silently; only a missing drawing
//! surface or unusable options stop the effect from starting.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("no window available")]
    NoWindow,

    #[error("no document available")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    #[error("2d rendering context unavailable")]
    ContextUnavailable,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("javascript error: {0}")]
    Js(String),
}
