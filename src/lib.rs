//! Reconciles static-analysis violations with the comment thread of a code
//! review.
//!
//! Given a set of parsed violations and a [`CommentsProvider`] backing a
//! concrete review system, [`create_comments`] decides which comments to
//! create and which stale ones to remove, such that running it again over
//! unchanged input touches nothing. Comments owned by this library are
//! recognized by literal marker substrings in their bodies, and individual
//! violations by a content-derived identity token, so no state is kept
//! outside the review itself.

pub mod classify;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod matcher;
pub mod model;
pub mod provider;
pub mod render;

pub use classify::{ClassifiedComment, CommentClass, classify_comments};
pub use engine::{Reconciler, create_comments};
pub use error::{Error, Result};
pub use fingerprint::{ACCUMULATION_MARKER, VIOLATION_MARKER, identity};
pub use matcher::{ScopeReport, find_changed_file};
pub use model::{ChangedFile, Comment, Severity, Violation};
pub use provider::CommentsProvider;
pub use render::CommentRenderer;
