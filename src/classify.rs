use crate::fingerprint::{ACCUMULATION_MARKER, VIOLATION_MARKER};
use crate::model::Comment;

/// Ownership classification of a fetched comment, parsed out of the marker
/// substrings once so the reconciliation logic can match on a type instead
/// of repeating string searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentClass {
    /// Owned by this library, one violation per comment.
    SingleFile,
    /// Owned by this library, many violations accumulated into one body.
    Accumulated,
    /// Written by somebody else; never touched.
    Foreign,
}

/// A snapshot comment together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedComment {
    pub comment: Comment,
    pub class: CommentClass,
}

/// Classify a fetched snapshot. The accumulation marker takes precedence:
/// bodies the renderer produces never carry both markers, but a comment that
/// somehow does must not be treated as a single-file comment by mode B.
pub fn classify_comments(comments: Vec<Comment>) -> Vec<ClassifiedComment> {
    comments
        .into_iter()
        .map(|comment| {
            let class = if comment.content.contains(ACCUMULATION_MARKER) {
                CommentClass::Accumulated
            } else if comment.content.contains(VIOLATION_MARKER) {
                CommentClass::SingleFile
            } else {
                CommentClass::Foreign
            };
            ClassifiedComment { comment, class }
        })
        .collect()
}
