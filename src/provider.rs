use crate::error::Result;
use crate::model::{ChangedFile, Comment};

/// Capability surface of a review system, implemented per backend (GitHub,
/// GitLab, Bitbucket, ...) by adapter crates.
///
/// All calls are synchronous and issued strictly sequentially by the
/// engine. A failing call aborts the run; the engine performs no retries
/// and no rollback of comments already created or removed earlier in the
/// same run.
pub trait CommentsProvider {
    /// Files that are part of the current reviewable diff.
    fn get_files(&self) -> Result<Vec<ChangedFile>>;

    /// All comments currently on the review. Fetched once per run as a
    /// point-in-time snapshot.
    fn get_comments(&self) -> Result<Vec<Comment>>;

    /// Create a comment on the diff at the given post-patch line.
    fn create_single_file_comment(
        &self,
        file: &ChangedFile,
        line: u32,
        content: &str,
    ) -> Result<()>;

    /// Create one review-level comment holding many rendered violations.
    fn create_comment_with_all_single_file_comments(&self, content: &str) -> Result<()>;

    /// Remove the given comments from the review.
    fn remove_comments(&self, comments: &[Comment]) -> Result<()>;

    /// Whether a comment may be placed on this file/line, e.g. "is the line
    /// part of a visible diff hunk".
    fn should_comment(&self, file: &ChangedFile, line: u32) -> bool;

    fn should_create_single_file_comment(&self) -> bool;

    fn should_create_comment_with_all_single_file_comments(&self) -> bool;

    /// When true, stale comments from earlier runs are left in place and no
    /// delete call is ever issued.
    fn should_keep_old_comments(&self) -> bool;

    /// Custom comment template, if the backend configuration carries one.
    /// `None` selects the built-in default template.
    fn find_comment_template(&self) -> Option<String>;
}
