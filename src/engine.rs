use tracing::info;

use crate::classify::{ClassifiedComment, CommentClass, classify_comments};
use crate::error::{Error, Result};
use crate::fingerprint::identity;
use crate::matcher::{ScopeReport, filter_in_scope, find_changed_file};
use crate::model::{ChangedFile, Comment, Violation};
use crate::provider::CommentsProvider;
use crate::render::CommentRenderer;

/// Reconciles a violation set against a review's comment thread.
///
/// Construction fetches the changed files and narrows the violations to the
/// ones placeable on the current diff. [`Reconciler::run`] then fetches the
/// comment snapshot once and, for each enabled mode, creates the missing
/// comments and deletes the stale ones, so repeated runs over unchanged
/// input are no-ops.
#[derive(Debug)]
pub struct Reconciler<'a, P: CommentsProvider> {
    provider: &'a P,
    files: Vec<ChangedFile>,
    violations: Vec<Violation>,
    scope: ScopeReport,
    max_comment_size: usize,
}

impl<'a, P: CommentsProvider> Reconciler<'a, P> {
    pub fn new(provider: &'a P, violations: Vec<Violation>, max_comment_size: usize) -> Result<Self> {
        if max_comment_size == 0 {
            return Err(Error::InvalidArgument(
                "max_comment_size must be greater than zero".to_string(),
            ));
        }
        let files = provider.get_files()?;
        let (violations, scope) = filter_in_scope(provider, &files, violations);
        Ok(Self {
            provider,
            files,
            violations,
            scope,
            max_comment_size,
        })
    }

    /// Diagnostic summary of which violations made it into scope.
    pub fn scope_report(&self) -> &ScopeReport {
        &self.scope
    }

    pub fn run(&self) -> Result<()> {
        let accumulated = self
            .provider
            .should_create_comment_with_all_single_file_comments();
        let single_file = self.provider.should_create_single_file_comment();

        if !accumulated && !single_file {
            info!(
                "Will not comment because both accumulated and single-file comments are disabled"
            );
            return Ok(());
        }

        let renderer = CommentRenderer::new(self.provider.find_comment_template())?;
        let snapshot = classify_comments(self.provider.get_comments()?);

        if accumulated {
            self.reconcile_accumulated(&renderer, &snapshot)?;
        }
        if single_file {
            self.reconcile_single_file(&renderer, &snapshot)?;
        }
        Ok(())
    }

    /// Mode A: one (or a few, size permitting) review-level comments holding
    /// every in-scope violation.
    fn reconcile_accumulated(
        &self,
        renderer: &CommentRenderer,
        snapshot: &[ClassifiedComment],
    ) -> Result<()> {
        if self.violations.is_empty() {
            // Nothing in scope: leave the thread untouched, deletions included.
            return Ok(());
        }

        let desired = renderer.accumulate(&self.violations, &self.files, self.max_comment_size)?;
        let existing: Vec<&Comment> = snapshot
            .iter()
            .filter(|c| c.class == CommentClass::Accumulated)
            .map(|c| &c.comment)
            .collect();

        let stale: Vec<Comment> = existing
            .iter()
            .filter(|c| !desired.iter().any(|d| c.content.contains(d.as_str())))
            .map(|c| (*c).clone())
            .collect();
        self.remove_stale(stale)?;

        for body in &desired {
            let already_posted = existing.iter().any(|c| c.content.contains(body.as_str()));
            if !already_posted {
                info!("Creating comment with all single file comments");
                self.provider
                    .create_comment_with_all_single_file_comments(body)?;
            }
        }
        Ok(())
    }

    /// Mode B: one positioned comment per in-scope violation, matched to
    /// existing comments by identity token.
    fn reconcile_single_file(
        &self,
        renderer: &CommentRenderer,
        snapshot: &[ClassifiedComment],
    ) -> Result<()> {
        let survivors: Vec<&Comment> = snapshot
            .iter()
            .filter(|c| c.class == CommentClass::SingleFile)
            .map(|c| &c.comment)
            .collect();

        let tokens: Vec<String> = self.violations.iter().map(identity).collect();

        let stale: Vec<Comment> = survivors
            .iter()
            .filter(|c| !tokens.iter().any(|t| c.content.contains(t.as_str())))
            .map(|c| (*c).clone())
            .collect();
        self.remove_stale(stale)?;

        for (violation, token) in self.violations.iter().zip(&tokens) {
            let commented_before = survivors.iter().any(|c| c.content.contains(token.as_str()));
            if commented_before {
                continue;
            }
            let Some(file) = find_changed_file(&self.files, violation) else {
                continue;
            };
            let body = renderer.render_single_file_comment(file, violation)?;
            info!(
                "{} {} {} {} {} {}",
                violation.reporter,
                violation.severity,
                violation.rule.as_deref().unwrap_or("-"),
                file.filename,
                violation.start_line,
                violation.source.as_deref().unwrap_or("-"),
            );
            self.provider
                .create_single_file_comment(file, violation.start_line, &body)?;
        }
        Ok(())
    }

    fn remove_stale(&self, stale: Vec<Comment>) -> Result<()> {
        if stale.is_empty() || self.provider.should_keep_old_comments() {
            return Ok(());
        }
        self.provider.remove_comments(&stale)
    }
}

/// Run one full reconciliation: filter the violations to the current diff,
/// then create and delete comments until the thread matches.
pub fn create_comments<P: CommentsProvider>(
    provider: &P,
    violations: Vec<Violation>,
    max_comment_size: usize,
) -> Result<()> {
    Reconciler::new(provider, violations, max_comment_size)?.run()
}
