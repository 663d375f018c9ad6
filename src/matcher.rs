use std::collections::BTreeSet;

use tracing::info;

use crate::model::{ChangedFile, Violation};
use crate::provider::CommentsProvider;

/// Resolve a violation's reported path to one of the review's changed files.
///
/// A candidate matches when either path is a suffix of the other, which
/// bridges differing roots (the analysis tool reporting absolute paths while
/// the review system uses repo-relative ones, or the reverse). The first
/// match in list order wins; if two changed files both satisfy the suffix
/// relation the result is order-dependent. Known limitation, not an error.
pub fn find_changed_file<'a>(
    files: &'a [ChangedFile],
    violation: &Violation,
) -> Option<&'a ChangedFile> {
    files.iter().find(|f| {
        f.filename.ends_with(&violation.file) || violation.file.ends_with(&f.filename)
    })
}

/// Diagnostic summary of one scope-filtering pass. Entries are sorted
/// `"file line"` strings, mirroring what gets logged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScopeReport {
    /// Violations that will be commented on.
    pub included: BTreeSet<String>,
    /// On a changed file, but the line is not part of the reviewable diff.
    pub excluded_untouched: BTreeSet<String>,
    /// Reported path matched no changed file.
    pub excluded_unmatched: BTreeSet<String>,
}

/// Narrow a violation set to the ones that can be placed on the current
/// diff: the file resolves via [`find_changed_file`] and the provider's
/// reviewability predicate accepts the line.
pub fn filter_in_scope<P: CommentsProvider>(
    provider: &P,
    files: &[ChangedFile],
    violations: Vec<Violation>,
) -> (Vec<Violation>, ScopeReport) {
    let changed: BTreeSet<&str> = files.iter().map(|f| f.filename.as_str()).collect();
    info!(
        "Files changed:\n  {}",
        changed.iter().copied().collect::<Vec<_>>().join("\n  ")
    );
    let with_violations: BTreeSet<&str> = violations.iter().map(|v| v.file.as_str()).collect();
    info!(
        "Files with violations:\n  {}",
        with_violations
            .iter()
            .copied()
            .collect::<Vec<_>>()
            .join("\n  ")
    );

    let mut report = ScopeReport::default();
    let mut in_scope = Vec::new();
    for violation in violations {
        let key = format!("{} {}", violation.file, violation.start_line);
        match find_changed_file(files, &violation) {
            Some(file) if provider.should_comment(file, violation.start_line) => {
                report.included.insert(key);
                in_scope.push(violation);
            }
            Some(_) => {
                report.excluded_untouched.insert(key);
            }
            None => {
                report.excluded_unmatched.insert(key);
            }
        }
    }

    if !report.included.is_empty() {
        info!(
            "Will include violations on:\n  {}",
            join(&report.included)
        );
    }
    if !report.excluded_untouched.is_empty() {
        info!(
            "Will not include violations on changed files because violation reported on untouched lines:\n  {}",
            join(&report.excluded_untouched)
        );
    }
    if !report.excluded_unmatched.is_empty() {
        info!(
            "Will not include violations on unchanged files:\n  {}",
            join(&report.excluded_unmatched)
        );
    }

    (in_scope, report)
}

fn join(set: &BTreeSet<String>) -> String {
    set.iter().cloned().collect::<Vec<_>>().join("\n  ")
}
