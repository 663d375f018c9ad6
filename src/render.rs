use serde::Serialize;

use crate::error::{Error, Result};
use crate::fingerprint::{ACCUMULATION_MARKER, VIOLATION_MARKER, identity};
use crate::matcher::find_changed_file;
use crate::model::{ChangedFile, Violation};

const DEFAULT_TEMPLATE: &str = include_str!("templates/default-comment.md");
const TEMPLATE_NAME: &str = "comment";

/// Context handed to the template engine for one violation.
///
/// Optional fields come with a `has_*` flag because template conditions
/// must evaluate to a bool; absent optionals render as empty strings.
#[derive(Serialize)]
struct ViolationContext<'a> {
    reporter: &'a str,
    rule: &'a str,
    has_rule: bool,
    severity: &'static str,
    file: &'a str,
    start_line: u32,
    source: &'a str,
    has_source: bool,
    message: &'a str,
}

#[derive(Serialize)]
struct CommentContext<'a> {
    violation: ViolationContext<'a>,
    changed_file: &'a ChangedFile,
}

impl<'a> CommentContext<'a> {
    fn new(file: &'a ChangedFile, violation: &'a Violation) -> Self {
        Self {
            violation: ViolationContext {
                reporter: &violation.reporter,
                rule: violation.rule.as_deref().unwrap_or(""),
                has_rule: violation.rule.is_some(),
                severity: violation.severity.label(),
                file: &violation.file,
                start_line: violation.start_line,
                source: violation.source.as_deref().unwrap_or(""),
                has_source: violation.source.is_some(),
                message: &violation.message,
            },
            changed_file: file,
        }
    }
}

/// Renders comment bodies from a template, compiled once per run.
///
/// The template is the provider-supplied one when present, else the built-in
/// default. An unparseable template is a fatal configuration error surfaced
/// at construction; it is never retried.
#[derive(Debug)]
pub struct CommentRenderer {
    engine: upon::Engine<'static>,
}

impl CommentRenderer {
    pub fn new(template: Option<String>) -> Result<Self> {
        let source = template.unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());
        let mut engine = upon::Engine::new();
        engine
            .add_template(TEMPLATE_NAME, source)
            .map_err(|e| Error::Template(e.to_string()))?;
        Ok(Self { engine })
    }

    /// The body of one single-file comment: the expanded template followed
    /// by the violation marker and the identity token, each on its own line
    /// and wrapped in emphasis so they render inert but stay searchable in
    /// the raw text.
    pub fn render_single_file_comment(
        &self,
        file: &ChangedFile,
        violation: &Violation,
    ) -> Result<String> {
        let rendered = self.expand(file, violation)?;
        Ok(format!(
            "{rendered}\n\n*{VIOLATION_MARKER}*\n*{}*",
            identity(violation)
        ))
    }

    /// One violation's block inside an accumulated comment. Carries the
    /// identity token but not the single-file violation marker, so the two
    /// comment styles never cross-match.
    fn render_accumulated_block(
        &self,
        file: &ChangedFile,
        violation: &Violation,
    ) -> Result<String> {
        let rendered = self.expand(file, violation)?;
        Ok(format!("{rendered}\n\n*{}*\n\n", identity(violation)))
    }

    /// Pack all in-scope violations into one or more accumulated comment
    /// bodies bounded by `max_size`. Each body starts with a count header
    /// and ends with the accumulation marker. A single block that alone
    /// exceeds `max_size` still goes out in a body of its own, untruncated.
    pub fn accumulate(
        &self,
        violations: &[Violation],
        files: &[ChangedFile],
        max_size: usize,
    ) -> Result<Vec<String>> {
        let header = format!("Found {} violations:\n\n", violations.len());
        let mut blocks = Vec::new();
        for violation in violations {
            // In-scope violations always resolve; skip any that do not.
            let Some(file) = find_changed_file(files, violation) else {
                continue;
            };
            blocks.push(self.render_accumulated_block(file, violation)?);
        }
        Ok(pack_blocks(&header, blocks, max_size))
    }

    fn expand(&self, file: &ChangedFile, violation: &Violation) -> Result<String> {
        self.engine
            .template(TEMPLATE_NAME)
            .render(&CommentContext::new(file, violation))
            .to_string()
            .map_err(|e| Error::Template(e.to_string()))
    }
}

/// Greedy packing: append blocks to a buffer seeded with the header; once
/// the buffer has reached or passed `max_size`, close it before appending
/// the next block. A block that alone exceeds `max_size` gets a body to
/// itself, untruncated. The last buffer is always closed and emitted,
/// however small.
fn pack_blocks(header: &str, blocks: Vec<String>, max_size: usize) -> Vec<String> {
    let mut bodies = Vec::new();
    let mut buf = header.to_string();
    let mut has_block = false;
    for block in blocks {
        let oversized = header.len() + block.len() >= max_size;
        if has_block && (oversized || buf.len() >= max_size) {
            bodies.push(close_body(buf));
            buf = header.to_string();
            has_block = false;
        }
        buf.push_str(&block);
        has_block = true;
        if oversized {
            bodies.push(close_body(buf));
            buf = header.to_string();
            has_block = false;
        }
    }
    if has_block {
        bodies.push(close_body(buf));
    }
    bodies
}

fn close_body(mut buf: String) -> String {
    buf.push_str(&format!("*{ACCUMULATION_MARKER}*"));
    buf
}
