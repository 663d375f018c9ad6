use crate::model::Violation;

/// Marker embedded in every single-file comment this library creates.
///
/// The literal must never change: already-posted comments on live reviews
/// are recognized by this exact substring.
pub const VIOLATION_MARKER: &str =
    "<this is a auto generated comment from violation-comments-lib F7F8ASD8123FSDF>";

/// Marker embedded in every accumulated comment this library creates.
pub const ACCUMULATION_MARKER: &str = "<ACCUMULATED-VIOLATIONS>";

/// Derive the stable identity token for a violation.
///
/// The token is a 32-bit polynomial hash of the violation's stringified
/// fields with every non-alphanumeric character removed, printed in decimal
/// behind a constant letter. The letter keeps review systems from treating
/// the token as a bare number; it carries no meaning.
///
/// Two violations that stringify identically get the same token, so a
/// re-run over unchanged code never produces a duplicate comment.
pub fn identity(violation: &Violation) -> String {
    let stripped: String = stringify(violation)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    format!("q{}", hash32(&stripped))
}

/// Concatenate all violation fields in a fixed order. Absent optionals
/// contribute nothing, so `rule: None` and `rule: Some("")` fingerprint
/// identically.
fn stringify(v: &Violation) -> String {
    format!(
        "{}{}{}{}{}{}{}",
        v.reporter,
        v.rule.as_deref().unwrap_or(""),
        v.severity,
        v.file,
        v.start_line,
        v.source.as_deref().unwrap_or(""),
        v.message,
    )
}

/// The classic `h = h * 31 + byte` string hash over wrapping i32, matching
/// the token values already posted by earlier deployments. Input is ASCII
/// alphanumerics only, so bytes and chars coincide.
fn hash32(s: &str) -> i32 {
    s.bytes()
        .fold(0i32, |h, b| h.wrapping_mul(31).wrapping_add(b as i32))
}
