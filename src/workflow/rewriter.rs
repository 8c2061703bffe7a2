//! Line-oriented workflow rewriter
//!
//! Replaces `uses: name@tag` values in place without reserializing the YAML,
//! so comments, quoting, block scalars and line endings survive untouched.
//! Only the `name@tag` token on a qualifying line is ever modified.

use crate::domain::{LineChange, Reference, UpgradeSet};
use crate::update::{is_upgrade, parse_tag, Granularity};
use regex::Regex;
use std::sync::LazyLock;

/// A `uses:` key at the start of a line, optionally behind a list dash
static USES_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(-\s+)?uses:").unwrap());

/// Result of rewriting one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten text (identical to the input when nothing matched)
    pub text: String,
    /// Changed lines, in document order
    pub changes: Vec<LineChange>,
}

impl Rewrite {
    /// Returns true if at least one line changed
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Apply `upgrades` to `original`, returning only the new text
pub fn apply(original: &str, upgrades: &UpgradeSet) -> String {
    rewrite(original, upgrades).text
}

/// Apply `upgrades` to `original`, recording every changed line
pub fn rewrite(original: &str, upgrades: &UpgradeSet) -> Rewrite {
    let mut text = String::with_capacity(original.len());
    let mut changes = Vec::new();

    if upgrades.is_empty() {
        return Rewrite {
            text: original.to_string(),
            changes,
        };
    }

    for (index, raw) in original.split_inclusive('\n').enumerate() {
        let (content, ending) = split_line_ending(raw);
        match rewrite_line(content, upgrades) {
            Some((updated, reference, new_tag)) => {
                changes.push(LineChange {
                    line: index + 1,
                    before: content.to_string(),
                    after: updated.clone(),
                    reference,
                    new_tag,
                });
                text.push_str(&updated);
                text.push_str(ending);
            }
            None => text.push_str(raw),
        }
    }

    Rewrite { text, changes }
}

/// Separate a line from its `\n` or `\r\n` terminator
fn split_line_ending(raw: &str) -> (&str, &str) {
    if let Some(content) = raw.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = raw.strip_suffix('\n') {
        (content, "\n")
    } else {
        (raw, "")
    }
}

/// Rewrite a single line if it holds a reference from `upgrades`.
///
/// Returns the new line content along with the matched reference and the
/// truncated tag that was written.
fn rewrite_line(content: &str, upgrades: &UpgradeSet) -> Option<(String, Reference, String)> {
    let key_end = USES_LINE.find(content)?.end();
    let rest = &content[key_end..];
    let value_part = match rest.find('#') {
        Some(hash) => &rest[..hash],
        None => rest,
    };

    let leading = value_part.len() - value_part.trim_start().len();
    let trimmed = value_part.trim();
    let inner = strip_quotes(trimmed);
    let quote_len = (trimmed.len() - inner.len()) / 2;

    let reference = Reference::parse(inner)?;
    let new_tag = upgrades.get(&reference)?;
    let truncated = Granularity::of(&reference.tag).truncate(new_tag);
    if !is_upgrade(&parse_tag(&reference.tag)?, &parse_tag(&truncated)?) {
        return None;
    }

    let start = key_end + leading + quote_len;
    let end = start + inner.len();
    let updated = format!(
        "{}{}@{}{}",
        &content[..start],
        reference.name,
        truncated,
        &content[end..]
    );

    Some((updated, reference, truncated))
}

/// Strip one pair of matching single or double quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
