//! Workflow reference scanner
//!
//! Parses workflow YAML and collects every `uses: name@tag` reference found
//! inside a `steps` sequence, at any nesting depth.

use crate::domain::Reference;
use crate::error::DocumentError;
use crate::workflow::read_document;
use serde::Deserialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key holding the list of steps
const STEPS_KEY: &str = "steps";

/// Key holding the reference inside a step
const USES_KEY: &str = "uses";

/// A workflow file loaded for one run
#[derive(Debug, Clone)]
pub struct WorkflowDocument {
    /// Path to the workflow file
    pub path: PathBuf,
    /// Original text, never modified in place
    pub text: String,
    /// References found in the file, in document order
    pub references: Vec<Reference>,
    /// YAML parse error; the document then carries no references
    pub parse_error: Option<String>,
}

impl WorkflowDocument {
    /// Returns true if the file could not be parsed
    pub fn has_parse_error(&self) -> bool {
        self.parse_error.is_some()
    }
}

/// Collect references from a parsed YAML value.
///
/// Within any mapping that has a `steps` sequence, every step whose `uses`
/// is a `name@tag` string is emitted. All nested mappings and sequences are
/// searched as well, since steps can live under matrices, conditionals or
/// composite action `runs` blocks.
pub fn extract_references(value: &Value) -> Vec<Reference> {
    let mut found = Vec::new();
    collect(value, &mut found);
    found
}

fn collect(value: &Value, found: &mut Vec<Reference>) {
    match value {
        Value::Mapping(mapping) => {
            if let Some(Value::Sequence(steps)) = mapping.get(STEPS_KEY) {
                for step in steps {
                    if let Some(Value::String(uses)) = step.get(USES_KEY) {
                        if let Some(reference) = Reference::parse(uses) {
                            found.push(reference);
                        }
                    }
                }
            }
            for nested in mapping.values() {
                collect(nested, found);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                collect(item, found);
            }
        }
        Value::Tagged(tagged) => collect(&tagged.value, found),
        _ => {}
    }
}

/// Parse every YAML document in `text` and collect their references
pub fn scan_text(text: &str) -> Result<Vec<Reference>, serde_yaml::Error> {
    let mut references = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let value = Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }
        references.extend(extract_references(&value));
    }
    Ok(references)
}

/// Read and scan a workflow file.
///
/// A read failure is returned as an error. A YAML parse failure is not:
/// the document comes back with no references, its text untouched and
/// `parse_error` set so the caller can report it.
pub fn load_document(path: &Path) -> Result<WorkflowDocument, DocumentError> {
    let text = read_document(path)?;

    let (references, parse_error) = match scan_text(&text) {
        Ok(references) => (references, None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };

    debug!(
        file = %path.display(),
        references = references.len(),
        "scanned workflow"
    );

    Ok(WorkflowDocument {
        path: path.to_path_buf(),
        text,
        references,
        parse_error,
    })
}
