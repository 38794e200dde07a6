//! Context pattern set — the rewrite rules for one mapping entry.
//!
//! Each entry gets four compiled patterns, applied in a fixed order against
//! the current content snapshot, re-scanning from scratch after every rule:
//!
//! 1. Qualified access:  `m.releaseDate`   → `m.release_date`
//! 2. Quoted literal:    `'releaseDate'`   → `"release_date"`
//! 3. Property access:   `.releaseDate`    → `.release_date`
//! 4. Bare word:         `releaseDate`     → `release_date`
//!
//! The quoted-literal rule normalizes the quote style to double quotes
//! regardless of the original quote character. This is intended behavior,
//! not a bug.

use regex::{NoExpand, Regex};
use serde::Serialize;

use crate::error::Result;
use crate::mappings::MappingTable;

/// One replacement event: a mapping entry changed content under one rule.
///
/// `count` is the number of matches found in the content *before* the
/// substitution ran; re-deriving it afterwards would be wrong because the
/// replacement text can coincidentally match the same pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub from: String,
    pub to: String,
    pub count: usize,
}

enum Replacement {
    /// Expands `${1}` to the captured qualifier.
    Template(String),
    /// Inserted verbatim, no capture expansion.
    Literal(String),
}

struct Rule {
    matcher: Regex,
    replacement: Replacement,
}

/// The four compiled rewrite rules for one (legacy, canonical) pair.
pub struct ContextPatterns {
    legacy: String,
    canonical: String,
    rules: Vec<Rule>,
}

impl ContextPatterns {
    pub fn compile(legacy: &str, canonical: &str) -> Result<Self> {
        let escaped = regex::escape(legacy);

        let rules = vec![
            // SQL-style qualified access (m.releaseDate → m.release_date)
            Rule {
                matcher: Regex::new(&format!(r"(\w+)\.{escaped}\b"))?,
                replacement: Replacement::Template(format!("${{1}}.{canonical}")),
            },
            // Quoted string literal, either quote style, re-emitted double-quoted
            Rule {
                matcher: Regex::new(&format!(r#"["']{escaped}["']"#))?,
                replacement: Replacement::Literal(format!("\"{canonical}\"")),
            },
            // Property-chain access with no qualifier (.releaseDate → .release_date)
            Rule {
                matcher: Regex::new(&format!(r"\.{escaped}\b"))?,
                replacement: Replacement::Literal(format!(".{canonical}")),
            },
            // Standalone word anywhere else, word-boundary guarded
            Rule {
                matcher: Regex::new(&format!(r"\b{escaped}\b"))?,
                replacement: Replacement::Literal(canonical.to_string()),
            },
        ];

        Ok(Self {
            legacy: legacy.to_string(),
            canonical: canonical.to_string(),
            rules,
        })
    }

    pub fn legacy(&self) -> &str {
        &self.legacy
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Run all four rules over `content`, threading the evolving text through
    /// each. Appends one ChangeRecord per rule that changed anything.
    pub fn apply(&self, content: String, changes: &mut Vec<ChangeRecord>) -> String {
        let mut current = content;

        for rule in &self.rules {
            // Count against the pre-substitution snapshot
            let count = rule.matcher.find_iter(&current).count();
            if count == 0 {
                continue;
            }

            current = match &rule.replacement {
                Replacement::Template(template) => rule
                    .matcher
                    .replace_all(&current, template.as_str())
                    .into_owned(),
                Replacement::Literal(literal) => rule
                    .matcher
                    .replace_all(&current, NoExpand(literal))
                    .into_owned(),
            };

            changes.push(ChangeRecord {
                from: self.legacy.clone(),
                to: self.canonical.clone(),
                count,
            });
        }

        current
    }
}

/// Compile the pattern set for every applicable entry, longest spelling
/// first. Identity entries are skipped here; they exist in the table only
/// for traceability.
pub fn compile_table(table: &MappingTable) -> Result<Vec<ContextPatterns>> {
    let mut compiled = Vec::new();
    for entry in table.sorted_entries() {
        if entry.is_identity() {
            continue;
        }
        compiled.push(ContextPatterns::compile(&entry.legacy, &entry.canonical)?);
    }
    Ok(compiled)
}

/// Apply every compiled entry, in table order, to one content snapshot.
/// Returns the rewritten content and the change records accumulated across
/// all entries and rules.
pub fn convert_content(entries: &[ContextPatterns], content: &str) -> (String, Vec<ChangeRecord>) {
    let mut changes = Vec::new();
    let mut current = content.to_string();
    for patterns in entries {
        current = patterns.apply(current, &mut changes);
    }
    (current, changes)
}
