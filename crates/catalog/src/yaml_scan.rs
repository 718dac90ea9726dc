// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # YAML position recovery
//!
//! `serde_yaml` drops source positions, so declaration sites are recovered
//! by scanning the text for `key: value` lines in document order. Each line
//! is attributed to the top-level section it sits under (`models`,
//! `sources`, `vars`, ...) and carries its indentation, which is enough to
//! tell a model's `name:` apart from one of its columns'.

use crate::text::utf16_len;
use dbt_lsp_ir::SourcePosition;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// One `key: value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyLine {
    /// Top-level key this line belongs to
    pub section: String,
    /// UTF-16 column of the key
    pub indent: u32,
    pub key: String,
    pub key_pos: SourcePosition,
    /// Scalar value with quotes and trailing comment removed; empty for blocks
    pub value: String,
    pub value_pos: SourcePosition,
}

static KEY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<lead>[ \t]*(?:-[ \t]+)*)(?P<key>[A-Za-z_][\w\-]*|"[^"]*"|'[^']*')[ \t]*:(?:[ \t]+(?P<value>.*))?$"#,
    )
    .expect("valid key line regex")
});

/// Every `key:` line of `text`, in document order
pub(crate) fn scan_keys(text: &str) -> Vec<KeyLine> {
    let mut lines = Vec::new();
    let mut section = String::new();

    for (line_no, line) in text.lines().enumerate() {
        let Some(caps) = KEY_LINE.captures(line) else {
            continue;
        };
        let (Some(lead), Some(key)) = (caps.name("lead"), caps.name("key")) else {
            continue;
        };
        let key_text = unquote(key.as_str());
        if lead.as_str().is_empty() {
            section = key_text.to_string();
        }

        let line_no = line_no as u32;
        let indent = utf16_len(lead.as_str());
        let (value, value_col) = match caps.name("value") {
            Some(raw) => {
                let scalar = strip_comment(raw.as_str());
                (unquote(scalar).to_string(), utf16_len(&line[..raw.start()]))
            }
            None => (String::new(), utf16_len(line)),
        };

        lines.push(KeyLine {
            section: section.clone(),
            indent,
            key: key_text.to_string(),
            key_pos: SourcePosition::new(line_no, indent),
            value,
            value_pos: SourcePosition::new(line_no, value_col),
        });
    }
    lines
}

fn unquote(text: &str) -> &str {
    let text = text.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

fn strip_comment(value: &str) -> &str {
    let value = value.trim_end();
    if let Some(quote) = value.chars().next().filter(|c| matches!(c, '"' | '\'')) {
        return match value[1..].find(quote) {
            Some(end) => &value[..end + 2],
            None => value,
        };
    }
    match value.find(" #") {
        Some(i) => value[..i].trim_end(),
        None if value.starts_with('#') => "",
        None => value,
    }
}

/// Name positions of models, sources and source tables in one schema file
#[derive(Debug)]
pub(crate) struct SchemaPositions {
    names: Vec<KeyLine>,
    used: Vec<bool>,
}

impl SchemaPositions {
    pub(crate) fn scan(text: &str) -> Self {
        let names: Vec<KeyLine> = scan_keys(text)
            .into_iter()
            .filter(|line| line.key == "name" && line.indent > 0)
            .collect();
        let used = vec![false; names.len()];
        Self { names, used }
    }

    fn level(&self, section: &str, range: std::ops::Range<usize>) -> Option<u32> {
        self.names[range]
            .iter()
            .filter(|line| line.section == section)
            .map(|line| line.indent)
            .min()
    }

    /// Claim the first unused `name:` entry at `indent` inside `range`
    fn claim(
        &mut self,
        section: &str,
        indent: u32,
        range: std::ops::Range<usize>,
        value: &str,
    ) -> Option<usize> {
        let index = range.into_iter().find(|&i| {
            let line = &self.names[i];
            !self.used[i] && line.section == section && line.indent == indent && line.value == value
        })?;
        self.used[index] = true;
        Some(index)
    }

    /// Position of the `name:` value of model `name`
    pub(crate) fn model(&mut self, name: &str) -> Option<SourcePosition> {
        let all = 0..self.names.len();
        let level = self.level("models", all.clone())?;
        let index = self.claim("models", level, all, name)?;
        Some(self.names[index].value_pos)
    }

    /// Position of source `name` plus a handle for its tables
    pub(crate) fn source(&mut self, name: &str) -> Option<(SourceHandle, SourcePosition)> {
        let all = 0..self.names.len();
        let level = self.level("sources", all.clone())?;
        let index = self.claim("sources", level, all, name)?;
        let end = (index + 1..self.names.len())
            .find(|&i| self.names[i].section != "sources" || self.names[i].indent <= level)
            .unwrap_or(self.names.len());
        Some((SourceHandle { body: index + 1..end }, self.names[index].value_pos))
    }

    /// Position of table `name` within a source
    pub(crate) fn table(&mut self, source: &SourceHandle, name: &str) -> Option<SourcePosition> {
        let level = self.level("sources", source.body.clone())?;
        let index = self.claim("sources", level, source.body.clone(), name)?;
        Some(self.names[index].value_pos)
    }
}

/// Entry range of one source's nested `name:` lines
#[derive(Debug, Clone)]
pub(crate) struct SourceHandle {
    body: std::ops::Range<usize>,
}

/// Key positions of project variables in `dbt_project.yml`.
///
/// Top-level `vars` keys come first; keys under `vars.<project_name>`
/// replace them, matching how the values are overlaid.
pub(crate) fn variable_positions(
    text: &str,
    project_name: &str,
) -> HashMap<String, SourcePosition> {
    let keys: Vec<KeyLine> = scan_keys(text)
        .into_iter()
        .filter(|line| line.section == "vars" && line.indent > 0)
        .collect();
    let mut positions = HashMap::new();
    let Some(level) = keys.iter().map(|line| line.indent).min() else {
        return positions;
    };

    for (i, line) in keys.iter().enumerate() {
        if line.indent != level {
            continue;
        }
        if line.key != project_name {
            positions.entry(line.key.clone()).or_insert(line.key_pos);
            continue;
        }
        let nested = keys[i + 1..]
            .iter()
            .take_while(|nested| nested.indent > level)
            .collect::<Vec<_>>();
        if let Some(inner) = nested.iter().map(|nested| nested.indent).min() {
            for nested in nested.iter().filter(|nested| nested.indent == inner) {
                positions.insert(nested.key.clone(), nested.key_pos);
            }
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"version: 2

sources:
  - name: jaffle_shop
    description: "Raw data" # loaded by fivetran
    tables:
      - name: orders
        columns:
          - name: customers
      - name: customers

models:
  - name: orders
    description: '{{ doc("orders") }}'
    columns:
      - name: customers
  - name: customers
"#;

    #[test]
    fn test_scan_keys_values_and_sections() {
        let lines = scan_keys(SCHEMA);
        let description = lines.iter().find(|l| l.key == "description").unwrap();
        assert_eq!(description.section, "sources");
        assert_eq!(description.value, "Raw data");
        assert_eq!(description.value_pos, SourcePosition::new(4, 17));

        let version = &lines[0];
        assert_eq!(version.section, "version");
        assert_eq!(version.indent, 0);
        assert_eq!(version.value, "2");
    }

    #[test]
    fn test_model_positions_skip_columns() {
        let mut positions = SchemaPositions::scan(SCHEMA);
        assert_eq!(positions.model("customers"), Some(SourcePosition::new(16, 10)));
        assert_eq!(positions.model("orders"), Some(SourcePosition::new(12, 10)));
        assert_eq!(positions.model("payments"), None);
    }

    #[test]
    fn test_source_and_table_positions() {
        let mut positions = SchemaPositions::scan(SCHEMA);
        let (handle, source) = positions.source("jaffle_shop").unwrap();
        assert_eq!(source, SourcePosition::new(3, 10));
        assert_eq!(positions.table(&handle, "customers"), Some(SourcePosition::new(9, 14)));
        assert_eq!(positions.table(&handle, "orders"), Some(SourcePosition::new(6, 14)));
    }

    #[test]
    fn test_duplicate_names_are_claimed_in_order() {
        let text = "models:\n  - name: a\n  - name: a\n";
        let mut positions = SchemaPositions::scan(text);
        assert_eq!(positions.model("a"), Some(SourcePosition::new(1, 10)));
        assert_eq!(positions.model("a"), Some(SourcePosition::new(2, 10)));
        assert_eq!(positions.model("a"), None);
    }

    #[test]
    fn test_variable_positions_with_project_overlay() {
        let text = "name: jaffle_shop\nvars:\n  start_date: '2020-01-01'\n  region: us\n  jaffle_shop:\n    region: eu\n    payment_methods:\n      - card\nmodels:\n  region: x\n";
        let positions = variable_positions(text, "jaffle_shop");
        assert_eq!(positions["start_date"], SourcePosition::new(2, 2));
        assert_eq!(positions["region"], SourcePosition::new(5, 4));
        assert_eq!(positions["payment_methods"], SourcePosition::new(6, 4));
        assert!(!positions.contains_key("jaffle_shop"));
    }

    #[test]
    fn test_quoted_keys_and_block_values() {
        let lines = scan_keys("\"quoted key\": 1\nblock:\n  - item\n");
        assert_eq!(lines[0].key, "quoted key");
        assert_eq!(lines[1].key, "block");
        assert_eq!(lines[1].value, "");
        assert_eq!(lines.len(), 2);
    }
}
