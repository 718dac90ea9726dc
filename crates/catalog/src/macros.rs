// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Macro signatures from `{% macro name(args) %}` tags

use crate::metadata::MacroDetails;
use crate::text::LineIndex;
use dbt_lsp_ir::SourceRange;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static MACRO_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{%-?\s*macro\s+(\w+\(.*?\))\s*-?%\}").expect("valid macro tag regex")
});

/// Every macro defined in `text`, in file order
pub(crate) fn parse_macros(text: &str, path: &Path, package: &str) -> Vec<MacroDetails> {
    let lines = LineIndex::new(text);
    MACRO_TAG
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|signature| {
            let (name, _) = signature.as_str().split_once('(')?;
            Some(MacroDetails {
                name: name.to_string(),
                package: package.to_string(),
                description: signature.as_str().to_string(),
                path: path.to_path_buf(),
                range: SourceRange::new(
                    lines.position(signature.start()),
                    lines.position(signature.end()),
                ),
            })
        })
        .collect()
}
