// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion context detection
//!
//! The context is chosen from the text before the cursor on the cursor
//! line, checked in this order:
//!
//! ```text
//! ... ref('ord|        → Ref
//! ... source("ra|      → Source
//! ... var('sta|        → Var
//! {{ ...|              → Macro
//! anything else        → Function
//! ```

use regex::Regex;
use std::sync::LazyLock;

static REF_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bref\((['"])[A-Za-z_0-9]*$"#).expect("valid ref context regex")
});

static SOURCE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bsource\((['"])[A-Za-z_0-9]*$"#).expect("valid source context regex")
});

static VAR_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bvar\((['"])[A-Za-z_0-9]*$"#).expect("valid var context regex")
});

static EXPR_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*").expect("valid template open regex"));

static CALL_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*(ref|source|var)\((['"])"#).expect("valid call opener regex")
});

/// What the user is completing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionContext {
    /// Inside `ref('`
    Ref { quote: char },
    /// Inside `source('`
    Source { quote: char },
    /// Inside `var('`
    Var { quote: char },
    /// After a `{{` opener
    Macro,
    /// Plain SQL
    Function,
}

impl CompletionContext {
    /// The template function whose argument is being completed
    pub fn function_name(&self) -> Option<&'static str> {
        match self {
            CompletionContext::Ref { .. } => Some("ref"),
            CompletionContext::Source { .. } => Some("source"),
            CompletionContext::Var { .. } => Some("var"),
            CompletionContext::Macro | CompletionContext::Function => None,
        }
    }
}

/// Detect the context from the text before the cursor
pub fn detect_context(before_cursor: &str) -> CompletionContext {
    if let Some(quote) = opening_quote(&REF_CALL, before_cursor) {
        CompletionContext::Ref { quote }
    } else if let Some(quote) = opening_quote(&SOURCE_CALL, before_cursor) {
        CompletionContext::Source { quote }
    } else if let Some(quote) = opening_quote(&VAR_CALL, before_cursor) {
        CompletionContext::Var { quote }
    } else if EXPR_OPEN.is_match(before_cursor) {
        CompletionContext::Macro
    } else {
        CompletionContext::Function
    }
}

fn opening_quote(pattern: &Regex, text: &str) -> Option<char> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|quote| quote.as_str().chars().next())
}

/// Text that closes the call being completed
///
/// Only produced when nothing follows the cursor. The `{{ <function>('`
/// opener is reversed with brackets mirrored, so `{{ ref('` closes with
/// `') }}`. A call outside `{{` (e.g. inside `{% set %}`) gets no suffix.
pub fn closing_suffix(before_cursor: &str, after_cursor: &str, function: &str) -> String {
    if !after_cursor.is_empty() {
        return String::new();
    }

    let Some(found) = CALL_OPENER
        .captures_iter(before_cursor)
        .filter(|caps| &caps[1] == function)
        .last()
        .and_then(|caps| caps.get(0))
    else {
        return String::new();
    };

    found
        .as_str()
        .replacen(function, "", 1)
        .chars()
        .rev()
        .map(|ch| match ch {
            '(' => ')',
            '{' => '}',
            other => other,
        })
        .collect()
}
