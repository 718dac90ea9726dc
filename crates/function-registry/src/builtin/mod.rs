// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin function definitions
//!
//! `common` holds the ANSI functions every warehouse accepts. Each dialect
//! module lists only what it adds or documents differently; [`merge`]
//! layers the two with dialect entries winning.

pub mod bigquery;
pub mod common;
pub mod databricks;
pub mod duckdb;
pub mod postgres;
pub mod snowflake;

use crate::{FunctionMetadata, FunctionParameter};

/// Parameter list from a compact notation: `[name]` is optional and
/// `name...` is variadic.
pub(crate) fn params(names: &[&str]) -> Vec<FunctionParameter> {
    names
        .iter()
        .map(|name| {
            if let Some(inner) = name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
                FunctionParameter::optional(inner)
            } else if let Some(inner) = name.strip_suffix("...") {
                FunctionParameter::variadic(inner)
            } else {
                FunctionParameter::required(*name)
            }
        })
        .collect()
}

/// `base` overlaid with `extra`, sorted by name
pub(crate) fn merge(
    base: Vec<FunctionMetadata>,
    extra: Vec<FunctionMetadata>,
) -> Vec<FunctionMetadata> {
    let mut functions: Vec<FunctionMetadata> = base
        .into_iter()
        .filter(|f| !extra.iter().any(|e| e.name.eq_ignore_ascii_case(&f.name)))
        .collect();
    functions.extend(extra);
    functions.sort_by(|a, b| a.name.cmp(&b.name));
    functions
}
