// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! PostgreSQL builtin function definitions
//!
//! Redshift shares this list.

use super::{common, merge, params};
use crate::{FunctionMetadata, FunctionType};

/// Get all builtin PostgreSQL functions
pub fn all_functions() -> Vec<FunctionMetadata> {
    merge(common::all_functions(), extra_functions())
}

fn extra_functions() -> Vec<FunctionMetadata> {
    vec![
        FunctionMetadata::new("STRING_AGG")
            .with_parameters(params(&["expr", "delimiter"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Concatenate values with a delimiter"),
        FunctionMetadata::new("ARRAY_AGG")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Collect values into an array"),
        FunctionMetadata::new("BOOL_OR")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("True if any input value is true"),
        FunctionMetadata::new("BOOL_AND")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("True if every input value is true"),
        FunctionMetadata::new("JSONB_AGG")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Aggregate values as a JSONB array"),
        FunctionMetadata::new("NOW")
            .with_description("Current date and time at the start of the transaction"),
        FunctionMetadata::new("DATE_TRUNC")
            .with_parameters(params(&["field", "source"]))
            .with_description("Truncate a timestamp to the given precision")
            .with_example("date_trunc('month', ordered_at)"),
        FunctionMetadata::new("DATE_PART")
            .with_parameters(params(&["field", "source"]))
            .with_description("Subfield of a date or time value"),
        FunctionMetadata::new("AGE")
            .with_parameters(params(&["timestamp", "[timestamp]"]))
            .with_description("Symbolic interval between two timestamps"),
        FunctionMetadata::new("TO_CHAR")
            .with_parameters(params(&["expr", "format"]))
            .with_description("Format a value as text"),
        FunctionMetadata::new("TO_DATE")
            .with_parameters(params(&["text", "format"]))
            .with_description("Parse a date from text"),
        FunctionMetadata::new("SPLIT_PART")
            .with_parameters(params(&["string", "delimiter", "n"]))
            .with_description("Field `n` of a string split on `delimiter`"),
        FunctionMetadata::new("STRPOS")
            .with_parameters(params(&["string", "substring"]))
            .with_description("Position of `substring`, 0 if absent"),
        FunctionMetadata::new("REGEXP_REPLACE")
            .with_parameters(params(&["source", "pattern", "replacement", "[flags]"]))
            .with_description("Replace substrings matching a POSIX regular expression"),
        FunctionMetadata::new("MD5")
            .with_parameters(params(&["expr"]))
            .with_description("MD5 hash as hex text"),
        FunctionMetadata::new("GENERATE_SERIES")
            .with_parameters(params(&["start", "stop", "[step]"]))
            .with_type(FunctionType::Table)
            .with_description("Rows of values from `start` to `stop`"),
        FunctionMetadata::new("UNNEST")
            .with_parameters(params(&["array..."]))
            .with_type(FunctionType::Table)
            .with_description("Expand arrays into rows"),
    ]
}
