// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Functions shared by every supported warehouse

use super::params;
use crate::{FunctionMetadata, FunctionType};

/// Get the ANSI builtin functions
pub fn all_functions() -> Vec<FunctionMetadata> {
    vec![
        // Aggregate functions
        FunctionMetadata::new("COUNT")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Number of rows, or of non-NULL values of `expr`")
            .with_example("count(distinct customer_id)"),
        FunctionMetadata::new("SUM")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Sum of non-NULL values"),
        FunctionMetadata::new("AVG")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Average of non-NULL values"),
        FunctionMetadata::new("MIN")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Minimum value"),
        FunctionMetadata::new("MAX")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Aggregate)
            .with_description("Maximum value"),
        // Window functions
        FunctionMetadata::new("ROW_NUMBER")
            .with_type(FunctionType::Window)
            .with_description("Sequential row number within the window partition, starting at 1")
            .with_example("row_number() over (partition by customer_id order by order_date)"),
        FunctionMetadata::new("RANK")
            .with_type(FunctionType::Window)
            .with_description("Rank within the partition, with gaps after ties"),
        FunctionMetadata::new("DENSE_RANK")
            .with_type(FunctionType::Window)
            .with_description("Rank within the partition, without gaps after ties"),
        FunctionMetadata::new("LAG")
            .with_parameters(params(&["expr", "[offset]", "[default]"]))
            .with_type(FunctionType::Window)
            .with_description("Value of `expr` from a preceding row of the partition"),
        FunctionMetadata::new("LEAD")
            .with_parameters(params(&["expr", "[offset]", "[default]"]))
            .with_type(FunctionType::Window)
            .with_description("Value of `expr` from a following row of the partition"),
        FunctionMetadata::new("FIRST_VALUE")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Window)
            .with_description("First value in the window frame"),
        FunctionMetadata::new("LAST_VALUE")
            .with_parameters(params(&["expr"]))
            .with_type(FunctionType::Window)
            .with_description("Last value in the window frame"),
        // Scalar functions
        FunctionMetadata::new("ABS")
            .with_parameters(params(&["expr"]))
            .with_description("Absolute value"),
        FunctionMetadata::new("CEIL")
            .with_parameters(params(&["expr"]))
            .with_description("Round up to the nearest integer"),
        FunctionMetadata::new("FLOOR")
            .with_parameters(params(&["expr"]))
            .with_description("Round down to the nearest integer"),
        FunctionMetadata::new("ROUND")
            .with_parameters(params(&["expr", "[scale]"]))
            .with_description("Round to `scale` decimal places"),
        FunctionMetadata::new("MOD")
            .with_parameters(params(&["dividend", "divisor"]))
            .with_description("Remainder of a division"),
        FunctionMetadata::new("CONCAT")
            .with_parameters(params(&["expr..."]))
            .with_description("Concatenate strings"),
        FunctionMetadata::new("LENGTH")
            .with_parameters(params(&["expr"]))
            .with_description("Number of characters in a string"),
        FunctionMetadata::new("LOWER")
            .with_parameters(params(&["expr"]))
            .with_description("Convert to lowercase"),
        FunctionMetadata::new("UPPER")
            .with_parameters(params(&["expr"]))
            .with_description("Convert to uppercase"),
        FunctionMetadata::new("TRIM")
            .with_parameters(params(&["expr", "[characters]"]))
            .with_description("Remove leading and trailing characters, whitespace by default"),
        FunctionMetadata::new("LTRIM")
            .with_parameters(params(&["expr", "[characters]"]))
            .with_description("Remove leading characters"),
        FunctionMetadata::new("RTRIM")
            .with_parameters(params(&["expr", "[characters]"]))
            .with_description("Remove trailing characters"),
        FunctionMetadata::new("REPLACE")
            .with_parameters(params(&["subject", "pattern", "[replacement]"]))
            .with_description("Replace every occurrence of `pattern`"),
        FunctionMetadata::new("SUBSTRING")
            .with_parameters(params(&["expr", "start", "[length]"]))
            .with_description("Substring starting at the 1-based position `start`"),
        FunctionMetadata::new("COALESCE")
            .with_parameters(params(&["expr..."]))
            .with_description("First non-NULL argument")
            .with_example("coalesce(nickname, first_name, 'unknown')"),
        FunctionMetadata::new("NULLIF")
            .with_parameters(params(&["expr1", "expr2"]))
            .with_description("NULL if the arguments are equal, else `expr1`"),
        FunctionMetadata::new("GREATEST")
            .with_parameters(params(&["expr..."]))
            .with_description("Largest argument"),
        FunctionMetadata::new("LEAST")
            .with_parameters(params(&["expr..."]))
            .with_description("Smallest argument"),
        FunctionMetadata::new("CAST")
            .with_parameters(params(&["expr AS type"]))
            .with_description("Convert a value to another data type"),
        FunctionMetadata::new("CURRENT_DATE")
            .with_description("Current date"),
        FunctionMetadata::new("CURRENT_TIMESTAMP")
            .with_description("Current date and time"),
        FunctionMetadata::new("EXTRACT")
            .with_parameters(params(&["part FROM expr"]))
            .with_description("Extract a date or time part"),
    ]
}
