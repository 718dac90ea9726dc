// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect Support
//!
//! A dbt project compiles against exactly one warehouse, named by the `type`
//! field of the active target in `profiles.yml`. The dialect selects which
//! reserved-word table the lexer uses and which builtin function docs are
//! offered for hover and completion.
//!
//! Adapter type strings that are not recognised map to [`Dialect::Generic`],
//! which still lexes ANSI reserved words and template keywords.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported warehouse dialects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Dialect {
    /// Snowflake
    Snowflake,
    /// PostgreSQL
    Postgres,
    /// Amazon Redshift (PostgreSQL family)
    Redshift,
    /// Google BigQuery
    BigQuery,
    /// Databricks / Spark SQL
    Databricks,
    /// DuckDB
    DuckDb,
    /// Anything else: ANSI keywords only
    #[default]
    Generic,
}

impl Dialect {
    /// Map a dbt adapter `type` string to a dialect.
    ///
    /// Unknown adapters fall back to [`Dialect::Generic`].
    pub fn from_profile_type(adapter: &str) -> Self {
        adapter.parse().unwrap_or(Dialect::Generic)
    }

    /// Short identifier as written in `profiles.yml`
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Snowflake => "snowflake",
            Dialect::Postgres => "postgres",
            Dialect::Redshift => "redshift",
            Dialect::BigQuery => "bigquery",
            Dialect::Databricks => "databricks",
            Dialect::DuckDb => "duckdb",
            Dialect::Generic => "generic",
        }
    }

    /// Whether this dialect shares PostgreSQL's reserved words
    pub fn is_postgres_family(&self) -> bool {
        matches!(self, Dialect::Postgres | Dialect::Redshift)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an adapter type string names no known dialect
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snowflake" => Ok(Dialect::Snowflake),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "redshift" => Ok(Dialect::Redshift),
            "bigquery" => Ok(Dialect::BigQuery),
            "databricks" | "spark" => Ok(Dialect::Databricks),
            "duckdb" => Ok(Dialect::DuckDb),
            "generic" | "" => Ok(Dialect::Generic),
            other => Err(UnknownDialect(other.to_string())),
        }
    }
}
