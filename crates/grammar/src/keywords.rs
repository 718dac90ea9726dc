// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Keyword tables
//!
//! Each dialect has a fixed list of reserved words. The lexer consults one
//! [`KeywordTable`] per dialect, built once on first use. The template
//! keywords `ref`, `var`, `source` and `config` are merged into every table.
//!
//! Lookups are case-insensitive: identifiers are lowered into a stack
//! buffer before hashing, so no allocation happens per identifier.

use crate::token::TokenKind;
use dbt_lsp_ir::Dialect;
use std::collections::HashMap;
use std::sync::OnceLock;

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// SQL reserved words across all supported dialects
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// Every known keyword
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            /// Lower-case spelling
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    Account => "account",
    All => "all",
    Alter => "alter",
    And => "and",
    Any => "any",
    As => "as",
    Between => "between",
    By => "by",
    Case => "case",
    Cast => "cast",
    Check => "check",
    Column => "column",
    Connect => "connect",
    Connection => "connection",
    Constraint => "constraint",
    Create => "create",
    Cross => "cross",
    Current => "current",
    CurrentDate => "current_date",
    CurrentTime => "current_time",
    CurrentTimestamp => "current_timestamp",
    CurrentUser => "current_user",
    Database => "database",
    Delete => "delete",
    Distinct => "distinct",
    Drop => "drop",
    Else => "else",
    End => "end",
    Except => "except",
    Exists => "exists",
    False => "false",
    Fetch => "fetch",
    Following => "following",
    For => "for",
    From => "from",
    Full => "full",
    Grant => "grant",
    Group => "group",
    Gscluster => "gscluster",
    Having => "having",
    Ilike => "ilike",
    In => "in",
    Increment => "increment",
    Inner => "inner",
    Insert => "insert",
    Intersect => "intersect",
    Into => "into",
    Is => "is",
    Issue => "issue",
    Join => "join",
    Lateral => "lateral",
    Left => "left",
    Like => "like",
    Limit => "limit",
    Localtime => "localtime",
    Localtimestamp => "localtimestamp",
    Minus => "minus",
    Natural => "natural",
    Not => "not",
    Null => "null",
    Of => "of",
    Offset => "offset",
    On => "on",
    Only => "only",
    Or => "or",
    Order => "order",
    Organization => "organization",
    Qualify => "qualify",
    Recursive => "recursive",
    Regexp => "regexp",
    Returning => "returning",
    Revoke => "revoke",
    Right => "right",
    Rlike => "rlike",
    Row => "row",
    Rows => "rows",
    Sample => "sample",
    Schema => "schema",
    Select => "select",
    Set => "set",
    Some => "some",
    Start => "start",
    Table => "table",
    Tablesample => "tablesample",
    Then => "then",
    To => "to",
    Trigger => "trigger",
    True => "true",
    TryCast => "try_cast",
    Union => "union",
    Unique => "unique",
    Unnest => "unnest",
    Update => "update",
    Using => "using",
    Values => "values",
    View => "view",
    When => "when",
    Whenever => "whenever",
    Where => "where",
    Window => "window",
    With => "with",
}

/// Reserved in every dialect
const ANSI: &[Keyword] = &[
    Keyword::All,
    Keyword::And,
    Keyword::Any,
    Keyword::As,
    Keyword::Between,
    Keyword::By,
    Keyword::Case,
    Keyword::Cast,
    Keyword::Check,
    Keyword::Column,
    Keyword::Constraint,
    Keyword::Create,
    Keyword::Cross,
    Keyword::CurrentDate,
    Keyword::CurrentTime,
    Keyword::CurrentTimestamp,
    Keyword::CurrentUser,
    Keyword::Delete,
    Keyword::Distinct,
    Keyword::Drop,
    Keyword::Else,
    Keyword::End,
    Keyword::Exists,
    Keyword::False,
    Keyword::For,
    Keyword::From,
    Keyword::Full,
    Keyword::Grant,
    Keyword::Group,
    Keyword::Having,
    Keyword::In,
    Keyword::Inner,
    Keyword::Insert,
    Keyword::Intersect,
    Keyword::Into,
    Keyword::Is,
    Keyword::Join,
    Keyword::Left,
    Keyword::Like,
    Keyword::Natural,
    Keyword::Not,
    Keyword::Null,
    Keyword::Of,
    Keyword::On,
    Keyword::Or,
    Keyword::Order,
    Keyword::Recursive,
    Keyword::Revoke,
    Keyword::Right,
    Keyword::Select,
    Keyword::Set,
    Keyword::Some,
    Keyword::Table,
    Keyword::Then,
    Keyword::To,
    Keyword::True,
    Keyword::Union,
    Keyword::Unique,
    Keyword::Update,
    Keyword::Using,
    Keyword::Values,
    Keyword::When,
    Keyword::Where,
    Keyword::With,
];

const SNOWFLAKE_EXTRA: &[Keyword] = &[
    Keyword::Account,
    Keyword::Alter,
    Keyword::Connect,
    Keyword::Connection,
    Keyword::Current,
    Keyword::Database,
    Keyword::Following,
    Keyword::Gscluster,
    Keyword::Ilike,
    Keyword::Increment,
    Keyword::Issue,
    Keyword::Lateral,
    Keyword::Localtime,
    Keyword::Localtimestamp,
    Keyword::Minus,
    Keyword::Organization,
    Keyword::Qualify,
    Keyword::Regexp,
    Keyword::Rlike,
    Keyword::Row,
    Keyword::Rows,
    Keyword::Sample,
    Keyword::Schema,
    Keyword::Start,
    Keyword::Tablesample,
    Keyword::Trigger,
    Keyword::TryCast,
    Keyword::View,
    Keyword::Whenever,
];

const POSTGRES_EXTRA: &[Keyword] = &[
    Keyword::Except,
    Keyword::Fetch,
    Keyword::Ilike,
    Keyword::Lateral,
    Keyword::Limit,
    Keyword::Localtime,
    Keyword::Localtimestamp,
    Keyword::Offset,
    Keyword::Only,
    Keyword::Returning,
    Keyword::Window,
];

const BIGQUERY_EXTRA: &[Keyword] = &[
    Keyword::Except,
    Keyword::Lateral,
    Keyword::Limit,
    Keyword::Qualify,
    Keyword::Rows,
    Keyword::Tablesample,
    Keyword::Unnest,
    Keyword::Window,
];

const DATABRICKS_EXTRA: &[Keyword] = &[
    Keyword::Except,
    Keyword::Lateral,
    Keyword::Limit,
    Keyword::Minus,
    Keyword::Offset,
    Keyword::Qualify,
    Keyword::Regexp,
    Keyword::Rlike,
    Keyword::Tablesample,
    Keyword::Window,
];

const DUCKDB_EXTRA: &[Keyword] = &[
    Keyword::Except,
    Keyword::Ilike,
    Keyword::Lateral,
    Keyword::Limit,
    Keyword::Offset,
    Keyword::Qualify,
    Keyword::Returning,
    Keyword::Window,
];

const TEMPLATE: &[(&str, TokenKind)] = &[
    ("ref", TokenKind::RefKeyword),
    ("var", TokenKind::VarKeyword),
    ("source", TokenKind::SourceKeyword),
    ("config", TokenKind::Config),
];

/// Longest keyword spelling; anything longer cannot match
const MAX_KEYWORD_LEN: usize = 24;

/// Immutable identifier → kind mapping for one dialect
#[derive(Debug)]
pub struct KeywordTable {
    words: HashMap<&'static str, TokenKind>,
}

impl KeywordTable {
    fn build(extra: &[Keyword]) -> Self {
        let mut words = HashMap::with_capacity(ANSI.len() + extra.len() + TEMPLATE.len());
        for kw in ANSI.iter().chain(extra) {
            words.insert(kw.as_str(), TokenKind::Keyword(*kw));
        }
        for (text, kind) in TEMPLATE {
            words.insert(*text, *kind);
        }
        Self { words }
    }

    /// Kind for an identifier, if it is reserved
    pub fn lookup(&self, ident: &str) -> Option<TokenKind> {
        if ident.len() > MAX_KEYWORD_LEN {
            return None;
        }
        let mut buf = [0u8; MAX_KEYWORD_LEN];
        let lowered = &mut buf[..ident.len()];
        lowered.copy_from_slice(ident.as_bytes());
        lowered.make_ascii_lowercase();
        let lowered = std::str::from_utf8(lowered).ok()?;
        self.words.get(lowered).copied()
    }

    /// Whether `keyword` is reserved in this table
    pub fn contains(&self, keyword: Keyword) -> bool {
        self.words.contains_key(keyword.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The keyword table for `dialect`
pub fn keyword_table(dialect: Dialect) -> &'static KeywordTable {
    static SNOWFLAKE: OnceLock<KeywordTable> = OnceLock::new();
    static POSTGRES: OnceLock<KeywordTable> = OnceLock::new();
    static BIGQUERY: OnceLock<KeywordTable> = OnceLock::new();
    static DATABRICKS: OnceLock<KeywordTable> = OnceLock::new();
    static DUCKDB: OnceLock<KeywordTable> = OnceLock::new();
    static GENERIC: OnceLock<KeywordTable> = OnceLock::new();

    match dialect {
        Dialect::Snowflake => SNOWFLAKE.get_or_init(|| KeywordTable::build(SNOWFLAKE_EXTRA)),
        Dialect::Postgres | Dialect::Redshift => {
            POSTGRES.get_or_init(|| KeywordTable::build(POSTGRES_EXTRA))
        }
        Dialect::BigQuery => BIGQUERY.get_or_init(|| KeywordTable::build(BIGQUERY_EXTRA)),
        Dialect::Databricks => DATABRICKS.get_or_init(|| KeywordTable::build(DATABRICKS_EXTRA)),
        Dialect::DuckDb => DUCKDB.get_or_init(|| KeywordTable::build(DUCKDB_EXTRA)),
        _ => GENERIC.get_or_init(|| KeywordTable::build(&[])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = keyword_table(Dialect::Snowflake);
        assert_eq!(table.lookup("select"), Some(TokenKind::Keyword(Keyword::Select)));
        assert_eq!(table.lookup("SELECT"), Some(TokenKind::Keyword(Keyword::Select)));
        assert_eq!(table.lookup("With"), Some(TokenKind::Keyword(Keyword::With)));
        assert_eq!(table.lookup("orders"), None);
    }

    #[test]
    fn test_template_keywords_in_every_table() {
        for dialect in [
            Dialect::Snowflake,
            Dialect::Postgres,
            Dialect::BigQuery,
            Dialect::Databricks,
            Dialect::DuckDb,
            Dialect::Generic,
        ] {
            let table = keyword_table(dialect);
            assert_eq!(table.lookup("ref"), Some(TokenKind::RefKeyword));
            assert_eq!(table.lookup("var"), Some(TokenKind::VarKeyword));
            assert_eq!(table.lookup("source"), Some(TokenKind::SourceKeyword));
            assert_eq!(table.lookup("config"), Some(TokenKind::Config));
        }
    }

    #[test]
    fn test_dialect_specific_words() {
        assert!(keyword_table(Dialect::Snowflake).contains(Keyword::Qualify));
        assert!(!keyword_table(Dialect::Postgres).contains(Keyword::Qualify));
        assert!(keyword_table(Dialect::Postgres).contains(Keyword::Returning));
        assert!(keyword_table(Dialect::Redshift).contains(Keyword::Returning));
        assert!(!keyword_table(Dialect::Generic).contains(Keyword::Limit));
    }

    #[test]
    fn test_long_identifier_is_not_keyword() {
        let table = keyword_table(Dialect::Generic);
        assert_eq!(table.lookup("a_really_long_identifier_name_that_is_not_reserved"), None);
    }

    #[test]
    fn test_max_keyword_len_covers_all() {
        assert!(Keyword::ALL.iter().all(|kw| kw.as_str().len() <= MAX_KEYWORD_LEN));
    }
}
