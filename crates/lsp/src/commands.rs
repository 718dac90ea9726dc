// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Workspace commands
//!
//! `dbt.goToSchema` jumps from a model to its entry in schema YAML:
//!
//! 1. the model referenced under the cursor, when the cursor is on `ref('..')`
//! 2. otherwise the model of the current file (`models/orders.sql` → `orders`)
//!
//! Arguments are either `[uri, position]` or `[{ "uri": .., "position": .. }]`.

use crate::definition::file_location;
use crate::document::Document;
use dbt_lsp_catalog::{ModelDetails, ProjectCatalog};
use dbt_lsp_grammar::TokenKind;
use serde::Deserialize;
use serde_json::Value;
use tower_lsp::lsp_types::{Location, Position, Url};

pub const GO_TO_SCHEMA: &str = "dbt.goToSchema";

/// Commands advertised in `executeCommandProvider`
pub fn supported_commands() -> Vec<String> {
    vec![GO_TO_SCHEMA.to_string()]
}

/// Arguments of `dbt.goToSchema`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoToSchemaArgs {
    pub uri: Url,
    pub position: Position,
}

impl GoToSchemaArgs {
    pub fn from_arguments(arguments: &[Value]) -> Result<Self, CommandError> {
        match arguments {
            [object @ Value::Object(_)] => Ok(serde_json::from_value(object.clone())?),
            [uri, position, ..] => Ok(Self {
                uri: serde_json::from_value(uri.clone())?,
                position: serde_json::from_value(position.clone())?,
            }),
            _ => Err(CommandError::MissingArguments {
                command: GO_TO_SCHEMA,
                expected: "uri and position",
            }),
        }
    }
}

/// Schema YAML location for the model at the cursor or of the current file
pub fn go_to_schema(
    args: &GoToSchemaArgs,
    document: Option<&Document>,
    catalog: &ProjectCatalog,
) -> Option<Location> {
    let referenced = document
        .and_then(|document| document.token_at(args.position))
        .filter(|token| token.kind() == TokenKind::Ref)
        .and_then(|token| catalog.model(token.literal()))
        .and_then(schema_location);
    if referenced.is_some() {
        return referenced;
    }

    let name = model_name_from_uri(&args.uri)?;
    catalog.model(&name).and_then(schema_location)
}

fn schema_location(model: &ModelDetails) -> Option<Location> {
    let schema = model.schema.as_ref()?;
    file_location(&schema.path, schema.range)
}

/// File stem of a `.sql` document
pub fn model_name_from_uri(uri: &Url) -> Option<String> {
    let file = uri.path_segments()?.next_back()?;
    file.strip_suffix(".sql")
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

/// Command errors
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} expects {expected}")]
    MissingArguments {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Invalid command arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbt_lsp_ir::{Dialect, SourcePosition, SourceRange};
    use dbt_lsp_test_utils::ProjectCatalogBuilder;
    use serde_json::json;
    use std::path::PathBuf;

    fn catalog() -> ProjectCatalog {
        ProjectCatalogBuilder::new("jaffle_shop")
            .with_root("/work/jaffle_shop")
            .with_model("orders", "")
            .with_model_schema(
                "orders",
                "/work/jaffle_shop/models/schema.yml",
                SourceRange::point(SourcePosition::new(3, 10)),
            )
            .with_model("customers", "")
            .with_model_schema(
                "customers",
                "/work/jaffle_shop/models/schema.yml",
                SourceRange::point(SourcePosition::new(12, 10)),
            )
            .build()
    }

    fn args(uri: &str, line: u32, character: u32) -> GoToSchemaArgs {
        GoToSchemaArgs {
            uri: Url::parse(uri).unwrap(),
            position: Position::new(line, character),
        }
    }

    #[test]
    fn test_arguments_both_shapes() {
        let positional = vec![
            json!("file:///work/jaffle_shop/models/orders.sql"),
            json!({ "line": 1, "character": 4 }),
        ];
        let object = vec![json!({
            "uri": "file:///work/jaffle_shop/models/orders.sql",
            "position": { "line": 1, "character": 4 }
        })];
        let expected = args("file:///work/jaffle_shop/models/orders.sql", 1, 4);

        assert_eq!(GoToSchemaArgs::from_arguments(&positional).unwrap(), expected);
        assert_eq!(GoToSchemaArgs::from_arguments(&object).unwrap(), expected);
        assert!(matches!(
            GoToSchemaArgs::from_arguments(&[]),
            Err(CommandError::MissingArguments { .. })
        ));
        assert!(matches!(
            GoToSchemaArgs::from_arguments(&[json!(1), json!(2)]),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_ref_under_cursor_wins() {
        let document = Document::new("select * from {{ ref('customers') }}", Dialect::Generic);
        let args = args("file:///work/jaffle_shop/models/orders.sql", 0, 24);
        let location = go_to_schema(&args, Some(&document), &catalog()).unwrap();
        assert_eq!(location.range.start, Position::new(12, 10));
        assert_eq!(
            location.uri.to_file_path().unwrap(),
            PathBuf::from("/work/jaffle_shop/models/schema.yml")
        );
    }

    #[test]
    fn test_falls_back_to_current_file() {
        let document = Document::new("select * from {{ ref('customers') }}", Dialect::Generic);
        let args = args("file:///work/jaffle_shop/models/orders.sql", 0, 2);
        let location = go_to_schema(&args, Some(&document), &catalog()).unwrap();
        assert_eq!(location.range.start, Position::new(3, 10));
    }

    #[test]
    fn test_no_schema_entry() {
        let model_args = args("file:///work/jaffle_shop/models/payments.sql", 0, 0);
        assert!(go_to_schema(&model_args, None, &catalog()).is_none());

        let schema_args = args("file:///work/jaffle_shop/models/schema.yml", 0, 0);
        assert!(go_to_schema(&schema_args, None, &catalog()).is_none());
    }

    #[test]
    fn test_model_name_from_uri() {
        let uri = Url::parse("file:///work/jaffle_shop/models/staging/stg_orders.sql").unwrap();
        assert_eq!(model_name_from_uri(&uri).as_deref(), Some("stg_orders"));
        let uri = Url::parse("file:///work/jaffle_shop/README.md").unwrap();
        assert_eq!(model_name_from_uri(&uri), None);
    }
}
