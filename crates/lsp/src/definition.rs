// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Go-to-Definition
//!
//! - models jump to the top of their file: the model *is* the file
//! - sources, source tables, variables and macros jump to their declaration
//! - any other word jumps to a same-file CTE of that name
//!
//! ```sql
//! with payments as (select * from {{ ref('stg_payments') }})
//! select * from payments
//! --            ^^^^^^^^ jumps to line 0, column 5
//! ```

use crate::document::Document;
use crate::resolver::{Symbol, resolve};
use dbt_lsp_catalog::ProjectCatalog;
use dbt_lsp_ir::{SourcePosition, SourceRange};
use std::path::Path;
use tower_lsp::lsp_types::{Location, Position, Range, Url};
use tracing::warn;

/// Definition of the entity at `position`
///
/// `uri` is the document's own URI, used for same-file definitions.
pub fn find_definition(
    uri: &Url,
    document: &Document,
    catalog: &ProjectCatalog,
    position: Position,
) -> Option<Location> {
    match resolve(document, catalog, position)? {
        Symbol::Model(model) => file_location(&model.path, SourceRange::default()),
        Symbol::Source(source) => file_location(&source.path, source.range),
        Symbol::SourceTable { table, .. } => file_location(&table.path, table.range),
        Symbol::Variable(variable) => file_location(&variable.path, variable.range),
        Symbol::Macro(details) => file_location(&details.path, details.range),
        Symbol::Plain(token) => {
            let definition = document.definition(token.literal())?;
            let start = Position::new(definition.token().line, definition.token().column);
            Some(Location::new(uri.clone(), Range::new(start, start)))
        }
    }
}

/// Location in another file
pub fn file_location(path: &Path, range: SourceRange) -> Option<Location> {
    match Url::from_file_path(path) {
        Ok(uri) => Some(Location::new(uri, to_lsp_range(range))),
        Err(()) => {
            warn!(path = %path.display(), "cannot express path as a file URI");
            None
        }
    }
}

pub fn to_lsp_range(range: SourceRange) -> Range {
    Range::new(to_lsp_position(range.start), to_lsp_position(range.end))
}

fn to_lsp_position(position: SourcePosition) -> Position {
    Position::new(position.line, position.character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbt_lsp_ir::Dialect;
    use dbt_lsp_test_utils::ProjectCatalogBuilder;

    fn uri() -> Url {
        Url::parse("file:///work/jaffle_shop/models/orders.sql").unwrap()
    }

    fn catalog() -> ProjectCatalog {
        ProjectCatalogBuilder::new("jaffle_shop")
            .with_root("/work/jaffle_shop")
            .with_model("stg_payments", "")
            .with_variable("start_date", "2018-01-01")
            .with_macro("jaffle_shop", "cents_to_dollars", "cents_to_dollars(column_name)")
            .build()
    }

    const SQL: &str = "with payments as (select * from {{ ref('stg_payments') }})\nselect {{ cents_to_dollars('amount') }} from payments\nwhere d > {{ var('start_date') }}";

    #[test]
    fn test_model_jumps_to_file_start() {
        let document = Document::new(SQL, Dialect::Generic);
        let location = find_definition(&uri(), &document, &catalog(), Position::new(0, 42)).unwrap();
        assert_eq!(
            location.uri.as_str(),
            "file:///work/jaffle_shop/models/stg_payments.sql"
        );
        assert_eq!(location.range, Range::default());
    }

    #[test]
    fn test_same_file_cte() {
        let document = Document::new(SQL, Dialect::Generic);
        let location = find_definition(&uri(), &document, &catalog(), Position::new(1, 47)).unwrap();
        assert_eq!(location.uri, uri());
        assert_eq!(location.range.start, Position::new(0, 5));
    }

    #[test]
    fn test_macro_and_variable_declarations() {
        let catalog = catalog();
        let document = Document::new(SQL, Dialect::Generic);

        let macro_location = find_definition(&uri(), &document, &catalog, Position::new(1, 12)).unwrap();
        let details = catalog.macro_in("jaffle_shop", "cents_to_dollars").unwrap();
        assert_eq!(macro_location.range, to_lsp_range(details.range));
        assert!(macro_location.uri.path().ends_with("/macros/cents_to_dollars.sql"));

        let var_location = find_definition(&uri(), &document, &catalog, Position::new(2, 20)).unwrap();
        assert!(var_location.uri.path().ends_with("/dbt_project.yml"));
    }

    #[test]
    fn test_misses_return_none() {
        let document = Document::new(SQL, Dialect::Generic);
        // `select` has no definition, whitespace has no token
        assert!(find_definition(&uri(), &document, &catalog(), Position::new(1, 2)).is_none());
        assert!(find_definition(&uri(), &document, &catalog(), Position::new(0, 4)).is_none());
    }
}
