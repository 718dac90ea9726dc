// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # dbt Language Server - Shared Vocabulary
//!
//! Types shared by every layer of the server:
//! - [`Dialect`]: the warehouse SQL variant a project compiles against
//! - [`SourcePosition`] / [`SourceRange`]: zero-based line/character locations
//! - [`FunctionMetadata`]: builtin function documentation entries

pub mod dialect;
pub mod metadata;
pub mod position;

pub use dialect::{Dialect, UnknownDialect};
pub use metadata::{FunctionMetadata, FunctionParameter, FunctionType};
pub use position::{SourcePosition, SourceRange};
