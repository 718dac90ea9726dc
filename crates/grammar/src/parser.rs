// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Parser
//!
//! A single forward pass over the lexer's output that does two things:
//!
//! 1. **CTE tracking** for top-level `WITH a AS (...), b AS (...)` chains,
//!    so go-to-definition can jump from `from a` to the CTE name.
//! 2. **Template reclassification** inside `{{ }}` / `{% %}` regions:
//!    the identifier in `ref('x')` becomes [`TokenKind::Ref`], `pkg.m(` becomes
//!    [`TokenKind::Package`] + [`TokenKind::Macro`], and so on.
//!
//! The parser never fails. Shapes it does not recognise keep their lexed
//! kind, which is what an editor needs while the user is mid-edit.
//!
//! ```text
//! {{ ref ( ' orders ' ) }}
//!    │   │ │   │
//!    │   │ │   └─ Ident → Ref   (lookback: quote, '(', ref keyword)
//!    │   │ └──── SingleQuote
//!    │   └────── LParen
//!    └────────── RefKeyword
//! ```

use crate::keywords::Keyword;
use crate::lexer::Lexer;
use crate::stream::{TokenId, TokenStream};
use crate::token::{Token, TokenKind};
use dbt_lsp_ir::Dialect;
use std::collections::HashMap;

/// Result of one parse
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// Every token except `Eof`, in document order
    pub stream: TokenStream,
    /// CTE name tokens in declaration order
    pub ctes: Vec<TokenId>,
}

impl ParseOutput {
    pub fn cte_names(&self) -> impl Iterator<Item = &str> {
        self.ctes
            .iter()
            .filter_map(|id| self.stream.get(*id))
            .map(|token| token.literal.as_str())
    }

    /// Same-file definitions keyed by name. The first declaration wins.
    pub fn definitions(&self) -> HashMap<String, TokenId> {
        let mut defs = HashMap::with_capacity(self.ctes.len());
        for id in &self.ctes {
            if let Some(token) = self.stream.get(*id) {
                defs.entry(token.literal.clone()).or_insert(*id);
            }
        }
        defs
    }
}

/// Parse `input` with the keyword table of `dialect`
pub fn parse(input: &str, dialect: Dialect) -> ParseOutput {
    Parser::new(input, dialect).parse()
}

/// Single-pass parser holding a (current, peek) window over the lexer
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    tokens: Vec<Token>,
    peek: Token,
    ctes: CteTracker,
    template: TemplateTracker,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, dialect: Dialect) -> Self {
        let mut lexer = Lexer::new(input, dialect);
        let peek = lexer.next_token();
        Self {
            lexer,
            tokens: Vec::new(),
            peek,
            ctes: CteTracker::default(),
            template: TemplateTracker::default(),
        }
    }

    /// Run to completion
    pub fn parse(mut self) -> ParseOutput {
        while let Some(current) = self.advance() {
            let was_in_template = self.template.in_region();
            self.template.observe(&mut self.tokens, current, self.peek.kind);
            if !was_in_template && !self.template.in_region() {
                self.ctes.step(current, self.tokens[current.index()].kind);
            }
        }

        ParseOutput {
            stream: TokenStream::new(self.tokens),
            ctes: self.ctes.names,
        }
    }

    /// Move peek into the arena and pull a new peek. `None` at end of input.
    fn advance(&mut self) -> Option<TokenId> {
        if self.peek.kind == TokenKind::Eof {
            return None;
        }
        let next = self.lexer.next_token();
        let token = std::mem::replace(&mut self.peek, next);
        self.tokens.push(token);
        Some(TokenId::from(self.tokens.len() - 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CteState {
    #[default]
    Idle,
    /// After `WITH` or a separating comma
    ExpectName,
    /// After the name; only `AS` or a column list continues the CTE
    ExpectAs,
    /// After `AS`, skipping modifiers up to `(`
    ExpectBody,
    /// Inside the body; the counter is the open paren depth
    InBody(u32),
    /// Body closed; a comma continues the chain
    AfterBody,
}

/// Walks `WITH name AS (...), ...` using only a paren counter
#[derive(Debug, Default)]
struct CteTracker {
    state: CteState,
    /// Paren depth outside CTE bodies; `WITH` only counts at depth 0
    depth: u32,
    names: Vec<TokenId>,
}

impl CteTracker {
    fn step(&mut self, id: TokenId, kind: TokenKind) {
        match self.state {
            CteState::Idle => match kind {
                TokenKind::LParen => self.depth += 1,
                TokenKind::RParen => self.depth = self.depth.saturating_sub(1),
                TokenKind::Keyword(Keyword::With) if self.depth == 0 => {
                    self.state = CteState::ExpectName;
                }
                _ => {}
            },
            CteState::ExpectName => match kind {
                TokenKind::Ident => {
                    self.names.push(id);
                    self.state = CteState::ExpectAs;
                }
                TokenKind::Keyword(Keyword::Recursive) => {}
                _ => {
                    self.state = CteState::Idle;
                    self.step(id, kind);
                }
            },
            CteState::ExpectAs => match kind {
                TokenKind::Keyword(Keyword::As) => self.state = CteState::ExpectBody,
                TokenKind::LParen => self.state = CteState::InBody(1),
                // `timestamp with time zone`: the name was not a CTE
                _ => {
                    self.names.pop();
                    self.state = CteState::Idle;
                    self.step(id, kind);
                }
            },
            CteState::ExpectBody => {
                if kind == TokenKind::LParen {
                    self.state = CteState::InBody(1);
                }
            }
            CteState::InBody(depth) => match kind {
                TokenKind::LParen => self.state = CteState::InBody(depth + 1),
                TokenKind::RParen if depth <= 1 => self.state = CteState::AfterBody,
                TokenKind::RParen => self.state = CteState::InBody(depth - 1),
                _ => {}
            },
            CteState::AfterBody => match kind {
                TokenKind::Comma => self.state = CteState::ExpectName,
                // `name (col, ...) AS (` : the first parens were a column list
                TokenKind::Keyword(Keyword::As) => self.state = CteState::ExpectBody,
                _ => {
                    self.state = CteState::Idle;
                    self.step(id, kind);
                }
            },
        }
    }
}

/// Tracks template regions and retags identifiers inside them
#[derive(Debug, Default)]
struct TemplateTracker {
    region: Option<TokenKind>,
    /// Paren depth of an open `config(...)` call
    config_depth: Option<u32>,
}

impl TemplateTracker {
    fn in_region(&self) -> bool {
        self.region.is_some()
    }

    fn observe(&mut self, tokens: &mut [Token], current: TokenId, peek: TokenKind) {
        let kind = tokens[current.index()].kind;

        if kind.opens_template() {
            self.region = Some(kind);
            self.config_depth = None;
            return;
        }
        if kind.closes_template() {
            self.region = None;
            self.config_depth = None;
            return;
        }

        if !self.in_region() {
            // Outside delimiters `ref`, `source`, ... are ordinary SQL names
            if kind.is_template_keyword() {
                tokens[current.index()].kind = TokenKind::Ident;
            }
            return;
        }

        if let Some(depth) = self.config_depth {
            self.config_depth = match kind {
                TokenKind::LParen => Some(depth + 1),
                TokenKind::RParen if depth <= 1 => None,
                TokenKind::RParen => Some(depth - 1),
                _ => Some(depth),
            };
            return;
        }

        match kind {
            TokenKind::Config if peek == TokenKind::LParen => self.config_depth = Some(0),
            TokenKind::Ident => classify_identifier(tokens, current, peek),
            _ => {}
        }
    }
}

fn kind_at(tokens: &[Token], current: TokenId, steps: u32) -> Option<TokenKind> {
    current
        .back(steps)
        .and_then(|id| tokens.get(id.index()))
        .map(|token| token.kind)
}

fn retag(tokens: &mut [Token], id: TokenId, kind: TokenKind) {
    if let Some(token) = tokens.get_mut(id.index()) {
        token.kind = kind;
    }
}

fn is_quote(kind: Option<TokenKind>) -> bool {
    kind.is_some_and(TokenKind::is_quote)
}

/// Decide what an identifier inside a template region really is
fn classify_identifier(tokens: &mut [Token], current: TokenId, peek: TokenKind) {
    let [b1, b2, b3, b4] = [1, 2, 3, 4].map(|steps| kind_at(tokens, current, steps));

    // <call> ( ' ident
    if is_quote(b1) && b2 == Some(TokenKind::LParen) {
        let kind = match b3 {
            Some(TokenKind::RefKeyword) => Some(TokenKind::Ref),
            Some(TokenKind::VarKeyword) => Some(TokenKind::Var),
            Some(TokenKind::SourceKeyword) => Some(TokenKind::Source),
            _ => None,
        };
        if let Some(kind) = kind {
            retag(tokens, current, kind);
            return;
        }
    }

    // source('s', 'table')  /  ref('package', 'model')
    if is_quote(b1) && b2 == Some(TokenKind::Comma) && is_quote(b3) {
        match b4 {
            Some(TokenKind::Source) => {
                retag(tokens, current, TokenKind::SourceTable);
                return;
            }
            Some(TokenKind::Ref) => {
                if let Some(first) = current.back(4) {
                    retag(tokens, first, TokenKind::Package);
                }
                retag(tokens, current, TokenKind::Ref);
                return;
            }
            _ => {}
        }
    }

    if peek != TokenKind::LParen {
        return;
    }

    // pkg . macro (
    if b1 == Some(TokenKind::Dot) {
        if b2 == Some(TokenKind::Ident) {
            if let Some(package) = current.back(2) {
                retag(tokens, package, TokenKind::Package);
            }
            retag(tokens, current, TokenKind::Macro);
        }
        return;
    }

    retag(tokens, current, TokenKind::Macro);
}
