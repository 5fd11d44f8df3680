//! Declared type/input/enum names of a document.
//!
//! Declarations are found with line-based heuristics rather than a Go
//! grammar. Per-struct lookup sits behind [`ScopeResolver`] so a syntax-tree
//! based resolver can replace [`StructScopes`] without touching the parser
//! or the validator.

use regex::Regex;
use std::sync::LazyLock;

use crate::catalogs::{DECLARATION_LOOKAHEAD, INPUT_SUFFIX, SCOPE_LOOKBACK};
use crate::lexer::LineIndex;
use crate::parser::parse_directives;
use crate::types::*;

static RE_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^type\s+([A-Za-z_]\w*)").unwrap());
static RE_STRUCT_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^type\s+([A-Za-z_]\w*)\s+struct\b").unwrap());

/// Resolves the names visible at a position inside a document.
pub trait ScopeResolver {
    /// Scoped names of the declaration enclosing `position`, if known.
    fn scope_for(&self, position: Position) -> Option<&ScopedSymbols>;
}

/// Build the document-wide symbol table.
pub fn build_validation_context(text: &str, check_type_references: bool) -> ValidationContext {
    let index = LineIndex::new(text);
    let mut context = ValidationContext::new(check_type_references);

    for directive in parse_directives(text) {
        let Some(kind) = directive.kind() else {
            continue;
        };
        let target = match kind {
            DirectiveKind::Type => &mut context.types,
            DirectiveKind::Input => &mut context.inputs,
            DirectiveKind::Enum => &mut context.enums,
            DirectiveKind::IgnoreAll => {
                context.ignore_all = true;
                continue;
            }
            _ => continue,
        };

        let name = match directive.param("name").filter(|n| !n.is_empty()) {
            Some(explicit) => Some(explicit.to_string()),
            None => next_declaration(&index, directive.position.line)
                .map(|decl| implicit_name(kind, decl)),
        };
        if let Some(name) = name {
            push_unique(target, name);
        }
    }

    tracing::debug!(
        types = context.types.len(),
        inputs = context.inputs.len(),
        enums = context.enums.len(),
        ignore_all = context.ignore_all,
        "built validation context"
    );
    context
}

/// Name of the first `type X ...` declaration below `line`, skipping `//`
/// comment lines.
fn next_declaration<'a>(index: &LineIndex<'a>, line: usize) -> Option<&'a str> {
    for l in line + 1..=line + DECLARATION_LOOKAHEAD {
        let text = index.line(l)?.trim();
        if text.starts_with("//") {
            continue;
        }
        if let Some(caps) = RE_DECLARATION.captures(text) {
            return caps.get(1).map(|m| m.as_str());
        }
    }
    None
}

/// Name a directive without an explicit `name` gives its declaration.
fn implicit_name(kind: DirectiveKind, declaration: &str) -> String {
    match kind {
        DirectiveKind::Input => format!("{declaration}{INPUT_SUFFIX}"),
        _ => declaration.to_string(),
    }
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}

fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

// ---------------------------------------------------------------------------
// Per-struct scopes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct StructDeclaration {
    name: String,
    line: usize,
    scope: ScopedSymbols,
}

/// Struct declarations of a document with the type/input names declared by
/// the comment block directly above each of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructScopes {
    structs: Vec<StructDeclaration>,
    /// Lines starting with `}` at column 0, ascending.
    closing_lines: Vec<usize>,
}

impl StructScopes {
    pub fn from_text(text: &str) -> Self {
        let index = LineIndex::new(text);
        let mut scopes = StructScopes::default();

        for line_no in 0..index.line_count() {
            let Some(line) = index.line(line_no) else {
                break;
            };
            if line.starts_with('}') {
                scopes.closing_lines.push(line_no);
                continue;
            }
            if let Some(caps) = RE_STRUCT_DECLARATION.captures(line.trim()) {
                let name = caps[1].to_string();
                let scope = scope_from_comment_block(&index, line_no, &name);
                scopes.structs.push(StructDeclaration {
                    name,
                    line: line_no,
                    scope,
                });
            }
        }

        scopes
    }

    /// Scope of a struct by name.
    pub fn get(&self, struct_name: &str) -> Option<&ScopedSymbols> {
        self.structs
            .iter()
            .rev()
            .find(|s| s.name == struct_name)
            .map(|s| &s.scope)
    }

    /// Structs with a non-empty scope, in source order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &ScopedSymbols)> {
        self.structs
            .iter()
            .filter(|s| !s.scope.is_empty())
            .map(|s| (s.name.as_str(), &s.scope))
    }
}

impl ScopeResolver for StructScopes {
    fn scope_for(&self, position: Position) -> Option<&ScopedSymbols> {
        let count = self.structs.partition_point(|s| s.line <= position.line);
        let decl = self.structs.get(count.checked_sub(1)?)?;
        let next_close = self.closing_lines.partition_point(|&l| l <= decl.line);
        let closed = self
            .closing_lines
            .get(next_close)
            .is_some_and(|&l| l < position.line);
        if closed || decl.scope.is_empty() {
            return None;
        }
        Some(&decl.scope)
    }
}

fn scope_from_comment_block(index: &LineIndex<'_>, line: usize, struct_name: &str) -> ScopedSymbols {
    let floor = line.saturating_sub(SCOPE_LOOKBACK);
    let mut block_start = line;
    while block_start > floor {
        match index.line(block_start - 1) {
            Some(prev) if is_comment_line(prev.trim()) => block_start -= 1,
            _ => break,
        }
    }

    let mut scope = ScopedSymbols::default();
    for l in block_start..line {
        let Some(comment) = index.line(l) else {
            break;
        };
        for directive in parse_directives(comment) {
            let explicit = directive
                .param("name")
                .filter(|n| !n.is_empty())
                .map(String::from);
            match directive.kind() {
                Some(DirectiveKind::Type) => push_unique(
                    &mut scope.types,
                    explicit.unwrap_or_else(|| implicit_name(DirectiveKind::Type, struct_name)),
                ),
                Some(DirectiveKind::Input) => push_unique(
                    &mut scope.inputs,
                    explicit.unwrap_or_else(|| implicit_name(DirectiveKind::Input, struct_name)),
                ),
                _ => {}
            }
        }
    }
    scope
}
