use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::catalogs::{ACCESS_KEYS, WILDCARD};

// ---------------------------------------------------------------------------
// Source location
// ---------------------------------------------------------------------------

/// Line/character position, both 0-based.
///
/// `character` counts UTF-16 code units since the last newline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

/// Half-open `[start, end)` byte offsets into the whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

// ---------------------------------------------------------------------------
// Tag option values
// ---------------------------------------------------------------------------

/// Uniform view of a single tag option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    #[default]
    Absent,
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl OptionValue {
    pub fn is_present(&self) -> bool {
        !matches!(self, OptionValue::Absent)
    }
}

/// A list of type names, either the wildcard `[*]` or explicit names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeList(Vec<String>);

impl TypeList {
    pub fn wildcard() -> Self {
        Self(vec![WILDCARD.to_string()])
    }

    /// Build a list from names. An empty list, or one mentioning `*`,
    /// collapses to the wildcard.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() || names.iter().any(|n| n == WILDCARD) {
            Self::wildcard()
        } else {
            Self(names)
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.0.len() == 1 && self.0[0] == WILDCARD
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Explicitly listed names; empty for the wildcard.
    pub fn explicit_names(&self) -> &[String] {
        if self.is_wildcard() {
            &[]
        } else {
            &self.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deprecation {
    Flag,
    Reason(String),
}

/// Parsed options of one tag: known options typed, anything else kept in
/// `extra` verbatim, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    pub name: Option<String>,
    pub type_override: Option<String>,
    pub description: Option<String>,
    pub deprecated: Option<Deprecation>,
    pub optional: bool,
    pub required: bool,
    pub force_resolver: bool,
    pub include: Option<TypeList>,
    pub omit: Option<TypeList>,
    pub ignore: Option<TypeList>,
    pub ro: Option<TypeList>,
    pub wo: Option<TypeList>,
    pub rw: Option<TypeList>,
    pub extra: IndexMap<String, OptionValue>,
}

impl TagOptions {
    /// The type list stored under a list key.
    pub fn list(&self, key: &str) -> Option<&TypeList> {
        match key {
            "include" => self.include.as_ref(),
            "omit" => self.omit.as_ref(),
            "ignore" => self.ignore.as_ref(),
            "ro" => self.ro.as_ref(),
            "wo" => self.wo.as_ref(),
            "rw" => self.rw.as_ref(),
            _ => None,
        }
    }

    /// Store a type list; returns false when `key` is not a list key.
    pub fn set_list(&mut self, key: &str, list: TypeList) -> bool {
        let slot = match key {
            "include" => &mut self.include,
            "omit" => &mut self.omit,
            "ignore" => &mut self.ignore,
            "ro" => &mut self.ro,
            "wo" => &mut self.wo,
            "rw" => &mut self.rw,
            _ => return false,
        };
        *slot = Some(list);
        true
    }

    /// Look up any option by key, known or not.
    pub fn get(&self, key: &str) -> OptionValue {
        match key {
            "name" => text_value(self.name.as_deref()),
            "type" => text_value(self.type_override.as_deref()),
            "description" => text_value(self.description.as_deref()),
            "deprecated" => match &self.deprecated {
                Some(Deprecation::Flag) => OptionValue::Flag(true),
                Some(Deprecation::Reason(r)) => OptionValue::Text(r.clone()),
                None => OptionValue::Absent,
            },
            "optional" => flag_value(self.optional),
            "required" => flag_value(self.required),
            "forceResolver" | "force_resolver" => flag_value(self.force_resolver),
            "include" | "omit" | "ignore" | "ro" | "wo" | "rw" => self
                .list(key)
                .map(|l| OptionValue::List(l.names().to_vec()))
                .unwrap_or_default(),
            _ => self.extra.get(key).cloned().unwrap_or_default(),
        }
    }

    /// All present options: known keys in a fixed order, then extras in
    /// source order.
    pub fn entries(&self) -> Vec<(&str, OptionValue)> {
        const KNOWN: [&str; 13] = [
            "name",
            "type",
            "description",
            "deprecated",
            "optional",
            "required",
            "forceResolver",
            "include",
            "omit",
            "ignore",
            "ro",
            "wo",
            "rw",
        ];
        let mut entries: Vec<(&str, OptionValue)> = KNOWN
            .iter()
            .map(|k| (*k, self.get(k)))
            .filter(|(_, v)| v.is_present())
            .collect();
        entries.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v.clone())));
        entries
    }

    /// Which of `ro`/`wo`/`rw` are set, in that order.
    pub fn access_modifiers(&self) -> Vec<&'static str> {
        ACCESS_KEYS
            .iter()
            .copied()
            .filter(|k| self.list(k).is_some())
            .collect()
    }
}

fn text_value(s: Option<&str>) -> OptionValue {
    s.map(|s| OptionValue::Text(s.to_string()))
        .unwrap_or_default()
}

fn flag_value(set: bool) -> OptionValue {
    if set {
        OptionValue::Flag(true)
    } else {
        OptionValue::Absent
    }
}

impl Serialize for TagOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Parsed records
// ---------------------------------------------------------------------------

/// One `` `gql:"..."` `` literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Go field name on the tag's line, when recognisable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Text between `gql:"` and the closing `"`, unmodified.
    pub raw_tag: String,
    pub options: TagOptions,
    pub position: Position,
    pub range: ByteRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Type,
    Input,
    Enum,
    EnumValue,
    Namespace,
    IgnoreAll,
    UseModelDirective,
    TypeExtraField,
    InputExtraField,
}

impl DirectiveKind {
    const ALL: [DirectiveKind; 9] = [
        DirectiveKind::Type,
        DirectiveKind::Input,
        DirectiveKind::Enum,
        DirectiveKind::EnumValue,
        DirectiveKind::Namespace,
        DirectiveKind::IgnoreAll,
        DirectiveKind::UseModelDirective,
        DirectiveKind::TypeExtraField,
        DirectiveKind::InputExtraField,
    ];

    /// Classify a directive name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(name))
    }

    /// Canonical spelling, e.g. `GqlType`.
    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveKind::Type => "GqlType",
            DirectiveKind::Input => "GqlInput",
            DirectiveKind::Enum => "GqlEnum",
            DirectiveKind::EnumValue => "GqlEnumValue",
            DirectiveKind::Namespace => "GqlNamespace",
            DirectiveKind::IgnoreAll => "GqlIgnoreAll",
            DirectiveKind::UseModelDirective => "GqlUseModelDirective",
            DirectiveKind::TypeExtraField => "GqlTypeExtraField",
            DirectiveKind::InputExtraField => "GqlInputExtraField",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `@Gql...(...)` occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Name as written, without the `@`.
    #[serde(rename = "type")]
    pub name: String,
    pub params: IndexMap<String, String>,
    pub position: Position,
    pub range: ByteRange,
}

impl Directive {
    pub fn kind(&self) -> Option<DirectiveKind> {
        DirectiveKind::from_name(&self.name)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Tags and directives of one document, each in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    pub tags: Vec<Tag>,
    pub directives: Vec<Directive>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
            IssueSeverity::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: String,
    pub severity: IssueSeverity,
    pub message: String,
    pub position: Position,
    pub range: ByteRange,
}

/// Type and input names visible to a single struct declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedSymbols {
    pub types: Vec<String>,
    pub inputs: Vec<String>,
}

impl ScopedSymbols {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.inputs.is_empty()
    }
}

/// Names declared in one document, plus the cross-reference switch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationContext {
    pub types: Vec<String>,
    pub inputs: Vec<String>,
    pub enums: Vec<String>,
    pub ignore_all: bool,
    pub check_type_references: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopedSymbols>,
}

impl ValidationContext {
    pub fn new(check_type_references: bool) -> Self {
        Self {
            check_type_references,
            ..Default::default()
        }
    }

    pub fn available_types(&self) -> &[String] {
        match &self.scope {
            Some(scope) => &scope.types,
            None => &self.types,
        }
    }

    pub fn available_inputs(&self) -> &[String] {
        match &self.scope {
            Some(scope) => &scope.inputs,
            None => &self.inputs,
        }
    }

    /// A copy narrowed to `scope`; `None` keeps the document-wide names.
    pub fn with_scope(&self, scope: Option<&ScopedSymbols>) -> Self {
        Self {
            scope: scope.cloned(),
            ..self.clone()
        }
    }
}

/// Options for a whole-document check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    pub check_type_references: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            check_type_references: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::DIRECTIVE_TYPES;
    use pretty_assertions::assert_eq;

    #[test]
    fn directive_names_match_catalog() {
        let names: Vec<&str> = DirectiveKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, DIRECTIVE_TYPES);
        for kind in DirectiveKind::ALL {
            assert_eq!(DirectiveKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(
            DirectiveKind::from_name("gqlinputextrafield"),
            Some(DirectiveKind::InputExtraField)
        );
    }
}
