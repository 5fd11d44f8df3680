use std::collections::HashSet;
use std::sync::LazyLock;

/// Tag option keys whose value is a type-name list.
pub const LIST_KEYS: [&str; 6] = ["include", "omit", "ignore", "ro", "wo", "rw"];

/// Access modifiers; at most one may appear on a tag.
pub const ACCESS_KEYS: [&str; 3] = ["ro", "wo", "rw"];

/// Wildcard entry of a type list, matching every type and input.
pub const WILDCARD: &str = "*";

/// Every option key a `gql` tag may carry.
pub static TAG_OPTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut s = HashSet::new();
    // Positional field name
    s.insert("name");
    // Type lists
    for key in LIST_KEYS {
        s.insert(key);
    }
    // Valued options
    s.insert("type");
    s.insert("description");
    s.insert("deprecated");
    // Flags
    s.insert("optional");
    s.insert("required");
    s.insert("forceResolver");
    s.insert("force_resolver");
    s
});

/// Tokens that are never taken as the positional field name.
pub static RESERVED_TOKENS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut s = HashSet::new();
    s.insert("optional");
    s.insert("required");
    s.insert("deprecated");
    s.insert("forceResolver");
    s.insert("force_resolver");
    for key in LIST_KEYS {
        s.insert(key);
    }
    s
});

/// Directive names in their canonical spelling, in documentation order.
pub const DIRECTIVE_TYPES: [&str; 9] = [
    "GqlType",
    "GqlInput",
    "GqlEnum",
    "GqlEnumValue",
    "GqlNamespace",
    "GqlIgnoreAll",
    "GqlUseModelDirective",
    "GqlTypeExtraField",
    "GqlInputExtraField",
];

/// Lines scanned after an unnamed directive to find the declaration it annotates.
pub const DECLARATION_LOOKAHEAD: usize = 20;

/// Lines scanned above a struct declaration for its directive comment block.
pub const SCOPE_LOOKBACK: usize = 10;

/// Suffix appended to a struct name by an unnamed `@GqlInput`.
pub const INPUT_SUFFIX: &str = "Input";

/// Parser version constant.
pub const PARSER_VERSION: &str = "0.1.0";
