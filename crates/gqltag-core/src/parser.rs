use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

use crate::catalogs::RESERVED_TOKENS;
use crate::lexer::{leading_identifier, parse_type_list, split_tag_parts, strip_quotes, LineIndex};
use crate::types::*;

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"`gql:"([^`]+)"`"#).unwrap());
static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@((?i:gql)\w+)(?:\(([^)]*)\))?").unwrap());

/// Parse every `` `gql:"..."` `` literal in `text`, in source order.
pub fn parse_tags(text: &str) -> Vec<Tag> {
    let index = LineIndex::new(text);

    RE_TAG
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let raw_tag = caps.get(1)?.as_str();
            Some(Tag {
                field: leading_identifier(index.line_prefix(whole.start())).map(String::from),
                raw_tag: raw_tag.to_string(),
                options: parse_tag_options(raw_tag),
                position: index.position(whole.start()),
                range: ByteRange::new(whole.start(), whole.end()),
            })
        })
        .collect()
}

/// Parse the content of one tag literal into typed options.
pub fn parse_tag_options(content: &str) -> TagOptions {
    let mut options = TagOptions::default();
    let mut parts = split_tag_parts(content);

    // Positional field name
    if let Some(first) = parts.first().map(|p| p.trim()) {
        if !first.is_empty() && !first.contains(':') && !RESERVED_TOKENS.contains(first) {
            options.name = Some(first.to_string());
            parts.remove(0);
        }
    }

    for part in parts {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.split_once(':') {
            Some((key, value)) => apply_keyed_option(&mut options, key.trim(), value.trim()),
            None => apply_flag(&mut options, part),
        }
    }

    options
}

fn apply_keyed_option(options: &mut TagOptions, key: &str, value: &str) {
    let lowered = key.to_ascii_lowercase();
    match lowered.as_str() {
        "type" => options.type_override = Some(value.to_string()),
        "description" => options.description = Some(strip_quotes(value).to_string()),
        "deprecated" => {
            let reason = strip_quotes(value);
            options.deprecated = Some(if reason.is_empty() {
                Deprecation::Flag
            } else {
                Deprecation::Reason(reason.to_string())
            });
        }
        "include" | "omit" | "ignore" | "ro" | "wo" | "rw" => {
            options.set_list(&lowered, parse_type_list(value));
        }
        "name" => options.name = Some(value.to_string()),
        "optional" => options.optional = flag_setting(value),
        "required" => options.required = flag_setting(value),
        "forceresolver" | "force_resolver" => options.force_resolver = flag_setting(value),
        _ => {
            options
                .extra
                .insert(key.to_string(), OptionValue::Text(value.to_string()));
        }
    }
}

/// A keyed flag is present whenever it carries a value, `optional:false`
/// included.
fn flag_setting(value: &str) -> bool {
    !value.is_empty()
}

fn apply_flag(options: &mut TagOptions, flag: &str) {
    match flag {
        "optional" => options.optional = true,
        "required" => options.required = true,
        "deprecated" => options.deprecated = Some(Deprecation::Flag),
        "forceResolver" | "force_resolver" => options.force_resolver = true,
        "include" => options.include = Some(TypeList::wildcard()),
        // omit and ignore are synonyms
        "omit" | "ignore" => {
            options.omit = Some(TypeList::wildcard());
            options.ignore = Some(TypeList::wildcard());
        }
        "ro" => options.ro = Some(TypeList::wildcard()),
        "wo" => options.wo = Some(TypeList::wildcard()),
        "rw" => options.rw = Some(TypeList::wildcard()),
        "type" => {
            options.type_override.get_or_insert_with(String::new);
        }
        "description" => {
            options.description.get_or_insert_with(String::new);
        }
        "name" => {
            options.name.get_or_insert_with(String::new);
        }
        _ => {
            options
                .extra
                .insert(flag.to_string(), OptionValue::Flag(true));
        }
    }
}

/// Parse every `@Gql...` directive in `text`, in source order.
pub fn parse_directives(text: &str) -> Vec<Directive> {
    let index = LineIndex::new(text);

    RE_DIRECTIVE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str();
            let params = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            Some(Directive {
                name: name.to_string(),
                params: parse_params(params),
                position: index.position(whole.start()),
                range: ByteRange::new(whole.start(), whole.end()),
            })
        })
        .collect()
}

/// Parse a flat `key:value, key:"value"` parameter list. Pairs without a
/// key or value are skipped; a repeated key keeps its last value.
pub fn parse_params(params: &str) -> IndexMap<String, String> {
    let mut map = IndexMap::new();
    for pair in params.split(',') {
        let Some((key, value)) = pair.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(key.to_string(), strip_quotes(value).to_string());
    }
    map
}

/// Parse tags and directives of one document.
pub fn parse_document(text: &str) -> ParsedDocument {
    ParsedDocument {
        tags: parse_tags(text),
        directives: parse_directives(text),
    }
}
