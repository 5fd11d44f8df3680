use crate::catalogs::WILDCARD;
use crate::types::{Position, TypeList};

/// Line start offsets of one document, built fresh for every scan.
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    /// Position of a byte offset. `offset` must be a char boundary.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let start = self.line_starts[line];
        Position {
            line,
            character: self.text[start..offset].chars().map(char::len_utf16).sum(),
        }
    }

    /// Text of a 0-based line, without its line terminator.
    pub fn line(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        let raw = &self.text[start..end];
        Some(raw.strip_suffix('\r').unwrap_or(raw))
    }

    /// Text from the start of the offset's line up to the offset.
    pub fn line_prefix(&self, offset: usize) -> &'a str {
        let offset = offset.min(self.text.len());
        let line = self.position(offset).line;
        &self.text[self.line_starts[line]..offset]
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Split tag content on commas that are outside single quotes and outside
/// `[...]`. Unbalanced quotes or brackets simply run to the end.
pub fn split_tag_parts(content: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut depth = 0usize;
    let mut start = 0;

    for (i, b) in content.bytes().enumerate() {
        match b {
            b'\'' if depth == 0 => in_quotes = !in_quotes,
            b'[' if !in_quotes => depth += 1,
            b']' if !in_quotes => depth = depth.saturating_sub(1),
            b',' if !in_quotes && depth == 0 => {
                parts.push(&content[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < content.len() {
        parts.push(&content[start..]);
    }
    parts
}

/// Parse the value of a list option (`include:[A,B]`, `omit:'A,B'`, `ro:A`).
pub fn parse_type_list(value: &str) -> TypeList {
    let value = value.trim();
    if value.is_empty() || value == WILDCARD {
        return TypeList::wildcard();
    }

    let inner = strip_enclosing(value, '\'', '\'').or_else(|| strip_enclosing(value, '[', ']'));
    match inner {
        Some(inner) => TypeList::from_names(
            inner
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        ),
        None => TypeList::from_names([value]),
    }
}

fn strip_enclosing(value: &str, open: char, close: char) -> Option<&str> {
    if value.len() >= 2 && value.starts_with(open) && value.ends_with(close) {
        Some(&value[open.len_utf8()..value.len() - close.len_utf8()])
    } else {
        None
    }
}

/// Remove one leading and one trailing quote character (`"` or `'`).
pub fn strip_quotes(value: &str) -> &str {
    const QUOTES: &[char] = &['"', '\''];
    let value = value.strip_prefix(QUOTES).unwrap_or(value);
    value.strip_suffix(QUOTES).unwrap_or(value)
}

/// First identifier of a line prefix such as `\tEmail   string   `.
pub fn leading_identifier(prefix: &str) -> Option<&str> {
    let word = prefix.split_whitespace().next()?;
    let starts_ok = word
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_');
    if starts_ok && word.bytes().all(is_word_char) {
        Some(word)
    } else {
        None
    }
}

#[inline]
pub fn is_word_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain() {
        assert_eq!(split_tag_parts("id,optional,type:ID"), vec!["id", "optional", "type:ID"]);
    }

    #[test]
    fn split_keeps_bracket_commas() {
        assert_eq!(
            split_tag_parts("name,include:[A,B],ro"),
            vec!["name", "include:[A,B]", "ro"]
        );
    }

    #[test]
    fn split_keeps_quoted_commas() {
        assert_eq!(
            split_tag_parts("description:'a, b, c',optional"),
            vec!["description:'a, b, c'", "optional"]
        );
    }

    #[test]
    fn split_leading_empty_part() {
        assert_eq!(split_tag_parts(",optional"), vec!["", "optional"]);
    }

    #[test]
    fn split_drops_trailing_empty_part() {
        assert_eq!(split_tag_parts("a,"), vec!["a"]);
    }

    #[test]
    fn split_unterminated_bracket_runs_to_end() {
        assert_eq!(split_tag_parts("x,include:[A,B"), vec!["x", "include:[A,B"]);
    }

    #[test]
    fn split_unterminated_quote_runs_to_end() {
        assert_eq!(split_tag_parts("description:'a,b"), vec!["description:'a,b"]);
    }

    #[test]
    fn type_list_wildcards() {
        assert!(parse_type_list("").is_wildcard());
        assert!(parse_type_list("*").is_wildcard());
        assert!(parse_type_list("[]").is_wildcard());
        assert!(parse_type_list("''").is_wildcard());
        assert!(parse_type_list("[*,User]").is_wildcard());
    }

    #[test]
    fn type_list_brackets_and_quotes() {
        assert_eq!(parse_type_list("[A, B ,]").names(), ["A", "B"]);
        assert_eq!(parse_type_list("'A,B'").names(), ["A", "B"]);
    }

    #[test]
    fn type_list_single() {
        assert_eq!(parse_type_list(" User ").names(), ["User"]);
    }

    #[test]
    fn strip_quotes_one_layer() {
        assert_eq!(strip_quotes("\"hello\""), "hello");
        assert_eq!(strip_quotes("'a, b'"), "a, b");
        assert_eq!(strip_quotes("\"\"x\"\""), "\"x\"");
        assert_eq!(strip_quotes("plain"), "plain");
    }

    #[test]
    fn line_index_positions() {
        let text = "ab\ncd\r\nef";
        let idx = LineIndex::new(text);
        assert_eq!(idx.position(0), Position { line: 0, character: 0 });
        assert_eq!(idx.position(4), Position { line: 1, character: 1 });
        assert_eq!(idx.position(7), Position { line: 2, character: 0 });
        assert_eq!(idx.line(1), Some("cd"));
        assert_eq!(idx.line(2), Some("ef"));
        assert_eq!(idx.line(3), None);
        assert_eq!(idx.line_count(), 3);
    }

    #[test]
    fn line_index_counts_utf16_units_not_bytes() {
        let text = "// é\n\té `x`";
        let idx = LineIndex::new(text);
        let offset = text.find('`').unwrap();
        assert_eq!(idx.position(offset), Position { line: 1, character: 3 });
    }

    #[test]
    fn astral_chars_count_as_two_units() {
        let text = "\t😀 string `gql:\"x\"`";
        let idx = LineIndex::new(text);
        let offset = text.find('`').unwrap();
        assert_eq!(idx.position(offset), Position { line: 0, character: 11 });
    }

    #[test]
    fn leading_identifier_of_field_line() {
        assert_eq!(leading_identifier("\tEmail   string   "), Some("Email"));
        assert_eq!(leading_identifier("// see "), None);
        assert_eq!(leading_identifier("   "), None);
    }
}
