//! Minimal CSV/TSV reader and writer used by table loading, paste, and copy.

/// Delimiter for parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Split delimited text into records of fields.
///
/// Quoted fields may contain the delimiter, `""` escapes and line breaks.
/// Both `\n` and `\r\n` end a record. A trailing line break does not produce
/// an empty final record.
pub fn parse_records(text: &str, delim: Delimiter) -> Vec<Vec<String>> {
    let sep = delim.as_char();
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' && current.is_empty() {
            in_quotes = true;
        } else if ch == sep {
            fields.push(std::mem::take(&mut current));
        } else if ch == '\r' && chars.peek() == Some(&'\n') {
            // swallowed; the '\n' ends the record
        } else if ch == '\n' {
            fields.push(std::mem::take(&mut current));
            records.push(std::mem::take(&mut fields));
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        records.push(fields);
    }
    records
}

/// Escape a cell value for TSV/clipboard format.
///
/// Values containing tabs, line breaks, or quotes are wrapped in quotes with
/// inner quotes doubled; everything else passes through unchanged.
pub fn escape_field(value: &str) -> std::borrow::Cow<'_, str> {
    let needs_quoting = value.contains('\t')
        || value.contains('\n')
        || value.contains('\r')
        || value.contains('"');

    if needs_quoting {
        let escaped = value.replace('"', "\"\"");
        std::borrow::Cow::Owned(format!("\"{escaped}\""))
    } else {
        std::borrow::Cow::Borrowed(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_basic() {
        let records = parse_records("Name,Age,City\nAlice,30,NYC\nBob,25,LA", Delimiter::Comma);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], vec!["Alice", "30", "NYC"]);
    }

    #[test]
    fn test_parse_tsv() {
        let records = parse_records("A\tB\n1\t2\n", Delimiter::Tab);
        assert_eq!(records, vec![vec!["A", "B"], vec!["1", "2"]]);
    }

    #[test]
    fn test_quoted_csv() {
        let records = parse_records(
            "\"Hello, World\",42\n\"She said \"\"hi\"\"\",0",
            Delimiter::Comma,
        );
        assert_eq!(records[0][0], "Hello, World");
        assert_eq!(records[1][0], "She said \"hi\"");
    }

    #[test]
    fn test_quoted_line_break_stays_in_field() {
        let records = parse_records("\"a\nb\"\tc", Delimiter::Tab);
        assert_eq!(records, vec![vec!["a\nb", "c"]]);
    }

    #[test]
    fn test_crlf_records() {
        let records = parse_records("a\tb\r\nc\td\r\n", Delimiter::Tab);
        assert_eq!(records, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_records("", Delimiter::Comma).is_empty());
    }

    #[test]
    fn test_trailing_empty_field_kept() {
        let records = parse_records("a\t\n", Delimiter::Tab);
        assert_eq!(records, vec![vec!["a", ""]]);
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a\tb"), "\"a\tb\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
