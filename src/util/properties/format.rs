use crate::error::PropertiesError;
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use std::io::{self, Write};

const XML_DOCTYPE: &str = "<!DOCTYPE properties SYSTEM \"http://java.sun.com/dtd/properties.dtd\">";

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

fn is_separator(c: char) -> bool {
    matches!(c, '=' | ':')
}

/// Join natural lines into logical lines, dropping blanks and comments.
/// Each logical line carries the number of the natural line it started on.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (index, natural) in normalized.split('\n').enumerate() {
        let trimmed = natural.trim_start_matches(is_whitespace);

        let (number, mut buffer) = match current.take() {
            Some(pending) => pending,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (index + 1, String::new())
            }
        };

        let trailing_backslashes = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        if trailing_backslashes % 2 == 1 {
            buffer.push_str(&trimmed[..trimmed.len() - 1]);
            current = Some((number, buffer));
        } else {
            buffer.push_str(trimmed);
            lines.push((number, buffer));
        }
    }

    if let Some(pending) = current {
        lines.push(pending);
    }

    lines
}

/// Split a logical line into its raw key and raw value
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut separator_seen = false;

    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if is_separator(c) || is_whitespace(c) {
            key_end = index;
            separator_seen = is_separator(c);
            break;
        }
    }

    let mut rest = line[key_end..].chars();
    if key_end < line.len() {
        rest.next();
    }
    let mut value = rest.as_str().trim_start_matches(is_whitespace);
    if !separator_seen {
        if let Some(stripped) = value.strip_prefix(is_separator) {
            value = stripped.trim_start_matches(is_whitespace);
        }
    }

    (&line[..key_end], value)
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                let code = (digits.len() == 4)
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or(PropertiesError::MalformedUnicodeEscape { line })?;
                result.push(code);
            }
            Some('t') => result.push('\t'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('f') => result.push('\u{000C}'),
            Some(other) => result.push(other),
            None => {}
        }
    }

    Ok(result)
}

pub(super) fn parse(text: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    logical_lines(text)
        .into_iter()
        .map(|(number, line)| {
            let (key, value) = split_key_value(&line);
            Ok((unescape(key, number)?, unescape(value, number)?))
        })
        .collect()
}

fn xml_error(err: impl std::fmt::Display) -> PropertiesError {
    PropertiesError::Xml {
        message: err.to_string(),
    }
}

pub(super) fn parse_xml(text: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    let mut reader = Reader::from_str(text);
    let mut entries = Vec::new();
    let mut current: Option<(String, String)> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(element) if element.name().as_ref() == b"entry" => {
                let key = element
                    .try_get_attribute("key")
                    .map_err(xml_error)?
                    .ok_or_else(|| xml_error("<entry> is missing the 'key' attribute"))?
                    .unescape_value()
                    .map_err(xml_error)?
                    .into_owned();
                current = Some((key, String::new()));
            }
            Event::Empty(element) if element.name().as_ref() == b"entry" => {
                let key = element
                    .try_get_attribute("key")
                    .map_err(xml_error)?
                    .ok_or_else(|| xml_error("<entry> is missing the 'key' attribute"))?
                    .unescape_value()
                    .map_err(xml_error)?
                    .into_owned();
                entries.push((key, String::new()));
            }
            Event::Text(text) => {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(&text.unescape().map_err(xml_error)?);
                }
            }
            Event::CData(data) => {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(element) if element.name().as_ref() == b"entry" => {
                if let Some(entry) = current.take() {
                    entries.push(entry);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if current.is_some() {
        return Err(xml_error("unterminated <entry> element"));
    }

    Ok(entries)
}

fn escape_text(text: &str, is_key: bool) -> String {
    let mut escaped = String::with_capacity(text.len());

    for (index, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || index == 0 => escaped.push_str("\\ "),
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{000C}' => escaped.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }

    escaped
}

pub(super) fn write<'a, W: Write>(
    mut writer: W,
    comments: Option<&str>,
    entries: impl Iterator<Item = (&'a str, &'a str)>,
) -> io::Result<()> {
    if let Some(comments) = comments {
        for line in comments.lines() {
            writeln!(writer, "#{}", line)?;
        }
    }

    for (name, value) in entries {
        writeln!(writer, "{}={}", escape_text(name, true), escape_text(value, false))?;
    }

    writer.flush()
}

pub(super) fn write_xml<'a, W: Write>(
    mut writer: W,
    comment: Option<&str>,
    entries: impl Iterator<Item = (&'a str, &'a str)>,
) -> io::Result<()> {
    writeln!(writer, "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>")?;
    writeln!(writer, "{}", XML_DOCTYPE)?;
    writeln!(writer, "<properties>")?;
    if let Some(comment) = comment {
        writeln!(writer, "<comment>{}</comment>", escape(comment))?;
    }
    for (name, value) in entries {
        writeln!(writer, "<entry key=\"{}\">{}</entry>", escape(name), escape(value))?;
    }
    writeln!(writer, "</properties>")?;

    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> Vec<(String, String)> {
        parse(text).expect("parse failed")
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_separators() {
        assert_eq!(
            parsed("a=1\nb: 2\nc 3\nd = 4\ne\t:\t5\nf\n"),
            vec![
                pair("a", "1"),
                pair("b", "2"),
                pair("c", "3"),
                pair("d", "4"),
                pair("e", "5"),
                pair("f", ""),
            ]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "# comment\n   ! also a comment\n\n   \nkey=value # not a comment\n";
        assert_eq!(parsed(text), vec![pair("key", "value # not a comment")]);
    }

    #[test]
    fn test_line_continuation() {
        let text = "fruits = apple, \\\n         banana, \\\n  pear\nnext=1\r\n";
        assert_eq!(
            parsed(text),
            vec![pair("fruits", "apple, banana, pear"), pair("next", "1")]
        );
    }

    #[test]
    fn test_continuation_line_starting_with_hash_is_not_a_comment() {
        assert_eq!(parsed("key=a\\\n#b"), vec![pair("key", "a#b")]);
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        assert_eq!(
            parsed("path=C:\\\\\nnext=1"),
            vec![pair("path", "C:\\"), pair("next", "1")]
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            parsed("key\\ with\\:colon=tab\\there\\u0041\\q"),
            vec![pair("key with:colon", "tab\thereAq")]
        );
    }

    #[test]
    fn test_malformed_unicode_escape() {
        let err = parse("ok=1\nbad=\\u12G4").unwrap_err();
        assert!(matches!(err, PropertiesError::MalformedUnicodeEscape { line: 2 }));
    }

    #[test]
    fn test_parse_xml() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!DOCTYPE properties SYSTEM "http://java.sun.com/dtd/properties.dtd">
<properties>
<comment>Sample</comment>
<entry key="host">localhost</entry>
<entry key="greeting">Hello &amp; welcome</entry>
<entry key="empty"/>
<entry key="raw"><![CDATA[<b>bold</b>]]></entry>
</properties>"#;

        assert_eq!(
            parse_xml(xml).unwrap(),
            vec![
                pair("host", "localhost"),
                pair("greeting", "Hello & welcome"),
                pair("empty", ""),
                pair("raw", "<b>bold</b>"),
            ]
        );
    }

    #[test]
    fn test_parse_xml_requires_key() {
        let err = parse_xml("<properties><entry>1</entry></properties>").unwrap_err();
        assert!(matches!(err, PropertiesError::Xml { .. }));
    }
}
