//! String helpers
//!
//! Option-safe wrappers over `str` plus a few display-width aware helpers for
//! terminal output.

use crate::error::AssertError;
use std::fmt::Display;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const COMMA_DELIMITER: &str = ",";
pub const COMMA_SPACE_DELIMITER: &str = ", ";
pub const EMPTY_STRING: &str = "";
pub const SINGLE_SPACE: &str = " ";
pub const UTF_8: &str = "UTF-8";

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

const ELLIPSIS: &str = "...";

/// Join `values` with `delimiter`
pub fn concat<T: Display>(values: &[T], delimiter: &str) -> String {
    let mut buffer = String::new();
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            buffer.push_str(delimiter);
        }
        buffer.push_str(&value.to_string());
    }
    buffer
}

/// Return the first value that has text
pub fn default_if_blank<'a>(values: &[Option<&'a str>]) -> Option<&'a str> {
    values.iter().copied().find(|value| has_text(*value)).flatten()
}

pub fn digits_only(value: Option<&str>) -> String {
    value
        .unwrap_or(EMPTY_STRING)
        .chars()
        .filter(|ch| ch.is_ascii_digit())
        .collect()
}

pub fn letters_only(value: Option<&str>) -> String {
    value
        .unwrap_or(EMPTY_STRING)
        .chars()
        .filter(|ch| ch.is_alphabetic())
        .collect()
}

pub fn spaces(number: usize) -> String {
    SINGLE_SPACE.repeat(number)
}

pub fn has_text(value: Option<&str>) -> bool {
    !is_blank(value)
}

/// `None`, empty or whitespace only
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

/// Exactly the empty string; `None` is not empty
pub fn is_empty(value: Option<&str>) -> bool {
    value == Some(EMPTY_STRING)
}

/// Right-pad `value` with `padding` until it is at least `length` chars long
pub fn pad(value: &str, padding: char, length: usize) -> String {
    let mut buffer = String::from(value);
    for _ in value.chars().count()..length {
        buffer.push(padding);
    }
    buffer
}

pub fn to_lower_case(value: Option<&str>) -> Option<String> {
    value.map(str::to_lowercase)
}

pub fn to_upper_case(value: Option<&str>) -> Option<String> {
    value.map(str::to_uppercase)
}

pub fn trim(value: Option<&str>) -> Option<&str> {
    value.map(str::trim)
}

/// Keep at most `length` chars
pub fn truncate(value: Option<&str>, length: usize) -> Option<String> {
    value.map(|value| value.chars().take(length).collect())
}

/// Display `value`, else the first present default, else `"null"`
pub fn value_of<T: Display>(value: Option<T>, defaults: &[Option<&str>]) -> String {
    match value {
        Some(value) => value.to_string(),
        None => defaults
            .iter()
            .flatten()
            .next()
            .map(|default| default.to_string())
            .unwrap_or_else(|| "null".to_string()),
    }
}

/// Word-wrap `line` at `width` chars, prefixing continuation lines with `indent`
///
/// # Errors
/// Returns `IllegalArgument` when a segment longer than `width` contains no
/// space to break on.
pub fn wrap(line: &str, width: usize, indent: Option<&str>) -> Result<String, AssertError> {
    let indent = indent.unwrap_or(EMPTY_STRING);
    let mut buffer = String::new();
    let mut remaining: Vec<char> = line.chars().collect();
    let mut line_count = 1;

    while remaining.len() > width {
        let space_index = remaining[..width]
            .iter()
            .rposition(|ch| *ch == ' ')
            .ok_or_else(|| {
                AssertError::IllegalArgument(format!(
                    "No word boundary found within ({}) characters of ({})",
                    width,
                    remaining.iter().collect::<String>()
                ))
            })?;

        if line_count > 1 {
            buffer.push_str(indent);
        }
        line_count += 1;
        buffer.extend(&remaining[..space_index]);
        buffer.push_str(LINE_SEPARATOR);
        remaining.drain(..=space_index);
    }

    if line_count > 1 {
        buffer.push_str(indent);
    }
    buffer.extend(remaining);

    Ok(buffer)
}

/// Truncate to a terminal display width, ending in `...` when cut
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let ellipsis_width = ELLIPSIS.width();
    if max_width <= ellipsis_width {
        return ELLIPSIS[..max_width].to_string();
    }

    let target_width = max_width - ellipsis_width;
    let mut result = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }

    result.push_str(ELLIPSIS);
    result
}

/// Right-pad to a terminal display width
pub fn pad_to_width(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        text.to_string()
    } else {
        format!("{}{}", text, spaces(width - text_width))
    }
}

pub fn center(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }

    let padding = width - text_width;
    let left_padding = padding / 2;
    let right_padding = padding - left_padding;

    format!("{}{}{}", spaces(left_padding), text, spaces(right_padding))
}
