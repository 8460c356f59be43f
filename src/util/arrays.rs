use crate::lang::strings;
use std::fmt::Display;

/// Element at `index`, or `default` when the index is out of bounds
pub fn element_at<'a, T>(array: &'a [T], index: usize, default: &'a T) -> &'a T {
    array.get(index).unwrap_or(default)
}

pub fn empty_array<T>(array: Option<&[T]>) -> &[T] {
    array.unwrap_or(&[])
}

pub fn first<T>(array: Option<&[T]>) -> Option<&T> {
    array.and_then(<[T]>::first)
}

pub fn last<T>(array: Option<&[T]>) -> Option<&T> {
    array.and_then(<[T]>::last)
}

pub fn is_empty<T>(array: Option<&[T]>) -> bool {
    array.is_none_or(<[T]>::is_empty)
}

/// Bracketed, comma separated rendering; `None` renders as `[]`
pub fn to_string<T: Display>(array: Option<&[T]>) -> String {
    format!(
        "[{}]",
        strings::concat(empty_array(array), strings::COMMA_SPACE_DELIMITER)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_at() {
        let values = ["a", "b", "c"];
        assert_eq!(*element_at(&values, 1, &"z"), "b");
        assert_eq!(*element_at(&values, 3, &"z"), "z");
        assert_eq!(*element_at(&[], 0, &"z"), "z");
    }

    #[test]
    fn test_empty_array() {
        let values = [1, 2];
        assert_eq!(empty_array(Some(&values[..])), &[1, 2]);
        assert!(empty_array::<i32>(None).is_empty());
    }

    #[test]
    fn test_first_and_last() {
        let values = ["one", "two", "three"];
        assert_eq!(first(Some(&values[..])), Some(&"one"));
        assert_eq!(last(Some(&values[..])), Some(&"three"));
        assert_eq!(first::<&str>(Some(&[])), None);
        assert_eq!(last::<&str>(None), None);
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty::<i32>(None));
        assert!(is_empty::<i32>(Some(&[])));
        assert!(!is_empty(Some(&[0][..])));
    }

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(Some(&[1, 2, 3][..])), "[1, 2, 3]");
        assert_eq!(to_string(Some(&["solo"][..])), "[solo]");
        assert_eq!(to_string::<i32>(None), "[]");
    }
}
