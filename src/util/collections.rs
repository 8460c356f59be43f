use crate::error::AssertError;
use crate::lang::{Filter, assert};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub fn as_list<T: Clone>(values: &[T]) -> Vec<T> {
    values.to_vec()
}

pub fn as_set<T: Clone + Eq + Hash>(values: &[T]) -> HashSet<T> {
    values.iter().cloned().collect()
}

pub fn empty_list<T>(list: Option<Vec<T>>) -> Vec<T> {
    list.unwrap_or_default()
}

pub fn empty_set<T>(set: Option<HashSet<T>>) -> HashSet<T> {
    set.unwrap_or_default()
}

pub fn find_all<'a, T, I>(collection: I, filter: &dyn Filter<T>) -> Vec<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    T: 'a,
{
    collection
        .into_iter()
        .filter(|element| filter.accept(element))
        .collect()
}

pub fn find_by<'a, T, I>(collection: I, filter: &dyn Filter<T>) -> Option<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    T: 'a,
{
    collection.into_iter().find(|element| filter.accept(element))
}

/// Retain only the entries `filter` accepts
pub fn filter<K, V, F>(map: &mut HashMap<K, V>, mut filter: F) -> &mut HashMap<K, V>
where
    F: FnMut(&K, &V) -> bool,
{
    map.retain(|key, value| filter(key, value));
    map
}

pub fn is_empty<T>(collection: Option<&[T]>) -> bool {
    collection.is_none_or(<[T]>::is_empty)
}

pub fn is_empty_map<K, V>(map: Option<&HashMap<K, V>>) -> bool {
    map.is_none_or(HashMap::is_empty)
}

pub fn remove_keys_with_none_values<K, V>(
    map: &mut HashMap<K, Option<V>>,
) -> &mut HashMap<K, Option<V>> {
    filter(map, |_, value| value.is_some())
}

/// Elements of `source` at each of `indices`, in the order given
pub fn sub_list<T: Clone>(source: &[T], indices: &[usize]) -> Result<Vec<T>, AssertError> {
    indices
        .iter()
        .map(|&index| {
            source.get(index).cloned().ok_or_else(|| {
                AssertError::IllegalArgument(format!(
                    "Index ({}) is out of bounds for a list of size ({})!",
                    index,
                    source.len()
                ))
            })
        })
        .collect()
}

/// Like [`sub_list`] but checks that `source` is present first
pub fn sub_list_of<T: Clone>(
    source: Option<&[T]>,
    indices: &[usize],
) -> Result<Vec<T>, AssertError> {
    let source = assert::not_null(source, "The source list cannot be null!")?;
    sub_list(source, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_list_and_set() {
        assert_eq!(as_list(&["a", "b", "a"]), vec!["a", "b", "a"]);
        let set = as_set(&["a", "b", "a"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("a"));
    }

    #[test]
    fn test_empty_list_and_set() {
        assert!(empty_list::<i32>(None).is_empty());
        assert_eq!(empty_list(Some(vec![1])), vec![1]);
        assert!(empty_set::<i32>(None).is_empty());
    }

    #[test]
    fn test_find_all_and_find_by() {
        let numbers = vec![1, 2, 3, 4, 5, 6];
        let even = |value: &i32| value % 2 == 0;

        assert_eq!(find_all(&numbers, &even), vec![&2, &4, &6]);
        assert_eq!(find_by(&numbers, &even), Some(&2));
        assert_eq!(find_by(&numbers, &|value: &i32| *value > 10), None);
    }

    #[test]
    fn test_filter_map() {
        let mut map: HashMap<&str, i32> = [("one", 1), ("two", 2), ("three", 3)].into();
        filter(&mut map, |_, value| *value != 2);
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key("two"));
    }

    #[test]
    fn test_remove_keys_with_none_values() {
        let mut map: HashMap<&str, Option<&str>> =
            [("a", Some("x")), ("b", None), ("c", Some("z"))].into();
        remove_keys_with_none_values(&mut map);
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty::<i32>(None));
        assert!(is_empty::<i32>(Some(&[])));
        assert!(!is_empty(Some(&[1][..])));
        assert!(is_empty_map::<i32, i32>(None));
        assert!(is_empty_map(Some(&HashMap::<i32, i32>::new())));
    }

    #[test]
    fn test_sub_list() {
        let source = ["a", "b", "c", "d"];
        assert_eq!(sub_list(&source, &[3, 0, 2]).unwrap(), vec!["d", "a", "c"]);
        assert!(sub_list(&source, &[]).unwrap().is_empty());

        let err = sub_list(&source, &[1, 4]).unwrap_err();
        assert_eq!(
            err.message(),
            "Index (4) is out of bounds for a list of size (4)!"
        );
        assert!(matches!(
            sub_list_of::<i32>(None, &[0]),
            Err(AssertError::NullValue(_))
        ));
    }
}
