//! Percent-encoding for URI components and form values

use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::Hash;

pub fn encode(value: Option<&str>) -> Option<String> {
    value.map(|value| urlencoding::encode(value).into_owned())
}

fn decode_once(value: &str) -> Option<String> {
    let plus_as_space: Cow<'_, str> = if value.contains('+') {
        Cow::Owned(value.replace('+', " "))
    } else {
        Cow::Borrowed(value)
    };
    urlencoding::decode(&plus_as_space)
        .ok()
        .map(Cow::into_owned)
}

/// Decode until the value stops changing, so values encoded several times come back in plain form.
/// Malformed UTF-8 stops decoding at the last good value.
pub fn decode(value: Option<&str>) -> Option<String> {
    let mut current = value?.to_string();
    while let Some(decoded) = decode_once(&current) {
        if decoded == current {
            break;
        }
        current = decoded;
    }
    Some(current)
}

/// Encode every present value in place
pub fn encode_all(values: &mut [Option<String>]) -> &mut [Option<String>] {
    for value in values.iter_mut() {
        *value = encode(value.as_deref());
    }
    values
}

pub fn decode_all(values: &mut [Option<String>]) -> &mut [Option<String>] {
    for value in values.iter_mut() {
        *value = decode(value.as_deref());
    }
    values
}

pub fn encode_map<K: Eq + Hash>(
    form: &mut HashMap<K, Option<String>>,
) -> &mut HashMap<K, Option<String>> {
    for value in form.values_mut() {
        *value = encode(value.as_deref());
    }
    form
}

pub fn decode_map<K: Eq + Hash>(
    form: &mut HashMap<K, Option<String>>,
) -> &mut HashMap<K, Option<String>> {
    for value in form.values_mut() {
        *value = decode(value.as_deref());
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(value: &str) -> String {
        encode(Some(value)).unwrap()
    }

    #[test]
    fn test_none_passes_through() {
        assert_eq!(encode(None), None);
        assert_eq!(decode(None), None);
    }

    #[test]
    fn test_encode() {
        assert_eq!(enc("Path/Subpath"), "Path%2FSubpath");
        assert_eq!(enc("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(enc("test"), "test");
    }

    #[test]
    fn test_decode_repeats_until_stable() {
        let triple = enc(&enc(&enc("/Customers/Accounts/Orders/Items")));
        assert_ne!(decode_once(&triple).unwrap(), "/Customers/Accounts/Orders/Items");
        assert_eq!(
            decode(Some(&triple)).unwrap(),
            "/Customers/Accounts/Orders/Items"
        );
        assert_eq!(decode(Some("hello+world")).unwrap(), "hello world");
    }

    #[test]
    fn test_encode_and_decode_all() {
        let mut values = vec![
            None,
            Some("123".to_string()),
            Some("test".to_string()),
            Some("Path/Subpath".to_string()),
        ];

        encode_all(&mut values);
        assert_eq!(
            values,
            vec![
                None,
                Some("123".to_string()),
                Some("test".to_string()),
                Some("Path%2FSubpath".to_string()),
            ]
        );

        decode_all(&mut values);
        assert_eq!(values[3].as_deref(), Some("Path/Subpath"));
        assert_eq!(values[0], None);
    }

    #[test]
    fn test_encode_and_decode_map() {
        let mut form: HashMap<&str, Option<String>> = HashMap::new();
        form.insert("0", None);
        form.insert("1", Some("/Customers/Accounts".to_string()));

        encode_map(&mut form);
        assert_eq!(form["0"], None);
        assert_eq!(form["1"].as_deref(), Some("%2FCustomers%2FAccounts"));

        form.insert("2", Some(enc(&enc("Path/Subpath"))));
        decode_map(&mut form);
        assert_eq!(form["1"].as_deref(), Some("/Customers/Accounts"));
        assert_eq!(form["2"].as_deref(), Some("Path/Subpath"));
    }
}
