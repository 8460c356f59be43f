use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Connect,
    Delete,
    #[default]
    Get,
    Head,
    Options,
    Post,
    Put,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Connect,
        HttpMethod::Delete,
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Trace,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Trace => "TRACE",
        }
    }

    pub fn value_of_ignore_case(name: Option<&str>) -> Option<HttpMethod> {
        let name = name?.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::value_of_ignore_case(Some(s))
            .ok_or_else(|| format!("Unknown HTTP method '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_of_ignore_case() {
        assert_eq!(HttpMethod::value_of_ignore_case(Some("get")), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::value_of_ignore_case(Some("Post")), Some(HttpMethod::Post));
        assert_eq!(HttpMethod::value_of_ignore_case(Some(" TRACE ")), Some(HttpMethod::Trace));
        assert_eq!(HttpMethod::value_of_ignore_case(Some("PATCH")), None);
        assert_eq!(HttpMethod::value_of_ignore_case(None), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("delete".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
        assert!("fetch".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_declaration_order() {
        assert!(HttpMethod::Delete < HttpMethod::Get);
        assert!(HttpMethod::Post < HttpMethod::Put);
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
        assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
    }
}
