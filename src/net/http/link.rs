use super::method::HttpMethod;
use crate::error::AssertError;
use crate::lang::{assert, strings};
use crate::net::uri;
use crate::util::ComparatorAccumulator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A hypermedia link: a named relation to a URI reached with an HTTP method.
///
/// Two links are equal when they point at the same `href` with the same
/// method; the relation only takes part in ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawLink")]
pub struct Link {
    #[serde(rename = "rel")]
    relation: String,
    href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    method: Option<HttpMethod>,
}

/// Unvalidated wire form of a [`Link`]
#[derive(Deserialize)]
struct RawLink {
    rel: String,
    href: String,
    #[serde(default)]
    method: Option<HttpMethod>,
}

impl TryFrom<RawLink> for Link {
    type Error = AssertError;

    fn try_from(raw: RawLink) -> Result<Self, Self::Error> {
        let mut link = Link::with_method(&raw.rel, &raw.href, Link::DEFAULT_HTTP_METHOD)?;
        link.set_method(raw.method);
        Ok(link)
    }
}

impl Link {
    pub const DEFAULT_HTTP_METHOD: HttpMethod = HttpMethod::Get;

    pub fn new(relation: &str, href: &str) -> Result<Self, AssertError> {
        Self::with_method(relation, href, Self::DEFAULT_HTTP_METHOD)
    }

    pub fn with_method(relation: &str, href: &str, method: HttpMethod) -> Result<Self, AssertError> {
        let mut link = Self {
            relation: String::new(),
            href: String::new(),
            method: None,
        };
        link.set_relation(relation)?;
        link.set_href(href)?;
        link.set_method(Some(method));
        Ok(link)
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn set_relation(&mut self, relation: &str) -> Result<(), AssertError> {
        assert::legal_argument(
            strings::has_text(Some(relation)),
            "The Link relation (rel) must be specified!",
        )?;
        self.relation = relation.to_string();
        Ok(())
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn set_href(&mut self, href: &str) -> Result<(), AssertError> {
        assert::legal_argument(
            strings::has_text(Some(href)),
            "The Link URI-based 'href' must be specified!",
        )?;
        self.href = href.to_string();
        Ok(())
    }

    pub fn method(&self) -> HttpMethod {
        self.method.unwrap_or(Self::DEFAULT_HTTP_METHOD)
    }

    /// `None` restores the default method
    pub fn set_method(&mut self, method: Option<HttpMethod>) {
        self.method = method;
    }

    /// Order by relation, then href, then method
    pub fn compare(&self, other: &Link) -> Ordering {
        ComparatorAccumulator::new()
            .do_compare(Some(self.relation()), Some(other.relation()))
            .do_compare(Some(self.href()), Some(other.href()))
            .do_compare(Some(&self.method()), Some(&other.method()))
            .result()
    }

    pub fn to_http_request_line(&self) -> String {
        format!(
            "{} {}",
            self.method(),
            uri::decode(Some(self.href())).unwrap_or_default()
        )
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.href == other.href && self.method() == other.method()
    }
}

impl Eq for Link {}

impl Hash for Link {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.href.hash(state);
        self.method().hash(state);
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ rel = {}, href = {}, method = {} }}",
            self.relation,
            self.href,
            self.method()
        )
    }
}
