//! Request cookie parsing and `Set-Cookie` directives.

use axum::http::{
    HeaderMap, HeaderValue,
    header::{COOKIE, InvalidHeaderValue},
};
use std::fmt;

/// Cookies presented on a request, in header order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCookies(Vec<(String, String)>);

impl RequestCookies {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// Collect cookies from every `Cookie` header
    ///
    /// A request without cookies yields an empty set. Non-ASCII bytes in
    /// one cookie do not hide the other pairs of the same header.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut pairs = Vec::new();
        for value in headers.get_all(COOKIE) {
            let value = String::from_utf8_lossy(value.as_bytes());
            pairs.extend(parse_cookie_header(&value));
        }
        Self(pairs)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First cookie called `name` whose value has non-whitespace content
    pub fn find_non_empty(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, v)| k == name && !v.trim().is_empty())
            .map(|(_, v)| v.as_str())
    }
}

fn parse_cookie_header(value: &str) -> impl Iterator<Item = (String, String)> + '_ {
    value.split(';').filter_map(|pair| {
        let (key, val) = pair.trim().split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), val.trim().to_string()))
    })
}

/// A cookie the response should set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDirective {
    pub name: String,
    pub value: String,
    pub max_age_secs: u64,
}

impl CookieDirective {
    /// Cookie living for `max_age_secs` on path `/`
    pub fn set(name: &str, value: &str, max_age_secs: u64) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            max_age_secs,
        }
    }

    /// Cookie that the browser drops immediately
    pub fn expire(name: &str, value: &str) -> Self {
        Self::set(name, value, 0)
    }

    pub fn is_expiry(&self) -> bool {
        self.max_age_secs == 0
    }

    pub fn to_header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.to_string())
    }
}

impl fmt::Display for CookieDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Path=/; HttpOnly; Max-Age={}",
            self.name, self.value, self.max_age_secs
        )
    }
}
