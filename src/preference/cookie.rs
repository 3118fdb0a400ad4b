//! Cookie-backed timeframe preference for HTTP admin pages.
//!
//! The caller hands over the request's `Host` and `Cookie` headers, resolves
//! graph options against this store, and then copies
//! [`CookiePreference::set_cookie_header`] into the response when present.

use std::time::Duration;

use graphwatch_graphite::{GraphiteError, PreferenceStore};

/// Name of the cookie carrying the timeframe.
pub const COOKIE_NAME: &str = "t";

/// How long a chosen timeframe is remembered (720 hours).
pub const COOKIE_MAX_AGE: Duration = Duration::from_secs(720 * 60 * 60);

/// A preference read from a request cookie and written back as `Set-Cookie`.
///
/// # Example
///
/// ```
/// use graphwatch::preference::CookiePreference;
/// use graphwatch_graphite::{GraphOptions, GraphSettings};
///
/// let settings = GraphSettings::builder().graphite_url("http://graphite.local").build();
///
/// let mut cookie = CookiePreference::from_request("admin.local:4171", Some("t=12h; other=1"));
/// let options = GraphOptions::resolve(&settings, None, &mut cookie).unwrap();
/// assert_eq!(options.interval().timeframe(), "12h");
/// assert!(cookie.set_cookie_header().is_none());
///
/// GraphOptions::resolve(&settings, Some("48h"), &mut cookie).unwrap();
/// assert_eq!(
///     cookie.set_cookie_header().unwrap(),
///     "t=48h; Path=/; Domain=admin.local; Max-Age=2592000; HttpOnly"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CookiePreference {
    domain: String,
    incoming: Option<String>,
    outgoing: Option<String>,
}

impl CookiePreference {
    /// Build from the request's `Host` header and optional `Cookie` header.
    pub fn from_request(host: &str, cookie_header: Option<&str>) -> Self {
        Self {
            domain: cookie_domain(host).to_string(),
            incoming: cookie_header
                .and_then(|header| find_cookie(header, COOKIE_NAME))
                .map(str::to_string),
            outgoing: None,
        }
    }

    /// Domain the cookie is scoped to (the request host without its port).
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// `Set-Cookie` value to send back, if a timeframe was chosen explicitly.
    pub fn set_cookie_header(&self) -> Option<String> {
        self.outgoing.as_ref().map(|value| {
            format!(
                "{}={}; Path=/; Domain={}; Max-Age={}; HttpOnly",
                COOKIE_NAME,
                value,
                self.domain,
                COOKIE_MAX_AGE.as_secs()
            )
        })
    }
}

impl PreferenceStore for CookiePreference {
    fn get(&self) -> Option<String> {
        self.incoming.clone()
    }

    fn set(&mut self, timeframe: &str) -> Result<(), GraphiteError> {
        if !is_cookie_value(timeframe) {
            return Err(GraphiteError::Preference(format!(
                "{:?} is not a valid cookie value",
                timeframe
            )));
        }
        self.outgoing = Some(timeframe.to_string());
        Ok(())
    }
}

/// Value of cookie `name` in a `Cookie` request header.
fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

/// Strip the port from a `Host` header value; cookie domains carry none.
fn cookie_domain(host: &str) -> &str {
    if let Some(end) = host.strip_prefix('[').and_then(|rest| rest.find(']')) {
        return &host[..end + 2];
    }
    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => {
            name
        }
        _ => host,
    }
}

/// RFC 6265 cookie-octets: printable ASCII minus space, `"`, `,`, `;` and `\`.
fn is_cookie_value(value: &str) -> bool {
    value
        .bytes()
        .all(|b| (0x21..=0x7e).contains(&b) && !matches!(b, b'"' | b',' | b';' | b'\\'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_timeframe_cookie() {
        let store = CookiePreference::from_request("admin", Some("session=abc; t=24h"));
        assert_eq!(store.get(), Some("24h".to_string()));
    }

    #[test]
    fn ignores_similarly_named_cookies() {
        let store = CookiePreference::from_request("admin", Some("tt=1h; at=2h"));
        assert_eq!(store.get(), None);
    }

    #[test]
    fn no_cookie_header() {
        let store = CookiePreference::from_request("admin", None);
        assert_eq!(store.get(), None);
        assert!(store.set_cookie_header().is_none());
    }

    #[test]
    fn set_renders_header() {
        let mut store = CookiePreference::from_request("admin.local", None);
        store.set("168h").unwrap();
        assert_eq!(
            store.set_cookie_header().unwrap(),
            "t=168h; Path=/; Domain=admin.local; Max-Age=2592000; HttpOnly"
        );
    }

    #[test]
    fn rejects_unsafe_values() {
        let mut store = CookiePreference::from_request("admin", None);
        assert!(matches!(
            store.set("1h; Domain=evil"),
            Err(GraphiteError::Preference(_))
        ));
        assert!(store.set_cookie_header().is_none());
    }

    #[test]
    fn domain_strips_port() {
        assert_eq!(cookie_domain("admin.local:4171"), "admin.local");
        assert_eq!(cookie_domain("admin.local"), "admin.local");
        assert_eq!(cookie_domain("[::1]:4171"), "[::1]");
        assert_eq!(cookie_domain("::1"), "::1");
    }

    #[test]
    fn max_age_is_thirty_days() {
        assert_eq!(COOKIE_MAX_AGE.as_secs(), 30 * 24 * 60 * 60);
    }
}
