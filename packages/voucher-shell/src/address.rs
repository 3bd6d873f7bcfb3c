//! Normalization and validation of user-entered voucher addresses

use std::fmt;

use thiserror::Error;
use url::Url;

const SCHEME_PREFIX: &str = "http";
const DEFAULT_SCHEME: &str = "https://";

/// Prefix `https://` unless the input already starts with the literal `http`.
///
/// The check is a plain prefix match, so `httpbin.org` is left untouched (and
/// subsequently fails validation because it has no scheme).
pub fn normalize(raw: &str) -> String {
    if raw.starts_with(SCHEME_PREFIX) {
        raw.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{raw}")
    }
}

/// Whether an already-normalized string is an acceptable voucher address.
pub fn is_valid_url(normalized: &str) -> bool {
    parse_checked(normalized).is_ok()
}

fn parse_checked(normalized: &str) -> Result<Url, InvalidUrl> {
    let url = Url::parse(normalized).map_err(|_| InvalidUrl::Unparseable {
        input: normalized.to_string(),
    })?;

    // A bare hostname such as `localhost` is almost always a typo
    match url.host_str() {
        Some(host) if host.contains('.') => Ok(url),
        _ => Err(InvalidUrl::NoDomain {
            input: normalized.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidUrl {
    #[error("`{input}` is not a URL")]
    Unparseable { input: String },
    #[error("`{input}` has no dotted hostname")]
    NoDomain { input: String },
}

/// A normalized address that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherUrl {
    raw: String,
    parsed: Url,
}

impl VoucherUrl {
    /// Normalize then validate raw user input.
    pub fn parse(input: &str) -> Result<Self, InvalidUrl> {
        let raw = normalize(input);
        let parsed = parse_checked(&raw)?;
        Ok(Self { raw, parsed })
    }

    /// The normalized string, exactly as it is persisted.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.parsed
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl fmt::Display for VoucherUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for VoucherUrl {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
