//! Secret reference grammar.
//!
//! A reference is `<vault:PATH#KEY>` or `<vault:PATH#KEY|TRANSFORM>`.
//! Scanning happens in two steps: [`spans`] finds every candidate token in a
//! buffer, then [`Reference::parse`] pulls the path, key and transform out of
//! one token. A candidate that does not parse is left alone by the caller.
//!
//! A token never crosses a line break. `#` and `|` cannot appear inside a
//! path or key.

use std::ops::Range;
use std::sync::LazyLock;

use regex::bytes::Regex;

/// Scheme prefix inside the angle brackets.
const SCHEME: &str = "vault:";

/// Outer pattern. Lazy on both sides so adjacent tokens stay separate.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?U)<vault:.+#.+>").expect("token pattern is valid"));

/// A candidate token located in a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    /// Byte range of the whole token, delimiters included.
    pub range: Range<usize>,
    /// The token bytes.
    pub text: &'a [u8],
}

/// Find every candidate token, left to right.
pub fn spans(input: &[u8]) -> impl Iterator<Item = Span<'_>> {
    TOKEN.find_iter(input).map(|m| Span {
        range: m.range(),
        text: m.as_bytes(),
    })
}

/// A parsed secret reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Secret path in the store, trimmed.
    pub path: &'a str,
    /// Field name inside the secret, trimmed.
    pub key: &'a str,
    /// Transform name after the pipe, trimmed. `None` when absent or empty.
    pub transform: Option<&'a str>,
}

impl<'a> Reference<'a> {
    /// Parse a single token such as `<vault:secret/data/app#password|b64enc>`.
    ///
    /// Returns `None` when the token is not a valid reference.
    pub fn parse(token: &'a str) -> Option<Self> {
        let inner = token.strip_prefix('<')?.strip_suffix('>')?;

        let (body, transform) = match inner.split_once('|') {
            Some((body, pipe)) => {
                let pipe = pipe.trim();
                (body.trim(), (!pipe.is_empty()).then_some(pipe))
            }
            None => (inner, None),
        };

        let (path, key) = body.strip_prefix(SCHEME)?.split_once('#')?;
        let (path, key) = (path.trim(), key.trim());
        if path.is_empty() || key.is_empty() {
            return None;
        }

        Some(Self {
            path,
            key,
            transform,
        })
    }
}
