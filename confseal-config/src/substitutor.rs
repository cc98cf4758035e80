//! Decrypting `${enc:...}` references inside a single string.

use crate::error::ResolveError;
use crate::resolver::KeyResolver;
use crate::scanner;
use confseal_crypto::has_token_prefix;
use std::borrow::Cow;

/// Outcome of looking up the inner text of one `${...}` reference.
#[derive(Debug)]
pub enum Lookup {
    /// Not an encrypted value; the reference is kept verbatim.
    NotAToken,
    Decrypted(String),
    Failed(ResolveError),
}

/// The first reference in a string that could not be decrypted.
#[derive(Debug)]
pub struct SpanFailure {
    /// Inner text of the reference, e.g. `enc:...`.
    pub token: String,
    pub cause: ResolveError,
}

/// Replaces encrypted references in strings with their plaintext.
#[derive(Clone, Copy, Debug)]
pub struct StringSubstitutor<'r> {
    resolver: &'r KeyResolver,
}

impl<'r> StringSubstitutor<'r> {
    pub fn new(resolver: &'r KeyResolver) -> Self {
        Self { resolver }
    }

    /// Anything carrying the `enc:` prefix is claimed, so a malformed token
    /// fails instead of passing through as text.
    pub fn lookup(&self, inner: &str) -> Lookup {
        if !has_token_prefix(inner) {
            return Lookup::NotAToken;
        }

        match self.resolver.decrypt_str(inner) {
            Ok(plaintext) => Lookup::Decrypted(plaintext),
            Err(e) => Lookup::Failed(e),
        }
    }

    /// Rewrites every encrypted reference in `text`.
    ///
    /// Literal text and other references are kept as they are, `$${` becomes
    /// `${`, and decrypted plaintext is never scanned again. Borrows `text`
    /// when nothing changes.
    pub fn replace<'t>(&self, text: &'t str) -> Result<Cow<'t, str>, SpanFailure> {
        let mut out = String::new();
        let mut copied = 0;

        for span in scanner::spans(text) {
            if span.escaped {
                out.push_str(&text[copied..span.start]);
                out.push_str("${");
                copied = span.end;
                continue;
            }

            match self.lookup(span.inner) {
                Lookup::NotAToken => {}
                Lookup::Decrypted(plaintext) => {
                    out.push_str(&text[copied..span.start]);
                    out.push_str(&plaintext);
                    copied = span.end;
                }
                Lookup::Failed(cause) => {
                    return Err(SpanFailure {
                        token: span.inner.to_string(),
                        cause,
                    });
                }
            }
        }

        if copied == 0 {
            return Ok(Cow::Borrowed(text));
        }
        out.push_str(&text[copied..]);
        Ok(Cow::Owned(out))
    }
}
