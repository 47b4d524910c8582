use std::fmt;

/// The catalog service credential.
///
/// Never printed: `Debug` is redacted and there is no `Display`. The raw
/// value is only reachable through [`ApiKey::expose`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a credential, rejecting blank values.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the credential occurs verbatim anywhere in `haystack`.
    pub fn appears_in(&self, haystack: &[u8]) -> bool {
        let needle = self.0.as_bytes();
        haystack.windows(needle.len()).any(|window| window == needle)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
