//! URL validation and normalization.
//!
//! Pure and allocation-light: safe to run on every keystroke.

use url::Url;

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";
const MAX_LABEL_LEN: usize = 63;
const MIN_TLD_LEN: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct UrlValidator;

impl UrlValidator {
    pub fn new() -> Self {
        Self
    }

    /// Trim and make sure the string carries an explicit http(s) scheme.
    ///
    /// An existing scheme is left exactly as typed, case included.
    pub fn normalize(&self, input: &str) -> String {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with(HTTP_PREFIX) || lower.starts_with(HTTPS_PREFIX) {
            trimmed.to_string()
        } else {
            format!("{HTTPS_PREFIX}{trimmed}")
        }
    }

    /// Whether `input` is a plausible absolute http(s) URL with a
    /// DNS-shaped host. Scheme-less input is normalized first.
    pub fn is_valid(&self, input: &str) -> bool {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return false;
        }
        // The parser silently strips tab/CR/LF, so reject them up front.
        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return false;
        }

        let normalized = self.normalize(input);
        // The parser lowercases schemes, so check the text as written.
        if !(normalized.starts_with(HTTP_PREFIX) || normalized.starts_with(HTTPS_PREFIX)) {
            return false;
        }

        let Ok(parsed) = Url::parse(&normalized) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }

        match parsed.host_str() {
            Some(host) if !host.is_empty() => is_hostname(host),
            _ => false,
        }
    }
}

/// Two or more labels, the last one alphabetic and at least two long.
fn is_hostname(host: &str) -> bool {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };

    tld.len() >= MIN_TLD_LEN
        && tld.len() <= MAX_LABEL_LEN
        && tld.chars().all(|c| c.is_ascii_alphabetic())
        && rest.iter().all(|label| is_label(label))
}

fn is_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
