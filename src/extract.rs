//! First-link extraction from a line of chat text.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

/// `http://` or `https://` (any case) followed by everything up to the next whitespace.
fn url_candidate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)https?://\S+").expect("valid url regex"))
}

/// Return the first HTTP(S) URL in `text`, exactly as written.
///
/// Only the first candidate is considered. If it does not parse as a URL with
/// an `http` or `https` scheme, the result is `None` even when a later
/// candidate would have been valid.
pub fn first_url(text: &str) -> Option<&str> {
    let candidate = url_candidate_re().find(text)?.as_str();
    let parsed = Url::parse(candidate).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_scheme() {
        let cases = [
            ("http://google.com", Some("http://google.com")),
            ("https://google.com", Some("https://google.com")),
            ("htp://google.com", None),
            ("ftp://google.com", None),
            ("wat", None),
            ("", None),
        ];
        for (input, expected) in cases {
            assert_eq!(first_url(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn finds_url_inside_sentence() {
        assert_eq!(first_url("see http://a.com now"), Some("http://a.com"));
        assert_eq!(
            first_url("I would like you to see https://google.com"),
            Some("https://google.com")
        );
        assert_eq!(first_url("I would like you to see ftp://google.com"), None);
    }

    #[test]
    fn skips_near_miss_schemes_before_real_url() {
        assert_eq!(
            first_url("htp://google.com https://google.com ttp://google.com"),
            Some("https://google.com")
        );
        assert_eq!(
            first_url("htp://google.com http://google.com ttps://google.com"),
            Some("http://google.com")
        );
    }

    #[test]
    fn only_first_url_counts() {
        assert_eq!(
            first_url("http://one.example http://two.example"),
            Some("http://one.example")
        );
    }

    #[test]
    fn keeps_query_string_verbatim() {
        let url = "https://www.google.dk/search?q=foo+bar+baz&oq=foo+bar+baz&aqs=chrome..69i57j0l5.1283j0j7&sourceid=chrome&ie=UTF-8";
        assert_eq!(first_url(url), Some(url));
    }

    #[test]
    fn accepts_any_scheme_case_without_normalizing() {
        assert_eq!(first_url("HTTP://Foo.com/X"), Some("HTTP://Foo.com/X"));
        assert_eq!(first_url("go HTTPS://X.IO"), Some("HTTPS://X.IO"));
    }

    #[test]
    fn unparseable_candidate_yields_none() {
        assert_eq!(first_url("look http://[::1 here"), None);
        assert_eq!(first_url("http://[::1 http://ok.example"), None);
    }

    #[test]
    fn extraction_is_idempotent() {
        let inputs = [
            "see http://a.com now",
            "https://x.io/path?b=2&a=1#frag",
            "prefix https://github.com/rust-lang/rust/issues/1 suffix",
        ];
        for input in inputs {
            let once = first_url(input).unwrap();
            assert_eq!(first_url(once), Some(once));
        }
    }
}
