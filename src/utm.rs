//! UTM-parameter stripping.
//!
//! Two sweeps: every `href` attribute value, then every bare `http(s)` URL
//! followed by whitespace. Each candidate is parsed with the `url` crate;
//! `utm_`-prefixed query keys are dropped and the URL reserialized with the
//! surviving pairs in their original order, omitting the query entirely
//! when none remain. Anything `Url::parse` rejects (including relative
//! hrefs) is not a URL candidate and passes through untouched.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::{form_urlencoded, Url};

use crate::catalog::UTM_STAT_KEY;
use crate::stats::{ChangeLocation, ChangeRecorder};

#[allow(clippy::expect_used)]
static HREF_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<a[^>]+href=["'])([^"']+)(["'])"#).expect("HREF_URL regex")
});

/// Bare URLs must be followed by a whitespace character; a UTM-bearing URL
/// at the very end of the content is deliberately never matched. The
/// boundary keeps the sweep from eating punctuation-adjacent markup and is
/// pinned down by tests.
#[allow(clippy::expect_used)]
static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s<>"']+ "#).expect("BARE_URL regex"));

/// Drops `utm_`-prefixed query parameters from one URL.
///
/// Returns the rewritten URL and the number of dropped parameters, or
/// `None` when the URL does not parse, has no query, or has no UTM keys.
fn strip_utm(url: &str) -> Option<(String, usize)> {
    let mut parsed = Url::parse(url).ok()?;
    parsed.query()?;

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let kept: Vec<&(String, String)> = pairs.iter().filter(|(k, _)| !k.starts_with("utm_")).collect();
    let removed = pairs.len() - kept.len();
    if removed == 0 {
        return None;
    }

    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        parsed.set_query(Some(&query.finish()));
    }

    Some((parsed.to_string(), removed))
}

/// Strips UTM parameters from every link and bare URL in `html`.
#[must_use]
pub fn remove(html: &str, recorder: &mut ChangeRecorder) -> String {
    let mut total = 0;

    let cleaned = HREF_URL.replace_all(html, |caps: &Captures| match strip_utm(&caps[2]) {
        Some((url, n)) => {
            total += n;
            format!("{}{}{}", &caps[1], url, &caps[3])
        }
        None => caps[0].to_string(),
    });

    let cleaned = BARE_URL.replace_all(&cleaned, |caps: &Captures| {
        match strip_utm(caps[0].trim_end()) {
            Some((url, n)) => {
                total += n;
                format!("{url} ")
            }
            None => caps[0].to_string(),
        }
    });

    if total > 0 {
        recorder.increment(UTM_STAT_KEY, total);
        recorder.record_location(
            UTM_STAT_KEY,
            "UTM Parameters",
            &ChangeLocation::generic("Link"),
            total,
        );
    }

    cleaned.into_owned()
}

/// Whether a URL carries at least one `utm_`-prefixed query parameter.
#[must_use]
pub fn url_has_utm(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .filter(|u| u.query().is_some())
        .is_some_and(|u| u.query_pairs().any(|(k, _)| k.starts_with("utm_")))
}

/// The literal `href` URLs in `html` that carry UTM parameters, in
/// document order. Used by the non-mutating analysis to let callers
/// preview which links a clean would rewrite.
#[must_use]
pub fn collect_utm_urls(html: &str) -> Vec<String> {
    HREF_URL
        .captures_iter(html)
        .filter_map(|caps| {
            let url = caps.get(2)?.as_str();
            url_has_utm(url).then(|| url.to_string())
        })
        .collect()
}
