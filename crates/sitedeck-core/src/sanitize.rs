//! Tracking parameter removal
//!
//! Outbound links are cleaned of analytics and ad attribution query
//! parameters before they are opened. Anything that is not a parseable URL is
//! passed through untouched.

use url::{form_urlencoded, Url};

/// Query parameter names stripped from outbound links (exact, case-sensitive)
pub const TRACKING_PARAMS: &[&str] = &[
    // Urchin / Google Analytics campaign tags
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "utm_id",
    "utm_name",
    "utm_cid",
    "utm_reader",
    "utm_referrer",
    "utm_social",
    "utm_social-type",
    "utm_brand",
    "utm_place",
    // Ad click identifiers
    "gclid",
    "gclsrc",
    "dclid",
    "gbraid",
    "wbraid",
    "fbclid",
    "msclkid",
    "yclid",
    "twclid",
    "ttclid",
    "li_fat_id",
    "igshid",
    // Mailing and marketing automation
    "mc_cid",
    "mc_eid",
    "mkt_tok",
    "_hsenc",
    "_hsmi",
    "vero_id",
    "oly_anon_id",
    "oly_enc_id",
    // Analytics client ids
    "_ga",
    "_gl",
    "s_cid",
    "rb_clickid",
    // Referrer, share and affiliate markers
    "ref",
    "ref_src",
    "ref_url",
    "spm",
    "scm",
    "share_source",
    "aff_id",
    "affiliate_id",
];

/// Whether a query parameter name is on the deny-list
pub fn is_tracking_param(name: &str) -> bool {
    TRACKING_PARAMS.contains(&name)
}

/// Remove tracking parameters from a URL
///
/// Remaining parameters keep their order and exact encoding. When nothing is
/// removed (or the input does not parse) the input is returned as-is.
pub fn sanitize(input: &str) -> String {
    strip_tracking(input).unwrap_or_else(|| input.to_string())
}

/// Whether [`sanitize`] would change this URL
pub fn has_tracking_params(input: &str) -> bool {
    let Ok(url) = Url::parse(input) else {
        return false;
    };
    url.query()
        .map(|query| query.split('&').any(is_tracking_pair))
        .unwrap_or(false)
}

/// The rewritten URL, or `None` when there is nothing to strip
fn strip_tracking(input: &str) -> Option<String> {
    let mut url = Url::parse(input).ok()?;

    let kept = {
        let query = url.query()?;
        if !query.split('&').any(is_tracking_pair) {
            return None;
        }
        // Once the query is rewritten, empty segments go too
        query
            .split('&')
            .filter(|pair| !pair.is_empty() && !is_tracking_pair(pair))
            .collect::<Vec<_>>()
            .join("&")
    };

    url.set_query(if kept.is_empty() { None } else { Some(kept.as_str()) });
    Some(url.into())
}

/// Check one raw `name=value` segment; the name is compared decoded
fn is_tracking_pair(pair: &str) -> bool {
    form_urlencoded::parse(pair.as_bytes())
        .next()
        .map(|(name, _)| is_tracking_param(&name))
        .unwrap_or(false)
}
