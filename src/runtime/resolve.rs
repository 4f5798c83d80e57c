//! Active-language resolution.

/// Reduce a composite language tag to a single tag.
///
/// Content negotiation may hand back a space-separated list of weighted
/// candidates (e.g. `"en-US en"`); the stored-preference format expects the
/// **last** element of that list. A plain tag passes through unchanged.
#[must_use]
pub fn reduce_language_tag(tag: &str) -> &str {
    tag.split_whitespace().next_back().unwrap_or(tag)
}

/// Resolve the effective language for a request.
///
/// Precedence (highest to lowest):
/// 1. Language stored for the session
/// 2. Language negotiated from the request
/// 3. Configured fallback
///
/// The winning tag is reduced with [`reduce_language_tag`].
///
/// # Example
///
/// ```
/// use i18n_catalog::runtime::resolve_language;
///
/// assert_eq!(resolve_language(Some("fr"), Some("de"), "en"), "fr");
/// assert_eq!(resolve_language(None, Some("de"), "en"), "de");
/// assert_eq!(resolve_language(None, None, "en"), "en");
/// assert_eq!(resolve_language(None, Some("en-US en"), "fr"), "en");
/// ```
#[must_use]
pub fn resolve_language(
    session_language: Option<&str>,
    negotiated_language: Option<&str>,
    fallback_language: &str,
) -> String {
    let tag = session_language.or(negotiated_language).unwrap_or(fallback_language);
    reduce_language_tag(tag).to_string()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::session_wins(Some("fr"), Some("de"), "fr")]
    #[case::negotiated_when_no_session(None, Some("de"), "de")]
    #[case::fallback_when_neither(None, None, "en")]
    #[case::composite_negotiated_reduced(None, Some("en-US en"), "en")]
    #[case::composite_session_reduced(Some("fr-CA fr"), None, "fr")]
    fn test_resolve_language(
        #[case] session: Option<&str>,
        #[case] negotiated: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(resolve_language(session, negotiated, "en"), expected);
    }

    #[rstest]
    #[case("en", "en")]
    #[case("en-US en", "en")]
    #[case("fr-CA fr-FR fr", "fr")]
    #[case("", "")]
    fn test_reduce_language_tag(#[case] tag: &str, #[case] expected: &str) {
        assert_eq!(reduce_language_tag(tag), expected);
    }
}
