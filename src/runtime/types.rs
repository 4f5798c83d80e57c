//! Runtime type definitions.

use std::sync::Arc;

use serde_json::{
    Map,
    Value,
};

use crate::runtime::render::TranslationEngine;
use crate::runtime::resolve::reduce_language_tag;
use crate::runtime::session::SessionLanguageMap;

/// Request attributes the runtime consults when resolving a language.
///
/// Filled by the serving layer; negotiation itself (e.g. `Accept-Language`
/// parsing) happens there.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub session_id: Option<String>,
    /// Language negotiated from the incoming request, possibly a composite
    /// weighted list.
    pub negotiated_language: Option<String>,
    /// Authenticated principal id, when the request carries one.
    pub principal: Option<String>,
}

/// Options for one socket call/endpoint, augmented by the socket hook.
pub struct SocketCallOptions {
    pub session_id: String,
    /// Stored language of the calling user, when authenticated.
    pub user_language: Option<String>,
    /// Translate function bound to the calling session/user. Installed by
    /// the hook.
    pub translator: Option<SessionTranslator>,
}

impl SocketCallOptions {
    /// Options for a session, before the hook runs.
    #[must_use]
    pub fn new(session_id: impl Into<String>, user_language: Option<String>) -> Self {
        Self { session_id: session_id.into(), user_language, translator: None }
    }
}

impl std::fmt::Debug for SocketCallOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketCallOptions")
            .field("session_id", &self.session_id)
            .field("user_language", &self.user_language)
            .field("translator", &self.translator.is_some())
            .finish()
    }
}

/// Translate function bound to a session/user.
///
/// Unlike [`crate::runtime::RenderContext`], socket calls are not memoized;
/// the session map is re-read on every call so an explicit language change
/// takes effect immediately.
pub struct SessionTranslator {
    /// Shared session → language map.
    sessions: Arc<SessionLanguageMap>,
    /// External translation engine.
    engine: Arc<dyn TranslationEngine>,
    /// Session this translator is bound to.
    session_id: String,
    /// Stored user language, consulted when the session has no entry.
    user_language: Option<String>,
    /// Configured fallback.
    fallback_language: String,
}

impl SessionTranslator {
    pub(crate) fn new(
        sessions: Arc<SessionLanguageMap>,
        engine: Arc<dyn TranslationEngine>,
        session_id: String,
        user_language: Option<String>,
        fallback_language: String,
    ) -> Self {
        Self { sessions, engine, session_id, user_language, fallback_language }
    }

    /// Translate `key` with `args` in the language currently effective for
    /// the bound session: session entry, then stored user language, then
    /// fallback.
    #[must_use]
    pub fn translate(&self, key: &str, args: &Map<String, Value>) -> String {
        let language = self
            .sessions
            .get_language(&self.session_id)
            .or_else(|| self.user_language.clone())
            .unwrap_or_else(|| self.fallback_language.clone());

        self.engine.translate(reduce_language_tag(&language), key, args)
    }
}

impl std::fmt::Debug for SessionTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTranslator")
            .field("session_id", &self.session_id)
            .field("user_language", &self.user_language)
            .field("fallback_language", &self.fallback_language)
            .finish_non_exhaustive()
    }
}
