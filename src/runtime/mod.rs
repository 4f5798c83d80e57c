//! Request-time language resolution and translation serving.
//!
//! The serving layer calls [`LocaleRuntime::render_hook`] before each render
//! and [`LocaleRuntime::socket_hook`] before each socket call; the compiled
//! catalog produced by the [`crate::compiler`] pipeline is served through
//! [`LocaleRuntime::serve_catalog`].
mod render;
mod resolve;
mod serve;
mod service;
mod session;
mod sync;
mod types;

pub use render::{
    RenderContext,
    TranslationEngine,
};
pub use resolve::{
    reduce_language_tag,
    resolve_language,
};
pub use service::{
    LocaleRuntime,
    RuntimeConfig,
};
pub use session::SessionLanguageMap;
pub use sync::{
    PrincipalStore,
    StoreError,
};
pub use types::{
    RequestContext,
    SessionTranslator,
    SocketCallOptions,
};
