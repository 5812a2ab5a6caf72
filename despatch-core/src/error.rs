//! Error types for despatch.
//!
//! Registration is the only surface that fails fast. The dispatch hot path
//! has no error channel at all: resolution misses and handler misses degrade
//! to buffering or dropping, never to an error — dispatch must not
//! destabilize the caller's event loop.

use thiserror::Error;

/// Errors raised by handler registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The namespace contains the action-name separator and would be
    /// re-parsed as part of the local name on lookup.
    #[error("namespace `{namespace}` must not contain `.`")]
    NamespaceContainsSeparator {
        /// The offending namespace.
        namespace: String,
    },

    /// A handler was registered under an empty local name, which no action
    /// name can ever resolve to.
    #[error("empty local action name in namespace `{namespace}`")]
    EmptyLocalName {
        /// The namespace the empty local name was registered under.
        namespace: String,
    },
}
