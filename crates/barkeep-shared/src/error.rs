use thiserror::Error;

/// Errors surfaced by the authentication capability.
///
/// The identity provider itself lives behind a platform adapter; the
/// common layer only sees its failures as human-readable messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The provider rejected the attempt (wrong password, unknown user,
    /// network failure on the provider side, ...). The message is shown
    /// to the user as-is.
    #[error("{0}")]
    Provider(String),

    /// The user dismissed the platform credential picker.
    #[error("Sign-in cancelled")]
    Cancelled,

    /// An operation that requires a signed-in user was called without one.
    #[error("No active session")]
    NoSession,
}
