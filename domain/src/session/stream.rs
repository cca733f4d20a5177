//! Events read from a streaming chat completion.

/// One event of a provider stream.
///
/// A well-formed stream is any number of `Delta`s followed by exactly one
/// `Completed` or `Error`. Fragments carry no alignment guarantee: a word,
/// or a multi-byte character's neighbours, may straddle two deltas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// The next fragment of the reply. May be empty.
    Delta(String),
    /// The provider finished. Carries the full reply as the provider
    /// reports it, which the relay only uses when no delta arrived.
    Completed(String),
    /// The provider failed mid-stream.
    Error(String),
}
