//! Request lifecycle state machine

use std::fmt;
use thiserror::Error;

/// Phase of a single client request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Submitting,
    AwaitingFirstToken,
    Streaming,
    Completed,
    Errored,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Illegal request transition: {from} -> {to}")]
pub struct LifecycleError {
    pub from: RequestPhase,
    pub to: RequestPhase,
}

impl RequestPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPhase::Idle => "idle",
            RequestPhase::Submitting => "submitting",
            RequestPhase::AwaitingFirstToken => "awaiting-first-token",
            RequestPhase::Streaming => "streaming",
            RequestPhase::Completed => "completed",
            RequestPhase::Errored => "errored",
        }
    }

    /// Whether `self -> to` is a legal move. Reset to `Idle` is always legal.
    pub fn can_transition(&self, to: RequestPhase) -> bool {
        use RequestPhase::*;
        match (self, to) {
            (_, Idle) => true,
            (from, Errored) => from.is_in_flight(),
            (from, to) => matches!(
                (from, to),
                (Idle | Completed | Errored, Submitting)
                    | (Submitting, AwaitingFirstToken)
                    | (AwaitingFirstToken, Streaming)
                    | (AwaitingFirstToken | Streaming, Completed)
            ),
        }
    }

    pub fn transition(self, to: RequestPhase) -> Result<RequestPhase, LifecycleError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(LifecycleError { from: self, to })
        }
    }

    /// The user may type a new prompt.
    pub fn accepts_input(&self) -> bool {
        matches!(
            self,
            RequestPhase::Idle | RequestPhase::Completed | RequestPhase::Errored
        )
    }

    /// "Continue the conversation" is offered only after a successful answer.
    pub fn offers_continue(&self) -> bool {
        matches!(self, RequestPhase::Completed)
    }

    /// A request is between submission and its terminal phase.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            RequestPhase::Submitting | RequestPhase::AwaitingFirstToken | RequestPhase::Streaming
        )
    }
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::RequestPhase::*;
    use super::*;

    #[test]
    fn test_happy_path() {
        let phase = Idle
            .transition(Submitting)
            .and_then(|p| p.transition(AwaitingFirstToken))
            .and_then(|p| p.transition(Streaming))
            .and_then(|p| p.transition(Completed))
            .unwrap();
        assert_eq!(phase, Completed);
        assert!(phase.accepts_input());
        assert!(phase.offers_continue());
    }

    #[test]
    fn test_errored_reachable_from_in_flight_only() {
        for from in [Submitting, AwaitingFirstToken, Streaming] {
            assert!(from.can_transition(Errored), "{from} -> errored");
        }
        for from in [Idle, Completed, Errored] {
            assert!(!from.can_transition(Errored), "{from} -> errored");
        }
    }

    #[test]
    fn test_errored_accepts_input_without_continue() {
        assert!(Errored.accepts_input());
        assert!(!Errored.offers_continue());
        assert!(!Streaming.accepts_input());
    }

    #[test]
    fn test_illegal_transition_reports_both_ends() {
        let err = Idle.transition(Streaming).unwrap_err();
        assert_eq!(err, LifecycleError { from: Idle, to: Streaming });
        assert_eq!(err.to_string(), "Illegal request transition: idle -> streaming");
        assert!(Submitting.transition(Completed).is_err());
        assert!(Streaming.transition(Submitting).is_err());
    }

    #[test]
    fn test_restart_and_reset() {
        assert_eq!(Completed.transition(Submitting), Ok(Submitting));
        assert_eq!(Errored.transition(Submitting), Ok(Submitting));
        for from in [Idle, Submitting, AwaitingFirstToken, Streaming, Completed, Errored] {
            assert_eq!(from.transition(Idle), Ok(Idle));
        }
    }
}
