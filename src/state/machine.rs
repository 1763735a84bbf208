use super::error::{StateError, StateResult};
use super::{RequestEvent, RequestEventKind, RequestPhase, RequestState, StateTransition};

const MAX_TRANSITION_HISTORY: usize = 64;

#[derive(Debug)]
pub struct StateMachine {
    state: RequestState,
    transition_history: Vec<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: RequestState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn next_phase(&self, event: RequestEventKind) -> Option<RequestPhase> {
        use RequestEventKind::*;
        match (self.state.phase(), event) {
            (_, Submit) => Some(RequestPhase::Loading),
            (RequestPhase::Loading, Succeed) => Some(RequestPhase::Success),
            (RequestPhase::Loading, Fail) => Some(RequestPhase::Failed),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: RequestEvent) -> StateResult<&RequestState> {
        let kind = event.kind();
        let from = self.state.phase();
        tracing::debug!(from = ?from, event = ?kind, "request state transition");
        let to = self.next_phase(kind).ok_or_else(|| {
            tracing::warn!(from = ?from, event = ?kind, "invalid state transition requested");
            StateError::InvalidStateTransition { from, event: kind }
        })?;

        self.state = event.into_state();
        if self.transition_history.len() == MAX_TRANSITION_HISTORY {
            self.transition_history.remove(0);
        }
        self.transition_history
            .push(StateTransition::new(from, kind, to));

        Ok(&self.state)
    }
}

#[cfg(test)]
impl StateMachine {
    fn can_transition(&self, event: RequestEventKind) -> bool {
        self.next_phase(event).is_some()
    }

    fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RequestState::{:?}", self.state.phase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RequestToken;

    fn submit(token: u64) -> RequestEvent {
        let mut next = RequestToken::default();
        for _ in 0..token {
            next = next.next();
        }
        RequestEvent::Submit { token: next }
    }

    fn fail(message: &str) -> RequestEvent {
        RequestEvent::Fail {
            message: message.to_string(),
        }
    }

    #[test]
    fn can_transition_tracks_valid_and_invalid_events() {
        let mut machine = StateMachine::new();
        assert!(machine.can_transition(RequestEventKind::Submit));
        assert!(!machine.can_transition(RequestEventKind::Succeed));
        assert!(!machine.can_transition(RequestEventKind::Fail));

        machine
            .transition(submit(1))
            .expect("idle -> loading should transition");

        assert!(machine.can_transition(RequestEventKind::Succeed));
        assert!(machine.can_transition(RequestEventKind::Fail));
        assert!(machine.can_transition(RequestEventKind::Submit));
    }

    #[test]
    fn transition_records_history_with_ordered_entries() {
        let mut machine = StateMachine::new();
        machine.transition(submit(1)).expect("submit");
        machine.transition(fail("offline")).expect("fail");
        machine.transition(submit(2)).expect("resubmit from failed");

        assert_eq!(machine.state().loading_token().map(RequestToken::get), Some(2));
        assert_eq!(
            machine.history(),
            &[
                StateTransition::new(
                    RequestPhase::Idle,
                    RequestEventKind::Submit,
                    RequestPhase::Loading
                ),
                StateTransition::new(
                    RequestPhase::Loading,
                    RequestEventKind::Fail,
                    RequestPhase::Failed
                ),
                StateTransition::new(
                    RequestPhase::Failed,
                    RequestEventKind::Submit,
                    RequestPhase::Loading
                ),
            ]
        );
    }

    #[test]
    fn invalid_transition_returns_error_without_mutating_history() {
        let mut machine = StateMachine::new();

        let err = machine
            .transition(fail("nothing in flight"))
            .expect_err("idle -> fail should be rejected");
        assert!(matches!(
            err,
            StateError::InvalidStateTransition {
                from: RequestPhase::Idle,
                event: RequestEventKind::Fail
            }
        ));
        assert_eq!(machine.state(), &RequestState::Idle);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn history_is_bounded() {
        let mut machine = StateMachine::new();
        for token in 1..=(MAX_TRANSITION_HISTORY as u64 + 10) {
            machine.transition(submit(token)).expect("submit");
        }
        assert_eq!(machine.history().len(), MAX_TRANSITION_HISTORY);
    }

    #[test]
    fn display_names_current_phase() {
        let mut machine = StateMachine::new();
        assert_eq!(machine.to_string(), "RequestState::Idle");
        machine.transition(submit(1)).expect("submit");
        assert_eq!(machine.to_string(), "RequestState::Loading");
    }
}
