use super::model::{RequestPhase, RequestState, RequestToken};
use crate::storage::CloudImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEvent {
    Submit { token: RequestToken },
    Succeed { image: CloudImage },
    Fail { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEventKind {
    Submit,
    Succeed,
    Fail,
}

impl RequestEvent {
    pub fn kind(&self) -> RequestEventKind {
        match self {
            Self::Submit { .. } => RequestEventKind::Submit,
            Self::Succeed { .. } => RequestEventKind::Succeed,
            Self::Fail { .. } => RequestEventKind::Fail,
        }
    }

    pub(super) fn into_state(self) -> RequestState {
        match self {
            Self::Submit { token } => RequestState::Loading { token },
            Self::Succeed { image } => RequestState::Success(image),
            Self::Fail { message } => RequestState::Failed { message },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: RequestPhase,
    pub event: RequestEventKind,
    pub to: RequestPhase,
}

impl StateTransition {
    pub fn new(from: RequestPhase, event: RequestEventKind, to: RequestPhase) -> Self {
        Self { from, event, to }
    }
}
