use crate::storage::CloudImage;

/// Identifies one `generate` invocation. Later invocations carry larger
/// tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading {
        token: RequestToken,
    },
    Success(CloudImage),
    Failed {
        message: String,
    },
}

impl RequestState {
    pub fn phase(&self) -> RequestPhase {
        match self {
            Self::Idle => RequestPhase::Idle,
            Self::Loading { .. } => RequestPhase::Loading,
            Self::Success(_) => RequestPhase::Success,
            Self::Failed { .. } => RequestPhase::Failed,
        }
    }

    #[cfg(test)]
    pub fn loading_token(&self) -> Option<RequestToken> {
        match self {
            Self::Loading { token } => Some(*token),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn image(&self) -> Option<&CloudImage> {
        match self {
            Self::Success(image) => Some(image),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_tokens_increase_monotonically() {
        let first = RequestToken::default().next();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn accessors_only_expose_matching_variant_data() {
        let loading = RequestState::Loading {
            token: RequestToken::default().next(),
        };
        assert_eq!(loading.phase(), RequestPhase::Loading);
        assert_eq!(loading.loading_token().map(RequestToken::get), Some(1));
        assert!(loading.image().is_none());

        let failed = RequestState::Failed {
            message: "offline".to_string(),
        };
        assert_eq!(failed.phase(), RequestPhase::Failed);
        assert_eq!(failed.error_message(), Some("offline"));
        assert!(failed.loading_token().is_none());

        assert_eq!(RequestState::default().phase(), RequestPhase::Idle);
    }
}
