use notify_rust::{Notification, Timeout};

const APP_NAME: &str = "WordCloud Client";
const NOTIFICATION_TIMEOUT_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    fn summary(self) -> &'static str {
        match self {
            Self::Success => "Word cloud ready",
            Self::Error => "Word cloud failed",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Success => "dialog-information",
            Self::Error => "dialog-error",
        }
    }
}

/// Posts a desktop notification. Failures are logged and otherwise ignored.
pub fn send(kind: NotificationKind, body: impl Into<String>) {
    let body = body.into();
    if let Err(err) = Notification::new()
        .appname(APP_NAME)
        .summary(kind.summary())
        .icon(kind.icon())
        .body(&body)
        .timeout(Timeout::Milliseconds(NOTIFICATION_TIMEOUT_MS))
        .show()
    {
        tracing::warn!(?kind, "desktop notification failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_distinct_summary_and_icon() {
        assert_ne!(
            NotificationKind::Success.summary(),
            NotificationKind::Error.summary()
        );
        assert_eq!(NotificationKind::Error.icon(), "dialog-error");
    }
}
