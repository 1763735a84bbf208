use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use gtk4::prelude::*;
use gtk4::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Error => "toast-error",
        }
    }
}

/// Transient in-window message. A newer toast keeps itself visible even if
/// an older toast's hide timer fires.
#[derive(Clone)]
pub(super) struct ToastRuntime {
    label: Label,
    sequence: Rc<Cell<u64>>,
}

impl ToastRuntime {
    pub(super) fn new(label: &Label) -> Self {
        Self {
            label: label.clone(),
            sequence: Rc::new(Cell::new(0)),
        }
    }

    pub(super) fn show(&self, message: impl Into<String>, kind: ToastKind, duration_ms: u32) {
        let message = message.into();
        self.label.set_text(&message);
        for other in [ToastKind::Success, ToastKind::Error] {
            self.label.remove_css_class(other.css_class());
        }
        self.label.add_css_class(kind.css_class());
        self.label.set_visible(true);

        let sequence = self.sequence.get().saturating_add(1);
        self.sequence.set(sequence);

        let label = self.label.clone();
        let latest_sequence = self.sequence.clone();
        gtk4::glib::timeout_add_local_once(
            Duration::from_millis(u64::from(duration_ms)),
            move || {
                if latest_sequence.get() == sequence {
                    label.set_visible(false);
                }
            },
        );
    }
}
