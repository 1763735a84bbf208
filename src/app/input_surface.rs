use gtk4::prelude::*;
use gtk4::{Align, Label, Overlay, ScrolledWindow, TextBuffer, TextView, WrapMode};

use crate::ui::StyleTokens;

const INPUT_PLACEHOLDER: &str = "Type your text here...";

/// Editable text area. Holds the current input and nothing else.
#[derive(Clone)]
pub(super) struct InputSurface {
    root: Overlay,
    view: TextView,
}

impl InputSurface {
    pub(super) fn new(tokens: StyleTokens) -> Self {
        let view = TextView::new();
        view.set_wrap_mode(WrapMode::WordChar);
        view.set_top_margin(tokens.spacing_8);
        view.set_bottom_margin(tokens.spacing_8);
        view.set_left_margin(tokens.spacing_8);
        view.set_right_margin(tokens.spacing_8);
        view.add_css_class("input-surface");

        let scrolled = ScrolledWindow::builder()
            .child(&view)
            .min_content_height(tokens.input_min_height)
            .hexpand(true)
            .build();

        let placeholder = Label::new(Some(INPUT_PLACEHOLDER));
        placeholder.add_css_class("dim-label");
        placeholder.set_halign(Align::Start);
        placeholder.set_valign(Align::Start);
        placeholder.set_margin_top(tokens.spacing_8);
        placeholder.set_margin_start(tokens.spacing_12);
        placeholder.set_can_target(false);

        let root = Overlay::new();
        root.set_child(Some(&scrolled));
        root.add_overlay(&placeholder);

        view.buffer().connect_changed(move |buffer| {
            placeholder.set_visible(buffer.char_count() == 0);
        });

        Self { root, view }
    }

    pub(super) fn widget(&self) -> &Overlay {
        &self.root
    }

    pub(super) fn text(&self) -> String {
        buffer_text(&self.view.buffer())
    }

    pub(super) fn grab_focus(&self) {
        self.view.grab_focus();
    }

    /// `callback` receives the full text after every edit.
    pub(super) fn connect_changed<F>(&self, callback: F)
    where
        F: Fn(String) + 'static,
    {
        self.view.buffer().connect_changed(move |buffer| {
            callback(buffer_text(buffer));
        });
    }
}

fn buffer_text(buffer: &TextBuffer) -> String {
    let (start, end) = buffer.bounds();
    buffer.text(&start, &end, false).to_string()
}
