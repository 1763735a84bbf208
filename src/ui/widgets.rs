use gtk4::prelude::*;
use gtk4::{Align, Button, Label};

pub fn primary_button(label: &str, extra_classes: &[&str]) -> Button {
    let button = Button::with_label(label);
    button.set_focus_on_click(false);
    button.set_halign(Align::Start);
    button.add_css_class("suggested-action");
    button.add_css_class("primary-button");
    for css_class in extra_classes {
        button.add_css_class(css_class);
    }
    button
}

pub fn heading_label(text: &str) -> Label {
    let label = Label::new(Some(text));
    label.add_css_class("title-1");
    label.add_css_class("app-heading");
    label.set_halign(Align::Start);
    label.set_xalign(0.0);
    label
}
