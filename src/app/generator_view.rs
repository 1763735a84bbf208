use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, Button, Label, Orientation, Picture, Spinner};

use crate::controller::{DisplayMode, LOADING_LABEL, TRIGGER_LABEL};
use crate::storage::CloudImage;
use crate::ui::{primary_button, StyleTokens};

const GENERATOR_CLASS: &str = "word-cloud-generator";
const RESULT_CLASS: &str = "word-cloud-result";
const IMAGE_TOOLTIP: &str = "Generated Word Cloud";

/// Trigger button, loading indicator and result picture; exactly one of
/// them is visible at a time.
#[derive(Clone)]
pub(super) struct GeneratorView {
    root: GtkBox,
    trigger: Button,
    loading: GtkBox,
    spinner: Spinner,
    picture: Picture,
}

impl GeneratorView {
    pub(super) fn new(tokens: StyleTokens, css_class: &str) -> Self {
        let root = GtkBox::new(Orientation::Vertical, tokens.spacing_8);
        root.add_css_class(GENERATOR_CLASS);
        if !css_class.is_empty() {
            root.add_css_class(css_class);
        }

        let trigger = primary_button(TRIGGER_LABEL, &["generate-button"]);

        let spinner = Spinner::new();
        let loading_label = Label::new(Some(LOADING_LABEL));
        let loading = GtkBox::new(Orientation::Horizontal, tokens.spacing_8);
        loading.set_halign(Align::Start);
        loading.append(&spinner);
        loading.append(&loading_label);

        let picture = Picture::new();
        picture.set_hexpand(true);
        picture.set_vexpand(true);
        picture.set_can_shrink(true);
        picture.set_keep_aspect_ratio(true);
        picture.add_css_class("word-cloud-image");
        picture.set_tooltip_text(Some(IMAGE_TOOLTIP));

        root.append(&trigger);
        root.append(&loading);
        root.append(&picture);

        Self {
            root,
            trigger,
            loading,
            spinner,
            picture,
        }
    }

    pub(super) fn widget(&self) -> &GtkBox {
        &self.root
    }

    pub(super) fn trigger(&self) -> &Button {
        &self.trigger
    }

    pub(super) fn render(&self, mode: &DisplayMode) {
        match mode {
            DisplayMode::Hidden => {
                self.root.set_visible(false);
                self.set_loading(false);
                self.clear_picture();
            }
            DisplayMode::Loading => {
                self.show_container(false);
                self.trigger.set_visible(false);
                self.set_loading(true);
                self.clear_picture();
            }
            DisplayMode::Image(image) => {
                self.show_container(true);
                self.trigger.set_visible(false);
                self.set_loading(false);
                self.show_picture(image);
            }
            DisplayMode::Trigger { enabled } => {
                self.show_container(false);
                self.trigger.set_visible(true);
                self.trigger.set_sensitive(*enabled);
                self.set_loading(false);
                self.clear_picture();
            }
        }
    }

    fn show_container(&self, showing_result: bool) {
        self.root.set_visible(true);
        if showing_result {
            self.root.remove_css_class(GENERATOR_CLASS);
            self.root.add_css_class(RESULT_CLASS);
        } else {
            self.root.remove_css_class(RESULT_CLASS);
            self.root.add_css_class(GENERATOR_CLASS);
        }
    }

    fn set_loading(&self, loading: bool) {
        self.loading.set_visible(loading);
        if loading {
            self.spinner.start();
        } else {
            self.spinner.stop();
        }
    }

    fn show_picture(&self, image: &CloudImage) {
        self.picture
            .set_file(Some(&gtk4::gio::File::for_path(image.path())));
        self.picture.set_visible(true);
    }

    fn clear_picture(&self) {
        self.picture.set_paintable(None::<&gtk4::gdk::Paintable>);
        self.picture.set_visible(false);
    }
}
