use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::controller::{display_mode, AutoGenerateGate, CloudController, PreparedRequest};
use crate::error::AppResult;
use crate::notification::NotificationKind;
use crate::text::is_blank;
use crate::ui::{heading_label, StyleTokens, LAYOUT_TOKENS};
use gtk4::prelude::*;
use gtk4::{Align, Application, ApplicationWindow, Box as GtkBox, Label, Orientation, Overlay};

mod bootstrap;
mod generator_view;
mod input_surface;
mod runtime_css;
mod toast;
mod worker;

use self::bootstrap::*;
use self::generator_view::GeneratorView;
use self::input_surface::InputSurface;
use self::runtime_css::install_runtime_css;
use self::toast::{ToastKind, ToastRuntime};
use self::worker::spawn_cloud_request;

const APPLICATION_ID: &str = "io.github.wordcloud_client";
const WINDOW_TITLE: &str = "WordCloud Client";
const SUCCESS_MESSAGE: &str = "Word cloud generated successfully";
const ERROR_MESSAGE: &str = "Error generating word cloud";

type SharedController = Rc<RefCell<CloudController>>;
type SharedGate = Rc<RefCell<AutoGenerateGate>>;

fn error_notification_text(detail: &str) -> String {
    let detail = detail.trim();
    if detail.is_empty() {
        ERROR_MESSAGE.to_string()
    } else {
        format!("{ERROR_MESSAGE}: {detail}")
    }
}

fn gtk_launch_args() -> Vec<String> {
    std::env::args().take(1).collect()
}

/// Everything the input/trigger wiring needs on the main thread.
#[derive(Clone)]
struct GeneratorRuntime {
    controller: SharedController,
    input: InputSurface,
    view: GeneratorView,
    show_image: bool,
}

impl GeneratorRuntime {
    fn refresh(&self) {
        let input_blank = is_blank(&self.input.text());
        let mode = display_mode(self.controller.borrow().state(), self.show_image, input_blank);
        self.view.render(&mode);
    }

    fn generate(&self, text: &str) {
        let prepared = self.controller.borrow_mut().begin_request(text);
        self.refresh();
        let Ok(PreparedRequest { ticket, payload }) = prepared else {
            return;
        };

        let transport = self.controller.borrow().transport();
        let runtime = self.clone();
        spawn_cloud_request(transport, payload, move |outcome| {
            runtime
                .controller
                .borrow_mut()
                .complete_request(ticket, outcome);
            runtime.refresh();
        });
    }
}

fn schedule_auto_generation(runtime: &GeneratorRuntime, gate: &SharedGate, text: &str) {
    let Some(scheduled) = gate.borrow_mut().on_text_changed(text) else {
        return;
    };
    let runtime = runtime.clone();
    let gate = gate.clone();
    gtk4::glib::timeout_add_local_once(scheduled.delay(), move || {
        if !gate.borrow().is_current(scheduled) {
            return;
        }
        let text = runtime.input.text();
        runtime.generate(&text);
    });
}

fn connect_controller_callbacks(
    controller: &SharedController,
    toast: &ToastRuntime,
    tokens: StyleTokens,
) {
    let mut controller = controller.borrow_mut();
    {
        let toast = toast.clone();
        controller.set_success_callback(move |image| {
            tracing::info!(
                id = image.id(),
                format = ?image.format(),
                dimensions = ?image.dimensions(),
                "displaying word cloud"
            );
            toast.show(SUCCESS_MESSAGE, ToastKind::Success, tokens.toast_duration_ms);
            crate::notification::send(NotificationKind::Success, SUCCESS_MESSAGE);
        });
    }
    {
        let toast = toast.clone();
        controller.set_error_callback(move |message| {
            tracing::error!(message, "word cloud error");
            let text = error_notification_text(message);
            toast.show(text.as_str(), ToastKind::Error, tokens.toast_duration_ms);
            crate::notification::send(NotificationKind::Error, text);
        });
    }
}

fn build_main_window(
    app: &Application,
    config: &AppConfig,
    tokens: StyleTokens,
    controller: SharedController,
) {
    install_runtime_css(tokens);

    let window = ApplicationWindow::new(app);
    window.set_title(Some(WINDOW_TITLE));
    window.set_default_size(tokens.window_default_width, tokens.window_default_height);
    window.set_size_request(tokens.window_min_width, tokens.window_min_height);
    window.add_css_class("wordcloud-root");

    let content = GtkBox::new(Orientation::Vertical, tokens.spacing_12);
    content.set_margin_top(tokens.spacing_20);
    content.set_margin_bottom(tokens.spacing_20);
    content.set_margin_start(tokens.spacing_20);
    content.set_margin_end(tokens.spacing_20);

    let input = InputSurface::new(tokens);
    let view = GeneratorView::new(tokens, &config.css_class);
    content.append(&heading_label(WINDOW_TITLE));
    content.append(input.widget());
    content.append(view.widget());

    let scroller = gtk4::ScrolledWindow::builder()
        .child(&content)
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .build();

    let toast_anchor = GtkBox::new(Orientation::Vertical, 0);
    toast_anchor.set_halign(Align::End);
    toast_anchor.set_valign(Align::End);
    toast_anchor.set_margin_bottom(tokens.spacing_12);
    toast_anchor.set_margin_end(tokens.spacing_12);
    let toast_label = Label::new(Some(""));
    toast_label.add_css_class("toast-badge");
    toast_label.set_visible(false);
    toast_anchor.append(&toast_label);

    let overlay = Overlay::new();
    overlay.set_child(Some(&scroller));
    overlay.add_overlay(&toast_anchor);
    window.set_child(Some(&overlay));

    let toast = ToastRuntime::new(&toast_label);
    connect_controller_callbacks(&controller, &toast, tokens);

    let runtime = GeneratorRuntime {
        controller: controller.clone(),
        input,
        view,
        show_image: config.show_image,
    };
    let gate: SharedGate = Rc::new(RefCell::new(AutoGenerateGate::new(
        config.auto_generate,
        config.auto_generate_delay,
    )));

    {
        let runtime_for_clicks = runtime.clone();
        runtime.view.trigger().connect_clicked(move |_| {
            let text = runtime_for_clicks.input.text();
            runtime_for_clicks.generate(&text);
        });
    }
    {
        let runtime_for_changes = runtime.clone();
        let gate = gate.clone();
        runtime.input.connect_changed(move |text| {
            runtime_for_changes.refresh();
            schedule_auto_generation(&runtime_for_changes, &gate, &text);
        });
    }
    {
        let controller = controller.clone();
        let gate = gate.clone();
        window.connect_close_request(move |_| {
            gate.borrow_mut().cancel();
            controller.borrow_mut().teardown();
            gtk4::glib::Propagation::Proceed
        });
    }

    runtime.refresh();
    runtime.input.grab_focus();
    tracing::info!(auto_generate = gate.borrow().enabled(), "presenting main window");
    window.present();
}

pub struct App {
    bootstrap: AppBootstrap,
}

impl App {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            bootstrap: bootstrap_app_runtime()?,
        })
    }

    /// Runs the GTK main loop until the window closes, then releases every
    /// generated image.
    pub fn start(self) {
        let AppBootstrap {
            config,
            store,
            transport,
        } = self.bootstrap;

        let controller: SharedController = Rc::new(RefCell::new(CloudController::new(
            config.render.clone(),
            Arc::new(transport),
            store,
        )));

        tracing::info!("starting gtk runtime");
        let application = Application::new(
            Some(APPLICATION_ID),
            gtk4::gio::ApplicationFlags::NON_UNIQUE,
        );

        let config = Rc::new(config);
        let activate_once = Rc::new(Cell::new(false));
        {
            let controller = controller.clone();
            application.connect_activate(move |app| {
                if activate_once.replace(true) {
                    tracing::debug!("ignoring duplicate gtk activate signal");
                    return;
                }
                build_main_window(app, &config, LAYOUT_TOKENS, controller.clone());
            });
        }

        // Pass only argv[0] so GTK does not try to parse unknown flags.
        let gtk_args = gtk_launch_args();
        application.run_with_args(&gtk_args);

        controller.borrow_mut().teardown();
    }
}
