mod debounce;
mod display;

use std::sync::Arc;

pub use debounce::{AutoGenerateGate, ScheduledGeneration};
pub use display::{display_mode, DisplayMode, LOADING_LABEL, TRIGGER_LABEL};

use crate::cloud::{CloudError, CloudResult, CloudTransport, RenderOptions, RequestPayload};
use crate::state::{RequestEvent, RequestState, RequestToken, StateMachine};
use crate::storage::{CloudImage, ImageStore};
use crate::text::{is_blank, WordFrequencyTable};

type ErrorCallback = Box<dyn FnMut(&str)>;
type SuccessCallback = Box<dyn FnMut(&CloudImage)>;

/// Proof that a request was started; hand it back to
/// [`CloudController::complete_request`] with the transport outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    token: RequestToken,
}

impl RequestTicket {
    #[cfg(test)]
    pub fn token(&self) -> RequestToken {
        self.token
    }
}

#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub ticket: RequestTicket,
    pub payload: RequestPayload,
}

/// Turns input text into a word-cloud request and owns the resulting image.
///
/// Only the most recently started request may change state; completions
/// carrying an older ticket are dropped. The image held from a previous
/// success is revoked as soon as a newer request completes, and every image
/// is revoked on [`CloudController::teardown`].
pub struct CloudController {
    options: RenderOptions,
    transport: Arc<dyn CloudTransport>,
    store: ImageStore,
    machine: StateMachine,
    current: Option<CloudImage>,
    latest_token: RequestToken,
    on_error: Option<ErrorCallback>,
    on_success: Option<SuccessCallback>,
}

impl CloudController {
    pub fn new(
        options: RenderOptions,
        transport: Arc<dyn CloudTransport>,
        store: ImageStore,
    ) -> Self {
        Self {
            options,
            transport,
            store,
            machine: StateMachine::new(),
            current: None,
            latest_token: RequestToken::default(),
            on_error: None,
            on_success: None,
        }
    }

    pub fn set_error_callback(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_error = Some(Box::new(callback));
    }

    pub fn set_success_callback(&mut self, callback: impl FnMut(&CloudImage) + 'static) {
        self.on_success = Some(Box::new(callback));
    }

    pub fn state(&self) -> &RequestState {
        self.machine.state()
    }

    #[cfg(test)]
    pub fn current_image(&self) -> Option<&CloudImage> {
        self.current.as_ref()
    }

    pub fn transport(&self) -> Arc<dyn CloudTransport> {
        Arc::clone(&self.transport)
    }

    /// Runs a whole request on the calling thread.
    pub fn generate_cloud(&mut self, text: &str) -> Option<CloudImage> {
        let prepared = self.begin_request(text).ok()?;
        let outcome = self.transport.send(&prepared.payload);
        self.complete_request(prepared.ticket, outcome)
    }

    pub fn begin_request(&mut self, text: &str) -> CloudResult<PreparedRequest> {
        if is_blank(text) {
            let err = CloudError::EmptyInput;
            tracing::warn!("refusing to generate a word cloud from blank input");
            self.notify_error(&err.to_string());
            return Err(err);
        }

        let table = WordFrequencyTable::from_text(text);
        let payload = RequestPayload::from_table(&table, &self.options);

        let token = self.latest_token.next();
        self.latest_token = token;
        self.apply(RequestEvent::Submit { token });
        tracing::info!(
            token = token.get(),
            distinct_words = table.len(),
            total_words = table.total(),
            "word cloud request started"
        );

        Ok(PreparedRequest {
            ticket: RequestTicket { token },
            payload,
        })
    }

    pub fn complete_request(
        &mut self,
        ticket: RequestTicket,
        outcome: CloudResult<Vec<u8>>,
    ) -> Option<CloudImage> {
        if ticket.token != self.latest_token {
            tracing::debug!(
                token = ticket.token.get(),
                latest = self.latest_token.get(),
                "discarding superseded word cloud response"
            );
            return None;
        }

        let stored = outcome.and_then(|bytes| self.store.store(&bytes).map_err(CloudError::from));
        self.release_current();

        match stored {
            Ok(image) => {
                tracing::info!(
                    token = ticket.token.get(),
                    id = image.id(),
                    path = %image.path().display(),
                    "word cloud generated"
                );
                self.current = Some(image.clone());
                self.apply(RequestEvent::Succeed {
                    image: image.clone(),
                });
                if let Some(on_success) = self.on_success.as_mut() {
                    on_success(&image);
                }
                Some(image)
            }
            Err(err) => {
                tracing::error!(
                    token = ticket.token.get(),
                    kind = ?err.kind(),
                    %err,
                    "error generating word cloud"
                );
                let message = err.to_string();
                self.apply(RequestEvent::Fail {
                    message: message.clone(),
                });
                self.notify_error(&message);
                None
            }
        }
    }

    /// Releases every image and invalidates any request still in flight.
    pub fn teardown(&mut self) {
        self.latest_token = self.latest_token.next();
        self.current = None;
        let released = self.store.revoke_all();
        if released > 0 {
            tracing::debug!(released, "released word cloud images on teardown");
        }
    }

    fn release_current(&mut self) {
        let Some(previous) = self.current.take() else {
            return;
        };
        if let Err(err) = self.store.revoke(&previous) {
            tracing::warn!(id = previous.id(), ?err, "failed to release previous word cloud");
        }
    }

    fn apply(&mut self, event: RequestEvent) {
        if let Err(err) = self.machine.transition(event) {
            tracing::error!(?err, "request state machine rejected event");
        }
    }

    fn notify_error(&mut self, message: &str) {
        if let Some(on_error) = self.on_error.as_mut() {
            on_error(message);
        }
    }
}

impl Drop for CloudController {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::EMPTY_INPUT_MESSAGE;
    use crate::state::RequestPhase;
    use crate::storage::{png_fixture, CloudImageFormat};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Mutex;

    struct FakeTransport {
        responses: Mutex<Vec<CloudResult<Vec<u8>>>>,
        requests: Mutex<Vec<RequestPayload>>,
    }

    impl FakeTransport {
        fn replying(responses: Vec<CloudResult<Vec<u8>>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_count(&self) -> usize {
            self.requests.lock().expect("requests lock").len()
        }

        fn last_request(&self) -> Option<RequestPayload> {
            self.requests.lock().expect("requests lock").last().cloned()
        }
    }

    impl CloudTransport for FakeTransport {
        fn send(&self, payload: &RequestPayload) -> CloudResult<Vec<u8>> {
            self.requests
                .lock()
                .expect("requests lock")
                .push(payload.clone());
            let mut responses = self.responses.lock().expect("responses lock");
            if responses.is_empty() {
                return Err(CloudError::Transport {
                    message: "no scripted response".to_string(),
                });
            }
            responses.remove(0)
        }
    }

    #[derive(Default)]
    struct CallbackLog {
        errors: Vec<String>,
        successes: Vec<CloudImage>,
    }

    struct Harness {
        controller: CloudController,
        transport: Arc<FakeTransport>,
        log: Rc<RefCell<CallbackLog>>,
        _scratch: tempfile::TempDir,
    }

    fn harness(responses: Vec<CloudResult<Vec<u8>>>) -> Harness {
        let scratch = tempfile::tempdir().expect("scratch dir");
        let transport = FakeTransport::replying(responses);
        let mut controller = CloudController::new(
            RenderOptions::default(),
            transport.clone(),
            ImageStore::with_dir(scratch.path().to_path_buf()),
        );
        let log = Rc::new(RefCell::new(CallbackLog::default()));
        {
            let log = log.clone();
            controller.set_error_callback(move |message| {
                log.borrow_mut().errors.push(message.to_string());
            });
        }
        {
            let log = log.clone();
            controller.set_success_callback(move |image| {
                log.borrow_mut().successes.push(image.clone());
            });
        }
        Harness {
            controller,
            transport,
            log,
            _scratch: scratch,
        }
    }

    #[test]
    fn blank_input_reports_error_without_network_call() {
        for input in ["", " ", "\n\t  ", "\u{FEFF}", "\u{3000}\u{FEFF} "] {
            let mut h = harness(vec![Ok(png_fixture(1, 1))]);

            assert!(h.controller.generate_cloud(input).is_none());
            assert_eq!(h.transport.request_count(), 0);
            assert_eq!(h.log.borrow().errors, vec![EMPTY_INPUT_MESSAGE.to_string()]);
            assert!(h.log.borrow().successes.is_empty());
            assert_eq!(h.controller.state(), &RequestState::Idle);
        }
    }

    #[test]
    fn successful_response_yields_displayable_image() {
        let mut h = harness(vec![Ok(png_fixture(8, 6))]);

        let image = h
            .controller
            .generate_cloud("Cat, cat CAT!")
            .expect("success should yield an image");

        assert!(image.path().exists());
        assert_eq!(image.dimensions(), Some((8, 6)));
        assert_eq!(h.log.borrow().successes, vec![image.clone()]);
        assert!(h.log.borrow().errors.is_empty());
        assert_eq!(h.controller.state(), &RequestState::Success(image.clone()));
        assert_eq!(h.controller.current_image(), Some(&image));

        let sent = h.transport.last_request().expect("one request sent");
        assert_eq!(sent.words.len(), 1);
        assert_eq!(sent.words[0].text, "cat");
        assert_eq!(sent.words[0].value, 3);
        assert_eq!(sent.options, RenderOptions::default());
    }

    #[test]
    fn request_payload_follows_first_occurrence_order() {
        let mut h = harness(vec![Ok(png_fixture(1, 1))]);

        h.controller
            .generate_cloud("The quick brown fox. The Fox jumps!")
            .expect("success");

        let sent = h.transport.last_request().expect("request sent");
        let words: Vec<(&str, u32)> = sent
            .words
            .iter()
            .map(|entry| (entry.text.as_str(), entry.value))
            .collect();
        assert_eq!(
            words,
            vec![
                ("the", 2),
                ("quick", 1),
                ("brown", 1),
                ("fox", 2),
                ("jumps", 1)
            ]
        );
    }

    #[test]
    fn non_success_status_reports_error_and_clears_image() {
        let mut h = harness(vec![
            Ok(png_fixture(1, 1)),
            Err(CloudError::HttpStatus { status: 503 }),
        ]);
        let first = h.controller.generate_cloud("hello").expect("first succeeds");

        assert!(h.controller.generate_cloud("hello again").is_none());

        assert_eq!(h.transport.request_count(), 2);
        assert_eq!(h.log.borrow().errors.len(), 1);
        assert!(!h.log.borrow().errors[0].is_empty());
        assert!(h.controller.current_image().is_none());
        assert!(!first.path().exists());
        assert_eq!(h.controller.state().phase(), RequestPhase::Failed);
    }

    #[test]
    fn unrecognized_body_is_reported_as_unexpected_failure() {
        let mut h = harness(vec![Ok(b"definitely not an image".to_vec())]);

        assert!(h.controller.generate_cloud("words").is_none());

        let log = h.log.borrow();
        assert_eq!(log.errors.len(), 1);
        assert!(log.errors[0].starts_with("unexpected response"));
        assert!(log.successes.is_empty());
    }

    #[test]
    fn svg_body_is_displayed_without_pixel_dimensions() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"></svg>"#;
        let mut h = harness(vec![Ok(svg.to_vec())]);

        let image = h
            .controller
            .generate_cloud("vector cloud")
            .expect("svg should yield an image");

        assert_eq!(image.format(), CloudImageFormat::Svg);
        assert!(image.path().exists());
        assert!(h.log.borrow().errors.is_empty());
        assert_eq!(h.log.borrow().successes, vec![image]);
    }

    #[test]
    fn repeated_generation_replaces_and_releases_previous_image() {
        let mut h = harness(vec![Ok(png_fixture(2, 2)), Ok(png_fixture(2, 2))]);

        let first = h.controller.generate_cloud("same text").expect("first");
        let second = h.controller.generate_cloud("same text").expect("second");

        assert_ne!(first.id(), second.id());
        assert!(!first.path().exists());
        assert!(second.path().exists());
        assert_eq!(h.controller.current_image(), Some(&second));
        assert_eq!(h.log.borrow().successes.len(), 2);
        assert!(h.log.borrow().errors.is_empty());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut h = harness(Vec::new());

        let older = h.controller.begin_request("first draft").expect("older");
        let newer = h.controller.begin_request("second draft").expect("newer");

        let stale = h
            .controller
            .complete_request(older.ticket, Ok(png_fixture(1, 1)));
        assert!(stale.is_none());
        assert_eq!(
            h.controller.state().loading_token(),
            Some(newer.ticket.token())
        );
        assert!(h.log.borrow().successes.is_empty());

        let fresh = h
            .controller
            .complete_request(newer.ticket, Ok(png_fixture(1, 1)))
            .expect("latest completion applies");
        assert_eq!(h.controller.state(), &RequestState::Success(fresh));
        assert_eq!(h.log.borrow().successes.len(), 1);
    }

    #[test]
    fn stale_failure_does_not_clobber_newer_success() {
        let mut h = harness(Vec::new());

        let older = h.controller.begin_request("one").expect("older");
        let newer = h.controller.begin_request("two").expect("newer");
        let image = h
            .controller
            .complete_request(newer.ticket, Ok(png_fixture(1, 1)))
            .expect("newer succeeds");

        h.controller
            .complete_request(older.ticket, Err(CloudError::HttpStatus { status: 500 }));

        assert_eq!(h.controller.current_image(), Some(&image));
        assert!(image.path().exists());
        assert!(h.log.borrow().errors.is_empty());
    }

    #[test]
    fn new_request_from_success_moves_to_loading() {
        let mut h = harness(vec![Ok(png_fixture(1, 1))]);
        let image = h.controller.generate_cloud("alpha").expect("success");

        let prepared = h.controller.begin_request("beta").expect("begin");

        assert_eq!(
            h.controller.state(),
            &RequestState::Loading {
                token: prepared.ticket.token()
            }
        );
        assert!(image.path().exists());
    }

    #[test]
    fn teardown_releases_image_and_ignores_in_flight_completion() {
        let mut h = harness(vec![Ok(png_fixture(1, 1))]);
        let image = h.controller.generate_cloud("alpha").expect("success");
        let in_flight = h.controller.begin_request("beta").expect("begin");

        h.controller.teardown();

        assert!(!image.path().exists());
        assert!(h.controller.current_image().is_none());
        assert!(h
            .controller
            .complete_request(in_flight.ticket, Ok(png_fixture(1, 1)))
            .is_none());
    }

    #[test]
    fn dropping_controller_releases_images() {
        let h = harness(vec![Ok(png_fixture(1, 1))]);
        let Harness {
            mut controller,
            _scratch,
            ..
        } = h;
        let image = controller.generate_cloud("alpha").expect("success");

        drop(controller);

        assert!(!image.path().exists());
    }

    #[test]
    fn punctuation_only_input_still_sends_empty_word_list() {
        let mut h = harness(vec![Ok(png_fixture(1, 1))]);

        h.controller.generate_cloud("?! ...").expect("service decides");

        let sent = h.transport.last_request().expect("request sent");
        assert!(sent.words.is_empty());
    }
}
