use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use crate::cloud::{CloudError, CloudResult, CloudTransport, RequestPayload};

pub(super) const REQUEST_RESULT_POLL_INTERVAL: Duration = Duration::from_millis(24);
const WORKER_THREAD_NAME: &str = "wordcloud-request";

/// Sends `payload` on a worker thread and hands the outcome to `on_result`
/// on the GTK main loop. `on_result` runs exactly once.
pub(super) fn spawn_cloud_request<H>(
    transport: Arc<dyn CloudTransport>,
    payload: RequestPayload,
    on_result: H,
) where
    H: FnOnce(CloudResult<Vec<u8>>) + 'static,
{
    let (tx, rx) = mpsc::channel::<CloudResult<Vec<u8>>>();
    let spawned = std::thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            let _ = tx.send(transport.send(&payload));
        });
    if let Err(err) = spawned {
        tracing::error!(?err, "failed to spawn word cloud request worker");
        on_result(Err(CloudError::Unexpected {
            message: format!("failed to start request: {err}"),
        }));
        return;
    }

    let mut on_result = Some(on_result);
    gtk4::glib::timeout_add_local(REQUEST_RESULT_POLL_INTERVAL, move || {
        match rx.try_recv() {
            Ok(result) => {
                if let Some(on_result) = on_result.take() {
                    on_result(result);
                }
                gtk4::glib::ControlFlow::Break
            }
            Err(mpsc::TryRecvError::Empty) => gtk4::glib::ControlFlow::Continue,
            Err(mpsc::TryRecvError::Disconnected) => {
                tracing::error!("word cloud request worker exited without a result");
                if let Some(on_result) = on_result.take() {
                    on_result(Err(CloudError::Unexpected {
                        message: "request worker stopped unexpectedly".to_string(),
                    }));
                }
                gtk4::glib::ControlFlow::Break
            }
        }
    });
}
