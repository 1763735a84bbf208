use crate::cloud::HttpTransport;
use crate::config::{load_app_config, AppConfig};
use crate::error::AppResult;
use crate::storage::{prune_stale_image_files, ImageStore};

const STALE_IMAGE_MAX_AGE_HOURS: u64 = 24;

pub(super) struct AppBootstrap {
    pub(super) config: AppConfig,
    pub(super) store: ImageStore,
    pub(super) transport: HttpTransport,
}

pub(super) fn bootstrap_app_runtime() -> AppResult<AppBootstrap> {
    let config = load_app_config()?;
    tracing::info!(
        endpoint = %config.endpoint,
        width = config.render.width,
        height = config.render.height,
        show_image = config.show_image,
        auto_generate = config.auto_generate,
        timeout_secs = config.request_timeout.as_secs(),
        "loaded word cloud config"
    );

    prune_stale_cloud_images();
    let store = ImageStore::with_default_dir()?;
    tracing::debug!(dir = %store.dir().display(), "word cloud image directory ready");

    let transport = HttpTransport::new(config.endpoint.as_str(), config.request_timeout)?;

    Ok(AppBootstrap {
        config,
        store,
        transport,
    })
}

fn prune_stale_cloud_images() {
    match prune_stale_image_files(STALE_IMAGE_MAX_AGE_HOURS) {
        Ok(report) if report.removed_files > 0 => {
            tracing::info!(
                removed_files = report.removed_files,
                "pruned stale word cloud images"
            );
        }
        Ok(_) => {}
        Err(err) => {
            tracing::warn!(
                max_age_hours = STALE_IMAGE_MAX_AGE_HOURS,
                ?err,
                "failed to prune stale word cloud images"
            );
        }
    }
}
