//! `brickshelf` -- personal LEGO set catalog.
//!
//! Opens (or creates) the SQLite catalog file, upgrades its schema when an
//! older file is found, and starts the interactive shell.
//!
//! # Environment variables
//!
//! | Variable             | Required | Default            | Description                      |
//! |----------------------|----------|--------------------|----------------------------------|
//! | `DATABASE_PATH`      | no       | `lego_database.db` | Catalog file                     |
//! | `IMAGE_TIMEOUT_SECS` | no       | `10`               | Timeout for one image download   |
//! | `GALLERY_THUMB_SIZE` | no       | `200x150`          | Gallery tile size, `WxH`         |
//! | `DETAIL_THUMB_SIZE`  | no       | `150x150`          | Details view image size, `WxH`   |
//! | `RUST_LOG`           | no       | `brickshelf=info`  | Log filter                       |

use brickshelf_app::catalog::Catalog;
use brickshelf_app::config::AppConfig;
use brickshelf_app::shell;
use brickshelf_db::Store;
use brickshelf_imaging::HttpImageFetcher;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "brickshelf=info,brickshelf_app=info,brickshelf_db=info,brickshelf_imaging=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        database = %config.database_path.display(),
        image_timeout_secs = config.image_timeout.as_secs(),
        "Starting brickshelf",
    );

    let store = Store::open(&config.database_path);
    if let Err(e) = store.health_check().await {
        tracing::error!(error = %e, "Cannot open catalog file");
        std::process::exit(1);
    }

    let images = HttpImageFetcher::new(config.image_timeout).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    let catalog = Catalog::new(store, Box::new(images))
        .with_thumbnail_sizes(config.gallery_thumb, config.detail_thumb);

    if let Err(e) = catalog.initialize().await {
        tracing::error!(error = %e, "Failed to prepare catalog schema");
        std::process::exit(1);
    }

    if let Err(e) = shell::run(&catalog).await {
        tracing::error!(error = %e, "Shell terminated");
        std::process::exit(1);
    }
}
