use anyhow::Context;

use bookshelf_app::modules;
use bookshelf_kernel::settings::Settings;
use bookshelf_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    bookshelf_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        store = %settings.store.books_path().display(),
        "bookshelf bootstrap starting"
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &settings);

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    bookshelf_http::start_server(&registry, &settings)
        .await
        .with_context(|| "server terminated abnormally")?;

    registry.stop_all().await?;

    tracing::info!("bookshelf shut down cleanly");
    Ok(())
}
