pub mod models;
pub mod repository;
pub mod routes;
pub mod views;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;

use bookshelf_kernel::{InitCtx, Module};

use repository::BookRepository;

/// The books module: the whole CRUD surface of the application.
pub struct BooksModule {
    repository: Arc<BookRepository>,
}

impl BooksModule {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            repository: Arc::new(BookRepository::new(store_path)),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        // Probe the backing file up front so a missing or corrupt collection
        // stops the process at startup instead of on the first request.
        let books = self.repository.list_all().with_context(|| {
            format!(
                "reading book collection from {}",
                self.repository.store_path().display()
            )
        })?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = books.len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.repository))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module from application settings.
pub fn create_module(settings: &bookshelf_kernel::settings::Settings) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(settings.store.books_path()))
}
