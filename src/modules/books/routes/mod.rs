use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use bookshelf_http::error::AppError;

use super::models::{Cost, NewBook};
use super::repository::BookRepository;
use super::views;

/// Payload of the add and edit forms.
///
/// Browsers submit every field as text, so `cost` arrives as a string here
/// and is stored as one. Missing fields default to empty rather than
/// rejecting the submission; nothing is validated.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub shopping_url: String,
}

impl From<BookForm> for NewBook {
    fn from(form: BookForm) -> Self {
        NewBook {
            title: form.title,
            author: form.author,
            cost: Cost::Text(form.cost),
            shopping_url: form.shopping_url,
        }
    }
}

pub fn router(repository: Arc<BookRepository>) -> Router {
    Router::new()
        .route("/", get(list_books))
        .route("/add", get(show_add_form).post(create_book))
        .route("/book/{id}", get(show_book))
        .route("/edit/{id}", get(show_edit_form).post(update_book))
        .route("/delete/{id}", post(delete_book))
        .with_state(repository)
}

async fn list_books(
    State(repository): State<Arc<BookRepository>>,
) -> Result<Html<String>, AppError> {
    let books = repository.list_all()?;
    Ok(views::book_list(&books))
}

async fn show_add_form() -> Html<String> {
    views::add_form()
}

async fn create_book(
    State(repository): State<Arc<BookRepository>>,
    Form(form): Form<BookForm>,
) -> Result<Redirect, AppError> {
    let book = repository.create(form.into())?;
    tracing::info!(id = book.id, title = %book.title, "created book");
    Ok(Redirect::to("/"))
}

async fn show_book(
    State(repository): State<Arc<BookRepository>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let book = repository.get_by_id(id)?.ok_or_else(not_found)?;
    Ok(views::book_detail(&book))
}

async fn show_edit_form(
    State(repository): State<Arc<BookRepository>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let book = repository.get_by_id(id)?.ok_or_else(not_found)?;
    Ok(views::edit_form(&book))
}

async fn update_book(
    State(repository): State<Arc<BookRepository>>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    let book = repository.update(id, form.into())?.ok_or_else(not_found)?;
    tracing::info!(id = book.id, "updated book");
    Ok(Redirect::to(&format!("/book/{}", book.id)))
}

async fn delete_book(
    State(repository): State<Arc<BookRepository>>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&id)?;
    repository.delete(id)?.ok_or_else(not_found)?;
    tracing::info!(id, "deleted book");
    Ok(Redirect::to("/"))
}

/// An id that does not parse as an integer can never match a stored book,
/// so it gets the same response as an absent one.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| not_found())
}

fn not_found() -> AppError {
    AppError::not_found("Book not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert_eq!(parse_id("1755000000000").unwrap(), 1_755_000_000_000);
    }

    #[test]
    fn parse_id_rejects_everything_else() {
        for raw in ["abc", "7.5", "", "7x", " 7"] {
            assert!(matches!(
                parse_id(raw),
                Err(AppError::NotFound { .. })
            ));
        }
    }

    #[test]
    fn form_converts_to_new_book_with_text_cost() {
        let form = BookForm {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            cost: "15".to_string(),
            shopping_url: "http://x".to_string(),
        };

        let new: NewBook = form.into();
        assert_eq!(new.title, "Dune");
        assert_eq!(new.cost, Cost::Text("15".to_string()));
        assert_eq!(new.shopping_url, "http://x");
    }
}
