//! Server-rendered pages for the books module.
//!
//! Plain string templating: each page is assembled with `format!` into the
//! shared [`layout`], with user-entered fields escaped on the way in.

use axum::response::Html;

use super::models::Book;

/// Index page listing every book.
pub fn book_list(books: &[Book]) -> Html<String> {
    let mut body = String::from("<h1>Books</h1>\n");
    body.push_str("<p><a href=\"/add\">Add a book</a></p>\n");

    if books.is_empty() {
        body.push_str("<p>No books yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Title</th><th>Author</th><th>Cost</th><th></th></tr></thead>\n<tbody>\n",
        );
        for book in books {
            body.push_str(&format!(
                "<tr>\
                 <td><a href=\"/book/{id}\">{title}</a></td>\
                 <td>{author}</td>\
                 <td>{cost}</td>\
                 <td><a href=\"/edit/{id}\">Edit</a> {delete}</td>\
                 </tr>\n",
                id = book.id,
                title = escape(&book.title),
                author = escape(&book.author),
                cost = escape(&book.cost.to_string()),
                delete = delete_form(book.id),
            ));
        }
        body.push_str("</tbody>\n</table>\n");
    }

    Html(layout("Books", &body))
}

/// Detail page for a single book.
pub fn book_detail(book: &Book) -> Html<String> {
    let body = format!(
        "<h1>{title}</h1>\n\
         <dl>\n\
         <dt>Author</dt><dd>{author}</dd>\n\
         <dt>Cost</dt><dd>{cost}</dd>\n\
         <dt>Shop</dt><dd><a href=\"{url}\">{url}</a></dd>\n\
         </dl>\n\
         <p><a href=\"/edit/{id}\">Edit</a> {delete} <a href=\"/\">Back to list</a></p>\n",
        id = book.id,
        title = escape(&book.title),
        author = escape(&book.author),
        cost = escape(&book.cost.to_string()),
        url = escape(&book.shopping_url),
        delete = delete_form(book.id),
    );

    Html(layout(&book.title, &body))
}

/// Empty form for creating a book, posting to `/add`.
pub fn add_form() -> Html<String> {
    form_page("Add a book", "/add", "Add", None)
}

/// Form pre-filled with an existing book, posting to `/edit/{id}`.
pub fn edit_form(book: &Book) -> Html<String> {
    form_page(
        "Edit book",
        &format!("/edit/{}", book.id),
        "Save",
        Some(book),
    )
}

fn form_page(heading: &str, action: &str, submit: &str, prefill: Option<&Book>) -> Html<String> {
    let (title, author, cost, shopping_url) = match prefill {
        Some(book) => (
            escape(&book.title),
            escape(&book.author),
            escape(&book.cost.to_string()),
            escape(&book.shopping_url),
        ),
        None => Default::default(),
    };

    let body = format!(
        "<h1>{heading}</h1>\n\
         <form method=\"post\" action=\"{action}\">\n\
         <label>Title <input type=\"text\" name=\"title\" value=\"{title}\"></label>\n\
         <label>Author <input type=\"text\" name=\"author\" value=\"{author}\"></label>\n\
         <label>Cost <input type=\"text\" name=\"cost\" value=\"{cost}\"></label>\n\
         <label>Shopping URL <input type=\"text\" name=\"shoppingUrl\" value=\"{shopping_url}\"></label>\n\
         <button type=\"submit\">{submit}</button>\n\
         </form>\n\
         <p><a href=\"/\">Back to list</a></p>\n",
        heading = escape(heading),
        action = escape(action),
    );

    Html(layout(heading, &body))
}

fn delete_form(id: i64) -> String {
    format!(
        "<form method=\"post\" action=\"/delete/{id}\" class=\"inline\">\
         <button type=\"submit\">Delete</button>\
         </form>"
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} - Bookshelf</title>\n\
         <link rel=\"stylesheet\" href=\"/style.css\">\n\
         </head>\n\
         <body>\n{body}</body>\n\
         </html>\n",
        title = escape(title),
    )
}

/// Escapes text for interpolation into HTML element and attribute positions.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
