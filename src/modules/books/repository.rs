use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use time::OffsetDateTime;

use bookshelf_store::{JsonStore, StoreResult};

use super::models::{Book, NewBook};

/// CRUD access to the book collection.
///
/// Stateless between calls: every operation loads the full collection from
/// the backing file, works on that in-memory copy, and (for mutations)
/// writes the full collection back. The mutex serializes concurrent
/// in-process mutation windows; it holds no data, so edits made to the file
/// by anything else are visible on the next call.
pub struct BookRepository {
    store: JsonStore<Book>,
    write_lock: Mutex<()>,
}

impl BookRepository {
    /// Creates a repository over the backing file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// Returns every book, in stored order.
    pub fn list_all(&self) -> StoreResult<Vec<Book>> {
        self.store.load()
    }

    /// Appends a new book with a freshly assigned id and returns it.
    ///
    /// Ids are wall-clock milliseconds, so two creates within the same
    /// millisecond collide. A collision is logged and kept as-is; lookups
    /// then resolve the id to its first match.
    pub fn create(&self, new: NewBook) -> StoreResult<Book> {
        let _guard = self.write_lock.lock();
        let mut books = self.store.load()?;

        let id = now_millis();
        if books.iter().any(|book| book.id == id) {
            tracing::warn!(id, "assigned a book id that already exists");
        }

        let book = Book {
            id,
            title: new.title,
            author: new.author,
            cost: new.cost,
            shopping_url: new.shopping_url,
        };
        books.push(book.clone());
        self.store.save(&books)?;

        Ok(book)
    }

    /// Returns the first book with the given id, or `None`.
    pub fn get_by_id(&self, id: i64) -> StoreResult<Option<Book>> {
        let books = self.store.load()?;
        Ok(books.into_iter().find(|book| book.id == id))
    }

    /// Replaces every field except `id` on the book with the given id.
    ///
    /// Returns `None` without touching the file when no book matches.
    pub fn update(&self, id: i64, new: NewBook) -> StoreResult<Option<Book>> {
        let _guard = self.write_lock.lock();
        let mut books = self.store.load()?;

        let Some(book) = books.iter_mut().find(|book| book.id == id) else {
            return Ok(None);
        };
        book.title = new.title;
        book.author = new.author;
        book.cost = new.cost;
        book.shopping_url = new.shopping_url;
        let updated = book.clone();

        self.store.save(&books)?;
        Ok(Some(updated))
    }

    /// Removes the first book with the given id and returns it.
    ///
    /// Returns `None` without touching the file when no book matches.
    pub fn delete(&self, id: i64) -> StoreResult<Option<Book>> {
        let _guard = self.write_lock.lock();
        let mut books = self.store.load()?;

        let Some(index) = books.iter().position(|book| book.id == id) else {
            return Ok(None);
        };
        let removed = books.remove(index);

        self.store.save(&books)?;
        Ok(Some(removed))
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::Cost;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn new_book(title: &str, author: &str, cost: Cost, url: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: author.to_string(),
            cost,
            shopping_url: url.to_string(),
        }
    }

    fn book(id: i64, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: "someone".to_string(),
            cost: Cost::from(10),
            shopping_url: "http://example.com".to_string(),
        }
    }

    fn seeded_repo(books: &[Book]) -> (TempDir, BookRepository) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.json");
        fs::write(&path, serde_json::to_string_pretty(books).unwrap()).unwrap();
        (dir, BookRepository::new(path))
    }

    #[test]
    fn create_on_empty_collection_appends_one_book() {
        let (_dir, repo) = seeded_repo(&[]);

        let created = repo
            .create(new_book("Dune", "Herbert", Cost::from(15), "http://x"))
            .unwrap();

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);
        assert_eq!(all[0].title, "Dune");
        assert_eq!(all[0].author, "Herbert");
        assert_eq!(all[0].cost, Cost::from(15));
        assert_eq!(all[0].shopping_url, "http://x");
        assert!(created.id > 0);
    }

    #[test]
    fn list_all_returns_stored_order() {
        let (_dir, repo) = seeded_repo(&[book(3, "c"), book(1, "a"), book(2, "b")]);

        let titles: Vec<_> = repo
            .list_all()
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[test]
    fn get_by_id_finds_the_matching_book() {
        let (_dir, repo) = seeded_repo(&[book(1, "a"), book(7, "target")]);

        let found = repo.get_by_id(7).unwrap().unwrap();
        assert_eq!(found.title, "target");
    }

    #[test]
    fn get_by_id_returns_none_for_absent_id() {
        let (_dir, repo) = seeded_repo(&[book(7, "only")]);
        assert!(repo.get_by_id(9).unwrap().is_none());
    }

    #[test]
    fn update_replaces_all_fields_but_id() {
        let (_dir, repo) = seeded_repo(&[book(7, "old")]);

        let updated = repo
            .update(7, new_book("T2", "A2", Cost::from(20), "u2"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, 7);
        assert_eq!(updated.title, "T2");
        assert_eq!(updated.author, "A2");
        assert_eq!(updated.cost, Cost::from(20));
        assert_eq!(updated.shopping_url, "u2");

        let reread = repo.get_by_id(7).unwrap().unwrap();
        assert_eq!(reread, updated);
    }

    #[test]
    fn update_of_absent_id_returns_none_and_writes_nothing() {
        let (_dir, repo) = seeded_repo(&[book(7, "only")]);
        let before = fs::read(repo.store_path()).unwrap();

        let result = repo
            .update(9, new_book("T2", "A2", Cost::from(20), "u2"))
            .unwrap();

        assert!(result.is_none());
        assert_eq!(fs::read(repo.store_path()).unwrap(), before);
    }

    #[test]
    fn delete_removes_the_book_and_returns_it() {
        let (_dir, repo) = seeded_repo(&[book(7, "doomed"), book(8, "kept")]);

        let removed = repo.delete(7).unwrap().unwrap();
        assert_eq!(removed.title, "doomed");

        let remaining = repo.list_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 8);
    }

    #[test]
    fn delete_of_absent_id_returns_none_and_writes_nothing() {
        let (_dir, repo) = seeded_repo(&[book(7, "only")]);
        let before = fs::read(repo.store_path()).unwrap();

        assert!(repo.delete(9).unwrap().is_none());

        assert_eq!(fs::read(repo.store_path()).unwrap(), before);
        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 7);
    }

    #[test]
    fn ids_differ_across_a_clock_tick() {
        let (_dir, repo) = seeded_repo(&[]);

        let first = repo
            .create(new_book("one", "a", Cost::from(1), "u"))
            .unwrap();
        std::thread::sleep(Duration::from_millis(5));
        let second = repo
            .create(new_book("two", "a", Cost::from(1), "u"))
            .unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn duplicate_ids_resolve_to_the_first_match() {
        // A same-millisecond collision leaves two books sharing an id; every
        // keyed operation then acts on the first.
        let (_dir, repo) = seeded_repo(&[book(5, "first"), book(5, "second")]);

        assert_eq!(repo.get_by_id(5).unwrap().unwrap().title, "first");

        let removed = repo.delete(5).unwrap().unwrap();
        assert_eq!(removed.title, "first");

        let remaining = repo.list_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "second");
    }

    #[test]
    fn every_operation_rereads_the_backing_file() {
        let (_dir, repo) = seeded_repo(&[book(1, "original")]);

        // Simulate an out-of-band edit to the file.
        let edited = vec![book(1, "edited")];
        fs::write(
            repo.store_path(),
            serde_json::to_string_pretty(&edited).unwrap(),
        )
        .unwrap();

        assert_eq!(repo.list_all().unwrap()[0].title, "edited");
        assert_eq!(repo.get_by_id(1).unwrap().unwrap().title, "edited");
    }

    #[test]
    fn operations_surface_store_errors() {
        let dir = TempDir::new().unwrap();
        let repo = BookRepository::new(dir.path().join("missing.json"));

        assert!(repo.list_all().is_err());
        assert!(repo.get_by_id(1).is_err());
        assert!(repo.delete(1).is_err());
    }
}
