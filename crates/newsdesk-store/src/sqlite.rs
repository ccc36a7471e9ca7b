use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use newsdesk_core::{
    Article, ArticleQuery, ArticleRepository, ArticleStatus, Counter, NewArticle, Page,
    RepositoryError,
};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params, params_from_iter};

use crate::StoreError;
use crate::db::{self, ARTICLE_COLUMNS, RawArticle};

/// [`ArticleRepository`] backed by a single SQLite connection.
pub struct SqliteRepository {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteRepository {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        db::init_database(&conn)?;
        tracing::info!(path = %path.display(), "opened article database");
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// A private in-memory database, discarded on drop.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        db::init_database(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file, or `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn fetch_one(
        conn: &Connection,
        condition: &str,
        param: &dyn rusqlite::ToSql,
    ) -> Result<Option<Article>, StoreError> {
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE {condition} LIMIT 1"
        ))?;
        let raw = stmt.query_row([param], RawArticle::from_row).optional()?;
        raw.map(RawArticle::into_article).transpose()
    }

    fn list_inner(&self, query: &ArticleQuery) -> Result<Page<Article>, StoreError> {
        let conn = self.lock()?;
        let (filter, mut values) = db::where_clause(query);

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM articles {filter}"),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )?;

        let pagination = query.pagination;
        values.push(rusqlite::types::Value::Integer(i64::from(pagination.limit())));
        values.push(rusqlite::types::Value::Integer(
            i64::try_from(pagination.offset()).unwrap_or(i64::MAX),
        ));
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles {filter} {} LIMIT ? OFFSET ?",
            db::order_clause(query.order)
        ))?;
        let articles = stmt
            .query_map(params_from_iter(values.iter()), RawArticle::from_row)?
            .map(|raw| raw.map_err(StoreError::from).and_then(RawArticle::into_article))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(articles, total.max(0) as u64, pagination))
    }
}

fn is_unique_violation(err: &StoreError) -> bool {
    matches!(
        err,
        StoreError::Database(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation
    )
}

impl ArticleRepository for SqliteRepository {
    fn list(&self, query: &ArticleQuery) -> Result<Page<Article>, RepositoryError> {
        Ok(self.list_inner(query)?)
    }

    fn get_by_slug(
        &self,
        slug: &str,
        status: Option<ArticleStatus>,
    ) -> Result<Option<Article>, RepositoryError> {
        let conn = self.lock()?;
        let article = Self::fetch_one(&conn, "slug = ?1", &slug)?;
        Ok(article.filter(|a| status.is_none_or(|s| a.status == s)))
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Article>, RepositoryError> {
        let conn = self.lock()?;
        Ok(Self::fetch_one(&conn, "id = ?1", &id)?)
    }

    fn create(&self, article: NewArticle, slug: &str) -> Result<Article, RepositoryError> {
        let conn = self.lock()?;
        let id = match db::insert_article(&conn, article, slug, Utc::now()) {
            Ok(id) => id,
            Err(e) if is_unique_violation(&e) => {
                return Err(RepositoryError::DuplicateSlug(slug.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(id, slug, "inserted article");
        Self::fetch_one(&conn, "id = ?1", &id)?
            .ok_or_else(|| RepositoryError::Database(format!("inserted row {id} not found")))
    }

    fn update_status(
        &self,
        id: i64,
        status: ArticleStatus,
    ) -> Result<Option<Article>, RepositoryError> {
        let conn = self.lock()?;
        let changed = conn
            .execute(
                "UPDATE articles SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status.as_str(), db::format_timestamp(&Utc::now()), id],
            )
            .map_err(StoreError::from)?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(Self::fetch_one(&conn, "id = ?1", &id)?)
    }

    fn increment_counter(
        &self,
        slug: &str,
        counter: Counter,
    ) -> Result<Option<Article>, RepositoryError> {
        let conn = self.lock()?;
        let column = counter.column();
        let changed = conn
            .execute(
                &format!("UPDATE articles SET {column} = {column} + 1 WHERE slug = ?1"),
                [slug],
            )
            .map_err(StoreError::from)?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(Self::fetch_one(&conn, "slug = ?1", &slug)?)
    }

    fn find_by_title_fragment(&self, fragment: &str) -> Result<Option<Article>, RepositoryError> {
        let conn = self.lock()?;
        let pattern = db::like_pattern(&fragment.to_lowercase());
        Ok(Self::fetch_one(
            &conn,
            r"unicode_lower(title) LIKE ?1 ESCAPE '\' ORDER BY id",
            &pattern,
        )?)
    }

    fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let conn = self.lock()?;
        let deleted = conn
            .execute("DELETE FROM articles WHERE id = ?1", [id])
            .map_err(StoreError::from)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_core::{ArticleOrder, Pagination};

    fn repo_with(titles: &[&str]) -> SqliteRepository {
        let repo = SqliteRepository::open_in_memory().unwrap();
        for title in titles {
            let article = NewArticle::new(*title, format!("{title} summary."), "Body text.");
            repo.create(article, &newsdesk_core::base_slug(title)).unwrap();
        }
        repo
    }

    #[test]
    fn test_create_and_get() {
        let repo = repo_with(&["Hostel Fees Revised"]);
        let article = repo.get_by_slug("hostel-fees-revised", None).unwrap().unwrap();
        assert_eq!(article.title, "Hostel Fees Revised");
        assert_eq!(repo.get_by_id(article.id).unwrap(), Some(article));
        assert!(repo.get_by_slug("missing", None).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_slug() {
        let repo = repo_with(&["Same"]);
        let err = repo.create(NewArticle::new("Same", "s", "c"), "same").unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateSlug(s) if s == "same"));
    }

    #[test]
    fn test_status_filter_on_slug_lookup() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let mut draft = NewArticle::new("Draft Piece", "s", "c");
        draft.status = Some(ArticleStatus::Draft);
        repo.create(draft, "draft-piece").unwrap();
        assert!(repo
            .get_by_slug("draft-piece", Some(ArticleStatus::Published))
            .unwrap()
            .is_none());
        assert!(repo
            .get_by_slug("draft-piece", Some(ArticleStatus::Draft))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_update_status_and_delete() {
        let repo = repo_with(&["Exam Notice"]);
        let id = repo.get_by_slug("exam-notice", None).unwrap().unwrap().id;
        let updated = repo.update_status(id, ArticleStatus::Archived).unwrap().unwrap();
        assert_eq!(updated.status, ArticleStatus::Archived);
        assert!(repo.update_status(999, ArticleStatus::Draft).unwrap().is_none());

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
    }

    #[test]
    fn test_increment_counter() {
        let repo = repo_with(&["Sports Day"]);
        repo.increment_counter("sports-day", Counter::Views).unwrap();
        let article = repo
            .increment_counter("sports-day", Counter::Views)
            .unwrap()
            .unwrap();
        assert_eq!((article.views, article.likes, article.shares), (2, 0, 0));
        assert!(repo.increment_counter("nope", Counter::Likes).unwrap().is_none());
    }

    #[test]
    fn test_find_by_title_fragment_case_insensitive() {
        let repo = repo_with(&["Annual Scholarship Results Announced"]);
        let found = repo.find_by_title_fragment("annual SCHOLARSHIP").unwrap();
        assert!(found.is_some());
        assert!(repo.find_by_title_fragment("hostel").unwrap().is_none());
        // Wildcards in the fragment are literal.
        assert!(repo.find_by_title_fragment("%").unwrap().is_none());
    }

    #[test]
    fn test_list_paginates_and_counts() {
        let titles: Vec<String> = (0..25).map(|i| format!("Notice {i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let repo = repo_with(&refs);

        let query = ArticleQuery::published()
            .with_order(ArticleOrder::Newest)
            .with_pagination(Pagination::new(3, 10));
        let page = repo.list(&query).unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.articles.len(), 5);
        assert_eq!(page.articles[0].title, "Notice 4");
    }

    #[test]
    fn test_list_search_matches_tags() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let mut article = NewArticle::new("Campus Update", "Nothing much.", "c");
        article.tags = vec!["internship".into()];
        repo.create(article, "campus-update").unwrap();
        repo.create(NewArticle::new("Other", "Other news.", "c"), "other")
            .unwrap();

        let query = ArticleQuery::published().with_search(Some("INTERN".into()));
        let page = repo.list(&query).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.articles[0].slug, "campus-update");
    }

    #[test]
    fn test_open_on_disk_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("news.sqlite3");
        {
            let repo = SqliteRepository::open(&path).unwrap();
            repo.create(NewArticle::new("Kept", "s", "c"), "kept").unwrap();
            assert_eq!(repo.path(), Some(path.as_path()));
        }
        let repo = SqliteRepository::open(&path).unwrap();
        assert!(repo.get_by_slug("kept", None).unwrap().is_some());
    }
}
