//! The SQLite and in-memory repositories must agree on filtering, search,
//! ordering and pagination.

use newsdesk_core::{
    ArticleOrder, ArticleQuery, ArticleRepository, ArticleStatus, Counter, NewArticle, Pagination,
};
use newsdesk_store::{MemoryRepository, SqliteRepository};

fn seed(repo: &dyn ArticleRepository) {
    let rows = [
        ("Scholarship Deadline Extended", "Scholarship", 5, false, vec!["scholarship"]),
        ("Inter-college Football Final", "Sports", 3, true, vec!["sports"]),
        ("New Research Lab Opens", "Research", 4, false, vec!["research", "new"]),
        ("Placement Drive Next Week", "Career", 2, false, vec!["career"]),
        ("Library Hours Update", "General", 1, false, vec!["update"]),
    ];
    for (title, category, priority, featured, tags) in rows {
        let mut article = NewArticle::new(title, format!("{title}. More inside."), "Body.");
        article.category = category.to_string();
        article.priority = Some(priority);
        article.featured = featured;
        article.tags = tags.into_iter().map(String::from).collect();
        repo.create(article, &newsdesk_core::base_slug(title)).unwrap();
    }
    let mut draft = NewArticle::new("Unreviewed Import", "Draft.", "Body.");
    draft.status = Some(ArticleStatus::Draft);
    repo.create(draft, "unreviewed-import").unwrap();
}

fn slugs(repo: &dyn ArticleRepository, query: &ArticleQuery) -> Vec<String> {
    repo.list(query)
        .unwrap()
        .articles
        .into_iter()
        .map(|a| a.slug)
        .collect()
}

fn backends() -> Vec<Box<dyn ArticleRepository>> {
    vec![
        Box::new(MemoryRepository::new()),
        Box::new(SqliteRepository::open_in_memory().unwrap()),
    ]
}

#[test]
fn editorial_listing_agrees() {
    for repo in backends() {
        seed(repo.as_ref());
        assert_eq!(
            slugs(repo.as_ref(), &ArticleQuery::published()),
            vec![
                "inter-college-football-final",
                "scholarship-deadline-extended",
                "new-research-lab-opens",
                "placement-drive-next-week",
                "library-hours-update",
            ]
        );
    }
}

#[test]
fn search_covers_title_summary_and_tags() {
    for repo in backends() {
        seed(repo.as_ref());
        let by_title = ArticleQuery::published().with_search(Some("football".into()));
        assert_eq!(slugs(repo.as_ref(), &by_title), vec!["inter-college-football-final"]);

        let by_tag = ArticleQuery::published().with_search(Some("CAREER".into()));
        assert_eq!(slugs(repo.as_ref(), &by_tag), vec!["placement-drive-next-week"]);

        let no_hit = ArticleQuery::published().with_search(Some("hostel".into()));
        assert!(slugs(repo.as_ref(), &no_hit).is_empty());
    }
}

#[test]
fn admin_listing_includes_drafts_newest_first() {
    for repo in backends() {
        seed(repo.as_ref());
        let query = ArticleQuery::default()
            .with_order(ArticleOrder::Newest)
            .with_pagination(Pagination::new(1, 2));
        let page = repo.list(&query).unwrap();
        assert_eq!(page.total, 6);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.articles[0].slug, "unreviewed-import");
    }
}

#[test]
fn featured_rank_and_trending_agree() {
    for repo in backends() {
        seed(repo.as_ref());
        let featured = ArticleQuery::published()
            .featured_only()
            .with_order(ArticleOrder::FeaturedRank);
        assert_eq!(slugs(repo.as_ref(), &featured), vec!["inter-college-football-final"]);

        repo.increment_counter("library-hours-update", Counter::Views).unwrap();
        repo.increment_counter("library-hours-update", Counter::Views).unwrap();
        repo.increment_counter("placement-drive-next-week", Counter::Views).unwrap();
        let trending = ArticleQuery::published()
            .with_order(ArticleOrder::Trending)
            .with_pagination(Pagination::new(1, 2));
        assert_eq!(
            slugs(repo.as_ref(), &trending),
            vec!["library-hours-update", "placement-drive-next-week"]
        );
    }
}

#[test]
fn title_fragment_lookup_agrees() {
    for repo in backends() {
        seed(repo.as_ref());
        let found = repo
            .find_by_title_fragment("new research lab")
            .unwrap()
            .unwrap();
        assert_eq!(found.slug, "new-research-lab-opens");
    }
}

#[test]
fn accented_titles_fold_case_in_both() {
    for repo in backends() {
        seed(repo.as_ref());
        let mut article = NewArticle::new("École Results Out", "Résumé workshop follows.", "Body.");
        article.tags = vec!["ÉTUDES".into()];
        repo.create(article, "ecole-results-out").unwrap();

        let found = repo.find_by_title_fragment("école").unwrap().unwrap();
        assert_eq!(found.slug, "ecole-results-out");
        assert!(repo.find_by_title_fragment("ÉCOLE RESULTS").unwrap().is_some());

        for term in ["ÉCOLE", "RÉSUMÉ", "études"] {
            let query = ArticleQuery::published().with_search(Some(term.into()));
            assert_eq!(slugs(repo.as_ref(), &query), vec!["ecole-results-out"], "{term}");
        }
    }
}
