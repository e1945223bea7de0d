use super::*;

use async_trait::async_trait;
use serde_json::{json, Value};
use shared::{
    error::{FetchError, FetchFailure},
    query::CollectionQuery,
};

use crate::render::{NO_BLOG_POSTS, PROJECTS_HEADING};

const POST_ID: &str = "9d7e3a10-55c1-4f0b-8a62-c2d41b7e9f01";

/// Serves fixed rows per collection; collections without rows fail.
struct FixtureStore {
    projects: Option<Vec<Value>>,
    blogs: Option<Vec<Value>>,
}

#[async_trait]
impl RemoteStore for FixtureStore {
    async fn select_all(&self, query: &CollectionQuery) -> Result<Vec<Value>, FetchError> {
        let rows = match query.collection.as_str() {
            "projects" => self.projects.clone(),
            "blogs" => self.blogs.clone(),
            _ => None,
        };
        rows.ok_or_else(|| {
            FetchError::new(
                query.collection.clone(),
                FetchFailure::Transport("connection refused".into()),
            )
        })
    }
}

fn projects() -> Vec<Value> {
    vec![
        json!({ "id": "00000000-0000-4000-8000-000000000002", "title": "Second", "display_order": 2 }),
        json!({ "id": "00000000-0000-4000-8000-000000000001", "title": "First", "display_order": 1 }),
    ]
}

fn blogs() -> Vec<Value> {
    vec![json!({
        "id": POST_ID,
        "title": "Ownership in practice",
        "excerpt": "Borrowing without tears",
        "content": "Full body text",
        "author": "Sam",
        "category": "Rust",
        "tags": ["rust"],
        "published_date": "2024-01-05",
        "read_time": 7
    })]
}

#[tokio::test]
async fn page_renders_projects_then_blogs() {
    let store = Arc::new(FixtureStore {
        projects: Some(projects()),
        blogs: Some(blogs()),
    });

    let out = run(Command::Page, store).await;
    let first = out.find("First").expect("first project");
    let second = out.find("Second").expect("second project");
    let blog = out.find("Ownership in practice").expect("blog card");
    assert!(first < second && second < blog, "output:\n{out}");
}

#[tokio::test]
async fn failing_blog_read_degrades_to_empty_state() {
    let store = Arc::new(FixtureStore {
        projects: Some(projects()),
        blogs: None,
    });

    let out = run(Command::Page, store).await;
    assert!(out.contains(PROJECTS_HEADING));
    assert!(out.contains(NO_BLOG_POSTS));
}

#[tokio::test]
async fn blog_command_renders_the_detail_view() {
    let store = Arc::new(FixtureStore {
        projects: None,
        blogs: Some(blogs()),
    });

    let id: BlogPostId = POST_ID.parse().expect("id");
    let out = run(Command::Blog { id }, store).await;
    assert!(out.contains("Full body text"));
    assert!(out.contains("Sam | January 5, 2024 | 7 min read"));
}

#[tokio::test]
async fn blog_command_reports_unknown_ids() {
    let store = Arc::new(FixtureStore {
        projects: None,
        blogs: Some(blogs()),
    });

    let id: BlogPostId = "00000000-0000-4000-8000-00000000beef".parse().expect("id");
    let out = run(Command::Blog { id }, store).await;
    assert_eq!(out, format!("No blog post with id {id}.\n"));
}

#[tokio::test]
async fn projects_command_skips_the_blog_section() {
    let store = Arc::new(FixtureStore {
        projects: Some(projects()),
        blogs: Some(blogs()),
    });

    let out = run(Command::Projects, store).await;
    assert!(out.contains("First"));
    assert!(!out.contains("Ownership in practice"));
}
