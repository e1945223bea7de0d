//! Plain-text rendering of the data-bearing sections and the blog overlay.
//!
//! Sections read the legacy `(items, is_loading)` view: a failed fetch renders
//! exactly like an empty one.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use client_core::{BlogPostOverlay, FetchState};
use shared::domain::{BlogPost, Project};

pub const PROJECTS_HEADING: &str = "Featured Projects";
pub const BLOGS_HEADING: &str = "Latest Tech Insights";
pub const LOADING_INDICATOR: &str = "Loading...";
pub const NO_BLOG_POSTS: &str = "No blog posts available yet.";
const CARD_TAG_LIMIT: usize = 3;

/// Long-form US date, e.g. `January 5, 2024`.
pub fn format_long_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn render_projects(state: &FetchState<Project>) -> String {
    let mut out = String::new();
    if state.is_loading() {
        let _ = writeln!(out, "{LOADING_INDICATOR}");
        return out;
    }

    heading(&mut out, PROJECTS_HEADING);
    for project in state.items() {
        let _ = writeln!(out, "{}", project.title);
        let _ = writeln!(out, "  {}", project.description);
        if !project.technologies.is_empty() {
            let _ = writeln!(out, "  Tech: {}", project.technologies.join(", "));
        }
        if let Some(url) = &project.demo_url {
            let _ = writeln!(out, "  Live Demo: {url}");
        }
        if let Some(url) = &project.github_url {
            let _ = writeln!(out, "  Source: {url}");
        }
        out.push('\n');
    }
    out
}

pub fn render_blogs(state: &FetchState<BlogPost>) -> String {
    let mut out = String::new();
    if state.is_loading() {
        let _ = writeln!(out, "{LOADING_INDICATOR}");
        return out;
    }

    heading(&mut out, BLOGS_HEADING);
    let posts = state.items();
    if posts.is_empty() {
        let _ = writeln!(out, "{NO_BLOG_POSTS}");
        return out;
    }
    for post in posts {
        render_blog_card(&mut out, post);
    }
    out
}

fn render_blog_card(out: &mut String, post: &BlogPost) {
    let _ = writeln!(out, "[{}] {}", post.category, post.title);
    let _ = writeln!(out, "  {}", post.excerpt);
    let _ = writeln!(
        out,
        "  {} | {} min read",
        format_long_date(post.published_date),
        post.read_time
    );
    if !post.tags.is_empty() {
        let tags: Vec<&str> = post
            .tags
            .iter()
            .take(CARD_TAG_LIMIT)
            .map(String::as_str)
            .collect();
        let _ = writeln!(out, "  Tags: {}", tags.join(", "));
    }
    let _ = writeln!(out, "  id: {}", post.id);
    out.push('\n');
}

/// The detail view, or `None` while the overlay is closed.
pub fn render_overlay(overlay: &BlogPostOverlay) -> Option<String> {
    let post = overlay.selected()?;
    let mut out = String::new();
    let _ = writeln!(out, "[{}]", post.category);
    heading(&mut out, &post.title);
    let _ = writeln!(
        out,
        "{} | {} | {} min read",
        post.author,
        format_long_date(post.published_date),
        post.read_time
    );
    out.push('\n');
    let _ = writeln!(out, "{}", post.excerpt);
    out.push('\n');
    let _ = writeln!(out, "{}", post.content);
    if !post.tags.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Tags: {}", post.tags.join(", "));
    }
    Some(out)
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    out.push('\n');
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
