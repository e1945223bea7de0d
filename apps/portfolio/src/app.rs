//! Wires fetchers and the overlay to the renderers for each CLI command.

use std::sync::Arc;

use clap::Subcommand;
use client_core::{BlogPostOverlay, ListFetcher, RemoteStore};
use shared::domain::{BlogPost, BlogPostId, Project};
use tracing::info;

use crate::render::{render_blogs, render_overlay, render_projects};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Projects section followed by the blog section.
    Page,
    Projects,
    Blogs,
    /// Detail view of one blog post.
    Blog { id: BlogPostId },
}

pub async fn run(command: Command, store: Arc<dyn RemoteStore>) -> String {
    info!(?command, "rendering");
    match command {
        Command::Page => {
            let mut projects = ListFetcher::<Project>::new(Arc::clone(&store));
            let mut blogs = ListFetcher::<BlogPost>::new(store);
            projects.activate();
            blogs.activate();

            let (projects, blogs) = futures::join!(projects.wait_ready(), blogs.wait_ready());
            let mut out = render_projects(&projects);
            out.push_str(&render_blogs(&blogs));
            out
        }
        Command::Projects => {
            let mut projects = ListFetcher::<Project>::new(store);
            projects.activate();
            render_projects(&projects.wait_ready().await)
        }
        Command::Blogs => {
            let mut blogs = ListFetcher::<BlogPost>::new(store);
            blogs.activate();
            render_blogs(&blogs.wait_ready().await)
        }
        Command::Blog { id } => {
            let mut blogs = ListFetcher::<BlogPost>::new(store);
            blogs.activate();
            let state = blogs.wait_ready().await;

            let mut overlay = BlogPostOverlay::new();
            overlay.open_by_id(state.items(), id);
            let out = render_overlay(&overlay)
                .unwrap_or_else(|| format!("No blog post with id {id}.\n"));
            overlay.close();
            out
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
