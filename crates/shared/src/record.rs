use std::{cmp::Ordering, fmt::Display, hash::Hash};

use serde::de::DeserializeOwned;

use crate::{
    domain::{BlogPost, BlogPostId, Project, ProjectId},
    query::{CollectionQuery, OrderBy},
};

pub const PROJECTS_COLLECTION: &str = "projects";
pub const BLOGS_COLLECTION: &str = "blogs";

/// A record kind that lives in a named store collection.
pub trait Record: DeserializeOwned + Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Hash + Display + Send + Sync;

    const COLLECTION: &'static str;

    fn id(&self) -> Self::Id;

    fn default_order() -> OrderBy;

    /// Ascending comparison on `field`, or `None` when the record has no
    /// sortable column of that name.
    fn compare_by(&self, other: &Self, field: &str) -> Option<Ordering>;

    fn default_query() -> CollectionQuery {
        CollectionQuery::new(Self::COLLECTION, Self::default_order())
    }
}

impl Record for Project {
    type Id = ProjectId;

    const COLLECTION: &'static str = PROJECTS_COLLECTION;

    fn id(&self) -> ProjectId {
        self.id
    }

    fn default_order() -> OrderBy {
        OrderBy::ascending("display_order")
    }

    fn compare_by(&self, other: &Self, field: &str) -> Option<Ordering> {
        match field {
            "display_order" => Some(self.display_order.cmp(&other.display_order)),
            "title" => Some(self.title.cmp(&other.title)),
            "created_at" => Some(self.created_at.cmp(&other.created_at)),
            "updated_at" => Some(self.updated_at.cmp(&other.updated_at)),
            _ => None,
        }
    }
}

impl Record for BlogPost {
    type Id = BlogPostId;

    const COLLECTION: &'static str = BLOGS_COLLECTION;

    fn id(&self) -> BlogPostId {
        self.id
    }

    fn default_order() -> OrderBy {
        OrderBy::descending("published_date")
    }

    fn compare_by(&self, other: &Self, field: &str) -> Option<Ordering> {
        match field {
            "published_date" => Some(self.published_date.cmp(&other.published_date)),
            "title" => Some(self.title.cmp(&other.title)),
            "read_time" => Some(self.read_time.cmp(&other.read_time)),
            "created_at" => Some(self.created_at.cmp(&other.created_at)),
            "updated_at" => Some(self.updated_at.cmp(&other.updated_at)),
            _ => None,
        }
    }
}
