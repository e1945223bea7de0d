//! Record types, the store query model and the fetch error shared by the
//! portfolio client and its front end.

pub mod domain;
pub mod error;
pub mod query;
pub mod record;

pub use domain::{BlogPost, BlogPostId, Project, ProjectId};
pub use error::{FetchError, FetchFailure, StoreErrorBody};
pub use query::{CollectionQuery, OrderBy, SortDirection};
pub use record::{Record, BLOGS_COLLECTION, PROJECTS_COLLECTION};
