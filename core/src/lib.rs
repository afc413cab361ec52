//! Blocking client for the WordPress `wp-json` REST API.
//!
//! # Overview
//! `WordPress` discovers a site's API root from the `Link` header of a HEAD
//! request, then issues GET/POST/DELETE requests under `<root>/wp/v2/`.
//! Responses are mapped into typed models (`Post`, `PostRevision`,
//! `Category`, `Tag`) that keep their raw JSON and a weak handle back to
//! the client.
//!
//! ```no_run
//! use wp_core::prelude::*;
//!
//! # fn main() -> Result<(), wp_core::WpError> {
//! let wp = WordPress::discover("https://example.org/")?;
//! let posts = wp.list_posts(&ListPostsParams::default())?;
//! for post in &posts {
//!     let title = post.title.as_ref().map(|t| t.rendered.as_str());
//!     println!("{} {:?}", post.id, title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`/`HttpResponse`);
//!   the network round-trip is behind the `Transport` trait, with
//!   `UreqTransport` as the default.
//! - Each supported resource kind is a capability trait in `api`; resource
//!   kinds without a trait are not supported.
//! - Enum-like parameters are typed and validated when parsed from strings.
//! - Parsing a post fetches each of its categories and tags, one request
//!   per id.

pub mod api;
pub mod client;
pub mod config;
pub mod date;
pub mod discovery;
pub mod error;
pub mod http;
pub mod models;
pub mod params;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::{CategoriesApi, PostRevisionsApi, PostsApi, TagsApi};
pub use client::{ClientHandle, WordPress, API_VERSION};
pub use config::ClientConfig;
pub use error::WpError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use models::{
    parse_list, try_eq, Category, FromJson, Model, ModelKind, Post, PostRevision, ResultSet, Tag,
};
pub use params::{
    CommentStatus, Context, ListCategoriesParams, ListPostsParams, ListTagsParams, Order,
    PostOrderBy, PostStatus, TermOrderBy,
};
pub use transport::UreqTransport;
pub use types::{CategoryData, ObjectRef, PostData, Rendered, TagData};

/// The client, its capability traits and the common parameter types.
pub mod prelude {
    pub use crate::api::{CategoriesApi, PostRevisionsApi, PostsApi, TagsApi};
    pub use crate::client::WordPress;
    pub use crate::error::WpError;
    pub use crate::params::{
        Context, ListCategoriesParams, ListPostsParams, ListTagsParams, Order, PostOrderBy,
        PostStatus, TermOrderBy,
    };
    pub use crate::types::{CategoryData, PostData, TagData};
}
