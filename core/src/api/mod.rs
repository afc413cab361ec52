//! Resource operations, one capability trait per resource kind.
//!
//! # Design
//! Only resource kinds the client actually supports have a trait here:
//! posts, post revisions, categories and tags. Pages, comments, media,
//! users, taxonomies, post types, post statuses and settings have no
//! trait, so calling them is a compile error rather than a runtime one.
//! `WordPress` implements every trait; bring them into scope with
//! `use wp_core::prelude::*`.

mod categories;
mod posts;
mod revisions;
mod tags;

use crate::error::WpError;
use crate::models::{Category, Post, PostRevision, ResultSet, Tag};
use crate::params::{Context, ListCategoriesParams, ListPostsParams, ListTagsParams};
use crate::types::{CategoryData, ObjectRef, PostData, TagData};

pub trait PostsApi {
    fn list_posts(&self, params: &ListPostsParams) -> Result<ResultSet<Post>, WpError>;

    /// `password` unlocks password-protected content.
    fn get_post(&self, id: i64, context: Context, password: Option<&str>)
        -> Result<Post, WpError>;

    fn create_post(&self, data: &PostData) -> Result<Post, WpError>;

    fn update_post(&self, id: i64, data: &PostData) -> Result<Post, WpError>;

    /// `force` bypasses the trash. Returns `true` once the server confirms.
    fn delete_post(&self, id: i64, force: bool) -> Result<bool, WpError>;
}

/// Revisions of a post. `parent` is a post id or a `Post`.
pub trait PostRevisionsApi {
    fn list_post_revisions<'a>(
        &self,
        parent: impl Into<ObjectRef<'a>>,
        context: Context,
    ) -> Result<ResultSet<PostRevision>, WpError>;

    fn get_post_revision<'a>(
        &self,
        parent: impl Into<ObjectRef<'a>>,
        id: i64,
        context: Context,
    ) -> Result<PostRevision, WpError>;

    fn delete_post_revision<'a>(
        &self,
        parent: impl Into<ObjectRef<'a>>,
        id: i64,
    ) -> Result<bool, WpError>;
}

pub trait CategoriesApi {
    fn list_categories(&self, params: &ListCategoriesParams)
        -> Result<ResultSet<Category>, WpError>;

    fn get_category(&self, id: i64, context: Context) -> Result<Category, WpError>;

    fn create_category(&self, data: &CategoryData) -> Result<Category, WpError>;

    fn update_category(&self, id: i64, data: &CategoryData) -> Result<Category, WpError>;

    /// Terms cannot be trashed; WordPress refuses the delete unless `force`.
    fn delete_category(&self, id: i64, force: bool) -> Result<bool, WpError>;
}

pub trait TagsApi {
    fn list_tags(&self, params: &ListTagsParams) -> Result<ResultSet<Tag>, WpError>;

    fn get_tag(&self, id: i64, context: Context) -> Result<Tag, WpError>;

    fn create_tag(&self, data: &TagData) -> Result<Tag, WpError>;

    fn update_tag(&self, id: i64, data: &TagData) -> Result<Tag, WpError>;

    fn delete_tag(&self, id: i64, force: bool) -> Result<bool, WpError>;
}

fn force_query(force: bool) -> Vec<(String, String)> {
    vec![("force".to_string(), force.to_string())]
}

fn context_query(context: Context) -> Vec<(String, String)> {
    vec![("context".to_string(), context.to_string())]
}
