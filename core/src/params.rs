//! Query parameters understood by the `wp/v2` endpoints.
//!
//! # Design
//! Enum-like parameters are typed. Each enum parses from its wire string via
//! `FromStr`, failing with `WpError::Validation` that names the rejected
//! value, so an out-of-set value is refused before any request exists.
//! The list-parameter structs carry WordPress's defaults and render
//! themselves to query pairs.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date;
use crate::error::WpError;
use crate::models::ModelKind;
use crate::types::ObjectRef;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, param = $param:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = WpError;

            fn from_str(s: &str) -> Result<Self, WpError> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(WpError::validation($param, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Response shape selector.
    #[derive(Default)]
    Context, param = "context" {
        #[default]
        View => "view",
        Embed => "embed",
        Edit => "edit",
    }
}

wire_enum! {
    Order, param = "order" {
        Asc => "asc",
        Desc => "desc",
    }
}

wire_enum! {
    /// Sort keys accepted by `posts`.
    PostOrderBy, param = "orderby" {
        Date => "date",
        Relevance => "relevance",
        Id => "id",
        Include => "include",
        Title => "title",
        Slug => "slug",
    }
}

wire_enum! {
    /// Sort keys accepted by `categories` and `tags`.
    TermOrderBy, param = "orderby" {
        Id => "id",
        Include => "include",
        Name => "name",
        Slug => "slug",
        TermGroup => "term_group",
        Description => "description",
        Count => "count",
    }
}

wire_enum! {
    /// A named status for a post.
    PostStatus, param = "status" {
        Publish => "publish",
        Future => "future",
        Draft => "draft",
        Pending => "pending",
        Private => "private",
    }
}

wire_enum! {
    /// Whether comments (or pings) are open on a post.
    CommentStatus, param = "comment_status" {
        Open => "open",
        Closed => "closed",
    }
}

/// Query pairs under construction. Unset options are omitted.
#[derive(Debug, Default)]
pub(crate) struct Query(Vec<(String, String)>);

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: &str, value: impl fmt::Display) -> &mut Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub(crate) fn push_opt<T: fmt::Display>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Comma-joined list; omitted when empty.
    pub(crate) fn push_list<T: fmt::Display>(&mut self, key: &str, values: &[T]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            self.push(key, joined);
        }
        self
    }

    pub(crate) fn push_date(&mut self, key: &str, value: Option<&NaiveDateTime>) -> &mut Self {
        self.push_opt(key, value.map(date::format))
    }

    pub(crate) fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

/// Filters for `GET posts`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPostsParams {
    pub context: Context,
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    /// Limit to posts published after this date.
    pub after: Option<NaiveDateTime>,
    /// Limit to posts published before this date.
    pub before: Option<NaiveDateTime>,
    pub author: Vec<i64>,
    pub author_exclude: Vec<i64>,
    pub exclude: Vec<i64>,
    pub include: Vec<i64>,
    pub offset: Option<u32>,
    pub order: Order,
    pub orderby: PostOrderBy,
    pub slug: Vec<String>,
    pub status: PostStatus,
    pub categories: Vec<i64>,
    pub categories_exclude: Vec<i64>,
    pub tags: Vec<i64>,
    pub tags_exclude: Vec<i64>,
    pub sticky: Option<bool>,
}

impl Default for ListPostsParams {
    fn default() -> Self {
        Self {
            context: Context::View,
            page: 1,
            per_page: 10,
            search: None,
            after: None,
            before: None,
            author: Vec::new(),
            author_exclude: Vec::new(),
            exclude: Vec::new(),
            include: Vec::new(),
            offset: None,
            order: Order::Desc,
            orderby: PostOrderBy::Date,
            slug: Vec::new(),
            status: PostStatus::Publish,
            categories: Vec::new(),
            categories_exclude: Vec::new(),
            tags: Vec::new(),
            tags_exclude: Vec::new(),
            sticky: None,
        }
    }
}

impl ListPostsParams {
    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Query::new();
        query
            .push("context", self.context)
            .push("page", self.page)
            .push("per_page", self.per_page)
            .push_opt("search", self.search.as_deref())
            .push_date("after", self.after.as_ref())
            .push_date("before", self.before.as_ref())
            .push_list("author", &self.author)
            .push_list("author_exclude", &self.author_exclude)
            .push_list("exclude", &self.exclude)
            .push_list("include", &self.include)
            .push_opt("offset", self.offset)
            .push("order", self.order)
            .push("orderby", self.orderby)
            .push_list("slug", &self.slug)
            .push("status", self.status)
            .push_list("categories", &self.categories)
            .push_list("categories_exclude", &self.categories_exclude)
            .push_list("tags", &self.tags)
            .push_list("tags_exclude", &self.tags_exclude)
            .push_opt("sticky", self.sticky);
        query.into_pairs()
    }
}

/// Filters for `GET categories`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCategoriesParams {
    pub context: Context,
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub exclude: Vec<i64>,
    pub include: Vec<i64>,
    pub order: Order,
    pub orderby: TermOrderBy,
    pub hide_empty: Option<bool>,
    /// Limit to children of this category.
    pub parent: Option<i64>,
    /// Limit to categories assigned to this post.
    pub post: Option<i64>,
    pub slug: Vec<String>,
}

impl Default for ListCategoriesParams {
    fn default() -> Self {
        Self {
            context: Context::View,
            page: 1,
            per_page: 10,
            search: None,
            exclude: Vec::new(),
            include: Vec::new(),
            order: Order::Asc,
            orderby: TermOrderBy::Name,
            hide_empty: None,
            parent: None,
            post: None,
            slug: Vec::new(),
        }
    }
}

impl ListCategoriesParams {
    /// Set the `parent` filter from an id or a `Category`.
    pub fn with_parent<'a>(mut self, parent: impl Into<ObjectRef<'a>>) -> Result<Self, WpError> {
        self.parent = Some(parent.into().resolve("parent", &[ModelKind::Category])?);
        Ok(self)
    }

    /// Set the `post` filter from an id or a `Post`.
    pub fn with_post<'a>(mut self, post: impl Into<ObjectRef<'a>>) -> Result<Self, WpError> {
        self.post = Some(post.into().resolve("post", &[ModelKind::Post])?);
        Ok(self)
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Query::new();
        query
            .push("context", self.context)
            .push("page", self.page)
            .push("per_page", self.per_page)
            .push_opt("search", self.search.as_deref())
            .push_list("exclude", &self.exclude)
            .push_list("include", &self.include)
            .push("order", self.order)
            .push("orderby", self.orderby)
            .push_opt("hide_empty", self.hide_empty)
            .push_opt("parent", self.parent)
            .push_opt("post", self.post)
            .push_list("slug", &self.slug);
        query.into_pairs()
    }
}

/// Filters for `GET tags`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListTagsParams {
    pub context: Context,
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub exclude: Vec<i64>,
    pub include: Vec<i64>,
    pub offset: Option<u32>,
    pub order: Order,
    pub orderby: TermOrderBy,
    pub hide_empty: Option<bool>,
    pub post: Option<i64>,
    pub slug: Vec<String>,
}

impl Default for ListTagsParams {
    fn default() -> Self {
        Self {
            context: Context::View,
            page: 1,
            per_page: 10,
            search: None,
            exclude: Vec::new(),
            include: Vec::new(),
            offset: None,
            order: Order::Asc,
            orderby: TermOrderBy::Name,
            hide_empty: None,
            post: None,
            slug: Vec::new(),
        }
    }
}

impl ListTagsParams {
    /// Set the `post` filter from an id or a `Post`.
    pub fn with_post<'a>(mut self, post: impl Into<ObjectRef<'a>>) -> Result<Self, WpError> {
        self.post = Some(post.into().resolve("post", &[ModelKind::Post])?);
        Ok(self)
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Query::new();
        query
            .push("context", self.context)
            .push("page", self.page)
            .push("per_page", self.per_page)
            .push_opt("search", self.search.as_deref())
            .push_list("exclude", &self.exclude)
            .push_list("include", &self.include)
            .push_opt("offset", self.offset)
            .push("order", self.order)
            .push("orderby", self.orderby)
            .push_opt("hide_empty", self.hide_empty)
            .push_opt("post", self.post)
            .push_list("slug", &self.slug);
        query.into_pairs()
    }
}
