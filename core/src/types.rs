//! Shared value types and request payloads.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::date;
use crate::error::WpError;
use crate::models::{Category, Model, ModelKind, Post, PostRevision, Tag};
use crate::params::{CommentStatus, PostStatus};

/// A rich-text field such as `title`, `content`, `excerpt` or `guid`.
///
/// WordPress sends `{"rendered": ..}` objects (plus `raw` in the edit
/// context and `protected` for content); plain strings are accepted too and
/// land in `rendered`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RenderedRepr")]
pub struct Rendered {
    pub rendered: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RenderedRepr {
    Plain(String),
    Object {
        #[serde(default)]
        rendered: String,
        #[serde(default)]
        raw: Option<String>,
        #[serde(default)]
        protected: Option<bool>,
    },
}

impl From<RenderedRepr> for Rendered {
    fn from(repr: RenderedRepr) -> Self {
        match repr {
            RenderedRepr::Plain(rendered) => Rendered {
                rendered,
                ..Default::default()
            },
            RenderedRepr::Object {
                rendered,
                raw,
                protected,
            } => Rendered {
                rendered,
                raw,
                protected,
            },
        }
    }
}

/// Either a raw id or a parsed model, for parameters that accept both.
#[derive(Clone, Copy)]
pub enum ObjectRef<'a> {
    Id(i64),
    Model(&'a dyn Model),
}

impl ObjectRef<'_> {
    /// Resolve to a plain id. A model reference must be one of `accepted`.
    pub fn resolve(self, param: &'static str, accepted: &[ModelKind]) -> Result<i64, WpError> {
        match self {
            ObjectRef::Id(id) => Ok(id),
            ObjectRef::Model(model) if accepted.contains(&model.kind()) => Ok(model.id()),
            ObjectRef::Model(model) => Err(WpError::validation(
                param,
                format!("{} {}", model.kind(), model.id()),
            )),
        }
    }
}

impl fmt::Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectRef::Id(id) => f.debug_tuple("Id").field(id).finish(),
            ObjectRef::Model(model) => f
                .debug_struct("Model")
                .field("kind", &model.kind())
                .field("id", &model.id())
                .finish(),
        }
    }
}

impl From<i64> for ObjectRef<'_> {
    fn from(id: i64) -> Self {
        ObjectRef::Id(id)
    }
}

macro_rules! object_ref_from_model {
    ($($model:ty),+) => {
        $(
            impl<'a> From<&'a $model> for ObjectRef<'a> {
                fn from(model: &'a $model) -> Self {
                    ObjectRef::Model(model)
                }
            }
        )+
    };
}

object_ref_from_model!(Post, PostRevision, Category, Tag);

/// Body of `POST posts` and `POST posts/{id}`. Unset fields are omitted,
/// so an update only touches what is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostData {
    #[serde(
        serialize_with = "date::serialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDateTime>,
    #[serde(
        serialize_with = "date::serialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_gmt: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_status: Option<CommentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping_status: Option<CommentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<i64>>,
}

/// Body of `POST categories` and `POST categories/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Body of `POST tags` and `POST tags/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}
