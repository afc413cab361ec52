//! Taxonomy terms: categories and tags.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{object, require_id, typed_field, FromJson, Model, ModelKind};
use crate::api::{CategoriesApi, TagsApi};
use crate::client::{ClientHandle, WordPress};
use crate::error::WpError;
use crate::types::{CategoryData, TagData};

/// A term in the `category` taxonomy.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Category {
    pub id: i64,
    /// Number of published posts in the category.
    pub count: Option<i64>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub taxonomy: Option<String>,
    pub parent: Option<i64>,
    pub meta: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    raw: Value,
    #[serde(skip)]
    client: ClientHandle,
}

/// A term in the `post_tag` taxonomy.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tag {
    pub id: i64,
    pub count: Option<i64>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub taxonomy: Option<String>,
    pub meta: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    raw: Value,
    #[serde(skip)]
    client: ClientHandle,
}

impl Category {
    pub fn update(&self, data: &CategoryData) -> Result<Category, WpError> {
        self.client.client()?.update_category(self.id, data)
    }

    pub fn delete(&self, force: bool) -> Result<bool, WpError> {
        self.client.client()?.delete_category(self.id, force)
    }
}

impl Tag {
    pub fn update(&self, data: &TagData) -> Result<Tag, WpError> {
        self.client.client()?.update_tag(self.id, data)
    }

    pub fn delete(&self, force: bool) -> Result<bool, WpError> {
        self.client.client()?.delete_tag(self.id, force)
    }
}

impl Model for Category {
    fn kind(&self) -> ModelKind {
        ModelKind::Category
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn raw(&self) -> &Value {
        &self.raw
    }
}

impl Model for Tag {
    fn kind(&self) -> ModelKind {
        ModelKind::Tag
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn raw(&self) -> &Value {
        &self.raw
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl FromJson for Category {
    fn from_json(client: Option<&WordPress>, json: &Value) -> Result<Self, WpError> {
        let fields = object(json, ModelKind::Category)?;
        let mut category = Category {
            id: require_id(fields, ModelKind::Category)?,
            raw: json.clone(),
            client: ClientHandle::from_client(client),
            ..Default::default()
        };

        for (key, value) in fields {
            match key.as_str() {
                "id" => {}
                "count" => category.count = typed_field(key, value)?,
                "description" => category.description = typed_field(key, value)?,
                "link" => category.link = typed_field(key, value)?,
                "name" => category.name = typed_field(key, value)?,
                "slug" => category.slug = typed_field(key, value)?,
                "taxonomy" => category.taxonomy = typed_field(key, value)?,
                "parent" => category.parent = typed_field(key, value)?,
                "meta" => category.meta = value.clone(),
                _ => {
                    category.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(category)
    }
}

impl FromJson for Tag {
    fn from_json(client: Option<&WordPress>, json: &Value) -> Result<Self, WpError> {
        let fields = object(json, ModelKind::Tag)?;
        let mut tag = Tag {
            id: require_id(fields, ModelKind::Tag)?,
            raw: json.clone(),
            client: ClientHandle::from_client(client),
            ..Default::default()
        };

        for (key, value) in fields {
            match key.as_str() {
                "id" => {}
                "count" => tag.count = typed_field(key, value)?,
                "description" => tag.description = typed_field(key, value)?,
                "link" => tag.link = typed_field(key, value)?,
                "name" => tag.name = typed_field(key, value)?,
                "slug" => tag.slug = typed_field(key, value)?,
                "taxonomy" => tag.taxonomy = typed_field(key, value)?,
                "meta" => tag.meta = value.clone(),
                _ => {
                    tag.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(tag)
    }
}
