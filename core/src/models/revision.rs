use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{date_field, object, require_id, typed_field, FromJson, Model, ModelKind};
use crate::api::PostRevisionsApi;
use crate::client::{ClientHandle, WordPress};
use crate::date;
use crate::error::WpError;
use crate::types::Rendered;

/// A snapshot of a post at a prior edit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostRevision {
    pub id: i64,
    /// Id of the post this revision belongs to.
    pub parent: Option<i64>,
    pub author: Option<i64>,
    #[serde(serialize_with = "date::serialize_option")]
    pub date: Option<NaiveDateTime>,
    #[serde(serialize_with = "date::serialize_option")]
    pub date_gmt: Option<NaiveDateTime>,
    #[serde(serialize_with = "date::serialize_option")]
    pub modified: Option<NaiveDateTime>,
    #[serde(serialize_with = "date::serialize_option")]
    pub modified_gmt: Option<NaiveDateTime>,
    pub guid: Option<Rendered>,
    pub slug: Option<String>,
    pub title: Option<Rendered>,
    pub content: Option<Rendered>,
    pub excerpt: Option<Rendered>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    raw: Value,
    #[serde(skip)]
    client: ClientHandle,
}

impl PostRevision {
    /// Permanently delete this revision.
    pub fn delete(&self) -> Result<bool, WpError> {
        let parent = self.parent.ok_or_else(|| {
            WpError::validation("parent", format!("revision {} has no parent", self.id))
        })?;
        self.client
            .client()?
            .delete_post_revision(parent, self.id)
    }
}

impl Model for PostRevision {
    fn kind(&self) -> ModelKind {
        ModelKind::PostRevision
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn raw(&self) -> &Value {
        &self.raw
    }
}

impl PartialEq for PostRevision {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl FromJson for PostRevision {
    fn from_json(client: Option<&WordPress>, json: &Value) -> Result<Self, WpError> {
        let fields = object(json, ModelKind::PostRevision)?;
        let mut revision = PostRevision {
            id: require_id(fields, ModelKind::PostRevision)?,
            raw: json.clone(),
            client: ClientHandle::from_client(client),
            ..Default::default()
        };

        for (key, value) in fields {
            match key.as_str() {
                "id" => {}
                "date" => revision.date = date_field(key, value)?,
                "date_gmt" => revision.date_gmt = date_field(key, value)?,
                "modified" => revision.modified = date_field(key, value)?,
                "modified_gmt" => revision.modified_gmt = date_field(key, value)?,
                "parent" => revision.parent = typed_field(key, value)?,
                "author" => revision.author = typed_field(key, value)?,
                "guid" => revision.guid = typed_field(key, value)?,
                "slug" => revision.slug = typed_field(key, value)?,
                "title" => revision.title = typed_field(key, value)?,
                "content" => revision.content = typed_field(key, value)?,
                "excerpt" => revision.excerpt = typed_field(key, value)?,
                _ => {
                    revision.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(revision)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{attached_client, RecordingTransport};

    #[test]
    fn parses_revision_fields() {
        let json = json!({
            "id": 12,
            "parent": 448,
            "author": 1,
            "date": "2017-05-01T10:00:00",
            "title": {"rendered": "Draft title"},
            "content": "plain content",
        });
        let revision = PostRevision::from_json(None, &json).unwrap();
        assert_eq!(revision.parent, Some(448));
        assert_eq!(revision.title.as_ref().unwrap().rendered, "Draft title");
        assert_eq!(revision.content.as_ref().unwrap().rendered, "plain content");
        assert!(revision.date.is_some());
    }

    #[test]
    fn delete_targets_parent_scoped_endpoint() {
        let transport = RecordingTransport::new();
        transport.respond("posts/448/revisions/12", 200, json!({"deleted": true}));
        let wp = attached_client(&transport);
        let revision = PostRevision::from_json(Some(&wp), &json!({"id": 12, "parent": 448})).unwrap();

        assert!(revision.delete().unwrap());
        let request = &transport.requests()[0];
        assert!(request.url.ends_with("/wp/v2/posts/448/revisions/12"));
        assert_eq!(request.query_value("force"), Some("true"));
    }

    #[test]
    fn delete_without_parent_is_rejected() {
        let transport = RecordingTransport::new();
        let wp = attached_client(&transport);
        let revision = PostRevision::from_json(Some(&wp), &json!({"id": 12})).unwrap();
        assert!(revision.delete().unwrap_err().is_validation());
        assert!(transport.requests().is_empty());
    }
}
