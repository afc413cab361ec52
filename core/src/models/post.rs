use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::{
    date_field, id_list, object, require_id, typed_field, Category, FromJson, Model, ModelKind,
    PostRevision, ResultSet, Tag,
};
use crate::api::{CategoriesApi, PostRevisionsApi, PostsApi, TagsApi};
use crate::client::{ClientHandle, WordPress};
use crate::date;
use crate::error::WpError;
use crate::params::{CommentStatus, Context, PostStatus};
use crate::types::{PostData, Rendered};

/// A WordPress post.
///
/// `categories` and `tags` hold the full terms, fetched while parsing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Post {
    pub id: i64,
    /// Publication date in the site's timezone.
    #[serde(serialize_with = "date::serialize_option")]
    pub date: Option<NaiveDateTime>,
    #[serde(serialize_with = "date::serialize_option")]
    pub date_gmt: Option<NaiveDateTime>,
    #[serde(serialize_with = "date::serialize_option")]
    pub modified: Option<NaiveDateTime>,
    #[serde(serialize_with = "date::serialize_option")]
    pub modified_gmt: Option<NaiveDateTime>,
    pub guid: Option<Rendered>,
    pub link: Option<String>,
    pub slug: Option<String>,
    /// Kept verbatim: responses also carry `trash`, `auto-draft` and
    /// `inherit`, which are not valid list filters.
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub password: Option<String>,
    pub title: Option<Rendered>,
    pub content: Option<Rendered>,
    pub excerpt: Option<Rendered>,
    pub author: Option<i64>,
    pub featured_media: Option<i64>,
    pub comment_status: Option<CommentStatus>,
    pub ping_status: Option<CommentStatus>,
    pub format: Option<String>,
    pub sticky: Option<bool>,
    /// Theme file used to display the post.
    pub template: Option<String>,
    pub categories: ResultSet<Category>,
    pub tags: ResultSet<Tag>,
    pub meta: Value,
    /// Keys without a dedicated field, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    raw: Value,
    #[serde(skip)]
    client: ClientHandle,
}

impl Post {
    /// Send `data` as an update of this post and return the server's copy.
    /// `self` is left untouched.
    pub fn update(&self, data: &PostData) -> Result<Post, WpError> {
        self.client.client()?.update_post(self.id, data)
    }

    pub fn delete(&self, force: bool) -> Result<bool, WpError> {
        self.client.client()?.delete_post(self.id, force)
    }

    pub fn revisions(&self) -> Result<ResultSet<PostRevision>, WpError> {
        self.client
            .client()?
            .list_post_revisions(self, Context::View)
    }

    pub fn revision(&self, id: i64) -> Result<PostRevision, WpError> {
        self.client
            .client()?
            .get_post_revision(self, id, Context::View)
    }

    /// `status` as one of the filterable statuses, `None` for any other.
    pub fn status_enum(&self) -> Option<PostStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn is_attached(&self) -> bool {
        self.client.is_attached()
    }
}

impl Model for Post {
    fn kind(&self) -> ModelKind {
        ModelKind::Post
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn raw(&self) -> &Value {
        &self.raw
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl FromJson for Post {
    fn from_json(client: Option<&WordPress>, json: &Value) -> Result<Self, WpError> {
        let fields = object(json, ModelKind::Post)?;
        let mut post = Post {
            id: require_id(fields, ModelKind::Post)?,
            raw: json.clone(),
            client: ClientHandle::from_client(client),
            ..Default::default()
        };

        for (key, value) in fields {
            match key.as_str() {
                "id" => {}
                "date" => post.date = date_field(key, value)?,
                "date_gmt" => post.date_gmt = date_field(key, value)?,
                "modified" => post.modified = date_field(key, value)?,
                "modified_gmt" => post.modified_gmt = date_field(key, value)?,
                "guid" => post.guid = typed_field(key, value)?,
                "link" => post.link = typed_field(key, value)?,
                "slug" => post.slug = typed_field(key, value)?,
                "status" => post.status = typed_field(key, value)?,
                "type" => post.post_type = typed_field(key, value)?,
                "password" => post.password = typed_field(key, value)?,
                "title" => post.title = typed_field(key, value)?,
                "content" => post.content = typed_field(key, value)?,
                "excerpt" => post.excerpt = typed_field(key, value)?,
                "author" => post.author = typed_field(key, value)?,
                "featured_media" => post.featured_media = typed_field(key, value)?,
                "comment_status" => post.comment_status = typed_field(key, value)?,
                "ping_status" => post.ping_status = typed_field(key, value)?,
                "format" => post.format = typed_field(key, value)?,
                "sticky" => post.sticky = typed_field(key, value)?,
                "template" => post.template = typed_field(key, value)?,
                "meta" => post.meta = value.clone(),
                "categories" => {
                    let ids = id_list(key, value)?;
                    post.categories = expand(client, post.id, key, &ids, |wp, id| {
                        wp.get_category(id, Context::View)
                    })?;
                }
                "tags" => {
                    let ids = id_list(key, value)?;
                    post.tags = expand(client, post.id, key, &ids, |wp, id| {
                        wp.get_tag(id, Context::View)
                    })?;
                }
                _ => {
                    post.extra.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(post)
    }
}

/// Fetch every term id through the client, in order. Repeated ids are
/// fetched again.
fn expand<T>(
    client: Option<&WordPress>,
    post_id: i64,
    key: &str,
    ids: &[i64],
    fetch: impl Fn(&WordPress, i64) -> Result<T, WpError>,
) -> Result<ResultSet<T>, WpError> {
    if ids.is_empty() {
        return Ok(ResultSet::new());
    }
    let client = client.ok_or(WpError::DetachedModel)?;
    debug!(post = post_id, field = key, count = ids.len(), "expanding term ids");

    let mut terms = ResultSet::new();
    for &id in ids {
        terms.push(fetch(client, id)?);
    }
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::testing::{attached_client, RecordingTransport};

    #[test]
    fn parses_dates_into_structured_values() {
        let post = Post::from_json(None, &json!({"id": 1, "date": "2020-01-02T03:04:05"})).unwrap();
        let expected = NaiveDate::from_ymd_opt(2020, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(post.date, Some(expected));
        assert_eq!(post.date_gmt, None);
    }

    #[test]
    fn statuses_outside_the_filter_set_are_kept() {
        for status in ["trash", "auto-draft", "inherit"] {
            let post = Post::from_json(None, &json!({"id": 1, "status": status})).unwrap();
            assert_eq!(post.status.as_deref(), Some(status));
            assert_eq!(post.status_enum(), None);
        }
    }

    #[test]
    fn invalid_date_fails_the_parse() {
        let err = Post::from_json(None, &json!({"id": 1, "modified_gmt": "2020/01/02"})).unwrap_err();
        assert!(matches!(
            err,
            WpError::InvalidDate { ref field, ref value } if field == "modified_gmt" && value == "2020/01/02"
        ));
    }

    #[test]
    fn known_fields_are_typed_and_unknown_kept() {
        let json = json!({
            "id": 448,
            "slug": "hello-world",
            "status": "publish",
            "type": "post",
            "title": {"rendered": "Hello world!"},
            "author": 1,
            "comment_status": "open",
            "ping_status": "closed",
            "sticky": false,
            "meta": [],
            "liveblog_likes": 3,
            "categories": [],
        });
        let post = Post::from_json(None, &json).unwrap();
        assert_eq!(post.slug.as_deref(), Some("hello-world"));
        assert_eq!(post.status.as_deref(), Some("publish"));
        assert_eq!(post.status_enum(), Some(PostStatus::Publish));
        assert_eq!(post.post_type.as_deref(), Some("post"));
        assert_eq!(post.title.as_ref().unwrap().rendered, "Hello world!");
        assert_eq!(post.comment_status, Some(CommentStatus::Open));
        assert_eq!(post.ping_status, Some(CommentStatus::Closed));
        assert_eq!(post.meta, json!([]));
        assert_eq!(post.extra.get("liveblog_likes"), Some(&json!(3)));
        assert!(post.categories.is_empty());
        assert_eq!(post.raw(), &json);
    }

    #[test]
    fn equality_is_by_id() {
        let a = Post::from_json(None, &json!({"id": 7, "slug": "a"})).unwrap();
        let b = Post::from_json(None, &json!({"id": 7, "slug": "b"})).unwrap();
        let c = Post::from_json(None, &json!({"id": 8, "slug": "a"})).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn term_ids_expand_through_the_client() {
        let transport = RecordingTransport::new();
        transport
            .respond("categories/1", 200, json!({"id": 1, "name": "Uncategorized"}))
            .respond("categories/5", 200, json!({"id": 5, "name": "News"}))
            .respond("tags/3", 200, json!({"id": 3, "name": "rust"}));
        let wp = attached_client(&transport);

        let json = json!({"id": 2, "categories": [5, 1, 5], "tags": [3]});
        let post = Post::from_json(Some(&wp), &json).unwrap();

        assert_eq!(post.categories.ids(), vec![5, 1, 5]);
        assert_eq!(post.categories[1].name.as_deref(), Some("Uncategorized"));
        assert_eq!(post.tags.ids(), vec![3]);
        // No batching or deduplication: one GET per id.
        assert_eq!(transport.requests().len(), 4);
        assert!(post.is_attached());
    }

    #[test]
    fn detached_post_cannot_expand_terms() {
        let err = Post::from_json(None, &json!({"id": 2, "tags": [3]})).unwrap_err();
        assert!(matches!(err, WpError::DetachedModel));
    }

    #[test]
    fn detached_post_operations_fail_cleanly() {
        let post = Post::from_json(None, &json!({"id": 2})).unwrap();
        assert!(!post.is_attached());
        assert!(matches!(post.delete(true), Err(WpError::DetachedModel)));
        assert!(matches!(post.revisions(), Err(WpError::DetachedModel)));
        assert!(matches!(
            post.update(&PostData::default()),
            Err(WpError::DetachedModel)
        ));
    }

    #[test]
    fn operations_fail_once_the_client_is_dropped() {
        let transport = RecordingTransport::new();
        let wp = attached_client(&transport);
        let post = Post::from_json(Some(&wp), &json!({"id": 2})).unwrap();
        assert!(post.is_attached());
        drop(wp);
        assert!(matches!(post.delete(false), Err(WpError::DetachedModel)));
    }

    #[test]
    fn update_delegates_and_leaves_instance_unchanged() {
        let transport = RecordingTransport::new();
        transport.respond("posts/2", 200, json!({"id": 2, "slug": "renamed"}));
        let wp = attached_client(&transport);
        let post = Post::from_json(Some(&wp), &json!({"id": 2, "slug": "original"})).unwrap();

        let data = PostData {
            slug: Some("renamed".to_string()),
            ..Default::default()
        };
        let updated = post.update(&data).unwrap();

        assert_eq!(updated.slug.as_deref(), Some("renamed"));
        assert_eq!(post.slug.as_deref(), Some("original"));
        let request = &transport.requests()[0];
        assert_eq!(request.body.as_deref(), Some(r#"{"slug":"renamed"}"#));
    }

    #[test]
    fn serialization_excludes_client_and_raw_payload() {
        let post = Post::from_json(None, &json!({"id": 3, "date": "2021-05-06T07:08:09", "x": 1})).unwrap();
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["date"], "2021-05-06T07:08:09");
        assert_eq!(value["x"], 1);
        assert!(value.get("client").is_none());
        assert!(value.get("raw").is_none());
    }
}
