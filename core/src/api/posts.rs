use tracing::debug;

use super::{force_query, PostsApi};
use crate::client::WordPress;
use crate::error::WpError;
use crate::models::{parse_list, FromJson, Post, ResultSet};
use crate::params::{Context, ListPostsParams, Query};
use crate::types::PostData;

impl PostsApi for WordPress {
    fn list_posts(&self, params: &ListPostsParams) -> Result<ResultSet<Post>, WpError> {
        let json = self.get("posts", params.to_query())?;
        let posts: ResultSet<Post> = parse_list(Some(self), &json)?;
        debug!(count = posts.len(), "listed posts");
        Ok(posts)
    }

    fn get_post(
        &self,
        id: i64,
        context: Context,
        password: Option<&str>,
    ) -> Result<Post, WpError> {
        let mut query = Query::new();
        query
            .push("context", context)
            .push_opt("password", password);
        let json = self.get(&format!("posts/{id}"), query.into_pairs())?;
        Post::from_json(Some(self), &json)
    }

    fn create_post(&self, data: &PostData) -> Result<Post, WpError> {
        let json = self.post("posts", data, Vec::new())?;
        Post::from_json(Some(self), &json)
    }

    fn update_post(&self, id: i64, data: &PostData) -> Result<Post, WpError> {
        let json = self.post(&format!("posts/{id}"), data, Vec::new())?;
        Post::from_json(Some(self), &json)
    }

    fn delete_post(&self, id: i64, force: bool) -> Result<bool, WpError> {
        self.delete(&format!("posts/{id}"), force_query(force))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::HttpMethod;
    use crate::params::{Order, PostStatus};
    use crate::testing::{attached_client, RecordingTransport};

    #[test]
    fn list_posts_sends_filters_and_parses_in_order() {
        let transport = RecordingTransport::new();
        transport.respond(
            "posts",
            200,
            json!([
                {"id": 2, "date": "2020-01-02T03:04:05"},
                null,
                {"id": 1, "date": "2019-01-02T03:04:05"},
            ]),
        );
        let wp = attached_client(&transport);

        let params = ListPostsParams {
            order: Order::Asc,
            status: PostStatus::Draft,
            search: Some("hello".to_string()),
            ..Default::default()
        };
        let posts = wp.list_posts(&params).unwrap();
        assert_eq!(posts.ids(), vec![2, 1]);

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.url.ends_with("/wp/v2/posts"));
        assert_eq!(request.query_value("order"), Some("asc"));
        assert_eq!(request.query_value("status"), Some("draft"));
        assert_eq!(request.query_value("search"), Some("hello"));
    }

    #[test]
    fn invalid_context_string_never_reaches_the_network() {
        let transport = RecordingTransport::new();
        let wp = attached_client(&transport);

        let result = "test"
            .parse::<Context>()
            .and_then(|context| wp.get_post(1, context, None));
        assert!(result.unwrap_err().is_validation());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn get_post_sends_context_and_password() {
        let transport = RecordingTransport::new();
        transport.respond("posts/448", 200, json!({"id": 448}));
        let wp = attached_client(&transport);

        let post = wp.get_post(448, Context::Edit, Some("secret")).unwrap();
        assert_eq!(post.id, 448);

        let request = &transport.requests()[0];
        assert_eq!(request.query_value("context"), Some("edit"));
        assert_eq!(request.query_value("password"), Some("secret"));
    }

    #[test]
    fn get_missing_post_is_not_found() {
        let transport = RecordingTransport::new();
        let wp = attached_client(&transport);
        let err = wp.get_post(404, Context::View, None).unwrap_err();
        assert!(matches!(err, WpError::NotFound { .. }));
    }

    #[test]
    fn delete_missing_post_keeps_the_error_body() {
        let transport = RecordingTransport::new();
        transport.respond(
            "posts/5",
            404,
            json!({"code": "rest_post_invalid_id", "message": "Invalid post ID."}),
        );
        let wp = attached_client(&transport);

        let err = wp.delete_post(5, true).unwrap_err();
        match err {
            WpError::NotFound { url, body } => {
                assert!(url.ends_with("/wp/v2/posts/5"));
                assert!(body.contains("rest_post_invalid_id"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn create_post_posts_the_payload() {
        let transport = RecordingTransport::new();
        transport.respond("posts", 201, json!({"id": 10, "status": "draft"}));
        let wp = attached_client(&transport);

        let data = PostData {
            title: Some("New".to_string()),
            status: Some(PostStatus::Draft),
            ..Default::default()
        };
        let post = wp.create_post(&data).unwrap();
        assert_eq!(post.id, 10);

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"title": "New", "status": "draft"}));
    }

    #[test]
    fn update_post_targets_the_id() {
        let transport = RecordingTransport::new();
        transport.respond("posts/10", 200, json!({"id": 10, "sticky": true}));
        let wp = attached_client(&transport);

        let data = PostData {
            sticky: Some(true),
            ..Default::default()
        };
        let post = wp.update_post(10, &data).unwrap();
        assert_eq!(post.sticky, Some(true));
        assert!(transport.requests()[0].url.ends_with("/wp/v2/posts/10"));
    }

    #[test]
    fn delete_post_reports_success_and_force() {
        let transport = RecordingTransport::new();
        transport.respond("posts/10", 200, json!({"deleted": true}));
        let wp = attached_client(&transport);

        assert!(wp.delete_post(10, false).unwrap());
        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.query_value("force"), Some("false"));
    }
}
