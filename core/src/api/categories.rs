use super::{context_query, force_query, CategoriesApi};
use crate::client::WordPress;
use crate::error::WpError;
use crate::models::{parse_list, Category, FromJson, ResultSet};
use crate::params::{Context, ListCategoriesParams};
use crate::types::CategoryData;

impl CategoriesApi for WordPress {
    fn list_categories(
        &self,
        params: &ListCategoriesParams,
    ) -> Result<ResultSet<Category>, WpError> {
        let json = self.get("categories", params.to_query())?;
        parse_list(Some(self), &json)
    }

    fn get_category(&self, id: i64, context: Context) -> Result<Category, WpError> {
        let json = self.get(&format!("categories/{id}"), context_query(context))?;
        Category::from_json(Some(self), &json)
    }

    fn create_category(&self, data: &CategoryData) -> Result<Category, WpError> {
        let json = self.post("categories", data, Vec::new())?;
        Category::from_json(Some(self), &json)
    }

    fn update_category(&self, id: i64, data: &CategoryData) -> Result<Category, WpError> {
        let json = self.post(&format!("categories/{id}"), data, Vec::new())?;
        Category::from_json(Some(self), &json)
    }

    fn delete_category(&self, id: i64, force: bool) -> Result<bool, WpError> {
        self.delete(&format!("categories/{id}"), force_query(force))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::HttpMethod;
    use crate::params::{Order, TermOrderBy};
    use crate::testing::{attached_client, RecordingTransport};

    #[test]
    fn list_categories_parses_ids_in_order() {
        let transport = RecordingTransport::new();
        transport.respond(
            "categories",
            200,
            json!([{"id": 1, "name": "Uncategorized"}, {"id": 3, "name": "News"}]),
        );
        let wp = attached_client(&transport);

        let params = ListCategoriesParams {
            order: Order::Desc,
            orderby: TermOrderBy::Count,
            ..Default::default()
        };
        let categories = wp.list_categories(&params).unwrap();
        assert_eq!(categories.ids(), vec![1, 3]);

        let request = &transport.requests()[0];
        assert_eq!(request.query_value("order"), Some("desc"));
        assert_eq!(request.query_value("orderby"), Some("count"));
    }

    #[test]
    fn parent_and_post_filters_accept_models() {
        let transport = RecordingTransport::new();
        transport.respond("categories", 200, json!([]));
        let wp = attached_client(&transport);

        let parent = Category::from_json(None, &json!({"id": 4})).unwrap();
        let post = crate::models::Post::from_json(None, &json!({"id": 448})).unwrap();
        let params = ListCategoriesParams::default()
            .with_parent(&parent)
            .unwrap()
            .with_post(&post)
            .unwrap();
        assert!(wp.list_categories(&params).unwrap().is_empty());

        let request = &transport.requests()[0];
        assert_eq!(request.query_value("parent"), Some("4"));
        assert_eq!(request.query_value("post"), Some("448"));
    }

    #[test]
    fn post_filter_rejects_a_category() {
        let category = Category::from_json(None, &json!({"id": 4})).unwrap();
        let err = ListCategoriesParams::default()
            .with_post(&category)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn get_category_sends_context() {
        let transport = RecordingTransport::new();
        transport.respond("categories/1", 200, json!({"id": 1}));
        let wp = attached_client(&transport);

        let category = wp.get_category(1, Context::Embed).unwrap();
        assert_eq!(category.id, 1);
        assert_eq!(transport.requests()[0].query_value("context"), Some("embed"));
    }

    #[test]
    fn create_category_posts_payload() {
        let transport = RecordingTransport::new();
        transport.respond("categories", 201, json!({"id": 7, "name": "Releases"}));
        let wp = attached_client(&transport);

        let data = CategoryData {
            name: Some("Releases".to_string()),
            parent: Some(1),
            ..Default::default()
        };
        let category = wp.create_category(&data).unwrap();
        assert_eq!(category.name.as_deref(), Some("Releases"));

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Releases","parent":1}"#));
    }
}
