use super::{context_query, force_query, TagsApi};
use crate::client::WordPress;
use crate::error::WpError;
use crate::models::{parse_list, FromJson, ResultSet, Tag};
use crate::params::{Context, ListTagsParams};
use crate::types::TagData;

impl TagsApi for WordPress {
    fn list_tags(&self, params: &ListTagsParams) -> Result<ResultSet<Tag>, WpError> {
        let json = self.get("tags", params.to_query())?;
        parse_list(Some(self), &json)
    }

    fn get_tag(&self, id: i64, context: Context) -> Result<Tag, WpError> {
        let json = self.get(&format!("tags/{id}"), context_query(context))?;
        Tag::from_json(Some(self), &json)
    }

    fn create_tag(&self, data: &TagData) -> Result<Tag, WpError> {
        let json = self.post("tags", data, Vec::new())?;
        Tag::from_json(Some(self), &json)
    }

    fn update_tag(&self, id: i64, data: &TagData) -> Result<Tag, WpError> {
        let json = self.post(&format!("tags/{id}"), data, Vec::new())?;
        Tag::from_json(Some(self), &json)
    }

    fn delete_tag(&self, id: i64, force: bool) -> Result<bool, WpError> {
        self.delete(&format!("tags/{id}"), force_query(force))?;
        Ok(true)
    }
}
