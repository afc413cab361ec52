use super::{context_query, force_query, PostRevisionsApi};
use crate::client::WordPress;
use crate::error::WpError;
use crate::models::{parse_list, FromJson, ModelKind, PostRevision, ResultSet};
use crate::params::Context;
use crate::types::ObjectRef;

// Revisions cannot be trashed, so deletes always force.
const FORCE: bool = true;

fn revisions_endpoint(parent: ObjectRef<'_>) -> Result<String, WpError> {
    let parent_id = parent.resolve("parent", &[ModelKind::Post])?;
    Ok(format!("posts/{parent_id}/revisions"))
}

impl PostRevisionsApi for WordPress {
    fn list_post_revisions<'a>(
        &self,
        parent: impl Into<ObjectRef<'a>>,
        context: Context,
    ) -> Result<ResultSet<PostRevision>, WpError> {
        let endpoint = revisions_endpoint(parent.into())?;
        let json = self.get(&endpoint, context_query(context))?;
        parse_list(Some(self), &json)
    }

    fn get_post_revision<'a>(
        &self,
        parent: impl Into<ObjectRef<'a>>,
        id: i64,
        context: Context,
    ) -> Result<PostRevision, WpError> {
        let endpoint = format!("{}/{id}", revisions_endpoint(parent.into())?);
        let json = self.get(&endpoint, context_query(context))?;
        PostRevision::from_json(Some(self), &json)
    }

    fn delete_post_revision<'a>(
        &self,
        parent: impl Into<ObjectRef<'a>>,
        id: i64,
    ) -> Result<bool, WpError> {
        let endpoint = format!("{}/{id}", revisions_endpoint(parent.into())?);
        self.delete(&endpoint, force_query(FORCE))?;
        Ok(true)
    }
}
