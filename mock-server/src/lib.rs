//! In-memory imitation of the WordPress REST surface used by `wp-core`.
//!
//! Serves the discovery `Link` header on `/`, and posts, post revisions,
//! categories and tags under `/wp-json/wp/v2/`. `/plain` is a page without
//! the API link. Every post update stores a revision of the previous state.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Timestamp stamped on everything the server creates or modifies.
pub const NOW: &str = "2024-03-01T12:00:00";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    pub rendered: String,
}

impl Rendered {
    fn new(text: impl Into<String>) -> Self {
        Self {
            rendered: text.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub date: String,
    pub date_gmt: String,
    pub modified: String,
    pub modified_gmt: String,
    pub slug: String,
    pub status: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub link: String,
    pub title: Rendered,
    pub content: Rendered,
    pub excerpt: Rendered,
    pub author: i64,
    pub featured_media: i64,
    pub comment_status: String,
    pub ping_status: String,
    pub sticky: bool,
    pub template: String,
    pub format: String,
    pub meta: Value,
    pub categories: Vec<i64>,
    pub tags: Vec<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Revision {
    pub id: i64,
    pub parent: i64,
    pub author: i64,
    pub date: String,
    pub date_gmt: String,
    pub modified: String,
    pub modified_gmt: String,
    pub slug: String,
    pub title: Rendered,
    pub content: Rendered,
    pub excerpt: Rendered,
}

/// A category or tag. Tags serialize without `parent`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Term {
    pub id: i64,
    pub count: i64,
    pub description: String,
    pub link: String,
    pub name: String,
    pub slug: String,
    pub taxonomy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    pub meta: Value,
}

#[derive(Deserialize, Default)]
pub struct PostInput {
    pub date: Option<String>,
    pub date_gmt: Option<String>,
    pub slug: Option<String>,
    pub status: Option<String>,
    pub password: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<i64>,
    pub excerpt: Option<String>,
    pub featured_media: Option<i64>,
    pub comment_status: Option<String>,
    pub ping_status: Option<String>,
    pub format: Option<String>,
    pub meta: Option<Value>,
    pub sticky: Option<bool>,
    pub template: Option<String>,
    pub categories: Option<Vec<i64>>,
    pub tags: Option<Vec<i64>>,
}

#[derive(Deserialize, Default)]
pub struct TermInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub parent: Option<i64>,
    pub meta: Option<Value>,
}

#[derive(Debug, Default)]
pub struct Site {
    pub posts: BTreeMap<i64, Post>,
    pub revisions: BTreeMap<i64, Revision>,
    pub categories: BTreeMap<i64, Term>,
    pub tags: BTreeMap<i64, Term>,
    next_id: i64,
}

impl Site {
    /// A site with "Uncategorized" (1), the tag "general" (2) and the
    /// published post "Hello world!" (3) filed under both.
    pub fn seeded() -> Self {
        let mut site = Site {
            next_id: 1,
            ..Default::default()
        };
        let category = site.new_term("category", "Uncategorized", None);
        site.categories.insert(category.id, category);
        let tag = site.new_term("post_tag", "general", None);
        site.tags.insert(tag.id, tag);

        let input = PostInput {
            title: Some("Hello world!".to_string()),
            content: Some("<p>Welcome to WordPress.</p>".to_string()),
            status: Some("publish".to_string()),
            categories: Some(vec![1]),
            tags: Some(vec![2]),
            ..Default::default()
        };
        let post = site.new_post(input);
        site.posts.insert(post.id, post);
        site
    }

    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn new_term(&mut self, taxonomy: &str, name: &str, parent: Option<i64>) -> Term {
        let id = self.next_id();
        let slug = slugify(name);
        let base = if taxonomy == "category" { "category" } else { "tag" };
        Term {
            id,
            count: 0,
            description: String::new(),
            link: format!("http://localhost/{base}/{slug}/"),
            name: name.to_string(),
            slug,
            taxonomy: taxonomy.to_string(),
            parent: (taxonomy == "category").then(|| parent.unwrap_or(0)),
            meta: json!([]),
        }
    }

    fn new_post(&mut self, input: PostInput) -> Post {
        let id = self.next_id();
        let title = input.title.clone().unwrap_or_default();
        let mut post = Post {
            id,
            date: NOW.to_string(),
            date_gmt: NOW.to_string(),
            modified: NOW.to_string(),
            modified_gmt: NOW.to_string(),
            slug: slugify(&title),
            status: "draft".to_string(),
            post_type: "post".to_string(),
            link: format!("http://localhost/?p={id}"),
            title: Rendered::default(),
            content: Rendered::default(),
            excerpt: Rendered::default(),
            author: 1,
            featured_media: 0,
            comment_status: "open".to_string(),
            ping_status: "open".to_string(),
            sticky: false,
            template: String::new(),
            format: "standard".to_string(),
            meta: json!([]),
            categories: vec![1],
            tags: Vec::new(),
        };
        apply(&mut post, input);
        post
    }

    fn snapshot(&mut self, post: &Post) {
        let id = self.next_id();
        let revision = Revision {
            id,
            parent: post.id,
            author: post.author,
            date: post.modified.clone(),
            date_gmt: post.modified_gmt.clone(),
            modified: post.modified.clone(),
            modified_gmt: post.modified_gmt.clone(),
            slug: format!("{}-revision-v1", post.id),
            title: post.title.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
        };
        self.revisions.insert(id, revision);
    }
}

fn apply(post: &mut Post, input: PostInput) {
    if let Some(date) = input.date {
        post.date = date;
    }
    if let Some(date_gmt) = input.date_gmt {
        post.date_gmt = date_gmt;
    }
    if let Some(slug) = input.slug {
        post.slug = slug;
    }
    if let Some(status) = input.status {
        post.status = status;
    }
    if let Some(title) = input.title {
        post.title = Rendered::new(title);
    }
    if let Some(content) = input.content {
        post.content = Rendered::new(content);
    }
    if let Some(excerpt) = input.excerpt {
        post.excerpt = Rendered::new(excerpt);
    }
    if let Some(author) = input.author {
        post.author = author;
    }
    if let Some(featured_media) = input.featured_media {
        post.featured_media = featured_media;
    }
    if let Some(comment_status) = input.comment_status {
        post.comment_status = comment_status;
    }
    if let Some(ping_status) = input.ping_status {
        post.ping_status = ping_status;
    }
    if let Some(format) = input.format {
        post.format = format;
    }
    if let Some(meta) = input.meta {
        post.meta = meta;
    }
    if let Some(sticky) = input.sticky {
        post.sticky = sticky;
    }
    if let Some(template) = input.template {
        post.template = template;
    }
    if let Some(categories) = input.categories {
        post.categories = categories;
    }
    if let Some(tags) = input.tags {
        post.tags = tags;
    }
}

fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub type Db = Arc<RwLock<Site>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

fn wp_error(status: StatusCode, code: &str, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "code": code,
            "message": message,
            "data": {"status": status.as_u16()},
        })),
    )
}

fn not_found(code: &str) -> (StatusCode, Json<Value>) {
    wp_error(StatusCode::NOT_FOUND, code, "Invalid ID.")
}

fn missing_name() -> (StatusCode, Json<Value>) {
    wp_error(
        StatusCode::BAD_REQUEST,
        "rest_missing_callback_param",
        "Missing parameter(s): name",
    )
}

fn forced(query: &HashMap<String, String>) -> bool {
    query.get("force").is_some_and(|v| v == "true" || v == "1")
}

pub fn app() -> Router {
    app_with(Site::seeded())
}

pub fn app_with(site: Site) -> Router {
    let db: Db = Arc::new(RwLock::new(site));
    Router::new()
        .route("/", get(home))
        .route("/plain", get(plain))
        .route("/wp-json/wp/v2/posts", get(list_posts).post(create_post))
        .route(
            "/wp-json/wp/v2/posts/{id}",
            get(get_post).post(update_post).delete(delete_post),
        )
        .route("/wp-json/wp/v2/posts/{id}/revisions", get(list_revisions))
        .route(
            "/wp-json/wp/v2/posts/{parent}/revisions/{id}",
            get(get_revision).delete(delete_revision),
        )
        .route(
            "/wp-json/wp/v2/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/wp-json/wp/v2/categories/{id}",
            get(get_category).post(update_category).delete(delete_category),
        )
        .route("/wp-json/wp/v2/tags", get(list_tags).post(create_tag))
        .route(
            "/wp-json/wp/v2/tags/{id}",
            get(get_tag).post(update_tag).delete(delete_tag),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn home(headers: HeaderMap) -> impl IntoResponse {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let link = format!(r#"<http://{host}/wp-json/>; rel="https://api.w.org/""#);
    ([(header::LINK, link)], "<html><body>Just another WordPress site</body></html>")
}

async fn plain() -> &'static str {
    "<html><body>Not a WordPress site</body></html>"
}

fn id_filter(query: &HashMap<String, String>, key: &str) -> Option<Vec<i64>> {
    query
        .get(key)
        .map(|v| v.split(',').filter_map(|id| id.trim().parse().ok()).collect())
}

fn paginate<T>(items: Vec<T>, query: &HashMap<String, String>) -> Vec<T> {
    let per_page = query
        .get("per_page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(10usize);
    let page = query
        .get("page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1usize)
        .max(1);
    items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect()
}

// --- posts ---

async fn list_posts(
    State(db): State<Db>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<Post>> {
    let site = db.read().await;
    let status = query.get("status").map(String::as_str).unwrap_or("publish");
    let categories = id_filter(&query, "categories");
    let search = query.get("search").map(|s| s.to_lowercase());

    let mut posts: Vec<Post> = site
        .posts
        .values()
        .filter(|p| p.status == status)
        .filter(|p| {
            categories
                .as_ref()
                .is_none_or(|ids| p.categories.iter().any(|c| ids.contains(c)))
        })
        .filter(|p| {
            search
                .as_ref()
                .is_none_or(|s| p.title.rendered.to_lowercase().contains(s))
        })
        .cloned()
        .collect();
    if query.get("order").map(String::as_str) != Some("asc") {
        posts.reverse();
    }
    Json(paginate(posts, &query))
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<PostInput>,
) -> (StatusCode, Json<Post>) {
    let mut site = db.write().await;
    let post = site.new_post(input);
    site.posts.insert(post.id, post.clone());
    (StatusCode::CREATED, Json(post))
}

async fn get_post(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Post>> {
    let site = db.read().await;
    site.posts
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("rest_post_invalid_id"))
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<PostInput>,
) -> ApiResult<Json<Post>> {
    let mut site = db.write().await;
    let previous = site
        .posts
        .get(&id)
        .cloned()
        .ok_or_else(|| not_found("rest_post_invalid_id"))?;
    site.snapshot(&previous);

    let mut post = previous;
    apply(&mut post, input);
    post.modified = NOW.to_string();
    post.modified_gmt = NOW.to_string();
    site.posts.insert(id, post.clone());
    Ok(Json(post))
}

async fn delete_post(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let mut site = db.write().await;
    if forced(&query) {
        let previous = site
            .posts
            .remove(&id)
            .ok_or_else(|| not_found("rest_post_invalid_id"))?;
        return Ok(Json(json!({"deleted": true, "previous": previous})));
    }
    let post = site
        .posts
        .get_mut(&id)
        .ok_or_else(|| not_found("rest_post_invalid_id"))?;
    post.status = "trash".to_string();
    Ok(Json(json!(post)))
}

// --- revisions ---

async fn list_revisions(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Revision>>> {
    let site = db.read().await;
    if !site.posts.contains_key(&id) {
        return Err(not_found("rest_post_invalid_parent"));
    }
    let revisions = site
        .revisions
        .values()
        .rev()
        .filter(|r| r.parent == id)
        .cloned()
        .collect();
    Ok(Json(revisions))
}

async fn get_revision(
    State(db): State<Db>,
    Path((parent, id)): Path<(i64, i64)>,
) -> ApiResult<Json<Revision>> {
    let site = db.read().await;
    site.revisions
        .get(&id)
        .filter(|r| r.parent == parent)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("rest_post_invalid_id"))
}

async fn delete_revision(
    State(db): State<Db>,
    Path((parent, id)): Path<(i64, i64)>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    if !forced(&query) {
        return Err(wp_error(
            StatusCode::NOT_IMPLEMENTED,
            "rest_trash_not_supported",
            "Revisions do not support trashing. Set 'force' to true to delete.",
        ));
    }
    let mut site = db.write().await;
    if !site.revisions.get(&id).is_some_and(|r| r.parent == parent) {
        return Err(not_found("rest_post_invalid_id"));
    }
    let previous = site.revisions.remove(&id);
    Ok(Json(json!({"deleted": true, "previous": previous})))
}

// --- terms ---

fn list_terms(terms: &BTreeMap<i64, Term>, query: &HashMap<String, String>) -> Vec<Term> {
    let parent = query.get("parent").and_then(|v| v.parse::<i64>().ok());
    let include = id_filter(query, "include");
    let mut items: Vec<Term> = terms
        .values()
        .filter(|t| parent.is_none() || t.parent == parent)
        .filter(|t| include.as_ref().is_none_or(|ids| ids.contains(&t.id)))
        .cloned()
        .collect();
    items.sort_by(|a, b| a.name.cmp(&b.name));
    if query.get("order").map(String::as_str) == Some("desc") {
        items.reverse();
    }
    paginate(items, query)
}

fn update_term(term: &mut Term, input: TermInput) {
    if let Some(name) = input.name {
        term.name = name;
    }
    if let Some(description) = input.description {
        term.description = description;
    }
    if let Some(slug) = input.slug {
        term.slug = slug;
    }
    if let (Some(parent), Some(_)) = (input.parent, term.parent) {
        term.parent = Some(parent);
    }
    if let Some(meta) = input.meta {
        term.meta = meta;
    }
}

fn delete_term(
    terms: &mut BTreeMap<i64, Term>,
    id: i64,
    query: &HashMap<String, String>,
) -> ApiResult<Json<Value>> {
    if !forced(query) {
        return Err(wp_error(
            StatusCode::NOT_IMPLEMENTED,
            "rest_trash_not_supported",
            "Terms do not support trashing. Set 'force' to true to delete.",
        ));
    }
    let previous = terms
        .remove(&id)
        .ok_or_else(|| not_found("rest_term_invalid"))?;
    Ok(Json(json!({"deleted": true, "previous": previous})))
}

async fn list_categories(
    State(db): State<Db>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<Term>> {
    let site = db.read().await;
    Json(list_terms(&site.categories, &query))
}

async fn create_category(
    State(db): State<Db>,
    Json(input): Json<TermInput>,
) -> ApiResult<(StatusCode, Json<Term>)> {
    let mut site = db.write().await;
    let name = input.name.clone().ok_or_else(missing_name)?;
    let mut term = site.new_term("category", &name, input.parent);
    update_term(&mut term, input);
    site.categories.insert(term.id, term.clone());
    Ok((StatusCode::CREATED, Json(term)))
}

async fn get_category(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Term>> {
    let site = db.read().await;
    site.categories
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("rest_term_invalid"))
}

async fn update_category(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TermInput>,
) -> ApiResult<Json<Term>> {
    let mut site = db.write().await;
    let term = site
        .categories
        .get_mut(&id)
        .ok_or_else(|| not_found("rest_term_invalid"))?;
    update_term(term, input);
    Ok(Json(term.clone()))
}

async fn delete_category(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let mut site = db.write().await;
    delete_term(&mut site.categories, id, &query)
}

async fn list_tags(
    State(db): State<Db>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<Term>> {
    let site = db.read().await;
    Json(list_terms(&site.tags, &query))
}

async fn create_tag(
    State(db): State<Db>,
    Json(input): Json<TermInput>,
) -> ApiResult<(StatusCode, Json<Term>)> {
    let mut site = db.write().await;
    let name = input.name.clone().ok_or_else(missing_name)?;
    let mut term = site.new_term("post_tag", &name, None);
    update_term(&mut term, input);
    site.tags.insert(term.id, term.clone());
    Ok((StatusCode::CREATED, Json(term)))
}

async fn get_tag(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Term>> {
    let site = db.read().await;
    site.tags
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("rest_term_invalid"))
}

async fn update_tag(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TermInput>,
) -> ApiResult<Json<Term>> {
    let mut site = db.write().await;
    let term = site
        .tags
        .get_mut(&id)
        .ok_or_else(|| not_found("rest_term_invalid"))?;
    update_term(term, input);
    Ok(Json(term.clone()))
}

async fn delete_tag(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let mut site = db.write().await;
    delete_term(&mut site.tags, id, &query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_site_has_hello_world() {
        let site = Site::seeded();
        let post = &site.posts[&3];
        assert_eq!(post.title.rendered, "Hello world!");
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.categories, vec![1]);
        assert_eq!(post.tags, vec![2]);
        assert_eq!(site.categories[&1].parent, Some(0));
        assert_eq!(site.tags[&2].parent, None);
    }

    #[test]
    fn tags_serialize_without_parent() {
        let site = Site::seeded();
        let json = serde_json::to_value(&site.tags[&2]).unwrap();
        assert!(json.get("parent").is_none());
        assert_eq!(json["taxonomy"], "post_tag");
    }

    #[test]
    fn post_serializes_type_key() {
        let site = Site::seeded();
        let json = serde_json::to_value(&site.posts[&3]).unwrap();
        assert_eq!(json["type"], "post");
        assert_eq!(json["date"], NOW);
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust  2024 "), "rust-2024");
    }

    #[test]
    fn update_snapshots_previous_state() {
        let mut site = Site::seeded();
        let previous = site.posts[&3].clone();
        site.snapshot(&previous);
        let revision = site.revisions.values().next().unwrap();
        assert_eq!(revision.parent, 3);
        assert_eq!(revision.title.rendered, "Hello world!");
    }

    #[test]
    fn post_input_all_fields_optional() {
        let input: PostInput = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert!(input.categories.is_none());
    }
}
