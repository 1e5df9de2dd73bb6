//! The self-describing endpoint catalog served from `GET /api`.
//!
//! The catalog is static data: one entry per served path, one descriptor
//! per method, with example payloads. Serialization preserves declaration
//! order, so `/api` reads top to bottom the way the routes are mounted.
//! Every route the router serves must have an entry here; the coverage is
//! asserted by the integration tests.

use std::sync::OnceLock;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Value, json};

/// HTTP verbs the catalog describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// `GET`.
    Get,
    /// `POST`.
    Post,
    /// `PATCH`.
    Patch,
    /// `DELETE`.
    Delete,
}

impl MethodKind {
    /// Lower-case verb, as used for catalog keys and the `method` filter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// Parses a lower-case verb; anything else is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Whether a request or response carries a JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// No body.
    None,
    /// A JSON body.
    Json,
}

impl BodyKind {
    /// The catalog's string form, matched by the body-shape filters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
        }
    }
}

/// Everything the catalog says about one method on one path.
#[derive(Debug, Clone, Serialize)]
pub struct MethodDescriptor {
    /// Outcome summary for the happy path.
    pub status: &'static str,
    /// One-line description of the operation.
    pub info: &'static str,
    /// What the response data holds.
    pub data: &'static str,
    /// Keys of the objects the operation returns.
    pub keys: Vec<&'static str>,
    /// Accepted query-parameter names.
    pub queries: Vec<&'static str>,
    /// Request body shape.
    #[serde(rename = "req-body")]
    pub req_body: BodyKind,
    /// Response body shape.
    #[serde(rename = "res-body")]
    pub res_body: BodyKind,
    /// Example response payload; serialized as `null` when absent.
    pub example: Option<Value>,
}

/// One served path and its described methods, in declaration order.
#[derive(Debug, Clone)]
pub struct EndpointEntry {
    /// The path as mounted, parameters in `:name` form.
    pub path: &'static str,
    /// Described methods in declaration order.
    pub methods: Vec<(MethodKind, MethodDescriptor)>,
}

/// The ordered endpoint catalog.
#[derive(Debug, Clone)]
pub struct EndpointCatalog {
    /// Entries in mount order.
    pub entries: Vec<EndpointEntry>,
}

impl EndpointCatalog {
    /// Number of paths in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no paths survive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up one path's entry.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&EndpointEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// The pagination order: the path list advertised under `GET /api`.
    #[must_use]
    pub fn page_order(&self) -> Vec<&'static str> {
        self.get("/api")
            .and_then(|entry| {
                entry
                    .methods
                    .iter()
                    .find(|(kind, _)| *kind == MethodKind::Get)
            })
            .map(|(_, descriptor)| descriptor.keys.clone())
            .unwrap_or_else(|| self.entries.iter().map(|entry| entry.path).collect())
    }
}

impl Serialize for EndpointCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.path, &MethodMap(&entry.methods))?;
        }
        map.end()
    }
}

struct MethodMap<'a>(&'a [(MethodKind, MethodDescriptor)]);

impl Serialize for MethodMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (kind, descriptor) in self.0 {
            map.serialize_entry(kind.as_str(), descriptor)?;
        }
        map.end()
    }
}

/// The paths `GET /api` advertises, in pagination order.
const API_KEYS: &[&str] = &[
    "/api",
    "/api/categories",
    "/api/categories/:slug",
    "/api/reviews",
    "/api/reviews/:review_id",
    "/api/reviews/:review_id/comments",
    "/api/comments/:comment_id",
    "/api/users",
    "/api/users/:username",
];

const LIST_QUERIES: &[&str] = &["sort_by", "order", "limit", "p"];

const CATEGORY_KEYS: &[&str] = &["slug", "description"];
const REVIEW_LIST_KEYS: &[&str] = &[
    "owner",
    "title",
    "review_id",
    "category",
    "review_img_url",
    "created_at",
    "votes",
    "designer",
    "comment_count",
];
const REVIEW_KEYS: &[&str] = &[
    "review_id",
    "title",
    "review_body",
    "designer",
    "review_img_url",
    "votes",
    "category",
    "owner",
    "created_at",
    "comment_count",
];
const REVIEW_ROW_KEYS: &[&str] = &[
    "review_id",
    "title",
    "review_body",
    "designer",
    "review_img_url",
    "votes",
    "category",
    "owner",
    "created_at",
];
const COMMENT_KEYS: &[&str] = &[
    "comment_id",
    "votes",
    "created_at",
    "author",
    "body",
    "review_id",
];
const USER_KEYS: &[&str] = &["username", "name", "avatar_url"];

#[allow(clippy::too_many_arguments)]
fn describe(
    info: &'static str,
    data: &'static str,
    keys: &[&'static str],
    queries: &[&'static str],
    req_body: BodyKind,
    res_body: BodyKind,
    example: Option<Value>,
) -> MethodDescriptor {
    MethodDescriptor {
        status: "OK",
        info,
        data,
        keys: keys.to_vec(),
        queries: queries.to_vec(),
        req_body,
        res_body,
        example,
    }
}

fn entry(
    path: &'static str,
    methods: Vec<(MethodKind, MethodDescriptor)>,
) -> EndpointEntry {
    EndpointEntry { path, methods }
}

fn build() -> EndpointCatalog {
    let category = json!({"slug": "deck building", "description": "Build your deck as you play"});
    let review = json!({
        "review_id": 2,
        "title": "Jenga",
        "review_body": "Fiddly fun for all the family",
        "designer": "Leslie Scott",
        "review_img_url": "https://images.pexels.com/photos/4009761/pexels-photo-4009761.jpeg",
        "votes": 5,
        "category": "dexterity",
        "owner": "philippaclaire9",
        "created_at": "2021-01-18T10:01:41.251Z",
        "comment_count": 3
    });
    let review_summary = json!({
        "owner": "mallionaire",
        "title": "Agricola",
        "review_id": 1,
        "category": "euro game",
        "review_img_url": "https://images.pexels.com/photos/163064/play-stone-network-networked-interactive-163064.jpeg",
        "created_at": "2021-01-18T10:00:20.514Z",
        "votes": 1,
        "designer": "Uwe Rosenberg",
        "comment_count": 0
    });
    let comment = json!({
        "comment_id": 1,
        "votes": 16,
        "created_at": "2017-11-22T12:43:33.389Z",
        "author": "bainesface",
        "body": "I loved this game too!",
        "review_id": 2
    });
    let user = json!({
        "username": "mallionaire",
        "name": "haz",
        "avatar_url": "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg"
    });

    EndpointCatalog {
        entries: vec![
            entry(
                "/api",
                vec![(
                    MethodKind::Get,
                    describe(
                        "serves this catalog, filterable by the listed queries",
                        "an object keyed by endpoint path",
                        API_KEYS,
                        &[
                            "method",
                            "status",
                            "hasKeys",
                            "hasQueries",
                            "req_body",
                            "res_body",
                            "limit",
                            "p",
                        ],
                        BodyKind::None,
                        BodyKind::Json,
                        None,
                    ),
                )],
            ),
            entry(
                "/api/categories",
                vec![
                    (
                        MethodKind::Get,
                        describe(
                            "serves a page of categories",
                            "an array of category objects",
                            CATEGORY_KEYS,
                            LIST_QUERIES,
                            BodyKind::None,
                            BodyKind::Json,
                            Some(json!({ "categories": [category.clone()] })),
                        ),
                    ),
                    (
                        MethodKind::Post,
                        describe(
                            "creates a category from a slug and description",
                            "the stored category object",
                            CATEGORY_KEYS,
                            &[],
                            BodyKind::Json,
                            BodyKind::Json,
                            Some(json!({ "category": category.clone() })),
                        ),
                    ),
                ],
            ),
            entry(
                "/api/categories/:slug",
                vec![
                    (
                        MethodKind::Get,
                        describe(
                            "serves one category by slug",
                            "a category object",
                            CATEGORY_KEYS,
                            &[],
                            BodyKind::None,
                            BodyKind::Json,
                            Some(json!({ "category": category.clone() })),
                        ),
                    ),
                    (
                        MethodKind::Patch,
                        describe(
                            "replaces a category's description",
                            "the updated category object",
                            CATEGORY_KEYS,
                            &[],
                            BodyKind::Json,
                            BodyKind::Json,
                            Some(json!({ "category": category })),
                        ),
                    ),
                    (
                        MethodKind::Delete,
                        describe(
                            "deletes a category and the reviews in it",
                            "nothing",
                            &[],
                            &[],
                            BodyKind::None,
                            BodyKind::None,
                            None,
                        ),
                    ),
                ],
            ),
            entry(
                "/api/reviews",
                vec![
                    (
                        MethodKind::Get,
                        describe(
                            "serves a page of reviews with comment counts and a filter-wide total",
                            "an array of review objects plus total_count",
                            REVIEW_LIST_KEYS,
                            &["category", "sort_by", "order", "limit", "p"],
                            BodyKind::None,
                            BodyKind::Json,
                            Some(json!({ "reviews": [review_summary], "total_count": 13 })),
                        ),
                    ),
                    (
                        MethodKind::Post,
                        describe(
                            "creates a review owned by an existing user in an existing category",
                            "the stored review object",
                            REVIEW_KEYS,
                            &[],
                            BodyKind::Json,
                            BodyKind::Json,
                            Some(json!({ "review": review.clone() })),
                        ),
                    ),
                ],
            ),
            entry(
                "/api/reviews/:review_id",
                vec![
                    (
                        MethodKind::Get,
                        describe(
                            "serves one review with its comment count",
                            "a review object",
                            REVIEW_KEYS,
                            &[],
                            BodyKind::None,
                            BodyKind::Json,
                            Some(json!({ "review": review })),
                        ),
                    ),
                    (
                        MethodKind::Patch,
                        describe(
                            "adjusts a review's votes by inc_votes",
                            "the updated review object",
                            REVIEW_ROW_KEYS,
                            &[],
                            BodyKind::Json,
                            BodyKind::Json,
                            Some(json!({
                                "review": {
                                    "review_id": 1,
                                    "title": "Agricola",
                                    "review_body": "Farmyard fun!",
                                    "designer": "Uwe Rosenberg",
                                    "review_img_url": "https://images.pexels.com/photos/163064/play-stone-network-networked-interactive-163064.jpeg",
                                    "votes": 2,
                                    "category": "euro game",
                                    "owner": "mallionaire",
                                    "created_at": "2021-01-18T10:00:20.514Z"
                                }
                            })),
                        ),
                    ),
                    (
                        MethodKind::Delete,
                        describe(
                            "deletes a review and its comments",
                            "nothing",
                            &[],
                            &[],
                            BodyKind::None,
                            BodyKind::None,
                            None,
                        ),
                    ),
                ],
            ),
            entry(
                "/api/reviews/:review_id/comments",
                vec![
                    (
                        MethodKind::Get,
                        describe(
                            "serves a page of one review's comments",
                            "an array of comment objects",
                            COMMENT_KEYS,
                            &["author", "sort_by", "order", "limit", "p"],
                            BodyKind::None,
                            BodyKind::Json,
                            Some(json!({ "comments": [comment.clone()] })),
                        ),
                    ),
                    (
                        MethodKind::Post,
                        describe(
                            "adds a comment to a review from an existing user",
                            "the stored comment object",
                            COMMENT_KEYS,
                            &[],
                            BodyKind::Json,
                            BodyKind::Json,
                            Some(json!({ "comment": comment.clone() })),
                        ),
                    ),
                ],
            ),
            entry(
                "/api/comments/:comment_id",
                vec![
                    (
                        MethodKind::Get,
                        describe(
                            "serves one comment by id",
                            "a comment object",
                            COMMENT_KEYS,
                            &[],
                            BodyKind::None,
                            BodyKind::Json,
                            Some(json!({ "comment": comment.clone() })),
                        ),
                    ),
                    (
                        MethodKind::Patch,
                        describe(
                            "adjusts a comment's votes by inc_votes",
                            "the updated comment object",
                            COMMENT_KEYS,
                            &[],
                            BodyKind::Json,
                            BodyKind::Json,
                            Some(json!({ "comment": comment })),
                        ),
                    ),
                    (
                        MethodKind::Delete,
                        describe(
                            "deletes a comment",
                            "nothing",
                            &[],
                            &[],
                            BodyKind::None,
                            BodyKind::None,
                            None,
                        ),
                    ),
                ],
            ),
            entry(
                "/api/users",
                vec![
                    (
                        MethodKind::Get,
                        describe(
                            "serves a page of users",
                            "an array of user objects",
                            USER_KEYS,
                            LIST_QUERIES,
                            BodyKind::None,
                            BodyKind::Json,
                            Some(json!({ "users": [user.clone()] })),
                        ),
                    ),
                    (
                        MethodKind::Post,
                        describe(
                            "creates a user from a username and display name",
                            "the stored user object",
                            USER_KEYS,
                            &[],
                            BodyKind::Json,
                            BodyKind::Json,
                            Some(json!({ "user": user.clone() })),
                        ),
                    ),
                ],
            ),
            entry(
                "/api/users/:username",
                vec![
                    (
                        MethodKind::Get,
                        describe(
                            "serves one user by username",
                            "a user object",
                            USER_KEYS,
                            &[],
                            BodyKind::None,
                            BodyKind::Json,
                            Some(json!({ "user": user.clone() })),
                        ),
                    ),
                    (
                        MethodKind::Patch,
                        describe(
                            "updates a user's name and/or avatar",
                            "the updated user object",
                            USER_KEYS,
                            &[],
                            BodyKind::Json,
                            BodyKind::Json,
                            Some(json!({ "user": user })),
                        ),
                    ),
                    (
                        MethodKind::Delete,
                        describe(
                            "deletes a user, their reviews and their comments",
                            "nothing",
                            &[],
                            &[],
                            BodyKind::None,
                            BodyKind::None,
                            None,
                        ),
                    ),
                ],
            ),
        ],
    }
}

/// The catalog, built once.
pub fn catalog() -> &'static EndpointCatalog {
    static CATALOG: OnceLock<EndpointCatalog> = OnceLock::new();
    CATALOG.get_or_init(build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertised_keys_match_catalog_paths_in_order() {
        let paths: Vec<&str> = catalog().entries.iter().map(|e| e.path).collect();
        assert_eq!(paths, API_KEYS);
        assert_eq!(catalog().page_order(), API_KEYS);
    }

    #[test]
    fn serialization_keeps_order_and_renames_body_fields() {
        let value = serde_json::to_value(catalog()).unwrap();
        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, API_KEYS);

        let api_get = &object["/api"]["get"];
        assert_eq!(api_get["req-body"], "none");
        assert_eq!(api_get["res-body"], "json");
        assert!(api_get["example"].is_null());
    }

    #[test]
    fn deletes_carry_no_keys_or_bodies() {
        for entry in &catalog().entries {
            for (kind, descriptor) in &entry.methods {
                if *kind == MethodKind::Delete {
                    assert!(descriptor.keys.is_empty(), "{}", entry.path);
                    assert_eq!(descriptor.req_body, BodyKind::None);
                    assert_eq!(descriptor.res_body, BodyKind::None);
                    assert!(descriptor.example.is_none());
                }
            }
        }
    }

    #[test]
    fn unknown_verbs_do_not_parse() {
        assert_eq!(MethodKind::parse("get"), Some(MethodKind::Get));
        assert_eq!(MethodKind::parse("GET"), None);
        assert_eq!(MethodKind::parse("teapot"), None);
    }
}
