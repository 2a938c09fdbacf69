//! Firestore REST 客户端
//!
//! 只负责传输和编解码；失败一律以 `SchoolError` 返回，是否降级由调用方决定。

use chrono::Utc;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::document::{Document, FirestoreDocument, ListDocumentsResponse, RunQueryResponseItem};
use super::fields::Fields;
use super::query::{Direction, RunQueryRequest, StructuredQuery};
use super::value::Value;
use crate::config::FirebaseConfig;
use crate::errors::{Result, SchoolError};

const UPDATE_MASK_PARAM: &str = "updateMask.fieldPaths";
const MAX_ERROR_BODY: usize = 512;

#[derive(Clone)]
pub struct FirestoreClient {
    http: reqwest::Client,
    endpoint: String,
    database_path: String,
    api_key: Option<String>,
    access_token: Option<String>,
    page_size: u32,
}

#[derive(Serialize)]
struct DocumentBody<'a> {
    fields: &'a Fields,
}

/// commit 中的一次写入：整文档更新或删除
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Write {
    #[serde(skip_serializing_if = "Option::is_none")]
    update: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update_mask: Option<DocumentMask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delete: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentMask {
    field_paths: Vec<String>,
}

#[derive(Serialize)]
struct CommitRequest<'a> {
    writes: &'a [Write],
}

impl FirestoreClient {
    pub fn new(config: &FirebaseConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SchoolError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.firestore_endpoint.trim_end_matches('/').to_string(),
            database_path: format!(
                "projects/{}/databases/{}",
                config.project_id, config.database_id
            ),
            api_key: Some(config.api_key.clone()).filter(|k| !k.is_empty()),
            access_token: Some(config.access_token.clone()).filter(|t| !t.is_empty()),
            page_size: config.list_page_size.max(1),
        })
    }

    /// 文档的完整资源名，commit 写入需要
    pub fn document_name(&self, collection: &str, id: &str) -> String {
        format!("{}/documents/{collection}/{id}", self.database_path)
    }

    fn documents_root(&self) -> String {
        format!("{}/{}/documents", self.endpoint, self.database_path)
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{collection}", self.documents_root())
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.documents_root())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, url);
        if let Some(key) = &self.api_key {
            builder = builder.query(&[("key", key)]);
        }
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(builder: RequestBuilder, context: &str) -> Result<Response> {
        builder.send().await.map_err(|e| {
            SchoolError::firestore_transport(format!("{context}: {e}"))
        })
    }

    async fn ensure_success(response: Response, context: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|i| body.is_char_boundary(*i))
                .unwrap_or(0);
            body.truncate(cut);
        }
        Err(SchoolError::firestore_status(format!(
            "{context}: HTTP {status}: {body}"
        )))
    }

    /// 获取单个文档，404 返回 None
    pub async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let context = format!("get {collection}/{id}");
        debug!("Firestore {}", context);

        let response = Self::send(
            self.request(Method::GET, &self.document_url(collection, id)),
            &context,
        )
        .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::ensure_success(response, &context).await?;
        Ok(Some(response.json::<Document>().await?))
    }

    /// 拉取整个集合，自动跟随 nextPageToken
    pub async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        let context = format!("list {collection}");
        let url = self.collection_url(collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut builder = self
                .request(Method::GET, &url)
                .query(&[("pageSize", self.page_size.to_string())]);
            if let Some(token) = &page_token {
                builder = builder.query(&[("pageToken", token)]);
            }

            let response = Self::send(builder, &context).await?;
            let response = Self::ensure_success(response, &context).await?;
            let page = response.json::<ListDocumentsResponse>().await?;
            documents.extend(page.documents);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!("Firestore {} -> {} documents", context, documents.len());
        Ok(documents)
    }

    /// 以指定 ID 创建文档
    pub async fn create_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<Document> {
        let context = format!("create {collection}/{id}");
        debug!("Firestore {}", context);

        let builder = self
            .request(Method::POST, &self.collection_url(collection))
            .query(&[("documentId", id)])
            .json(&DocumentBody { fields });
        let response = Self::send(builder, &context).await?;
        let response = Self::ensure_success(response, &context).await?;
        Ok(response.json::<Document>().await?)
    }

    /// 按 update mask 局部更新文档
    pub async fn patch_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
        update_mask: &[String],
    ) -> Result<Document> {
        let context = format!("patch {collection}/{id}");
        debug!("Firestore {} ({} fields)", context, update_mask.len());

        let mask: Vec<(&str, &str)> = update_mask
            .iter()
            .map(|path| (UPDATE_MASK_PARAM, path.as_str()))
            .collect();
        let builder = self
            .request(Method::PATCH, &self.document_url(collection, id))
            .query(&mask)
            .json(&DocumentBody { fields });
        let response = Self::send(builder, &context).await?;
        let response = Self::ensure_success(response, &context).await?;
        Ok(response.json::<Document>().await?)
    }

    /// 删除文档，文档不存在时返回 false
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<bool> {
        let context = format!("delete {collection}/{id}");
        debug!("Firestore {}", context);

        let response = Self::send(
            self.request(Method::DELETE, &self.document_url(collection, id)),
            &context,
        )
        .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::ensure_success(response, &context).await?;
        Ok(true)
    }

    /// 执行结构化查询
    pub async fn run_query(&self, query: &StructuredQuery) -> Result<Vec<Document>> {
        let context = format!("runQuery {}", query.collection());
        debug!("Firestore {}", context);

        let builder = self
            .request(Method::POST, &format!("{}:runQuery", self.documents_root()))
            .json(&RunQueryRequest {
                structured_query: query,
            });
        let response = Self::send(builder, &context).await?;
        let response = Self::ensure_success(response, &context).await?;
        let items = response.json::<Vec<RunQueryResponseItem>>().await?;
        Ok(items.into_iter().filter_map(|item| item.document).collect())
    }

    /// 原子提交多个写入
    pub async fn commit(&self, writes: &[Write]) -> Result<()> {
        let context = format!("commit {} writes", writes.len());
        debug!("Firestore {}", context);

        let builder = self
            .request(Method::POST, &format!("{}:commit", self.documents_root()))
            .json(&CommitRequest { writes });
        let response = Self::send(builder, &context).await?;
        Self::ensure_success(response, &context).await?;
        Ok(())
    }

    /// 构造一次整文档更新写入，调用前应已打好时间戳
    pub fn update_write<T: FirestoreDocument>(&self, record: &T) -> Write {
        let fields = record.to_fields();
        let field_paths = fields.field_paths();
        Write {
            update: Some(Document {
                name: Some(self.document_name(T::COLLECTION, record.document_id())),
                fields: Some(fields),
                ..Default::default()
            }),
            update_mask: Some(DocumentMask { field_paths }),
            delete: None,
        }
    }

    pub fn delete_write<T: FirestoreDocument>(&self, id: &str) -> Write {
        Write {
            update: None,
            update_mask: None,
            delete: Some(self.document_name(T::COLLECTION, id)),
        }
    }

    pub async fn get<T: FirestoreDocument>(&self, id: &str) -> Result<Option<T>> {
        let document = self.get_document(T::COLLECTION, id).await?;
        Ok(document.as_ref().and_then(T::from_document))
    }

    pub async fn list<T: FirestoreDocument>(&self) -> Result<Vec<T>> {
        let documents = self.list_documents(T::COLLECTION).await?;
        Ok(documents.iter().filter_map(T::from_document).collect())
    }

    pub async fn create<T: FirestoreDocument>(&self, record: &mut T) -> Result<()> {
        record.stamp_for_create(Utc::now());
        self.create_document(T::COLLECTION, record.document_id(), &record.to_fields())
            .await?;
        Ok(())
    }

    /// 整文档 PATCH，updatedAt 总是刷新为当前时间
    pub async fn update<T: FirestoreDocument>(&self, record: &mut T) -> Result<()> {
        record.stamp_for_update(Utc::now());
        let fields = record.to_fields();
        let mask = fields.field_paths();
        self.patch_document(T::COLLECTION, record.document_id(), &fields, &mask)
            .await?;
        Ok(())
    }

    pub async fn delete<T: FirestoreDocument>(&self, id: &str) -> Result<bool> {
        self.delete_document(T::COLLECTION, id).await
    }

    /// `field == value` 的等值查询，可选单字段排序
    pub async fn query<T: FirestoreDocument>(
        &self,
        field: &str,
        value: Value,
        order: Option<(&str, Direction)>,
    ) -> Result<Vec<T>> {
        let mut query = StructuredQuery::equal(T::COLLECTION, field, value);
        if let Some((order_field, direction)) = order {
            query = query.order_by(order_field, direction);
        }
        let documents = self.run_query(&query).await?;
        Ok(documents.iter().filter_map(T::from_document).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
    use chrono::{DateTime, Utc};
    use serde_json::json;
    use std::collections::HashMap;

    const ROOT: &str = "/v1/projects/demo/databases/testdb/documents";

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        title: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    impl FirestoreDocument for Note {
        const COLLECTION: &'static str = "notes";

        fn document_id(&self) -> &str {
            &self.id
        }

        fn to_fields(&self) -> Fields {
            let mut fields = Fields::new();
            fields
                .string("title", &self.title)
                .timestamp("createdAt", self.created_at)
                .timestamp("updatedAt", self.updated_at);
            fields
        }

        fn from_fields(id: &str, fields: &Fields) -> Self {
            Self {
                id: id.to_string(),
                title: fields.get_string("title").unwrap_or_default(),
                created_at: fields.get_timestamp("createdAt").unwrap_or_default(),
                updated_at: fields.get_timestamp("updatedAt").unwrap_or_default(),
            }
        }

        fn created_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
            Some(&mut self.created_at)
        }

        fn updated_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
            Some(&mut self.updated_at)
        }
    }

    fn note_json(id: &str, title: &str) -> serde_json::Value {
        json!({
            "name": format!("projects/demo/databases/testdb/documents/notes/{id}"),
            "fields": {"title": {"stringValue": title}}
        })
    }

    async fn get_note(path: web::Path<String>) -> HttpResponse {
        if path.as_str() == "n1" {
            HttpResponse::Ok().json(note_json("n1", "hello"))
        } else {
            HttpResponse::NotFound().json(json!({"error": {"code": 404}}))
        }
    }

    async fn list_notes(query: web::Query<HashMap<String, String>>) -> HttpResponse {
        match query.get("pageToken").map(String::as_str) {
            None => HttpResponse::Ok().json(json!({
                "documents": [note_json("n1", "first")],
                "nextPageToken": "page-2"
            })),
            Some("page-2") => HttpResponse::Ok().json(json!({
                "documents": [note_json("n2", "second")]
            })),
            Some(_) => HttpResponse::BadRequest().finish(),
        }
    }

    // 回显请求体；缺少 updatedAt 的 mask 视为错误请求
    async fn patch_note(
        req: HttpRequest,
        path: web::Path<String>,
        body: web::Json<serde_json::Value>,
    ) -> HttpResponse {
        if !req
            .query_string()
            .contains("updateMask.fieldPaths=updatedAt")
        {
            return HttpResponse::BadRequest().finish();
        }
        HttpResponse::Ok().json(json!({
            "name": format!("projects/demo/databases/testdb/documents/notes/{}", path.as_str()),
            "fields": body["fields"].clone()
        }))
    }

    async fn run_query(body: web::Json<serde_json::Value>) -> HttpResponse {
        let field = &body["structuredQuery"]["where"]["fieldFilter"]["field"]["fieldPath"];
        if field != "title" {
            return HttpResponse::BadRequest().finish();
        }
        HttpResponse::Ok().json(json!([
            {"document": note_json("n3", "match"), "readTime": "2024-01-01T00:00:00Z"},
            {"readTime": "2024-01-01T00:00:00Z"}
        ]))
    }

    async fn broken() -> HttpResponse {
        HttpResponse::InternalServerError().body("backend unavailable")
    }

    async fn spawn_fake_firestore() -> FirestoreClient {
        let server = HttpServer::new(|| {
            App::new()
                .route(&format!("{ROOT}/notes"), web::get().to(list_notes))
                .service(
                    web::resource(format!("{ROOT}/notes/{{id}}"))
                        .route(web::get().to(get_note))
                        .route(web::patch().to(patch_note)),
                )
                .route(&format!("{ROOT}:runQuery"), web::post().to(run_query))
                .route(&format!("{ROOT}/broken"), web::get().to(broken))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        let config = FirebaseConfig {
            project_id: "demo".to_string(),
            database_id: "testdb".to_string(),
            api_key: String::new(),
            access_token: String::new(),
            firestore_endpoint: format!("http://{addr}/v1"),
            identity_endpoint: String::new(),
            timeout_secs: 5,
            list_page_size: 1,
        };
        FirestoreClient::new(&config).unwrap()
    }

    #[actix_web::test]
    async fn test_get_returns_none_for_missing_document() {
        let client = spawn_fake_firestore().await;

        let found = client.get::<Note>("n1").await.unwrap().unwrap();
        assert_eq!(found.title, "hello");
        // 缺失的时间戳回退为零值
        assert_eq!(found.created_at, DateTime::<Utc>::default());

        assert!(client.get::<Note>("missing").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_list_follows_page_token() {
        let client = spawn_fake_firestore().await;
        let notes = client.list::<Note>().await.unwrap();
        let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[actix_web::test]
    async fn test_update_stamps_and_masks_updated_at() {
        let client = spawn_fake_firestore().await;
        let mut note = Note {
            id: "n1".to_string(),
            title: "edited".to_string(),
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        };
        client.update(&mut note).await.unwrap();
        assert!(note.updated_at > DateTime::<Utc>::default());
        // 更新不会补写 createdAt
        assert_eq!(note.created_at, DateTime::<Utc>::default());
    }

    #[actix_web::test]
    async fn test_query_skips_read_time_only_items() {
        let client = spawn_fake_firestore().await;
        let notes = client
            .query::<Note>("title", Value::string("match"), None)
            .await
            .unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "n3");
    }

    #[actix_web::test]
    async fn test_server_error_is_typed() {
        let client = spawn_fake_firestore().await;
        let err = client.list_documents("broken").await.unwrap_err();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("backend unavailable"));
    }

    #[test]
    fn test_update_write_uses_full_resource_name() {
        let config = FirebaseConfig {
            project_id: "demo".to_string(),
            database_id: "(default)".to_string(),
            api_key: String::new(),
            access_token: String::new(),
            firestore_endpoint: "http://localhost/v1".to_string(),
            identity_endpoint: String::new(),
            timeout_secs: 5,
            list_page_size: 100,
        };
        let client = FirestoreClient::new(&config).unwrap();
        let note = Note {
            id: "n9".to_string(),
            title: "t".to_string(),
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        };
        let body = serde_json::to_value(client.update_write(&note)).unwrap();
        assert_eq!(
            body["update"]["name"],
            "projects/demo/databases/(default)/documents/notes/n9"
        );
        assert_eq!(
            body["updateMask"]["fieldPaths"],
            json!(["createdAt", "title", "updatedAt"])
        );
        assert!(body.get("delete").is_none());

        let body = serde_json::to_value(client.delete_write::<Note>("n9")).unwrap();
        assert_eq!(
            body,
            json!({"delete": "projects/demo/databases/(default)/documents/notes/n9"})
        );
    }
}
