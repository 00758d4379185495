//! Request Extractors
//!
//! 章节内容既可以以 JSON 提交，也可以以 multipart 表单提交（附带图片 / 视频文件）；
//! 章节 / 练习的请求体走 `LenientJson`，非 JSON 或空请求体按全部字段缺省处理

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
};
use serde::de::DeserializeOwned;

use super::dto::AddContentRequest;
use super::error::ApiError;

fn content_type(req: &Request) -> String {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn body_rejection(e: BytesRejection) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(e.body_text())
    }
}

/// 读取 JSON 请求体；非 JSON 或空请求体得到 `T::default()`
async fn read_json_or_default<T, S>(req: Request, state: &S) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    if !content_type(&req).starts_with("application/json") {
        return Ok(T::default());
    }

    let body = Bytes::from_request(req, state)
        .await
        .map_err(body_rejection)?;
    if body.is_empty() {
        return Ok(T::default());
    }

    serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))
}

/// 宽松的 JSON 提取器
///
/// 缺失字段由 `T` 的 serde 默认值补齐，拒绝统一映射为 `ApiError`
#[derive(Debug)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        read_json_or_default(req, state).await.map(Self)
    }
}

/// 上传的文件部分
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub content_type: String,
    pub file_name: Option<String>,
    pub data: Bytes,
}

/// 章节内容表单
#[derive(Debug, Default)]
pub struct ContentForm {
    pub fields: AddContentRequest,
    pub image: Option<UploadedFile>,
    pub video: Option<UploadedFile>,
}

impl ContentForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = ContentForm::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
        })? {
            let field_name = field.name().unwrap_or_default().to_string();

            // 带文件名的部分视为文件，其余视为文本字段
            if let Some(file_name) = field.file_name().map(|s| s.to_string()) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read file {}: {}", field_name, e))
                })?;
                let upload = UploadedFile {
                    content_type,
                    file_name: Some(file_name),
                    data,
                };

                match field_name.as_str() {
                    "image" => form.image = Some(upload),
                    "video" => form.video = Some(upload),
                    _ => {
                        tracing::debug!(field = %field_name, "Ignoring unexpected file part");
                    }
                }
                continue;
            }

            let value = field.text().await.map_err(|e| {
                ApiError::BadRequest(format!("Failed to read {}: {}", field_name, e))
            })?;
            match field_name.as_str() {
                "text" => form.fields.text = value,
                "img" => form.fields.img = value,
                "video" => form.fields.video = value,
                _ => {}
            }
        }

        Ok(form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for ContentForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if content_type(&req).starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        let fields = read_json_or_default(req, state).await?;
        Ok(Self {
            fields,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    #[tokio::test]
    async fn test_json_form() {
        let req = HttpRequest::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text":"intro","img":"a.png"}"#))
            .unwrap();

        let form = ContentForm::from_request(req, &()).await.unwrap();
        assert_eq!(form.fields.text, "intro");
        assert_eq!(form.fields.img, "a.png");
        assert_eq!(form.fields.video, "");
        assert!(form.image.is_none());
    }

    #[tokio::test]
    async fn test_multipart_form_with_file() {
        let boundary = "X-BOUNDARY";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"text\"\r\n\r\nintro\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"a.png\"\r\n\
             Content-Type: image/png\r\n\r\npngbytes\r\n--{b}--\r\n",
            b = boundary
        );
        let req = HttpRequest::builder()
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();

        let form = ContentForm::from_request(req, &()).await.unwrap();
        assert_eq!(form.fields.text, "intro");
        let image = form.image.unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.file_name.as_deref(), Some("a.png"));
        assert_eq!(&image.data[..], b"pngbytes");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let req = HttpRequest::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let result = ContentForm::from_request(req, &()).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[derive(Debug, Default, serde::Deserialize)]
    struct Named {
        #[serde(default)]
        name: String,
        #[serde(default)]
        tags: Vec<String>,
    }

    #[tokio::test]
    async fn test_lenient_json_without_content_type_is_default() {
        let req = HttpRequest::builder()
            .body(Body::from("name=Chapter+1"))
            .unwrap();

        let LenientJson(named) = LenientJson::<Named>::from_request(req, &()).await.unwrap();
        assert_eq!(named.name, "");
        assert!(named.tags.is_empty());
    }

    #[tokio::test]
    async fn test_lenient_json_fills_missing_fields() {
        let req = HttpRequest::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Chapter 1"}"#))
            .unwrap();

        let LenientJson(named) = LenientJson::<Named>::from_request(req, &()).await.unwrap();
        assert_eq!(named.name, "Chapter 1");
        assert!(named.tags.is_empty());
    }

    #[tokio::test]
    async fn test_lenient_json_wrong_type_is_bad_request() {
        let req = HttpRequest::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"tags":"not-a-list"}"#))
            .unwrap();

        let result = LenientJson::<Named>::from_request(req, &()).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
