//! Wire transports for [`HttpClient`]
//!
//! - [`FetchTransport`]: browser `fetch` through `gloo-net`
//! - [`ReqwestTransport`]: native HTTP through `reqwest`, used by the server
//!   build and the integration tests
//!
//! [`HttpClient`]: crate::core::http::HttpClient

#[cfg(feature = "ssr")]
pub use native::ReqwestTransport;

#[cfg(not(feature = "ssr"))]
pub use browser::FetchTransport;

/// Transport used by the current build
#[cfg(feature = "ssr")]
pub type DefaultTransport = ReqwestTransport;

/// Transport used by the current build
#[cfg(not(feature = "ssr"))]
pub type DefaultTransport = FetchTransport;

#[cfg(feature = "ssr")]
mod native {
    use reqwest::multipart::{Form, Part};

    use crate::core::config::Config;
    use crate::core::http::{ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportError};

    /// `reqwest`-backed transport
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(config: &Config) -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()
                .map_err(|e| TransportError::Build(e.to_string()))?;
            Ok(Self { client })
        }

        /// Wrap an already configured client
        pub fn from_client(client: reqwest::Client) -> Self {
            Self { client }
        }

        fn method(method: Method) -> reqwest::Method {
            match method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Delete => reqwest::Method::DELETE,
            }
        }
    }

    impl Transport for ReqwestTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            let mut builder = self
                .client
                .request(Self::method(request.method), &request.url);

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            builder = match request.body {
                RequestBody::Empty => builder,
                RequestBody::Json(value) => builder.json(&value),
                RequestBody::Multipart(form) => {
                    let mut multipart = Form::new();
                    for (name, value) in form.fields {
                        multipart = multipart.text(name, value);
                    }
                    if let Some((name, upload)) = form.file {
                        let part = Part::bytes(upload.bytes)
                            .file_name(upload.file_name)
                            .mime_str(&upload.content_type)
                            .map_err(|e| TransportError::Build(e.to_string()))?;
                        multipart = multipart.part(name, part);
                    }
                    builder.multipart(multipart)
                }
            };

            let response = builder
                .send()
                .await
                .map_err(|e| TransportError::Unreachable(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Unreachable(e.to_string()))?;

            Ok(ApiResponse::new(status, body))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::core::http::MultipartForm;
        use crate::core::models::ImageUpload;
        use mockito::{Matcher, Server};

        fn transport() -> ReqwestTransport {
            ReqwestTransport::new(&Config::default()).unwrap()
        }

        #[tokio::test]
        async fn test_get_forwards_headers() {
            let mut server = Server::new_async().await;
            let m = server
                .mock("GET", "/api/articles")
                .match_header("authorization", "Bearer t1")
                .with_status(200)
                .with_body("[]")
                .create_async()
                .await;

            let mut request = ApiRequest::new(Method::Get, format!("{}/api/articles", server.url()));
            request
                .headers
                .push(("Authorization".to_string(), "Bearer t1".to_string()));

            let response = transport().send(request).await.unwrap();

            m.assert_async().await;
            assert_eq!(response.status, 200);
            assert_eq!(response.body, "[]");
        }

        #[tokio::test]
        async fn test_post_json_body() {
            let mut server = Server::new_async().await;
            let m = server
                .mock("POST", "/api/auth/login")
                .match_header("content-type", "application/json")
                .match_body(Matcher::Json(serde_json::json!({
                    "email": "a@b.com",
                    "password": "secret"
                })))
                .with_status(200)
                .with_body(r#"{"user":{"id":1,"name":"A"},"token":"t1"}"#)
                .create_async()
                .await;

            let mut request =
                ApiRequest::new(Method::Post, format!("{}/api/auth/login", server.url()));
            request.body = RequestBody::Json(serde_json::json!({
                "email": "a@b.com",
                "password": "secret"
            }));

            let response = transport().send(request).await.unwrap();

            m.assert_async().await;
            assert!(response.is_success());
        }

        #[tokio::test]
        async fn test_multipart_body() {
            let mut server = Server::new_async().await;
            let m = server
                .mock("POST", "/api/articles")
                .match_header(
                    "content-type",
                    Matcher::Regex("^multipart/form-data; boundary=".to_string()),
                )
                .match_body(Matcher::AllOf(vec![
                    Matcher::Regex(r#"name="title""#.to_string()),
                    Matcher::Regex("Hello".to_string()),
                    Matcher::Regex(r#"filename="cover.png""#.to_string()),
                ]))
                .with_status(201)
                .with_body("{}")
                .create_async()
                .await;

            let mut request = ApiRequest::new(Method::Post, format!("{}/api/articles", server.url()));
            request.body = RequestBody::Multipart(
                MultipartForm::new()
                    .text("title", "Hello")
                    .text("content", "World")
                    .file(
                        "image",
                        ImageUpload {
                            file_name: "cover.png".to_string(),
                            content_type: "image/png".to_string(),
                            bytes: vec![1, 2, 3],
                        },
                    ),
            );

            let response = transport().send(request).await.unwrap();

            m.assert_async().await;
            assert_eq!(response.status, 201);
        }

        #[tokio::test]
        async fn test_error_status_is_a_response() {
            let mut server = Server::new_async().await;
            server
                .mock("DELETE", "/api/articles/3")
                .with_status(403)
                .with_body(r#"{"message":"forbidden"}"#)
                .create_async()
                .await;

            let request = ApiRequest::new(Method::Delete, format!("{}/api/articles/3", server.url()));
            let response = transport().send(request).await.unwrap();

            assert_eq!(response.status, 403);
            assert!(response.body.contains("forbidden"));
        }

        #[tokio::test]
        async fn test_unreachable_host() {
            let request = ApiRequest::new(Method::Get, "http://127.0.0.1:1/api/articles");

            let result = transport().send(request).await;

            assert!(matches!(result, Err(TransportError::Unreachable(_))));
        }

        #[tokio::test]
        async fn test_invalid_mime_type_fails_to_build() {
            let mut request = ApiRequest::new(Method::Post, "http://127.0.0.1:1/api/articles");
            request.body = RequestBody::Multipart(MultipartForm::new().file(
                "image",
                ImageUpload {
                    file_name: "x".to_string(),
                    content_type: "not a mime".to_string(),
                    bytes: vec![],
                },
            ));

            let result = transport().send(request).await;

            assert!(matches!(result, Err(TransportError::Build(_))));
        }
    }
}

#[cfg(not(feature = "ssr"))]
mod browser {
    use gloo_net::http::{Request, RequestBuilder};
    use wasm_bindgen::JsValue;

    use crate::core::http::{ApiRequest, ApiResponse, Method, MultipartForm, RequestBody, Transport, TransportError};

    /// `fetch`-backed transport
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FetchTransport;

    impl FetchTransport {
        pub fn new() -> Self {
            Self
        }

        fn builder(method: Method, url: &str) -> RequestBuilder {
            match method {
                Method::Get => Request::get(url),
                Method::Post => Request::post(url),
                Method::Put => Request::put(url),
                Method::Delete => Request::delete(url),
            }
        }

        fn form_data(form: MultipartForm) -> Result<web_sys::FormData, JsValue> {
            let data = web_sys::FormData::new()?;
            for (name, value) in &form.fields {
                data.append_with_str(name, value)?;
            }
            if let Some((name, upload)) = form.file {
                let parts = js_sys::Array::new();
                parts.push(&js_sys::Uint8Array::from(upload.bytes.as_slice()));
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(&upload.content_type);
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
                data.append_with_blob_and_filename(&name, &blob, &upload.file_name)?;
            }
            Ok(data)
        }
    }

    impl Transport for FetchTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            let mut builder = Self::builder(request.method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let built = match request.body {
                RequestBody::Empty => builder.build(),
                RequestBody::Json(value) => builder.json(&value),
                RequestBody::Multipart(form) => {
                    let data = Self::form_data(form)
                        .map_err(|e| TransportError::Build(format!("{:?}", e)))?;
                    builder.body(data)
                }
            }
            .map_err(|e| TransportError::Build(e.to_string()))?;

            let response = built
                .send()
                .await
                .map_err(|e| TransportError::Unreachable(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Unreachable(e.to_string()))?;

            Ok(ApiResponse::new(status, body))
        }
    }
}
