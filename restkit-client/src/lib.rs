mod descriptor;
mod error;
mod hooks;
mod template;

use std::{fmt::Debug, sync::Arc};

use axum::async_trait;
use axum::body::Body;
use http_body_util::BodyExt;
use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tower::{Service, ServiceExt};
use url::Url;

pub use descriptor::*;
pub use error::*;
pub use hooks::*;

use crate::error::{ProblemBody, Result};

#[async_trait]
trait HttpClient: Debug {
    fn request_builder(&self, method: Method, url: Url) -> RequestBuilder;
    async fn send(&self, req: RequestBuilder) -> reqwest::Result<Response>;
}

/// Client for a single REST resource, identified by a URL path template.
///
/// Cheap to clone; all clones share the transport, descriptor and hooks.
/// Any number of calls may be in flight at once, each producing its own
/// independent result.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    client_ref: Arc<ClientRef>,
}

struct ClientRef {
    client: Box<dyn HttpClient + Send + Sync>,
    prefix: Url,
    descriptor: ResourceDescriptor,
    hooks: Arc<dyn Hooks>,
}

impl Debug for ClientRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(std::any::type_name::<Self>())
            .field("prefix", &self.prefix)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl ClientRef {
    /// Single entry point for every operation: on failure, exactly one hook
    /// fires before the error reaches the caller.
    async fn dispatch(
        &self,
        method: Method,
        template: &str,
        params: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        match self.send_request(method, template, params, body).await {
            Ok(value) => Ok(value),
            Err(err) => Err(self.report(err)),
        }
    }

    async fn send_request(
        &self,
        method: Method,
        template: &str,
        params: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        let (path, query) = template::fill_url_params(template, params)?;
        let url = self.prefix.join(&path)?;
        tracing::debug!(%method, %url, "sending resource request");

        let mut request = self
            .client
            .request_builder(method, url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let timeout = self.descriptor.timeout;
        let res = match tokio::time::timeout(timeout, self.client.send(request)).await {
            Err(_) => return Err(Error::Timeout(timeout)),
            Ok(res) => res?,
        };

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            // prefer the server's message field over the bare status line
            let message = match res.json::<ProblemBody>().await {
                Ok(ProblemBody {
                    message: Some(message),
                }) => message,
                _ => status.to_string(),
            };
            return Err(Error::Problem { status, message });
        }

        // a success body that is not valid JSON downgrades to a null result
        Ok(res.json().await.ok())
    }

    fn report(&self, err: Error) -> Error {
        match &err {
            Error::Unauthorized => self.hooks.handle_unauthorized(),
            other => self.hooks.show_error_message(&other.message()),
        }
        err
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.descriptor.path, id)
    }

    fn to_body<S: Serialize>(&self, body: &S) -> Result<Value> {
        serde_json::to_value(body).map_err(|err| self.report(Error::Serde(err)))
    }
}

impl ResourceClient {
    /// Create a new client for a resource served under the given URL prefix.
    ///
    /// `hooks` default to [`TracingHooks`] when `None`.
    pub fn with_url(
        prefix: Url,
        descriptor: ResourceDescriptor,
        hooks: Option<Arc<dyn Hooks>>,
    ) -> Self {
        let client = reqwest::Client::new();
        Self::with_reqwest(prefix, client, descriptor, hooks)
    }

    /// Create a new client, but use the specific reqwest client instead of
    /// the default one. This allows you to configure proxy settings,
    /// connection pools, etc.
    pub fn with_reqwest(
        prefix: Url,
        client: reqwest::Client,
        descriptor: ResourceDescriptor,
        hooks: Option<Arc<dyn Hooks>>,
    ) -> Self {
        Self::new(ClientRef {
            client: Box::new(ReqwestTransport { client }),
            prefix,
            descriptor,
            hooks: hooks.unwrap_or_else(|| Arc::new(TracingHooks)),
        })
    }

    fn new(client_ref: ClientRef) -> Self {
        ResourceClient {
            client_ref: Arc::new(client_ref),
        }
    }

    /// The resource's URL path template.
    pub fn path(&self) -> &str {
        &self.client_ref.descriptor.path
    }

    /// GET the resource collection.
    pub async fn query(&self, params: &[(&str, &str)]) -> Result<Option<Value>> {
        self.client_ref
            .dispatch(Method::GET, &self.client_ref.descriptor.path, params, None)
            .await
    }

    /// GET a single item by id.
    pub async fn query_by_id(&self, id: &str, params: &[(&str, &str)]) -> Result<Option<Value>> {
        let path = self.client_ref.item_path(id);
        self.client_ref
            .dispatch(Method::GET, &path, params, None)
            .await
    }

    /// POST a new item. The body is sent as JSON; no query parameters.
    pub async fn create<S: Serialize + Sync>(&self, body: &S) -> Result<Option<Value>> {
        self.create_with_params(&[], body).await
    }

    /// POST a new item with both query parameters and a JSON body.
    pub async fn create_with_params<S>(
        &self,
        params: &[(&str, &str)],
        body: &S,
    ) -> Result<Option<Value>>
    where
        S: Serialize + Sync,
    {
        let body = self.client_ref.to_body(body)?;
        self.client_ref
            .dispatch(
                Method::POST,
                &self.client_ref.descriptor.path,
                params,
                Some(body),
            )
            .await
    }

    /// PUT an updated item by id; no query parameters.
    pub async fn update_by_id<S: Serialize + Sync>(
        &self,
        id: &str,
        body: &S,
    ) -> Result<Option<Value>> {
        self.update_by_id_with_params(id, &[], body).await
    }

    /// PUT an updated item by id with both query parameters and a JSON body.
    pub async fn update_by_id_with_params<S>(
        &self,
        id: &str,
        params: &[(&str, &str)],
        body: &S,
    ) -> Result<Option<Value>>
    where
        S: Serialize + Sync,
    {
        let body = self.client_ref.to_body(body)?;
        let path = self.client_ref.item_path(id);
        self.client_ref
            .dispatch(Method::PUT, &path, params, Some(body))
            .await
    }

    /// DELETE an item by id.
    pub async fn delete_by_id(&self, id: &str, params: &[(&str, &str)]) -> Result<Option<Value>> {
        let path = self.client_ref.item_path(id);
        self.client_ref
            .dispatch(Method::DELETE, &path, params, None)
            .await
    }

    /// Invoke a custom action registered on the descriptor.
    ///
    /// The action's own URL template goes through the same pipeline as the
    /// built-in operations; the resource's base template is never touched,
    /// so concurrent calls cannot observe a swapped-out URL.
    pub async fn invoke_action(
        &self,
        name: &str,
        params: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        let Some(action) = self.client_ref.descriptor.actions.get(name) else {
            return Err(self
                .client_ref
                .report(Error::UnknownAction(name.to_string())));
        };
        self.client_ref
            .dispatch(action.method.clone(), &action.url, params, body.cloned())
            .await
    }
}

#[derive(Debug)]
struct ReqwestTransport {
    client: reqwest::Client,
}

#[async_trait]
impl HttpClient for ReqwestTransport {
    fn request_builder(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    async fn send(&self, req: RequestBuilder) -> reqwest::Result<Response> {
        req.send().await
    }
}

/// In-memory transport backed by an axum router, for tests.
#[derive(Debug)]
pub struct MockTransport {
    router: Arc<tokio::sync::Mutex<axum::Router>>,
}

impl MockTransport {
    pub fn new(router: axum::Router) -> Self {
        MockTransport {
            router: Arc::new(tokio::sync::Mutex::new(router)),
        }
    }

    pub fn into_client(
        self,
        descriptor: ResourceDescriptor,
        hooks: Option<Arc<dyn Hooks>>,
    ) -> ResourceClient {
        ResourceClient::new(ClientRef {
            client: Box::new(self),
            prefix: Url::parse("https://example.com/").unwrap(),
            descriptor,
            hooks: hooks.unwrap_or_else(|| Arc::new(TracingHooks)),
        })
    }
}

#[async_trait]
impl HttpClient for MockTransport {
    fn request_builder(&self, method: Method, url: Url) -> RequestBuilder {
        reqwest::Client::new().request(method, url)
    }

    async fn send(&self, req: RequestBuilder) -> reqwest::Result<Response> {
        let request = axum::http::Request::try_from(req.build().unwrap()).unwrap();

        let response =
            ServiceExt::<axum::http::Request<Body>>::ready(&mut *self.router.lock().await)
                .await
                .unwrap()
                .call(request)
                .await
                .unwrap();

        let (parts, body) = response.into_parts();
        let body = body.collect().await.unwrap().to_bytes();
        let body = reqwest::Body::from(body);
        let response = axum::http::Response::from_parts(parts, body);

        Ok(response.into())
    }
}
