//! HTTP transport seam.

use std::future::Future;

use reqwest::{
    Client,
    multipart::{Form, Part},
};
use tracing::debug;
use url::Url;

use crate::{
    Result,
    request::{PartValue, SIGNATURE_HEADER, SignedRequest},
};

/// Raw HTTP response: status and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body as text, for diagnostics.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for the HTTP transport executing service requests.
pub trait Transport {
    /// Sends a GET request.
    fn get(&self, url: Url) -> impl Future<Output = Result<HttpResponse>> + Send;
    /// Sends a signed multipart POST request.
    fn post(
        &self,
        url: Url,
        request: SignedRequest,
    ) -> impl Future<Output = Result<HttpResponse>> + Send;
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a custom [`reqwest::Client`].
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        read_response(response).await
    }

    async fn post(&self, url: Url, request: SignedRequest) -> Result<HttpResponse> {
        debug!(%url, parts = request.parts.len(), "POST");
        let response = self
            .client
            .post(url)
            .header(SIGNATURE_HEADER, request.signature.as_str())
            .multipart(into_form(request)?)
            .send()
            .await?;
        read_response(response).await
    }
}

async fn read_response(response: reqwest::Response) -> Result<HttpResponse> {
    let status = response.status().as_u16();
    let body = response.bytes().await?.to_vec();
    Ok(HttpResponse { status, body })
}

fn into_form(request: SignedRequest) -> Result<Form> {
    let mut form = Form::new();
    for part in request.parts {
        form = match part.value {
            PartValue::Text(value) => form.text(part.name, value),
            PartValue::Binary {
                data,
                file_name,
                content_type,
            } => {
                let mut binary = Part::bytes(data);
                if let Some(file_name) = file_name {
                    binary = binary.file_name(file_name);
                }
                if let Some(content_type) = content_type {
                    binary = binary.mime_str(content_type)?;
                }
                form.part(part.name, binary)
            }
        };
    }
    Ok(form)
}
