//! Service client: signed image and task submission, image and task queries.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{info, warn};
use url::Url;
use zkwasm_core::{AddImageParams, Address, MessageSigner, ProvingParams};
use zkwasm_types::{
    AddImageResult, Image, ImageBinary, PaginationResult, ProvingResult, Response, Task, TaskQuery,
};

use crate::{
    Error, Result,
    request::{ENDPOINT_IMAGE, ENDPOINT_IMAGE_BINARY, ENDPOINT_TASKS, SignedRequest},
    transport::{HttpResponse, ReqwestTransport, Transport},
};

/// HTTP client for a zkWasm proving service.
///
/// Registers images, submits proving tasks and queries images and tasks. Mutating requests
/// are signed with the account key held by the client; a client built without a key can only
/// query.
#[derive(Clone, Debug)]
pub struct ZkWasmClient<T = ReqwestTransport> {
    endpoint: String,
    signer: Option<Arc<MessageSigner>>,
    transport: T,
}

impl ZkWasmClient {
    /// Creates a client for `endpoint`, signing with the hex-encoded `private_key`.
    pub fn new(endpoint: &str, private_key: &str) -> Result<Self> {
        Self::with_transport(
            endpoint,
            MessageSigner::from_hex(private_key)?,
            ReqwestTransport::default(),
        )
    }

    /// Creates a query-only client for `endpoint`.
    pub fn read_only(endpoint: &str) -> Result<Self> {
        Self::read_only_with_transport(endpoint, ReqwestTransport::default())
    }
}

impl<T: Transport> ZkWasmClient<T> {
    /// Creates a client over a custom [`Transport`].
    pub fn with_transport(endpoint: &str, signer: MessageSigner, transport: T) -> Result<Self> {
        Self::build(endpoint, Some(Arc::new(signer)), transport)
    }

    /// Creates a query-only client over a custom [`Transport`].
    pub fn read_only_with_transport(endpoint: &str, transport: T) -> Result<Self> {
        Self::build(endpoint, None, transport)
    }

    fn build(endpoint: &str, signer: Option<Arc<MessageSigner>>, transport: T) -> Result<Self> {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        Url::parse(&endpoint)?;
        Ok(Self {
            endpoint,
            signer,
            transport,
        })
    }

    /// Address of the signing account, if the client holds a key.
    pub fn user_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|signer| signer.address())
    }

    fn signer(&self) -> Result<&MessageSigner> {
        self.signer.as_deref().ok_or(Error::MissingSigner)
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{path}", self.endpoint))?)
    }

    /// Registers a new WASM image and returns the setup task id.
    pub async fn add_image(&self, params: AddImageParams) -> Result<String> {
        let signer = self.signer()?;
        let request = params.prepare(&user_address_field(signer));
        let md5 = request.image.md5.clone();
        let signed = SignedRequest::add_image(request, signer)?;

        let response = self
            .transport
            .post(self.url(signed.path)?, signed)
            .await?;
        let result: AddImageResult = expect_result(response)?;

        info!(id = %result.id, %md5, "image registered");
        Ok(result.id)
    }

    /// Submits a proving task and returns its id.
    pub async fn add_proving_task(&self, params: ProvingParams) -> Result<String> {
        let signer = self.signer()?;
        let request = params.prepare(&user_address_field(signer));
        let signed = SignedRequest::add_proving_task(request, signer)?;

        let response = self
            .transport
            .post(self.url(signed.path)?, signed)
            .await?;
        let result: ProvingResult = expect_result(response)?;

        info!(id = %result.id, md5 = %result.md5, "proving task submitted");
        Ok(result.id)
    }

    /// Looks up an image by the MD5 of its binary.
    pub async fn query_image(&self, md5: &str) -> Result<Option<Image>> {
        let mut url = self.url(ENDPOINT_IMAGE)?;
        url.query_pairs_mut().append_pair("md5", md5);

        let response = self.transport.get(url).await?;
        let images: Option<Vec<Image>> = parse_envelope(&response)?;
        Ok(images.and_then(|images| images.into_iter().next()))
    }

    /// Downloads the binary of an image.
    pub async fn query_image_binary(&self, md5: &str) -> Result<Vec<u8>> {
        let mut url = self.url(ENDPOINT_IMAGE_BINARY)?;
        url.query_pairs_mut().append_pair("md5", md5);

        let response = self.transport.get(url).await?;
        let binary: Option<ImageBinary> = parse_envelope(&response)?;
        Ok(binary.map(|binary| binary.0).unwrap_or_default())
    }

    /// Loads one page of tasks matching `query`.
    pub async fn load_tasks(&self, query: &TaskQuery) -> Result<PaginationResult<Task>> {
        let mut url = self.url(ENDPOINT_TASKS)?;
        let pairs = query.to_query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let response = self.transport.get(url).await?;
        expect_result(response)
    }
}

/// Lower-cased hex address, as sent in request fields.
fn user_address_field(signer: &MessageSigner) -> String {
    signer.address().to_string().to_lowercase()
}

/// Parses the envelope of a query response. Only the `success` flag is checked.
fn parse_envelope<R: DeserializeOwned>(response: &HttpResponse) -> Result<Option<R>> {
    let envelope: Response<R> = serde_json::from_slice(&response.body)?;
    if !envelope.success {
        return Err(rejected(response));
    }
    Ok(envelope.result)
}

/// Requires `200 OK`, a successful envelope and a present result.
fn expect_result<R: DeserializeOwned>(response: HttpResponse) -> Result<R> {
    if !response.is_ok() {
        return Err(rejected(&response));
    }
    parse_envelope(&response)?.ok_or_else(|| rejected(&response))
}

fn rejected(response: &HttpResponse) -> Error {
    let body = response.text();
    warn!(status = response.status, %body, "request rejected");
    Error::Rejected(body)
}
