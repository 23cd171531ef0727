//! Signed multipart requests.
//!
//! A [`SignedRequest`] is the transport-independent form of an authenticated call: the
//! endpoint path, the signature header value and the ordered multipart parts. Raw payloads
//! travel in the parts next to their content hashes; the signature only covers the canonical
//! message built from the text fields.

use zkwasm_core::{
    AddImageRequest, MessageSigner, ProvingRequest, image_registration_message,
    proving_task_message,
};

use crate::Result;

/// Header carrying the hex-encoded request signature.
pub const SIGNATURE_HEADER: &str = "x-eth-signature";

/// Path of the image registration endpoint.
pub const ENDPOINT_SETUP: &str = "/setup";
/// Path of the proving task endpoint.
pub const ENDPOINT_PROVE: &str = "/prove";
/// Path of the image query endpoint.
pub const ENDPOINT_IMAGE: &str = "/image";
/// Path of the image binary query endpoint.
pub const ENDPOINT_IMAGE_BINARY: &str = "/imagebinary";
/// Path of the task query endpoint.
pub const ENDPOINT_TASKS: &str = "/tasks";

/// Content of one multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    /// A plain form field.
    Text(String),
    /// A binary part.
    Binary {
        /// The payload.
        data: Vec<u8>,
        /// File name announced in `Content-Disposition`.
        file_name: Option<String>,
        /// MIME type of the part.
        content_type: Option<&'static str>,
    },
}

/// One named multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    /// Form field name.
    pub name: &'static str,
    /// Field content.
    pub value: PartValue,
}

impl FormPart {
    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: PartValue::Text(value.into()),
        }
    }

    fn binary(name: &'static str, data: Vec<u8>) -> Self {
        Self {
            name,
            value: PartValue::Binary {
                data,
                file_name: None,
                content_type: None,
            },
        }
    }
}

/// An authenticated multipart request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Endpoint path, appended to the service endpoint.
    pub path: &'static str,
    /// Value of the [`SIGNATURE_HEADER`] header.
    pub signature: String,
    /// Parts in the order they are written.
    pub parts: Vec<FormPart>,
}

impl SignedRequest {
    /// Signs an image registration and lays out its form.
    ///
    /// Registrations are signed with the legacy recovery byte.
    pub fn add_image(request: AddImageRequest, signer: &MessageSigner) -> Result<Self> {
        let signature = signer.sign_hex(&image_registration_message(&request), true)?;
        Ok(Self::assemble_image(request, signature))
    }

    /// Signs a proving task and lays out its form.
    pub fn add_proving_task(request: ProvingRequest, signer: &MessageSigner) -> Result<Self> {
        let signature = signer.sign_hex(&proving_task_message(&request), false)?;
        Ok(Self::assemble_proving_task(request, signature))
    }

    /// Lays out an image registration form under an already computed `signature`.
    pub fn assemble_image(request: AddImageRequest, signature: String) -> Self {
        let AddImageRequest {
            name,
            image,
            user_address,
            description_url,
            avatar_url,
            circuit_size,
            metadata_keys,
            metadata_vals,
            initial_context,
        } = request;

        let mut parts = vec![
            FormPart::text("name", name.clone()),
            FormPart {
                name: "image",
                value: PartValue::Binary {
                    data: image.data,
                    file_name: Some(name),
                    content_type: Some("application/wasm"),
                },
            },
            FormPart::text("image_md5", image.md5),
            FormPart::text("user_address", user_address),
            FormPart::text("description_url", description_url),
            FormPart::text("avator_url", avatar_url),
            FormPart::text("circuit_size", circuit_size.to_string()),
        ];
        parts.extend(
            metadata_keys
                .into_iter()
                .map(|key| FormPart::text("metadata_keys", key)),
        );
        parts.extend(
            metadata_vals
                .into_iter()
                .map(|val| FormPart::text("metadata_vals", val)),
        );
        if let Some(context) = initial_context {
            parts.push(FormPart::binary("initial_context", context.data));
            parts.push(FormPart::text("initial_context_md5", context.md5));
        }

        Self {
            path: ENDPOINT_SETUP,
            signature,
            parts,
        }
    }

    /// Lays out a proving task form under an already computed `signature`.
    pub fn assemble_proving_task(request: ProvingRequest, signature: String) -> Self {
        let mut parts = vec![
            FormPart::text("user_address", request.user_address),
            FormPart::text("md5", request.md5),
        ];
        parts.extend(
            request
                .public_inputs
                .into_iter()
                .map(|input| FormPart::text("public_inputs", input)),
        );
        parts.extend(
            request
                .private_inputs
                .into_iter()
                .map(|input| FormPart::text("private_inputs", input)),
        );
        if let Some(context_type) = request.input_context_type {
            parts.push(FormPart::text("input_context_type", context_type.to_string()));
        }
        if let Some(context) = request.input_context {
            parts.push(FormPart::text("input_context_md5", context.md5));
            parts.push(FormPart::binary("input_context", context.data));
        }

        Self {
            path: ENDPOINT_PROVE,
            signature,
            parts,
        }
    }

    /// Text value of the first part called `name`.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::Text(value) if part.name == name => Some(value.as_str()),
            _ => None,
        })
    }
}
