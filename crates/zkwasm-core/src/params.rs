//! Request parameters and their prepared, hash-complete forms.
//!
//! Parameters supplied by the caller are turned into requests by `prepare`, which computes the
//! content hashes and fills service defaults. Only prepared requests can be turned into a
//! canonical message, so a message can never be built before its hashes exist.

use zkwasm_types::{
    IMAGE_CIRCUIT_SIZE_DEFAULT, IMAGE_METADATA_KEY_PROVE_PAYMENT_SRC, InputContextType,
    ProvePaymentSrc,
};

use crate::{
    error::Result,
    hash::content_md5,
    input::{InputValue, encode_values},
};

/// A binary payload together with its content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPayload {
    /// The raw payload.
    pub data: Vec<u8>,
    /// Lower-case hex MD5 of `data`.
    pub md5: String,
}

impl HashedPayload {
    /// Hashes `data`.
    pub fn new(data: Vec<u8>) -> Self {
        let md5 = content_md5(&data);
        Self { data, md5 }
    }
}

/// Parameters for registering a new WASM image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddImageParams {
    /// Image name, also used as the upload file name.
    pub name: String,
    /// The WASM binary.
    pub image: Vec<u8>,
    /// Link to a description of the image.
    pub description_url: String,
    /// Link to the image avatar.
    pub avatar_url: String,
    /// Circuit size. Zero selects [`IMAGE_CIRCUIT_SIZE_DEFAULT`].
    pub circuit_size: i64,
    /// Metadata keys, paired by position with `metadata_vals`.
    pub metadata_keys: Vec<String>,
    /// Metadata values.
    pub metadata_vals: Vec<String>,
    /// Context the image starts with. An empty context is treated as absent.
    pub initial_context: Option<Vec<u8>>,
}

/// An image registration ready to be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddImageRequest {
    /// Image name.
    pub name: String,
    /// The WASM binary and its hash.
    pub image: HashedPayload,
    /// Lower-cased address of the registering account.
    pub user_address: String,
    /// Link to a description of the image.
    pub description_url: String,
    /// Link to the image avatar.
    pub avatar_url: String,
    /// Circuit size.
    pub circuit_size: i64,
    /// Metadata keys.
    pub metadata_keys: Vec<String>,
    /// Metadata values.
    pub metadata_vals: Vec<String>,
    /// Initial context and its hash, if any.
    pub initial_context: Option<HashedPayload>,
}

impl AddImageParams {
    /// Computes content hashes and fills defaults for a registration by `user_address`.
    pub fn prepare(self, user_address: &str) -> AddImageRequest {
        let AddImageParams {
            name,
            image,
            description_url,
            avatar_url,
            circuit_size,
            mut metadata_keys,
            mut metadata_vals,
            initial_context,
        } = self;

        if !metadata_keys
            .iter()
            .any(|key| key == IMAGE_METADATA_KEY_PROVE_PAYMENT_SRC)
        {
            metadata_keys.push(IMAGE_METADATA_KEY_PROVE_PAYMENT_SRC.to_string());
            metadata_vals.push(ProvePaymentSrc::Default.to_string());
        }

        AddImageRequest {
            name,
            image: HashedPayload::new(image),
            user_address: user_address.to_lowercase(),
            description_url,
            avatar_url,
            circuit_size: if circuit_size == 0 {
                IMAGE_CIRCUIT_SIZE_DEFAULT
            } else {
                circuit_size
            },
            metadata_keys,
            metadata_vals,
            initial_context: initial_context
                .filter(|context| !context.is_empty())
                .map(HashedPayload::new),
        }
    }
}

/// Parameters for submitting a proving task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvingParams {
    /// MD5 of the image to run.
    pub md5: String,
    /// Public inputs in `value:tag` form.
    pub public_inputs: Vec<String>,
    /// Private inputs in `value:tag` form.
    pub private_inputs: Vec<String>,
    /// Where the task context comes from. `None` leaves it to the service.
    pub input_context_type: Option<InputContextType>,
    /// Context uploaded with the task.
    pub input_context: Option<Vec<u8>>,
}

impl ProvingParams {
    /// Builds parameters for image `md5` from typed inputs.
    pub fn from_values(
        md5: impl Into<String>,
        public_inputs: &[InputValue],
        private_inputs: &[InputValue],
    ) -> Result<Self> {
        Ok(Self {
            md5: md5.into(),
            public_inputs: encode_values(public_inputs)?,
            private_inputs: encode_values(private_inputs)?,
            ..Default::default()
        })
    }

    /// Computes the input context hash for a submission by `user_address`.
    pub fn prepare(self, user_address: &str) -> ProvingRequest {
        ProvingRequest {
            user_address: user_address.to_string(),
            md5: self.md5,
            public_inputs: self.public_inputs,
            private_inputs: self.private_inputs,
            input_context_type: self.input_context_type,
            input_context: self.input_context.map(HashedPayload::new),
        }
    }
}

/// A proving task ready to be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvingRequest {
    /// Address of the submitting account, as sent to the service.
    pub user_address: String,
    /// MD5 of the image to run.
    pub md5: String,
    /// Public inputs.
    pub public_inputs: Vec<String>,
    /// Private inputs.
    pub private_inputs: Vec<String>,
    /// Source of the task context.
    pub input_context_type: Option<InputContextType>,
    /// Uploaded context and its hash, if any.
    pub input_context: Option<HashedPayload>,
}
