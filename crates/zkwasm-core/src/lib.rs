//! Encoding and authentication core of the zkWasm service client.
//!
//! This crate holds the pure, synchronous parts of talking to a zkWasm proving service:
//!
//! - [`chunk`] - split byte buffers into 32-byte field elements for the on-chain verifier
//! - [`input`] - encode typed program inputs into `value:tag` tokens and decode them back
//! - [`params`] - request parameters, and their prepared form with content hashes filled in
//! - [`message`] - canonical messages signed to authenticate each request kind
//! - [`signer`] - personal-message signatures over those messages
//!
//! Nothing here performs I/O; every function can be called concurrently.
//!
//! ## Example
//!
//! ```
//! use zkwasm_core::{InputValue, MessageSigner, ProvingParams, proving_task_message};
//!
//! # fn example() -> zkwasm_core::Result<()> {
//! let signer = MessageSigner::from_hex(
//!     "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
//! )?;
//! let user_address = signer.address().to_string().to_lowercase();
//!
//! let request = ProvingParams::from_values("fbe1add84935782493030ff335475d81", &[InputValue::I64(1)], &[])?
//!     .prepare(&user_address);
//! let signature = signer.sign_hex(&proving_task_message(&request), false)?;
//! assert_eq!(signature.len(), 2 + 2 * 65);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod chunk;
pub mod error;
pub mod hash;
pub mod input;
pub mod message;
pub mod params;
pub mod signer;

pub use chunk::{FIELD_ELEMENT_BYTES, chunk_to_field_elements};
pub use error::{Error, Result};
pub use hash::content_md5;
pub use input::{InputTag, InputValue, decode_tokens, encode_values};
pub use message::{image_registration_message, proving_task_message};
pub use params::{AddImageParams, AddImageRequest, HashedPayload, ProvingParams, ProvingRequest};
pub use signer::{LEGACY_RECOVERY_OFFSET, MessageSigner, SIGNATURE_LENGTH};

pub use alloy_primitives::{Address, U256};
pub use zkwasm_types as types;
