//! HTTP client for zkWasm proving services.
//!
//! Provides a high-level Rust client to register WASM images, submit proving tasks and query
//! images and tasks. Mutating requests are authenticated by signing a canonical message of
//! their fields; see [`zkwasm_core`] for the encoding and signing rules.
//!
//! ## Example
//!
//! ```no_run
//! use zkwasm_client::{Error, ZkWasmClient, encoding::{InputValue, ProvingParams}};
//!
//! # async fn example() -> Result<(), Error> {
//! let client = ZkWasmClient::new(
//!     "https://rpc.zkwasmhub.com:8090",
//!     "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
//! )?;
//!
//! let image = client.query_image("fbe1add84935782493030ff335475d81").await?;
//! println!("{image:?}");
//!
//! let params = ProvingParams::from_values(
//!     "fbe1add84935782493030ff335475d81",
//!     &[InputValue::I64(1)],
//!     &[InputValue::Bytes(vec![0xab, 0xcd])],
//! )?;
//! let task_id = client.add_proving_task(params).await?;
//! println!("submitted {task_id}");
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub use client::ZkWasmClient;
pub use contract::{VERIFY_SIGNATURE, verify_calldata};
pub use error::{Error, Result};
pub use request::{FormPart, PartValue, SIGNATURE_HEADER, SignedRequest};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
pub use zkwasm_core as encoding;
pub use zkwasm_types as types;

mod client;
mod contract;
mod error;
pub mod request;
mod transport;
