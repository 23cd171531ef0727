//! Shared type definitions for the zkWasm service client.
//!
//! This crate provides the response envelopes and the image/task records returned by the
//! zkWasm proving service, together with the constants the service recognises in
//! request metadata.
//!
//! ## Overview
//!
//! Every service response is wrapped in a [`Response`] envelope carrying a `success` flag.
//! List endpoints additionally wrap their payload in a [`PaginationResult`].
//!
//! Binary fields (proofs, instances, contexts) are serialized as base64 when transmitted over
//! HTTP.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use strum::{AsRefStr, Display, EnumString};

/// Metadata key selecting who pays for proving tasks of an image.
pub const IMAGE_METADATA_KEY_PROVE_PAYMENT_SRC: &str = "ProvePaymentSrc";

/// Circuit size used when an image registration leaves it unset.
pub const IMAGE_CIRCUIT_SIZE_DEFAULT: i64 = 22;

/// Envelope wrapping every service response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response<T> {
    /// Whether the service accepted the request.
    pub success: bool,
    /// The payload. Absent or `null` on failure.
    #[serde(default = "Option::default")]
    pub result: Option<T>,
}

/// One page of a list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationResult<T> {
    /// Records of this page.
    pub data: Vec<T>,
    /// Total number of records matching the query.
    pub total: i64,
}

/// Value of the [`IMAGE_METADATA_KEY_PROVE_PAYMENT_SRC`] metadata entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, Display, EnumString)]
pub enum ProvePaymentSrc {
    /// Each task submitter pays for its own proofs.
    #[default]
    Default,
    /// The image creator pays for every proof.
    CreatorPay,
}

/// Lifecycle status of a registered image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString)]
pub enum ImageStatus {
    /// Image binary was received.
    Received,
    /// Setup finished.
    Initialized,
    /// Image was verified.
    Verified,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A registered WASM image.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Address of the image creator.
    pub user_address: String,
    /// MD5 of the image binary.
    pub md5: String,
    /// Link to a description of the image.
    #[serde(default)]
    pub description_url: String,
    /// Link to the image avatar.
    #[serde(default, rename = "avator_url")]
    pub avatar_url: String,
    /// Circuit size (log2 of rows).
    pub circuit_size: i64,
    /// Current context of the image.
    #[serde_as(as = "Option<Base64>")]
    pub context: Option<Vec<u8>>,
    /// Context the image was registered with.
    #[serde_as(as = "Option<Base64>")]
    pub initial_context: Option<Vec<u8>>,
    /// Lifecycle status.
    pub status: ImageStatus,
}

/// Image binary as returned by `GET /imagebinary`, base64 on the wire.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageBinary(#[serde_as(as = "Base64")] pub Vec<u8>);

/// Result of a successful image registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddImageResult {
    /// Identifier of the setup task.
    pub id: String,
    /// MD5 of the registered image.
    pub md5: String,
}

/// Result of a successful proving task submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvingResult {
    /// MD5 of the image the task runs against.
    pub md5: String,
    /// Identifier of the proving task.
    pub id: String,
}

/// Source of the context a proving task starts from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
pub enum InputContextType {
    /// Use the image's current context.
    ImageCurrent,
    /// Use a context uploaded with the task.
    Custom,
}

/// Status of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString)]
pub enum TaskStatus {
    /// Queued.
    Pending,
    /// Picked up by a node.
    Processing,
    /// Dry run passed.
    DryRunSuccess,
    /// Dry run failed.
    DryRunFailed,
    /// Proof generated.
    Done,
    /// Proving failed.
    Fail,
    /// Task timed out.
    Stale,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A task record as returned by `GET /tasks`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier.
    #[serde(default)]
    pub id: String,
    /// Submitter address.
    pub user_address: String,
    /// Address of the node that processed the task.
    #[serde(default)]
    pub node_address: Option<String>,
    /// MD5 of the image.
    #[serde(default)]
    pub md5: String,
    /// Task kind (`Setup`, `Prove`, ...).
    #[serde(default)]
    pub task_type: String,
    /// Current status.
    pub status: TaskStatus,
    /// Proof bytes, once done.
    #[serde_as(as = "Option<Base64>")]
    pub proof: Option<Vec<u8>>,
    /// Single (non-batched) proof bytes.
    #[serde_as(as = "Option<Base64>")]
    pub single_proof: Option<Vec<u8>>,
    /// Auxiliary verifier data.
    #[serde_as(as = "Option<Base64>")]
    pub aux: Option<Vec<u8>>,
    /// Proof instances.
    #[serde_as(as = "Option<Base64>")]
    pub instances: Option<Vec<u8>>,
    /// Batch instances.
    #[serde_as(as = "Option<Base64>")]
    pub batch_instances: Option<Vec<u8>>,
    /// Shadow instances.
    #[serde_as(as = "Option<Base64>")]
    pub shadow_instances: Option<Vec<u8>>,
    /// External host table.
    #[serde_as(as = "Option<Base64>")]
    pub external_host_table: Option<Vec<u8>>,
    /// Public inputs in `value:tag` form.
    #[serde(default)]
    pub public_inputs: Vec<String>,
    /// Private inputs in `value:tag` form.
    #[serde(default)]
    pub private_inputs: Vec<String>,
    /// Context the task started from.
    #[serde_as(as = "Option<Base64>")]
    pub input_context: Option<Vec<u8>>,
    /// Kind of the input context.
    #[serde(default)]
    pub input_context_type: Option<InputContextType>,
    /// Context the task ended with.
    #[serde_as(as = "Option<Base64>")]
    pub output_context: Option<Vec<u8>>,
    /// Submission time.
    #[serde(default)]
    pub submit_time: Option<String>,
    /// Time processing started.
    #[serde(default)]
    pub process_started: Option<String>,
    /// Time processing finished.
    #[serde(default)]
    pub process_finished: Option<String>,
    /// Fee charged for the task.
    #[serde_as(as = "Option<Base64>")]
    pub task_fee: Option<Vec<u8>>,
    /// Human-readable status message.
    #[serde(default)]
    pub status_message: Option<String>,
    /// Internal status message.
    #[serde(default)]
    pub internal_message: Option<String>,
    /// Debug logs of the run.
    #[serde(default)]
    pub debug_logs: Option<String>,
    /// How the proof is submitted on chain.
    #[serde(default)]
    pub proof_submit_mode: Option<String>,
    /// Status of automatic on-chain submission.
    #[serde(default)]
    pub auto_submit_status: Option<String>,
}

/// Filter for `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Task identifier.
    pub id: Option<String>,
    /// Maximum number of records.
    pub total: Option<i64>,
}

impl TaskQuery {
    /// Query string pairs, in a stable order. Unset filters are skipped.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.id.as_ref().filter(|id| !id.is_empty()) {
            pairs.push(("id", id.clone()));
        }
        if let Some(total) = self.total.filter(|total| *total != 0) {
            pairs.push(("total", total.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_without_result() {
        let response: Response<AddImageResult> =
            serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert!(response.result.is_none());
    }

    #[test]
    fn test_image_from_json() {
        let json = r#"{
            "success": true,
            "result": [{
                "user_address": "0xabc",
                "md5": "fbe1add84935782493030ff335475d81",
                "description_url": "",
                "avator_url": "https://avatar",
                "circuit_size": 22,
                "context": null,
                "initial_context": "AQID",
                "status": "Verified"
            }]
        }"#;
        let response: Response<Vec<Image>> = serde_json::from_str(json).unwrap();
        let image = &response.result.unwrap()[0];
        assert_eq!(image.avatar_url, "https://avatar");
        assert_eq!(image.initial_context.as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(image.context, None);
        assert_eq!(image.status, ImageStatus::Verified);
    }

    #[test]
    fn test_image_binary_from_json() {
        let response: Response<ImageBinary> =
            serde_json::from_str(r#"{"success": true, "result": "AGFzbQ=="}"#).unwrap();
        assert_eq!(response.result.unwrap().0, b"\0asm");
    }

    #[test]
    fn test_unknown_status() {
        let status: TaskStatus = serde_json::from_str(r#""Cancelled""#).unwrap();
        assert_eq!(status, TaskStatus::Unknown);
    }

    #[test]
    fn test_task_page_from_json() {
        let json = r#"{
            "success": true,
            "result": {
                "data": [{
                    "id": "65a0",
                    "user_address": "0xabc",
                    "md5": "00",
                    "task_type": "Prove",
                    "status": "Done",
                    "proof": "AAE=",
                    "public_inputs": ["1:i64"],
                    "input_context_type": "ImageCurrent"
                }],
                "total": 1
            }
        }"#;
        let response: Response<PaginationResult<Task>> = serde_json::from_str(json).unwrap();
        let page = response.result.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].status, TaskStatus::Done);
        assert_eq!(page.data[0].proof.as_deref(), Some(&[0u8, 1][..]));
        assert_eq!(
            page.data[0].input_context_type,
            Some(InputContextType::ImageCurrent)
        );
    }

    #[test]
    fn test_task_query_pairs() {
        assert!(TaskQuery::default().to_query_pairs().is_empty());
        let query = TaskQuery {
            id: Some("abc".into()),
            total: Some(5),
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![("id", "abc".to_string()), ("total", "5".to_string())]
        );
    }

    #[test]
    fn test_enum_strings() {
        assert_eq!(InputContextType::Custom.to_string(), "Custom");
        assert_eq!(ProvePaymentSrc::default().as_ref(), "Default");
        assert_eq!(
            "CreatorPay".parse::<ProvePaymentSrc>().unwrap(),
            ProvePaymentSrc::CreatorPay
        );
    }
}
