//! Canonical messages signed to authenticate service requests.
//!
//! The service recomputes these strings from the form fields it receives and checks the
//! signature against them, so field order and the optional tails must stay exactly as below.

use tracing::debug;

use crate::params::{AddImageRequest, ProvingRequest};
use zkwasm_types::InputContextType;

/// Builds the message signed for an image registration.
///
/// `name ‖ image_md5 ‖ user_address ‖ description_url ‖ avatar_url ‖ circuit_size ‖
/// keys.join(",") ‖ vals.join(",")`, followed by the initial context hash only when an
/// initial context is present.
pub fn image_registration_message(request: &AddImageRequest) -> String {
    let mut message = String::new();

    message.push_str(&request.name);
    message.push_str(&request.image.md5);
    message.push_str(&request.user_address);
    message.push_str(&request.description_url);
    message.push_str(&request.avatar_url);
    message.push_str(&request.circuit_size.to_string());
    message.push_str(&request.metadata_keys.join(","));
    message.push_str(&request.metadata_vals.join(","));

    if let Some(initial_context) = &request.initial_context {
        message.push_str(&initial_context.md5);
    }

    debug!(%message, "built image registration message");
    message
}

/// Builds the message signed for a proving task.
///
/// `user_address ‖ md5 ‖ public inputs ‖ private inputs`, then the input context hash when the
/// context is custom and uploaded, then the context type when set. Inputs are concatenated
/// without separators.
pub fn proving_task_message(request: &ProvingRequest) -> String {
    let mut message = String::new();

    message.push_str(&request.user_address);
    message.push_str(&request.md5);
    request
        .public_inputs
        .iter()
        .chain(&request.private_inputs)
        .for_each(|input| message.push_str(input));

    if request.input_context_type == Some(InputContextType::Custom)
        && let Some(input_context) = &request.input_context
    {
        message.push_str(&input_context.md5);
    }

    if let Some(context_type) = request.input_context_type {
        message.push_str(context_type.as_ref());
    }

    debug!(%message, "built proving task message");
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{AddImageParams, ProvingParams};

    fn image_params() -> AddImageParams {
        AddImageParams {
            name: "demo.wasm".into(),
            image: b"abc".to_vec(),
            description_url: "https://desc".into(),
            avatar_url: "https://avatar".into(),
            circuit_size: 18,
            metadata_keys: vec!["k1".into(), "k2".into()],
            metadata_vals: vec!["v1".into(), "v2".into()],
            initial_context: None,
        }
    }

    #[test]
    fn test_image_registration_message() {
        let request = image_params().prepare("0xABC");
        assert_eq!(
            image_registration_message(&request),
            "demo.wasm\
             900150983cd24fb0d6963f7d28e17f72\
             0xabc\
             https://desc\
             https://avatar\
             18\
             k1,k2,ProvePaymentSrc\
             v1,v2,Default"
        );
    }

    #[test]
    fn test_image_registration_message_is_deterministic() {
        let first = image_registration_message(&image_params().prepare("0xABC"));
        let second = image_registration_message(&image_params().prepare("0xABC"));
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_image_registration_initial_context_is_omitted_not_blank() {
        let without = image_registration_message(&image_params().prepare("0xABC"));
        let with = image_registration_message(
            &AddImageParams {
                initial_context: Some(b"".to_vec()),
                ..image_params()
            }
            .prepare("0xABC"),
        );
        assert_eq!(with, without);

        let with = image_registration_message(
            &AddImageParams {
                initial_context: Some(b"ctx".to_vec()),
                ..image_params()
            }
            .prepare("0xABC"),
        );
        assert_eq!(with.len(), without.len() + 32);
        assert!(with.starts_with(&without));
    }

    fn proving_params() -> ProvingParams {
        ProvingParams {
            md5: "IMAGEMD5".into(),
            public_inputs: vec!["1:i64".into(), "2:i64".into()],
            private_inputs: vec!["0x03:bytes".into()],
            input_context_type: None,
            input_context: None,
        }
    }

    #[test]
    fn test_proving_task_message() {
        let request = proving_params().prepare("0xAbC");
        assert_eq!(
            proving_task_message(&request),
            "0xAbCIMAGEMD51:i642:i640x03:bytes"
        );
    }

    #[test]
    fn test_proving_task_message_image_current() {
        let request = ProvingParams {
            input_context_type: Some(InputContextType::ImageCurrent),
            input_context: Some(b"abc".to_vec()),
            ..proving_params()
        }
        .prepare("0x1");
        assert_eq!(
            proving_task_message(&request),
            "0x1IMAGEMD51:i642:i640x03:bytesImageCurrent"
        );
    }

    #[test]
    fn test_proving_task_message_custom_context() {
        let request = ProvingParams {
            input_context_type: Some(InputContextType::Custom),
            input_context: Some(b"abc".to_vec()),
            ..proving_params()
        }
        .prepare("0x1");
        assert_eq!(
            proving_task_message(&request),
            "0x1IMAGEMD51:i642:i640x03:bytes900150983cd24fb0d6963f7d28e17f72Custom"
        );

        let request = ProvingParams {
            input_context_type: Some(InputContextType::Custom),
            ..proving_params()
        }
        .prepare("0x1");
        assert_eq!(
            proving_task_message(&request),
            "0x1IMAGEMD51:i642:i640x03:bytesCustom"
        );
    }
}
