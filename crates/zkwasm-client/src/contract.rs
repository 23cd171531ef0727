//! Calldata for the on-chain zkWasm verifier.

use alloy_primitives::{Bytes, U256, keccak256};
use alloy_sol_types::SolValue;
use zkwasm_core::chunk_to_field_elements;

/// Signature of the verifier entry point.
pub const VERIFY_SIGNATURE: &str = "verify(uint256[],uint256[],uint256[],uint256[][])";

/// ABI arguments of `verify`: proof, verify instance, aux and target instance batches.
type VerifyArgs = (Vec<U256>, Vec<U256>, Vec<U256>, Vec<Vec<U256>>);

/// Encodes a `verify` call from the raw proof buffers of a finished task.
///
/// Every buffer is chunked into little-endian field elements; the target instance is passed
/// as a single batch.
pub fn verify_calldata(
    proof: &[u8],
    verify_instance: &[u8],
    aux: &[u8],
    target_instance: &[u8],
) -> Bytes {
    let field_elements = |data: &[u8]| -> Vec<U256> { chunk_to_field_elements(data, true) };
    let args: VerifyArgs = (
        field_elements(proof),
        field_elements(verify_instance),
        field_elements(aux),
        vec![field_elements(target_instance)],
    );

    let mut calldata = keccak256(VERIFY_SIGNATURE)[..4].to_vec();
    calldata.extend(args.abi_encode_params());
    calldata.into()
}
