//! Integration tests for the zkwasm CLI offline commands.

use std::fs;

use alloy_primitives::{hex, keccak256};
use anyhow::Result;
use assert_cmd::Command;
use tempfile::tempdir;

const PRIVATE_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

fn zkwasm() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zkwasm"));
    cmd.env_remove("ZKWASM_PRIVATE_KEY");
    cmd
}

fn stdout_lines(cmd: &mut Command) -> Vec<String> {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_cli_encode_inputs() {
    let lines = stdout_lines(zkwasm().arg("encode-inputs").arg(r#"[42, "0xabcd", [1]]"#));
    assert_eq!(
        lines,
        ["42:i64", "0xabcd:bytes", "0x0100000000000000:bytes-packed"]
    );
}

#[test]
fn test_cli_encode_inputs_rejects_unsupported_value() {
    let output = zkwasm()
        .arg("encode-inputs")
        .arg(r#"[1.5]"#)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8(output).unwrap().contains("UnsupportedInputType"));
}

#[test]
fn test_cli_decode_inputs() {
    let lines = stdout_lines(zkwasm().args(["decode-inputs", "0xabcd:bytes", "7:i64"]));
    assert_eq!(lines, ["171", "205", "7"]);
}

#[test]
fn test_cli_decode_inputs_malformed() {
    let output = zkwasm()
        .args(["decode-inputs", "badtoken"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(
        String::from_utf8(output)
            .unwrap()
            .contains("illegal input string: badtoken")
    );
}

#[test]
fn test_cli_chunk() {
    let lines = stdout_lines(zkwasm().args(["chunk", "--little-endian", "0x01"]));
    assert_eq!(lines, ["1"]);

    // Big-endian chunks are padded on the right before conversion.
    let lines = stdout_lines(zkwasm().args(["chunk", "0x01"]));
    assert_eq!(
        lines,
        ["452312848583266388373324160190187140051835877600158453279131187530910662656"]
    );
}

#[test]
fn test_cli_address() {
    let lines = stdout_lines(zkwasm().args(["--private-key", PRIVATE_KEY, "address"]));
    assert_eq!(lines, ["0x2c7536E3605D9C16a7a3D7b1898e529396a65c23"]);
}

#[test]
fn test_cli_address_requires_key() {
    zkwasm().arg("address").assert().failure();
}

#[test]
fn test_cli_queries_need_no_key() {
    // Nothing listens on the discard port, so the query fails at the transport.
    let output = zkwasm()
        .args(["--endpoint", "http://127.0.0.1:9", "query-image", "abc"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).unwrap();
    assert!(!stderr.contains("No private key"), "{stderr}");
    assert!(stderr.contains("Request error"), "{stderr}");
}

#[test]
fn test_cli_sign_message_from_config() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("zkwasm.toml");
    fs::write(&config_path, format!("private_key = \"{PRIVATE_KEY}\"\n"))?;

    let lines = stdout_lines(
        zkwasm()
            .arg("--config")
            .arg(config_path.to_str().unwrap())
            .args(["sign-message", "--legacy", "Some data"]),
    );
    assert_eq!(
        lines,
        ["0xb91467e570a6466aa9e9876cbcd013baba02900b8979d43fe208a4a4f339f5fd\
          6007e74cd82e037b800186422fc2da167c747ef045e5d18a5f5d4300f8e1a0291c"]
    );

    let lines = stdout_lines(
        zkwasm()
            .arg("--config")
            .arg(config_path.to_str().unwrap())
            .args(["sign-message", "Some data"]),
    );
    assert!(lines[0].ends_with("01"));

    Ok(())
}

#[test]
fn test_cli_yaml_config() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("zkwasm.yaml");
    fs::write(&config_path, format!("private_key: \"0x{PRIVATE_KEY}\"\n"))?;

    let lines = stdout_lines(
        zkwasm()
            .arg("--config")
            .arg(config_path.to_str().unwrap())
            .arg("address"),
    );
    assert_eq!(lines, ["0x2c7536E3605D9C16a7a3D7b1898e529396a65c23"]);

    Ok(())
}

#[test]
fn test_cli_verify_calldata() {
    let lines = stdout_lines(zkwasm().args([
        "verify-calldata",
        "--proof",
        "01",
        "--verify-instance",
        "03",
        "--aux",
        "",
        "--target-instance",
        "0405",
    ]));
    assert_eq!(lines.len(), 1);

    let calldata = hex::decode(&lines[0]).unwrap();
    let selector = keccak256("verify(uint256[],uint256[],uint256[],uint256[][])");
    assert_eq!(calldata[..4], selector[..4]);
    // Selector, four head offsets, then the proof array length and its only element.
    assert_eq!(calldata.len() % 32, 4);
    assert_eq!(calldata[4 + 4 * 32 + 63], 1);
}
