//! Command-line client for zkWasm proving services.
//!
//! Offline commands expose the input list codec, field element chunking, message signing and
//! verifier calldata encoding. Online commands register images, submit proving tasks and query
//! the service.
//!
//! ## Usage
//!
//! ```bash
//! zkwasm encode-inputs '[42, "0xabcd", [1, 2]]'
//! zkwasm --config zkwasm.toml prove --md5 <image md5> --public 42:i64
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use std::path::PathBuf;

use alloy_primitives::hex;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::fs;
use tracing::debug;
use zkwasm_client::{ZkWasmClient, verify_calldata};
use zkwasm_core::{
    AddImageParams, InputValue, MessageSigner, ProvingParams, chunk_to_field_elements,
    decode_tokens, encode_values,
};
use zkwasm_types::{InputContextType, TaskQuery};

use crate::config::Config;

mod config;

/// Command-line interface for the zkWasm service client.
#[derive(Parser, Debug)]
#[command(name = "zkwasm")]
#[command(about = "zkWasm proving service client", long_about = None)]
struct Cli {
    /// Config file path (TOML or YAML).
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Service endpoint, overrides the config file.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Hex-encoded private key, overrides the config file.
    #[arg(long, global = true, env = "ZKWASM_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a JSON array of values into input tokens, one per line.
    EncodeInputs {
        /// e.g. `[42, "0xabcd", [1, 2]]`
        values: String,
    },
    /// Decode input tokens into the words the program reads, one per line.
    DecodeInputs {
        /// Tokens of the form `value:tag`.
        tokens: Vec<String>,
    },
    /// Split a hex buffer into 32-byte field elements, printed in decimal.
    Chunk {
        /// Read each chunk little-endian.
        #[arg(long)]
        little_endian: bool,
        /// Hex buffer, with or without `0x`.
        data: String,
    },
    /// Sign a message with the configured key.
    SignMessage {
        /// Add 27 to the recovery byte.
        #[arg(long)]
        legacy: bool,
        /// Message to sign.
        message: String,
    },
    /// Print the address of the configured key.
    Address,
    /// Encode calldata of the verifier `verify` call from hex buffers.
    VerifyCalldata {
        /// Proof bytes.
        #[arg(long)]
        proof: String,
        /// Verify instance bytes.
        #[arg(long)]
        verify_instance: String,
        /// Aux bytes.
        #[arg(long)]
        aux: String,
        /// Target instance bytes.
        #[arg(long)]
        target_instance: String,
    },
    /// Look up an image by MD5.
    QueryImage {
        /// MD5 of the image binary.
        md5: String,
    },
    /// Download an image binary.
    ImageBinary {
        /// MD5 of the image binary.
        md5: String,
        /// Output path.
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Register a WASM image.
    AddImage {
        /// Path to the WASM binary.
        #[arg(long)]
        image: PathBuf,
        /// Image name. Defaults to the file name.
        #[arg(long)]
        name: Option<String>,
        /// Link to a description of the image.
        #[arg(long, default_value = "")]
        description_url: String,
        /// Link to the image avatar.
        #[arg(long, default_value = "")]
        avatar_url: String,
        /// Circuit size, 0 for the service default.
        #[arg(long, default_value_t = 0)]
        circuit_size: i64,
        /// Metadata entries as `key=value`.
        #[arg(long = "metadata", value_parser = parse_key_val)]
        metadata: Vec<(String, String)>,
        /// Path to the initial context.
        #[arg(long)]
        initial_context: Option<PathBuf>,
    },
    /// Submit a proving task.
    Prove {
        /// MD5 of the image to run.
        #[arg(long)]
        md5: String,
        /// Public input token, repeatable.
        #[arg(long = "public")]
        public_inputs: Vec<String>,
        /// Private input token, repeatable.
        #[arg(long = "private")]
        private_inputs: Vec<String>,
        /// Input context type (`ImageCurrent` or `Custom`).
        #[arg(long)]
        context_type: Option<InputContextType>,
        /// Path to a custom input context.
        #[arg(long)]
        context: Option<PathBuf>,
    },
    /// List tasks.
    Tasks {
        /// Task id.
        #[arg(long)]
        id: Option<String>,
        /// Maximum number of tasks.
        #[arg(long)]
        total: Option<i64>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .with_context(|| format!("invalid KEY=value: no `=` found in `{s}`"))?;
    Ok((key.to_string(), value.to_string()))
}

fn parse_hex(name: &str, s: &str) -> Result<Vec<u8>> {
    hex::decode(s.trim()).with_context(|| format!("Invalid hex for {name}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            debug!(?path, "loading config");
            Config::load(path)?
        }
        None => Config::default(),
    };
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(private_key) = cli.private_key {
        config.private_key = Some(private_key);
    }

    match cli.command {
        Command::EncodeInputs { values } => {
            let values: Vec<serde_json::Value> =
                serde_json::from_str(&values).context("Inputs must be a JSON array")?;
            let values = values
                .into_iter()
                .map(InputValue::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            for token in encode_values(&values)? {
                println!("{token}");
            }
        }
        Command::DecodeInputs { tokens } => {
            for word in decode_tokens(&tokens)? {
                println!("{word}");
            }
        }
        Command::Chunk {
            little_endian,
            data,
        } => {
            for element in chunk_to_field_elements(&parse_hex("data", &data)?, little_endian) {
                println!("{element}");
            }
        }
        Command::SignMessage { legacy, message } => {
            let signer = MessageSigner::from_hex(config.private_key()?)?;
            println!("{}", signer.sign_hex(&message, legacy)?);
        }
        Command::Address => {
            let signer = MessageSigner::from_hex(config.private_key()?)?;
            println!("{}", signer.address());
        }
        Command::VerifyCalldata {
            proof,
            verify_instance,
            aux,
            target_instance,
        } => {
            let calldata = verify_calldata(
                &parse_hex("proof", &proof)?,
                &parse_hex("verify instance", &verify_instance)?,
                &parse_hex("aux", &aux)?,
                &parse_hex("target instance", &target_instance)?,
            );
            println!("{calldata}");
        }
        Command::QueryImage { md5 } => {
            let client = ZkWasmClient::read_only(&config.endpoint)?;
            match client.query_image(&md5).await? {
                Some(image) => println!("{image:#?}"),
                None => println!("Image {md5} not found"),
            }
        }
        Command::ImageBinary { md5, output } => {
            let client = ZkWasmClient::read_only(&config.endpoint)?;
            let binary = client.query_image_binary(&md5).await?;
            fs::write(&output, &binary)
                .await
                .with_context(|| format!("Failed to write {output:?}"))?;
            println!("Image binary written to: {output:?}");
        }
        Command::AddImage {
            image,
            name,
            description_url,
            avatar_url,
            circuit_size,
            metadata,
            initial_context,
        } => {
            let client = ZkWasmClient::new(&config.endpoint, config.private_key()?)?;
            let name = match name {
                Some(name) => name,
                None => image
                    .file_name()
                    .and_then(|name| name.to_str())
                    .context("Image path has no file name, pass --name")?
                    .to_string(),
            };
            let initial_context = match initial_context {
                Some(path) => Some(
                    fs::read(&path)
                        .await
                        .with_context(|| format!("Failed to read {path:?}"))?,
                ),
                None => None,
            };
            let (metadata_keys, metadata_vals): (Vec<_>, Vec<_>) = metadata.into_iter().unzip();

            let params = AddImageParams {
                name,
                image: fs::read(&image)
                    .await
                    .with_context(|| format!("Failed to read {image:?}"))?,
                description_url,
                avatar_url,
                circuit_size,
                metadata_keys,
                metadata_vals,
                initial_context,
            };
            println!("{}", client.add_image(params).await?);
        }
        Command::Prove {
            md5,
            public_inputs,
            private_inputs,
            context_type,
            context,
        } => {
            decode_tokens(&public_inputs).context("Invalid public inputs")?;
            decode_tokens(&private_inputs).context("Invalid private inputs")?;

            let client = ZkWasmClient::new(&config.endpoint, config.private_key()?)?;
            let input_context = match context {
                Some(path) => Some(
                    fs::read(&path)
                        .await
                        .with_context(|| format!("Failed to read {path:?}"))?,
                ),
                None => None,
            };
            let params = ProvingParams {
                md5,
                public_inputs,
                private_inputs,
                input_context_type: context_type,
                input_context,
            };
            println!("{}", client.add_proving_task(params).await?);
        }
        Command::Tasks { id, total } => {
            let client = ZkWasmClient::read_only(&config.endpoint)?;
            let page = client.load_tasks(&TaskQuery { id, total }).await?;
            println!("Total: {}", page.total);
            for task in page.data {
                println!("{} {} {} {}", task.id, task.md5, task.task_type, task.status);
            }
        }
    }

    Ok(())
}
