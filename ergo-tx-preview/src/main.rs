use clap::Parser;
use derive_more::From;
use ergo_lib::ergotree_ir::chain::token::TokenId;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ergo_output_interpreter::codec::SigmaCodec;
use ergo_output_interpreter::data::{AssetInfo, AssetInfoLookup, UnsignedTx};
use ergo_output_interpreter::interpreter::{
    interpret_outputs, InterpretError, OutputAsset, OutputInterpreter,
};

use crate::config::PreviewConfig;

mod config;

#[derive(Debug, Error, From)]
pub enum PreviewError {
    #[error("io error: {0}")]
    Io(std::io::Error),
    #[error("json decoding: {0}")]
    Json(serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(serde_yaml::Error),
    #[error("logger setup: {0}")]
    Logging(String),
    #[error("interpretation: {0}")]
    Interpret(InterpretError),
}

#[derive(Parser)]
#[command(name = "ergo-tx-preview")]
#[command(version)]
#[command(about = "Shows what every output of an unsigned Ergo transaction sends", long_about = None)]
struct AppArgs {
    /// Path to the YAML configuration file.
    #[arg(long, short)]
    config_path: String,
    /// Path to the unsigned transaction (EIP-12 JSON).
    #[arg(long, short)]
    tx_path: String,
    /// Path to the JSON list of known tokens.
    #[arg(long, short)]
    assets_path: Option<String>,
}

fn main() {
    let args = AppArgs::parse();
    if let Err(e) = run(args) {
        eprintln!("PREVIEW ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run(args: AppArgs) -> Result<(), PreviewError> {
    let raw_config = std::fs::read_to_string(&args.config_path)?;
    let config: PreviewConfig = serde_yaml::from_str(&raw_config)?;
    log4rs::init_file(&config.log4rs_path, Default::default())
        .map_err(|e| PreviewError::Logging(e.to_string()))?;

    let tx: UnsignedTx = serde_json::from_str(&std::fs::read_to_string(&args.tx_path)?)?;
    let asset_info = match &args.assets_path {
        Some(path) => load_asset_info(path)?,
        None => AssetInfoLookup::new(),
    };
    info!(
        "Interpreting {} outputs of tx spending {} inputs, {} known tokens",
        tx.outputs.len(),
        tx.inputs.len(),
        asset_info.len()
    );

    let codec = SigmaCodec::new(config.network.into());
    let outputs = interpret_outputs(&codec, &tx, &asset_info, config.owned_addresses.as_ref())?;
    let preview = outputs
        .iter()
        .enumerate()
        .map(|(index, output)| OutputPreview::new(index, output))
        .collect::<Vec<_>>();
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetInfoEntry {
    token_id: TokenId,
    #[serde(flatten)]
    info: AssetInfo,
}

fn load_asset_info(path: &str) -> Result<AssetInfoLookup, PreviewError> {
    let raw = std::fs::read_to_string(path)?;
    let entries: Vec<AssetInfoEntry> = serde_json::from_str(&raw)?;
    Ok(entries.into_iter().map(|e| (e.token_id, e.info)).collect())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputPreview<'a> {
    index: usize,
    receiver: &'a str,
    is_intrawallet: bool,
    is_minting: bool,
    is_babel_box_swap: bool,
    assets: &'a [OutputAsset],
}

impl<'a> OutputPreview<'a> {
    fn new(index: usize, output: &'a OutputInterpreter) -> Self {
        Self {
            index,
            receiver: output.receiver(),
            is_intrawallet: output.is_intrawallet(),
            is_minting: output.is_minting(),
            is_babel_box_swap: output.is_babel_box_swap(),
            assets: output.assets(),
        }
    }
}
