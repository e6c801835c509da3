use std::collections::HashSet;

use bigdecimal::BigDecimal;
use ergo_lib::ergotree_ir::chain::token::TokenId;
use log::{trace, warn};
use serde::Serialize;
use thiserror::Error;

use crate::amount::{decimalize, parse_decimals};
use crate::codec::{BoxCodec, RegisterDecoding};
use crate::data::{
    AssetInfo, AssetInfoLookup, BoxCandidate, BoxToken, RegisterId, UnsignedInput, UnsignedTx,
    TOKEN_DECIMALS_REGISTER, TOKEN_DESCRIPTION_REGISTER, TOKEN_NAME_REGISTER,
};
use crate::ergo::{ERG_DECIMALS, ERG_SYMBOL, ERG_TOKEN_ID, MAX_TOKENS_COUNT};

/// Asset transferred by an output, in whole units.
#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputAsset {
    pub token_id: TokenId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub amount: BigDecimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minting: Option<bool>,
}

impl OutputAsset {
    fn erg(amount: BigDecimal) -> Self {
        Self {
            token_id: *ERG_TOKEN_ID,
            name: Some(String::from(ERG_SYMBOL)),
            amount,
            decimals: None,
            description: None,
            minting: None,
        }
    }

    fn token(token_id: TokenId, info: Option<&AssetInfo>, amount: BigDecimal) -> Self {
        Self {
            token_id,
            name: info.and_then(|i| i.name.clone()),
            amount,
            decimals: None,
            description: None,
            minting: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterpretError {
    #[error("malformed output: {0}")]
    MalformedOutput(String),
}

/// How the output is read.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OutputKind {
    /// Babel box spent and recreated by the same transaction:
    /// the output carries what is left in the liquidity box, not what is sent.
    BabelSwap,
    Send,
}

/// Read-only view of what a transaction output sends.
/// Everything is derived once on construction.
#[derive(Debug, Clone)]
pub struct OutputInterpreter {
    receiver: String,
    assets: Vec<OutputAsset>,
    kind: OutputKind,
    is_intrawallet: bool,
}

impl OutputInterpreter {
    pub fn new<C: BoxCodec>(
        codec: &C,
        output: &BoxCandidate,
        inputs: &[UnsignedInput],
        asset_info: &AssetInfoLookup,
        owned_addresses: Option<&HashSet<String>>,
    ) -> Result<Self, InterpretError> {
        validate_output(output)?;
        let receiver = codec.address_of(&output.ergo_tree);
        let kind = classify(codec, output, inputs);
        trace!(target: "output_interpreter", "Output to [{}] classified as {:?}", receiver, kind);
        let assets = match kind {
            OutputKind::BabelSwap => babel_swap_assets(output, inputs, asset_info).unwrap_or_else(|| {
                warn!(
                    target: "output_interpreter",
                    "No input guarded by babel script of output to [{}], reading it as a plain send",
                    receiver
                );
                sending_assets(codec, output, inputs, asset_info)
            }),
            OutputKind::Send => sending_assets(codec, output, inputs, asset_info),
        };
        let is_intrawallet = owned_addresses.map_or(false, |addrs| addrs.contains(&receiver));
        Ok(Self {
            receiver,
            assets,
            kind,
            is_intrawallet,
        })
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn assets(&self) -> &[OutputAsset] {
        &self.assets
    }

    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    pub fn is_intrawallet(&self) -> bool {
        self.is_intrawallet
    }

    pub fn is_minting(&self) -> bool {
        self.assets.iter().any(|a| a.minting == Some(true))
    }

    pub fn is_babel_box_swap(&self) -> bool {
        self.kind == OutputKind::BabelSwap
    }
}

/// Interpret all outputs of the given transaction, in order.
pub fn interpret_outputs<C: BoxCodec>(
    codec: &C,
    tx: &UnsignedTx,
    asset_info: &AssetInfoLookup,
    owned_addresses: Option<&HashSet<String>>,
) -> Result<Vec<OutputInterpreter>, InterpretError> {
    tx.outputs
        .iter()
        .map(|output| OutputInterpreter::new(codec, output, &tx.inputs, asset_info, owned_addresses))
        .collect()
}

fn validate_output(output: &BoxCandidate) -> Result<(), InterpretError> {
    if output.ergo_tree.is_empty() {
        return Err(InterpretError::MalformedOutput(String::from("empty ErgoTree")));
    }
    if output.assets.len() > MAX_TOKENS_COUNT {
        return Err(InterpretError::MalformedOutput(format!(
            "{} tokens exceed the limit of {} per box",
            output.assets.len(),
            MAX_TOKENS_COUNT
        )));
    }
    Ok(())
}

fn classify<C: BoxCodec>(codec: &C, output: &BoxCandidate, inputs: &[UnsignedInput]) -> OutputKind {
    if codec.is_babel_tree(&output.ergo_tree) && inputs.iter().any(|i| i.ergo_tree == output.ergo_tree) {
        OutputKind::BabelSwap
    } else {
        OutputKind::Send
    }
}

fn token_decimals(asset_info: &AssetInfoLookup, token_id: &TokenId) -> u32 {
    asset_info.get(token_id).and_then(|i| i.decimals).unwrap_or(0)
}

/// Net effect of a swap against a babel box: what the box released in tokens
/// and what it took in ERG. `None` if no input is guarded by the output's script.
fn babel_swap_assets(
    output: &BoxCandidate,
    inputs: &[UnsignedInput],
    asset_info: &AssetInfoLookup,
) -> Option<Vec<OutputAsset>> {
    let input = inputs.iter().find(|i| i.ergo_tree == output.ergo_tree)?;
    let mut assets = output
        .assets
        .iter()
        .map(|token| {
            let input_amount = input
                .assets
                .iter()
                .find(|t| t.token_id == token.token_id)
                .map_or(0, |t| t.amount);
            let delta = i128::from(token.amount) - i128::from(input_amount);
            OutputAsset::token(
                token.token_id,
                asset_info.get(&token.token_id),
                decimalize(delta, token_decimals(asset_info, &token.token_id)),
            )
        })
        .collect::<Vec<_>>();
    let erg_delta = i128::from(input.value.as_u64()) - i128::from(output.value.as_u64());
    assets.push(OutputAsset::erg(decimalize(erg_delta, ERG_DECIMALS)));
    Some(assets)
}

fn sending_assets<C: RegisterDecoding>(
    codec: &C,
    output: &BoxCandidate,
    inputs: &[UnsignedInput],
    asset_info: &AssetInfoLookup,
) -> Vec<OutputAsset> {
    let mut assets = vec![OutputAsset::erg(decimalize(output.value.as_u64(), ERG_DECIMALS))];
    if output.assets.is_empty() {
        return assets;
    }
    let mut tokens = output
        .assets
        .iter()
        .map(|token| {
            OutputAsset::token(
                token.token_id,
                asset_info.get(&token.token_id),
                decimalize(token.amount, token_decimals(asset_info, &token.token_id)),
            )
        })
        .collect::<Vec<_>>();
    if let Some(minted) = minting_token(codec, output, inputs) {
        if let Some(slot) = tokens.iter_mut().find(|t| t.token_id == minted.token_id) {
            *slot = minted;
        }
    }
    assets.extend(tokens);
    assets
}

/// A new token's id equals the id of the first box spent by the minting transaction.
fn minting_token<C: RegisterDecoding>(
    codec: &C,
    output: &BoxCandidate,
    inputs: &[UnsignedInput],
) -> Option<OutputAsset> {
    let mintable_id = TokenId::from(inputs.first()?.box_id);
    let BoxToken { token_id, amount } = output.assets.iter().find(|t| t.token_id == mintable_id)?;
    trace!(target: "output_interpreter", "Output mints token [{:?}]", token_id);
    if output.additional_registers.is_empty() {
        return Some(OutputAsset {
            token_id: *token_id,
            name: None,
            amount: decimalize(*amount, 0),
            decimals: None,
            description: None,
            minting: Some(true),
        });
    }
    let decode = |reg: RegisterId| {
        output
            .additional_registers
            .get(&reg)
            .and_then(|value| codec.decode_coll(value))
    };
    let decimals = decode(TOKEN_DECIMALS_REGISTER).as_deref().and_then(parse_decimals);
    Some(OutputAsset {
        token_id: *token_id,
        name: decode(TOKEN_NAME_REGISTER),
        amount: decimalize(*amount, decimals.unwrap_or(0)),
        decimals,
        description: decode(TOKEN_DESCRIPTION_REGISTER),
        minting: Some(true),
    })
}
