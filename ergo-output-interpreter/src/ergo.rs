use derive_more::{Add, Display, From, FromStr, Into, Sum};
use ergo_lib::ergo_chain_types::Digest32;
use ergo_lib::ergotree_ir::chain::ergo_box::box_value::BoxValue;
use ergo_lib::ergotree_ir::chain::token::TokenId;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Decimal places of ERG.
pub const ERG_DECIMALS: u32 = 9;

pub const ERG_SYMBOL: &str = "ERG";

/// Max amount of token entries a single box may carry.
pub const MAX_TOKENS_COUNT: usize = 122;

lazy_static! {
    /// Reserved id standing for ERG in asset lists.
    pub static ref ERG_TOKEN_ID: TokenId = TokenId::from(Digest32::zero());
}

#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Display,
    FromStr,
    Sum,
    Add,
    Into,
    From,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct NanoErg(u64);

impl NanoErg {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<BoxValue> for NanoErg {
    fn from(v: BoxValue) -> Self {
        Self(*v.as_u64())
    }
}
