use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};

use derive_more::{From, Into};
use ergo_lib::ergotree_ir::chain::ergo_box::BoxId;
use ergo_lib::ergotree_ir::chain::token::TokenId;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::ergo::NanoErg;

/// Sigma-serialized byte representation of `ErgoTree`.
/// Travels as a base16 string.
#[derive(Debug, Eq, PartialEq, Clone, Hash, From, Into, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ErgoTreeBytes(Vec<u8>);

impl ErgoTreeBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for ErgoTreeBytes {
    type Error = base16::DecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        base16::decode(&value).map(ErgoTreeBytes)
    }
}

impl From<ErgoTreeBytes> for String {
    fn from(tree: ErgoTreeBytes) -> Self {
        base16::encode_lower(&tree.0)
    }
}

impl Display for ErgoTreeBytes {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&base16::encode_lower(&self.0))
    }
}

/// Non-mandatory register slots.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize, Deserialize)]
pub enum RegisterId {
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
}

/// EIP-4 token name.
pub const TOKEN_NAME_REGISTER: RegisterId = RegisterId::R4;
/// EIP-4 token description.
pub const TOKEN_DESCRIPTION_REGISTER: RegisterId = RegisterId::R5;
/// EIP-4 token decimals (as a decimal string).
pub const TOKEN_DECIMALS_REGISTER: RegisterId = RegisterId::R6;

/// Base16 string of a sigma-serialized constant.
#[derive(Debug, Eq, PartialEq, Clone, Hash, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerializedRegister(String);

impl SerializedRegister {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub type Registers = BTreeMap<RegisterId, SerializedRegister>;

#[serde_as]
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxToken {
    pub token_id: TokenId,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub amount: u64,
}

impl BoxToken {
    pub fn new(token_id: TokenId, amount: u64) -> Self {
        Self { token_id, amount }
    }
}

/// Output of a transaction which is not yet on-chain.
#[serde_as]
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxCandidate {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub value: NanoErg,
    pub ergo_tree: ErgoTreeBytes,
    #[serde(default)]
    pub creation_height: u32,
    #[serde(default)]
    pub assets: Vec<BoxToken>,
    #[serde(default)]
    pub additional_registers: Registers,
}

/// Box spent by a transaction which is not yet signed.
/// Fields the interpretation never reads (extension, registers, ..) are ignored.
#[serde_as]
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedInput {
    pub box_id: BoxId,
    pub ergo_tree: ErgoTreeBytes,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub value: NanoErg,
    #[serde(default)]
    pub assets: Vec<BoxToken>,
}

/// Unsigned transaction in the shape dApp connectors (EIP-12) exchange.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTx {
    pub inputs: Vec<UnsignedInput>,
    pub outputs: Vec<BoxCandidate>,
}

/// Known metadata of a token.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct AssetInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<u32>,
}

pub type AssetInfoLookup = HashMap<TokenId, AssetInfo>;

#[cfg(test)]
mod tests {
    use crate::data::{BoxCandidate, RegisterId, UnsignedTx};

    #[test]
    fn amounts_accept_strings_and_numbers() {
        let bx: BoxCandidate = serde_json::from_str(OUTPUT_JSON).unwrap();
        assert_eq!(bx.value.as_u64(), 1_000_000);
        assert_eq!(bx.assets.len(), 2);
        assert_eq!(bx.assets[0].amount, 10);
        assert_eq!(bx.assets[1].amount, 9_000_000_000_000_000_000);
        assert_eq!(bx.creation_height, 1_000_000);
        assert_eq!(
            bx.additional_registers.get(&RegisterId::R4).map(|r| r.as_str()),
            Some("0e03466f6f")
        );
        assert!(bx.additional_registers.get(&RegisterId::R5).is_none());
    }

    #[test]
    fn ergo_tree_travels_as_base16() {
        let bx: BoxCandidate = serde_json::from_str(OUTPUT_JSON).unwrap();
        assert_eq!(&bx.ergo_tree.as_bytes()[..3], &[0x00, 0x08, 0xcd]);
        let json = serde_json::to_value(&bx).unwrap();
        assert_eq!(
            json["ergoTree"],
            "0008cd0327e65711a59378c59359c3e1d0f7abe906479eccb76094e50fe79d743ccc15e6"
        );
    }

    #[test]
    fn malformed_tree_is_rejected() {
        let res = serde_json::from_str::<BoxCandidate>(r#"{"value": "1", "ergoTree": "zz"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn missing_optional_fields_default() {
        let tx: UnsignedTx = serde_json::from_str(
            r#"{
                "inputs": [{
                    "boxId": "e56847ed19b3dc6b72828fcfb992fdf7310828cf291221269b7ffc72fd66706e",
                    "ergoTree": "0008cd0327e65711a59378c59359c3e1d0f7abe906479eccb76094e50fe79d743ccc15e6",
                    "value": 67500000000,
                    "extension": {}
                }],
                "dataInputs": [],
                "outputs": [{
                    "value": "67500000000",
                    "ergoTree": "0008cd0327e65711a59378c59359c3e1d0f7abe906479eccb76094e50fe79d743ccc15e6"
                }]
            }"#,
        )
        .unwrap();
        assert!(tx.inputs[0].assets.is_empty());
        assert!(tx.outputs[0].assets.is_empty());
        assert!(tx.outputs[0].additional_registers.is_empty());
    }

    const OUTPUT_JSON: &str = r#"{
        "value": "1000000",
        "ergoTree": "0008cd0327e65711a59378c59359c3e1d0f7abe906479eccb76094e50fe79d743ccc15e6",
        "creationHeight": 1000000,
        "assets": [
            {
                "tokenId": "03faf2cb329f2e90d6d23b58d91bbb6c046aa143261cc21f52fbe2824bfcbf04",
                "amount": "10"
            },
            {
                "tokenId": "0cd8c9f416e5b1ca9f986a7f10a84191dfb85941619e49e53c0dc30ebf83324b",
                "amount": 9000000000000000000
            }
        ],
        "additionalRegisters": {
            "R4": "0e03466f6f"
        }
    }"#;
}
