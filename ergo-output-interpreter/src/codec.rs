use ergo_lib::ergotree_ir::chain::address::{Address, AddressEncoder, NetworkPrefix};
use ergo_lib::ergotree_ir::ergo_tree::ErgoTree;
use ergo_lib::ergotree_ir::mir::constant::{Constant, TryExtractInto};
use ergo_lib::ergotree_ir::serialization::SigmaSerializable;
use log::trace;

use crate::babel;
use crate::data::{ErgoTreeBytes, SerializedRegister};

pub trait AddressEncoding {
    /// Encoded address guarded by the given script. Never fails.
    fn address_of(&self, tree: &ErgoTreeBytes) -> String;
}

pub trait RegisterDecoding {
    /// Decode a `Coll[Byte]` register as a string.
    /// `None` if the register holds anything else.
    fn decode_coll(&self, reg: &SerializedRegister) -> Option<String>;
}

pub trait BabelTreeMatching {
    fn is_babel_tree(&self, tree: &ErgoTreeBytes) -> bool;
}

/// Everything needed to interpret raw box fields.
pub trait BoxCodec: AddressEncoding + RegisterDecoding + BabelTreeMatching {}

impl<T> BoxCodec for T where T: AddressEncoding + RegisterDecoding + BabelTreeMatching {}

/// `BoxCodec` backed by sigma-rust.
#[derive(Debug, Copy, Clone)]
pub struct SigmaCodec {
    network: NetworkPrefix,
}

impl SigmaCodec {
    pub fn new(network: NetworkPrefix) -> Self {
        Self { network }
    }

    pub fn mainnet() -> Self {
        Self::new(NetworkPrefix::Mainnet)
    }
}

impl AddressEncoding for SigmaCodec {
    fn address_of(&self, tree: &ErgoTreeBytes) -> String {
        let address = ErgoTree::sigma_parse_bytes(tree.as_bytes())
            .ok()
            .and_then(|parsed| Address::recreate_from_ergo_tree(&parsed).ok())
            .unwrap_or_else(|| {
                trace!(target: "codec", "Unparseable ErgoTree [{}], falling back to P2S", tree);
                Address::P2S(tree.as_bytes().to_vec())
            });
        AddressEncoder::encode_address_as_string(self.network, &address)
    }
}

impl RegisterDecoding for SigmaCodec {
    fn decode_coll(&self, reg: &SerializedRegister) -> Option<String> {
        let bytes = base16::decode(reg.as_str()).ok()?;
        let constant = Constant::sigma_parse_bytes(&bytes).ok()?;
        let coll = constant.v.try_extract_into::<Vec<u8>>().ok()?;
        Some(String::from_utf8_lossy(&coll).into_owned())
    }
}

impl BabelTreeMatching for SigmaCodec {
    fn is_babel_tree(&self, tree: &ErgoTreeBytes) -> bool {
        babel::is_babel_tree(tree)
    }
}
