use ergo_lib::ergo_chain_types::Digest32;
use ergo_lib::ergotree_ir::chain::token::TokenId;
use lazy_static::lazy_static;

use crate::data::ErgoTreeBytes;

/// Babel fee contract (EIP-31) is fully determined by the id of the token it trades.
/// Its tree is `PREFIX ++ token_id ++ SUFFIX`.
const BABEL_TREE_PREFIX: &str = "100604000e20";
const BABEL_TREE_SUFFIX: &str = "0400040005000500d803d601e30004d602e4c6a70408d603e4c6a7050595e67201d804d604b2a5e4720100d605b2db63087204730000d606db6308a7d60799c1a7c17204d1968302019683050193c27204c2a7938c720501730193e4c672040408720293e4c672040505720393e4c67204060ec5a796830201929c998c7205029591b1720673028cb272067303000273047203720792720773057202";

const TOKEN_ID_LEN: usize = 32;

lazy_static! {
    static ref BABEL_PREFIX_BYTES: Vec<u8> = base16::decode(BABEL_TREE_PREFIX).unwrap();
    static ref BABEL_SUFFIX_BYTES: Vec<u8> = base16::decode(BABEL_TREE_SUFFIX).unwrap();
}

/// Id of the token traded by the given babel box script.
/// `None` when the script is not a babel fee contract.
pub fn babel_token_id(tree: &ErgoTreeBytes) -> Option<TokenId> {
    let token_id = tree
        .as_bytes()
        .strip_prefix(BABEL_PREFIX_BYTES.as_slice())?
        .strip_suffix(BABEL_SUFFIX_BYTES.as_slice())?;
    if token_id.len() != TOKEN_ID_LEN {
        return None;
    }
    Digest32::try_from(token_id.to_vec()).ok().map(TokenId::from)
}

pub fn is_babel_tree(tree: &ErgoTreeBytes) -> bool {
    babel_token_id(tree).is_some()
}

/// Babel fee contract trading the given token.
pub fn babel_contract_for(token_id: TokenId) -> ErgoTreeBytes {
    let mut bytes = BABEL_PREFIX_BYTES.clone();
    bytes.extend_from_slice(&<Vec<u8>>::from(token_id));
    bytes.extend_from_slice(&BABEL_SUFFIX_BYTES);
    ErgoTreeBytes::from(bytes)
}
