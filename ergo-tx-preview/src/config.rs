use std::collections::HashSet;

use ergo_lib::ergotree_ir::chain::address::NetworkPrefix;
use serde::Deserialize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl From<Network> for NetworkPrefix {
    fn from(network: Network) -> Self {
        match network {
            Network::Mainnet => NetworkPrefix::Mainnet,
            Network::Testnet => NetworkPrefix::Testnet,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    pub network: Network,
    pub log4rs_path: String,
    /// Addresses of the local wallet. Outputs to them are marked as intra-wallet.
    #[serde(default)]
    pub owned_addresses: Option<HashSet<String>>,
}

#[cfg(test)]
mod tests {
    use crate::config::{Network, PreviewConfig};

    #[test]
    fn parse_config() {
        let conf: PreviewConfig = serde_yaml::from_str(
            r#"
network: testnet
log4rs_path: conf/log4rs.yaml
owned_addresses:
  - 3WwXpssaZwcNzaGMv3AgxBdTPJQBt5gCmqBsg3DykQ39bYdhJBsN
"#,
        )
        .unwrap();
        assert_eq!(conf.network, Network::Testnet);
        assert_eq!(conf.owned_addresses.map(|a| a.len()), Some(1));
    }

    #[test]
    fn owned_addresses_are_optional() {
        let conf: PreviewConfig =
            serde_yaml::from_str("network: mainnet\nlog4rs_path: conf/log4rs.yaml\n").unwrap();
        assert!(conf.owned_addresses.is_none());
    }
}
