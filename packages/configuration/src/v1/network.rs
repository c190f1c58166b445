use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Network {
    /// Weather the tracker is behind a reverse proxy or not.
    /// If the tracker is behind a reverse proxy, the `X-Forwarded-For` header
    /// sent from the proxy will be used to get the client's IP address.
    #[serde(default = "Network::default_on_reverse_proxy")]
    pub on_reverse_proxy: bool,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            on_reverse_proxy: Self::default_on_reverse_proxy(),
        }
    }
}

impl Network {
    fn default_on_reverse_proxy() -> bool {
        false
    }
}
