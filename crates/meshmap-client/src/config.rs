//! Client configuration from environment variables.

use meshmap_core::NetworkNumber;
use tracing::warn;

const DEFAULT_SERVER_URL: &str = "http://localhost:3000/";

/// Network numbers of the default gateway set for path-to-internet queries.
const DEFAULT_GATEWAYS: [u32; 2] = [713, 227];

/// Topology service endpoint and the known gateway set.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub gateways: Vec<NetworkNumber>,
}

impl ClientConfig {
    /// Create from environment variables.
    ///
    /// `MESHMAP_SERVER_URL` — topology service base URL.
    /// `MESHMAP_GATEWAYS` — comma-separated gateway network numbers;
    /// entries that fail to parse are skipped with a warning.
    pub fn from_env() -> Self {
        let server_url = std::env::var("MESHMAP_SERVER_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_owned());

        let gateways = match std::env::var("MESHMAP_GATEWAYS") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|s| match s.parse::<NetworkNumber>() {
                    Ok(nn) => Some(nn),
                    Err(_) => {
                        warn!(entry = %s, "skipping unparseable gateway network number");
                        None
                    }
                })
                .collect(),
            Err(_) => Self::default_gateways(),
        };

        Self {
            server_url,
            gateways,
        }
    }

    /// Defaults without touching the environment — tests and embedding.
    pub fn with_server_url(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            gateways: Self::default_gateways(),
        }
    }

    fn default_gateways() -> Vec<NetworkNumber> {
        DEFAULT_GATEWAYS.into_iter().map(NetworkNumber).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let config = ClientConfig::with_server_url("http://topo.mesh:3000");
        assert_eq!(config.server_url, "http://topo.mesh:3000");
        assert_eq!(
            config.gateways,
            vec![NetworkNumber(713), NetworkNumber(227)]
        );
    }
}
