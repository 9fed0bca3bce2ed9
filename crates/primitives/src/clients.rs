use std::{fmt, str::FromStr};

use serde::Serialize;
use utoipa::ToSchema;

/// Consensus layer client implementations tracked by the dashboard.
///
/// The set is closed: names outside of it fail to parse and are expected to
/// be counted in an explicit "other" bucket by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
pub enum ConsensusClient {
    /// Sigma Prime's Lighthouse
    Lighthouse,
    /// ChainSafe's Lodestar
    Lodestar,
    /// Status' Nimbus
    Nimbus,
    /// Prysmatic Labs' Prysm
    Prysm,
    /// Consensys' Teku
    Teku,
}

impl ConsensusClient {
    /// All known clients, in the order used for diversity vectors.
    pub const ALL: [Self; 5] =
        [Self::Lighthouse, Self::Lodestar, Self::Nimbus, Self::Prysm, Self::Teku];

    /// Display name as stored in the telemetry tables.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lighthouse => "Lighthouse",
            Self::Lodestar => "Lodestar",
            Self::Nimbus => "Nimbus",
            Self::Prysm => "Prysm",
            Self::Teku => "Teku",
        }
    }

    /// Position of the client inside [`Self::ALL`].
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ConsensusClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a client name is not part of [`ConsensusClient::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown consensus client: {0}")]
pub struct UnknownClient(pub String);

impl FromStr for ConsensusClient {
    type Err = UnknownClient;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownClient(s.to_owned()))
    }
}
