//! Whole-tab endpoint composing every slot of a dashboard tab

use std::{fmt, str::FromStr};

use crate::{
    routes::{clients, onchain, staking},
    state::ApiState,
};
use api_types::{ErrorResponse, SlotItem, SlotResult, TabResponse};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

/// Navigational tabs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Client diversity
    Client,
    /// Staking
    Staking,
    /// On-chain statistics
    OnChain,
}

impl Tab {
    /// Every tab, in navigation order.
    pub const ALL: [Self; 3] = [Self::Client, Self::Staking, Self::OnChain];

    /// Path segment of the tab.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Staking => "staking",
            Self::OnChain => "on-chain",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = ErrorResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| ErrorResponse::not_found(format!("Unknown tab: {s}")))
    }
}

fn slot<T: Serialize>(name: &str, result: Result<T, ErrorResponse>) -> SlotItem {
    let result = result.and_then(|data| {
        serde_json::to_value(data).map_err(|e| {
            tracing::error!(slot = name, error = %e, "Failed to serialize slot");
            ErrorResponse::database_error()
        })
    });
    let result = match result {
        Ok(data) => SlotResult::Ok { data },
        Err(error) => SlotResult::Error { error },
    };
    SlotItem { name: name.to_owned(), result }
}

async fn tab_slots(tab: Tab, state: &ApiState) -> Vec<SlotItem> {
    match tab {
        Tab::Client => vec![
            slot("client_info", clients::client_info_data(state).await),
            slot("hosting", clients::hosting_data(state).await),
            slot("first_proposals", clients::first_proposals_data(state).await),
            slot("proposals", clients::proposals_data(state).await),
            slot("performance", clients::performance_data(state).await),
            slot("performance_quartiles", clients::performance_quartiles_data(state).await),
        ],
        Tab::Staking => vec![
            slot("overview", staking::overview_data(state).await),
            slot("validator_signups", staking::validator_signups_data(state).await),
            slot("depositor_signups", staking::depositor_signups_data(state).await),
            slot("depositors", staking::depositors_data(state).await),
            slot("performance", staking::performance_data(state).await),
            slot("performance_quartiles", staking::performance_quartiles_data(state).await),
            slot("diversity", staking::diversity_data(state).await),
        ],
        Tab::OnChain => vec![slot("block_stats", onchain::block_stats_data(state).await)],
    }
}

#[utoipa::path(
    get,
    path = "/tabs/{tab}",
    params(
        ("tab" = String, Path, description = "Tab name: client, staking or on-chain")
    ),
    responses(
        (status = 200, description = "Every slot of the tab, each with its own status", body = TabResponse),
        (status = 404, description = "Unknown tab", body = ErrorResponse)
    ),
    tag = "tabs"
)]
/// Get every slot of a dashboard tab. A failing slot carries its own error
/// and does not affect the others.
pub async fn tab(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<Json<TabResponse>, ErrorResponse> {
    let tab: Tab = name.parse()?;
    let slots = tab_slots(tab, &state).await;
    let failed = slots.iter().filter(|s| !s.result.is_ok()).count();
    if failed > 0 {
        tracing::warn!(tab = %tab, failed, "Tab rendered with failed slots");
    }
    Ok(Json(TabResponse { tab: tab.to_string(), slots }))
}
