//! ZTNET REST API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use ztnet_dns_application::MembershipProvider;
use ztnet_dns_domain::{DomainError, Member, NetworkInfo};

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the ZTNET controller REST API.
///
/// Authenticates with a bearer token; every call carries the client-wide
/// timeout so a stalled controller cannot wedge a refresh cycle.
pub struct ZtnetApiClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl ZtnetApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| DomainError::ApiRequest(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, DomainError> {
        debug!(url = %url, "fetching from ZTNET API");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DomainError::ApiRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::ApiStatus(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::ApiDecode(e.to_string()))
    }
}

#[async_trait]
impl MembershipProvider for ZtnetApiClient {
    async fn network_info(&self, network_id: &str) -> Result<NetworkInfo, DomainError> {
        let url = format!("{}/api/v1/network/{}/", self.base_url, network_id);
        let response: NetworkInfoResponse = self.get_json(url).await?;
        Ok(NetworkInfo {
            rfc4193: response.v6_assign_mode.rfc4193,
            six_plane: response.v6_assign_mode.six_plane,
        })
    }

    async fn members(&self, network_id: &str) -> Result<Vec<Member>, DomainError> {
        let url = format!("{}/api/v1/network/{}/member/", self.base_url, network_id);
        let response: Vec<MemberResponse> = self.get_json(url).await?;
        Ok(normalize_members(response))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct NetworkInfoResponse {
    #[serde(default, rename = "v6AssignMode")]
    v6_assign_mode: V6AssignMode,
}

#[derive(Debug, Default, Deserialize)]
struct V6AssignMode {
    #[serde(default, rename = "6plane")]
    six_plane: bool,
    #[serde(default)]
    rfc4193: bool,
}

#[derive(Debug, Default, Deserialize)]
struct MemberResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    authorized: bool,
    #[serde(default, rename = "ipAssignments")]
    ip_assignments: Vec<String>,
}

/// Keep authorized members only; lowercase ids, underscore display names,
/// and drop any assignment that is not a valid IPv4 address.
fn normalize_members(raw: Vec<MemberResponse>) -> Vec<Member> {
    raw.into_iter()
        .filter(|m| m.authorized)
        .map(|m| Member {
            id: m.id.to_lowercase(),
            name: m.name.replace(' ', "_"),
            ipv4: m
                .ip_assignments
                .iter()
                .filter_map(|ip| ip.parse().ok())
                .collect(),
        })
        .collect()
}
