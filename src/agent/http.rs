use core::time::Duration;

use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AgentError;

use super::{AgentIo, AgentPort, BetReply, BetRequest, DecisionReply, HealthReply, TalkReply};

/// Outer limit on any single HTTP exchange. Per-call limits are tighter and
/// enforced by [`SeatAgent`](super::SeatAgent).
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// An agent reached over HTTP with JSON bodies.
///
/// Endpoints, relative to the base URL: `POST place_bet`, `POST decide`,
/// `POST table_talk` and `GET health`.
#[derive(Debug, Clone)]
pub struct HttpAgent {
    base_url: Url,
    client: Client,
}

impl HttpAgent {
    /// Creates an agent for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|err| AgentError::Transport(err.to_string()))?;
        let base_url =
            Url::parse(base_url).map_err(|err| AgentError::Transport(format!("{base_url}: {err}")))?;
        Ok(Self::with_client(base_url, client))
    }

    /// Creates an agent that reuses an existing client.
    #[must_use]
    pub fn with_client(mut base_url: Url, client: Client) -> Self {
        // Url::join replaces the last segment unless the path ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url, client }
    }

    /// The base URL endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, AgentError> {
        self.base_url
            .join(path)
            .map_err(|err| AgentError::Transport(err.to_string()))
    }

    async fn post<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, AgentError> {
        let url = self.endpoint(path)?;
        debug!(%url, "agent request");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| AgentError::Transport(err.to_string()))?;
        read_reply(response).await
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, AgentError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| AgentError::Transport(err.to_string()))?;
        read_reply(response).await
    }
}

async fn read_reply<R: DeserializeOwned>(response: Response) -> Result<R, AgentError> {
    let status = response.status();
    if !status.is_success() {
        return Err(AgentError::Status(status.as_u16()));
    }
    let body = response
        .bytes()
        .await
        .map_err(|err| AgentError::Transport(err.to_string()))?;
    serde_json::from_slice(&body).map_err(|err| AgentError::Malformed(err.to_string()))
}

#[async_trait::async_trait]
impl AgentPort for HttpAgent {
    async fn place_bet(&self, req: BetRequest) -> Result<BetReply, AgentError> {
        self.post("place_bet", &req).await
    }

    async fn decide(&self, io: AgentIo) -> Result<DecisionReply, AgentError> {
        self.post("decide", &io).await
    }

    async fn table_talk(&self, io: AgentIo) -> Result<TalkReply, AgentError> {
        self.post("table_talk", &io).await
    }

    async fn health_check(&self) -> Result<HealthReply, AgentError> {
        self.get("health").await
    }
}
