//! Token catalogue seam.
//!
//! The matchers take pre-fetched token slices. Anything that has to fetch
//! tokens first implements [`TokenCatalogue`]; the async `match_*` wrappers
//! await that single fetch and then delegate to the synchronous core.

use reqwest::{header::RETRY_AFTER, Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::data_file::read_data_file_async;
use crate::error::{DqaError, Result};
use crate::types::{ColorToken, TokenSet, TypographyToken};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const CATALOGUE_TOKEN_ENV: &str = "DQA_CATALOGUE_TOKEN";

/// Source of design tokens for one theme.
pub trait TokenCatalogue: Send + Sync {
    fn color_tokens(&self) -> impl Future<Output = Result<Vec<ColorToken>>> + Send;

    fn typography_tokens(&self) -> impl Future<Output = Result<Vec<TypographyToken>>> + Send;

    /// Both token kinds, fetched concurrently.
    fn token_set(&self) -> impl Future<Output = Result<TokenSet>> + Send {
        async move {
            let (colors, typography) =
                futures::try_join!(self.color_tokens(), self.typography_tokens())?;
            Ok(TokenSet { colors, typography })
        }
    }
}

impl TokenCatalogue for TokenSet {
    fn color_tokens(&self) -> impl Future<Output = Result<Vec<ColorToken>>> + Send {
        std::future::ready(Ok(self.colors.clone()))
    }

    fn typography_tokens(&self) -> impl Future<Output = Result<Vec<TypographyToken>>> + Send {
        std::future::ready(Ok(self.typography.clone()))
    }
}

/// Tokens exported to a JSON, YAML or TOML file.
#[derive(Debug, Clone)]
pub struct FileCatalogue {
    path: PathBuf,
}

impl FileCatalogue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<TokenSet> {
        let set: TokenSet = read_data_file_async(&self.path).await?;
        debug!(
            path = %self.path.display(),
            colors = set.colors.len(),
            typography = set.typography.len(),
            "loaded token file"
        );
        Ok(set)
    }
}

impl TokenCatalogue for FileCatalogue {
    fn color_tokens(&self) -> impl Future<Output = Result<Vec<ColorToken>>> + Send {
        async move { Ok(self.load().await?.colors) }
    }

    fn typography_tokens(&self) -> impl Future<Output = Result<Vec<TypographyToken>>> + Send {
        async move { Ok(self.load().await?.typography) }
    }

    fn token_set(&self) -> impl Future<Output = Result<TokenSet>> + Send {
        self.load()
    }
}

#[derive(Debug, Clone)]
pub enum CatalogueAuth {
    Anonymous,
    Bearer(String),
}

impl CatalogueAuth {
    pub fn from_env() -> Self {
        match std::env::var(CATALOGUE_TOKEN_ENV) {
            Ok(token) if !token.is_empty() => CatalogueAuth::Bearer(token),
            _ => CatalogueAuth::Anonymous,
        }
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            CatalogueAuth::Anonymous => builder,
            CatalogueAuth::Bearer(token) => builder.bearer_auth(token),
        }
    }
}

/// Remote catalogue serving `GET <base>/themes/<theme>/tokens` as a [`TokenSet`].
#[derive(Debug, Clone)]
pub struct HttpCatalogue {
    http: Client,
    auth: CatalogueAuth,
    base_url: Url,
    theme_id: String,
}

impl HttpCatalogue {
    pub fn new(base_url: impl AsRef<str>, theme_id: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, theme_id, DEFAULT_TIMEOUT, CatalogueAuth::from_env())
    }

    pub fn with_timeout(
        base_url: impl AsRef<str>,
        theme_id: impl Into<String>,
        timeout: Duration,
        auth: CatalogueAuth,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        let theme_id = theme_id.into();
        if theme_id.trim().is_empty() {
            return Err(DqaError::Config(
                "a theme id is required when fetching tokens from a catalogue URL".into(),
            ));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DqaError::Network)?;

        Ok(Self {
            http,
            auth,
            base_url,
            theme_id,
        })
    }

    pub fn tokens_url(&self) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DqaError::Config(format!(
                    "catalogue URL cannot be a base: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["themes", self.theme_id.as_str(), "tokens"]);
        Ok(url)
    }

    pub async fn fetch(&self) -> Result<TokenSet> {
        let url = self.tokens_url()?;
        debug!(%url, "fetching design tokens");
        let request = self.auth.apply(self.http.get(url));
        let response = request.send().await.map_err(DqaError::Network)?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body).map_err(DqaError::Serialization);
        }

        Err(DqaError::catalogue(
            Some(status),
            error_message(status, &body, retry_after.as_deref()),
        ))
    }
}

impl TokenCatalogue for HttpCatalogue {
    fn color_tokens(&self) -> impl Future<Output = Result<Vec<ColorToken>>> + Send {
        async move { Ok(self.fetch().await?.colors) }
    }

    fn typography_tokens(&self) -> impl Future<Output = Result<Vec<TypographyToken>>> + Send {
        async move { Ok(self.fetch().await?.typography) }
    }

    fn token_set(&self) -> impl Future<Output = Result<TokenSet>> + Send {
        self.fetch()
    }
}

fn error_message(status: StatusCode, body: &str, retry_after: Option<&str>) -> String {
    let fallback = format!("token catalogue returned status {}", status.as_u16());
    let from_body = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("error").or_else(|| value.get("message")))
        .and_then(Value::as_str)
        .map(str::to_owned);

    match (status, retry_after, from_body) {
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), Some(msg)) => {
            format!("{msg} (rate limited, retry after {retry}s)")
        }
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), None) => {
            format!("rate limited by token catalogue, retry after {retry}s")
        }
        (_, _, Some(msg)) => msg,
        _ => fallback,
    }
}
