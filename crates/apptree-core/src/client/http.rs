//! [`AppClient`] backed by the admin HTTP API.
//!
//! Requests are async (reqwest) but the engine is synchronous, so the client
//! owns a private tokio runtime and blocks on each call.

use anyhow::{Context, anyhow};
use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tokio::runtime::Runtime;
use url::Url;

use super::{App, AppClient, AppFilter, Export, ExportRequest, ImportRequest};
use crate::error::{Error, Result};

/// Environment variable holding the admin API access token.
pub const ACCESS_TOKEN_ENV: &str = "APPTREE_ACCESS_TOKEN";

const API_PREFIX: [&str; 3] = ["api", "admin", "v3.0"];

pub struct HttpAppClient {
    base_url: Url,
    client: reqwest::Client,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpAppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAppClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpAppClient {
    pub fn new(base_url: Url, token: Option<&str>) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .context("Access token is not a valid header value")?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("apptree/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        let runtime = Runtime::new().context("Failed to start async runtime")?;

        Ok(Self {
            base_url,
            client,
            runtime,
        })
    }

    /// Build a client using the token from [`ACCESS_TOKEN_ENV`], if set.
    pub fn from_env(base_url: Url) -> anyhow::Result<Self> {
        let token = std::env::var(ACCESS_TOKEN_ENV).ok();
        if token.is_none() {
            tracing::warn!("{} is not set, requests will be unauthenticated", ACCESS_TOKEN_ENV);
        }
        Self::new(base_url, token.as_deref())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    fn import_url(
        &self,
        group_id: &str,
        app_id: &str,
        request: &ImportRequest,
    ) -> anyhow::Result<Url> {
        let mut url = self.endpoint(&["groups", group_id, "apps", app_id, "import"])?;
        if request.include_dependencies || request.include_hosting {
            let mut query = url.query_pairs_mut();
            if request.include_dependencies {
                query.append_pair("include_dependencies", "true");
            }
            if request.include_hosting {
                query.append_pair("include_hosting", "true");
            }
        }
        Ok(url)
    }

    async fn list_apps(&self, group_id: &str) -> anyhow::Result<Vec<App>> {
        let url = self.endpoint(&["groups", group_id, "apps"])?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await.context("Request failed")?;
        let response = check_status(response).await?;
        response
            .json::<Vec<App>>()
            .await
            .context("Failed to decode app listing")
    }

    async fn download(
        &self,
        group_id: &str,
        app_id: &str,
        request: &ExportRequest,
    ) -> anyhow::Result<Export> {
        let mut url = self.endpoint(&["groups", group_id, "apps", app_id, "export"])?;
        {
            let mut query = url.query_pairs_mut();
            if request.is_templated {
                query.append_pair("template", "true");
            }
            if !request.config_version.is_zero() {
                query.append_pair("version", &request.config_version.to_string());
            }
            if request.include_dependencies {
                query.append_pair("include_dependencies", "true");
            }
            if request.include_hosting {
                query.append_pair("include_hosting", "true");
            }
        }
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await.context("Request failed")?;
        let response = check_status(response).await?;
        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_file_name)
            .unwrap_or_else(|| format!("{}.zip", app_id));
        let archive = response
            .bytes()
            .await
            .context("Failed to download export")?
            .to_vec();

        Ok(Export { file_name, archive })
    }

    async fn upload(
        &self,
        group_id: &str,
        app_id: &str,
        archive: &[u8],
        request: &ImportRequest,
    ) -> anyhow::Result<()> {
        let url = self.import_url(group_id, app_id, request)?;
        tracing::debug!("POST {} ({} bytes)", url, archive.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/zip")
            .body(archive.to_vec())
            .send()
            .await
            .context("Request failed")?;
        check_status(response).await?;
        Ok(())
    }
}

impl AppClient for HttpAppClient {
    fn find_apps(&self, filter: &AppFilter) -> Result<Vec<App>> {
        if filter.group_id.is_empty() {
            return Err(Error::Remote(anyhow!(
                "a project id is required to look up apps (use --project)"
            )));
        }

        let apps = self
            .runtime
            .block_on(self.list_apps(&filter.group_id))
            .map_err(Error::Remote)?;

        Ok(apps
            .into_iter()
            .filter(|app| app.matches(&filter.app))
            .map(|mut app| {
                if app.group_id.is_empty() {
                    app.group_id = filter.group_id.clone();
                }
                app
            })
            .collect())
    }

    fn export(&self, group_id: &str, app_id: &str, request: &ExportRequest) -> Result<Export> {
        self.runtime
            .block_on(self.download(group_id, app_id, request))
            .map_err(Error::Remote)
    }

    fn import(
        &self,
        group_id: &str,
        app_id: &str,
        archive: &[u8],
        request: &ImportRequest,
    ) -> Result<()> {
        self.runtime
            .block_on(self.upload(group_id, app_id, archive, request))
            .map_err(Error::Remote)
    }
}

async fn check_status(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!("admin API error: {} - {}", status, body);
    Err(anyhow!("HTTP {}: {}", status, server_message(&body)))
}

/// Prefer the `error` field of a JSON error body, else the raw text.
fn server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn attachment_file_name(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|part| {
        part.strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
            .filter(|name| !name.is_empty())
    })
}
