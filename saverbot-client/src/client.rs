//! HTTP wrapper around the archive API with saverbot defaults.
//!
//! Handles endpoint normalization, User-Agent shaping, and path-segment
//! encoding before delegating to the shared HTTP client. Every call is
//! single-shot: a transient failure surfaces to the caller instead of being
//! retried here.

use crate::types::{
    ApiEnvelope, Article, ArticleCount, ArticleHistory, SaveTaskRequest, Task, TaskCreated,
};
use crate::{lift, SaverError};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use saverbot_http::{HttpClient, RequestOpts};
use std::borrow::Cow;
use url::Url;

#[derive(Clone)]
pub struct SaverApi {
    http: HttpClient,
    base: Url,
    headers: HeaderMap,
}

/// Optional filters for [`SaverApi::recent_articles`].
#[derive(Debug, Clone, Default)]
pub struct RecentQuery {
    pub count: Option<u32>,
    pub updated_after: Option<String>,
    pub truncated_count: Option<u32>,
}

impl SaverApi {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.luogu.me";
    pub const DEFAULT_USER_AGENT: &'static str = "Uptime-Kuma";

    pub fn new(endpoint: &str, user_agent: &str) -> Result<Self, SaverError> {
        let base = Url::parse(endpoint.trim_end_matches('/'))
            .map_err(|e| SaverError::Endpoint(e.to_string()))?;
        let http = HttpClient::new(base.as_str()).map_err(lift)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(|e| SaverError::UserAgent(e.to_string()))?,
        );

        Ok(Self { http, base, headers })
    }

    /// `GET /article/query/<id>`. The identifier goes into the URL as a
    /// single path segment, percent-encoded; URL-safe identifiers pass
    /// through byte-for-byte.
    pub async fn query_article(&self, id: &str) -> Result<ApiEnvelope<Article>, SaverError> {
        let url = self.url(&["article", "query", id])?;
        tracing::debug!(target: "saver.api", article_id = %id, "article.query.start");
        self.http
            .get_json(url.as_str(), self.opts())
            .await
            .map_err(lift)
    }

    /// `GET /article/recent` with optional `count` / `updated_after` /
    /// `truncated_count` filters.
    pub async fn recent_articles(
        &self,
        query: &RecentQuery,
    ) -> Result<ApiEnvelope<Vec<Article>>, SaverError> {
        let url = self.url(&["article", "recent"])?;

        let mut params: Vec<(&str, Cow<'_, str>)> = Vec::new();
        if let Some(count) = query.count {
            params.push(("count", count.to_string().into()));
        }
        if let Some(after) = &query.updated_after {
            params.push(("updated_after", after.as_str().into()));
        }
        if let Some(truncated) = query.truncated_count {
            params.push(("truncated_count", truncated.to_string().into()));
        }

        let mut opts = self.opts();
        if !params.is_empty() {
            opts.query = Some(params);
        }
        self.http.get_json(url.as_str(), opts).await.map_err(lift)
    }

    /// `GET /article/count`.
    pub async fn article_count(&self) -> Result<ApiEnvelope<ArticleCount>, SaverError> {
        let url = self.url(&["article", "count"])?;
        self.http
            .get_json(url.as_str(), self.opts())
            .await
            .map_err(lift)
    }

    /// `GET /article/relevant/<id>`.
    pub async fn relevant_articles(
        &self,
        id: &str,
    ) -> Result<ApiEnvelope<Vec<Article>>, SaverError> {
        let url = self.url(&["article", "relevant", id])?;
        self.http
            .get_json(url.as_str(), self.opts())
            .await
            .map_err(lift)
    }

    /// `GET /article/history/<id>`.
    pub async fn article_history(
        &self,
        id: &str,
    ) -> Result<ApiEnvelope<Vec<ArticleHistory>>, SaverError> {
        let url = self.url(&["article", "history", id])?;
        self.http
            .get_json(url.as_str(), self.opts())
            .await
            .map_err(lift)
    }

    /// `POST /task/create` with a JSON body describing the task.
    pub async fn create_task(
        &self,
        req: &SaveTaskRequest,
    ) -> Result<ApiEnvelope<TaskCreated>, SaverError> {
        let url = self.url(&["task", "create"])?;
        tracing::debug!(target: "saver.api", target_kind = %req.payload.target, "task.create.start");
        self.http
            .post_json(url.as_str(), req, self.opts())
            .await
            .map_err(lift)
    }

    /// `GET /task/query/<id>`.
    pub async fn query_task(&self, id: &str) -> Result<ApiEnvelope<Task>, SaverError> {
        let url = self.url(&["task", "query", id])?;
        self.http
            .get_json(url.as_str(), self.opts())
            .await
            .map_err(lift)
    }

    fn opts(&self) -> RequestOpts<'_> {
        RequestOpts {
            headers: Some(self.headers.clone()),
            // Single-shot: failures surface to the caller as-is.
            retries: Some(0),
            allow_absolute: true,
            ..Default::default()
        }
    }

    fn url(&self, segments: &[&str]) -> Result<Url, SaverError> {
        let mut url = self.base.clone();
        {
            let mut parts = url
                .path_segments_mut()
                .map_err(|_| SaverError::Endpoint("endpoint cannot be a base URL".into()))?;
            parts.pop_if_empty();
            parts.extend(segments);
        }
        Ok(url)
    }
}
