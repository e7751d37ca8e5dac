//! Supabase Store
//!
//! Reads the clients table through Supabase's PostgREST endpoint. Rows are
//! requested page by page because PostgREST caps each response at `max-rows`.

use super::ClientStore;
use crate::config::SupabaseConfig;
use crate::constants::{CREATED_AT_COLUMN, ERROR_BODY_PREVIEW_CHARS, ID_COLUMN};
use crate::domain::Client;
use crate::error::{Error, Result};
use crate::helpers::{trim_base_url, truncate_chars};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::future::Future;
use std::time::Duration;

/// PostgREST-backed client store
pub struct SupabaseStore {
    http: HttpClient,
    config: SupabaseConfig,
}

impl SupabaseStore {
    /// Create a store from connection settings
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Endpoint of the configured table
    pub fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            trim_base_url(&self.config.url),
            self.config.table
        )
    }

    async fn fetch_page(&self, offset: usize) -> Result<Vec<Client>> {
        let url = self.table_url();
        tracing::debug!(url = %url, offset, limit = self.config.page_size, "Requesting client page");

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
            .query(&page_query(offset, self.config.page_size))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                message: truncate_chars(&body, ERROR_BODY_PREVIEW_CHARS),
            });
        }

        parse_rows(&body)
    }
}

#[async_trait]
impl ClientStore for SupabaseStore {
    async fn fetch_clients(&self) -> Result<Vec<Client>> {
        collect_pages(self.config.page_size, |offset| self.fetch_page(offset)).await
    }
}

impl std::fmt::Debug for SupabaseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key deliberately omitted
        f.debug_struct("SupabaseStore")
            .field("url", &self.table_url())
            .field("page_size", &self.config.page_size)
            .finish()
    }
}

/// Query string for one page, ordered newest first with `id` as tiebreaker
pub fn page_query(offset: usize, limit: usize) -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        ("order", format!("{CREATED_AT_COLUMN}.desc,{ID_COLUMN}.desc")),
        ("offset", offset.to_string()),
        ("limit", limit.to_string()),
    ]
}

/// Decode a PostgREST body; an empty or `null` body is an empty page
pub fn parse_rows(body: &str) -> Result<Vec<Client>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let rows: Option<Vec<Client>> = serde_json::from_str(body)?;
    Ok(rows.unwrap_or_default())
}

/// Drain pages until one comes back empty; any failing page fails the whole read
///
/// A page shorter than `page_size` is not treated as the end, since the server
/// may cap responses below the requested limit.
pub async fn collect_pages<F, Fut>(page_size: usize, mut fetch_page: F) -> Result<Vec<Client>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<Client>>>,
{
    if page_size == 0 {
        return Err(Error::Invalid {
            message: "page size must be greater than zero".to_string(),
        });
    }

    let mut rows = Vec::new();
    loop {
        let page = fetch_page(rows.len()).await?;
        if page.is_empty() {
            break;
        }
        rows.extend(page);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::future::ready;

    fn client(id: &str, secs: i64) -> Client {
        Client::new(id, Utc.timestamp_opt(secs, 0).single().expect("valid ts"))
    }

    fn store(url: &str) -> SupabaseStore {
        SupabaseStore::new(SupabaseConfig {
            url: url.to_string(),
            api_key: "anon".to_string(),
            ..SupabaseConfig::default()
        })
        .expect("build store")
    }

    #[test]
    fn table_url_strips_trailing_slash() {
        assert_eq!(
            store("https://demo.supabase.co/").table_url(),
            "https://demo.supabase.co/rest/v1/clients"
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let rendered = format!("{:?}", store("https://demo.supabase.co"));
        assert!(!rendered.contains("anon"));
    }

    #[test]
    fn page_query_orders_by_creation_descending() {
        let query = page_query(2000, 1000);
        assert!(query.contains(&("order", "created_at.desc,id.desc".to_string())));
        assert!(query.contains(&("offset", "2000".to_string())));
        assert!(query.contains(&("limit", "1000".to_string())));
    }

    #[test]
    fn parse_rows_treats_empty_and_null_as_no_rows() {
        assert!(parse_rows("").expect("empty").is_empty());
        assert!(parse_rows("null").expect("null").is_empty());
        assert!(parse_rows("[]").expect("array").is_empty());
    }

    #[test]
    fn parse_rows_rejects_malformed_body() {
        assert!(matches!(parse_rows("{\"message\":"), Err(Error::Json { .. })));
        assert!(parse_rows(r#"[{"id": 1}]"#).is_err());
    }

    #[tokio::test]
    async fn collect_pages_reads_until_empty_page() {
        let all: Vec<Client> = (0..5).map(|i| client(&format!("c{i}"), 100 - i)).collect();
        let mut offsets = Vec::new();

        let rows = collect_pages(2, |offset| {
            offsets.push(offset);
            let end = (offset + 2).min(all.len());
            ready(Ok(all[offset..end].to_vec()))
        })
        .await
        .expect("collect");

        assert_eq!(rows, all);
        assert_eq!(offsets, vec![0, 2, 4, 5]);
    }

    #[tokio::test]
    async fn collect_pages_keeps_reading_when_server_caps_below_page_size() {
        let all: Vec<Client> = (0..5).map(|i| client(&format!("c{i}"), 100 - i)).collect();
        let server_max_rows = 2;
        let mut offsets = Vec::new();

        let rows = collect_pages(3, |offset| {
            offsets.push(offset);
            let start = offset.min(all.len());
            let end = (offset + server_max_rows).min(all.len());
            ready(Ok(all[start..end].to_vec()))
        })
        .await
        .expect("collect");

        assert_eq!(rows.len(), 5);
        assert_eq!(rows, all);
        assert_eq!(offsets, vec![0, 2, 4, 5]);
    }

    #[tokio::test]
    async fn collect_pages_fails_whole_read_on_page_error() {
        let result = collect_pages(1, |offset| {
            ready(if offset == 0 {
                Ok(vec![client("a", 1)])
            } else {
                Err(Error::Remote {
                    status: 503,
                    message: "unavailable".to_string(),
                })
            })
        })
        .await;

        assert!(matches!(result, Err(Error::Remote { status: 503, .. })));
    }
}
