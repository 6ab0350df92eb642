use std::time::Duration;

use async_trait::async_trait;
use tracing::info;
use tsync_types::Table;

use crate::error::{SourceError, SourceResult};
use crate::extract::HtmlTableExtractor;
use crate::traits::SourceTableProvider;

const USER_AGENT: &str = concat!("tablesync/", env!("CARGO_PKG_VERSION"));

/// Scrapes the authoritative table from a web page.
#[derive(Clone, Debug)]
pub struct HttpTableSource {
    url: String,
    extractor: HtmlTableExtractor,
    client: reqwest::Client,
}

impl HttpTableSource {
    pub fn new(
        url: impl Into<String>,
        extractor: HtmlTableExtractor,
        timeout: Duration,
    ) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { url: url.into(), extractor, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SourceTableProvider for HttpTableSource {
    async fn fetch(&self) -> SourceResult<Table> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http { status: status.as_u16(), url: self.url.clone() });
        }
        let body = response.text().await?;
        let table = self.extractor.extract(&body)?;
        info!(url = %self.url, rows = table.len(), "data scraped");
        Ok(table)
    }
}
