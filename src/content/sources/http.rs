//! Workbook fetched over HTTP(S).

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::content::{LoadError, WorkbookSource};

pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl WorkbookSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        info!("Fetching workbook from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        debug!("Workbook response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Workbook fetch failed: HTTP {} for {}", status, self.url);
            return Err(LoadError::Http {
                status,
                url: self.url.clone(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        info!("Fetched {} bytes from {}", bytes.len(), self.url);
        Ok(bytes.to_vec())
    }
}
