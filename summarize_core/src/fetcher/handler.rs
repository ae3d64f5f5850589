use std::time::Duration;

use reqwest::{redirect::Policy, Client, Url};

use crate::error::{FetchError, FetchResult};
use crate::fetcher::helpers::strip_markup;

const USER_AGENT: &str = concat!("summarize_core/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }

    pub async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        log::debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let html = response.text().await?;

        Ok(strip_markup(&html))
    }
}
