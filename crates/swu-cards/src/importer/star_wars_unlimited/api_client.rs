//! Module for HTTPS client for https://admin.starwarsunlimited.com/api/

use std::collections::VecDeque;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use reqwest::Client as ReqwestClient;
use url::Url;

use crate::{Error, Result};

const API_BASE: &str = "https://admin.starwarsunlimited.com/api/";

/// Records requested per page of the paginated card-list endpoint.
pub const PAGE_SIZE: u32 = 50;

pub struct ClientBuilder {
    endpoint: Option<String>,
    cache_dir: Option<PathBuf>,
}

impl ClientBuilder {
    pub fn new() -> ClientBuilder {
        ClientBuilder {
            endpoint: None,
            cache_dir: None,
        }
    }

    pub fn build(self) -> Result<Client> {
        let endpoint = match self.endpoint {
            Some(endpoint) => {
                // Validate up front so a bad override fails before page one.
                Url::parse(&endpoint)?;
                endpoint
            }
            None => API_BASE.to_string(),
        };

        Ok(Client {
            client: ReqwestClient::new(),
            endpoint,
            cache_dir: self.cache_dir,
        })
    }

    /// Override the API base URL, e.g. for a mirror or a fixture server.
    pub fn endpoint(mut self, endpoint: String) -> ClientBuilder {
        self.endpoint = Some(endpoint);
        self
    }

    /// Store raw response bodies under the given directory, and serve them
    /// from there on later runs. There is no invalidation; delete the
    /// directory to force a refresh.
    pub fn cache_dir(mut self, cache_dir: PathBuf) -> ClientBuilder {
        self.cache_dir = Some(cache_dir);
        self
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub enum ApiEndpoint {
    /// One page of the card list, 1-based.
    CardList { page: u32 },

    // User-specified
    Other(String),
}

fn url_for_endpoint(base: &str, endpoint: &ApiEndpoint) -> String {
    use ApiEndpoint::*;
    match endpoint {
        CardList { page } => format!(
            "{base}card-list?locale=en&sort[0]=cardNumber&pagination[page]={page}&pagination[pageSize]={PAGE_SIZE}"
        ),
        Other(raw_path) => format!("{base}{raw_path}"),
    }
}

fn cache_filename(endpoint: &ApiEndpoint) -> String {
    use ApiEndpoint::*;
    match endpoint {
        CardList { page } => format!("card-list-p{page}.json"),
        Other(raw_path) => format!("other-{}.json", raw_path.replace('/', "_")),
    }
}

pub struct Client {
    client: ReqwestClient,
    endpoint: String,
    cache_dir: Option<PathBuf>,
}

impl Client {
    pub async fn fetch(&self, endpoint: &ApiEndpoint) -> Result<Box<dyn Read>> {
        if let Some(cache_dir) = &self.cache_dir {
            let cached = cache_dir.join(cache_filename(endpoint));
            if cached.is_file() {
                return Ok(Box::new(fs::File::open(cached)?));
            }
        }

        let url = url_for_endpoint(&self.endpoint, endpoint);
        let response = self.client.get(&url).send().await?;
        if let Err(source) = response.error_for_status_ref() {
            // reqwest's own error loses the reason phrase, so build ours
            // from the status line.
            let reason = match source.status() {
                Some(status) => status.to_string(),
                None => source.to_string(),
            };
            return Err(Error::TransportFailure { url, reason });
        }
        let body = response.text().await?;

        if let Some(cache_dir) = &self.cache_dir {
            fs::create_dir_all(cache_dir)?;
            fs::write(cache_dir.join(cache_filename(endpoint)), &body)?;
        }

        Ok(Box::new(VecDeque::from(body.into_bytes())))
    }
}
