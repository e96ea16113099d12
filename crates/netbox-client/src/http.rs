//! HTTP client for the NetBox REST API

use std::collections::HashSet;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use netbox_api::responses::{Created, Device, NestedRef, Paginated};

use crate::config::NetboxConfig;
use crate::error::{ClientError, Result};

/// Endpoint for device listing
pub const DEVICES_PATH: &str = "dcim/devices/";

/// Site endpoint, also used as the reachability check
pub const SITES_PATH: &str = "dcim/sites/";

/// Endpoint for rack lookup
pub const RACKS_PATH: &str = "dcim/racks/";

/// HTTP client for a single NetBox instance
#[derive(Debug, Clone)]
pub struct NetboxClient {
    client: Client,
    base_url: Url,
}

impl NetboxClient {
    /// Create a new client from connection settings
    ///
    /// # Errors
    /// Returns an error if the URL is invalid, the token is not a valid
    /// header value, or the underlying HTTP client cannot be built.
    ///
    /// # Example
    /// ```no_run
    /// use netbox_client::{NetboxClient, NetboxConfig};
    ///
    /// let config = NetboxConfig::new("http://localhost:8000/api").with_token("0123abcd");
    /// let client = NetboxClient::new(&config)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(config: &NetboxConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Token {token}"))
                .map_err(|e| ClientError::InvalidHeader(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Self::with_client(&config.url, client)
    }

    /// Create a new client with a custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(base_url: impl AsRef<str>, client: Client) -> Result<Self> {
        let mut raw = base_url.as_ref().trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)?;
        Ok(Self { client, base_url })
    }

    /// API root this client talks to
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL from a path relative to the API root
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(ClientError::Url)
    }

    /// Perform a GET request and deserialize the response
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    /// Collect every page of a list endpoint, starting at `first`
    ///
    /// A `next` link pointing at a page already fetched is rejected instead
    /// of being followed again.
    async fn list_all<T: DeserializeOwned>(&self, first: Url) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(first);

        while let Some(url) = next.take() {
            if !visited.insert(url.clone()) {
                return Err(ClientError::InvalidResponse(format!(
                    "pagination loops back to {url}"
                )));
            }
            let page: Paginated<T> = self.get(url).await?;
            items.extend(page.results);
            next = page.next.as_deref().map(Url::parse).transpose()?;
        }

        Ok(items)
    }

    /// Check that the API answers an authenticated request
    ///
    /// # Errors
    /// Returns an error if the request fails or NetBox answers with a
    /// non-success status.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn check_connectivity(&self) -> Result<()> {
        let url = self.url(SITES_PATH)?;
        let _: serde_json::Value = self.get(url).await?;
        Ok(())
    }

    /// Look up a site by its exact name
    ///
    /// # Errors
    /// Returns an error if the request fails or NetBox returns an error status.
    #[instrument(skip(self))]
    pub async fn find_site(&self, name: &str) -> Result<Option<NestedRef>> {
        let mut url = self.url(SITES_PATH)?;
        url.query_pairs_mut().append_pair("name", name);

        let sites: Vec<NestedRef> = self.list_all(url).await?;
        debug!(matches = sites.len(), "site lookup");
        Ok(sites.into_iter().next())
    }

    /// Racks with the exact name `name`, optionally within one site
    ///
    /// Rack names are only unique inside a site, so without `site_id` the
    /// result may hold racks from several sites.
    ///
    /// # Errors
    /// Returns an error if the request fails or NetBox returns an error status.
    #[instrument(skip(self))]
    pub async fn find_racks(&self, name: &str, site_id: Option<u64>) -> Result<Vec<NestedRef>> {
        let mut url = self.url(RACKS_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("name", name);
            if let Some(site_id) = site_id {
                query.append_pair("site_id", &site_id.to_string());
            }
        }

        let racks: Vec<NestedRef> = self.list_all(url).await?;
        debug!(matches = racks.len(), "rack lookup");
        Ok(racks)
    }

    /// List devices with optional filters
    ///
    /// # Example
    /// ```no_run
    /// # use netbox_client::{NetboxClient, NetboxConfig};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = NetboxClient::new(&NetboxConfig::default())?;
    /// let devices = client.list_devices().status("active").send().await?;
    /// println!("{} active devices", devices.len());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn list_devices(&self) -> ListDevicesBuilder {
        ListDevicesBuilder::new(self.clone())
    }

    /// Create an object and return its id
    ///
    /// NetBox must answer `201 Created`; any other status is an error.
    ///
    /// # Errors
    /// Returns an error if the request fails, the status is not 201, or
    /// the response carries no `id`.
    #[instrument(skip(self, body))]
    pub async fn create<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<u64> {
        let mut path = endpoint.trim_matches('/').to_string();
        path.push('/');
        let url = self.url(&path)?;
        debug!(%url, "POST");

        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::CREATED {
            if status.is_success() {
                return Err(ClientError::UnexpectedStatus {
                    expected: StatusCode::CREATED.as_u16(),
                    status: status.as_u16(),
                    message: text,
                });
            }
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let created: Created = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("{e}: {text}")))?;
        Ok(created.id)
    }
}

/// Builder for listing devices with filters
#[derive(Debug, Clone)]
pub struct ListDevicesBuilder {
    client: NetboxClient,
    status: Option<String>,
    site_id: Option<u64>,
    rack_id: Option<u64>,
}

impl ListDevicesBuilder {
    fn new(client: NetboxClient) -> Self {
        Self {
            client,
            status: None,
            site_id: None,
            rack_id: None,
        }
    }

    /// Filter by status value (`active`, `planned`, ...)
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Filter by site id
    #[must_use]
    pub fn site_id(mut self, site_id: u64) -> Self {
        self.site_id = Some(site_id);
        self
    }

    /// Filter by rack id
    #[must_use]
    pub fn rack_id(mut self, rack_id: u64) -> Self {
        self.rack_id = Some(rack_id);
        self
    }

    /// URL of the first page
    fn first_page_url(&self) -> Result<Url> {
        let mut url = self.client.url(DEVICES_PATH)?;

        {
            let mut query = url.query_pairs_mut();
            if let Some(status) = &self.status {
                query.append_pair("status", status);
            }
            if let Some(site_id) = self.site_id {
                query.append_pair("site_id", &site_id.to_string());
            }
            if let Some(rack_id) = self.rack_id {
                query.append_pair("rack_id", &rack_id.to_string());
            }
        }

        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(url)
    }

    /// Execute the request, following `next` links until the last page
    ///
    /// # Errors
    /// Returns an error if any page request fails, NetBox returns an error
    /// status, or a `next` link revisits a page.
    #[instrument(skip(self), fields(status = ?self.status, site_id = ?self.site_id, rack_id = ?self.rack_id))]
    pub async fn send(self) -> Result<Vec<Device>> {
        let devices: Vec<Device> = self.client.list_all(self.first_page_url()?).await?;
        debug!(count = devices.len(), "listed devices");
        Ok(devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = NetboxClient::new(&NetboxConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = NetboxClient::new(&NetboxConfig::new("not a url"));
        assert!(client.is_err());
    }

    #[test]
    fn test_invalid_token() {
        let config = NetboxConfig::default().with_token("bad\ntoken");
        let err = NetboxClient::new(&config).unwrap_err();
        assert!(matches!(err, ClientError::InvalidHeader(_)));
    }

    #[test]
    fn test_url_building_keeps_api_prefix() {
        let client = NetboxClient::new(&NetboxConfig::new("http://localhost:8000/api")).unwrap();
        let url = client.url(DEVICES_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/dcim/devices/");

        let url = client.url("/dcim/sites/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/dcim/sites/");
    }

    #[test]
    fn test_list_devices_url_without_filters() {
        let client = NetboxClient::new(&NetboxConfig::default()).unwrap();
        let url = client.list_devices().first_page_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/dcim/devices/");
    }

    #[test]
    fn test_list_devices_url_building() {
        let client = NetboxClient::new(&NetboxConfig::default()).unwrap();
        let url = client
            .list_devices()
            .status("planned")
            .site_id(2)
            .rack_id(4)
            .first_page_url()
            .unwrap();

        assert_eq!(url.query(), Some("status=planned&site_id=2&rack_id=4"));
    }
}
