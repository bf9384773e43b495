//! # TransIP SDK
//!
//! A Rust client library for the TransIP registrar REST API.
//!
//! This crate combines functionality from:
//! - `transip-auth`: PEM key handling and request signing
//! - `transip-config`: configuration management
//! - `transip-api`: HTTP client and request dispatch
//!
//! The [`Transip`] facade exposes typed operations over domains, DNS records,
//! contacts, branding, invoices and products. Authentication happens lazily:
//! the first call signs a token request with the configured private key,
//! trades it for a bearer token and caches that token for the lifetime of the
//! client.
//!
//! ```no_run
//! use transip_sdk::Transip;
//!
//! fn main() -> Result<(), transip_sdk::SdkError> {
//!     let client = Transip::builder()
//!         .login("demo-user")
//!         .private_key(std::fs::read_to_string("transip.key")?)
//!         .read_only(true)
//!         .build()?;
//!
//!     for domain in client.domains(&[])? {
//!         println!("{} renews {}", domain.name, domain.renewal_date);
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use thiserror::Error;

mod models;

pub use models::{
    AvailabilityZone, Branding, DnsEntry, Domain, DomainRegistration, DomainTransfer, Invoice,
    Nameserver, Product, ProductElement, WhoisContact,
};

pub use transip_api::{ApiClient, ApiClientBuilder, ApiError, RejectionKind, RequestOutcome};
pub use transip_auth::{AuthError, PrivateKeyMaterial};
pub use transip_config::{ConfigError, TokenPolicy, TransipConfig, TransipConfigBuilder};

/// Errors surfaced by the SDK facade.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport, credential or authentication error
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The service rejected the request (403/404/406/409)
    #[error("request rejected ({kind:?}, status {status}): {body}")]
    Rejected {
        kind: RejectionKind,
        status: u16,
        body: String,
    },

    /// The service failed (status above 499)
    #[error("server failure (status {status}): {body}")]
    Server { status: u16, body: String },

    /// A mutating call was attempted under a read-only token policy
    #[error("client is configured read-only; mutating calls are blocked")]
    ReadOnly,

    /// A status outside the documented contract
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn flatten<T>(outcome: RequestOutcome<T>) -> Result<T, SdkError> {
    match outcome {
        RequestOutcome::Success(value) => Ok(value),
        RequestOutcome::ClientRejected { kind, status, body } => {
            Err(SdkError::Rejected { kind, status, body })
        }
        RequestOutcome::ServerFailure { status, body } => Err(SdkError::Server { status, body }),
        RequestOutcome::ReadOnlyBlocked => Err(SdkError::ReadOnly),
        RequestOutcome::UnexpectedStatus(status) => Err(SdkError::UnexpectedStatus(status)),
    }
}

// Response envelopes the service wraps its payloads in.

#[derive(Deserialize)]
struct DomainsResponse {
    domains: Vec<Domain>,
}

#[derive(Deserialize)]
struct DomainResponse {
    domain: Domain,
}

#[derive(Deserialize)]
struct DnsResponse {
    #[serde(rename = "dnsEntries")]
    dns_entries: Vec<DnsEntry>,
}

#[derive(Deserialize)]
struct ContactsResponse {
    contacts: Vec<WhoisContact>,
}

#[derive(Deserialize)]
struct BrandingResponse {
    branding: Branding,
}

#[derive(Deserialize)]
struct InvoicesResponse {
    invoices: Vec<Invoice>,
}

#[derive(Deserialize)]
struct InvoiceResponse {
    invoice: Invoice,
}

#[derive(Deserialize)]
struct PdfResponse {
    pdf: String,
}

#[derive(Deserialize)]
struct ZonesResponse {
    #[serde(rename = "availability-zones")]
    zones: Vec<AvailabilityZone>,
}

#[derive(Deserialize)]
struct ProductsResponse {
    products: BTreeMap<String, Vec<Product>>,
}

#[derive(Deserialize)]
struct ElementsResponse {
    #[serde(rename = "productElements")]
    product_elements: Vec<ProductElement>,
}

/// Unified client for the TransIP API.
pub struct Transip {
    api: ApiClient,
    config: TransipConfig,
}

impl Transip {
    /// Create a client from a configuration.
    ///
    /// The private key is normalized and validated here; a malformed key
    /// fails construction permanently.
    pub fn new(config: TransipConfig) -> Result<Self, SdkError> {
        config.validate()?;
        let api = ApiClient::builder().from_config(&config).build()?;
        Ok(Self { api, config })
    }

    /// Create a builder for a client.
    pub fn builder() -> TransipBuilder {
        TransipBuilder::new()
    }

    /// The underlying dispatch client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &TransipConfig {
        &self.config
    }

    fn get<T>(
        &self,
        path: &str,
        mapper: impl FnOnce(Value) -> Result<T, serde_json::Error>,
    ) -> Result<T, SdkError> {
        flatten(self.api.get(path, mapper)?)
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, data: &B) -> Result<bool, SdkError> {
        flatten(self.api.post(path, data)?)
    }

    /// Ping the API: true when the service answers the test endpoint.
    pub fn test_connection(&self) -> Result<bool, SdkError> {
        self.get("/api-test", |data| Ok(data["ping"] == "pong"))
    }

    pub fn availability_zones(&self) -> Result<Vec<AvailabilityZone>, SdkError> {
        self.get("/availability-zones", |data| {
            serde_json::from_value::<ZonesResponse>(data).map(|r| r.zones)
        })
    }

    /// List domains, optionally filtered by tags.
    pub fn domains(&self, tags: &[&str]) -> Result<Vec<Domain>, SdkError> {
        let path = if tags.is_empty() {
            "/domains".to_string()
        } else {
            format!("/domains?tags={}", tags.join(","))
        };
        self.get(&path, |data| {
            serde_json::from_value::<DomainsResponse>(data).map(|r| r.domains)
        })
    }

    pub fn domain(&self, name: &str) -> Result<Domain, SdkError> {
        self.get(&format!("/domains/{name}"), |data| {
            serde_json::from_value::<DomainResponse>(data).map(|r| r.domain)
        })
    }

    /// Register a new domain. Returns whether the service accepted the order.
    pub fn register_domain(&self, registration: &DomainRegistration) -> Result<bool, SdkError> {
        self.post("/domains", registration)
    }

    /// Transfer a domain in using its authorization code.
    pub fn transfer_domain(&self, transfer: &DomainTransfer) -> Result<bool, SdkError> {
        self.post("/domains", transfer)
    }

    pub fn dns_entries(&self, domain: &str) -> Result<Vec<DnsEntry>, SdkError> {
        self.get(&format!("/domains/{domain}/dns"), |data| {
            serde_json::from_value::<DnsResponse>(data).map(|r| r.dns_entries)
        })
    }

    /// Add a single DNS record to a domain.
    pub fn add_dns_entry(&self, domain: &str, entry: &DnsEntry) -> Result<bool, SdkError> {
        self.post(
            &format!("/domains/{domain}/dns"),
            &json!({ "dnsEntry": entry }),
        )
    }

    pub fn contacts(&self, domain: &str) -> Result<Vec<WhoisContact>, SdkError> {
        self.get(&format!("/domains/{domain}/contacts"), |data| {
            serde_json::from_value::<ContactsResponse>(data).map(|r| r.contacts)
        })
    }

    pub fn branding(&self, domain: &str) -> Result<Branding, SdkError> {
        self.get(&format!("/domains/{domain}/branding"), |data| {
            serde_json::from_value::<BrandingResponse>(data).map(|r| r.branding)
        })
    }

    pub fn invoices(&self) -> Result<Vec<Invoice>, SdkError> {
        self.get("/invoices", |data| {
            serde_json::from_value::<InvoicesResponse>(data).map(|r| r.invoices)
        })
    }

    pub fn invoice(&self, invoice_number: &str) -> Result<Invoice, SdkError> {
        self.get(&format!("/invoices/{invoice_number}"), |data| {
            serde_json::from_value::<InvoiceResponse>(data).map(|r| r.invoice)
        })
    }

    /// Fetch an invoice as a base64-encoded PDF.
    pub fn invoice_pdf(&self, invoice_number: &str) -> Result<String, SdkError> {
        self.get(&format!("/invoices/{invoice_number}/pdf"), |data| {
            serde_json::from_value::<PdfResponse>(data).map(|r| r.pdf)
        })
    }

    /// List all products, flattened from the service's per-type grouping.
    pub fn products(&self) -> Result<Vec<Product>, SdkError> {
        self.get("/products", |data| {
            serde_json::from_value::<ProductsResponse>(data).map(|r| {
                r.products
                    .into_iter()
                    .flat_map(|(product_type, items)| {
                        items.into_iter().map(move |mut product| {
                            product.product_type = product_type.clone();
                            product
                        })
                    })
                    .collect()
            })
        })
    }

    /// Specification lines of a product, keyed by element name.
    pub fn product_elements(
        &self,
        product_name: &str,
    ) -> Result<BTreeMap<String, ProductElement>, SdkError> {
        self.get(&format!("/products/{product_name}/elements"), |data| {
            serde_json::from_value::<ElementsResponse>(data).map(|r| {
                r.product_elements
                    .into_iter()
                    .map(|element| (element.name.clone(), element))
                    .collect()
            })
        })
    }
}

/// Builder for [`Transip`] clients.
#[derive(Default)]
pub struct TransipBuilder {
    config_builder: TransipConfigBuilder,
    base_url: Option<String>,
}

impl TransipBuilder {
    pub fn new() -> Self {
        Self {
            config_builder: TransipConfig::builder(),
            base_url: None,
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(mut self, config: &TransipConfig) -> Self {
        self.config_builder = config.to_builder();
        self
    }

    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.login(login);
        self
    }

    /// Set the PEM private key content used to sign token requests.
    pub fn private_key(mut self, private_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.private_key(private_key);
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.endpoint(endpoint);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.version(version);
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.config_builder = self.config_builder.read_only(read_only);
        self
    }

    pub fn global_key(mut self, global_key: bool) -> Self {
        self.config_builder = self.config_builder.global_key(global_key);
        self
    }

    pub fn expiration_time(mut self, expiration_time: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.expiration_time(expiration_time);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.label(label);
        self
    }

    /// Override the full base URL (scheme, host and version segment).
    ///
    /// Intended for pointing the client at a stub server in tests; normal use
    /// derives the URL from the endpoint and version.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<Transip, SdkError> {
        let config = self.config_builder.build()?;
        let mut api_builder = ApiClient::builder().from_config(&config);
        if let Some(base_url) = self.base_url {
            api_builder = api_builder.base_url(base_url);
        }
        let api = api_builder.build()?;
        Ok(Transip { api, config })
    }
}
