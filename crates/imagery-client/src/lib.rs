//! Client for the NASA Earth imagery API.
//!
//! A fetch is a single GET against the imagery endpoint. The credential is
//! read at call time; when it is missing the fetch fails before any network
//! traffic. There is no retry and no cancellation.

pub mod client;
pub mod config;
pub mod credentials;
pub mod handle;
pub mod request;
pub mod testing;
pub mod transport;

pub use client::{FetchFailure, FetchResult, ImageryClient};
pub use config::ClientConfig;
pub use credentials::{CredentialProvider, EnvCredential, StaticCredential};
pub use handle::ImageHandle;
pub use request::{FetchRequest, ImageryParams};
pub use transport::{ImageryTransport, RawResponse, ReqwestTransport};
