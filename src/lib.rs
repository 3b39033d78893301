//! Facebook Graph API client.
//!
//! Wraps the Graph API's request/response pipeline: building HTTP calls
//! from high-level operations, normalizing the API's error shapes into one
//! failure taxonomy, retrying failed calls, walking cursor-paginated
//! collections lazily, and executing multi-request batches whose
//! sub-responses are decoded individually and correlated back to their
//! sub-request.
//!
//! ```no_run
//! use fbgraph::{GraphClient, GraphConfig, RequestOptions};
//!
//! # async fn run() -> fbgraph::GraphResult<()> {
//! let config = GraphConfig {
//!     access_token: "token".into(),
//!     ..GraphConfig::default()
//! };
//! let client = GraphClient::new(&config)?;
//!
//! let me = client
//!     .get("me", &RequestOptions::new().fields(["id", "name"]))
//!     .await?;
//! println!("{me}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod batch;
mod client;
mod config;
mod error;
mod page;
mod request;
mod response;
mod types;

pub use batch::BatchRequest;
pub use client::GraphClient;
pub use config::{GraphConfig, RetryConfig};
pub use error::{BatchItemError, GraphError, GraphResult};
pub use page::Pager;
pub use request::{FileUpload, ParamValue, RequestOptions};
pub use types::{Page, Paging};
