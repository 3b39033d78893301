//! Graph API client.

use reqwest::{multipart, Client, Method};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::batch::{self, BatchRequest};
use crate::config::{GraphConfig, RetryConfig};
use crate::error::{BatchItemError, GraphError, GraphResult};
use crate::page::Pager;
use crate::request::{PreparedRequest, RequestBuilder, RequestOptions};
use crate::response;

/// Facebook Graph API client.
///
/// Holds the credential and transport configuration fixed at construction.
/// Every call is one independent request/response round trip; clients are
/// cheap to clone and safe to use from several places at once.
#[derive(Debug, Clone)]
pub struct GraphClient {
    client: Client,
    builder: RequestBuilder,
    retry: RetryConfig,
}

impl GraphClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &GraphConfig) -> GraphResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("fbgraph/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            builder: RequestBuilder::new(&config.api_url, &config.access_token),
            retry: config.retry.clone(),
        })
    }

    /// Fetch the resource at `path`.
    ///
    /// # Errors
    /// Surfaces transport failures, malformed bodies, and API-reported
    /// errors after the retry budget is spent.
    #[instrument(skip(self, options))]
    pub async fn get(&self, path: &str, options: &RequestOptions) -> GraphResult<Value> {
        self.execute(self.builder.get(path, options)).await
    }

    /// Walk a cursor-paginated GET lazily, one network call per consumed
    /// page. The request fires on the first
    /// [`next_page`](Pager::next_page) call, not here.
    #[must_use]
    pub fn get_paged(&self, path: &str, options: &RequestOptions) -> Pager<'_> {
        Pager::new(self, self.builder.get(path, options))
    }

    /// Publish to the resource at `path`. File-valued params become
    /// multipart parts; everything else goes in the form body.
    ///
    /// # Errors
    /// Surfaces transport failures, malformed bodies, and API-reported
    /// errors after the retry budget is spent.
    #[instrument(skip(self, options))]
    pub async fn post(&self, path: &str, options: &RequestOptions) -> GraphResult<Value> {
        self.execute(self.builder.post(path, options)).await
    }

    /// Delete the resource with the given id. The API acknowledges with
    /// the bare literal `true`, surfaced as a boolean payload.
    ///
    /// # Errors
    /// Surfaces transport failures, malformed bodies, and API-reported
    /// errors after the retry budget is spent.
    #[instrument(skip(self, options))]
    pub async fn delete(&self, id: &str, options: &RequestOptions) -> GraphResult<Value> {
        self.execute(self.builder.delete(id, options)).await
    }

    /// Search public objects. `term` becomes the `q` parameter; narrow by
    /// object kind with a `type` param in `options`.
    ///
    /// # Errors
    /// Surfaces transport failures, malformed bodies, and API-reported
    /// errors after the retry budget is spent.
    #[instrument(skip(self, options))]
    pub async fn search(&self, term: &str, options: &RequestOptions) -> GraphResult<Value> {
        self.execute(self.builder.search(term, options)).await
    }

    /// Run an FQL query.
    ///
    /// # Errors
    /// Surfaces transport failures, malformed bodies, and API-reported
    /// errors after the retry budget is spent.
    #[instrument(skip(self, query, options))]
    pub async fn fql(&self, query: &str, options: &RequestOptions) -> GraphResult<Value> {
        self.execute(self.builder.fql(query, options)).await
    }

    /// Execute several sub-requests in one round trip.
    ///
    /// Outcomes are aligned and in-order with `requests`; each element is
    /// either the decoded payload or the failure for that sub-request, so
    /// one failed item never hides its siblings.
    ///
    /// # Errors
    /// Fails when the combined call itself fails: transport, the whole
    /// response being an error shape, or a non-array reply.
    #[instrument(skip(self, requests), fields(count = requests.len()))]
    pub async fn batch(
        &self,
        requests: Vec<BatchRequest>,
    ) -> GraphResult<Vec<Result<Value, BatchItemError>>> {
        let prepared = self.builder.batch(&requests)?;
        let combined = self.execute(prepared).await?;
        batch::split(requests, combined)
    }

    pub(crate) const fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Run one logical call through the retry loop.
    ///
    /// The attempt budget is the per-call override if given, else the
    /// configured one; 0 and 1 both mean a single attempt. Only
    /// API-reported errors re-attempt, plus transport errors when
    /// configured. Re-attempts are immediate.
    pub(crate) async fn execute(&self, request: PreparedRequest) -> GraphResult<Value> {
        let max_attempts = request.retry.unwrap_or(self.retry.max_attempts).max(1);
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(
                attempt = attempts,
                method = %request.method,
                url = %request.url,
                "Making Graph API request"
            );

            match self.perform(&request).await {
                Ok(value) => return Ok(value),
                Err(e) if attempts < max_attempts && self.should_retry(&e) => {
                    warn!(attempt = attempts, error = %e, "Retrying Graph API request");
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn should_retry(&self, error: &GraphError) -> bool {
        error.is_retryable()
            || (self.retry.retry_transport && matches!(error, GraphError::Http(_)))
    }

    /// One transport round trip: send the prepared request, read the body,
    /// decode it. The HTTP status of single calls is ignored; the API
    /// signals errors in the body.
    async fn perform(&self, request: &PreparedRequest) -> GraphResult<Value> {
        if !request.files.is_empty() && request.method != Method::POST {
            return Err(GraphError::Config(
                "file parameters are only supported on POST".into(),
            ));
        }

        let mut req = self.client.request(request.method.clone(), &request.url);

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        if request.method == Method::POST {
            if request.files.is_empty() {
                req = req.form(&request.form);
            } else {
                let mut form = multipart::Form::new();
                for (key, value) in &request.form {
                    form = form.text(key.clone(), value.clone());
                }
                for (key, file) in &request.files {
                    let mut part = multipart::Part::bytes(file.bytes.clone())
                        .file_name(file.filename.clone());
                    if let Some(content_type) = &file.content_type {
                        part = part.mime_str(content_type)?;
                    }
                    form = form.part(key.clone(), part);
                }
                req = req.multipart(form);
            }
        }

        let response = req.send().await?;
        let body = response.text().await?;

        response::decode(&body)
    }
}
