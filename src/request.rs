//! Outgoing request construction.
//!
//! Pure transformation from a logical operation plus caller parameters to
//! the verb, URL, and parameter placement of the HTTP call. No I/O happens
//! here; the client executes what this module builds.

use reqwest::Method;

use crate::batch::BatchRequest;
use crate::error::GraphResult;

/// A file-valued POST parameter, sent as a multipart part.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// File name reported to the API
    pub filename: String,

    /// MIME type; the transport guesses when absent
    pub content_type: Option<String>,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Create an upload from a file name and its contents.
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes,
        }
    }

    /// Set an explicit MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A caller-supplied parameter value.
#[derive(Debug, Clone)]
pub enum ParamValue {
    /// Plain text, placed in the query string or form body
    Text(String),

    /// File contents, routed to a multipart part on POST
    File(FileUpload),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<FileUpload> for ParamValue {
    fn from(value: FileUpload) -> Self {
        Self::File(value)
    }
}

/// Per-call options: free-form parameters plus the out-of-band `fields`
/// and `retry` knobs.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Field names joined into the `fields` query parameter (GET only)
    pub fields: Option<Vec<String>>,

    /// Per-call override of the configured retry budget
    pub retry: Option<u32>,

    /// Remaining parameters, merged into the query string or form body in
    /// insertion order
    pub params: Vec<(String, ParamValue)>,
}

impl RequestOptions {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the fields to return.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Override the configured retry budget for this call.
    #[must_use]
    pub fn retry(mut self, attempts: u32) -> Self {
        self.retry = Some(attempts);
        self
    }

    /// Add a parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// A fully-assembled outgoing call.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
    pub files: Vec<(String, FileUpload)>,
    pub retry: Option<u32>,
}

/// Builds outgoing requests. Pure; holds only the base URL and credential.
#[derive(Debug, Clone)]
pub(crate) struct RequestBuilder {
    base_url: String,
    access_token: String,
}

impl RequestBuilder {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Split caller params into text pairs and file parts.
    fn split_params(options: &RequestOptions) -> (Vec<(String, String)>, Vec<(String, FileUpload)>) {
        let mut text = Vec::new();
        let mut files = Vec::new();

        for (key, value) in &options.params {
            match value {
                ParamValue::Text(v) => text.push((key.clone(), v.clone())),
                ParamValue::File(f) => files.push((key.clone(), f.clone())),
            }
        }

        (text, files)
    }

    pub fn get(&self, path: &str, options: &RequestOptions) -> PreparedRequest {
        let (mut query, files) = Self::split_params(options);

        if let Some(fields) = &options.fields {
            query.push(("fields".into(), fields.join(",")));
        }
        query.push(("access_token".into(), self.access_token.clone()));

        PreparedRequest {
            method: Method::GET,
            url: self.url(path),
            query,
            form: Vec::new(),
            files,
            retry: options.retry,
        }
    }

    pub fn post(&self, path: &str, options: &RequestOptions) -> PreparedRequest {
        let (mut form, files) = Self::split_params(options);
        form.push(("access_token".into(), self.access_token.clone()));

        PreparedRequest {
            method: Method::POST,
            url: self.url(path),
            query: Vec::new(),
            form,
            files,
            retry: options.retry,
        }
    }

    pub fn delete(&self, id: &str, options: &RequestOptions) -> PreparedRequest {
        let (mut query, files) = Self::split_params(options);
        query.push(("access_token".into(), self.access_token.clone()));

        PreparedRequest {
            method: Method::DELETE,
            url: self.url(id),
            query,
            form: Vec::new(),
            files,
            retry: options.retry,
        }
    }

    /// Search becomes `GET {base}/search` with the term as `q`; everything
    /// else, including `type`, passes through untouched.
    pub fn search(&self, term: &str, options: &RequestOptions) -> PreparedRequest {
        let (params, files) = Self::split_params(options);

        let mut query = vec![("q".to_owned(), term.to_owned())];
        query.extend(params);
        query.push(("access_token".into(), self.access_token.clone()));

        PreparedRequest {
            method: Method::GET,
            url: self.url("search"),
            query,
            form: Vec::new(),
            files,
            retry: options.retry,
        }
    }

    /// FQL becomes `GET {base}/fql` with the query text as `q`.
    pub fn fql(&self, query_text: &str, options: &RequestOptions) -> PreparedRequest {
        let (params, files) = Self::split_params(options);

        let mut query = vec![("q".to_owned(), query_text.to_owned())];
        query.extend(params);
        query.push(("access_token".into(), self.access_token.clone()));

        PreparedRequest {
            method: Method::GET,
            url: self.url("fql"),
            query,
            form: Vec::new(),
            files,
            retry: options.retry,
        }
    }

    /// The batch call is one POST to the base root carrying the JSON-encoded
    /// sub-request list as the `batch` form field.
    pub fn batch(&self, requests: &[BatchRequest]) -> GraphResult<PreparedRequest> {
        let form = vec![
            ("batch".to_owned(), serde_json::to_string(requests)?),
            ("access_token".to_owned(), self.access_token.clone()),
        ];

        Ok(PreparedRequest {
            method: Method::POST,
            url: format!("{}/", self.base_url),
            query: Vec::new(),
            form,
            files: Vec::new(),
            retry: None,
        })
    }

    /// Continuation of a paginated GET. The cursor URL is self-contained;
    /// no credential is re-injected.
    pub fn next_page(&self, url: &str) -> PreparedRequest {
        PreparedRequest {
            method: Method::GET,
            url: url.to_owned(),
            query: Vec::new(),
            form: Vec::new(),
            files: Vec::new(),
            retry: None,
        }
    }
}
