//! Recording fake [`HttpClient`] shared by the in-crate tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{HttpClient, HttpResponse, TransportError};

/// One request seen by [`FakeHttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RecordedRequest {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(self.body.as_deref().unwrap_or("null")).expect("body is JSON")
    }
}

type Reply = Result<HttpResponse, TransportError>;

/// Answers by URL prefix and records every request.
///
/// Requests that match no rule fail with a transport error, so a test that
/// forgets to script an endpoint sees a failure rather than a silent success.
#[derive(Default)]
pub struct FakeHttpClient {
    rules: Vec<(String, Reply)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url_prefix: &str, status: u16, body: &str) -> Self {
        self.rules.push((
            url_prefix.to_owned(),
            Ok(HttpResponse {
                status,
                body: body.to_owned(),
            }),
        ));
        self
    }

    pub fn fail(mut self, url_prefix: &str, message: &str) -> Self {
        self.rules.push((
            url_prefix.to_owned(),
            Err(TransportError::Request {
                url: url_prefix.to_owned(),
                message: message.to_owned(),
            }),
        ));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, url_prefix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.starts_with(url_prefix))
            .collect()
    }

    fn reply(&self, request: RecordedRequest) -> Reply {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);
        self.rules
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| {
                Err(TransportError::Request {
                    url,
                    message: "no scripted response".into(),
                })
            })
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<HttpResponse, TransportError> {
        self.reply(RecordedRequest {
            method: "POST",
            url: url.to_owned(),
            headers: headers
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            body: Some(body),
        })
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.reply(RecordedRequest {
            method: "GET",
            url: url.to_owned(),
            headers: Vec::new(),
            body: None,
        })
    }
}
