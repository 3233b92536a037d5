//! In-memory transport double shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::{Method, Request};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use towerctl::models::User;
use towerctl::resource::{Error, Payload, Transport, TransportError};
use url::Url;

const BASE_URL: &str = "http://transport.test";

/// One request built through the transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<Value>,
}

/// Records every request and answers from a queue of canned responses
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<Payload, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    executed: AtomicUsize,
    user: Option<User>,
    user_lookups: AtomicUsize,
    reject_requests: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `current_user` with this user
    pub fn with_user(mut self, id: i64, username: &str) -> Self {
        self.user = Some(User {
            id,
            username: username.to_string(),
            is_superuser: false,
            is_system_auditor: false,
            email: String::new(),
        });
        self
    }

    /// Make `new_request` fail, as with an unparseable host
    pub fn failing_requests(mut self) -> Self {
        self.reject_requests = true;
        self
    }

    pub fn respond(self, value: Value) -> Self {
        self.push(Ok(payload(value)));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, response: Result<Payload, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("no request was built")
    }

    /// Number of requests actually sent
    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }

    pub fn user_lookups(&self) -> usize {
        self.user_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    fn new_request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request, TransportError> {
        let raw = format!("{}{}", BASE_URL, endpoint);
        if self.reject_requests {
            return Err(TransportError::InvalidUrl {
                url: raw,
                source: url::ParseError::EmptyHost,
            });
        }
        let url = Url::parse(&raw).map_err(|source| TransportError::InvalidUrl { url: raw, source })?;

        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.clone(),
            endpoint: endpoint.to_string(),
            body: body.as_ref().map(|b| serde_json::from_slice(b).unwrap()),
        });

        let mut request = Request::new(method, url);
        *request.body_mut() = body.map(Into::into);
        Ok(request)
    }

    async fn execute(&self, _request: Request) -> Result<Payload, TransportError> {
        self.executed.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Payload::new()))
    }

    async fn current_user(&self) -> Result<User, Error> {
        self.user_lookups.fetch_add(1, Ordering::SeqCst);
        self.user.clone().ok_or_else(|| {
            Error::from(TransportError::InvalidStatusCode {
                status: 401,
                uri: format!("{}/api/v2/me/", BASE_URL),
                body: "{\"detail\":\"Authentication credentials were not provided.\"}".to_string(),
            })
        })
    }
}

pub fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

pub fn not_found(uri: &str) -> TransportError {
    TransportError::InvalidStatusCode {
        status: 404,
        uri: uri.to_string(),
        body: "{\"detail\":\"Not found.\"}".to_string(),
    }
}
