//! Scripted in-process transport for tests.

use crate::{FetchError, Method, Request, Response, Transport};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Reply {
    Respond(Response),
    Fail(String),
}

/// Serves scripted replies keyed by method and path.
///
/// Replies for a route are consumed in order; the last one keeps being served
/// so repeated calls see a stable backend. Every request is recorded.
#[derive(Debug)]
pub struct MockTransport {
    base_url: String,
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    /// Create a mock serving paths under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            replies: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a JSON reply.
    pub fn respond_json(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: serde_json::Value,
    ) -> &Self {
        self.push(method, path, Reply::Respond(Response::json_body(status, &body)))
    }

    /// Queue a reply with an arbitrary body.
    pub fn respond_raw(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: impl Into<Vec<u8>>,
    ) -> &Self {
        let response = Response::new(status, HashMap::new(), body.into());
        self.push(method, path, Reply::Respond(response))
    }

    /// Queue a transport-level failure.
    pub fn fail(&self, method: Method, path: &str, message: impl Into<String>) -> &Self {
        self.push(method, path, Reply::Fail(message.into()))
    }

    /// Every request sent so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Requests sent to one route.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<Request> {
        let url = format!("{}{}", self.base_url, path);
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.url == url)
            .collect()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<Request> {
        self.requests().pop()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies
                .entry((method, path.to_string()))
                .or_default()
                .push_back(reply);
        }
        self
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<Reply> {
        let mut replies = self.replies.lock().ok()?;
        let queue = replies.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let path = request
            .url
            .strip_prefix(&self.base_url)
            .unwrap_or(&request.url)
            .to_string();

        match self.next_reply(request.method, &path) {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(FetchError::RequestError(message)),
            None => Err(FetchError::RequestError(format!(
                "no mock reply for {} {}",
                request.method, path
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestBuilder;
    use serde_json::json;

    #[tokio::test]
    async fn test_replies_in_order_then_sticky() {
        let mock = MockTransport::new("http://mock/api");
        mock.respond_json(Method::Get, "/a", 200, json!(1))
            .respond_json(Method::Get, "/a", 200, json!(2));

        let get = || RequestBuilder::new(Method::Get, "http://mock/api/a").build();
        assert_eq!(mock.send(get()).await.unwrap().json_or_null(), json!(1));
        assert_eq!(mock.send(get()).await.unwrap().json_or_null(), json!(2));
        assert_eq!(mock.send(get()).await.unwrap().json_or_null(), json!(2));
        assert_eq!(mock.requests_to(Method::Get, "/a").len(), 3);
    }

    #[tokio::test]
    async fn test_unscripted_route_fails() {
        let mock = MockTransport::new("http://mock/api/");
        let request = RequestBuilder::new(Method::Post, "http://mock/api/x").build();
        let err = mock.send(request).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::RequestError("no mock reply for POST /x".to_string())
        );
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let mock = MockTransport::new("http://mock");
        mock.fail(Method::Get, "/down", "connection refused");
        let request = RequestBuilder::new(Method::Get, "http://mock/down").build();
        assert!(matches!(
            mock.send(request).await,
            Err(FetchError::RequestError(m)) if m == "connection refused"
        ));
    }
}
