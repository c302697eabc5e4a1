//! Send GraphQL operations to an endpoint

use std::fmt;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::errors::ClientError;

const BEARER_PREFIX: &str = "Bearer ";

/// The body of a GraphQL request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub query: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }

    pub fn with_variables(self, variables: Value) -> Self {
        Self {
            variables: Some(variables),
            ..self
        }
    }
}

/// The JSON reply of an endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum GraphQLResponse {
    /// The endpoint answered with a success status
    Success(Value),

    /// The endpoint answered with any other status
    Failure { status: StatusCode, body: Value },
}

impl GraphQLResponse {
    pub fn body(&self) -> &Value {
        match self {
            GraphQLResponse::Success(body) | GraphQLResponse::Failure { body, .. } => body,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GraphQLResponse::Success(_))
    }

    /// Whether the body reports errors without any data
    pub fn has_errors(&self) -> bool {
        let body = self.body();
        body.get("errors")
            .filter(|value| !matches!(value, Value::Null))
            .is_some()
            && body
                .get("data")
                .filter(|value| !matches!(value, Value::Null))
                .is_none()
    }
}

/// Renders the body as indented JSON
impl fmt::Display for GraphQLResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.body())
    }
}

/// A client for a single GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphQLClient {
    client: reqwest::Client,
    endpoint: Url,
    headers: HeaderMap,
}

impl GraphQLClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            headers: HeaderMap::new(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Add headers sent with every request
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Authenticate requests with a bearer token.
    ///
    /// A blank token leaves the request unauthenticated.
    pub fn with_token(mut self, token: &str) -> Result<Self, ClientError> {
        if let Some(authorization) = authorization_value(token) {
            self.headers
                .insert(AUTHORIZATION, HeaderValue::from_str(&authorization)?);
        }
        Ok(self)
    }

    /// POST the request as JSON and decode the JSON reply
    pub async fn send(&self, request: &Request) -> Result<GraphQLResponse, ClientError> {
        debug!(endpoint = %self.endpoint, "Sending GraphQL request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(ClientError::Request)?;

        let status = response.status();
        info!(%status, "Received GraphQL response");

        let body = response
            .json::<Value>()
            .await
            .map_err(ClientError::ResponseBody)?;

        Ok(if status.is_success() {
            GraphQLResponse::Success(body)
        } else {
            GraphQLResponse::Failure { status, body }
        })
    }
}

/// The `Authorization` value for a token, adding the bearer scheme if missing
pub fn authorization_value(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        None
    } else if token.starts_with(BEARER_PREFIX) {
        Some(token.to_string())
    } else {
        Some(format!("{BEARER_PREFIX}{token}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("abc123", Some("Bearer abc123"))]
    #[case("Bearer abc123", Some("Bearer abc123"))]
    #[case("  abc123\n", Some("Bearer abc123"))]
    #[case("bearer abc123", Some("Bearer bearer abc123"))]
    fn authorization_values(#[case] token: &str, #[case] expected: Option<&str>) {
        assert_eq!(authorization_value(token).as_deref(), expected);
    }

    #[test]
    fn request_omits_missing_variables() {
        let request = Request::new("{ __typename }");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "{ __typename }" })
        );

        let request = request.with_variables(json!({ "id": "1" }));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "{ __typename }", "variables": { "id": "1" } })
        );
    }

    #[rstest]
    #[case(json!({ "errors": [{ "message": "boom" }] }), true)]
    #[case(json!({ "errors": [{ "message": "boom" }], "data": null }), true)]
    #[case(json!({ "errors": [{ "message": "partial" }], "data": { "a": 1 } }), false)]
    #[case(json!({ "data": { "a": 1 } }), false)]
    fn detects_error_only_bodies(#[case] body: Value, #[case] expected: bool) {
        assert_eq!(GraphQLResponse::Success(body).has_errors(), expected);
    }

    #[test]
    fn displays_indented_json() {
        let response = GraphQLResponse::Success(json!({ "data": { "__typename": "Query" } }));

        insta::assert_snapshot!(response.to_string(), @r#"
        {
          "data": {
            "__typename": "Query"
          }
        }
        "#);
    }

    #[tokio::test]
    async fn sends_query_with_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_header("authorization", "Bearer secret")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "query": "{ __typename }" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"__typename":"Query"}}"#)
            .create_async()
            .await;

        let endpoint = Url::parse(&format!("{}/graphql", server.url())).unwrap();
        let client = GraphQLClient::new(endpoint).with_token("secret").unwrap();
        let response = client.send(&Request::new("{ __typename }")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            response,
            GraphQLResponse::Success(json!({ "data": { "__typename": "Query" } }))
        );
    }

    #[tokio::test]
    async fn omits_authorization_without_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"data":null}"#)
            .create_async()
            .await;

        let client = GraphQLClient::new(Url::parse(&server.url()).unwrap())
            .with_token("  ")
            .unwrap();
        client.send(&Request::new("{ a }")).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_a_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(400)
            .with_body(r#"{"errors":[{"message":"Syntax Error"}]}"#)
            .create_async()
            .await;

        let client = GraphQLClient::new(Url::parse(&server.url()).unwrap());
        let response = client.send(&Request::new("{")).await.unwrap();

        assert!(!response.is_success());
        assert!(response.has_errors());
        assert_eq!(
            response,
            GraphQLResponse::Failure {
                status: StatusCode::BAD_REQUEST,
                body: json!({ "errors": [{ "message": "Syntax Error" }] }),
            }
        );
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = GraphQLClient::new(Url::parse(&server.url()).unwrap());
        let result = client.send(&Request::new("{ a }")).await;

        assert!(matches!(result, Err(ClientError::ResponseBody(_))));
    }

    #[tokio::test]
    async fn sends_default_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("x-test", "abcde")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("x-test", HeaderValue::from_static("abcde"));
        let client = GraphQLClient::new(Url::parse(&server.url()).unwrap()).with_headers(headers);
        client.send(&Request::new("{ a }")).await.unwrap();

        mock.assert_async().await;
    }
}
