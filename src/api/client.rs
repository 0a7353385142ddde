//! Generic HTTP client with optional bearer-token auth.
//!
//! Thin wrapper over `gloo_net` fetch. No retry or caching; callers
//! decide how to degrade when a request fails.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors surfaced by the API layer.
#[derive(Debug, Error)]
pub enum ApiError {
	/// The request never completed (DNS, connection, CORS, ...).
	#[error("network error: {0}")]
	Network(String),
	/// The server answered with a non-success HTTP status.
	#[error("http status {0}")]
	Status(u16),
	/// The response body could not be decoded as the expected type.
	#[error("decode error: {0}")]
	Decode(String),
}

/// HTTP client bound to a backend base URL, optionally carrying an
/// instructor bearer token.
#[derive(Clone, Debug, Default)]
pub struct ApiClient {
	base_url: String,
	token: Option<String>,
}

impl ApiClient {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			token: None,
		}
	}

	/// Attach an instructor bearer token to subsequent requests.
	pub fn with_token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());
		self
	}

	fn url(&self, path: &str) -> String {
		format!(
			"{}/{}",
			self.base_url.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}

	fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
		match &self.token {
			Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
			None => builder,
		}
	}

	/// GET a typed response, attaching auth when a token is configured.
	pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
		let request = self
			.authorize(Request::get(&self.url(path)))
			.build()
			.map_err(|e| ApiError::Network(e.to_string()))?;
		decode(send(request).await?).await
	}

	/// GET a typed response without auth, for token-authenticated public
	/// endpoints such as student report links.
	pub async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
		let request = Request::get(&self.url(path))
			.build()
			.map_err(|e| ApiError::Network(e.to_string()))?;
		decode(send(request).await?).await
	}

	/// POST a JSON body and decode a typed response.
	pub async fn post<B: Serialize, T: DeserializeOwned>(
		&self,
		path: &str,
		body: &B,
	) -> Result<T, ApiError> {
		let request = self
			.authorize(Request::post(&self.url(path)))
			.json(body)
			.map_err(|e| ApiError::Network(e.to_string()))?;
		decode(send(request).await?).await
	}
}

async fn send(request: Request) -> Result<Response, ApiError> {
	let response = request
		.send()
		.await
		.map_err(|e| ApiError::Network(e.to_string()))?;
	if !response.ok() {
		return Err(ApiError::Status(response.status()));
	}
	Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
	response
		.json::<T>()
		.await
		.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn url_joins_without_duplicate_slashes() {
		let client = ApiClient::new("http://localhost:8000/");
		assert_eq!(
			client.url("/api/v1/exams/e1/graph"),
			"http://localhost:8000/api/v1/exams/e1/graph"
		);
		let bare = ApiClient::new("http://localhost:8000");
		assert_eq!(bare.url("api/v1/reports/t1"), "http://localhost:8000/api/v1/reports/t1");
	}
}
