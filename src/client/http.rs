use reqwest::{Client, RequestBuilder};

use crate::models::{ApiMessage, CheckOutcome, Session, SessionResponse, SignUpData};

use super::availability::UsernameLookup;
use super::error::{ClientError, ErrorKind};
use super::navbar::SessionProvider;
use super::signup_flow::SignUpApi;

/// reqwest-backed implementation of the client capabilities, pointed at
/// a running backend.
pub struct ApiClient {
    base_url: String,
    http: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            base_url: base_url.into(),
            http: Client::new(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let message = response
            .json::<ApiMessage>()
            .await
            .ok()
            .map(|body| body.message);
        ClientError {
            kind: ErrorKind::Server(status),
            message,
        }
    }
}

impl UsernameLookup for ApiClient {
    async fn check(&self, username: &str) -> Result<CheckOutcome, ClientError> {
        let response = self
            .http
            .get(self.url("/auth/check-username"))
            .query(&[("username", username)])
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json::<CheckOutcome>().await?)
        } else {
            Err(Self::error_from(response).await)
        }
    }
}

impl SignUpApi for ApiClient {
    async fn register(&self, data: &SignUpData) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(data)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json::<ApiMessage>().await?.message)
        } else {
            Err(Self::error_from(response).await)
        }
    }
}

impl SessionProvider for ApiClient {
    async fn get_session(&self) -> Result<Option<Session>, ClientError> {
        let response = self
            .authorized(self.http.get(self.url("/auth/session")))
            .send()
            .await?;

        if response.status().is_success() {
            let body: SessionResponse = response.json().await?;
            Ok(body.user.map(|user| Session { user }))
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        let response = self
            .authorized(self.http.post(self.url("/auth/sign-out")))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }
}
