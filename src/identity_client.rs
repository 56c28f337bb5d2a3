use std::time::Duration;

use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{domain::Session, errors::Error, Result};

/// Client for the identity service's user endpoints.
pub struct IdentityClient {
    http_client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct UpdateUserBody<'a> {
    username: &'a str,
    hashed_password: &'a str,
    new_password: &'a str,
}

#[derive(Deserialize)]
struct ErrorPayload {
    message: Option<String>,
}

impl IdentityClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the identity service HTTP client.");
        Self {
            http_client,
            base_url,
        }
    }

    /// One password-update call. The passwords have already been digested;
    /// nothing in plain text leaves this client.
    pub async fn update_password(
        &self,
        session: &Session,
        hashed_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let url = format!("{}/biome/users/{}", self.base_url, session.user_id);
        let body = UpdateUserBody {
            username: &session.display_name,
            hashed_password,
            new_password,
        };
        let response = self
            .http_client
            .put(&url)
            .bearer_auth(session.token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response
            .json::<ErrorPayload>()
            .await
            .ok()
            .and_then(|payload| payload.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("The identity service rejected the request")
                    .to_string()
            });
        Err(Error::IdentityService {
            status: status.as_u16(),
            message,
        })
    }
}
