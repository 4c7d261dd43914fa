//! Transactional email through the Resend HTTP API

use serde::{Deserialize, Serialize};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ProviderError {
    message: Option<String>,
}

impl Mailer {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }

    /// Send one HTML email; returns the provider message id
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<String, BoxError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to: [to],
                subject,
                html,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(body);
            return Err(format!("Email provider returned {status}: {message}").into());
        }

        let sent: SendEmailResponse = response.json().await?;
        Ok(sent.id)
    }
}

pub async fn send_test_email(mailer: &Mailer, to: &str) -> Result<String, BoxError> {
    let html = "<h1>E-Kantin</h1>\
                <p>Email percobaan berhasil dikirim. Konfigurasi email sudah benar.</p>";
    let id = mailer.send(to, "Tes Email E-Kantin", html).await?;
    tracing::info!(to = to, id = %id, "Test email sent");
    Ok(id)
}
