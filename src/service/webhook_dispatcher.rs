use anyhow::Result;

/// Notifies the external booking backend of verified payment events.
#[derive(Clone)]
pub struct WebhookDispatcher {
    pub target_url: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl WebhookDispatcher {
    pub async fn emit(&self, event_type: &str, payload: serde_json::Value) -> Result<()> {
        self.client
            .post(&self.target_url)
            .header("Content-Type", "application/json")
            .header("X-Event-Type", event_type)
            .json(&payload)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
