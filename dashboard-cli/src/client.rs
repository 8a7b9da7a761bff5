use fan_dashboard_protocol::{
    ErrorResponse, FanToggleResponse, Setpoint, SetpointRequest, SetpointResponse, StatusSnapshot,
    FAN_TOGGLE_PATH, SET_FAN_OUTPUT_PATH, STATUS_PATH,
};
use log::{debug, trace};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request rejected with {status}: {message}")]
    Rejected { status: StatusCode, message: String },
}

/// HTTP client for the fan controller endpoints.
///
/// Cheap to clone, clones share the same connection pool.
#[derive(Clone, Debug)]
pub(crate) struct FanClient {
    http: reqwest::Client,
    base_url: String,
}

impl FanClient {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn status(&self) -> Result<StatusSnapshot, Error> {
        trace!("Requesting status");
        let response = self.http.get(self.url(STATUS_PATH)).send().await?;
        decode(response).await
    }

    pub(crate) async fn set_fan_output(
        &self,
        setpoint: Setpoint,
    ) -> Result<SetpointResponse, Error> {
        debug!("Requesting fan output {setpoint}");
        let response = self
            .http
            .post(self.url(SET_FAN_OUTPUT_PATH))
            .json(&SetpointRequest::from(setpoint))
            .send()
            .await?;
        decode(response).await
    }

    pub(crate) async fn toggle_fan(&self) -> Result<FanToggleResponse, Error> {
        debug!("Requesting fan toggle");
        let response = self.http.post(self.url(FAN_TOGGLE_PATH)).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let status = response.status();

    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(e) => e.message,
            Err(_) => body,
        };
        Err(Error::Rejected { status, message })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const TIMEOUT: Duration = Duration::from_millis(500);

    #[tokio::test]
    async fn status() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/data");
                then.status(200).json_body(json!({
                    "fan_status": "ON",
                    "current_fan_output": 1200,
                    "set_fan_output": 1500,
                    "current_temp": 35.5,
                }));
            })
            .await;

        let client = FanClient::new(&server.base_url(), TIMEOUT).unwrap();
        let status = client.status().await.unwrap();

        mock.assert_async().await;
        assert_eq!(status.fan_status, "ON");
        assert_eq!(status.current_fan_output_text(), "1200");
        assert_eq!(status.set_fan_output_text(), "1500");
        assert_eq!(status.current_temp_text(), "35.5");
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/fan_toggle");
                then.status(200)
                    .json_body(json!({"message": "Fan status updated!", "fan_status": "OFF"}));
            })
            .await;

        let client = FanClient::new(&format!("{}/", server.base_url()), TIMEOUT).unwrap();
        let response = client.toggle_fan().await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.fan_status, "OFF");
    }

    #[tokio::test]
    async fn set_fan_output_sends_rpm() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/set_fan_output")
                    .json_body(json!({"rpm": 64}));
                then.status(200)
                    .json_body(json!({"message": "Fan output updated!", "set_fan_output": 64}));
            })
            .await;

        let client = FanClient::new(&server.base_url(), TIMEOUT).unwrap();
        let setpoint = Setpoint::parse("64").unwrap().setpoint;
        let response = client.set_fan_output(setpoint).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.set_fan_output_text(), "64");
    }

    #[tokio::test]
    async fn rejection_carries_server_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/set_fan_output");
                then.status(400).json_body(json!({"message": "Invalid input"}));
            })
            .await;

        let client = FanClient::new(&server.base_url(), TIMEOUT).unwrap();
        let result = client.set_fan_output(Setpoint::MAX).await;

        match result {
            Err(Error::Rejected { status, message }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid input");
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejection_with_plain_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data");
                then.status(500).body("Internal Server Error");
            })
            .await;

        let client = FanClient::new(&server.base_url(), TIMEOUT).unwrap();

        match client.status().await {
            Err(Error::Rejected { status, message }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data");
                then.status(200).body("not json");
            })
            .await;

        let client = FanClient::new(&server.base_url(), TIMEOUT).unwrap();

        assert!(matches!(client.status().await, Err(Error::Transport(_))));
    }
}
