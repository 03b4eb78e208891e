//! Log persistence over the API

use async_trait::async_trait;
use tenantweb_shared::LogRecord;

use super::{ApiClient, ApiRequest, HttpTransport};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::usage::LogSink;

/// [`LogSink`] that posts each record to the logs endpoint
pub struct HttpLogSink<T> {
    api: ApiClient<T>,
    path: String,
}

impl<T: HttpTransport> HttpLogSink<T> {
    pub fn new(transport: T) -> Self {
        Self::from_config(transport, &ClientConfig::default())
    }

    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        Self {
            api: ApiClient::new(transport),
            path: config.logs_path.clone(),
        }
    }
}

#[async_trait]
impl<T: HttpTransport> LogSink for HttpLogSink<T> {
    async fn persist(&self, record: &LogRecord) -> ClientResult<()> {
        let body = serde_json::to_value(record)?;
        self.api.send(ApiRequest::post(self.path.as_str(), body)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ApiResponse, HttpMethod};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tenantweb_shared::ActorId;
    use time::macros::datetime;

    #[derive(Default)]
    struct CapturingTransport {
        last: Mutex<Option<ApiRequest>>,
    }

    #[async_trait]
    impl HttpTransport for CapturingTransport {
        async fn call(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
            *self.last.lock().unwrap() = Some(request);
            Ok(ApiResponse::new(201, json!({ "ok": true })))
        }
    }

    #[tokio::test]
    async fn test_record_is_posted_as_json() {
        let transport = Arc::new(CapturingTransport::default());
        let sink = HttpLogSink::new(transport.clone());
        let record = LogRecord::new(
            ActorId::from("user-42"),
            "QRscan",
            datetime!(2024-03-01 12:30:00 UTC),
        );

        sink.persist(&record).await.unwrap();

        let request = transport.last.lock().unwrap().clone().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/logs");
        assert_eq!(
            request.body,
            Some(json!({
                "user": "user-42",
                "type": "QRscan",
                "timestamp": "2024-03-01T12:30:00Z",
            }))
        );
    }
}
