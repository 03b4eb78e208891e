//! Price plan CRUD actions

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiClient, ApiRequest, ApiResponse, HttpTransport};
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Listing parameters; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePlanQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub sort: Option<String>,
}

pub struct PricePlanActions<T> {
    api: ApiClient<T>,
    path: String,
}

impl<T: HttpTransport> PricePlanActions<T> {
    pub fn new(transport: T) -> Self {
        Self::from_config(transport, &ClientConfig::default())
    }

    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        Self {
            api: ApiClient::new(transport),
            path: config.price_plans_path.clone(),
        }
    }

    /// `GET {path}?search=&page=&sort=`
    pub async fn get_price_plans(&self, query: &PricePlanQuery) -> ClientResult<ApiResponse> {
        let request = ApiRequest::get(self.path.as_str())
            .with_query("search", query.search.as_deref())
            .with_query("page", query.page)
            .with_query("sort", query.sort.as_deref());

        self.api.send(request).await
    }

    /// `POST {path}` with the plan wrapped as `{"body": plan}`
    pub async fn save_price_plan<P: Serialize + ?Sized>(&self, plan: &P) -> ClientResult<ApiResponse> {
        let body = json!({ "body": serde_json::to_value(plan)? });
        self.api.send(ApiRequest::post(self.path.as_str(), body)).await
    }

    /// Soft delete: `PUT {path}/{id}` with `{"is_deleted": true}`
    pub async fn delete_price_plan(&self, id: impl Display) -> ClientResult<ApiResponse> {
        let path = format!("{}/{}", self.path, id);
        self.api
            .send(ApiRequest::put(path, json!({ "is_deleted": true })))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::HttpMethod;
    use crate::error::ClientError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct RecordingTransport {
        requests: Mutex<Vec<ApiRequest>>,
        status: u16,
    }

    impl RecordingTransport {
        fn with_status(status: u16) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                status,
            }
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn call(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(ApiResponse::new(self.status, json!({ "data": [] })))
        }
    }

    #[tokio::test]
    async fn test_get_price_plans_sends_set_params_only() {
        let transport = Arc::new(RecordingTransport::with_status(200));
        let actions = PricePlanActions::new(transport.clone());

        let query = PricePlanQuery {
            search: Some("pro".to_string()),
            page: Some(2),
            sort: None,
        };
        actions.get_price_plans(&query).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].path, "/price-plans");
        assert_eq!(
            requests[0].query,
            vec![
                ("search".to_string(), "pro".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_save_price_plan_wraps_body() {
        let transport = Arc::new(RecordingTransport::with_status(201));
        let actions = PricePlanActions::new(transport.clone());

        actions
            .save_price_plan(&json!({ "name": "Pro", "price": 49 }))
            .await
            .unwrap();

        let requests = transport.requests();
        let request = &requests[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/price-plans");
        assert_eq!(
            request.body,
            Some(json!({ "body": { "name": "Pro", "price": 49 } }))
        );
    }

    #[tokio::test]
    async fn test_delete_price_plan_is_soft() {
        let transport = Arc::new(RecordingTransport::with_status(200));
        let actions = PricePlanActions::new(transport.clone());

        actions.delete_price_plan(42).await.unwrap();

        let requests = transport.requests();
        let request = &requests[0];
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.path, "/price-plans/42");
        assert_eq!(request.body, Some(json!({ "is_deleted": true })));
    }

    #[tokio::test]
    async fn test_configured_path_and_failure_status() {
        let config = ClientConfig {
            price_plans_path: "/v2/plans".to_string(),
            ..ClientConfig::default()
        };
        let transport = Arc::new(RecordingTransport::with_status(404));
        let actions = PricePlanActions::from_config(transport.clone(), &config);

        let err = actions.delete_price_plan("abc").await.unwrap_err();

        assert!(matches!(err, ClientError::Status { status: 404, .. }));
        assert_eq!(transport.requests()[0].path, "/v2/plans/abc");
    }
}
