//! Delivery region API operations

use crate::cachefly::traits::ApiListResponse;
use crate::cachefly::{CacheFlyClient, Collected, ListOptions};
use crate::config::api;
use crate::error::Result;

use super::models::DeliveryRegion;

impl CacheFlyClient {
    /// Get all delivery regions (with pagination)
    pub async fn get_delivery_regions(
        &self,
        options: &ListOptions,
    ) -> Result<Collected<DeliveryRegion>> {
        let path = format!("/{}", api::DELIVERY_REGIONS);
        self.fetch_all_pages::<DeliveryRegion, ApiListResponse<DeliveryRegion>>(
            &path,
            options,
            "delivery regions",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_delivery_regions_stops_at_total() {
        let mock_server = MockServer::start().await;
        let client = CacheFlyClient::test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/deliveryRegions"))
            .and(query_param("offset", "0"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"count": 4, "limit": 2, "offset": 0},
                "data": [{"_id": "r1", "name": "NA"}, {"_id": "r2", "name": "EU"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/deliveryRegions"))
            .and(query_param("offset", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meta": {"count": 4, "limit": 2, "offset": 2},
                "data": [{"_id": "r3", "name": "APAC"}, {"_id": "r4", "name": "SA"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = ListOptions::from_raw(None, Some(2));
        let collected = client.get_delivery_regions(&options).await.unwrap();
        let names: Vec<&str> = collected.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["NA", "EU", "APAC", "SA"]);
        assert_eq!(collected.total, 4);
    }
}
