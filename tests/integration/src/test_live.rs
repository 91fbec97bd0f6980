//! Tests against a running server.

#[cfg(test)]
mod tests {
    use crate::{encode_identifier, endpoint_url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_health() {
        let response = reqwest::get(format!("{}/health", endpoint_url()))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "running");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_map_request_over_the_wire() {
        let sm = encode_identifier("urn:sm:live");
        let response = reqwest::get(format!(
            "{}/submodels/{sm}/submodel-elements/Temperature?level=core",
            endpoint_url()
        ))
        .await
        .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["operation"], "GetSubmodelElementByPath");
        assert_eq!(body["scope"]["submodelId"], "urn:sm:live");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_unknown_modifier_over_the_wire() {
        let sm = encode_identifier("urn:sm:live");
        let response = reqwest::get(format!("{}/submodels/{sm}/$bogus", endpoint_url()))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }
}
