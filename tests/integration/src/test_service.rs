//! The full service pipeline without a network connection.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::header::{ALLOW, CONTENT_TYPE};
    use http::{Method, StatusCode};
    use serde_json::Value;
    use twinstack_http::config::HttpEndpointConfig;

    use crate::{call, echo_service, encode_identifier};

    fn request(method: Method, uri: &str) -> http::Request<Bytes> {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    #[tokio::test]
    async fn test_should_serve_mapped_request_under_prefix() {
        let service = echo_service(
            HttpEndpointConfig::builder()
                .path_prefix("/api/v3.0".into())
                .build(),
        );
        let sm = encode_identifier("urn:sm:1");
        let (status, headers, body) = call(
            &service,
            request(
                Method::GET,
                &format!("/api/v3.0/submodels/{sm}/submodel-elements/A/$value?level=core"),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["operation"], "GetSubmodelElementValueByPath");
        assert_eq!(value["scope"]["submodelId"], "urn:sm:1");
        assert_eq!(value["path"], serde_json::json!(["A"]));
        assert_eq!(value["outputModifier"]["level"], "core");
    }

    #[tokio::test]
    async fn test_should_serve_v1_generation_layout() {
        let service = echo_service(
            HttpEndpointConfig::builder()
                .api_generation("v1".into())
                .build(),
        );
        let sm = encode_identifier("urn:sm:1");
        let (status, _, _) = call(
            &service,
            request(Method::GET, &format!("/submodels/{sm}/submodel/submodel-elements")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = call(
            &service,
            request(Method::GET, &format!("/submodels/{sm}/submodel-elements")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_should_list_allowed_methods_for_element() {
        let service = echo_service(HttpEndpointConfig::default());
        let sm = encode_identifier("urn:sm:1");
        let (status, headers, _) = call(
            &service,
            request(Method::OPTIONS, &format!("/submodels/{sm}/submodel-elements/A.B")),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let allow = headers.get(ALLOW).and_then(|v| v.to_str().ok()).unwrap();
        for method in ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"] {
            assert!(allow.contains(method), "{allow} should contain {method}");
        }
    }

    #[tokio::test]
    async fn test_should_render_error_envelope_with_request_id() {
        let service = echo_service(HttpEndpointConfig::default());
        let (status, headers, body) = call(
            &service,
            request(Method::GET, "/submodels?limit=zero"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(headers.contains_key("x-request-id"));
        let value: Value = serde_json::from_slice(&body).unwrap();
        let message = &value["messages"][0];
        assert_eq!(message["messageType"], "Error");
        assert_eq!(message["code"], "InvalidPagingParameter");
    }

    #[tokio::test]
    async fn test_should_answer_unrouted_method_with_method_not_allowed() {
        let service = echo_service(HttpEndpointConfig::default());
        let (status, headers, body) = call(&service, request(Method::PATCH, "/shells")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            headers.get(ALLOW).and_then(|v| v.to_str().ok()),
            Some("GET, POST")
        );
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["messages"][0]["code"], "MethodNotAllowed");

        let (status, _, _) = call(&service, request(Method::PATCH, "/nowhere")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
