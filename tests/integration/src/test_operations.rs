//! Operation invocation routing.

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;
    use twinstack_model::error::MappingError;
    use twinstack_model::modifier::Content;
    use twinstack_model::request::DomainRequest;
    use twinstack_model::types::OperationArguments;

    use crate::{encode_identifier, map, map_json};

    fn element(suffix: &str) -> String {
        format!(
            "submodels/{}/submodel-elements/Controller.Heat{suffix}",
            encode_identifier("urn:sm:ops")
        )
    }

    #[test]
    fn test_should_partition_invocation_by_async_flag() {
        let body = json!({});
        for (query, operation) in [
            ("", "InvokeOperationSync"),
            ("?async=false", "InvokeOperationSync"),
            ("?async=true", "InvokeOperationAsync"),
            ("?async=TRUE", "InvokeOperationAsync"),
            ("?async=True", "InvokeOperationAsync"),
            ("?async=maybe", "InvokeOperationSync"),
            ("?async=", "InvokeOperationSync"),
            ("?async=1", "InvokeOperationSync"),
            ("?async=yes", "InvokeOperationSync"),
        ] {
            let request = map_json(Method::POST, &element(&format!("/invoke{query}")), &body).unwrap();
            assert_eq!(request.operation_name(), operation, "query {query}");
        }

        let explicit = map_json(Method::POST, &element("/invoke-async"), &body).unwrap();
        assert_eq!(explicit.operation_name(), "InvokeOperationAsync");
    }

    #[test]
    fn test_should_decode_value_only_arguments() {
        let body = json!({"inputArguments": {"setpoint": 21.5}});
        let request = map_json(Method::POST, &element("/invoke/$value"), &body).unwrap();
        let DomainRequest::InvokeOperationSync {
            content, request, ..
        } = request
        else {
            panic!("unexpected request: {request:?}");
        };
        assert_eq!(content, Content::Value);
        let OperationArguments::Value(values) = request.input_arguments else {
            panic!("expected value-only arguments");
        };
        assert_eq!(values["setpoint"], json!(21.5));
    }

    #[test]
    fn test_should_reject_malformed_invocation_body() {
        for body in [
            json!([]),
            json!({"inputArguments": "x"}),
            json!({"clientTimeoutDuration": "soon"}),
        ] {
            let err = map_json(Method::POST, &element("/invoke"), &body).unwrap_err();
            assert!(matches!(err, MappingError::InvalidBody { .. }), "{body}");
        }
    }

    #[test]
    fn test_should_map_async_status_and_result() {
        let status = map(Method::GET, &element("/operation-status/handle-42")).unwrap();
        let DomainRequest::GetOperationAsyncStatus {
            scope,
            path,
            handle_id,
        } = status
        else {
            panic!("unexpected request: {status:?}");
        };
        assert_eq!(scope.submodel_id, "urn:sm:ops");
        assert_eq!(path.to_string(), "Controller.Heat");
        assert_eq!(handle_id, "handle-42");

        let result = map(Method::GET, &element("/operation-results/handle-42/$value")).unwrap();
        assert_eq!(result.operation_name(), "GetOperationAsyncResult");
        assert_eq!(result.output_modifier().map(|m| m.content), Some(Content::Value));
    }
}
