//! End-to-end mapping of the reference request shapes.

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;
    use twinstack_model::modifier::{Content, Extent, Level, OutputModifier};
    use twinstack_model::request::{DomainRequest, SubmodelScope};
    use twinstack_model::types::OperationArguments;

    use crate::{encode_json, map, map_json};

    #[test]
    fn test_should_map_element_by_path_with_level() {
        let request = map(
            Method::GET,
            "submodels/c3VibW9kZWwtMQ==/submodel-elements/Temperature?level=core",
        )
        .unwrap();

        let DomainRequest::GetSubmodelElementByPath {
            scope,
            path,
            output_modifier,
        } = request
        else {
            panic!("unexpected request: {request:?}");
        };
        assert_eq!(scope, SubmodelScope::standalone("submodel-1"));
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["Temperature"]);
        assert_eq!(
            output_modifier,
            OutputModifier {
                content: Content::Default,
                level: Level::Core,
                extent: Extent::Default,
            }
        );
    }

    #[test]
    fn test_should_map_async_invocation() {
        let body = json!({
            "inputArguments": [
                {"value": {"modelType": "Property", "idShort": "setpoint", "value": "21.5"}}
            ],
            "clientTimeoutDuration": "PT30S"
        });
        let request = map_json(
            Method::POST,
            "submodels/c3VibW9kZWwtMQ==/submodel-elements/Heater/invoke?async=true",
            &body,
        )
        .unwrap();

        let DomainRequest::InvokeOperationAsync {
            scope,
            path,
            content,
            request,
        } = request
        else {
            panic!("unexpected request: {request:?}");
        };
        assert_eq!(scope.submodel_id, "submodel-1");
        assert_eq!(path.to_string(), "Heater");
        assert_eq!(content, Content::Default);
        assert_eq!(
            request.client_timeout,
            Some(std::time::Duration::from_secs(30))
        );
        let OperationArguments::Full(inputs) = request.input_arguments else {
            panic!("expected full operation variables");
        };
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].value.id_short.as_deref(), Some("setpoint"));
    }

    #[test]
    fn test_should_select_asset_id_listing_by_predicate() {
        let asset_ids = encode_json(&json!([{"name": "serialNumber", "value": "SN-4711"}]));

        let filtered = map(Method::GET, &format!("shells?assetIds={asset_ids}")).unwrap();
        let DomainRequest::GetAllShellsByAssetId { asset_ids, .. } = filtered else {
            panic!("unexpected request: {filtered:?}");
        };
        assert_eq!(asset_ids.len(), 1);
        assert_eq!(asset_ids[0].name, "serialNumber");
        assert_eq!(asset_ids[0].value, "SN-4711");

        let unfiltered = map(Method::GET, "shells").unwrap();
        assert_eq!(unfiltered.operation_name(), "GetAllShells");
    }
}
