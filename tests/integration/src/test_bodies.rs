//! Request body decoding per route.

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use http::Method;
    use http::header::{ACCEPT, CONTENT_TYPE};
    use serde_json::json;
    use twinstack_http::request::HttpRequest;
    use twinstack_model::error::MappingError;
    use twinstack_model::request::DomainRequest;

    use crate::{encode_identifier, map, map_json, routes};

    const THUMBNAIL: &[u8] = b"--boundary42\r\n\
        Content-Disposition: form-data; name=\"fileName\"\r\n\
        \r\n\
        pump.png\r\n\
        --boundary42\r\n\
        Content-Disposition: form-data; name=\"file\"; filename=\"pump.png\"\r\n\
        Content-Type: image/png\r\n\
        \r\n\
        \x89PNG\r\n\
        --boundary42--\r\n";

    fn multipart(method: Method, path: &str) -> HttpRequest {
        HttpRequest::new(method, path)
            .with_header(CONTENT_TYPE, "multipart/form-data; boundary=boundary42")
            .with_body(THUMBNAIL)
    }

    #[test]
    fn test_should_decode_shell_body() {
        let body = json!({
            "modelType": "AssetAdministrationShell",
            "id": "urn:aas:pump",
            "idShort": "Pump",
            "assetInformation": {"assetKind": "Instance", "globalAssetId": "urn:asset:pump"}
        });
        let request = map_json(Method::POST, "shells", &body).unwrap();
        let DomainRequest::PostShell { shell } = request else {
            panic!("unexpected request: {request:?}");
        };
        assert_eq!(shell.id, "urn:aas:pump");
        assert_eq!(shell.id_short.as_deref(), Some("Pump"));
    }

    #[test]
    fn test_should_reject_wrong_body_shape() {
        for body in [json!([]), json!("shell"), json!({"idShort": "NoId"})] {
            let err = map_json(Method::POST, "shells", &body).unwrap_err();
            assert!(matches!(err, MappingError::InvalidBody { .. }), "{body}");
        }
    }

    #[test]
    fn test_should_decode_thumbnail_upload() {
        let aas = encode_identifier("urn:aas:pump");
        let request = routes()
            .map(&multipart(
                Method::PUT,
                &format!("shells/{aas}/asset-information/thumbnail"),
            ))
            .unwrap();
        let DomainRequest::PutThumbnail { aas_id, file } = request else {
            panic!("unexpected request: {request:?}");
        };
        assert_eq!(aas_id, "urn:aas:pump");
        assert_eq!(file.file_name, "pump.png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.content.as_ref(), b"\x89PNG");
    }

    #[test]
    fn test_should_decode_attachment_upload_in_context() {
        let aas = encode_identifier("urn:aas:pump");
        let sm = encode_identifier("urn:sm:docs");
        let request = routes()
            .map(&multipart(
                Method::PUT,
                &format!("shells/{aas}/aas/submodels/{sm}/submodel-elements/Manual/attachment"),
            ))
            .unwrap();
        let DomainRequest::PutFileByPath { scope, path, file } = request else {
            panic!("unexpected request: {request:?}");
        };
        assert_eq!(scope.aas_id.as_deref(), Some("urn:aas:pump"));
        assert_eq!(path.to_string(), "Manual");
        assert_eq!(file.file_name, "pump.png");
    }

    #[test]
    fn test_should_reject_upload_without_multipart() {
        let aas = encode_identifier("urn:aas:pump");
        let err = map_json(
            Method::PUT,
            &format!("shells/{aas}/asset-information/thumbnail"),
            &json!({}),
        )
        .unwrap_err();
        assert!(matches!(err, MappingError::InvalidBody { .. }));
    }

    #[test]
    fn test_should_decode_merge_patch() {
        let sm = encode_identifier("urn:sm:1");
        let request = map_json(
            Method::PATCH,
            &format!("submodels/{sm}/submodel-elements/Rating"),
            &json!({"value": "42", "description": null}),
        )
        .unwrap();
        let DomainRequest::PatchSubmodelElementByPath { patch, .. } = request else {
            panic!("unexpected request: {request:?}");
        };
        assert_eq!(patch.0.get("value"), Some(&json!("42")));
        assert_eq!(patch.0.get("description"), Some(&json!(null)));
    }

    #[test]
    fn test_should_partition_put_by_content_value() {
        let element = json!({"modelType": "Property", "idShort": "Rating", "value": "1"});
        let sm = encode_identifier("urn:sm:1");
        let put = map_json(
            Method::PUT,
            &format!("submodels/{sm}/submodel-elements/Rating"),
            &element,
        )
        .unwrap();
        assert_eq!(put.operation_name(), "PutSubmodelElementByPath");

        // The value route keeps the legacy standard base64 alphabet.
        let legacy = STANDARD.encode("??>");
        assert!(legacy.contains('+'));
        let set = map_json(
            Method::PUT,
            &format!("submodels/{legacy}/submodel-elements/Rating?content=value"),
            &json!("7"),
        )
        .unwrap();
        let DomainRequest::SetSubmodelElementValueByPath { scope, value, .. } = set else {
            panic!("unexpected request: {set:?}");
        };
        assert_eq!(scope.submodel_id, "??>");
        assert_eq!(value, json!("7"));
    }

    #[test]
    fn test_should_decode_serialization_request() {
        let aas = [encode_identifier("urn:aas:1"), encode_identifier("urn:aas:2")];
        let sm = encode_identifier("urn:sm:1");
        let request = HttpRequest::new(
            Method::GET,
            &format!(
                "serialization?aasIds={}&aasIds={}&submodelIds={sm}&includeConceptDescriptions=false",
                aas[0], aas[1]
            ),
        )
        .with_header(ACCEPT, "application/aasx+xml, */*;q=0.1");
        let mapped = routes().map(&request).unwrap();
        assert_eq!(
            mapped,
            DomainRequest::GenerateSerializationByIds {
                aas_ids: vec!["urn:aas:1".to_owned(), "urn:aas:2".to_owned()],
                submodel_ids: vec!["urn:sm:1".to_owned()],
                include_concept_descriptions: false,
                format: "application/aasx+xml".to_owned(),
            }
        );

        let defaults = map(Method::GET, "serialization").unwrap();
        let DomainRequest::GenerateSerializationByIds {
            include_concept_descriptions,
            format,
            ..
        } = defaults
        else {
            panic!("unexpected request: {defaults:?}");
        };
        assert!(include_concept_descriptions);
        assert_eq!(format, "application/json");
    }

    #[test]
    fn test_should_recognize_package_upload_as_not_implemented() {
        let err = routes()
            .map(&multipart(Method::POST, "packages"))
            .unwrap_err();
        assert!(matches!(err, MappingError::NotImplemented { .. }));
        assert_eq!(err.status_code(), http::StatusCode::NOT_IMPLEMENTED);
    }
}
