//! Paging parameters and filtered listings.

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use http::Method;
    use serde_json::json;
    use twinstack_http::request::HttpRequest;
    use twinstack_http::router::{RouteConfig, RouteTable};
    use twinstack_model::error::MappingError;
    use twinstack_model::modifier::PagingInfo;
    use twinstack_model::request::DomainRequest;

    use crate::{encode_identifier, encode_json, map};

    fn paging_of(request: &DomainRequest) -> PagingInfo {
        serde_json::from_value(serde_json::to_value(request).unwrap()["paging"].clone()).unwrap()
    }

    #[test]
    fn test_should_default_paging_when_absent() {
        for path in ["shells", "submodels", "concept-descriptions", "lookup/shells"] {
            let request = map(Method::GET, path).unwrap();
            assert_eq!(paging_of(&request), PagingInfo::ALL, "{path}");
        }
    }

    #[test]
    fn test_should_read_cursor_and_limit() {
        let request = map(Method::GET, "submodels?limit=5&cursor=b2Zmc2V0PTEw").unwrap();
        let paging = paging_of(&request);
        assert_eq!(paging.limit, NonZeroU32::new(5));
        assert_eq!(paging.cursor.as_deref(), Some("b2Zmc2V0PTEw"));
    }

    #[test]
    fn test_should_reject_invalid_limits() {
        for raw in ["0", "-1", "ten", "4294967296"] {
            let err = map(Method::GET, &format!("shells?limit={raw}")).unwrap_err();
            match err {
                MappingError::InvalidPagingParameter { name, value } => {
                    assert_eq!(name, "limit");
                    assert_eq!(value, raw);
                }
                other => panic!("unexpected error for {raw}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_should_apply_configured_default_limit() {
        let table = RouteTable::new(RouteConfig {
            default_page_limit: NonZeroU32::new(50),
            ..RouteConfig::default()
        })
        .unwrap();

        let defaulted = table.map(&HttpRequest::new(Method::GET, "shells")).unwrap();
        assert_eq!(paging_of(&defaulted).limit, NonZeroU32::new(50));

        let explicit = table
            .map(&HttpRequest::new(Method::GET, "shells?limit=3"))
            .unwrap();
        assert_eq!(paging_of(&explicit).limit, NonZeroU32::new(3));
    }

    #[test]
    fn test_should_page_submodel_elements_in_context() {
        let aas = encode_identifier("urn:aas:1");
        let sm = encode_identifier("urn:sm:1");
        let request = map(
            Method::GET,
            &format!("shells/{aas}/aas/submodels/{sm}/submodel-elements?limit=2"),
        )
        .unwrap();
        assert_eq!(request.operation_name(), "GetAllSubmodelElements");
        assert_eq!(paging_of(&request).limit, NonZeroU32::new(2));
    }

    #[test]
    fn test_should_select_filtered_listings() {
        let semantic_id = encode_json(&json!({
            "type": "ExternalReference",
            "keys": [{"type": "GlobalReference", "value": "0173-1#01-AHX837#002"}]
        }));
        let cases = [
            ("shells?idShort=Pump".to_owned(), "GetAllShellsByIdShort"),
            ("submodels?idShort=Nameplate".to_owned(), "GetAllSubmodelsByIdShort"),
            (format!("submodels?semanticId={semantic_id}"), "GetAllSubmodelsBySemanticId"),
            (
                format!("concept-descriptions?isCaseOf={semantic_id}"),
                "GetAllConceptDescriptionsByIsCaseOf",
            ),
            (
                format!("concept-descriptions?dataSpecificationRef={semantic_id}"),
                "GetAllConceptDescriptionsByDataSpecificationReference",
            ),
            ("concept-descriptions?idShort=Voltage".to_owned(), "GetAllConceptDescriptionsByIdShort"),
        ];
        for (path, operation) in cases {
            let request = map(Method::GET, &path).unwrap();
            assert_eq!(request.operation_name(), operation, "{path}");
        }
    }

    #[test]
    fn test_should_decode_repeated_asset_ids() {
        let first = encode_json(&json!({"name": "serialNumber", "value": "1"}));
        let second = encode_json(&json!({"name": "globalAssetId", "value": "urn:asset:2"}));
        let request = map(
            Method::GET,
            &format!("lookup/shells?assetIds={first}&assetIds={second}&limit=10"),
        )
        .unwrap();
        let DomainRequest::GetAllShellIdsByAssetLink { asset_ids, paging } = request else {
            panic!("unexpected request: {request:?}");
        };
        let names: Vec<_> = asset_ids.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["serialNumber", "globalAssetId"]);
        assert_eq!(paging.limit, NonZeroU32::new(10));
    }

    #[test]
    fn test_should_reject_malformed_filters() {
        let err = map(Method::GET, "shells?assetIds=***").unwrap_err();
        assert!(matches!(err, MappingError::InvalidIdentifierEncoding { .. }));

        let not_json = encode_identifier("serialNumber=1");
        let err = map(Method::GET, &format!("shells?assetIds={not_json}")).unwrap_err();
        assert!(matches!(err, MappingError::InvalidQueryParameter { .. }));

        let err = map(Method::GET, "shells?idShort=").unwrap_err();
        assert!(matches!(err, MappingError::InvalidQueryParameter { .. }));
    }
}
