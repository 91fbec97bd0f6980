//! Content modifier exclusivity and output modifier validation.

#[cfg(test)]
mod tests {
    use http::Method;
    use twinstack_model::error::MappingError;
    use twinstack_model::modifier::{Content, Extent, Level};

    use crate::{encode_identifier, map};

    fn submodel(suffix: &str) -> String {
        format!("submodels/{}{suffix}", encode_identifier("urn:sm:1"))
    }

    #[test]
    fn test_should_route_each_modifier_to_exactly_one_operation() {
        for (suffix, operation, content) in [
            ("", "GetSubmodel", Content::Default),
            ("/$metadata", "GetSubmodel", Content::Metadata),
            ("/$value", "GetSubmodel", Content::Value),
            ("/$path", "GetSubmodel", Content::Path),
            ("/$reference", "GetSubmodelReference", Content::Reference),
            ("/submodel-elements/A.B", "GetSubmodelElementByPath", Content::Default),
            (
                "/submodel-elements/A.B/$metadata",
                "GetSubmodelElementByPath",
                Content::Metadata,
            ),
            (
                "/submodel-elements/A.B/$value",
                "GetSubmodelElementValueByPath",
                Content::Value,
            ),
            (
                "/submodel-elements/A.B/$reference",
                "GetSubmodelElementReferenceByPath",
                Content::Reference,
            ),
        ] {
            let request = map(Method::GET, &submodel(suffix)).unwrap();
            assert_eq!(request.operation_name(), operation, "suffix {suffix}");
            if let Some(modifier) = request.output_modifier() {
                assert_eq!(modifier.content, content, "suffix {suffix}");
            }
        }
    }

    #[test]
    fn test_should_route_modifier_tokens_regardless_of_case() {
        for (suffix, operation, content) in [
            ("/$REFERENCE", "GetSubmodelReference", Content::Reference),
            ("/$Metadata", "GetSubmodel", Content::Metadata),
            (
                "/submodel-elements/Temp/$VALUE",
                "GetSubmodelElementValueByPath",
                Content::Value,
            ),
            (
                "/submodel-elements/Temp/$Reference",
                "GetSubmodelElementReferenceByPath",
                Content::Reference,
            ),
            (
                "/submodel-elements/Temp/$METADATA",
                "GetSubmodelElementByPath",
                Content::Metadata,
            ),
        ] {
            let request = map(Method::GET, &submodel(suffix)).unwrap();
            assert_eq!(request.operation_name(), operation, "suffix {suffix}");
            if let Some(modifier) = request.output_modifier() {
                assert_eq!(modifier.content, content, "suffix {suffix}");
            }
        }
    }

    #[test]
    fn test_should_partition_patch_by_value_modifier() {
        let plain = map(Method::PATCH, &submodel("")).unwrap_err();
        // No body: the route is selected, the merge patch fails to decode.
        assert!(matches!(plain, MappingError::InvalidBody { .. }));

        let request = twinstack_http::request::HttpRequest::new(Method::PATCH, &submodel("/$value"))
            .with_body(r#"{"Temperature": "21"}"#);
        let mapped = crate::routes().map(&request).unwrap();
        assert_eq!(mapped.operation_name(), "PatchSubmodelValue");
    }

    #[test]
    fn test_should_reject_unknown_modifier_naming_token_and_route() {
        let err = map(Method::GET, &submodel("/$bogus")).unwrap_err();
        match err {
            MappingError::UnsupportedContentModifier { token, route } => {
                assert_eq!(token, "bogus");
                assert_eq!(route, "GetSubmodel");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_should_reject_modifier_outside_route_allow_list() {
        let shell = format!("shells/{}/$value", encode_identifier("urn:aas:1"));
        let err = map(Method::GET, &shell).unwrap_err();
        assert!(matches!(err, MappingError::UnsupportedContentModifier { .. }));

        let err = map(Method::GET, "shells?content=value").unwrap_err();
        assert!(matches!(err, MappingError::UnsupportedContentModifier { .. }));
    }

    #[test]
    fn test_should_read_level_and_extent_case_insensitively() {
        let request = map(
            Method::GET,
            &submodel("/submodel-elements?level=CORE&extent=WithBlobValue"),
        )
        .unwrap();
        let modifier = request.output_modifier().unwrap();
        assert_eq!(modifier.level, Level::Core);
        assert_eq!(modifier.extent, Extent::WithBlobValue);
    }

    #[test]
    fn test_should_reject_illegal_modifier_combinations() {
        for query in [
            "/$metadata?extent=withBlobValue",
            "/$path?extent=withBlobValue",
            "/$reference?level=core",
            "?level=everything",
            "/$metadata?content=path",
        ] {
            let err = map(Method::GET, &submodel(query)).unwrap_err();
            assert!(
                matches!(err, MappingError::InvalidOutputModifier { .. }),
                "{query}: {err:?}"
            );
        }
    }

    #[test]
    fn test_should_serve_references_of_single_resources_only_from_dedicated_routes() {
        let err = map(Method::GET, &submodel("?content=reference")).unwrap_err();
        assert!(matches!(err, MappingError::UnsupportedContentModifier { .. }));
        let err = map(Method::GET, &submodel("/submodel-elements/Temp?content=reference")).unwrap_err();
        assert!(matches!(err, MappingError::UnsupportedContentModifier { .. }));

        for path in ["submodels/$reference", "submodels?content=reference"] {
            let request = map(Method::GET, path).unwrap();
            assert_eq!(request.operation_name(), "GetAllSubmodels", "{path}");
            assert_eq!(request.output_modifier().unwrap().content, Content::Reference);
        }
        let request = map(Method::GET, &submodel("/submodel-elements/$reference")).unwrap();
        assert_eq!(request.operation_name(), "GetAllSubmodelElements");
        assert_eq!(request.output_modifier().unwrap().content, Content::Reference);
    }

    #[test]
    fn test_should_reject_level_on_shell_routes() {
        let err = map(Method::GET, "shells?level=core").unwrap_err();
        assert!(matches!(err, MappingError::InvalidOutputModifier { .. }));
    }
}
