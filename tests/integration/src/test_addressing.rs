//! Identifier codec and dual addressing through the shell context.

#[cfg(test)]
mod tests {
    use http::Method;
    use twinstack_model::error::MappingError;
    use twinstack_model::request::{DomainRequest, SubmodelScope};

    use crate::{encode_identifier, map};

    const AAS: &str = "https://example.com/ids/aas/7010_1110_4012_2005";
    const SUBMODEL: &str = "https://example.com/ids/sm/4343_5072_7091_3242";

    #[test]
    fn test_should_round_trip_identifiers_through_paths() {
        for id in [SUBMODEL, "urn:uuid:0b1c", "id with spaces/and?query", "Ünïcödé"] {
            let request = map(
                Method::GET,
                &format!("submodels/{}/submodel-elements", encode_identifier(id)),
            )
            .unwrap();
            assert_eq!(request.scope().map(|s| s.submodel_id.as_str()), Some(id));
        }
    }

    #[test]
    fn test_should_accept_unpadded_identifiers() {
        let padded = encode_identifier("submodel-1");
        let unpadded = padded.trim_end_matches('=');
        let request = map(Method::GET, &format!("submodels/{unpadded}")).unwrap();
        assert_eq!(
            request.scope(),
            Some(&SubmodelScope::standalone("submodel-1"))
        );
    }

    #[test]
    fn test_should_map_both_addressing_forms_to_same_operation() {
        let aas = encode_identifier(AAS);
        let sm = encode_identifier(SUBMODEL);
        for suffix in [
            "",
            "/$metadata",
            "/submodel-elements",
            "/submodel-elements/Nameplate.SerialNumber",
            "/submodel-elements/Nameplate.SerialNumber/$value",
            "/submodel-elements/Nameplate.Manual/attachment",
        ] {
            let standalone = map(Method::GET, &format!("submodels/{sm}{suffix}")).unwrap();
            let contextualized = map(
                Method::GET,
                &format!("shells/{aas}/aas/submodels/{sm}{suffix}"),
            )
            .unwrap();

            assert_eq!(
                standalone.operation_name(),
                contextualized.operation_name(),
                "suffix {suffix}"
            );
            assert_eq!(standalone.element_path(), contextualized.element_path());
            assert_eq!(
                standalone.output_modifier(),
                contextualized.output_modifier()
            );
            assert_eq!(standalone.scope(), Some(&SubmodelScope::standalone(SUBMODEL)));
            assert_eq!(
                contextualized.scope(),
                Some(&SubmodelScope::contextualized(AAS, SUBMODEL))
            );
        }
    }

    #[test]
    fn test_should_keep_shell_routes_outside_context() {
        let aas = encode_identifier(AAS);
        let request = map(Method::GET, &format!("shells/{aas}")).unwrap();
        assert_eq!(
            request,
            DomainRequest::GetShell {
                aas_id: AAS.to_owned(),
                output_modifier: twinstack_model::modifier::OutputModifier::DEFAULT,
            }
        );

        // Shell-level resources are not part of the submodel interface.
        let err = map(Method::GET, &format!("shells/{aas}/aas/submodel-refs")).unwrap_err();
        assert!(matches!(err, MappingError::NoRouteMatched { .. }));
    }

    #[test]
    fn test_should_reject_invalid_identifier_encoding() {
        let err = map(Method::GET, "submodels/not*base64!").unwrap_err();
        match err {
            MappingError::InvalidIdentifierEncoding {
                parameter, token, ..
            } => {
                assert_eq!(parameter, "submodelId");
                assert_eq!(token, "not*base64!");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_should_reject_empty_path_segment() {
        let sm = encode_identifier(SUBMODEL);
        let err = map(
            Method::GET,
            &format!("submodels/{sm}/submodel-elements/Nameplate..Serial"),
        )
        .unwrap_err();
        assert!(matches!(err, MappingError::InvalidElementPath { .. }));
    }
}
