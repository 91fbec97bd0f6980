//! Output modifier and paging assembly.
//!
//! Both builders are pure functions of the request's query parameters and the
//! route's declared constraints. Nothing is clamped: a value the route does
//! not accept is an error.

use std::num::NonZeroU32;

use twinstack_model::error::MappingError;
use twinstack_model::modifier::{
    Content, Extent, Level, OutputModifier, OutputModifierConstraints, PagingInfo,
};

use crate::request::query_value;

/// Query parameter selecting the content modifier.
pub const CONTENT_PARAM: &str = "content";
/// Query parameter selecting the expansion depth.
pub const LEVEL_PARAM: &str = "level";
/// Query parameter selecting blob handling.
pub const EXTENT_PARAM: &str = "extent";
/// Legacy spelling of [`EXTENT_PARAM`].
pub const EXTEND_PARAM: &str = "extend";
/// Paging continuation token.
pub const CURSOR_PARAM: &str = "cursor";
/// Paging limit.
pub const LIMIT_PARAM: &str = "limit";

/// Build the output modifier for a request mapped to `route`.
///
/// `path_token` is the content-modifier token taken from the path (the
/// optional `$token` suffix or a literal `$token` segment of the route).
///
/// # Errors
///
/// - [`MappingError::UnsupportedContentModifier`] for an unknown content
///   token or one outside `constraints`.
/// - [`MappingError::InvalidOutputModifier`] for unparseable `level` or
///   `extent`, for values the route does not support, for conflicting path
///   and query content, and for illegal combinations.
pub fn assemble_output_modifier(
    route: &str,
    path_token: Option<&str>,
    query: &[(String, String)],
    constraints: &OutputModifierConstraints,
) -> Result<OutputModifier, MappingError> {
    let invalid = |reason: String| MappingError::InvalidOutputModifier {
        reason,
        route: route.to_owned(),
    };
    let unsupported = |token: &str| MappingError::UnsupportedContentModifier {
        token: token.to_owned(),
        route: route.to_owned(),
    };

    let path_content = path_token
        .map(|t| t.parse::<Content>().map_err(|_| unsupported(t)))
        .transpose()?;
    let query_token = query_value(query, CONTENT_PARAM).filter(|v| !v.is_empty());
    let query_content = query_token
        .map(|t| t.parse::<Content>().map_err(|_| unsupported(t)))
        .transpose()?;

    let content = match (path_content, query_content) {
        (Some(p), Some(q)) if p != q => {
            return Err(invalid(format!(
                "path modifier '${p}' conflicts with content={q}"
            )));
        }
        (Some(c), _) | (None, Some(c)) => c,
        // A route that accepts exactly one content (the dedicated `$value`
        // and `$reference` routes) implies it.
        (None, None) => match constraints.contents {
            [only] => *only,
            _ => Content::Default,
        },
    };
    if !constraints.allows_content(content) {
        let token = path_token.or(query_token).unwrap_or(content.as_str());
        return Err(unsupported(token));
    }

    let level = match query_value(query, LEVEL_PARAM).filter(|v| !v.is_empty()) {
        None => None,
        Some(raw) => {
            let level = raw
                .parse::<Level>()
                .map_err(|e| invalid(format!("level: {e}")))?;
            if !constraints.supports_level {
                return Err(invalid("level is not supported".to_owned()));
            }
            Some(level)
        }
    };

    let extent_raw = query_value(query, EXTENT_PARAM)
        .filter(|v| !v.is_empty())
        .or_else(|| query_value(query, EXTEND_PARAM).filter(|v| !v.is_empty()));
    let extent = match extent_raw {
        None => None,
        Some(raw) => {
            let extent = raw
                .parse::<Extent>()
                .map_err(|e| invalid(format!("extent: {e}")))?;
            if !constraints.supports_extent {
                return Err(invalid("extent is not supported".to_owned()));
            }
            Some(extent)
        }
    };

    check_combination(content, level, extent).map_err(|reason| invalid(reason.to_owned()))?;

    Ok(OutputModifier {
        content,
        level: level.unwrap_or_default(),
        extent: extent.unwrap_or_default(),
    })
}

fn check_combination(
    content: Content,
    level: Option<Level>,
    extent: Option<Extent>,
) -> Result<(), &'static str> {
    match content {
        Content::Reference if level.is_some() => {
            Err("level cannot be combined with content=reference")
        }
        Content::Reference | Content::Path | Content::Metadata
            if extent == Some(Extent::WithBlobValue) =>
        {
            Err("extent=withBlobValue is only valid for content=normal or content=value")
        }
        _ => Ok(()),
    }
}

/// Build the paging descriptor.
///
/// An absent or empty `cursor` and an absent `limit` fall back to `defaults`.
///
/// # Errors
///
/// Returns [`MappingError::InvalidPagingParameter`] if `limit` is present but
/// not a positive integer that fits in `u32`.
pub fn assemble_paging(
    query: &[(String, String)],
    defaults: &PagingInfo,
) -> Result<PagingInfo, MappingError> {
    let cursor = query_value(query, CURSOR_PARAM)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
        .or_else(|| defaults.cursor.clone());

    let limit = match query_value(query, LIMIT_PARAM) {
        None => defaults.limit,
        Some(raw) => Some(parse_limit(raw).ok_or_else(|| {
            MappingError::InvalidPagingParameter {
                name: LIMIT_PARAM.to_owned(),
                value: raw.to_owned(),
            }
        })?),
    };

    Ok(PagingInfo { cursor, limit })
}

fn parse_limit(raw: &str) -> Option<NonZeroU32> {
    let value = raw.trim().parse::<i64>().ok()?;
    u32::try_from(value).ok().and_then(NonZeroU32::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::parse_query_params;

    const ROUTE: &str = "GetSubmodelElementByPath";

    fn assemble(
        token: Option<&str>,
        query: &str,
        constraints: &OutputModifierConstraints,
    ) -> Result<OutputModifier, MappingError> {
        assemble_output_modifier(ROUTE, token, &parse_query_params(query), constraints)
    }

    #[test]
    fn test_should_default_when_nothing_is_set() {
        let m = assemble(None, "", &OutputModifierConstraints::SUBMODEL_ELEMENT).unwrap();
        assert_eq!(m, OutputModifier::DEFAULT);
    }

    #[test]
    fn test_should_read_level_and_extent() {
        let m = assemble(
            None,
            "level=core&extent=withBlobValue",
            &OutputModifierConstraints::SUBMODEL_ELEMENT,
        )
        .unwrap();
        assert_eq!(m.level, Level::Core);
        assert_eq!(m.extent, Extent::WithBlobValue);
    }

    #[test]
    fn test_should_accept_legacy_extend_spelling() {
        let m = assemble(
            None,
            "extend=WITHBLOBVALUE",
            &OutputModifierConstraints::SUBMODEL,
        )
        .unwrap();
        assert_eq!(m.extent, Extent::WithBlobValue);
    }

    #[test]
    fn test_should_prefer_extent_over_extend() {
        let m = assemble(
            None,
            "extend=withBlobValue&extent=withoutBlobValue",
            &OutputModifierConstraints::SUBMODEL,
        )
        .unwrap();
        assert_eq!(m.extent, Extent::Default);
    }

    #[test]
    fn test_should_take_content_from_path_token() {
        let m = assemble(Some("metadata"), "", &OutputModifierConstraints::SUBMODEL).unwrap();
        assert_eq!(m.content, Content::Metadata);
    }

    #[test]
    fn test_should_take_content_from_query() {
        let m = assemble(None, "content=path", &OutputModifierConstraints::SUBMODEL).unwrap();
        assert_eq!(m.content, Content::Path);
    }

    #[test]
    fn test_should_reject_conflicting_path_and_query_content() {
        let err = assemble(
            Some("metadata"),
            "content=path",
            &OutputModifierConstraints::SUBMODEL,
        )
        .unwrap_err();
        assert!(matches!(err, MappingError::InvalidOutputModifier { .. }));
    }

    #[test]
    fn test_should_imply_sole_allowed_content() {
        let m = assemble(None, "level=core", &OutputModifierConstraints::VALUE).unwrap();
        assert_eq!(m.content, Content::Value);
        assert_eq!(m.level, Level::Core);
    }

    #[test]
    fn test_should_reject_unknown_token_naming_it() {
        let err = assemble(Some("bogus"), "", &OutputModifierConstraints::SUBMODEL).unwrap_err();
        match err {
            MappingError::UnsupportedContentModifier { token, route } => {
                assert_eq!(token, "bogus");
                assert_eq!(route, ROUTE);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_should_reject_content_outside_allow_list() {
        let err = assemble(Some("value"), "", &OutputModifierConstraints::SHELL).unwrap_err();
        assert!(matches!(
            err,
            MappingError::UnsupportedContentModifier { .. }
        ));
    }

    #[test]
    fn test_should_reject_reference_query_on_single_submodel() {
        let err = assemble(None, "content=reference", &OutputModifierConstraints::SUBMODEL).unwrap_err();
        match err {
            MappingError::UnsupportedContentModifier { token, .. } => assert_eq!(token, "reference"),
            other => panic!("unexpected error: {other:?}"),
        }
        let m = assemble(None, "content=reference", &OutputModifierConstraints::SUBMODEL_LIST).unwrap();
        assert_eq!(m.content, Content::Reference);
    }

    #[test]
    fn test_should_reject_unparseable_level() {
        let err = assemble(None, "level=shallow", &OutputModifierConstraints::SUBMODEL).unwrap_err();
        assert!(matches!(err, MappingError::InvalidOutputModifier { .. }));
    }

    #[test]
    fn test_should_reject_level_on_unsupported_route() {
        let err = assemble(None, "level=core", &OutputModifierConstraints::SHELL).unwrap_err();
        assert!(matches!(err, MappingError::InvalidOutputModifier { .. }));
    }

    #[test]
    fn test_should_reject_illegal_combinations() {
        for (token, query) in [
            ("reference", "level=core"),
            ("metadata", "extent=withBlobValue"),
            ("path", "extent=withBlobValue"),
        ] {
            let err = assemble(Some(token), query, &OutputModifierConstraints::SUBMODEL_LIST)
                .unwrap_err();
            assert!(
                matches!(err, MappingError::InvalidOutputModifier { .. }),
                "${token}?{query} should be rejected"
            );
        }
    }

    #[test]
    fn test_should_allow_value_with_blob() {
        let m = assemble(
            Some("value"),
            "extent=withBlobValue",
            &OutputModifierConstraints::SUBMODEL,
        )
        .unwrap();
        assert_eq!(m.content, Content::Value);
        assert_eq!(m.extent, Extent::WithBlobValue);
    }

    #[test]
    fn test_should_use_paging_defaults() {
        let defaults = PagingInfo::with_limit(NonZeroU32::new(100).unwrap());
        let paging = assemble_paging(&[], &defaults).unwrap();
        assert_eq!(paging, defaults);
    }

    #[test]
    fn test_should_read_cursor_and_limit() {
        let paging =
            assemble_paging(&parse_query_params("cursor=abc%3D&limit=5"), &PagingInfo::ALL)
                .unwrap();
        assert_eq!(paging.cursor.as_deref(), Some("abc="));
        assert_eq!(paging.limit, NonZeroU32::new(5));
    }

    #[test]
    fn test_should_reject_non_positive_limits() {
        for raw in ["0", "-5", "abc", "", "1.5", "99999999999"] {
            let err = assemble_paging(
                &parse_query_params(&format!("limit={raw}")),
                &PagingInfo::ALL,
            )
            .unwrap_err();
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
    fn test_should_treat_empty_cursor_as_absent() {
        let paging = assemble_paging(&parse_query_params("cursor="), &PagingInfo::ALL).unwrap();
        assert_eq!(paging.cursor, None);
    }
}
