//! The route catalogue.
//!
//! One declarative entry per route. Submodel-scoped routes are written
//! relative to the submodel; the composer adds the standalone and
//! contextualized prefixes.

use http::Method;
use http::header::ACCEPT;
use twinstack_model::error::MappingError;
use twinstack_model::modifier::{Content, OutputModifierConstraints as Modifiers, PagingInfo};
use twinstack_model::request::DomainRequest;
use twinstack_model::types::{
    AssetAdministrationShell, AssetInformation, ConceptDescription, Reference, SpecificAssetId,
    Submodel, SubmodelElement,
};

use crate::codec::{
    IdentifierEncoding, decode_json_query, decode_json_query_list, decode_query_identifiers,
};
use crate::pattern::AAS_ID;
use crate::payload::{
    decode_file_upload, decode_list, decode_merge_patch, decode_object, decode_operation_request,
    decode_value,
};
use crate::request::HttpRequest;
use crate::router::{ParseContext, RouteSpec};

type ParseResult = Result<DomainRequest, MappingError>;

const ID_SHORT: &str = "idShort";
const ASSET_IDS: &str = "assetIds";
const SEMANTIC_ID: &str = "semanticId";
const IS_CASE_OF: &str = "isCaseOf";
const DATA_SPECIFICATION_REF: &str = "dataSpecificationRef";
const AAS_IDS: &str = "aasIds";
const SUBMODEL_IDS: &str = "submodelIds";
const INCLUDE_CONCEPT_DESCRIPTIONS: &str = "includeConceptDescriptions";
const ASYNC: &str = "async";
const CD_ID: &str = "cdId";
const HANDLE_ID: &str = "handleId";
const DEFAULT_SERIALIZATION_FORMAT: &str = "application/json";

/// Every route of the API, in declaration order.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn catalogue() -> Vec<RouteSpec> {
    vec![
        RouteSpec::repository("GetSelfDescription", Method::GET, "description", |_| {
            Ok(DomainRequest::GetSelfDescription)
        }),
        // -- Shell repository -------------------------------------------------
        RouteSpec::repository("GetAllShells", Method::GET, "shells", get_all_shells)
            .output_modifier(Modifiers::SHELL)
            .paging(PagingInfo::ALL)
            .when(|r| !r.has_query(ASSET_IDS) && !r.has_query(ID_SHORT)),
        RouteSpec::repository("GetAllShellsByAssetId", Method::GET, "shells", get_all_shells_by_asset_id)
            .output_modifier(Modifiers::SHELL)
            .paging(PagingInfo::ALL)
            .when(|r| r.has_query(ASSET_IDS)),
        RouteSpec::repository("GetAllShellsByIdShort", Method::GET, "shells", get_all_shells_by_id_short)
            .output_modifier(Modifiers::SHELL)
            .paging(PagingInfo::ALL)
            .when(|r| r.has_query(ID_SHORT) && !r.has_query(ASSET_IDS)),
        RouteSpec::repository("PostShell", Method::POST, "shells", |ctx| {
            Ok(DomainRequest::PostShell {
                shell: decode_object::<AssetAdministrationShell>(ctx.body(), "AssetAdministrationShell")?,
            })
        }),
        RouteSpec::repository("GetShell", Method::GET, "shells/{aasId}", |ctx| {
            Ok(DomainRequest::GetShell {
                aas_id: ctx.identifier(AAS_ID)?,
                output_modifier: ctx.output_modifier(),
            })
        })
        .output_modifier(Modifiers::SHELL),
        RouteSpec::repository("PutShell", Method::PUT, "shells/{aasId}", |ctx| {
            Ok(DomainRequest::PutShell {
                aas_id: ctx.identifier(AAS_ID)?,
                shell: decode_object(ctx.body(), "AssetAdministrationShell")?,
            })
        }),
        RouteSpec::repository("DeleteShell", Method::DELETE, "shells/{aasId}", |ctx| {
            Ok(DomainRequest::DeleteShell {
                aas_id: ctx.identifier(AAS_ID)?,
            })
        }),
        RouteSpec::repository("GetAssetInformation", Method::GET, "shells/{aasId}/asset-information", |ctx| {
            Ok(DomainRequest::GetAssetInformation {
                aas_id: ctx.identifier(AAS_ID)?,
            })
        }),
        RouteSpec::repository("PutAssetInformation", Method::PUT, "shells/{aasId}/asset-information", |ctx| {
            Ok(DomainRequest::PutAssetInformation {
                aas_id: ctx.identifier(AAS_ID)?,
                asset_information: decode_object::<AssetInformation>(ctx.body(), "AssetInformation")?,
            })
        }),
        RouteSpec::repository("GetThumbnail", Method::GET, "shells/{aasId}/asset-information/thumbnail", |ctx| {
            Ok(DomainRequest::GetThumbnail {
                aas_id: ctx.identifier(AAS_ID)?,
            })
        }),
        RouteSpec::repository("PutThumbnail", Method::PUT, "shells/{aasId}/asset-information/thumbnail", |ctx| {
            Ok(DomainRequest::PutThumbnail {
                aas_id: ctx.identifier(AAS_ID)?,
                file: decode_file_upload(ctx.request().content_type(), ctx.body())?,
            })
        }),
        RouteSpec::repository("DeleteThumbnail", Method::DELETE, "shells/{aasId}/asset-information/thumbnail", |ctx| {
            Ok(DomainRequest::DeleteThumbnail {
                aas_id: ctx.identifier(AAS_ID)?,
            })
        }),
        RouteSpec::repository("GetAllSubmodelReferences", Method::GET, "shells/{aasId}/submodel-refs", |ctx| {
            Ok(DomainRequest::GetAllSubmodelReferences {
                aas_id: ctx.identifier(AAS_ID)?,
                paging: ctx.paging(),
            })
        })
        .paging(PagingInfo::ALL),
        RouteSpec::repository("PostSubmodelReference", Method::POST, "shells/{aasId}/submodel-refs", |ctx| {
            Ok(DomainRequest::PostSubmodelReference {
                aas_id: ctx.identifier(AAS_ID)?,
                reference: decode_object::<Reference>(ctx.body(), "Reference")?,
            })
        }),
        RouteSpec::repository(
            "DeleteSubmodelReference",
            Method::DELETE,
            "shells/{aasId}/submodel-refs/{submodelId}",
            |ctx| {
                Ok(DomainRequest::DeleteSubmodelReference {
                    aas_id: ctx.identifier(AAS_ID)?,
                    submodel_id: ctx.identifier("submodelId")?,
                })
            },
        ),
        // -- Submodel repository ----------------------------------------------
        RouteSpec::repository("GetAllSubmodels", Method::GET, "submodels", |ctx| {
            Ok(DomainRequest::GetAllSubmodels {
                output_modifier: ctx.output_modifier(),
                paging: ctx.paging(),
            })
        })
        .output_modifier(Modifiers::SUBMODEL_LIST)
        .paging(PagingInfo::ALL)
        .when(|r| !r.has_query(ID_SHORT) && !r.has_query(SEMANTIC_ID)),
        RouteSpec::repository("GetAllSubmodelsBySemanticId", Method::GET, "submodels", get_all_submodels_by_semantic_id)
            .output_modifier(Modifiers::SUBMODEL_LIST)
            .paging(PagingInfo::ALL)
            .when(|r| r.has_query(SEMANTIC_ID)),
        RouteSpec::repository("GetAllSubmodelsByIdShort", Method::GET, "submodels", |ctx| {
            Ok(DomainRequest::GetAllSubmodelsByIdShort {
                id_short: required_query(ctx, ID_SHORT)?,
                output_modifier: ctx.output_modifier(),
                paging: ctx.paging(),
            })
        })
        .output_modifier(Modifiers::SUBMODEL_LIST)
        .paging(PagingInfo::ALL)
        .when(|r| r.has_query(ID_SHORT) && !r.has_query(SEMANTIC_ID)),
        RouteSpec::repository("PostSubmodel", Method::POST, "submodels", |ctx| {
            Ok(DomainRequest::PostSubmodel {
                submodel: decode_object::<Submodel>(ctx.body(), "Submodel")?,
            })
        }),
        RouteSpec::repository("DeleteSubmodel", Method::DELETE, "submodels/{submodelId}", |ctx| {
            Ok(DomainRequest::DeleteSubmodel {
                submodel_id: ctx.identifier("submodelId")?,
            })
        }),
        // -- Submodel interface -----------------------------------------------
        RouteSpec::submodel("GetSubmodel", Method::GET, "", |ctx| {
            Ok(DomainRequest::GetSubmodel {
                scope: ctx.scope()?,
                output_modifier: ctx.output_modifier(),
            })
        })
        .output_modifier(Modifiers::SUBMODEL)
        .excluding(&[Content::Reference]),
        RouteSpec::submodel("GetSubmodelReference", Method::GET, "$reference", |ctx| {
            Ok(DomainRequest::GetSubmodelReference { scope: ctx.scope()? })
        })
        .output_modifier(Modifiers::REFERENCE),
        RouteSpec::submodel("PutSubmodel", Method::PUT, "", |ctx| {
            Ok(DomainRequest::PutSubmodel {
                scope: ctx.scope()?,
                submodel: decode_object(ctx.body(), "Submodel")?,
            })
        }),
        RouteSpec::submodel("PatchSubmodel", Method::PATCH, "", |ctx| {
            Ok(DomainRequest::PatchSubmodel {
                scope: ctx.scope()?,
                patch: decode_merge_patch(ctx.body())?,
            })
        })
        .output_modifier(Modifiers::NONE)
        .excluding(&[Content::Value]),
        RouteSpec::submodel("PatchSubmodelValue", Method::PATCH, "$value", |ctx| {
            Ok(DomainRequest::PatchSubmodelValue {
                scope: ctx.scope()?,
                value: decode_value(ctx.body())?,
            })
        }),
        RouteSpec::submodel("GetAllSubmodelElements", Method::GET, "submodel-elements", |ctx| {
            Ok(DomainRequest::GetAllSubmodelElements {
                scope: ctx.scope()?,
                output_modifier: ctx.output_modifier(),
                paging: ctx.paging(),
            })
        })
        .output_modifier(Modifiers::SUBMODEL_ELEMENT_LIST)
        .paging(PagingInfo::ALL),
        RouteSpec::submodel("PostSubmodelElement", Method::POST, "submodel-elements", |ctx| {
            Ok(DomainRequest::PostSubmodelElement {
                scope: ctx.scope()?,
                element: decode_object::<SubmodelElement>(ctx.body(), "SubmodelElement")?,
            })
        }),
        RouteSpec::submodel("GetSubmodelElementByPath", Method::GET, "submodel-elements/{path}", |ctx| {
            Ok(DomainRequest::GetSubmodelElementByPath {
                scope: ctx.scope()?,
                path: ctx.element_path()?,
                output_modifier: ctx.output_modifier(),
            })
        })
        .output_modifier(Modifiers::SUBMODEL_ELEMENT)
        .excluding(&[Content::Value, Content::Reference]),
        RouteSpec::submodel("GetSubmodelElementValueByPath", Method::GET, "submodel-elements/{path}/$value", |ctx| {
            Ok(DomainRequest::GetSubmodelElementValueByPath {
                scope: ctx.scope()?,
                path: ctx.element_path()?,
                output_modifier: ctx.output_modifier(),
            })
        })
        .output_modifier(Modifiers::VALUE),
        RouteSpec::submodel(
            "GetSubmodelElementReferenceByPath",
            Method::GET,
            "submodel-elements/{path}/$reference",
            |ctx| {
                Ok(DomainRequest::GetSubmodelElementReferenceByPath {
                    scope: ctx.scope()?,
                    path: ctx.element_path()?,
                })
            },
        )
        .output_modifier(Modifiers::REFERENCE),
        RouteSpec::submodel("PostSubmodelElementByPath", Method::POST, "submodel-elements/{path}", |ctx| {
            Ok(DomainRequest::PostSubmodelElementByPath {
                scope: ctx.scope()?,
                path: ctx.element_path()?,
                element: decode_object(ctx.body(), "SubmodelElement")?,
            })
        }),
        RouteSpec::submodel("PutSubmodelElementByPath", Method::PUT, "submodel-elements/{path}", |ctx| {
            Ok(DomainRequest::PutSubmodelElementByPath {
                scope: ctx.scope()?,
                path: ctx.element_path()?,
                element: decode_object(ctx.body(), "SubmodelElement")?,
            })
        })
        .when(|r| !is_content_value(r)),
        RouteSpec::submodel("SetSubmodelElementValueByPath", Method::PUT, "submodel-elements/{path}", |ctx| {
            Ok(DomainRequest::SetSubmodelElementValueByPath {
                scope: ctx.scope()?,
                path: ctx.element_path()?,
                value: decode_value(ctx.body())?,
            })
        })
        .identifier_encoding(IdentifierEncoding::Base64)
        .when(is_content_value),
        RouteSpec::submodel("PatchSubmodelElementByPath", Method::PATCH, "submodel-elements/{path}", |ctx| {
            Ok(DomainRequest::PatchSubmodelElementByPath {
                scope: ctx.scope()?,
                path: ctx.element_path()?,
                patch: decode_merge_patch(ctx.body())?,
            })
        })
        .output_modifier(Modifiers::NONE)
        .excluding(&[Content::Value]),
        RouteSpec::submodel(
            "PatchSubmodelElementValueByPath",
            Method::PATCH,
            "submodel-elements/{path}/$value",
            |ctx| {
                Ok(DomainRequest::PatchSubmodelElementValueByPath {
                    scope: ctx.scope()?,
                    path: ctx.element_path()?,
                    value: decode_value(ctx.body())?,
                })
            },
        ),
        RouteSpec::submodel("DeleteSubmodelElementByPath", Method::DELETE, "submodel-elements/{path}", |ctx| {
            Ok(DomainRequest::DeleteSubmodelElementByPath {
                scope: ctx.scope()?,
                path: ctx.element_path()?,
            })
        }),
        RouteSpec::submodel("GetFileByPath", Method::GET, "submodel-elements/{path}/attachment", |ctx| {
            Ok(DomainRequest::GetFileByPath {
                scope: ctx.scope()?,
                path: ctx.element_path()?,
            })
        }),
        RouteSpec::submodel("PutFileByPath", Method::PUT, "submodel-elements/{path}/attachment", |ctx| {
            Ok(DomainRequest::PutFileByPath {
                scope: ctx.scope()?,
                path: ctx.element_path()?,
                file: decode_file_upload(ctx.request().content_type(), ctx.body())?,
            })
        }),
        RouteSpec::submodel("DeleteFileByPath", Method::DELETE, "submodel-elements/{path}/attachment", |ctx| {
            Ok(DomainRequest::DeleteFileByPath {
                scope: ctx.scope()?,
                path: ctx.element_path()?,
            })
        }),
        RouteSpec::submodel("InvokeOperationSync", Method::POST, "submodel-elements/{path}/invoke", invoke_sync)
            .output_modifier(Modifiers::OPERATION)
            .when(|r| !is_async(r)),
        RouteSpec::submodel("InvokeOperationAsync", Method::POST, "submodel-elements/{path}/invoke", invoke_async)
            .output_modifier(Modifiers::OPERATION)
            .when(is_async),
        RouteSpec::submodel(
            "InvokeOperationAsyncExplicit",
            Method::POST,
            "submodel-elements/{path}/invoke-async",
            invoke_async,
        )
        .output_modifier(Modifiers::OPERATION),
        RouteSpec::submodel(
            "GetOperationAsyncStatus",
            Method::GET,
            "submodel-elements/{path}/operation-status/{handleId}",
            |ctx| {
                Ok(DomainRequest::GetOperationAsyncStatus {
                    scope: ctx.scope()?,
                    path: ctx.element_path()?,
                    handle_id: ctx.param(HANDLE_ID)?,
                })
            },
        ),
        RouteSpec::submodel(
            "GetOperationAsyncResult",
            Method::GET,
            "submodel-elements/{path}/operation-results/{handleId}",
            |ctx| {
                Ok(DomainRequest::GetOperationAsyncResult {
                    scope: ctx.scope()?,
                    path: ctx.element_path()?,
                    handle_id: ctx.param(HANDLE_ID)?,
                    output_modifier: ctx.output_modifier(),
                })
            },
        )
        .output_modifier(Modifiers::OPERATION),
        // -- Concept descriptions ---------------------------------------------
        RouteSpec::repository("GetAllConceptDescriptions", Method::GET, "concept-descriptions", |ctx| {
            Ok(DomainRequest::GetAllConceptDescriptions { paging: ctx.paging() })
        })
        .paging(PagingInfo::ALL)
        .when(|r| !r.has_query(IS_CASE_OF) && !r.has_query(DATA_SPECIFICATION_REF) && !r.has_query(ID_SHORT)),
        RouteSpec::repository(
            "GetAllConceptDescriptionsByIsCaseOf",
            Method::GET,
            "concept-descriptions",
            |ctx| {
                Ok(DomainRequest::GetAllConceptDescriptionsByIsCaseOf {
                    is_case_of: required_json_query(ctx, IS_CASE_OF)?,
                    paging: ctx.paging(),
                })
            },
        )
        .paging(PagingInfo::ALL)
        .when(|r| r.has_query(IS_CASE_OF)),
        RouteSpec::repository(
            "GetAllConceptDescriptionsByDataSpecificationReference",
            Method::GET,
            "concept-descriptions",
            |ctx| {
                Ok(DomainRequest::GetAllConceptDescriptionsByDataSpecificationReference {
                    data_specification_ref: required_json_query(ctx, DATA_SPECIFICATION_REF)?,
                    paging: ctx.paging(),
                })
            },
        )
        .paging(PagingInfo::ALL)
        .when(|r| r.has_query(DATA_SPECIFICATION_REF) && !r.has_query(IS_CASE_OF)),
        RouteSpec::repository(
            "GetAllConceptDescriptionsByIdShort",
            Method::GET,
            "concept-descriptions",
            |ctx| {
                Ok(DomainRequest::GetAllConceptDescriptionsByIdShort {
                    id_short: required_query(ctx, ID_SHORT)?,
                    paging: ctx.paging(),
                })
            },
        )
        .paging(PagingInfo::ALL)
        .when(|r| r.has_query(ID_SHORT) && !r.has_query(IS_CASE_OF) && !r.has_query(DATA_SPECIFICATION_REF)),
        RouteSpec::repository("PostConceptDescription", Method::POST, "concept-descriptions", |ctx| {
            Ok(DomainRequest::PostConceptDescription {
                concept_description: decode_object::<ConceptDescription>(ctx.body(), "ConceptDescription")?,
            })
        }),
        RouteSpec::repository("GetConceptDescription", Method::GET, "concept-descriptions/{cdId}", |ctx| {
            Ok(DomainRequest::GetConceptDescription {
                cd_id: ctx.identifier(CD_ID)?,
            })
        }),
        RouteSpec::repository("PutConceptDescription", Method::PUT, "concept-descriptions/{cdId}", |ctx| {
            Ok(DomainRequest::PutConceptDescription {
                cd_id: ctx.identifier(CD_ID)?,
                concept_description: decode_object(ctx.body(), "ConceptDescription")?,
            })
        }),
        RouteSpec::repository("DeleteConceptDescription", Method::DELETE, "concept-descriptions/{cdId}", |ctx| {
            Ok(DomainRequest::DeleteConceptDescription {
                cd_id: ctx.identifier(CD_ID)?,
            })
        }),
        // -- Discovery --------------------------------------------------------
        RouteSpec::repository("GetAllShellIdsByAssetLink", Method::GET, "lookup/shells", |ctx| {
            Ok(DomainRequest::GetAllShellIdsByAssetLink {
                asset_ids: decode_json_query_list::<SpecificAssetId>(ctx.query(), ASSET_IDS)?,
                paging: ctx.paging(),
            })
        })
        .paging(PagingInfo::ALL),
        RouteSpec::repository("GetAllAssetLinks", Method::GET, "lookup/shells/{aasId}", |ctx| {
            Ok(DomainRequest::GetAllAssetLinks {
                aas_id: ctx.identifier(AAS_ID)?,
            })
        }),
        RouteSpec::repository("PostAllAssetLinks", Method::POST, "lookup/shells/{aasId}", |ctx| {
            Ok(DomainRequest::PostAllAssetLinks {
                aas_id: ctx.identifier(AAS_ID)?,
                asset_links: decode_list::<SpecificAssetId>(ctx.body(), "SpecificAssetId")?,
            })
        }),
        RouteSpec::repository("DeleteAllAssetLinks", Method::DELETE, "lookup/shells/{aasId}", |ctx| {
            Ok(DomainRequest::DeleteAllAssetLinks {
                aas_id: ctx.identifier(AAS_ID)?,
            })
        }),
        // -- Serialization and packages ---------------------------------------
        RouteSpec::repository("GenerateSerializationByIds", Method::GET, "serialization", generate_serialization),
        RouteSpec::repository("UploadPackage", Method::POST, "packages", |ctx| {
            Err(MappingError::NotImplemented {
                operation: ctx.route_name().to_owned(),
            })
        }),
    ]
}

fn get_all_shells(ctx: &ParseContext<'_>) -> ParseResult {
    Ok(DomainRequest::GetAllShells {
        output_modifier: ctx.output_modifier(),
        paging: ctx.paging(),
    })
}

fn get_all_shells_by_asset_id(ctx: &ParseContext<'_>) -> ParseResult {
    Ok(DomainRequest::GetAllShellsByAssetId {
        asset_ids: decode_json_query_list::<SpecificAssetId>(ctx.query(), ASSET_IDS)?,
        output_modifier: ctx.output_modifier(),
        paging: ctx.paging(),
    })
}

fn get_all_shells_by_id_short(ctx: &ParseContext<'_>) -> ParseResult {
    Ok(DomainRequest::GetAllShellsByIdShort {
        id_short: required_query(ctx, ID_SHORT)?,
        output_modifier: ctx.output_modifier(),
        paging: ctx.paging(),
    })
}

fn get_all_submodels_by_semantic_id(ctx: &ParseContext<'_>) -> ParseResult {
    Ok(DomainRequest::GetAllSubmodelsBySemanticId {
        semantic_id: required_json_query(ctx, SEMANTIC_ID)?,
        output_modifier: ctx.output_modifier(),
        paging: ctx.paging(),
    })
}

fn invoke_sync(ctx: &ParseContext<'_>) -> ParseResult {
    Ok(DomainRequest::InvokeOperationSync {
        scope: ctx.scope()?,
        path: ctx.element_path()?,
        content: ctx.content(),
        request: decode_operation_request(ctx.body(), ctx.content())?,
    })
}

fn invoke_async(ctx: &ParseContext<'_>) -> ParseResult {
    Ok(DomainRequest::InvokeOperationAsync {
        scope: ctx.scope()?,
        path: ctx.element_path()?,
        content: ctx.content(),
        request: decode_operation_request(ctx.body(), ctx.content())?,
    })
}

fn generate_serialization(ctx: &ParseContext<'_>) -> ParseResult {
    let include_concept_descriptions = match ctx.request().query_value(INCLUDE_CONCEPT_DESCRIPTIONS) {
        None | Some("") => true,
        Some(raw) => parse_bool_query(INCLUDE_CONCEPT_DESCRIPTIONS, raw)?,
    };
    let format = ctx
        .request()
        .header_str(ACCEPT)
        .and_then(|accept| accept.split(',').next())
        .map(|media| media.split(';').next().unwrap_or(media).trim())
        .filter(|media| !media.is_empty() && *media != "*/*")
        .unwrap_or(DEFAULT_SERIALIZATION_FORMAT)
        .to_owned();

    Ok(DomainRequest::GenerateSerializationByIds {
        aas_ids: decode_query_identifiers(ctx.query(), AAS_IDS)?,
        submodel_ids: decode_query_identifiers(ctx.query(), SUBMODEL_IDS)?,
        include_concept_descriptions,
        format,
    })
}

/// `async=true`, case-insensitive.
fn is_async(request: &HttpRequest) -> bool {
    request
        .query_value(ASYNC)
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// `content=value`, case-insensitive.
fn is_content_value(request: &HttpRequest) -> bool {
    request
        .query_value("content")
        .is_some_and(|v| v.eq_ignore_ascii_case(Content::Value.as_str()))
}

fn required_query(ctx: &ParseContext<'_>, name: &str) -> Result<String, MappingError> {
    ctx.request()
        .query_value(name)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| MappingError::InvalidQueryParameter {
            name: name.to_owned(),
            value: String::new(),
            reason: "value must not be empty".to_owned(),
        })
}

fn required_json_query(ctx: &ParseContext<'_>, name: &str) -> Result<Reference, MappingError> {
    decode_json_query::<Reference>(ctx.query(), name)?.ok_or_else(|| {
        MappingError::InvalidQueryParameter {
            name: name.to_owned(),
            value: String::new(),
            reason: "parameter is required".to_owned(),
        }
    })
}

fn parse_bool_query(name: &str, raw: &str) -> Result<bool, MappingError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(MappingError::InvalidQueryParameter {
            name: name.to_owned(),
            value: raw.to_owned(),
            reason: "expected true or false".to_owned(),
        }),
    }
}
