//! Protocol-agnostic domain requests.
//!
//! A [`DomainRequest`] is the single typed call descriptor produced for every
//! HTTP request that maps successfully. Identifiers are already decoded and
//! payloads already validated; the execution engine never sees raw HTTP.

use serde::Serialize;
use serde_json::Value;

use crate::modifier::{Content, OutputModifier, PagingInfo};
use crate::types::{
    AssetAdministrationShell, AssetInformation, ConceptDescription, ElementPath, InMemoryFile,
    MergePatch, OperationRequest, Reference, SpecificAssetId, Submodel, SubmodelElement,
};

/// Addressing of a submodel, standalone or through a shell.
///
/// The standalone and contextualized forms of the same path produce equal
/// scopes except for `aas_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelScope {
    /// Decoded shell id when addressed through `shells/{aasId}/aas/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aas_id: Option<String>,
    /// Decoded submodel id.
    pub submodel_id: String,
}

impl SubmodelScope {
    /// Scope of a standalone submodel.
    #[must_use]
    pub fn standalone(submodel_id: impl Into<String>) -> Self {
        Self {
            aas_id: None,
            submodel_id: submodel_id.into(),
        }
    }

    /// Scope of a submodel addressed through a shell.
    #[must_use]
    pub fn contextualized(aas_id: impl Into<String>, submodel_id: impl Into<String>) -> Self {
        Self {
            aas_id: Some(aas_id.into()),
            submodel_id: submodel_id.into(),
        }
    }
}

/// One case per operation the HTTP surface recognizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all_fields = "camelCase")]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum DomainRequest {
    // -- Service description ------------------------------------------------
    GetSelfDescription,

    // -- Shell repository ---------------------------------------------------
    GetAllShells {
        output_modifier: OutputModifier,
        paging: PagingInfo,
    },
    GetAllShellsByAssetId {
        asset_ids: Vec<SpecificAssetId>,
        output_modifier: OutputModifier,
        paging: PagingInfo,
    },
    GetAllShellsByIdShort {
        id_short: String,
        output_modifier: OutputModifier,
        paging: PagingInfo,
    },
    PostShell {
        shell: AssetAdministrationShell,
    },
    GetShell {
        aas_id: String,
        output_modifier: OutputModifier,
    },
    PutShell {
        aas_id: String,
        shell: AssetAdministrationShell,
    },
    DeleteShell {
        aas_id: String,
    },
    GetAssetInformation {
        aas_id: String,
    },
    PutAssetInformation {
        aas_id: String,
        asset_information: AssetInformation,
    },
    GetThumbnail {
        aas_id: String,
    },
    PutThumbnail {
        aas_id: String,
        file: InMemoryFile,
    },
    DeleteThumbnail {
        aas_id: String,
    },
    GetAllSubmodelReferences {
        aas_id: String,
        paging: PagingInfo,
    },
    PostSubmodelReference {
        aas_id: String,
        reference: Reference,
    },
    DeleteSubmodelReference {
        aas_id: String,
        submodel_id: String,
    },

    // -- Submodel repository ------------------------------------------------
    GetAllSubmodels {
        output_modifier: OutputModifier,
        paging: PagingInfo,
    },
    GetAllSubmodelsBySemanticId {
        semantic_id: Reference,
        output_modifier: OutputModifier,
        paging: PagingInfo,
    },
    GetAllSubmodelsByIdShort {
        id_short: String,
        output_modifier: OutputModifier,
        paging: PagingInfo,
    },
    PostSubmodel {
        submodel: Submodel,
    },
    DeleteSubmodel {
        submodel_id: String,
    },

    // -- Submodel interface -------------------------------------------------
    GetSubmodel {
        scope: SubmodelScope,
        output_modifier: OutputModifier,
    },
    GetSubmodelReference {
        scope: SubmodelScope,
    },
    PutSubmodel {
        scope: SubmodelScope,
        submodel: Submodel,
    },
    PatchSubmodel {
        scope: SubmodelScope,
        patch: MergePatch,
    },
    PatchSubmodelValue {
        scope: SubmodelScope,
        value: Value,
    },
    GetAllSubmodelElements {
        scope: SubmodelScope,
        output_modifier: OutputModifier,
        paging: PagingInfo,
    },
    PostSubmodelElement {
        scope: SubmodelScope,
        element: SubmodelElement,
    },
    GetSubmodelElementByPath {
        scope: SubmodelScope,
        path: ElementPath,
        output_modifier: OutputModifier,
    },
    GetSubmodelElementValueByPath {
        scope: SubmodelScope,
        path: ElementPath,
        output_modifier: OutputModifier,
    },
    GetSubmodelElementReferenceByPath {
        scope: SubmodelScope,
        path: ElementPath,
    },
    PostSubmodelElementByPath {
        scope: SubmodelScope,
        path: ElementPath,
        element: SubmodelElement,
    },
    PutSubmodelElementByPath {
        scope: SubmodelScope,
        path: ElementPath,
        element: SubmodelElement,
    },
    SetSubmodelElementValueByPath {
        scope: SubmodelScope,
        path: ElementPath,
        value: Value,
    },
    PatchSubmodelElementByPath {
        scope: SubmodelScope,
        path: ElementPath,
        patch: MergePatch,
    },
    PatchSubmodelElementValueByPath {
        scope: SubmodelScope,
        path: ElementPath,
        value: Value,
    },
    DeleteSubmodelElementByPath {
        scope: SubmodelScope,
        path: ElementPath,
    },
    GetFileByPath {
        scope: SubmodelScope,
        path: ElementPath,
    },
    PutFileByPath {
        scope: SubmodelScope,
        path: ElementPath,
        file: InMemoryFile,
    },
    DeleteFileByPath {
        scope: SubmodelScope,
        path: ElementPath,
    },
    InvokeOperationSync {
        scope: SubmodelScope,
        path: ElementPath,
        content: Content,
        request: OperationRequest,
    },
    InvokeOperationAsync {
        scope: SubmodelScope,
        path: ElementPath,
        content: Content,
        request: OperationRequest,
    },
    GetOperationAsyncStatus {
        scope: SubmodelScope,
        path: ElementPath,
        handle_id: String,
    },
    GetOperationAsyncResult {
        scope: SubmodelScope,
        path: ElementPath,
        handle_id: String,
        output_modifier: OutputModifier,
    },

    // -- Concept descriptions -----------------------------------------------
    GetAllConceptDescriptions {
        paging: PagingInfo,
    },
    GetAllConceptDescriptionsByIdShort {
        id_short: String,
        paging: PagingInfo,
    },
    GetAllConceptDescriptionsByIsCaseOf {
        is_case_of: Reference,
        paging: PagingInfo,
    },
    GetAllConceptDescriptionsByDataSpecificationReference {
        data_specification_ref: Reference,
        paging: PagingInfo,
    },
    PostConceptDescription {
        concept_description: ConceptDescription,
    },
    GetConceptDescription {
        cd_id: String,
    },
    PutConceptDescription {
        cd_id: String,
        concept_description: ConceptDescription,
    },
    DeleteConceptDescription {
        cd_id: String,
    },

    // -- Discovery ----------------------------------------------------------
    GetAllShellIdsByAssetLink {
        asset_ids: Vec<SpecificAssetId>,
        paging: PagingInfo,
    },
    GetAllAssetLinks {
        aas_id: String,
    },
    PostAllAssetLinks {
        aas_id: String,
        asset_links: Vec<SpecificAssetId>,
    },
    DeleteAllAssetLinks {
        aas_id: String,
    },

    // -- Serialization ------------------------------------------------------
    GenerateSerializationByIds {
        aas_ids: Vec<String>,
        submodel_ids: Vec<String>,
        include_concept_descriptions: bool,
        format: String,
    },
}

impl DomainRequest {
    /// Returns the operation name, as used in logs and error messages.
    #[must_use]
    pub fn operation_name(&self) -> &'static str {
        match self {
            Self::GetSelfDescription => "GetSelfDescription",
            Self::GetAllShells { .. } => "GetAllShells",
            Self::GetAllShellsByAssetId { .. } => "GetAllShellsByAssetId",
            Self::GetAllShellsByIdShort { .. } => "GetAllShellsByIdShort",
            Self::PostShell { .. } => "PostShell",
            Self::GetShell { .. } => "GetShell",
            Self::PutShell { .. } => "PutShell",
            Self::DeleteShell { .. } => "DeleteShell",
            Self::GetAssetInformation { .. } => "GetAssetInformation",
            Self::PutAssetInformation { .. } => "PutAssetInformation",
            Self::GetThumbnail { .. } => "GetThumbnail",
            Self::PutThumbnail { .. } => "PutThumbnail",
            Self::DeleteThumbnail { .. } => "DeleteThumbnail",
            Self::GetAllSubmodelReferences { .. } => "GetAllSubmodelReferences",
            Self::PostSubmodelReference { .. } => "PostSubmodelReference",
            Self::DeleteSubmodelReference { .. } => "DeleteSubmodelReference",
            Self::GetAllSubmodels { .. } => "GetAllSubmodels",
            Self::GetAllSubmodelsBySemanticId { .. } => "GetAllSubmodelsBySemanticId",
            Self::GetAllSubmodelsByIdShort { .. } => "GetAllSubmodelsByIdShort",
            Self::PostSubmodel { .. } => "PostSubmodel",
            Self::DeleteSubmodel { .. } => "DeleteSubmodel",
            Self::GetSubmodel { .. } => "GetSubmodel",
            Self::GetSubmodelReference { .. } => "GetSubmodelReference",
            Self::PutSubmodel { .. } => "PutSubmodel",
            Self::PatchSubmodel { .. } => "PatchSubmodel",
            Self::PatchSubmodelValue { .. } => "PatchSubmodelValue",
            Self::GetAllSubmodelElements { .. } => "GetAllSubmodelElements",
            Self::PostSubmodelElement { .. } => "PostSubmodelElement",
            Self::GetSubmodelElementByPath { .. } => "GetSubmodelElementByPath",
            Self::GetSubmodelElementValueByPath { .. } => "GetSubmodelElementValueByPath",
            Self::GetSubmodelElementReferenceByPath { .. } => "GetSubmodelElementReferenceByPath",
            Self::PostSubmodelElementByPath { .. } => "PostSubmodelElementByPath",
            Self::PutSubmodelElementByPath { .. } => "PutSubmodelElementByPath",
            Self::SetSubmodelElementValueByPath { .. } => "SetSubmodelElementValueByPath",
            Self::PatchSubmodelElementByPath { .. } => "PatchSubmodelElementByPath",
            Self::PatchSubmodelElementValueByPath { .. } => "PatchSubmodelElementValueByPath",
            Self::DeleteSubmodelElementByPath { .. } => "DeleteSubmodelElementByPath",
            Self::GetFileByPath { .. } => "GetFileByPath",
            Self::PutFileByPath { .. } => "PutFileByPath",
            Self::DeleteFileByPath { .. } => "DeleteFileByPath",
            Self::InvokeOperationSync { .. } => "InvokeOperationSync",
            Self::InvokeOperationAsync { .. } => "InvokeOperationAsync",
            Self::GetOperationAsyncStatus { .. } => "GetOperationAsyncStatus",
            Self::GetOperationAsyncResult { .. } => "GetOperationAsyncResult",
            Self::GetAllConceptDescriptions { .. } => "GetAllConceptDescriptions",
            Self::GetAllConceptDescriptionsByIdShort { .. } => {
                "GetAllConceptDescriptionsByIdShort"
            }
            Self::GetAllConceptDescriptionsByIsCaseOf { .. } => {
                "GetAllConceptDescriptionsByIsCaseOf"
            }
            Self::GetAllConceptDescriptionsByDataSpecificationReference { .. } => {
                "GetAllConceptDescriptionsByDataSpecificationReference"
            }
            Self::PostConceptDescription { .. } => "PostConceptDescription",
            Self::GetConceptDescription { .. } => "GetConceptDescription",
            Self::PutConceptDescription { .. } => "PutConceptDescription",
            Self::DeleteConceptDescription { .. } => "DeleteConceptDescription",
            Self::GetAllShellIdsByAssetLink { .. } => "GetAllShellIdsByAssetLink",
            Self::GetAllAssetLinks { .. } => "GetAllAssetLinks",
            Self::PostAllAssetLinks { .. } => "PostAllAssetLinks",
            Self::DeleteAllAssetLinks { .. } => "DeleteAllAssetLinks",
            Self::GenerateSerializationByIds { .. } => "GenerateSerializationByIds",
        }
    }

    /// The submodel scope, for requests addressed to a submodel.
    #[must_use]
    pub fn scope(&self) -> Option<&SubmodelScope> {
        match self {
            Self::GetSubmodel { scope, .. }
            | Self::GetSubmodelReference { scope }
            | Self::PutSubmodel { scope, .. }
            | Self::PatchSubmodel { scope, .. }
            | Self::PatchSubmodelValue { scope, .. }
            | Self::GetAllSubmodelElements { scope, .. }
            | Self::PostSubmodelElement { scope, .. }
            | Self::GetSubmodelElementByPath { scope, .. }
            | Self::GetSubmodelElementValueByPath { scope, .. }
            | Self::GetSubmodelElementReferenceByPath { scope, .. }
            | Self::PostSubmodelElementByPath { scope, .. }
            | Self::PutSubmodelElementByPath { scope, .. }
            | Self::SetSubmodelElementValueByPath { scope, .. }
            | Self::PatchSubmodelElementByPath { scope, .. }
            | Self::PatchSubmodelElementValueByPath { scope, .. }
            | Self::DeleteSubmodelElementByPath { scope, .. }
            | Self::GetFileByPath { scope, .. }
            | Self::PutFileByPath { scope, .. }
            | Self::DeleteFileByPath { scope, .. }
            | Self::InvokeOperationSync { scope, .. }
            | Self::InvokeOperationAsync { scope, .. }
            | Self::GetOperationAsyncStatus { scope, .. }
            | Self::GetOperationAsyncResult { scope, .. } => Some(scope),
            _ => None,
        }
    }

    /// The output modifier, for requests that carry one.
    #[must_use]
    pub fn output_modifier(&self) -> Option<&OutputModifier> {
        match self {
            Self::GetAllShells {
                output_modifier, ..
            }
            | Self::GetAllShellsByAssetId {
                output_modifier, ..
            }
            | Self::GetAllShellsByIdShort {
                output_modifier, ..
            }
            | Self::GetShell {
                output_modifier, ..
            }
            | Self::GetAllSubmodels {
                output_modifier, ..
            }
            | Self::GetAllSubmodelsBySemanticId {
                output_modifier, ..
            }
            | Self::GetAllSubmodelsByIdShort {
                output_modifier, ..
            }
            | Self::GetSubmodel {
                output_modifier, ..
            }
            | Self::GetAllSubmodelElements {
                output_modifier, ..
            }
            | Self::GetSubmodelElementByPath {
                output_modifier, ..
            }
            | Self::GetSubmodelElementValueByPath {
                output_modifier, ..
            }
            | Self::GetOperationAsyncResult {
                output_modifier, ..
            } => Some(output_modifier),
            _ => None,
        }
    }

    /// The element path, for requests addressed to a submodel element.
    #[must_use]
    pub fn element_path(&self) -> Option<&ElementPath> {
        match self {
            Self::GetSubmodelElementByPath { path, .. }
            | Self::GetSubmodelElementValueByPath { path, .. }
            | Self::GetSubmodelElementReferenceByPath { path, .. }
            | Self::PostSubmodelElementByPath { path, .. }
            | Self::PutSubmodelElementByPath { path, .. }
            | Self::SetSubmodelElementValueByPath { path, .. }
            | Self::PatchSubmodelElementByPath { path, .. }
            | Self::PatchSubmodelElementValueByPath { path, .. }
            | Self::DeleteSubmodelElementByPath { path, .. }
            | Self::GetFileByPath { path, .. }
            | Self::PutFileByPath { path, .. }
            | Self::DeleteFileByPath { path, .. }
            | Self::InvokeOperationSync { path, .. }
            | Self::InvokeOperationAsync { path, .. }
            | Self::GetOperationAsyncStatus { path, .. }
            | Self::GetOperationAsyncResult { path, .. } => Some(path),
            _ => None,
        }
    }
}
