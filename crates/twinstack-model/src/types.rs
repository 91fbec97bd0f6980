//! Domain value types carried by [`DomainRequest`](crate::DomainRequest).
//!
//! Only the fields the mapping layer validates are typed; every other member
//! of a JSON object is kept verbatim in `extra` so the execution engine sees
//! the complete payload.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Type of a [`Key`] within a reference or element path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum KeyType {
    AnnotatedRelationshipElement,
    AssetAdministrationShell,
    BasicEventElement,
    Blob,
    Capability,
    ConceptDescription,
    DataElement,
    Entity,
    EventElement,
    File,
    FragmentReference,
    GlobalReference,
    Identifiable,
    MultiLanguageProperty,
    Operation,
    Property,
    Range,
    Referable,
    ReferenceElement,
    RelationshipElement,
    Submodel,
    SubmodelElement,
    SubmodelElementCollection,
    SubmodelElementList,
}

/// One step of a reference or element path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// Type hint.
    #[serde(rename = "type")]
    pub key_type: KeyType,
    /// Identifier or idShort.
    pub value: String,
}

impl Key {
    /// Create a key.
    #[must_use]
    pub fn new(key_type: KeyType, value: impl Into<String>) -> Self {
        Self {
            key_type,
            value: value.into(),
        }
    }
}

/// Ordered idShort path from a submodel down to one of its elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ElementPath(Vec<Key>);

impl ElementPath {
    /// Separator between idShort segments.
    pub const SEPARATOR: char = '.';

    /// Create a path from keys.
    #[must_use]
    pub fn new(keys: Vec<Key>) -> Self {
        Self(keys)
    }

    /// Keys in order, outermost first.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The idShort segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|k| k.value.as_str())
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", Self::SEPARATOR)?;
            }
            f.write_str(&key.value)?;
        }
        Ok(())
    }
}

impl Serialize for ElementPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.segments())
    }
}

/// Kind of a [`Reference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceType {
    /// Points outside the model.
    ExternalReference,
    /// Points to a model element.
    ModelReference,
}

/// Reference to a model element or an external concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Reference kind.
    #[serde(rename = "type")]
    pub reference_type: ReferenceType,
    /// Keys, outermost first; never empty.
    pub keys: Vec<Key>,
    /// Remaining JSON members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Asset identifier qualified by a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificAssetId {
    /// Identifier name, e.g. `serialNumber`.
    pub name: String,
    /// Identifier value.
    pub value: String,
    /// Remaining JSON members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Asset information of a shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInformation {
    /// `Type`, `Instance` or `NotApplicable`.
    pub asset_kind: String,
    /// Global asset id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,
    /// Specific asset ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_asset_ids: Vec<SpecificAssetId>,
    /// Remaining JSON members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Asset administration shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAdministrationShell {
    /// Global identifier.
    pub id: String,
    /// Short name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,
    /// Asset information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_information: Option<AssetInformation>,
    /// References to the shell's submodels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodels: Vec<Reference>,
    /// Remaining JSON members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Submodel element of any concrete type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelElement {
    /// Concrete element type, e.g. `Property`.
    pub model_type: String,
    /// Short name; required except inside lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,
    /// Remaining JSON members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Submodel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submodel {
    /// Global identifier.
    pub id: String,
    /// Short name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,
    /// Semantic id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    /// Top-level elements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodel_elements: Vec<SubmodelElement>,
    /// Remaining JSON members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Concept description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDescription {
    /// Global identifier.
    pub id: String,
    /// Short name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,
    /// Remaining JSON members.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// JSON merge patch document (RFC 7386) targeting one resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MergePatch(pub Map<String, Value>);

/// File uploaded as `multipart/form-data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InMemoryFile {
    /// Client-supplied file name.
    pub file_name: String,
    /// Declared media type of the file part.
    pub content_type: String,
    /// File bytes; serialized as their length.
    #[serde(rename = "size", serialize_with = "serialize_len")]
    pub content: Bytes,
}

fn serialize_len<S: Serializer>(content: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(content.len() as u64)
}

/// Argument or result variable of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationVariable {
    /// The variable, as a submodel element.
    pub value: SubmodelElement,
}

/// Operation arguments in full or value-only form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationArguments {
    /// Full submodel elements (content `normal`).
    Full(Vec<OperationVariable>),
    /// idShort to raw value (content `value`).
    Value(Map<String, Value>),
}

impl Default for OperationArguments {
    fn default() -> Self {
        Self::Full(Vec::new())
    }
}

/// Payload of an operation invocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    /// Input arguments.
    pub input_arguments: OperationArguments,
    /// In/out arguments.
    pub inoutput_arguments: OperationArguments,
    /// Client-side timeout, parsed from an ISO-8601 duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_timeout: Option<Duration>,
}
