//! Output shaping and paging descriptors.
//!
//! An [`OutputModifier`] selects the representation returned for a resource
//! (`content`), how deep nested elements are expanded (`level`), and whether
//! blob payloads are inlined (`extent`). Which values a route accepts is
//! declared with [`OutputModifierConstraints`].

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Representation selected by the `$modifier` path suffix or `content` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Content {
    /// The full object (`normal`).
    #[default]
    #[serde(rename = "normal")]
    Default,
    /// Raw value only.
    Value,
    /// Object without values.
    Metadata,
    /// A reference to the object.
    Reference,
    /// The idShort paths of the object and its children.
    Path,
}

impl Content {
    /// All content modifiers, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::Value,
        Self::Metadata,
        Self::Reference,
        Self::Path,
    ];

    /// Returns the wire token of this modifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "normal",
            Self::Value => "value",
            Self::Metadata => "metadata",
            Self::Reference => "reference",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Content {
    type Err = UnknownModifierValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownModifierValue(s.to_owned()))
    }
}

/// Depth of nested element expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    /// Direct children only.
    Core,
    /// Full recursive expansion.
    #[default]
    Deep,
}

impl Level {
    /// Returns the wire token of this level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Deep => "deep",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = UnknownModifierValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("core") {
            Ok(Self::Core)
        } else if s.eq_ignore_ascii_case("deep") {
            Ok(Self::Deep)
        } else {
            Err(UnknownModifierValue(s.to_owned()))
        }
    }
}

/// Whether blob payloads are inlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Extent {
    /// Blob values omitted (`withoutBlobValue`).
    #[default]
    #[serde(rename = "withoutBlobValue")]
    Default,
    /// Blob values inlined.
    WithBlobValue,
}

impl Extent {
    /// Returns the wire token of this extent.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "withoutBlobValue",
            Self::WithBlobValue => "withBlobValue",
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Extent {
    type Err = UnknownModifierValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("withoutBlobValue") {
            Ok(Self::Default)
        } else if s.eq_ignore_ascii_case("withBlobValue") {
            Ok(Self::WithBlobValue)
        } else {
            Err(UnknownModifierValue(s.to_owned()))
        }
    }
}

/// A modifier token that names no known value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown modifier value '{0}'")]
pub struct UnknownModifierValue(pub String);

/// Combined output shaping for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputModifier {
    /// Selected representation.
    pub content: Content,
    /// Expansion depth.
    pub level: Level,
    /// Blob handling.
    pub extent: Extent,
}

impl OutputModifier {
    /// The default modifier: full object, deep, without blob values.
    pub const DEFAULT: Self = Self {
        content: Content::Default,
        level: Level::Deep,
        extent: Extent::Default,
    };
}

/// Per-route allow-list of output modifier values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputModifierConstraints {
    /// Content modifiers accepted by the route.
    pub contents: &'static [Content],
    /// Whether `level` may be set explicitly.
    pub supports_level: bool,
    /// Whether `extent` may be set explicitly.
    pub supports_extent: bool,
}

impl OutputModifierConstraints {
    /// No output shaping at all.
    pub const NONE: Self = Self {
        contents: &[Content::Default],
        supports_level: false,
        supports_extent: false,
    };

    /// Shells and shell listings.
    pub const SHELL: Self = Self {
        contents: &[Content::Default, Content::Reference],
        supports_level: false,
        supports_extent: false,
    };

    /// A single submodel. References are served by the dedicated `$reference` route.
    pub const SUBMODEL: Self = Self {
        contents: &[
            Content::Default,
            Content::Value,
            Content::Metadata,
            Content::Path,
        ],
        supports_level: true,
        supports_extent: true,
    };

    /// Submodel listings, which have no dedicated reference route.
    pub const SUBMODEL_LIST: Self = Self {
        contents: &[
            Content::Default,
            Content::Value,
            Content::Metadata,
            Content::Reference,
            Content::Path,
        ],
        supports_level: true,
        supports_extent: true,
    };

    /// Single submodel elements.
    pub const SUBMODEL_ELEMENT: Self = Self::SUBMODEL;

    /// Lists of submodel elements.
    pub const SUBMODEL_ELEMENT_LIST: Self = Self::SUBMODEL_LIST;

    /// Dedicated `$reference` routes.
    pub const REFERENCE: Self = Self {
        contents: &[Content::Reference],
        supports_level: false,
        supports_extent: false,
    };

    /// Dedicated `$value` routes.
    pub const VALUE: Self = Self {
        contents: &[Content::Value],
        supports_level: true,
        supports_extent: true,
    };

    /// Operation invocation and results.
    pub const OPERATION: Self = Self {
        contents: &[Content::Default, Content::Value],
        supports_level: false,
        supports_extent: false,
    };

    /// Whether the content modifier is in the allow-list.
    #[must_use]
    pub fn allows_content(&self, content: Content) -> bool {
        self.contents.contains(&content)
    }
}

/// Cursor/limit paging descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingInfo {
    /// Opaque continuation token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Maximum number of results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<NonZeroU32>,
}

impl PagingInfo {
    /// No cursor and no limit.
    pub const ALL: Self = Self {
        cursor: None,
        limit: None,
    };

    /// Paging with only a limit.
    #[must_use]
    pub fn with_limit(limit: NonZeroU32) -> Self {
        Self {
            cursor: None,
            limit: Some(limit),
        }
    }
}
