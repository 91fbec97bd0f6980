//! Path pattern composition.
//!
//! Every route is written as a short base template (`submodel-elements/{path}/$value`)
//! and composed with reusable fragments in a fixed order:
//!
//! ```text
//! [shells/{aasId}/aas/] + [submodels/{submodelId}/] + base template + [/$<modifier>]
//! ```
//!
//! The result is a [`RoutePattern`]: an anchored regex with one named capture
//! per `{param}`. Parameter captures never contain `/` or `$`, so adjacent
//! fragments can never both claim a separator or a modifier token.
//!
//! The optional content-modifier suffix captures any `$token`. Tokens listed
//! as excluded make the pattern fail to match (so a dedicated `$value` route
//! and its generic sibling never overlap); every other token, known or not,
//! is handed to the modifier assembler so unknown tokens are rejected with a
//! precise error instead of a 404.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use twinstack_model::error::RouteConfigError;
use twinstack_model::modifier::Content;

/// Path parameter holding the shell id.
pub const AAS_ID: &str = "aasId";
/// Path parameter holding the submodel id.
pub const SUBMODEL_ID: &str = "submodelId";
/// Fragment prepended to contextualized submodel routes.
pub const AAS_CONTEXT_PREFIX: &str = "shells/{aasId}/aas";

/// Capture group of the optional content-modifier suffix.
const CONTENT_MODIFIER_GROUP: &str = "contentModifier";

/// Value substituted for parameters when generating sample paths.
const SAMPLE_VALUE: &str = "x";

/// Matches a path that already ends in a content-modifier token.
static HAS_CONTENT_MODIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|/)\$\w*$").expect("static regex is valid"));

/// Matches the contextualized prefix of a concrete path.
static AAS_CONTEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^shells/[^/$]+/aas(?:/|$)").expect("static regex is valid"));

/// Whether a concrete path is addressed through a shell (`shells/<id>/aas/...`).
#[must_use]
pub fn is_contextualized(path: &str) -> bool {
    AAS_CONTEXT.is_match(path)
}

/// API generation, selecting the submodel prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiGeneration {
    /// `submodels/{submodelId}/submodel/...`
    V1,
    /// `submodels/{submodelId}/...`
    #[default]
    V3,
}

impl ApiGeneration {
    /// The submodel prefix fragment for this generation.
    #[must_use]
    pub fn submodel_prefix(&self) -> &'static str {
        match self {
            Self::V1 => "submodels/{submodelId}/submodel",
            Self::V3 => "submodels/{submodelId}",
        }
    }
}

impl std::str::FromStr for ApiGeneration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v3" | "3" => Ok(Self::V3),
            other => Err(format!("unknown API generation '{other}'")),
        }
    }
}

/// One `/`-separated segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Modifier(Content),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    fn parse(template: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        if template.is_empty() {
            return Ok(Self { segments });
        }
        for raw in template.split('/') {
            if raw.is_empty() {
                return Err("empty segment".to_owned());
            }
            if let Some(name) = raw.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
                if !is_valid_param_name(name) {
                    return Err(format!("invalid parameter name '{name}'"));
                }
                segments.push(Segment::Param(name.to_owned()));
            } else if let Some(token) = raw.strip_prefix('$') {
                let content = token
                    .parse::<Content>()
                    .map_err(|_| format!("unknown content modifier '${token}'"))?;
                segments.push(Segment::Modifier(content));
            } else if raw.contains(['{', '}', '$']) {
                return Err(format!("malformed segment '{raw}'"));
            } else {
                segments.push(Segment::Literal(raw.to_owned()));
            }
        }
        Ok(Self { segments })
    }

    fn concat(parts: &[Self]) -> Self {
        Self {
            segments: parts.iter().flat_map(|p| p.segments.iter().cloned()).collect(),
        }
    }

    fn sample_path(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(l) => l.clone(),
                Segment::Param(_) => SAMPLE_VALUE.to_owned(),
                Segment::Modifier(c) => format!("${c}"),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    fn literal_modifier(&self) -> Option<Content> {
        match self.segments.last() {
            Some(Segment::Modifier(c)) => Some(*c),
            _ => None,
        }
    }

    fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            _ => None,
        })
    }

    fn to_regex_source(&self, modifier_suffix: bool) -> String {
        let body = self
            .segments
            .iter()
            .map(|s| match s {
                Segment::Literal(l) => regex::escape(l),
                Segment::Param(name) => format!("(?P<{name}>[^/$]+)"),
                // Modifier tokens are case-insensitive, like the captured suffix.
                Segment::Modifier(c) => format!("(?i:{})", regex::escape(&format!("${c}"))),
            })
            .collect::<Vec<_>>()
            .join("/");
        let suffix = if modifier_suffix {
            let sep = if self.segments.is_empty() { "" } else { "/" };
            format!(r"(?:{sep}\$(?P<{CONTENT_MODIFIER_GROUP}>[^/]*))?")
        } else {
            String::new()
        };
        format!("^{body}{suffix}$")
    }
}

fn is_valid_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != CONTENT_MODIFIER_GROUP
}

/// Result of matching a concrete path against a [`RoutePattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    params: Vec<(String, String)>,
    content_token: Option<String>,
    remainder: String,
}

impl PathMatch {
    /// Raw (still percent-encoded) value of a path parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All captured parameters in template order.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// The content-modifier token, from the optional suffix or a literal `$token` segment.
    #[must_use]
    pub fn content_token(&self) -> Option<&str> {
        self.content_token.as_deref()
    }

    /// The path with the context and submodel prefixes stripped.
    #[must_use]
    pub fn remainder(&self) -> &str {
        &self.remainder
    }
}

/// An anchored path matcher composed from template fragments.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    regex: Regex,
    template: PathTemplate,
    prefix_segments: usize,
    excluded: Vec<Content>,
    literal_modifier: Option<Content>,
}

impl RoutePattern {
    /// Compose a pattern from prefix fragments and a base template.
    ///
    /// A content-modifier suffix is appended when `modifier_suffix` is set
    /// and the sample path of the base template does not already end in a
    /// modifier token.
    ///
    /// # Errors
    ///
    /// Returns [`RouteConfigError::InvalidTemplate`] if a fragment does not
    /// parse, parameters are declared twice, or a `$modifier` segment is not
    /// the last segment.
    pub fn compose(
        route: &str,
        prefixes: &[&str],
        base: &str,
        modifier_suffix: bool,
        excluded: &[Content],
    ) -> Result<Self, RouteConfigError> {
        let full_source = prefixes
            .iter()
            .copied()
            .chain(std::iter::once(base))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        let invalid = |reason: String| RouteConfigError::InvalidTemplate {
            route: route.to_owned(),
            template: full_source.clone(),
            reason,
        };

        let mut parts = Vec::with_capacity(prefixes.len() + 1);
        for fragment in prefixes {
            let parsed = PathTemplate::parse(fragment).map_err(&invalid)?;
            if parsed.literal_modifier().is_some() {
                return Err(invalid("prefix fragments cannot carry a modifier".to_owned()));
            }
            parts.push(parsed);
        }
        let prefix_segments = parts.iter().map(|p| p.segments.len()).sum();
        let base_template = PathTemplate::parse(base).map_err(&invalid)?;
        let base_sample = base_template.sample_path();
        parts.push(base_template);
        let template = PathTemplate::concat(&parts);

        let modifier_positions = template
            .segments
            .iter()
            .filter(|s| matches!(s, Segment::Modifier(_)))
            .count();
        let literal_modifier = template.literal_modifier();
        if modifier_positions > usize::from(literal_modifier.is_some()) {
            return Err(invalid("a $modifier segment must be the last segment".to_owned()));
        }

        let mut seen = HashSet::new();
        for name in template.params() {
            if !seen.insert(name) {
                return Err(invalid(format!("parameter '{name}' declared twice")));
            }
        }

        let with_suffix = modifier_suffix && !HAS_CONTENT_MODIFIER.is_match(&base_sample);
        let regex = Regex::new(&template.to_regex_source(with_suffix))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            regex,
            template,
            prefix_segments,
            excluded: excluded.to_vec(),
            literal_modifier,
        })
    }

    /// Match a concrete path (no leading `/`).
    ///
    /// Returns `None` if the path does not match in full, or if the trailing
    /// modifier token names an excluded content modifier.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<PathMatch> {
        let caps = self.regex.captures(path)?;

        let captured = caps.name(CONTENT_MODIFIER_GROUP).map(|m| m.as_str());
        if let Some(token) = captured {
            if let Ok(content) = token.parse::<Content>() {
                if self.excluded.contains(&content) {
                    return None;
                }
            }
        }
        let content_token = captured
            .map(ToOwned::to_owned)
            .or_else(|| self.literal_modifier.map(|c| c.as_str().to_owned()));

        let params = self
            .template
            .params()
            .filter_map(|name| caps.name(name).map(|m| (name.to_owned(), m.as_str().to_owned())))
            .collect();

        let remainder = path
            .splitn(self.prefix_segments + 1, '/')
            .nth(self.prefix_segments)
            .unwrap_or("")
            .to_owned();

        Some(PathMatch {
            params,
            content_token,
            remainder,
        })
    }

    /// Whether the path matches (see [`RoutePattern::matches`]).
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.matches(path).is_some()
    }

    /// A concrete path matched by this pattern, used for overlap checks.
    #[must_use]
    pub fn sample_path(&self) -> String {
        self.template.sample_path()
    }

    /// The composed template, e.g. `submodels/{submodelId}/submodel-elements/{path}`.
    #[must_use]
    pub fn template(&self) -> String {
        self.template
            .segments
            .iter()
            .map(|s| match s {
                Segment::Literal(l) => l.clone(),
                Segment::Param(name) => format!("{{{name}}}"),
                Segment::Modifier(c) => format!("${c}"),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The anchored regex source.
    #[must_use]
    pub fn as_regex_str(&self) -> &str {
        self.regex.as_str()
    }
}
