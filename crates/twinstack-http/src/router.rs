//! Route table and request dispatch.
//!
//! The [`RouteTable`] maps an [`HttpRequest`] to exactly one [`DomainRequest`]:
//!
//! 1. Filter routes by exact HTTP method.
//! 2. Filter by path. Submodel-scoped routes carry a standalone and a
//!    contextualized (`shells/{aasId}/aas/...`) pattern; which one is tested
//!    depends on whether the path starts with the shell context prefix.
//! 3. Apply each remaining route's predicate (query parameter side channel).
//! 4. Exactly one route must remain.
//! 5. Decode the submodel scope, assemble output modifier and paging as the
//!    route declares, and call the route's parse function.
//!
//! The table is built once at startup and never mutated; share it through
//! `Arc`.

use std::num::NonZeroU32;

use http::Method;
use tracing::debug;
use twinstack_model::error::{MappingError, RouteConfigError};
use twinstack_model::modifier::{Content, OutputModifier, OutputModifierConstraints, PagingInfo};
use twinstack_model::request::{DomainRequest, SubmodelScope};
use twinstack_model::types::ElementPath;

use crate::codec::{IdentifierEncoding, decode_identifier, parse_element_path};
use crate::modifier::{assemble_output_modifier, assemble_paging};
use crate::pattern::{
    AAS_CONTEXT_PREFIX, AAS_ID, ApiGeneration, PathMatch, RoutePattern, SUBMODEL_ID,
    is_contextualized,
};
use crate::request::{HttpRequest, decode_uri_component};
use crate::routes;

/// Path parameter holding an element path.
pub const PATH_PARAM: &str = "path";

/// Builds a [`DomainRequest`] from a matched request.
pub type ParseFn = fn(&ParseContext<'_>) -> Result<DomainRequest, MappingError>;

/// Extra route-selection condition over query parameters and headers.
pub type Predicate = fn(&HttpRequest) -> bool;

/// Where a route's base template is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteScope {
    /// Single pattern, relative to the API root.
    Repository,
    /// Relative to a submodel; reachable standalone and through a shell.
    Submodel,
}

/// Declarative description of one route.
#[derive(Clone)]
pub struct RouteSpec {
    name: &'static str,
    method: Method,
    template: &'static str,
    scope: RouteScope,
    excluded: &'static [Content],
    output_modifier: Option<OutputModifierConstraints>,
    paging: Option<PagingInfo>,
    encoding: IdentifierEncoding,
    predicate: Option<Predicate>,
    parse: ParseFn,
}

impl std::fmt::Debug for RouteSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteSpec")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("template", &self.template)
            .field("scope", &self.scope)
            .field("excluded", &self.excluded)
            .field("output_modifier", &self.output_modifier)
            .field("paging", &self.paging)
            .field("encoding", &self.encoding)
            .field("predicate", &self.predicate.is_some())
            .finish_non_exhaustive()
    }
}

impl RouteSpec {
    /// A route relative to the API root.
    #[must_use]
    pub fn repository(name: &'static str, method: Method, template: &'static str, parse: ParseFn) -> Self {
        Self {
            name,
            method,
            template,
            scope: RouteScope::Repository,
            excluded: &[],
            output_modifier: None,
            paging: None,
            encoding: IdentifierEncoding::Base64Url,
            predicate: None,
            parse,
        }
    }

    /// A route relative to a submodel, reachable standalone and contextualized.
    #[must_use]
    pub fn submodel(name: &'static str, method: Method, template: &'static str, parse: ParseFn) -> Self {
        Self {
            scope: RouteScope::Submodel,
            ..Self::repository(name, method, template, parse)
        }
    }

    /// Accept an output modifier constrained to `constraints`.
    ///
    /// This also enables the optional `$modifier` path suffix.
    #[must_use]
    pub fn output_modifier(mut self, constraints: OutputModifierConstraints) -> Self {
        self.output_modifier = Some(constraints);
        self
    }

    /// Content modifier suffixes for which this route must not match.
    #[must_use]
    pub fn excluding(mut self, excluded: &'static [Content]) -> Self {
        self.excluded = excluded;
        self
    }

    /// Accept paging with the given defaults.
    #[must_use]
    pub fn paging(mut self, defaults: PagingInfo) -> Self {
        self.paging = Some(defaults);
        self
    }

    /// Encoding of identifiers in path parameters.
    #[must_use]
    pub fn identifier_encoding(mut self, encoding: IdentifierEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Only select this route when `predicate` holds.
    #[must_use]
    pub fn when(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Route name, unique within a table.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A compiled route: its spec plus composed patterns.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    spec: RouteSpec,
    standalone: RoutePattern,
    contextualized: Option<RoutePattern>,
}

impl RouteDescriptor {
    fn compile(spec: RouteSpec, generation: ApiGeneration) -> Result<Self, RouteConfigError> {
        let with_suffix = spec.output_modifier.is_some();
        let (standalone, contextualized) = match spec.scope {
            RouteScope::Repository => (
                RoutePattern::compose(spec.name, &[], spec.template, with_suffix, spec.excluded)?,
                None,
            ),
            RouteScope::Submodel => {
                let prefix = generation.submodel_prefix();
                (
                    RoutePattern::compose(
                        spec.name,
                        &[prefix],
                        spec.template,
                        with_suffix,
                        spec.excluded,
                    )?,
                    Some(RoutePattern::compose(
                        spec.name,
                        &[AAS_CONTEXT_PREFIX, prefix],
                        spec.template,
                        with_suffix,
                        spec.excluded,
                    )?),
                )
            }
        };
        Ok(Self {
            spec,
            standalone,
            contextualized,
        })
    }

    /// Route name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.spec.method
    }

    /// Whether the route is reachable through a shell context.
    #[must_use]
    pub fn is_submodel_scoped(&self) -> bool {
        self.contextualized.is_some()
    }

    /// Whether the route has a selection predicate.
    #[must_use]
    pub fn has_predicate(&self) -> bool {
        self.spec.predicate.is_some()
    }

    /// The standalone pattern.
    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.standalone
    }

    /// The contextualized pattern of a submodel-scoped route.
    #[must_use]
    pub fn contextualized_pattern(&self) -> Option<&RoutePattern> {
        self.contextualized.as_ref()
    }

    /// Pattern tested for a path: the contextualized one for paths under
    /// `shells/<id>/aas/`, when the route has one.
    fn pattern_for(&self, contextualized: bool) -> &RoutePattern {
        match (&self.contextualized, contextualized) {
            (Some(ctx), true) => ctx,
            _ => &self.standalone,
        }
    }

    fn patterns(&self) -> impl Iterator<Item = &RoutePattern> {
        std::iter::once(&self.standalone).chain(self.contextualized.as_ref())
    }
}

/// Mapping-relevant configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteConfig {
    /// Submodel prefix generation.
    pub api_generation: ApiGeneration,
    /// Default `limit` for paged routes that declare none.
    pub default_page_limit: Option<NonZeroU32>,
}

/// Everything a parse function needs, already matched and decoded.
#[derive(Debug)]
pub struct ParseContext<'a> {
    route: &'a RouteDescriptor,
    request: &'a HttpRequest,
    path_match: PathMatch,
    scope: Option<SubmodelScope>,
    output_modifier: Option<OutputModifier>,
    paging: Option<PagingInfo>,
}

impl ParseContext<'_> {
    /// The route being parsed.
    #[must_use]
    pub fn route_name(&self) -> &'static str {
        self.route.name()
    }

    /// The request being mapped.
    #[must_use]
    pub fn request(&self) -> &HttpRequest {
        self.request
    }

    /// The collected request body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.request.body
    }

    /// Decoded query parameters.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.request.query
    }

    /// The path match, with raw parameter values.
    #[must_use]
    pub fn path_match(&self) -> &PathMatch {
        &self.path_match
    }

    fn raw_param(&self, name: &str) -> Result<&str, MappingError> {
        self.path_match
            .param(name)
            .ok_or_else(|| MappingError::NoRouteMatched {
                method: self.request.method.to_string(),
                path: self.request.path.clone(),
            })
    }

    /// A percent-decoded path parameter.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NoRouteMatched`] if the route does not declare
    /// the parameter.
    pub fn param(&self, name: &str) -> Result<String, MappingError> {
        self.raw_param(name).map(decode_uri_component)
    }

    /// A path parameter decoded as an identifier in the route's encoding.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidIdentifierEncoding`] for a malformed token.
    pub fn identifier(&self, name: &str) -> Result<String, MappingError> {
        decode_identifier(name, self.raw_param(name)?, self.route.spec.encoding)
    }

    /// The `{path}` parameter as an element path.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidElementPath`] for a malformed path.
    pub fn element_path(&self) -> Result<ElementPath, MappingError> {
        parse_element_path(self.raw_param(PATH_PARAM)?)
    }

    /// The decoded submodel scope of a submodel-scoped route.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NoRouteMatched`] for repository routes.
    pub fn scope(&self) -> Result<SubmodelScope, MappingError> {
        self.scope
            .clone()
            .ok_or_else(|| MappingError::NoRouteMatched {
                method: self.request.method.to_string(),
                path: self.request.path.clone(),
            })
    }

    /// The assembled output modifier, or the default for routes without one.
    #[must_use]
    pub fn output_modifier(&self) -> OutputModifier {
        self.output_modifier.unwrap_or_default()
    }

    /// The selected content modifier.
    #[must_use]
    pub fn content(&self) -> Content {
        self.output_modifier().content
    }

    /// The assembled paging info, or unlimited for routes without paging.
    #[must_use]
    pub fn paging(&self) -> PagingInfo {
        self.paging.clone().unwrap_or_default()
    }
}

/// Immutable set of compiled routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    config: RouteConfig,
}

impl RouteTable {
    /// Build the table of all supported routes.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteConfigError`] if the catalogue fails validation.
    pub fn new(config: RouteConfig) -> Result<Self, RouteConfigError> {
        Self::with_routes(config, routes::catalogue())
    }

    /// Build a table from explicit route specs.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteConfigError`] for an invalid template, a duplicate
    /// route name, or two predicate-free routes matching the same path.
    pub fn with_routes(config: RouteConfig, specs: Vec<RouteSpec>) -> Result<Self, RouteConfigError> {
        let mut routes: Vec<RouteDescriptor> = Vec::with_capacity(specs.len());
        for spec in specs {
            if routes.iter().any(|r| r.name() == spec.name) {
                return Err(RouteConfigError::DuplicateRoute(spec.name.to_owned()));
            }
            routes.push(RouteDescriptor::compile(spec, config.api_generation)?);
        }
        check_overlaps(&routes)?;
        debug!(routes = routes.len(), generation = ?config.api_generation, "built route table");
        Ok(Self { routes, config })
    }

    /// All compiled routes, in declaration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Mapping configuration.
    #[must_use]
    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Select the unique route for a request.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::MethodNotAllowed`] if the path is routed only
    /// for other methods, [`MappingError::NoRouteMatched`] if nothing else
    /// matches and [`MappingError::AmbiguousRoute`] if more than one route does.
    pub fn resolve(&self, request: &HttpRequest) -> Result<(&RouteDescriptor, PathMatch), MappingError> {
        let contextualized = is_contextualized(&request.path);
        let mut matched: Vec<(&RouteDescriptor, PathMatch)> = self
            .routes
            .iter()
            .filter(|r| r.spec.method == request.method)
            .filter_map(|r| r.pattern_for(contextualized).matches(&request.path).map(|m| (r, m)))
            .filter(|(r, _)| r.spec.predicate.is_none_or(|p| p(request)))
            .collect();

        match matched.len() {
            0 => {
                let allowed = self.allowed_methods(&request.path);
                if allowed.is_empty() || allowed.contains(&request.method) {
                    Err(MappingError::NoRouteMatched {
                        method: request.method.to_string(),
                        path: request.path.clone(),
                    })
                } else {
                    Err(MappingError::MethodNotAllowed {
                        method: request.method.to_string(),
                        path: request.path.clone(),
                        allowed: allowed.iter().map(ToString::to_string).collect(),
                    })
                }
            }
            1 => {
                let (route, path_match) = matched.remove(0);
                debug!(route = route.name(), contextualized, "resolved route");
                Ok((route, path_match))
            }
            _ => Err(MappingError::AmbiguousRoute {
                method: request.method.to_string(),
                path: request.path.clone(),
                routes: matched.iter().map(|(r, _)| r.name().to_owned()).collect(),
            }),
        }
    }

    /// Run a resolved route's parse function.
    ///
    /// # Errors
    ///
    /// Returns any identifier, modifier, paging or body error of the request.
    pub fn parse(
        &self,
        route: &RouteDescriptor,
        path_match: PathMatch,
        request: &HttpRequest,
    ) -> Result<DomainRequest, MappingError> {
        let encoding = route.spec.encoding;
        let scope = if route.is_submodel_scoped() {
            let submodel_id = decode_identifier(SUBMODEL_ID, required(&path_match, SUBMODEL_ID, request)?, encoding)?;
            let aas_id = path_match
                .param(AAS_ID)
                .map(|raw| decode_identifier(AAS_ID, raw, encoding))
                .transpose()?;
            Some(SubmodelScope {
                aas_id,
                submodel_id,
            })
        } else {
            None
        };

        let output_modifier = route
            .spec
            .output_modifier
            .as_ref()
            .map(|c| assemble_output_modifier(route.name(), path_match.content_token(), &request.query, c))
            .transpose()?;

        let paging = route
            .spec
            .paging
            .as_ref()
            .map(|defaults| {
                let mut defaults = defaults.clone();
                if defaults.limit.is_none() {
                    defaults.limit = self.config.default_page_limit;
                }
                assemble_paging(&request.query, &defaults)
            })
            .transpose()?;

        let ctx = ParseContext {
            route,
            request,
            path_match,
            scope,
            output_modifier,
            paging,
        };
        (route.spec.parse)(&ctx)
    }

    /// Map a request to its domain request.
    ///
    /// # Errors
    ///
    /// See [`RouteTable::resolve`] and [`RouteTable::parse`].
    pub fn map(&self, request: &HttpRequest) -> Result<DomainRequest, MappingError> {
        let (route, path_match) = self.resolve(request)?;
        self.parse(route, path_match, request)
    }

    /// Methods of every route structurally matching `path`, ignoring predicates.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let contextualized = is_contextualized(path);
        let mut methods: Vec<Method> = Vec::new();
        for route in &self.routes {
            if route.pattern_for(contextualized).is_match(path)
                && !methods.contains(&route.spec.method)
            {
                methods.push(route.spec.method.clone());
            }
        }
        methods
    }
}

fn required<'m>(path_match: &'m PathMatch, name: &str, request: &HttpRequest) -> Result<&'m str, MappingError> {
    path_match
        .param(name)
        .ok_or_else(|| MappingError::NoRouteMatched {
            method: request.method.to_string(),
            path: request.path.clone(),
        })
}

/// Reject tables where two predicate-free routes with the same method match
/// the same sample path.
fn check_overlaps(routes: &[RouteDescriptor]) -> Result<(), RouteConfigError> {
    for (i, first) in routes.iter().enumerate() {
        if first.has_predicate() {
            continue;
        }
        for second in &routes[i + 1..] {
            if second.has_predicate() || first.spec.method != second.spec.method {
                continue;
            }
            for (a, b) in [(first, second), (second, first)] {
                for pattern in a.patterns() {
                    let sample = pattern.sample_path();
                    if b.pattern_for(is_contextualized(&sample)).is_match(&sample) {
                        return Err(RouteConfigError::OverlappingRoutes {
                            first: first.name().to_owned(),
                            second: second.name().to_owned(),
                            method: first.spec.method.to_string(),
                            sample,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}
