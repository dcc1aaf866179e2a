//! Nested scopes route transform
//!
//! Host-facing entry point: given the hierarchy declared in the transform options,
//! rewrites a route's `auth.access` declaration so that every bracketed scope is
//! replaced by the scopes it implies.
//!
//! ```text
//! route config ─▶ matches? ─▶ HierarchyCache (per realm) ─▶ rewrite_access ─▶ route config
//! ```

pub mod cache;

pub use cache::{CacheStats, HierarchyCache};

use std::sync::Arc;
use tracing::{info, warn};

use crate::access::{needs_expansion, rewrite_access, AccessConfig};
use crate::config::TransformConfig;
use crate::error::ScopeResult;
use crate::hierarchy::{HierarchyGraph, ScopeDeclaration};

/// Transform name, as registered with the host
pub const TRANSFORM_NAME: &str = "nested-scopes";

/// Path of the route setting this transform rewrites
pub const TRANSFORM_ROOT: &str = "config.auth.access.scope";

/// Route transform that expands nested scopes
///
/// # Example
///
/// ```
/// use cretoai_scopes::transform::NestedScopes;
/// use cretoai_scopes::hierarchy::{ScopeDeclaration, ScopeItem};
/// use cretoai_scopes::access::{AccessConfig, AccessRule};
///
/// let transform = NestedScopes::new(ScopeDeclaration::new(vec![
///     ScopeItem::nested("admin", vec!["user".into()]),
/// ]));
///
/// let access = AccessConfig::Single(AccessRule::with_scopes(["[user]"]));
/// let rewritten = transform.apply("default", &access).unwrap();
///
/// assert_eq!(rewritten.rules()[0].scopes().unwrap(), &["user", "admin"]);
/// ```
#[derive(Debug, Default)]
pub struct NestedScopes {
    /// Hierarchy declared in the transform options
    declaration: ScopeDeclaration,

    /// Built hierarchies, one per realm
    cache: Arc<HierarchyCache>,
}

impl NestedScopes {
    /// Creates a transform for the given hierarchy
    pub fn new(declaration: ScopeDeclaration) -> Self {
        Self::with_cache(declaration, Arc::new(HierarchyCache::new()))
    }

    /// Creates a transform sharing an existing hierarchy cache
    pub fn with_cache(declaration: ScopeDeclaration, cache: Arc<HierarchyCache>) -> Self {
        Self { declaration, cache }
    }

    /// Creates a transform from a loaded configuration
    pub fn from_config(config: &TransformConfig) -> Self {
        Self::new(config.scopes.clone())
    }

    /// Returns the transform name
    pub fn name(&self) -> &'static str {
        TRANSFORM_NAME
    }

    /// Returns the hierarchy declaration
    pub fn declaration(&self) -> &ScopeDeclaration {
        &self.declaration
    }

    /// Returns the hierarchy cache
    pub fn cache(&self) -> &Arc<HierarchyCache> {
        &self.cache
    }

    /// Returns true if the access declaration uses nested scopes
    pub fn matches(&self, access: &AccessConfig) -> bool {
        needs_expansion(access)
    }

    /// Returns the hierarchy for a realm, building it on first use
    pub fn hierarchy(&self, realm: &str) -> ScopeResult<Arc<HierarchyGraph>> {
        self.cache.get_or_build(realm, &self.declaration)
    }

    /// Rewrites an access declaration
    ///
    /// Declarations that do not use nested scopes are returned unchanged without
    /// building the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::ScopeError`] raised by building the hierarchy or
    /// expanding a token.
    pub fn apply(&self, realm: &str, access: &AccessConfig) -> ScopeResult<AccessConfig> {
        if !self.matches(access) {
            return Ok(access.clone());
        }

        let graph = self.hierarchy(realm)?;

        match rewrite_access(access, &graph) {
            Ok(rewritten) => {
                info!(
                    realm,
                    rules = rewritten.rules().len(),
                    "Expanded nested scopes in access declaration"
                );
                Ok(rewritten)
            }
            Err(e) => {
                warn!(realm, error = %e, "Failed to expand nested scopes");
                Err(e)
            }
        }
    }
}
