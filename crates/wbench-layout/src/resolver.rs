//! Turning persisted part identifiers back into part instances.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::part::PartHandle;

/// Produces a part instance for a previously persisted identifier.
///
/// Unknown identifiers yield `None`; implementations must not panic on them.
pub trait PartResolver {
    fn resolve(&self, id: &str) -> Option<PartHandle>;
}

impl<F> PartResolver for F
where
    F: Fn(&str) -> Option<PartHandle>,
{
    fn resolve(&self, id: &str) -> Option<PartHandle> {
        self(id)
    }
}

/// Zero-argument constructor for a part.
pub type PartFactory = Box<dyn Fn() -> PartHandle>;

/// Resolver backed by an explicit identifier → factory table.
///
/// The table is assembled once at startup. With [`caching`](Self::caching)
/// each identifier is built at most once and later resolutions return the
/// same instance.
#[derive(Default)]
pub struct FactoryResolver {
    factories: FxHashMap<String, PartFactory>,
    cache: Option<RefCell<FxHashMap<String, PartHandle>>>,
}

impl FactoryResolver {
    /// A resolver that builds a fresh instance on every resolution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver that memoises one instance per identifier.
    #[must_use]
    pub fn caching() -> Self {
        Self {
            factories: FxHashMap::default(),
            cache: Some(RefCell::new(FxHashMap::default())),
        }
    }

    /// Register `factory` under `id`, replacing any earlier registration.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        factory: impl Fn() -> PartHandle + 'static,
    ) -> &mut Self {
        let id = id.into();
        if let Some(cache) = &self.cache {
            cache.borrow_mut().remove(&id);
        }
        self.factories.insert(id, Box::new(factory));
        self
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(
        mut self,
        id: impl Into<String>,
        factory: impl Fn() -> PartHandle + 'static,
    ) -> Self {
        self.register(id, factory);
        self
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl PartResolver for FactoryResolver {
    fn resolve(&self, id: &str) -> Option<PartHandle> {
        let factory = self.factories.get(id)?;
        let Some(cache) = &self.cache else {
            return Some(factory());
        };
        if let Some(part) = cache.borrow().get(id) {
            return Some(part.clone());
        }
        let part = factory();
        cache.borrow_mut().insert(id.to_owned(), part.clone());
        Some(part)
    }
}

impl fmt::Debug for FactoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("FactoryResolver")
            .field("ids", &ids)
            .field("caching", &self.cache.is_some())
            .finish()
    }
}
