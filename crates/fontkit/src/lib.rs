//! Font-metrics collaborator boundary.
//!
//! Layout never computes text metrics itself; it asks a [`FontCache`] for a
//! [`FontFace`] handle and uses `measure`/`metrics` on it. The cache is keyed
//! by the full style descriptor and is read-mostly after first population.
//! The real rasterizing backend lives outside this core; [`HeuristicBackend`]
//! provides deterministic metrics for tests and headless runs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::trace;

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slant {
    #[default]
    Roman,
    Italic,
}

/// Full style descriptor for one font lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub size: i32,
    pub weight: Weight,
    pub slant: Slant,
    /// `None` selects the default proportional family.
    pub family: Option<&'static str>,
}

impl FontSpec {
    pub fn new(size: i32, weight: Weight, slant: Slant) -> Self {
        Self {
            size,
            weight,
            slant,
            family: None,
        }
    }

    pub fn with_family(mut self, family: &'static str) -> Self {
        self.family = Some(family);
        self
    }
}

/// Vertical metrics of a resolved font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub linespace: f32,
}

/// A measurable font handle returned by the backend.
pub trait FontFace: fmt::Debug {
    /// Advance width of `text` in this face.
    fn measure(&self, text: &str) -> f32;

    fn metrics(&self) -> FontMetrics;

    /// The descriptor this face was resolved from.
    fn spec(&self) -> FontSpec;
}

/// Resolves a descriptor to a concrete face. Implemented by the platform
/// font backend outside this core.
pub trait FontBackend {
    fn open(&self, spec: FontSpec) -> Arc<dyn FontFace>;
}

/// Caches resolved faces by descriptor so repeated lookups during layout hit
/// the same handle.
pub struct FontCache {
    backend: Box<dyn FontBackend>,
    faces: HashMap<FontSpec, Arc<dyn FontFace>>,
}

impl FontCache {
    pub fn new(backend: Box<dyn FontBackend>) -> Self {
        Self {
            backend,
            faces: HashMap::new(),
        }
    }

    /// A cache over the deterministic heuristic backend.
    pub fn heuristic() -> Self {
        Self::new(Box::new(HeuristicBackend))
    }

    pub fn font(&mut self, spec: FontSpec) -> Arc<dyn FontFace> {
        let Self { backend, faces } = self;
        Arc::clone(faces.entry(spec).or_insert_with(|| {
            trace!("resolving font {spec:?}");
            backend.open(spec)
        }))
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Deterministic metrics: 0.6 em advance per character, 0.8 em ascent,
/// 0.2 em descent. Good enough for layout tests and headless rendering.
pub struct HeuristicBackend;

impl FontBackend for HeuristicBackend {
    fn open(&self, spec: FontSpec) -> Arc<dyn FontFace> {
        Arc::new(HeuristicFace { spec })
    }
}

#[derive(Debug)]
struct HeuristicFace {
    spec: FontSpec,
}

impl FontFace for HeuristicFace {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * 0.6 * self.spec.size as f32
    }

    fn metrics(&self) -> FontMetrics {
        let size = self.spec.size as f32;
        FontMetrics {
            ascent: 0.8 * size,
            descent: 0.2 * size,
            linespace: size,
        }
    }

    fn spec(&self) -> FontSpec {
        self.spec
    }
}
