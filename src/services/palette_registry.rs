use ditherkit_core::{builtin_palettes, Palette, PaletteError};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Listing entry for one palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
struct PaletteEntry {
    id: String,
    name: String,
    palette: Arc<Palette>,
}

/// Immutable view of the registered palettes, in registration order.
#[derive(Debug, Clone, Default)]
pub struct PaletteSet {
    entries: Vec<PaletteEntry>,
    index: HashMap<String, usize>,
}

impl PaletteSet {
    pub fn get(&self, id: &str) -> Option<&Arc<Palette>> {
        self.index.get(id).map(|&i| &self.entries[i].palette)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn infos(&self) -> Vec<PaletteInfo> {
        self.entries
            .iter()
            .map(|e| PaletteInfo {
                id: e.id.clone(),
                name: e.name.clone(),
            })
            .collect()
    }

    /// Insert or replace by id. A replaced palette keeps its position.
    fn insert(&mut self, id: String, name: String, palette: Palette) {
        let palette = Arc::new(palette);
        match self.index.get(&id) {
            Some(&i) => {
                self.entries[i].name = name;
                self.entries[i].palette = palette;
            }
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push(PaletteEntry { id, name, palette });
            }
        }
    }
}

/// Named palettes shared between callers.
///
/// Readers take an `Arc` snapshot; registration clones the current set,
/// modifies the clone and swaps it in, so a reader never sees a palette
/// half-way through an update.
#[derive(Debug, Default)]
pub struct PaletteRegistry {
    current: RwLock<Arc<PaletteSet>>,
}

impl PaletteRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-filled with the built-in palettes.
    pub fn with_builtins() -> Self {
        let mut set = PaletteSet::default();
        for builtin in builtin_palettes() {
            set.insert(builtin.id.to_string(), builtin.name.to_string(), builtin.palette());
        }
        Self {
            current: RwLock::new(Arc::new(set)),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<PaletteSet> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get(&self, id: &str) -> Option<Arc<Palette>> {
        self.snapshot().get(id).cloned()
    }

    /// Register a palette under `id`, replacing any existing one.
    pub fn register(&self, id: impl Into<String>, name: Option<String>, palette: Palette) {
        let id = id.into();
        let name = name.unwrap_or_else(|| id.clone());
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = PaletteSet::clone(&guard);
        tracing::info!(id = %id, colors = palette.len(), "Registered palette");
        next.insert(id, name, palette);
        *guard = Arc::new(next);
    }

    /// Parse hex colours and register them under `id`.
    pub fn register_hex<S: AsRef<str>>(
        &self,
        id: impl Into<String>,
        name: Option<String>,
        colors: &[S],
    ) -> Result<(), PaletteError> {
        let palette = Palette::from_hex(colors)?;
        self.register(id, name, palette);
        Ok(())
    }

    pub fn list(&self) -> Vec<PaletteInfo> {
        self.snapshot().infos()
    }

    /// Colours of a palette as lowercase `#rrggbb` strings.
    pub fn colors_hex(&self, id: &str) -> Option<Vec<String>> {
        self.get(id).map(|p| p.to_hex_strings())
    }
}
