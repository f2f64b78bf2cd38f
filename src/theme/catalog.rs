use tracing::debug;

use super::{Theme, builtin_themes};

/// Registry of themes keyed by name.
///
/// Keeps registration order so theme selectors list themes the way they were
/// registered. Re-registering a name replaces the theme in place.
#[derive(Debug, Clone, Default)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the built-in themes.
    pub fn with_builtin_themes() -> Self {
        let mut catalog = Self::new();
        for theme in builtin_themes() {
            catalog.register(theme);
        }
        catalog
    }

    /// Registers a theme, replacing any theme with the same name.
    pub fn register(&mut self, theme: Theme) {
        match self.position(theme.name()) {
            Some(index) => {
                debug!(theme = theme.name(), "Replacing registered theme");
                self.themes[index] = theme;
            }
            None => {
                debug!(theme = theme.name(), "Registering theme");
                self.themes.push(theme);
            }
        }
    }

    /// Removes the named theme. Unknown names are ignored.
    pub fn unregister(&mut self, name: &str) {
        self.themes.retain(|theme| theme.name() != name);
    }

    /// Looks up a theme by name.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.name() == name)
    }

    /// Whether a theme with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.themes
            .iter()
            .map(|theme| theme.name().to_string())
            .collect()
    }

    /// Iterates over the registered themes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    /// Number of registered themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.themes.iter().position(|theme| theme.name() == name)
    }
}
