//! Page Registry
//! Ordered collection of report pages; renders the selected one per run cycle.

use crate::registry::PageSelector;
use crate::surface::DisplaySurface;
use thiserror::Error;

/// Raised when the registry cannot resolve a page to render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No pages registered")]
    NoPages,
    #[error("No page titled {0:?}")]
    UnknownPage(String),
}

/// Render callable of a page.
pub type RenderFn<E> = Box<dyn Fn(&mut dyn DisplaySurface) -> Result<(), E> + Send + Sync>;

/// A titled report page.
pub struct ReportUnit<E> {
    title: String,
    render: RenderFn<E>,
}

impl<E> ReportUnit<E> {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn render(&self, surface: &mut dyn DisplaySurface) -> Result<(), E> {
        (self.render)(surface)
    }
}

impl<E> std::fmt::Debug for ReportUnit<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportUnit")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Pages in registration order. Registration order is display order.
///
/// Duplicate titles are kept as separate entries; lookups resolve to the
/// first one registered.
pub struct PageRegistry<E = anyhow::Error> {
    pages: Vec<ReportUnit<E>>,
}

impl<E> Default for PageRegistry<E> {
    fn default() -> Self {
        Self { pages: Vec::new() }
    }
}

impl<E> std::fmt::Debug for PageRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.titles()).finish()
    }
}

impl<E> PageRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page.
    pub fn add_page<F>(&mut self, title: impl Into<String>, render: F)
    where
        F: Fn(&mut dyn DisplaySurface) -> Result<(), E> + Send + Sync + 'static,
    {
        let title = title.into();
        if title.trim().is_empty() {
            tracing::warn!("registering a page with an empty title");
        } else if self.find(&title).is_some() {
            tracing::warn!(page = %title, "duplicate page title; the first registration wins");
        }
        tracing::debug!(page = %title, position = self.pages.len(), "page registered");

        self.pages.push(ReportUnit {
            title,
            render: Box::new(render),
        });
    }

    /// Titles in registration order, duplicates included.
    pub fn titles(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.title.as_str()).collect()
    }

    /// First page whose title equals `title` exactly.
    pub fn find(&self, title: &str) -> Option<&ReportUnit<E>> {
        self.pages.iter().find(|p| p.title == title)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl<E: From<ConfigurationError>> PageRegistry<E> {
    /// Run one cycle: ask `selector` for the active title and render exactly
    /// that page onto `surface`.
    ///
    /// Errors from the page's render callable are returned as-is.
    pub fn run(
        &self,
        selector: &mut dyn PageSelector,
        surface: &mut dyn DisplaySurface,
    ) -> Result<(), E> {
        let titles = self.titles();
        let Some(&first) = titles.first() else {
            return Err(ConfigurationError::NoPages.into());
        };

        let selected = selector
            .select(&titles)
            .unwrap_or_else(|| first.to_string());

        let page = self
            .find(&selected)
            .ok_or_else(|| ConfigurationError::UnknownPage(selected.clone()))?;

        tracing::info!(page = %page.title, "rendering page");
        page.render(surface)
    }
}
