//! Pages module - the report pages of the dashboard

mod android_apps;
mod home;
mod netflix_movies;
mod scala_history;

use crate::data::DataLoader;
use crate::registry::PageRegistry;
use std::path::Path;

pub const PROFILE: &str = "Profile";
pub const ANDROID_APP_MARKET: &str = "The Android App Market on Google Play";
pub const NETFLIX_MOVIES: &str = "Investigating Netflix Movies and Guest Stars in The Office";
pub const SCALA_HISTORY: &str = "The GitHub History of the Scala Language";

/// Register every page, in sidebar order, reading datasets from `datasets_dir`.
pub fn build_registry(datasets_dir: &Path) -> PageRegistry {
    let loader = DataLoader::new(datasets_dir);
    let mut registry = PageRegistry::new();

    registry.add_page(PROFILE, home::render);

    let l = loader.clone();
    registry.add_page(ANDROID_APP_MARKET, move |surface| {
        android_apps::render(&l, surface)
    });

    let l = loader.clone();
    registry.add_page(NETFLIX_MOVIES, move |surface| {
        netflix_movies::render(&l, surface)
    });

    registry.add_page(SCALA_HISTORY, move |surface| {
        scala_history::render(&loader, surface)
    });

    tracing::debug!(pages = registry.len(), dir = %datasets_dir.display(), "registry built");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_registered_in_sidebar_order() {
        let registry = build_registry(Path::new("datasets"));
        assert_eq!(
            registry.titles(),
            vec![PROFILE, ANDROID_APP_MARKET, NETFLIX_MOVIES, SCALA_HISTORY]
        );
    }
}
