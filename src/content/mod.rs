// content/mod.rs

use bevy::prelude::*;
use serde::Deserialize;
use std::fmt;

const FILMS_JSON: &str = include_str!("../../assets/films.json");

/// Everything a card carries for display. Never inspected by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilmContent {
    pub title: String,
    #[serde(rename = "imgUrl")]
    pub img_url: String,
    pub description: String,
    #[serde(rename = "demoUrl", default)]
    pub demo_url: Option<String>,
}

/// Error types for content loading
#[derive(Debug)]
pub enum ContentError {
    Parse(serde_json::Error),
    Empty,
    BlankTitle { index: usize },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Parse(e) => write!(f, "Failed to parse film list: {}", e),
            ContentError::Empty => write!(f, "Film list is empty"),
            ContentError::BlankTitle { index } => {
                write!(f, "Film {} has a blank title", index)
            }
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(e: serde_json::Error) -> Self {
        ContentError::Parse(e)
    }
}

/// Static film list, read once at startup
#[derive(Resource, Debug, Clone)]
pub struct ContentLibrary {
    films: Vec<FilmContent>,
}

impl ContentLibrary {
    /// Load the embedded film list
    pub fn load() -> Result<Self, ContentError> {
        Self::from_json(FILMS_JSON)
    }

    fn from_json(json: &str) -> Result<Self, ContentError> {
        let films: Vec<FilmContent> = serde_json::from_str(json)?;

        if films.is_empty() {
            return Err(ContentError::Empty);
        }

        if let Some(index) = films.iter().position(|f| f.title.trim().is_empty()) {
            return Err(ContentError::BlankTitle { index });
        }

        Ok(ContentLibrary { films })
    }

    pub fn films(&self) -> &[FilmContent] {
        &self.films
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }
}

/// System: load the film list. Runs first in Startup.
pub fn setup_content_library(mut commands: Commands) {
    match ContentLibrary::load() {
        Ok(library) => {
            info!("✓ Loaded {} films", library.len());
            for film in library.films().iter().take(3) {
                debug!("  - {}", film.title);
            }
            commands.insert_resource(library);
        }
        Err(e) => {
            error!("Failed to load film list: {}", e);
            panic!("Cannot continue without film content");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_list_loads() {
        let library = ContentLibrary::load().unwrap();
        assert!(library.len() > 0);
        assert!(library.films().iter().all(|f| !f.title.is_empty()));
    }

    #[test]
    fn test_demo_url_is_optional() {
        let json = r#"[
            {"title": "A", "imgUrl": "a.png", "description": "first", "demoUrl": "https://a"},
            {"title": "B", "imgUrl": "b.png", "description": "second"}
        ]"#;
        let library = ContentLibrary::from_json(json).unwrap();

        assert_eq!(library.films()[0].demo_url.as_deref(), Some("https://a"));
        assert_eq!(library.films()[1].demo_url, None);
        assert_eq!(library.films()[1].img_url, "b.png");
    }

    #[test]
    fn test_empty_list() {
        assert!(matches!(
            ContentLibrary::from_json("[]"),
            Err(ContentError::Empty)
        ));
    }

    #[test]
    fn test_blank_title() {
        let json = r#"[
            {"title": "A", "imgUrl": "a.png", "description": ""},
            {"title": "  ", "imgUrl": "b.png", "description": ""}
        ]"#;
        assert!(matches!(
            ContentLibrary::from_json(json),
            Err(ContentError::BlankTitle { index: 1 })
        ));
    }

    #[test]
    fn test_invalid_json() {
        let err = ContentLibrary::from_json("{not json").unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse film list"));
    }
}
