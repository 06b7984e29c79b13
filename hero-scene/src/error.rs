use thiserror::Error;

/// Failures surfaced by the hero scene outside the render loop itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeroError {
    #[error("manifest contains no models")]
    EmptyManifest,

    #[error("duplicate model id `{0}` in manifest")]
    DuplicateModelId(String),

    #[error("model `{0}` has an empty asset path")]
    EmptyModelPath(String),

    #[error("model `{id}` has a non-finite {field} value")]
    NonFiniteTransform { id: String, field: &'static str },

    #[error("manifest failed to load: {0}")]
    ManifestLoad(String),

    #[error("browser window is not available")]
    MissingWindow,

    #[error("browser document is not available")]
    MissingDocument,

    #[error("no element matches `{0}`")]
    MissingElement(String),

    #[error("DOM call failed: {0}")]
    Dom(String),
}
