mod service;

pub use service::{FieldService, FieldType, RootContext};

use thiserror::Error;

/// A field path the resolver does not recognize in its root context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unresolvable field '{path}'")]
pub struct UnresolvableFieldError {
    pub path: String,
}

impl UnresolvableFieldError {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Resolves raw field paths from expressions against a domain's field catalog.
///
/// Implementations must be pure lookups: the translator may call them any number of
/// times, from any thread that holds a shared reference.
pub trait FieldResolver {
    /// Normalize a raw path to its name relative to the root context.
    ///
    /// # Errors
    ///
    /// Returns [`UnresolvableFieldError`] if the path names no known field.
    fn resolve(&self, raw_path: &str) -> Result<String, UnresolvableFieldError>;

    /// Whether `raw_path` names a field of this root context. Used to tell
    /// field-to-field comparisons apart from bare literal words.
    fn is_known_field(&self, raw_path: &str) -> bool {
        self.resolve(raw_path).is_ok()
    }
}

impl<R: FieldResolver + ?Sized> FieldResolver for &R {
    fn resolve(&self, raw_path: &str) -> Result<String, UnresolvableFieldError> {
        (**self).resolve(raw_path)
    }

    fn is_known_field(&self, raw_path: &str) -> bool {
        (**self).is_known_field(raw_path)
    }
}

impl<R: FieldResolver + ?Sized> FieldResolver for std::sync::Arc<R> {
    fn resolve(&self, raw_path: &str) -> Result<String, UnresolvableFieldError> {
        (**self).resolve(raw_path)
    }

    fn is_known_field(&self, raw_path: &str) -> bool {
        (**self).is_known_field(raw_path)
    }
}
