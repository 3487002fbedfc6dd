use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A validated short-link slug.
///
/// Slugs are 1-64 characters long, contain only alphanumeric characters,
/// hyphens, or underscores, and are immutable once assigned to a link.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

const MAX_LENGTH: usize = 64;

impl Slug {
    /// Creates a new `Slug` after validating the input.
    ///
    /// Valid slugs are 1-64 characters and contain only `[a-zA-Z0-9_-]`.
    pub fn new(slug: impl Into<String>) -> Result<Self, CoreError> {
        let slug = slug.into();
        Self::validate(&slug)?;
        Ok(Self(slug))
    }

    /// Creates a `Slug` without validation.
    ///
    /// Use this only for slugs produced by trusted internal sources
    /// (e.g. values already validated at link creation).
    pub fn new_unchecked(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(slug: &str) -> Result<(), CoreError> {
        if slug.is_empty() || slug.len() > MAX_LENGTH {
            return Err(CoreError::InvalidSlug(format!(
                "length must be between 1 and {}, got {}",
                MAX_LENGTH,
                slug.len()
            )));
        }

        if !slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::InvalidSlug(format!(
                "must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                slug
            )));
        }

        Ok(())
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
