use hashlink::LinkedHashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("slug '{0}' is already registered")]
    Duplicate(String),
    #[error("invalid slug '{0}': slugs must be non-empty, lowercase and hyphen-separated")]
    InvalidSlug(String),
    #[error("definition for '{slug}' is missing required field '{field}'")]
    IncompleteDefinition { slug: String, field: &'static str },
}

/// Insertion-ordered mapping from slug to a registered definition.
///
/// Registration is last-write-wins by default; `try_insert` provides the
/// strict variant that rejects duplicates. A missing slug is a normal state
/// for callers, so lookups return `Option` and never fail.
#[derive(Clone)]
pub struct Registry<T> {
    entries: LinkedHashMap<String, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: LinkedHashMap::new(),
        }
    }

    /// A valid slug is its own slugification, e.g. `search-console`.
    pub fn validate_slug(slug: &str) -> Result<(), RegistryError> {
        if slug.is_empty() || slug::slugify(slug) != slug {
            return Err(RegistryError::InvalidSlug(slug.to_string()));
        }
        Ok(())
    }

    /// Store a definition, replacing any previous entry for the same slug.
    /// An overwrite keeps the slug's original position in the listing order.
    /// The replaced definition is returned so callers can log the overwrite.
    pub fn insert(&mut self, slug: &str, value: T) -> Result<Option<T>, RegistryError> {
        Self::validate_slug(slug)?;
        if let Some(existing) = self.entries.get_mut(slug) {
            tracing::debug!(slug, "registry entry replaced");
            return Ok(Some(std::mem::replace(existing, value)));
        }
        self.entries.insert(slug.to_string(), value);
        Ok(None)
    }

    /// Strict registration: a duplicate slug is an error.
    pub fn try_insert(&mut self, slug: &str, value: T) -> Result<(), RegistryError> {
        Self::validate_slug(slug)?;
        if self.entries.contains_key(slug) {
            return Err(RegistryError::Duplicate(slug.to_string()));
        }
        self.entries.insert(slug.to_string(), value);
        Ok(())
    }

    pub fn get(&self, slug: &str) -> Option<&T> {
        self.entries.get(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.entries.contains_key(slug)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_and_returns_previous() {
        let mut reg = Registry::new();
        assert_eq!(reg.insert("a", 1).unwrap(), None);
        assert_eq!(reg.insert("a", 2).unwrap(), Some(1));
        assert_eq!(reg.get("a"), Some(&2));
    }

    #[test]
    fn try_insert_rejects_duplicates() {
        let mut reg = Registry::new();
        reg.try_insert("a", 1).unwrap();
        assert_eq!(
            reg.try_insert("a", 2),
            Err(RegistryError::Duplicate("a".into()))
        );
        assert_eq!(reg.get("a"), Some(&1));
    }

    #[test]
    fn rejects_malformed_slugs() {
        let mut reg = Registry::new();
        assert!(matches!(
            reg.insert("", 1),
            Err(RegistryError::InvalidSlug(_))
        ));
        assert!(matches!(
            reg.insert("Search Console", 1),
            Err(RegistryError::InvalidSlug(_))
        ));
    }

    #[test]
    fn iteration_keeps_insertion_order_across_overwrites() {
        let mut reg = Registry::new();
        reg.insert("b", 1).unwrap();
        reg.insert("a", 2).unwrap();
        reg.insert("b", 3).unwrap();
        let slugs: Vec<&str> = reg.slugs().collect();
        assert_eq!(slugs, vec!["b", "a"]);
    }

    #[test]
    fn missing_slug_is_not_an_error() {
        let reg: Registry<u32> = Registry::new();
        assert!(reg.get("missing").is_none());
        assert!(!reg.contains("missing"));
    }
}
