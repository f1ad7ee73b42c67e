use std::collections::BTreeSet;

use formshape_value::FormPayload;

use crate::path::FieldPath;

/// Every dotted field path present in one submission.
///
/// Used to tell a field array (`items`, with `items.0`, `items.1` present)
/// apart from a plain field, even when none of the items has an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownPaths(BTreeSet<String>);

impl KnownPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the paths of every submitted field name.
    ///
    /// Names that cannot be parsed are kept verbatim.
    pub fn from_payload(payload: &FormPayload) -> Self {
        payload
            .names()
            .map(|name| match FieldPath::parse_name(name) {
                Ok(path) => path.to_string(),
                Err(error) => {
                    tracing::warn!(%error, "keeping unparsable field name as-is");
                    name.to_string()
                }
            })
            .collect()
    }

    pub fn insert(&mut self, path: impl Into<String>) {
        self.0.insert(path.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    /// Whether some other known path lies below `path`.
    pub fn has_descendants(&self, path: &str) -> bool {
        let prefix = format!("{path}.");
        self.0
            .range(prefix.clone()..)
            .next()
            .is_some_and(|candidate| candidate.starts_with(&prefix))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KnownPaths {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for KnownPaths {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_descendants() {
        let known: KnownPaths = ["items.0", "items.1.name", "item", "itemsCount"]
            .into_iter()
            .collect();
        assert!(known.has_descendants("items"));
        assert!(known.has_descendants("items.1"));
        assert!(!known.has_descendants("item"));
        assert!(!known.has_descendants("itemsCount"));
        assert!(!known.has_descendants("items.0"));
    }

    #[test]
    fn test_from_payload_normalizes_names() {
        let mut payload = FormPayload::default();
        payload.insert("contacts[0][email]", "a@b.c");
        payload.insert("contacts.1.email", "d@e.f");
        payload.insert("broken[", "x");
        let known = KnownPaths::from_payload(&payload);
        assert_eq!(
            known.iter().collect::<Vec<_>>(),
            vec!["broken[", "contacts.0.email", "contacts.1.email"]
        );
    }
}
