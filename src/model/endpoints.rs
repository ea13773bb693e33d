//! Ordered endpoint list.

use serde::{Deserialize, Serialize};

use super::Endpoint;

/// Endpoints of a service, in declaration order.
///
/// Only appending and in-order iteration are exposed. Constructor emission order is derived from this order, so
/// there is deliberately no way to sort, dedupe, or reorder the list once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoints(Vec<Endpoint>);

impl Endpoints {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, endpoint: Endpoint) {
        self.0.push(endpoint);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Endpoint> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up an endpoint by name (first match).
    pub fn get(&self, name: &str) -> Option<&Endpoint> {
        self.0.iter().find(|e| e.name == name)
    }
}

impl FromIterator<Endpoint> for Endpoints {
    fn from_iter<I: IntoIterator<Item = Endpoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Endpoint>> for Endpoints {
    fn from(endpoints: Vec<Endpoint>) -> Self {
        Self(endpoints)
    }
}

impl<'a> IntoIterator for &'a Endpoints {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let endpoints: Endpoints = ["Zeta", "Alpha", "Mid"].into_iter().map(Endpoint::new).collect();
        let names: Vec<&str> = endpoints.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_get_returns_first_match() {
        let mut endpoints = Endpoints::new();
        endpoints.push(Endpoint::new("Add").with_error(crate::model::ErrorConversion::new("first", None)));
        endpoints.push(Endpoint::new("Add"));
        let found = endpoints.get("Add").map(|e| e.errors.len());
        assert_eq!(found, Some(1));
        assert!(endpoints.get("Missing").is_none());
    }
}
