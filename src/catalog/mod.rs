//! Endpoint catalog.
//!
//! The ordered endpoints of one run. Order is significant: it is the order
//! results are reported in. The catalog round-trips through the text
//! report (see [`report`]), losing pod ownership and health paths.

pub mod report;

pub use report::{parse_report, read_report, render_report, write_report};

use crate::model::Endpoint;

/// Ordered endpoints of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    endpoints: Vec<Endpoint>,
}

impl Catalog {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Catalog { endpoints }
    }

    pub fn push(&mut self, endpoint: Endpoint) {
        self.endpoints.push(endpoint);
    }

    pub fn extend(&mut self, endpoints: impl IntoIterator<Item = Endpoint>) {
        self.endpoints.extend(endpoints);
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Endpoint> {
        self.endpoints.iter()
    }

    pub fn into_endpoints(self) -> Vec<Endpoint> {
        self.endpoints
    }

    /// Endpoints grouped by scope.
    ///
    /// Groups appear in order of each scope's first endpoint and keep
    /// catalog order inside a group, so the result is deterministic.
    pub fn grouped_by_scope(&self) -> Vec<(&str, Vec<&Endpoint>)> {
        let mut groups: Vec<(&str, Vec<&Endpoint>)> = Vec::new();
        for endpoint in &self.endpoints {
            match groups
                .iter_mut()
                .find(|(scope, _)| *scope == endpoint.scope)
            {
                Some((_, members)) => members.push(endpoint),
                None => groups.push((endpoint.scope.as_str(), vec![endpoint])),
            }
        }
        groups
    }
}

impl FromIterator<Endpoint> for Catalog {
    fn from_iter<I: IntoIterator<Item = Endpoint>>(iter: I) -> Self {
        Catalog::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Catalog {
    type Item = Endpoint;
    type IntoIter = std::vec::IntoIter<Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}
