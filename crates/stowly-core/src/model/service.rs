// ── Add-on service catalog ──

use serde::{Deserialize, Serialize};

/// An optional add-on service (insurance, padlock, trolley rental, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOnService {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// The ordered service catalog, fetched once and immutable.
///
/// Drafts select services by id membership, not by storing full objects,
/// so a later catalog refresh cannot desynchronize a draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    services: Vec<AddOnService>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<AddOnService>) -> Self {
        Self { services }
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AddOnService> {
        self.services.iter()
    }

    /// Look up a service by id.
    pub fn get(&self, id: u32) -> Option<&AddOnService> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Whether the catalog contains the given id.
    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// Price of a service, `None` for unknown ids.
    pub fn price_of(&self, id: u32) -> Option<f64> {
        self.get(id).map(|s| s.price)
    }
}

impl<'a> IntoIterator for &'a ServiceCatalog {
    type Item = &'a AddOnService;
    type IntoIter = std::slice::Iter<'a, AddOnService>;

    fn into_iter(self) -> Self::IntoIter {
        self.services.iter()
    }
}
