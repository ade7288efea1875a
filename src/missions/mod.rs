//! Mission catalog.
//!
//! Categories and missions are static data; the catalog indexes them by id.

mod data;

#[allow(unused_imports)]
pub use data::*;

use std::collections::HashMap;

/// A mission together with the id of the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMission {
    pub mission: Mission,
    pub category_id: &'static str,
}

/// By-id lookup over categories and missions.
#[derive(Debug, Clone)]
pub struct MissionCatalog {
    categories: Vec<Category>,
    categories_by_id: HashMap<&'static str, usize>,
    missions_by_id: HashMap<&'static str, CatalogMission>,
}

impl Default for MissionCatalog {
    fn default() -> Self {
        Self::new(get_all_categories())
    }
}

impl MissionCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        let mut categories_by_id = HashMap::new();
        let mut missions_by_id = HashMap::new();

        for (index, category) in categories.iter().enumerate() {
            categories_by_id.insert(category.id, index);
            for mission in &category.missions {
                missions_by_id.insert(
                    mission.id,
                    CatalogMission {
                        mission: mission.clone(),
                        category_id: category.id,
                    },
                );
            }
        }

        Self {
            categories,
            categories_by_id,
            missions_by_id,
        }
    }

    pub fn mission(&self, id: &str) -> Option<&CatalogMission> {
        self.missions_by_id.get(id)
    }

    /// XP value of a mission, or 0 when the id is not in the catalog.
    pub fn mission_xp(&self, id: &str) -> u64 {
        self.mission(id).map_or(0, |m| m.mission.xp as u64)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories_by_id.get(id).map(|&i| &self.categories[i])
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn missions(&self) -> impl Iterator<Item = &CatalogMission> {
        self.missions_by_id.values()
    }

    pub fn len(&self) -> usize {
        self.missions_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions_by_id.is_empty()
    }
}
