//! Action sheet loader.
//!
//! Loads per-job action data from RON and serves it through [`ActionOracle`].

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use combo_core::{ActionData, ActionId, ActionOracle};

use crate::loaders::{LoadResult, read_file};

const EMBEDDED: [(&str, &str); 4] = [
    ("bard.ron", include_str!("../../data/actions/bard.ron")),
    ("dark_knight.ron", include_str!("../../data/actions/dark_knight.ron")),
    ("scholar.ron", include_str!("../../data/actions/scholar.ron")),
    ("role.ron", include_str!("../../data/actions/role.ron")),
];

/// Static action data keyed by id.
#[derive(Clone, Debug, Default)]
pub struct ActionCatalog {
    actions: HashMap<ActionId, ActionData>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every action sheet shipped with the crate.
    pub fn embedded() -> LoadResult<Self> {
        let mut catalog = Self::new();
        for (name, source) in EMBEDDED {
            catalog.extend(parse(source, name)?);
        }
        Ok(catalog)
    }

    /// Loads an action sheet from a RON file.
    ///
    /// File format: `Vec<ActionData>`
    ///
    /// ```ron
    /// [
    ///     (id: 97, name: "Heavy Shot", level: 1, kind: Weaponskill, range: 25.0),
    /// ]
    /// ```
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        let mut catalog = Self::new();
        catalog.extend(parse(&content, &path.display().to_string())?);
        Ok(catalog)
    }

    /// Adds entries, replacing any existing entry with the same id.
    pub fn extend(&mut self, actions: impl IntoIterator<Item = ActionData>) {
        for data in actions {
            self.actions.insert(data.id, data);
        }
    }

    pub fn get(&self, id: ActionId) -> Option<&ActionData> {
        self.actions.get(&id)
    }

    /// Finds an action by its display name, ignoring case.
    pub fn by_name(&self, name: &str) -> Option<&ActionData> {
        self.actions
            .values()
            .find(|data| data.name.eq_ignore_ascii_case(name))
    }

    pub fn ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.actions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionOracle for ActionCatalog {
    fn action(&self, id: ActionId) -> Option<&ActionData> {
        self.actions.get(&id)
    }
}

fn parse(source: &str, origin: &str) -> LoadResult<Vec<ActionData>> {
    ron::from_str(source).with_context(|| format!("failed to parse action sheet {origin}"))
}

#[cfg(test)]
mod tests {
    use combo_core::AttackType;

    use super::*;

    #[test]
    fn embedded_sheets_load() {
        let catalog = ActionCatalog::embedded().expect("embedded sheets parse");

        assert!(catalog.len() > 80, "expected every job sheet, got {}", catalog.len());

        let burst = catalog.get(ActionId(16495)).expect("Burst Shot present");
        assert_eq!(burst.level, 76);
        assert_eq!(burst.kind, AttackType::Weaponskill);

        let shadowbringer = catalog.by_name("shadowbringer").expect("lookup by name");
        assert_eq!(shadowbringer.max_charges, 2);
    }

    #[test]
    fn unknown_actions_are_unlearned() {
        let catalog = ActionCatalog::embedded().expect("embedded sheets parse");

        assert_eq!(catalog.required_level(ActionId(1)), None);
        assert_eq!(catalog.attack_type(ActionId(1)), AttackType::Unknown);
        assert_eq!(catalog.required_level(ActionId(7531)), Some(8));
    }

    #[test]
    fn malformed_sheet_names_origin() {
        let err = parse("[(id: 1)]", "broken.ron").expect_err("missing fields");
        assert!(format!("{err:#}").contains("broken.ron"));
    }
}
