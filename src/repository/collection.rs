//! In-memory category map with ordering and count invariants.

use crate::models::Entity;
use crate::storage::RecordSink;
use crate::TrackerError;

/// Entities of one kind partitioned into a fixed, ordered set of categories.
///
/// Every declared category exists for the lifetime of the collection, even
/// when empty. Entities keep insertion order within their category and the
/// running count always equals the sum of the category lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedCollection<E> {
    categories: Vec<(String, Vec<E>)>,
    count: usize,
}

impl<E: Entity> Default for CategorizedCollection<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> CategorizedCollection<E> {
    /// Collection seeded with the kind's declared categories.
    pub fn new() -> Self {
        Self::with_categories(E::CATEGORIES.iter().copied())
    }

    /// Collection seeded with an explicit category set. Duplicate names are
    /// collapsed onto the first occurrence.
    pub fn with_categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<(String, Vec<E>)> = Vec::new();
        for name in names {
            let name = name.into();
            if !categories.iter().any(|(existing, _)| *existing == name) {
                categories.push((name, Vec::new()));
            }
        }
        Self {
            categories,
            count: 0,
        }
    }

    /// Append an entity to the end of its category.
    pub fn insert(&mut self, entity: E) -> Result<(), TrackerError> {
        let category = entity.category().to_string();
        let slot = self.slot_mut(&category)?;
        slot.push(entity);
        self.count += 1;
        Ok(())
    }

    /// Remove the entity at `position` (0-based) within `category`.
    ///
    /// Later entities in the same category shift down by one.
    pub fn remove(&mut self, category: &str, position: usize) -> Result<E, TrackerError> {
        let slot = self.slot_mut(category)?;
        if position >= slot.len() {
            return Err(TrackerError::IndexOutOfRange {
                index: (position + 1).to_string(),
                total: slot.len(),
            });
        }
        let removed = slot.remove(position);
        self.count -= 1;
        Ok(removed)
    }

    /// Membership test within the entity's own category only.
    pub fn contains(&self, entity: &E) -> bool {
        self.category(entity.category())
            .is_some_and(|items| items.contains(entity))
    }

    pub fn get(&self, category: &str, position: usize) -> Option<&E> {
        self.category(category).and_then(|items| items.get(position))
    }

    /// Entities of one category, or `None` if it was never declared.
    pub fn category(&self, name: &str) -> Option<&[E]> {
        self.categories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, items)| items.as_slice())
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// Categories with their entities, in declared order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[E])> {
        self.categories
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// All entities flattened in declared category order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.categories.iter().flat_map(|(_, items)| items.iter())
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn slot_mut(&mut self, category: &str) -> Result<&mut Vec<E>, TrackerError> {
        match self.categories.iter().position(|(name, _)| name == category) {
            Some(idx) => Ok(&mut self.categories[idx].1),
            None => Err(TrackerError::UnknownCategory {
                kind: E::KIND,
                category: category.to_string(),
                expected: self.category_names().map(str::to_string).collect(),
            }),
        }
    }
}

impl<E: Entity> RecordSink<E> for CategorizedCollection<E> {
    fn accept(&mut self, entity: E) -> Result<(), TrackerError> {
        self.insert(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Internship, InternshipDetails, Interview};
    use chrono::{NaiveDate, NaiveTime};

    fn software(company: &str) -> Internship {
        Internship::new(company, "Intern", InternshipDetails::Software { tech_stack: None })
    }

    fn general(company: &str) -> Internship {
        Internship::new(company, "Intern", InternshipDetails::General { department: None })
    }

    fn interview(category: &str) -> Interview {
        Interview {
            category: category.to_string(),
            company_name: "Acme".into(),
            role: "Intern".into(),
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            email: None,
            notes: None,
        }
    }

    #[test]
    fn test_new_seeds_declared_categories() {
        let collection = CategorizedCollection::<Internship>::new();
        let names: Vec<&str> = collection.category_names().collect();
        assert_eq!(names, vec!["software", "hardware", "general"]);
        assert!(collection.is_empty());
        assert_eq!(collection.category("hardware"), Some(&[][..]));
    }

    #[test]
    fn test_insert_keeps_order_and_count() {
        let mut collection = CategorizedCollection::new();
        collection.insert(software("A")).unwrap();
        collection.insert(general("B")).unwrap();
        collection.insert(software("C")).unwrap();

        assert_eq!(collection.len(), 3);
        let companies: Vec<&str> = collection
            .iter()
            .map(|i| i.company_name.as_str())
            .collect();
        assert_eq!(companies, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_insert_unknown_category_rejected() {
        let mut collection = CategorizedCollection::<Interview>::new();
        let err = collection.insert(interview("panel")).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownCategory { .. }));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_remove_shifts_positions() {
        let mut collection = CategorizedCollection::new();
        for name in ["A", "B", "C"] {
            collection.insert(software(name)).unwrap();
        }

        let removed = collection.remove("software", 0).unwrap();
        assert_eq!(removed.company_name, "A");
        assert_eq!(collection.get("software", 0).unwrap().company_name, "B");
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut collection = CategorizedCollection::new();
        collection.insert(software("A")).unwrap();
        let err = collection.remove("software", 1).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::IndexOutOfRange { ref index, total: 1 } if index == "2"
        ));
        let err = collection.remove("hardware", 0).unwrap_err();
        assert!(matches!(err, TrackerError::IndexOutOfRange { total: 0, .. }));
    }

    #[test]
    fn test_contains_is_per_category() {
        let mut collection = CategorizedCollection::<Interview>::new();
        collection.insert(interview("technical")).unwrap();
        assert!(collection.contains(&interview("technical")));
        assert!(!collection.contains(&interview("general")));
    }

    #[test]
    fn test_empty_category_survives_removal_of_last_entity() {
        let mut collection = CategorizedCollection::new();
        collection.insert(general("Solo")).unwrap();
        collection.remove("general", 0).unwrap();
        assert_eq!(collection.category("general").map(|c| c.len()), Some(0));
        assert_eq!(collection.category_names().count(), 3);
    }

    #[test]
    fn test_with_categories_collapses_duplicates() {
        let collection = CategorizedCollection::<Interview>::with_categories(["a", "b", "a"]);
        let names: Vec<&str> = collection.category_names().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_internship() -> impl Strategy<Value = Internship> {
            ("[A-Z][a-z]{0,6}", 0usize..3).prop_map(|(company, kind)| {
                let details = match kind {
                    0 => InternshipDetails::Software { tech_stack: None },
                    1 => InternshipDetails::Hardware {
                        embedded_systems: None,
                    },
                    _ => InternshipDetails::General { department: None },
                };
                Internship::new(&company, "Intern", details)
            })
        }

        proptest! {
            #[test]
            fn prop_count_matches_category_lengths(
                items in proptest::collection::vec(arb_internship(), 0..40)
            ) {
                let mut collection = CategorizedCollection::new();
                for item in items {
                    collection.insert(item).unwrap();
                    let sum: usize = collection.categories().map(|(_, c)| c.len()).sum();
                    prop_assert_eq!(collection.len(), sum);
                }
            }

            #[test]
            fn prop_remove_then_insert_restores_membership(
                items in proptest::collection::vec(arb_internship(), 1..20),
                pick in any::<prop::sample::Index>(),
            ) {
                let mut collection = CategorizedCollection::new();
                for item in &items {
                    collection.insert(item.clone()).unwrap();
                }
                let target = pick.get(&items).clone();
                let position = collection
                    .category(target.category())
                    .and_then(|c| c.iter().position(|i| *i == target))
                    .unwrap();
                let before = collection.len();

                let removed = collection.remove(target.category(), position).unwrap();
                collection.insert(removed).unwrap();

                prop_assert!(collection.contains(&target));
                prop_assert_eq!(collection.len(), before);
            }
        }
    }
}
