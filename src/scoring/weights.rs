use std::collections::HashMap;

use tracing::{debug, info};

use super::types::{normalize_category, PointWeight};
use super::validation::validate_weight;
use crate::error::{LeagueError, LeagueResult};
use crate::league::new_id;
use crate::store::{Database, Store};

/// Category → weight lookup for one league.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    weights: HashMap<String, f64>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_weights<'a, I>(weights: I) -> Self
    where
        I: IntoIterator<Item = &'a PointWeight>,
    {
        Self {
            weights: weights
                .into_iter()
                .map(|w| (w.category.clone(), w.weight))
                .collect(),
        }
    }

    /// Insert or replace the weight for a category
    pub fn insert(&mut self, category: &str, weight: f64) {
        self.weights.insert(normalize_category(category), weight);
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.weights.get(&normalize_category(category)).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for WeightTable {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut table = WeightTable::new();
        for (category, weight) in iter {
            table.insert(category.as_ref(), weight);
        }
        table
    }
}

/// Sort weights by category so listings are stable
pub fn sorted_weights(mut weights: Vec<PointWeight>) -> Vec<PointWeight> {
    weights.sort_by(|a, b| a.category.cmp(&b.category));
    weights
}

/// Create or overwrite the weight for `category` within a league.
///
/// Keyed by (league, normalized category). Overwriting keeps the existing id.
pub async fn set_weight(
    store: &Store,
    league_id: &str,
    category: &str,
    weight: f64,
) -> LeagueResult<PointWeight> {
    validate_weight(category, weight).map_err(LeagueError::Validation)?;
    let category = normalize_category(category);

    let (saved, previous) = store
        .write(|db| {
            db.require_league(league_id)?;

            let existing = db.find_weight(league_id, &category).cloned();
            let saved = PointWeight {
                id: existing
                    .as_ref()
                    .map(|w| w.id.clone())
                    .unwrap_or_else(new_id),
                league: league_id.to_string(),
                category,
                weight,
            };
            db.point_weights.insert(saved.id.clone(), saved.clone());
            Ok((saved, existing.map(|w| w.weight)))
        })
        .await?;

    match previous {
        Some(old) => info!(
            "Replaced weight for '{}' in league {}: {} -> {}",
            saved.category, league_id, old, saved.weight
        ),
        None => debug!(
            "Set weight for '{}' in league {} to {}",
            saved.category, league_id, saved.weight
        ),
    }

    Ok(saved)
}

/// All weights configured for a league, sorted by category
pub async fn get_weights(store: &Store, league_id: &str) -> LeagueResult<Vec<PointWeight>> {
    store
        .read(|db| {
            db.require_league(league_id)?;
            Ok(sorted_weights(db.weights_in(league_id).cloned().collect()))
        })
        .await
}

/// Lookup table over the league's current weights
pub(crate) fn weight_table(db: &Database, league_id: &str) -> WeightTable {
    WeightTable::from_weights(db.weights_in(league_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntityKind;
    use crate::league::{create_league, NewLeague};

    async fn seed_league(store: &Store) -> String {
        create_league(
            store,
            NewLeague {
                name: "The Tour".to_string(),
                end_date: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[test]
    fn test_weight_table_lookup_normalizes() {
        let table: WeightTable = [("Eagle", 5.0), ("bogey", -2.0)].into_iter().collect();
        assert_eq!(table.get("eagle"), Some(5.0));
        assert_eq!(table.get(" BOGEY "), Some(-2.0));
        assert_eq!(table.get("mulligan"), None);
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn test_set_weight_creates_entry() {
        let store = Store::in_memory();
        let league = seed_league(&store).await;

        let weight = set_weight(&store, &league, "Throwing Club", -10.0).await.unwrap();
        assert_eq!(weight.category, "throwing club");
        assert_eq!(weight.weight, -10.0);
        assert_eq!(weight.league, league);
    }

    #[tokio::test]
    async fn test_set_weight_overwrites_same_category() {
        let store = Store::in_memory();
        let league = seed_league(&store).await;

        let first = set_weight(&store, &league, "eagle", 5.0).await.unwrap();
        let second = set_weight(&store, &league, "EAGLE", 7.0).await.unwrap();

        assert_eq!(first.id, second.id);
        let weights = get_weights(&store, &league).await.unwrap();
        assert_eq!(weights.len(), 1);
        assert_eq!(weights[0].weight, 7.0);
    }

    #[tokio::test]
    async fn test_same_category_in_two_leagues_is_independent() {
        let store = Store::in_memory();
        let a = seed_league(&store).await;
        let b = seed_league(&store).await;

        set_weight(&store, &a, "birdie", 2.0).await.unwrap();
        set_weight(&store, &b, "birdie", 3.0).await.unwrap();

        let (table_a, table_b) = store
            .read(|db| (weight_table(db, &a), weight_table(db, &b)))
            .await;
        assert_eq!(table_a.get("birdie"), Some(2.0));
        assert_eq!(table_b.get("birdie"), Some(3.0));
    }

    #[tokio::test]
    async fn test_get_weights_sorted_by_category() {
        let store = Store::in_memory();
        let league = seed_league(&store).await;
        set_weight(&store, &league, "par", 0.0).await.unwrap();
        set_weight(&store, &league, "birdie", 2.0).await.unwrap();

        let categories: Vec<String> = get_weights(&store, &league)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.category)
            .collect();
        assert_eq!(categories, vec!["birdie", "par"]);
    }

    #[tokio::test]
    async fn test_set_weight_missing_league() {
        let store = Store::in_memory();
        let result = set_weight(&store, "missing", "eagle", 5.0).await;
        assert!(matches!(
            result,
            Err(LeagueError::NotFound { kind: EntityKind::League, .. })
        ));
        assert!(store.read(|db| db.point_weights.is_empty()).await);
    }

    #[tokio::test]
    async fn test_set_weight_rejects_blank_category() {
        let store = Store::in_memory();
        let league = seed_league(&store).await;
        let result = set_weight(&store, &league, "  ", 1.0).await;
        assert!(matches!(result, Err(LeagueError::Validation(_))));
    }
}
