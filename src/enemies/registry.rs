//! Enemy catalog.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::warn;

use super::definition::{EnemyDefinition, EnemyId};
use super::instance::EnemyInstance;
use crate::core::EntityId;
use crate::error::DataError;

/// Load-once table of enemy definitions.
///
/// Rejects duplicate identifiers and negative or NaN action weights at
/// registration. An empty action pattern is accepted here and reported
/// when the enemy first has to pick an intent.
#[derive(Clone, Debug, Default)]
pub struct EnemyCatalog {
    enemies: FxHashMap<EnemyId, Arc<EnemyDefinition>>,
}

impl EnemyCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(
        definitions: impl IntoIterator<Item = EnemyDefinition>,
    ) -> Result<Self, DataError> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.register(definition)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let definitions: Vec<EnemyDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    pub fn from_bincode(bytes: &[u8]) -> Result<Self, DataError> {
        let definitions: Vec<EnemyDefinition> = bincode::deserialize(bytes)?;
        Self::from_definitions(definitions)
    }

    /// Encode every definition, sorted by identifier.
    pub fn to_bincode(&self) -> Result<Vec<u8>, DataError> {
        let mut definitions: Vec<&EnemyDefinition> =
            self.enemies.values().map(Arc::as_ref).collect();
        definitions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(bincode::serialize(&definitions)?)
    }

    /// Register an enemy definition.
    pub fn register(&mut self, enemy: EnemyDefinition) -> Result<(), DataError> {
        if self.enemies.contains_key(&enemy.id) {
            warn!(enemy = %enemy.id, "duplicate enemy definition");
            return Err(DataError::DuplicateEnemy(enemy.id));
        }
        if enemy.max_hp <= 0 {
            warn!(enemy = %enemy.id, hp = enemy.max_hp, "enemy would spawn defeated");
            return Err(DataError::InvalidHp {
                enemy: enemy.id,
                hp: enemy.max_hp,
            });
        }
        let total: f32 = enemy.pattern.iter().map(|a| a.weight).sum();
        let bad = enemy
            .pattern
            .iter()
            .map(|a| a.weight)
            .find(|w| !w.is_finite() || *w < 0.0)
            .or((!total.is_finite()).then_some(total));
        if let Some(weight) = bad {
            warn!(enemy = %enemy.id, weight, "invalid action weight");
            return Err(DataError::InvalidWeight {
                enemy: enemy.id,
                weight,
            });
        }
        self.enemies.insert(enemy.id.clone(), Arc::new(enemy));
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &EnemyId) -> Option<&Arc<EnemyDefinition>> {
        self.enemies.get(id)
    }

    pub fn require(&self, id: &EnemyId) -> Result<&Arc<EnemyDefinition>, DataError> {
        self.get(id).ok_or_else(|| {
            warn!(enemy = %id, "enemy missing from catalog");
            DataError::UnknownEnemy(id.clone())
        })
    }

    /// Create a fresh enemy at full HP. The caller decides its first intent.
    pub fn spawn(&self, id: &EnemyId, entity_id: EntityId) -> Result<EnemyInstance, DataError> {
        let definition = self.require(id)?;
        Ok(EnemyInstance::new(entity_id, Arc::clone(definition)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyDefinition> {
        self.enemies.values().map(Arc::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::{EnemyAction, EnemyActionType};

    fn slime() -> EnemyDefinition {
        EnemyDefinition::new("slime", "Slime", 12)
            .with_action(EnemyAction::new(EnemyActionType::Attack, 5))
    }

    #[test]
    fn test_register_and_spawn() {
        let catalog = EnemyCatalog::from_definitions([slime()]).unwrap();
        let enemy = catalog.spawn(&EnemyId::new("slime"), EntityId(4)).unwrap();

        assert_eq!(enemy.entity_id, EntityId(4));
        assert_eq!(enemy.current_hp(), 12);
        assert!(enemy.intent().is_none());
    }

    #[test]
    fn test_unknown_enemy() {
        let catalog = EnemyCatalog::new();
        let err = catalog.spawn(&EnemyId::new("ghost"), EntityId(0)).unwrap_err();
        assert!(matches!(err, DataError::UnknownEnemy(_)));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = EnemyCatalog::from_definitions([slime(), slime()]).unwrap_err();
        assert!(matches!(err, DataError::DuplicateEnemy(_)));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let bad = EnemyDefinition::new("bad", "Bad", 1)
            .with_action(EnemyAction::new(EnemyActionType::Attack, 1).with_weight(-1.0));

        let mut catalog = EnemyCatalog::new();
        let err = catalog.register(bad).unwrap_err();
        assert!(matches!(err, DataError::InvalidWeight { weight, .. } if weight == -1.0));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_infinite_weight_rejected() {
        let bad = EnemyDefinition::new("bad", "Bad", 1)
            .with_action(EnemyAction::new(EnemyActionType::Attack, 1).with_weight(f32::INFINITY));

        let err = EnemyCatalog::from_definitions([bad]).unwrap_err();
        assert!(matches!(err, DataError::InvalidWeight { weight, .. } if weight.is_infinite()));
    }

    #[test]
    fn test_overflowing_weight_sum_rejected() {
        let json = r#"[{
            "id": "titan", "name": "Titan", "max_hp": 50,
            "pattern": [
                {"action_type": "Attack", "value": 5, "weight": 3.0e38},
                {"action_type": "Defend", "value": 3, "weight": 3.0e38}
            ]
        }]"#;

        let err = EnemyCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, DataError::InvalidWeight { weight, .. } if !weight.is_finite()));
    }

    #[test]
    fn test_non_positive_hp_rejected() {
        for hp in [0, -5] {
            let dead = EnemyDefinition::new("husk", "Husk", hp)
                .with_action(EnemyAction::new(EnemyActionType::Attack, 1));

            let err = EnemyCatalog::from_definitions([dead]).unwrap_err();
            assert!(matches!(err, DataError::InvalidHp { hp: got, .. } if got == hp));
        }
    }

    #[test]
    fn test_from_json_and_bincode() {
        let json = r#"[{
            "id": "slime", "name": "Slime", "max_hp": 12, "gold": 8,
            "pattern": [
                {"action_type": "Attack", "value": 5},
                {"action_type": "Defend", "value": 3, "weight": 0.5}
            ]
        }]"#;

        let catalog = EnemyCatalog::from_json(json).unwrap();
        let slime = catalog.get(&EnemyId::new("slime")).unwrap();
        assert_eq!(slime.gold, 8);
        assert_eq!(slime.pattern[1].weight, 0.5);

        let loaded = EnemyCatalog::from_bincode(&catalog.to_bincode().unwrap()).unwrap();
        assert_eq!(loaded.get(&EnemyId::new("slime")).map(|e| e.as_ref()), Some(slime.as_ref()));
    }
}
