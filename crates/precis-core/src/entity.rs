//! Named entities and score-based deduplication.
//!
//! An [`EntityMap`] holds at most one entry per surface form. Merging an
//! occurrence replaces the stored label only when the new score is strictly
//! greater, so ties keep the first-seen occurrence. Iteration order is the
//! order in which surface forms were first encountered.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};

/// One entity occurrence as returned by an extraction model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface form; the deduplication key.
    pub text: String,
    /// Category label.
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub score: f64,
}

impl Entity {
    /// Create an entity occurrence.
    pub fn new(text: impl Into<String>, label: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            score,
        }
    }
}

/// Winning `(label, score)` pair stored for a surface form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityLabel {
    /// Category label.
    pub label: String,
    /// Highest observed confidence.
    pub score: f64,
}

/// Flat presentation row: one per distinct surface form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Surface form.
    pub entity: String,
    /// Winning label.
    pub label: String,
    /// Winning score.
    pub score: f64,
}

/// Deduplicated entities keyed by surface form, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityMap {
    entries: IndexMap<String, EntityLabel>,
}

impl EntityMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one occurrence.
    ///
    /// Returns `true` when the map changed (new surface form, or a strictly
    /// higher score for a known one). Occurrences with a NaN score are
    /// ignored.
    pub fn merge(&mut self, entity: Entity) -> bool {
        if entity.score.is_nan() {
            return false;
        }
        match self.entries.entry(entity.text) {
            Entry::Vacant(slot) => {
                let _ = slot.insert(EntityLabel {
                    label: entity.label,
                    score: entity.score,
                });
                true
            }
            Entry::Occupied(mut slot) => {
                if entity.score > slot.get().score {
                    let _ = slot.insert(EntityLabel {
                        label: entity.label,
                        score: entity.score,
                    });
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Merge every occurrence in order.
    pub fn merge_all(&mut self, entities: impl IntoIterator<Item = Entity>) {
        for entity in entities {
            let _ = self.merge(entity);
        }
    }

    /// Look up the winning label for a surface form.
    #[must_use]
    pub fn get(&self, text: &str) -> Option<&EntityLabel> {
        self.entries.get(text)
    }

    /// Number of distinct surface forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entity has been merged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(surface form, winner)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityLabel)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten into presentation rows, preserving first-seen order.
    #[must_use]
    pub fn to_records(&self) -> Vec<EntityRecord> {
        self.entries
            .iter()
            .map(|(text, winner)| EntityRecord {
                entity: text.clone(),
                label: winner.label.clone(),
                score: winner.score,
            })
            .collect()
    }
}

impl FromIterator<Entity> for EntityMap {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut map = Self::new();
        map.merge_all(iter);
        map
    }
}
