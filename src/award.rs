use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::search::EnemyBuildings;
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongestRoadConfig {
    /// Shortest road that can hold the award.
    pub min_length: usize,
    pub enemy_buildings: EnemyBuildings,
}

impl Default for LongestRoadConfig {
    fn default() -> Self {
        Self {
            min_length: 5,
            enemy_buildings: EnemyBuildings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardChange {
    pub previous: Option<Color>,
    pub current: Option<Color>,
}

impl AwardChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Holder of the Longest Road award and the lengths it was decided on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestRoad {
    holder: Option<Color>,
    length: usize,
    lengths: BTreeMap<Color, usize>,
}

impl LongestRoad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holder(&self) -> Option<Color> {
        self.holder
    }

    /// Length of the holder's road, 0 when nobody holds the award.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn lengths(&self) -> &BTreeMap<Color, usize> {
        &self.lengths
    }

    /// Re-decides the award from fresh per-color lengths.
    ///
    /// The current holder keeps the award while tied for the best length.
    /// Otherwise a single best color takes it; a tie between other colors, or
    /// no color reaching `min_length`, leaves it unassigned.
    pub fn update<I>(&mut self, lengths: I, config: &LongestRoadConfig) -> AwardChange
    where
        I: IntoIterator<Item = (Color, usize)>,
    {
        self.lengths = lengths.into_iter().collect();
        let previous = self.holder;

        let best_len = self
            .lengths
            .values()
            .copied()
            .filter(|&len| len >= config.min_length)
            .max();

        let current = best_len.and_then(|best_len| {
            let leaders: Vec<Color> = self
                .lengths
                .iter()
                .filter(|&(_, &len)| len == best_len)
                .map(|(&color, _)| color)
                .collect();
            match previous {
                Some(holder) if leaders.contains(&holder) => Some(holder),
                _ if leaders.len() == 1 => Some(leaders[0]),
                _ => None,
            }
        });

        self.holder = current;
        self.length = current
            .and_then(|color| self.lengths.get(&color).copied())
            .unwrap_or(0);

        let change = AwardChange { previous, current };
        if change.changed() {
            info!(?previous, ?current, length = self.length, "longest road changed hands");
        }
        change
    }
}
