use std::collections::BTreeMap;

/// Stat row for one level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelRow {
    /// Experience needed to leave this level.
    pub level_up_experience: u32,
    pub life_max: i32,
    pub thew_max: i32,
    pub mana_max: i32,
    pub attack: i32,
    pub attack2: i32,
    pub attack3: i32,
    pub defend: i32,
    pub defend2: i32,
    pub defend3: i32,
    pub evade: i32,
}

impl LevelRow {
    /// Field-wise `self − earlier`.
    pub fn delta_from(&self, earlier: &LevelRow) -> LevelRow {
        LevelRow {
            level_up_experience: self.level_up_experience,
            life_max: self.life_max - earlier.life_max,
            thew_max: self.thew_max - earlier.thew_max,
            mana_max: self.mana_max - earlier.mana_max,
            attack: self.attack - earlier.attack,
            attack2: self.attack2 - earlier.attack2,
            attack3: self.attack3 - earlier.attack3,
            defend: self.defend - earlier.defend,
            defend2: self.defend2 - earlier.defend2,
            defend3: self.defend3 - earlier.defend3,
            evade: self.evade - earlier.evade,
        }
    }
}

/// Per-level stat rows keyed by level, starting at 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelTable {
    rows: BTreeMap<u32, LevelRow>,
}

impl LevelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from consecutive rows, the first being level 1.
    pub fn from_rows(rows: impl IntoIterator<Item = LevelRow>) -> Self {
        Self {
            rows: (1u32..).zip(rows).collect(),
        }
    }

    pub fn insert(&mut self, level: u32, row: LevelRow) {
        self.rows.insert(level, row);
    }

    pub fn row(&self, level: u32) -> Option<&LevelRow> {
        let row = self.rows.get(&level);
        if row.is_none() {
            tracing::warn!(level, "level missing from level table");
        }
        row
    }

    /// Highest tabulated level, 0 for an empty table.
    pub fn max_level(&self) -> u32 {
        self.rows.keys().next_back().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First level whose threshold exceeds `experience`.
    ///
    /// Returns one past [`max_level`](Self::max_level) when every threshold
    /// is already met.
    pub fn level_for_experience(&self, experience: u32) -> u32 {
        self.rows
            .iter()
            .find(|(_, row)| row.level_up_experience > experience)
            .map(|(level, _)| *level)
            .unwrap_or(self.max_level() + 1)
    }
}
