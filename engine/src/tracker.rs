use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::catalog::Compendium;
use crate::record::{Ability, MonsterRecord};
use crate::Dice;

pub const BLANK_ROW_NAME: &str = "Custom Entry";

static HP_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());
static HP_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([+-])?([0-9]+)$").unwrap());

/// Current hit points of a tracker row; never below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitPoints {
    pub current: i32,
}

impl HitPoints {
    /// Starting HP from a stat line such as `"7 (2d6)"`: the first run of digits,
    /// or 0 when there is none.
    pub fn from_stat(text: Option<&str>) -> Self {
        let current = text
            .and_then(|t| HP_DIGITS_RE.find(t))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        Self { current }
    }

    /// Applies a typed entry: `+N`/`-N` adjust, `N` sets, anything else is
    /// ignored. Returns the resulting HP.
    pub fn apply_entry(&mut self, entry: &str) -> i32 {
        let Some(caps) = HP_ENTRY_RE.captures(entry.trim()) else {
            return self.current;
        };
        let Ok(amount) = caps[2].parse::<i32>() else {
            return self.current;
        };
        let next = match caps.get(1).map(|sign| sign.as_str()) {
            Some("-") => self.current.saturating_sub(amount),
            Some(_) => self.current.saturating_add(amount),
            None => amount,
        };
        self.current = next.max(0);
        self.current
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerRow {
    pub id: u32,
    pub name: String,
    /// Combined-file reference of the monster this row was added from.
    pub file: Option<String>,
    pub initiative: i32,
    pub armor_class: String,
    pub hit_points: HitPoints,
    pub notes: String,
}

/// Initiative order for one encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tracker {
    rows: Vec<TrackerRow>,
    next_id: u32,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[TrackerRow] {
        &self.rows
    }

    pub fn row_mut(&mut self, id: u32) -> Option<&mut TrackerRow> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// Appends a row for `monster`. Adding the same monster again adds
    /// another copy.
    pub fn add_monster(&mut self, monster: &MonsterRecord) -> u32 {
        let armor_class = monster
            .field_text("ac")
            .filter(|ac| !ac.is_empty())
            .unwrap_or_else(|| "?".to_string());
        let hit_points = HitPoints::from_stat(monster.field_text("hp").as_deref());
        self.push(TrackerRow {
            id: 0,
            name: monster.display_name().to_string(),
            file: Some(monster.file().to_string()),
            initiative: 0,
            armor_class,
            hit_points,
            notes: String::new(),
        })
    }

    pub fn add_blank(&mut self) -> u32 {
        self.push(TrackerRow {
            id: 0,
            name: BLANK_ROW_NAME.to_string(),
            file: None,
            initiative: 0,
            armor_class: String::new(),
            hit_points: HitPoints::default(),
            notes: String::new(),
        })
    }

    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    /// Rolls d20 + DEX modifier for every row backed by a known monster. Rows
    /// without one keep their initiative.
    pub fn roll_initiative(&mut self, compendium: &Compendium, dice: &mut Dice) {
        for row in &mut self.rows {
            let Some(monster) = row.file.as_deref().and_then(|f| compendium.find(f)) else {
                continue;
            };
            let dex_mod = monster.abilities().modifier(Ability::Dex).unwrap_or(0);
            let roll = dice.d20();
            row.initiative = roll + dex_mod;
            debug!(row = row.id, name = %row.name, roll, dex_mod, "rolled initiative");
        }
    }

    /// Highest initiative first; ties keep their current order.
    pub fn sort_by_initiative(&mut self) {
        self.rows.sort_by(|a, b| b.initiative.cmp(&a.initiative));
    }

    fn push(&mut self, mut row: TrackerRow) -> u32 {
        self.next_id += 1;
        row.id = self.next_id;
        self.rows.push(row);
        self.next_id
    }
}

/// Which tracker row is highlighted and which monster's stat block is pinned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    locked_row: Option<u32>,
    locked_monster: Option<String>,
}

impl SelectionState {
    pub fn locked_row(&self) -> Option<u32> {
        self.locked_row
    }

    pub fn locked_monster(&self) -> Option<&str> {
        self.locked_monster.as_deref()
    }

    /// Clicking the locked row unlocks it, and its monster when it has one;
    /// clicking another row locks it, and its monster when it has one. Blank
    /// rows never touch the pinned monster.
    pub fn toggle_row(&mut self, row: &TrackerRow) {
        if self.locked_row == Some(row.id) {
            self.locked_row = None;
            if row.file.is_some() {
                self.locked_monster = None;
            }
            return;
        }
        self.locked_row = Some(row.id);
        if let Some(file) = &row.file {
            self.locked_monster = Some(file.clone());
        }
    }

    /// Pins a monster picked from the list; the row highlight is untouched.
    pub fn lock_monster(&mut self, file: impl Into<String>) {
        self.locked_monster = Some(file.into());
    }

    /// Stat block to show: the pinned monster, else whatever is hovered.
    pub fn stat_block_target<'a>(&'a self, hovered: Option<&'a str>) -> Option<&'a str> {
        self.locked_monster.as_deref().or(hovered)
    }
}
