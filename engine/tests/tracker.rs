use bestiary_engine::content::builtin_compendium;
use bestiary_engine::tracker::BLANK_ROW_NAME;
use bestiary_engine::{Dice, HitPoints, SelectionState, Tracker};

#[test]
fn monster_row_takes_name_ac_and_starting_hp() {
    let compendium = builtin_compendium();
    let goblin = compendium.find("goblin.json").unwrap();
    let mut tracker = Tracker::new();
    let id = tracker.add_monster(goblin);
    let row = &tracker.rows()[0];
    assert_eq!(row.id, id);
    assert_eq!(row.name, "Goblin");
    assert_eq!(row.armor_class, "15 (leather armor, shield)");
    assert_eq!(row.hit_points.current, 7);
    assert_eq!(row.initiative, 0);
    assert_eq!(row.file.as_deref(), Some("goblin.json"));
}

#[test]
fn hp_without_digits_starts_at_zero() {
    assert_eq!(HitPoints::from_stat(Some("unknown")).current, 0);
    assert_eq!(HitPoints::from_stat(None).current, 0);
    assert_eq!(HitPoints::from_stat(Some("about 45 (6d12)")).current, 45);
}

#[test]
fn adding_twice_gives_two_rows() {
    let compendium = builtin_compendium();
    let orc = compendium.find("orc.json").unwrap();
    let mut tracker = Tracker::new();
    let first = tracker.add_monster(orc);
    let second = tracker.add_monster(orc);
    assert_ne!(first, second);
    assert_eq!(tracker.rows().len(), 2);
}

#[test]
fn hp_entries_adjust_set_and_clamp() {
    let mut hp = HitPoints { current: 10 };
    assert_eq!(hp.apply_entry("+5"), 15);
    assert_eq!(hp.apply_entry("-3"), 12);
    assert_eq!(hp.apply_entry(" 20 "), 20);
    assert_eq!(hp.apply_entry("-30"), 0);
    assert_eq!(hp.apply_entry("abc"), 0);
    assert_eq!(hp.apply_entry("+"), 0);
    assert_eq!(hp.apply_entry("4"), 4);
    assert_eq!(hp.apply_entry("1.5"), 4);
    assert_eq!(hp.apply_entry("--2"), 4);
    assert_eq!(hp.apply_entry("+ 2"), 4);
    assert_eq!(hp.apply_entry("3hp"), 4);
}

#[test]
fn rolling_uses_dex_modifier_and_skips_blank_rows() {
    let compendium = builtin_compendium();
    let mut tracker = Tracker::new();
    tracker.add_monster(compendium.find("kobold.json").unwrap());
    let blank = tracker.add_blank();
    tracker.row_mut(blank).unwrap().initiative = 11;

    tracker.roll_initiative(&compendium, &mut Dice::from_seed(7));

    // kobold DEX 15 → +2
    let kobold = &tracker.rows()[0];
    assert!((3..=22).contains(&kobold.initiative));
    let blank_row = &tracker.rows()[1];
    assert_eq!(blank_row.name, BLANK_ROW_NAME);
    assert_eq!(blank_row.initiative, 11);
}

#[test]
fn same_seed_rolls_the_same() {
    let compendium = builtin_compendium();
    let roll = |seed| {
        let mut tracker = Tracker::new();
        tracker.add_monster(compendium.find("goblin.json").unwrap());
        tracker.add_monster(compendium.find("owlbear.json").unwrap());
        tracker.roll_initiative(&compendium, &mut Dice::from_seed(seed));
        tracker
    };
    assert_eq!(roll(99), roll(99));
}

#[test]
fn sort_is_descending_and_stable() {
    let mut tracker = Tracker::new();
    let a = tracker.add_blank();
    let b = tracker.add_blank();
    let c = tracker.add_blank();
    tracker.row_mut(a).unwrap().initiative = 5;
    tracker.row_mut(b).unwrap().initiative = 12;
    tracker.row_mut(c).unwrap().initiative = 5;
    tracker.sort_by_initiative();
    let order: Vec<_> = tracker.rows().iter().map(|r| r.id).collect();
    assert_eq!(order, [b, a, c]);
}

#[test]
fn remove_drops_only_that_row() {
    let mut tracker = Tracker::new();
    let a = tracker.add_blank();
    let b = tracker.add_blank();
    assert!(tracker.remove(a));
    assert!(!tracker.remove(a));
    assert_eq!(tracker.rows().len(), 1);
    assert_eq!(tracker.rows()[0].id, b);
}

#[test]
fn selection_toggles_and_pins_stat_block() {
    let compendium = builtin_compendium();
    let mut tracker = Tracker::new();
    let goblin_row = tracker.add_monster(compendium.find("goblin.json").unwrap());
    let blank_row = tracker.add_blank();
    let mut selection = SelectionState::default();

    assert_eq!(selection.stat_block_target(Some("orc.json")), Some("orc.json"));

    let row = tracker.rows()[0].clone();
    assert_eq!(row.id, goblin_row);
    selection.toggle_row(&row);
    assert_eq!(selection.locked_row(), Some(goblin_row));
    assert_eq!(selection.stat_block_target(Some("orc.json")), Some("goblin.json"));

    // a blank row takes the highlight but leaves the stat block pinned
    let blank = tracker.rows()[1].clone();
    assert_eq!(blank.id, blank_row);
    selection.toggle_row(&blank);
    assert_eq!(selection.locked_row(), Some(blank_row));
    assert_eq!(selection.locked_monster(), Some("goblin.json"));

    // unlocking the blank row keeps the pinned monster
    selection.toggle_row(&blank);
    assert_eq!(selection.locked_row(), None);
    assert_eq!(selection.locked_monster(), Some("goblin.json"));

    selection.lock_monster("orc.json");
    assert_eq!(selection.locked_row(), None);
    assert_eq!(selection.stat_block_target(None), Some("orc.json"));
}

#[test]
fn unlocking_a_monster_row_unpins_its_stat_block() {
    let compendium = builtin_compendium();
    let mut tracker = Tracker::new();
    tracker.add_monster(compendium.find("kobold.json").unwrap());
    let row = tracker.rows()[0].clone();
    let mut selection = SelectionState::default();

    selection.toggle_row(&row);
    assert_eq!(selection.locked_monster(), Some("kobold.json"));
    selection.toggle_row(&row);
    assert_eq!(selection, SelectionState::default());
    assert_eq!(selection.stat_block_target(Some("orc.json")), Some("orc.json"));
}
