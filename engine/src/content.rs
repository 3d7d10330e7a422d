use crate::build::aggregate;
use crate::catalog::Compendium;
use crate::record::RawFile;

const BUILTIN_MONSTERS: &[(&str, &str)] = &[
    (
        "adult-red-dragon.json",
        include_str!("../content/monsters/adult-red-dragon.json"),
    ),
    ("commoner.json", include_str!("../content/monsters/commoner.json")),
    ("flind.json", include_str!("../content/monsters/flind.json")),
    ("goblin.json", include_str!("../content/monsters/goblin.json")),
    ("kobold.json", include_str!("../content/monsters/kobold.json")),
    ("orc.json", include_str!("../content/monsters/orc.json")),
    ("owlbear.json", include_str!("../content/monsters/owlbear.json")),
    (
        "wandering-shade.json",
        include_str!("../content/monsters/wandering-shade.json"),
    ),
];

/// A small sample bestiary compiled into the crate, in file-name order.
pub fn builtin_monsters() -> Vec<RawFile> {
    BUILTIN_MONSTERS
        .iter()
        .map(|(file, contents)| RawFile::new(*file, *contents))
        .collect()
}

pub fn builtin_compendium() -> Compendium {
    Compendium::from_records(aggregate(&builtin_monsters()))
}
