use anyhow::{bail, Context};
use bestiary_engine::{
    build, catalog, content, record, store, Compendium, Config, Dice, FilterCriteria, IndexEntry,
    MonsterRecord, Tracker,
};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Args)]
struct Input {
    /// Combined monsters file to load (defaults to the configured one)
    #[arg(long)]
    combined: Option<PathBuf>,
    /// Use the sample bestiary compiled into the binary
    #[arg(long, conflicts_with = "combined")]
    builtin: bool,
}

#[derive(Subcommand)]
enum Cmd {
    /// Merge the per-monster JSON files into the combined file
    Build {
        /// Directory holding one JSON file per monster
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Where to write the combined file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write the name/file index of the per-monster JSON files
    Index {
        /// Directory holding one JSON file per monster
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Where to write the index
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List monsters, grouped by challenge rating
    List {
        #[command(flatten)]
        input: Input,
        /// Case-insensitive name search
        #[arg(long, default_value = "")]
        query: String,
        /// Creature type to include (repeatable)
        #[arg(long = "type")]
        types: Vec<String>,
        /// Challenge rating to include, e.g. 1/4 (repeatable)
        #[arg(long = "cr")]
        challenge_ratings: Vec<String>,
        /// Source tag to include, e.g. monster-manual (repeatable)
        #[arg(long = "source")]
        sources: Vec<String>,
        /// One line per monster, no group headings
        #[arg(long, default_value_t = false)]
        flat: bool,
        /// Print the matches as a JSON name/file list
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show one monster by file name
    Show {
        #[command(flatten)]
        input: Input,
        /// File reference, e.g. goblin.json
        file: String,
        /// Print the full record JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the values available as filters
    Facets {
        #[command(flatten)]
        input: Input,
    },
    /// Add monsters to an initiative tracker, roll and sort it
    Track {
        #[command(flatten)]
        input: Input,
        /// File references to add; repeat a file to add several copies
        files: Vec<String>,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Number of blank custom rows to add
        #[arg(long, default_value_t = 0)]
        blank: u32,
    },
}

#[derive(Parser)]
#[command(name = "bestiary")]
#[command(about = "Monster compendium builder and browser")]
struct Cli {
    /// Config file (defaults to ./bestiary.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// More logging; repeat for debug output
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load_or_default(cli.config.as_deref())?;
    tracing::debug!(?config, "loaded config");

    match cli.cmd {
        Cmd::Build { data_dir, output } => {
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
            let output = output.unwrap_or_else(|| data_dir.join(&config.combined_file));
            let files = read_sources(&config, &data_dir, &output)?;
            let records = build::aggregate(&files);
            store::write_combined(&output, &records)?;
            println!("Built {} monsters into {}", records.len(), output.display());
        }
        Cmd::Index { data_dir, output } => {
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
            let output = output.unwrap_or_else(|| data_dir.join(&config.index_file));
            let files = read_sources(&config, &data_dir, &output)?;
            let entries = build::build_index(&files);
            store::write_index(&output, &entries)?;
            println!("Generated {} with {} files", output.display(), entries.len());
        }
        Cmd::List {
            input,
            query,
            types,
            challenge_ratings,
            sources,
            flat,
            json,
        } => {
            let compendium = load(&config, &input)?;
            let criteria = FilterCriteria::default()
                .with_query(query)
                .with_types(types)
                .with_challenge_ratings(challenge_ratings)
                .with_sources(sources);
            let visible = compendium.filter(&criteria);
            if json {
                let entries: Vec<IndexEntry> = visible.iter().map(|m| m.index_entry()).collect();
                println!("{}", store::to_pretty_json(&entries)?);
            } else if flat {
                for m in &visible {
                    println!(
                        "{}\t{}\t{}\t{}",
                        m.display_name(),
                        m.creature_type().unwrap_or("-"),
                        m.challenge().display,
                        m.source().unwrap_or("Unknown")
                    );
                }
            } else {
                for group in catalog::group_by_challenge(&visible) {
                    println!("{}", group.heading);
                    for m in group.records {
                        println!("  {}", list_line(m));
                    }
                }
            }
        }
        Cmd::Show { input, file, json } => {
            let compendium = load(&config, &input)?;
            let Some(monster) = compendium.find(&file) else {
                bail!("monster '{}' not found", file);
            };
            if json {
                println!("{}", store::to_pretty_json(monster)?);
            } else {
                print_summary(monster);
            }
        }
        Cmd::Facets { input } => {
            let facets = load(&config, &input)?.facets();
            println!("types: {}", facets.types.join(", "));
            println!("challenge ratings: {}", facets.challenge_ratings.join(", "));
            let sources: Vec<String> = facets
                .sources
                .iter()
                .map(|s| format!("{} ({})", s.label, s.value))
                .collect();
            println!("sources: {}", sources.join(", "));
        }
        Cmd::Track {
            input,
            files,
            seed,
            blank,
        } => {
            let compendium = load(&config, &input)?;
            let mut tracker = Tracker::new();
            for file in &files {
                let monster = compendium
                    .find(file)
                    .with_context(|| format!("monster '{}' not found", file))?;
                tracker.add_monster(monster);
            }
            for _ in 0..blank {
                tracker.add_blank();
            }
            let mut dice = Dice::from_seed(seed);
            tracker.roll_initiative(&compendium, &mut dice);
            tracker.sort_by_initiative();
            println!("{:>4}  {:<24} {:>6} {:>4}", "Init", "Name", "AC", "HP");
            for row in tracker.rows() {
                println!(
                    "{:>4}  {:<24} {:>6} {:>4}",
                    row.initiative,
                    row.name,
                    short_ac(&row.armor_class),
                    row.hit_points.current
                );
            }
        }
    }
    Ok(())
}

fn read_sources(
    config: &Config,
    data_dir: &Path,
    output: &Path,
) -> anyhow::Result<Vec<record::RawFile>> {
    let mut exclude = config.generated_files().to_vec();
    // The output only shadows a source file when it is written into the data dir.
    let output_name = output.file_name().and_then(|n| n.to_str());
    if let Some(name) = output_name.filter(|_| writes_into(output, data_dir)) {
        exclude.push(name);
    }
    let files = store::read_record_dir(data_dir, &exclude)?;
    Ok(files)
}

fn writes_into(output: &Path, dir: &Path) -> bool {
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), dir.canonicalize()) {
        (Ok(parent), Ok(dir)) => parent == dir,
        _ => parent == dir,
    }
}

fn load(config: &Config, input: &Input) -> anyhow::Result<Compendium> {
    if input.builtin {
        return Ok(content::builtin_compendium());
    }
    let path = input
        .combined
        .clone()
        .unwrap_or_else(|| config.combined_path());
    store::load_compendium(&path).context("failed to load monsters; run `bestiary build` first")
}

fn list_line(m: &MonsterRecord) -> String {
    format!(
        "{} ({}, {})",
        m.display_name(),
        m.creature_type().unwrap_or("-"),
        m.source().map(catalog::format_source).unwrap_or_else(|| "Unknown".to_string())
    )
}

// "15 (leather armor, shield)" → "15"
fn short_ac(ac: &str) -> &str {
    ac.split_whitespace().next().unwrap_or("")
}

fn print_summary(m: &MonsterRecord) {
    println!("{}", m.display_name());
    let kind = [m.field_text("size"), m.creature_type().map(str::to_owned)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if !kind.is_empty() {
        println!("{}", kind);
    }
    for (label, key) in [("Armor Class", "ac"), ("Hit Points", "hp"), ("Speed", "speed")] {
        if let Some(value) = m.field_text(key) {
            println!("{}: {}", label, value);
        }
    }
    if !m.abilities().is_empty() {
        let scores: Vec<String> = m
            .abilities()
            .iter()
            .map(|(code, score)| format!("{} {}", code.to_uppercase(), record::format_score(score)))
            .collect();
        println!("{}", scores.join("  "));
    }
    println!("Challenge: {}", m.challenge().display);
    println!("Source: {}", m.source().unwrap_or("Unknown"));
}
