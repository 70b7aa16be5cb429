//! Routepick - location picking for route plans
//!
//! Usage:
//!   routepick                 # Interactive picking session (default)
//!   routepick pick --demo sample
//!   routepick skills          # List the skill catalog
//!   routepick demo show sample
//!   routepick export sample --format json

mod interactive;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use routepick_core::prelude::*;
use routepick_core::view::ids;

use crate::interactive::{EntryPoint, PickFlow, PrefilledSelection};

#[derive(Parser)]
#[command(name = "routepick")]
#[command(about = "Pick and classify locations for a route plan", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add locations interactively
    Pick(PickArgs),

    /// List the required-skill catalog
    Skills {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Inspect built-in demo data sets
    Demo(DemoArgs),

    /// Export a demo data set
    Export {
        /// Demo name
        name: String,
        /// Data set format
        #[arg(short, long, default_value = "toml")]
        format: DataFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage routepick.toml
    Config(ConfigArgs),
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum DataFormat {
    #[default]
    Toml,
    Json,
}

#[derive(Args, Default)]
struct PickArgs {
    /// Start from a demo data set
    #[arg(long)]
    demo: Option<String>,
    /// Coordinate as "lat,lng" (skips the coordinate prompt)
    #[arg(long, value_name = "LAT,LNG")]
    at: Option<String>,
    /// Address; implies a search entry
    #[arg(long)]
    address: Option<String>,
    /// Required skill (skips the skill prompt)
    #[arg(long)]
    skill: Option<String>,
    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
    /// Add a single location and exit
    #[arg(long)]
    once: bool,
    /// Output format for the final list
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Args)]
struct DemoArgs {
    #[command(subcommand)]
    command: DemoSubcommand,
}

#[derive(Subcommand)]
enum DemoSubcommand {
    /// List demo names
    List,
    /// Show a demo as the location list renders it
    Show {
        name: String,
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Print the config file in effect
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Configuration scope (global, project)
        #[arg(long, default_value = "project")]
        scope: String,
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routepick=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(command) => run_cli(command),
        None => run_pick(PickArgs::default()),
    }
}

fn run_cli(command: Commands) -> Result<()> {
    match command {
        Commands::Pick(args) => run_pick(args)?,
        Commands::Skills { format } => run_skills(format)?,
        Commands::Demo(args) => match args.command {
            DemoSubcommand::List => {
                for name in DemoCatalog.names() {
                    println!("{name}");
                }
            }
            DemoSubcommand::Show { name, format } => {
                let config = load_config()?;
                let mut coordinator = EditingCoordinator::new(InMemoryStore::new(), &config);
                coordinator.load_demo(&name)?;
                print_collection(coordinator.collection(), format)?;
            }
        },
        Commands::Export {
            name,
            format,
            output,
        } => run_export(&name, format, output)?,
        Commands::Config(args) => run_config(args)?,
    }
    Ok(())
}

fn load_config() -> Result<AppConfig> {
    ConfigStore::discover()?.load()
}

fn run_pick(args: PickArgs) -> Result<()> {
    let config = load_config()?;
    let mut coordinator = EditingCoordinator::new(InMemoryStore::new(), &config);

    if let Some(name) = args.demo.as_deref().or(config.default_demo.as_deref()) {
        coordinator
            .load_demo(name)
            .with_context(|| format!("Failed to load demo '{name}'"))?;
    }

    let prefilled = prefilled_from_args(&args, coordinator.catalog())?;

    loop {
        let result = PickFlow::new(&mut coordinator, prefilled.clone()).collect()?;
        tracing::debug!(?result, "Pick finished");

        println!();
        print_collection(coordinator.collection(), args.format)?;

        if args.once || (prefilled.yes && prefilled.coordinate.is_some()) {
            break;
        }
        let again = dialoguer::Confirm::new()
            .with_prompt("Add another location?")
            .default(false)
            .interact()?;
        if !again {
            break;
        }
    }
    Ok(())
}

fn prefilled_from_args(args: &PickArgs, catalog: &SkillCatalog) -> Result<PrefilledSelection> {
    let coordinate = args
        .at
        .as_deref()
        .map(str::parse::<Coordinates>)
        .transpose()?;
    let skill = args
        .skill
        .as_deref()
        .map(|value| catalog.parse(value))
        .transpose()?;
    let entry = match (&args.address, coordinate) {
        (Some(_), _) => Some(EntryPoint::Search),
        (None, Some(_)) => Some(EntryPoint::Map),
        (None, None) => None,
    };

    Ok(PrefilledSelection {
        entry,
        coordinate,
        address: args.address.clone(),
        skill,
        yes: args.yes,
    })
}

fn run_skills(format: OutputFormat) -> Result<()> {
    let catalog = load_config()?.catalog();
    match format {
        OutputFormat::Table => {
            for option in catalog.list() {
                let state = if option.disabled { " (disabled)" } else { "" };
                println!("{:<20} {}{}", option.value.as_str(), option.label, state);
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = catalog
                .list()
                .iter()
                .map(|option| {
                    serde_json::json!({
                        "value": option.value,
                        "label": option.label,
                        "disabled": option.disabled,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn run_export(name: &str, format: DataFormat, output: Option<PathBuf>) -> Result<()> {
    let mut store = InMemoryStore::new();
    store.load(&DemoCatalog.get(name)?);
    let data_set = store.export(name).stamped();

    let content = match format {
        DataFormat::Toml => data_set.to_toml_string()?,
        DataFormat::Json => data_set.to_json_string()?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write data set: {}", path.display()))?;
            println!("✓ Exported '{}' to {}", name, path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigSubcommand::Path => {
            println!("{}", ConfigStore::discover()?.config_path().display());
        }
        ConfigSubcommand::Show => {
            let config = load_config()?;
            print!("{}", routepick_core::config::to_toml(&config)?);
        }
        ConfigSubcommand::Init { scope, force } => {
            let store = ConfigStore::from_scope(parse_scope(&scope)?)?;
            if store.config_path().exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {}. Use --force to overwrite.",
                    store.config_path().display()
                );
            }
            store.save(&AppConfig::default())?;
            println!("✓ Wrote {}", store.config_path().display());
        }
    }
    Ok(())
}

fn parse_scope(s: &str) -> Result<ConfigScope> {
    match s.to_lowercase().as_str() {
        "global" | "g" => Ok(ConfigScope::Global),
        "project" | "p" => Ok(ConfigScope::Project),
        _ => anyhow::bail!("Unknown scope: {}. Use 'global' or 'project'", s),
    }
}

fn print_collection(collection: &LocationCollection, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(collection),
        OutputFormat::Json => {
            let rows: Vec<_> = collection
                .rows()
                .map(|row| {
                    let label = row.label();
                    serde_json::json!({
                        "testId": row.test_id(),
                        "id": row.id(),
                        "label": label.text,
                        "description": label.hover,
                        "requiredSkill": row.required_skill(),
                        "lat": row.location().lat,
                        "lng": row.location().lng,
                        "removeEnabled": row.remove_enabled(),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "testId": if collection.is_empty() { ids::LOCATION_LIST_EMPTY } else { ids::LOCATION_LIST },
                "rows": rows,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn print_table(collection: &LocationCollection) {
    if collection.is_empty() {
        println!("  {}", style(LocationCollection::EMPTY_TEXT).dim());
        return;
    }

    let depot_id = collection.depot().map(LocationEntry::id);
    for row in collection.rows() {
        let role = if Some(row.id()) == depot_id {
            style("depot").cyan().to_string()
        } else {
            "visit".to_string()
        };
        let removal = if row.remove_enabled() { "" } else { " (locked)" };
        println!(
            "  {:>4}  {:<5}  {:<23}  {:<18}  {}{}",
            row.id(),
            role,
            row.label().text,
            row.required_skill().label(),
            row.coordinate_text(),
            removal
        );
    }
}
