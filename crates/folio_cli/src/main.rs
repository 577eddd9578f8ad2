//! `folio` command-line shell.
//!
//! # Responsibility
//! - Drive `folio_core` from a terminal: theme preference, journal listing,
//!   the experience timeline, and opening detail views.
//! - Keep output line-oriented and stable for scripts and tests.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use folio_core::db::{open_db, Connection};
use folio_core::{
    filter_and_sort, init_logging, item_action, load_catalog, markdown_to_plain_text,
    BodyOverflow, Catalog, Category, ConfigOverrides, ContentItem, ContentKind, FolioConfig,
    InMemoryPreferenceRepository, ItemAction, Lightbox, LightboxKey, Project, RootClassList,
    Selectable, SelectionState, SortOrder, SqlitePreferenceRepository, Theme, ThemeStore,
};
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "folio", version, about = "Portfolio view-state shell")]
struct Cli {
    /// Directory holding the preference database and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read or change the display theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// List journal items for a tab
    Journal {
        /// Content catalog (JSON)
        #[arg(long)]
        catalog: PathBuf,

        #[arg(long, default_value = "all")]
        category: Category,

        #[arg(long, default_value = "newest")]
        sort: SortOrder,

        /// Print items as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print the experience timeline in authored order
    Experience {
        /// Content catalog (JSON)
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Open the detail view of one item
    Open {
        /// Content catalog (JSON)
        #[arg(long)]
        catalog: PathBuf,

        /// note|book|game|channel|project
        kind: String,

        id: String,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme (default)
    Get,
    /// Persist a theme
    Set { theme: Theme },
    /// Flip between light and dark
    Toggle,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = FolioConfig::resolve(ConfigOverrides {
        data_dir: cli.data_dir.clone(),
        log_level: cli.log_level.clone(),
    })
    .context("failed to resolve configuration")?;

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    match cli.command {
        Commands::Theme { action } => cmd_theme(&config, action.unwrap_or(ThemeAction::Get)),
        Commands::Journal {
            catalog,
            category,
            sort,
            json,
        } => cmd_journal(&catalog, category, sort, json),
        Commands::Experience { catalog } => cmd_experience(&catalog),
        Commands::Open { catalog, kind, id } => cmd_open(&catalog, &kind, &id),
    }
}

fn cmd_theme(config: &FolioConfig, action: ThemeAction) -> Result<()> {
    let conn = match open_preferences(config) {
        Ok(conn) => conn,
        Err(err) if matches!(action, ThemeAction::Get) => {
            // Reading never fails: unusable storage reads as the default.
            warn!("event=theme_read module=cli status=storage_unavailable error={err:#}");
            let store = ThemeStore::load(InMemoryPreferenceRepository::new(), RootClassList::new());
            print_theme(store.get_theme());
            return Ok(());
        }
        Err(err) => return Err(err),
    };
    let mut store = ThemeStore::load(SqlitePreferenceRepository::new(&conn), RootClassList::new());

    let theme = match action {
        ThemeAction::Get => store.get_theme(),
        ThemeAction::Set { theme } => {
            store.set_theme(theme).context("failed to save theme")?;
            theme
        }
        ThemeAction::Toggle => store.toggle_theme().context("failed to save theme")?,
    };

    print_theme(theme);
    Ok(())
}

fn open_preferences(config: &FolioConfig) -> Result<Connection> {
    std::fs::create_dir_all(config.data_dir()).with_context(|| {
        format!(
            "failed to create data directory `{}`",
            config.data_dir().display()
        )
    })?;
    open_db(config.db_path()).context("failed to open preference database")
}

fn print_theme(theme: Theme) {
    println!("{theme}");
    println!("icon={}", theme.icon().as_str());
}

fn cmd_journal(catalog_path: &Path, category: Category, sort: SortOrder, json: bool) -> Result<()> {
    let catalog = read_catalog(catalog_path)?;
    let items = filter_and_sort(&catalog, category, sort);

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    for item in &items {
        println!(
            "{}\t{}\t{}\t{}",
            item.key(),
            item.sort_date(),
            item.title(),
            item.subtitle()
        );
    }
    Ok(())
}

fn cmd_experience(catalog_path: &Path) -> Result<()> {
    let catalog = read_catalog(catalog_path)?;

    for entry in &catalog.experiences {
        println!("{}\t{}\t{}", entry.period(), entry.role, entry.company);
        for line in &entry.description {
            println!("  - {line}");
        }
        if !entry.skills.is_empty() {
            println!("  skills: {}", entry.skills.join(", "));
        }
        if let Some(link) = &entry.link {
            println!("  link: {link}");
        }
    }
    Ok(())
}

fn cmd_open(catalog_path: &Path, kind: &str, id: &str) -> Result<()> {
    let catalog = read_catalog(catalog_path)?;
    let target = resolve_selectable(&catalog, kind, id)?;

    if let Selectable::Item(item) = &target {
        if let ItemAction::OpenLink(link) = item_action(item) {
            println!("link={link}");
            return Ok(());
        }
    }

    let body = BodyOverflow::new();
    let mut selection = SelectionState::new(&body);
    selection.select(target);
    info!("event=detail_open module=cli status=ok");

    if let Some(selected) = selection.selected() {
        println!("scroll={}", overflow_label(&body));
        print_detail(selected);
    }

    selection.close();
    println!("scroll={}", overflow_label(&body));
    Ok(())
}

fn read_catalog(path: &Path) -> Result<Catalog> {
    load_catalog(path).with_context(|| format!("failed to load catalog `{}`", path.display()))
}

fn resolve_selectable(catalog: &Catalog, kind: &str, id: &str) -> Result<Selectable> {
    if kind.eq_ignore_ascii_case("project") {
        return match catalog.find_project(id) {
            Some(project) => Ok(Selectable::Project(project.clone())),
            None => bail!("project `{id}` not found"),
        };
    }

    let Some(kind) = ContentKind::parse(kind) else {
        bail!("unknown kind `{kind}`; expected note|book|game|channel|project");
    };
    catalog
        .find_item(kind, id)
        .map(Selectable::Item)
        .with_context(|| format!("{kind} `{id}` not found"))
}

fn overflow_label(body: &BodyOverflow) -> &'static str {
    if body.is_locked() {
        "hidden"
    } else {
        "unset"
    }
}

fn print_detail(selected: &Selectable) {
    println!("# {}", selected.title());
    match selected {
        Selectable::Item(ContentItem::Note(note)) => {
            println!("{} | {}", note.date, note.read_time);
            if !note.tags.is_empty() {
                println!("tags: {}", note.tags.join(", "));
            }
            println!();
            println!("{}", note.summary);
            if let Some(takes) = &note.takes {
                println!();
                println!("{}", markdown_to_plain_text(takes));
            }
        }
        Selectable::Item(other) => println!("{}", other.subtitle()),
        Selectable::Project(project) => print_project(project),
    }
}

fn print_project(project: &Project) {
    println!("{}", project.tagline);
    println!("role: {}", project.role);
    if let Some(sponsor) = &project.sponsor {
        println!("sponsor: {sponsor}");
    }
    if !project.tech_stack.is_empty() {
        println!("stack: {}", project.tech_stack.join(", "));
    }
    println!();
    println!("{}", project.about);
    for section in &project.technical_sections {
        println!();
        println!("## {}", section.title);
        println!("{}", section.content);
    }
    if let Some(demo) = &project.links.demo {
        println!("{}: {demo}", project.demo_label());
    }
    if let Some(repo) = &project.links.repo {
        println!("repo: {repo}");
    }
    print_gallery(project);
}

/// Steps the lightbox through the whole gallery once.
fn print_gallery(project: &Project) {
    let gallery = &project.media.gallery;
    let mut lightbox = Lightbox::for_project(project);
    lightbox.open(0);

    while let Some(index) = lightbox.index() {
        let entry = &gallery[index];
        match &entry.caption {
            Some(caption) => println!(
                "gallery[{index}] {} {} {caption}",
                entry.media_type.as_str(),
                entry.url
            ),
            None => println!("gallery[{index}] {} {}", entry.media_type.as_str(), entry.url),
        }
        lightbox.handle_key(LightboxKey::ArrowRight);
        if lightbox.index() == Some(0) {
            lightbox.handle_key(LightboxKey::Escape);
        }
    }
}
