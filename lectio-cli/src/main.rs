//! lectio - reading progress tracker CLI
//!
//! Log readings, page through them and print statistics from the terminal.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, Utc};
use clap::{Parser, Subcommand};
use lectio_core::format::{format_chapters, format_day, format_days, parse_day};
use lectio_core::interchange::{export_json, import_json};
use lectio_core::{Canon, Config, Database, Entry, Journal, StatisticsRecord};
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(name = "lectio")]
#[command(about = "Track reading progress through the 66 books")]
#[command(version)]
struct Args {
    /// Database file (default: $XDG_DATA_HOME/lectio/entries.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show reading statistics
    Stats {
        /// Export format (md = markdown, json = JSON)
        #[arg(long)]
        export: Option<String>,
    },
    /// List entries, newest first
    List {
        /// Page to show (out-of-range pages are clamped)
        #[arg(long, default_value_t = 1)]
        page: i64,
    },
    /// Show a single entry
    Show { id: i64 },
    /// Log a reading
    Add {
        /// Day of the reading, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Book name or index (0-65)
        #[arg(long)]
        book: String,
        /// Starting chapter
        #[arg(long)]
        chapter: i64,
    },
    /// Change an entry; omitted fields keep their value
    Edit {
        id: i64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        book: Option<String>,
        #[arg(long)]
        chapter: Option<i64>,
    },
    /// Delete an entry
    Remove { id: i64 },
    /// List the books and their chapter counts
    Books,
    /// Replace all entries with those in a JSON export
    Import { file: PathBuf },
    /// Write all entries as JSON (stdout when no file is given)
    Export { file: Option<PathBuf> },
    /// Fill an empty database with sample entries
    Seed,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = lectio_core::logging::init(&config.logging).ok();
    tracing::info!(command = ?args.command, "lectio starting");

    let result = run(args, &config);
    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    result
}

fn run(args: Args, config: &Config) -> Result<()> {
    let offset = config.analytics.day_offset()?;

    let db_path = args.db.unwrap_or_else(Config::database_path);
    tracing::info!(path = %db_path.display(), "Opening database");
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    db.migrate().context("failed to run migrations")?;
    let journal = Journal::new(db).with_day_offset(offset);

    match args.command {
        Command::Stats { export } => {
            let stats = journal.statistics().map_err(describe)?;
            match export.as_deref() {
                Some("json") => println!("{}", serde_json::to_string_pretty(&stats)?),
                Some("md") => print_markdown(&stats, journal.canon()),
                Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
                None => print_terminal(&stats, journal.canon()),
            }
        }
        Command::List { page } => {
            let page = journal.list(page).map_err(describe)?;
            if page.total_entries == 0 {
                println!("No entries yet.");
                return Ok(());
            }
            for entry in &page.items {
                println!("{}", entry_line(entry, journal.canon(), &offset));
            }
            println!();
            println!(
                "Page {} of {} ({} entries)",
                page.page, page.total_pages, page.total_entries
            );
        }
        Command::Show { id } => {
            let entry = journal.get(id).map_err(describe)?;
            println!("Entry #{}", entry.id);
            println!("  Date:     {}", format_day(entry.date, &offset));
            println!("  Start:    {}", entry.start.label(journal.canon()));
            println!("  Division: {}", entry.start.division().as_str());
        }
        Command::Add {
            date,
            book,
            chapter,
        } => {
            let payload = json!({
                "date": resolve_date(date.as_deref(), &offset)?,
                "start": {
                    "book": resolve_book(journal.canon(), &book)?,
                    "chapter": chapter,
                },
            });
            let entry = journal.create(&payload).map_err(describe)?;
            println!("Added {}", entry_line(&entry, journal.canon(), &offset).trim());
        }
        Command::Edit {
            id,
            date,
            book,
            chapter,
        } => {
            let current = journal.get(id).map_err(describe)?;
            let date = match date {
                Some(raw) => resolve_date(Some(&raw), &offset)?,
                None => current.date,
            };
            let book = match book {
                Some(raw) => resolve_book(journal.canon(), &raw)?,
                None => json!(current.start.section as i64),
            };
            let payload = json!({
                "date": date,
                "start": {
                    "book": book,
                    "chapter": chapter.unwrap_or(i64::from(current.start.chapter)),
                },
            });
            let entry = journal.update(id, &payload).map_err(describe)?;
            println!("Updated {}", entry_line(&entry, journal.canon(), &offset).trim());
        }
        Command::Remove { id } => {
            journal.delete(id).map_err(describe)?;
            println!("Removed entry #{}", id);
        }
        Command::Books => {
            for (index, section) in journal.canon().sections().iter().enumerate() {
                println!(
                    "{:>2}  {:<16} {:>3} chapters",
                    index, section.name, section.chapter_count
                );
            }
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let entries = import_json(journal.canon(), &text).map_err(describe)?;
            journal.import(&entries).map_err(describe)?;
            println!("Imported {} entries", entries.len());
        }
        Command::Export { file } => {
            let entries = journal.all().map_err(describe)?;
            let text = export_json(&entries)?;
            match file {
                Some(path) => {
                    std::fs::write(&path, text)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Exported {} entries to {}", entries.len(), path.display());
                }
                None => println!("{}", text),
            }
        }
        Command::Seed => match journal.seed_if_empty().map_err(describe)? {
            0 => println!("Database already has entries; nothing seeded"),
            n => println!("Seeded {} sample entries", n),
        },
    }

    Ok(())
}

/// Turn validation failures into one message per line.
fn describe(err: lectio_core::Error) -> anyhow::Error {
    if let Some(messages) = err.validation_messages() {
        return anyhow!(messages.join("\n"));
    }
    err.into()
}

/// A book argument is either an index or a section name.
///
/// Indices pass through unchecked so range problems surface as validation
/// messages.
fn resolve_book(canon: &Canon, raw: &str) -> Result<Value> {
    if let Ok(index) = raw.trim().parse::<i64>() {
        return Ok(json!(index));
    }
    canon
        .find(raw)
        .map(|index| json!(index))
        .ok_or_else(|| anyhow!("Unknown book: {}. Run `lectio books` for the list", raw))
}

fn resolve_date(raw: Option<&str>, offset: &FixedOffset) -> Result<i64> {
    let today;
    let text = match raw {
        Some(text) => text,
        None => {
            today = Utc::now()
                .with_timezone(offset)
                .format("%Y-%m-%d")
                .to_string();
            &today
        }
    };
    parse_day(text, offset)
        .ok_or_else(|| anyhow!("Invalid date: {}. Use YYYY-MM-DD (e.g., 2025-11-01)", text))
}

fn entry_line(entry: &Entry, canon: &Canon, offset: &FixedOffset) -> String {
    format!(
        "  #{:<4} {}  {}",
        entry.id,
        format_day(entry.date, offset),
        entry.start.label(canon)
    )
}

fn print_terminal(stats: &StatisticsRecord, canon: &Canon) {
    println!();
    println!("Reading Statistics");
    println!("{}", "─".repeat(40));

    if stats.total_entries == 0 {
        println!("  No entries yet.");
        println!();
        return;
    }

    println!("  Entries:          {}", stats.total_entries);
    println!(
        "  Chapters read:    {}",
        format_chapters(stats.total_chapters_read)
    );
    println!(
        "  Books touched:    {} of {}",
        stats.unique_sections_touched,
        canon.len()
    );
    println!("  First division:   {}", stats.first_division_count);
    println!("  Second division:  {}", stats.second_division_count);
    println!(
        "  Longest streak:   {}",
        format_days(stats.longest_streak_days)
    );
    println!();
}

fn print_markdown(stats: &StatisticsRecord, canon: &Canon) {
    println!("# Reading Statistics");
    println!();

    if stats.total_entries == 0 {
        println!("*No entries yet.*");
        return;
    }

    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Entries | {} |", stats.total_entries);
    println!(
        "| Chapters Read | {} |",
        format_chapters(stats.total_chapters_read)
    );
    println!(
        "| Books Touched | {} of {} |",
        stats.unique_sections_touched,
        canon.len()
    );
    println!("| First Division | {} |", stats.first_division_count);
    println!("| Second Division | {} |", stats.second_division_count);
    println!(
        "| Longest Streak | {} |",
        format_days(stats.longest_streak_days)
    );
}
