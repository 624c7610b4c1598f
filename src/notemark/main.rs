use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use notemark::api::{
    CmdMessage, CmdResult, ConfigAction, EntryChanges, MessageLevel, NotemarkApi, NotemarkPaths,
};
use notemark::config::{ConfigKey, NotemarkConfig};
use notemark::error::{NotemarkError, Result};
use notemark::index::DisplayEntry;
use notemark::markup::{Selection, StyleKind};
use notemark::store::fs::FileStore;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

const HOME_ENV: &str = "NOTEMARK_HOME";
const LOG_ENV: &str = "NOTEMARK_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: NotemarkApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Create {
            title,
            content,
            grouping,
        }) => handle_create(&mut ctx, title, content, grouping),
        Some(Commands::List { grouping }) => handle_list(&mut ctx, grouping),
        Some(Commands::View { indexes, raw }) => handle_view(&mut ctx, indexes, raw),
        Some(Commands::Update {
            indexes,
            title,
            content,
            display,
            grouping,
        }) => {
            let content = match display {
                Some(markup) => Some(ctx.api.parse(&markup)),
                None => content,
            };
            let changes = EntryChanges {
                title,
                content,
                grouping,
            };
            handle_update(&mut ctx, indexes, changes)
        }
        Some(Commands::Delete { indexes }) => handle_delete(&mut ctx, indexes),
        Some(Commands::Format {
            indexes,
            style,
            start,
            end,
        }) => handle_format(&mut ctx, indexes, &style, start, end),
        Some(Commands::Render { text }) => {
            let text = text_or_stdin(text)?;
            println!("{}", ctx.api.render(&text));
            Ok(())
        }
        Some(Commands::Parse { markup }) => {
            let markup = text_or_stdin(markup)?;
            println!("{}", ctx.api.parse(&markup));
            Ok(())
        }
        Some(Commands::Attach { indexes, document }) => {
            let result = ctx.api.attach_document(&indexes, &document)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Detach { indexes, document }) => {
            let result = ctx.api.detach_document(&indexes, &document)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None),
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "notemark", "notemark")
        .ok_or_else(|| NotemarkError::Api("Could not determine data dir".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_context() -> Result<AppContext> {
    let data = data_dir()?;
    let config = NotemarkConfig::load(&data).unwrap_or_default();
    tracing::debug!(data = %data.display(), file_ext = %config.file_ext, "using data dir");

    let store = FileStore::new(data.clone()).with_file_ext(&config.file_ext);
    let paths = NotemarkPaths { data };
    let api = NotemarkApi::new(store, paths, config);

    Ok(AppContext { api })
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    if input.ends_with('\n') {
        input.pop();
    }
    Ok(input)
}

fn handle_create(
    ctx: &mut AppContext,
    title: String,
    content: Option<String>,
    grouping: Option<String>,
) -> Result<()> {
    let result = ctx
        .api
        .create_entry(title, content.unwrap_or_default(), grouping.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, grouping: Option<String>) -> Result<()> {
    let result = ctx.api.list_entries(grouping.as_deref())?;
    print_entries(&result.listed_entries);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, indexes: Vec<String>, raw: bool) -> Result<()> {
    let result = ctx.api.view_entries(&indexes)?;
    print_full_entries(ctx, &result.listed_entries, raw);
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &mut AppContext, indexes: Vec<String>, changes: EntryChanges) -> Result<()> {
    if changes.is_empty() {
        return Err(NotemarkError::Api(
            "Nothing to update: pass --title, --content, --display or --grouping".into(),
        ));
    }
    let result = ctx.api.update_entries(&indexes, &changes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_entries(&indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_format(
    ctx: &mut AppContext,
    indexes: Vec<String>,
    style: &str,
    start: usize,
    end: Option<usize>,
) -> Result<()> {
    let kind: StyleKind = style.parse().map_err(NotemarkError::Api)?;
    let selection = Selection::new(start, end.unwrap_or(start));
    let result = ctx.api.format_entry(&indexes, selection, kind)?;
    print_format(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match key.as_deref() {
        None => ConfigAction::ShowAll,
        Some(name) => {
            let key = ConfigKey::from_name(name)
                .ok_or_else(|| NotemarkError::Api(format!("Unknown config key: {}", name)))?;
            match value {
                Some(v) => ConfigAction::Set(key, v),
                None => ConfigAction::ShowKey(key),
            }
        }
    };

    let result = ctx.api.config(action)?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_format(result: &CmdResult) {
    if let (Some(outcome), Some(entry)) = (&result.format, result.affected_entries.first()) {
        println!("{}", entry.content);
        let active: Vec<&str> = outcome
            .state
            .active_kinds()
            .into_iter()
            .map(|kind| kind.label())
            .collect();
        println!(
            "{} {}  {} {}",
            "selection".dimmed(),
            outcome.selection,
            "active".dimmed(),
            if active.is_empty() {
                "-".to_string()
            } else {
                active.join(", ")
            }
        );
    }
}

fn print_full_entries(ctx: &AppContext, entries: &[DisplayEntry], raw: bool) {
    for (i, de) in entries.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!(
            "{} {} {}",
            de.index.to_string().yellow(),
            de.entry.title().bold(),
            format!("[{}]", de.entry.grouping()).dimmed()
        );
        let attachments = &de.entry.metadata.attachments;
        if !attachments.is_empty() {
            let ids: Vec<&str> = attachments.iter().map(String::as_str).collect();
            println!("{} {}", "attached:".dimmed(), ids.join(", "));
        }
        println!("--------------------------------");
        if raw {
            println!("{}", de.entry.content);
        } else {
            println!("{}", ctx.api.render(&de.entry.content));
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_entries(entries: &[DisplayEntry]) {
    if entries.is_empty() {
        println!("No entries found.");
        return;
    }

    for de in entries {
        let idx_str = format!("{}. ", de.index);
        let grouping = format!("[{}] ", de.entry.grouping());
        let time_ago = format_time_ago(de.entry.metadata.updated_at);

        let preview: String = de
            .entry
            .content
            .chars()
            .take(50)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let title_content = if preview.is_empty() {
            de.entry.title().to_string()
        } else {
            format!("{} {}", de.entry.title(), preview)
        };

        let fixed_width = 4 + idx_str.width() + grouping.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title_display = truncate_to_width(&title_content, available);
        let padding = available.saturating_sub(title_display.width());

        println!(
            "    {}{}{}{}{}",
            idx_str.yellow(),
            grouping.cyan(),
            title_display,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = timeago::Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
