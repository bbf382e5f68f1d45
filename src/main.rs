//! Pinmark CLI application entry point
//!
//! This is the main executable for the pinmark geo-bookmarking tool. It
//! hosts the place store and the cross-view synchronization core behind
//! a command-line interface with terminal presentation surfaces.
//!
//! # Usage
//!
//! ```bash
//! # List saved places (default command)
//! pinmark
//! pinmark list harbor
//!
//! # Save a place
//! pinmark add "Opera House" -33.8568 151.2153 --url https://example.com --note "tour at noon"
//!
//! # Inspect, edit, delete
//! pinmark show p_1f3c...
//! pinmark edit p_1f3c... --title "Sydney Opera House"
//! pinmark remove p_1f3c...
//!
//! # Move the collection between machines
//! pinmark export -o backup.json
//! pinmark import backup.json --mode replace
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/pinmark/config.toml` on Linux); the place database lives
//! in the user's data directory unless overridden there or with
//! `--database`.

use dialoguer::Confirm;
use pinmark::{
    cli::{Cli, Commands},
    codec::ImportMode,
    config::PinmarkConfig,
    output,
    session::Session,
    store::{PlaceStore, SledBackend},
    view::term::{TermList, TermMap, TermMode, TermPreview},
    view::ViewSynchronizer,
    weblink, PinmarkError, PlaceDraft,
};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

type Result<T> = std::result::Result<T, PinmarkError>;

/// Prompt user for yes/no confirmation
///
/// # Arguments
/// * `prompt` - Question to ask the user
/// * `assume_yes` - If true, auto-confirms without prompting
///
/// # Errors
/// Returns `PinmarkError` if the prompt cannot be displayed or read.
fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| match e {
            dialoguer::Error::IO(io) => PinmarkError::IoError(io),
        })
}

/// Resolve the database directory from flag or config
fn database_path(cli: &Cli, config: &PinmarkConfig) -> Result<PathBuf> {
    match &cli.database {
        Some(dir) => Ok(dir.clone()),
        None => Ok(config.database_path()?),
    }
}

/// Build a session over terminal surfaces with the given display modes
fn session_with(store: PlaceStore, map: TermMode, list: TermMode, preview: TermMode) -> Session {
    let views = ViewSynchronizer::new(
        Box::new(TermMap::new(map)),
        Box::new(TermList::new(list)),
        Box::new(TermPreview::new(preview)),
    );
    Session::new(store, views)
}

fn run(cli: &Cli) -> Result<()> {
    let config = PinmarkConfig::load()?;
    let quiet = cli.quiet || config.quiet;
    let db_path = database_path(cli, &config)?;
    let backend = SledBackend::open(&db_path)?;
    let store = PlaceStore::open(Box::new(backend));

    let display_mode = if quiet { TermMode::Quiet } else { TermMode::Full };

    match cli.get_command() {
        Commands::List { query } => {
            let mut session =
                session_with(store, TermMode::Silent, display_mode, TermMode::Silent);
            session.set_query(query.unwrap_or_default());
        }

        Commands::Show { id } => {
            let mut session =
                session_with(store, TermMode::Silent, TermMode::Silent, display_mode);
            if !session.select(&id) {
                return Err(PinmarkError::InvalidInput(format!("no place with id {id}")));
            }
        }

        Commands::Add {
            title,
            lat,
            lng,
            url,
            photo,
            note,
            same_tab,
        } => {
            let mut session =
                session_with(store, TermMode::Silent, TermMode::Silent, TermMode::Silent);
            let draft = PlaceDraft::new(title, lat, lng)
                .with_url(url.unwrap_or_default())
                .with_photo(photo.unwrap_or_default())
                .with_note(note.unwrap_or_default())
                .with_open_new_tab(!same_tab);
            let place = session.submit(draft, None)?;
            output::notice(&format!("Saved \"{}\" ({})", place.title, place.id), quiet);
        }

        Commands::Edit {
            id,
            title,
            lat,
            lng,
            url,
            photo,
            note,
            same_tab,
            new_tab,
        } => {
            let Some(existing) = store_get_draft(&store, &id) else {
                return Err(PinmarkError::InvalidInput(format!("no place with id {id}")));
            };
            let mut draft = existing;
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(lat) = lat {
                draft.lat = lat;
            }
            if let Some(lng) = lng {
                draft.lng = lng;
            }
            if let Some(url) = url {
                draft.url = url;
            }
            if let Some(photo) = photo {
                draft.photo = photo;
            }
            if let Some(note) = note {
                draft.note = note;
            }
            if same_tab {
                draft.open_new_tab = false;
            } else if new_tab {
                draft.open_new_tab = true;
            }

            let mut session =
                session_with(store, TermMode::Silent, TermMode::Silent, TermMode::Silent);
            let place = session.submit(draft, Some(&id))?;
            output::notice(&format!("Updated \"{}\"", place.title), quiet);
        }

        Commands::Remove { id, yes } => {
            let Some(place) = store.get(&id) else {
                output::warn(&format!("no place with id {id}"));
                return Ok(());
            };
            let prompt = format!("Really delete \"{}\"?", place.title);
            if !confirm(&prompt, yes || quiet)? {
                output::notice("Nothing deleted", quiet);
                return Ok(());
            }
            let mut session =
                session_with(store, TermMode::Silent, TermMode::Silent, TermMode::Silent);
            session.remove(&id)?;
            output::notice("Place deleted", quiet);
        }

        Commands::Clear { yes } => {
            let count = store.len();
            let prompt = format!(
                "Really delete ALL saved places ({})?",
                output::place_count(count)
            );
            if !confirm(&prompt, yes || quiet)? {
                output::notice("Nothing deleted", quiet);
                return Ok(());
            }
            let mut session =
                session_with(store, TermMode::Silent, TermMode::Silent, TermMode::Silent);
            session.clear_all()?;
            output::notice("All places deleted", quiet);
        }

        Commands::Export { output: out_file } => {
            let session =
                session_with(store, TermMode::Silent, TermMode::Silent, TermMode::Silent);
            let json = session.export()?;
            let path = out_file.unwrap_or_else(|| PathBuf::from("places.json"));
            fs::write(&path, json)?;
            output::notice(
                &format!(
                    "Exported {} to {}",
                    output::place_count(session.places().len()),
                    path.display()
                ),
                quiet,
            );
        }

        Commands::Import { file, mode } => {
            let text = fs::read_to_string(&file)?;
            let mut session =
                session_with(store, TermMode::Silent, TermMode::Silent, TermMode::Silent);
            let count = session.import(&text, ImportMode::from(mode))?;
            output::notice(&format!("Imported {}", output::place_count(count)), quiet);
        }

        Commands::Open { id } => {
            let Some(place) = store.get(&id) else {
                return Err(PinmarkError::InvalidInput(format!("no place with id {id}")));
            };
            let url = weblink::sanitize(&place.url);
            if url.is_empty() {
                output::notice("This place has no link", quiet);
                return Ok(());
            }
            open::that(&url)?;
            output::notice(&format!("Opened {url}"), quiet);
        }
    }

    Ok(())
}

/// Draft of an existing record's editable fields, if the id is known
fn store_get_draft(store: &PlaceStore, id: &str) -> Option<PlaceDraft> {
    store.get(id).map(pinmark::Place::to_draft)
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}
