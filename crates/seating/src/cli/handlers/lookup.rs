use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use clap::ArgMatches;
use seating_core::lookup::SeatLookup;
use seating_core::{
    ArtifactStore, ConversationContexts, Error, GuestDirectory, GuestRecord, Resolution,
    TableEntity,
};
use serde_json::json;
use tracing::debug;

use crate::cli::params::load_engine_config;

/// One-shot CLI conversations share a single context key
const CLI_CONVERSATION: &str = "cli";

pub fn handle(matches: &ArgMatches) -> Result<()> {
    let path = match matches.get_one::<String>("output") {
        Some(path) => path.clone(),
        None => load_engine_config(matches)?.artifact_path,
    };

    if let Some(name) = matches.get_one::<String>("name") {
        let guests = matches
            .get_one::<String>("guests")
            .ok_or_else(|| anyhow::anyhow!("--name needs --guests"))?;
        let directory = read_guest_directory(Path::new(guests))?;
        let guest = resolve_guest(&directory, name, matches.get_one::<String>("choice"))?;
        let lookup = SeatLookup::new(ArtifactStore::new(path).load()?);
        let entity = lookup.seat_of(&guest)?;
        return print_entity(entity, Some(&guest), matches.get_flag("json"));
    }

    let id = matches
        .get_one::<String>("id")
        .ok_or_else(|| anyhow::anyhow!("missing entity id"))?;
    let lookup = SeatLookup::new(ArtifactStore::new(path).load()?);
    print_entity(lookup.table(id)?, None, matches.get_flag("json"))
}

fn read_guest_directory(path: &Path) -> Result<GuestDirectory> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read {}: {e}", path.display())))?;
    let directory = GuestDirectory::from_json(&content)?;
    debug!(guests = directory.len(), path = %path.display(), "loaded guest directory");
    Ok(directory)
}

/// Resolve a name, answering an ambiguous match with `choice` when given.
fn resolve_guest(
    directory: &GuestDirectory,
    name: &str,
    choice: Option<&String>,
) -> Result<GuestRecord> {
    let candidates = match directory.resolve(name) {
        Resolution::Unique(guest) => return Ok(guest),
        Resolution::NotFound => {
            return Err(Error::not_found(format!("no guest named '{name}'")).into());
        }
        Resolution::Ambiguous(candidates) => candidates,
    };

    let Some(reply) = choice else {
        for (index, guest) in candidates.iter().enumerate() {
            println!("{}. {}", index + 1, guest.label());
        }
        return Err(Error::not_found(format!(
            "{} guests are named '{name}'; pass --choice to pick one",
            candidates.len()
        ))
        .into());
    };

    let now = Utc::now();
    let mut contexts = ConversationContexts::default();
    contexts.begin(CLI_CONVERSATION, candidates, now);
    let picked = contexts.resolve(CLI_CONVERSATION, reply, now).ok_or_else(|| {
        Error::not_found(format!("'{reply}' matches none of the guests named '{name}'"))
    })?;
    Ok(picked)
}

fn print_entity(entity: &TableEntity, guest: Option<&GuestRecord>, as_json: bool) -> Result<()> {
    if as_json {
        let mut output = json!({
            "id": entity.id,
            "position": entity.position,
            "type": entity.kind,
            "displayName": entity.display_name,
        });
        if let Some(guest) = guest {
            output["guest"] = serde_json::to_value(guest)?;
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(guest) = guest {
        print!("{} sits at ", guest.label());
    }
    match entity.display_name.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => println!("{} ({name}): {} at {}", entity.id, entity.kind, entity.position),
        None => println!("{}: {} at {}", entity.id, entity.kind, entity.position),
    }
    Ok(())
}
