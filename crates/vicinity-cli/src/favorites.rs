//! `favorites` command handlers over the file-backed store.

use std::sync::Arc;

use clap::Subcommand;

use vicinity_core::AppConfig;
use vicinity_favorites::{FavoritesStore, FileStore};

#[derive(Debug, Subcommand)]
pub(crate) enum FavoritesCommand {
    /// Add a provider id to the favorites set.
    Add { id: String },
    /// Remove a provider id from the favorites set.
    Remove { id: String },
    /// Print the stored ids in insertion order.
    List,
    /// Empty the favorites set.
    Clear,
    /// Resolve the stored ids against the backend, pruning ids that no
    /// longer exist.
    Show,
}

pub(crate) async fn run(config: &AppConfig, command: FavoritesCommand) -> anyhow::Result<()> {
    let store = FavoritesStore::new(Arc::new(FileStore::new(config.favorites_path.clone())));

    match command {
        FavoritesCommand::Add { id } => {
            store.add(&id)?;
            println!("added {id}");
        }
        FavoritesCommand::Remove { id } => {
            store.remove(&id)?;
            println!("removed {id}");
        }
        FavoritesCommand::List => {
            let ids = store.list()?;
            if ids.is_empty() {
                println!("no favorites");
            }
            for id in ids {
                println!("{id}");
            }
        }
        FavoritesCommand::Clear => {
            store.clear()?;
            println!("favorites cleared");
        }
        FavoritesCommand::Show => {
            let client = crate::build_client(config)?;
            let entities = store.hydrate(&client).await?;
            if entities.is_empty() {
                println!("no favorites");
            }
            for entity in entities {
                println!("{}  {}", entity.id(), entity.display_name());
            }
        }
    }
    Ok(())
}
