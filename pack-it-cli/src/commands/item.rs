//! Item CLI commands against the active list.

use clap::{Args, Subcommand};

use pack_it_core::guards::add_named_item;
use pack_it_core::{AddOutcome, GuardError, ListType, PackingStore};

use super::resolve_item;
use crate::app::App;

#[derive(Args)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub command: ItemSubcommand,
}

#[derive(Subcommand)]
pub enum ItemSubcommand {
    /// Add an item to the active list
    Add {
        /// Item name
        name: String,

        /// Sub-list: to-pack, to-buy or suggestions
        #[arg(long, short, default_value = "to-pack")]
        to: ListType,

        /// Move the item if it is already in the other sub-list
        #[arg(long = "move", short = 'm')]
        move_existing: bool,
    },

    /// Remove an item
    Remove {
        /// Item ID or name
        item: String,

        /// Sub-list holding the item
        #[arg(long, short)]
        from: ListType,
    },

    /// Mark a "to pack" item as packed or unpacked
    Toggle {
        /// Item ID or name
        item: String,
    },

    /// Move an item to another sub-list
    Move {
        /// Item ID or name
        item: String,

        #[arg(long, short)]
        from: ListType,

        #[arg(long, short)]
        to: ListType,
    },

    /// Remove every item from a sub-list
    Clear {
        /// Sub-list: to-pack, to-buy or suggestions
        list: ListType,
    },
}

impl ItemCommand {
    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        let store = &mut app.store;

        match &self.command {
            ItemSubcommand::Add {
                name,
                to,
                move_existing,
            } => {
                match add_named_item(store, *to, name, *move_existing)? {
                    AddOutcome::Added(item) => {
                        println!("Added '{}' to {}", item.name, to.label());
                    }
                    AddOutcome::Moved { from, .. } => {
                        println!(
                            "Moved '{}' from {} to {}",
                            name.trim(),
                            from.label(),
                            to.label()
                        );
                    }
                }
                Ok(())
            }

            ItemSubcommand::Remove { item, from } => {
                let id = find_item(store, *from, item)?;
                store.remove_item(*from, &id);
                println!("Removed '{}' from {}", item, from.label());
                Ok(())
            }

            ItemSubcommand::Toggle { item } => {
                let id = find_item(store, ListType::ToPack, item)?;
                store.toggle_packed(&id);
                let packed = store
                    .active_list()
                    .and_then(|l| l.find(ListType::ToPack, &id))
                    .is_some_and(|i| i.packed);
                println!(
                    "'{}' is now {}",
                    item,
                    if packed { "packed" } else { "not packed" }
                );
                Ok(())
            }

            ItemSubcommand::Move { item, from, to } => {
                if from == to {
                    return Err("Source and target sub-lists are the same".into());
                }
                let id = find_item(store, *from, item)?;
                store.copy_item(*from, *to, &id);
                println!("Moved '{}' from {} to {}", item, from.label(), to.label());
                Ok(())
            }

            ItemSubcommand::Clear { list } => {
                store.clear_list(*list);
                println!("Cleared {}", list.label());
                Ok(())
            }
        }
    }
}

fn find_item(
    store: &PackingStore,
    list_type: ListType,
    key: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let list = store.active_list().ok_or(GuardError::NoActiveList)?;
    Ok(resolve_item(list, list_type, key)?)
}
