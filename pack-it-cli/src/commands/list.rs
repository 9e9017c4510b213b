//! Packing list CLI commands.
//!
//! Create, rename, delete, select, merge and share whole lists.

use clap::{Args, Subcommand, ValueEnum};

use pack_it_core::guards::{
    create_and_select_list, delete_list_checked, rename_list_checked, validate_list_name,
};
use pack_it_core::{ListType, PackingListData};

use super::resolve_list;
use crate::app::App;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args)]
pub struct ListCommand {
    #[command(subcommand)]
    pub command: ListSubcommand,
}

#[derive(Subcommand)]
pub enum ListSubcommand {
    /// Show a list's items (defaults to the active list)
    Show {
        /// List ID or name
        list: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show all lists
    All,

    /// Create a new list
    Create {
        /// List name
        name: String,

        /// Make the new list active
        #[arg(long, short)]
        select: bool,
    },

    /// Rename a list
    Rename {
        /// List ID or name
        list: String,

        /// New name
        name: String,
    },

    /// Delete a list (not the active or only one)
    Delete {
        /// List ID or name
        list: String,
    },

    /// Make a list active
    Select {
        /// List ID or name
        list: String,
    },

    /// Copy another list's items into the active list
    Merge {
        /// Source list ID or name
        source: String,
    },

    /// Share a list with a collaborator
    Share {
        /// List ID or name
        list: String,

        /// Collaborator (email or user ID)
        who: String,
    },

    /// Stop sharing a list with a collaborator
    Unshare {
        /// List ID or name
        list: String,

        /// Collaborator (email or user ID)
        who: String,
    },
}

impl ListCommand {
    /// Returns true if the command changes stored lists.
    pub fn is_write(&self) -> bool {
        !matches!(
            self.command,
            ListSubcommand::Show { .. } | ListSubcommand::All
        )
    }

    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        let store = &mut app.store;

        match &self.command {
            ListSubcommand::Show { list, format } => {
                let id = match list {
                    Some(key) => resolve_list(store, key)?,
                    None => store
                        .active_list_id()
                        .map(str::to_string)
                        .ok_or("No active list")?,
                };
                let Some(data) = store.list(&id) else {
                    return Err(format!("List not found: {}", id).into());
                };

                match format {
                    OutputFormat::Json => {
                        let output = serde_json::json!({
                            "id": id,
                            "active": store.active_list_id() == Some(id.as_str()),
                            "list": data,
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    }
                    OutputFormat::Table => print_list(&id, data),
                }
                Ok(())
            }

            ListSubcommand::All => {
                let active = store.active_list_id().map(str::to_string);
                println!("{:<2} {:<24} {:>6}  {:<36}", "", "NAME", "ITEMS", "ID");
                println!("{}", "-".repeat(72));
                for (id, list) in store.lists() {
                    let marker = if active.as_deref() == Some(id.as_str()) {
                        "*"
                    } else {
                        ""
                    };
                    println!(
                        "{:<2} {:<24} {:>6}  {:<36}",
                        marker,
                        truncate(&list.name, 24),
                        list.item_count(),
                        id
                    );
                }
                Ok(())
            }

            ListSubcommand::Create { name, select } => {
                let id = if *select {
                    create_and_select_list(store, name)?
                } else {
                    let name = validate_list_name(store.lists(), name, None)?;
                    store.create_list(&name)
                };
                println!("Created list: {} ({})", name.trim(), id);
                Ok(())
            }

            ListSubcommand::Rename { list, name } => {
                let id = resolve_list(store, list)?;
                rename_list_checked(store, &id, name)?;
                println!("Renamed list {} to {}", id, name.trim());
                Ok(())
            }

            ListSubcommand::Delete { list } => {
                let id = resolve_list(store, list)?;
                delete_list_checked(store, &id)?;
                println!("Deleted list: {}", id);
                Ok(())
            }

            ListSubcommand::Select { list } => {
                let id = resolve_list(store, list)?;
                store.set_active_list(&id);
                println!("Active list: {}", store.list(&id).map_or("", |l| l.name.as_str()));
                Ok(())
            }

            ListSubcommand::Merge { source } => {
                let id = resolve_list(store, source)?;
                if store.active_list_id() == Some(id.as_str()) {
                    return Err("Cannot merge a list into itself".into());
                }
                let merged = store.merge_list(&id);
                println!(
                    "Merged {} item{} into the active list",
                    merged,
                    if merged == 1 { "" } else { "s" }
                );
                Ok(())
            }

            ListSubcommand::Share { list, who } => {
                let id = resolve_list(store, list)?;
                if who.trim().is_empty() {
                    return Err("Collaborator cannot be empty".into());
                }
                store.share_list(&id, who);
                println!("Shared list {} with {}", id, who.trim());
                Ok(())
            }

            ListSubcommand::Unshare { list, who } => {
                let id = resolve_list(store, list)?;
                store.unshare_list(&id, who);
                println!("Stopped sharing list {} with {}", id, who.trim());
                Ok(())
            }
        }
    }
}

fn print_list(id: &str, list: &PackingListData) {
    println!("{} ({})", list.name, id);
    println!("{}", "=".repeat(44));
    if !list.shared_with.is_empty() {
        println!("Shared with: {}", list.shared_with.join(", "));
    }

    for list_type in ListType::ALL {
        let items = list.items(list_type);
        println!();
        println!("{} ({})", list_type.label(), items.len());
        println!("{}", "-".repeat(44));
        if items.is_empty() {
            println!("  (empty)");
        }
        for item in items {
            if list_type == ListType::ToPack {
                println!("  {}", item);
            } else {
                println!("  {}", item.name);
            }
        }
    }

    println!();
    println!(
        "{} of {} items packed",
        list.packed_count(),
        list.to_pack.len()
    );
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
