//! Command-line surface for the notebook core.
//!
//! # Responsibility
//! - Parse commands into core operations and relay their results as JSON.
//! - Map core error kinds to stable process exit codes.

use clap::{Args, Parser, Subcommand};
use notebook_core::{
    CategoryId, ErrorKind, NewNote, NoteId, NoteListQuery, NotePatch, Notebook, NotebookConfig,
    ServiceResult,
};
use serde_json::{json, Value};
use std::path::PathBuf;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INTERNAL: i32 = 1;
pub const EXIT_VALIDATION: i32 = 2;
pub const EXIT_NOT_FOUND: i32 = 3;
pub const EXIT_CONFLICT: i32 = 4;

#[derive(Parser, Debug)]
#[command(name = "notebook")]
#[command(version)]
#[command(about = "Manage short notes, categories and archives")]
pub struct Cli {
    /// SQLite database file (defaults to NOTEBOOK_DB_PATH, else in-memory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Absolute directory for log files (defaults to NOTEBOOK_LOG_DIR)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (defaults to NOTEBOOK_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print core health and version
    Ping,
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommand),
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Create a category
    Add { name: String },
    /// List categories by name
    List,
    /// Show one category
    Show { id: CategoryId },
    /// Rename a category
    Rename { id: CategoryId, name: String },
    /// Delete a category and untag its notes
    Delete { id: CategoryId },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Create a note
    Add {
        title: String,
        content: String,
        #[arg(long)]
        archived: bool,
    },
    /// List notes, newest first
    List(ListArgs),
    /// Show one note
    Show { id: NoteId },
    /// Edit title and/or content
    Edit {
        id: NoteId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Archive a note
    Archive { id: NoteId },
    /// Move a note back to active
    Unarchive { id: NoteId },
    /// Delete a note
    Delete { id: NoteId },
    /// Replace the note's categories (no ids clears them)
    Tag {
        id: NoteId,
        category_ids: Vec<CategoryId>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only archived (true) or active (false) notes
    #[arg(long)]
    pub archived: Option<bool>,
    /// Only notes tagged with this category
    #[arg(long)]
    pub category: Option<CategoryId>,
}

impl Cli {
    /// Overlays command-line flags on environment settings.
    pub fn config(&self, mut base: NotebookConfig) -> NotebookConfig {
        if let Some(db) = self.db.clone() {
            base.db_path = Some(db);
        }
        if let Some(dir) = self.log_dir.clone() {
            base.log_dir = Some(dir);
        }
        if let Some(level) = self.log_level.clone() {
            base.log_level = level;
        }
        base
    }
}

/// Runs one command and returns its JSON result.
pub fn run(notebook: &mut Notebook, command: Commands) -> ServiceResult<Value> {
    match command {
        Commands::Ping => Ok(json!({
            "ping": notebook_core::ping(),
            "version": notebook_core::core_version(),
        })),
        Commands::Category(command) => run_category(notebook, command),
        Commands::Note(command) => run_note(notebook, command),
    }
}

fn run_category(notebook: &mut Notebook, command: CategoryCommand) -> ServiceResult<Value> {
    let value = match command {
        CategoryCommand::Add { name } => json!(notebook.create_category(&name)?),
        CategoryCommand::List => json!(notebook.list_categories()?),
        CategoryCommand::Show { id } => json!(notebook.get_category(id)?),
        CategoryCommand::Rename { id, name } => json!(notebook.rename_category(id, &name)?),
        CategoryCommand::Delete { id } => {
            notebook.delete_category(id)?;
            json!({ "deleted": id })
        }
    };
    Ok(value)
}

fn run_note(notebook: &mut Notebook, command: NoteCommand) -> ServiceResult<Value> {
    let value = match command {
        NoteCommand::Add {
            title,
            content,
            archived,
        } => json!(notebook.create_note(NewNote::new(title, content).archived(archived))?),
        NoteCommand::List(args) => {
            let query = NoteListQuery {
                archived: args.archived,
                category_id: args.category,
            };
            json!(notebook.list_notes(query)?)
        }
        NoteCommand::Show { id } => json!(notebook.get_note(id)?),
        NoteCommand::Edit { id, title, content } => {
            let patch = NotePatch {
                title,
                content,
                archived: None,
            };
            json!(notebook.update_note(id, patch)?)
        }
        NoteCommand::Archive { id } => json!(notebook.archive_note(id)?),
        NoteCommand::Unarchive { id } => json!(notebook.unarchive_note(id)?),
        NoteCommand::Delete { id } => json!(notebook.delete_note(id)?),
        NoteCommand::Tag { id, category_ids } => {
            json!(notebook.set_note_categories(id, &category_ids)?)
        }
    };
    Ok(value)
}

pub fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Validation => EXIT_VALIDATION,
        ErrorKind::NotFound => EXIT_NOT_FOUND,
        ErrorKind::Conflict => EXIT_CONFLICT,
        ErrorKind::Internal => EXIT_INTERNAL,
    }
}
