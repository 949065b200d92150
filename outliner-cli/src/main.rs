use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_outliner::{MemoryDocument, OutlineEditor, PageMode, RowId};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pdfoutliner",
    about = "Edit the bookmark (outline) tree of a document",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the outline tree
    Show {
        /// Input document
        input: PathBuf,
    },

    /// Insert a new bookmark relative to the one at --path
    Add {
        /// Input document
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Dotted 1-based position of the reference bookmark (e.g. "2.1.3");
        /// omit to insert into an empty outline
        #[arg(long)]
        path: Option<String>,

        /// Insert after the reference bookmark instead of before it
        #[arg(long)]
        after: bool,

        /// Title of the new bookmark
        #[arg(short, long, default_value = "new item")]
        title: String,

        /// Target page (1-based, as displayed)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Page display mode to store (defaults to the document's mode)
        #[arg(long)]
        page_mode: Option<PageMode>,
    },

    /// Delete the bookmark at --path, including its children
    Remove {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Dotted 1-based bookmark position
        #[arg(long)]
        path: String,

        #[arg(long)]
        page_mode: Option<PageMode>,
    },

    /// Move the bookmark at --path one step up, down, in or out
    Mv {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Dotted 1-based bookmark position
        #[arg(long)]
        path: String,

        /// Move direction
        #[arg(short, long)]
        direction: Direction,

        #[arg(long)]
        page_mode: Option<PageMode>,
    },

    /// Re-parent the bookmark at --path under another bookmark
    Reparent {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Dotted 1-based position of the bookmark to move
        #[arg(long)]
        path: String,

        /// New parent position; omit for top level
        #[arg(long)]
        parent: Option<String>,

        /// Position of the sibling to insert after; omit to insert first
        #[arg(long)]
        prev: Option<String>,

        #[arg(long)]
        page_mode: Option<PageMode>,
    },

    /// Rename the bookmark at --path
    Rename {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        path: String,

        /// New title
        #[arg(short, long)]
        title: String,

        #[arg(long)]
        page_mode: Option<PageMode>,
    },

    /// Point the bookmark at --path at a different page
    Retarget {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        path: String,

        /// Target page (1-based, as displayed)
        #[arg(short, long)]
        page: u32,

        #[arg(long)]
        page_mode: Option<PageMode>,
    },

    /// Delete every bookmark
    Clear {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        page_mode: Option<PageMode>,
    },

    /// Store a page display mode without touching the outline
    SetPageMode {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// none, outlines, thumbnails, fullscreen, optional-content or attachments
        #[arg(short, long)]
        mode: PageMode,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
    In,
    Out,
}

/// Parse a dotted 1-based path ("2.1.3") into zero-based child indices.
fn parse_path(raw: &str) -> Result<Vec<usize>> {
    raw.split('.')
        .map(|part| {
            let index: usize = part
                .parse()
                .with_context(|| format!("invalid path segment {part:?} in {raw:?}"))?;
            if index == 0 {
                bail!("path segments are 1-based, got 0 in {raw:?}");
            }
            Ok(index - 1)
        })
        .collect()
}

fn open_editor(input: &Path) -> Result<(OutlineEditor<MemoryDocument>, PageMode)> {
    let doc = MemoryDocument::open(input)
        .with_context(|| format!("cannot open {}", input.display()))?;
    let stored_mode = doc.page_mode();
    Ok((OutlineEditor::open(doc), stored_mode))
}

fn select_path(editor: &mut OutlineEditor<MemoryDocument>, raw: &str) -> Result<()> {
    let path = parse_path(raw)?;
    let row = editor
        .row_at_path(&path)
        .with_context(|| format!("no bookmark at path {raw}"))?;
    editor.select(row)?;
    Ok(())
}

fn save(
    editor: &mut OutlineEditor<MemoryDocument>,
    output: &Path,
    requested: Option<PageMode>,
    stored: PageMode,
) -> Result<()> {
    editor.save(output, requested.unwrap_or(stored))?;
    println!("Saved {}", output.display());
    Ok(())
}

fn print_tree(editor: &OutlineEditor<MemoryDocument>, parent: Option<RowId>, depth: usize) {
    for &row_id in editor.rows().children(parent) {
        if let Some(row) = editor.rows().row(row_id) {
            println!("{:indent$}{}  [{}]", "", row.name, row.target_text, indent = depth * 2);
        }
        print_tree(editor, Some(row_id), depth + 1);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { input } => {
            let (editor, mode) = open_editor(&input)?;
            println!("Page mode: {}", mode.pdf_name());
            if editor.rows().is_empty() {
                println!("(no bookmarks)");
            } else {
                print_tree(&editor, None, 0);
            }
        }

        Commands::Add {
            input,
            output,
            path,
            after,
            title,
            page,
            page_mode,
        } => {
            if page == 0 {
                bail!("pages are 1-based, got 0");
            }
            let (mut editor, stored) = open_editor(&input)?;
            if let Some(raw) = &path {
                select_path(&mut editor, raw)?;
            } else if !editor.rows().is_empty() {
                bail!("--path is required unless the outline is empty");
            }
            let inserted = if after {
                editor.insert_after(&title, page - 1)?
            } else {
                editor.insert_before(&title, page - 1)?
            };
            if inserted.is_none() {
                bail!("no insertion point");
            }
            save(&mut editor, &output, page_mode, stored)?;
        }

        Commands::Remove {
            input,
            output,
            path,
            page_mode,
        } => {
            let (mut editor, stored) = open_editor(&input)?;
            select_path(&mut editor, &path)?;
            editor.delete_selected()?;
            save(&mut editor, &output, page_mode, stored)?;
        }

        Commands::Mv {
            input,
            output,
            path,
            direction,
            page_mode,
        } => {
            let (mut editor, stored) = open_editor(&input)?;
            select_path(&mut editor, &path)?;
            let moved = match direction {
                Direction::Up => editor.move_up_selected()?,
                Direction::Down => editor.move_down_selected()?,
                Direction::In => editor.move_in_selected()?,
                Direction::Out => editor.move_out_selected()?,
            };
            if !moved {
                println!("Nothing to do (already at the boundary)");
            }
            save(&mut editor, &output, page_mode, stored)?;
        }

        Commands::Reparent {
            input,
            output,
            path,
            parent,
            prev,
            page_mode,
        } => {
            let (mut editor, stored) = open_editor(&input)?;
            let parent_row = match &parent {
                Some(raw) => Some(
                    editor
                        .row_at_path(&parse_path(raw)?)
                        .with_context(|| format!("no bookmark at path {raw}"))?,
                ),
                None => None,
            };
            let prev_row = match &prev {
                Some(raw) => Some(
                    editor
                        .row_at_path(&parse_path(raw)?)
                        .with_context(|| format!("no bookmark at path {raw}"))?,
                ),
                None => None,
            };
            select_path(&mut editor, &path)?;
            editor.move_selected_to(parent_row, prev_row)?;
            save(&mut editor, &output, page_mode, stored)?;
        }

        Commands::Rename {
            input,
            output,
            path,
            title,
            page_mode,
        } => {
            let (mut editor, stored) = open_editor(&input)?;
            select_path(&mut editor, &path)?;
            editor.rename_selected(&title)?;
            save(&mut editor, &output, page_mode, stored)?;
        }

        Commands::Retarget {
            input,
            output,
            path,
            page,
            page_mode,
        } => {
            let (mut editor, stored) = open_editor(&input)?;
            select_path(&mut editor, &path)?;
            editor.retarget_selected(&page.to_string())?;
            save(&mut editor, &output, page_mode, stored)?;
        }

        Commands::Clear {
            input,
            output,
            page_mode,
        } => {
            let (mut editor, stored) = open_editor(&input)?;
            editor.clear_all();
            save(&mut editor, &output, page_mode, stored)?;
        }

        Commands::SetPageMode {
            input,
            output,
            mode,
        } => {
            let (mut editor, _) = open_editor(&input)?;
            save(&mut editor, &output, Some(mode), mode)?;
        }
    }

    Ok(())
}
