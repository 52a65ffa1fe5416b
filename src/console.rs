//! Line-oriented front end for the folder explorer.

use std::future::Future;

use tokio::io::{AsyncBufReadExt, BufReader};

use rdm_client::{FolderSnapshot, RemoteFolderHost, SyncHandle};
use rdm_core::error::AppError;
use rdm_core::types::FolderId;
use rdm_explorer::{
    DropResolution, FolderExplorer, FolderTreeHost, IgnoreReason, Notice, NoticeLevel,
    RenameOutcome,
};

pub const HELP: &str = "\
commands:
  show                      redraw the tree
  expand <id> | collapse <id>
  select <id>
  drag <id>                 start dragging a folder
  hover <target>            <id>, dropzone-<id> or root-drop-area
  drop [target]             release the drag (over the hovered target by default)
  cancel                    abort the drag
  rename <id> [name]        start editing, optionally with a new name
  edit <name>               replace the edit text
  commit                    commit the edit
  new                       create a top-level folder
  newsub <id>               create a subfolder
  rm <id>                   delete a folder and its subfolders
  ids                       toggle folder ids
  reload                    refetch the folder list
  quit";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Expand(FolderId),
    Collapse(FolderId),
    Select(FolderId),
    Drag(FolderId),
    Hover(String),
    Drop(Option<String>),
    Cancel,
    Rename(FolderId, Option<String>),
    Edit(String),
    Commit,
    New,
    NewSub(FolderId),
    Remove(FolderId),
    ToggleIds,
    Reload,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let id = || {
            if rest.is_empty() {
                Err(format!("usage: {word} <id>"))
            } else {
                Ok(FolderId::from(rest))
            }
        };

        let command = match word {
            "show" | "ls" => Self::Show,
            "expand" => Self::Expand(id()?),
            "collapse" => Self::Collapse(id()?),
            "select" => Self::Select(id()?),
            "drag" => Self::Drag(id()?),
            "hover" => Self::Hover(rest.to_string()),
            "drop" => Self::Drop((!rest.is_empty()).then(|| rest.to_string())),
            "cancel" => Self::Cancel,
            "rename" => match rest.split_once(char::is_whitespace) {
                Some((target, name)) => Self::Rename(FolderId::from(target), Some(name.trim().to_string())),
                None => Self::Rename(id()?, None),
            },
            "edit" => Self::Edit(rest.to_string()),
            "commit" => Self::Commit,
            "new" => Self::New,
            "newsub" => Self::NewSub(id()?),
            "rm" | "delete" => Self::Remove(id()?),
            "ids" => Self::ToggleIds,
            "reload" => Self::Reload,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command '{other}', try 'help'")),
        };
        Ok(Some(command))
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Redraw,
    Message(String),
    Reload,
    Quit,
}

/// Explorer plus view settings.
pub struct Console<H> {
    explorer: FolderExplorer<H>,
    indent_width: usize,
    show_ids: bool,
}

impl<H: FolderTreeHost> Console<H> {
    pub fn new(explorer: FolderExplorer<H>, indent_width: usize) -> Self {
        Self {
            explorer,
            indent_width,
            show_ids: false,
        }
    }

    pub fn explorer(&self) -> &FolderExplorer<H> {
        &self.explorer
    }

    /// Take a new server state.
    pub fn apply(&mut self, snapshot: &FolderSnapshot) {
        self.explorer.set_folders(&snapshot.folders);
        self.explorer.set_selected(snapshot.selected.clone());
    }

    pub fn render(&self) -> String {
        self.explorer.render(self.indent_width, self.show_ids)
    }

    pub fn execute(&mut self, command: Command) -> Reply {
        let explorer = &mut self.explorer;
        match command {
            Command::Show => Reply::Redraw,
            Command::Expand(id) => {
                if !explorer.index().contains(id.as_str()) {
                    return unknown(&id);
                }
                explorer.expand(&id);
                Reply::Redraw
            }
            Command::Collapse(id) => {
                explorer.collapse(id.as_str());
                Reply::Redraw
            }
            Command::Select(id) => {
                if explorer.select(&id) {
                    Reply::Message(format!("selecting {id}"))
                } else {
                    unknown(&id)
                }
            }
            Command::Drag(id) => {
                if explorer.drag_start(&id) {
                    Reply::Redraw
                } else {
                    unknown(&id)
                }
            }
            Command::Hover(target) => {
                if !explorer.drag().is_dragging() {
                    return Reply::Message("not dragging".to_string());
                }
                explorer.drag_over((!target.is_empty()).then_some(target.as_str()));
                Reply::Redraw
            }
            Command::Drop(target) => {
                let over = target.or_else(|| explorer.drag().hovered().map(ToString::to_string));
                match explorer.drop_on(over.as_deref()) {
                    DropResolution::Move {
                        folder_id,
                        new_parent_id,
                    } => Reply::Message(match new_parent_id {
                        Some(parent) => format!("moving {folder_id} into {parent}"),
                        None => format!("moving {folder_id} to the top level"),
                    }),
                    DropResolution::IntoDescendant { .. } => Reply::Redraw,
                    DropResolution::Ignored(reason) => Reply::Message(ignored(reason).to_string()),
                }
            }
            Command::Cancel => {
                explorer.drag_cancel();
                Reply::Redraw
            }
            Command::Rename(id, name) => {
                if !explorer.start_rename(&id) {
                    return unknown(&id);
                }
                if let Some(name) = name {
                    explorer.edit_rename(&name);
                }
                Reply::Redraw
            }
            Command::Edit(text) => {
                explorer.edit_rename(&text);
                Reply::Redraw
            }
            Command::Commit => match explorer.commit_rename() {
                RenameOutcome::NotEditing => Reply::Message("nothing to commit".to_string()),
                RenameOutcome::Blank => Reply::Redraw,
                RenameOutcome::Unchanged => Reply::Redraw,
                RenameOutcome::Renamed { id, new_name } => {
                    Reply::Message(format!("renaming {id} to '{new_name}'"))
                }
            },
            Command::New => {
                explorer.create_root_folder();
                Reply::Message("creating folder".to_string())
            }
            Command::NewSub(parent) => {
                if explorer.create_subfolder(&parent) {
                    Reply::Message(format!("creating folder in {parent}"))
                } else {
                    unknown(&parent)
                }
            }
            Command::Remove(id) => {
                if explorer.delete_folder(&id) {
                    Reply::Message(format!("deleting {id}"))
                } else {
                    unknown(&id)
                }
            }
            Command::ToggleIds => {
                self.show_ids = !self.show_ids;
                Reply::Redraw
            }
            Command::Reload => Reply::Reload,
            Command::Help => Reply::Message(HELP.to_string()),
            Command::Quit => Reply::Quit,
        }
    }
}

fn unknown(id: &FolderId) -> Reply {
    Reply::Message(format!("no folder with id {id}"))
}

fn ignored(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::NoTarget => "dropped outside any target",
        IgnoreReason::UnknownDragged => "not dragging",
        IgnoreReason::UnknownTarget => "no such drop target",
        IgnoreReason::SelfDrop => "dropped onto itself",
    }
}

fn print_notice(notice: &Notice) {
    let marker = match notice.level {
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Warning => "⚠",
        NoticeLevel::Error => "✗",
    };
    println!("{marker} {}", notice.message);
}

/// Read commands from stdin until `quit`, end of input or `shutdown`.
pub async fn run(
    mut console: Console<RemoteFolderHost>,
    mut handle: SyncHandle,
    shutdown: impl Future<Output = ()>,
) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    tokio::pin!(shutdown);

    println!("type 'help' for commands");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let command = match Command::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(message) => {
                        println!("{message}");
                        continue;
                    }
                };
                match console.execute(command) {
                    Reply::Redraw => print!("{}", console.render()),
                    Reply::Message(message) => println!("{message}"),
                    Reply::Reload => console.explorer().host().refresh(),
                    Reply::Quit => break,
                }
            }
            changed = handle.snapshots.changed() => {
                if changed.is_err() {
                    tracing::warn!("Sync worker stopped");
                    break;
                }
                let snapshot = handle.snapshots.borrow_and_update().clone();
                console.apply(&snapshot);
                print!("{}", console.render());
            }
            Some(notice) = handle.notices.recv() => print_notice(&notice),
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdm_core::events::FolderIntent;
    use rdm_entity::folder::FolderRecord;
    use rdm_explorer::IntentLog;

    fn console() -> Console<IntentLog> {
        let mut console = Console::new(FolderExplorer::new(IntentLog::new()), 2);
        console.apply(&FolderSnapshot {
            folders: vec![
                FolderRecord::new("a", "Alpha", None),
                FolderRecord::new("b", "Beta", Some("a")),
                FolderRecord::new("d", "Delta", None),
            ],
            selected: None,
            revision: 1,
        });
        console
    }

    fn send(console: &mut Console<IntentLog>, line: &str) -> Reply {
        let command = Command::parse(line).expect("valid").expect("non-empty");
        console.execute(command)
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(
            Command::parse("expand a").unwrap(),
            Some(Command::Expand(FolderId::from("a")))
        );
        assert_eq!(
            Command::parse("rename a  New  name ").unwrap(),
            Some(Command::Rename(FolderId::from("a"), Some("New  name".to_string())))
        );
        assert_eq!(Command::parse("drop").unwrap(), Some(Command::Drop(None)));
        assert_eq!(
            Command::parse("drop   dropzone-b  ").unwrap(),
            Some(Command::Drop(Some("dropzone-b".to_string())))
        );
        assert!(Command::parse("expand").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }

    #[test]
    fn test_expand_and_render() {
        let mut console = console();
        assert_eq!(send(&mut console, "expand a"), Reply::Redraw);
        assert_eq!(console.render(), "▾ Alpha\n    Beta\n  Delta\n");

        send(&mut console, "collapse a");
        assert_eq!(console.render(), "▸ Alpha\n  Delta\n");
    }

    #[test]
    fn test_drag_hover_drop_emits_move() {
        let mut console = console();
        send(&mut console, "drag d");
        send(&mut console, "hover a");
        assert!(console.render().contains("⇐ drop inside"));

        let reply = send(&mut console, "drop");
        assert_eq!(reply, Reply::Message("moving d into a".to_string()));
        assert_eq!(
            console.explorer().host().intents,
            vec![FolderIntent::Move {
                folder_id: FolderId::from("d"),
                new_parent_id: Some(FolderId::from("a")),
            }]
        );
    }

    #[test]
    fn test_drop_into_descendant_warns() {
        let mut console = console();
        send(&mut console, "drag a");
        send(&mut console, "drop b");
        let host = console.explorer().host();
        assert!(host.intents.is_empty());
        assert_eq!(host.notices.len(), 1);
        assert_eq!(host.notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_rename_flow() {
        let mut console = console();
        send(&mut console, "rename d");
        send(&mut console, "edit  Archive ");
        assert!(console.render().contains("[Archive]"));

        let reply = send(&mut console, "commit");
        assert_eq!(reply, Reply::Message("renaming d to 'Archive'".to_string()));
    }

    #[test]
    fn test_unknown_ids() {
        let mut console = console();
        assert_eq!(
            send(&mut console, "select zz"),
            Reply::Message("no folder with id zz".to_string())
        );
        send(&mut console, "newsub zz");
        send(&mut console, "rm zz");
        assert!(console.explorer().host().intents.is_empty());
    }

    #[test]
    fn test_create_and_quit() {
        let mut console = console();
        send(&mut console, "new");
        send(&mut console, "newsub a");
        assert_eq!(console.explorer().host().intents.len(), 2);
        assert!(console.explorer().is_expanded("a"));
        assert_eq!(send(&mut console, "quit"), Reply::Quit);
    }
}
