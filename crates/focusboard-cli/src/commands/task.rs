use std::io::{BufRead, Write};

use clap::Subcommand;
use focusboard_core::tasks::{HttpTaskBackend, Task, TaskId, TaskList, TaskSynchronizer, TaskView};
use focusboard_core::error::Result;
use focusboard_core::{Config, CoreError, DialogKind, Event};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task on the backend
    Add {
        /// Task description
        description: String,
        /// Estimated pomodoros (default: tasks.default_estimate)
        #[arg(long)]
        estimate: Option<u32>,
    },
    /// Flip a task between active and completed
    Toggle {
        /// Task id
        id: TaskId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: TaskId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Terminal stand-in for the task page: nodes are ids and list moves are
/// reported on stderr.
#[derive(Default)]
pub struct TerminalTaskView {
    open_dialog: Option<DialogKind>,
}

impl TaskView for TerminalTaskView {
    type Node = TaskId;

    fn create_node(&mut self, task: &Task) -> TaskId {
        task.id
    }

    fn append(&mut self, list: TaskList, node: &TaskId) {
        let name = match list {
            TaskList::Active => "active",
            TaskList::Completed => "completed",
        };
        eprintln!("{node} -> {name}");
    }

    fn set_completed(&mut self, _node: &TaskId, _completed: bool) {}

    fn remove(&mut self, node: &TaskId) {
        eprintln!("{node} removed");
    }

    fn clear_input(&mut self) {}

    fn close_creation_dialog(&mut self) {}

    fn set_dialog_visible(&mut self, dialog: DialogKind, visible: bool) {
        self.open_dialog = visible.then_some(dialog);
    }
}

fn prompt(question: &str) -> std::io::Result<bool> {
    eprint!("{question} [y/N] ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn print_event(event: &Event) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: TaskAction) -> Result<()> {
    let config = Config::load_or_default();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let backend = HttpTaskBackend::from_config(&config.backend)?;
        tracing::debug!(base = %backend.base_url(), "task backend");
        let sync = TaskSynchronizer::new(backend, TerminalTaskView::default())
            .with_default_estimate(config.tasks.default_estimate);

        match action {
            TaskAction::Add { description, estimate } => {
                let sync = match estimate {
                    Some(n) => sync.with_default_estimate(n),
                    None => sync,
                };
                let event = sync.add_task(&description).await?;
                print_event(&event)?;
            }
            TaskAction::Toggle { id, yes } => {
                confirm_and_send(&sync, DialogKind::Toggle, id, yes, "Toggle completion of").await?;
            }
            TaskAction::Delete { id, yes } => {
                confirm_and_send(&sync, DialogKind::Delete, id, yes, "Permanently delete").await?;
            }
        }
        Ok::<(), CoreError>(())
    })
}

async fn confirm_and_send(
    sync: &TaskSynchronizer<HttpTaskBackend, TerminalTaskView>,
    dialog: DialogKind,
    id: TaskId,
    yes: bool,
    question: &str,
) -> Result<()> {
    match dialog {
        DialogKind::Toggle => sync.request_toggle(id),
        DialogKind::Delete => sync.request_delete(id),
    };

    if !yes && !prompt(&format!("{question} task {}?", id.0))? {
        sync.cancel(dialog);
        eprintln!("cancelled");
        return Ok(());
    }

    if let Some(event) = sync.confirm(dialog).await? {
        print_event(&event)?;
    }
    Ok(())
}
