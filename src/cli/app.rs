use super::commands::{self, Command, Switch, TagAction, VocabularyAction};
use super::ui;
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use userdeck::{FetchOutcome, PersistenceOrchestrator, UserStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct App {
    orchestrator: PersistenceOrchestrator,
    store: Arc<UserStore>,
}

impl App {
    pub fn new(orchestrator: PersistenceOrchestrator) -> Self {
        let store = orchestrator.store().clone();
        Self { orchestrator, store }
    }

    /// Reads commands until `quit`, end of input or a termination signal,
    /// then flushes state and stops persistence.
    pub async fn run(mut self) -> Result<()> {
        ui::banner(&self.store);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            prompt();
            let line = tokio::select! {
                line = lines.next_line() => line.context("failed to read input")?,
                _ = &mut shutdown => {
                    info!("termination signal received");
                    break;
                }
            };
            let Some(line) = line else {
                break;
            };
            if self.execute(&line).await == Flow::Exit {
                break;
            }
        }

        self.orchestrator
            .shutdown()
            .await
            .context("failed to stop persistence")?;
        Ok(())
    }

    pub async fn execute(&mut self, line: &str) -> Flow {
        let command = match commands::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(err) => {
                let _ = err.print();
                return Flow::Continue;
            }
        };

        match command {
            Command::Fetch { pages } => {
                for _ in 0..pages {
                    match self.store.fetch_next_page().await {
                        FetchOutcome::Fetched { count } => println!(
                            "fetched {} users (total {}, next page {})",
                            count,
                            self.store.user_count(),
                            self.store.page()
                        ),
                        FetchOutcome::Skipped => println!("a fetch is already running"),
                        FetchOutcome::Failed => {
                            if let Some(message) = self.store.error() {
                                println!("{}", message);
                            }
                            break;
                        }
                    }
                }
            }
            Command::List => ui::user_table(&self.store.filtered_users(), self.store.user_count()),
            Command::Search { text } => {
                self.store.set_search_text(&text.join(" "));
                ui::user_table(&self.store.filtered_users(), self.store.user_count());
            }
            Command::Gender { gender } => {
                self.store.set_gender(gender.as_deref());
                ui::user_table(&self.store.filtered_users(), self.store.user_count());
            }
            Command::Favorites { state } => {
                self.store.set_favorites_only(state == Switch::On);
                ui::user_table(&self.store.filtered_users(), self.store.user_count());
            }
            Command::Show { id } => match self.store.user(&id) {
                Some(user) => {
                    ui::user_detail(&user);
                    self.store.set_selected_user(user);
                }
                None => println!("no user with id '{}'", id),
            },
            Command::Unselect => self.store.clear_selected_user(),
            Command::Favorite { id } => {
                if self.store.toggle_favorite(&id) {
                    if let Some(user) = self.store.user(&id) {
                        println!("{} favorite: {}", user.full_name(), user.is_favorite);
                    }
                } else {
                    println!("no user with id '{}'", id);
                }
            }
            Command::Tag { action } => self.tag(action),
            Command::Tags { action } => self.vocabulary(action),
            Command::Status => ui::status(&self.store),
            Command::Flush => {
                self.orchestrator.flush_now();
                println!("state persisted");
            }
            Command::Quit => return Flow::Exit,
        }
        Flow::Continue
    }

    fn tag(&self, action: TagAction) {
        let (applied, id) = match action {
            TagAction::Add { id, tag } => (self.store.add_tag_to_user(&id, &tag), id),
            TagAction::Remove { id, tag } => (self.store.remove_tag_from_user(&id, &tag), id),
            TagAction::Toggle { id, tag } => (self.store.toggle_user_tag(&id, &tag), id),
        };
        match self.store.user(&id) {
            Some(user) => {
                if !applied {
                    println!("nothing to change");
                }
                println!("{}: [{}]", user.full_name(), user.tags.join(", "));
            }
            None => println!("no user with id '{}'", id),
        }
    }

    fn vocabulary(&self, action: Option<VocabularyAction>) {
        let changed = match action {
            None | Some(VocabularyAction::List) => true,
            Some(VocabularyAction::Add { tag }) => self.store.add_tag(&tag),
            Some(VocabularyAction::Remove { tag }) => self.store.remove_tag(&tag),
            Some(VocabularyAction::Rename { old, new }) => self.store.update_tag(&old, &new),
        };
        if !changed {
            println!("nothing to change");
        }
        ui::tags(&self.store.all_tags());
    }
}

fn prompt() {
    print!("userdeck> ");
    let _ = std::io::stdout().flush();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install ctrl+c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install sigterm handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
