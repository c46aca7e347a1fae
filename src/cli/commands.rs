use clap::{Parser, Subcommand, ValueEnum};

/// One line typed at the prompt.
#[derive(Debug, Parser)]
#[command(multicall = true)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the next page(s) from the directory
    Fetch {
        #[arg(default_value_t = 1)]
        pages: u32,
    },
    /// List users passing the current filters
    #[command(alias = "ls")]
    List,
    /// Set the name search (no text clears it)
    Search { text: Vec<String> },
    /// Restrict to one gender (no value clears it)
    Gender { gender: Option<String> },
    /// Show only favorites
    Favorites { state: Switch },
    /// Show one user and make it the selection
    #[command(alias = "select")]
    Show { id: String },
    /// Clear the selection
    Unselect,
    /// Toggle a user's favorite flag
    #[command(alias = "fav")]
    Favorite { id: String },
    /// Per-user tag operations
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
    /// Tag vocabulary operations
    Tags {
        #[command(subcommand)]
        action: Option<VocabularyAction>,
    },
    /// Store status
    Status,
    /// Persist now
    Flush,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[derive(Debug, Subcommand)]
pub enum TagAction {
    /// Tag a user, registering the tag if new
    Add { id: String, tag: String },
    /// Untag a user
    Remove { id: String, tag: String },
    /// Flip a tag on a user without touching the vocabulary
    Toggle { id: String, tag: String },
}

#[derive(Debug, Subcommand)]
pub enum VocabularyAction {
    List,
    Add { tag: String },
    /// Delete a tag everywhere
    Remove { tag: String },
    /// Rename a tag everywhere
    Rename { old: String, new: String },
}

/// Parses a prompt line; `Ok(None)` for blank input.
pub fn parse(line: &str) -> Result<Option<Command>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    CommandLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}
