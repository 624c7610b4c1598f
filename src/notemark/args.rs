use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "notemark")]
#[command(about = "Notebook entries with inline rich-text markup", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new notebook entry
    #[command(alias = "n")]
    Create {
        /// Title of the entry
        title: String,

        /// Canonical markup content
        #[arg(required = false)]
        content: Option<String>,

        /// Grouping label (defaults to the configured one)
        #[arg(short = 'G', long)]
        grouping: Option<String>,
    },

    /// List entries, newest first
    #[command(alias = "ls")]
    List {
        /// Only show entries in this grouping
        #[arg(short = 'G', long)]
        grouping: Option<String>,
    },

    /// View one or more entries
    #[command(alias = "v")]
    View {
        /// Indexes (e.g. 1 3 2-4) or a title search
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,

        /// Print the canonical markup instead of the rendered form
        #[arg(long)]
        raw: bool,
    },

    /// Change the title, content or grouping of entries
    #[command(alias = "u")]
    Update {
        /// Indexes (e.g. 1 3 2-4) or a title search
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,

        #[arg(short, long)]
        title: Option<String>,

        /// New canonical markup content
        #[arg(short, long)]
        content: Option<String>,

        /// New content given as rendered markup; parsed back before saving
        #[arg(long, conflicts_with = "content")]
        display: Option<String>,

        #[arg(short = 'G', long)]
        grouping: Option<String>,
    },

    /// Delete one or more entries
    #[command(alias = "rm")]
    Delete {
        /// Indexes (e.g. 1 3 2-4) or a title search
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Toggle a style on a range of an entry's content
    #[command(alias = "f")]
    Format {
        /// Index or title search naming one entry
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,

        /// bold, italic, underline or strike (b, i, u, s)
        #[arg(short, long)]
        style: String,

        /// Selection start (byte offset)
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// Selection end (byte offset, defaults to start)
        #[arg(long)]
        end: Option<usize>,
    },

    /// Render canonical markup to display markup
    Render {
        /// Text to render (reads stdin when omitted)
        text: Option<String>,
    },

    /// Parse display markup back to canonical markup
    Parse {
        /// Markup to parse (reads stdin when omitted)
        markup: Option<String>,
    },

    /// Attach a document id to entries
    Attach {
        /// Index or title search
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,

        /// Document id to attach
        #[arg(short, long)]
        document: String,
    },

    /// Detach a document id from entries
    Detach {
        /// Index or title search
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,

        /// Document id to detach
        #[arg(short, long)]
        document: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (file-ext, default-grouping)
        key: Option<String>,
        /// Value to set
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_arguments() {
        let cli = Cli::try_parse_from([
            "notemark", "format", "2", "--style", "b", "--start", "3", "--end", "7",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Format {
                indexes,
                style,
                start,
                end,
            }) => {
                assert_eq!(indexes, vec!["2"]);
                assert_eq!(style, "b");
                assert_eq!(start, 3);
                assert_eq!(end, Some(7));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn update_rejects_content_and_display_together() {
        let parsed = Cli::try_parse_from([
            "notemark", "update", "1", "--content", "a", "--display", "b",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["notemark", "list", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
