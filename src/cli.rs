// ABOUTME: Command-line interface definition for the hiremenator binary.
// ABOUTME: Subcommands for serving the HTTP API, one-shot questions and catalog inspection.

use clap::{Parser, Subcommand, ValueEnum};

/// Hire-me-nator career assistant.
#[derive(Parser, Debug)]
#[command(name = "hiremenator", about = "Hire-me-nator career assistant")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Model override for every agent in the catalog.
    #[arg(long, global = true)]
    pub model: Option<String>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API.
    Serve,
    /// Ask the assistant a single question and print the answer.
    Ask {
        /// Message content.
        message: String,
    },
    /// List the agents in the catalog.
    Agents,
    /// Print the agent tree in a machine-readable format.
    Export {
        /// Output format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Yaml)]
        format: ExportFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Yaml,
    Dot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ask_with_global_model() {
        let cli = Cli::parse_from(["hiremenator", "ask", "review my cv", "--model", "m1"]);
        assert_eq!(cli.model.as_deref(), Some("m1"));
        match cli.command {
            Command::Ask { message } => assert_eq!(message, "review my cv"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn export_defaults_to_yaml() {
        let cli = Cli::parse_from(["hiremenator", "export"]);
        assert!(matches!(
            cli.command,
            Command::Export {
                format: ExportFormat::Yaml
            }
        ));

        let cli = Cli::parse_from(["hiremenator", "export", "--format", "dot"]);
        assert!(matches!(
            cli.command,
            Command::Export {
                format: ExportFormat::Dot
            }
        ));
    }
}
