//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "carehub")]
#[command(about = "Hospital records: appointments, beds, patients and wards")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./carehub.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub table: TableCommand,
}

/// Table to operate on.
#[derive(Debug, Subcommand)]
pub enum TableCommand {
    /// Appointments between patients and doctors
    Appointments {
        #[command(subcommand)]
        action: Action,
    },
    /// Beds and their occupancy
    Beds {
        #[command(subcommand)]
        action: Action,
    },
    /// Patient records
    Patients {
        #[command(subcommand)]
        action: Action,
    },
    /// Hospital wards
    Wards {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    /// List the first page of records
    List,
    /// Show one record
    Get {
        /// Record id
        id: String,
    },
    /// Create a record from a JSON object
    Create {
        /// Field values, friendly (`name`) or canonical (`Name_c`) keys
        json: String,
    },
    /// Update a record from a JSON object
    Update {
        /// Record id
        id: String,
        /// Field values, friendly (`name`) or canonical (`Name_c`) keys
        json: String,
    },
    /// Delete a record
    Delete {
        /// Record id
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_update_with_config() {
        let cli = Cli::try_parse_from([
            "carehub",
            "wards",
            "update",
            "3",
            r#"{"floor": 2}"#,
            "--config",
            "ward.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("ward.toml")));
        match cli.table {
            TableCommand::Wards {
                action: Action::Update { id, json },
            } => {
                assert_eq!(id, "3");
                assert_eq!(json, r#"{"floor": 2}"#);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn should_parse_list_without_config() {
        let cli = Cli::try_parse_from(["carehub", "beds", "list"]).unwrap();
        assert!(cli.config.is_none());
        assert!(matches!(
            cli.table,
            TableCommand::Beds {
                action: Action::List
            }
        ));
    }

    #[test]
    fn should_reject_unknown_table() {
        assert!(Cli::try_parse_from(["carehub", "nurses", "list"]).is_err());
    }

    #[test]
    fn should_pass_clap_self_checks() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
