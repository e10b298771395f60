//! Command-line arguments.

use clap::{Args, Parser, Subcommand};

use incident_console::config::Config;
use incident_console::errors::AppError;
use incident_console::models::UserRole;

/// Incident Console - admin tables for the incident-reporting backend
#[derive(Parser, Debug)]
#[command(name = "incident-console")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Backend URL (overrides INCIDENTS_API_URL)
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,

    /// Bearer token (overrides INCIDENTS_API_TOKEN)
    #[arg(long = "token")]
    pub token: Option<String>,

    /// Session role: admin or user (overrides INCIDENTS_ROLE)
    #[arg(long = "role")]
    pub role: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Search, sort and page options shared by every table.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Case-insensitive search text
    #[arg(short = 's', long = "search")]
    pub search: Option<String>,

    /// Column to sort by
    #[arg(long = "sort")]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long = "desc", requires = "sort")]
    pub desc: bool,

    /// Page to show (clamped into range)
    #[arg(short = 'p', long = "page", default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Rows per page (overrides INCIDENTS_PAGE_SIZE)
    #[arg(long = "page-size")]
    pub page_size: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every incident (admin)
    Incidents(TableArgs),
    /// List the incidents reported by the current user
    MyIncidents(TableArgs),
    /// List every user (admin)
    Users(TableArgs),
    /// Change an incident's status (admin)
    SetStatus {
        id: i64,
        /// pendiente, en_proceso, resuelto or rechazado
        status: String,
    },
    /// Change a user's role (admin)
    SetRole {
        id: i64,
        /// admin or user
        role: String,
    },
    /// Delete an incident
    DeleteIncident { id: i64 },
    /// Delete a user (admin)
    DeleteUser { id: i64 },
    /// Follow incident updates by polling the backend (admin)
    Watch {
        /// Seconds between polls (overrides INCIDENTS_POLL_SECS)
        #[arg(long = "interval-secs")]
        interval_secs: Option<u64>,

        #[command(flatten)]
        table: TableArgs,
    },
}

impl Cli {
    /// Fold command-line overrides into the environment configuration.
    pub fn apply(&self, config: &mut Config) -> Result<(), AppError> {
        if let Some(url) = &self.url {
            config.api_url = url.clone();
        }
        if let Some(token) = &self.token {
            config.api_token = Some(token.clone());
        }
        if let Some(raw) = &self.role {
            let role = UserRole::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown role '{}'", raw)))?;
            config.role = Some(role);
        }
        if let Command::Watch {
            interval_secs: Some(secs),
            ..
        } = &self.command
        {
            config.poll_interval = std::time::Duration::from_secs((*secs).max(1));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_command() {
        let cli = Cli::parse_from([
            "incident-console",
            "--role",
            "admin",
            "incidents",
            "--search",
            "bache",
            "--sort",
            "status",
            "--desc",
            "--page",
            "-5",
        ]);
        match cli.command {
            Command::Incidents(ref args) => {
                assert_eq!(args.search.as_deref(), Some("bache"));
                assert_eq!(args.sort.as_deref(), Some("status"));
                assert!(args.desc);
                assert_eq!(args.page, -5);
            }
            ref other => panic!("unexpected command {:?}", other),
        }

        let mut config = Config::default();
        cli.apply(&mut config).unwrap();
        assert_eq!(config.role, Some(UserRole::Admin));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let cli = Cli::parse_from(["incident-console", "--role", "root", "users"]);
        assert!(cli.apply(&mut Config::default()).is_err());
    }
}
