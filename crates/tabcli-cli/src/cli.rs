use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tabcli")]
#[command(about = "Tableau REST API client with cached session auth", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication operations
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// List resources on the current site
    List {
        #[command(subcommand)]
        command: ListCommand,
    },

    /// Get resource details
    Get {
        #[command(subcommand)]
        command: GetCommand,
    },

    /// Trigger an extract refresh task to run now
    Refresh {
        /// Extract refresh task ID
        task_id: String,
    },

    /// Manage workbook permissions
    Permissions {
        #[command(subcommand)]
        command: PermissionsCommand,
    },
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Sign in and cache the session
    Login,
    /// Sign out and clear the cached session
    Logout,
    /// Show cached session status
    Status,
}

#[derive(Subcommand)]
pub enum ListCommand {
    /// List sites (Tableau Server only)
    Sites,
    /// List projects in the current site
    Projects,
    /// List workbooks in the current site
    Workbooks,
    /// List extract refresh tasks
    RefreshTasks,
}

#[derive(Subcommand)]
pub enum GetCommand {
    /// Workbook details
    Workbook {
        /// Workbook LUID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum PermissionsCommand {
    /// Get permissions for a workbook
    Get {
        /// Workbook LUID
        workbook_id: String,
    },
    /// Add a user capability to a workbook
    Add {
        /// Workbook LUID
        workbook_id: String,
        /// User LUID
        #[arg(long)]
        user: String,
        /// Capability name (e.g. Read, Write)
        #[arg(long)]
        capability: String,
        /// Allow or Deny
        #[arg(long)]
        mode: PermissionMode,
    },
    /// Delete a user capability from a workbook
    Delete {
        /// Workbook LUID
        workbook_id: String,
        /// User LUID
        #[arg(long)]
        user: String,
        /// Capability name (e.g. Read, Write)
        #[arg(long)]
        capability: String,
        /// Allow or Deny
        #[arg(long)]
        mode: PermissionMode,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PermissionMode {
    Allow,
    Deny,
}

impl PermissionMode {
    /// Capitalized form the API expects in payloads and paths
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionMode::Allow => "Allow",
            PermissionMode::Deny => "Deny",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_permissions_add() {
        let cli = Cli::try_parse_from([
            "tabcli",
            "permissions",
            "add",
            "w1",
            "--user",
            "u1",
            "--capability",
            "Read",
            "--mode",
            "allow",
        ])
        .expect("parse failed");

        match cli.command {
            Commands::Permissions {
                command:
                    PermissionsCommand::Add {
                        workbook_id,
                        user,
                        capability,
                        mode,
                    },
            } => {
                assert_eq!(workbook_id, "w1");
                assert_eq!(user, "u1");
                assert_eq!(capability, "Read");
                assert_eq!(mode.as_str(), "Allow");
            }
            _ => panic!("parsed into the wrong command"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_mode() {
        assert!(Cli::try_parse_from([
            "tabcli",
            "permissions",
            "add",
            "w1",
            "--user",
            "u1",
            "--capability",
            "Read",
            "--mode",
            "maybe",
        ])
        .is_err());
    }
}
