//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use hostingde_core::ZoneType;
use hostingde_core::model::DEFAULT_TTL;

/// Manage hosting.de DNS zones and records
#[derive(Debug, Parser)]
#[command(name = "hostingdectl", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Credentials; unset values fall back to the environment
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// API auth token [fallback: HOSTINGDE_AUTH_TOKEN]
    #[arg(long, global = true)]
    pub auth_token: Option<String>,

    /// Account to act for [fallback: HOSTINGDE_ACCOUNT_ID]
    #[arg(long, global = true)]
    pub account_id: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// DNS zones
    Zone {
        #[command(subcommand)]
        action: ZoneCommand,
    },
    /// DNS records
    Record {
        #[command(subcommand)]
        action: RecordCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ZoneCommand {
    /// Create a zone and wait until it is active
    Create {
        /// Domain name
        #[arg(long)]
        name: String,

        /// Zone type (NATIVE, MASTER, SLAVE)
        #[arg(long = "type", default_value_t = ZoneType::Native)]
        zone_type: ZoneType,

        /// Hostmaster email [default: hostmaster@<name>]
        #[arg(long)]
        email: Option<String>,
    },
    /// Show a zone, active or pending
    Get {
        /// Zone ID
        id: String,
    },
    /// Rename a zone or change its email
    Update {
        /// Zone ID
        id: String,

        /// New domain name
        #[arg(long)]
        name: Option<String>,

        /// New hostmaster email
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete and purge a zone
    Delete {
        /// Zone ID
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    /// Add a record to a zone
    Create {
        /// Zone the record belongs to
        #[arg(long)]
        zone_id: String,

        /// Fully qualified record name
        #[arg(long)]
        name: String,

        /// Record type (A, AAAA, CNAME, MX, ...)
        #[arg(long = "type")]
        record_type: String,

        /// Record data
        #[arg(long)]
        content: String,

        /// Time to live in seconds
        #[arg(long, default_value_t = DEFAULT_TTL)]
        ttl: u32,
    },
    /// Show a record
    Get {
        /// Zone the record belongs to; looked up when omitted
        #[arg(long)]
        zone_id: Option<String>,

        /// Record ID
        id: String,
    },
    /// Replace a record; the record gets a new ID
    Update {
        /// Zone the record belongs to
        #[arg(long)]
        zone_id: String,

        /// Record ID
        id: String,

        /// New record name
        #[arg(long)]
        name: Option<String>,

        /// New record type
        #[arg(long = "type")]
        record_type: Option<String>,

        /// New record data
        #[arg(long)]
        content: Option<String>,

        /// New time to live
        #[arg(long)]
        ttl: Option<u32>,
    },
    /// Delete a record
    Delete {
        /// Zone the record belongs to
        #[arg(long)]
        zone_id: String,

        /// Record ID
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_zone_create_defaults_to_native() {
        let cli = Cli::try_parse_from(["hostingdectl", "zone", "create", "--name", "example.test"])
            .unwrap();

        match cli.command {
            Command::Zone {
                action:
                    ZoneCommand::Create {
                        name,
                        zone_type,
                        email,
                    },
            } => {
                assert_eq!(name, "example.test");
                assert_eq!(zone_type, ZoneType::Native);
                assert_eq!(email, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_credentials_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hostingdectl",
            "record",
            "get",
            "--zone-id",
            "z1",
            "r1",
            "--auth-token",
            "t",
        ])
        .unwrap();

        assert_eq!(cli.auth.auth_token.as_deref(), Some("t"));
        assert!(matches!(
            cli.command,
            Command::Record {
                action: RecordCommand::Get { ref zone_id, ref id }
            } if zone_id.as_deref() == Some("z1") && id == "r1"
        ));
    }

    #[test]
    fn test_record_get_without_zone() {
        let cli = Cli::try_parse_from(["hostingdectl", "record", "get", "r1"]).unwrap();

        assert!(matches!(
            cli.command,
            Command::Record {
                action: RecordCommand::Get { zone_id: None, ref id }
            } if id == "r1"
        ));
    }

    #[test]
    fn test_record_create_ttl_default() {
        let cli = Cli::try_parse_from([
            "hostingdectl",
            "record",
            "create",
            "--zone-id",
            "z1",
            "--name",
            "test.example.test",
            "--type",
            "CNAME",
            "--content",
            "www.example.com",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Command::Record {
                action: RecordCommand::Create { ttl: 3600, .. }
            }
        ));
    }

    #[test]
    fn test_unknown_zone_type_is_rejected() {
        let result = Cli::try_parse_from([
            "hostingdectl",
            "zone",
            "create",
            "--name",
            "example.test",
            "--type",
            "PRIMARY",
        ]);
        assert!(result.is_err());
    }
}
