//! Command-line surface of the `trustlink` binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

use trustlink_core::{IncidentId, MessageId, UserId};
use trustlink_shared::dto::{IncidentQuery, IncidentStatus, IncidentType, PageParams};

#[derive(Parser, Debug)]
#[command(name = "trustlink")]
#[command(author, version, about = "Client for the TrustLink incident-reporting backend", long_about = None)]
pub struct Cli {
    /// API origin including the /api prefix (overrides TRUSTLINK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// WebSocket origin including the /api prefix (overrides TRUSTLINK_WS_URL)
    #[arg(long, global = true)]
    pub ws_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Check the status of incident listing and creation like every other call
    #[arg(long, global = true)]
    pub strict_status: bool,

    /// Bearer token returned by `login`
    #[arg(long, env = "TRUSTLINK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the backend is reachable
    Health,

    /// Exchange email and password for an access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create a citizen account
    Register(RegisterArgs),

    /// Show or update the signed-in profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Incident management
    #[command(subcommand)]
    Incidents(IncidentCommands),

    /// User administration (admin accounts only)
    #[command(subcommand)]
    Users(UserCommands),

    /// Send an emergency alert (JSON payload)
    Emergency { payload: String },

    /// Send a report (JSON payload)
    Report { payload: String },

    /// Message history of an incident
    Messages {
        incident_id: IncidentId,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Post a chat message to an incident
    Send {
        incident_id: IncidentId,
        message: String,
    },

    /// Send an emergency chat message
    EmergencyChat { content: String },

    /// Mark a chat message as read
    MarkRead { message_id: MessageId },

    /// Live chat on an incident; each stdin line is sent as a message
    Chat { incident_id: IncidentId },
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub phone_number: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    Show,
    /// Apply a JSON patch to the profile
    Update { payload: String },
}

#[derive(Subcommand, Debug)]
pub enum IncidentCommands {
    /// List incidents; paging or a status filter switches to the checked query
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, value_enum)]
        status: Option<IncidentState>,
    },
    Show {
        id: IncidentId,
    },
    Create(CreateIncidentArgs),
    Update(UpdateIncidentArgs),
    Delete {
        id: IncidentId,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: UserId,
    },
    /// Apply a JSON patch to a user
    Update {
        id: UserId,
        payload: String,
    },
    Delete {
        id: UserId,
    },
}

/// `--skip`/`--limit` paging flags.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PageArgs {
    /// Number of records to skip
    #[arg(long)]
    pub skip: Option<u32>,
    /// Maximum number of records to return
    #[arg(long)]
    pub limit: Option<u32>,
}

impl From<PageArgs> for PageParams {
    fn from(args: PageArgs) -> Self {
        PageParams::new(args.skip, args.limit)
    }
}

/// Query for `incidents list`.
pub fn incident_query(page: PageArgs, status: Option<IncidentState>) -> IncidentQuery {
    IncidentQuery {
        page: page.into(),
        status: status.map(Into::into),
    }
}

#[derive(Args, Debug)]
pub struct CreateIncidentArgs {
    #[arg(long = "type", value_enum)]
    pub kind: IncidentKind,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateIncidentArgs {
    pub id: IncidentId,
    #[arg(long = "type", value_enum)]
    pub kind: Option<IncidentKind>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<IncidentState>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentKind {
    Theft,
    Violence,
    Vandalism,
    Traffic,
    Noise,
    Other,
}

impl From<IncidentKind> for IncidentType {
    fn from(kind: IncidentKind) -> Self {
        match kind {
            IncidentKind::Theft => IncidentType::Theft,
            IncidentKind::Violence => IncidentType::Violence,
            IncidentKind::Vandalism => IncidentType::Vandalism,
            IncidentKind::Traffic => IncidentType::Traffic,
            IncidentKind::Noise => IncidentType::Noise,
            IncidentKind::Other => IncidentType::Other,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentState {
    Reported,
    InProgress,
    Resolved,
    Closed,
}

impl From<IncidentState> for IncidentStatus {
    fn from(state: IncidentState) -> Self {
        match state {
            IncidentState::Reported => IncidentStatus::Reported,
            IncidentState::InProgress => IncidentStatus::InProgress,
            IncidentState::Resolved => IncidentStatus::Resolved,
            IncidentState::Closed => IncidentStatus::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_incident_create() {
        let cli = Cli::try_parse_from([
            "trustlink",
            "incidents",
            "create",
            "--type",
            "theft",
            "--title",
            "Bike",
            "--description",
            "Stolen",
            "--lat",
            "5.6",
            "--lng",
            "-0.2",
        ])
        .unwrap();

        match cli.command {
            Commands::Incidents(IncidentCommands::Create(args)) => {
                assert_eq!(args.kind, IncidentKind::Theft);
                assert_eq!(args.lat, Some(5.6));
                assert_eq!(args.lng, Some(-0.2));
                assert!(args.address.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_latitude_requires_longitude() {
        let result = Cli::try_parse_from([
            "trustlink",
            "incidents",
            "create",
            "--type",
            "noise",
            "--title",
            "t",
            "--description",
            "d",
            "--lat",
            "1.0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "trustlink",
            "messages",
            "12",
            "--api-url",
            "https://api.example.com/api",
            "--strict-status",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("https://api.example.com/api"));
        assert!(cli.strict_status);
        assert!(matches!(
            cli.command,
            Commands::Messages {
                incident_id: 12,
                ..
            }
        ));
    }

    #[test]
    fn test_status_values_use_kebab_case() {
        let cli = Cli::try_parse_from([
            "trustlink",
            "incidents",
            "update",
            "4",
            "--status",
            "in-progress",
        ])
        .unwrap();

        match cli.command {
            Commands::Incidents(IncidentCommands::Update(args)) => {
                assert_eq!(args.id, 4);
                assert_eq!(
                    args.status.map(IncidentStatus::from),
                    Some(IncidentStatus::InProgress)
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_negative_coordinates_are_values() {
        let cli = Cli::try_parse_from([
            "trustlink",
            "incidents",
            "create",
            "--type",
            "traffic",
            "--title",
            "t",
            "--description",
            "d",
            "--lat",
            "-33.9",
            "--lng",
            "-70.6",
        ])
        .unwrap();

        let Commands::Incidents(IncidentCommands::Create(args)) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(args.lat, Some(-33.9));
        assert_eq!(args.lng, Some(-70.6));
    }

    #[test]
    fn test_incident_list_paging_and_status() {
        let cli = Cli::try_parse_from([
            "trustlink",
            "incidents",
            "list",
            "--limit",
            "10",
            "--status",
            "reported",
        ])
        .unwrap();

        let Commands::Incidents(IncidentCommands::List { page, status }) = cli.command else {
            panic!("unexpected command");
        };
        let query = incident_query(page, status);
        assert_eq!(query.page, PageParams::new(None, Some(10)));
        assert_eq!(query.status, Some(IncidentStatus::Reported));
    }

    #[test]
    fn test_users_update_takes_id_and_payload() {
        let cli = Cli::try_parse_from(["trustlink", "users", "update", "7", r#"{"is_active":false}"#])
            .unwrap();

        assert!(matches!(
            cli.command,
            Commands::Users(UserCommands::Update { id: 7, .. })
        ));
    }
}
