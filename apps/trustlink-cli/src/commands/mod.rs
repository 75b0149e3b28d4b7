//! Subcommand handlers. Each prints the backend's JSON response to stdout.

mod chat;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use trustlink_core::AuthToken;
use trustlink_core::ports::BackendApi;
use trustlink_infra::HttpBackendClient;
use trustlink_shared::dto::{
    Credentials, IncidentUpdate, NewIncident, PageParams, RegistrationInput,
};

use crate::cli::{
    Cli, Commands, CreateIncidentArgs, IncidentCommands, ProfileCommands, RegisterArgs,
    UpdateIncidentArgs, UserCommands, incident_query,
};

/// Run the selected subcommand against `client`.
pub async fn run_command(cli: &Cli, client: &HttpBackendClient) -> Result<()> {
    match &cli.command {
        Commands::Health => {
            let health = client.health().await?;
            print_json(&health)
        }
        Commands::Login { email, password } => {
            let credentials = Credentials {
                email: email.clone(),
                password: password.clone(),
            };
            let token = client.login(&credentials).await?;
            tracing::info!("Signed in; export TRUSTLINK_TOKEN to reuse the token");
            print_json(&token)
        }
        Commands::Register(args) => {
            let created = client.register(registration_input(args)).await?;
            print_json(&created)
        }
        Commands::Profile(ProfileCommands::Show) => {
            let user = client.current_user(&require_token(cli)?).await?;
            print_json(&user)
        }
        Commands::Profile(ProfileCommands::Update { payload }) => {
            let update = parse_payload(payload)?;
            let user = client
                .update_current_user(&require_token(cli)?, &update)
                .await?;
            print_json(&user)
        }
        Commands::Incidents(command) => run_incident_command(cli, client, command).await,
        Commands::Users(command) => run_user_command(cli, client, command).await,
        Commands::Emergency { payload } => {
            let emergency = parse_payload(payload)?;
            let sent = client
                .send_emergency(&require_token(cli)?, &emergency)
                .await?;
            print_json(&sent)
        }
        Commands::Report { payload } => {
            let report = parse_payload(payload)?;
            let sent = client.send_report(&require_token(cli)?, &report).await?;
            print_json(&sent)
        }
        Commands::Messages { incident_id, page } => {
            let token = require_token(cli)?;
            let page = PageParams::from(*page);
            let messages = if page.is_empty() {
                client.get_incident_messages(&token, *incident_id).await?
            } else {
                client
                    .get_incident_messages_page(&token, *incident_id, &page)
                    .await?
            };
            print_json(&messages)
        }
        Commands::Send {
            incident_id,
            message,
        } => {
            let sent = client
                .send_chat_message(&require_token(cli)?, *incident_id, message)
                .await?;
            print_json(&sent)
        }
        Commands::EmergencyChat { content } => {
            let sent = client
                .send_emergency_chat(&require_token(cli)?, content)
                .await?;
            print_json(&sent)
        }
        Commands::MarkRead { message_id } => {
            let updated = client
                .mark_message_read(&require_token(cli)?, *message_id)
                .await?;
            print_json(&updated)
        }
        Commands::Chat { incident_id } => {
            chat::run_chat(client, *incident_id, &require_token(cli)?).await
        }
    }
}

async fn run_incident_command(
    cli: &Cli,
    client: &HttpBackendClient,
    command: &IncidentCommands,
) -> Result<()> {
    let token = require_token(cli)?;
    let response = match command {
        IncidentCommands::List { page, status } => {
            let query = incident_query(*page, *status);
            if query.is_empty() {
                client.get_incidents(&token).await?
            } else {
                client.get_incidents_filtered(&token, &query).await?
            }
        }
        IncidentCommands::Show { id } => client.get_incident(&token, *id).await?,
        IncidentCommands::Create(args) => {
            let incident = serde_json::to_value(new_incident(args))?;
            client.create_incident(&token, &incident).await?
        }
        IncidentCommands::Update(args) => {
            let update = serde_json::to_value(incident_update(args))?;
            client.update_incident(&token, args.id, &update).await?
        }
        IncidentCommands::Delete { id } => client.delete_incident(&token, *id).await?,
    };
    print_json(&response)
}

async fn run_user_command(
    cli: &Cli,
    client: &HttpBackendClient,
    command: &UserCommands,
) -> Result<()> {
    let token = require_token(cli)?;
    let response = match command {
        UserCommands::List { page } => client.list_users(&token, &PageParams::from(*page)).await?,
        UserCommands::Show { id } => client.get_user(&token, *id).await?,
        UserCommands::Update { id, payload } => {
            client.update_user(&token, *id, &parse_payload(payload)?).await?
        }
        UserCommands::Delete { id } => client.delete_user(&token, *id).await?,
    };
    print_json(&response)
}

fn require_token(cli: &Cli) -> Result<AuthToken> {
    cli.token
        .as_deref()
        .map(AuthToken::from)
        .context("Authentication required. Use --token or set TRUSTLINK_TOKEN environment variable.")
}

fn parse_payload(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).context("Payload must be valid JSON")
}

fn registration_input(args: &RegisterArgs) -> RegistrationInput {
    let mut input = RegistrationInput::new(&args.email, &args.password);
    input.full_name = args.full_name.clone();
    input.phone_number = args.phone_number.clone();
    input
}

fn new_incident(args: &CreateIncidentArgs) -> NewIncident {
    NewIncident {
        incident_type: args.kind.into(),
        title: args.title.clone(),
        description: args.description.clone(),
        location_lat: args.lat,
        location_lng: args.lng,
        location_address: args.address.clone(),
    }
}

fn incident_update(args: &UpdateIncidentArgs) -> IncidentUpdate {
    IncidentUpdate {
        incident_type: args.kind.map(Into::into),
        title: args.title.clone(),
        description: args.description.clone(),
        location_address: args.address.clone(),
        status: args.status.map(Into::into),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render response")?;
    println!("{}", rendered);
    Ok(())
}
