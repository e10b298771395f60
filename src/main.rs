//! Incident Console
//!
//! Command-line front end for the incident admin tables.

mod cli;

use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use incident_console::api::{ApiClient, IncidentAdminSource, MyIncidentsSource, UserAdminSource};
use incident_console::config::Config;
use incident_console::errors::AppError;
use incident_console::feed::{next_snapshot, Feed};
use incident_console::models::{Incident, IncidentStatus, User, UserRole};
use incident_console::render::render_page;
use incident_console::session::StaticSession;
use incident_console::view::{Collaborator, DataView, RowAction, RowId, TableRow};

use cli::{Cli, Command, TableArgs};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    cli.apply(&mut config)?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Backend URL: {}", config.api_url);
    if config.api_token.is_none() {
        tracing::warn!("No session token configured (INCIDENTS_API_TOKEN)");
    }

    let session = Arc::new(StaticSession::new(config.api_token.clone(), config.role));
    let client = ApiClient::from_config(&config, session)?;

    run(cli.command, &config, client).await?;
    Ok(())
}

async fn run(command: Command, config: &Config, client: ApiClient) -> Result<(), AppError> {
    match command {
        Command::Incidents(args) => {
            let source = Arc::new(IncidentAdminSource::new(client)?);
            let view = open_view::<Incident>("incidents", source, &args, config).await?;
            show(&view)
        }
        Command::MyIncidents(args) => {
            let source = Arc::new(MyIncidentsSource::new(client)?);
            let view = open_view::<Incident>("my incidents", source, &args, config).await?;
            show(&view)
        }
        Command::Users(args) => {
            let source = Arc::new(UserAdminSource::new(client)?);
            let view = open_view::<User>("users", source, &args, config).await?;
            show(&view)
        }
        Command::SetStatus { id, status } => {
            let status = IncidentStatus::parse(&status)
                .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", status)))?;
            let source = Arc::new(IncidentAdminSource::new(client)?);
            act::<Incident>("incidents", source, id, RowAction::Update(status), config).await
        }
        Command::SetRole { id, role } => {
            let role = UserRole::parse(&role)
                .ok_or_else(|| AppError::Validation(format!("Unknown role '{}'", role)))?;
            let source = Arc::new(UserAdminSource::new(client)?);
            act::<User>("users", source, id, RowAction::Update(role), config).await
        }
        Command::DeleteIncident { id } => {
            // Admins delete from the full table; reporters from their own.
            let source: Arc<dyn Collaborator<Incident>> =
                match IncidentAdminSource::new(client.clone()) {
                    Ok(admin) => Arc::new(admin),
                    Err(_) => Arc::new(MyIncidentsSource::new(client)?),
                };
            act::<Incident>("incidents", source, id, RowAction::Delete, config).await
        }
        Command::DeleteUser { id } => {
            let source = Arc::new(UserAdminSource::new(client)?);
            act::<User>("users", source, id, RowAction::Delete, config).await
        }
        Command::Watch { table, .. } => watch(client, &table, config).await,
    }
}

/// Build a view, load it and apply the search/sort/page arguments.
async fn open_view<T>(
    name: &'static str,
    source: Arc<dyn Collaborator<T>>,
    args: &TableArgs,
    config: &Config,
) -> Result<DataView<T>, AppError>
where
    T: TableRow,
    T::Field: FromStr<Err = AppError>,
{
    let mut view =
        DataView::new(name, source).with_page_size(args.page_size.unwrap_or(config.page_size));

    if let Err(e) = view.load().await {
        print!("{}", render_page(&view));
        return Err(e);
    }
    apply_args(&mut view, args)?;
    Ok(view)
}

fn apply_args<T>(view: &mut DataView<T>, args: &TableArgs) -> Result<(), AppError>
where
    T: TableRow,
    T::Field: FromStr<Err = AppError>,
{
    if let Some(text) = &args.search {
        view.set_filter_text(text.as_str());
    }
    if let Some(raw) = &args.sort {
        let field: T::Field = raw.parse()?;
        view.request_sort(field);
        if args.desc {
            view.request_sort(field);
        }
    }
    view.go_to_page(args.page);
    Ok(())
}

fn show<T: TableRow>(view: &DataView<T>) -> Result<(), AppError> {
    print!("{}", render_page(view));
    Ok(())
}

/// Load the table, run one row action and print the resulting page.
async fn act<T>(
    name: &'static str,
    source: Arc<dyn Collaborator<T>>,
    id: RowId,
    action: RowAction<T::Patch>,
    config: &Config,
) -> Result<(), AppError>
where
    T: TableRow,
    T::Field: FromStr<Err = AppError>,
{
    let mut view = open_view(name, source, &TableArgs::default(), config).await?;
    if view.row(id).is_none() {
        return Err(AppError::NotFound(format!("Row {} is not in {}", id, name)));
    }

    let outcome = view.perform_row_action(id, action).await?;
    tracing::info!(row = id, ?outcome, "Row action applied");
    print!("{}", render_page(&view));
    Ok(())
}

/// Re-render the incident table every time the feed delivers a snapshot.
async fn watch(client: ApiClient, args: &TableArgs, config: &Config) -> Result<(), AppError> {
    let source: Arc<dyn Collaborator<Incident>> = Arc::new(IncidentAdminSource::new(client)?);
    let mut view = DataView::new("incidents", Arc::clone(&source))
        .with_page_size(args.page_size.unwrap_or(config.page_size));

    let feed = Feed::spawn(source, config.poll_interval);
    let mut updates = feed.subscribe();
    let mut first = true;

    loop {
        tokio::select! {
            snapshot = next_snapshot(&mut updates) => {
                let Some(snapshot) = snapshot else { break };
                view.replace_snapshot(snapshot.as_ref().clone());
                if first {
                    apply_args(&mut view, args)?;
                    first = false;
                }
                print!("{}", render_page(&view));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping incident feed");
                break;
            }
        }
    }

    feed.stop();
    Ok(())
}
