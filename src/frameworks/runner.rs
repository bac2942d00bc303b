// Framework bootstrap: tracing, settings, adapters, and command dispatch.

use crate::domain::{ClipboardSink, GuestListError, MergedGuest};
use crate::frameworks::cli::{Cli, Command, CsvArgs, EventSource, ListArgs};
use crate::frameworks::config::{self, ConfigError, Settings};
use crate::interface_adapters::{
    ClientInitError, FileSink, JsonFileFavoriteStore, LumaClient, StdoutSink, SystemClipboard,
};
use crate::use_cases::{
    GetGuestListUseCase, GuestListView, copy_guest_csv, extract_event_id, guest_list_view,
    toggle_favorite,
};

use clap::Parser;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientInitError),
    #[error(transparent)]
    GuestList(#[from] GuestListError),
    #[error("failed to load event page {page}: {reason}")]
    Page { page: String, reason: String },
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

fn init_runtime(verbose: bool) {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Stdout carries the guest data, so logs go to stderr.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_runtime(cli.verbose);

    match dispatch(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed.");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(command: Command) -> Result<ExitCode, RunError> {
    let settings = config::load()?;
    tracing::debug!(
        api_base_url = %settings.api_base_url,
        authenticated = settings.session_cookie.is_some(),
        page_size = settings.page_size,
        request_timeout_ms = settings.request_timeout_ms,
        max_retries = settings.max_retries,
        favorites_path = %settings.favorites_path.display(),
        "settings loaded."
    );

    execute(&settings, command).await
}

async fn execute(settings: &Settings, command: Command) -> Result<ExitCode, RunError> {
    let store = JsonFileFavoriteStore::new(settings.favorites_path.clone());

    match command {
        Command::List(args) => list(settings, remote_client(settings)?, store, args).await,
        Command::Csv(args) => csv(settings, remote_client(settings)?, store, args).await,
        // Purely local; needs neither the api url nor the session cookie.
        Command::Favorite(args) => {
            toggle_favorite(&store, &args.guest_id, !args.off).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::EventId(args) => {
            let html = load_page(&remote_client(settings)?, &args.page).await?;
            let event_id = extract_event_id(&html).ok_or(GuestListError::MissingEventId)?;
            println!("{event_id}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn remote_client(settings: &Settings) -> Result<LumaClient, RunError> {
    Ok(LumaClient::new(
        &settings.api_base_url,
        settings.session_cookie.as_deref(),
        settings.request_timeout(),
    )?)
}

async fn list(
    settings: &Settings,
    client: LumaClient,
    store: JsonFileFavoriteStore,
    args: ListArgs,
) -> Result<ExitCode, RunError> {
    let view = guest_list_view(&load_guests(settings, client, store, &args.source).await?);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }
    Ok(ExitCode::SUCCESS)
}

async fn csv(
    settings: &Settings,
    client: LumaClient,
    store: JsonFileFavoriteStore,
    args: CsvArgs,
) -> Result<ExitCode, RunError> {
    let guests = load_guests(settings, client, store, &args.source).await?;

    let sink: Box<dyn ClipboardSink> = match (args.output, args.clipboard) {
        (Some(path), _) => Box::new(FileSink { path }),
        (None, true) => Box::new(SystemClipboard),
        (None, false) => Box::new(StdoutSink),
    };

    // A failed copy is not an error, but the exit status still reports it.
    if copy_guest_csv(sink.as_ref(), &guests).await {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn load_guests(
    settings: &Settings,
    client: LumaClient,
    store: JsonFileFavoriteStore,
    source: &EventSource,
) -> Result<Vec<MergedGuest>, RunError> {
    let guests = match (&source.event_id, &source.page) {
        (Some(event_id), _) => {
            GetGuestListUseCase::new(client, store, settings.fetch_settings())
                .execute(event_id)
                .await?
        }
        (None, Some(page)) => {
            let html = load_page(&client, page).await?;
            GetGuestListUseCase::new(client, store, settings.fetch_settings())
                .execute_for_page(&html)
                .await?
        }
        (None, None) => return Err(GuestListError::MissingEventId.into()),
    };
    Ok(guests)
}

async fn load_page(client: &LumaClient, page: &str) -> Result<String, RunError> {
    let page_error = |reason: String| RunError::Page {
        page: page.to_string(),
        reason,
    };
    if page.starts_with("http://") || page.starts_with("https://") {
        client
            .fetch_page_html(page)
            .await
            .map_err(|err| page_error(err.to_string()))
    } else {
        tokio::fs::read_to_string(page)
            .await
            .map_err(|err| page_error(err.to_string()))
    }
}

fn print_view(view: &GuestListView) {
    println!("{}", view.title);
    for guest in &view.guests {
        let marker = if guest.favorited { "*" } else { " " };
        let name = guest.name.as_deref().unwrap_or("(no name)");
        println!("{marker} {name}  {}", guest.profile_url);
        if let Some(bio) = &guest.bio {
            println!("    {}", bio.replace(['\r', '\n'], " "));
        }
        for link in &guest.social_links {
            println!("    {}", link.href);
        }
    }
}
