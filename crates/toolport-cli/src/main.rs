//! Toolport - install remote MCP tools into local clients
//!
//! Usage:
//!   toolport <tool-url> <api-key> [client]   # Install (default command)
//!   toolport install <tool-url> <api-key>    # Same, explicit
//!   toolport list                            # Show detected clients

mod ui;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toolport_core::context::AppContext;
use toolport_core::install::InstallRequest;
use toolport_core::process::SystemRunner;
use toolport_core::types::ClientKind;
use toolport_core::verify::{extract_tool_id, normalize_input};

use crate::ui::{ClientChoice, ConsoleReporter, Prompter};

#[derive(Parser)]
#[command(name = "toolport", version)]
#[command(about = "Install remote MCP tools into local clients", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    install: InstallArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Install or update an MCP tool (default)
    Install(InstallArgs),

    /// List detected clients
    List,
}

#[derive(Args, Debug, Default)]
struct InstallArgs {
    /// Tool URL, or a bare tool id such as 0f1234de
    url: Option<String>,

    /// API key used to verify the tool
    api_key: Option<String>,

    /// Install to this client only (claude, windsurf, cursor, vscode, vscode-insiders)
    client: Option<String>,

    /// Skip confirmation prompts; without a client, installs to every detected client
    #[arg(short, long)]
    yes: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    ui::print_welcome();

    let header = failure_header(cli.command.as_ref());
    let result = match cli.command {
        Some(Commands::List) => run_list(),
        Some(Commands::Install(args)) => run_install(args),
        None => run_install(cli.install),
    };

    if let Err(err) = result {
        ui::print_error(header, &err);
        std::process::exit(1);
    }
}

fn failure_header(command: Option<&Commands>) -> &'static str {
    match command {
        Some(Commands::List) => "List failed",
        Some(Commands::Install(_)) | None => "Installation failed",
    }
}

fn run_list() -> Result<()> {
    let ctx = AppContext::load()?;
    let runner = SystemRunner;
    let listings = ctx.installer(&runner).list();
    ui::print_listings(&listings);
    Ok(())
}

fn run_install(args: InstallArgs) -> Result<()> {
    let (Some(url_input), Some(api_key)) = (args.url, args.api_key) else {
        ui::print_usage();
        bail!("URL and API key are required");
    };

    // Input errors surface before any network call.
    let url = normalize_input(&url_input)?;
    let tool_id = extract_tool_id(&url)?;
    let requested = args
        .client
        .as_deref()
        .map(str::parse::<ClientKind>)
        .transpose()?;

    let ctx = AppContext::load()?;
    let verifier = ctx.verifier()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    ui::print_step("Verifying tool...");
    let details = runtime.block_on(verifier.verify(&tool_id, &api_key))?;

    let runner = SystemRunner;
    let installer = ctx.installer(&runner);
    let detected = installer.detector().detect();
    if detected.is_empty() {
        bail!(
            "No supported clients detected. Please install one of: {}",
            ClientKind::id_list()
        );
    }

    let prompter = Prompter::new(args.yes);
    let target = match requested {
        Some(client) if !detected.contains(&client) => bail!(
            "{client} is not installed on your system. Detected clients: {}",
            join_ids(&detected)
        ),
        Some(client) => Some(client),
        None => match prompter.select_client(&detected)? {
            ClientChoice::One(client) => Some(client),
            ClientChoice::AllDetected => None,
        },
    };

    ui::print_details(&details);

    let working_set = target.map_or_else(|| detected.clone(), |client| vec![client]);
    let is_update = working_set
        .iter()
        .any(|client| !installer.existing_installs(*client).is_empty());
    if !prompter.confirm_install(&working_set, is_update)? {
        ui::print_cancelled("Operation cancelled");
        return Ok(());
    }

    let request = InstallRequest {
        details: &details,
        tool_id: &tool_id,
        target,
    };
    let mut reporter = ConsoleReporter::new(prompter);
    let report = installer.install(request, &mut reporter)?;
    ui::print_summary(&report);
    Ok(())
}

fn join_ids(clients: &[ClientKind]) -> String {
    clients
        .iter()
        .map(|client| client.id())
        .collect::<Vec<_>>()
        .join(", ")
}
