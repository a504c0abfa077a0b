//! Console output and prompts for the install flow.
//!
//! Uses dialoguer for terminal prompts and console for styling.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Select, theme::ColorfulTheme};

use toolport_core::Error;
use toolport_core::config::WriteOutcome;
use toolport_core::install::{ClientListing, ClientOutcome, InstallReport, InstallReporter};
use toolport_core::types::{ClientKind, ServerDetails};

const RULE: &str = "  ───────────────────────────";

pub fn print_welcome() {
    println!();
    println!("{}", style("  Toolport MCP Tool Installer").bold().cyan());
    println!(
        "  {}",
        style(format!("Supported clients: {}", ClientKind::id_list())).dim()
    );
    println!();
}

pub fn print_usage() {
    println!("{}", style("  Usage").bold());
    println!("{RULE}");
    println!(
        "  {} Install a tool:   {} {} {} {}",
        style("→").dim(),
        style("toolport").green(),
        style("<tool-url>").yellow(),
        style("<api-key>").yellow(),
        style("[client]").dim()
    );
    println!(
        "  {} List clients:     {}",
        style("→").dim(),
        style("toolport list").green()
    );
    println!();
}

pub fn print_step(message: &str) {
    println!("  {}", style(message).dim());
}

pub fn print_cancelled(message: &str) {
    println!("  {}", style(message).yellow());
}

/// Render a failure, using the short form for known error categories.
/// Console text for `err`, plus whether the usage hint should follow it.
fn error_message(err: &anyhow::Error) -> (String, bool) {
    match err.downcast_ref::<Error>() {
        Some(core) => (core.friendly(), core.is_input_error()),
        None => (format!("{err:#}"), false),
    }
}

pub fn print_error(header: &str, err: &anyhow::Error) {
    let (message, show_usage) = error_message(err);
    eprintln!();
    eprintln!("{}", style(format!("  {header}")).bold().red());
    eprintln!("  {}", style(message).red());
    if show_usage {
        eprintln!();
        print_usage();
    }
}

pub fn print_details(details: &ServerDetails) {
    println!();
    println!("{}", style("  Server Details").bold());
    println!("{RULE}");
    println!("  Server ID: {}", style(&details.server_id).green());
    println!("  Type:      {}", style(&details.server_type).green());
    println!("  Endpoint:  {}", style(&details.endpoint).green());
    if !details.supported_agents.is_empty() {
        println!();
        println!("{}", style("  Supported Agents").bold());
        for agent in &details.supported_agents {
            println!("  • {}", style(agent).green());
        }
    }
    println!();
}

pub fn print_listings(listings: &[ClientListing]) {
    if listings.is_empty() {
        println!("  {}", style("No supported clients detected").yellow());
        return;
    }
    println!("{}", style("  Detected Clients").bold());
    println!("{RULE}");
    for listing in listings {
        println!(
            "  {}: {}",
            style(listing.client).cyan(),
            listing_detail(listing)
        );
    }
}

fn listing_detail(listing: &ClientListing) -> String {
    match listing.servers {
        Some(1) => "1 MCP server configured".to_string(),
        Some(count) => format!("{count} MCP servers configured"),
        None => style("Configuration managed externally")
            .dim()
            .italic()
            .to_string(),
    }
}

pub fn print_summary(report: &InstallReport) {
    if report.nothing_to_do() {
        println!("  {}", style("No MCP-compatible clients detected.").yellow());
        return;
    }
    if report.cancelled {
        print_cancelled("Installation cancelled");
    }
    let Some(first) = report.succeeded().next() else {
        return;
    };

    println!();
    println!("{}", style("  ✨ Installation complete!").bold().green());
    println!(
        "  {} Start or restart your client to use the tool",
        style("→").dim()
    );
    println!(
        "  {} Your tool will appear as {}",
        style("→").dim(),
        style(&first.server_id).cyan()
    );
    for outcome in report.succeeded().filter(|o| o.server_id != first.server_id) {
        println!(
            "  {} In {} it appears as {}",
            style("→").dim(),
            style(outcome.client).cyan(),
            style(&outcome.server_id).cyan()
        );
    }

    if report.succeeded().any(|o| o.client == ClientKind::Claude) {
        println!();
        println!("  {}", style("Note for Claude Desktop users:").yellow());
        println!("  {} Claude Desktop runs in the background", style("→").dim());
        println!(
            "  {} Right-click the Claude icon in the system tray",
            style("→").dim()
        );
        println!(
            "  {} Select \"Quit\" and restart Claude Desktop",
            style("→").dim()
        );
        println!(
            "  {} The new tool will appear in your tools list",
            style("→").dim()
        );
    }
    println!();
}

/// Which clients the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientChoice {
    One(ClientKind),
    AllDetected,
}

/// Terminal prompts; every prompt is skipped when `yes` is set.
pub struct Prompter {
    yes: bool,
    theme: ColorfulTheme,
}

impl Prompter {
    pub fn new(yes: bool) -> Self {
        Self {
            yes,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn select_client(&self, detected: &[ClientKind]) -> Result<ClientChoice> {
        if self.yes {
            return Ok(ClientChoice::AllDetected);
        }
        if let [only] = detected {
            return Ok(ClientChoice::One(*only));
        }

        println!(
            "  {}",
            style(format!(
                "Detected clients: {}",
                detected
                    .iter()
                    .map(|c| c.id())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
            .dim()
        );
        let items = choice_items(detected);
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Select a client to install to")
            .items(&items)
            .default(0)
            .interact()?;

        Ok(detected
            .get(selection)
            .map_or(ClientChoice::AllDetected, |client| ClientChoice::One(*client)))
    }

    pub fn confirm_install(&self, clients: &[ClientKind], is_update: bool) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }
        let names = clients.iter().map(|c| c.id()).collect::<Vec<_>>().join(", ");
        let verb = if is_update { "update" } else { "install" };
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(format!("Ready to {verb} on {}?", style(names).cyan()))
            .default(true)
            .interact()?;
        Ok(confirmed)
    }

    fn confirm_existing(&self, client: ClientKind, existing: &[String]) -> Result<bool> {
        println!();
        println!(
            "  {} {}:",
            style("Found existing MCP tools in").yellow(),
            style(client).cyan()
        );
        for id in existing {
            println!("  {}", style(format!("• {id}")).dim());
        }
        println!(
            "  Proceeding will {} the configuration.",
            style("update").yellow()
        );
        if self.yes {
            return Ok(true);
        }
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt("Do you want to continue?")
            .default(true)
            .interact()?;
        Ok(confirmed)
    }
}

fn choice_items(detected: &[ClientKind]) -> Vec<String> {
    detected
        .iter()
        .map(|client| format!("{} ({})", client.display_name(), client.id()))
        .chain(std::iter::once("All detected clients".to_string()))
        .collect()
}

/// Prints per-client progress and asks before replacing earlier installs.
pub struct ConsoleReporter {
    prompter: Prompter,
}

impl ConsoleReporter {
    pub fn new(prompter: Prompter) -> Self {
        Self { prompter }
    }
}

impl InstallReporter for ConsoleReporter {
    fn clients_selected(&mut self, clients: &[ClientKind]) {
        if clients.is_empty() {
            return;
        }
        let plural = if clients.len() > 1 { "s" } else { "" };
        let names = clients
            .iter()
            .map(|c| style(c).cyan().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {} Found {} compatible client{plural}: {names}",
            style("✓").green(),
            clients.len()
        );
    }

    fn confirm_existing(&mut self, client: ClientKind, existing: &[String]) -> bool {
        match self.prompter.confirm_existing(client, existing) {
            Ok(confirmed) => confirmed,
            Err(err) => {
                tracing::warn!(error = %err, "prompt failed, cancelling");
                false
            }
        }
    }

    fn client_started(&mut self, client: ClientKind) {
        println!("  Installing on {}...", style(client).cyan());
    }

    fn client_finished(&mut self, outcome: &ClientOutcome) {
        match &outcome.result {
            Ok(written) => println!(
                "  {} {}",
                style("✓").green(),
                success_line(outcome.client, written)
            ),
            Err(err) => println!(
                "  {} Failed to install on {}: {}",
                style("✗").red(),
                style(outcome.client).cyan(),
                err.friendly()
            ),
        }
    }
}

fn success_line(client: ClientKind, written: &WriteOutcome) -> String {
    match written {
        WriteOutcome::Written { path } => {
            format!("Installed on {client} ({})", path.display())
        }
        WriteOutcome::Dispatched { .. } => {
            format!("Sent install request to {client}; confirm it in the client")
        }
        WriteOutcome::Invoked { program, .. } => format!("Installed on {client} via {program}"),
        WriteOutcome::Unchanged => format!("Nothing to change on {client}"),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn input_errors_ask_for_usage() {
        let err = anyhow::Error::new(Error::UnknownClient {
            name: "emacs".into(),
        });
        let (message, show_usage) = error_message(&err);
        assert!(message.contains("emacs"));
        assert!(show_usage);
    }

    #[test]
    fn environment_errors_skip_usage() {
        let (message, show_usage) = error_message(&anyhow::Error::new(Error::HomeDirUnavailable));
        assert_eq!(message, "Could not determine your home directory");
        assert!(!show_usage);

        let (message, show_usage) = error_message(&anyhow::anyhow!("No supported clients"));
        assert_eq!(message, "No supported clients");
        assert!(!show_usage);
    }

    #[test]
    fn choice_items_end_with_all_option() {
        let items = choice_items(&[ClientKind::Cursor, ClientKind::VsCode]);
        assert_eq!(
            items,
            vec!["Cursor (cursor)", "VS Code (vscode)", "All detected clients"]
        );
    }

    #[test]
    fn yes_skips_prompts() {
        let prompter = Prompter::new(true);
        assert_eq!(
            prompter
                .select_client(&[ClientKind::Cursor, ClientKind::Claude])
                .unwrap(),
            ClientChoice::AllDetected
        );
        assert!(prompter.confirm_install(&[ClientKind::Cursor], true).unwrap());
    }

    #[test]
    fn single_detected_client_is_chosen_without_prompt() {
        let prompter = Prompter::new(false);
        assert_eq!(
            prompter.select_client(&[ClientKind::Windsurf]).unwrap(),
            ClientChoice::One(ClientKind::Windsurf)
        );
    }

    #[test]
    fn listing_detail_pluralizes() {
        let one = ClientListing {
            client: ClientKind::Cursor,
            servers: Some(1),
        };
        let many = ClientListing {
            client: ClientKind::Cursor,
            servers: Some(3),
        };
        assert_eq!(listing_detail(&one), "1 MCP server configured");
        assert_eq!(listing_detail(&many), "3 MCP servers configured");
    }

    #[test]
    fn success_line_names_written_path() {
        let line = success_line(
            ClientKind::Cursor,
            &WriteOutcome::Written {
                path: PathBuf::from("/home/u/.cursor/mcp.json"),
            },
        );
        assert_eq!(line, "Installed on cursor (/home/u/.cursor/mcp.json)");
    }
}
