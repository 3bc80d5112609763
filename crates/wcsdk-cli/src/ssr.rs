//! System status report command handlers.

use clap::Subcommand;
use wcsdk_core::{Site, SiteSystemStatus};
use wcsdk_store::SystemStatusStore;

use crate::or_not_available;

#[derive(Debug, Subcommand)]
pub enum SsrCommands {
    /// Fetch the system status report from the site and cache it
    Fetch,
    /// Show the cached report
    Show {
        /// Pretty-print each section's JSON
        #[arg(long)]
        pretty: bool,
    },
}

pub(crate) async fn run(
    store: &SystemStatusStore,
    site: &Site,
    command: SsrCommands,
) -> anyhow::Result<()> {
    match command {
        SsrCommands::Fetch => {
            let status = store.fetch_ssr(site).await?;
            let present = status.sections().iter().filter(|(_, v)| v.is_some()).count();
            println!("fetched system status report ({present} of 7 sections present)");
        }
        SsrCommands::Show { pretty } => {
            let status = store.get_ssr(site).await?.ok_or_else(|| {
                anyhow::anyhow!("no report cached for site {}; run `ssr fetch` first", site.id)
            })?;
            print_report(&status, pretty);
        }
    }
    Ok(())
}

fn print_report(status: &SiteSystemStatus, pretty: bool) {
    for (name, section) in status.sections() {
        let text = section.map(|raw| if pretty { prettify(raw) } else { raw.to_string() });
        println!("{name}:");
        println!("  {}", or_not_available(text, name));
    }
}

fn prettify(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .map_or_else(|| raw.to_string(), |s| s.replace('\n', "\n  "))
}
