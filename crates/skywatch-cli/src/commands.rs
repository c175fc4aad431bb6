use std::io::{self, Write};

use anyhow::{bail, Context};
use colored::Colorize;
use skywatch_api::{AircraftFeed, AircraftTracker};
use skywatch_store::{open_store, AircraftStore};
use skywatch_types::validate::validate_country;

use crate::cli::{Cli, Command};
use crate::config::{self, DisplayConfig, Resolved};
use crate::filters;
use crate::menu::{self, Menu};
use crate::render::print_list;

pub const NO_STORED_DATA: &str = "No data. Fetch aircraft first.";

/// Resolve configuration, open the store and run a subcommand or the menu.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let Resolved {
        mut config,
        format_fixed,
    } = config::resolve(&cli)?;

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    if cli.command.is_none() && !format_fixed {
        config.store.format = menu::choose_format(&mut input, &mut out)?;
    }

    let store = open_store(&config.store)
        .with_context(|| format!("opening store at {}", config.store.path().display()))?;
    let feed = AircraftTracker::from_config(&config.api)?;

    match cli.command {
        Some(command) => run_command(command, store.as_ref(), &feed, &config.display, &mut out).await,
        None => {
            Menu::new(input, out, store.as_ref(), &feed, &config.display)
                .run()
                .await
        }
    }
}

pub async fn run_command<W: Write>(
    command: Command,
    store: &dyn AircraftStore,
    feed: &dyn AircraftFeed,
    display: &DisplayConfig,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Fetch(args) => cmd_fetch(out, store, feed, display, &args.country).await,
        Command::Top(args) => cmd_top(out, store, display, args.count.unwrap_or(display.default_top_n)),
        Command::Country(args) => cmd_country(out, store, &args.countries),
        Command::List => cmd_list(out, store),
        Command::Delete(args) => cmd_delete(out, store, &args.callsign),
        Command::Clear => cmd_clear(out, store),
    }
}

/// Fetch the aircraft over `country`, upsert them and show a preview.
pub async fn cmd_fetch<W: Write>(
    out: &mut W,
    store: &dyn AircraftStore,
    feed: &dyn AircraftFeed,
    display: &DisplayConfig,
    country: &str,
) -> anyhow::Result<()> {
    if !validate_country(country) {
        bail!("invalid country name: {country:?}");
    }
    let country = country.trim();
    writeln!(out, "\nFetching aircraft over {}...", country.bold())?;
    let aircraft = feed.fetch_country(country).await?;
    if aircraft.is_empty() {
        writeln!(out, "No aircraft over {country} right now")?;
        return Ok(());
    }

    let saved = store.add_many(&aircraft);
    writeln!(out, "Found {} aircraft", aircraft.len())?;
    writeln!(out, "Saved {saved} records")?;
    let preview = &aircraft[..aircraft.len().min(display.preview_count)];
    print_list(out, preview, &format!("First {} aircraft", preview.len()))?;
    Ok(())
}

pub fn cmd_top<W: Write>(
    out: &mut W,
    store: &dyn AircraftStore,
    display: &DisplayConfig,
    n: usize,
) -> anyhow::Result<()> {
    if n == 0 {
        bail!("enter a positive number");
    }
    let n = if n > display.max_top_n {
        writeln!(out, "Showing at most {} aircraft", display.max_top_n)?;
        display.max_top_n
    } else {
        n
    };
    let top = store.top_by_altitude(n);
    if top.is_empty() {
        writeln!(out, "{NO_STORED_DATA}")?;
        return Ok(());
    }
    print_list(out, &top, &format!("Top {n} aircraft by altitude"))?;
    Ok(())
}

pub fn cmd_country<W: Write, S: AsRef<str>>(
    out: &mut W,
    store: &dyn AircraftStore,
    countries: &[S],
) -> anyhow::Result<()> {
    let countries: Vec<&str> = countries
        .iter()
        .map(|c| c.as_ref().trim())
        .filter(|c| !c.is_empty())
        .collect();
    if countries.is_empty() {
        bail!("enter at least one country");
    }
    let all = store.get_all();
    if all.is_empty() {
        writeln!(out, "{NO_STORED_DATA}")?;
        return Ok(());
    }
    let found = filters::filter_by_country(&all, &countries);
    print_list(out, &found, &format!("Aircraft from: {}", countries.join(", ")))?;
    Ok(())
}

pub fn cmd_list<W: Write>(out: &mut W, store: &dyn AircraftStore) -> anyhow::Result<()> {
    let all = store.get_all();
    if all.is_empty() {
        writeln!(out, "No stored aircraft")?;
        return Ok(());
    }
    print_list(out, &all, "All stored aircraft")?;
    writeln!(out, "Stored records: {}", store.count())?;
    Ok(())
}

fn cmd_delete<W: Write>(out: &mut W, store: &dyn AircraftStore, callsign: &str) -> anyhow::Result<()> {
    if !store.delete(callsign) {
        bail!("no stored aircraft with callsign {callsign}");
    }
    writeln!(out, "{} Deleted {}", "✓".green().bold(), callsign.yellow())?;
    Ok(())
}

fn cmd_clear<W: Write>(out: &mut W, store: &dyn AircraftStore) -> anyhow::Result<()> {
    if !store.clear() {
        bail!("could not clear the store");
    }
    writeln!(out, "{} Store cleared", "✓".green().bold())?;
    Ok(())
}
