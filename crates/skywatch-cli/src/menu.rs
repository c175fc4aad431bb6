//! Interactive console session.
//!
//! The session reads one line per prompt from any `BufRead` and writes to any
//! `Write`, so it runs the same against a terminal or a test buffer. End of
//! input at any prompt ends the session.

use std::io::{self, BufRead, Write};

use skywatch_api::AircraftFeed;
use skywatch_store::{AircraftStore, StorageFormat};
use skywatch_types::validate::parse_altitude_range;

use crate::commands::{self, NO_STORED_DATA};
use crate::config::DisplayConfig;
use crate::filters;
use crate::render::{print_error, print_header, print_list};

const VELOCITY_TOP: usize = 20;

/// Ask which storage format to use. Anything but `2` picks JSON.
pub fn choose_format<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<StorageFormat> {
    writeln!(out, "\nChoose a storage format:")?;
    writeln!(out, "1. JSON (default)")?;
    writeln!(out, "2. CSV (spreadsheet friendly)")?;
    let format = match read_answer(input, out, "Your choice (1/2): ")?.as_deref() {
        Some("2") => StorageFormat::Csv,
        _ => StorageFormat::Json,
    };
    writeln!(out, "Using {} storage", format.to_string().to_uppercase())?;
    Ok(format)
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

enum Flow {
    Continue,
    Closed,
}

pub struct Menu<'a, R, W> {
    input: R,
    out: W,
    store: &'a dyn AircraftStore,
    feed: &'a dyn AircraftFeed,
    display: &'a DisplayConfig,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        input: R,
        out: W,
        store: &'a dyn AircraftStore,
        feed: &'a dyn AircraftFeed,
        display: &'a DisplayConfig,
    ) -> Self {
        Self {
            input,
            out,
            store,
            feed,
            display,
        }
    }

    /// Show the main menu until the user picks `0` or input ends.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        print_header(&mut self.out, "AIRCRAFT TRACKER")?;
        writeln!(self.out, "Live aircraft over any country\n")?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("\nChoose an action (0-5): ")? else {
                break;
            };
            let flow = match choice.as_str() {
                "0" => {
                    writeln!(self.out, "\nGoodbye!")?;
                    break;
                }
                "1" => self.fetch().await?,
                "2" => self.top()?,
                "3" => self.by_country()?,
                "4" => self.list()?,
                "5" => self.extra_filters()?,
                _ => {
                    writeln!(self.out, "Invalid choice. Please choose 0-5.")?;
                    Flow::Continue
                }
            };
            if let Flow::Closed = flow {
                break;
            }
            if self.prompt("\nPress Enter to continue...")?.is_none() {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nMain menu")?;
        writeln!(self.out, "1. Fetch aircraft over a country")?;
        writeln!(self.out, "2. Show top N aircraft by altitude")?;
        writeln!(self.out, "3. Find aircraft by registration country")?;
        writeln!(self.out, "4. Show all stored aircraft")?;
        writeln!(self.out, "5. More filters")?;
        writeln!(self.out, "0. Exit")
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        read_answer(&mut self.input, &mut self.out, text)
    }

    /// Print a recoverable failure and keep the session going.
    fn report(&mut self, result: anyhow::Result<()>) -> io::Result<Flow> {
        if let Err(e) = result {
            print_error(&mut self.out, format!("{e:#}"))?;
        }
        Ok(Flow::Continue)
    }

    async fn fetch(&mut self) -> io::Result<Flow> {
        let Some(country) = self.prompt("\nEnter a country name: ")? else {
            return Ok(Flow::Closed);
        };
        let result = commands::cmd_fetch(&mut self.out, self.store, self.feed, self.display, &country).await;
        self.report(result)
    }

    fn top(&mut self) -> io::Result<Flow> {
        let Some(answer) = self.prompt("\nHow many aircraft to show: ")? else {
            return Ok(Flow::Closed);
        };
        let result = match answer.parse::<i64>() {
            Ok(n) if n > 0 => {
                let n = usize::try_from(n).unwrap_or(usize::MAX);
                commands::cmd_top(&mut self.out, self.store, self.display, n)
            }
            Ok(_) => Err(anyhow::anyhow!("enter a positive number")),
            Err(_) => Err(anyhow::anyhow!("enter a number")),
        };
        self.report(result)
    }

    fn by_country(&mut self) -> io::Result<Flow> {
        let Some(answer) = self.prompt("\nEnter countries to filter by (comma separated): ")? else {
            return Ok(Flow::Closed);
        };
        let countries: Vec<&str> = answer.split(',').collect();
        let result = commands::cmd_country(&mut self.out, self.store, &countries);
        self.report(result)
    }

    fn list(&mut self) -> io::Result<Flow> {
        let result = commands::cmd_list(&mut self.out, self.store);
        self.report(result)
    }

    fn extra_filters(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- More filters ---")?;
        writeln!(self.out, "1. Altitude range")?;
        writeln!(self.out, "2. Top {VELOCITY_TOP} by velocity")?;
        writeln!(self.out, "3. Airborne / on ground")?;
        writeln!(self.out, "4. Search by callsign")?;
        let Some(choice) = self.prompt("Choose a filter: ")? else {
            return Ok(Flow::Closed);
        };

        let all = self.store.get_all();
        if all.is_empty() {
            writeln!(self.out, "{NO_STORED_DATA}")?;
            return Ok(Flow::Continue);
        }

        match choice.as_str() {
            "1" => {
                let Some(range) = self.prompt("Enter an altitude range (min - max): ")? else {
                    return Ok(Flow::Closed);
                };
                let (min, max) = parse_altitude_range(&range);
                let found = filters::filter_by_altitude_range(&all, min, max);
                print_list(&mut self.out, &found, &format!("Aircraft between {min}-{max} m"))?;
            }
            "2" => {
                let mut fastest = filters::sort_by_velocity(&all, true);
                fastest.truncate(VELOCITY_TOP);
                print_list(&mut self.out, &fastest, &format!("Top {VELOCITY_TOP} by velocity"))?;
            }
            "3" => {
                writeln!(self.out, "1. Airborne")?;
                writeln!(self.out, "2. On ground")?;
                let Some(status) = self.prompt("Choose a status: ")? else {
                    return Ok(Flow::Closed);
                };
                match status.as_str() {
                    "1" => print_list(&mut self.out, &filters::airborne(&all), "Airborne aircraft")?,
                    "2" => print_list(&mut self.out, &filters::grounded(&all), "Aircraft on ground")?,
                    _ => writeln!(self.out, "Invalid choice")?,
                }
            }
            "4" => {
                let Some(needle) = self.prompt("Enter a callsign: ")? else {
                    return Ok(Flow::Closed);
                };
                let found = filters::search_callsign(&all, &needle);
                let title = format!("Callsign search '{}'", needle.to_uppercase());
                print_list(&mut self.out, &found, &title)?;
            }
            _ => writeln!(self.out, "Invalid choice")?,
        }
        Ok(Flow::Continue)
    }
}
