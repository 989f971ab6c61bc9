// ABOUTME: Command-line plan parser for raw LLM output
// ABOUTME: Reads text from a file or stdin and prints the parsed PlanRecord as JSON or one section
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Usage:
//! ```bash
//! parse-plan response.txt --name Asha
//! cat response.txt | parse-plan --compact
//! parse-plan response.txt --section diet_plan
//! ```

use std::io::{self, Read};
use std::path::PathBuf;

use ai_fitness_coach::plan::{PlanRecord, PlanSection, PlanSectionParser};
use anyhow::{anyhow, Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "parse-plan",
    about = "Split raw plan text into workout, diet, tips and motivation sections"
)]
struct Args {
    /// File with the raw text; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Name to record on the plan
    #[arg(long)]
    name: Option<String>,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    /// Print only this section as plain text
    #[arg(long, value_parser = parse_section)]
    section: Option<PlanSection>,
}

fn parse_section(value: &str) -> Result<PlanSection> {
    PlanSection::parse(value).ok_or_else(|| {
        let known: Vec<&str> = PlanSection::ALL.iter().map(|s| s.as_str()).collect();
        anyhow!("unknown section {value:?}, expected one of {}", known.join(", "))
    })
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn render(plan: &PlanRecord, section: Option<PlanSection>, compact: bool) -> Result<String> {
    Ok(match section {
        Some(section) => plan.section(section).to_owned(),
        None if compact => serde_json::to_string(plan)?,
        None => serde_json::to_string_pretty(plan)?,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let raw = read_input(args.input.as_ref())?;

    let plan = PlanSectionParser::new().parse(&raw, args.name.as_deref());
    println!("{}", render(&plan, args.section, args.compact)?);
    Ok(())
}
