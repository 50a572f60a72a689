use std::path::PathBuf;

use clap::Parser;

use solar_orrery::bodies::{CelestialBody, IdDispenser, facts, normalize};
use solar_orrery::config::load_records;

#[derive(Parser)]
#[command(author, version, about = "Print the info panel of every body in a data file")]
struct Cli {
    /// Body data: YAML file, TOML file, or directory of TOML files
    #[arg(long, default_value = "data/planets.yaml")]
    data: PathBuf,

    /// Only show this body (case-insensitive)
    #[arg(long)]
    body: Option<String>,
}

fn main() -> anyhow::Result<()> {
    solar_orrery::init_logging();
    let cli = Cli::parse();
    let records = load_records(&cli.data)?;
    let planets = normalize(&records, &mut IdDispenser::new())?;

    let mut shown = 0;
    for planet in &planets {
        for body in std::iter::once(planet).chain(&planet.satellites) {
            if matches(body, cli.body.as_deref()) {
                print_facts(body);
                shown += 1;
            }
        }
    }
    if let Some(name) = cli.body {
        if shown == 0 {
            anyhow::bail!("no body named {name}");
        }
    }
    Ok(())
}

fn matches(body: &CelestialBody, filter: Option<&str>) -> bool {
    filter.is_none_or(|name| body.name.eq_ignore_ascii_case(name))
}

fn print_facts(body: &CelestialBody) {
    let rows = facts(body);
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    println!("== {} ==", body.name);
    for (label, value) in rows {
        println!("  {label:<width$}  {value}");
    }
    println!();
}
