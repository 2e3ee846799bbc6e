//! Army Builder - Demo Driver
//!
//! Raises a small company from seeded recruitment rolls, wires listeners to
//! a few units, applies some changes and prints the resulting order of
//! battle as a tree (or as JSON).

use std::path::PathBuf;
use std::rc::Rc;

use army_builder::army::{Equipment, Formation, Observable, Unit, UnitRef, UnitSnapshot};
use army_builder::core::config::RecruitmentConfig;
use army_builder::core::error::Result;
use army_builder::notify::{EventLog, TracingListener};
use army_builder::recruitment::{Grade, Recruiter};
use clap::Parser;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

/// Build a sample army and print its order of battle
#[derive(Parser, Debug)]
#[command(name = "army-builder")]
#[command(about = "Build a sample army from seeded recruitment rolls")]
struct Args {
    /// Random seed for deterministic recruitment
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the recruitment roll tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON snapshot instead of the tree
    #[arg(long)]
    json: bool,

    /// Print every event the army emitted after the tree
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("army_builder=info")),
        )
        .init();

    let config = match &args.config {
        Some(path) => RecruitmentConfig::load(path)?,
        None => RecruitmentConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "Raising army");
    let mut recruiter = Recruiter::seeded(seed, config)?;

    let log = Rc::new(EventLog::new(128));
    let army = raise_army(&mut recruiter, &log)?;
    drill(&army, &log)?;

    if args.json {
        let snapshot = UnitSnapshot::capture(&UnitRef::from(&army));
        println!("{}", snapshot.to_json()?);
    } else {
        for line in army.render() {
            println!("{}", line);
        }
        println!();
        println!(
            "Total headcount: {}  Total power: {}",
            army.effective_headcount(),
            army.effective_power()
        );
    }

    if args.verbose {
        println!();
        println!("Events ({}):", log.len());
        for event in log.events() {
            println!("  [{}] {}", event.source_name, event.event);
        }
    }

    Ok(())
}

/// Company HQ with two rifle squads and an elite detachment
fn raise_army(recruiter: &mut Recruiter<ChaCha8Rng>, log: &Rc<EventLog>) -> Result<Formation> {
    let captain = recruiter.recruit("Hugo", "Captain", Grade::Officer)?;
    let company = Formation::with_commander("1st Company", captain)?;
    company.subscribe(log.clone());
    company.subscribe(Rc::new(TracingListener));

    let first =
        recruiter.raise_squad("1st Squad", "Marc", &["Jean", "Paul", "Luc"], Grade::Standard)?;
    let second =
        recruiter.raise_squad("2nd Squad", "Anne", &["Louis", "Remi"], Grade::Standard)?;
    let special = recruiter.raise_squad("Recon", "Claire", &["Yves", "Noel"], Grade::Elite)?;

    for squad in [&first, &second, &special] {
        squad.subscribe(log.clone());
        company.add_member(squad)?;
    }

    let runner = recruiter.recruit("Theo", "Private", Grade::Standard)?;
    company.add_member(&runner)?;
    Ok(company)
}

/// Issue equipment, hand out experience and reshuffle one unit
fn drill(company: &Formation, log: &Rc<EventLog>) -> Result<()> {
    for member in company.members() {
        let Some(squad) = member.as_formation() else {
            continue;
        };
        for unit in squad.members() {
            if let Some(soldier) = unit.as_combatant() {
                soldier.subscribe(log.clone());
                soldier.equip(Equipment::rifle());
            }
        }
        if let Some(leader) = squad.commander() {
            leader.subscribe(log.clone());
            leader.equip(Equipment::vest());
            leader.equip(Equipment::boots());
            leader.gain_experience(15)?;
        }
    }

    // The runner is reassigned to the first squad
    let runner = company
        .members()
        .into_iter()
        .find_map(|m| m.as_combatant().cloned());
    let first_squad = company.members().into_iter().find_map(|m| m.as_formation().cloned());
    if let (Some(runner), Some(first_squad)) = (runner, first_squad) {
        company.remove_member(&runner)?;
        first_squad.add_member(&runner)?;
    }

    tracing::info!(
        headcount = company.effective_headcount(),
        power = company.effective_power(),
        "Drill complete"
    );
    Ok(())
}
