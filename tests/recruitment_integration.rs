//! Integration tests for seeded recruitment

use army_builder::army::{Formation, Unit};
use army_builder::core::config::{RecruitmentConfig, StatRange};
use army_builder::recruitment::{Grade, Recruiter};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn squad_stats(recruiter: &mut Recruiter<impl rand::Rng>) -> Vec<(String, u64)> {
    let squad = recruiter
        .raise_squad("Alpha", "Hugo", &["Jean", "Paul", "Luc", "Remi"], Grade::Standard)
        .unwrap();
    squad
        .roster()
        .map(|c| (c.name().to_string(), c.effective_power()))
        .collect()
}

#[test]
fn test_seeded_armies_are_reproducible() {
    let mut first = Recruiter::seeded(1234, RecruitmentConfig::default()).unwrap();
    let mut second = Recruiter::seeded(1234, RecruitmentConfig::default()).unwrap();
    assert_eq!(squad_stats(&mut first), squad_stats(&mut second));
}

#[test]
fn test_any_rng_can_drive_recruitment() {
    let mut recruiter =
        Recruiter::new(StdRng::seed_from_u64(9), RecruitmentConfig::default()).unwrap();
    let stats = squad_stats(&mut recruiter);
    assert_eq!(stats.len(), 5);
    // Leader is officer grade, everyone else standard
    assert!(stats[0].1 >= 45);
    assert!(stats[1..].iter().all(|(_, power)| (15..=45).contains(power)));
}

#[test]
fn test_config_file_changes_rolls() {
    let toml_str = r#"
        [standard]
        attack = { min = 1, max = 1 }
        defense = { min = 2, max = 2 }
        speed = { min = 3, max = 3 }
    "#;
    let config = RecruitmentConfig::from_toml_str(toml_str).unwrap();
    assert_eq!(config.elite.speed, StatRange::new(10, 25));

    let mut recruiter = Recruiter::seeded(5, config).unwrap();
    let jean = recruiter.recruit("Jean", "Private", Grade::Standard).unwrap();
    assert_eq!((jean.base_attack(), jean.base_defense(), jean.base_speed()), (1, 2, 3));
}

#[test]
fn test_recruits_compose_into_formations() {
    let mut recruiter = Recruiter::seeded(77, RecruitmentConfig::default()).unwrap();
    let company = Formation::with_commander(
        "Company",
        recruiter.recruit("Hugo", "Captain", Grade::Officer).unwrap(),
    )
    .unwrap();
    for (name, grade) in [("1st", Grade::Standard), ("Recon", Grade::Elite)] {
        let squad = recruiter.raise_squad(name, "Lead", &["A", "B"], grade).unwrap();
        company.add_member(&squad).unwrap();
    }

    assert_eq!(company.effective_headcount(), 7);
    let summed: u64 = company.roster().map(|c| c.effective_power()).sum();
    assert_eq!(company.effective_power(), summed);
}
