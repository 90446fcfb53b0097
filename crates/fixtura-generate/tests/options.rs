mod support;

use std::fs;
use std::path::PathBuf;

use fixtura_generate::{
    Builder, GenerationError, LoggingOptions, SeedOptions, Seeder, init_logging,
};

use support::Person;

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("fixtura_generate_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn defaults_cover_the_standard_year_span() {
    let options = SeedOptions::default();
    assert_eq!(options.seed, None);
    assert_eq!((options.year_min, options.year_max), (1380, 1410));
    assert_eq!(options.max_relation_depth, 3);
    assert_eq!(options.logging.level, "info");
    assert!(!options.logging.json);
}

#[test]
fn partial_toml_keeps_defaults() {
    let options = SeedOptions::from_toml_str(
        r#"
        seed = 99
        year_max = 1420

        [logging]
        json = true
        "#,
    )
    .expect("options");
    assert_eq!(options.seed, Some(99));
    assert_eq!(options.year_min, 1380);
    assert_eq!(options.year_max, 1420);
    assert!(options.logging.json);
    assert_eq!(options.logging.level, "info");
}

#[test]
fn reversed_year_span_is_rejected() {
    let result = SeedOptions::from_toml_str("year_min = 1400\nyear_max = 1390\n");
    assert!(matches!(result, Err(GenerationError::InvalidArgument(_))));

    let options = SeedOptions::default().with_years(1400, 1390);
    assert!(matches!(
        Builder::<Person>::with_options(options),
        Err(GenerationError::InvalidArgument(_))
    ));
}

#[test]
fn malformed_toml_is_reported() {
    let result = SeedOptions::from_toml_str("seed = \"not a number\"");
    assert!(matches!(result, Err(GenerationError::Toml(_))));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let path = temp_dir("missing").join("absent.toml");
    assert!(matches!(
        Seeder::from_config(&path),
        Err(GenerationError::Io(_))
    ));
}

#[test]
fn seeder_from_config_is_deterministic() {
    let dir = temp_dir("config");
    let path = dir.join("fixtura.toml");
    fs::write(&path, "seed = 1234\nyear_min = 1395\nyear_max = 1396\n").expect("write config");

    let seeder = Seeder::from_config(&path).expect("seeder");
    assert_eq!(seeder.options().seed, Some(1234));

    let first = seeder.seed_list::<Person>(4).expect("first");
    let second = seeder.seed_list::<Person>(4).expect("second");
    assert_eq!(first, second);
    for person in &first {
        let year = person.birth_date.expect("birth date").year();
        assert!((1395..=1396).contains(&year));
    }
}

#[test]
fn logging_writes_json_lines_and_installs_once() {
    let dir = temp_dir("logging");
    let log_path = dir.join("fixtura.log");
    let options = LoggingOptions {
        level: "debug".to_string(),
        json: true,
        file: Some(log_path.clone()),
    };

    init_logging(&options).expect("first install");
    assert!(matches!(
        init_logging(&options),
        Err(GenerationError::Logging(_))
    ));

    let seeder = Seeder::new(SeedOptions::default().with_seed(5)).expect("seeder");
    seeder.seed_list::<Person>(2).expect("people");

    let content = fs::read_to_string(&log_path).expect("log file");
    if std::env::var_os("RUST_LOG").is_none() {
        assert!(content.contains("instances built"));
        assert!(content.lines().all(|line| line.starts_with('{')));
    }
}
