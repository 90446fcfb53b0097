mod support;

use std::collections::HashSet;

use fixtura_calendar::{DateRange, MONTH_NAMES, WEEKDAY_NAMES, days_in_month};
use fixtura_generate::{Builder, GenerationError, SeedOptions, Seeder, seed, seed_list};

use support::{Invoice, Ledger, Node, Person, Shift, Status};

fn seeded(seed: u64) -> Builder<Person> {
    Builder::<Person>::with_options(SeedOptions::default().with_seed(seed))
        .expect("person builder")
}

#[test]
fn full_date_is_a_valid_persian_date_in_the_default_span() {
    let mut builder = seeded(7);
    for _ in 0..50 {
        let person = builder.build().expect("person");
        let date = person.birth_date.expect("birth date populated");
        assert!((1380..=1410).contains(&date.year()));
        assert!((1..=12).contains(&date.month()));
        let last = days_in_month(date.year(), date.month()).expect("month length");
        assert!(date.day() >= 1 && date.day() <= last);
        assert!(date.hour() < 24 && date.minute() < 60 && date.second() < 60);
    }
}

#[test]
fn names_come_from_the_persian_name_tables() {
    let mut builder = seeded(11);
    for _ in 0..30 {
        let person = builder.build().expect("person");
        assert!(WEEKDAY_NAMES.contains(&person.weekday.as_str()));
        assert!(MONTH_NAMES.contains(&person.month.as_str()));
    }
}

#[test]
fn year_directive_respects_its_bounds() {
    let mut builder = seeded(3);
    for _ in 0..20 {
        let person = builder.build().expect("person");
        assert!((1390..=1400).contains(&person.graduation_year));
    }
}

#[test]
fn date_range_directive_stays_inside_the_range() {
    let range = DateRange::parse("1402/01/01", "1402/12/29").expect("range");
    let mut builder = seeded(5);
    for _ in 0..30 {
        let person = builder.build().expect("person");
        let date = person.contract_start.expect("contract start populated");
        assert!(range.contains(&date), "{date} outside range");
    }
}

#[test]
fn unseeded_builds_are_not_degenerate() {
    let people: Vec<Person> = (0..30).map(|_| seed::<Person>().expect("person")).collect();

    let dates: HashSet<_> = people.iter().map(|person| person.birth_date).collect();
    let years: HashSet<_> = people.iter().map(|person| person.graduation_year).collect();
    let weekdays: HashSet<_> = people.iter().map(|person| person.weekday.as_str()).collect();
    assert!(dates.len() > 1);
    assert!(years.len() > 1, "year directive repeated {years:?}");
    assert!(weekdays.len() > 1, "day-name directive repeated {weekdays:?}");
}

#[test]
fn seed_list_yields_distinct_identifiers() {
    let people = seed_list::<Person>(10).expect("people");
    assert_eq!(people.len(), 10);
    let ids: HashSet<_> = people.iter().map(|person| person.id).collect();
    assert_eq!(ids.len(), 10);
    assert!(people.iter().all(|person| !person.id.is_nil()));
}

#[test]
fn identifiers_are_random_v4() {
    let person = seeded(1).build().expect("person");
    assert_eq!(person.id.get_version_num(), 4);
}

#[test]
fn seeded_builders_repeat_themselves() {
    let first = seeded(42).build_list(5).expect("first");
    let second = seeded(42).build_list(5).expect("second");
    assert_eq!(first, second);

    let other = seeded(43).build_list(5).expect("other");
    assert_ne!(first, other);
}

#[test]
fn undecorated_enum_fields_draw_from_the_domain() {
    let mut builder = seeded(9);
    let statuses: HashSet<Status> = (0..60)
        .map(|_| builder.build().expect("person").status)
        .collect();
    assert_eq!(statuses.len(), 3);
}

#[test]
fn configured_year_span_drives_full_dates() {
    let options = SeedOptions::default().with_seed(17).with_years(1399, 1399);
    let people = Seeder::new(options)
        .expect("seeder")
        .seed_list::<Person>(25)
        .expect("people");
    for person in people {
        assert_eq!(person.birth_date.expect("birth date").year(), 1399);
    }
}

#[test]
fn malformed_date_range_fails_the_build() {
    let mut builder = Builder::<Shift>::new().expect("discovery accepts the text");
    let result = builder.build();
    assert!(matches!(result, Err(GenerationError::Format(_))));
}

#[test]
fn constant_of_the_wrong_kind_is_rejected_at_discovery() {
    match Builder::<Ledger>::new() {
        Err(GenerationError::Configuration(message)) => {
            assert!(message.contains("Ledger.entries"), "{message}");
        }
        Err(other) => panic!("unexpected error {other:?}"),
        Ok(_) => panic!("text constant accepted on an integer field"),
    }
}

#[test]
fn foreign_key_must_name_the_related_model() {
    let result = Builder::<Invoice>::new();
    assert!(matches!(result, Err(GenerationError::Configuration(_))));
}

#[test]
fn runaway_relations_stop_at_the_depth_limit() {
    let result = seed::<Node>();
    assert!(matches!(result, Err(GenerationError::Configuration(_))));
}

#[test]
fn relations_build_within_the_depth_limit() {
    let builder = Builder::<Node>::with_options(SeedOptions::default().with_seed(2))
        .expect("node builder")
        .rule_for_optional_foreign_key::<Node, _>("parent", 100, |_| Node::default());
    let node = builder.expect("optional parent").build().expect("node");
    assert!(node.parent.is_none());
    assert!(MONTH_NAMES.contains(&node.label.as_str()));
}
