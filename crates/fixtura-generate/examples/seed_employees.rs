use fixtura_generate::{
    Builder, FieldDescriptor, FieldDirective, LoggingOptions, Model, PersianDate, SeedOptions,
    init_logging,
};
use rand::Rng;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Employee {
    id: Uuid,
    hired_on: Option<PersianDate>,
    payday: String,
    grade: i32,
}

impl Model for Employee {
    fn model_name() -> &'static str {
        "Employee"
    }

    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("id", |e: &mut Employee, v| e.id = v)
                .with_directive(FieldDirective::Identifier),
            FieldDescriptor::new("hired_on", |e: &mut Employee, v| e.hired_on = v)
                .with_directive(FieldDirective::date_range("1398/01/01", "1403/12/30")),
            FieldDescriptor::new("payday", |e: &mut Employee, v| e.payday = v)
                .with_directive(FieldDirective::day_name()),
            FieldDescriptor::new("grade", |e: &mut Employee, v| e.grade = v),
        ]
    }
}

fn main() -> fixtura_generate::Result<()> {
    init_logging(&LoggingOptions::default())?;

    let mut builder = Builder::<Employee>::with_options(SeedOptions::default().with_seed(7))?
        .rule_for("grade", |rng| rng.random_range(1..=5))?;

    for employee in builder.build_list(5)? {
        let hired_on = employee
            .hired_on
            .map(|date| date.to_string())
            .unwrap_or_default();
        println!(
            "{} hired {hired_on} paid on {} grade {}",
            employee.id, employee.payday, employee.grade
        );
    }
    Ok(())
}
