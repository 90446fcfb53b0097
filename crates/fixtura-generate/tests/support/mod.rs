#![allow(dead_code)]

use fixtura_generate::{EnumDomain, FieldDescriptor, FieldDirective, Model, PersianDate};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Active,
    Suspended,
    Closed,
}

impl EnumDomain for Status {
    const NAME: &'static str = "Status";

    fn labels() -> &'static [&'static str] {
        &["Active", "Suspended", "Closed"]
    }

    fn label(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Suspended => "Suspended",
            Status::Closed => "Closed",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Active" => Some(Status::Active),
            "Suspended" => Some(Status::Suspended),
            "Closed" => Some(Status::Closed),
            _ => None,
        }
    }
}

/// Every calendar directive plus an identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub id: Uuid,
    pub birth_date: Option<PersianDate>,
    pub weekday: String,
    pub month: String,
    pub graduation_year: i32,
    pub contract_start: Option<PersianDate>,
    pub status: Status,
}

impl Model for Person {
    fn model_name() -> &'static str {
        "Person"
    }

    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("id", |p: &mut Person, v| p.id = v)
                .with_directive(FieldDirective::Identifier),
            FieldDescriptor::new("birth_date", |p: &mut Person, v| p.birth_date = v)
                .with_directive(FieldDirective::full_date()),
            FieldDescriptor::new("weekday", |p: &mut Person, v| p.weekday = v)
                .with_directive(FieldDirective::day_name()),
            FieldDescriptor::new("month", |p: &mut Person, v| p.month = v)
                .with_directive(FieldDirective::month_name()),
            FieldDescriptor::new("graduation_year", |p: &mut Person, v| p.graduation_year = v)
                .with_directive(FieldDirective::year(Some(1390), Some(1400))),
            FieldDescriptor::new("contract_start", |p: &mut Person, v| p.contract_start = v)
                .with_directive(FieldDirective::date_range("1402/01/01", "1402/12/29")),
            FieldDescriptor::enumeration("status", |p: &mut Person, v| p.status = v),
        ]
    }
}

/// Exercises precedence between directives and rules.
#[derive(Debug, Default)]
pub struct Account {
    pub code: String,
    pub note: String,
    pub status: Status,
    pub tier: Status,
    pub balance: f64,
    pub visits: i32,
    pub nickname: Option<String>,
    pub owner: Option<Person>,
    pub backup_owner: Option<Person>,
}

impl Model for Account {
    fn model_name() -> &'static str {
        "Account"
    }

    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("code", |a: &mut Account, v| a.code = v)
                .with_directive(FieldDirective::constant("ACC".to_string())),
            FieldDescriptor::new("note", |a: &mut Account, v| a.note = v)
                .with_directive(FieldDirective::Ignore),
            FieldDescriptor::enumeration("status", |a: &mut Account, v| a.status = v)
                .with_directive(FieldDirective::enumerated_of(&[Status::Suspended])),
            FieldDescriptor::enumeration("tier", |a: &mut Account, v| a.tier = v)
                .with_directive(FieldDirective::enumerated()),
            FieldDescriptor::new("balance", |a: &mut Account, v| a.balance = v),
            FieldDescriptor::new("visits", |a: &mut Account, v| a.visits = v),
            FieldDescriptor::new("nickname", |a: &mut Account, v| a.nickname = v),
            FieldDescriptor::related::<Person, _>("owner", |a: &mut Account, v| a.owner = v)
                .with_directive(FieldDirective::foreign_key("Person")),
            FieldDescriptor::related::<Person, _>("backup_owner", |a: &mut Account, v| {
                a.backup_owner = v
            })
            .with_directive(FieldDirective::optional_foreign_key("Person", 100)),
        ]
    }
}

/// Self-referencing model; a mandatory parent never terminates.
#[derive(Debug, Default)]
pub struct Node {
    pub label: String,
    pub parent: Option<Box<Node>>,
}

impl Model for Node {
    fn model_name() -> &'static str {
        "Node"
    }

    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("label", |n: &mut Node, v| n.label = v)
                .with_directive(FieldDirective::month_name()),
            FieldDescriptor::related::<Node, _>("parent", |n: &mut Node, v| {
                n.parent = v.map(Box::new)
            })
            .with_directive(FieldDirective::foreign_key("Node")),
        ]
    }
}

/// Foreign key naming a model the field does not hold.
#[derive(Debug, Default)]
pub struct Invoice {
    pub customer: Option<Person>,
}

impl Model for Invoice {
    fn model_name() -> &'static str {
        "Invoice"
    }

    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::related::<Person, _>("customer", |i: &mut Invoice, v| {
                i.customer = v
            })
            .with_directive(FieldDirective::foreign_key("Customer")),
        ]
    }
}

/// Date range bounds that are not `YYYY/MM/DD`.
#[derive(Debug, Default)]
pub struct Shift {
    pub starts_on: Option<PersianDate>,
}

impl Model for Shift {
    fn model_name() -> &'static str {
        "Shift"
    }

    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("starts_on", |s: &mut Shift, v| s.starts_on = v)
                .with_directive(FieldDirective::date_range("1402-01-01", "1402/06/31")),
        ]
    }
}

/// Constant whose value does not fit the field.
#[derive(Debug, Default)]
pub struct Ledger {
    pub entries: i32,
}

impl Model for Ledger {
    fn model_name() -> &'static str {
        "Ledger"
    }

    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("entries", |l: &mut Ledger, v| l.entries = v)
                .with_directive(FieldDirective::constant("many".to_string())),
        ]
    }
}
