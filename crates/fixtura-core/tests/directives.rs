use fixtura_core::{
    CulturalDate, EnumDomain, Error, FieldDirective, FieldType, FieldValue, PersianDate, ValueKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Web,
    Phone,
}

impl EnumDomain for Channel {
    const NAME: &'static str = "Channel";

    fn labels() -> &'static [&'static str] {
        &["Web", "Phone"]
    }

    fn label(&self) -> &'static str {
        match self {
            Channel::Web => "Web",
            Channel::Phone => "Phone",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Web" => Some(Channel::Web),
            "Phone" => Some(Channel::Phone),
            _ => None,
        }
    }
}

#[test]
fn enumerated_of_stores_labels() {
    let directive = FieldDirective::enumerated_of(&[Channel::Phone]);
    assert_eq!(
        directive,
        FieldDirective::EnumeratedSet {
            allowed: Some(vec!["Phone".to_string()])
        }
    );
    assert_eq!(
        FieldDirective::enumerated(),
        FieldDirective::EnumeratedSet { allowed: None }
    );
}

#[test]
fn constant_converts_through_field_type() {
    assert_eq!(
        FieldDirective::constant(7_u8),
        FieldDirective::Constant(FieldValue::Int(7))
    );
    assert_eq!(
        FieldDirective::constant(None::<String>),
        FieldDirective::Constant(FieldValue::Null)
    );
}

#[test]
fn foreign_key_helpers_set_optionality() {
    match FieldDirective::optional_foreign_key("Customer", 25) {
        FieldDirective::ForeignKey {
            referenced,
            optional,
            null_probability,
        } => {
            assert_eq!(referenced, "Customer");
            assert!(optional);
            assert_eq!(null_probability, 25);
        }
        other => panic!("unexpected directive {other:?}"),
    }
    assert!(matches!(
        FieldDirective::foreign_key("Customer"),
        FieldDirective::ForeignKey {
            optional: false,
            null_probability: 0,
            ..
        }
    ));
}

#[test]
fn cultural_helpers_carry_their_arguments() {
    assert_eq!(
        FieldDirective::year(Some(1390), None),
        FieldDirective::CulturalDate(CulturalDate::Year {
            min: Some(1390),
            max: None
        })
    );
    assert_eq!(
        FieldDirective::date_range("1402/01/01", "1402/06/31"),
        FieldDirective::CulturalDate(CulturalDate::DateRange {
            start: "1402/01/01".to_string(),
            end: "1402/06/31".to_string(),
        })
    );
}

#[test]
fn enum_info_compares_by_name() {
    let info = Channel::info();
    assert_eq!(info.labels, &["Web", "Phone"]);
    assert_eq!(ValueKind::Enum(info).name(), "Channel");
    assert_eq!(Channel::from_label("Fax"), None);
}

#[test]
fn persian_dates_cross_into_date_times() {
    let date = PersianDate::new(1403, 1, 1)
        .and_then(|date| date.with_time(9, 30, 0))
        .expect("date");
    let value = chrono::NaiveDateTime::from_value(FieldValue::PersianDate(date)).expect("convert");
    assert_eq!(value.to_string(), "2024-03-20 09:30:00");

    let back = PersianDate::from_value(FieldValue::DateTime(value)).expect("back");
    assert_eq!(back, date);
}

#[test]
fn calendar_errors_keep_their_kind() {
    let err = PersianDate::new(1402, 13, 1).map_err(Error::from);
    assert!(matches!(err, Err(Error::InvalidArgument(_))));
    let err = fixtura_calendar::parse_date("1402-01-01").map_err(Error::from);
    assert!(matches!(err, Err(Error::Format(_))));
}
