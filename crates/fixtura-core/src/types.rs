use std::any::TypeId;

/// Declared value type of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Decimal,
    Text,
    DateTime,
    Uuid,
    PersianDate,
    /// Closed set of labels.
    Enum(EnumInfo),
    /// Another model, populated through a foreign-key rule.
    Related(RelatedInfo),
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Decimal => "decimal",
            ValueKind::Text => "text",
            ValueKind::DateTime => "date_time",
            ValueKind::Uuid => "uuid",
            ValueKind::PersianDate => "persian_date",
            ValueKind::Enum(info) => info.name,
            ValueKind::Related(info) => info.name,
        }
    }

    pub fn enum_info(&self) -> Option<&EnumInfo> {
        match self {
            ValueKind::Enum(info) => Some(info),
            _ => None,
        }
    }

    pub fn related_info(&self) -> Option<&RelatedInfo> {
        match self {
            ValueKind::Related(info) => Some(info),
            _ => None,
        }
    }
}

/// Value domain of an enumerated type.
#[derive(Debug, Clone, Copy)]
pub struct EnumInfo {
    pub name: &'static str,
    pub labels: &'static [&'static str],
}

impl PartialEq for EnumInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EnumInfo {}

/// Identity of a related model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelatedInfo {
    pub name: &'static str,
    pub type_id: TypeId,
}

impl RelatedInfo {
    pub fn of<R: 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<R>(),
        }
    }
}

/// Enumerated type whose full label set is known.
///
/// Implementors expose their legal values as labels so directives and
/// rules can pick among them without knowing the concrete type.
pub trait EnumDomain: Sized + 'static {
    const NAME: &'static str;

    /// Every legal label in declaration order.
    fn labels() -> &'static [&'static str];

    fn label(&self) -> &'static str;

    fn from_label(label: &str) -> Option<Self>;

    fn info() -> EnumInfo {
        EnumInfo {
            name: Self::NAME,
            labels: Self::labels(),
        }
    }
}
