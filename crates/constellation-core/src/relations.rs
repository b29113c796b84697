//! Relationship discovery across shared attribute values.

use constellation_data::AttributeValue;

use crate::world::{Unit, UnitId};

/// One match between the selected unit and a unit sharing a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation<'a> {
    /// Unit that shares the value (possibly the selected unit itself).
    pub target: UnitId,
    /// Name of the selected unit's attribute: the attribute group.
    pub attribute: &'a str,
    /// The shared value.
    pub value: &'a AttributeValue,
}

/// Lazily list every unit sharing each of `selected`'s attribute values.
///
/// Results come attribute by attribute in the selected record's order, and
/// within one attribute in unit placement order. A target's value may sit
/// under any attribute name. The selected unit matches itself, and a unit
/// sharing two values appears twice.
pub fn resolve_links<'a>(
    units: &'a [Unit],
    selected: &'a Unit,
) -> impl Iterator<Item = Relation<'a>> + 'a {
    selected
        .record
        .iter()
        .filter(|(_, value)| value.participates())
        .flat_map(move |(attribute, value)| {
            units
                .iter()
                .filter(move |unit| unit.record.contains_value(value))
                .map(move |unit| Relation {
                    target: unit.id,
                    attribute,
                    value,
                })
        })
}
