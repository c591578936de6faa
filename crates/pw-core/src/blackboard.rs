use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FleetId, Order, PlanetId};

/// Name of a blackboard slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey(pub &'static str);

impl BbKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(self) -> &'static str {
        self.0
    }
}

/// Tagged blackboard value.
///
/// Planets and fleets are stored by id and resolved against whichever snapshot is current, so a
/// stored reference can never be used to mutate game state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    Absent,
    Int(i64),
    Planet(PlanetId),
    Fleet(FleetId),
    Order(Order),
    List(Vec<Value>),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Int(_) => "int",
            Value::Planet(_) => "planet",
            Value::Fleet(_) => "fleet",
            Value::Order(_) => "order",
            Value::List(_) => "list",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_planet(&self) -> Option<PlanetId> {
        match self {
            Value::Planet(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_fleet(&self) -> Option<FleetId> {
        match self {
            Value::Fleet(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_order(&self) -> Option<&Order> {
        match self {
            Value::Order(order) => Some(order),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<PlanetId> for Value {
    fn from(value: PlanetId) -> Self {
        Value::Planet(value)
    }
}

impl From<FleetId> for Value {
    fn from(value: FleetId) -> Self {
        Value::Fleet(value)
    }
}

impl From<Order> for Value {
    fn from(value: Order) -> Self {
        Value::Order(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Absent)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}

/// Key/value scratch space shared by every node of one tree.
///
/// Nothing expires on its own: a value written in one turn is still there in the next. Trees that
/// depend on a fresh value must overwrite it themselves (usually with a `SetVariable` at the top
/// of the branch that reads it).
///
/// The typed readers (`int`, `planet`, ...) return `None` for unset and explicitly absent keys,
/// and panic when the slot holds a different kind of value: that is a malformed tree, not a game
/// condition.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Blackboard {
    values: BTreeMap<BbKey, Value>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `true` if the key has been written, even if it was written as `Value::Absent`.
    pub fn contains(&self, key: BbKey) -> bool {
        self.values.contains_key(&key)
    }

    /// `true` if the key is unset or holds `Value::Absent`.
    pub fn is_absent(&self, key: BbKey) -> bool {
        self.values.get(&key).map_or(true, Value::is_absent)
    }

    pub fn get(&self, key: BbKey) -> Option<&Value> {
        self.values.get(&key)
    }

    pub fn set(&mut self, key: BbKey, value: impl Into<Value>) {
        self.values.insert(key, value.into());
    }

    pub fn remove(&mut self, key: BbKey) -> Option<Value> {
        self.values.remove(&key)
    }

    /// Append to the stack stored under `key`, creating it when unset or absent.
    pub fn push(&mut self, key: BbKey, value: impl Into<Value>) {
        let slot = self.values.entry(key).or_insert(Value::Absent);
        if slot.is_absent() {
            *slot = Value::List(Vec::new());
        }
        match slot {
            Value::List(items) => items.push(value.into()),
            other => panic!(
                "blackboard stack `{}` holds a {} value, not a list",
                key.0,
                other.kind()
            ),
        }
    }

    /// Pop the top of the stack stored under `key`.
    ///
    /// Unset, absent and empty stacks return `None` and leave the store untouched.
    pub fn pop(&mut self, key: BbKey) -> Option<Value> {
        match self.values.get_mut(&key)? {
            Value::Absent => None,
            Value::List(items) => items.pop(),
            other => panic!(
                "blackboard stack `{}` holds a {} value, not a list",
                key.0,
                other.kind()
            ),
        }
    }

    pub fn stack_len(&self, key: BbKey) -> usize {
        match self.values.get(&key) {
            None | Some(Value::Absent) => 0,
            Some(Value::List(items)) => items.len(),
            Some(other) => panic!(
                "blackboard stack `{}` holds a {} value, not a list",
                key.0,
                other.kind()
            ),
        }
    }

    pub fn int(&self, key: BbKey) -> Option<i64> {
        self.typed(key, "int", Value::as_int)
    }

    pub fn planet(&self, key: BbKey) -> Option<PlanetId> {
        self.typed(key, "planet", Value::as_planet)
    }

    pub fn fleet(&self, key: BbKey) -> Option<FleetId> {
        self.typed(key, "fleet", Value::as_fleet)
    }

    pub fn order(&self, key: BbKey) -> Option<Order> {
        self.typed(key, "order", |v| v.as_order().copied())
    }

    pub fn list(&self, key: BbKey) -> Option<&[Value]> {
        match self.values.get(&key)? {
            Value::Absent => None,
            value => Some(value.as_list().unwrap_or_else(|| {
                panic!(
                    "blackboard type mismatch for key `{}` (expected list, found {})",
                    key.0,
                    value.kind()
                )
            })),
        }
    }

    fn typed<T>(
        &self,
        key: BbKey,
        expected: &str,
        read: impl FnOnce(&Value) -> Option<T>,
    ) -> Option<T> {
        let value = self.values.get(&key)?;
        if value.is_absent() {
            return None;
        }
        read(value).or_else(|| {
            panic!(
                "blackboard type mismatch for key `{}` (expected {expected}, found {})",
                key.0,
                value.kind()
            )
        })
    }
}
