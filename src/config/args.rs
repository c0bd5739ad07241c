use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// String-keyed bag of JSON values (named arguments, encoder options).
pub type Bag = BTreeMap<String, serde_json::Value>;

/// Style arguments forwarded to one plot layer.
pub type StyleArgs = Bag;

/// Arguments for one named hook.
///
/// JSON `null` means "call with no arguments", an object means named arguments, and any
/// other value is passed as the single positional argument.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HookArgs {
    /// Invoke with no arguments.
    #[default]
    NoArgs,
    /// Invoke with one positional argument.
    Positional(serde_json::Value),
    /// Invoke with named arguments.
    Named(Bag),
}

impl From<serde_json::Value> for HookArgs {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::NoArgs,
            serde_json::Value::Object(map) => Self::Named(map.into_iter().collect()),
            other => Self::Positional(other),
        }
    }
}

impl<'de> Deserialize<'de> for HookArgs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

/// One named hook invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Hook {
    /// Operation identifier (e.g. `title`, `set_theme`).
    pub name: String,
    /// How to invoke it.
    pub args: HookArgs,
}

/// Ordered list of hooks, applied in insertion order.
///
/// Deserializes from a JSON object; entries keep their document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HookList(Vec<Hook>);

impl HookList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook (builder style).
    pub fn with(mut self, name: impl Into<String>, args: impl Into<HookArgs>) -> Self {
        self.push(name, args);
        self
    }

    /// Append a hook.
    pub fn push(&mut self, name: impl Into<String>, args: impl Into<HookArgs>) {
        self.0.push(Hook {
            name: name.into(),
            args: args.into(),
        });
    }

    /// Iterate in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Hook> {
        self.0.iter()
    }

    /// Number of hooks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for HookList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HookListVisitor;

        impl<'de> Visitor<'de> for HookListVisitor {
            type Value = HookList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping hook names to arguments")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(HookList::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut hooks = HookList::new();
                while let Some((name, args)) = map.next_entry::<String, serde_json::Value>()? {
                    hooks.push(name, args);
                }
                Ok(hooks)
            }
        }

        deserializer.deserialize_any(HookListVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/args.rs"]
mod tests;
