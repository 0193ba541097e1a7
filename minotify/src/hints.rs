use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use zbus::zvariant::{Signature, Type, Value};

// Serialized as a{sv} in insertion order.
#[derive(Debug, Default)]
pub struct HintMap<'a>(Vec<(&'a str, Value<'a>)>);

impl<'a> HintMap<'a> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, key: &'a str, value: Value<'a>) {
        self.0.push((key, value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<'a>)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

impl Type for HintMap<'_> {
    const SIGNATURE: &'static Signature =
        <HashMap<&'static str, Value<'static>> as Type>::SIGNATURE;
}

impl Serialize for HintMap<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_string_to_variant_dict() {
        assert_eq!(<HintMap<'_> as Type>::SIGNATURE.to_string(), "a{sv}");
    }

    #[test]
    fn keeps_insertion_order() {
        let mut hints = HintMap::with_capacity(2);
        hints.push("urgency", Value::U8(2));
        hints.push("category", Value::from("im"));

        let keys: Vec<_> = hints.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["urgency", "category"]);
        assert_eq!(hints.len(), 2);
    }
}
