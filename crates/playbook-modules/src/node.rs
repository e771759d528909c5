//! Document model for playbook and task files.
//!
//! A parsed YAML document is reduced to the three shapes the extractor
//! cares about. Scalar payloads are dropped since only mapping keys can
//! become module candidates.

use serde::de::{
    self, Deserialize, Deserializer, EnumAccess, IgnoredAny, MapAccess, SeqAccess, VariantAccess,
    Visitor,
};
use std::fmt;

/// Key that pulls another mapping's entries into the current one.
const MERGE_KEY: &str = "<<";

/// One node of a parsed playbook document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An ordered sequence of nodes.
    Sequence(Vec<Node>),

    /// A play or task record. Keys keep their document order.
    Mapping(Vec<(String, Node)>),

    /// Any non-container value.
    Scalar,
}

impl Node {
    /// Consumes the node, returning the items when it is a sequence.
    pub fn into_sequence(self) -> Option<Vec<Node>> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// Insert or overwrite in place, so a repeated key keeps its first position and last value.
fn insert_last_wins(entries: &mut Vec<(String, Node)>, key: String, value: Node) {
    match entries.iter_mut().find(|(existing, _)| *existing == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

/// Entries contributed by a `<<` value. Earlier mappings in a list take precedence.
fn merge_sources(value: Node) -> Result<Vec<(String, Node)>, &'static str> {
    match value {
        Node::Mapping(entries) => Ok(entries),
        Node::Sequence(items) => {
            let mut merged = Vec::new();
            for item in items.into_iter().rev() {
                let Node::Mapping(entries) = item else {
                    return Err("expected a mapping for merging");
                };
                for (key, value) in entries {
                    insert_last_wins(&mut merged, key, value);
                }
            }
            Ok(merged)
        }
        Node::Scalar => Err("expected a mapping or list of mappings for merging"),
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Scalar)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Node, D::Error>
    where
        D: Deserializer<'de>,
    {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Node, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Node::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Node, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut own = Vec::new();
        let mut merged = Vec::new();
        while let Some(MappingKey(key)) = map.next_key()? {
            let value: Node = map.next_value()?;
            match key {
                Some(key) if key == MERGE_KEY => {
                    merged = merge_sources(value).map_err(<A::Error as de::Error>::custom)?;
                }
                Some(key) => insert_last_wins(&mut own, key, value),
                None => {}
            }
        }

        // Merged entries come first; explicit keys override them.
        let mut entries = merged;
        for (key, value) in own {
            insert_last_wins(&mut entries, key, value);
        }
        Ok(Node::Mapping(entries))
    }

    // Tagged values (`!tag value`) arrive as single-variant enums.
    fn visit_enum<A>(self, data: A) -> Result<Node, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (_tag, variant): (String, _) = data.variant()?;
        variant.newtype_variant()
    }
}

/// Text form of a mapping key. Null and collection keys cannot name a module.
struct MappingKey(Option<String>);

impl<'de> Deserialize<'de> for MappingKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MappingKeyVisitor)
    }
}

struct MappingKeyVisitor;

impl<'de> Visitor<'de> for MappingKeyVisitor {
    type Value = MappingKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping key")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<MappingKey, E> {
        Ok(MappingKey(Some(v.to_string())))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MappingKey, E> {
        Ok(MappingKey(Some(v.to_string())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MappingKey, E> {
        Ok(MappingKey(Some(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MappingKey, E> {
        Ok(MappingKey(Some(v.to_string())))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MappingKey, E> {
        Ok(MappingKey(Some(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<MappingKey, E> {
        Ok(MappingKey(Some(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<MappingKey, E> {
        Ok(MappingKey(None))
    }

    fn visit_none<E: de::Error>(self) -> Result<MappingKey, E> {
        Ok(MappingKey(None))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<MappingKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        MappingKey::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<MappingKey, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(MappingKey(None))
    }

    fn visit_map<A>(self, mut map: A) -> Result<MappingKey, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(MappingKey(None))
    }

    fn visit_enum<A>(self, data: A) -> Result<MappingKey, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (_tag, variant): (String, _) = data.variant()?;
        variant.newtype_variant()
    }
}
