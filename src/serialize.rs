//! `serde` support: a tree serializes as a map in ascending key order and
//! deserializes by putting every entry of a map, so a repeated key keeps
//! its last value.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::comparator::Comparator;
use crate::index::IndexType;
use crate::rbtree::RbTree;

impl<K, V, C, Ix> Serialize for RbTree<K, V, C, Ix>
where
    K: Serialize,
    V: Serialize,
    Ix: IndexType,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct RbTreeVisitor<K, V, C, Ix> {
    marker: PhantomData<fn() -> RbTree<K, V, C, Ix>>,
}

impl<'de, K, V, C, Ix> Visitor<'de> for RbTreeVisitor<K, V, C, Ix>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
    Ix: IndexType,
{
    type Value = RbTree<K, V, C, Ix>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // cap the hint so a hostile length cannot force a huge allocation
        let capacity = access.size_hint().unwrap_or(0).min(4096);
        let mut tree = RbTree::with_capacity_and_comparator(capacity, C::default());
        while let Some((key, value)) = access.next_entry()? {
            let _ignore = tree.put(key, value);
        }
        Ok(tree)
    }
}

impl<'de, K, V, C, Ix> Deserialize<'de> for RbTree<K, V, C, Ix>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Comparator<K> + Default,
    Ix: IndexType,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RbTreeVisitor {
            marker: PhantomData,
        })
    }
}
