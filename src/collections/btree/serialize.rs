//! serde support for [`BTree`].
//!
//! A tree serializes as its minimum degree plus its keys in order. Node
//! layout is not part of the format; deserializing rebuilds the tree by
//! inserting the keys.

use super::BTree;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};

impl<K: Serialize> Serialize for BTree<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BTree", 2)?;
        state.serialize_field("minimum_degree", &self.minimum_degree())?;
        state.serialize_field("keys", &self.traverse())?;
        state.end()
    }
}

#[derive(serde::Deserialize)]
#[serde(rename = "BTree", deny_unknown_fields)]
struct BTreeRepr<K> {
    minimum_degree: usize,
    keys: Vec<K>,
}

impl<'de, K> Deserialize<'de> for BTree<K>
where
    K: Ord + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = BTreeRepr::<K>::deserialize(deserializer)?;
        let mut tree = BTree::new(repr.minimum_degree).map_err(de::Error::custom)?;
        for key in repr.keys {
            tree.try_insert(key).map_err(de::Error::custom)?;
        }
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_keys_in_order() {
        let mut tree = BTree::new(2).unwrap();
        for key in [5, 1, 4, 1, 3] {
            tree.insert(key);
        }
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"minimum_degree":2,"keys":[1,1,3,4,5]}"#);
    }

    #[test]
    fn test_deserialize_rebuilds_valid_tree() {
        let json = r#"{"minimum_degree":2,"keys":[9,3,7,1,5,3,8,2]}"#;
        let tree: BTree<i32> = serde_json::from_str(json).unwrap();

        assert_eq!(tree.minimum_degree(), 2);
        assert_eq!(tree.to_vec(), vec![1, 2, 3, 3, 5, 7, 8, 9]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_deserialize_rejects_invalid_degree() {
        let err = serde_json::from_str::<BTree<i32>>(r#"{"minimum_degree":1,"keys":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid minimum degree 1"));
    }
}
