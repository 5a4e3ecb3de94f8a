//! Code for handling IDs
use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};

/// A trait alias for ID types
pub trait IDLike:
    Eq + std::hash::Hash + std::borrow::Borrow<str> + Clone + std::fmt::Display + From<String>
{
}
impl<T> IDLike for T where
    T: Eq + std::hash::Hash + std::borrow::Borrow<str> + Clone + std::fmt::Display + From<String>
{
}

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(
            Clone,
            std::hash::Hash,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            serde::Deserialize,
            Debug,
            serde::Serialize,
        )]
        /// An ID type (e.g. `ZoneID`)
        pub struct $name(pub std::rc::Rc<str>);

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl $name {
            /// Create a new ID from a string slice
            pub fn new(id: &str) -> Self {
                $name(std::rc::Rc::from(id))
            }
        }
    };
}
pub(crate) use define_id_type;

#[cfg(test)]
define_id_type!(GenericID);

/// Indicates that the struct has an ID field
pub trait HasID<ID: IDLike> {
    /// Get the struct's ID
    fn get_id(&self) -> &ID;
}

/// Implement the `HasID` trait for the given type, assuming it has a field called `id`
macro_rules! define_id_getter {
    ($t:ty, $id_ty:ty) => {
        impl crate::id::HasID<$id_ty> for $t {
            fn get_id(&self) -> &$id_ty {
                &self.id
            }
        }
    };
}
pub(crate) use define_id_getter;

/// An ordered collection of IDs, where each ID also identifies a row/column of a matrix
pub trait IDCollection<ID: IDLike> {
    /// Get the position of an ID in the collection by its string representation.
    ///
    /// # Arguments
    ///
    /// * `id` - The string representation of the ID
    ///
    /// # Returns
    ///
    /// The index of the ID in `self` (i.e. its matrix row/column), or an error if not found.
    fn get_index_by_str(&self, id: &str) -> Result<usize>;
}

impl<ID: IDLike> IDCollection<ID> for IndexSet<ID> {
    fn get_index_by_str(&self, id: &str) -> Result<usize> {
        self.get_index_of(id)
            .with_context(|| format!("Unknown ID {id} found"))
    }
}

impl<ID: IDLike, V> IDCollection<ID> for IndexMap<ID, V> {
    fn get_index_by_str(&self, id: &str) -> Result<usize> {
        self.get_index_of(id)
            .with_context(|| format!("Unknown ID {id} found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ids() -> IndexSet<GenericID> {
        ["A".into(), "B".into(), "C".into()].into_iter().collect()
    }

    #[rstest]
    fn test_get_index_by_str(ids: IndexSet<GenericID>) {
        assert_eq!(ids.get_index_by_str("A").unwrap(), 0);
        assert_eq!(ids.get_index_by_str("C").unwrap(), 2);
        assert_eq!(
            ids.get_index_by_str("D").unwrap_err().to_string(),
            "Unknown ID D found"
        );
    }

    #[test]
    fn test_index_map_collection() {
        let map = indexmap! { GenericID::new("X") => 1, GenericID::new("Y") => 2 };
        assert_eq!(map.get_index_by_str("Y").unwrap(), 1);
        assert!(map.get_index_by_str("Z").is_err());
    }
}
