//! By-name field registry.

use std::collections::BTreeMap;

use crate::field::VectorField;

/// Read-only lookup of vector fields by name.
pub trait FieldLookup {
    fn lookup_vector(&self, name: &str) -> Option<&VectorField>;

    fn contains(&self, name: &str) -> bool {
        self.lookup_vector(name).is_some()
    }
}

/// In-memory field registry. Fields may be added or removed between time steps.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: BTreeMap<String, VectorField>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field under its own name, returning any field it replaced.
    pub fn insert(&mut self, field: impl Into<VectorField>) -> Option<VectorField> {
        let field = field.into();
        self.fields.insert(field.name().to_string(), field)
    }

    pub fn remove(&mut self, name: &str) -> Option<VectorField> {
        self.fields.remove(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldLookup for FieldRegistry {
    fn lookup_vector(&self, name: &str) -> Option<&VectorField> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::SurfaceVectorField;
    use pc_core::Vector;

    #[test]
    fn insert_replace_remove() {
        let mut reg = FieldRegistry::new();
        assert!(reg.insert(SurfaceVectorField::new("U", vec![])).is_none());
        assert!(reg.contains("U"));
        assert!(
            reg.insert(SurfaceVectorField::new("U", vec![Vector::zeros()]))
                .is_some()
        );
        assert_eq!(reg.len(), 1);
        assert!(reg.remove("U").is_some());
        assert!(!reg.contains("U"));
        assert!(reg.is_empty());
    }

    #[test]
    fn names_are_sorted() {
        let mut reg = FieldRegistry::new();
        reg.insert(SurfaceVectorField::new("b", vec![]));
        reg.insert(SurfaceVectorField::new("a", vec![]));
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
