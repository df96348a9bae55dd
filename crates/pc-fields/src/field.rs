//! Vector field storage.

use pc_core::{PatchId, Vector};
use pc_mesh::MeshAccess;

use crate::error::{FieldError, FieldResult};

/// Where a field's values live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Cell,
    Face,
}

/// Cell-centred vector field with one value list per boundary patch.
#[derive(Debug, Clone, PartialEq)]
pub struct VolVectorField {
    name: String,
    internal: Vec<Vector>,
    boundary: Vec<Vec<Vector>>,
}

impl VolVectorField {
    pub fn new(name: impl Into<String>, internal: Vec<Vector>, boundary: Vec<Vec<Vector>>) -> Self {
        Self {
            name: name.into(),
            internal,
            boundary,
        }
    }

    /// Same value in every cell and on every boundary face.
    pub fn uniform(name: impl Into<String>, mesh: &dyn MeshAccess, value: Vector) -> Self {
        Self::from_fn(name, mesh, |_| value)
    }

    /// Evaluate `f` at cell centres and boundary face centres.
    pub fn from_fn(name: impl Into<String>, mesh: &dyn MeshAccess, f: impl Fn(&Vector) -> Vector) -> Self {
        let internal = (0..mesh.n_cells())
            .map(|c| f(&mesh.cell_centre(c)))
            .collect();
        let boundary = mesh
            .patches()
            .iter()
            .map(|patch| patch.range().map(|face| f(&mesh.face_centre(face))).collect())
            .collect();
        Self::new(name, internal, boundary)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn internal(&self) -> &[Vector] {
        &self.internal
    }

    pub fn boundary_values(&self, patch: PatchId) -> Option<&[Vector]> {
        self.boundary.get(patch.index()).map(Vec::as_slice)
    }

    /// Check the value counts against a mesh.
    pub fn check_sizes(&self, mesh: &dyn MeshAccess) -> FieldResult<()> {
        if self.internal.len() != mesh.n_cells() {
            return Err(FieldError::SizeMismatch {
                field: self.name.clone(),
                what: "cell",
                expected: mesh.n_cells(),
                actual: self.internal.len(),
            });
        }
        for (i, patch) in mesh.patches().iter().enumerate() {
            let actual = self.boundary.get(i).map_or(0, Vec::len);
            if actual != patch.size() {
                return Err(FieldError::SizeMismatch {
                    field: self.name.clone(),
                    what: "boundary face",
                    expected: patch.size(),
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Face-centred vector field, one value per mesh face.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceVectorField {
    name: String,
    values: Vec<Vector>,
}

impl SurfaceVectorField {
    pub fn new(name: impl Into<String>, values: Vec<Vector>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn uniform(name: impl Into<String>, mesh: &dyn MeshAccess, value: Vector) -> Self {
        Self::new(name, vec![value; mesh.n_faces()])
    }

    /// Evaluate `f` at every face centre.
    pub fn from_fn(name: impl Into<String>, mesh: &dyn MeshAccess, f: impl Fn(&Vector) -> Vector) -> Self {
        Self::new(name, (0..mesh.n_faces()).map(|face| f(&mesh.face_centre(face))).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Vector] {
        &self.values
    }

    pub fn value(&self, face: usize) -> FieldResult<Vector> {
        self.values.get(face).copied().ok_or_else(|| FieldError::NoFaceValue {
            field: self.name.clone(),
            face,
            n_values: self.values.len(),
        })
    }

    /// One value per mesh face.
    pub fn check_sizes(&self, mesh: &dyn MeshAccess) -> FieldResult<()> {
        if self.values.len() != mesh.n_faces() {
            return Err(FieldError::SizeMismatch {
                field: self.name.clone(),
                what: "face",
                expected: mesh.n_faces(),
                actual: self.values.len(),
            });
        }
        Ok(())
    }
}

/// A registered vector field of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorField {
    Vol(VolVectorField),
    Surface(SurfaceVectorField),
}

impl VectorField {
    pub fn name(&self) -> &str {
        match self {
            VectorField::Vol(f) => f.name(),
            VectorField::Surface(f) => f.name(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            VectorField::Vol(_) => FieldKind::Cell,
            VectorField::Surface(_) => FieldKind::Face,
        }
    }
}

impl From<VolVectorField> for VectorField {
    fn from(f: VolVectorField) -> Self {
        VectorField::Vol(f)
    }
}

impl From<SurfaceVectorField> for VectorField {
    fn from(f: SurfaceVectorField) -> Self {
        VectorField::Surface(f)
    }
}
