//! Field values on zone faces.

use pc_core::{Vector, ensure_finite_vector};
use pc_fields::{FieldLookup, VectorField, face_value};
use pc_mesh::MeshAccess;

use crate::error::{FunctionObjectError, FunctionObjectResult};
use crate::zone_faces::OrientedFace;

/// Samples one named vector field on a list of faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSampler {
    field_name: String,
}

impl FieldSampler {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn set_field_name(&mut self, field_name: &str) {
        field_name.clone_into(&mut self.field_name);
    }

    /// One value per face, in the order given.
    ///
    /// Face fields are read directly; cell fields are interpolated to the faces.
    /// Every sampled value must be finite.
    pub fn sample(
        &self,
        fields: &dyn FieldLookup,
        mesh: &dyn MeshAccess,
        faces: &[OrientedFace],
    ) -> FunctionObjectResult<Vec<Vector>> {
        let field = fields
            .lookup_vector(&self.field_name)
            .ok_or_else(|| FunctionObjectError::FieldNotFound {
                field: self.field_name.clone(),
            })?;

        let values: Vec<Vector> = match field {
            VectorField::Surface(f) => {
                f.check_sizes(mesh)?;
                faces.iter().map(|of| f.value(of.face)).collect::<Result<_, _>>()?
            }
            VectorField::Vol(f) => faces
                .iter()
                .map(|of| face_value(mesh, f, of.face))
                .collect::<Result<_, _>>()?,
        };
        for value in &values {
            ensure_finite_vector(value, "sampled velocity")?;
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone_faces::Sign;
    use pc_core::vector;
    use pc_fields::{FieldError, FieldRegistry, SurfaceVectorField, VolVectorField};
    use pc_mesh::generation::{CrossSection, DuctSpec, duct};

    fn setup() -> (pc_mesh::PolyMesh, Vec<OrientedFace>) {
        let mesh = duct(&DuctSpec {
            cells: [4, 1, 1],
            size: [4.0, 1.0, 1.0],
            cross_section: Some(CrossSection::new("cut", 2)),
        })
        .unwrap();
        let faces = vec![
            OrientedFace { face: 1, sign: Sign::Positive },
            OrientedFace { face: 0, sign: Sign::Positive },
        ];
        (mesh, faces)
    }

    #[test]
    fn surface_field_is_indexed_in_zone_order() {
        let (mesh, faces) = setup();
        let mut fields = FieldRegistry::new();
        fields.insert(SurfaceVectorField::from_fn("phiU", &mesh, |c| vector(c.x, 0.0, 0.0)));
        let values = FieldSampler::new("phiU").sample(&fields, &mesh, &faces).unwrap();
        assert_eq!(values, vec![vector(2.0, 0.0, 0.0), vector(1.0, 0.0, 0.0)]);
    }

    #[test]
    fn cell_field_is_interpolated_linearly() {
        let (mesh, faces) = setup();
        let mut fields = FieldRegistry::new();
        fields.insert(VolVectorField::from_fn("U", &mesh, |c| vector(c.x, 0.0, 0.0)));
        let values = FieldSampler::new("U").sample(&fields, &mesh, &faces).unwrap();
        // Internal x-faces of a 4x1x1 duct sit at x = 1, 2, 3.
        assert!((values[0].x - 2.0).abs() < 1e-12);
        assert!((values[1].x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_field_is_reported() {
        let (mesh, faces) = setup();
        let fields = FieldRegistry::new();
        match FieldSampler::new("U").sample(&fields, &mesh, &faces) {
            Err(FunctionObjectError::FieldNotFound { field }) => assert_eq!(field, "U"),
            other => panic!("expected FieldNotFound, got {other:?}"),
        }
    }

    #[test]
    fn short_surface_field_is_a_field_error() {
        let (mesh, faces) = setup();
        let mut fields = FieldRegistry::new();
        fields.insert(SurfaceVectorField::new("U", vec![vector(1.0, 0.0, 0.0)]));
        match FieldSampler::new("U").sample(&fields, &mesh, &faces) {
            Err(FunctionObjectError::Field(FieldError::SizeMismatch { field, actual, .. })) => {
                assert_eq!(field, "U");
                assert_eq!(actual, 1);
            }
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let (mesh, faces) = setup();
        let mut fields = FieldRegistry::new();
        fields.insert(VolVectorField::uniform("U", &mesh, vector(f64::NAN, 0.0, 0.0)));
        assert!(matches!(
            FieldSampler::new("U").sample(&fields, &mesh, &faces),
            Err(FunctionObjectError::Numeric(_))
        ));
    }
}
