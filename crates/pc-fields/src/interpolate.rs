//! Cell-to-face interpolation.

use pc_core::{Real, Vector};
use pc_mesh::MeshAccess;

use crate::error::{FieldError, FieldResult};
use crate::field::VolVectorField;

/// Owner weight of the linear scheme on an internal face.
///
/// `w = S·(C_n - C_f) / S·(C_n - C_o)`, so `w = 0.5` for a face midway between
/// the cell centres. Falls back to 0.5 when the centres are coplanar with the face.
pub fn linear_weight(mesh: &dyn MeshAccess, face: usize) -> Real {
    let Some(nei) = mesh.face_neighbour(face) else {
        return 1.0;
    };
    let s = mesh.face_area_vector(face);
    let c_o = mesh.cell_centre(mesh.face_owner(face));
    let c_n = mesh.cell_centre(nei);
    let c_f = mesh.face_centre(face);

    let denom = s.dot(&(c_n - c_o));
    if denom.abs() <= Real::EPSILON * s.norm() * (c_n - c_o).norm() {
        return 0.5;
    }
    (s.dot(&(c_n - c_f)) / denom).clamp(0.0, 1.0)
}

/// Value of a cell field on a face.
///
/// Internal faces blend owner and neighbour values with `linear_weight`;
/// boundary faces take the patch value.
pub fn face_value(mesh: &dyn MeshAccess, field: &VolVectorField, face: usize) -> FieldResult<Vector> {
    if face >= mesh.n_faces() {
        return Err(FieldError::FaceOutOfRange {
            face,
            n_faces: mesh.n_faces(),
        });
    }

    let cell_value = |cell: usize| {
        field
            .internal()
            .get(cell)
            .copied()
            .ok_or_else(|| FieldError::SizeMismatch {
                field: field.name().to_string(),
                what: "cell",
                expected: mesh.n_cells(),
                actual: field.internal().len(),
            })
    };

    match mesh.face_neighbour(face) {
        Some(nei) => {
            let w = linear_weight(mesh, face);
            let u_o = cell_value(mesh.face_owner(face))?;
            let u_n = cell_value(nei)?;
            Ok(w * u_o + (1.0 - w) * u_n)
        }
        None => {
            let (patch, local) = mesh
                .face_patch(face)
                .ok_or(FieldError::UnpatchedFace { face })?;
            field
                .boundary_values(patch)
                .and_then(|values| values.get(local).copied())
                .ok_or_else(|| FieldError::MissingPatchValues {
                    field: field.name().to_string(),
                    patch,
                })
        }
    }
}
