//! Interpolation reproduces linear fields on uniform ducts.

use pc_core::{Vector, vector};
use pc_fields::{VolVectorField, face_value};
use pc_mesh::MeshAccess;
use pc_mesh::generation::{DuctSpec, duct};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_field_is_exact_on_internal_faces(
        a in -5.0_f64..5.0,
        b in -5.0_f64..5.0,
        c in -5.0_f64..5.0,
        nx in 2_usize..6,
    ) {
        let mesh = duct(&DuctSpec {
            cells: [nx, 2, 2],
            size: [nx as f64, 1.0, 1.0],
            cross_section: None,
        })
        .unwrap();
        let f = |p: &Vector| vector(a * p.x + b, c * p.y, a * p.z - c);
        let u = VolVectorField::from_fn("U", &mesh, f);

        for face in 0..mesh.n_internal_faces() {
            let exact = f(&mesh.face_centre(face));
            let got = face_value(&mesh, &u, face).unwrap();
            prop_assert!((exact - got).norm() < 1e-9);
        }
    }
}
