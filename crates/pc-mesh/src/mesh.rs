//! Core mesh data structures.

use std::ops::Range;

use pc_core::{PatchId, Vector};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::mapping::MeshMap;
use crate::traits::MeshAccess;
use crate::zone::FaceZone;

/// A contiguous block of boundary faces sharing a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryPatch {
    pub(crate) name: String,
    pub(crate) start: usize,
    pub(crate) size: usize,
}

impl BoundaryPatch {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Global index of the patch's first face.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.size
    }

    pub fn contains(&self, face: usize) -> bool {
        self.range().contains(&face)
    }
}

/// Derived geometry, recomputed whenever points or connectivity change.
#[derive(Debug, Clone, Default)]
struct MeshGeometry {
    face_area_vectors: Vec<Vector>,
    face_centres: Vec<Vector>,
    cell_centres: Vec<Vector>,
}

impl MeshGeometry {
    fn compute(
        points: &[Vector],
        faces: &[Vec<usize>],
        owner: &[usize],
        neighbour: &[usize],
        n_cells: usize,
    ) -> Self {
        let mut face_area_vectors = Vec::with_capacity(faces.len());
        let mut face_centres = Vec::with_capacity(faces.len());

        for face in faces {
            let n = face.len().max(1) as f64;
            let centre = face.iter().map(|&p| points[p]).sum::<Vector>() / n;

            // Triangle fan around the point average
            let mut area = Vector::zeros();
            for (i, &p) in face.iter().enumerate() {
                let q = face[(i + 1) % face.len()];
                area += 0.5 * (points[p] - centre).cross(&(points[q] - centre));
            }

            face_centres.push(centre);
            face_area_vectors.push(area);
        }

        // Cell centres: average of the centres of the faces bounding each cell
        let mut sums = vec![Vector::zeros(); n_cells];
        let mut counts = vec![0_usize; n_cells];
        for (face, &own) in owner.iter().enumerate() {
            sums[own] += face_centres[face];
            counts[own] += 1;
        }
        for (face, &nei) in neighbour.iter().enumerate() {
            sums[nei] += face_centres[face];
            counts[nei] += 1;
        }
        let cell_centres = sums
            .into_iter()
            .zip(counts)
            .map(|(sum, count)| if count > 0 { sum / count as f64 } else { sum })
            .collect();

        Self {
            face_area_vectors,
            face_centres,
            cell_centres,
        }
    }
}

/// Unstructured polyhedral mesh.
///
/// Owns connectivity, boundary patches and the face-zone catalog. Geometry is
/// cached and refreshed by `move_points` and `renumber_internal_faces`.
#[derive(Debug, Clone)]
pub struct PolyMesh {
    pub(crate) points: Vec<Vector>,
    pub(crate) faces: Vec<Vec<usize>>,
    pub(crate) owner: Vec<usize>,
    /// One entry per internal face.
    pub(crate) neighbour: Vec<usize>,
    pub(crate) n_cells: usize,
    pub(crate) patches: Vec<BoundaryPatch>,
    pub(crate) face_zones: Vec<FaceZone>,
    geometry: MeshGeometry,
}

impl PolyMesh {
    /// Assemble a mesh from already-validated parts (see `MeshBuilder`).
    pub(crate) fn from_parts(
        points: Vec<Vector>,
        faces: Vec<Vec<usize>>,
        owner: Vec<usize>,
        neighbour: Vec<usize>,
        n_cells: usize,
        patches: Vec<BoundaryPatch>,
        face_zones: Vec<FaceZone>,
    ) -> Self {
        let geometry = MeshGeometry::compute(&points, &faces, &owner, &neighbour, n_cells);
        Self {
            points,
            faces,
            owner,
            neighbour,
            n_cells,
            patches,
            face_zones,
            geometry,
        }
    }

    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    /// Point indices of a face, ordered so the right-hand rule gives the area vector.
    pub fn face_points(&self, face: usize) -> Option<&[usize]> {
        self.faces.get(face).map(Vec::as_slice)
    }

    pub fn patch(&self, id: PatchId) -> Option<&BoundaryPatch> {
        self.patches.get(id.index())
    }

    pub fn find_patch(&self, name: &str) -> Option<PatchId> {
        self.patches
            .iter()
            .position(|p| p.name == name)
            .map(PatchId::from_index)
    }

    /// Replace point positions without touching connectivity.
    pub fn move_points(&mut self, points: Vec<Vector>) -> MeshResult<()> {
        if points.len() != self.points.len() {
            return Err(MeshError::PointCountMismatch {
                expected: self.points.len(),
                actual: points.len(),
            });
        }
        self.points = points;
        self.refresh_geometry();
        Ok(())
    }

    /// Reorder internal faces; `order[new] = old`.
    ///
    /// Boundary faces keep their indices. Face zones are renumbered along with
    /// the faces, and the returned map describes the change for observers.
    pub fn renumber_internal_faces(&mut self, order: &[usize]) -> MeshResult<MeshMap> {
        let n_internal = self.neighbour.len();
        if order.len() != n_internal {
            return Err(MeshError::InvalidRenumbering {
                what: "order length must equal the internal face count",
            });
        }
        let mut seen = vec![false; n_internal];
        for &old in order {
            if old >= n_internal || seen[old] {
                return Err(MeshError::InvalidRenumbering {
                    what: "order must be a permutation of the internal faces",
                });
            }
            seen[old] = true;
        }

        let n_faces = self.faces.len();
        let face_map: Vec<usize> = order.iter().copied().chain(n_internal..n_faces).collect();

        let faces = face_map.iter().map(|&old| self.faces[old].clone()).collect();
        let owner = face_map.iter().map(|&old| self.owner[old]).collect();
        let neighbour = order.iter().map(|&old| self.neighbour[old]).collect();

        let map = MeshMap::renumbering(face_map, self.n_cells);
        self.faces = faces;
        self.owner = owner;
        self.neighbour = neighbour;
        self.face_zones = self
            .face_zones
            .iter()
            .map(|zone| zone.renumbered(map.reverse_face_map()))
            .collect();
        self.refresh_geometry();

        debug!(faces = n_faces, internal = n_internal, "renumbered internal faces");
        Ok(map)
    }

    fn refresh_geometry(&mut self) {
        self.geometry = MeshGeometry::compute(
            &self.points,
            &self.faces,
            &self.owner,
            &self.neighbour,
            self.n_cells,
        );
    }
}

impl MeshAccess for PolyMesh {
    fn n_points(&self) -> usize {
        self.points.len()
    }

    fn n_cells(&self) -> usize {
        self.n_cells
    }

    fn n_faces(&self) -> usize {
        self.faces.len()
    }

    fn n_internal_faces(&self) -> usize {
        self.neighbour.len()
    }

    fn face_owner(&self, face: usize) -> usize {
        self.owner[face]
    }

    fn face_neighbour(&self, face: usize) -> Option<usize> {
        self.neighbour.get(face).copied()
    }

    fn face_area_vector(&self, face: usize) -> Vector {
        self.geometry.face_area_vectors[face]
    }

    fn face_centre(&self, face: usize) -> Vector {
        self.geometry.face_centres[face]
    }

    fn cell_centre(&self, cell: usize) -> Vector {
        self.geometry.cell_centres[cell]
    }

    fn patches(&self) -> &[BoundaryPatch] {
        &self.patches
    }

    fn face_zones(&self) -> &[FaceZone] {
        &self.face_zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MeshBuilder;
    use pc_core::vector;

    /// Two unit cubes side by side along x, sharing one internal face.
    fn two_cubes() -> PolyMesh {
        let mut b = MeshBuilder::new();
        for k in 0..2 {
            for j in 0..2 {
                for i in 0..3 {
                    b.add_point(vector(i as f64, j as f64, k as f64));
                }
            }
        }
        let p = |i: usize, j: usize, k: usize| i + 3 * (j + 2 * k);
        let c0 = b.add_cell();
        let c1 = b.add_cell();
        let shared = b.add_internal_face(vec![p(1, 0, 0), p(1, 1, 0), p(1, 1, 1), p(1, 0, 1)], c0, c1);
        let outlet = b.add_patch("outlet");
        b.add_boundary_face(outlet, vec![p(2, 0, 0), p(2, 1, 0), p(2, 1, 1), p(2, 0, 1)], c1);
        b.add_face_zone("mid", &[(shared, false)]);
        b.build().unwrap()
    }

    #[test]
    fn unit_square_face_geometry() {
        let mesh = two_cubes();
        let s = mesh.face_area_vector(0);
        assert!((s - vector(1.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((mesh.face_centre(0) - vector(1.0, 0.5, 0.5)).norm() < 1e-12);
        assert_eq!(mesh.face_neighbour(0), Some(1));
        assert_eq!(mesh.face_neighbour(1), None);
    }

    #[test]
    fn face_patch_reports_local_index() {
        let mesh = two_cubes();
        let (patch, local) = mesh.face_patch(1).unwrap();
        assert_eq!(mesh.patch(patch).unwrap().name(), "outlet");
        assert_eq!(local, 0);
        assert!(mesh.face_patch(0).is_none());
    }

    #[test]
    fn move_points_refreshes_area_vectors() {
        let mut mesh = two_cubes();
        let stretched = mesh
            .points()
            .iter()
            .map(|p| vector(p.x, 2.0 * p.y, p.z))
            .collect();
        mesh.move_points(stretched).unwrap();
        assert!((mesh.face_area_vector(0).x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn move_points_rejects_wrong_count() {
        let mut mesh = two_cubes();
        let err = mesh.move_points(vec![Vector::zeros()]).unwrap_err();
        assert!(matches!(err, MeshError::PointCountMismatch { .. }));
    }

    #[test]
    fn renumber_rejects_non_permutation() {
        let mut mesh = two_cubes();
        assert!(mesh.renumber_internal_faces(&[]).is_err());
        assert!(mesh.renumber_internal_faces(&[3]).is_err());
    }
}
