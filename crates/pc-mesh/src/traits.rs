//! Read-only mesh interface consumed by diagnostics.

use pc_core::{PatchId, Vector, ZoneId};

use crate::mesh::BoundaryPatch;
use crate::zone::FaceZone;

/// Read-only access to an unstructured mesh.
///
/// Index conventions:
/// - cells `0..n_cells()`
/// - faces `0..n_faces()`, internal faces first (`0..n_internal_faces()`)
///
/// Per-face and per-cell queries panic on out-of-range indices, like slice
/// indexing; callers validate indices taken from external sources first.
pub trait MeshAccess {
    fn n_points(&self) -> usize;

    fn n_cells(&self) -> usize;

    /// Total face count (internal + boundary).
    fn n_faces(&self) -> usize;

    fn n_internal_faces(&self) -> usize;

    #[inline]
    fn is_internal_face(&self, face: usize) -> bool {
        face < self.n_internal_faces()
    }

    fn face_owner(&self, face: usize) -> usize;

    /// Neighbour cell of an internal face; `None` on boundary faces.
    fn face_neighbour(&self, face: usize) -> Option<usize>;

    /// Face normal scaled by face area, owner to neighbour (outward on boundaries).
    fn face_area_vector(&self, face: usize) -> Vector;

    fn face_centre(&self, face: usize) -> Vector;

    fn cell_centre(&self, cell: usize) -> Vector;

    fn patches(&self) -> &[BoundaryPatch];

    /// Patch containing a boundary face and the face's position within it.
    fn face_patch(&self, face: usize) -> Option<(PatchId, usize)> {
        self.patches()
            .iter()
            .enumerate()
            .find(|(_, patch)| patch.contains(face))
            .map(|(i, patch)| (PatchId::from_index(i), face - patch.start()))
    }

    fn face_zones(&self) -> &[FaceZone];

    /// Look up a face zone by name.
    fn find_face_zone(&self, name: &str) -> Option<ZoneId> {
        self.face_zones()
            .iter()
            .position(|zone| zone.name() == name)
            .map(ZoneId::from_index)
    }

    fn face_zone(&self, id: ZoneId) -> Option<&FaceZone> {
        self.face_zones().get(id.index())
    }
}
