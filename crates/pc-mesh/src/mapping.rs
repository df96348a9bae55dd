//! Topology-change payload.
//!
//! Describes how face and cell indices moved between the mesh an observer last
//! saw and the current one.

use crate::traits::MeshAccess;

/// Old-to-new index correspondence after a topology change.
///
/// `face_map[new] = Some(old)` when a current face descends from a previous
/// face, `None` when it was created by the change. The reverse map is derived
/// and sized to the old face count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshMap {
    n_old_faces: usize,
    n_old_cells: usize,
    face_map: Vec<Option<usize>>,
    reverse_face_map: Vec<Option<usize>>,
    cell_map: Vec<Option<usize>>,
}

impl MeshMap {
    /// Build a map from explicit new-to-old tables.
    pub fn new(
        n_old_faces: usize,
        n_old_cells: usize,
        face_map: Vec<Option<usize>>,
        cell_map: Vec<Option<usize>>,
    ) -> Self {
        let mut reverse_face_map = vec![None; n_old_faces];
        for (new, old) in face_map.iter().enumerate() {
            if let Some(slot) = old.and_then(|o| reverse_face_map.get_mut(o)) {
                *slot = Some(new);
            }
        }
        Self {
            n_old_faces,
            n_old_cells,
            face_map,
            reverse_face_map,
            cell_map,
        }
    }

    /// Pure face renumbering; cells unchanged.
    pub fn renumbering(face_map: Vec<usize>, n_cells: usize) -> Self {
        let n_faces = face_map.len();
        Self::new(
            n_faces,
            n_cells,
            face_map.into_iter().map(Some).collect(),
            (0..n_cells).map(Some).collect(),
        )
    }

    /// A mesh rebuilt from scratch (e.g. refined): no face or cell descends
    /// from a previous one.
    pub fn regenerated(old: &dyn MeshAccess, new: &dyn MeshAccess) -> Self {
        Self::new(
            old.n_faces(),
            old.n_cells(),
            vec![None; new.n_faces()],
            vec![None; new.n_cells()],
        )
    }

    pub fn n_old_faces(&self) -> usize {
        self.n_old_faces
    }

    pub fn n_old_cells(&self) -> usize {
        self.n_old_cells
    }

    pub fn n_new_faces(&self) -> usize {
        self.face_map.len()
    }

    pub fn n_new_cells(&self) -> usize {
        self.cell_map.len()
    }

    /// New-to-old face table.
    pub fn face_map(&self) -> &[Option<usize>] {
        &self.face_map
    }

    /// Old-to-new face table.
    pub fn reverse_face_map(&self) -> &[Option<usize>] {
        &self.reverse_face_map
    }

    pub fn cell_map(&self) -> &[Option<usize>] {
        &self.cell_map
    }

    /// Current index of a previous face, if it survived.
    pub fn new_face(&self, old: usize) -> Option<usize> {
        self.reverse_face_map.get(old).copied().flatten()
    }

    /// True when every face and cell kept its index.
    pub fn is_identity(&self) -> bool {
        self.n_old_faces == self.face_map.len()
            && self.n_old_cells == self.cell_map.len()
            && self.face_map.iter().enumerate().all(|(i, &o)| o == Some(i))
            && self.cell_map.iter().enumerate().all(|(i, &o)| o == Some(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_map_inverts_renumbering() {
        let map = MeshMap::renumbering(vec![2, 0, 1, 3], 2);
        assert_eq!(map.new_face(2), Some(0));
        assert_eq!(map.new_face(0), Some(1));
        assert_eq!(map.new_face(3), Some(3));
        assert!(!map.is_identity());
    }

    #[test]
    fn identity_detection() {
        let map = MeshMap::renumbering(vec![0, 1, 2], 1);
        assert!(map.is_identity());
    }

    #[test]
    fn created_faces_have_no_origin() {
        let map = MeshMap::new(2, 1, vec![Some(1), None, None], vec![Some(0), None]);
        assert_eq!(map.n_new_faces(), 3);
        assert_eq!(map.new_face(1), Some(0));
        assert_eq!(map.new_face(0), None);
        assert_eq!(map.n_new_cells(), 2);
    }
}
