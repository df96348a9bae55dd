//! Named face zones.

/// A named, ordered subset of mesh faces with a per-face flip flag.
///
/// `flip == false` means the zone's positive direction agrees with the face's
/// owner-to-neighbour normal; `true` means it points the other way. The flag
/// is only meaningful for internal faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceZone {
    name: String,
    faces: Vec<usize>,
    flip_map: Vec<bool>,
}

impl FaceZone {
    /// Create a zone from `(face, flip)` pairs, keeping their order.
    pub fn new(name: impl Into<String>, entries: impl IntoIterator<Item = (usize, bool)>) -> Self {
        let (faces, flip_map) = entries.into_iter().unzip();
        Self {
            name: name.into(),
            faces,
            flip_map,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn faces(&self) -> &[usize] {
        &self.faces
    }

    pub fn flip_map(&self) -> &[bool] {
        &self.flip_map
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterate `(face, flip)` pairs in zone order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.faces.iter().copied().zip(self.flip_map.iter().copied())
    }

    /// Same faces with the orientation convention reversed.
    pub fn flipped(&self) -> Self {
        Self {
            name: self.name.clone(),
            faces: self.faces.clone(),
            flip_map: self.flip_map.iter().map(|f| !f).collect(),
        }
    }

    /// Re-express the zone in new face numbering; faces without a new index are dropped.
    pub(crate) fn renumbered(&self, reverse_face_map: &[Option<usize>]) -> Self {
        let entries = self
            .iter()
            .filter_map(|(face, flip)| {
                reverse_face_map
                    .get(face)
                    .copied()
                    .flatten()
                    .map(|new_face| (new_face, flip))
            })
            .collect::<Vec<_>>();
        Self::new(self.name.clone(), entries)
    }
}
