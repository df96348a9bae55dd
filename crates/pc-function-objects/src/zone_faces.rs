//! Oriented face index sets resolved from named face zones.

use pc_core::{PcError, Real};
use pc_mesh::MeshAccess;
use tracing::debug;

use crate::error::{FunctionObjectError, FunctionObjectResult};

/// Orientation of a zone face relative to the zone's positive direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn value(self) -> Real {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// A mesh face together with its sign in the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedFace {
    pub face: usize,
    pub sign: Sign,
}

/// Cached `(face, sign)` list for one named zone.
///
/// The list is built as a whole from the mesh's zone catalog and thrown away
/// as a whole on `invalidate`; the next `resolve` rebuilds it against the
/// current mesh.
#[derive(Debug, Clone)]
pub struct ZoneFaceIndexSet {
    zone_name: String,
    faces: Option<Vec<OrientedFace>>,
    rebuilds: usize,
}

impl ZoneFaceIndexSet {
    pub fn new(zone_name: impl Into<String>) -> Self {
        Self {
            zone_name: zone_name.into(),
            faces: None,
            rebuilds: 0,
        }
    }

    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    /// Point the set at another zone; a different name drops the cached list.
    pub fn set_zone_name(&mut self, zone_name: &str) {
        if self.zone_name != zone_name {
            self.zone_name = zone_name.to_string();
            self.invalidate();
        }
    }

    /// Oriented faces of the zone, rebuilding the list if it was invalidated.
    ///
    /// Boundary faces are always positive. Internal faces are negative when the
    /// zone's flip flag is set.
    pub fn resolve(&mut self, mesh: &dyn MeshAccess) -> FunctionObjectResult<&[OrientedFace]> {
        let faces = match self.faces.take() {
            Some(faces) => faces,
            None => {
                let faces = self.build(mesh)?;
                self.rebuilds += 1;
                debug!(
                    zone = %self.zone_name,
                    faces = faces.len(),
                    rebuilds = self.rebuilds,
                    "resolved face zone"
                );
                faces
            }
        };
        Ok(self.faces.insert(faces).as_slice())
    }

    pub fn invalidate(&mut self) {
        self.faces = None;
    }

    pub fn is_valid(&self) -> bool {
        self.faces.is_some()
    }

    /// Cached list, if valid.
    pub fn faces(&self) -> Option<&[OrientedFace]> {
        self.faces.as_deref()
    }

    /// Number of times the list has been built.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    fn build(&self, mesh: &dyn MeshAccess) -> FunctionObjectResult<Vec<OrientedFace>> {
        let zone = mesh
            .find_face_zone(&self.zone_name)
            .and_then(|id| mesh.face_zone(id))
            .ok_or_else(|| FunctionObjectError::ZoneNotFound {
                zone: self.zone_name.clone(),
            })?;

        let n_faces = mesh.n_faces();
        zone.iter()
            .map(|(face, flip)| {
                if face >= n_faces {
                    return Err(PcError::IndexOob {
                        what: "zone face",
                        index: face,
                        len: n_faces,
                    }
                    .into());
                }
                let sign = if mesh.is_internal_face(face) && flip {
                    Sign::Negative
                } else {
                    Sign::Positive
                };
                Ok(OrientedFace { face, sign })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_mesh::generation::{CrossSection, DuctSpec, duct};

    fn duct_with(section: CrossSection) -> pc_mesh::PolyMesh {
        duct(&DuctSpec {
            cells: [4, 2, 2],
            size: [4.0, 1.0, 1.0],
            cross_section: Some(section),
        })
        .unwrap()
    }

    #[test]
    fn internal_faces_follow_the_flip_map() {
        let mesh = duct_with(CrossSection::new("cut", 2));
        let mut set = ZoneFaceIndexSet::new("cut");
        let faces = set.resolve(&mesh).unwrap();
        assert_eq!(faces.len(), 4);
        assert!(faces.iter().all(|f| f.sign == Sign::Positive));

        let mesh = duct_with(CrossSection::new("cut", 2).flipped());
        let mut set = ZoneFaceIndexSet::new("cut");
        let faces = set.resolve(&mesh).unwrap();
        assert!(faces.iter().all(|f| f.sign == Sign::Negative));
    }

    #[test]
    fn boundary_faces_are_always_positive() {
        let mesh = duct_with(CrossSection::new("cut", 0).flipped());
        let mut set = ZoneFaceIndexSet::new("cut");
        let faces = set.resolve(&mesh).unwrap();
        assert_eq!(faces.len(), 4);
        assert!(faces.iter().all(|f| f.sign == Sign::Positive));
    }

    #[test]
    fn unknown_zone_is_reported() {
        let mesh = duct_with(CrossSection::new("cut", 2));
        let mut set = ZoneFaceIndexSet::new("missing");
        match set.resolve(&mesh) {
            Err(FunctionObjectError::ZoneNotFound { zone }) => assert_eq!(zone, "missing"),
            other => panic!("expected ZoneNotFound, got {other:?}"),
        }
        assert!(!set.is_valid());
        assert_eq!(set.rebuild_count(), 0);
    }

    #[test]
    fn cached_until_invalidated() {
        let mesh = duct_with(CrossSection::new("cut", 2));
        let mut set = ZoneFaceIndexSet::new("cut");
        set.resolve(&mesh).unwrap();
        set.resolve(&mesh).unwrap();
        assert_eq!(set.rebuild_count(), 1);

        set.invalidate();
        assert!(set.faces().is_none());
        set.resolve(&mesh).unwrap();
        assert_eq!(set.rebuild_count(), 2);

        set.set_zone_name("cut");
        assert!(set.is_valid());
        set.set_zone_name("other");
        assert!(!set.is_valid());
    }

    #[test]
    fn sign_values() {
        assert_eq!(Sign::Positive.value(), 1.0);
        assert_eq!(Sign::Negative.value(), -1.0);
        assert_eq!(Sign::Positive.flipped(), Sign::Negative);
    }
}
