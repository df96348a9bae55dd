//! Incremental mesh builder.

use std::collections::HashMap;

use pc_core::{FaceId, PatchId, Vector, ZoneId};

use crate::error::{MeshError, MeshResult};
use crate::mesh::{BoundaryPatch, PolyMesh};
use crate::validate;
use crate::zone::FaceZone;

/// A face as handed to the builder, before final numbering.
#[derive(Debug, Clone)]
pub(crate) struct PendingFace {
    pub(crate) id: FaceId,
    pub(crate) points: Vec<usize>,
    pub(crate) owner: usize,
    pub(crate) neighbour: Option<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct PendingPatch {
    pub(crate) name: String,
    pub(crate) faces: Vec<PendingFace>,
}

#[derive(Debug, Clone)]
pub(crate) struct PendingZone {
    pub(crate) name: String,
    pub(crate) entries: Vec<(FaceId, bool)>,
}

/// Builder for constructing a mesh incrementally.
///
/// Faces may be added in any order; `build()` places internal faces first and
/// boundary faces patch by patch, then resolves face zones (given in terms of
/// the `FaceId`s returned here) to final face indices.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    points: Vec<Vector>,
    n_cells: usize,
    internal: Vec<PendingFace>,
    patches: Vec<PendingPatch>,
    zones: Vec<PendingZone>,
    next_face_id: usize,
    unknown_patch: Option<PatchId>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point and return its index.
    pub fn add_point(&mut self, p: Vector) -> usize {
        self.points.push(p);
        self.points.len() - 1
    }

    /// Declare a new cell and return its index.
    pub fn add_cell(&mut self) -> usize {
        self.n_cells += 1;
        self.n_cells - 1
    }

    /// Add a face between two cells; its normal points from `owner` to `neighbour`.
    pub fn add_internal_face(&mut self, points: Vec<usize>, owner: usize, neighbour: usize) -> FaceId {
        let id = self.next_id();
        self.internal.push(PendingFace {
            id,
            points,
            owner,
            neighbour: Some(neighbour),
        });
        id
    }

    /// Add an empty boundary patch.
    pub fn add_patch(&mut self, name: impl Into<String>) -> PatchId {
        self.patches.push(PendingPatch {
            name: name.into(),
            faces: Vec::new(),
        });
        PatchId::from_index(self.patches.len() - 1)
    }

    /// Add a boundary face to a patch; the normal must point out of the domain.
    ///
    /// Faces added to an unknown patch are reported by `build()`.
    pub fn add_boundary_face(&mut self, patch: PatchId, points: Vec<usize>, owner: usize) -> FaceId {
        let id = self.next_id();
        let face = PendingFace {
            id,
            points,
            owner,
            neighbour: None,
        };
        match self.patches.get_mut(patch.index()) {
            Some(p) => p.faces.push(face),
            None => {
                self.unknown_patch.get_or_insert(patch);
            }
        }
        id
    }

    /// Add a face zone from `(face, flip)` pairs.
    pub fn add_face_zone(&mut self, name: impl Into<String>, entries: &[(FaceId, bool)]) -> ZoneId {
        self.zones.push(PendingZone {
            name: name.into(),
            entries: entries.to_vec(),
        });
        ZoneId::from_index(self.zones.len() - 1)
    }

    /// Validate and freeze into a `PolyMesh`.
    pub fn build(self) -> MeshResult<PolyMesh> {
        if let Some(patch) = self.unknown_patch {
            return Err(MeshError::UnknownPatch(patch));
        }
        validate::validate_faces(
            self.points.len(),
            self.n_cells,
            self.internal
                .iter()
                .chain(self.patches.iter().flat_map(|p| p.faces.iter())),
        )?;
        validate::validate_names(&self.patches, &self.zones)?;

        let mut faces = Vec::with_capacity(self.next_face_id);
        let mut owner = Vec::with_capacity(self.next_face_id);
        let mut neighbour = Vec::with_capacity(self.internal.len());
        let mut final_index: HashMap<FaceId, usize> = HashMap::with_capacity(self.next_face_id);

        for face in self.internal {
            final_index.insert(face.id, faces.len());
            faces.push(face.points);
            owner.push(face.owner);
            neighbour.push(face.neighbour.unwrap_or(face.owner));
        }

        let mut patches = Vec::with_capacity(self.patches.len());
        for patch in self.patches {
            let start = faces.len();
            let size = patch.faces.len();
            for face in patch.faces {
                final_index.insert(face.id, faces.len());
                faces.push(face.points);
                owner.push(face.owner);
            }
            patches.push(BoundaryPatch {
                name: patch.name,
                start,
                size,
            });
        }

        let face_zones = self
            .zones
            .into_iter()
            .map(|zone| Self::resolve_zone(zone, &final_index))
            .collect::<MeshResult<Vec<_>>>()?;

        Ok(PolyMesh::from_parts(
            self.points,
            faces,
            owner,
            neighbour,
            self.n_cells,
            patches,
            face_zones,
        ))
    }

    fn resolve_zone(zone: PendingZone, final_index: &HashMap<FaceId, usize>) -> MeshResult<FaceZone> {
        let mut entries = Vec::with_capacity(zone.entries.len());
        for (id, flip) in zone.entries {
            let face = final_index
                .get(&id)
                .copied()
                .ok_or_else(|| MeshError::InvalidZoneFace {
                    zone: zone.name.clone(),
                    face: id,
                })?;
            entries.push((face, flip));
        }
        validate::validate_zone_entries(&zone.name, &entries)?;
        Ok(FaceZone::new(zone.name, entries))
    }

    fn next_id(&mut self) -> FaceId {
        let id = FaceId::from_index(self.next_face_id);
        self.next_face_id += 1;
        id
    }
}
