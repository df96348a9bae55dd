//! Mesh validation logic.

use std::collections::HashSet;

use crate::builder::{PendingFace, PendingPatch, PendingZone};
use crate::error::{MeshError, MeshResult};

/// Every face: enough points, valid point and cell references, no self-neighbour.
pub(crate) fn validate_faces<'a>(
    n_points: usize,
    n_cells: usize,
    faces: impl Iterator<Item = &'a PendingFace>,
) -> MeshResult<()> {
    for face in faces {
        if face.points.len() < 3 {
            return Err(MeshError::DegenerateFace {
                face: face.id,
                count: face.points.len(),
            });
        }

        if let Some(&point) = face.points.iter().find(|&&p| p >= n_points) {
            return Err(MeshError::InvalidPointRef {
                face: face.id,
                point,
            });
        }

        if face.owner >= n_cells {
            return Err(MeshError::InvalidCellRef {
                face: face.id,
                cell: face.owner,
            });
        }

        if let Some(nei) = face.neighbour {
            if nei >= n_cells {
                return Err(MeshError::InvalidCellRef {
                    face: face.id,
                    cell: nei,
                });
            }
            if nei == face.owner {
                return Err(MeshError::SelfNeighbour {
                    face: face.id,
                    cell: nei,
                });
            }
        }
    }
    Ok(())
}

/// Patch and zone names must be unique within their catalogs.
pub(crate) fn validate_names(patches: &[PendingPatch], zones: &[PendingZone]) -> MeshResult<()> {
    let mut seen = HashSet::new();
    for patch in patches {
        if !seen.insert(patch.name.as_str()) {
            return Err(MeshError::DuplicateName {
                what: "patch",
                name: patch.name.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    for zone in zones {
        if !seen.insert(zone.name.as_str()) {
            return Err(MeshError::DuplicateName {
                what: "face zone",
                name: zone.name.clone(),
            });
        }
    }
    Ok(())
}

/// A zone lists each face at most once.
pub(crate) fn validate_zone_entries(zone: &str, entries: &[(usize, bool)]) -> MeshResult<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for &(face, _) in entries {
        if !seen.insert(face) {
            return Err(MeshError::DuplicateZoneFace {
                zone: zone.to_string(),
                face,
            });
        }
    }
    Ok(())
}
