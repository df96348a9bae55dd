//! Block generator for rectangular ducts.
//!
//! Produces a structured hexahedral mesh of `nx * ny * nz` cells spanning
//! `[0, lx] x [0, ly] x [0, lz]`, with patches `inlet` (x = 0), `outlet`
//! (x = lx) and `walls`, and optionally a face zone covering one constant-x
//! plane of faces.

use pc_core::{FaceId, Vector, vector};

use crate::builder::MeshBuilder;
use crate::error::{MeshError, MeshResult};
use crate::mesh::PolyMesh;

/// Constant-x plane of faces collected into a face zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossSection {
    pub name: String,
    /// Plane index in `0..=nx`; 0 and nx select the inlet and outlet faces.
    pub plane: usize,
    /// Reverse the zone's positive direction (internal planes only).
    pub flip: bool,
}

impl CrossSection {
    pub fn new(name: impl Into<String>, plane: usize) -> Self {
        Self {
            name: name.into(),
            plane,
            flip: false,
        }
    }

    pub fn flipped(mut self) -> Self {
        self.flip = !self.flip;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuctSpec {
    /// Cell counts along x, y, z.
    pub cells: [usize; 3],
    /// Edge lengths along x, y, z (m).
    pub size: [f64; 3],
    pub cross_section: Option<CrossSection>,
}

impl DuctSpec {
    /// Same duct with every cell split `factor` times per direction.
    ///
    /// The cross-section stays at the same physical position.
    pub fn refined(&self, factor: usize) -> Self {
        let factor = factor.max(1);
        Self {
            cells: self.cells.map(|n| n * factor),
            size: self.size,
            cross_section: self.cross_section.clone().map(|cs| CrossSection {
                plane: cs.plane * factor,
                ..cs
            }),
        }
    }

    pub fn n_cells(&self) -> usize {
        self.cells.iter().product()
    }
}

/// Build the duct mesh.
pub fn duct(spec: &DuctSpec) -> MeshResult<PolyMesh> {
    let [nx, ny, nz] = spec.cells;
    let [lx, ly, lz] = spec.size;
    if nx == 0 || ny == 0 || nz == 0 {
        return Err(MeshError::InvalidBlock {
            what: "cell counts must be positive",
        });
    }
    if !(lx > 0.0 && ly > 0.0 && lz > 0.0) || !(lx.is_finite() && ly.is_finite() && lz.is_finite()) {
        return Err(MeshError::InvalidBlock {
            what: "edge lengths must be positive and finite",
        });
    }
    if let Some(cs) = &spec.cross_section
        && cs.plane > nx
    {
        return Err(MeshError::InvalidBlock {
            what: "cross-section plane lies outside the block",
        });
    }

    let (dx, dy, dz) = (lx / nx as f64, ly / ny as f64, lz / nz as f64);
    let pt = |i: usize, j: usize, k: usize| i + (nx + 1) * (j + (ny + 1) * k);
    let cell = |i: usize, j: usize, k: usize| i + nx * (j + ny * k);

    let mut b = MeshBuilder::new();
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                b.add_point(vector(i as f64 * dx, j as f64 * dy, k as f64 * dz));
            }
        }
    }
    for _ in 0..spec.n_cells() {
        b.add_cell();
    }

    // Quads ordered so the right-hand rule points along +x, +y, +z respectively
    let x_quad = |i, j, k| vec![pt(i, j, k), pt(i, j + 1, k), pt(i, j + 1, k + 1), pt(i, j, k + 1)];
    let y_quad = |i, j, k| vec![pt(i, j, k), pt(i, j, k + 1), pt(i + 1, j, k + 1), pt(i + 1, j, k)];
    let z_quad = |i, j, k| vec![pt(i, j, k), pt(i + 1, j, k), pt(i + 1, j + 1, k), pt(i, j + 1, k)];
    let reversed = |mut q: Vec<usize>| {
        q.reverse();
        q
    };

    let plane = spec.cross_section.as_ref().map(|cs| cs.plane);
    let mut section: Vec<FaceId> = Vec::new();

    for k in 0..nz {
        for j in 0..ny {
            for i in 1..nx {
                let id = b.add_internal_face(x_quad(i, j, k), cell(i - 1, j, k), cell(i, j, k));
                if plane == Some(i) {
                    section.push(id);
                }
            }
        }
    }
    for k in 0..nz {
        for j in 1..ny {
            for i in 0..nx {
                b.add_internal_face(y_quad(i, j, k), cell(i, j - 1, k), cell(i, j, k));
            }
        }
    }
    for k in 1..nz {
        for j in 0..ny {
            for i in 0..nx {
                b.add_internal_face(z_quad(i, j, k), cell(i, j, k - 1), cell(i, j, k));
            }
        }
    }

    let inlet = b.add_patch("inlet");
    for k in 0..nz {
        for j in 0..ny {
            let id = b.add_boundary_face(inlet, reversed(x_quad(0, j, k)), cell(0, j, k));
            if plane == Some(0) {
                section.push(id);
            }
        }
    }

    let outlet = b.add_patch("outlet");
    for k in 0..nz {
        for j in 0..ny {
            let id = b.add_boundary_face(outlet, x_quad(nx, j, k), cell(nx - 1, j, k));
            if plane == Some(nx) {
                section.push(id);
            }
        }
    }

    let walls = b.add_patch("walls");
    for k in 0..nz {
        for i in 0..nx {
            b.add_boundary_face(walls, reversed(y_quad(i, 0, k)), cell(i, 0, k));
            b.add_boundary_face(walls, y_quad(i, ny, k), cell(i, ny - 1, k));
        }
    }
    for j in 0..ny {
        for i in 0..nx {
            b.add_boundary_face(walls, reversed(z_quad(i, j, 0)), cell(i, j, 0));
            b.add_boundary_face(walls, z_quad(i, j, nz), cell(i, j, nz - 1));
        }
    }

    if let Some(cs) = &spec.cross_section {
        let entries: Vec<(FaceId, bool)> = section.into_iter().map(|id| (id, cs.flip)).collect();
        b.add_face_zone(cs.name.clone(), &entries);
    }

    b.build()
}

/// Points of a duct mesh displaced by `f`, for point-motion scenarios.
pub fn displaced_points(mesh: &PolyMesh, f: impl Fn(&Vector) -> Vector) -> Vec<Vector> {
    mesh.points().iter().map(f).collect()
}
