//! Reduction of sampled face values into pipe-flow quantities.

use pc_core::{
    Area, PcError, PcResult, Real, Time, Vector, VolumeRate, Velocity, ensure_finite, m2, m3ps,
    mps,
};

use crate::zone_faces::Sign;

/// Integral quantities over a face zone at one time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagnosticRecord {
    pub time: Time,
    /// Signed volumetric flow rate through the zone.
    pub flow_rate: VolumeRate,
    /// Area-averaged normal velocity (`flow_rate / total_area`).
    pub mean_velocity: Velocity,
    /// Sum of face area magnitudes.
    pub total_area: Area,
    /// True when the zone had zero total area; `mean_velocity` is then zero.
    pub degenerate: bool,
}

/// Reduce per-face area vectors and velocities to a `DiagnosticRecord`.
///
/// `flux_i = sign_i * (U_i · S_i)`, `flow_rate = Σ flux_i`,
/// `total_area = Σ |S_i|`. Sums run in input order, so identical inputs give
/// bit-identical results.
pub fn reduce(
    time: Time,
    area_vectors: &[Vector],
    velocities: &[Vector],
    signs: &[Sign],
) -> PcResult<DiagnosticRecord> {
    if velocities.len() != area_vectors.len() {
        return Err(PcError::LengthMismatch {
            what: "velocities vs area vectors",
            left: velocities.len(),
            right: area_vectors.len(),
        });
    }
    if signs.len() != area_vectors.len() {
        return Err(PcError::LengthMismatch {
            what: "signs vs area vectors",
            left: signs.len(),
            right: area_vectors.len(),
        });
    }

    let mut flow_rate: Real = 0.0;
    let mut total_area: Real = 0.0;
    for ((s, u), sign) in area_vectors.iter().zip(velocities).zip(signs) {
        flow_rate += sign.value() * u.dot(s);
        total_area += s.norm();
    }
    let flow_rate = ensure_finite(flow_rate, "flow rate")?;
    let total_area = ensure_finite(total_area, "total area")?;

    let degenerate = total_area <= 0.0;
    let mean_velocity = if degenerate { 0.0 } else { flow_rate / total_area };

    Ok(DiagnosticRecord {
        time,
        flow_rate: m3ps(flow_rate),
        mean_velocity: mps(mean_velocity),
        total_area: m2(total_area),
        degenerate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::{s, vector};

    #[test]
    fn mixed_orientation_scenario() {
        let areas = vec![vector(1.0, 0.0, 0.0); 4];
        let velocities = vec![vector(2.0, 0.0, 0.0); 4];
        let signs = [Sign::Positive, Sign::Positive, Sign::Positive, Sign::Negative];
        let rec = reduce(s(0.1), &areas, &velocities, &signs).unwrap();
        assert_eq!(rec.flow_rate.value, 4.0);
        assert_eq!(rec.total_area.value, 4.0);
        assert_eq!(rec.mean_velocity.value, 1.0);
        assert!(!rec.degenerate);
    }

    #[test]
    fn empty_zone_is_degenerate_not_nan() {
        let rec = reduce(s(0.0), &[], &[], &[]).unwrap();
        assert_eq!(rec.total_area.value, 0.0);
        assert_eq!(rec.mean_velocity.value, 0.0);
        assert!(rec.degenerate);
    }

    #[test]
    fn tangential_velocity_carries_no_flux() {
        let areas = [vector(0.0, 0.0, 2.0)];
        let velocities = [vector(5.0, -3.0, 0.0)];
        let rec = reduce(s(0.0), &areas, &velocities, &[Sign::Positive]).unwrap();
        assert_eq!(rec.flow_rate.value, 0.0);
        assert_eq!(rec.total_area.value, 2.0);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = reduce(s(0.0), &[vector(1.0, 0.0, 0.0)], &[], &[]).unwrap_err();
        assert!(matches!(err, PcError::LengthMismatch { .. }));
    }

    #[test]
    fn non_finite_velocity_is_rejected() {
        let err = reduce(
            s(0.0),
            &[vector(1.0, 0.0, 0.0)],
            &[vector(Real::NAN, 0.0, 0.0)],
            &[Sign::Positive],
        )
        .unwrap_err();
        assert!(matches!(err, PcError::NonFinite { .. }));
    }

    mod proptests {
        use super::*;
        use pc_core::{Tolerances, nearly_equal};
        use proptest::prelude::*;

        fn face() -> impl Strategy<Value = Vector> {
            (-2.0..2.0f64, -2.0..2.0f64, 0.01..2.0f64).prop_map(|(x, y, z)| vector(x, y, z))
        }

        proptest! {
            #[test]
            fn uniform_normal_flow(speed in -10.0..10.0f64, areas in prop::collection::vec(0.01..3.0f64, 1..20)) {
                let normal = vector(0.0, 0.0, 1.0);
                let area_vectors: Vec<Vector> = areas.iter().map(|a| normal * *a).collect();
                let velocities = vec![normal * speed; areas.len()];
                let signs = vec![Sign::Positive; areas.len()];
                let rec = reduce(s(0.0), &area_vectors, &velocities, &signs).unwrap();

                let total: f64 = areas.iter().sum();
                let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
                prop_assert!(nearly_equal(rec.total_area.value, total, tol));
                prop_assert!(nearly_equal(rec.flow_rate.value, speed * total, tol));
                prop_assert!(nearly_equal(rec.mean_velocity.value, speed, tol));
            }

            #[test]
            fn reversing_orientation_negates_flow(
                faces in prop::collection::vec((face(), face()), 1..20),
            ) {
                let (areas, velocities): (Vec<Vector>, Vec<Vector>) = faces.into_iter().unzip();
                let forward = vec![Sign::Positive; areas.len()];
                let backward: Vec<Sign> = forward.iter().map(|sign| sign.flipped()).collect();

                let a = reduce(s(0.0), &areas, &velocities, &forward).unwrap();
                let b = reduce(s(0.0), &areas, &velocities, &backward).unwrap();
                prop_assert_eq!(a.flow_rate.value, -b.flow_rate.value);
                prop_assert_eq!(a.total_area.value, b.total_area.value);
                prop_assert_eq!(a.mean_velocity.value.abs(), b.mean_velocity.value.abs());
            }
        }
    }
}
