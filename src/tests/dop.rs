#[cfg(test)]
mod test {
    use crate::{
        dop::{compute, visible},
        prelude::*,
        tests::toolkit::{assert_close, gpst, sky},
    };
    use rand::{thread_rng, Rng};
    use std::collections::HashSet;

    fn gps(prn: u16) -> SV {
        SV::new(Constellation::GPS, prn)
    }

    fn all_of(fixes: &[(SV, f64, f64)]) -> HashSet<SV> {
        fixes.iter().map(|(sv, _, _)| *sv).collect()
    }

    #[test]
    fn three_vehicles() {
        let observer = ObserverPosition::new(45.0, 5.0, 200.0);
        let t = gpst(2023, 1, 1, 0, 0, 0);
        let fixes = [(gps(1), 90.0, 0.0), (gps(2), 30.0, 45.0), (gps(3), 30.0, 200.0)];
        let (positions, topocentric) = sky(&observer, t, &fixes);
        let criteria = SelectionCriteria::new(all_of(&fixes), 10.0);

        let dops = compute(&positions, &topocentric, &observer, &criteria);
        assert_eq!(dops.len(), 1);
        assert_eq!(dops[&t], DilutionOfPrecision::undetermined());
        assert_eq!(dops[&t].gdop(), -1.0);
    }
    #[test]
    fn nominal_geometry() {
        let observer = ObserverPosition::new(45.0, 5.0, 200.0);
        let t = gpst(2023, 1, 1, 0, 0, 0);
        let fixes = [
            (gps(1), 90.0, 0.0),
            (gps(2), 20.0, 10.0),
            (gps(3), 20.0, 130.0),
            (gps(4), 20.0, 250.0),
        ];
        let (positions, topocentric) = sky(&observer, t, &fixes);
        let criteria = SelectionCriteria::new(all_of(&fixes), 10.0);

        let dops = compute(&positions, &topocentric, &observer, &criteria);
        let dop = dops[&t];
        assert!(dop.is_determined());
        for value in [dop.tdop, dop.pdop, dop.hdop, dop.vdop] {
            assert!(value > 0.0 && value <= 100.0, "{:?}", dop);
        }
        assert_close(
            dop.pdop.powi(2),
            dop.hdop.powi(2) + dop.vdop.powi(2),
            1.0E-9,
            "pdop",
        );
        assert_close(
            dop.gdop().powi(2),
            dop.hdop.powi(2) + dop.vdop.powi(2) + dop.tdop.powi(2),
            1.0E-9,
            "gdop",
        );
        // symmetric constellation: horizontal precision beats vertical
        assert!(dop.hdop < dop.vdop);
    }
    #[test]
    fn elevation_cutoff() {
        let observer = ObserverPosition::new(-33.9, 18.4, 10.0);
        let t = gpst(2023, 1, 1, 0, 0, 0);
        let fixes = [
            (gps(1), 80.0, 0.0),
            (gps(2), 25.0, 10.0),
            (gps(3), 25.0, 130.0),
            (gps(4), 5.0, 250.0),
        ];
        let (positions, topocentric) = sky(&observer, t, &fixes);

        let criteria = SelectionCriteria::new(all_of(&fixes), 10.0);
        let dops = compute(&positions, &topocentric, &observer, &criteria);
        assert!(!dops[&t].is_determined());

        let dops = compute(
            &positions,
            &topocentric,
            &observer,
            &criteria.with_elevation_cutoff(0.0),
        );
        assert!(dops[&t].is_determined());

        assert_eq!(visible(&topocentric, t, 10.0), vec![gps(1), gps(2), gps(3)]);
        assert_eq!(visible(&topocentric, t, 0.0).len(), 4);
        assert!(visible(&topocentric, gpst(2023, 1, 2, 0, 0, 0), 0.0).is_empty());
    }
    #[test]
    fn selection() {
        let observer = ObserverPosition::new(45.0, 5.0, 200.0);
        let t = gpst(2023, 1, 1, 0, 0, 0);
        let fixes = [
            (gps(1), 90.0, 0.0),
            (gps(2), 20.0, 10.0),
            (gps(3), 20.0, 130.0),
            (gps(4), 20.0, 250.0),
        ];
        let (positions, topocentric) = sky(&observer, t, &fixes);

        let criteria = SelectionCriteria::new([gps(1), gps(2), gps(3)], 10.0);
        let dops = compute(&positions, &topocentric, &observer, &criteria);
        assert!(!dops[&t].is_determined());

        let dops = compute(&positions, &topocentric, &observer, &SelectionCriteria::default());
        assert_eq!(dops[&t], DilutionOfPrecision::undetermined());
    }
    #[test]
    fn degenerate_geometry() {
        let observer = ObserverPosition::new(45.0, 5.0, 200.0);
        let t = gpst(2023, 1, 1, 0, 0, 0);
        // all vehicles in the same direction
        let fixes = [
            (gps(1), 45.0, 60.0),
            (gps(2), 45.0, 60.0),
            (gps(3), 45.0, 60.0),
            (gps(4), 45.0, 60.0),
            (gps(5), 45.0, 60.0),
        ];
        let (positions, topocentric) = sky(&observer, t, &fixes);
        let criteria = SelectionCriteria::new(all_of(&fixes), 10.0);
        let dops = compute(&positions, &topocentric, &observer, &criteria);
        assert_eq!(dops[&t], DilutionOfPrecision::undetermined());
    }
    #[test]
    fn epochs_union() {
        let observer = ObserverPosition::new(45.0, 5.0, 200.0);
        let (t0, t1) = (gpst(2023, 1, 1, 0, 0, 0), gpst(2023, 1, 1, 0, 15, 0));
        let fixes = [
            (gps(1), 90.0, 0.0),
            (gps(2), 20.0, 10.0),
            (gps(3), 20.0, 130.0),
            (gps(4), 20.0, 250.0),
        ];
        let (mut positions, mut topocentric) = sky(&observer, t1, &fixes);
        let (early, early_sky) = sky(&observer, t0, &[(gps(9), 50.0, 50.0)]);
        positions.extend(early);
        topocentric.extend(early_sky);

        let mut satellites = all_of(&fixes);
        satellites.insert(gps(9));
        let criteria = SelectionCriteria::new(satellites, 10.0);

        let dops = compute(&positions, &topocentric, &observer, &criteria);
        let epochs = dops.keys().copied().collect::<Vec<_>>();
        assert_eq!(epochs, vec![t0, t1]);
        assert!(!dops[&t0].is_determined());
        assert!(dops[&t1].is_determined());

        assert!(compute(&PositionSet::new(), &topocentric, &observer, &criteria).is_empty());
    }
    #[test]
    fn monotonicity() {
        let mut rng = thread_rng();
        let observer = ObserverPosition::new(48.8, 2.3, 50.0);
        let t = gpst(2023, 1, 1, 0, 0, 0);

        for _ in 0..50 {
            let fixes = (1..=8)
                .map(|prn| (gps(prn), rng.gen_range(15.0..90.0), rng.gen_range(0.0..360.0)))
                .collect::<Vec<_>>();
            let (positions, topocentric) = sky(&observer, t, &fixes);

            let all = all_of(&fixes);
            let reference = compute(
                &positions,
                &topocentric,
                &observer,
                &SelectionCriteria::new(all.clone(), 10.0),
            )[&t];
            if !reference.is_determined() {
                continue;
            }

            let removed = fixes[rng.gen_range(0..fixes.len())].0;
            let mut subset = all.clone();
            subset.remove(&removed);
            let reduced = compute(
                &positions,
                &topocentric,
                &observer,
                &SelectionCriteria::new(subset, 10.0),
            )[&t];
            if !reduced.is_determined() {
                continue;
            }

            let pairs = [
                (reduced.tdop, reference.tdop),
                (reduced.pdop, reference.pdop),
                (reduced.hdop, reference.hdop),
                (reduced.vdop, reference.vdop),
            ];
            for (reduced, reference) in pairs {
                assert!(
                    reduced >= reference * (1.0 - 1.0E-9),
                    "removing {} improved dop: {} < {}",
                    removed,
                    reduced,
                    reference
                );
            }
        }
    }
}
