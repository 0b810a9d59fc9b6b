#![no_main]

use arbitrary::Unstructured;
use beachline::{
    arbitrary::{bounds, grid_sites, sites},
    Precision, Sweeper,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(on_grid) = u.arbitrary::<bool>() else {
        return;
    };
    let sites = if on_grid {
        grid_sites(16, 32, &mut u)
    } else {
        sites(1e3, 32, &mut u)
    };
    let (Ok(sites), Ok(bounds)) = (sites, bounds(1e3, &mut u)) else {
        return;
    };

    let mut sweeper = Sweeper::new(sites, bounds).unwrap();
    let clipped = sweeper.run().unwrap();
    let prec = Precision::default();

    for e in &clipped {
        assert!(bounds.contains(&e.start, &prec), "{e:?}");
        assert!(bounds.contains(&e.end, &prec), "{e:?}");
        assert_ne!(e.start, e.end);
    }
    for e in sweeper.edges_unclipped() {
        let (a, b) = e.sites;
        for p in [e.start, e.end] {
            let (da, db) = (p.distance(&a), p.distance(&b));
            assert!((da - db).abs() <= 1e-6 * da.max(1.0), "{e:?}: {da} vs {db}");
        }
    }
});
