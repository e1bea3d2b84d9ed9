#![warn(clippy::pedantic)]

use std::io::Write;

use approx::assert_relative_eq;
use ibeamx::{
    evaluate, evaluate_distances, evaluate_with, section, BeamParameters, CandidateSet,
    DesignConfig, Outcome, SearchStrategy, DEFAULT_DISTANCES,
};

fn unit_range(upper: u32) -> Vec<f64> {
    (1..=upper).map(f64::from).collect()
}

fn reference_candidates() -> CandidateSet {
    CandidateSet::new(unit_range(998), unit_range(998))
}

fn coarse_candidates() -> CandidateSet {
    let sizes: Vec<f64> = (1..=100).map(|step| f64::from(step) * 10.0).collect();
    CandidateSet::new(sizes.clone(), sizes)
}

#[test]
fn reference_case_selects_golden_geometry() {
    let parameters = BeamParameters::default();
    let outcome = evaluate(&parameters, 1_000.0, &reference_candidates())
        .expect("reference case evaluates");

    let Outcome::Optimal(design) = outcome else {
        panic!("reference case must be feasible, got {outcome:?}");
    };
    assert_eq!(design.height, 775.0);
    assert_eq!(design.width, 132.0);
    assert_eq!((design.height_index, design.width_index), (774, 131));
    assert_relative_eq!(design.efficiency, 192.404_197_512_928_68, epsilon = 1.0e-9);
    assert_relative_eq!(design.required_section_modulus, 1.0e6);

    // The reported efficiency is reproducible from the section itself.
    let beam = section(design.height, design.width, parameters.thickness);
    assert_relative_eq!(
        beam.section_modulus() / beam.cross_sectional_area(),
        design.efficiency
    );
}

#[test]
fn parallel_search_reproduces_reference_case() {
    let parameters = BeamParameters::default();
    let candidates = reference_candidates();
    let sequential = evaluate(&parameters, 1_000.0, &candidates).unwrap();
    for threads in [1, 3, 8] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("thread pool builds");
        let parallel = pool
            .install(|| evaluate_with(SearchStrategy::Parallel, &parameters, 1_000.0, &candidates))
            .unwrap();
        assert_eq!(parallel, sequential, "{threads} threads");
    }
}

#[test]
fn reference_distances_pick_expected_sections() {
    let outcomes = evaluate_distances(
        SearchStrategy::Parallel,
        &BeamParameters::default(),
        &DEFAULT_DISTANCES,
        &reference_candidates(),
    )
    .expect("all distances evaluate");

    let picks: Vec<(f64, f64)> = outcomes
        .iter()
        .map(|outcome| {
            let design = outcome.design().expect("feasible");
            (design.height, design.width)
        })
        .collect();
    assert_eq!(
        picks,
        vec![
            (257.0, 38.0),
            (775.0, 132.0),
            (997.0, 238.0),
            (998.0, 438.0),
            (998.0, 638.0),
        ]
    );
}

#[test]
fn inverted_tolerance_band_has_no_valid_combination() {
    let parameters = BeamParameters {
        tolerance: 0.5,
        ..BeamParameters::default()
    };
    let outcomes = evaluate_distances(
        SearchStrategy::Sequential,
        &parameters,
        &DEFAULT_DISTANCES,
        &reference_candidates(),
    )
    .expect("inverted band is not an error");

    for (outcome, distance) in outcomes.iter().zip(DEFAULT_DISTANCES) {
        assert_eq!(*outcome, Outcome::NoValidCombination { distance });
    }
}

#[test]
fn best_efficiency_never_decreases_with_tolerance() {
    let candidates = coarse_candidates();
    let mut previous = 0.0;
    for tolerance in [0.5, 1.0, 1.1, 1.5, 2.0, 3.0, 10.0] {
        let parameters = BeamParameters {
            tolerance,
            ..BeamParameters::default()
        };
        let efficiency = evaluate(&parameters, 1_000.0, &candidates)
            .unwrap()
            .efficiency();
        assert!(efficiency >= 0.0);
        assert!(
            efficiency >= previous,
            "tolerance {tolerance}: {efficiency} < {previous}"
        );
        previous = efficiency;
    }
    assert!(previous > 0.0);
}

#[test]
fn scaling_force_and_stress_together_changes_nothing() {
    let candidates = coarse_candidates();
    let base = BeamParameters::default();
    let scaled = BeamParameters {
        force: base.force * 4.0,
        sigma: base.sigma * 4.0,
        ..base
    };
    for distance in DEFAULT_DISTANCES {
        assert_eq!(
            evaluate(&base, distance, &candidates).unwrap(),
            evaluate(&scaled, distance, &candidates).unwrap()
        );
    }
}

#[test]
fn reversing_candidates_keeps_best_efficiency() {
    let parameters = BeamParameters::default();
    let candidates = coarse_candidates();
    let mut reversed = candidates.clone();
    reversed.heights.reverse();
    reversed.widths.reverse();

    for distance in DEFAULT_DISTANCES {
        let forward = evaluate(&parameters, distance, &candidates).unwrap();
        let backward = evaluate(&parameters, distance, &reversed).unwrap();
        assert_eq!(forward.efficiency(), backward.efficiency());
        let (Some(forward), Some(backward)) = (forward.design(), backward.design()) else {
            continue;
        };
        assert_eq!(
            backward.height_index,
            candidates.heights.len() - 1 - forward.height_index
        );
    }
}

#[test]
fn band_edges_are_exclusive() {
    // h = 2, w = 12, t = 3 has I = 506 and Z = 126.5 exactly.
    let candidates = CandidateSet::new(vec![2.0], vec![12.0]);
    let at_lower_edge = BeamParameters {
        sigma: 1.0,
        force: 126.5,
        thickness: 3.0,
        tolerance: 2.0,
    };
    assert_eq!(
        evaluate(&at_lower_edge, 1.0, &candidates).unwrap(),
        Outcome::NoValidCombination { distance: 1.0 }
    );

    let at_upper_edge = BeamParameters {
        force: 63.25,
        ..at_lower_edge
    };
    assert_eq!(
        evaluate(&at_upper_edge, 1.0, &candidates).unwrap(),
        Outcome::NoValidCombination { distance: 1.0 }
    );

    let inside = BeamParameters {
        force: 100.0,
        ..at_lower_edge
    };
    let design = *evaluate(&inside, 1.0, &candidates)
        .unwrap()
        .design()
        .expect("strictly inside the band");
    assert_relative_eq!(design.efficiency, 126.5 / 78.0);
}

#[test]
fn configuration_file_drives_a_study() {
    let mut file = tempfile::NamedTempFile::new().expect("temporary file");
    writeln!(
        file,
        r#"
        distances = [100, 1000]

        [parameters]
        tolerance = 2.0

        [heights]
        start = 1
        stop = 301

        [widths]
        start = 1
        stop = 301
        "#
    )
    .expect("config written");

    let config = DesignConfig::load(file.path()).expect("config loads");
    let candidates = config.candidates().expect("ranges expand");
    let outcomes = evaluate_distances(
        config.strategy,
        &config.parameters,
        &config.distances,
        &candidates,
    )
    .expect("study runs");

    let first = outcomes[0].design().expect("feasible at 100 mm");
    assert_eq!((first.height, first.width), (257.0, 38.0));
    assert_eq!(outcomes[1].distance(), 1_000.0);
}
