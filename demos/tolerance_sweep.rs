use ibeamx::{evaluate_with, BeamParameters, CandidateSet, SearchStrategy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let candidates = CandidateSet::default_for_thickness(10.0)?;

    // A looser tolerance admits heavier sections, so the best efficiency can
    // only rise as the band widens.
    for tolerance in [1.0, 1.25, 1.5, 2.0, 3.0] {
        let parameters = BeamParameters {
            tolerance,
            ..BeamParameters::default()
        };
        let outcome = evaluate_with(SearchStrategy::Parallel, &parameters, 2_000.0, &candidates)?;
        match outcome.design() {
            Some(design) => println!(
                "tol = {tolerance:<4}  h = {:>4}  w = {:>4}  Z/A = {:.2}",
                design.height, design.width, design.efficiency
            ),
            None => println!("tol = {tolerance:<4}  no feasible geometry"),
        }
    }

    Ok(())
}
