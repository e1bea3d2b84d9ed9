use ibeamx::{evaluate, BeamParameters, CandidateSet, Outcome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 250 N/mm² steel carrying 20 kN at the end of a 1.5 m cantilever
    let parameters = BeamParameters {
        sigma: 250.0,
        force: 20.0e3,
        thickness: 8.0,
        tolerance: 1.5,
    };

    // Search the default millimetre grid for this thickness
    let candidates = CandidateSet::default_for_thickness(parameters.thickness)?;

    // Evaluate and print the selected section
    match evaluate(&parameters, 1_500.0, &candidates)? {
        Outcome::Optimal(design) => println!(
            "h = {} mm, w = {} mm, depth = {} mm, Z/A = {:.2} mm",
            design.height, design.width, design.outer_height, design.efficiency
        ),
        Outcome::NoValidCombination { distance } => {
            println!("no feasible geometry for distance={distance}");
        }
    }

    Ok(())
}
