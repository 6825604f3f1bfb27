use refmat::assembly::ReferenceMatrixGenerator;
use refmat::element::lagrange::supported_elements;
use refmat::report::build_report;
use refmat::types::{Error, ReferenceCellType};

/// Parse `<cell> <degree>` from the command line, or use every supported element
fn requested_elements() -> Result<Vec<(ReferenceCellType, usize)>, String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match args.as_slice() {
        [] => Ok(supported_elements()),
        [cell, degree] => {
            let cell_type = cell.parse::<ReferenceCellType>().map_err(|e: Error| e.to_string())?;
            let degree = degree
                .parse::<usize>()
                .map_err(|e| format!("Invalid degree {degree}: {e}"))?;
            Ok(vec![(cell_type, degree)])
        }
        _ => Err("Usage: reference_matrices [<cell> <degree>]".to_string()),
    }
}

fn main() {
    env_logger::init();

    let elements = match requested_elements() {
        Ok(elements) => elements,
        Err(message) => {
            log::error!("{message}");
            std::process::exit(1);
        }
    };

    log::info!("Deriving matrices of {} element(s)", elements.len());

    // Derive every matrix before anything is printed
    let generator = ReferenceMatrixGenerator::new();
    match build_report(&generator, &elements) {
        Ok(report) => print!("{report}"),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
