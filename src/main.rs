// Small smoke run of the library: converts a synthetic set and scores an
// oracle model on it. Real datasets and networks live outside this crate.
//
//   cargo run                       # default bounds (A = 1.0, D = 0.0)
//   cargo run -- bounds.json        # bounds loaded from JSON
//   RUST_LOG=debug cargo run        # show conversion logging

use ferrite_mnist::{argmax, convert_set_with, evaluate_report, Bounds, Encoder, MnistSet};

fn synthetic_set() -> MnistSet {
    // Digit d is a flat image of brightness d * 25; label 10 exercises the fallback.
    let labels: Vec<i32> = (0..=10).collect();
    let images = labels.iter().map(|&d| vec![(d * 25) as u8; 784]).collect();
    MnistSet::new(images, labels)
}

fn main() -> ferrite_mnist::Result<()> {
    env_logger::init();

    let bounds = match std::env::args().nth(1) {
        Some(path) => Bounds::load_json(&path)?,
        None => Bounds::default(),
    };
    let encoder = Encoder::new(bounds);

    let set = convert_set_with(&encoder, &synthetic_set())?;
    println!("ferrite-mnist: converted {} examples", set.count());

    // Oracle: answers with the target vector of whichever example the input belongs to.
    let lookup = set.clone();
    let mut oracle = |input: &[f64]| -> Vec<f64> {
        lookup.iter()
            .find(|(x, _)| *x == input)
            .map(|(_, y)| y.to_vec())
            .unwrap_or_default()
    };

    let report = evaluate_report(&mut oracle, &set);
    println!(
        "  correct: {}/{} ({:.2}%)",
        report.correct,
        report.total,
        report.accuracy() * 100.0
    );
    println!("  fallback target argmax: {}", argmax(encoder.label(10)));
    Ok(())
}
