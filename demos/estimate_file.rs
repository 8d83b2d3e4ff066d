//! Example: Estimate the key of a pitch-class sequence file
//!
//! Reads a text/CSV file of pitch-class symbols (or chromatic indices)
//! and prints the estimated key in `<Tonic>\t<mode>` form.
//!
//! ```text
//! cargo run --example estimate_file -- melody.csv
//! ```

use clavis::io::read_pitch_class_sequence;
use clavis::{estimate_key, EstimatorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let path = std::env::args().nth(1).ok_or("usage: estimate_file <input_file>")?;

    let observations = read_pitch_class_sequence(&path)?;
    let config = EstimatorConfig::default();
    let estimate = estimate_key(&observations, &config)?;

    for (key_index, score) in estimate.key_scores.iter().enumerate() {
        log::debug!("key {:2}: {:.4}", key_index, score);
    }

    let mode = if estimate.key.is_major() { "major" } else { "minor" };
    println!("{}\t{}", estimate.key.name(), mode);

    Ok(())
}
