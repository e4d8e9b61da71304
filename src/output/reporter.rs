//! Console report for identification results.

use crate::output::Record;

/// Print a human-readable report for one analyzed photo.
///
/// Branches on the species danger level so hazardous identifications lead
/// with a warning before the safety guidance.
pub fn print_report(record: &Record) {
    println!();
    println!("── {}", record.file_path.display());

    let Some(species) = &record.result.species else {
        println!("Unable to identify the species in this photo.");
        return;
    };

    if species.danger_level.is_hazardous() {
        println!(
            "⚠ Warning: {} detected — this species can be dangerous.",
            species.name
        );
    }

    println!("Species:    {} ({})", species.name, species.scientific_name);
    println!("Category:   {}", species.category);
    println!("Danger:     {}", species.danger_level);
    println!(
        "Confidence: {:.0}% ({})",
        record.result.confidence * 100.0,
        record.mode
    );
    println!();
    println!("{}", species.description);
    println!("Habitat: {}", species.habitat);

    if !species.safety_tips.is_empty() {
        println!();
        println!("Safety tips:");
        for tip in &species.safety_tips {
            println!("  - {tip}");
        }
    }

    if let Some(first_aid) = &species.first_aid {
        println!();
        println!("First aid:");
        for step in first_aid {
            println!("  - {step}");
        }
    }

    if let Some(advice) = &species.emergency_advice {
        println!();
        println!("Emergency: {advice}");
    }
}
