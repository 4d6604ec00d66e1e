//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `groutviz_core` linkage.
//! - Print the reference record statistics for quick local sanity checks.

use groutviz_core::{sample_points, IngestService, StaticPointRepository, ViewConfig};

fn main() {
    println!("groutviz_core ping={}", groutviz_core::ping());
    println!("groutviz_core version={}", groutviz_core::core_version());

    let service = IngestService::new(StaticPointRepository::new(sample_points()));
    match service.open_session(ViewConfig::from_env()) {
        Ok((session, issues)) => {
            for (label, value) in session.stats().summary_lines() {
                println!("sample {label}: {value}");
            }
            for entry in issues {
                eprintln!("sample issue {}: {}", entry.point_id, entry.issue);
            }
        }
        Err(err) => {
            eprintln!("sample load failed: {err}");
            std::process::exit(1);
        }
    }
}
