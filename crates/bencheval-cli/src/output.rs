use bencheval::core::stats::ErrorSummary;
use bencheval::workflows::evaluate::EvaluationReport;

const STAT_NAMES: [&str; 9] = [
    "N", "MeanAbsRef", "MAE", "MSE", "STDDEV", "RMSD", "MAX", "MIN", "ErrRange",
];

fn stat_values(summary: &ErrorSummary) -> [f64; 8] {
    [
        summary.mean_abs_ref,
        summary.mae,
        summary.mse,
        summary.stddev,
        summary.rmsd,
        summary.max,
        summary.min,
        summary.range,
    ]
}

pub fn print_report(report: &EvaluationReport, method: &str) {
    println!("\n### Results ###");
    println!(
        "{:<40} {:<16} {:>14} {:>14}",
        "Reaction", "Stoichiometry", "ReferenceValue", "MethodValue"
    );
    for row in &report.rows {
        println!(
            "{:<40} {:<16} {:>14.6} {:>14.6}",
            row.species.join(" "),
            row.stoichiometry
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            row.reference,
            row.computed
        );
    }

    if !report.unmatched.is_empty() {
        println!(
            "\nWarning: {} of {} kept reactions received no result row:",
            report.unmatched.len(),
            report.reactions_kept
        );
        for missing in &report.unmatched {
            println!(
                "  reaction {} ({:?} with stoichiometry {:?})",
                missing.index, missing.species, missing.stoichiometry
            );
        }
    }

    println!("\n### Statistics ###");
    println!("{:<15}: {:>10}", STAT_NAMES[0], report.summary.n);
    for (name, value) in STAT_NAMES[1..].iter().zip(stat_values(&report.summary)) {
        println!("{:<15}: {:>10.4}", name, value);
    }

    println!("\n### Statistics Table ###");
    println!(
        "{:<16} {:>6} {}",
        "Method",
        STAT_NAMES[0],
        STAT_NAMES[1..]
            .iter()
            .map(|name| format!("{:>12}", name))
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!(
        "{:<16} {:>6} {}",
        method,
        report.summary.n,
        stat_values(&report.summary)
            .iter()
            .map(|value| format!("{:>12.4}", value))
            .collect::<Vec<_>>()
            .join(" ")
    );
}
