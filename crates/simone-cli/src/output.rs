use serde::Serialize;
use simone_core::install::InstallReport;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_summary(report: &InstallReport) {
    println!(
        "\nSimone ({} edition) installed: {} files, {} directories.",
        report.edition, report.files_written, report.dirs_created
    );

    if let Some(backup) = &report.backup {
        println!("Previous installation backed up to: {}", backup.dir.display());
        for path in &backup.relocated {
            println!("  moved: {path}");
        }
    }

    if !report.warnings.is_empty() {
        println!(
            "{} optional file(s) skipped; see the warnings above.",
            report.warnings.len()
        );
    }

    if let Some(guidance) = &report.guidance {
        println!("\nNext steps:\n{guidance}");
    }
}
