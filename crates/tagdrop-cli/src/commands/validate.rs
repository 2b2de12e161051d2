//! The `tagdrop validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let manifests = if quiz_path.is_dir() {
        tagdrop_core::parser::load_quiz_directory(&quiz_path)?
    } else {
        vec![tagdrop_core::parser::parse_manifest(&quiz_path)?]
    };

    let mut total_warnings = 0;
    let mut total_errors = 0;

    for manifest in &manifests {
        println!("Quiz: {} ({} tags)", manifest.id, manifest.tags.len());

        if let Err(e) = manifest.to_quiz() {
            println!("  ERROR: {e}");
            total_errors += 1;
        }

        let warnings = tagdrop_core::parser::validate_manifest(manifest);
        for w in &warnings {
            let prefix = w
                .label
                .as_ref()
                .map(|l| format!("  [{l}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_errors > 0 {
        anyhow::bail!("{total_errors} quiz(es) failed validation");
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
