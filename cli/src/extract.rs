use std::fs;
use std::path::Path;

use changelog::types::group_by_category;
use changelog::{ChangeItem, Parser};

use crate::error::{Result, ResultExt};
use crate::ui;

pub fn execute(file: &Path) -> Result<()> {
    let description = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let extraction = Parser::default().parse(&description)?;

    ui::section_header("Extraction");
    ui::info_message(&format!("Target version: {}", extraction.version));
    print_changes("Client-facing changes", &extraction.client_changes);
    print_changes("Internal changes", &extraction.internal_changes);

    if extraction.related_issues.is_empty() {
        ui::info_message("Related issues: none");
    } else {
        ui::info_message(&format!(
            "Related issues: {}",
            extraction.related_issues.join(", ")
        ));
    }

    Ok(())
}

fn print_changes(title: &str, changes: &[ChangeItem]) {
    if changes.is_empty() {
        ui::warning_message(&format!("{title}: none"));
        return;
    }

    ui::info_message(&format!("{title}: {}", changes.len()));
    for (category, items) in group_by_category(changes) {
        println!("  {category}");
        for item in items {
            println!("    - {item}");
        }
    }
}
