//! Markdown report generation
//!
//! One section per module with its description and a table of submodules.

use crate::model::CleanModule;
use crate::output::{write_file, OutputResult};
use std::path::Path;

/// Writes the markdown report for `modules` to `output_path`
pub fn generate_markdown_summary(modules: &[CleanModule], output_path: &Path) -> OutputResult<()> {
    write_file(output_path, &format_markdown_summary(modules))
}

/// Formats modules as a markdown document
pub fn format_markdown_summary(modules: &[CleanModule]) -> String {
    let mut md = String::new();

    md.push_str("# Documentation Modules\n\n");

    let submodule_count: usize = modules.iter().map(|m| m.submodules.len()).sum();
    md.push_str(&format!("- **Modules**: {}\n", modules.len()));
    md.push_str(&format!("- **Submodules**: {}\n\n", submodule_count));

    for module in modules {
        md.push_str(&format!("## {}\n\n", module.module));
        if !module.description.is_empty() {
            md.push_str(&format!("{}\n\n", module.description));
        }

        if module.submodules.is_empty() {
            md.push_str("_No submodules found._\n\n");
            continue;
        }

        md.push_str("| Submodule | Description |\n");
        md.push_str("|-----------|-------------|\n");
        for (title, description) in module.submodules.iter() {
            md.push_str(&format!(
                "| {} | {} |\n",
                escape_cell(title),
                escape_cell(description)
            ));
        }
        md.push('\n');
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
