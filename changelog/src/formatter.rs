use crate::layout::{LayoutMode, SectionType};
use crate::types::*;

// --- Traits ---

/// Renders the header written once when a changelog file is created
pub trait HeaderFormatter: Send + Sync {
    fn format(&self, display_version: &str, section: SectionType) -> String;
}

/// Renders grouped change items
pub trait SectionFormatter: Send + Sync {
    fn format(&self, changes: &[ChangeItem]) -> String;
}

// Header Formatters
#[derive(Debug, Clone)]
pub struct SeparateHeaderFormatter;

impl HeaderFormatter for SeparateHeaderFormatter {
    fn format(&self, display_version: &str, section: SectionType) -> String {
        format!("# {display_version} {} Changelog\n\n", section.title())
    }
}

#[derive(Debug, Clone)]
pub struct UnifiedHeaderFormatter;

impl HeaderFormatter for UnifiedHeaderFormatter {
    fn format(&self, display_version: &str, _section: SectionType) -> String {
        format!("# {display_version} Changelog\n\n")
    }
}

#[derive(Debug, Clone)]
pub struct SingleHeaderFormatter;

impl HeaderFormatter for SingleHeaderFormatter {
    fn format(&self, _display_version: &str, _section: SectionType) -> String {
        "# Changelog\n\n".to_string()
    }
}

#[must_use]
pub fn create_header_formatter(layout: LayoutMode) -> Box<dyn HeaderFormatter> {
    match layout {
        LayoutMode::Separate => Box::new(SeparateHeaderFormatter),
        LayoutMode::Unified => Box::new(UnifiedHeaderFormatter),
        LayoutMode::Single => Box::new(SingleHeaderFormatter),
    }
}

// Section Formatter (Markdown)
#[derive(Debug, Clone)]
pub struct MarkdownSectionFormatter {
    heading_level: usize,
}

impl MarkdownSectionFormatter {
    #[must_use]
    pub const fn new(heading_level: usize) -> Self {
        Self { heading_level }
    }

    /// Category headings sit one level below the PR heading of `layout`
    #[must_use]
    pub const fn for_layout(layout: LayoutMode) -> Self {
        match layout {
            LayoutMode::Single => Self::new(4),
            LayoutMode::Separate | LayoutMode::Unified => Self::new(3),
        }
    }
}

impl Default for MarkdownSectionFormatter {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SectionFormatter for MarkdownSectionFormatter {
    fn format(&self, changes: &[ChangeItem]) -> String {
        let mut formatted = String::with_capacity(changes.len() * 64);
        let marker = "#".repeat(self.heading_level);

        for (category, items) in group_by_category(changes) {
            formatted.push('\n');
            formatted.push_str(&marker);
            formatted.push(' ');
            formatted.push_str(category);
            formatted.push('\n');
            for item in items {
                formatted.push_str("- ");
                formatted.push_str(item);
                formatted.push('\n');
            }
        }
        formatted
    }
}
