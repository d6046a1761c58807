//! Prompts for the two chat surfaces
//!
//! This module provides the report chat system prompt, the opening greeting
//! of each surface, and the suggested prompts each surface offers.

pub mod report_prompt;
pub mod suggestions;

pub use suggestions::{Suggestion, GENERAL_SUGGESTIONS, REPORT_SUGGESTIONS};

use crate::report::{format_report_context, ReportTable};

/// Opening assistant message of the report chat
pub const REPORT_GREETING: &str =
    "I am here to answer questions based on your consolidated report. How can I help you?";

/// Opening assistant message of the general chat
pub const GENERAL_GREETING: &str = "How can I assist you today?";

/// Builds the report chat system prompt for the current report
///
/// # Examples
///
/// ```
/// use societyreport::prompts::build_report_system_prompt;
/// use societyreport::report::ReportTable;
///
/// let mut table = ReportTable::new();
/// table.add_organization("IOWA Oncology Society");
/// let prompt = build_report_system_prompt(&table);
/// assert!(prompt.contains("Society Name: IOWA Oncology Society"));
/// ```
pub fn build_report_system_prompt(table: &ReportTable) -> String {
    report_prompt::generate_report_prompt(&format_report_context(table))
}
