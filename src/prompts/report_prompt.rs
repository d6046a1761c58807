//! Report chat system prompt
//!
//! Wraps the serialized consolidated report in the instructions given to the
//! completion provider ahead of every report chat turn.

/// Generates the system prompt for the report chat
///
/// # Arguments
///
/// * `report_context` - Output of `report::format_report_context`
///
/// # Examples
///
/// ```
/// use societyreport::prompts::report_prompt::generate_report_prompt;
///
/// let prompt = generate_report_prompt("No report data is currently available.");
/// assert!(prompt.contains("consolidated report"));
/// assert!(prompt.contains("No report data is currently available."));
/// ```
pub fn generate_report_prompt(report_context: &str) -> String {
    format!(
        r#"You are an AI assistant answering questions about a consolidated report of pharmaceutical societies.
Use the following report data to answer user queries accurately if the information exists in the report.
If the query cannot be answered using the report, respond using your general knowledge.

{report_context}

Respond concisely using the data provided."#
    )
}
