//! Suggested prompts offered by each chat surface

/// A canned prompt the user can send with one selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    /// Short text shown to the user
    pub label: &'static str,
    /// Text actually sent to the chat
    pub query: &'static str,
}

/// Suggestions for the report chat
///
/// The sent queries ask the model to answer only when report data exists.
pub const REPORT_SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        label: "List down all the societies inside the Report.",
        query: "List down all the societies inside the Report only if there is report data.",
    },
    Suggestion {
        label: "Which Society do you think is the best out of all and why?",
        query: "Which Society do you think is the best out of all and why only if there is report data?",
    },
    Suggestion {
        label: "Tell me the society names with highest and lowest count of membership.",
        query: "Tell me the society names with highest and lowest count of membership only if there is report data.",
    },
];

/// Suggestions for the general chat
pub const GENERAL_SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        label: "What are the top 10 oncology societies in California actively supporting clinical trials and research initiatives?",
        query: "What are the top 10 oncology societies in California actively supporting clinical trials and research initiatives?",
    },
    Suggestion {
        label: "Which Oncology Society in the World has the largest membership network and reach?",
        query: "Which Oncology Society in the World has the largest membership network and reach?",
    },
    Suggestion {
        label: "Which Oncology Societies in California collaborate with pharmaceutical companies for drug development initiatives?",
        query: "Which Oncology Societies in California collaborate with pharmaceutical companies for drug development initiatives?",
    },
    Suggestion {
        label: "List the Oncology Societies in California that offer leadership opportunities for healthcare professionals.",
        query: "List the Oncology Societies in California that offer leadership opportunities for healthcare professionals.",
    },
    Suggestion {
        label: "Which Oncology Societies in California are most active in influencing state healthcare policies?",
        query: "Which Oncology Societies in California are most active in influencing state healthcare policies?",
    },
    Suggestion {
        label: "Identify oncology societies in California that provide resources or support for community-based oncology practices.",
        query: "Identify oncology societies in California that provide resources or support for community-based oncology practices.",
    },
];
