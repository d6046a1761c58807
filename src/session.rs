//! Per-session state
//!
//! A [`Session`] owns everything a user builds up while working: the report
//! table and both chat surfaces. Nothing is shared between sessions and
//! nothing outlives one.

use crate::chat::{ChatMessage, ChatSurface};
use crate::config::EmailConfig;
use crate::error::Result;
use crate::export::{self, SpreadsheetBlob};
use crate::knowledge;
use crate::notify::{self, DeliveryOutcome, Mailer};
use crate::prompts::build_report_system_prompt;
use crate::providers::Provider;
use crate::report::{AddOutcome, ReportTable};

use chrono::{DateTime, Utc};
use std::path::Path;
use uuid::Uuid;

/// Isolated state for one user session
///
/// # Examples
///
/// ```
/// use societyreport::report::AddOutcome;
/// use societyreport::session::Session;
///
/// let mut session = Session::new();
/// assert_eq!(session.available_organizations().len(), 5);
/// assert_eq!(session.add_organization("IOWA Oncology Society"), AddOutcome::Added);
/// assert_eq!(session.available_organizations().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    report: ReportTable,
    report_chat: ChatSurface,
    general_chat: ChatSurface,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start a fresh session with an empty report and greeted chats
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        tracing::debug!("Started session {}", id);
        Self {
            id,
            started_at: Utc::now(),
            report: ReportTable::new(),
            report_chat: ChatSurface::report(),
            general_chat: ChatSurface::general(),
        }
    }

    /// Session identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creation time
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Accumulated report
    pub fn report(&self) -> &ReportTable {
        &self.report
    }

    /// Report chat surface
    pub fn report_chat(&self) -> &ChatSurface {
        &self.report_chat
    }

    /// General chat surface
    pub fn general_chat(&self) -> &ChatSurface {
        &self.general_chat
    }

    /// Add a society to the report by name
    pub fn add_organization(&mut self, name: &str) -> AddOutcome {
        self.report.add_organization(name)
    }

    /// Known societies that are not yet in the report, in offering order
    pub fn available_organizations(&self) -> Vec<&'static str> {
        knowledge::organization_names()
            .filter(|name| !self.report.contains(name))
            .collect()
    }

    /// Add the society at `index` of [`Session::available_organizations`]
    ///
    /// Returns the added name, or `None` when the index is out of range.
    pub fn select_available(&mut self, index: usize) -> Option<&'static str> {
        let name = *self.available_organizations().get(index)?;
        self.report.add_organization(name);
        Some(name)
    }

    /// Render the report as a downloadable spreadsheet
    ///
    /// # Errors
    ///
    /// Returns error if the workbook cannot be serialized
    pub fn export_spreadsheet(&self) -> Result<SpreadsheetBlob> {
        export::export_blob(self.report.rows())
    }

    /// Write the report spreadsheet to `path`, returning the byte count
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the file write fails
    pub fn export_to_file(&self, path: &Path) -> Result<usize> {
        export::write_spreadsheet(self.report.rows(), path)
    }

    /// Email the report through `mailer`
    pub async fn email_report(&self, mailer: &dyn Mailer, config: &EmailConfig) -> DeliveryOutcome {
        notify::send_report(mailer, &self.report, config).await
    }

    /// Ask the report chat, with the current report as context
    pub async fn ask_report(&mut self, provider: &dyn Provider, text: &str) -> Option<&ChatMessage> {
        let system_prompt = build_report_system_prompt(&self.report);
        self.report_chat
            .submit(provider, text, Some(&system_prompt))
            .await
    }

    /// Ask the general chat
    pub async fn ask_general(
        &mut self,
        provider: &dyn Provider,
        text: &str,
    ) -> Option<&ChatMessage> {
        self.general_chat.submit(provider, text, None).await
    }
}
