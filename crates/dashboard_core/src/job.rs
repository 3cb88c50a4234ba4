use std::fmt;

/// Section of the dashboard a job is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobGroup {
    Finance,
    Invoice,
}

impl JobGroup {
    pub const ALL: [JobGroup; 2] = [JobGroup::Finance, JobGroup::Invoice];

    pub fn title(self) -> &'static str {
        match self {
            JobGroup::Finance => "Finance Functions",
            JobGroup::Invoice => "Invoice Functions",
        }
    }
}

/// Closed catalog of backend jobs the dashboard can trigger.
///
/// Routes are relative to the configured base endpoint and carry no leading
/// slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobTrigger {
    UpdateCashPosition,
    SyncPlannedPayments,
    SyncBankTransactions,
    PopulateRbgInvoices,
    ImportCardStatement1212,
    ImportCardStatement0296,
}

impl JobTrigger {
    /// Catalog order, as rendered.
    pub const ALL: [JobTrigger; 6] = [
        JobTrigger::UpdateCashPosition,
        JobTrigger::SyncPlannedPayments,
        JobTrigger::SyncBankTransactions,
        JobTrigger::PopulateRbgInvoices,
        JobTrigger::ImportCardStatement1212,
        JobTrigger::ImportCardStatement0296,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobTrigger::UpdateCashPosition => "Update Cash Position",
            JobTrigger::SyncPlannedPayments => "Sync Planned Payments",
            JobTrigger::SyncBankTransactions => "Sync Bank Transactions",
            JobTrigger::PopulateRbgInvoices => "Populate RBG Invoices",
            JobTrigger::ImportCardStatement1212 => "Import Credit Card Statement 1212",
            JobTrigger::ImportCardStatement0296 => "Import Credit Card Statement 0296",
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            JobTrigger::UpdateCashPosition => "sheets/updateCashPosition",
            JobTrigger::SyncPlannedPayments => "sheets/syncPayments",
            JobTrigger::SyncBankTransactions => "transactions/sync",
            JobTrigger::PopulateRbgInvoices => "invoices/populateRBGInvoices",
            JobTrigger::ImportCardStatement1212 => "statements/card1212",
            JobTrigger::ImportCardStatement0296 => "statements/card0296",
        }
    }

    /// Statement imports take the exported statement file as a multipart upload.
    pub fn requires_file(self) -> bool {
        matches!(
            self,
            JobTrigger::ImportCardStatement1212 | JobTrigger::ImportCardStatement0296
        )
    }

    pub fn group(self) -> JobGroup {
        match self {
            JobTrigger::UpdateCashPosition
            | JobTrigger::SyncPlannedPayments
            | JobTrigger::SyncBankTransactions => JobGroup::Finance,
            JobTrigger::PopulateRbgInvoices
            | JobTrigger::ImportCardStatement1212
            | JobTrigger::ImportCardStatement0296 => JobGroup::Invoice,
        }
    }

    /// Looks up a job by its 1-based catalog position.
    pub fn from_position(position: usize) -> Option<JobTrigger> {
        position
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|job| *job == self)
            .map_or(0, |index| index + 1)
    }
}

impl fmt::Display for JobTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
