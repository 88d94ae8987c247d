//! Lint results and partitions
//!
//! A linter splits its inputs into [`Partitions`] (e.g. one per interpreter
//! version), each partition is cut into batches, and every batch produces one
//! [`LintResult`].

use serde::Serialize;

/// Level at which a result is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Success
    Info,
    /// Failure
    Error,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => Self::Info,
            LogLevel::Error => Self::Error,
        }
    }
}

/// Outcome of running one tool over one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintResult {
    /// Process exit code (0 = clean)
    pub exit_code: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Tool that produced this result
    pub linter_name: String,
    /// Human description of the partition, when the tool partitions its input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_description: Option<String>,
    /// Where the tool's reports were written, if it wrote any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

impl LintResult {
    /// Create a result without a partition description
    pub fn new(
        exit_code: i32,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        linter_name: impl Into<String>,
    ) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            linter_name: linter_name.into(),
            partition_description: None,
            report: None,
        }
    }

    /// Attach a partition description
    #[must_use]
    pub fn with_partition(mut self, description: Option<String>) -> Self {
        self.partition_description = description;
        self
    }

    /// Attach the directory holding the tool's reports
    #[must_use]
    pub fn with_report(mut self, report: Option<String>) -> Self {
        self.report = report;
        self
    }

    /// Whether the tool reported problems
    #[must_use]
    pub const fn failed(&self) -> bool {
        self.exit_code != 0
    }

    /// Level this result should be logged at
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        if self.failed() { LogLevel::Error } else { LogLevel::Info }
    }

    /// Streaming message shown as each batch finishes
    #[must_use]
    pub fn message(&self) -> String {
        let mut message = self.linter_name.clone();
        if self.failed() {
            message.push_str(&format!(" failed (exit code {}).", self.exit_code));
        } else {
            message.push_str(" succeeded.");
        }
        if let Some(partition) = &self.partition_description {
            message.push_str(&format!("\nPartition: {partition}"));
        }
        if !self.stdout.is_empty() {
            message.push_str(&format!("\n{}", self.stdout));
        }
        if !self.stderr.is_empty() {
            message.push_str(&format!("\n{}", self.stderr));
        }
        if self.partition_description.is_some() || !self.stdout.is_empty() || !self.stderr.is_empty()
        {
            message.push_str("\n\n");
        }
        message
    }
}

/// One partition: an optional key plus the elements (file paths) in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Partition key, shown to the user as the partition description
    pub key: Option<String>,
    /// Elements to lint
    pub elements: Vec<String>,
}

/// A linter's inputs split into independently runnable groups
///
/// Empty means the linter has nothing to do (or is skipped).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partitions(Vec<Partition>);

impl Partitions {
    /// No partitions: the tool does not run
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Everything in one unkeyed partition
    pub fn single(elements: impl IntoIterator<Item = String>) -> Self {
        Self(vec![Partition {
            key: None,
            elements: elements.into_iter().collect(),
        }])
    }

    /// Add a keyed partition
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, elements: Vec<String>) -> Self {
        self.0.push(Partition {
            key: Some(key.into()),
            elements,
        });
        self
    }

    /// Whether there is nothing to run
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate partitions in order
    pub fn iter(&self) -> std::slice::Iter<'_, Partition> {
        self.0.iter()
    }
}

impl IntoIterator for Partitions {
    type Item = Partition;
    type IntoIter = std::vec::IntoIter<Partition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// One batch handed to a linter's `run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Elements in this batch
    pub elements: Vec<String>,
    /// Key of the partition the batch came from
    pub key: Option<String>,
}
