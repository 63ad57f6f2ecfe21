//! Configuration for task input limits.

/// Limits applied to user-supplied task fields.
///
/// # Examples
///
/// ```
/// use collabill::task::services::TaskConfig;
///
/// let config = TaskConfig::default().with_max_title_length(80);
/// assert_eq!(config.max_title_length, 80);
/// assert_eq!(config.max_description_length, 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskConfig {
    /// Maximum title length in characters, capped by the storage column.
    pub max_title_length: usize,
    /// Maximum description length in characters.
    pub max_description_length: usize,
}

impl TaskConfig {
    /// Sets the maximum title length.
    #[must_use]
    pub const fn with_max_title_length(mut self, max: usize) -> Self {
        self.max_title_length = max;
        self
    }

    /// Sets the maximum description length.
    #[must_use]
    pub const fn with_max_description_length(mut self, max: usize) -> Self {
        self.max_description_length = max;
        self
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            max_title_length: 200,
            max_description_length: 10_000,
        }
    }
}
