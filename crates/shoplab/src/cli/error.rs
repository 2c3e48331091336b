//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a suggestion for fixing the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    // === Common error constructors ===

    /// The store file could not be opened or created
    pub fn store_unavailable(path: &Path, reason: impl fmt::Display) -> Self {
        Self::new("Failed to open the store")
            .with_context(format!("Store: {} ({})", path.display(), reason))
            .with_suggestion("TRY: Check that the parent directory is writable")
            .with_suggestion("TRY: Ensure no other process holds the store open")
    }

    /// Seeding or the demo ran before the schema existed
    pub fn schema_not_initialized(path: &Path) -> Self {
        Self::new("Store schema is not initialized")
            .with_context(format!("Store: {}", path.display()))
            .with_suggestion(format!(
                "TRY: shoplab --db {} --init-db   # Create the tables first",
                path.display()
            ))
    }

    /// Demo artifacts could not be written
    pub fn artifacts_not_written(dir: &Path, reason: impl fmt::Display) -> Self {
        Self::new("Failed to write demo output")
            .with_context(format!("Directory: {} ({})", dir.display(), reason))
            .with_suggestion(format!("TRY: Check permissions: ls -la {}", dir.display()))
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}
