//! Knobs shared by the translator and the batch driver.

use crate::error::BehaviorError;
use crate::loader::behavior::lexer::REGISTER_CLASSES;

/// Architecture word size used for every operand when nothing else is configured.
pub const DEFAULT_OPERAND_WIDTH: u32 = 32;

pub const DEFAULT_TEMPORARY_PREFIX: &str = "t";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorOptions {
    /// Width in bits given to registers, immediates and temporaries.
    pub operand_width: u32,
    temporary_prefix: String,
}

impl TranslatorOptions {
    pub fn with_width(mut self, operand_width: u32) -> Self {
        self.operand_width = operand_width;
        self
    }

    /// Temporary names are `<prefix><n>`. A prefix that could start a register name is
    /// rejected so that no temporary can alias a register operand.
    pub fn with_temporary_prefix(
        mut self,
        prefix: impl Into<String>,
    ) -> Result<Self, BehaviorError> {
        let prefix = prefix.into();
        let invalid = |message: String| BehaviorError::InvalidOption {
            option: "temporary prefix",
            message,
        };
        match prefix.chars().next() {
            None => return Err(invalid("must not be empty".into())),
            Some(first) if REGISTER_CLASSES.contains(&first) || prefix.starts_with("EA") => {
                let message = format!("'{prefix}' could be read as a register name");
                return Err(invalid(message));
            }
            Some(_) => {}
        }
        self.temporary_prefix = prefix;
        Ok(self)
    }

    pub fn temporary_prefix(&self) -> &str {
        &self.temporary_prefix
    }
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            operand_width: DEFAULT_OPERAND_WIDTH,
            temporary_prefix: DEFAULT_TEMPORARY_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Only behaviors containing this text are translated.
    pub filter: Option<String>,
    /// Restart temporary numbering at the prefix's `0` for every behavior.
    pub fresh_temporaries: bool,
}

impl BatchOptions {
    pub fn accepts(&self, behavior: &str) -> bool {
        self.filter
            .as_deref()
            .is_none_or(|needle| behavior.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_architecture_word() {
        let options = TranslatorOptions::default();
        assert_eq!(options.operand_width, 32);
        assert_eq!(options.temporary_prefix(), "t");
        assert_eq!(options.with_width(64).operand_width, 64);
    }

    #[test]
    fn rejects_prefixes_that_alias_registers() {
        for prefix in ["R", "Rtmp", "P", "N", "M", "C", "EA", ""] {
            let err = TranslatorOptions::default()
                .with_temporary_prefix(prefix)
                .unwrap_err();
            assert!(
                matches!(err, BehaviorError::InvalidOption { .. }),
                "{prefix:?}"
            );
            assert!(!err.is_recoverable());
            assert_eq!(err.diagnostic().code, "config.invalid-option");
        }
        let options = TranslatorOptions::default()
            .with_temporary_prefix("tmp_")
            .expect("lowercase prefix");
        assert_eq!(options.temporary_prefix(), "tmp_");
        assert!(TranslatorOptions::default().with_temporary_prefix("E").is_ok());
    }

    #[test]
    fn filter_is_a_substring_match() {
        let mut batch = BatchOptions::default();
        assert!(batch.accepts("anything"));
        batch.filter = Some("Rd=Rs+Rt;".into());
        assert!(batch.accepts("Rd=Rs+Rt;"));
        assert!(!batch.accepts("Rd=Rs-Rt;"));
    }
}
