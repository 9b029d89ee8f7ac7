//! Instruction definition lists: one `mnemonic<TAB>behavior` pair per line.
//!
//! Blank lines and lines starting with `#` are ignored. A literal `\n` inside a behavior is
//! turned into a newline so multi-line behaviors fit on one line of the file.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::BehaviorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDefinition {
    pub mnemonic: String,
    pub behavior: String,
    /// 1-based line in the source file.
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    definitions: Vec<InstructionDefinition>,
}

impl DefinitionSet {
    pub fn new(definitions: Vec<InstructionDefinition>) -> Self {
        Self { definitions }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BehaviorError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let set = Self::parse_str(&source)?;
        debug!("loaded {} definitions from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn parse_str(source: &str) -> Result<Self, BehaviorError> {
        let mut definitions = Vec::new();
        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            let text = raw.trim_end_matches('\r');
            if text.trim().is_empty() || text.trim_start().starts_with('#') {
                continue;
            }
            let (mnemonic, behavior) =
                text.split_once('\t').ok_or_else(|| BehaviorError::Definitions {
                    line,
                    message: "expected `mnemonic<TAB>behavior`".into(),
                })?;
            let mnemonic = mnemonic.trim();
            if mnemonic.is_empty() {
                return Err(BehaviorError::Definitions {
                    line,
                    message: "empty mnemonic".into(),
                });
            }
            definitions.push(InstructionDefinition {
                mnemonic: mnemonic.to_string(),
                behavior: behavior.trim().replace("\\n", "\n"),
                line,
            });
        }
        Ok(Self { definitions })
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstructionDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a DefinitionSet {
    type Item = &'a InstructionDefinition;
    type IntoIter = std::slice::Iter<'a, InstructionDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}
