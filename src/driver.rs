//! Best-effort batch translation over a [`DefinitionSet`].
//!
//! Lexer and parser failures are recorded per definition and the batch moves on. Anything
//! else (an unset expression value, for instance) aborts the run.

use ahash::AHashMap;
use log::{info, warn};

use crate::config::BatchOptions;
use crate::diagnostic::BehaviorDiagnostic;
use crate::error::BehaviorError;
use crate::ir::IrInstruction;
use crate::loader::definitions::DefinitionSet;
use crate::trace::ReductionTracer;
use crate::translator::Translator;

#[derive(Debug, Clone)]
pub struct TranslatedBehavior {
    pub mnemonic: String,
    pub instructions: Vec<IrInstruction>,
}

#[derive(Debug, Clone)]
pub struct BehaviorFailure {
    pub mnemonic: String,
    pub behavior: String,
    pub diagnostic: BehaviorDiagnostic,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub translated: Vec<TranslatedBehavior>,
    pub failures: Vec<BehaviorFailure>,
    pub skipped_empty: usize,
    pub filtered: usize,
}

impl BatchReport {
    /// Failure counts keyed by diagnostic code.
    pub fn failure_histogram(&self) -> AHashMap<&'static str, usize> {
        let mut histogram = AHashMap::new();
        for failure in &self.failures {
            *histogram.entry(failure.diagnostic.code).or_insert(0) += 1;
        }
        histogram
    }

    pub fn summary(&self) -> String {
        format!(
            "{} translated, {} failed, {} empty, {} filtered",
            self.translated.len(),
            self.failures.len(),
            self.skipped_empty,
            self.filtered
        )
    }
}

pub struct BatchRunner {
    translator: Translator,
    options: BatchOptions,
    tracer: Option<Box<dyn ReductionTracer>>,
}

impl BatchRunner {
    pub fn new(translator: Translator, options: BatchOptions) -> Self {
        Self {
            translator,
            options,
            tracer: None,
        }
    }

    pub fn with_tracer(mut self, tracer: Box<dyn ReductionTracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn run(&mut self, definitions: &DefinitionSet) -> Result<BatchReport, BehaviorError> {
        let mut report = BatchReport::default();
        for def in definitions {
            if def.behavior.trim().is_empty() {
                info!("{}: no behavior available, skipping", def.mnemonic);
                report.skipped_empty += 1;
                continue;
            }
            if !self.options.accepts(&def.behavior) {
                report.filtered += 1;
                continue;
            }
            if self.options.fresh_temporaries {
                self.translator.reset_temporaries();
            }

            info!("{}: parsing {}", def.mnemonic, def.behavior.trim());
            let result = match self.tracer.as_deref_mut() {
                Some(tracer) => self.translator.translate_with_tracer(&def.behavior, tracer),
                None => self.translator.translate(&def.behavior),
            };
            match result {
                Ok(instructions) => report.translated.push(TranslatedBehavior {
                    mnemonic: def.mnemonic.clone(),
                    instructions,
                }),
                Err(err) if err.is_recoverable() => {
                    warn!("{} (line {}): {err}", def.mnemonic, def.line);
                    report.failures.push(BehaviorFailure {
                        mnemonic: def.mnemonic.clone(),
                        behavior: def.behavior.clone(),
                        diagnostic: err.diagnostic(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
        info!("{}", report.summary());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::definitions::InstructionDefinition;

    fn defs(pairs: &[(&str, &str)]) -> DefinitionSet {
        DefinitionSet::new(
            pairs
                .iter()
                .enumerate()
                .map(|(idx, (mnemonic, behavior))| InstructionDefinition {
                    mnemonic: mnemonic.to_string(),
                    behavior: behavior.to_string(),
                    line: idx + 1,
                })
                .collect(),
        )
    }

    #[test]
    fn records_failures_and_keeps_going() {
        let set = defs(&[
            ("add", "Rd=Rs+Rt;"),
            ("bad", "Rd=Rs@Rt;"),
            ("empty", "  "),
            ("load", "Rd=*EA;"),
            ("sub", "Rd=Rs-Rt;"),
        ]);
        let mut runner = BatchRunner::new(Translator::default(), BatchOptions::default());
        let report = runner.run(&set).expect("batch");

        let ok: Vec<&str> = report
            .translated
            .iter()
            .map(|t| t.mnemonic.as_str())
            .collect();
        assert_eq!(ok, vec!["add", "sub"]);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.skipped_empty, 1);

        let histogram = report.failure_histogram();
        assert_eq!(histogram.get("lexer.illegal-character"), Some(&1));
        assert_eq!(histogram.get("parser.unexpected-token"), Some(&1));
        assert_eq!(
            report.summary(),
            "2 translated, 2 failed, 1 empty, 0 filtered"
        );
    }

    #[test]
    fn temporaries_continue_across_definitions_by_default() {
        let set = defs(&[("a", "Rd=Rs+Rt;"), ("b", "Rd=Rs+Rt;")]);
        let mut runner = BatchRunner::new(Translator::default(), BatchOptions::default());
        let report = runner.run(&set).expect("batch");
        assert_eq!(
            report.translated[1].instructions[0].to_string(),
            "add [Rs:32, Rt:32, t1:32]"
        );

        let fresh = BatchOptions {
            fresh_temporaries: true,
            ..BatchOptions::default()
        };
        let mut runner = BatchRunner::new(Translator::default(), fresh);
        let report = runner.run(&set).expect("batch");
        assert_eq!(
            report.translated[1].instructions[0].to_string(),
            "add [Rs:32, Rt:32, t0:32]"
        );
    }

    #[test]
    fn filter_skips_non_matching_behaviors() {
        let set = defs(&[("add", "Rd=Rs+Rt;"), ("sub", "Rd=Rs-Rt;")]);
        let options = BatchOptions {
            filter: Some("Rd=Rs+Rt;".into()),
            ..BatchOptions::default()
        };
        let mut runner = BatchRunner::new(Translator::default(), options);
        let report = runner.run(&set).expect("batch");
        assert_eq!(report.translated.len(), 1);
        assert_eq!(report.filtered, 1);
    }
}
