//! Public entry point: behavior text in, IR instructions out.

use crate::config::TranslatorOptions;
use crate::error::BehaviorError;
use crate::ir::{IrInstruction, TemporaryAllocator};
use crate::loader::behavior::{Parser, Reducer};
use crate::trace::{NoopTracer, ReductionTracer};

/// Owns the temporary allocator, so temporary names keep counting across `translate` calls on
/// the same instance. Construct a new translator (or call [`Translator::reset_temporaries`])
/// to restart numbering.
pub struct Translator {
    options: TranslatorOptions,
    allocator: TemporaryAllocator,
}

impl Translator {
    pub fn new(options: TranslatorOptions) -> Self {
        let allocator = TemporaryAllocator::new(options.temporary_prefix());
        Self { options, allocator }
    }

    /// Translates one behavior string. Either the full instruction list is returned or nothing
    /// is; a failed call may still have consumed temporary names.
    pub fn translate(&mut self, text: &str) -> Result<Vec<IrInstruction>, BehaviorError> {
        let mut tracer = NoopTracer;
        self.translate_with_tracer(text, &mut tracer)
    }

    pub fn translate_with_tracer(
        &mut self,
        text: &str,
        tracer: &mut dyn ReductionTracer,
    ) -> Result<Vec<IrInstruction>, BehaviorError> {
        let reducer = Reducer::new(&mut self.allocator, self.options.operand_width, tracer);
        let mut parser = Parser::new(text, reducer);
        let context = parser.parse()?;
        Ok(context.into_instructions())
    }

    pub fn temporaries_issued(&self) -> u64 {
        self.allocator.issued()
    }

    pub fn reset_temporaries(&mut self) {
        self.allocator = TemporaryAllocator::new(self.options.temporary_prefix());
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(TranslatorOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Opcode, Operand};

    #[test]
    fn honors_configured_width_and_prefix() {
        let options = TranslatorOptions::default()
            .with_width(64)
            .with_temporary_prefix("tmp_")
            .expect("prefix");
        let mut translator = Translator::new(options);
        let out = translator.translate("Rd=Rs+Rt;").expect("translate");
        assert_eq!(out[0].opcode, Opcode::Add);
        assert_eq!(out[0].dest, Operand::temporary("tmp_0", 64));
        assert_eq!(out[1].width, 64);
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut translator = Translator::default();
        translator.translate("Rd=Rs+Rt;").expect("first");
        assert_eq!(translator.temporaries_issued(), 1);
        translator.reset_temporaries();
        let out = translator.translate("Rd=Rs+Rt;").expect("second");
        assert_eq!(out[0].dest, Operand::temporary("t0", 32));
    }
}
