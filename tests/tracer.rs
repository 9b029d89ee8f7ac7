use std::cell::RefCell;
use std::rc::Rc;

use behavior_ir::Translator;
use behavior_ir::ir::{Operand, RegisterFlags};
use behavior_ir::loader::behavior::{BinaryOperator, Production};
use behavior_ir::trace::{ReductionEvent, ReductionTracer};

struct RecordingTracer {
    events: Rc<RefCell<Vec<ReductionEvent>>>,
}

impl ReductionTracer for RecordingTracer {
    fn on_event(&mut self, event: ReductionEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[test]
fn tracer_sees_reductions_in_order() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut tracer = RecordingTracer {
        events: events.clone(),
    };
    let mut translator = Translator::default();
    translator
        .translate_with_tracer("Rd=Rs+Rt;Pd.new=C1", &mut tracer)
        .expect("translate");

    let events = events.borrow();
    let productions: Vec<Production> = events.iter().map(|e| e.production()).collect();
    assert_eq!(
        productions,
        vec![
            Production::RegisterReg,
            Production::RegisterReg,
            Production::RegisterReg,
            Production::Binary,
            Production::Assign,
            Production::RegisterReg,
            Production::RegisterReg,
            Production::Assign,
            Production::StatementList,
        ]
    );

    assert_eq!(
        events[3],
        ReductionEvent::Binary {
            op: BinaryOperator::Plus,
            lhs: Operand::register("Rs", 32),
            rhs: Operand::register("Rt", 32),
            dest: Operand::temporary("t0", 32),
        }
    );
    assert_eq!(
        events[5],
        ReductionEvent::Register {
            name: "Pd.new".into(),
            flags: RegisterFlags::PREDICATE | RegisterFlags::DOT_NEW,
        }
    );
    assert_eq!(
        events[8],
        ReductionEvent::JoinStatements { instructions: 3 }
    );
}
