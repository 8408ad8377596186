use serde_json::json;

use verdict_core::domain::{Context, ExecutionResult, Halt, Metadata};
use verdict_core::journal::{Journal, Transition};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // (A) A journal for this run: two units of work, one log.
    let mut journal = Journal::new();
    println!("run: {}", journal.run_id());

    // (B) The inner unit fails and hands its fault back for unwinding.
    let context: Context = [("order_id".to_string(), json!(42))].into_iter().collect();
    let mut inner = ExecutionResult::new(context);

    inner.begin_execution()?;
    journal.record(&inner, Transition::Begin);

    let inner_fault = inner
        .fail(
            Some("payment gateway unavailable".to_string()),
            [("attempt".to_string(), json!(1))].into_iter().collect::<Metadata>(),
            None,
            Halt::Propagate,
        )?
        .into_fault();
    journal.record(&inner, Transition::Fail);

    if let Some(fault) = &inner_fault {
        println!("inner unit raised: {fault}");
    }

    // (C) The outer unit catches it and skips, threading the inner fault
    //     into its cause chain. Recorded only: nothing unwinds further.
    let mut outer = ExecutionResult::new(Context::new());
    outer.begin_execution()?;
    journal.record(&outer, Transition::Begin);

    let _ = outer.skip(
        Some("prerequisite failed".to_string()),
        Metadata::new(),
        inner_fault,
        Halt::Record,
    )?;
    journal.record(&outer, Transition::Skip);

    // (D) Flattened views: the shape assertion layers compare against.
    println!(
        "inner: {}",
        serde_json::to_string_pretty(&inner.snapshot())?
    );
    println!(
        "outer: {}",
        serde_json::to_string_pretty(&outer.snapshot())?
    );

    // (E) Why did the outer unit stop? Walk the chain outermost-in.
    if let Some(cause) = outer.cause() {
        for (depth, fault) in cause.chain().enumerate() {
            println!(
                "chain[{depth}]: {} (origin {})",
                fault,
                fault.origin().result_id()
            );
        }
    }

    // (F) Journal of every transition this run, then explicit teardown.
    for event in journal.events() {
        println!(
            "journal: {} {:?} -> {} / {}",
            event.result_id, event.transition, event.state, event.status
        );
    }
    journal.reset();

    Ok(())
}
