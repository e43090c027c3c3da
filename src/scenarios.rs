//! The error-handling walkthrough.
//!
//! Each scenario narrates itself to a writer and returns a [`ScenarioReport`]
//! describing which handler fired, so the behaviour can be checked without
//! parsing the narration. Scenarios 1-7 always recover locally;
//! [`unhandled`] is the one that hands its failure back to the caller.

use std::cell::{Cell, RefCell};
use std::io::{self, Write};

use thiserror::Error;

use crate::error::{
    parse_int, protect, Dispatch, ErrorKind, Failure, GenericError, HandledBy, MyError, Outcome,
};

const FINALLY_LINE: &str = "\t   ...and finally...Im a finally block and I always print!";

/// Errors that end a scenario early.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The narration could not be written.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A failure escaped every handler.
    #[error("unhandled {kind}: {0}", kind = .0.kind())]
    Unhandled(#[from] Failure),
}

/// What happened in one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub number: u8,
    pub title: &'static str,
    /// Kind of the failure raised, if any.
    pub kind: Option<ErrorKind>,
    /// Handler that recovered the failure, innermost first when nested.
    pub handled_by: Vec<HandledBy>,
    /// How many times the completion block ran.
    pub completion_runs: u32,
}

impl ScenarioReport {
    fn new(number: u8, title: &'static str) -> Self {
        Self {
            number,
            title,
            kind: None,
            handled_by: Vec::new(),
            completion_runs: 0,
        }
    }

    fn record<T, R>(&mut self, outcome: &Outcome<T, R>) {
        if let Outcome::Handled { by, kind, .. } = outcome {
            self.kind.get_or_insert(*kind);
            self.handled_by.push(*by);
        }
    }
}

fn raise(failure: impl Into<Failure>) -> Result<(), Failure> {
    Err(failure.into())
}

fn write_outcome(out: &mut dyn Write, outcome: Outcome<(), String>) -> io::Result<()> {
    match outcome {
        Outcome::Completed(()) => writeln!(out, "\t-->I R SUCCESS :(")?,
        Outcome::Handled { value, .. } => writeln!(out, "{value}")?,
    }
    writeln!(out)
}

/// 1. A `Spam` failure caught by a handler scoped to exactly `Spam`.
pub fn exact_match(out: &mut dyn Write) -> Result<ScenarioReport, ScenarioError> {
    let mut report = ScenarioReport::new(1, "Raise my custom exception \"SpamError\"");
    writeln!(out, "{}. {}", report.number, report.title)?;

    let outcome = Dispatch::new()
        .on(ErrorKind::Spam, |f| format!("\t-->{}: {}", ErrorKind::Spam, f))
        .catch_all(|_| "\t-->OtherError: Not a SpamError".to_string())
        .run(raise(MyError::spam("spam error string here!")))?;

    report.record(&outcome);
    write_outcome(out, outcome)?;
    Ok(report)
}

/// 2. A `Spam` failure where only `Eggs` has a handler; the catch-all fires.
pub fn catch_all_fallback(out: &mut dyn Write) -> Result<ScenarioReport, ScenarioError> {
    let mut report = ScenarioReport::new(
        2,
        "Raise SpamError with no matching SpamError handler. Instead, fail over to catch-all handler!",
    );
    writeln!(out, "{}. {}", report.number, report.title)?;

    let outcome = Dispatch::new()
        .on(ErrorKind::Eggs, |f| format!("\t-->EggsError: {f}"))
        .catch_all(|_| "\t-->Error: got something else!".to_string())
        .run(raise(MyError::spam("another spam!")))?;

    report.record(&outcome);
    write_outcome(out, outcome)?;
    Ok(report)
}

/// Inner region shared by scenarios 3 and 8: raises `Spam` with only an
/// `Eggs` handler in scope, so the failure leaves the region.
fn inner_region(
    out: &RefCell<&mut dyn Write>,
) -> io::Result<Result<Outcome<(), String>, Failure>> {
    let inner = Dispatch::new()
        .on(ErrorKind::Eggs, |f| format!("\t-->Error: {f}"))
        .run(raise(MyError::spam(
            "This SpamError would kill the script! Its not handled and there is no catch-all (this is bad programming!)",
        )));

    match &inner {
        Ok(Outcome::Completed(())) => writeln!(out.borrow_mut(), "\t-->No Errors! :)")?,
        Ok(Outcome::Handled { value, .. }) => writeln!(out.borrow_mut(), "{value}")?,
        Err(_) => {}
    }
    Ok(inner)
}

fn completion(out: &RefCell<&mut dyn Write>, runs: &Cell<u32>) {
    runs.set(runs.get() + 1);
    // Best effort: a completion block has nowhere to report a write failure.
    let mut out = out.borrow_mut();
    let _ = writeln!(out, "{FINALLY_LINE}");
    let _ = writeln!(out);
}

/// 3. The inner region has no matching handler and no catch-all; an outer
/// catch-all recovers the failure and the completion block runs once.
pub fn nested_safety_net(out: &mut dyn Write) -> Result<ScenarioReport, ScenarioError> {
    let mut report = ScenarioReport::new(
        3,
        "Raise SpamError with no matching SpamError handler. And we dont have a catch-all handler!",
    );
    writeln!(out, "{}. {}", report.number, report.title)?;

    let runs = Cell::new(0);
    let out = RefCell::new(out);
    let outcome = protect(
        || completion(&out, &runs),
        || -> Result<_, ScenarioError> {
            let inner = inner_region(&out)?;
            let outcome = Dispatch::new()
                .catch_all(|_| {
                    "\t-->Error: The inner exception killed the script... but I saved it!"
                        .to_string()
                })
                .run(inner)?;
            if let Outcome::Handled { value, .. } = &outcome {
                writeln!(out.borrow_mut(), "{value}")?;
            }
            Ok(outcome)
        },
    )?;

    match &outcome {
        Outcome::Completed(inner) => report.record(inner),
        handled => report.record(handled),
    }
    report.completion_runs = runs.get();
    Ok(report)
}

/// 4. A builtin conversion failure caught by its dedicated handler.
pub fn conversion_handler(out: &mut dyn Write) -> Result<ScenarioReport, ScenarioError> {
    let mut report = ScenarioReport::new(
        4,
        "Here we perform an operation that should fail with a builtin conversion error",
    );
    writeln!(out, "{}. {}", report.number, report.title)?;
    writeln!(out, "   We handle this by creating a handler for ConversionError")?;

    let outcome = Dispatch::new()
        .on(ErrorKind::Conversion, |f| format!("\t-->{}: {}", ErrorKind::Conversion, f))
        .catch_all(|_| "\t-->Error: Some error happened but it wasn't a ConversionError".to_string())
        .run(parse_int("abc").map(|_| ()).map_err(Failure::from))?;

    report.record(&outcome);
    write_outcome(out, outcome)?;
    Ok(report)
}

/// 5. The same conversion failure with only a catch-all, which reports the
/// failure's kind name.
pub fn catch_all_introspection(out: &mut dyn Write) -> Result<ScenarioReport, ScenarioError> {
    let mut report = ScenarioReport::new(5, "Unhandled builtin errors");
    writeln!(out, "{}. {}", report.number, report.title)?;
    writeln!(out, "   Catch-all exception handlers should tell us the name of the ")?;
    writeln!(out, "   exception, this is done through its ErrorKind")?;

    let outcome = Dispatch::new()
        .catch_all(|f| {
            format!(
                "\t-->Unexpected error: {}\n\t   ... Normally we would propagate it with `?` here",
                f.kind().name()
            )
        })
        .run(parse_int("abc").map(|_| ()).map_err(Failure::from))?;

    report.record(&outcome);
    write_outcome(out, outcome)?;
    Ok(report)
}

/// 6. Properties of a generic failure built from two positional arguments.
pub fn generic_properties(out: &mut dyn Write) -> Result<ScenarioReport, ScenarioError> {
    let mut report = ScenarioReport::new(6, "Generic error properties and methods");
    writeln!(out, "{}. {}", report.number, report.title)?;
    writeln!(
        out,
        "   It demonstrates the properties available on a generic error built from two values"
    )?;

    let outcome = Dispatch::new()
        .on(ErrorKind::Generic, |f| match f {
            Failure::Generic(inst) => {
                let mut lines = vec![
                    format!("\t {}", inst.type_name()),
                    format!("\t {}", inst.args_repr()),
                    format!("\t {inst}"),
                ];
                if let [x, y] = inst.args() {
                    lines.push(format!("\t x = {x}"));
                    lines.push(format!("\t y = {y}"));
                }
                lines.join("\n")
            }
            other => other.to_string(),
        })
        .run(raise(GenericError::new(["spam", "eggs"])))?;

    report.record(&outcome);
    if let Outcome::Handled { value, .. } = &outcome {
        writeln!(out, "{value}")?;
    }
    writeln!(out)?;
    Ok(report)
}

/// 7. The most basic failure: a generic error from a single string.
pub fn simple_generic(out: &mut dyn Write) -> Result<ScenarioReport, ScenarioError> {
    let mut report = ScenarioReport::new(
        7,
        "Most basic custom error, created from a single string argument",
    );
    writeln!(out, "{}. {}", report.number, report.title)?;

    let outcome = Dispatch::new()
        .on(ErrorKind::Generic, |f| format!("\t--->Error: {f}"))
        .run(raise(GenericError::new(["My simple exception occurred!"])))?;

    report.record(&outcome);
    write_outcome(out, outcome)?;
    Ok(report)
}

/// 8. Scenario 3 without the outer safety net.
///
/// The completion block still runs, then the failure is returned as
/// [`ScenarioError::Unhandled`].
pub fn unhandled(out: &mut dyn Write) -> Result<ScenarioReport, ScenarioError> {
    let mut report = ScenarioReport::new(
        8,
        "Raise SpamError with no matching handler and no safety net at all",
    );
    writeln!(out, "{}. {}", report.number, report.title)?;

    let runs = Cell::new(0);
    let out = RefCell::new(out);
    let inner = protect(|| completion(&out, &runs), || inner_region(&out))?;

    if let Err(failure) = &inner {
        tracing::warn!(
            kind = failure.kind().name(),
            completion_runs = runs.get(),
            "failure escaped every handler"
        );
    }
    report.record(&inner?);
    report.completion_runs = runs.get();
    Ok(report)
}

/// Runs scenarios 1-7 in order.
pub fn run_all(out: &mut dyn Write) -> Result<Vec<ScenarioReport>, ScenarioError> {
    let scenarios: [fn(&mut dyn Write) -> Result<ScenarioReport, ScenarioError>; 7] = [
        exact_match,
        catch_all_fallback,
        nested_safety_net,
        conversion_handler,
        catch_all_introspection,
        generic_properties,
        simple_generic,
    ];

    let mut reports = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let report = scenario(out)?;
        tracing::debug!(
            scenario = report.number,
            kind = ?report.kind,
            handled_by = ?report.handled_by,
            "scenario finished"
        );
        reports.push(report);
    }
    Ok(reports)
}
