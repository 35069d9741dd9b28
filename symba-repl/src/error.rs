use ariadne::Source;
use symba_error::Error;

/// Report the given error to stderr, highlighted against the input it came from.
///
/// The `ariadne` crate's `Report` type does not have a `Display` implementation, so we can only
/// use its `eprint` method to print to stderr.
pub fn report_to_stderr(err: &Error, input: &str) {
    let report = err.build_report("input");
    report.eprint(("input", Source::from(input))).unwrap();
}
