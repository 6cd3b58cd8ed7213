//! Status line and exit code for the monitoring scheduler.

use rmqcheck_core::Verdict;

/// `"{LABEL}: {message}"`, plus `" | {perfdata}"` when asked for and available.
pub fn render(verdict: &Verdict, with_perfdata: bool) -> String {
    let mut line = format!("{}: {}", verdict.severity.label(), verdict.message.trim_start());
    if with_perfdata {
        if let Some(perfdata) = verdict.perfdata_line() {
            line.push_str(" | ");
            line.push_str(&perfdata);
        }
    }
    line
}

/// Print the status line on stdout and exit with the verdict's code.
pub fn emit(verdict: &Verdict, with_perfdata: bool) -> ! {
    println!("{}", render(verdict, with_perfdata));
    std::process::exit(verdict.severity.exit_code())
}
