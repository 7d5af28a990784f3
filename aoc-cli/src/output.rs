//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::io::{self, Write};
use std::time::Instant;

/// Output formatter for solver results
pub struct OutputFormatter<W> {
    out: W,
    quiet: bool,
    start_time: Instant,
}

impl<W: Write> OutputFormatter<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Self {
            out,
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Format and write a single result
    pub fn print_result(&mut self, result: &SolverResult) -> io::Result<()> {
        if self.quiet {
            match &result.answer {
                Ok(answer) => writeln!(self.out, "{}", answer),
                Err(e) => writeln!(self.out, "Error: {}", e),
            }
        } else {
            self.print_full(result)
        }
    }

    fn print_full(&mut self, result: &SolverResult) -> io::Result<()> {
        let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

        match &result.answer {
            Ok(answer) => {
                let parse_timing = result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                writeln!(
                    self.out,
                    "{}: {} ({}solve: {})",
                    prefix,
                    answer,
                    parse_timing,
                    format_duration(result.solve_duration)
                )
            }
            Err(e) => writeln!(self.out, "{}: Error - {}", prefix, e),
        }
    }

    /// Write a summary after all results
    ///
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&mut self, results: &[SolverResult]) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let total = results.len();
        let successes = results.iter().filter(|r| r.answer.is_ok()).count();
        let failures = total - successes;

        let total_parse_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .filter_map(|r| r.parse_duration)
            .sum();
        let total_solve_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .sum();
        let total_compute_time = total_parse_time + total_solve_time;
        let elapsed_time = self.start_time.elapsed();

        writeln!(self.out)?;
        writeln!(self.out, "--- Summary ---")?;
        writeln!(self.out, "Solvers: {} solved, {} failed", successes, failures)?;
        writeln!(self.out, "Total parse time: {}", format_duration(total_parse_time))?;
        writeln!(self.out, "Total solve time: {}", format_duration(total_solve_time))?;
        writeln!(
            self.out,
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        )?;
        if !elapsed_time.is_zero() {
            let total_compute_secs =
                total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_compute_secs / elapsed_time.as_secs_f64();
            writeln!(self.out, "Speedup factor: {:.2}x", speedup)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
