//! Check command - try a pattern against file names without any config

use landing_pattern::{CompiledMatcher, MatchOutcome};
use tracing::debug;

#[derive(Debug)]
pub struct CheckArgs {
    pub pattern: String,
    pub table: String,
    pub names: Vec<String>,
}

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let matcher = CompiledMatcher::compile(&args.pattern, &args.table)?;
    debug!(highest = %matcher.highest_field(), "Checking {} names", args.names.len());

    let mut errors = 0;
    for name in &args.names {
        let outcome = matcher.match_name(name);
        if matches!(outcome, MatchOutcome::PatternError(_)) {
            errors += 1;
        }
        println!("{}\t{}", name, describe(&outcome));
    }

    if errors > 0 {
        anyhow::bail!("{} of {} names hit a pattern error", errors, args.names.len());
    }
    Ok(())
}

/// One-line rendering of an outcome
pub fn describe(outcome: &MatchOutcome) -> String {
    match outcome {
        MatchOutcome::Match(dirs) => format!("match {}", dirs.join("/")),
        MatchOutcome::NoMatch => "no-match".to_string(),
        MatchOutcome::PatternError(err) => format!("error {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_each_outcome() {
        let matcher = CompiledMatcher::compile("{table}_{yyyy}_{yyyyMM}", "t").unwrap();
        assert_eq!(describe(&matcher.match_name("t_2014_201401")), "match 2014/01");
        assert_eq!(describe(&matcher.match_name("t_2014")), "no-match");
        assert!(describe(&matcher.match_name("t_2013_201401")).starts_with("error "));
    }

    #[test]
    fn pattern_errors_fail_the_command() {
        let args = CheckArgs {
            pattern: "{table}_{yyyy}_{yyyyMM}".to_string(),
            table: "t".to_string(),
            names: vec!["t_2014_201401".to_string(), "t_2013_201401".to_string()],
        };
        assert!(run(args).is_err());
    }

    #[test]
    fn bad_pattern_fails_the_command() {
        let args = CheckArgs {
            pattern: "{table}_{dd}".to_string(),
            table: "t".to_string(),
            names: vec!["t_01".to_string()],
        };
        assert!(run(args).is_err());
    }
}
