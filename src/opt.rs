use clap::{ArgAction, Parser};

/// Serve the directory containing this executable on port 8000, allowing any origin
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Options {
    /// Logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Options::command().debug_assert();
    }

    #[test]
    fn verbosity_counts() {
        let opts = Options::try_parse_from(["corsed", "-vv"]).unwrap();
        assert_eq!(opts.verbose, 2);
        assert!(Options::try_parse_from(["corsed", "--port", "9000"]).is_err());
    }
}
