//! Argument Parsing
//!
//! Builds the die set from the command line. Kept outside the protocol
//! core: configuration failures here abort before any game state exists.

use clap::Parser;

use crate::game::HostPolicy;

/// Example invocation shown under the generated help.
const EXAMPLE: &str = "Example:\n  fairdice 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3";

/// Provably-fair non-transitive dice game.
#[derive(Debug, Parser)]
#[command(name = "fairdice", version, about, after_help = EXAMPLE)]
pub struct Args {
    /// Die specifications, each exactly 6 comma-separated integers.
    /// At least 3 dice are required.
    #[arg(value_name = "DIE", required = true, num_args = 1..)]
    pub dice: Vec<String>,

    /// How the host selects its die.
    #[arg(long, value_enum, default_value = "best-average")]
    pub host_policy: HostPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_dice_and_default_policy() {
        let args =
            Args::try_parse_from(["fairdice", "1,2,3,4,5,6", "2,2,2,5,5,5", "3,3,3,3,3,9"])
                .unwrap();
        assert_eq!(args.dice.len(), 3);
        assert_eq!(args.host_policy, HostPolicy::BestAverage);
    }

    #[test]
    fn test_policy_flag() {
        let args = Args::try_parse_from([
            "fairdice",
            "--host-policy",
            "first-available",
            "1,2,3,4,5,6",
            "2,2,2,5,5,5",
            "3,3,3,3,3,9",
        ])
        .unwrap();
        assert_eq!(args.host_policy, HostPolicy::FirstAvailable);
    }

    #[test]
    fn test_requires_at_least_one_die_argument() {
        assert!(Args::try_parse_from(["fairdice"]).is_err());
    }
}
