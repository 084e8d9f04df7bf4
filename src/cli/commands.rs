use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_ROUTE: &str = "route";
pub const ARG_PAGE: &str = "page";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn new() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about("Administrative records client")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("REGISTRA_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .arg(
            Arg::new(ARG_ROUTE)
                .long("route")
                .help("Named route to open")
                .default_value("students"),
        )
        .arg(
            Arg::new(ARG_PAGE)
                .long("page")
                .help("Listing page to fetch when navigation proceeds")
                .value_parser(clap::value_parser!(u32))
                .default_value("1"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve() {
        let matches = new().get_matches_from(["registra"]);
        assert_eq!(
            matches.get_one::<String>(ARG_ROUTE).map(String::as_str),
            Some("students")
        );
        assert_eq!(matches.get_one::<u32>(ARG_PAGE).copied(), Some(1));
    }

    #[test]
    fn route_and_page_parse() {
        let matches = new().get_matches_from(["registra", "--route", "dashboard", "--page", "3"]);
        assert_eq!(
            matches.get_one::<String>(ARG_ROUTE).map(String::as_str),
            Some("dashboard")
        );
        assert_eq!(matches.get_one::<u32>(ARG_PAGE).copied(), Some(3));
    }
}
