use crate::cli::actions::Action;
use crate::cli::commands;
use anyhow::Result;
use clap::ArgMatches;

pub fn handler(matches: &ArgMatches) -> Result<Action> {
    Ok(Action::Open {
        route: matches
            .get_one::<String>(commands::ARG_ROUTE)
            .map(String::to_string)
            .unwrap_or_else(|| "students".to_string()),
        page: matches
            .get_one::<u32>(commands::ARG_PAGE)
            .copied()
            .unwrap_or(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_action_carries_route_and_page() -> Result<()> {
        let matches = commands::new().get_matches_from(["registra", "--route", "list"]);
        let Action::Open { route, page } = handler(&matches)?;
        assert_eq!(route, "list");
        assert_eq!(page, 1);
        Ok(())
    }
}
