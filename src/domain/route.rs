use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerTab {
    #[default]
    Board,
    Performance,
    Planning,
}

impl TrackerTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerTab::Board => "board",
            TrackerTab::Performance => "performance",
            TrackerTab::Planning => "planning",
        }
    }
}

impl FromStr for TrackerTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "board" => Ok(TrackerTab::Board),
            "performance" => Ok(TrackerTab::Performance),
            "planning" => Ok(TrackerTab::Planning),
            _ => Err(format!("Invalid tab: {}", s)),
        }
    }
}

/// Pages of the hub, addressed by their router path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Route {
    #[default]
    Landing,
    Review,
    Issues(TrackerTab),
}

impl Route {
    pub fn board() -> Self {
        Route::Issues(TrackerTab::Board)
    }

    pub fn shows_board(&self) -> bool {
        matches!(self, Route::Issues(TrackerTab::Board))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Landing => write!(f, "/"),
            Route::Review => write!(f, "/review"),
            Route::Issues(TrackerTab::Board) => write!(f, "/issues"),
            Route::Issues(tab) => write!(f, "/issues?tab={}", tab.as_str()),
        }
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, query) = match s.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (s, None),
        };

        match (path, query) {
            ("/", None) => Ok(Route::Landing),
            ("/review", None) => Ok(Route::Review),
            ("/issues", None) => Ok(Route::board()),
            ("/issues", Some(query)) => {
                let tab = query
                    .split('&')
                    .find_map(|pair| pair.strip_prefix("tab="))
                    .map(str::parse::<TrackerTab>)
                    .transpose()?
                    .unwrap_or_default();
                Ok(Route::Issues(tab))
            }
            _ => Err(format!("Unknown route: {}", s)),
        }
    }
}

impl TryFrom<String> for Route {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!("/".parse::<Route>(), Ok(Route::Landing));
        assert_eq!("/review".parse::<Route>(), Ok(Route::Review));
        assert_eq!("/issues".parse::<Route>(), Ok(Route::board()));
        assert_eq!(
            "/issues?tab=performance".parse::<Route>(),
            Ok(Route::Issues(TrackerTab::Performance))
        );
    }

    #[test]
    fn test_reject_unknown_routes() {
        assert!("/settings".parse::<Route>().is_err());
        assert!("/issues?tab=roadmap".parse::<Route>().is_err());
    }

    #[test]
    fn test_display_round_trips_tabs() {
        let route = Route::Issues(TrackerTab::Planning);
        assert_eq!(route.to_string(), "/issues?tab=planning");
        assert_eq!(Route::board().to_string(), "/issues");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Route::Review).unwrap();
        assert_eq!(json, "\"/review\"");
        let parsed: Route = serde_json::from_str("\"/issues?tab=board\"").unwrap();
        assert!(parsed.shows_board());
    }
}
