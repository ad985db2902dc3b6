//! In-memory search over an already fetched episode list.

use crate::models::Episode;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new("<[^>]+>").unwrap();
}

/// `SxxEyy` code for a season/number pair, zero padded to two digits.
pub fn episode_code(season: u32, number: u32) -> String {
    format!("S{:02}E{:02}", season, number)
}

/// Plain text of a summary fragment. Summaries arrive as small HTML
/// snippets (`<p>...</p>`) and may be absent entirely.
pub fn summary_text(summary: Option<&str>) -> String {
    match summary {
        Some(html) => HTML_TAG.replace_all(html, "").trim().to_string(),
        None => String::new(),
    }
}

/// Episodes matching `query` against title, summary text or episode code,
/// case insensitive. An empty or whitespace query matches everything.
pub fn filter_episodes<'a>(episodes: &'a [Episode], query: &str) -> Vec<&'a Episode> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return episodes.iter().collect();
    }
    episodes
        .iter()
        .filter(|episode| matches(episode, &query))
        .collect()
}

/// Single-episode selection by id.
pub fn find_episode(episodes: &[Episode], id: u64) -> Option<&Episode> {
    episodes.iter().find(|episode| *episode.id() == id)
}

fn matches(episode: &Episode, query: &str) -> bool {
    let title = episode.name().as_deref().unwrap_or("").to_lowercase();
    let summary = summary_text(episode.summary().as_deref()).to_lowercase();
    let code = episode.code().to_lowercase();

    title.contains(query) || summary.contains(query) || code.contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn episode(id: u64, season: u32, number: u32, name: &str, summary: Option<&str>) -> Episode {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "season": season,
            "number": number,
            "summary": summary,
        }))
        .unwrap()
    }

    fn sample() -> Vec<Episode> {
        vec![
            episode(1, 1, 1, "Pilot", Some("<p>A plane crashes on an island.</p>")),
            episode(2, 1, 2, "Tabula Rasa", Some("<p>Jack tends to the <b>wounded</b>.</p>")),
            episode(3, 2, 1, "Man of Science", None),
        ]
    }

    #[test]
    fn codes_are_zero_padded() {
        assert_eq!(episode_code(1, 2), "S01E02");
        assert_eq!(episode_code(12, 34), "S12E34");
    }

    #[test]
    fn summaries_lose_their_markup() {
        assert_eq!(
            summary_text(Some("<p>Jack tends to the <b>wounded</b>.</p>")),
            "Jack tends to the wounded."
        );
        assert_eq!(summary_text(None), "");
    }

    #[test]
    fn empty_queries_match_everything() {
        let episodes = sample();
        assert_eq!(filter_episodes(&episodes, "").len(), 3);
        assert_eq!(filter_episodes(&episodes, "   ").len(), 3);
    }

    #[test]
    fn queries_match_title_summary_and_code() {
        let episodes = sample();

        let by_title = filter_episodes(&episodes, "PILOT");
        assert_eq!(by_title.len(), 1);
        assert_eq!(*by_title[0].id(), 1);

        let by_summary = filter_episodes(&episodes, "wounded");
        assert_eq!(by_summary.len(), 1);
        assert_eq!(*by_summary[0].id(), 2);

        let by_code = filter_episodes(&episodes, "s02e01");
        assert_eq!(by_code.len(), 1);
        assert_eq!(*by_code[0].id(), 3);

        assert!(filter_episodes(&episodes, "smoke monster").is_empty());
    }

    #[test]
    fn selection_is_by_id() {
        let episodes = sample();
        let found = find_episode(&episodes, 2).unwrap();
        assert_eq!(found.display_title(), "S01E02 - Tabula Rasa");
        assert!(find_episode(&episodes, 99).is_none());
    }

    #[test]
    fn missing_names_fall_back_to_untitled() {
        let nameless: Episode = serde_json::from_value(json!({
            "id": 4,
            "season": 3,
            "number": 7,
        }))
        .unwrap();
        assert_eq!(nameless.display_title(), "S03E07 - Untitled");
    }
}
