//! Line-oriented extractor for the storefront stats page.
//!
//! The page renders one `<tr>` per game, with the current and 24-hour
//! peak player counts in two identical spans followed by the game link.
//! A four-state machine scans the body line by line; unexpected markup
//! can only truncate the result or zero a field, never corrupt it.

use crate::domain::{GameInfo, Snapshot};
use chrono::Utc;

const ROW_MARKER: &str = r#"<tr class="player_count_row" style=""#;
const SPAN_START: &str = r#"<span class="currentServers">"#;
const SPAN_END: &str = "</span>";
const LINK_START: &str = r#"<a class="gameLink" href=""#;
const HREF_END: &str = r#"">"#;
const LINK_END: &str = "</a>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowState {
    SeekRow,
    ReadCurrent,
    ReadPeak,
    ReadLink,
}

/// Scans the page body and returns the snapshot, with `time` captured
/// before scanning begins. Rows appear in page order.
pub fn scrape_player_counts(body: &[u8]) -> Snapshot {
    let mut snapshot = Snapshot::new(Utc::now().timestamp());
    let text = String::from_utf8_lossy(body);

    let mut state = RowState::SeekRow;
    let mut game = GameInfo::default();

    for line in text.lines() {
        state = match state {
            RowState::SeekRow => {
                if line.contains(ROW_MARKER) {
                    game = GameInfo::default();
                    RowState::ReadCurrent
                } else {
                    RowState::SeekRow
                }
            }
            RowState::ReadCurrent => match span_number(line) {
                Some(value) => {
                    game.current = value.unwrap_or(0);
                    RowState::ReadPeak
                }
                None => RowState::ReadCurrent,
            },
            RowState::ReadPeak => match span_number(line) {
                Some(value) => {
                    game.peak = value.unwrap_or(0);
                    RowState::ReadLink
                }
                None => RowState::ReadPeak,
            },
            RowState::ReadLink => {
                if read_link(line, &mut game) {
                    snapshot.games.push(std::mem::take(&mut game));
                    RowState::SeekRow
                } else {
                    RowState::ReadLink
                }
            }
        };
    }

    snapshot
}

/// First span on the line, if any. The outer `Option` is the state
/// transition (the span start was seen); the inner one is the parsed
/// value, `None` when the closing tag is missing or the digits are
/// malformed. Commas are thousands separators and are stripped.
fn span_number(line: &str) -> Option<Option<u32>> {
    let start = line.find(SPAN_START)? + SPAN_START.len();
    let rest = &line[start..];
    let value = rest
        .find(SPAN_END)
        .and_then(|end| rest[..end].replace(',', "").parse().ok());
    Some(value)
}

/// Fills `url` and `name` from the first game link on the line. Returns
/// whether the record is complete. A link whose href terminator never
/// arrives on this line leaves the machine waiting for a later link,
/// carrying the counts already read; a missing `</a>` still completes
/// the record, with an empty name.
fn read_link(line: &str, game: &mut GameInfo) -> bool {
    let Some(start) = line.find(LINK_START) else {
        return false;
    };
    let rest = &line[start + LINK_START.len()..];

    let Some(href_end) = rest.find(HREF_END) else {
        return false;
    };
    game.url = rest[..href_end].to_string();

    let tail = &rest[href_end + HREF_END.len()..];
    if let Some(name_end) = tail.find(LINK_END) {
        game.name = tail[..name_end].to_string();
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games(body: &str) -> Vec<GameInfo> {
        scrape_player_counts(body.as_bytes()).games
    }

    fn game(name: &str, url: &str, current: u32, peak: u32) -> GameInfo {
        GameInfo {
            name: name.into(),
            url: url.into(),
            current,
            peak,
        }
    }

    #[test]
    fn extracts_a_clean_row() {
        let body = concat!(
            "<tr class=\"player_count_row\" style=\"background: none\">\n",
            "<span class=\"currentServers\">1,234</span>\n",
            "<span class=\"currentServers\">5,000</span>\n",
            "<a class=\"gameLink\" href=\"/app/42/FooGame/\">Foo Game</a>\n",
        );
        assert_eq!(games(body), vec![game("Foo Game", "/app/42/FooGame/", 1234, 5000)]);
    }

    #[test]
    fn unparsable_current_defaults_to_zero() {
        let body = concat!(
            "<tr class=\"player_count_row\" style=\"\">\n",
            "<span class=\"currentServers\">N/A</span>\n",
            "<span class=\"currentServers\">5,000</span>\n",
            "<a class=\"gameLink\" href=\"/app/42/FooGame/\">Foo Game</a>\n",
        );
        assert_eq!(games(body), vec![game("Foo Game", "/app/42/FooGame/", 0, 5000)]);
    }

    #[test]
    fn missing_span_end_still_advances() {
        let body = concat!(
            "<tr class=\"player_count_row\" style=\"\">\n",
            "<span class=\"currentServers\">1,234\n",
            "<span class=\"currentServers\">5,000</span>\n",
            "<a class=\"gameLink\" href=\"/app/42/FooGame/\">Foo Game</a>\n",
        );
        assert_eq!(games(body), vec![game("Foo Game", "/app/42/FooGame/", 0, 5000)]);
    }

    #[test]
    fn missing_href_terminator_drops_the_partial_link() {
        let body = concat!(
            "<tr class=\"player_count_row\" style=\"\">\n",
            "<span class=\"currentServers\">10</span>\n",
            "<span class=\"currentServers\">20</span>\n",
            "<a class=\"gameLink\" href=\"/app/7/Bar\n",
            "<a class=\"gameLink\" href=\"/app/9/Baz/\">Baz</a>\n",
        );
        // The counts read earlier carry over to the completing link.
        assert_eq!(games(body), vec![game("Baz", "/app/9/Baz/", 10, 20)]);
    }

    #[test]
    fn missing_anchor_close_appends_with_empty_name() {
        let body = concat!(
            "<tr class=\"player_count_row\" style=\"\">\n",
            "<span class=\"currentServers\">10</span>\n",
            "<span class=\"currentServers\">20</span>\n",
            "<a class=\"gameLink\" href=\"/app/7/Bar/\">Bar\n",
        );
        assert_eq!(games(body), vec![game("", "/app/7/Bar/", 10, 20)]);
    }

    #[test]
    fn rows_keep_page_order() {
        let body = concat!(
            "<tr class=\"player_count_row\" style=\"\">\n",
            "<span class=\"currentServers\">1</span>\n",
            "<span class=\"currentServers\">2</span>\n",
            "<a class=\"gameLink\" href=\"/a\">A</a>\n",
            "<tr class=\"player_count_row\" style=\"\">\n",
            "<span class=\"currentServers\">3</span>\n",
            "<span class=\"currentServers\">4</span>\n",
            "<a class=\"gameLink\" href=\"/b\">B</a>\n",
        );
        assert_eq!(
            games(body),
            vec![game("A", "/a", 1, 2), game("B", "/b", 3, 4)]
        );
    }

    #[test]
    fn markers_mixed_with_noise_are_still_found() {
        let body = concat!(
            "<html><head><title>Stats</title></head>\n",
            "<table>\n",
            "<tr class=\"player_count_row\" style=\"background: #fff\"><td>\n",
            "\t\t<span class=\"currentServers\">97,464</span>\n",
            "ignored line without any marker\n",
            "\t\t<span class=\"currentServers\">145,613</span>\n",
            "\t\t<a class=\"gameLink\" href=\"/app/570/\">Dota 2</a></td></tr>\n",
            "</table></html>\n",
        );
        assert_eq!(games(body), vec![game("Dota 2", "/app/570/", 97464, 145613)]);
    }

    #[test]
    fn first_occurrence_wins_on_a_line() {
        let body = concat!(
            "<tr class=\"player_count_row\" style=\"\">\n",
            "<span class=\"currentServers\">5</span><span class=\"currentServers\">999</span>\n",
            "<span class=\"currentServers\">9</span>\n",
            "<a class=\"gameLink\" href=\"/x\">X</a><a class=\"gameLink\" href=\"/y\">Y</a>\n",
        );
        assert_eq!(games(body), vec![game("X", "/x", 5, 9)]);
    }

    #[test]
    fn html_entities_pass_through_untouched() {
        let body = concat!(
            "<tr class=\"player_count_row\" style=\"\">\n",
            "<span class=\"currentServers\">7</span>\n",
            "<span class=\"currentServers\">8</span>\n",
            "<a class=\"gameLink\" href=\"/app/1/\">Tom &amp; Jerry</a>\n",
        );
        assert_eq!(games(body), vec![game("Tom &amp; Jerry", "/app/1/", 7, 8)]);
    }

    #[test]
    fn truncated_page_yields_no_partial_record() {
        let body = concat!(
            "<tr class=\"player_count_row\" style=\"\">\n",
            "<span class=\"currentServers\">1</span>\n",
        );
        assert!(games(body).is_empty());
    }

    #[test]
    fn empty_body_yields_empty_snapshot() {
        assert!(games("").is_empty());
    }

    #[test]
    fn snapshot_time_is_captured() {
        let before = chrono::Utc::now().timestamp();
        let snapshot = scrape_player_counts(b"");
        assert!(snapshot.time >= before);
    }
}
