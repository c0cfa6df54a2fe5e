//! Rack-unit position token parsing (PRD-03).
//!
//! Server positions are stored as free-form tokens: a single unit (`"U12"`)
//! or an inclusive range (`"U12-U14"`). Parsing is deliberately forgiving —
//! inventory imported from spreadsheets carries malformed tokens, and a
//! server whose position cannot be read must still count against capacity.

/// Default rack height in units when the height field is missing or unreadable.
pub const DEFAULT_RACK_UNITS: u32 = 42;

/// Extract the unit index from a `U<digits>` token.
///
/// Scans for the first `U` and reads the digits that follow. Returns 0 for
/// an empty or unparseable token; units are 1-based, so 0 never collides
/// with a real slot.
pub fn parse_unit(token: &str) -> u32 {
    let Some(idx) = token.find('U') else {
        return 0;
    };
    let digits: String = token[idx + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Parse a position token into an inclusive `(start, end)` unit range.
///
/// A token containing `-` is split into two sub-tokens; anything else maps
/// to `(unit, unit)`. An empty or unparseable token yields `(0, 0)`.
pub fn parse_range(position: &str) -> (u32, u32) {
    if position.is_empty() {
        return (0, 0);
    }
    match position.split_once('-') {
        Some((start, end)) => (parse_unit(start), parse_unit(end)),
        None => {
            let unit = parse_unit(position);
            (unit, unit)
        }
    }
}

/// Number of rack units a server at `position` consumes.
///
/// A missing or malformed position (including an inverted range) still
/// consumes one unit — unaccounted servers must never report zero footprint.
pub fn units_occupied(position: &str) -> u32 {
    let (start, end) = parse_range(position);
    if end >= start {
        (end - start + 1).max(1)
    } else {
        1
    }
}

/// Parse a rack height token such as `"42U"` into a unit count.
///
/// Falls back to [`DEFAULT_RACK_UNITS`] when the token is empty or carries
/// no number.
pub fn parse_height(height: &str) -> u32 {
    height
        .trim()
        .trim_start_matches('U')
        .trim_end_matches('U')
        .parse()
        .unwrap_or(DEFAULT_RACK_UNITS)
}

/// Ordering key for listing servers top-of-rack first: the start unit of
/// the parsed range (0 for servers without a readable position).
pub fn sort_key(position: &str) -> u32 {
    parse_range(position).0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- parse_unit --

    #[test]
    fn parses_single_unit_token() {
        assert_eq!(parse_unit("U12"), 12);
    }

    #[test]
    fn parses_unit_with_surrounding_noise() {
        assert_eq!(parse_unit(" U7 "), 7);
    }

    #[test]
    fn empty_token_is_zero() {
        assert_eq!(parse_unit(""), 0);
    }

    #[test]
    fn token_without_marker_is_zero() {
        assert_eq!(parse_unit("12"), 0);
    }

    #[test]
    fn marker_without_digits_is_zero() {
        assert_eq!(parse_unit("U"), 0);
    }

    // -- parse_range --

    #[test]
    fn range_token_splits_on_separator() {
        assert_eq!(parse_range("U12-U14"), (12, 14));
    }

    #[test]
    fn single_token_collapses_to_point_range() {
        assert_eq!(parse_range("U5"), (5, 5));
    }

    #[test]
    fn empty_position_is_zero_range() {
        assert_eq!(parse_range(""), (0, 0));
    }

    // -- units_occupied --

    #[test]
    fn three_unit_range_occupies_three() {
        assert_eq!(units_occupied("U5-U7"), 3);
    }

    #[test]
    fn single_unit_occupies_one() {
        assert_eq!(units_occupied("U12"), 1);
    }

    #[test]
    fn empty_position_still_occupies_one() {
        assert_eq!(units_occupied(""), 1);
    }

    #[test]
    fn garbage_position_still_occupies_one() {
        assert_eq!(units_occupied("top shelf"), 1);
    }

    #[test]
    fn inverted_range_clamps_to_one() {
        assert_eq!(units_occupied("U14-U12"), 1);
    }

    // -- parse_height --

    #[test]
    fn standard_height_token() {
        assert_eq!(parse_height("42U"), 42);
    }

    #[test]
    fn nonstandard_height_token() {
        assert_eq!(parse_height("48U"), 48);
    }

    #[test]
    fn empty_height_falls_back_to_default() {
        assert_eq!(parse_height(""), DEFAULT_RACK_UNITS);
    }

    #[test]
    fn unreadable_height_falls_back_to_default() {
        assert_eq!(parse_height("tall"), DEFAULT_RACK_UNITS);
    }

    // -- sort_key --

    #[test]
    fn sort_key_uses_range_start() {
        assert_eq!(sort_key("U12-U14"), 12);
        assert_eq!(sort_key("U3"), 3);
        assert_eq!(sort_key(""), 0);
    }

    #[test]
    fn sort_key_orders_servers_by_position() {
        let mut positions = vec!["U30", "U2-U4", "", "U12"];
        positions.sort_by_key(|p| sort_key(p));
        assert_eq!(positions, vec!["", "U2-U4", "U12", "U30"]);
    }
}
