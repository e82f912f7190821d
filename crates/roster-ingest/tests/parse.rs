use proptest::prelude::*;
use roster_ingest::parse_delimited;

proptest! {
    // Shape is preserved for any well-formed input: H headers in, H headers
    // out; R non-blank data lines in, R rows out, regardless of how ragged
    // the individual lines are.
    #[test]
    fn header_and_row_counts_are_preserved(
        headers in prop::collection::vec("[A-Za-z][A-Za-z0-9 _]{0,10}", 1..8),
        cells in prop::collection::vec(
            prop::collection::vec("[A-Za-z0-9@._-]{1,12}", 1..8),
            0..20,
        ),
    ) {
        let mut text = headers.join(",");
        for line in &cells {
            text.push('\n');
            text.push_str(&line.join(","));
        }
        let doc = parse_delimited(&text).expect("well-formed input parses");
        prop_assert_eq!(doc.headers.len(), headers.len());
        prop_assert_eq!(doc.rows.len(), cells.len());
    }

    #[test]
    fn every_row_answers_every_header(
        headers in prop::collection::vec("[a-z]{1,6}", 1..6),
        cells in prop::collection::vec(
            prop::collection::vec("[a-z0-9]{1,6}", 1..10),
            1..10,
        ),
    ) {
        let mut text = headers.join(",");
        for line in &cells {
            text.push('\n');
            text.push_str(&line.join(","));
        }
        let doc = parse_delimited(&text).expect("well-formed input parses");
        for row in &doc.rows {
            for header in &doc.headers {
                // Total lookup: short lines read as "".
                let _ = row.value(header);
                prop_assert!(row.get(header).is_some());
            }
        }
    }
}
