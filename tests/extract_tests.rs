use scraper::Html;
use ticketrecon::config::{ListingConfig, RowLayout};
use ticketrecon::core::extract::{ExtractionSkipped, RowExtractor};

mod common;
use common::LISTING_HTML;

fn labelled() -> RowExtractor {
    RowExtractor::new(&ListingConfig::default()).expect("default listing config")
}

fn page(body: &str) -> Html {
    Html::parse_document(&format!(
        "<html><body><table><tbody>{body}</tbody></table></body></html>"
    ))
}

#[test]
fn test_listing_rows_in_document_order() {
    let results = labelled().extract_page(&Html::parse_document(LISTING_HTML));
    assert_eq!(results.len(), 4);

    let events: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(events.len(), 2);

    let first = events[0];
    assert_eq!(first.title, "Show A");
    assert_eq!(first.time, "20:30");
    assert_eq!(first.date, "01/05/2025");
    assert_eq!(first.location, "היכל התרבות");
    assert_eq!(first.sold, 12);
    assert_eq!(first.available, 37);

    assert_eq!(events[1].title, "ערב ג'אז");
    assert_eq!(events[1].date, "02/05/25");
}

#[test]
fn test_short_rows_yield_no_event() {
    let ex = labelled();
    let doc = page("<tr><td>מאי</td></tr><tr><td>1</td><td><a aria-label=\"X\">X</a></td></tr>");

    for result in ex.extract_page(&doc) {
        let err = result.expect_err("short row must be skipped");
        assert!(matches!(err, ExtractionSkipped::TooFewCells { needed: 3, .. }));
        assert!(err.is_structural());
    }
}

#[test]
fn test_missing_title_is_skipped_not_raised() {
    let results = labelled().extract_page(&Html::parse_document(LISTING_HTML));

    let last = results.last().expect("four rows");
    let err = last.as_ref().expect_err("row without label");
    assert!(matches!(err, ExtractionSkipped::MissingTitle(_)));
    assert!(!err.is_structural());
}

#[test]
fn test_blank_title_attribute_is_missing_title() {
    let doc = page(r#"<tr><td>1</td><td><a aria-label="  ">x</a></td><td></td></tr>"#);
    let results = labelled().extract_page(&doc);
    assert!(matches!(results[0], Err(ExtractionSkipped::MissingTitle(_))));
}

#[test]
fn test_sold_element_absent_means_zero() {
    let doc = page(
        r#"<tr><td>1</td><td><a aria-label="Show B">Show B</a></td><td>נותרו: 5</td></tr>"#,
    );
    let row = labelled().extract_page(&doc).remove(0).expect("valid row");
    assert_eq!(row.sold, 0);
    assert_eq!(row.available, 5);
}

#[test]
fn test_unparseable_counts_are_zero() {
    let doc = page(
        r#"<tr><td>1</td><td><a aria-label="Show C">Show C</a></td>
           <td><span class="sold-count">אזל</span> נותרו: אין</td></tr>"#,
    );
    let row = labelled().extract_page(&doc).remove(0).expect("valid row");
    assert_eq!(row.sold, 0);
    assert_eq!(row.available, 0);
}

#[test]
fn test_available_label_with_thousands() {
    let results = labelled().extract_page(&Html::parse_document(LISTING_HTML));
    let jazz = results[2].as_ref().expect("jazz row");
    assert_eq!(jazz.sold, 0);
    assert_eq!(jazz.available, 1200);
}

#[test]
fn test_missing_fragments_are_empty() {
    let doc = page(
        r#"<tr><td>1</td><td><a aria-label="Show D">Show D</a>
           <div class="event-meta"><span>19:00</span></div></td><td></td></tr>"#,
    );
    let row = labelled().extract_page(&doc).remove(0).expect("valid row");
    assert_eq!(row.time, "19:00");
    assert_eq!(row.date, "");
    assert_eq!(row.location, "");
}

#[test]
fn test_custom_available_label() {
    let cfg = ListingConfig {
        available_label: "Left".to_string(),
        ..ListingConfig::default()
    };
    let doc = page(r#"<tr><td>1</td><td><a aria-label="Show E">E</a></td><td>Left 9</td></tr>"#);
    let row = RowExtractor::new(&cfg)
        .expect("config")
        .extract_page(&doc)
        .remove(0)
        .expect("valid row");
    assert_eq!(row.available, 9);
}

#[test]
fn test_invalid_selector_is_a_configuration_error() {
    let cfg = ListingConfig {
        row_selector: "tr[[".to_string(),
        ..ListingConfig::default()
    };
    assert!(RowExtractor::new(&cfg).is_err());
}

#[test]
fn test_columns_layout() {
    let cfg = ListingConfig {
        layout: RowLayout::Columns,
        ..ListingConfig::default()
    };
    let ex = RowExtractor::new(&cfg).expect("columns config");

    let doc = page(
        r#"<tr><td>1</td><td>Show A</td><td>12 / 300</td><td>288</td><td>01.05.25 20:30</td><td>היכל התרבות</td></tr>
           <tr><td>2</td><td>Show B</td><td>3</td></tr>
           <tr><td>3</td><td> </td><td>1</td><td>2</td><td>01/05/2025</td><td>x</td></tr>"#,
    );
    let results = ex.extract_page(&doc);

    let row = results[0].as_ref().expect("full row");
    assert_eq!(row.title, "Show A");
    assert_eq!(row.sold, 12);
    assert_eq!(row.available, 288);
    assert_eq!(row.date, "01/05/25");
    assert_eq!(row.time, "20:30");
    assert_eq!(row.location, "היכל התרבות");

    assert!(matches!(
        results[1],
        Err(ExtractionSkipped::TooFewCells { found: 3, needed: 6 })
    ));
    assert!(matches!(results[2], Err(ExtractionSkipped::MissingTitle(_))));
}

#[test]
fn test_tagging_normalizes_date_and_sets_user() {
    let doc = page(
        r#"<tr><td>1</td><td><a aria-label="Show F">F</a>
           <div class="event-meta"><span>20:00</span><span>3.6.2025</span></div></td><td></td></tr>"#,
    );
    let event = labelled()
        .extract_page(&doc)
        .remove(0)
        .expect("valid row")
        .tagged("a@x.com");
    assert_eq!(event.date, "3/6/2025");
    assert_eq!(event.source_user, "a@x.com");
}
