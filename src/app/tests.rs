use super::*;
use crate::api::{RecKind, Track};

fn t(id: i64, title: &str) -> Track {
    Track {
        id,
        title: title.into(),
        artist: "artist".into(),
        album: None,
        genre: None,
        duration: None,
        score: None,
        avg_rating: None,
    }
}

#[test]
fn empty_search_results_report_no_results() {
    let mut app = App::new(RecKind::Hybrid);
    // Before any request there is nothing to say.
    assert!(!app.no_results());

    app.set_search_results("xyzzy".into(), Vec::new());
    assert!(app.no_results());
    assert!(!app.has_results());

    app.set_search_results("miles".into(), vec![t(1, "So What")]);
    assert!(!app.no_results());
}

#[test]
fn setting_results_resets_the_selection() {
    let mut app = App::new(RecKind::Hybrid);
    app.set_search_results("a".into(), vec![t(1, "x"), t(2, "y"), t(3, "z")]);
    app.select_last();
    assert_eq!(app.selected, 2);

    app.set_recommendations(RecKind::Popular, vec![t(4, "w")]);
    assert_eq!(app.selected, 0);
    assert!(app.showing_recommendations());
}

#[test]
fn selection_wraps_both_ways() {
    let mut app = App::new(RecKind::Hybrid);
    app.set_search_results("a".into(), vec![t(1, "x"), t(2, "y"), t(3, "z")]);

    app.select_prev();
    assert_eq!(app.selected, 2);
    app.select_next();
    assert_eq!(app.selected, 0);

    // Wrapping on an empty list is a no-op rather than a panic.
    app.set_search_results("b".into(), Vec::new());
    app.select_next();
    app.select_prev();
    assert_eq!(app.selected, 0);
    assert!(app.selected_track().is_none());
}

#[test]
fn apply_rating_updates_matching_tracks_in_place() {
    let mut app = App::new(RecKind::Hybrid);
    app.set_recommendations(RecKind::Hybrid, vec![t(1, "x"), t(2, "y")]);

    app.apply_rating(2, 4.5);
    assert_eq!(app.results[0].avg_rating, None);
    assert_eq!(app.results[1].avg_rating, Some(4.5));

    // Unknown ids change nothing.
    app.apply_rating(99, 1.0);
    assert_eq!(app.results[0].avg_rating, None);
}

#[test]
fn rec_kind_cycles_through_all_strategies_and_back() {
    let mut app = App::new(RecKind::Hybrid);
    let mut seen = vec![app.rec_kind];
    for _ in 0..5 {
        seen.push(app.cycle_rec_kind());
    }
    assert_eq!(app.cycle_rec_kind(), RecKind::Hybrid);
    seen.sort_by_key(|k| k.as_str());
    seen.dedup();
    assert_eq!(seen.len(), 6);
}

#[test]
fn search_input_editing() {
    let mut app = App::new(RecKind::Hybrid);
    app.enter_search_mode();
    assert!(app.search_mode);

    for c in "abc".chars() {
        app.push_search_char(c);
    }
    assert_eq!(app.search_input, "abc");
    app.pop_search_char();
    assert_eq!(app.search_input, "ab");

    app.exit_search_mode();
    assert!(!app.search_mode);
    // The query survives leaving search mode...
    assert_eq!(app.search_input, "ab");

    // ...but not clearing it.
    app.clear_search();
    assert_eq!(app.search_input, "");
}

#[test]
fn loading_clears_when_recommendations_arrive() {
    let mut app = App::new(RecKind::Hybrid);
    app.loading = true;
    app.set_recommendations(RecKind::Hybrid, Vec::new());
    assert!(!app.loading);
    assert!(app.no_results());
}
