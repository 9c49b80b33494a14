use geotrail_timeline_core::{parse_stored_events_json, ConfigError, Timeline};

/// it should parse and load the packaged outbreak timeline
#[test]
fn fixture_parses_and_loads() {
    let json = geotrail_test_fixtures::timelines::json("west-africa-outbreak").unwrap();
    let events = parse_stored_events_json(&json).unwrap();
    assert_eq!(events.len(), 9);

    let timeline = Timeline::load(events).unwrap();
    assert_eq!(timeline.event_at(0).unwrap().place, "Guinea");
    assert_eq!(timeline.event_at(8).unwrap().place, "Mali");
    assert!(timeline
        .events()
        .windows(2)
        .all(|w| w[0].date <= w[1].date));

    // Every source resolves to an earlier event.
    for (i, event) in timeline.events().iter().enumerate() {
        if let Some(source) = &event.source {
            assert!(timeline.events()[..i].iter().any(|e| e.place == *source));
        }
    }
}

/// it should reject malformed dates at parse time
#[test]
fn malformed_date_is_fatal() {
    let json = r#"[{
        "date": "December 6, 2013",
        "place": "Guinea",
        "lon": -9.18,
        "lat": 9.344,
        "extent": { "center": { "x": -12.5, "y": 8.4 }, "zoom": 3.64, "duration": 500 }
    }]"#;
    let err = parse_stored_events_json(json).unwrap_err();
    assert!(matches!(err, ConfigError::UnparseableDate { raw } if raw == "December 6, 2013"));
}

/// it should reject records with missing coordinates
#[test]
fn missing_coordinate_is_fatal() {
    let json = r#"[{
        "date": "2013-12-06",
        "place": "Guinea",
        "extent": { "center": { "x": -12.5, "y": 8.4 }, "zoom": 3.64, "duration": 500 }
    }]"#;
    let err = parse_stored_events_json(json).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

/// it should reject a source naming no earlier event
#[test]
fn unknown_source_is_fatal() {
    let json = r#"[
        {
            "date": "2013-12-06",
            "place": "Guinea",
            "source": "Atlantis",
            "lon": -9.18,
            "lat": 9.344,
            "extent": { "center": { "x": -12.5, "y": 8.4 }, "zoom": 3.64, "duration": 500 }
        },
        {
            "date": "2014-03-01",
            "place": "Liberia",
            "lon": -10.8,
            "lat": 6.317,
            "extent": { "center": { "x": -12.5, "y": 8.4 }, "zoom": 3.64, "duration": 0 }
        }
    ]"#;
    let events = parse_stored_events_json(json).unwrap();
    let err = Timeline::load(events).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnknownSource { place, source } if place == "Guinea" && source == "Atlantis"
    ));
}

/// it should list the fixture in the manifest
#[test]
fn manifest_knows_the_timeline() {
    let keys = geotrail_test_fixtures::timelines::keys();
    assert!(keys.contains(&"west-africa-outbreak".to_string()));
    assert!(geotrail_test_fixtures::timelines::json("no-such-timeline").is_err());
}
