//! Property tests for the event log.
//!
//! Random logs are generated from a small coordinate range so that
//! placements, removals, and chambers collide often enough to exercise
//! netting and adjacency.

use magnum_events::prelude::*;
use proptest::prelude::*;

fn coord_strategy() -> impl Strategy<Value = Coordinate> {
    (-3i64..=3, -3i64..=3).prop_map(|(x, y)| Coordinate::new(x, y))
}

fn event_strategy() -> impl Strategy<Value = Event> {
    (0..3usize, coord_strategy()).prop_map(|(k, at)| EventKind::ALL[k].at(at))
}

fn log_strategy() -> impl Strategy<Value = EventLog> {
    prop::collection::vec(event_strategy(), 0..60).prop_map(EventLog::from)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    /// Asking the same question twice gives the same answer.
    #[test]
    fn queries_are_idempotent(log in log_strategy(), at in coord_strategy(), k in 0..3usize) {
        let query = EventQuery::new(EventKind::ALL[k]).adjacent_to(at);
        let first: Vec<Event> = log.query(&query).copied().collect();
        let second: Vec<Event> = log.query(&query).copied().collect();
        prop_assert_eq!(first, second);

        let fields = [Field::X, Field::Y];
        let p1: Vec<_> = log.query_projected(&query, &fields).collect();
        let p2: Vec<_> = log.query_projected(&query, &fields).collect();
        prop_assert_eq!(p1, p2);
    }

    /// Query results are a subsequence of the log, in log order.
    #[test]
    fn query_results_keep_log_order(log in log_strategy(), k in 0..3usize) {
        let query = EventQuery::new(EventKind::ALL[k]);
        let expected: Vec<Event> = log
            .iter()
            .filter(|e| e.kind() == EventKind::ALL[k])
            .copied()
            .collect();
        let got: Vec<Event> = log.query(&query).copied().collect();
        prop_assert_eq!(got, expected);
    }

    /// Appending grows the log by one and leaves the prefix intact.
    #[test]
    fn append_only_grows(log in log_strategy(), event in event_strategy()) {
        let before = log.clone();
        let mut after = log;
        after.append(event);

        prop_assert_eq!(after.len(), before.len() + 1);
        prop_assert_eq!(&after.as_slice()[..before.len()], before.as_slice());
        prop_assert_eq!(after.as_slice().last(), Some(&event));
        prop_assert!(after.contains(&event));
    }

    /// Projection to (x, y) agrees with the event coordinates.
    #[test]
    fn projection_matches_coordinates(log in log_strategy(), at in coord_strategy()) {
        let query = EventQuery::new(EventKind::MinerPlaced).adjacent_to(at);
        let rows: Vec<Vec<i64>> = log.query_projected(&query, &[Field::X, Field::Y]).collect();
        let coords: Vec<Vec<i64>> = log
            .query(&query)
            .map(|e| vec![e.coordinate().x, e.coordinate().y])
            .collect();
        prop_assert_eq!(rows, coords);
    }

    /// Encoding and decoding a log yields the same events and hash.
    #[test]
    fn json_encoding_preserves_replay_order(log in log_strategy()) {
        let json = log.to_json().unwrap();
        let back = EventLog::from_json(&json).unwrap();
        prop_assert_eq!(back.state_hash(), log.state_hash());
        prop_assert_eq!(back, log);
    }
}
