mod helpers;

use std::collections::HashSet;

use helpers::{address, joined, miss, no_cookie};
use tfo_sieve_lib::family::{partition, select};
use tfo_sieve_lib::{AddressFamily, JoinedRecord, RunSet};

#[test]
fn test_partition_is_disjoint_and_complete() {
    let rows: Vec<JoinedRecord> = (0..120).map(|i| joined(&address(i), no_cookie(true))).collect();
    let (v4, v6) = partition(&rows);

    let v4_dips: HashSet<&str> = v4.iter().map(|r| r.dip.as_str()).collect();
    let v6_dips: HashSet<&str> = v6.iter().map(|r| r.dip.as_str()).collect();
    let all: HashSet<&str> = rows.iter().map(|r| r.dip.as_str()).collect();

    assert!(v4_dips.is_disjoint(&v6_dips));
    assert_eq!(v4_dips.union(&v6_dips).copied().collect::<HashSet<_>>(), all);
    assert_eq!(v6.len(), 40);
    assert!(v4.iter().all(|r| !r.dip.contains(':')));
}

#[test]
fn test_select_matches_partition() {
    let rows: Vec<JoinedRecord> = (0..30).map(|i| joined(&address(i), no_cookie(false))).collect();
    let (v4, v6) = partition(&rows);
    assert_eq!(select(&rows, AddressFamily::V4), v4);
    assert_eq!(select(&rows, AddressFamily::V6), v6);
}

#[test]
fn test_runset_family_view() {
    let runs = RunSet {
        joined: vec![joined("192.0.2.1", no_cookie(true)), joined("2001:db8::1", no_cookie(true))],
        misses: vec![miss("::ffff:192.0.2.9", true), miss("198.51.100.1", false)],
    };
    let v6 = runs.select_family(AddressFamily::V6);
    assert_eq!(v6.joined.len(), 1);
    assert_eq!(v6.misses[0].dip, "::ffff:192.0.2.9");

    let v4 = runs.select_family(AddressFamily::V4);
    assert_eq!(v4.joined[0].dip, "192.0.2.1");
    assert_eq!(v4.total() + v6.total(), runs.total());
}
