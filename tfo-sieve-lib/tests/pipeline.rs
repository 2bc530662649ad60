mod helpers;

use std::collections::HashSet;
use std::io::Write;

use helpers::{address, Lcg, TestResult};
use tempfile::NamedTempFile;
use tfo_sieve_lib::{load_runs, rejoin, Record, RecordSource};

fn line(dip: &str, column: &str, value: i64, connstate: bool) -> String {
    format!(
        r#"{{"dip": "{dip}", "{column}": {value}, "connstate": {connstate}, "host": "h", "rank": 3, "fwd_rst": false, "rev_rst": false, "tfo_seq": 1, "tfo_ack": 2, "tfo_dlen": 0, "tfo_synclen": 8, "tfo_synkind": 34, "tfo_ackclen": 0, "tfo_ackkind": 0}}"#
    )
}

#[test]
fn test_join_completeness_on_generated_runs() {
    for seed in [3u64, 17, 2024] {
        let mut rng = Lcg::new(seed);
        let mut records = Vec::new();
        let mut baseline_dips = HashSet::new();
        for i in 0..400 {
            let dip = address(i);
            let in_baseline = rng.pick(&[true, true, true, false]);
            let in_experimental = rng.flag();
            if in_baseline {
                baseline_dips.insert(dip.clone());
                records.push(line(&dip, "config", 0, rng.flag()));
            }
            if in_experimental {
                records.push(line(&dip, "config", 1, rng.flag()));
            }
        }
        let decoded: Vec<Record> =
            RecordSource::new(std::io::Cursor::new(records.join("\n"))).collect();
        let set = rejoin(decoded, "config");

        assert_eq!(set.joined.len() + set.misses.len(), baseline_dips.len());
        let mut seen = HashSet::new();
        for dip in set.joined.iter().map(|r| &r.dip).chain(set.misses.iter().map(|r| &r.dip)) {
            assert!(seen.insert(dip.clone()), "{dip} appears twice");
            assert!(baseline_dips.contains(dip));
        }
    }
}

#[test]
fn test_load_runs_from_files() -> TestResult<()> {
    let mut first = NamedTempFile::new()?;
    writeln!(first, "{}", line("192.0.2.1", "tfostate", 0, true))?;
    writeln!(first, "{}", line("192.0.2.1", "tfostate", 1, true))?;
    writeln!(first, "{{ this line is broken")?;
    writeln!(first, "{}", line("192.0.2.2", "tfostate", 0, false))?;

    let mut second = NamedTempFile::new()?;
    writeln!(second, "{}", line("192.0.2.1", "tfostate", 0, false))?;
    writeln!(second, "{}", line("2001:db8::7", "tfostate", 0, true))?;
    writeln!(second, "{}", line("2001:db8::7", "tfostate", 1, false))?;

    let runs = load_runs(&[first.path(), second.path()], "tfostate")?;
    let joined: Vec<&str> = runs.joined.iter().map(|r| r.dip.as_str()).collect();
    let misses: Vec<&str> = runs.misses.iter().map(|r| r.dip.as_str()).collect();
    assert_eq!(joined, vec!["192.0.2.1", "2001:db8::7"]);
    assert_eq!(misses, vec!["192.0.2.2"]);
    assert_eq!(runs.total(), 3);

    let first_joined = &runs.joined[0];
    assert!(first_joined.baseline.conn_t0);
    assert_eq!(first_joined.baseline.rank, Some(3));
    assert_eq!(first_joined.experimental.tfo_synclen, 8);
    assert_eq!(first_joined.experimental.tfo_synkind, 34);
    Ok(())
}

#[test]
fn test_later_join_supersedes_earlier_miss() -> TestResult<()> {
    let mut first = NamedTempFile::new()?;
    writeln!(first, "{}", line("192.0.2.1", "config", 0, true))?;

    let mut second = NamedTempFile::new()?;
    writeln!(second, "{}", line("192.0.2.1", "config", 0, true))?;
    writeln!(second, "{}", line("192.0.2.1", "config", 1, true))?;

    let runs = load_runs(&[first.path(), second.path()], "config")?;
    assert_eq!(runs.joined.len(), 1);
    assert!(runs.misses.is_empty());
    assert_eq!(runs.total(), 1);
    Ok(())
}

#[test]
fn test_load_runs_wrong_column_yields_nothing() -> TestResult<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{}", line("192.0.2.1", "tfostate", 0, true))?;
    let runs = load_runs(&[file.path()], "config")?;
    assert_eq!(runs.total(), 0);
    Ok(())
}

#[test]
fn test_load_runs_missing_file() {
    assert!(load_runs(&["/nonexistent/tfo-sieve/run.fjson"], "config").is_err());
}
