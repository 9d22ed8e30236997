//! End-to-end pipeline scenarios over real temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use dupescan::digest::Algorithm;
use dupescan::duplicates::{DupeFinder, FinderConfig};
use dupescan::scanner::WalkerConfig;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap()
}

fn finder_with_chain(chain: Vec<Algorithm>) -> DupeFinder {
    DupeFinder::new(FinderConfig::default().with_chain(chain))
}

#[test]
fn two_identical_files_form_one_cluster() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.txt", b"hello");
    let b = write_file(dir.path(), "b.txt", b"hello");

    let finder = finder_with_chain(vec![Algorithm::Sha1]);
    let outcome = finder.scan(&[dir.path().to_path_buf()]).unwrap();

    assert_eq!(outcome.clusters.len(), 1);
    let cluster = &outcome.clusters[0];
    assert_eq!(cluster.size, 5);
    assert_eq!(cluster.digest, "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
    assert_eq!(cluster.paths, vec![canonical(&a), canonical(&b)]);
}

#[test]
fn same_size_different_content_yields_no_cluster() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", b"hello");
    write_file(dir.path(), "b.txt", b"world");

    let outcome = DupeFinder::with_defaults()
        .scan(&[dir.path().to_path_buf()])
        .unwrap();

    // The size group of 2 survives the size filter but every digest
    // group degenerates to a singleton.
    assert_eq!(outcome.size_groups.len(), 1);
    assert!(outcome.clusters.is_empty());
}

#[test]
fn empty_file_is_excluded_by_default() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "empty.txt", b"");

    let outcome = DupeFinder::with_defaults()
        .scan(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(outcome.summary.total_files, 0);
    assert!(outcome.size_groups.is_empty());
    assert!(outcome.clusters.is_empty());
}

#[test]
fn empty_files_cluster_when_kept() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "one.txt", b"");
    write_file(dir.path(), "two.txt", b"");

    let config = FinderConfig::default().with_walker_config(WalkerConfig {
        keep_zero_len: true,
        ..Default::default()
    });
    let outcome = DupeFinder::new(config)
        .scan(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(outcome.clusters.len(), 1);
    assert_eq!(outcome.clusters[0].size, 0);
    assert_eq!(outcome.clusters[0].paths.len(), 2);
}

#[test]
#[cfg(unix)]
fn hardlink_pair_is_not_reported_as_duplicates() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.txt", b"same content");
    fs::hard_link(&a, dir.path().join("a_link.txt")).unwrap();

    let outcome = DupeFinder::with_defaults()
        .scan(&[dir.path().to_path_buf()])
        .unwrap();

    assert!(outcome.clusters.is_empty());
    assert_eq!(outcome.summary.hardlinks_skipped, 1);
}

#[test]
#[cfg(unix)]
fn hardlinked_file_still_clusters_with_unrelated_copy() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.txt", b"same content");
    fs::hard_link(&a, dir.path().join("a_link.txt")).unwrap();
    write_file(dir.path(), "c.txt", b"same content");

    let outcome = DupeFinder::with_defaults()
        .scan(&[dir.path().to_path_buf()])
        .unwrap();

    // One logical entry for the hard-linked pair plus the copy.
    assert_eq!(outcome.clusters.len(), 1);
    assert_eq!(outcome.clusters[0].paths.len(), 2);
}

#[test]
fn two_algorithm_chain_confirms_duplicates() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.bin", b"chained content");
    write_file(dir.path(), "b.bin", b"chained content");
    write_file(dir.path(), "c.bin", b"another content");

    let finder = finder_with_chain(vec![Algorithm::Md5, Algorithm::Sha256]);
    let outcome = finder.scan(&[dir.path().to_path_buf()]).unwrap();

    assert_eq!(outcome.clusters.len(), 1);
    assert_eq!(outcome.clusters[0].paths.len(), 2);
    // The reported digest belongs to the last algorithm in the chain.
    assert_eq!(outcome.clusters[0].digest.len(), Algorithm::Sha256.hex_len());
}

#[test]
fn rescan_of_unchanged_tree_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", b"dup");
    write_file(dir.path(), "b.txt", b"dup");
    write_file(dir.path(), "c.txt", b"dup");
    write_file(dir.path(), "other.txt", b"12345678");
    write_file(dir.path(), "peer.txt", b"12345678");

    let finder = DupeFinder::with_defaults();
    let first = finder.scan(&[dir.path().to_path_buf()]).unwrap();
    let second = finder.scan(&[dir.path().to_path_buf()]).unwrap();

    assert_eq!(first.clusters, second.clusters);
}

#[test]
fn clusters_never_span_sizes_and_never_hold_singletons() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", b"aaaa");
    write_file(dir.path(), "b.txt", b"aaaa");
    write_file(dir.path(), "c.txt", b"bbbbbbbb");
    write_file(dir.path(), "d.txt", b"bbbbbbbb");
    write_file(dir.path(), "lonely.txt", b"cc");

    let outcome = DupeFinder::with_defaults()
        .scan(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(outcome.clusters.len(), 2);
    for cluster in &outcome.clusters {
        assert!(cluster.len() >= 2);
        for path in &cluster.paths {
            assert_eq!(fs::metadata(path).unwrap().len(), cluster.size);
        }
    }
}

#[test]
fn files_and_directories_mix_as_inputs() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("tree");
    fs::create_dir(&sub).unwrap();
    let loose = write_file(dir.path(), "loose.txt", b"payload");
    write_file(&sub, "copy.txt", b"payload");

    let outcome = DupeFinder::with_defaults()
        .scan(&[loose, sub, dir.path().join("missing")])
        .unwrap();

    assert_eq!(outcome.clusters.len(), 1);
    assert_eq!(outcome.clusters[0].paths.len(), 2);
    // The nonexistent input is skipped silently.
    assert!(!outcome.summary.has_errors());
}

#[test]
fn hidden_tree_is_pruned_unless_enabled() {
    let dir = TempDir::new().unwrap();
    let hidden = dir.path().join(".stash");
    fs::create_dir(&hidden).unwrap();
    write_file(&hidden, "a.txt", b"hidden dup");
    write_file(&hidden, "b.txt", b"hidden dup");

    let outcome = DupeFinder::with_defaults()
        .scan(&[dir.path().to_path_buf()])
        .unwrap();
    assert!(outcome.clusters.is_empty());

    let config = FinderConfig::default().with_walker_config(WalkerConfig {
        include_hidden: true,
        ..Default::default()
    });
    let outcome = DupeFinder::new(config)
        .scan(&[dir.path().to_path_buf()])
        .unwrap();
    assert_eq!(outcome.clusters.len(), 1);
}
