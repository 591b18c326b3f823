mod common;

use common::{tree, write_file, PNG_BYTES};
use dirdiff::textdiff::LineTag;
use dirdiff::{compare_directories, CompareOptions, DiffStatus, FileFilter};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn paths(result: &dirdiff::ComparisonResult) -> Vec<(String, DiffStatus)> {
    result
        .entries
        .iter()
        .map(|e| (e.relative_path.clone(), e.status))
        .collect()
}

#[test]
fn mixed_scenario() {
    let original = tree(&[("a.txt", b"hello\n"), ("b.png", PNG_BYTES)]);
    let modified = tree(&[("a.txt", b"hello world\n"), ("c.txt", b"new\n")]);

    let result = compare_directories(original.path(), modified.path(), &CompareOptions::default()).unwrap();

    assert_eq!(
        paths(&result),
        vec![
            ("b.png".to_string(), DiffStatus::Deleted),
            ("c.txt".to_string(), DiffStatus::Added),
            ("a.txt".to_string(), DiffStatus::Modified),
        ]
    );
    assert_eq!(result.entries[0].size.original, PNG_BYTES.len() as u64);
    assert_eq!(result.entries[1].size.modified, 4);

    let a = &result.entries[2];
    assert_eq!((a.lines_added, a.lines_removed), (1, 1));
    assert_eq!(a.size.original, 6);
    assert_eq!(a.size.modified, 12);

    assert_eq!(result.total_original, 2);
    assert_eq!(result.total_modified, 2);
    assert_eq!(result.common, 1);
    assert_eq!(result.unchanged(), 0);
}

#[test]
fn empty_trees() {
    let a = tree(&[]);
    let b = tree(&[]);
    let result = compare_directories(a.path(), b.path(), &CompareOptions::default()).unwrap();
    assert!(result.is_identical());
    assert_eq!((result.total_original, result.total_modified, result.common), (0, 0, 0));
}

#[test]
fn identical_trees_produce_no_entries() {
    let files: &[(&str, &[u8])] = &[
        ("README.md", b"# readme\n"),
        ("src/main.ts", b"console.log(1);\n"),
        ("assets/logo.png", PNG_BYTES),
    ];
    let a = tree(files);
    let b = tree(files);
    let result = compare_directories(a.path(), b.path(), &CompareOptions::default()).unwrap();
    assert!(result.entries.is_empty());
    assert_eq!(result.common, 3);
    assert_eq!(result.unchanged(), 3);
    for status in [DiffStatus::Added, DiffStatus::Deleted, DiffStatus::Modified, DiffStatus::BinaryModified] {
        assert_eq!(result.count(status), 0);
    }
}

#[rstest]
#[case("photo.jpg", b"not really a jpeg\n", b"still not a jpeg\n")]
#[case("font.woff2", b"abc\n", b"abd\n")]
#[case("data.bin", b"\0\x01", b"\0\x02")]
#[case("blob.dat", b"plain\n", b"has\0nul\n")]
fn binary_changes(#[case] name: &str, #[case] before: &[u8], #[case] after: &[u8]) {
    let a = tree(&[(name, before)]);
    let b = tree(&[(name, after)]);
    let result = compare_directories(a.path(), b.path(), &CompareOptions::default()).unwrap();
    assert_eq!(paths(&result), vec![(name.to_string(), DiffStatus::BinaryModified)]);
    let e = &result.entries[0];
    assert!(e.hunks.is_empty());
    assert_eq!((e.lines_added, e.lines_removed), (0, 0));
    assert_eq!(e.size.original, before.len() as u64);
    assert_eq!(e.size.modified, after.len() as u64);
}

#[test]
fn groups_are_sorted_by_path() {
    let a = tree(&[
        ("z_del.txt", b"1"),
        ("a_del.txt", b"1"),
        ("m/shared.txt", b"1\n"),
        ("b/shared.png", b"1"),
    ]);
    let b = tree(&[
        ("y_new.txt", b"1"),
        ("c_new.txt", b"1"),
        ("m/shared.txt", b"2\n"),
        ("b/shared.png", b"2"),
    ]);
    let result = compare_directories(a.path(), b.path(), &CompareOptions::default()).unwrap();
    let got: Vec<_> = result.entries.iter().map(|e| e.relative_path.as_str()).collect();
    assert_eq!(
        got,
        vec!["a_del.txt", "z_del.txt", "c_new.txt", "y_new.txt", "b/shared.png", "m/shared.txt"]
    );
}

#[test]
fn ignored_dirs_never_surface() {
    let a = tree(&[("app.ts", b"a\n"), ("node_modules/lib.ts", b"x\n")]);
    let b = tree(&[("app.ts", b"a\n"), ("node_modules/lib.ts", b"y\n"), ("pkg/node_modules/new.ts", b"z\n")]);
    let opts = CompareOptions {
        filter: FileFilter::new(["node_modules"], Vec::<String>::new(), Some([".ts"])).unwrap(),
        ..CompareOptions::default()
    };
    let result = compare_directories(a.path(), b.path(), &opts).unwrap();
    assert!(result.is_identical());
    assert_eq!(result.total_original, 1);
    assert_eq!(result.total_modified, 1);
}

#[test]
fn extension_and_pattern_filters_apply_to_both_sides() {
    let a = tree(&[("keep.rs", b"1\n"), ("skip.md", b"1\n"), ("gen.generated.rs", b"1\n")]);
    let b = tree(&[("keep.rs", b"2\n"), ("skip.md", b"2\n")]);
    let opts = CompareOptions {
        filter: FileFilter::new(Vec::<String>::new(), ["*.generated.rs"], Some(["rs"])).unwrap(),
        ..CompareOptions::default()
    };
    let result = compare_directories(a.path(), b.path(), &opts).unwrap();
    assert_eq!(paths(&result), vec![("keep.rs".to_string(), DiffStatus::Modified)]);
}

#[test]
fn line_counts_agree_with_hunks() {
    let before: String = (1..=30).map(|i| format!("row {i}\n")).collect();
    let mut after_lines: Vec<String> = (1..=30).map(|i| format!("row {i}\n")).collect();
    after_lines.remove(2);
    after_lines[20] = "changed\n".into();
    after_lines.push("tail\n".into());
    let after: String = after_lines.concat();

    let a = tree(&[("f.txt", before.as_bytes())]);
    let b = tree(&[("f.txt", after.as_bytes())]);
    let opts = CompareOptions::default();
    let first = compare_directories(a.path(), b.path(), &opts).unwrap();
    let second = compare_directories(a.path(), b.path(), &opts).unwrap();
    assert_eq!(first, second);

    let e = &first.entries[0];
    let tagged = |tag| e.hunks.iter().flat_map(|h| &h.lines).filter(|l| l.tag == tag).count();
    assert_eq!(e.lines_added, tagged(LineTag::Added));
    assert_eq!(e.lines_removed, tagged(LineTag::Removed));
    assert_eq!(e.lines_added, 2);
    assert_eq!(e.lines_removed, 2);
    assert_eq!(first.total_lines_added(), 2);
}

#[test]
fn context_lines_widen_hunks() {
    let before: String = (1..=20).map(|i| format!("{i}\n")).collect();
    let after = before.replace("10\n", "ten\n");
    let a = tree(&[("n.txt", before.as_bytes())]);
    let b = tree(&[("n.txt", after.as_bytes())]);

    let narrow = CompareOptions {
        context_lines: 0,
        ..CompareOptions::default()
    };
    let r = compare_directories(a.path(), b.path(), &narrow).unwrap();
    assert_eq!(r.entries[0].hunks[0].header(), "@@ -10 +10 @@");

    let wide = CompareOptions {
        context_lines: 5,
        ..CompareOptions::default()
    };
    let r = compare_directories(a.path(), b.path(), &wide).unwrap();
    assert_eq!(r.entries[0].hunks[0].header(), "@@ -5,11 +5,11 @@");
}

#[test]
fn latin1_text_is_diffed_not_binary() {
    let a = tree(&[("legacy.txt", b"caf\xe9\n")]);
    let b = tree(&[("legacy.txt", b"caf\xe9 au lait\n")]);
    let result = compare_directories(a.path(), b.path(), &CompareOptions::default()).unwrap();
    let e = &result.entries[0];
    assert_eq!(e.status, DiffStatus::Modified);
    assert_eq!(e.hunks[0].lines[0].text, "café\n");
}

#[test]
fn language_stats_cover_all_statuses() {
    let a = tree(&[("old.py", b"x"), ("app.ts", b"1\n"), ("img.png", b"1")]);
    let b = tree(&[("new.ts", b"x"), ("app.ts", b"2\n"), ("img.png", b"2")]);
    let result = compare_directories(a.path(), b.path(), &CompareOptions::default()).unwrap();
    let stats = result.language_stats();
    assert_eq!(stats["TypeScript"].added, 1);
    assert_eq!(stats["TypeScript"].modified, 1);
    assert_eq!(stats["Python"].deleted, 1);
    assert_eq!(stats["PNG"].modified, 1);
}

#[cfg(unix)]
#[test]
fn unreadable_file_degrades_to_binary() {
    use std::os::unix::fs::PermissionsExt;

    let a = tree(&[("secret.txt", b"one\n")]);
    let b = tree(&[("secret.txt", b"two\n")]);
    let locked = b.path().join("secret.txt");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // root ignores permission bits; nothing to check then
    if std::fs::read(&locked).is_ok() {
        return;
    }

    let result = compare_directories(a.path(), b.path(), &CompareOptions::default()).unwrap();
    assert_eq!(paths(&result), vec![("secret.txt".to_string(), DiffStatus::BinaryModified)]);
    assert_eq!(result.entries[0].size.modified, 4);

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn non_utf8_names_compare_by_content() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let a = tree(&[]);
    let b = tree(&[]);
    let same = OsStr::from_bytes(b"caf\xe9.txt");
    let changed = OsStr::from_bytes(b"caf\xe8.txt");
    std::fs::write(a.path().join(same), "same\n").unwrap();
    std::fs::write(b.path().join(same), "same\n").unwrap();
    std::fs::write(a.path().join(changed), "old\n").unwrap();
    std::fs::write(b.path().join(changed), "newer\n").unwrap();

    let result = compare_directories(a.path(), b.path(), &CompareOptions::default()).unwrap();

    assert_eq!(result.common, 2);
    assert_eq!(paths(&result), vec![("caf\\xe8.txt".to_string(), DiffStatus::Modified)]);
    let entry = &result.entries[0];
    assert_eq!((entry.size.original, entry.size.modified), (4, 6));
    assert_eq!((entry.lines_added, entry.lines_removed), (1, 1));
}

#[test]
fn late_files_do_not_disturb_result() {
    let a = tree(&[("a.txt", b"1\n")]);
    let b = tree(&[("a.txt", b"1\n")]);
    write_file(b.path(), "later/b.txt", b"2\n");
    let result = compare_directories(a.path(), b.path(), &CompareOptions::default()).unwrap();
    assert_eq!(paths(&result), vec![("later/b.txt".to_string(), DiffStatus::Added)]);
}
