use assert_fs::prelude::*;
use predicates::prelude::*;
use safer_fs::io;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_copy_with_checksum_is_byte_exact() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src.txt");
    src.write_str("copy me").unwrap();
    let dst = temp.child("dst.txt");

    io::copy_with_checksum(src.path(), dst.path()).unwrap();

    dst.assert("copy me");
}

#[test]
fn test_copy_with_checksum_missing_source_reports_path() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("missing.txt");

    let err = io::copy_with_checksum(&src, &temp.path().join("dst.txt")).unwrap_err();

    assert!(err.to_string().contains("missing.txt"));
}

#[test]
fn test_replace_file_overwrites_existing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("ws/a.txt");
    src.write_str("edited").unwrap();
    let dst = temp.child("orig/a.txt");
    dst.write_str("original").unwrap();

    io::replace_file(src.path(), dst.path()).unwrap();

    dst.assert("edited");
}

#[test]
fn test_replace_file_creates_parents() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("new.txt");
    src.write_str("nested new").unwrap();
    let dst = temp.child("orig/sub/deeper/new.txt");

    io::replace_file(src.path(), dst.path()).unwrap();

    dst.assert(predicate::path::is_file());
    dst.assert("nested new");
}

#[test]
fn test_replace_file_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.txt");
    fs::write(&src, "content").unwrap();
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();

    io::replace_file(&src, &out.join("target.txt")).unwrap();

    let leftovers: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "found temp files: {:?}", leftovers);
}

#[test]
fn test_replace_file_failure_keeps_destination() {
    let temp = TempDir::new().unwrap();
    let dst = temp.path().join("keep.txt");
    fs::write(&dst, "untouched").unwrap();

    let result = io::replace_file(&temp.path().join("missing.txt"), &dst);

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "untouched");
}

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a").join("settings.json");

    io::write_atomic(&path, b"{}").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    let names: Vec<_> = fs::read_dir(temp.path().join("a"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["settings.json"]);
}

#[test]
fn test_read_text_nonexistent_file() {
    let err = io::read_text(std::path::Path::new("/nonexistent/file.txt")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/file.txt"));
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_copy_with_checksum_preserves_permissions() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("tool.sh");
        let dst = temp.path().join("copy.sh");
        fs::write(&src, "#!/bin/sh").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o700)).unwrap();

        io::copy_with_checksum(&src, &dst).unwrap();

        let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700);
    }

    #[test]
    fn test_replace_file_takes_source_permissions() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("run.sh");
        let dst = temp.path().join("orig.sh");
        fs::write(&src, "#!/bin/sh\necho hi").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o750)).unwrap();
        fs::write(&dst, "old").unwrap();
        fs::set_permissions(&dst, fs::Permissions::from_mode(0o644)).unwrap();

        io::replace_file(&src, &dst).unwrap();

        let mode = fs::metadata(&dst).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o750);
    }

    #[test]
    fn test_replace_file_detaches_hard_links() {
        use std::os::unix::fs::MetadataExt;

        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.txt");
        let dst = temp.path().join("orig.txt");
        let link = temp.path().join("link.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old").unwrap();
        fs::hard_link(&dst, &link).unwrap();

        io::replace_file(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
        assert_eq!(fs::read_to_string(&link).unwrap(), "old");
        assert_ne!(
            fs::metadata(&dst).unwrap().ino(),
            fs::metadata(&link).unwrap().ino()
        );
    }
}

#[test]
fn test_copy_with_checksum_matches_source_digest() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("note.md");
    let dst = temp.path().join("copy.md");
    fs::write(&src, "# Hello").unwrap();

    let digest = io::copy_with_checksum(&src, &dst).unwrap();

    assert_eq!(digest, safer_fs::compute_file_checksum(&src).unwrap());
    assert_eq!(digest, safer_fs::compute_file_checksum(&dst).unwrap());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "# Hello");
}

#[test]
fn test_copy_with_checksum_missing_source() {
    let temp = TempDir::new().unwrap();
    let result = io::copy_with_checksum(&temp.path().join("nope"), &temp.path().join("dst"));
    assert!(result.is_err());
    assert!(!temp.path().join("dst").exists());
}
