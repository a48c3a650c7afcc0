use super::*;
use crate::test_support::{DirGuard, EnvGuard, create_bin_dirs, touch};
use serial_test::serial;

#[test]
fn parse_splits_on_platform_delimiter() {
    let joined = env::join_paths(["/usr/local/bin", "/usr/bin", "/bin"]).unwrap();
    let search_path = SearchPath::parse(&joined);

    assert_eq!(
        search_path.dirs(),
        &[
            PathBuf::from("/usr/local/bin"),
            PathBuf::from("/usr/bin"),
            PathBuf::from("/bin"),
        ]
    );
}

#[cfg(unix)]
#[test]
fn parse_keeps_empty_segments() {
    let search_path = SearchPath::parse("/a::/b");
    assert_eq!(search_path.dirs().len(), 3);
    assert_eq!(search_path.dirs()[1], PathBuf::new());
}

#[test]
fn from_var_unset_is_search_path_unset() {
    let err = SearchPath::from_var(None).unwrap_err();
    assert!(matches!(err, FsExecError::SearchPathUnset));
}

#[test]
#[serial]
fn from_env_reads_path() {
    // Test runners always provide PATH.
    let search_path = SearchPath::from_env().unwrap();
    assert!(!search_path.dirs().is_empty());
}

#[test]
#[serial]
fn find_executable_in_path_without_path_var_is_search_path_unset() {
    let _env = EnvGuard::remove(PATH_VAR);

    let err = find_executable_in_path("sh").unwrap_err();
    assert!(matches!(err, FsExecError::SearchPathUnset));
    assert!(matches!(
        SearchPath::from_env().unwrap_err(),
        FsExecError::SearchPathUnset
    ));
}

#[test]
fn candidates_probe_bare_name_before_exe_per_directory() {
    let search_path = SearchPath::from_dirs(["/one", "/two"]);
    let candidates: Vec<_> = search_path.candidates("tool").collect();

    assert_eq!(
        candidates,
        vec![
            PathBuf::from("/one/tool"),
            PathBuf::from("/one/tool.exe"),
            PathBuf::from("/two/tool"),
            PathBuf::from("/two/tool.exe"),
        ]
    );
}

#[test]
fn find_executable_missing_name_is_none() {
    let (_temp, dirs) = create_bin_dirs(3);
    let search_path = SearchPath::from_dirs(dirs);

    assert_eq!(search_path.find_executable("doesnotexist12345"), None);
}

#[test]
#[serial]
fn find_executable_in_process_path_missing_name_is_none() {
    assert_eq!(find_executable_in_path("doesnotexist12345").unwrap(), None);
}

#[test]
fn find_executable_first_directory_wins() {
    let (_temp, dirs) = create_bin_dirs(2);
    let first = touch(&dirs[0], "tool");
    touch(&dirs[1], "tool");

    let search_path = SearchPath::from_dirs(dirs);
    assert_eq!(search_path.find_executable("tool"), Some(first));
}

#[test]
fn find_executable_bare_name_beats_exe_in_same_directory() {
    let (_temp, dirs) = create_bin_dirs(1);
    let bare = touch(&dirs[0], "tool");
    touch(&dirs[0], "tool.exe");

    let search_path = SearchPath::from_dirs(dirs);
    assert_eq!(search_path.find_executable("tool"), Some(bare));
}

#[test]
fn find_executable_earlier_exe_beats_later_bare_name() {
    let (_temp, dirs) = create_bin_dirs(2);
    let exe = touch(&dirs[0], "tool.exe");
    touch(&dirs[1], "tool");

    let search_path = SearchPath::from_dirs(dirs);
    assert_eq!(search_path.find_executable("tool"), Some(exe));
}

#[test]
fn find_executable_skips_missing_directories() {
    let (temp, dirs) = create_bin_dirs(1);
    let found = touch(&dirs[0], "tool");

    let search_path = SearchPath::from_dirs([temp.path().join("missing"), dirs[0].clone()]);
    assert_eq!(search_path.find_executable("tool"), Some(found));
}

#[test]
fn find_executable_does_not_check_permissions() {
    let (_temp, dirs) = create_bin_dirs(1);
    // Plain data file, never marked executable.
    let data = dirs[0].join("notes");
    std::fs::write(&data, b"not a program").unwrap();

    let search_path = SearchPath::from_dirs(dirs);
    assert_eq!(search_path.find_executable("notes"), Some(data));
}

#[test]
#[serial]
fn find_executable_relative_segment_resolves_against_cwd() {
    let (temp, _dirs) = create_bin_dirs(1);
    touch(&temp.path().join("bin0"), "tool");
    let _guard = DirGuard::new(temp.path());

    let search_path = SearchPath::from_dirs(["bin0"]);
    let found = search_path.find_executable("tool").unwrap();
    assert_eq!(found, PathBuf::from("bin0").join("tool"));
}
