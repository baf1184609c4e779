mod common;

use common::TestTree;
use rstest::rstest;
use tidyfmt::collector::{PathCollector, WalkCollector};
use tidyfmt::config::FormatterSettings;
use tidyfmt::diff::LineSeparator;
use tidyfmt::engine::{DRY_RUN_QUIET_MESSAGE, EngineError, LINT_MESSAGE, SequentialEngine};
use tidyfmt::formatter::{BasicConfig, BasicFormatter, FormatterRegistry};

fn basic_engine(line_sep: LineSeparator, quiet: bool) -> SequentialEngine {
    SequentialEngine::new(Box::new(BasicFormatter::default()), line_sep, quiet)
}

fn collect(tree: &TestTree) -> Vec<std::path::PathBuf> {
    WalkCollector::new(
        vec![tree.path().to_path_buf()],
        vec![],
        vec!["yaml".to_string()],
    )
    .collect_paths()
    .unwrap()
}

#[test]
fn test_collect_then_format_tree() {
    let tree = TestTree::new();
    tree.write("a.yaml", "a: 1   \n\n\n");
    tree.write("sub/b.yaml", "b: 2\n");
    tree.write("skip.txt", "c   \n");

    let written = basic_engine(LineSeparator::Default, false)
        .format(&collect(&tree))
        .unwrap();

    assert_eq!(written, 1);
    assert_eq!(tree.read("a.yaml"), "a: 1\n");
    assert_eq!(tree.read("sub/b.yaml"), "b: 2\n");
    assert_eq!(tree.read("skip.txt"), "c   \n");
}

#[test]
fn test_one_bad_file_blocks_all_writes() {
    let tree = TestTree::new();
    tree.write("a.yaml", "a: 1   \n");
    std::fs::write(tree.abs("b.yaml"), [0xff]).unwrap();
    tree.write("c.yaml", "c: 3   \n");

    let err = basic_engine(LineSeparator::Default, false)
        .format(&collect(&tree))
        .unwrap_err();

    match err {
        EngineError::Format(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors.paths()[0].ends_with("b.yaml"));
        }
        EngineError::Apply(e) => panic!("unexpected apply error: {e}"),
    }
    assert_eq!(tree.read("a.yaml"), "a: 1   \n");
    assert_eq!(tree.read("c.yaml"), "c: 3   \n");
}

#[rstest]
#[case(LineSeparator::Lf, "a\r\nb\r\n", "a\nb\n")]
#[case(LineSeparator::Crlf, "a\nb\n", "a\r\nb\r\n")]
#[case(LineSeparator::Default, "a\r\nb\r\n", "a\nb\n")]
fn test_line_separator_on_disk(
    #[case] line_sep: LineSeparator,
    #[case] input: &str,
    #[case] expected: &str,
) {
    let tree = TestTree::new();
    let path = tree.write("f.yaml", input);

    basic_engine(line_sep, false).format(&[path]).unwrap();

    assert_eq!(tree.read("f.yaml"), expected);
}

#[test]
fn test_crlf_file_already_in_target_form_is_unchanged() {
    let tree = TestTree::new();
    let path = tree.write("f.yaml", "a\r\nb\r\n");

    let report = basic_engine(LineSeparator::Crlf, false).lint(&[path]).unwrap();

    assert!(report.is_none());
}

#[test]
fn test_lint_and_dry_run_reports() {
    let tree = TestTree::new();
    tree.write("a.yaml", "a: 1\t\n");
    tree.write("b.yaml", "b: 2\n");
    let paths = collect(&tree);

    let lint = basic_engine(LineSeparator::Default, false)
        .lint(&paths)
        .unwrap()
        .unwrap();
    assert_eq!(lint.message, LINT_MESSAGE);
    assert_eq!(lint.files.len(), 2);
    assert_eq!(lint.files.changed_count(), 1);

    let dry = basic_engine(LineSeparator::Default, true)
        .dry_run(&paths)
        .unwrap()
        .unwrap();
    assert_eq!(dry.message, DRY_RUN_QUIET_MESSAGE);
    assert!(dry.quiet);
    assert_eq!(tree.read("a.yaml"), "a: 1\t\n");
}

#[test]
fn test_engine_from_registry_options() {
    let tree = TestTree::new();
    let path = tree.write("a.yaml", "a\n\n\n\nb\n");
    let settings = FormatterSettings {
        kind: "basic".to_string(),
        options: toml::from_str("max_blank_lines = 1").unwrap(),
    };
    let formatter = FormatterRegistry::with_builtin().build(&settings).unwrap();

    SequentialEngine::new(formatter, LineSeparator::Default, false)
        .format(&[path])
        .unwrap();

    assert_eq!(tree.read("a.yaml"), "a\n\nb\n");
}

#[test]
fn test_trailing_whitespace_kept_when_disabled() {
    let tree = TestTree::new();
    let path = tree.write("a.yaml", "a  \n");
    let formatter = BasicFormatter::new(BasicConfig {
        trim_trailing_whitespace: false,
        ..BasicConfig::default()
    });

    let report = SequentialEngine::new(Box::new(formatter), LineSeparator::Default, false)
        .lint(&[path])
        .unwrap();

    assert!(report.is_none());
}
