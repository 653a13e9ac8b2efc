use std::fs;
use std::path::Path;

use clap::Parser;
use neuroglyph_cli::{
    BrainArgs, Command, EXIT_GLYPH_MISSES, LogoArgs, NeuroglyphOptions, PixelTextArgs, run_main,
};
use neuroglyph_error::ErrorKind;
use neuroglyph_svg::BrainVariant;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[derive(Parser, Debug)]
struct Harness {
    #[command(subcommand)]
    command: Command,
}

fn parse(args: &[&str]) -> Command {
    let argv = std::iter::once("neuroglyph").chain(args.iter().copied());
    Harness::try_parse_from(argv).expect("parse args").command
}

fn options(out_dir: &Path, command: Command) -> NeuroglyphOptions {
    NeuroglyphOptions {
        config: None,
        out_dir: Some(out_dir.to_path_buf()),
        command,
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn all_writes_fixed_names() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("assets");

    let report = run_main(&options(&out, Command::All)).expect("run all");
    assert_eq!(report.exit_code(), 0);
    assert_eq!(
        file_names(&out),
        vec![
            "author_satoramy_praio.svg",
            "rfof_network_gold.svg",
            "rotating_cyber_brain.svg",
        ]
    );
    let whats: Vec<_> = report.generated.iter().map(|g| g.what).collect();
    assert_eq!(whats, vec!["Cyber brain SVG", "Pixel text SVG", "Gold text SVG"]);
    for generated in &report.generated {
        let doc = fs::read_to_string(&generated.path).expect("read output");
        assert!(doc.ends_with("</svg>\n"), "{}", generated.path.display());
    }
}

#[test]
fn brain_output_is_reproducible_across_runs() {
    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("one.svg");
    let second = dir.path().join("two.svg");

    for path in [&first, &second] {
        let command = Command::Brain(
            BrainArgs::new()
                .with_variant(BrainVariant::Lobed)
                .with_seed(42)
                .with_output(path),
        );
        run_main(&options(dir.path(), command)).expect("run brain");
    }

    let a = fs::read_to_string(&first).expect("read first");
    let b = fs::read_to_string(&second).expect("read second");
    assert_eq!(a, b);
    assert!(a.contains("goldGradientLight"));
}

#[test]
fn glyph_misses_still_write_and_exit_two() {
    let dir = tempdir().expect("tempdir");
    let command = parse(&["pixel-text", "HI!"]);

    let report = run_main(&options(dir.path(), command)).expect("run pixel text");
    assert_eq!(report.exit_code(), EXIT_GLYPH_MISSES);
    assert_eq!(report.generated[0].misses.len(), 1);
    assert_eq!(report.generated[0].misses[0].ch, '!');
    assert!(dir.path().join("author_satoramy_praio.svg").is_file());
}

#[test]
fn strict_mode_fails_without_writing() {
    let dir = tempdir().expect("tempdir");
    let command = Command::PixelText(PixelTextArgs::new().with_text("HI!").with_strict(true));

    let err = run_main(&options(dir.path(), command)).expect_err("strict run fails");
    assert_eq!(err.kind(), ErrorKind::GlyphLookupMiss);
    assert_eq!(err.context_value("char"), Some("!"));
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn flags_parse_into_options() {
    let command = parse(&[
        "brain",
        "--variant",
        "lobed",
        "--seed",
        "7",
        "--nodes",
        "10",
        "--edges",
        "5",
        "--unique-edges",
        "-o",
        "x.svg",
    ]);
    let Command::Brain(args) = command else {
        panic!("expected brain command");
    };
    assert_eq!(args.variant, Some(BrainVariant::Lobed));
    assert_eq!(args.seed, Some(7));
    assert_eq!((args.node_count, args.edge_count), (Some(10), Some(5)));
    assert!(args.unique_edges);
    assert_eq!(args.output.as_deref(), Some(Path::new("x.svg")));

    assert!(Harness::try_parse_from(["neuroglyph", "brain", "--variant", "round"]).is_err());
}

#[test]
fn config_file_layers_under_flags() {
    let dir = tempdir().expect("tempdir");
    let config_path = dir.path().join("neuroglyph.toml");
    fs::write(
        &config_path,
        r#"
        [output]
        dir = "from-config"

        [logo]
        text = "CONFIG"
        font_size = 10.0
        "#,
    )
    .expect("write config");

    let opts = NeuroglyphOptions {
        config: Some(config_path),
        out_dir: None,
        command: Command::Logo(LogoArgs {
            font_size: Some(20.0),
            output: Some(dir.path().join("logo.svg")),
            ..LogoArgs::default()
        }),
    };
    let report = run_main(&opts).expect("run logo");
    let doc = fs::read_to_string(&report.generated[0].path).expect("read logo");
    // 6 chars * 20 * 0.6 by 20 * 1.2
    assert!(doc.contains(r#"width="72" height="24""#), "{doc}");
    assert!(doc.contains(">CONFIG</text>"));
}

#[test]
fn invalid_config_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let config_path = dir.path().join("bad.toml");
    fs::write(&config_path, "[brain]\nseed = \"forty-two\"\n").expect("write config");

    let opts = NeuroglyphOptions {
        config: Some(config_path),
        out_dir: Some(dir.path().join("out")),
        command: Command::All,
    };
    let err = run_main(&opts).expect_err("bad config");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn custom_font_file() {
    let dir = tempdir().expect("tempdir");
    let font_path = dir.path().join("font.toml");
    fs::write(
        &font_path,
        r#"
        key_case = "upper"
        [glyphs]
        H = ["101", "111", "101"]
        I = ["1", "1", "1"]
        "#,
    )
    .expect("write font");

    let command = parse(&[
        "pixel-text",
        "hi",
        "--font",
        font_path.to_str().expect("utf-8 path"),
        "--cell-size",
        "4",
        "--gap-size",
        "1",
    ]);
    let report = run_main(&options(dir.path(), command)).expect("run pixel text");
    assert_eq!(report.exit_code(), 0);

    let doc = fs::read_to_string(&report.generated[0].path).expect("read output");
    // H: 3 * 5 + 4, I: 1 * 5 + 4; three rows of 5
    assert!(doc.contains(r#"width="28" height="15""#), "{doc}");
    assert_eq!(doc.matches("<rect").count(), 9 + 3);
}

#[test]
fn missing_font_file_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let command = Command::PixelText(PixelTextArgs {
        font: Some(dir.path().join("nope.toml")),
        ..PixelTextArgs::default()
    });
    let err = run_main(&options(dir.path(), command)).expect_err("missing font");
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}

#[test]
fn too_many_edges_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let command = parse(&["brain", "--nodes", "3", "--edges", "4"]);
    let err = run_main(&options(dir.path(), command)).expect_err("edge count");
    assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    assert!(file_names(dir.path()).is_empty());
}
