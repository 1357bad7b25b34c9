use super::*;

use crate::model::config::DetailLevel;

fn parse(extra: &[&str]) -> RunArgs {
    let mut argv = vec!["kira-codoncoa", "run", "--input", "usage.tsv", "--out", "out"];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Run(args) => args,
    }
}

#[test]
fn test_parse_args_defaults() {
    let args = parse(&[]);
    assert_eq!(args.mode, ModeArg::Codon);
    assert_eq!(args.code, 0);
    assert!(!args.expert);
    assert!(args.supplementary.is_none());
    assert_eq!(args.optimal_genes, GeneSelection::Percent(10.0));

    let config = build_config(&args);
    assert_eq!(config.mode, AnalysisMode::CodonFrequency);
    assert_eq!(config.axes, 59);
    assert_eq!(config.level, DetailLevel::Standard);
}

#[test]
fn test_parse_args_amino_expert() {
    let args = parse(&["--mode", "amino", "--expert", "--axes", "3", "--code", "1"]);
    let config = build_config(&args);
    assert_eq!(config.mode, AnalysisMode::AminoAcid);
    assert_eq!(config.axes, 3);
    assert_eq!(config.level, DetailLevel::Expert);
    assert_eq!(config.genetic_code, 1);
}

#[test]
fn test_parse_args_optimal_gene_count() {
    let args = parse(&["--mode", "rscu", "--optimal-genes", "25", "--keep-singletons"]);
    let config = build_config(&args);
    assert_eq!(config.mode, AnalysisMode::Rscu);
    assert!(config.keep_singletons);
    assert_eq!(config.optimal_genes, GeneSelection::Count(25));
}

#[test]
fn test_parse_args_rejects_unknown_mode() {
    let argv = ["kira-codoncoa", "run", "--input", "a", "--out", "b", "--mode", "cell"];
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn test_parse_args_requires_input() {
    let argv = ["kira-codoncoa", "run", "--out", "b"];
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn test_run_rejects_unknown_code() {
    let args = parse(&["--code", "42"]);
    let err = run(&args).unwrap_err();
    assert!(matches!(err, RunError::Code(CodeError::UnknownCode(42))));
}

static DIR_COUNTER: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    dir.push(format!("kira_codoncoa_main_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_usage(path: &std::path::Path, rows: &[(&str, Vec<u32>)]) {
    let mut text = String::from("gene");
    for codon in crate::code::Codon::all() {
        text.push('\t');
        text.push_str(&codon.name());
    }
    text.push('\n');
    for (gene, counts) in rows {
        text.push_str(gene);
        for c in counts {
            text.push_str(&format!("\t{c}"));
        }
        text.push('\n');
    }
    std::fs::write(path, text).unwrap();
}

fn gene_counts(seed: u32) -> Vec<u32> {
    (0..64u32).map(|i| (i * 7 + seed * 13) % 11 + seed % 3).collect()
}

#[test]
fn test_run_writes_all_outputs() {
    let dir = make_temp_dir();
    let input = dir.join("usage.tsv");
    let rows: Vec<(&str, Vec<u32>)> = ["a", "b", "c", "d", "e", "f"]
        .iter()
        .enumerate()
        .map(|(i, g)| (*g, gene_counts(i as u32 + 1)))
        .collect();
    write_usage(&input, &rows);
    let supp = dir.join("extra.tsv");
    write_usage(&supp, &[("x", gene_counts(9)), ("zero", vec![0; 64])]);

    let out = dir.join("out");
    let args = parse(&[]);
    let args = RunArgs {
        input: input.clone(),
        out: out.clone(),
        supplementary: Some(supp),
        expert: true,
        ..args
    };
    run(&args).unwrap();

    for file in [
        "genes.tsv",
        "variables.tsv",
        "summary.json",
        "report.txt",
        "optimal_codons.tsv",
    ] {
        assert!(out.join(file).exists(), "{file} missing");
    }
    let genes = std::fs::read_to_string(out.join("genes.tsv")).unwrap();
    assert!(genes.contains("x\tsupplementary\t1\t"));
    assert!(!genes.contains("zero\t"));
}

#[test]
fn test_run_skips_degenerate_input() {
    let dir = make_temp_dir();
    let input = dir.join("usage.tsv");
    write_usage(&input, &[("a", vec![5; 64]), ("b", vec![5; 64])]);
    let out = dir.join("out");
    let args = RunArgs {
        input,
        out: out.clone(),
        ..parse(&[])
    };
    run(&args).unwrap();
    assert!(!out.exists());
}
