use super::*;
use crate::model::config::{AnalysisMode, CoaConfig};
use crate::pipeline::fit_analysis;
use crate::pipeline::stage1_contingency::build_contingency;
use approx::assert_abs_diff_eq;

fn counts(entries: &[(&str, f64)]) -> CodonCounts {
    let mut out = [0.0f64; N_CODONS];
    for &(name, v) in entries {
        out[Codon::parse(name).unwrap().index()] = v;
    }
    out
}

fn biased() -> CodonCounts {
    counts(&[
        ("TTC", 40.0),
        ("TTT", 2.0),
        ("GCC", 30.0),
        ("GCT", 3.0),
        ("GCA", 3.0),
        ("GCG", 3.0),
    ])
}

fn balanced() -> CodonCounts {
    counts(&[
        ("TTC", 10.0),
        ("TTT", 10.0),
        ("GCC", 8.0),
        ("GCT", 8.0),
        ("GCA", 8.0),
        ("GCG", 8.0),
    ])
}

fn usage() -> UsageTable {
    let mut table = UsageTable::default();
    for i in 0..5 {
        table.push(format!("biased{i}"), biased());
        table.push(format!("balanced{i}"), balanced());
    }
    table
}

#[test]
fn test_contrast_chi_square() {
    assert_abs_diff_eq!(contrast_chi_square(80.0, 4.0, 20.0, 20.0), 35.527, epsilon = 1e-3);
    assert_eq!(contrast_chi_square(0.0, 0.0, 5.0, 5.0), 0.0);
    assert_abs_diff_eq!(contrast_chi_square(10.0, 10.0, 10.0, 10.0), 0.0, epsilon = 1e-12);
}

#[test]
fn test_scaled_chi_square_bias() {
    let code = GeneticCode::universal();
    assert_abs_diff_eq!(scaled_chi_square(&balanced(), &code), 0.0, epsilon = 1e-12);
    assert!(scaled_chi_square(&biased(), &code) > 0.5);
    assert_eq!(scaled_chi_square(&[0.0; N_CODONS], &code), 0.0);
}

#[test]
fn test_axis_one_extremes_flag_preferred_codons() {
    let code = GeneticCode::universal();
    let usage = usage();
    let config = CoaConfig::for_mode(AnalysisMode::CodonFrequency);
    let table = build_contingency(&usage, &code, &config).unwrap();
    let fitted = fit_analysis(&table, &config).unwrap().fitted().unwrap();

    let result = detect_optimal_codons(&usage, &fitted, &code, GeneSelection::Count(2)).unwrap();
    assert_eq!(result.genes_per_end, 2);
    assert!(result.high_genes.iter().all(|g| g.starts_with("biased")));
    assert!(result.low_genes.iter().all(|g| g.starts_with("balanced")));
    assert!(result.high_bias > result.low_bias);

    let find = |name: &str| result.codons.iter().find(|c| c.codon == name).unwrap();
    let ttc = find("TTC");
    assert_eq!(ttc.amino_acid, "Phe");
    assert_eq!(ttc.high_count, 80.0);
    assert_eq!(ttc.low_count, 20.0);
    assert_abs_diff_eq!(ttc.high_rscu, 80.0 / 84.0 * 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ttc.low_rscu, 1.0, epsilon = 1e-9);
    assert!(ttc.optimal);
    assert!(find("GCC").optimal);
    assert!(!find("TTT").optimal);
    assert!(!find("GCT").optimal);

    let optimal: Vec<&str> = result.optimal().map(|c| c.codon.as_str()).collect();
    assert_eq!(optimal, ["TTC", "GCC"]);
    // single-codon families and stops are not compared
    assert!(result.codons.iter().all(|c| c.codon != "ATG" && c.codon != "TAA"));
    assert_eq!(result.codons.len(), 59);
}

#[test]
fn test_percent_selection_resolves_against_active_genes() {
    let code = GeneticCode::universal();
    let usage = usage();
    let config = CoaConfig::for_mode(AnalysisMode::CodonFrequency);
    let table = build_contingency(&usage, &code, &config).unwrap();
    let fitted = fit_analysis(&table, &config).unwrap().fitted().unwrap();
    let result =
        detect_optimal_codons(&usage, &fitted, &code, GeneSelection::Percent(10.0)).unwrap();
    assert_eq!(result.genes_per_end, 1);
    assert_eq!(result.high_genes.len(), 1);
    assert_eq!(result.low_genes.len(), 1);
}
