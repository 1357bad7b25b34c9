use serde::Serialize;

use crate::code::{Codon, GeneticCode, N_CODONS};
use crate::input::{CodonCounts, UsageTable};
use crate::model::config::GeneSelection;
use crate::pipeline::FittedCoa;
use crate::pipeline::stage1_contingency::{amino_counts, rscu};

/// Chi-square critical value for p < 0.01 with one degree of freedom.
pub const CHI2_P01: f64 = 6.635;

/// End of axis 1 a gene set was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisEnd {
    Negative,
    Positive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodonComparison {
    pub codon: String,
    pub amino_acid: String,
    pub high_count: f64,
    pub high_rscu: f64,
    pub low_count: f64,
    pub low_rscu: f64,
    pub delta_rscu: f64,
    pub chi_square: f64,
    pub optimal: bool,
}

/// Codon usage contrast between the two extremes of axis 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalCodons {
    pub genes_per_end: usize,
    pub high_end: AxisEnd,
    pub high_bias: f64,
    pub low_bias: f64,
    pub high_genes: Vec<String>,
    pub low_genes: Vec<String>,
    pub codons: Vec<CodonComparison>,
}

impl OptimalCodons {
    pub fn optimal(&self) -> impl Iterator<Item = &CodonComparison> {
        self.codons.iter().filter(|c| c.optimal)
    }
}

fn pool(usage: &UsageTable, genes: &[usize]) -> CodonCounts {
    let mut out = [0.0f64; N_CODONS];
    for &i in genes {
        for (acc, v) in out.iter_mut().zip(usage.counts[i].iter()) {
            *acc += v;
        }
    }
    out
}

/// Chi-square deviation from uniform synonymous usage, divided by the
/// number of codons in multi-codon families.
pub fn scaled_chi_square(counts: &CodonCounts, code: &GeneticCode) -> f64 {
    let aa = amino_counts(counts, code);
    let mut chi = 0.0;
    let mut total = 0.0;
    for codon in Codon::all() {
        if !code.is_synonymous(codon) {
            continue;
        }
        let family = aa[code.translate(codon).index()];
        if family <= 0.0 {
            continue;
        }
        let expected = family / code.synonyms(codon) as f64;
        let observed = counts[codon.index()];
        chi += (observed - expected).powi(2) / expected;
        total += observed;
    }
    if total > 0.0 { chi / total } else { 0.0 }
}

/// 2×2 chi-square of one codon against its synonyms, high set vs low set.
pub fn contrast_chi_square(high: f64, high_other: f64, low: f64, low_other: f64) -> f64 {
    let row_high = high + high_other;
    let row_low = low + low_other;
    let col_codon = high + low;
    let col_other = high_other + low_other;
    let denom = row_high * row_low * col_codon * col_other;
    if denom <= 0.0 {
        return 0.0;
    }
    let n = row_high + row_low;
    n * (high * low_other - high_other * low).powi(2) / denom
}

/// Contrasts the genes at both ends of axis 1 and flags codons used
/// significantly more often at the more biased end.
///
/// `usage` must be the table the analysis was fitted on. Returns `None`
/// when no axis was retained or fewer than two active genes exist.
pub fn detect_optimal_codons(
    usage: &UsageTable,
    fitted: &FittedCoa,
    code: &GeneticCode,
    selection: GeneSelection,
) -> Option<OptimalCodons> {
    if fitted.n_axes() == 0 {
        return None;
    }
    let active = &fitted.margins().active_rows;
    let coords = &fitted.coordinates().rows;
    let mut order: Vec<usize> = (0..active.len()).collect();
    order.sort_by(|&a, &b| coords.get(a, 0).total_cmp(&coords.get(b, 0)));

    let n = selection.resolve(order.len());
    if n == 0 {
        return None;
    }
    let negative: Vec<usize> = order[..n].iter().map(|&ai| active[ai]).collect();
    let positive: Vec<usize> = order[order.len() - n..]
        .iter()
        .rev()
        .map(|&ai| active[ai])
        .collect();

    let negative_counts = pool(usage, &negative);
    let positive_counts = pool(usage, &positive);
    let negative_bias = scaled_chi_square(&negative_counts, code);
    let positive_bias = scaled_chi_square(&positive_counts, code);

    let (high_end, high, low, high_counts, low_counts, high_bias, low_bias) =
        if positive_bias >= negative_bias {
            (
                AxisEnd::Positive,
                positive,
                negative,
                positive_counts,
                negative_counts,
                positive_bias,
                negative_bias,
            )
        } else {
            (
                AxisEnd::Negative,
                negative,
                positive,
                negative_counts,
                positive_counts,
                negative_bias,
                positive_bias,
            )
        };

    let high_rscu = rscu(&high_counts, code);
    let low_rscu = rscu(&low_counts, code);
    let family_high = amino_counts(&high_counts, code);
    let family_low = amino_counts(&low_counts, code);

    let mut codons = Vec::new();
    for codon in Codon::all() {
        if !code.is_synonymous(codon) {
            continue;
        }
        let aa = code.translate(codon);
        let h = high_counts[codon.index()];
        let l = low_counts[codon.index()];
        let chi_square = contrast_chi_square(
            h,
            family_high[aa.index()] - h,
            l,
            family_low[aa.index()] - l,
        );
        let delta_rscu = high_rscu[codon.index()] - low_rscu[codon.index()];
        codons.push(CodonComparison {
            codon: codon.name(),
            amino_acid: aa.three_letter().to_string(),
            high_count: h,
            high_rscu: high_rscu[codon.index()],
            low_count: l,
            low_rscu: low_rscu[codon.index()],
            delta_rscu,
            chi_square,
            optimal: delta_rscu > 0.0 && chi_square > CHI2_P01,
        });
    }

    let genes = fitted.genes();
    let out = OptimalCodons {
        genes_per_end: n,
        high_end,
        high_bias,
        low_bias,
        high_genes: high.iter().map(|&i| genes[i].clone()).collect(),
        low_genes: low.iter().map(|&i| genes[i].clone()).collect(),
        codons,
    };
    tracing::info!(
        selection = %selection,
        genes_per_end = n,
        high_end = ?out.high_end,
        optimal = out.optimal().count(),
        "axis 1 optimal codon contrast"
    );
    Some(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_optimal.rs"]
mod tests;
