use crate::code::{AminoAcid, Codon, GeneticCode, N_AMINO, N_CODONS};
use crate::input::{CodonCounts, UsageTable};
use crate::model::config::{AnalysisMode, CoaConfig};
use crate::model::matrix::UsageMatrix;
use crate::pipeline::CoaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Codon(Codon),
    Amino(AminoAcid),
}

impl Variable {
    pub fn label(&self) -> String {
        match self {
            Variable::Codon(c) => c.name(),
            Variable::Amino(aa) => aa.three_letter().to_string(),
        }
    }
}

/// Gene × variable table handed to the margin scaler.
#[derive(Debug, Clone)]
pub struct ContingencyTable {
    pub mode: AnalysisMode,
    pub genes: Vec<String>,
    pub variables: Vec<Variable>,
    pub matrix: UsageMatrix,
}

/// Variables retained for `mode` under `code`, in table order.
///
/// Stop codons are always dropped; codons of single-codon amino acids are
/// dropped unless `keep_singletons` is set.
pub fn select_variables(mode: AnalysisMode, code: &GeneticCode, keep_singletons: bool) -> Vec<Variable> {
    match mode {
        AnalysisMode::CodonFrequency | AnalysisMode::Rscu => Codon::all()
            .filter(|&c| !code.is_stop(c))
            .filter(|&c| keep_singletons || code.synonyms(c) > 1)
            .map(Variable::Codon)
            .collect(),
        AnalysisMode::AminoAcid => AminoAcid::ALL
            .iter()
            .copied()
            .filter(|&aa| aa != AminoAcid::Stop && code.family_size(aa) > 0)
            .map(Variable::Amino)
            .collect(),
    }
}

/// Variables removed by [`select_variables`], for reporting.
pub fn excluded_variables(mode: AnalysisMode, code: &GeneticCode, keep_singletons: bool) -> Vec<Variable> {
    let kept = select_variables(mode, code, keep_singletons);
    let all: Vec<Variable> = match mode {
        AnalysisMode::CodonFrequency | AnalysisMode::Rscu => {
            Codon::all().map(Variable::Codon).collect()
        }
        AnalysisMode::AminoAcid => AminoAcid::ALL.iter().copied().map(Variable::Amino).collect(),
    };
    all.into_iter().filter(|v| !kept.contains(v)).collect()
}

pub fn amino_counts(counts: &CodonCounts, code: &GeneticCode) -> [f64; N_AMINO] {
    let mut out = [0.0f64; N_AMINO];
    for codon in Codon::all() {
        out[code.translate(codon).index()] += counts[codon.index()];
    }
    out
}

/// Relative synonymous codon usage; zero when the amino acid is unused.
pub fn rscu(counts: &CodonCounts, code: &GeneticCode) -> [f64; N_CODONS] {
    let aa = amino_counts(counts, code);
    let mut out = [0.0f64; N_CODONS];
    for codon in Codon::all() {
        let family = code.translate(codon);
        let total = aa[family.index()];
        if total > 0.0 {
            out[codon.index()] = counts[codon.index()] / total * code.synonyms(codon) as f64;
        }
    }
    out
}

fn project_row(
    counts: &CodonCounts,
    mode: AnalysisMode,
    code: &GeneticCode,
    variables: &[Variable],
) -> Vec<f64> {
    match mode {
        AnalysisMode::CodonFrequency => variables
            .iter()
            .map(|v| match v {
                Variable::Codon(c) => counts[c.index()],
                Variable::Amino(_) => 0.0,
            })
            .collect(),
        AnalysisMode::Rscu => {
            let values = rscu(counts, code);
            variables
                .iter()
                .map(|v| match v {
                    Variable::Codon(c) => values[c.index()],
                    Variable::Amino(_) => 0.0,
                })
                .collect()
        }
        AnalysisMode::AminoAcid => {
            let values = amino_counts(counts, code);
            variables
                .iter()
                .map(|v| match v {
                    Variable::Amino(aa) => values[aa.index()],
                    Variable::Codon(_) => 0.0,
                })
                .collect()
        }
    }
}

pub fn build_contingency(
    usage: &UsageTable,
    code: &GeneticCode,
    config: &CoaConfig,
) -> Result<ContingencyTable, CoaError> {
    let variables = select_variables(config.mode, code, config.keep_singletons);
    let rows: Vec<Vec<f64>> = usage
        .counts
        .iter()
        .map(|counts| project_row(counts, config.mode, code, &variables))
        .collect();
    let matrix = UsageMatrix::from_rows(&rows, variables.len())?;

    tracing::debug!(
        mode = config.mode.label(),
        genes = matrix.n_rows(),
        variables = matrix.n_cols(),
        "built contingency table"
    );

    Ok(ContingencyTable {
        mode: config.mode,
        genes: usage.genes.clone(),
        variables,
        matrix,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_contingency.rs"]
mod tests;
