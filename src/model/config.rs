use crate::pipeline::stage3_diagonalize::EigenSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    CodonFrequency,
    Rscu,
    AminoAcid,
}

impl AnalysisMode {
    /// Upper bound on retained axes for this mode.
    pub fn axis_cap(self) -> usize {
        match self {
            AnalysisMode::CodonFrequency | AnalysisMode::Rscu => 59,
            AnalysisMode::AminoAcid => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnalysisMode::CodonFrequency => "codon usage",
            AnalysisMode::Rscu => "relative synonymous codon usage",
            AnalysisMode::AminoAcid => "amino acid usage",
        }
    }

    pub fn is_codon_based(self) -> bool {
        !matches!(self, AnalysisMode::AminoAcid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    Standard,
    Expert,
}

/// How many genes to take from each end of axis 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneSelection {
    Count(usize),
    Percent(f64),
}

impl GeneSelection {
    pub fn resolve(self, n_genes: usize) -> usize {
        let n = match self {
            GeneSelection::Count(n) => n,
            GeneSelection::Percent(p) => ((n_genes as f64) * p / 100.0).round() as usize,
        };
        n.max(1).min(n_genes / 2)
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if let Some(pct) = raw.strip_suffix('%') {
            let value: f64 = pct
                .trim()
                .parse()
                .map_err(|_| format!("invalid percentage: {raw}"))?;
            if !(value > 0.0 && value <= 50.0) {
                return Err(format!("percentage must be in (0, 50]: {raw}"));
            }
            return Ok(GeneSelection::Percent(value));
        }
        let value: usize = raw
            .parse()
            .map_err(|_| format!("invalid gene count: {raw}"))?;
        if value == 0 {
            return Err("gene count must be positive".to_string());
        }
        Ok(GeneSelection::Count(value))
    }
}

impl std::fmt::Display for GeneSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneSelection::Count(n) => write!(f, "{n}"),
            GeneSelection::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Per-analysis settings, fixed once the analysis starts.
#[derive(Debug, Clone)]
pub struct CoaConfig {
    pub mode: AnalysisMode,
    pub genetic_code: usize,
    pub keep_singletons: bool,
    pub axes: usize,
    pub level: DetailLevel,
    pub optimal_genes: GeneSelection,
    pub eigen: EigenSettings,
}

impl CoaConfig {
    pub fn for_mode(mode: AnalysisMode) -> Self {
        Self {
            mode,
            genetic_code: 0,
            keep_singletons: false,
            axes: mode.axis_cap(),
            level: DetailLevel::Standard,
            optimal_genes: GeneSelection::Percent(10.0),
            eigen: EigenSettings::default(),
        }
    }

    pub fn expert(mut self) -> Self {
        self.level = DetailLevel::Expert;
        self
    }

    pub fn with_axes(mut self, axes: usize) -> Self {
        self.axes = axes;
        self
    }
}
