pub mod defs;

use std::fmt;

use defs::{GeneticCodeDef, builtin_codes};

/// Nucleotide order used for codon indexing.
const BASES: [u8; 4] = [b'T', b'C', b'A', b'G'];

pub const N_CODONS: usize = 64;
pub const N_AMINO: usize = 21;

/// Codon index in `0..64`.
///
/// Ordering follows the classic codon-usage table layout: the first base
/// varies slowest, then the third, then the second (TTT, TCT, TAT, TGT,
/// TTC, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Codon(u8);

impl Codon {
    pub fn new(index: usize) -> Option<Self> {
        (index < N_CODONS).then_some(Codon(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Codon> {
        (0..N_CODONS as u8).map(Codon)
    }

    /// Parses a codon name; accepts DNA or RNA letters in either case.
    pub fn parse(name: &str) -> Option<Self> {
        let bytes = name.trim().as_bytes();
        if bytes.len() != 3 {
            return None;
        }
        let mut pos = [0usize; 3];
        for (slot, &b) in pos.iter_mut().zip(bytes) {
            let upper = match b.to_ascii_uppercase() {
                b'U' => b'T',
                other => other,
            };
            *slot = BASES.iter().position(|&base| base == upper)?;
        }
        Codon::new(pos[0] * 16 + pos[2] * 4 + pos[1])
    }

    pub fn bases(self) -> [u8; 3] {
        let i = self.index();
        [BASES[i / 16], BASES[i % 4], BASES[(i / 4) % 4]]
    }

    pub fn name(self) -> String {
        self.bases().iter().map(|&b| b as char).collect()
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AminoAcid {
    Phe,
    Leu,
    Ile,
    Met,
    Val,
    Ser,
    Pro,
    Thr,
    Ala,
    Tyr,
    Stop,
    His,
    Gln,
    Asn,
    Lys,
    Asp,
    Glu,
    Cys,
    Trp,
    Arg,
    Gly,
}

impl AminoAcid {
    pub const ALL: [AminoAcid; N_AMINO] = [
        AminoAcid::Phe,
        AminoAcid::Leu,
        AminoAcid::Ile,
        AminoAcid::Met,
        AminoAcid::Val,
        AminoAcid::Ser,
        AminoAcid::Pro,
        AminoAcid::Thr,
        AminoAcid::Ala,
        AminoAcid::Tyr,
        AminoAcid::Stop,
        AminoAcid::His,
        AminoAcid::Gln,
        AminoAcid::Asn,
        AminoAcid::Lys,
        AminoAcid::Asp,
        AminoAcid::Glu,
        AminoAcid::Cys,
        AminoAcid::Trp,
        AminoAcid::Arg,
        AminoAcid::Gly,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn three_letter(self) -> &'static str {
        const NAMES: [&str; N_AMINO] = [
            "Phe", "Leu", "Ile", "Met", "Val", "Ser", "Pro", "Thr", "Ala", "Tyr", "TER", "His",
            "Gln", "Asn", "Lys", "Asp", "Glu", "Cys", "Trp", "Arg", "Gly",
        ];
        NAMES[self.index()]
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.three_letter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("unknown genetic code {0} (expected an index below {max})", max = code_count())]
    UnknownCode(usize),
    #[error("genetic code {code} has an invalid entry for codon {codon}")]
    BadTranslation { code: &'static str, codon: usize },
}

/// Translation and synonymy tables for one genetic code.
///
/// Built once per analysis and passed by reference.
#[derive(Debug, Clone)]
pub struct GeneticCode {
    pub id: &'static str,
    pub name: &'static str,
    pub changes: &'static str,
    translation: [AminoAcid; N_CODONS],
    family_size: [u8; N_AMINO],
}

impl GeneticCode {
    pub fn builtin(index: usize) -> Result<Self, CodeError> {
        let def = builtin_codes()
            .get(index)
            .ok_or(CodeError::UnknownCode(index))?;
        Self::from_def(def)
    }

    pub fn universal() -> Self {
        match Self::builtin(0) {
            Ok(code) => code,
            Err(err) => unreachable!("built-in universal code is valid: {err}"),
        }
    }

    pub fn from_def(def: &GeneticCodeDef) -> Result<Self, CodeError> {
        let mut translation = [AminoAcid::Stop; N_CODONS];
        let mut family_size = [0u8; N_AMINO];
        for (codon, &raw) in def.translation.iter().enumerate() {
            let aa = (raw as usize)
                .checked_sub(1)
                .and_then(AminoAcid::from_index)
                .ok_or(CodeError::BadTranslation {
                    code: def.id,
                    codon,
                })?;
            translation[codon] = aa;
            family_size[aa.index()] += 1;
        }
        Ok(Self {
            id: def.id,
            name: def.name,
            changes: def.changes,
            translation,
            family_size,
        })
    }

    pub fn translate(&self, codon: Codon) -> AminoAcid {
        self.translation[codon.index()]
    }

    pub fn is_stop(&self, codon: Codon) -> bool {
        self.translate(codon) == AminoAcid::Stop
    }

    /// Number of codons encoding `aa` under this code.
    pub fn family_size(&self, aa: AminoAcid) -> usize {
        self.family_size[aa.index()] as usize
    }

    /// Number of codons synonymous with `codon`, itself included.
    pub fn synonyms(&self, codon: Codon) -> usize {
        self.family_size(self.translate(codon))
    }

    /// Sense codons belonging to a family with more than one member.
    pub fn is_synonymous(&self, codon: Codon) -> bool {
        !self.is_stop(codon) && self.synonyms(codon) > 1
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.changes)
    }
}

pub fn code_count() -> usize {
    builtin_codes().len()
}

#[cfg(test)]
#[path = "../../tests/src_inline/code/tests.rs"]
mod tests;
