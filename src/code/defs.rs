/// Built-in genetic code definition.
///
/// `translation` holds one amino-acid code per codon in codon index order
/// (first base slowest, then third base, then second base; bases ordered
/// T, C, A, G). Codes are 1-based positions in [`AminoAcid::ALL`](super::AminoAcid::ALL).
#[derive(Debug, Clone, Copy)]
pub struct GeneticCodeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub changes: &'static str,
    pub translation: [u8; 64],
}

#[rustfmt::skip]
const UNIVERSAL: [u8; 64] = [
    1, 6, 10, 18, 1, 6, 10, 18, 2, 6, 11, 11, 2, 6, 11, 19,
    2, 7, 12, 20, 2, 7, 12, 20, 2, 7, 13, 20, 2, 7, 13, 20,
    3, 8, 14,  6, 3, 8, 14,  6, 3, 8, 15, 20, 4, 8, 15, 20,
    5, 9, 16, 21, 5, 9, 16, 21, 5, 9, 17, 21, 5, 9, 17, 21,
];

#[rustfmt::skip]
const VERTEBRATE_MITO: [u8; 64] = [
    1, 6, 10, 18, 1, 6, 10, 18, 2, 6, 11, 19, 2, 6, 11, 19,
    2, 7, 12, 20, 2, 7, 12, 20, 2, 7, 13, 20, 2, 7, 13, 20,
    3, 8, 14,  6, 3, 8, 14,  6, 4, 8, 15, 11, 4, 8, 15, 11,
    5, 9, 16, 21, 5, 9, 16, 21, 5, 9, 17, 21, 5, 9, 17, 21,
];

#[rustfmt::skip]
const YEAST_MITO: [u8; 64] = [
    1, 6, 10, 18, 1, 6, 10, 18, 2, 6, 11, 19, 2, 6, 11, 19,
    8, 7, 12, 20, 8, 7, 12, 20, 8, 7, 13, 20, 8, 7, 13, 20,
    3, 8, 14,  6, 3, 8, 14,  6, 4, 8, 15, 20, 4, 8, 15, 20,
    5, 9, 16, 21, 5, 9, 16, 21, 5, 9, 17, 21, 5, 9, 17, 21,
];

#[rustfmt::skip]
const FUNGAL_MITO: [u8; 64] = [
    1, 6, 10, 18, 1, 6, 10, 18, 2, 6, 11, 19, 2, 6, 11, 19,
    2, 7, 12, 20, 2, 7, 12, 20, 2, 7, 13, 20, 2, 7, 13, 20,
    3, 8, 14,  6, 3, 8, 14,  6, 3, 8, 15, 20, 4, 8, 15, 20,
    5, 9, 16, 21, 5, 9, 16, 21, 5, 9, 17, 21, 5, 9, 17, 21,
];

#[rustfmt::skip]
const INSECT_MITO: [u8; 64] = [
    1, 6, 10, 18, 1, 6, 10, 18, 2, 6, 11, 19, 2, 6, 11, 19,
    2, 7, 12, 20, 2, 7, 12, 20, 2, 7, 13, 20, 2, 7, 13, 20,
    3, 8, 14,  6, 3, 8, 14,  6, 4, 8, 15,  6, 4, 8, 15,  6,
    5, 9, 16, 21, 5, 9, 16, 21, 5, 9, 17, 21, 5, 9, 17, 21,
];

#[rustfmt::skip]
const CILIATE_NUCLEAR: [u8; 64] = [
    1, 6, 10, 18, 1, 6, 10, 18, 2, 6, 13, 11, 2, 6, 13, 19,
    2, 7, 12, 20, 2, 7, 12, 20, 2, 7, 13, 20, 2, 7, 13, 20,
    3, 8, 14,  6, 3, 8, 14,  6, 3, 8, 15, 20, 4, 8, 15, 20,
    5, 9, 16, 21, 5, 9, 16, 21, 5, 9, 17, 21, 5, 9, 17, 21,
];

#[rustfmt::skip]
const EUPLOTES_NUCLEAR: [u8; 64] = [
    1, 6, 10, 18, 1, 6, 10, 18, 2, 6, 11, 18, 2, 6, 11, 19,
    2, 7, 12, 20, 2, 7, 12, 20, 2, 7, 13, 20, 2, 7, 13, 20,
    3, 8, 14,  6, 3, 8, 14,  6, 3, 8, 15, 20, 4, 8, 15, 20,
    5, 9, 16, 21, 5, 9, 16, 21, 5, 9, 17, 21, 5, 9, 17, 21,
];

#[rustfmt::skip]
const ECHINODERM_MITO: [u8; 64] = [
    1, 6, 10, 18, 1, 6, 10, 18, 2, 6, 11, 19, 2, 6, 11, 19,
    2, 7, 12, 20, 2, 7, 12, 20, 2, 7, 13, 20, 2, 7, 13, 20,
    3, 8, 14,  6, 3, 8, 14,  6, 3, 8, 14,  6, 4, 8, 15,  6,
    5, 9, 16, 21, 5, 9, 16, 21, 5, 9, 17, 21, 5, 9, 17, 21,
];

const BUILTIN_CODES: &[GeneticCodeDef] = &[
    GeneticCodeDef {
        id: "universal",
        name: "Universal Genetic code",
        changes: "TGA=* TAA=* TAG=*",
        translation: UNIVERSAL,
    },
    GeneticCodeDef {
        id: "vertebrate_mito",
        name: "Vertebrate Mitochondrial code",
        changes: "AGR=* ATA=M TGA=W",
        translation: VERTEBRATE_MITO,
    },
    GeneticCodeDef {
        id: "yeast_mito",
        name: "Yeast Mitochondrial code",
        changes: "CTN=T ATA=M TGA=W",
        translation: YEAST_MITO,
    },
    GeneticCodeDef {
        id: "fungal_mito",
        name: "Filamentous fungi Mitochondrial code",
        changes: "TGA=W",
        translation: FUNGAL_MITO,
    },
    GeneticCodeDef {
        id: "insect_mito",
        name: "Insects and Plathyhelminthes Mitochondrial code",
        changes: "ATA=M TGA=W AGR=S",
        translation: INSECT_MITO,
    },
    GeneticCodeDef {
        id: "ciliate_nuclear",
        name: "Nuclear code of Ciliata",
        changes: "TAA=Q TAG=Q",
        translation: CILIATE_NUCLEAR,
    },
    GeneticCodeDef {
        id: "euplotes_nuclear",
        name: "Nuclear code of Euplotes",
        changes: "TGA=C",
        translation: EUPLOTES_NUCLEAR,
    },
    GeneticCodeDef {
        id: "echinoderm_mito",
        name: "Mitochondrial code of Echinoderms",
        changes: "TGA=W AGR=S AAA=N",
        translation: ECHINODERM_MITO,
    },
];

pub fn builtin_codes() -> &'static [GeneticCodeDef] {
    BUILTIN_CODES
}
