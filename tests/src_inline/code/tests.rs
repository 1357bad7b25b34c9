use super::*;

#[test]
fn test_codon_order_matches_usage_table_layout() {
    let names: Vec<String> = Codon::all().take(6).map(Codon::name).collect();
    assert_eq!(names, ["TTT", "TCT", "TAT", "TGT", "TTC", "TCC"]);
    assert_eq!(Codon::new(16).map(Codon::name).as_deref(), Some("CTT"));
    assert_eq!(Codon::new(63).map(Codon::name).as_deref(), Some("GGG"));
    assert!(Codon::new(64).is_none());
}

#[test]
fn test_codon_parse_roundtrips_every_index() {
    for codon in Codon::all() {
        assert_eq!(Codon::parse(&codon.name()), Some(codon));
    }
    assert_eq!(Codon::parse("uug"), Codon::parse("TTG"));
    assert!(Codon::parse("TTN").is_none());
    assert!(Codon::parse("TT").is_none());
}

#[test]
fn test_universal_code_families() {
    let code = GeneticCode::universal();
    assert_eq!(code.family_size(AminoAcid::Leu), 6);
    assert_eq!(code.family_size(AminoAcid::Ser), 6);
    assert_eq!(code.family_size(AminoAcid::Met), 1);
    assert_eq!(code.family_size(AminoAcid::Trp), 1);
    assert_eq!(code.family_size(AminoAcid::Stop), 3);
    assert_eq!(code.family_size(AminoAcid::Ile), 3);

    let total: usize = AminoAcid::ALL.iter().map(|&aa| code.family_size(aa)).sum();
    assert_eq!(total, N_CODONS);

    let tga = Codon::parse("TGA").unwrap();
    assert!(code.is_stop(tga));
    let atg = Codon::parse("ATG").unwrap();
    assert_eq!(code.translate(atg), AminoAcid::Met);
    assert!(!code.is_synonymous(atg));

    let synonymous = Codon::all().filter(|&c| code.is_synonymous(c)).count();
    assert_eq!(synonymous, 59);
}

#[test]
fn test_vertebrate_mito_reassignments() {
    let code = GeneticCode::builtin(1).unwrap();
    assert_eq!(code.translate(Codon::parse("TGA").unwrap()), AminoAcid::Trp);
    assert_eq!(code.translate(Codon::parse("ATA").unwrap()), AminoAcid::Met);
    assert!(code.is_stop(Codon::parse("AGA").unwrap()));
    assert!(code.is_stop(Codon::parse("AGG").unwrap()));
    assert_eq!(code.family_size(AminoAcid::Stop), 4);
}

#[test]
fn test_unknown_code_is_rejected() {
    let err = GeneticCode::builtin(code_count()).unwrap_err();
    assert_eq!(err, CodeError::UnknownCode(code_count()));
}

#[test]
fn test_amino_acid_labels() {
    assert_eq!(AminoAcid::Stop.three_letter(), "TER");
    assert_eq!(AminoAcid::from_index(20), Some(AminoAcid::Gly));
    assert_eq!(AminoAcid::from_index(21), None);
}
