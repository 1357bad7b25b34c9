use std::collections::HashSet;
use std::io::BufRead;

use crate::code::{Codon, N_CODONS};
use crate::input::InputError;

pub type CodonCounts = [f64; N_CODONS];

/// Per-gene codon counts read from a usage table.
#[derive(Debug, Clone, Default)]
pub struct UsageTable {
    pub genes: Vec<String>,
    pub counts: Vec<CodonCounts>,
}

impl UsageTable {
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn push(&mut self, gene: impl Into<String>, counts: CodonCounts) {
        self.genes.push(gene.into());
        self.counts.push(counts);
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(|c: char| c == '\t' || c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Reads a header-led codon count table.
///
/// The first column holds the gene identifier; every other header field
/// must name a codon, and all 64 codons must appear exactly once.
pub fn parse_usage_table<R: BufRead>(mut reader: R) -> Result<UsageTable, InputError> {
    let mut buf = String::new();
    let mut line_no = 0usize;
    let mut layout: Option<Vec<Codon>> = None;
    let mut table = UsageTable::default();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields = split_fields(line);

        if layout.is_none() {
            layout = Some(parse_header(&fields, line_no)?);
            continue;
        }
        let columns = layout.as_deref().unwrap_or_default();

        if fields.len() != columns.len() + 1 {
            return Err(InputError::Parse {
                line: line_no,
                msg: format!(
                    "expected {} fields, found {}",
                    columns.len() + 1,
                    fields.len()
                ),
            });
        }

        let mut counts = [0.0f64; N_CODONS];
        for (codon, raw) in columns.iter().zip(&fields[1..]) {
            let value: f64 = raw.parse().map_err(|_| InputError::Parse {
                line: line_no,
                msg: format!("invalid count {raw:?} for codon {codon}"),
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(InputError::Parse {
                    line: line_no,
                    msg: format!("count for codon {codon} must be a non-negative number"),
                });
            }
            counts[codon.index()] = value;
        }
        table.push(fields[0], counts);
    }

    if layout.is_none() {
        return Err(InputError::InvalidInput(
            "usage table has no header".to_string(),
        ));
    }
    if table.is_empty() {
        return Err(InputError::InvalidInput(
            "usage table has no gene rows".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(table.len());
    for gene in &table.genes {
        if !seen.insert(gene.as_str()) {
            tracing::warn!(gene = %gene, "duplicate gene identifier in usage table");
        }
    }

    Ok(table)
}

fn parse_header(fields: &[&str], line_no: usize) -> Result<Vec<Codon>, InputError> {
    if fields.len() < 2 {
        return Err(InputError::Parse {
            line: line_no,
            msg: "header must contain a gene column followed by codon columns".to_string(),
        });
    }
    let mut seen = [false; N_CODONS];
    let mut columns = Vec::with_capacity(fields.len() - 1);
    for name in &fields[1..] {
        let codon = Codon::parse(name).ok_or_else(|| InputError::Parse {
            line: line_no,
            msg: format!("header field {name:?} is not a codon"),
        })?;
        if seen[codon.index()] {
            return Err(InputError::Parse {
                line: line_no,
                msg: format!("codon {codon} appears twice in header"),
            });
        }
        seen[codon.index()] = true;
        columns.push(codon);
    }
    let missing: Vec<String> = Codon::all()
        .filter(|c| !seen[c.index()])
        .map(Codon::name)
        .collect();
    if !missing.is_empty() {
        return Err(InputError::Parse {
            line: line_no,
            msg: format!("header is missing codons: {}", missing.join(",")),
        });
    }
    Ok(columns)
}
