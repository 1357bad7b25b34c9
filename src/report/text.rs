use crate::model::config::DetailLevel;
use crate::pipeline::stage3_diagonalize::Side;
use crate::report::{
    NamedContribution, REPORT_ID_WIDTH, SummaryData, format_f64_6, format_percent, truncate_id,
};

/// Contribution tables list at most this many axes; summary.json carries all.
const TABLE_AXES: usize = 4;

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();
    let mut section = 0usize;
    let mut heading = |out: &mut String, title: &str| {
        section += 1;
        out.push_str(&format!("{}. {}\n", section, title));
    };

    out.push_str("Codon Usage Correspondence Analysis Report\n");
    out.push_str("==========================================\n\n");

    heading(&mut out, "Input");
    out.push_str(&format!("Usage table: {}\n", data.table.input));
    out.push_str(&format!("Analysis: {}\n", mode_label(data)));
    out.push_str(&format!("Genetic code: {}\n", data.genetic_code));
    out.push_str(&format!(
        "Genes: {} ({} active)\n",
        data.table.genes_total, data.table.genes_active
    ));
    out.push_str(&format!(
        "Variables: {} ({} active)\n",
        data.table.variables_total, data.table.variables_active
    ));
    if !data.table.variables_excluded.is_empty() {
        out.push_str(&format!(
            "Excluded variables: {}\n",
            data.table.variables_excluded.join(", ")
        ));
    }
    if !data.table.genes_excluded.is_empty() {
        let ids = data
            .table
            .genes_excluded
            .iter()
            .map(|id| truncate_id(id, REPORT_ID_WIDTH))
            .collect::<Vec<_>>();
        out.push_str(&format!("Excluded genes (no usage): {}\n", ids.join(", ")));
    }
    out.push('\n');

    heading(&mut out, "Principal axes");
    out.push_str(&format!(
        "Axes retained: {} (requested {})\n",
        data.fit.axes_retained, data.fit.axes_requested
    ));
    out.push_str(&format!(
        "Diagonalized: {} cross-product, {} Jacobi sweeps\n",
        match data.fit.diagonalized {
            Side::Variables => "variable",
            Side::Genes => "gene",
        },
        data.fit.sweeps
    ));
    out.push_str(&format!(
        "Total inertia: {}\n",
        format_f64_6(data.fit.total_inertia)
    ));
    out.push_str("axis\teigenvalue\tinertia\tcumulative\n");
    for axis in &data.fit.axes {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            axis.axis,
            format_f64_6(axis.eigenvalue),
            format_percent(axis.percent),
            format_percent(axis.cumulative_percent)
        ));
    }
    out.push('\n');

    if let Some(rows) = &data.gene_contributions {
        heading(&mut out, "Gene contributions");
        push_contribution_table(&mut out, rows, data.fit.axes_retained);
        out.push('\n');
    }
    if let Some(rows) = &data.variable_contributions {
        heading(&mut out, "Variable contributions");
        push_contribution_table(&mut out, rows, data.fit.axes_retained);
        out.push('\n');
    }

    if let Some(supp) = &data.supplementary {
        heading(&mut out, "Supplementary genes");
        out.push_str(&format!("Usage table: {}\n", supp.input));
        out.push_str(&format!("Projected: {}\n", supp.projected));
        out.push_str(&format!("Skipped: {}\n", supp.skipped.len()));
        for row in &supp.skipped {
            out.push_str(&format!(
                "  {}: {}\n",
                truncate_id(&row.gene, REPORT_ID_WIDTH),
                row.reason
            ));
        }
        out.push('\n');
    }

    if let Some(opt) = &data.optimal {
        heading(&mut out, "Axis 1 optimal codons");
        out.push_str(&format!(
            "Genes per end: {}; high-bias end: {:?} (scaled chi-square {} vs {})\n",
            opt.genes_per_end,
            opt.high_end,
            format_f64_6(opt.high_bias),
            format_f64_6(opt.low_bias)
        ));
        if opt.optimal_codons.is_empty() {
            out.push_str("Putative optimal codons: none at p < 0.01\n");
        } else {
            out.push_str(&format!(
                "Putative optimal codons (p < 0.01): {}\n",
                opt.optimal_codons.join(", ")
            ));
        }
        out.push('\n');
    }

    out
}

fn mode_label(data: &SummaryData) -> String {
    match data.detail {
        DetailLevel::Standard => data.mode.label().to_string(),
        DetailLevel::Expert => format!("{} (expert)", data.mode.label()),
    }
}

fn push_contribution_table(out: &mut String, rows: &[NamedContribution], n_axes: usize) {
    let shown = n_axes.min(TABLE_AXES);
    let mut header = vec![
        format!("{:<width$}", "id", width = REPORT_ID_WIDTH),
        "mass".to_string(),
        "quality".to_string(),
        "inertia".to_string(),
    ];
    for k in 1..=shown {
        header.push(format!("abs{}", k));
        header.push(format!("rel{}", k));
    }
    out.push_str(&header.join("\t"));
    out.push('\n');

    for row in rows {
        let mut fields = vec![
            format!(
                "{:<width$}",
                truncate_id(&row.id, REPORT_ID_WIDTH),
                width = REPORT_ID_WIDTH
            ),
            format_f64_6(row.mass),
            format_f64_6(row.contribution.quality),
            format_f64_6(row.contribution.inertia_share),
        ];
        for k in 0..shown {
            let abs = row.contribution.absolute.get(k).copied().unwrap_or(0.0);
            let rel = row.contribution.relative.get(k).copied().unwrap_or(0.0);
            fields.push(format_f64_6(abs));
            fields.push(format_f64_6(rel));
        }
        out.push_str(&fields.join("\t"));
        out.push('\n');
    }
}
