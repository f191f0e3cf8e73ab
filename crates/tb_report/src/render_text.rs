//! Plain-text renderer: the shareable winners message, optionally followed
//! by the payout table.

use crate::{ReportModel, WinnerLine};

/// The winners message verbatim: header, one `*prize:*` block per winner
/// in ledger order with the name indented beneath, closing line. No
/// trailing newline; single asterisks are messenger-style emphasis.
pub fn winners_share_text(winners: &[WinnerLine]) -> String {
    let mut message = String::from("Quick Tambola - Winners!\n\n");
    if winners.is_empty() {
        message.push_str("No winners declared yet.");
        return message;
    }
    message.push_str("Congratulations to our amazing winners:\n\n");
    for w in winners {
        message.push_str(&format!("*{}:*\n", w.prize));
        message.push_str(&format!("    {}\n\n", w.name));
    }
    message.push_str("Thanks for playing!");
    message
}

/// Full text report: share message plus the payout table when a pool is
/// configured. Ends with a newline.
pub fn render_report_text(m: &ReportModel) -> String {
    let mut out = winners_share_text(&m.winners);
    out.push('\n');
    if m.prize_pool > 0 {
        out.push('\n');
        out.push_str(&payout_table(m));
    }
    out
}

fn payout_table(m: &ReportModel) -> String {
    let mut t = format!("Payouts (pool {}, step {}):\n", m.prize_pool, m.adjust_step);
    let width = m
        .payouts
        .iter()
        .map(|p| p.category.len())
        .max()
        .unwrap_or(0);
    for p in &m.payouts {
        t.push_str(&format!("  {:<width$}  {:>6}\n", p.category, p.amount));
    }
    if m.undistributed != 0 {
        t.push_str(&format!("  undistributed: {}\n", m.undistributed));
    }
    t
}
