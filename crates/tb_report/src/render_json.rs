//! Report JSON renderer (cover → winners → payouts → integrity).
//!
//! Section and key order is fixed by insertion; build with `serde_json`'s
//! `preserve_order` feature so `Map` keeps it. This document is for
//! reading, not hashing: the hashed artifact stays `round_summary.json`.

use serde_json::{Map as JsonMap, Value};

use crate::{PayoutLine, ReportModel, WinnerLine};

/// Build the top-level report object in fixed order.
pub fn render_report_json(m: &ReportModel) -> Value {
    let mut root = obj();
    root.insert("cover".into(), cover_json(m));
    root.insert("winners".into(), winners_json(&m.winners));
    root.insert("payouts".into(), payouts_json(m));
    root.insert("integrity".into(), integrity_json(m));
    Value::Object(root)
}

/* ----------------------- sections ----------------------- */

fn cover_json(m: &ReportModel) -> Value {
    // title → engine → draw_seed → numbers_called → total_numbers
    let mut o = obj();
    o.insert("title".into(), Value::String("Quick Tambola - Winners!".into()));
    o.insert("engine".into(), Value::String(m.engine.clone()));
    o.insert("draw_seed".into(), Value::from(m.draw_seed));
    o.insert("numbers_called".into(), Value::from(m.numbers_called as u64));
    o.insert("total_numbers".into(), Value::from(u64::from(m.total_numbers)));
    Value::Object(o)
}

fn winners_json(winners: &[WinnerLine]) -> Value {
    let rows = winners
        .iter()
        .map(|w| {
            let mut o = obj();
            o.insert("id".into(), Value::from(w.id));
            o.insert("prize".into(), Value::String(w.prize.clone()));
            o.insert("name".into(), Value::String(w.name.clone()));
            Value::Object(o)
        })
        .collect();
    Value::Array(rows)
}

fn payouts_json(m: &ReportModel) -> Value {
    // pool → step → rows → undistributed (only when nonzero)
    let mut o = obj();
    o.insert("pool".into(), Value::from(m.prize_pool));
    o.insert("step".into(), Value::from(m.adjust_step));
    o.insert("rows".into(), payout_rows(&m.payouts));
    if m.undistributed != 0 {
        o.insert("undistributed".into(), Value::from(m.undistributed));
    }
    Value::Object(o)
}

fn payout_rows(payouts: &[PayoutLine]) -> Value {
    let rows = payouts
        .iter()
        .map(|p| {
            let mut o = obj();
            o.insert("category".into(), Value::String(p.category.clone()));
            o.insert("amount".into(), Value::from(p.amount));
            Value::Object(o)
        })
        .collect();
    Value::Array(rows)
}

fn integrity_json(m: &ReportModel) -> Value {
    let mut o = obj();
    o.insert("registry_sha256".into(), Value::String(m.registry_sha256.clone()));
    Value::Object(o)
}

#[inline]
fn obj() -> JsonMap<String, Value> {
    JsonMap::new()
}
