//! Invoice HTML template for the PDF pipeline.

use crate::models::{BusinessProfile, Invoice};
use crate::services::totals;
use chrono::NaiveDate;
use rust_decimal::Decimal;

const DOCUMENT_TITLE: &str = "INVOICE";

const STYLE: &str = r##"
    @page { margin: 14mm 14mm; }
    * { box-sizing: border-box; }
    body { margin: 0; font-family: Inter, Arial, sans-serif; color: #0f172a; background: #fff; }
    :root { --accent: #2563eb; --accentSoft: #eff6ff; --accentText: #1e40af; }
    .top { display: flex; justify-content: space-between; gap: 18px; padding: 16px 0 10px; border-bottom: 3px solid var(--accentSoft); }
    .company { flex: 1; display: flex; gap: 14px; align-items: flex-start; }
    .logo { width: 62px; height: 62px; border-radius: 14px; border: 1px solid #e5e7eb; background: #fff; display: flex; align-items: center; justify-content: center; overflow: hidden; }
    .logo img { width: 100%; height: 100%; object-fit: cover; }
    .company .name { font-size: 22px; font-weight: 900; }
    .company .meta { margin-top: 6px; font-size: 12px; color: #64748b; line-height: 1.45; }
    .doccard { width: 310px; border-radius: 16px; padding: 14px 16px; background: #f8fafc; border: 1px solid #e5e7eb; }
    .doc-title { font-size: 18px; font-weight: 900; letter-spacing: 1px; }
    .doc-grid { margin-top: 10px; display: grid; grid-template-columns: 1fr 1fr; gap: 8px 12px; font-size: 12px; }
    .doc-grid .k { font-size: 11px; color: #64748b; }
    .doc-grid .v { font-weight: 800; }
    .card { background: #fff; border: 1px solid #e5e7eb; border-radius: 16px; padding: 18px; }
    .card h3 { margin: 0 0 10px; font-size: 12px; text-transform: uppercase; font-weight: 900; color: var(--accentText); }
    .muted { color: #64748b; font-size: 12px; }
    .item-name { font-weight: 800; }
    .item-sub { margin-top: 4px; font-size: 11px; color: #64748b; }
    .table-wrap { margin-top: 16px; border-radius: 16px; overflow: hidden; border: 1px solid #dbeafe; }
    table { width: 100%; border-collapse: collapse; }
    thead th { padding: 14px; font-size: 11px; background: var(--accentSoft); color: var(--accentText); }
    tbody td { padding: 14px; font-size: 12.5px; border-bottom: 1px solid #eef2f7; }
    .right { text-align: right; }
    .strong { font-weight: 900; }
    .bottom { margin-top: 16px; display: grid; grid-template-columns: 1fr 360px; gap: 14px; }
    .totals { border: 1px solid #dbeafe; border-radius: 16px; padding: 18px; }
    .totals .r { display: flex; justify-content: space-between; padding: 8px 0; }
    .grand { margin-top: 10px; background: var(--accent); color: #fff; border-radius: 14px; padding: 12px; font-weight: 900; display: flex; justify-content: space-between; }
    .footer { margin-top: 14px; display: flex; justify-content: space-between; font-size: 11px; color: #94a3b8; }
    .badge { padding: 6px 10px; border-radius: 999px; border: 1px solid #e5e7eb; font-weight: 800; }
"##;

/// Escape text for interpolation into HTML. Ampersand goes first so
/// already-produced entities do not get escaped twice.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Currency-aware money formatter: symbol plus two decimal places.
pub fn money(symbol: &str, amount: Decimal) -> String {
    format!("{}{:.2}", symbol, amount)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Build the printable invoice document. The seller block comes from the
/// owner's business profile; terms fall back from the invoice to the
/// profile's default terms.
pub fn build_invoice_html(invoice: &Invoice, profile: &BusinessProfile) -> String {
    let symbol = if invoice.currency.symbol.is_empty() {
        "₹"
    } else {
        invoice.currency.symbol.as_str()
    };

    let logo = match profile.logo_url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => format!(r#"<img src="{}" />"#, escape_html(url)),
        None => {
            let initial = profile
                .company_name
                .trim()
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_else(|| "B".to_string());
            format!(
                r#"<div style="font-weight:900;font-size:22px">{}</div>"#,
                escape_html(&initial)
            )
        }
    };

    let company_name = if profile.company_name.is_empty() {
        "Your Business"
    } else {
        profile.company_name.as_str()
    };

    let gstin_line = if profile.gstin.is_empty() {
        String::new()
    } else {
        format!("GSTIN: {}<br/>", escape_html(&profile.gstin))
    };

    let email_suffix = if profile.email.is_empty() {
        String::new()
    } else {
        format!(" • {}", escape_html(&profile.email))
    };

    let mut items_rows = String::new();
    for (idx, item) in invoice.items.iter().enumerate() {
        let line = totals::line_totals(item.qty, item.rate, item.tax_percent, item.discount);
        items_rows.push_str(&format!(
            r##"
        <tr>
          <td class="muted">{idx}</td>
          <td>
            <div class="item-name">{name}</div>
            <div class="item-sub">Qty {qty} • Rate {rate} • Tax {tax_percent}% • Disc {discount}</div>
          </td>
          <td class="right">{qty}</td>
          <td class="right">{rate}</td>
          <td class="right">{tax}</td>
          <td class="right">{discount}</td>
          <td class="right strong">{total}</td>
        </tr>"##,
            idx = idx + 1,
            name = escape_html(&item.name),
            qty = item.qty.normalize(),
            rate = money(symbol, item.rate),
            tax_percent = item.tax_percent.normalize(),
            tax = money(symbol, line.tax),
            discount = money(symbol, item.discount),
            total = money(symbol, item.line_total),
        ));
    }

    let issue_date = format_date(invoice.issue_date);
    let due_date = invoice
        .due_date
        .map(format_date)
        .unwrap_or_else(|| "-".to_string());

    let notes = if invoice.notes.is_empty() {
        "—".to_string()
    } else {
        escape_html(&invoice.notes)
    };

    let resolved_terms = [invoice.terms.trim(), profile.default_terms.trim()]
        .into_iter()
        .find(|t| !t.is_empty())
        .unwrap_or("—");

    format!(
        r##"<!doctype html>
<html>
<head>
  <meta charset="utf-8" />
  <style>{style}</style>
</head>
<body>
  <div class="page">
    <div class="top">
      <div class="company">
        <div class="logo">{logo}</div>
        <div>
          <div class="name">{company_name}</div>
          <div class="meta">
            {gstin_line}{address}<br/>
            {phone}{email_suffix}
          </div>
        </div>
      </div>
      <div class="doccard">
        <div class="doc-title">{title}</div>
        <div class="doc-grid">
          <div><div class="k">Number</div><div class="v">{number}</div></div>
          <div><div class="k">Issue Date</div><div class="v">{issue_date}</div></div>
          <div><div class="k">Due Date</div><div class="v">{due_date}</div></div>
          <div><div class="k">Currency</div><div class="v">{currency_code} ({currency_symbol})</div></div>
        </div>
      </div>
    </div>
    <div class="table-wrap">
      <table>
        <thead>
          <tr>
            <th>#</th><th>Item</th><th class="right">Qty</th>
            <th class="right">Rate</th><th class="right">Tax</th>
            <th class="right">Disc</th><th class="right">Total</th>
          </tr>
        </thead>
        <tbody>{items_rows}
        </tbody>
      </table>
    </div>
    <div class="bottom">
      <div class="card">
        <h3>Notes</h3>
        <p>{notes}</p>
        <h3>Terms</h3>
        <p>{terms}</p>
      </div>
      <div class="totals">
        <div class="r"><span>Subtotal</span><b>{subtotal}</b></div>
        <div class="r"><span>Discount</span><b>- {discount_total}</b></div>
        <div class="r"><span>Tax</span><b>{tax_total}</b></div>
        <div class="grand"><span>Grand Total</span><span>{grand_total}</span></div>
      </div>
    </div>
    <div class="footer">
      <div class="badge">Generated by InvoiceDesk</div>
      <div>{title} • {number}</div>
    </div>
  </div>
</body>
</html>
"##,
        style = STYLE,
        logo = logo,
        company_name = escape_html(company_name),
        gstin_line = gstin_line,
        address = escape_html(&profile.address),
        phone = escape_html(&profile.phone),
        email_suffix = email_suffix,
        title = DOCUMENT_TITLE,
        number = escape_html(&invoice.document_number),
        issue_date = issue_date,
        due_date = due_date,
        currency_code = escape_html(&invoice.currency.code),
        currency_symbol = escape_html(symbol),
        items_rows = items_rows,
        notes = notes,
        terms = escape_html(resolved_terms),
        subtotal = money(symbol, invoice.subtotal),
        discount_total = money(symbol, invoice.discount_total),
        tax_total = money(symbol, invoice.tax_total),
        grand_total = money(symbol, invoice.grand_total),
    )
}
