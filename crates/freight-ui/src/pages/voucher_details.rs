use freight_types::display::{format_amount, format_quantity, or_placeholder};
use freight_types::{Item, Voucher};
use leptos::prelude::*;

use crate::components::badge::Badge;

pub(crate) fn item_label(items: &[Item], itemId: u64) -> String {
    items
        .iter()
        .find(|i| i.id == itemId)
        .map(|i| i.name.clone())
        .unwrap_or_else(|| format!("Item #{itemId}"))
}

#[component]
pub fn VoucherDetails(
    voucher: Voucher,
    #[prop(into)] party_name: String,
    items: Vec<Item>,
) -> impl IntoView {
    let lines = voucher
        .items
        .iter()
        .map(|line| {
            view! {
                <tr>
                    <td>{item_label(&items, line.item_id)}</td>
                    <td class="num">{format_quantity(line.quantity)}</td>
                    <td class="num">{format_amount(line.rate)}</td>
                    <td class="num">{format!("{}%", format_quantity(line.tax_rate))}</td>
                    <td class="num">{format_amount(line.amount)}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="detail-panel">
            <section class="detail-section">
                <div class="detail-heading">
                    <h3>{voucher.display_number()}</h3>
                    <Badge variant=voucher.status.badge() label=voucher.status.as_str() />
                </div>
                <dl class="detail-grid">
                    <dt>"Type"</dt>
                    <dd>{voucher.voucher_type.title()}</dd>
                    <dt>"Date"</dt>
                    <dd>{voucher.voucher_date.format("%d %b %Y").to_string()}</dd>
                    <dt>"Party"</dt>
                    <dd>{party_name}</dd>
                    <dt>"Vehicle"</dt>
                    <dd>{or_placeholder(voucher.vehicle_number.as_deref())}</dd>
                    <dt>"Driver"</dt>
                    <dd>{or_placeholder(voucher.driver_name.as_deref())}</dd>
                    <dt>"Place of Supply"</dt>
                    <dd>{or_placeholder(voucher.place_of_supply.as_deref())}</dd>
                </dl>
            </section>
            <section class="detail-section">
                <h4>"Line Items"</h4>
                <table class="data-table compact">
                    <thead>
                        <tr>
                            <th>"Item"</th>
                            <th class="num">"Qty"</th>
                            <th class="num">"Rate"</th>
                            <th class="num">"Tax"</th>
                            <th class="num">"Amount"</th>
                        </tr>
                    </thead>
                    <tbody>{lines}</tbody>
                </table>
                <dl class="totals">
                    <dt>"Subtotal"</dt>
                    <dd>{format_amount(voucher.total_amount)}</dd>
                    <dt>"Tax"</dt>
                    <dd>{format_amount(voucher.tax_amount)}</dd>
                    <dt class="grand">"Grand Total"</dt>
                    <dd class="grand">{format_amount(voucher.grand_total)}</dd>
                </dl>
            </section>
            {voucher.notes.clone().map(|notes| view! {
                <section class="detail-section">
                    <h4>"Notes"</h4>
                    <p>{notes}</p>
                </section>
            })}
        </div>
    }
}
