use freight_types::display::{format_amount, format_quantity, or_placeholder};
use freight_types::{Branding, Item, Party, Voucher};
use leptos::prelude::*;

use super::voucher_details::item_label;

/// Paper layout of a voucher; only visible through the print stylesheet.
#[component]
pub fn PrintableVoucher(voucher: Voucher, party: Option<Party>, items: Vec<Item>) -> impl IntoView {
    let branding = Branding::from_build_env();
    let partyName = party.as_ref().map(|p| p.name.clone()).unwrap_or_default();
    let partyGstin = party.as_ref().and_then(|p| p.gstin.clone());
    let partyCity = party.as_ref().and_then(|p| p.city.clone());

    view! {
        <article class="printable-voucher">
            <header class="print-header">
                <div>
                    <h1>{branding.brand_name.clone()}</h1>
                    <p>{branding.address.clone()}</p>
                    <p>{format!("{} \u{b7} {}", branding.phone, branding.email)}</p>
                </div>
                <div class="print-title">
                    <h2>{voucher.voucher_type.title()}</h2>
                    <p>{voucher.display_number()}</p>
                    <p>{voucher.voucher_date.format("%d/%m/%Y").to_string()}</p>
                </div>
            </header>
            <section class="print-meta">
                <div>
                    <h3>"Billed To"</h3>
                    <p class="strong">{partyName}</p>
                    <p>{or_placeholder(partyCity.as_deref())}</p>
                    <p>{format!("GSTIN: {}", or_placeholder(partyGstin.as_deref()))}</p>
                </div>
                <div>
                    <h3>"Dispatch"</h3>
                    <p>{format!("Vehicle: {}", or_placeholder(voucher.vehicle_number.as_deref()))}</p>
                    <p>{format!("Driver: {}", or_placeholder(voucher.driver_name.as_deref()))}</p>
                    <p>{format!("Place of Supply: {}", or_placeholder(voucher.place_of_supply.as_deref()))}</p>
                </div>
            </section>
            <table class="print-lines">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Description"</th>
                        <th>"HSN"</th>
                        <th class="num">"Qty"</th>
                        <th class="num">"Rate"</th>
                        <th class="num">"Tax %"</th>
                        <th class="num">"Amount"</th>
                    </tr>
                </thead>
                <tbody>
                    {voucher
                        .items
                        .iter()
                        .enumerate()
                        .map(|(index, line)| {
                            let item = items.iter().find(|i| i.id == line.item_id);
                            let hsn = item.and_then(|i| i.hsn_code.clone());
                            let unit = item.map(|i| i.unit.clone()).unwrap_or_default();
                            view! {
                                <tr>
                                    <td>{index + 1}</td>
                                    <td>{item_label(&items, line.item_id)}</td>
                                    <td>{or_placeholder(hsn.as_deref())}</td>
                                    <td class="num">{format!("{} {unit}", format_quantity(line.quantity))}</td>
                                    <td class="num">{format_amount(line.rate)}</td>
                                    <td class="num">{format_quantity(line.tax_rate)}</td>
                                    <td class="num">{format_amount(line.amount)}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
            <section class="print-totals">
                <p>{format!("Subtotal: {}", format_amount(voucher.total_amount))}</p>
                <p>{format!("Tax: {}", format_amount(voucher.tax_amount))}</p>
                <p class="strong">{format!("Grand Total: {}", format_amount(voucher.grand_total))}</p>
            </section>
            <footer class="print-signature">
                <p>{format!("For {}", branding.brand_name)}</p>
                <p class="signature-line">"Authorised Signatory"</p>
            </footer>
        </article>
    }
}
