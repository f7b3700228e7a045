use freight_types::display::{format_amount, format_quantity};
use freight_types::{
    FieldErrors, Item, NewVoucherLine, Party, PartyType, Voucher, VoucherForm, VoucherLineForm,
    VoucherTotals, VoucherType,
};
use leptos::prelude::*;

use crate::components::toast::use_toast;

#[derive(Clone, Copy)]
struct LineRow {
    key: u64,
    item_id: RwSignal<String>,
    quantity: RwSignal<String>,
    rate: RwSignal<String>,
    tax_rate: RwSignal<String>,
}

impl LineRow {
    fn new(key: u64) -> Self {
        Self {
            key,
            item_id: RwSignal::new(String::new()),
            quantity: RwSignal::new("1".to_string()),
            rate: RwSignal::new(String::new()),
            tax_rate: RwSignal::new(String::new()),
        }
    }

    fn to_form(self) -> VoucherLineForm {
        VoucherLineForm {
            item_id: self.item_id.get_untracked(),
            quantity: self.quantity.get_untracked(),
            rate: self.rate.get_untracked(),
            tax_rate: self.tax_rate.get_untracked(),
        }
    }

    /// The line as far as it parses; incomplete lines are left out of the
    /// preview.
    fn preview(self) -> Option<NewVoucherLine> {
        Some(NewVoucherLine {
            item_id: self.item_id.get().trim().parse().ok()?,
            quantity: self.quantity.get().trim().parse().ok()?,
            rate: self.rate.get().trim().parse().ok()?,
            tax_rate: self.tax_rate.get().trim().parse().unwrap_or(0.0),
            description: None,
        })
    }
}

/// Parties offered for a voucher type: suppliers for purchase bills,
/// customers for everything else.
pub(crate) fn parties_for(voucherType: VoucherType, parties: &[Party]) -> Vec<Party> {
    let wanted = if voucherType == VoucherType::Bill {
        PartyType::Supplier
    } else {
        PartyType::Customer
    };
    parties
        .iter()
        .filter(|p| p.party_type.matches(wanted))
        .cloned()
        .collect()
}

#[component]
pub fn VoucherFormPanel<F>(
    #[prop(into)] parties: Signal<Vec<Party>>,
    #[prop(into)] items: Signal<Vec<Item>>,
    on_created: F,
) -> impl IntoView
where
    F: Fn(Voucher) + Clone + Send + Sync + 'static,
{
    let toast = use_toast();
    let voucherType = RwSignal::new(VoucherType::Challan.as_str().to_string());
    let voucherDate = RwSignal::new(chrono::Utc::now().date_naive().to_string());
    let partyId = RwSignal::new(String::new());
    let vehicleNumber = RwSignal::new(String::new());
    let driverName = RwSignal::new(String::new());
    let placeOfSupply = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let issueNow = RwSignal::new(true);
    let nextKey = StoredValue::new(1u64);
    let lines = RwSignal::new(vec![LineRow::new(0)]);
    let errors = RwSignal::new(FieldErrors::new());
    let (saving, setSaving) = signal(false);

    let addLine = move |_| {
        let key = nextKey.get_value();
        nextKey.set_value(key + 1);
        lines.update(|rows| rows.push(LineRow::new(key)));
    };

    let removeLine = move |key: u64| {
        lines.update(|rows| {
            if rows.len() > 1 {
                rows.retain(|r| r.key != key);
            }
        })
    };

    // Picking an item pre-fills its list price and tax rate.
    let selectItem = move |row: LineRow, value: String| {
        if let Some(item) = value
            .parse::<u64>()
            .ok()
            .and_then(|id| items.with_untracked(|all| all.iter().find(|i| i.id == id).cloned()))
        {
            row.rate.set(item.base_price.to_string());
            row.tax_rate.set(item.tax_rate.to_string());
        }
        row.item_id.set(value);
    };

    let totals = move || {
        let preview: Vec<NewVoucherLine> = lines.get().into_iter().filter_map(LineRow::preview).collect();
        VoucherTotals::compute(&preview)
    };

    let partyOptions = move || {
        let selected = voucherType.get().parse().unwrap_or_default();
        parties.with(|all| parties_for(selected, all))
    };

    let fieldError = move |field: String| {
        move || {
            errors
                .with(|e| e.get(&field).map(str::to_string))
                .map(|message| view! { <span class="field-error">{message}</span> })
        }
    };

    let onSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = VoucherForm {
            voucher_type: voucherType.get_untracked(),
            voucher_date: voucherDate.get_untracked(),
            party_id: partyId.get_untracked(),
            vehicle_number: vehicleNumber.get_untracked(),
            driver_name: driverName.get_untracked(),
            place_of_supply: placeOfSupply.get_untracked(),
            notes: notes.get_untracked(),
            issue_now: issueNow.get_untracked(),
            lines: lines.get_untracked().into_iter().map(LineRow::to_form).collect(),
        };
        if let Err(e) = form.parse() {
            if let Some((_, message)) = e.iter().next() {
                toast.error(message);
            }
            errors.set(e);
            return;
        }
        errors.set(FieldErrors::new());

        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            let onCreated = on_created.clone();
            setSaving.set(true);
            spawn_local(async move {
                let result = crate::api::create_voucher(form).await;
                setSaving.set(false);
                match result {
                    Ok(voucher) => {
                        toast.success(format!("{} generated", voucher.display_number()));
                        onCreated(voucher);
                    }
                    Err(e) => toast.error(crate::api::error_text(&e)),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (form, &on_created, setSaving);
        }
    };

    view! {
        <form class="voucher-form" on:submit=onSubmit novalidate>
            <div class="form-row">
                <div class="form-group">
                    <label>"Voucher Type"</label>
                    <select
                        prop:value=move || voucherType.get()
                        on:change=move |ev| {
                            voucherType.set(event_target_value(&ev));
                            partyId.set(String::new());
                        }
                    >
                        {VoucherType::ALL
                            .iter()
                            .map(|t| view! { <option value=t.as_str()>{t.title()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label>"Date"</label>
                    <input type="date" bind:value=voucherDate />
                    {fieldError("voucher_date".to_string())}
                </div>
            </div>
            <div class="form-group">
                <label>"Party"</label>
                <select prop:value=move || partyId.get() on:change=move |ev| partyId.set(event_target_value(&ev))>
                    <option value="">"Select party"</option>
                    <For each=partyOptions key=|p| p.id let:party>
                        <option value=party.id.to_string()>{party.name.clone()}</option>
                    </For>
                </select>
                {fieldError("party_id".to_string())}
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label>"Vehicle Number"</label>
                    <input type="text" placeholder="WB34AB1234" bind:value=vehicleNumber />
                </div>
                <div class="form-group">
                    <label>"Driver"</label>
                    <input type="text" bind:value=driverName />
                </div>
            </div>
            <div class="form-group">
                <label>"Place of Supply"</label>
                <input type="text" bind:value=placeOfSupply />
            </div>

            <div class="line-items">
                <div class="line-items-header">
                    <h4>"Line Items"</h4>
                    <button type="button" class="btn btn-ghost btn-sm" on:click=addLine>"+ Add Line"</button>
                </div>
                {fieldError("items".to_string())}
                <For
                    each=move || { lines.get().into_iter().enumerate().collect::<Vec<_>>() }
                    key=|(index, row)| (*index, row.key)
                    children=move |(index, row): (usize, LineRow)| {
                        let quantity = row.quantity;
                        let rate = row.rate;
                        let taxRate = row.tax_rate;
                        view! {
                            <div class="line-item">
                                <select
                                    prop:value=move || row.item_id.get()
                                    on:change=move |ev| selectItem(row, event_target_value(&ev))
                                >
                                    <option value="">"Select item"</option>
                                    <For each=move || items.get() key=|i| i.id let:item>
                                        <option value=item.id.to_string()>{item.select_label()}</option>
                                    </For>
                                </select>
                                <input type="number" min="0" step="any" placeholder="Qty" bind:value=quantity />
                                <input type="number" min="0" step="any" placeholder="Rate" bind:value=rate />
                                <input type="number" min="0" step="any" placeholder="Tax %" bind:value=taxRate />
                                <button
                                    type="button"
                                    class="btn-icon"
                                    aria-label="Remove line"
                                    on:click=move |_| removeLine(row.key)
                                >
                                    "\u{00D7}"
                                </button>
                                {fieldError(format!("items[{index}].item_id"))}
                                {fieldError(format!("items[{index}].quantity"))}
                                {fieldError(format!("items[{index}].rate"))}
                            </div>
                        }
                    }
                />
            </div>

            <dl class="totals">
                <dt>"Subtotal"</dt>
                <dd>{move || format_amount(totals().total_amount)}</dd>
                <dt>"Tax"</dt>
                <dd>{move || format_amount(totals().tax_amount)}</dd>
                <dt class="grand">"Grand Total"</dt>
                <dd class="grand">{move || format_amount(totals().grand_total)}</dd>
                <dt>"Lines"</dt>
                <dd>{move || format_quantity(lines.with(|l| l.len()) as f64)}</dd>
            </dl>

            <div class="form-group">
                <label>"Notes"</label>
                <textarea rows="2" bind:value=notes></textarea>
            </div>
            <label class="checkbox">
                <input type="checkbox" bind:checked=issueNow />
                "Issue immediately (updates stock and ledger)"
            </label>
            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                {move || if saving.get() { "Generating..." } else { "Generate Voucher" }}
            </button>
        </form>
    }
}
