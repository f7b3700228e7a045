use freight_types::display::{format_amount, format_quantity, or_placeholder};
use freight_types::{Item, Party, PriceOverride};
use leptos::prelude::*;

use crate::components::badge::Badge;
use crate::components::tooltip::Tooltip;

#[component]
pub fn ItemDetails(
    item: Item,
    #[prop(into)] overrides: Signal<Vec<PriceOverride>>,
    #[prop(into)] parties: Signal<Vec<Party>>,
) -> impl IntoView {
    let lowStock = item.is_low_stock();
    let unit = item.unit.clone();

    view! {
        <div class="detail-panel">
            <section class="detail-hero">
                <div>
                    <h3>{item.name.clone()}</h3>
                    <span class="mono muted">{item.code.clone()}</span>
                </div>
                <div class="detail-badges">
                    <Badge variant=item.item_type.badge() label=item.item_type.as_str() />
                    {lowStock.then(|| view! {
                        <Tooltip text="Stock is at or below the reorder level">
                            <Badge variant=freight_types::display::BadgeVariant::Error label="LOW STOCK" />
                        </Tooltip>
                    })}
                </div>
            </section>

            <section class="detail-section">
                <h4>"Stock"</h4>
                <dl class="detail-grid">
                    <dt>"Current Stock"</dt>
                    <dd class:danger=lowStock>{format!("{} {}", format_quantity(item.current_stock), unit)}</dd>
                    <dt>"Reorder Level"</dt>
                    <dd>{format!("{} {}", format_quantity(item.min_stock_level), unit)}</dd>
                </dl>
            </section>

            <section class="detail-section">
                <h4>"Pricing & Tax"</h4>
                <dl class="detail-grid">
                    <dt>"Base Price"</dt>
                    <dd>{format!("{} / {}", format_amount(item.base_price), unit)}</dd>
                    <dt>"GST Rate"</dt>
                    <dd>{format!("{}%", format_quantity(item.tax_rate))}</dd>
                    <dt>"HSN Code"</dt>
                    <dd class="mono">{or_placeholder(item.hsn_code.as_deref())}</dd>
                    <dt>"Category"</dt>
                    <dd class="capitalize">{item.category.as_str()}</dd>
                </dl>
            </section>

            {item.description.clone().map(|description| view! {
                <section class="detail-section">
                    <h4>"Description"</h4>
                    <p>{description}</p>
                </section>
            })}

            <section class="detail-section">
                <h4>"Customer Price Overrides"</h4>
                {move || {
                    let rules = overrides.get();
                    if rules.is_empty() {
                        return view! { <p class="muted">"No overrides; customers pay the base price."</p> }.into_any();
                    }
                    let partyList = parties.get();
                    view! {
                        <table class="data-table compact">
                            <thead>
                                <tr>
                                    <th>"Customer"</th>
                                    <th>"Location"</th>
                                    <th class="num">"Rate"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {rules
                                    .into_iter()
                                    .map(|rule| {
                                        let customer = partyList
                                            .iter()
                                            .find(|p| p.id == rule.party_id)
                                            .map(|p| p.name.clone())
                                            .unwrap_or_else(|| format!("Party #{}", rule.party_id));
                                        view! {
                                            <tr>
                                                <td>{customer}</td>
                                                <td class="capitalize">{rule.location.clone()}</td>
                                                <td class="num">{format_amount(rule.rate)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                        .into_any()
                }}
            </section>
        </div>
    }
}
